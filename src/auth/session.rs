use actix_session::Session;
use crate::errors::AppError;

// Session keys written by the platform's auth service.
pub const USER_ID_KEY: &str = "user_id";
pub const EMAIL_KEY: &str = "email";
pub const DISPLAY_NAME_KEY: &str = "display_name";
pub const ROLES_KEY: &str = "roles";
const FLASH_KEY: &str = "flash";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    SuperAdmin,
    Admin,
    EventManager,
    Exhibitor,
    Society,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::SuperAdmin => "super_admin",
            Role::Admin => "admin",
            Role::EventManager => "event_manager",
            Role::Exhibitor => "exhibitor",
            Role::Society => "society",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "super_admin" => Some(Role::SuperAdmin),
            "admin" => Some(Role::Admin),
            "event_manager" => Some(Role::EventManager),
            "exhibitor" => Some(Role::Exhibitor),
            "society" => Some(Role::Society),
            _ => None,
        }
    }
}

/// Who may onboard exhibitors and societies.
pub const ONBOARDING_ROLES: &[Role] = &[Role::SuperAdmin, Role::Admin];
/// Who may see and edit the event calendar.
pub const CALENDAR_ROLES: &[Role] = &[Role::SuperAdmin, Role::Admin, Role::EventManager];
pub const SETTINGS_ROLES: &[Role] = &[Role::SuperAdmin, Role::Admin];

/// Role list with a `has()` method for use in Askama templates.
#[derive(Debug, Clone, Default)]
pub struct Roles(pub Vec<Role>);

impl Roles {
    pub fn has(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    pub fn has_any(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.has(*r))
    }

    /// Unknown role names are dropped.
    pub fn from_csv(csv: &str) -> Self {
        Roles(csv.split(',').filter_map(Role::parse).collect())
    }
}

/// The signed-in user, resolved from the session once per request and passed
/// on explicitly from there.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
    pub email: String,
    pub display_name: String,
    pub roles: Roles,
}

impl CurrentUser {
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        self.roles.has_any(roles)
    }

    /// Identity recorded in audit columns.
    pub fn identity(&self) -> &str {
        if self.email.is_empty() { &self.id } else { &self.email }
    }

    pub fn name(&self) -> &str {
        if self.display_name.is_empty() { self.identity() } else { &self.display_name }
    }

    pub fn avatar_initial(&self) -> String {
        self.name().chars().next().unwrap_or('?').to_uppercase().to_string()
    }
}

fn get_string(session: &Session, key: &str) -> Result<Option<String>, AppError> {
    session
        .get::<String>(key)
        .map_err(|e| AppError::Session(format!("Failed to read '{key}': {e}")))
}

pub fn current_user(session: &Session) -> Result<Option<CurrentUser>, AppError> {
    let Some(id) = get_string(session, USER_ID_KEY)? else {
        return Ok(None);
    };
    Ok(Some(CurrentUser {
        id,
        email: get_string(session, EMAIL_KEY)?.unwrap_or_default(),
        display_name: get_string(session, DISPLAY_NAME_KEY)?.unwrap_or_default(),
        roles: Roles::from_csv(&get_string(session, ROLES_KEY)?.unwrap_or_default()),
    }))
}

/// Resolve the user and check it holds one of `roles`; returns Err(AppError) if denied.
pub fn require_any_role(session: &Session, roles: &[Role]) -> Result<CurrentUser, AppError> {
    let user = current_user(session)?
        .ok_or_else(|| AppError::Session("Not logged in".to_string()))?;

    if user.has_any_role(roles) {
        Ok(user)
    } else {
        let wanted = roles.iter().map(|r| r.as_str()).collect::<Vec<_>>().join(", ");
        Err(AppError::PermissionDenied(format!("requires one of: {wanted}")))
    }
}

pub fn set_flash(session: &Session, message: &str) {
    let _ = session.insert(FLASH_KEY, message);
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}
