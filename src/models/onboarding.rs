use chrono::Utc;
use serde_json::{Value, json};

use crate::store::{Row, StoreError, Table, TableStore, row_id};
use crate::wizard::{ExhibitorForm, SocietyForm};

pub const EXHIBITOR_ROLE: &str = "exhibitor";
pub const SOCIETY_ROLE: &str = "society";

/// Build the `users` row for an onboarded organisation. The full form goes
/// into `profile` so nothing entered in the wizard is lost.
fn user_row(
    email: &str,
    full_name: &str,
    organization: &str,
    role: &str,
    status: &str,
    profile: Value,
    creator: &str,
) -> Row {
    let now = Utc::now().to_rfc3339();
    let row = json!({
        "email": email.trim(),
        "full_name": full_name.trim(),
        "organization": organization.trim(),
        "role": role,
        "status": status.trim(),
        "profile": profile,
        "created_by": creator,
        "created_at": now,
        "updated_at": now,
    });
    match row {
        Value::Object(map) => map,
        _ => Row::new(),
    }
}

async fn insert_user<S: TableStore>(store: &S, row: Row) -> Result<String, StoreError> {
    let saved = store.insert(Table::Users, row).await?;
    row_id(&saved).ok_or_else(|| StoreError::Rejected("insert returned no id".to_string()))
}

/// Insert an exhibitor account; returns the new row id.
pub async fn register_exhibitor<S: TableStore>(
    store: &S,
    form: ExhibitorForm,
    creator: &str,
) -> Result<String, StoreError> {
    let profile = serde_json::to_value(&form)?;
    let row = user_row(
        &form.email,
        &form.contact_person,
        &form.company_name,
        EXHIBITOR_ROLE,
        &form.status,
        profile,
        creator,
    );
    insert_user(store, row).await
}

/// Insert a society account; returns the new row id.
pub async fn register_society<S: TableStore>(
    store: &S,
    form: SocietyForm,
    creator: &str,
) -> Result<String, StoreError> {
    let profile = serde_json::to_value(&form)?;
    let row = user_row(
        &form.email,
        &form.contact_person,
        &form.society_name,
        SOCIETY_ROLE,
        &form.status,
        profile,
        creator,
    );
    insert_user(store, row).await
}
