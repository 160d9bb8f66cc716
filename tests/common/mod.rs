//! Shared test infrastructure.
//!
//! `MemoryStore` stands in for the Postgres table store so the event store,
//! onboarding and HTTP handlers can be exercised without a database.
//!
//! - `MemoryStore::with_events(rows)` seeds the `events` table
//! - `fail(Op::Insert)` makes every later insert return an error
//! - `teardown_during_calls(guard)` tears a view down while a call is in flight
//! - `test_app!` builds an actix service with a cookie session and a
//!   `/test/sign-in` route standing in for the external auth service

#![allow(dead_code)]

use serde_json::{Value, json};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

use societyhub::config::AppConfig;
use societyhub::models::event::MountGuard;
use societyhub::store::{OrderBy, Row, StoreError, Table, TableStore, row_id};

// ============================================================================
// TEST CONSTANTS
// ============================================================================

pub const ADMIN_ID: &str = "1";
pub const ADMIN_EMAIL: &str = "admin@societyhub.test";

// ============================================================================
// IN-MEMORY TABLE STORE
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Op {
    Select,
    Insert,
    Update,
    Delete,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RefCell<HashMap<Table, Vec<Row>>>,
    next_id: Cell<i64>,
    failing: RefCell<HashSet<Op>>,
    teardown: RefCell<Option<MountGuard>>,
    calls: RefCell<Vec<Op>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            next_id: Cell::new(100),
            ..Default::default()
        }
    }

    pub fn with_events(rows: Vec<Value>) -> Self {
        let store = Self::new();
        let rows = rows.into_iter().filter_map(|v| match v {
            Value::Object(map) => Some(map),
            _ => None,
        });
        store.tables.borrow_mut().entry(Table::Events).or_default().extend(rows);
        store
    }

    pub fn fail(&self, op: Op) {
        self.failing.borrow_mut().insert(op);
    }

    pub fn recover(&self, op: Op) {
        self.failing.borrow_mut().remove(&op);
    }

    /// Tear `guard` down from inside the next store calls.
    pub fn teardown_during_calls(&self, guard: MountGuard) {
        *self.teardown.borrow_mut() = Some(guard);
    }

    pub fn rows(&self, table: Table) -> Vec<Row> {
        self.tables.borrow().get(&table).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<Op> {
        self.calls.borrow().clone()
    }

    fn enter(&self, op: Op, table: Table) -> Result<(), StoreError> {
        self.calls.borrow_mut().push(op);
        if let Some(guard) = self.teardown.borrow().as_ref() {
            guard.teardown();
        }
        if self.failing.borrow().contains(&op) {
            return Err(StoreError::Rejected(format!("{op:?} on {table} unavailable")));
        }
        Ok(())
    }
}

fn sort_key(row: &Row, column: &str) -> String {
    match row.get(column) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl TableStore for MemoryStore {
    async fn select(&self, table: Table, order: Option<OrderBy>) -> Result<Vec<Row>, StoreError> {
        self.enter(Op::Select, table)?;
        let mut rows = self.rows(table);
        if let Some(o) = order {
            rows.sort_by_key(|r| sort_key(r, o.column));
            if !o.ascending {
                rows.reverse();
            }
        }
        Ok(rows)
    }

    async fn insert(&self, table: Table, mut row: Row) -> Result<Row, StoreError> {
        self.enter(Op::Insert, table)?;
        if row_id(&row).is_none() {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            row.insert("id".into(), json!(id));
        }
        self.tables.borrow_mut().entry(table).or_default().push(row.clone());
        Ok(row)
    }

    async fn update(&self, table: Table, id: &str, patch: Row) -> Result<Row, StoreError> {
        self.enter(Op::Update, table)?;
        let mut tables = self.tables.borrow_mut();
        let row = tables
            .entry(table)
            .or_default()
            .iter_mut()
            .find(|r| row_id(r).as_deref() == Some(id))
            .ok_or_else(|| StoreError::NotFound { table, id: id.to_string() })?;
        row.extend(patch);
        Ok(row.clone())
    }

    async fn delete(&self, table: Table, id: &str) -> Result<(), StoreError> {
        self.enter(Op::Delete, table)?;
        let mut tables = self.tables.borrow_mut();
        let rows = tables.entry(table).or_default();
        let before = rows.len();
        rows.retain(|r| row_id(r).as_deref() != Some(id));
        if rows.len() == before {
            return Err(StoreError::NotFound { table, id: id.to_string() });
        }
        Ok(())
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub fn test_config() -> AppConfig {
    AppConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/societyhub_test".to_string()),
        "APP_NAME" => Some("SocietyHub Test".to_string()),
        "LOGIN_URL" => Some("https://auth.societyhub.test/sign-in".to_string()),
        _ => None,
    })
    .expect("test config")
}

/// Events in the backend's mixed column vocabulary.
pub fn sample_event_rows() -> Vec<Value> {
    vec![
        json!({"id": 1, "title": "Spring Expo", "date": "2030-04-10", "time": "09:00",
               "venue": "Hall A", "status": "published", "attendees": 300}),
        json!({"event_id": "2", "name": "Members Meetup", "start_date": "2030-04-10",
               "location": "Room 4", "event_status": "ongoing", "attendee_count": "45"}),
        json!({"id": 3, "event_name": "Board Review", "event_date": "2030-04-22",
               "start_time": "14:30", "place": "Boardroom", "status": "draft"}),
        json!({"id": 4, "title": "Old Fair", "date": "2001-01-05", "status": "completed"}),
    ]
}

// ============================================================================
// HTTP HARNESS
// ============================================================================

/// Query string for `/test/sign-in`.
pub fn sign_in_path(roles: &str) -> String {
    format!("/test/sign-in?roles={roles}")
}

#[derive(serde::Deserialize)]
pub struct SignInQuery {
    pub roles: String,
}

/// Writes the session keys the external auth service would set, plus a
/// known CSRF token.
pub async fn test_sign_in(
    session: actix_session::Session,
    query: actix_web::web::Query<SignInQuery>,
) -> actix_web::HttpResponse {
    session.insert("user_id", ADMIN_ID).expect("session insert");
    session.insert("email", ADMIN_EMAIL).expect("session insert");
    session.insert("display_name", "Ada Admin").expect("session insert");
    session.insert("roles", &query.roles).expect("session insert");
    session.insert("csrf_token", CSRF_TOKEN).expect("session insert");
    actix_web::HttpResponse::Ok().finish()
}

pub const CSRF_TOKEN: &str = "a1b2c3d4e5f60718293a4b5c6d7e8f90a1b2c3d4e5f60718293a4b5c6d7e8f90";

/// Build the app under test around `$store` (a `web::Data<MemoryStore>`).
#[macro_export]
macro_rules! test_app {
    ($store:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .wrap(
                    actix_session::SessionMiddleware::builder(
                        actix_session::storage::CookieSessionStore::default(),
                        actix_web::cookie::Key::generate(),
                    )
                    .cookie_secure(false)
                    .build(),
                )
                .app_data($store.clone())
                .app_data(actix_web::web::Data::new($crate::common::test_config()))
                .route("/test/sign-in", actix_web::web::get().to($crate::common::test_sign_in))
                .configure(societyhub::routes::configure::<$crate::common::MemoryStore>)
                .default_service(actix_web::web::to(societyhub::routes::not_found)),
        )
        .await
    };
}

/// Sign in with `roles` and return the session cookie.
#[macro_export]
macro_rules! sign_in {
    ($app:expr, $roles:expr) => {{
        let req = actix_web::test::TestRequest::get()
            .uri(&$crate::common::sign_in_path($roles))
            .to_request();
        let resp = actix_web::test::call_service(&$app, req).await;
        resp.response()
            .cookies()
            .next()
            .map(|c| c.into_owned())
            .expect("session cookie")
    }};
}

/// The session cookie after `resp`: the one it set, or `current` when the
/// session was left unchanged.
pub fn next_cookie<B>(
    resp: &actix_web::dev::ServiceResponse<B>,
    current: actix_web::cookie::Cookie<'static>,
) -> actix_web::cookie::Cookie<'static> {
    resp.response()
        .cookies()
        .next()
        .map(|c| c.into_owned())
        .unwrap_or(current)
}

pub fn location<B>(resp: &actix_web::dev::ServiceResponse<B>) -> String {
    resp.headers()
        .get(actix_web::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
