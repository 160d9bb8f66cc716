//! HTTP tests for the calendar pages, event JSON APIs, dashboard and settings.
//!
//! Each test builds the real route table over a `MemoryStore` and signs in
//! through the test-only session route.

mod common;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::web;

use common::*;
use societyhub::store::Table;

fn seeded() -> web::Data<MemoryStore> {
    web::Data::new(MemoryStore::with_events(sample_event_rows()))
}

async fn body_text<B: actix_web::body::MessageBody>(resp: actix_web::dev::ServiceResponse<B>) -> String {
    String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf-8 body")
}

// ============================================================================
// ACCESS
// ============================================================================

#[actix_rt::test]
async fn test_anonymous_request_redirects_to_login() {
    let store = seeded();
    let app = test_app!(store);

    let req = TestRequest::get().uri("/calendar").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "https://auth.societyhub.test/sign-in");
}

#[actix_rt::test]
async fn test_exhibitor_cannot_open_calendar() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "exhibitor");

    let req = TestRequest::get().uri("/calendar").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn test_root_redirects_to_dashboard() {
    let store = seeded();
    let app = test_app!(store);

    let req = TestRequest::get().uri("/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/dashboard");
}

#[actix_rt::test]
async fn test_unknown_path_is_not_found() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "admin");

    let req = TestRequest::get().uri("/no-such-page").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

// ============================================================================
// CALENDAR PAGE
// ============================================================================

#[actix_rt::test]
async fn test_month_grid_shows_events_of_selected_day() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "event_manager");

    let req = TestRequest::get()
        .uri("/calendar?month=2030-04&date=2030-04-10")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("April 2030"));
    assert!(html.contains("Spring Expo"));
    assert!(html.contains("Members Meetup"));
    assert!(html.contains("bg-blue-500"));
}

#[actix_rt::test]
async fn test_day_with_one_event_opens_it() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "event_manager");

    let req = TestRequest::get()
        .uri("/calendar/day?date=2030-04-22")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/calendar?month=2030-04&date=2030-04-22&event=3");
}

#[actix_rt::test]
async fn test_day_with_several_events_only_selects() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "event_manager");

    let req = TestRequest::get()
        .uri("/calendar/day?date=2030-04-10")
        .cookie(cookie)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(location(&resp), "/calendar?month=2030-04&date=2030-04-10");
}

#[actix_rt::test]
async fn test_load_failure_still_renders_grid() {
    let store = seeded();
    store.fail(Op::Select);
    let app = test_app!(store);
    let cookie = sign_in!(app, "admin");

    let req = TestRequest::get().uri("/calendar?month=2030-04").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("Events could not be loaded"));
    assert!(!html.contains("Spring Expo"));
}

// ============================================================================
// EVENT WRITES
// ============================================================================

#[actix_rt::test]
async fn test_create_event_redirects_to_new_event() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "event_manager");

    let req = TestRequest::post()
        .uri("/calendar/events")
        .cookie(cookie)
        .set_form([
            ("csrf_token", CSRF_TOKEN),
            ("title", "Autumn Expo"),
            ("date", "2030-10-01"),
            ("time", "10:00"),
            ("venue", "Hall B"),
            ("status", "published"),
            ("attendees", "150"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/calendar?month=2030-10&date=2030-10-01&event=100");
    let rows = store.rows(Table::Events);
    assert_eq!(rows.len(), 5);
    assert_eq!(rows[4]["created_by"], serde_json::json!(ADMIN_EMAIL));
}

#[actix_rt::test]
async fn test_create_with_bad_csrf_is_forbidden() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "event_manager");

    let req = TestRequest::post()
        .uri("/calendar/events")
        .cookie(cookie)
        .set_form([("csrf_token", "forged"), ("title", "Sneaky"), ("date", "2030-10-01")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    assert_eq!(store.rows(Table::Events).len(), 4);
}

#[actix_rt::test]
async fn test_invalid_event_form_is_redisplayed() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "event_manager");

    let req = TestRequest::post()
        .uri("/calendar/events")
        .cookie(cookie)
        .set_form([("csrf_token", CSRF_TOKEN), ("title", ""), ("date", "2030-10-01")])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("Title is required"));
    assert!(store.calls().iter().all(|op| *op != Op::Insert));
}

#[actix_rt::test]
async fn test_update_event_changes_status() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "admin");

    let req = TestRequest::post()
        .uri("/calendar/events/1")
        .cookie(cookie)
        .set_form([
            ("csrf_token", CSRF_TOKEN),
            ("title", "Spring Expo"),
            ("date", "2030-04-10"),
            ("status", "cancelled"),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.rows(Table::Events)[0]["status"], serde_json::json!("cancelled"));
}

#[actix_rt::test]
async fn test_blank_optional_fields_clear_stored_values() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "admin");

    let edit = |description: &'static str, event_type: &'static str| {
        TestRequest::post()
            .uri("/calendar/events/1")
            .cookie(cookie.clone())
            .set_form([
                ("csrf_token", CSRF_TOKEN),
                ("title", "Spring Expo"),
                ("date", "2030-04-10"),
                ("description", description),
                ("event_type", event_type),
            ])
            .to_request()
    };

    let resp = test::call_service(&app, edit("Bring badges", "expo")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.rows(Table::Events)[0]["description"], serde_json::json!("Bring badges"));

    let resp = test::call_service(&app, edit("", "  ")).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let rows = store.rows(Table::Events);
    let row = &rows[0];
    assert_eq!(row["description"], serde_json::Value::Null);
    assert_eq!(row["event_type"], serde_json::Value::Null);
    assert_eq!(row["title"], serde_json::json!("Spring Expo"));
}

#[actix_rt::test]
async fn test_delete_event_flashes_result() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "admin");

    let req = TestRequest::post()
        .uri("/calendar/events/3/delete")
        .cookie(cookie.clone())
        .set_form([("csrf_token", CSRF_TOKEN)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(store.rows(Table::Events).len(), 3);

    let cookie = next_cookie(&resp, cookie);
    let req = TestRequest::get().uri("/calendar").cookie(cookie).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Event deleted"));
}

#[actix_rt::test]
async fn test_delete_missing_event_reports_not_found() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "admin");

    let req = TestRequest::post()
        .uri("/calendar/events/999/delete")
        .cookie(cookie.clone())
        .set_form([("csrf_token", CSRF_TOKEN)])
        .to_request();
    let resp = test::call_service(&app, req).await;
    let cookie = next_cookie(&resp, cookie);

    let req = TestRequest::get().uri("/calendar").cookie(cookie).to_request();
    let html = body_text(test::call_service(&app, req).await).await;
    assert!(html.contains("Event not found"));
}

// ============================================================================
// JSON API
// ============================================================================

#[actix_rt::test]
async fn test_api_lists_events_for_day() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "event_manager");

    let req = TestRequest::get()
        .uri("/api/events/day?date=2030-04-10")
        .cookie(cookie)
        .to_request();
    let events: Vec<serde_json::Value> = test::call_and_read_body_json(&app, req).await;

    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e["date"] == "2030-04-10"));
}

#[actix_rt::test]
async fn test_api_reports_load_failure() {
    let store = seeded();
    store.fail(Op::Select);
    let app = test_app!(store);
    let cookie = sign_in!(app, "admin");

    let req = TestRequest::get().uri("/api/events").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
}

#[actix_rt::test]
async fn test_api_rejects_bad_day() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "admin");

    let req = TestRequest::get().uri("/api/events/day?date=10-04-2030").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// DASHBOARD AND SETTINGS
// ============================================================================

#[actix_rt::test]
async fn test_dashboard_greets_user_and_counts_events() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "admin");

    let req = TestRequest::get().uri("/dashboard").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("Ada Admin"));
    assert!(html.contains("Spring Expo"));
    assert!(!html.contains("Old Fair"));
}

#[actix_rt::test]
async fn test_settings_security_tab_shows_login_url() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "super_admin");

    let req = TestRequest::get().uri("/settings?tab=security").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let html = body_text(resp).await;
    assert!(html.contains("https://auth.societyhub.test/sign-in"));
}

#[actix_rt::test]
async fn test_event_manager_cannot_open_settings() {
    let store = seeded();
    let app = test_app!(store);
    let cookie = sign_in!(app, "event_manager");

    let req = TestRequest::get().uri("/settings").cookie(cookie).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
}
