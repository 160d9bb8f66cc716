use actix_web::{HttpResponse, web};

use crate::auth;
use crate::handlers::{calendar_handlers, dashboard, onboarding_handlers, settings_handlers};
use crate::store::TableStore;

/// Register every page and API route against the store type `S`.
/// Callers provide `web::Data<S>` and `web::Data<AppConfig>`.
pub fn configure<S: TableStore + 'static>(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(|| async {
        HttpResponse::SeeOther()
            .insert_header(("Location", "/dashboard"))
            .finish()
    }))
    .service(
        web::scope("")
            .wrap(actix_web::middleware::from_fn(auth::middleware::require_auth))
            .route("/dashboard", web::get().to(dashboard::index::<S>))
            // Onboarding wizards
            .route("/onboarding/exhibitor", web::get().to(onboarding_handlers::exhibitor::form))
            .route("/onboarding/exhibitor", web::post().to(onboarding_handlers::exhibitor::submit::<S>))
            .route("/onboarding/society", web::get().to(onboarding_handlers::society::form))
            .route("/onboarding/society", web::post().to(onboarding_handlers::society::submit::<S>))
            // Calendar
            .route("/calendar", web::get().to(calendar_handlers::index::<S>))
            .route("/calendar/day", web::get().to(calendar_handlers::select_day::<S>))
            .route("/calendar/events", web::post().to(calendar_handlers::create::<S>))
            .route("/calendar/events/{id}", web::post().to(calendar_handlers::update::<S>))
            .route("/calendar/events/{id}/delete", web::post().to(calendar_handlers::delete::<S>))
            // Event JSON APIs
            .route("/api/events", web::get().to(calendar_handlers::api::list::<S>))
            .route("/api/events/upcoming", web::get().to(calendar_handlers::api::upcoming_events::<S>))
            .route("/api/events/day", web::get().to(calendar_handlers::api::day::<S>))
            // Settings
            .route("/settings", web::get().to(settings_handlers::list)),
    );
}

/// Fallback for unmatched paths.
pub async fn not_found() -> HttpResponse {
    let html = include_str!("../templates/errors/404.html");
    HttpResponse::NotFound()
        .content_type("text/html; charset=utf-8")
        .body(html)
}
