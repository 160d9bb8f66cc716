use actix_session::SessionExt;
use actix_web::{
    Error, HttpResponse,
    body::MessageBody,
    dev::{ServiceRequest, ServiceResponse},
    middleware::Next,
    web,
};

use crate::auth::session::USER_ID_KEY;
use crate::config::AppConfig;

/// Middleware function that checks for an authenticated session.
/// Redirects to the platform sign-in page if no session is found.
pub async fn require_auth(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, Error> {
    let session = req.get_session();
    let has_user = session.get::<String>(USER_ID_KEY).unwrap_or(None).is_some();

    if !has_user {
        let login_url = req
            .app_data::<web::Data<AppConfig>>()
            .map(|c| c.login_url.clone())
            .unwrap_or_else(|| "/login".to_string());
        let response = HttpResponse::SeeOther()
            .insert_header(("Location", login_url))
            .finish();
        return Ok(req.into_response(response).map_into_right_body());
    }

    next.call(req).await.map(|res| res.map_into_left_body())
}
