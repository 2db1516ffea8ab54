use actix_web::{web, HttpResponse};
use serde::Serialize;
use tracing::warn;

use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'static str>,
}

/// Liveness: healthy iff the user store answers a count query.
/// Reachable without credentials; the bearer header is never looked at.
async fn health(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    match app_state.users().count().await {
        Ok(_) => Ok(HttpResponse::Ok().json(HealthResponse {
            status: "healthy",
            error: None,
        })),
        Err(e) => {
            warn!(error = %Redacted(&e.to_string()), "health check failed");
            Ok(HttpResponse::ServiceUnavailable().json(HealthResponse {
                status: "unhealthy",
                error: Some("Database connection failed"),
            }))
        }
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health));
}
