use actix_web::{web, HttpResponse};

use crate::error::AppError;
use crate::extractors::current_claims::CurrentClaims;
use crate::services::users as users_service;
use crate::state::app_state::AppState;

async fn list_users(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let users = users_service::list_users(app_state.users()).await?;
    Ok(HttpResponse::Ok().json(users))
}

async fn get_user(
    path: web::Path<String>,
    claims: CurrentClaims,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let requested = path.into_inner();
    let user = users_service::get_user(app_state.users(), &claims, &requested).await?;
    Ok(HttpResponse::Ok().json(user))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(list_users))
        .route("/{username}", web::get().to(get_user));
}
