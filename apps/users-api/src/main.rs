use actix_web::{web, HttpServer};
use tracing::{error, info};
use users_api::app::build_app;
use users_api::config::AppConfig;
use users_api::infra::state::build_state;
use users_api::routes;
use users_api::telemetry;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = telemetry::init_tracing() {
        eprintln!("failed to install log subscriber: {e}");
        std::process::exit(1);
    }

    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "invalid configuration");
            std::process::exit(1);
        }
    };

    let app_state = match build_state()
        .with_security(config.security())
        .with_database_url(config.database_url.clone())
        .build()
        .await
    {
        Ok(state) => state,
        Err(e) => {
            error!(error = %e, "failed to build application state");
            std::process::exit(1);
        }
    };

    info!(host = %config.host, port = config.port, "starting users-api");

    let data = web::Data::new(app_state);
    let origins = config.cors_allowed_origins.clone();

    HttpServer::new(move || build_app(data.clone(), &origins, routes::configure))
        .bind((config.host.as_str(), config.port))?
        .run()
        .await
}
