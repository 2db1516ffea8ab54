use actix_web::web;

pub mod users;

/// Register every application route.
///
/// `main.rs` and the test app builder both mount this under the same
/// middleware stack; authentication is applied by `JwtAuth`, not per route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    // Health check: /health (public)
    cfg.configure(crate::health::configure_routes);

    // User routes: /users/**
    cfg.service(web::scope("/users").configure(users::configure_routes));
}
