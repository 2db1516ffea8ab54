//! Application assembly shared by the server and the test app builder.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::web::{self, ServiceConfig};
use actix_web::{App, Error};

use crate::middleware::cors::cors_middleware;
use crate::middleware::jwt_auth::JwtAuth;
use crate::middleware::request_trace::RequestTrace;
use crate::middleware::structured_logger::StructuredLogger;
use crate::middleware::trace_span::TraceSpan;
use crate::state::app_state::AppState;

/// Build the app with the full middleware stack around `routes`.
///
/// Request order, outermost first:
///
/// RequestTrace -> TraceSpan -> StructuredLogger -> CORS -> JwtAuth -> routes
///
/// CORS sits outside authentication so pre-flight requests are answered
/// before any credential check and rejections still carry CORS headers.
pub fn build_app<F>(
    state: web::Data<AppState>,
    cors_allowed_origins: &[String],
    routes: F,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    F: FnOnce(&mut ServiceConfig) + 'static,
{
    let auth = JwtAuth::new(state.security.clone());

    App::new()
        .wrap(auth)
        .wrap(cors_middleware(cors_allowed_origins))
        .wrap(StructuredLogger)
        .wrap(TraceSpan)
        .wrap(RequestTrace)
        .app_data(state)
        .configure(routes)
}
