//! Access log: one `request_completed` event per request.
//!
//! Records the matched route pattern rather than relying on the raw path
//! alone, since paths carry usernames, and how authentication ended
//! (`auth`), read from the [`AuthOutcome`] that `JwtAuth` leaves in request
//! extensions. Requests answered before `JwtAuth` runs, such as CORS
//! pre-flights, are logged with `auth = "not_reached"`.

use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn, Level};

use crate::logging::pii::Redacted;
use crate::middleware::jwt_auth::AuthOutcome;
use crate::trace_ctx;

pub struct StructuredLogger;

/// Server errors log at ERROR, client errors at WARN, the rest at INFO.
pub fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

fn auth_label(outcome: Option<AuthOutcome>) -> &'static str {
    outcome.map_or("not_reached", |outcome| outcome.as_str())
}

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let method = req.method().to_string();
        let path = req.path().to_owned();

        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;

            let (status, route, outcome) = match &result {
                Ok(res) => {
                    let request = res.request();
                    let outcome = request.extensions().get::<AuthOutcome>().copied();
                    (res.status(), request.match_pattern(), outcome)
                }
                Err(err) => (err.as_response_error().status_code(), None, None),
            };

            let route = route.unwrap_or_else(|| "unmatched".to_owned());
            let auth = auth_label(outcome);
            let status_code = status.as_u16();
            let duration_us = start.elapsed().as_micros() as u64;
            // Runs inside RequestTrace's scope.
            let trace_id = trace_ctx::trace_id();

            let level = level_for(status);
            if level == Level::ERROR {
                error!(http.method = %method, http.route = %route, url.path = %Redacted(&path), http.status_code = status_code, auth, duration_us, trace_id = %trace_id, "request_completed");
            } else if level == Level::WARN {
                warn!(http.method = %method, http.route = %route, url.path = %Redacted(&path), http.status_code = status_code, auth, duration_us, trace_id = %trace_id, "request_completed");
            } else {
                info!(http.method = %method, http.route = %route, url.path = %Redacted(&path), http.status_code = status_code, auth, duration_us, trace_id = %trace_id, "request_completed");
            }

            result
        })
    }
}
