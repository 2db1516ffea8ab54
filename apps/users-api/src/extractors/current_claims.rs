use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::auth::claims::Claims;
use crate::error::AppError;

/// Verified claims for the current request.
///
/// Read from request extensions, where the `JwtAuth` middleware stores them.
/// Missing claims mean the route was mounted without that middleware, which is
/// a server bug rather than a client error.
#[derive(Debug, Clone)]
pub struct CurrentClaims(pub Claims);

impl std::ops::Deref for CurrentClaims {
    type Target = Claims;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for CurrentClaims {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .map(CurrentClaims)
            .ok_or_else(|| AppError::internal("authenticated claims missing from request"));

        ready(claims)
    }
}
