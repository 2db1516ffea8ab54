//! Bearer-token authentication middleware
//!
//! Wraps the whole application. Every request except the public paths
//! (`/health`) and CORS pre-flight (`OPTIONS`) requests must carry
//! `Authorization: Bearer <token>`. A verified token's claims are stored in
//! request extensions before the downstream service is called; any failure is
//! answered with a 401 Problem Details response and the request never reaches
//! a handler. Either way the [`AuthOutcome`] is left in request extensions for
//! the access log.

use std::rc::Rc;
use std::sync::Arc;

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{header, Method};
use actix_web::{Error, HttpMessage, HttpResponse};
use futures_util::future::{ready, LocalBoxFuture, Ready};
use tracing::debug;

use crate::auth::claims::Claims;
use crate::auth::jwt::{verify_token, VerificationFailure};
use crate::error::AppError;
use crate::logging::security;
use crate::state::security_config::SecurityConfig;

/// Paths reachable without a credential.
const DEFAULT_PUBLIC_PATHS: &[&str] = &["/health"];

/// Why a request was not authenticated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthRejection {
    /// No `Authorization` header, or not of the form `Bearer <token>`.
    MissingCredential,
    /// A bearer token was present but failed verification.
    InvalidCredential(VerificationFailure),
}

impl From<AuthRejection> for AppError {
    fn from(rejection: AuthRejection) -> Self {
        match rejection {
            AuthRejection::MissingCredential => AppError::unauthorized_missing_bearer(),
            AuthRejection::InvalidCredential(_) => AppError::unauthorized_invalid_jwt(),
        }
    }
}

/// What the middleware decided for one request.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthDecision {
    /// Public path or pre-flight; no credential required.
    PassThrough,
    Authenticated(Claims),
    Rejected(AuthRejection),
}

impl AuthDecision {
    pub fn outcome(&self) -> AuthOutcome {
        match self {
            AuthDecision::PassThrough => AuthOutcome::Public,
            AuthDecision::Authenticated(_) => AuthOutcome::Authenticated,
            AuthDecision::Rejected(AuthRejection::MissingCredential) => {
                AuthOutcome::MissingCredential
            }
            AuthDecision::Rejected(AuthRejection::InvalidCredential(kind)) => {
                AuthOutcome::InvalidCredential(*kind)
            }
        }
    }
}

/// Claim-free summary of an [`AuthDecision`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthOutcome {
    Public,
    Authenticated,
    MissingCredential,
    InvalidCredential(VerificationFailure),
}

impl AuthOutcome {
    /// Log label. Invalid credentials are labelled with the verification kind.
    pub const fn as_str(&self) -> &'static str {
        match self {
            AuthOutcome::Public => "public",
            AuthOutcome::Authenticated => "authenticated",
            AuthOutcome::MissingCredential => "missing_credential",
            AuthOutcome::InvalidCredential(kind) => kind.as_str(),
        }
    }
}

#[derive(Debug)]
struct AuthPolicy {
    security: SecurityConfig,
    public_paths: Vec<String>,
}

impl AuthPolicy {
    fn is_public(&self, path: &str) -> bool {
        self.public_paths.iter().any(|p| p == path)
    }

    fn decide(&self, method: &Method, path: &str, authorization: Option<&str>) -> AuthDecision {
        if self.is_public(path) || method == Method::OPTIONS {
            return AuthDecision::PassThrough;
        }

        let Some(token) = authorization.and_then(extract_bearer) else {
            return AuthDecision::Rejected(AuthRejection::MissingCredential);
        };

        match verify_token(token, &self.security) {
            Ok(claims) => AuthDecision::Authenticated(claims),
            Err(kind) => AuthDecision::Rejected(AuthRejection::InvalidCredential(kind)),
        }
    }
}

/// Authentication middleware. Immutable once built; clones share the policy.
#[derive(Debug, Clone)]
pub struct JwtAuth {
    policy: Arc<AuthPolicy>,
}

impl JwtAuth {
    pub fn new(security: SecurityConfig) -> Self {
        Self::with_public_paths(security, DEFAULT_PUBLIC_PATHS.iter().copied())
    }

    /// Build with an explicit set of paths that skip authentication.
    pub fn with_public_paths<I, P>(security: SecurityConfig, public_paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        Self {
            policy: Arc::new(AuthPolicy {
                security,
                public_paths: public_paths.into_iter().map(Into::into).collect(),
            }),
        }
    }

    /// Run the authentication decision without a request pipeline.
    pub fn decide(&self, method: &Method, path: &str, authorization: Option<&str>) -> AuthDecision {
        self.policy.decide(method, path, authorization)
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            policy: Arc::clone(&self.policy),
        }))
    }
}

pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    policy: Arc<AuthPolicy>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let authorization = req
            .headers()
            .get(header::AUTHORIZATION)
            .map(|value| value.to_str().unwrap_or_default().to_owned());

        let decision = self
            .policy
            .decide(req.method(), req.path(), authorization.as_deref());
        req.extensions_mut().insert(decision.outcome());

        let rejection = match decision {
            AuthDecision::PassThrough => None,
            AuthDecision::Authenticated(claims) => {
                debug!(username = %claims.username, "bearer token verified");
                // Store claims in request extensions BEFORE calling the service
                req.extensions_mut().insert(claims);
                None
            }
            AuthDecision::Rejected(rejection) => Some(rejection),
        };

        let Some(rejection) = rejection else {
            let fut = self.service.call(req);
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        };

        let path = req.path().to_owned();
        Box::pin(async move {
            match &rejection {
                AuthRejection::MissingCredential => {
                    security::credential_missing(&path, authorization.as_deref())
                }
                AuthRejection::InvalidCredential(kind) => security::credential_invalid(&path, *kind),
            }

            let (http_req, _payload) = req.into_parts();
            let response = HttpResponse::from_error(AppError::from(rejection));
            Ok(ServiceResponse::new(http_req, response).map_into_right_body())
        })
    }
}

/// Parse a `Bearer <token>` header value into the token.
fn extract_bearer(header_value: &str) -> Option<&str> {
    let mut parts = header_value.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}
