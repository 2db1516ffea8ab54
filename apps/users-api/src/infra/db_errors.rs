//! SeaORM -> DomainError translation helpers.
//!
//! Adapters convert `sea_orm::DbErr` into `DomainError` here, and higher
//! layers map `DomainError` to `AppError` via `From`.

use sea_orm::sqlx;
use sea_orm::{ConnAcquireErr, DbErr, RuntimeErr};
use tracing::warn;

use crate::errors::domain::{DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;

fn is_connectivity(err: &sqlx::Error) -> bool {
    matches!(
        err,
        sqlx::Error::Io(_) | sqlx::Error::Tls(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
    )
}

/// Map a SeaORM error to a domain error.
pub fn map_db_err(e: DbErr) -> DomainError {
    let message = e.to_string();
    let mapped = match e {
        DbErr::ConnectionAcquire(ConnAcquireErr::Timeout) => {
            DomainError::infra(InfraErrorKind::Timeout, "timed out acquiring a connection")
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            DomainError::infra(InfraErrorKind::DbUnavailable, "database connection failed")
        }
        DbErr::Exec(RuntimeErr::SqlxError(err)) | DbErr::Query(RuntimeErr::SqlxError(err))
            if is_connectivity(&err) =>
        {
            DomainError::infra(InfraErrorKind::DbUnavailable, "database connection failed")
        }
        DbErr::RecordNotFound(detail) => DomainError::not_found(NotFoundKind::Other("record".into()), detail),
        _ => DomainError::infra(InfraErrorKind::Other("db".into()), "database operation failed"),
    };

    warn!(error = %Redacted(&message), mapped = %mapped, "database error");
    mapped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_errors_are_unavailable() {
        let err = map_db_err(DbErr::Conn(RuntimeErr::Internal("connection refused".into())));
        assert!(err.is_unavailable());

        let err = map_db_err(DbErr::ConnectionAcquire(ConnAcquireErr::ConnectionClosed));
        assert!(err.is_unavailable());

        let err = map_db_err(DbErr::ConnectionAcquire(ConnAcquireErr::Timeout));
        assert!(matches!(err, DomainError::Infra(InfraErrorKind::Timeout, _)));
    }

    #[test]
    fn test_query_errors_do_not_echo_driver_text() {
        let err = map_db_err(DbErr::Custom("relation \"users\" does not exist".into()));

        assert!(!err.is_unavailable());
        assert!(!err.to_string().contains("relation"));
    }
}
