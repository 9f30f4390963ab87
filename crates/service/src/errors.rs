use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i32 },
    #[error("invalid value for custom field `{key}`; allowed: {allowed:?}")]
    InvalidOption { key: String, allowed: Vec<String> },
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
    #[error("constraint violation: {0}")]
    Constraint(String),
    #[error("database unavailable: {0}")]
    Transient(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &'static str, id: i32) -> Self { Self::NotFound { entity, id } }
}

impl From<DbErr> for ServiceError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => return Self::Constraint(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => return Self::Constraint(msg),
            _ => {}
        }
        match err {
            DbErr::ConnectionAcquire(e) => Self::Transient(e.to_string()),
            DbErr::Conn(e) => Self::Transient(e.to_string()),
            other => Self::Db(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::{ConnAcquireErr, RuntimeErr};

    #[test]
    fn acquire_timeout_is_transient() {
        let err: ServiceError = DbErr::ConnectionAcquire(ConnAcquireErr::Timeout).into();
        assert!(matches!(err, ServiceError::Transient(_)));
    }

    #[test]
    fn other_errors_are_db() {
        let err: ServiceError = DbErr::Custom("boom".into()).into();
        assert!(matches!(err, ServiceError::Db(ref m) if m.contains("boom")));
        let err: ServiceError = DbErr::Conn(RuntimeErr::Internal("closed".into())).into();
        assert!(matches!(err, ServiceError::Transient(_)));
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        assert_eq!(ServiceError::not_found("store", 7).to_string(), "store 7 not found");
    }
}
