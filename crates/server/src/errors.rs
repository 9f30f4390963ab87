use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use service::ServiceError;
use tracing::error;

/// JSON error body `{"error": ..., "message": ...}` with an HTTP status.
#[derive(Debug)]
pub struct JsonApiError {
    pub status: StatusCode,
    pub error: &'static str,
    pub message: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: &'static str, message: Option<String>) -> Self {
        Self { status, error, message }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, "Validation Error", Some(message.into()))
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(message.into()))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": self.error, "message": self.message });
        (self.status, Json(body)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let msg = Some(e.to_string());
        match e {
            ServiceError::NotFound { .. } => Self::new(StatusCode::NOT_FOUND, "Not Found", msg),
            ServiceError::InvalidOption { .. } | ServiceError::Model(_) => {
                Self::new(StatusCode::BAD_REQUEST, "Validation Error", msg)
            }
            ServiceError::Constraint(_) => Self::new(StatusCode::CONFLICT, "Constraint Violation", msg),
            ServiceError::Transient(_) => {
                error!(err = ?msg, "database unavailable");
                Self::new(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable", msg)
            }
            ServiceError::Db(_) => {
                error!(err = ?msg, "database error");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error", msg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use models::errors::ModelError;

    #[test]
    fn service_errors_map_to_statuses() {
        let cases = [
            (ServiceError::not_found("store", 1), StatusCode::NOT_FOUND),
            (ServiceError::InvalidOption { key: "color".into(), allowed: vec!["red".into()] }, StatusCode::BAD_REQUEST),
            (ServiceError::Model(ModelError::validation("name", "too short")), StatusCode::BAD_REQUEST),
            (ServiceError::Constraint("fk".into()), StatusCode::CONFLICT),
            (ServiceError::Transient("timeout".into()), StatusCode::SERVICE_UNAVAILABLE),
            (ServiceError::Db("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(JsonApiError::from(err).status, status);
        }
    }

    #[test]
    fn validation_message_names_the_field() {
        let e = JsonApiError::from(ServiceError::Model(ModelError::validation("seat_count", "too big")));
        assert!(e.message.unwrap_or_default().contains("seat_count"));
    }
}
