use std::time::Duration;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unable to reach the job store: {0}")]
    Connection(#[source] mongodb::error::Error),

    #[error("job store request failed: {0}")]
    Store(#[from] mongodb::error::Error),

    #[error("{op} timed out after {after:?}")]
    Timeout { op: &'static str, after: Duration },

    #[error("job listing {0} not found")]
    NotFound(String),

    #[error("invalid job id: {0}")]
    InvalidId(String),

    #[error("invalid input: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("improperly configured: {0}")]
    Config(#[from] config::ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn status(&self) -> StatusCode {
        match self {
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::InvalidId(_) => StatusCode::BAD_REQUEST,
            Error::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Error::Connection(_) => StatusCode::SERVICE_UNAVAILABLE,
            Error::Store(_) => StatusCode::BAD_GATEWAY,
            Error::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            Error::Config(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!("request failed: {}", &self);
        } else {
            tracing::warn!("request rejected: {}", &self);
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        assert_eq!(
            Error::NotFound("65f0c0ffee".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::InvalidId("nope".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn timeout_maps_to_gateway_timeout() {
        let err = Error::Timeout {
            op: "get_job",
            after: Duration::from_secs(30),
        };
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.to_string(), "get_job timed out after 30s");
    }

    #[test]
    fn sub_second_timeouts_keep_their_precision() {
        let err = Error::Timeout {
            op: "ping",
            after: Duration::from_millis(200),
        };
        assert_eq!(err.to_string(), "ping timed out after 200ms");
    }

    #[test]
    fn response_carries_status() {
        let res = Error::InvalidId("xyz".into()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
