use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bead_convert::ConvertError;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("A conversion is already in progress")]
    Busy,

    #[error("Image error: {0}")]
    Image(#[from] ImageError),

    #[error("{0}")]
    Process(ProcessError),
}

impl From<ProcessError> for ApiError {
    fn from(e: ProcessError) -> Self {
        match e {
            ProcessError::Busy => ApiError::Busy,
            other => ApiError::Process(other),
        }
    }
}

/// Failures while turning uploaded bytes into a bitmap.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Empty image body")]
    Empty,

    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),

    #[error("Unsupported PNG color type: {0:?}")]
    UnsupportedColor(png::ColorType),

    #[error("Unsupported PNG bit depth: {0:?}")]
    UnsupportedBitDepth(png::BitDepth),

    #[error("Invalid bitmap: {0}")]
    Bitmap(#[from] ConvertError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Outcome classes of a pipeline submission.
///
/// `InvalidRequest` and `Busy` are rejected before any work starts.
/// `Execution` covers faults raised while the pipeline was running.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessError {
    #[error("Invalid {field}: {reason}")]
    InvalidRequest { field: &'static str, reason: String },

    #[error("A conversion is already in progress")]
    Busy,

    #[error("Processing failed: {0}")]
    Execution(String),
}

impl ProcessError {
    pub fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        ProcessError::InvalidRequest {
            field,
            reason: reason.into(),
        }
    }

    /// Whether retrying with another strategy could succeed.
    pub fn is_execution_fault(&self) -> bool {
        matches!(self, ProcessError::Execution(_))
    }
}

/// Error body of the processing response schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorPayload {
    pub error_message: String,
}

impl From<&ProcessError> for ErrorPayload {
    fn from(e: &ProcessError) -> Self {
        Self {
            error_message: e.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Busy => (StatusCode::CONFLICT, self.to_string()),
            ApiError::Image(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ApiError::Process(e) => match e {
                ProcessError::InvalidRequest { .. } => {
                    (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
                }
                ProcessError::Busy => (StatusCode::CONFLICT, e.to_string()),
                ProcessError::Execution(_) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()),
            },
        };

        let body = Json(json!({
            "status": status.as_u16(),
            "error": message,
            "errorMessage": message,
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_bad_request() {
        let error = ApiError::BadRequest("palette entry 'nope'".to_string());
        assert_eq!(error.to_string(), "Bad request: palette entry 'nope'");
    }

    #[test]
    fn test_image_error_empty() {
        assert_eq!(ImageError::Empty.to_string(), "Empty image body");
    }

    #[test]
    fn test_process_error_invalid_request() {
        let error = ProcessError::invalid("targetWidth", "must be between 4 and 80, got 2");
        assert_eq!(
            error.to_string(),
            "Invalid targetWidth: must be between 4 and 80, got 2"
        );
        assert!(!error.is_execution_fault());
    }

    #[test]
    fn test_process_error_execution() {
        let error = ProcessError::Execution("worker task panicked".to_string());
        assert_eq!(error.to_string(), "Processing failed: worker task panicked");
        assert!(error.is_execution_fault());
    }

    #[test]
    fn test_busy_process_error_becomes_busy_api_error() {
        let error: ApiError = ProcessError::Busy.into();
        assert!(matches!(error, ApiError::Busy));
    }

    #[test]
    fn test_error_payload_serializes_camel_case() {
        let payload = ErrorPayload::from(&ProcessError::Execution("boom".to_string()));
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json, json!({"errorMessage": "Processing failed: boom"}));
    }

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::BadRequest("x".into()), StatusCode::BAD_REQUEST),
            (ApiError::Busy, StatusCode::CONFLICT),
            (ApiError::Image(ImageError::Empty), StatusCode::BAD_REQUEST),
            (
                ApiError::Process(ProcessError::invalid("maxColors", "too many")),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                ApiError::Process(ProcessError::Execution("boom".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[tokio::test]
    async fn test_response_body_carries_error_message() {
        let response = ApiError::Busy.into_response();
        let bytes = http_body_util::BodyExt::collect(response.into_body())
            .await
            .unwrap()
            .to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            json,
            json!({
                "status": 409,
                "error": "A conversion is already in progress",
                "errorMessage": "A conversion is already in progress",
            })
        );
    }
}
