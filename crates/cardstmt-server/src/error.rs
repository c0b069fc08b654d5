//! Mapping of pipeline failures onto HTTP responses.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use tracing::error;

use cardstmt_core::{ExtractionError, PdfError, StatementError};

/// Error returned by request handlers.
#[derive(Debug)]
pub enum ApiError {
    /// The upload was rejected; reported as `{detail}` with status 400.
    BadRequest(String),
    /// Anything the client could not have caused.
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl ApiError {
    /// Rejection for an upload over the size limit.
    pub fn too_large(limit: usize) -> Self {
        Self::BadRequest(format!("File size exceeds {} limit", describe_size(limit)))
    }
}

/// Render a byte count the way clients are told about limits ("10MB").
fn describe_size(bytes: usize) -> String {
    const MIB: usize = 1024 * 1024;
    if bytes >= MIB && bytes % MIB == 0 {
        format!("{}MB", bytes / MIB)
    } else {
        format!("{} byte", bytes)
    }
}

impl From<StatementError> for ApiError {
    fn from(err: StatementError) -> Self {
        match err {
            StatementError::Pdf(PdfError::TooLarge { limit, .. }) => Self::too_large(limit),
            StatementError::Pdf(e) => Self::BadRequest(format!("Error reading PDF: {}", e)),
            StatementError::Extraction(ExtractionError::TextTooShort { .. }) => Self::BadRequest(
                "Unable to extract text from PDF. File may be corrupted or empty.".to_string(),
            ),
            StatementError::Extraction(ExtractionError::UnknownIssuer { supported }) => {
                Self::BadRequest(format!(
                    "Bank not recognized. Supported banks: {}",
                    supported.join(", ")
                ))
            }
            other => Self::Internal(format!("Error processing statement: {}", other)),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            Self::BadRequest(detail) => json!({ "detail": detail }),
            Self::Internal(detail) => {
                error!("Request failed: {}", detail);
                json!({ "error": "Internal server error", "detail": detail })
            }
        };
        (status, Json(body)).into_response()
    }
}
