use std::sync::Arc;

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tracing::{info, warn};

use cardstmt_core::ExtractionResult;

use crate::error::ApiError;
use crate::state::AppState;
use crate::upload::{is_pdf_filename, parse_multipart};

/// Body of a successful or partial parse.
#[derive(Debug, Serialize)]
pub struct ParseResponse {
    #[serde(flatten)]
    pub result: ExtractionResult,
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ParseResponse {
    /// Shape a result, returning 206 for partial extractions.
    pub fn from_result(result: ExtractionResult) -> (StatusCode, Self) {
        match result.warning() {
            Some(warning) => (
                StatusCode::PARTIAL_CONTENT,
                Self {
                    result,
                    status: "partial",
                    warning: Some(warning),
                    timestamp: None,
                },
            ),
            None => (
                StatusCode::OK,
                Self {
                    result,
                    status: "success",
                    warning: None,
                    timestamp: Some(chrono::Local::now().to_rfc3339()),
                },
            ),
        }
    }
}

/// Parse an uploaded PDF statement.
pub async fn parse(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let upload = parse_multipart(multipart).await.map_err(ApiError::BadRequest)?;

    if !is_pdf_filename(&upload.filename) {
        return Err(ApiError::BadRequest(
            "Only PDF files are supported".to_string(),
        ));
    }

    if upload.data.len() > state.max_file_size {
        return Err(ApiError::too_large(state.max_file_size));
    }

    info!("Parsing {} ({} bytes)", upload.filename, upload.data.len());

    let worker = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || worker.processor.process_pdf(&upload.data))
        .await
        .map_err(|e| ApiError::Internal(format!("Error processing statement: {}", e)))??;

    let (status, body) = ParseResponse::from_result(result);
    if let Some(warning) = &body.warning {
        warn!("Partial extraction: {}", warning);
    }

    Ok((status, Json(body)).into_response())
}
