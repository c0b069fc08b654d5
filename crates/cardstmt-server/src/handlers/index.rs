use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use serde_json::{Value, json};

use crate::state::AppState;

pub const SERVICE_NAME: &str = "Credit Card Statement Parser";

/// Health check.
pub async fn index(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "active",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "supported_banks": state.processor.supported_issuers(),
        "timestamp": chrono::Local::now().to_rfc3339(),
    }))
}

pub async fn supported_banks(State(state): State<Arc<AppState>>) -> Json<Value> {
    let banks = state.processor.supported_issuers();
    Json(json!({
        "total": banks.len(),
        "banks": banks,
    }))
}
