//! API request handlers

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::core::InvoicePipeline;
use crate::error::{ExtractError, ExtractResult};
use crate::sheet::SheetDecoder;

/// Multipart part carrying the workbook
pub const FILE_FIELD: &str = "file";
/// Multipart part carrying the expected invoicing month
pub const MONTH_FIELD: &str = "invoicingMonth";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

/// Root endpoint response
#[derive(Serialize)]
pub struct RootResponse {
    pub name: String,
    pub version: String,
    pub description: String,
    pub endpoints: Vec<EndpointInfo>,
}

#[derive(Serialize)]
pub struct EndpointInfo {
    pub path: String,
    pub method: String,
    pub description: String,
}

impl EndpointInfo {
    fn new(path: &str, method: &str, description: &str) -> Self {
        Self {
            path: path.to_string(),
            method: method.to_string(),
            description: description.to_string(),
        }
    }
}

/// GET / - Root info
pub async fn root(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = RootResponse {
        name: "Invoice API Server".to_string(),
        version: state.version.clone(),
        description: "Extracts validated invoice records from uploaded spreadsheets".to_string(),
        endpoints: vec![
            EndpointInfo::new("/health", "GET", "Health check endpoint"),
            EndpointInfo::new("/version", "GET", "Get server version"),
            EndpointInfo::new(
                "/api/v1/invoices",
                "POST",
                "Extract invoices (multipart: file, invoicingMonth)",
            ),
        ],
    };
    Json(ApiResponse::ok(response))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec!["invoices".to_string()],
    }))
}

/// Parts of an invoice upload
#[derive(Debug, Default)]
pub struct InvoiceUpload {
    pub file: Option<Vec<u8>>,
    pub invoicing_month: Option<String>,
}

pub type ErrorResponse = (StatusCode, Json<ApiResponse<Value>>);

fn error_response(status: StatusCode, message: impl Into<String>) -> ErrorResponse {
    (status, Json(ApiResponse::err(message)))
}

/// Collect the known parts of the multipart body; unknown parts are ignored
async fn read_upload(mut multipart: Multipart) -> Result<InvoiceUpload, ErrorResponse> {
    let mut upload = InvoiceUpload::default();

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        error_response(StatusCode::BAD_REQUEST, format!("Invalid multipart body: {}", e))
    })? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) => {
                let bytes = field.bytes().await.map_err(|e| {
                    error_response(StatusCode::BAD_REQUEST, format!("Failed to read file: {}", e))
                })?;
                upload.file = Some(bytes.to_vec());
            }
            Some(MONTH_FIELD) => {
                let text = field.text().await.map_err(|e| {
                    error_response(
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read {}: {}", MONTH_FIELD, e),
                    )
                })?;
                upload.invoicing_month = Some(text);
            }
            _ => {}
        }
    }

    Ok(upload)
}

/// Decode and run the pipeline; blocking work
fn process_upload(state: &AppState, bytes: Vec<u8>, month: &str) -> ExtractResult<Value> {
    let sheet = SheetDecoder::decode_bytes(bytes)?;
    let report = InvoicePipeline::new(&state.schema).run(&sheet, month)?;
    Ok(report.to_json(state.extract.missing_values))
}

/// HTTP status for a pipeline error
pub fn status_for(error: &ExtractError) -> StatusCode {
    if error.is_structural() {
        StatusCode::UNPROCESSABLE_ENTITY
    } else {
        match error {
            ExtractError::Decode(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// POST /api/v1/invoices - Extract invoices from an uploaded workbook
pub async fn extract_invoices(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<ApiResponse<Value>>, ErrorResponse> {
    let upload = read_upload(multipart).await?;

    let bytes = upload.file.ok_or_else(|| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Missing '{}' part", FILE_FIELD),
        )
    })?;
    let month = upload.invoicing_month.ok_or_else(|| {
        error_response(
            StatusCode::BAD_REQUEST,
            format!("Missing '{}' part", MONTH_FIELD),
        )
    })?;

    info!(bytes = bytes.len(), month = %month, "received invoice upload");

    let task_state = Arc::clone(&state);
    let result = tokio::task::spawn_blocking(move || process_upload(&task_state, bytes, &month))
        .await
        .map_err(|e| {
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Extraction task failed: {}", e),
            )
        })?;

    match result {
        Ok(report) => Ok(Json(ApiResponse::ok(report))),
        Err(e) => {
            warn!(error = %e, "invoice extraction rejected");
            Err(error_response(status_for(&e), e.to_string()))
        }
    }
}
