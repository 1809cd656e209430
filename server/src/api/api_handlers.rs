//! HTTP request handlers for the campaign manager API
//!
//! Every data route acts on the caller's own collections. Domain errors are
//! mapped to status codes here; their `Display` text is the message shown to
//! the caller.

use axum::{
    extract::{rejection::JsonRejection, FromRequest, Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Json},
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use campaign_manager_core::{
    ai::ScriptRequest,
    analysis::{self, AnalysisReport},
    core::AppState,
    import::{self, ImportReport},
    log_error, log_info, log_warn,
    scripts::{self, CampaignScript},
    storage::StorageImpl,
    Error, Record, RecordId, RecordKind,
};
use super::identity::Caller;
use super::page;

// Response types
/// Standard API response wrapper for all endpoints
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    /// Whether the operation was successful
    pub success: bool,
    /// Response data (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Caller-facing confirmation (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Whether the operation was successful (always false)
    pub success: bool,
    /// Error message
    pub error: String,
}

impl<T> ApiResponse<T> {
    /// Create a successful API response with data
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }

    /// Create a successful API response with data and message
    pub fn success_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: Some(message.into()),
        }
    }
}

impl ApiResponse<()> {
    /// Create a successful API response carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

impl ErrorResponse {
    /// Create an error response body
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Rejection type shared by the handlers
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Map a domain error to a status code and JSON body
pub fn error_response(err: Error) -> ApiError {
    let status = match &err {
        Error::NotFound { .. } => StatusCode::NOT_FOUND,
        Error::Generation(_) => StatusCode::BAD_GATEWAY,
        _ if err.is_client_error() => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if err.is_server_error() {
        log_error!("Request failed: {}", err);
    } else {
        log_warn!("Request rejected: {}", err);
    }
    (status, Json(ErrorResponse::new(err.to_string())))
}

/// Custom JSON extractor that returns proper JSON error responses
pub struct JsonRequest<T>(pub T);

impl<T, S> FromRequest<S> for JsonRequest<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: axum::extract::Request, state: &S) -> Result<Self, Self::Rejection> {
        match JsonExtractor::<T>::from_request(req, state).await {
            Ok(JsonExtractor(value)) => Ok(JsonRequest(value)),
            Err(rejection) => {
                let error_message = match rejection {
                    JsonRejection::JsonDataError(err) => format!("Invalid JSON data: {}", err.body_text()),
                    JsonRejection::JsonSyntaxError(_) => "Malformed JSON".to_string(),
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing or invalid Content-Type header. Expected 'application/json'".to_string()
                    }
                    JsonRejection::BytesRejection(_) => "Failed to read request body".to_string(),
                    _ => "Invalid JSON request".to_string(),
                };

                log_warn!("JSON parsing error: {}", error_message);
                Err((StatusCode::BAD_REQUEST, Json(ErrorResponse::new(error_message))))
            }
        }
    }
}

/// CSV import request
#[derive(Debug, Deserialize)]
pub struct ImportRequest {
    /// Collection tag: `campaigns`, `adsets` or `ads`
    #[serde(rename = "type")]
    pub kind: String,
    /// Raw CSV text
    pub csv: String,
}

/// Generated script
#[derive(Debug, Serialize)]
pub struct GeneratedScript {
    /// Script text, or `"Error: ..."` when generation failed
    pub text: String,
}

/// System health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Current system status
    pub status: String,
    /// Server version
    pub version: String,
}

/// System information and capabilities
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    /// Service name
    pub name: String,
    /// Server version
    pub version: String,
    /// Storage backend in use
    pub storage: String,
    /// Whether a chat-completion credential is configured
    pub ai_configured: bool,
    /// Whether the periodic analysis loop runs
    pub scheduler_enabled: bool,
    /// Collection tags accepted by the record and import routes
    pub collections: Vec<String>,
}

fn resolve_kind(tag: &str) -> Result<RecordKind, ApiError> {
    RecordKind::from_tag(tag).ok_or_else(|| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Unknown record type: {}", tag))),
        )
    })
}

fn resolve_id(raw: &str) -> Result<RecordId, ApiError> {
    RecordId::parse(raw).ok_or_else(|| error_response(Error::invalid_input("Record ID cannot be empty")))
}

// Page handlers

/// Render the HTML entry page for the caller
pub async fn index_page(Caller(user): Caller) -> Html<String> {
    Html(page::render_index(&user))
}

// Record handlers

/// List one collection
pub async fn list_records<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Caller(user): Caller,
    Path(tag): Path<String>,
) -> Result<Json<ApiResponse<Vec<Record>>>, ApiError> {
    let kind = resolve_kind(&tag)?;
    let records = app_state.records(user).list(kind);
    Ok(Json(ApiResponse::success(records)))
}

/// Add a record; the server assigns its ID and owner
pub async fn add_record<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Caller(user): Caller,
    Path(tag): Path<String>,
    JsonRequest(record): JsonRequest<Record>,
) -> Result<(StatusCode, Json<ApiResponse<Record>>), ApiError> {
    let kind = resolve_kind(&tag)?;
    let added = app_state.records(user).add(kind, record).map_err(error_response)?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success_with_message(added.record, added.message)),
    ))
}

/// Merge fields into an existing record
pub async fn update_record<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Caller(user): Caller,
    Path((tag, id)): Path<(String, String)>,
    JsonRequest(patch): JsonRequest<Record>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let kind = resolve_kind(&tag)?;
    let id = resolve_id(&id)?;
    let message = app_state.records(user).update(kind, &id, patch).map_err(error_response)?;
    Ok(Json(ApiResponse::message(message)))
}

/// Delete every record with the given ID; succeeds even if none matched
pub async fn delete_record<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Caller(user): Caller,
    Path((tag, id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<()>>, ApiError> {
    let kind = resolve_kind(&tag)?;
    let id = resolve_id(&id)?;
    let message = app_state.records(user).delete(kind, &id).map_err(error_response)?;
    Ok(Json(ApiResponse::message(message)))
}

/// Bulk-append rows from CSV text
pub async fn import_csv<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Caller(user): Caller,
    JsonRequest(request): JsonRequest<ImportRequest>,
) -> Result<Json<ApiResponse<ImportReport>>, ApiError> {
    let service = app_state.records(user);
    let report = import::import_csv(&service, &request.csv, &request.kind).map_err(error_response)?;
    Ok(Json(ApiResponse::success_with_message(report, report.message())))
}

// Analysis handlers

/// Analyze the caller's collections
pub async fn run_analysis<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Caller(user): Caller,
) -> Json<ApiResponse<AnalysisReport>> {
    Json(ApiResponse::success(analysis::analyze(&app_state.space(user))))
}

/// Register the caller for the periodic analysis
pub async fn create_trigger<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Caller(user): Caller,
) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(app_state.triggers.register(&user)))
}

/// Remove the caller from the periodic analysis
pub async fn delete_trigger<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Caller(user): Caller,
) -> Json<ApiResponse<()>> {
    Json(ApiResponse::message(app_state.triggers.unregister(&user)))
}

// Script handlers

/// Template catalog as an HTML fragment
pub async fn script_library(Caller(_user): Caller) -> Html<String> {
    Html(scripts::render_html())
}

/// Template catalog as data
pub async fn script_catalog(Caller(_user): Caller) -> Json<ApiResponse<&'static [CampaignScript]>> {
    Json(ApiResponse::success(scripts::catalog()))
}

/// Generate a script. Generation failures are returned as `"Error: ..."`
/// text with a 200 status.
pub async fn generate_script<S: StorageImpl>(
    State(app_state): State<Arc<AppState<S>>>,
    Caller(user): Caller,
    JsonRequest(request): JsonRequest<ScriptRequest>,
) -> Json<ApiResponse<GeneratedScript>> {
    log_info!("Script generation requested by {}", user);
    let text = app_state.generator.generate(&request).await;
    Json(ApiResponse::success(GeneratedScript { text }))
}

// System handlers

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// System information endpoint
pub async fn system_info<S: StorageImpl>(State(app_state): State<Arc<AppState<S>>>) -> Json<InfoResponse> {
    Json(InfoResponse {
        name: "Campaign Manager".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        storage: format!("{:?}", app_state.config.storage.storage_type),
        ai_configured: app_state.generator.has_api_key(),
        scheduler_enabled: app_state.config.scheduler.enabled,
        collections: RecordKind::ALL.iter().map(|kind| kind.tag().to_string()).collect(),
    })
}

/// Fallback for unknown routes
pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorResponse::new("Route not found")))
}
