use axum::{
    routing::{delete, get, post},
    Router,
    extract::{Json, Multipart, Path, Query, State},
    http::{header::HeaderValue, StatusCode},
};
use std::sync::Arc;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::error::{Result, AppError};
use crate::api::models::{
    DeleteResponse, HealthResponse, InputKind, ListQuery, ListSummariesResponse,
    SaveSummaryRequest, SummarizeRequest, SummarizeResponse,
};
use crate::db::SummaryRecord;
use crate::extractor::{self, ExtractedDocument, FileUpload};
use crate::mode::SummaryMode;
use crate::summarizer;
use crate::text::clean_text;
use crate::AppState;

// Per-IP quota on summarize/write endpoints: burst of 5, one permit back
// every 12 seconds, i.e. 5 requests per minute.
const RATE_LIMIT_BURST: u32 = 5;
const RATE_LIMIT_REPLENISH_SECS: u64 = 12;

pub fn create_router(app_state: AppState) -> Router {
    // Each limited route gets its own limiter state, so one endpoint's
    // quota never drains another's.
    let rate_limiter = || GovernorLayer {
        config: Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .per_second(RATE_LIMIT_REPLENISH_SECS)
                .burst_size(RATE_LIMIT_BURST)
                .finish()
                .expect("Rate limiter configuration is valid and should never fail"),
        ),
    };

    let cors = cors_layer(&app_state.config.cors_origins);

    Router::new()
        .route("/summarize-text", post(summarize_text_handler).layer(rate_limiter()))
        .route("/summarize-file", post(summarize_file_handler).layer(rate_limiter()))
        .route("/summaries", post(save_summary_handler).layer(rate_limiter()))
        .route("/summaries", get(list_summaries_handler))
        .route("/summaries/:id", delete(delete_summary_handler).layer(rate_limiter()))
        .route("/health", get(health_handler))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn summarize_text_handler(
    State(state): State<AppState>,
    Json(req): Json<SummarizeRequest>,
) -> Result<Json<SummarizeResponse>> {
    let mode: SummaryMode = req.mode.parse()?;

    let document = match req.kind {
        InputKind::Url => {
            tracing::info!(url = %req.value, "summarizing url");
            extractor::extract_from_url(&req.value).await?
        }
        InputKind::Text => {
            let text = clean_text(&req.value);
            if text.is_empty() {
                return Err(AppError::InvalidInput("Empty text input.".to_string()));
            }
            ExtractedDocument { text, title: None }
        }
    };

    let summary = summarizer::summarize(&state.config, &document.text, mode).await?;

    Ok(Json(SummarizeResponse {
        article_text: document.text,
        summary,
        title: document.title,
    }))
}

async fn summarize_file_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<SummarizeResponse>> {
    let mut upload: Option<FileUpload> = None;
    let mut mode_name = String::from("default");

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Malformed multipart body: {}", e)))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().map(str::to_string);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Failed to read upload: {}", e)))?;
                upload = Some(FileUpload {
                    bytes,
                    filename,
                    content_type,
                });
            }
            Some("mode") => {
                mode_name = field
                    .text()
                    .await
                    .map_err(|e| AppError::InvalidInput(format!("Failed to read mode field: {}", e)))?;
            }
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::InvalidInput("Missing 'file' field.".to_string()))?;
    let mode: SummaryMode = mode_name.parse()?;

    tracing::info!(filename = %upload.filename, "summarizing uploaded file");
    let document = extractor::extract_from_file(upload).await?;
    let summary = summarizer::summarize(&state.config, &document.text, mode).await?;

    Ok(Json(SummarizeResponse {
        article_text: document.text,
        summary,
        title: document.title,
    }))
}

async fn save_summary_handler(
    State(state): State<AppState>,
    Json(req): Json<SaveSummaryRequest>,
) -> Result<(StatusCode, Json<SummaryRecord>)> {
    if req.content.trim().is_empty() {
        return Err(AppError::InvalidInput("content is required".to_string()));
    }

    let record = state
        .store
        .insert(&req.content, req.keywords.unwrap_or_default(), req.url.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(record)))
}

async fn delete_summary_handler(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<DeleteResponse>> {
    state.store.delete(id).await?;

    Ok(Json(DeleteResponse {
        status: "deleted".to_string(),
    }))
}

async fn list_summaries_handler(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ListSummariesResponse>> {
    if query.limit <= 0 || query.limit > 500 {
        return Err(AppError::InvalidInput(
            "limit must be between 1 and 500".to_string(),
        ));
    }

    let items = state.store.list(query.limit).await?;

    Ok(Json(ListSummariesResponse { items }))
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
