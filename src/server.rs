//! HTTP API surface.
//!
//! JSON routes mirroring the endpoints the vocabulary UI consumes:
//! lookup, cache inspection/management, and model listing. Failures are
//! reported as `{ "error": ..., "message": ... }` bodies with 400 for bad
//! input and 500 for lookup/provider failures.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cache::{CacheKey, CacheStats};
use crate::error::Error;
use crate::lookup::WordLookupService;
use crate::provider::{GeminiClient, ModelInfo};
use crate::types::WordDetails;

/// Shared state behind every handler.
pub struct AppState {
    pub lookup: WordLookupService,
    /// Concrete client kept alongside the `dyn` provider inside the
    /// service; the models endpoint needs the provider-specific listing.
    pub gemini: Arc<GeminiClient>,
}

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/vocabulary/ai", post(lookup_word))
        .route("/api/vocabulary/cache", get(cache_stats).delete(cache_delete))
        .route("/api/vocabulary/models", get(list_models))
}

// ─── Request / Response types ────────────────────────────────

#[derive(Serialize)]
struct LookupResponse {
    cached: bool,
    #[serde(flatten)]
    details: WordDetails,
}

#[derive(Serialize)]
struct CacheStatsResponse {
    success: bool,
    stats: CacheStats,
}

#[derive(Deserialize)]
struct CacheDeleteParams {
    word: Option<String>,
}

#[derive(Serialize)]
struct CacheMessageResponse {
    success: bool,
    message: String,
}

#[derive(Serialize)]
struct ModelsResponse {
    total: usize,
    models: Vec<ModelInfo>,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

fn error_response(status: StatusCode, error: &str, message: String) -> Response {
    (
        status,
        Json(ErrorBody {
            error: error.to_string(),
            message,
        }),
    )
        .into_response()
}

// ─── Handlers ────────────────────────────────────────────────

async fn lookup_word(State(state): State<Arc<AppState>>, Json(body): Json<Value>) -> Response {
    let word = match body.get("word").and_then(|w| w.as_str()) {
        Some(w) => w,
        None => {
            return error_response(
                StatusCode::BAD_REQUEST,
                "Invalid request",
                "Word parameter is required and must be a string".to_string(),
            )
        }
    };

    match state.lookup.lookup(word).await {
        Ok(lookup) => Json(LookupResponse {
            cached: lookup.cached,
            details: lookup.details,
        })
        .into_response(),
        Err(Error::Validation(message)) => {
            error_response(StatusCode::BAD_REQUEST, "Invalid request", message)
        }
        Err(err) => {
            tracing::error!(word, error = %err, "word lookup failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to get word details",
                err.to_string(),
            )
        }
    }
}

async fn cache_stats(State(state): State<Arc<AppState>>) -> Json<CacheStatsResponse> {
    Json(CacheStatsResponse {
        success: true,
        stats: state.lookup.cache().stats(),
    })
}

async fn cache_delete(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CacheDeleteParams>,
) -> Json<CacheMessageResponse> {
    let message = match params.word {
        Some(word) => {
            state.lookup.cache().delete(CacheKey::for_word(&word).as_str());
            format!("Cache for word \"{word}\" has been cleared")
        }
        None => {
            state.lookup.cache().clear();
            "All cache has been cleared".to_string()
        }
    };
    Json(CacheMessageResponse {
        success: true,
        message,
    })
}

async fn list_models(State(state): State<Arc<AppState>>) -> Response {
    match state.gemini.list_models().await {
        Ok(models) => Json(ModelsResponse {
            total: models.len(),
            models,
        })
        .into_response(),
        Err(err) => {
            tracing::error!(error = %err, "model listing failed");
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to list models",
                err.to_string(),
            )
        }
    }
}
