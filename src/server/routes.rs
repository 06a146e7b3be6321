//! Request handlers

use crate::index::search;
use crate::server::AppState;
use axum::body::Bytes;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

const MISSING_URL: &str = "Please include URL in Body of Request";

/// Body of `POST /index`
#[derive(Debug, Default, Deserialize)]
struct IndexRequest {
    #[serde(rename = "URL", default)]
    url: String,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// POST /index -> crawls from the body's `URL` and returns the totals
///
/// A body that is not valid JSON is treated like one without a URL.
pub async fn index_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let request: IndexRequest = serde_json::from_slice(&body).unwrap_or_default();
    if request.url.is_empty() {
        return error_response(StatusCode::UNPROCESSABLE_ENTITY, MISSING_URL);
    }

    tracing::info!("Beginning to index at: {}", request.url);
    let totals = state.crawler.start_crawl(&request.url).await;
    (StatusCode::OK, Json(totals)).into_response()
}

/// DELETE /index -> empties the index
pub async fn delete_index_handler(State(state): State<AppState>) -> StatusCode {
    state.index.reset();
    tracing::info!("Index cleared");
    StatusCode::NO_CONTENT
}

/// GET /search/:word -> ranked `{Title, Count}` entries, or `null`
pub async fn search_handler(State(state): State<AppState>, Path(word): Path<String>) -> Response {
    if !is_searchable(&word) {
        return StatusCode::NOT_FOUND.into_response();
    }

    let results = search(&state.index, &word.to_ascii_lowercase());
    tracing::debug!(
        "Search for {:?} matched {} titles",
        word,
        results.as_ref().map_or(0, Vec::len)
    );
    Json(results).into_response()
}

/// Only purely alphabetic ASCII words can ever be in the index
fn is_searchable(word: &str) -> bool {
    !word.is_empty() && word.bytes().all(|b| b.is_ascii_alphabetic())
}
