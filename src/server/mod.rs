//! HTTP API over the crawler and the shared index
//!
//! Routes:
//! - `POST /index` crawls from the `URL` in the JSON body and reports totals
//! - `DELETE /index` empties the index
//! - `GET /search/:word` returns the ranked postings for one word

mod routes;

use crate::config::Config;
use crate::crawler::Crawler;
use crate::index::InvertedIndex;
use crate::SumiError;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// State shared by every request handler
#[derive(Debug, Clone)]
pub struct AppState {
    pub crawler: Crawler,
    pub index: Arc<InvertedIndex>,
}

impl AppState {
    /// Builds the state around a crawler, sharing the crawler's index
    pub fn new(crawler: Crawler) -> Self {
        let index = Arc::clone(crawler.index());
        Self { crawler, index }
    }
}

/// Builds the API router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(
            "/index",
            post(routes::index_handler).delete(routes::delete_index_handler),
        )
        .route("/search/:word", get(routes::search_handler))
        .with_state(state)
}

/// Serves the API on the configured address until the process stops
pub async fn serve(config: &Config, index: Arc<InvertedIndex>) -> Result<(), SumiError> {
    let crawler = Crawler::new(config.crawler.clone(), index)?;
    let app = router(AppState::new(crawler));

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
