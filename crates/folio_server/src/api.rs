//! HTTP handlers.

use crate::AppState;
use axum::{
    Router,
    extract::{Query, State, rejection::QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
};
use folio_ingest::Document;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, instrument};

/// Query string of the ingestion endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FetchArticleQuery {
    /// Article to ingest
    pub url: Option<String>,
}

/// Successful ingestion payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleResponse {
    /// Article title
    pub title: String,
    /// Markdown body with rehosted image URLs
    pub content: String,
    /// Cover image URL, empty when the article has no images
    pub cover_image: String,
}

impl From<Document> for ArticleResponse {
    fn from(document: Document) -> Self {
        Self {
            title: document.title().clone(),
            content: document.body().clone(),
            cover_image: document.cover_reference().clone().unwrap_or_default(),
        }
    }
}

/// Error payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// What went wrong
    pub error: String,
    /// Hint for the user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Creates the service router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/fetch-article", get(fetch_article))
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({"status": "ok"})))
}

/// Ingest an article and return it with rehosted images.
#[instrument(skip(state))]
async fn fetch_article(
    State(state): State<AppState>,
    query: Result<Query<FetchArticleQuery>, QueryRejection>,
) -> Response {
    let query = match query {
        Ok(Query(query)) => query,
        Err(rejection) => return url_required(Some(rejection.body_text())),
    };
    let Some(url) = query.url.filter(|u| !u.trim().is_empty()) else {
        return url_required(None);
    };

    match state.pipeline().ingest(url.trim()).await {
        Ok(document) => (StatusCode::OK, Json(ArticleResponse::from(document))).into_response(),
        Err(e) => {
            error!(url = %url, error = %e, "Article fetch failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: e.kind.to_string(),
                    details: Some("Try copying the article content in directly".to_string()),
                }),
            )
                .into_response()
        }
    }
}

fn url_required(details: Option<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: "URL is required".to_string(),
            details,
        }),
    )
        .into_response()
}
