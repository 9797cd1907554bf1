//! Landing page and fallback

use axum::{http::Uri, response::Html};
use tracing::debug;

use crate::error::ApiError;

const INDEX_HTML: &str = include_str!("../ui/index.html");

/// GET /
///
/// Serves the landing page
pub async fn serve_index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

/// Fallback for unmatched routes
pub async fn not_found(uri: Uri) -> ApiError {
    debug!("No route for {}", uri);
    ApiError::not_found(format!("No page at {}", uri.path())).redirect_to("/")
}
