//! HTTP API handlers for fyyur-web

pub mod artists;
pub mod health;
pub mod shows;
pub mod ui;
pub mod venues;

use serde::Serialize;

pub use artists::artist_routes;
pub use health::health_routes;
pub use shows::show_routes;
pub use ui::{not_found, serve_index};
pub use venues::venue_routes;

/// Flash-style body returned by successful create and edit submissions
#[derive(Debug, Serialize)]
pub struct FlashResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
}

impl FlashResponse {
    pub fn created(message: impl Into<String>, id: i64) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: Some(id),
            redirect: None,
        }
    }

    pub fn redirect(message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            id: None,
            redirect: Some(path.into()),
        }
    }
}

/// Body of every DELETE response
#[derive(Debug, Serialize)]
pub struct DeleteResponse {
    pub success: bool,
}
