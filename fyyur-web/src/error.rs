//! Error types for fyyur-web
//!
//! Every failure a handler reports becomes a flash-style JSON body:
//! `{"success": false, "code": ..., "message": ..., "redirect": ...}`.
//! Store failures are logged in full but never echoed to the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or rejected form input (400)
    #[error("Invalid request: {message}")]
    BadRequest {
        message: String,
        redirect: Option<String>,
    },

    /// Unknown venue, artist or route (404)
    #[error("Resource not found: {message}")]
    NotFound {
        message: String,
        redirect: Option<String>,
    },

    /// Store or other server-side failure (500)
    #[error("Internal server error: {message}")]
    Internal {
        message: String,
        redirect: Option<String>,
    },
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
            redirect: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal {
            message: message.into(),
            redirect: None,
        }
    }

    /// Wrap a lower-level failure under a user-facing flash message
    ///
    /// Client errors keep their cause in the message so the form can be
    /// corrected; server errors only log it.
    pub fn flash(err: fyyur_common::Error, message: impl Into<String>) -> Self {
        let message = message.into();

        if err.is_client_error() {
            warn!("{}: {}", message, err);
            let message = format!("{} {}", message, err);
            match err {
                fyyur_common::Error::NotFound(_) => ApiError::NotFound {
                    message,
                    redirect: None,
                },
                _ => ApiError::BadRequest {
                    message,
                    redirect: None,
                },
            }
        } else {
            error!("{}: {}", message, err);
            ApiError::Internal {
                message,
                redirect: None,
            }
        }
    }

    /// Attach the page the client should go back to
    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        match &mut self {
            ApiError::BadRequest { redirect, .. }
            | ApiError::NotFound { redirect, .. }
            | ApiError::Internal { redirect, .. } => *redirect = Some(path),
        }
        self
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<fyyur_common::Error> for ApiError {
    fn from(err: fyyur_common::Error) -> Self {
        match err {
            fyyur_common::Error::NotFound(message) => ApiError::not_found(message),
            fyyur_common::Error::Validation(_) | fyyur_common::Error::InvalidInput(_) => {
                ApiError::BadRequest {
                    message: err.to_string(),
                    redirect: None,
                }
            }
            other => {
                error!("Request failed: {}", other);
                ApiError::internal("An internal error occurred.")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message, redirect) = match self {
            ApiError::BadRequest { message, redirect } => ("BAD_REQUEST", message, redirect),
            ApiError::NotFound { message, redirect } => ("NOT_FOUND", message, redirect),
            ApiError::Internal { message, redirect } => ("INTERNAL_ERROR", message, redirect),
        };

        let mut body = json!({
            "success": false,
            "code": code,
            "message": message,
        });
        if let Some(path) = redirect {
            body["redirect"] = json!(path);
        }

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flash_maps_validation_to_bad_request() {
        let err = ApiError::flash(
            fyyur_common::Error::Validation("phone must be digits".to_string()),
            "Venue X could not be listed.",
        );

        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("phone must be digits"));
    }

    #[test]
    fn test_flash_hides_store_detail() {
        let err = ApiError::flash(
            fyyur_common::Error::Config("disk on fire".to_string()),
            "Venue X could not be listed.",
        );

        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_redirect_is_attached() {
        let err = ApiError::not_found("Venue 9 not found").redirect_to("/venues");

        match err {
            ApiError::NotFound { redirect, .. } => assert_eq!(redirect.as_deref(), Some("/venues")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
