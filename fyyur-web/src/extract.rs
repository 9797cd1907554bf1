//! Request extractors that reject with [`ApiError`]
//!
//! The stock `Path` and `Form` rejections answer in plain text; these
//! wrappers keep every failure in the JSON error shape.

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
};
use axum_extra::extract::Form;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::ApiError;

/// Numeric record id taken from the last `:id` path segment
///
/// A segment that is not an integer cannot name any record, so it is
/// answered like an unmatched route.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordId(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for RecordId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Path::<i64>::from_request_parts(parts, state).await {
            Ok(Path(id)) => Ok(RecordId(id)),
            Err(rejection) => {
                debug!("Rejected path {}: {}", parts.uri.path(), rejection.body_text());
                Err(ApiError::not_found(format!("No page at {}", parts.uri.path())).redirect_to("/"))
            }
        }
    }
}

/// URL-encoded body with repeated keys collected into lists
pub struct FormBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for FormBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Form::<T>::from_request(req, state).await {
            Ok(Form(value)) => Ok(FormBody(value)),
            Err(rejection) => Err(ApiError::BadRequest {
                message: format!("Could not read form: {}", rejection),
                redirect: None,
            }),
        }
    }
}
