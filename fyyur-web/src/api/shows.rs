//! Show routes

use axum::{extract::State, routing::get, Json, Router};
use fyyur_common::db::shows;

use crate::api::FlashResponse;
use crate::error::{ApiError, ApiResult};
use crate::extract::FormBody;
use crate::forms::{FormSchema, ShowForm, SHOW_FORM_FIELDS};
use crate::views::{build_show_listing, ShowListing};
use crate::AppState;

/// GET /shows
pub async fn list_shows(State(state): State<AppState>) -> ApiResult<Json<Vec<ShowListing>>> {
    let shows = shows::list_with_parties(&state.db).await?;
    Ok(Json(build_show_listing(&shows)))
}

/// GET /shows/create
pub async fn create_show_form() -> Json<FormSchema> {
    Json(FormSchema {
        action: "/shows/create".to_string(),
        fields: SHOW_FORM_FIELDS,
    })
}

/// POST /shows/create
///
/// An unknown artist or venue is a 404 and nothing is stored.
pub async fn create_show(
    State(state): State<AppState>,
    FormBody(form): FormBody<ShowForm>,
) -> ApiResult<Json<FlashResponse>> {
    const FAILED: &str = "An error occurred. Show could not be listed.";

    let show = form
        .into_new_show()
        .map_err(|e| ApiError::flash(e, FAILED))?;
    let id = shows::create(&state.db, &show)
        .await
        .map_err(|e| ApiError::flash(e, FAILED))?;

    Ok(Json(FlashResponse::created("Show was successfully listed!", id)))
}

/// Build show routes
pub fn show_routes() -> Router<AppState> {
    Router::new()
        .route("/shows", get(list_shows))
        .route("/shows/create", get(create_show_form).post(create_show))
}
