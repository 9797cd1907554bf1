//! Venue routes

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use fyyur_common::db::{artists, venues};
use fyyur_common::time::now;
use serde::Serialize;
use tracing::{error, info};

use crate::api::{DeleteResponse, FlashResponse};
use crate::error::{ApiError, ApiResult};
use crate::extract::{FormBody, RecordId};
use crate::forms::{FormSchema, SearchForm, Submission, VenueForm, VENUE_FORM_FIELDS};
use crate::views::{
    build_search_results, build_venue_detail, build_venue_directory, CityGroup, SearchResults,
    VenueDetail, VenueFormValues,
};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct VenueDirectory {
    pub areas: Vec<CityGroup>,
}

/// GET /venues
pub async fn list_venues(State(state): State<AppState>) -> ApiResult<Json<VenueDirectory>> {
    let venues = venues::list_by_city(&state.db).await?;

    Ok(Json(VenueDirectory {
        areas: build_venue_directory(&venues, now()),
    }))
}

/// POST /venues/search
pub async fn search_venues(
    State(state): State<AppState>,
    FormBody(form): FormBody<SearchForm>,
) -> ApiResult<Json<SearchResults>> {
    let venues = venues::list_all(&state.db).await?;

    Ok(Json(build_search_results(&venues, &form.search_term, now())))
}

/// GET /venues/:id
pub async fn show_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> ApiResult<Json<VenueDetail>> {
    let venue = venues::require(&state.db, venue_id)
        .await
        .map_err(|e| ApiError::flash(e, "Venue could not be shown.").redirect_to("/venues"))?;

    let performers = artists::refs_for_venue(&state.db, venue_id).await?;

    Ok(Json(build_venue_detail(&venue, &performers, now())?))
}

/// GET /venues/create
pub async fn create_venue_form() -> Json<FormSchema> {
    Json(FormSchema {
        action: "/venues/create".to_string(),
        fields: VENUE_FORM_FIELDS,
    })
}

/// POST /venues/create
pub async fn create_venue(
    State(state): State<AppState>,
    FormBody(form): FormBody<VenueForm>,
) -> ApiResult<Json<FlashResponse>> {
    let failed = format!("An error occurred. Venue {} could not be listed.", form.name);

    let fields = form
        .into_fields(Submission::Create)
        .map_err(|e| ApiError::flash(e, failed.clone()))?;
    let id = venues::create(&state.db, &fields)
        .await
        .map_err(|e| ApiError::flash(e, failed))?;

    Ok(Json(FlashResponse::created(
        format!("Venue {} was successfully listed!", fields.name),
        id,
    )))
}

/// GET /venues/:id/edit
pub async fn edit_venue_form(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> ApiResult<Json<VenueFormValues>> {
    let venue = venues::require(&state.db, venue_id)
        .await
        .map_err(|e| ApiError::flash(e, "Venue could not be edited.").redirect_to("/venues"))?;

    Ok(Json(VenueFormValues::from(&venue)))
}

/// POST /venues/:id/edit
pub async fn edit_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
    FormBody(form): FormBody<VenueForm>,
) -> ApiResult<Json<FlashResponse>> {
    let page = format!("/venues/{}", venue_id);
    let failed = format!("An error occurred. Venue {} could not be updated.", form.name);

    let fields = form
        .into_fields(Submission::Edit)
        .map_err(|e| ApiError::flash(e, failed.clone()).redirect_to(page.clone()))?;
    venues::update(&state.db, venue_id, &fields)
        .await
        .map_err(|e| ApiError::flash(e, failed).redirect_to(page.clone()))?;

    Ok(Json(FlashResponse::redirect(
        format!("Venue {} was successfully updated!", fields.name),
        page,
    )))
}

/// DELETE /venues/:id
///
/// Always answers 200; `success` reports whether exactly one venue went away.
pub async fn delete_venue(
    State(state): State<AppState>,
    RecordId(venue_id): RecordId,
) -> Json<DeleteResponse> {
    let success = match venues::delete(&state.db, venue_id).await {
        Ok(count) => count == 1,
        Err(e) => {
            error!("Failed to delete venue {}: {}", venue_id, e);
            false
        }
    };

    if success {
        info!("Venue {} deleted via API", venue_id);
    }

    Json(DeleteResponse { success })
}

/// Build venue routes
pub fn venue_routes() -> Router<AppState> {
    Router::new()
        .route("/venues", get(list_venues))
        .route("/venues/search", post(search_venues))
        .route("/venues/create", get(create_venue_form).post(create_venue))
        .route("/venues/:id", get(show_venue).delete(delete_venue))
        .route("/venues/:id/edit", get(edit_venue_form).post(edit_venue))
}
