//! Artist routes

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use fyyur_common::db::{artists, venues};
use fyyur_common::time::now;
use tracing::{error, info};

use crate::api::{DeleteResponse, FlashResponse};
use crate::error::{ApiError, ApiResult};
use crate::extract::{FormBody, RecordId};
use crate::forms::{ArtistForm, FormSchema, SearchForm, Submission, ARTIST_FORM_FIELDS};
use crate::views::{
    build_artist_detail, build_artist_listing, build_search_results, ArtistDetail,
    ArtistFormValues, ArtistListing, SearchResults,
};
use crate::AppState;

/// GET /artists
pub async fn list_artists(State(state): State<AppState>) -> ApiResult<Json<Vec<ArtistListing>>> {
    let artists = artists::list_all(&state.db).await?;
    Ok(Json(build_artist_listing(&artists)))
}

/// POST /artists/search
pub async fn search_artists(
    State(state): State<AppState>,
    FormBody(form): FormBody<SearchForm>,
) -> ApiResult<Json<SearchResults>> {
    let artists = artists::list_all(&state.db).await?;
    Ok(Json(build_search_results(&artists, &form.search_term, now())))
}

/// GET /artists/:id
pub async fn show_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> ApiResult<Json<ArtistDetail>> {
    let artist = artists::require(&state.db, artist_id)
        .await
        .map_err(|e| ApiError::flash(e, "Artist could not be shown.").redirect_to("/artists"))?;

    let hosts = venues::refs_for_artist(&state.db, artist_id).await?;

    Ok(Json(build_artist_detail(&artist, &hosts, now())?))
}

/// GET /artists/create
pub async fn create_artist_form() -> Json<FormSchema> {
    Json(FormSchema {
        action: "/artists/create".to_string(),
        fields: ARTIST_FORM_FIELDS,
    })
}

/// POST /artists/create
pub async fn create_artist(
    State(state): State<AppState>,
    FormBody(form): FormBody<ArtistForm>,
) -> ApiResult<Json<FlashResponse>> {
    let failed = format!("An error occurred. Artist {} could not be listed.", form.name);

    let fields = form
        .into_fields(Submission::Create)
        .map_err(|e| ApiError::flash(e, failed.clone()))?;
    let id = artists::create(&state.db, &fields)
        .await
        .map_err(|e| ApiError::flash(e, failed))?;

    Ok(Json(FlashResponse::created(
        format!("Artist {} was successfully listed!", fields.name),
        id,
    )))
}

/// GET /artists/:id/edit
pub async fn edit_artist_form(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> ApiResult<Json<ArtistFormValues>> {
    let artist = artists::require(&state.db, artist_id)
        .await
        .map_err(|e| ApiError::flash(e, "Artist could not be edited.").redirect_to("/artists"))?;

    Ok(Json(ArtistFormValues::from(&artist)))
}

/// POST /artists/:id/edit
pub async fn edit_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
    FormBody(form): FormBody<ArtistForm>,
) -> ApiResult<Json<FlashResponse>> {
    let page = format!("/artists/{}", artist_id);
    let failed = format!("An error occurred. Artist {} could not be updated.", form.name);

    let fields = form
        .into_fields(Submission::Edit)
        .map_err(|e| ApiError::flash(e, failed.clone()).redirect_to(page.clone()))?;
    artists::update(&state.db, artist_id, &fields)
        .await
        .map_err(|e| ApiError::flash(e, failed).redirect_to(page.clone()))?;

    Ok(Json(FlashResponse::redirect(
        format!("Artist {} was successfully updated!", fields.name),
        page,
    )))
}

/// DELETE /artists/:id
pub async fn delete_artist(
    State(state): State<AppState>,
    RecordId(artist_id): RecordId,
) -> Json<DeleteResponse> {
    let success = match artists::delete(&state.db, artist_id).await {
        Ok(count) => count == 1,
        Err(e) => {
            error!("Failed to delete artist {}: {}", artist_id, e);
            false
        }
    };

    if success {
        info!("Artist {} deleted via API", artist_id);
    }

    Json(DeleteResponse { success })
}

/// Build artist routes
pub fn artist_routes() -> Router<AppState> {
    Router::new()
        .route("/artists", get(list_artists))
        .route("/artists/search", post(search_artists))
        .route("/artists/create", get(create_artist_form).post(create_artist))
        .route("/artists/:id", get(show_artist).delete(delete_artist))
        .route("/artists/:id/edit", get(edit_artist_form).post(edit_artist))
}
