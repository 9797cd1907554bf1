//! Integration tests for fyyur-web API endpoints
//!
//! Each test builds the router over a fresh SQLite file and drives it with
//! `oneshot`, so no socket is opened.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use fyyur_common::config::AppConfig;
use fyyur_common::db::init_database;
use fyyur_web::{build_router, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

const HOP_FORM: &str = "name=The+Musical+Hop&city=SanFrancisco&state=CA\
&address=1015+Folsom+Street&phone=1231231234&genres=Jazz&genres=Reggae\
&facebook_link=https%3A%2F%2Fwww.facebook.com%2FTheMusicalHop";

const DUELING_FORM: &str = "name=The+Dueling+Pianos+Bar&city=NewYork&state=NY\
&address=335+Delancey+Street&phone=9140003333&genres=Classical";

const PETALS_FORM: &str = "name=Guns+N+Petals&city=SanFrancisco&state=CA\
&phone=3261235000&genres=Rock+n+Roll&seeking=y\
&seeking_description=Looking+for+shows";

/// Test helper: Create app over an empty database
async fn setup_app() -> (TempDir, Router) {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fyyur.db");
    let pool = init_database(&db_path).await.expect("Should create test database");

    let config = AppConfig {
        database_path: db_path,
        host: "127.0.0.1".to_string(),
        port: 0,
        log_level: "warn".to_string(),
    };

    (dir, build_router(AppState::new(pool, config)))
}

fn test_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn form_request(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Send one request and return status plus JSON body
async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    let body = serde_json::from_slice(&bytes).expect("Should parse JSON");
    (status, body)
}

async fn create(app: &Router, uri: &str, form: &str) -> i64 {
    let (status, body) = send(app, form_request(uri, form)).await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    assert_eq!(body["success"], true);
    body["id"].as_i64().expect("create should return an id")
}

// =============================================================================
// Health, landing page and fallback
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, test_request("GET", "/health")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "fyyur-web");
    assert_eq!(body["database"], true);
    assert_eq!(body["listen"], "127.0.0.1:0");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_index_serves_html() {
    let (_dir, app) = setup_app().await;

    let response = app.oneshot(test_request("GET", "/")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"));
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, test_request("GET", "/nowhere")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["redirect"], "/");
}

#[tokio::test]
async fn test_non_numeric_id_is_404_json() {
    let (_dir, app) = setup_app().await;

    for uri in ["/venues/abc", "/artists/abc", "/venues/abc/edit", "/artists/1.5/edit"] {
        let (status, body) = send(&app, test_request("GET", uri)).await;

        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert_eq!(body["success"], false);
        assert_eq!(body["redirect"], "/");
    }

    let (status, body) = send(&app, test_request("DELETE", "/venues/abc")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_form_without_form_content_type_is_400_json() {
    let (_dir, app) = setup_app().await;
    let request = Request::builder()
        .method("POST")
        .uri("/venues/create")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"name":"The Musical Hop"}"#))
        .unwrap();

    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "BAD_REQUEST");
}

// =============================================================================
// Venues
// =============================================================================

#[tokio::test]
async fn test_create_venue_then_show_detail() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, form_request("/venues/create", HOP_FORM)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Venue The Musical Hop was successfully listed!");
    let id = body["id"].as_i64().unwrap();

    let (status, venue) = send(&app, test_request("GET", &format!("/venues/{}", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(venue["name"], "The Musical Hop");
    assert_eq!(venue["state"], "CA");
    assert_eq!(venue["genres"], serde_json::json!(["Jazz", "Reggae"]));
    assert_eq!(venue["facebook_link"], "https://www.facebook.com/TheMusicalHop");
    assert_eq!(venue["seeking_talent"], true);
    assert_eq!(venue["seeking_description"], "Currently seeking talented performers!");
    assert_eq!(venue["past_shows_count"], 0);
    assert_eq!(venue["upcoming_shows_count"], 0);
}

#[tokio::test]
async fn test_invalid_venue_is_rejected_and_not_stored() {
    let (_dir, app) = setup_app().await;
    let bad = HOP_FORM.replace("phone=1231231234", "phone=123-123-1234");

    let (status, body) = send(&app, form_request("/venues/create", &bad)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .starts_with("An error occurred. Venue The Musical Hop could not be listed."));

    let (_, directory) = send(&app, test_request("GET", "/venues")).await;
    assert_eq!(directory["areas"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_multi_word_city_is_rejected() {
    let (_dir, app) = setup_app().await;
    let bad = HOP_FORM.replace("city=SanFrancisco", "city=San+Francisco");

    let (status, _) = send(&app, form_request("/venues/create", &bad)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_non_facebook_link_is_dropped() {
    let (_dir, app) = setup_app().await;
    let form = HOP_FORM.replace(
        "facebook_link=https%3A%2F%2Fwww.facebook.com%2FTheMusicalHop",
        "facebook_link=https%3A%2F%2Ftwitter.com%2Fhop",
    );
    let id = create(&app, "/venues/create", &form).await;

    let (_, venue) = send(&app, test_request("GET", &format!("/venues/{}", id))).await;

    assert!(venue["facebook_link"].is_null());
}

#[tokio::test]
async fn test_venue_directory_groups_by_city() {
    let (_dir, app) = setup_app().await;
    create(&app, "/venues/create", HOP_FORM).await;
    create(&app, "/venues/create", DUELING_FORM).await;
    let park = HOP_FORM.replace("The+Musical+Hop", "Park+Square");
    create(&app, "/venues/create", &park).await;

    let (status, directory) = send(&app, test_request("GET", "/venues")).await;

    assert_eq!(status, StatusCode::OK);
    let areas = directory["areas"].as_array().unwrap();
    assert_eq!(areas.len(), 2);
    assert_eq!(areas[0]["city"], "NewYork");
    assert_eq!(areas[1]["city"], "SanFrancisco");
    assert_eq!(areas[1]["venues"].as_array().unwrap().len(), 2);
    assert_eq!(areas[1]["venues"][0]["num_upcoming_shows"], 0);
}

#[tokio::test]
async fn test_search_venues_is_case_insensitive() {
    let (_dir, app) = setup_app().await;
    create(&app, "/venues/create", HOP_FORM).await;
    create(&app, "/venues/create", DUELING_FORM).await;

    let (status, results) = send(&app, form_request("/venues/search", "search_term=hop")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(results["count"], 1);
    assert_eq!(results["search_term"], "hop");
    assert_eq!(results["data"][0]["name"], "The Musical Hop");

    let (_, results) = send(&app, form_request("/venues/search", "")).await;
    assert_eq!(results["count"], 2);
}

#[tokio::test]
async fn test_missing_venue_is_404_with_redirect() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, test_request("GET", "/venues/99")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
    assert_eq!(body["redirect"], "/venues");
}

#[tokio::test]
async fn test_edit_venue_round_trip() {
    let (_dir, app) = setup_app().await;
    let id = create(&app, "/venues/create", HOP_FORM).await;

    let edited = HOP_FORM
        .replace("city=SanFrancisco", "city=Oakland")
        .replace("genres=Jazz&genres=Reggae", "genres=Folk")
        + "&seeking=off";
    let (status, body) = send(&app, form_request(&format!("/venues/{}/edit", id), &edited)).await;
    assert_eq!(status, StatusCode::OK, "edit failed: {}", body);
    assert_eq!(body["redirect"], format!("/venues/{}", id));

    let (status, values) = send(&app, test_request("GET", &format!("/venues/{}/edit", id))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(values["city"], "Oakland");
    assert_eq!(values["genres"], serde_json::json!(["Folk"]));
    assert_eq!(values["seeking_talent"], false);
    assert!(values["seeking_description"].is_null());
}

#[tokio::test]
async fn test_edit_missing_venue_is_404() {
    let (_dir, app) = setup_app().await;

    let (status, body) = send(&app, form_request("/venues/5/edit", HOP_FORM)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["redirect"], "/venues/5");
}

#[tokio::test]
async fn test_delete_venue_reports_success_once() {
    let (_dir, app) = setup_app().await;
    let id = create(&app, "/venues/create", HOP_FORM).await;
    let uri = format!("/venues/{}", id);

    let (status, body) = send(&app, test_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = send(&app, test_request("DELETE", &uri)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

// =============================================================================
// Artists and shows
// =============================================================================

#[tokio::test]
async fn test_artist_listing_and_search() {
    let (_dir, app) = setup_app().await;
    create(&app, "/artists/create", PETALS_FORM).await;
    let sax = PETALS_FORM.replace("Guns+N+Petals", "The+Wild+Sax+Band");
    create(&app, "/artists/create", &sax).await;

    let (status, listing) = send(&app, test_request("GET", "/artists")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing.as_array().unwrap().len(), 2);
    assert_eq!(listing[0]["name"], "Guns N Petals");

    let (_, results) = send(&app, form_request("/artists/search", "search_term=BAND")).await;
    assert_eq!(results["count"], 1);
    assert_eq!(results["data"][0]["name"], "The Wild Sax Band");
}

#[tokio::test]
async fn test_edit_without_seeking_field_keeps_it_off() {
    let (_dir, app) = setup_app().await;
    let not_seeking = PETALS_FORM.replace("&seeking=y&seeking_description=Looking+for+shows", "&seeking=off");
    let id = create(&app, "/artists/create", &not_seeking).await;

    // An unchecked checkbox is simply missing from a browser submission
    let unchecked = PETALS_FORM.replace("&seeking=y&seeking_description=Looking+for+shows", "");
    let (status, body) = send(&app, form_request(&format!("/artists/{}/edit", id), &unchecked)).await;
    assert_eq!(status, StatusCode::OK, "edit failed: {}", body);

    let (_, artist) = send(&app, test_request("GET", &format!("/artists/{}", id))).await;
    assert_eq!(artist["seeking_venue"], false);
    assert!(artist["seeking_description"].is_null());
}

#[tokio::test]
async fn test_edit_without_seeking_field_clears_it() {
    let (_dir, app) = setup_app().await;
    let id = create(&app, "/venues/create", HOP_FORM).await;

    let (status, _) = send(&app, form_request(&format!("/venues/{}/edit", id), HOP_FORM)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, venue) = send(&app, test_request("GET", &format!("/venues/{}", id))).await;
    assert_eq!(venue["seeking_talent"], false);
    assert!(venue["seeking_description"].is_null());
}

#[tokio::test]
async fn test_show_splits_past_and_upcoming() {
    let (_dir, app) = setup_app().await;
    let venue_id = create(&app, "/venues/create", HOP_FORM).await;
    let artist_id = create(&app, "/artists/create", PETALS_FORM).await;

    for start_time in ["2001-05-21+21%3A30%3A00", "2099-04-01+20%3A00%3A00"] {
        let form = format!(
            "artist_id={}&venue_id={}&start_time={}",
            artist_id, venue_id, start_time
        );
        let (status, body) = send(&app, form_request("/shows/create", &form)).await;
        assert_eq!(status, StatusCode::OK, "show create failed: {}", body);
        assert_eq!(body["message"], "Show was successfully listed!");
    }

    let (_, venue) = send(&app, test_request("GET", &format!("/venues/{}", venue_id))).await;
    assert_eq!(venue["past_shows_count"], 1);
    assert_eq!(venue["upcoming_shows_count"], 1);
    assert_eq!(venue["upcoming_shows"][0]["artist_name"], "Guns N Petals");
    assert_eq!(venue["upcoming_shows"][0]["start_time"], "2099-04-01 20:00:00");

    let (_, artist) = send(&app, test_request("GET", &format!("/artists/{}", artist_id))).await;
    assert_eq!(artist["seeking_venue"], true);
    assert_eq!(artist["seeking_description"], "Looking for shows");
    assert_eq!(artist["past_shows"][0]["venue_name"], "The Musical Hop");

    let (_, directory) = send(&app, test_request("GET", "/venues")).await;
    assert_eq!(directory["areas"][0]["venues"][0]["num_upcoming_shows"], 1);

    let (_, shows) = send(&app, test_request("GET", "/shows")).await;
    assert_eq!(shows.as_array().unwrap().len(), 2);
    assert_eq!(shows[0]["start_time"], "2001-05-21 21:30:00");
}

#[tokio::test]
async fn test_show_with_unknown_artist_is_404() {
    let (_dir, app) = setup_app().await;
    let venue_id = create(&app, "/venues/create", HOP_FORM).await;

    let form = format!("artist_id=404&venue_id={}&start_time=2099-01-01+20%3A00%3A00", venue_id);
    let (status, body) = send(&app, form_request("/shows/create", &form)).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);

    let (_, shows) = send(&app, test_request("GET", "/shows")).await;
    assert_eq!(shows.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_show_with_bad_time_is_400() {
    let (_dir, app) = setup_app().await;

    let form = "artist_id=1&venue_id=1&start_time=next+tuesday";
    let (status, _) = send(&app, form_request("/shows/create", form)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_artist_removes_their_shows() {
    let (_dir, app) = setup_app().await;
    let venue_id = create(&app, "/venues/create", HOP_FORM).await;
    let artist_id = create(&app, "/artists/create", PETALS_FORM).await;
    let form = format!(
        "artist_id={}&venue_id={}&start_time=2099-01-01T20%3A00%3A00Z",
        artist_id, venue_id
    );
    send(&app, form_request("/shows/create", &form)).await;

    let (_, body) = send(&app, test_request("DELETE", &format!("/artists/{}", artist_id))).await;
    assert_eq!(body["success"], true);

    let (_, venue) = send(&app, test_request("GET", &format!("/venues/{}", venue_id))).await;
    assert_eq!(venue["upcoming_shows_count"], 0);
}

#[tokio::test]
async fn test_create_forms_describe_fields() {
    let (_dir, app) = setup_app().await;

    let (status, schema) = send(&app, test_request("GET", "/shows/create")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(schema["action"], "/shows/create");
    assert_eq!(schema["fields"].as_array().unwrap().len(), 3);

    let (_, schema) = send(&app, test_request("GET", "/venues/create")).await;
    let genres = schema["fields"]
        .as_array()
        .unwrap()
        .iter()
        .find(|f| f["name"] == "genres")
        .unwrap();
    assert_eq!(genres["multiple"], true);
}
