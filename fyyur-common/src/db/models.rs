//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A physical location that can host shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Venue {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking: bool,
    pub seeking_desc: Option<String>,
    pub website: Option<String>,
    #[sqlx(skip)]
    pub genres: Vec<String>,
    /// Shows hosted here, ordered by start time
    #[sqlx(skip)]
    pub shows: Vec<Show>,
}

/// A performer who can be booked into shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Artist {
    pub id: i64,
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking: bool,
    pub seeking_desc: Option<String>,
    pub website: Option<String>,
    #[sqlx(skip)]
    pub genres: Vec<String>,
    /// Shows played, ordered by start time
    #[sqlx(skip)]
    pub shows: Vec<Show>,
}

/// A scheduled performance linking one artist to one venue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Show {
    pub id: i64,
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Writable venue columns, used for both create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking: bool,
    pub seeking_desc: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
}

/// Writable artist columns, used for both create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking: bool,
    pub seeking_desc: Option<String>,
    pub website: Option<String>,
    pub genres: Vec<String>,
}

/// Input for booking a show
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewShow {
    pub artist_id: i64,
    pub venue_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Anything that owns a list of shows
pub trait HasShows {
    fn shows(&self) -> &[Show];

    /// Shows starting strictly after `now`
    fn upcoming_show_count(&self, now: DateTime<Utc>) -> usize {
        self.shows().iter().filter(|show| show.start_time > now).count()
    }
}

impl HasShows for Venue {
    fn shows(&self) -> &[Show] {
        &self.shows
    }
}

impl HasShows for Artist {
    fn shows(&self) -> &[Show] {
        &self.shows
    }
}

/// Name and picture of an artist, as listed beside one of their shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ArtistRef {
    pub id: i64,
    pub name: String,
    pub image_link: Option<String>,
}

/// Name and picture of a venue, as listed beside one of its shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct VenueRef {
    pub id: i64,
    pub name: String,
    pub image_link: Option<String>,
}

/// A show row joined with the names needed by the show listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct ShowWithParties {
    pub id: i64,
    pub start_time: DateTime<Utc>,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
}
