//! View-model builder
//!
//! Pure functions turning loaded rows into the shapes the pages need.
//! Nothing here touches the database; callers pass `now` so the
//! past/upcoming split is deterministic under test.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use fyyur_common::db::{Artist, ArtistRef, HasShows, Show, ShowWithParties, Venue, VenueRef};
use fyyur_common::time::format_show_time;
use fyyur_common::{Error, Result};
use serde::Serialize;

/// One city bucket of the venue directory
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityGroup {
    pub city: String,
    pub state: String,
    pub venues: Vec<VenueSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueSummary {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Group venues by city, keeping the order in which cities first appear
///
/// The state of a group is taken from its first venue.
pub fn build_venue_directory(venues: &[Venue], now: DateTime<Utc>) -> Vec<CityGroup> {
    let mut groups: Vec<CityGroup> = Vec::new();

    for venue in venues {
        let summary = VenueSummary {
            id: venue.id,
            name: venue.name.clone(),
            num_upcoming_shows: venue.upcoming_show_count(now),
        };

        match groups.iter_mut().find(|group| group.city == venue.city) {
            Some(group) => group.venues.push(summary),
            None => groups.push(CityGroup {
                city: venue.city.clone(),
                state: venue.state.clone(),
                venues: vec![summary],
            }),
        }
    }

    groups
}

/// Shows of one venue or artist, split around `now`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowSplit<E> {
    pub past_shows: Vec<E>,
    pub upcoming_shows: Vec<E>,
    pub past_shows_count: usize,
    pub upcoming_shows_count: usize,
}

/// A show as listed on a venue page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistAppearance {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

/// A show as listed on an artist page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueAppearance {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: String,
}

/// The other side of a show, as seen from a detail page
pub trait Counterpart {
    type Entry: Serialize;

    /// Id of this counterpart referenced by `show`
    fn referenced_by(show: &Show) -> i64;

    fn entry(&self, show: &Show) -> Self::Entry;
}

impl Counterpart for ArtistRef {
    type Entry = ArtistAppearance;

    fn referenced_by(show: &Show) -> i64 {
        show.artist_id
    }

    fn entry(&self, show: &Show) -> ArtistAppearance {
        ArtistAppearance {
            artist_id: self.id,
            artist_name: self.name.clone(),
            artist_image_link: self.image_link.clone(),
            start_time: format_show_time(&show.start_time),
        }
    }
}

impl Counterpart for VenueRef {
    type Entry = VenueAppearance;

    fn referenced_by(show: &Show) -> i64 {
        show.venue_id
    }

    fn entry(&self, show: &Show) -> VenueAppearance {
        VenueAppearance {
            venue_id: self.id,
            venue_name: self.name.clone(),
            venue_image_link: self.image_link.clone(),
            start_time: format_show_time(&show.start_time),
        }
    }
}

/// Partition shows into past and upcoming
///
/// A show is upcoming only if it starts strictly after `now`; one starting
/// exactly at `now` is past. Every show lands in exactly one list, in input
/// order. A show whose counterpart is missing from `counterparts` is an
/// error rather than being dropped.
pub fn build_show_split<C: Counterpart>(
    shows: &[Show],
    counterparts: &HashMap<i64, C>,
    now: DateTime<Utc>,
) -> Result<ShowSplit<C::Entry>> {
    let mut past_shows = Vec::new();
    let mut upcoming_shows = Vec::new();

    for show in shows {
        let id = C::referenced_by(show);
        let counterpart = counterparts.get(&id).ok_or_else(|| {
            Error::NotFound(format!("show {} references missing record {}", show.id, id))
        })?;

        if show.start_time > now {
            upcoming_shows.push(counterpart.entry(show));
        } else {
            past_shows.push(counterpart.entry(show));
        }
    }

    Ok(ShowSplit {
        past_shows_count: past_shows.len(),
        upcoming_shows_count: upcoming_shows.len(),
        past_shows,
        upcoming_shows,
    })
}

/// Something that can be found by name search
pub trait Searchable: HasShows {
    fn id(&self) -> i64;
    fn name(&self) -> &str;
}

impl Searchable for Venue {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Searchable for Artist {
    fn id(&self) -> i64 {
        self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResults {
    pub search_term: String,
    pub count: usize,
    pub data: Vec<SearchHit>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: i64,
    pub name: String,
    pub num_upcoming_shows: usize,
}

/// Case-insensitive substring match of `query` against names
///
/// An empty query matches everything.
pub fn build_search_results<E: Searchable>(
    entities: &[E],
    query: &str,
    now: DateTime<Utc>,
) -> SearchResults {
    let needle = query.to_lowercase();

    let data: Vec<SearchHit> = entities
        .iter()
        .filter(|entity| entity.name().to_lowercase().contains(&needle))
        .map(|entity| SearchHit {
            id: entity.id(),
            name: entity.name().to_string(),
            num_upcoming_shows: entity.upcoming_show_count(now),
        })
        .collect();

    SearchResults {
        search_term: query.to_string(),
        count: data.len(),
        data,
    }
}

/// Venue detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    #[serde(flatten)]
    pub shows: ShowSplit<ArtistAppearance>,
}

pub fn build_venue_detail(
    venue: &Venue,
    artists: &HashMap<i64, ArtistRef>,
    now: DateTime<Utc>,
) -> Result<VenueDetail> {
    Ok(VenueDetail {
        id: venue.id,
        name: venue.name.clone(),
        genres: venue.genres.clone(),
        address: venue.address.clone(),
        city: venue.city.clone(),
        state: venue.state.clone(),
        phone: venue.phone.clone(),
        website: venue.website.clone(),
        facebook_link: venue.facebook_link.clone(),
        seeking_talent: venue.seeking,
        seeking_description: venue.seeking_desc.clone(),
        image_link: venue.image_link.clone(),
        shows: build_show_split(&venue.shows, artists, now)?,
    })
}

/// Artist detail page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistDetail {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
    #[serde(flatten)]
    pub shows: ShowSplit<VenueAppearance>,
}

pub fn build_artist_detail(
    artist: &Artist,
    venues: &HashMap<i64, VenueRef>,
    now: DateTime<Utc>,
) -> Result<ArtistDetail> {
    Ok(ArtistDetail {
        id: artist.id,
        name: artist.name.clone(),
        genres: artist.genres.clone(),
        city: artist.city.clone(),
        state: artist.state.clone(),
        phone: artist.phone.clone(),
        website: artist.website.clone(),
        facebook_link: artist.facebook_link.clone(),
        seeking_venue: artist.seeking,
        seeking_description: artist.seeking_desc.clone(),
        image_link: artist.image_link.clone(),
        shows: build_show_split(&artist.shows, venues, now)?,
    })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistListing {
    pub id: i64,
    pub name: String,
}

pub fn build_artist_listing(artists: &[Artist]) -> Vec<ArtistListing> {
    artists
        .iter()
        .map(|artist| ArtistListing {
            id: artist.id,
            name: artist.name.clone(),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShowListing {
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: String,
}

pub fn build_show_listing(shows: &[ShowWithParties]) -> Vec<ShowListing> {
    shows
        .iter()
        .map(|show| ShowListing {
            venue_id: show.venue_id,
            venue_name: show.venue_name.clone(),
            artist_id: show.artist_id,
            artist_name: show.artist_name.clone(),
            artist_image_link: show.artist_image_link.clone(),
            start_time: format_show_time(&show.start_time),
        })
        .collect()
}

/// Stored venue values for pre-filling the edit form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VenueFormValues {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub address: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl From<&Venue> for VenueFormValues {
    fn from(venue: &Venue) -> Self {
        Self {
            id: venue.id,
            name: venue.name.clone(),
            genres: venue.genres.clone(),
            address: venue.address.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            phone: venue.phone.clone(),
            website: venue.website.clone(),
            facebook_link: venue.facebook_link.clone(),
            seeking_talent: venue.seeking,
            seeking_description: venue.seeking_desc.clone(),
            image_link: venue.image_link.clone(),
        }
    }
}

/// Stored artist values for pre-filling the edit form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArtistFormValues {
    pub id: i64,
    pub name: String,
    pub genres: Vec<String>,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub website: Option<String>,
    pub facebook_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
    pub image_link: Option<String>,
}

impl From<&Artist> for ArtistFormValues {
    fn from(artist: &Artist) -> Self {
        Self {
            id: artist.id,
            name: artist.name.clone(),
            genres: artist.genres.clone(),
            city: artist.city.clone(),
            state: artist.state.clone(),
            phone: artist.phone.clone(),
            website: artist.website.clone(),
            facebook_link: artist.facebook_link.clone(),
            seeking_venue: artist.seeking,
            seeking_description: artist.seeking_desc.clone(),
            image_link: artist.image_link.clone(),
        }
    }
}
