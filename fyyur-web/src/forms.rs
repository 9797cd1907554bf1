//! Submitted form bodies
//!
//! Forms arrive URL-encoded and are decoded through
//! [`FormBody`](crate::extract::FormBody) so the repeated `genres` field
//! collects into a list. Every field is
//! optional at the decoding layer; missing values are reported by
//! `into_fields` as validation errors instead of extractor rejections.

use fyyur_common::db::{ArtistFields, NewShow, VenueFields};
use fyyur_common::genres::clean_genres;
use fyyur_common::time::parse_show_time;
use fyyur_common::validation::{normalize_facebook_link, validate_contact_fields};
use fyyur_common::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which route a venue or artist form was submitted to
///
/// A browser omits an unchecked checkbox entirely, so an absent `seeking`
/// field means "not seeking" on edit. On create it means seeking, matching
/// the stored column default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Create,
    Edit,
}

impl Submission {
    fn seeking_when_absent(self) -> bool {
        match self {
            Submission::Create => true,
            Submission::Edit => false,
        }
    }
}

/// Description stored when a venue is seeking talent but gives none
pub const DEFAULT_VENUE_SEEKING_DESC: &str = "Currently seeking talented performers!";

/// Description stored when an artist is seeking venues but gives none
pub const DEFAULT_ARTIST_SEEKING_DESC: &str = "Currently seeking performance venues!";

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking: Option<String>,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Validate and normalize into writable venue columns
    pub fn into_fields(self, submission: Submission) -> Result<VenueFields> {
        let name = required("name", &self.name)?;
        let address = required("address", &self.address)?;
        validate_contact_fields(&self.city, &self.state, &self.phone)?;

        let seeking = parse_checkbox(self.seeking.as_deref(), submission.seeking_when_absent());
        let seeking_desc = seeking_description(
            seeking,
            self.seeking_description.as_deref(),
            DEFAULT_VENUE_SEEKING_DESC,
        );

        Ok(VenueFields {
            name,
            city: self.city,
            state: self.state,
            address,
            phone: self.phone,
            image_link: optional(self.image_link.as_deref()),
            facebook_link: normalize_facebook_link(self.facebook_link.as_deref()),
            seeking,
            seeking_desc,
            website: optional(self.website.as_deref()),
            genres: clean_genres(self.genres),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: String,
    pub genres: Vec<String>,
    pub facebook_link: Option<String>,
    pub image_link: Option<String>,
    pub website: Option<String>,
    pub seeking: Option<String>,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    /// Validate and normalize into writable artist columns
    pub fn into_fields(self, submission: Submission) -> Result<ArtistFields> {
        let name = required("name", &self.name)?;
        validate_contact_fields(&self.city, &self.state, &self.phone)?;

        let seeking = parse_checkbox(self.seeking.as_deref(), submission.seeking_when_absent());
        let seeking_desc = seeking_description(
            seeking,
            self.seeking_description.as_deref(),
            DEFAULT_ARTIST_SEEKING_DESC,
        );

        Ok(ArtistFields {
            name,
            city: self.city,
            state: self.state,
            phone: self.phone,
            image_link: optional(self.image_link.as_deref()),
            facebook_link: normalize_facebook_link(self.facebook_link.as_deref()),
            seeking,
            seeking_desc,
            website: optional(self.website.as_deref()),
            genres: clean_genres(self.genres),
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: String,
    pub venue_id: String,
    pub start_time: String,
}

impl ShowForm {
    pub fn into_new_show(self) -> Result<NewShow> {
        Ok(NewShow {
            artist_id: parse_id("artist_id", &self.artist_id)?,
            venue_id: parse_id("venue_id", &self.venue_id)?,
            start_time: parse_show_time(&self.start_time)?,
        })
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

/// One input of a create form, as served to the client
#[derive(Debug, Clone, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub required: bool,
    pub multiple: bool,
}

const fn field(name: &'static str, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        required,
        multiple: false,
    }
}

pub const VENUE_FORM_FIELDS: &[FieldSpec] = &[
    field("name", true),
    field("city", true),
    field("state", true),
    field("address", true),
    field("phone", true),
    FieldSpec {
        name: "genres",
        required: false,
        multiple: true,
    },
    field("facebook_link", false),
    field("image_link", false),
    field("website", false),
    field("seeking", false),
    field("seeking_description", false),
];

pub const ARTIST_FORM_FIELDS: &[FieldSpec] = &[
    field("name", true),
    field("city", true),
    field("state", true),
    field("phone", true),
    FieldSpec {
        name: "genres",
        required: false,
        multiple: true,
    },
    field("facebook_link", false),
    field("image_link", false),
    field("website", false),
    field("seeking", false),
    field("seeking_description", false),
];

pub const SHOW_FORM_FIELDS: &[FieldSpec] = &[
    field("artist_id", true),
    field("venue_id", true),
    field("start_time", true),
];

/// Form schema returned by the `create` GET routes
#[derive(Debug, Clone, Serialize)]
pub struct FormSchema {
    pub action: String,
    pub fields: &'static [FieldSpec],
}

fn required(field: &str, value: &str) -> Result<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(Error::Validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn optional(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

fn parse_checkbox(value: Option<&str>, absent: bool) -> bool {
    match value.map(|v| v.trim().to_ascii_lowercase()) {
        None => absent,
        Some(v) => matches!(v.as_str(), "y" | "yes" | "on" | "true" | "1"),
    }
}

fn seeking_description(seeking: bool, given: Option<&str>, default: &str) -> Option<String> {
    match optional(given) {
        Some(desc) => Some(desc),
        None if seeking => Some(default.to_string()),
        None => None,
    }
}

fn parse_id(field: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Validation(format!("{} must be a numeric id: {:?}", field, value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn venue_form() -> VenueForm {
        VenueForm {
            name: "The Musical Hop".to_string(),
            city: "SanFrancisco".to_string(),
            state: "CA".to_string(),
            address: "1015 Folsom Street".to_string(),
            phone: "1231231234".to_string(),
            genres: vec!["Jazz".to_string(), " ".to_string(), "Folk".to_string()],
            facebook_link: Some("https://www.facebook.com/TheMusicalHop".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_venue_form_into_fields() {
        let fields = venue_form().into_fields(Submission::Create).unwrap();

        assert_eq!(fields.name, "The Musical Hop");
        assert_eq!(fields.genres, vec!["Jazz", "Folk"]);
        assert_eq!(
            fields.facebook_link.as_deref(),
            Some("https://www.facebook.com/TheMusicalHop")
        );
        assert!(fields.seeking);
        assert_eq!(fields.seeking_desc.as_deref(), Some(DEFAULT_VENUE_SEEKING_DESC));
        assert_eq!(fields.image_link, None);
    }

    #[test]
    fn test_non_facebook_link_is_dropped() {
        let mut form = venue_form();
        form.facebook_link = Some("https://twitter.com/hop".to_string());

        assert_eq!(form.into_fields(Submission::Create).unwrap().facebook_link, None);
    }

    #[test]
    fn test_invalid_city_rejected() {
        let mut form = venue_form();
        form.city = "New York".to_string();

        assert!(matches!(form.into_fields(Submission::Create), Err(Error::Validation(_))));
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut form = venue_form();
        form.name = "  ".to_string();

        assert!(matches!(form.into_fields(Submission::Create), Err(Error::Validation(_))));
    }

    #[test]
    fn test_unchecked_seeking_has_no_default_description() {
        let form = ArtistForm {
            name: "Matt Quevedo".to_string(),
            city: "NewYork".to_string(),
            state: "NY".to_string(),
            phone: "3004005000".to_string(),
            seeking: Some("off".to_string()),
            ..Default::default()
        };

        let fields = form.into_fields(Submission::Create).unwrap();
        assert!(!fields.seeking);
        assert_eq!(fields.seeking_desc, None);
    }

    #[test]
    fn test_artist_keeps_given_description() {
        let form = ArtistForm {
            name: "Guns N Petals".to_string(),
            city: "SanFrancisco".to_string(),
            state: "CA".to_string(),
            phone: "3261235000".to_string(),
            seeking: Some("y".to_string()),
            seeking_description: Some("Looking for shows in the Bay Area".to_string()),
            ..Default::default()
        };

        let fields = form.into_fields(Submission::Create).unwrap();
        assert!(fields.seeking);
        assert_eq!(
            fields.seeking_desc.as_deref(),
            Some("Looking for shows in the Bay Area")
        );
    }

    #[test]
    fn test_absent_seeking_on_edit_clears_it() {
        let fields = venue_form().into_fields(Submission::Edit).unwrap();

        assert!(!fields.seeking);
        assert_eq!(fields.seeking_desc, None);
    }

    #[test]
    fn test_checked_seeking_on_edit_gets_default_description() {
        let mut form = venue_form();
        form.seeking = Some("y".to_string());

        let fields = form.into_fields(Submission::Edit).unwrap();
        assert!(fields.seeking);
        assert_eq!(fields.seeking_desc.as_deref(), Some(DEFAULT_VENUE_SEEKING_DESC));
    }

    #[test]
    fn test_show_form_parses_ids_and_time() {
        let form = ShowForm {
            artist_id: "4".to_string(),
            venue_id: " 1 ".to_string(),
            start_time: "2035-04-01 20:00:00".to_string(),
        };

        let show = form.into_new_show().unwrap();
        assert_eq!(show.artist_id, 4);
        assert_eq!(show.venue_id, 1);
    }

    #[test]
    fn test_show_form_rejects_non_numeric_id() {
        let form = ShowForm {
            artist_id: "four".to_string(),
            venue_id: "1".to_string(),
            start_time: "2035-04-01 20:00:00".to_string(),
        };

        assert!(matches!(form.into_new_show(), Err(Error::Validation(_))));
    }
}
