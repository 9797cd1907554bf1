//! Contact field validation
//!
//! Checks raw form input before a venue or artist record is built or
//! mutated. A failed check is returned as [`Error::Validation`] and the
//! caller must not touch the store.

use crate::{Error, Result};

/// Substring a Facebook link must contain to be kept
pub const FACEBOOK_MARKER: &str = "www.facebook.com/";

/// Validate city, state and phone
///
/// City and state must be non-empty and purely alphabetic. Spaces are
/// rejected too, so "New York" does not pass. Phone must be non-empty and
/// made of ASCII digits only.
pub fn validate_contact_fields(city: &str, state: &str, phone: &str) -> Result<()> {
    if !is_alphabetic(city) {
        return Err(Error::Validation(format!(
            "city must contain only letters: {:?}",
            city
        )));
    }

    if !is_alphabetic(state) {
        return Err(Error::Validation(format!(
            "state must contain only letters: {:?}",
            state
        )));
    }

    if !is_numeric(phone) {
        return Err(Error::Validation(format!(
            "phone must contain only digits: {:?}",
            phone
        )));
    }

    Ok(())
}

/// Keep the link only if it looks like a Facebook page
///
/// No URL parsing is done beyond the substring test.
pub fn normalize_facebook_link(raw: Option<&str>) -> Option<String> {
    raw.filter(|link| link.contains(FACEBOOK_MARKER))
        .map(str::to_string)
}

fn is_alphabetic(value: &str) -> bool {
    !value.is_empty() && value.chars().all(char::is_alphabetic)
}

fn is_numeric(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
