//! Genre list encoding
//!
//! Genres are stored as ordered rows in `venue_genres` / `artist_genres`.
//! The old single-column layout kept them as one string like
//! `{Jazz,Reggae,Swing}`; this module decodes that form so migration v1 can
//! move legacy rows into the join tables.

/// Decode a legacy genres string
///
/// Drops the first and last character (the braces or brackets around the
/// list) and splits the rest on commas. Empty inner text yields no genres.
pub fn split_genres(raw: &str) -> Vec<String> {
    let mut chars = raw.chars();
    chars.next();
    chars.next_back();
    let inner = chars.as_str();

    if inner.is_empty() {
        return Vec::new();
    }

    inner.split(',').map(str::to_string).collect()
}

/// Encode a genre list in the legacy single-string form
pub fn join_genres<S: AsRef<str>>(genres: &[S]) -> String {
    let joined = genres
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(",");
    format!("{{{}}}", joined)
}

/// Trim names and drop empty entries from submitted form values
pub fn clean_genres<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .map(|value| value.as_ref().trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}
