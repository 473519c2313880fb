//! Data structures for OMDb search
//!
//! - **SearchResult**: one movie/series/episode row
//! - **SearchResponse**: the OMDb envelope wrapping results and error metadata
//! - **SearchError**: the error taxonomy surfaced to the UI

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

// =============================================================================
// Search Result
// =============================================================================

/// A single search hit. Identity is the IMDb id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Year")]
    pub year: String,
    #[serde(rename = "imdbID")]
    pub id: String,
    #[serde(rename = "Type")]
    pub media_type: String,
    #[serde(rename = "Poster")]
    pub poster_url: String,
}

impl SearchResult {
    /// Media type with the first letter upper-cased ("movie" -> "Movie")
    pub fn media_type_label(&self) -> String {
        let mut chars = self.media_type.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Poster URL if OMDb gave us something fetchable ("N/A" is common)
    pub fn poster(&self) -> Option<&str> {
        let url = self.poster_url.trim();
        if url.starts_with("http://") || url.starts_with("https://") {
            Some(url)
        } else {
            None
        }
    }
}

impl PartialEq for SearchResult {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for SearchResult {}

impl Hash for SearchResult {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for SearchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) [{}]", self.title, self.year, self.media_type_label())
    }
}

// =============================================================================
// Search Response (envelope)
// =============================================================================

/// Decoded OMDb search envelope
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "Search", default, deserialize_with = "null_as_empty")]
    pub results: Vec<SearchResult>,
    /// OMDb sends "True"/"False" as a string, any casing
    #[serde(rename = "Response", deserialize_with = "string_bool")]
    pub succeeded: bool,
    #[serde(rename = "Error", default, skip_serializing_if = "Option::is_none")]
    pub error_text: Option<String>,
}

impl SearchResponse {
    pub fn success(results: Vec<SearchResult>) -> Self {
        Self {
            results,
            succeeded: true,
            error_text: None,
        }
    }

    pub fn failure(error_text: impl Into<String>) -> Self {
        Self {
            results: Vec::new(),
            succeeded: false,
            error_text: Some(error_text.into()),
        }
    }

    /// Turn an unsuccessful envelope into the matching error kind
    pub fn into_result(self) -> Result<Self, SearchError> {
        if self.succeeded {
            Ok(self)
        } else {
            Err(SearchError::from_error_text(self.error_text.as_deref()))
        }
    }
}

fn string_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(raw.to_lowercase() == "true")
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<SearchResult>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<SearchResult>>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Errors
// =============================================================================

/// Search failure kinds. `NotFound` and `General` render the same text.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SearchError {
    #[error("No movies found")]
    NotFound,

    #[error("Too many results")]
    TooManyResults,

    #[error("No movies found")]
    General,
}

impl SearchError {
    /// Exact-match mapping of OMDb's `Error` field
    pub fn from_error_text(text: Option<&str>) -> Self {
        match text {
            Some("Movie not found!") => SearchError::NotFound,
            Some("Too many results.") => SearchError::TooManyResults,
            _ => SearchError::General,
        }
    }
}
