/// Data structures and traits for TV show metadata retrieval.
///
/// This module provides the normalized `Show` and `Episode` records handed to
/// the presentation layer, the error type shared by every lookup, and the
/// `ShowCatalog` trait implemented by metadata providers.
mod tvmaze;
mod tvmaze_types;

pub use tvmaze::TvMazeProvider;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Placeholder image used whenever the provider has no image for a show.
pub const DEFAULT_IMAGE_URL: &str = "https://tinyurl.com/tv-missing";

/// Errors that can occur while fetching shows or episodes.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request could not be sent or completed
    #[error("Request to {url} failed: {reason}")]
    Network { url: String, reason: String },

    /// The provider answered with a non-success HTTP status
    #[error("Request to {url} returned HTTP {status}")]
    Status { url: String, status: u16 },

    /// The response body did not have the expected JSON structure
    #[error("Unexpected response from {url}: {source}")]
    ResponseShape {
        url: String,
        source: serde_json::Error,
    },

    /// An endpoint URL could not be built from the configured base URL
    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Returns true if the request itself failed (transport or HTTP status).
    pub fn is_network(&self) -> bool {
        matches!(self, FetchError::Network { .. } | FetchError::Status { .. })
    }

    /// Returns true if a response arrived but could not be understood.
    pub fn is_response_shape(&self) -> bool {
        matches!(self, FetchError::ResponseShape { .. })
    }
}

/// A TV show as returned by a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Show {
    /// Provider identifier, used to request the episode list
    pub id: u64,
    /// The show's title
    pub name: String,
    /// Short description, may contain HTML markup
    pub summary: String,
    /// Image URL, never empty (falls back to `DEFAULT_IMAGE_URL`)
    pub image: String,
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Episode {
    /// Provider identifier of the episode
    pub id: u64,
    /// The episode title
    pub name: String,
    /// Season the episode belongs to
    pub season: String,
    /// Episode number within the season (empty for unnumbered specials)
    pub number: String,
}

/// Trait for metadata providers that can search shows and list episodes.
///
/// Both operations are plain lookups: they never touch presentation state,
/// and they never answer a failed request with an empty result.
pub trait ShowCatalog {
    /// Searches for shows matching a free-text term.
    ///
    /// The term is passed to the provider as-is, including the empty string.
    /// Results keep the provider's order.
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, FetchError>;

    /// Lists all episodes of the show with the given identifier.
    ///
    /// The identifier is not validated; an unknown show surfaces as whatever
    /// error the provider reports. Results keep the provider's order.
    fn list_episodes(&self, show_id: u64) -> Result<Vec<Episode>, FetchError>;
}

impl<C: ShowCatalog + ?Sized> ShowCatalog for &C {
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, FetchError> {
        (**self).search_shows(term)
    }

    fn list_episodes(&self, show_id: u64) -> Result<Vec<Episode>, FetchError> {
        (**self).list_episodes(show_id)
    }
}
