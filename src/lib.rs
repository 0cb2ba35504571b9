//! tv_scout - Search TV shows and browse their episodes
//!
//! This library provides the catalog services that query the TVMaze API and
//! normalize its answers into `Show` and `Episode` records, plus the
//! interaction controller that sequences searches and episode requests against
//! a pluggable presentation surface.

mod controller;
mod http;
mod metadata_retrieval;
mod terminal;

pub use controller::{InteractionController, Presenter, ViewState};
pub use http::{
    ClientConfig, DEFAULT_TIMEOUT_SECS, HttpTransport, ReqwestTransport, TVMAZE_BASE_URL,
};
pub use metadata_retrieval::{
    DEFAULT_IMAGE_URL, Episode, FetchError, Show, ShowCatalog, TvMazeProvider,
};
pub use terminal::TerminalPresenter;

use thiserror::Error;

/// Top-level error type for tv_scout operations
#[derive(Debug, Error)]
pub enum TvScoutError {
    /// Error while talking to the metadata provider
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Error while reading user input
    #[error("Prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    /// Error while serializing output
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Searches TVMaze for shows matching `term` using the given configuration.
///
/// This is a convenience wrapper creating a one-off `TvMazeProvider`.
///
/// # Examples
///
/// ```no_run
/// use tv_scout::{search_shows, ClientConfig};
///
/// let shows = search_shows(&ClientConfig::default(), "batman").unwrap();
/// for show in shows {
///     println!("{} ({})", show.name, show.image);
/// }
/// ```
pub fn search_shows(config: &ClientConfig, term: &str) -> Result<Vec<Show>, FetchError> {
    TvMazeProvider::new(config)?.search_shows(term)
}

/// Lists the episodes of the show `show_id` using the given configuration.
///
/// # Examples
///
/// ```no_run
/// use tv_scout::{list_episodes, ClientConfig};
///
/// let episodes = list_episodes(&ClientConfig::default(), 169).unwrap();
/// for episode in episodes {
///     println!("S{}E{} {}", episode.season, episode.number, episode.name);
/// }
/// ```
pub fn list_episodes(config: &ClientConfig, show_id: u64) -> Result<Vec<Episode>, FetchError> {
    TvMazeProvider::new(config)?.list_episodes(show_id)
}
