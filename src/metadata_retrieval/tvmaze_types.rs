/// TVMaze API response types for deserialization.
///
/// These structures mirror the JSON response format from the TVMaze API.
use serde::Deserialize;
use std::fmt;

/// One entry of the `/search/shows` response array.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeSearchResult {
    /// The matched show
    pub show: TvMazeShow,
}

/// A show as embedded in a search result.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeShow {
    pub id: u64,
    pub name: String,
    /// HTML summary (may be null)
    #[serde(default)]
    pub summary: Option<String>,
    /// Artwork (null when TVMaze has none)
    #[serde(default)]
    pub image: Option<TvMazeImage>,
}

/// Image URLs attached to a show.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeImage {
    #[serde(default)]
    pub medium: Option<String>,
}

/// A single entry of the `/shows/{id}/episodes` response array.
#[derive(Debug, Deserialize)]
pub(super) struct TvMazeEpisode {
    pub id: u64,
    /// Episode title (may be null for episodes without a title)
    #[serde(default)]
    pub name: Option<String>,
    pub season: TvMazeScalar,
    /// Episode number (null for specials)
    #[serde(default)]
    pub number: Option<TvMazeScalar>,
}

/// A JSON value that TVMaze sends as a number but that is kept as text.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum TvMazeScalar {
    Number(i64),
    Text(String),
}

impl fmt::Display for TvMazeScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TvMazeScalar::Number(n) => write!(f, "{}", n),
            TvMazeScalar::Text(s) => f.write_str(s),
        }
    }
}
