/// TVMaze metadata provider implementation.
use super::tvmaze_types::{TvMazeEpisode, TvMazeSearchResult, TvMazeShow};
use super::{DEFAULT_IMAGE_URL, Episode, FetchError, Show, ShowCatalog};
use crate::http::{ClientConfig, HttpTransport, ReqwestTransport};
use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{debug, info};

/// Metadata provider for the TVMaze API.
///
/// This provider searches shows through `/search/shows` and lists episodes
/// through `/shows/{id}/episodes`, both relative to the configured base URL.
pub struct TvMazeProvider<T: HttpTransport = ReqwestTransport> {
    transport: T,
    base_url: Url,
}

impl TvMazeProvider<ReqwestTransport> {
    /// Creates a TVMaze provider talking HTTP according to `config`.
    pub fn new(config: &ClientConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(config)?;
        Self::with_transport(transport, &config.base_url)
    }
}

impl<T: HttpTransport> TvMazeProvider<T> {
    /// Creates a provider on top of an arbitrary transport.
    ///
    /// A missing trailing slash on `base_url` is added, so that endpoint paths
    /// are appended to it rather than replacing its last segment.
    pub fn with_transport(transport: T, base_url: &str) -> Result<Self, FetchError> {
        let mut normalized = base_url.trim().to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }

        let base_url = Url::parse(&normalized)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        if base_url.cannot_be_a_base() {
            return Err(FetchError::InvalidUrl(format!(
                "{}: cannot be used as a base URL",
                base_url
            )));
        }

        Ok(Self {
            transport,
            base_url,
        })
    }

    /// Returns the base URL endpoint paths are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, FetchError> {
        self.base_url
            .join(path)
            .map_err(|e| FetchError::InvalidUrl(format!("{}{}: {}", self.base_url, path, e)))
    }

    /// Fetches `url` and deserializes the body into `R`.
    fn fetch_json<R: DeserializeOwned>(&self, url: &Url) -> Result<R, FetchError> {
        let body = self.transport.get_text(url)?;

        serde_json::from_str(&body).map_err(|e| FetchError::ResponseShape {
            url: url.to_string(),
            source: e,
        })
    }

    /// Converts a TVMaze show to our `Show`, substituting the default image.
    fn convert_show(tvmaze_show: TvMazeShow) -> Show {
        let image = tvmaze_show
            .image
            .and_then(|image| image.medium)
            .filter(|medium| !medium.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_URL.to_string());

        Show {
            id: tvmaze_show.id,
            name: tvmaze_show.name,
            summary: tvmaze_show.summary.unwrap_or_default(),
            image,
        }
    }

    /// Converts a TVMaze episode to our `Episode`.
    fn convert_episode(tvmaze_episode: TvMazeEpisode) -> Episode {
        Episode {
            id: tvmaze_episode.id,
            name: tvmaze_episode.name.unwrap_or_default(),
            season: tvmaze_episode.season.to_string(),
            number: tvmaze_episode
                .number
                .map(|number| number.to_string())
                .unwrap_or_default(),
        }
    }
}

impl<T: HttpTransport> ShowCatalog for TvMazeProvider<T> {
    fn search_shows(&self, term: &str) -> Result<Vec<Show>, FetchError> {
        let mut url = self.endpoint("search/shows")?;
        url.query_pairs_mut().append_pair("q", term);

        let results: Vec<TvMazeSearchResult> = self.fetch_json(&url)?;
        info!(term, count = results.len(), "show search complete");

        Ok(results
            .into_iter()
            .map(|result| Self::convert_show(result.show))
            .collect())
    }

    fn list_episodes(&self, show_id: u64) -> Result<Vec<Episode>, FetchError> {
        let url = self.endpoint(&format!("shows/{}/episodes", show_id))?;

        let episodes: Vec<TvMazeEpisode> = self.fetch_json(&url)?;
        debug!(show_id, count = episodes.len(), "episode list fetched");

        Ok(episodes.into_iter().map(Self::convert_episode).collect())
    }
}
