//! Interaction controller
//!
//! Ties the catalog services to a presentation surface. The controller owns
//! the only mutable view state of the application: the show list currently
//! displayed, and whether an episode list is shown below it.

use crate::metadata_retrieval::{Episode, FetchError, Show, ShowCatalog};
use tracing::{debug, warn};

/// Which panels are currently visible.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewState {
    /// Search results are shown, the episode panel is hidden
    ShowsOnly,
    /// Search results are shown together with the episodes of one show
    ShowsWithEpisodes { show_id: u64 },
}

/// Presentation surface driven by the controller.
///
/// Implementors only receive plain data and never query the controller back.
pub trait Presenter {
    /// Replaces the displayed result list with `shows`.
    fn render_shows(&mut self, shows: &[Show]);

    /// Hides the episode panel and drops its content.
    fn hide_episodes(&mut self);

    /// Fills the episode panel with the episodes of `show_id` and reveals it.
    fn render_episodes(&mut self, show_id: u64, episodes: &[Episode]);

    /// Shows an error indicator. The rest of the view stays as it was.
    fn render_error(&mut self, error: &FetchError);
}

/// State machine reacting to search submissions and episode requests.
///
/// Both collaborators are handed in once at construction; every user action
/// goes through `submit_search` or `request_episodes`.
pub struct InteractionController<C: ShowCatalog, P: Presenter> {
    catalog: C,
    presenter: P,
    state: ViewState,
    shows: Vec<Show>,
    episodes: Vec<Episode>,
}

impl<C: ShowCatalog, P: Presenter> InteractionController<C, P> {
    /// Creates a controller with an empty result list and no episode panel.
    pub fn new(catalog: C, presenter: P) -> Self {
        Self {
            catalog,
            presenter,
            state: ViewState::ShowsOnly,
            shows: Vec::new(),
            episodes: Vec::new(),
        }
    }

    /// Current view state
    pub fn state(&self) -> ViewState {
        self.state
    }

    /// Shows from the most recent successful search
    pub fn shows(&self) -> &[Show] {
        &self.shows
    }

    /// Episodes currently in the panel (empty in `ShowsOnly`)
    pub fn episodes(&self) -> &[Episode] {
        &self.episodes
    }

    /// Looks up a show from the current result list by id.
    pub fn find_show(&self, show_id: u64) -> Option<&Show> {
        self.shows.iter().find(|show| show.id == show_id)
    }

    /// The injected presentation surface
    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Handles a search submission.
    ///
    /// On success the episode panel is hidden, the new results are rendered
    /// and the state becomes `ShowsOnly`. On failure nothing but the error
    /// indicator changes.
    pub fn submit_search(&mut self, term: &str) -> Result<&[Show], FetchError> {
        debug!(term, "search submitted");

        let shows = match self.catalog.search_shows(term) {
            Ok(shows) => shows,
            Err(e) => return Err(self.fail(e)),
        };

        self.episodes.clear();
        self.presenter.hide_episodes();

        self.shows = shows;
        self.presenter.render_shows(&self.shows);
        self.transition(ViewState::ShowsOnly);

        Ok(&self.shows)
    }

    /// Handles activation of the episode control of the show `show_id`.
    ///
    /// The id is the one carried by the activated control. The episode list is
    /// fully fetched before the panel is touched.
    pub fn request_episodes(&mut self, show_id: u64) -> Result<&[Episode], FetchError> {
        debug!(show_id, "episodes requested");

        let episodes = match self.catalog.list_episodes(show_id) {
            Ok(episodes) => episodes,
            Err(e) => return Err(self.fail(e)),
        };

        self.episodes = episodes;
        self.presenter.render_episodes(show_id, &self.episodes);
        self.transition(ViewState::ShowsWithEpisodes { show_id });

        Ok(&self.episodes)
    }

    fn transition(&mut self, next: ViewState) {
        if self.state != next {
            debug!(from = ?self.state, to = ?next, "view state changed");
        }
        self.state = next;
    }

    fn fail(&mut self, error: FetchError) -> FetchError {
        warn!(error = %error, "fetch failed, keeping current view");
        self.presenter.render_error(&error);
        error
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata_retrieval::DEFAULT_IMAGE_URL;
    use std::cell::Cell;

    fn show(id: u64, name: &str) -> Show {
        Show {
            id,
            name: name.to_string(),
            summary: String::new(),
            image: DEFAULT_IMAGE_URL.to_string(),
        }
    }

    fn episode(id: u64, name: &str) -> Episode {
        Episode {
            id,
            name: name.to_string(),
            season: "1".to_string(),
            number: id.to_string(),
        }
    }

    /// Catalog with fixed answers that can be switched offline.
    struct FakeCatalog {
        offline: Cell<bool>,
    }

    impl FakeCatalog {
        fn new() -> Self {
            Self {
                offline: Cell::new(false),
            }
        }

        fn check(&self, url: &str) -> Result<(), FetchError> {
            if self.offline.get() {
                return Err(FetchError::Network {
                    url: url.to_string(),
                    reason: "offline".to_string(),
                });
            }
            Ok(())
        }
    }

    impl ShowCatalog for FakeCatalog {
        fn search_shows(&self, term: &str) -> Result<Vec<Show>, FetchError> {
            self.check("search/shows")?;
            Ok(match term {
                "batman" => vec![show(1, "Batman"), show(2, "Batman Beyond")],
                "bones" => vec![show(3, "Bones")],
                _ => Vec::new(),
            })
        }

        fn list_episodes(&self, show_id: u64) -> Result<Vec<Episode>, FetchError> {
            self.check("shows/episodes")?;
            Ok(match show_id {
                1 => vec![episode(10, "Pilot"), episode(11, "Second")],
                2 => vec![episode(20, "Rebirth")],
                _ => Vec::new(),
            })
        }
    }

    /// Presenter that mirrors what would be on screen.
    #[derive(Default)]
    struct RecordingPresenter {
        shows: Vec<u64>,
        episodes: Option<(u64, Vec<u64>)>,
        errors: usize,
    }

    impl Presenter for RecordingPresenter {
        fn render_shows(&mut self, shows: &[Show]) {
            self.shows = shows.iter().map(|s| s.id).collect();
        }

        fn hide_episodes(&mut self) {
            self.episodes = None;
        }

        fn render_episodes(&mut self, show_id: u64, episodes: &[Episode]) {
            self.episodes = Some((show_id, episodes.iter().map(|e| e.id).collect()));
        }

        fn render_error(&mut self, _error: &FetchError) {
            self.errors += 1;
        }
    }

    fn controller(
        catalog: &FakeCatalog,
    ) -> InteractionController<&FakeCatalog, RecordingPresenter> {
        InteractionController::new(catalog, RecordingPresenter::default())
    }

    #[test]
    fn test_starts_with_shows_only() {
        let catalog = FakeCatalog::new();
        let controller = controller(&catalog);

        assert_eq!(controller.state(), ViewState::ShowsOnly);
        assert!(controller.shows().is_empty());
        assert!(controller.episodes().is_empty());
    }

    #[test]
    fn test_search_renders_results() {
        let catalog = FakeCatalog::new();
        let mut controller = controller(&catalog);

        let shows = controller.submit_search("batman").unwrap();
        assert_eq!(shows.len(), 2);

        assert_eq!(controller.state(), ViewState::ShowsOnly);
        assert_eq!(controller.presenter().shows, vec![1, 2]);
        assert_eq!(controller.presenter().episodes, None);
        assert_eq!(controller.find_show(2).map(|s| s.name.as_str()), Some("Batman Beyond"));
    }

    #[test]
    fn test_episode_request_uses_triggering_show() {
        let catalog = FakeCatalog::new();
        let mut controller = controller(&catalog);

        controller.submit_search("batman").unwrap();
        controller.request_episodes(2).unwrap();

        assert_eq!(controller.state(), ViewState::ShowsWithEpisodes { show_id: 2 });
        assert_eq!(controller.presenter().episodes, Some((2, vec![20])));
        assert_eq!(controller.presenter().shows, vec![1, 2]);

        controller.request_episodes(1).unwrap();
        assert_eq!(controller.state(), ViewState::ShowsWithEpisodes { show_id: 1 });
        assert_eq!(controller.presenter().episodes, Some((1, vec![10, 11])));
    }

    #[test]
    fn test_new_search_clears_stale_episodes() {
        let catalog = FakeCatalog::new();
        let mut controller = controller(&catalog);

        controller.submit_search("batman").unwrap();
        controller.request_episodes(1).unwrap();
        controller.submit_search("bones").unwrap();

        assert_eq!(controller.state(), ViewState::ShowsOnly);
        assert!(controller.episodes().is_empty());
        assert_eq!(controller.presenter().episodes, None);
        assert_eq!(controller.presenter().shows, vec![3]);
    }

    #[test]
    fn test_failed_search_keeps_view() {
        let catalog = FakeCatalog::new();
        let mut controller = controller(&catalog);

        controller.submit_search("batman").unwrap();
        controller.request_episodes(1).unwrap();

        catalog.offline.set(true);
        let error = controller.submit_search("bones").unwrap_err();

        assert!(error.is_network());
        assert_eq!(controller.state(), ViewState::ShowsWithEpisodes { show_id: 1 });
        assert_eq!(controller.presenter().shows, vec![1, 2]);
        assert_eq!(controller.presenter().episodes, Some((1, vec![10, 11])));
        assert_eq!(controller.presenter().errors, 1);
    }

    #[test]
    fn test_failed_episode_request_keeps_view() {
        let catalog = FakeCatalog::new();
        let mut controller = controller(&catalog);

        controller.submit_search("batman").unwrap();

        catalog.offline.set(true);
        assert!(controller.request_episodes(1).is_err());

        assert_eq!(controller.state(), ViewState::ShowsOnly);
        assert!(controller.episodes().is_empty());
        assert_eq!(controller.presenter().episodes, None);
        assert_eq!(controller.presenter().errors, 1);
    }

    #[test]
    fn test_empty_search_result_is_rendered() {
        let catalog = FakeCatalog::new();
        let mut controller = controller(&catalog);

        controller.submit_search("batman").unwrap();
        let shows = controller.submit_search("").unwrap();

        assert!(shows.is_empty());
        assert!(controller.presenter().shows.is_empty());
        assert_eq!(controller.presenter().errors, 0);
    }
}
