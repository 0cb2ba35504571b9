//! Plain-text presenter for terminals
//!
//! Renders shows and episodes as numbered lines. Summaries arrive as HTML from
//! the provider and are flattened to text before printing.

use crate::controller::Presenter;
use crate::metadata_retrieval::{Episode, FetchError, Show};
use std::io::{self, Write};
use tracing::warn;

/// `Presenter` writing to any `io::Write`, usually stdout.
pub struct TerminalPresenter<W: Write> {
    out: W,
    episodes_visible: bool,
}

impl TerminalPresenter<io::Stdout> {
    /// Creates a presenter printing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    /// Creates a presenter writing to `out`.
    pub fn new(out: W) -> Self {
        Self {
            out,
            episodes_visible: false,
        }
    }

    /// Whether an episode list is currently displayed
    pub fn episodes_visible(&self) -> bool {
        self.episodes_visible
    }

    /// Consumes the presenter and returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        let result = self
            .out
            .write_all(text.as_bytes())
            .and_then(|_| self.out.flush());

        if let Err(e) = result {
            warn!(error = %e, "failed to write to terminal");
        }
    }
}

/// Flattens an HTML summary to a single trimmed paragraph.
fn summary_text(summary: &str) -> String {
    nanohtml2text::html2text(summary)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Formats the season/episode marker, e.g. `S1E4` or `S2 special`.
fn episode_marker(episode: &Episode) -> String {
    if episode.number.is_empty() {
        format!("S{} special", episode.season)
    } else {
        format!("S{}E{}", episode.season, episode.number)
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn render_shows(&mut self, shows: &[Show]) {
        let mut text = String::from("\n=== Shows ===\n");

        if shows.is_empty() {
            text.push_str("No shows found.\n");
        }

        for (index, show) in shows.iter().enumerate() {
            text.push_str(&format!("[{}] {} (#{})\n", index + 1, show.name, show.id));

            let summary = summary_text(&show.summary);
            if !summary.is_empty() {
                text.push_str(&format!("    {}\n", summary));
            }
            text.push_str(&format!("    Image: {}\n", show.image));
        }

        self.emit(&text);
    }

    fn hide_episodes(&mut self) {
        self.episodes_visible = false;
    }

    fn render_episodes(&mut self, show_id: u64, episodes: &[Episode]) {
        let mut text = format!("\n=== Episodes of show #{} ===\n", show_id);

        if episodes.is_empty() {
            text.push_str("No episodes listed.\n");
        }

        for episode in episodes {
            text.push_str(&format!("  {:<12} {}\n", episode_marker(episode), episode.name));
        }

        self.emit(&text);
        self.episodes_visible = true;
    }

    fn render_error(&mut self, error: &FetchError) {
        self.emit(&format!("\n!! {}\n", error));
    }
}
