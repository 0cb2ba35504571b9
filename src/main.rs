use clap::{Parser, Subcommand};
use dialoguer::{Input, Select};
use std::process;
use std::time::Duration;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use tv_scout::{
    ClientConfig, DEFAULT_TIMEOUT_SECS, InteractionController, Presenter, ShowCatalog,
    TVMAZE_BASE_URL, TerminalPresenter, TvMazeProvider, TvScoutError,
};

#[derive(Parser)]
#[command(name = "tv-scout")]
#[command(author, version, about = "Search TV shows on TVMaze and browse their episodes")]
struct Cli {
    /// Base URL of the TVMaze API
    #[arg(long, global = true, default_value = TVMAZE_BASE_URL)]
    base_url: String,

    /// Timeout for each request, in seconds
    #[arg(long, global = true, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Search interactively and pick shows to list their episodes (default)
    Interactive,

    /// Search shows matching a term
    Search {
        /// Free-text search term
        term: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the episodes of a show
    Episodes {
        /// TVMaze show id, as printed by `search`
        show_id: u64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// What to do after leaving the result list
enum NextStep {
    Search,
    Quit,
}

fn init_tracing(verbose: bool) {
    // RUST_LOG wins over the verbose flag
    let default_filter = if verbose { "tv_scout=debug" } else { "tv_scout=warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_search(config: &ClientConfig, term: &str, json: bool) -> Result<(), TvScoutError> {
    let shows = tv_scout::search_shows(config, term)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&shows)?);
    } else {
        TerminalPresenter::stdout().render_shows(&shows);
    }

    Ok(())
}

fn run_episodes(config: &ClientConfig, show_id: u64, json: bool) -> Result<(), TvScoutError> {
    let episodes = tv_scout::list_episodes(config, show_id)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&episodes)?);
    } else {
        TerminalPresenter::stdout().render_episodes(show_id, &episodes);
    }

    Ok(())
}

/// Lets the user pick shows from the current results until they move on.
fn browse_results<C, P>(
    controller: &mut InteractionController<C, P>,
) -> Result<NextStep, TvScoutError>
where
    C: ShowCatalog,
    P: Presenter,
{
    loop {
        let mut items: Vec<String> = controller
            .shows()
            .iter()
            .map(|show| format!("Episodes of {} (#{})", show.name, show.id))
            .collect();
        let show_count = items.len();
        items.push("New search".to_string());
        items.push("Quit".to_string());

        let selection = Select::new()
            .with_prompt("What next?")
            .items(&items)
            .default(0)
            .interact_opt()?;

        match selection {
            Some(index) if index < show_count => {
                let show_id = controller.shows()[index].id;
                // Failures are shown by the presenter, the result list stays usable
                if let Err(e) = controller.request_episodes(show_id) {
                    debug!(show_id, error = %e, "episode request failed");
                }
            }
            Some(index) if index == show_count => return Ok(NextStep::Search),
            _ => return Ok(NextStep::Quit),
        }
    }
}

fn run_interactive(config: &ClientConfig) -> Result<(), TvScoutError> {
    let provider = TvMazeProvider::new(config)?;
    let mut controller = InteractionController::new(provider, TerminalPresenter::stdout());

    loop {
        let term: String = Input::new()
            .with_prompt("Search shows")
            .allow_empty(true)
            .interact_text()?;

        if let Err(e) = controller.submit_search(&term) {
            debug!(term = %term, error = %e, "search failed");
            continue;
        }

        match browse_results(&mut controller)? {
            NextStep::Search => continue,
            NextStep::Quit => return Ok(()),
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = ClientConfig {
        base_url: cli.base_url,
        timeout: Duration::from_secs(cli.timeout),
        ..ClientConfig::default()
    };

    let result = match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => run_interactive(&config),
        Commands::Search { term, json } => run_search(&config, &term, json),
        Commands::Episodes { show_id, json } => run_episodes(&config, show_id, json),
    };

    if let Err(e) = result {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
