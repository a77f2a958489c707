//! cine-query - search movies and inspect search history from the shell

mod output;

use clap::{Parser, Subcommand};
use libcinescope::logging::{self, LoggingConfig};
use libcinescope::service::CinescopeService;
use libcinescope::{CinescopeError, Config, Database, MovieId, Result, StoreAction};

use crate::output::Format;

#[derive(Parser, Debug)]
#[command(name = "cine-query")]
#[command(version, about = "Search movies and inspect search history")]
#[command(long_about = r#"Search movies and inspect search history.

EXAMPLES:
    # Search and remember the term
    cine-query search "dune"

    # Later pages, without touching history
    cine-query search "dune" --page 2 --no-history

    # Everything the details screen shows
    cine-query details 438631 --format json | jq '.related.results[].title'

    # Recent searches, newest first
    cine-query history
    cine-query history remove 0

OUTPUT FORMATS:
    text  - Human-readable text (default)
    json  - Pretty-printed JSON
    jsonl - JSON lines, one object per line

EXIT CODES:
    0 - Success (including empty results)
    1 - Error (network, database, configuration)
    2 - API key rejected
    3 - Invalid input
"#)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Search movies by title
    Search {
        /// Free-text search term
        term: String,

        /// Result page, starting at 1
        #[arg(short, long, default_value_t = 1)]
        page: u32,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,

        /// Do not record the term in the search history
        #[arg(long)]
        no_history: bool,
    },

    /// Show details, posters and related movies
    Details {
        id: MovieId,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },

    /// List or edit the recent searches
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,

        #[arg(short, long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

#[derive(Subcommand, Debug)]
enum HistoryAction {
    /// Remove the entry at INDEX (0 is the newest)
    Remove { index: usize },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let mut log_config = logging::config_from_env();
    if !cli.verbose && std::env::var("CINESCOPE_LOG_LEVEL").is_err() {
        log_config.level = "warn".to_string();
    }
    LoggingConfig { verbose: cli.verbose, ..log_config }.init();

    tracing::debug!(?cli, "cine-query started");

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Command::Search {
            term,
            page,
            format,
            no_history,
        } => search(config, term, page, format, no_history).await,
        Command::Details { id, format } => details(config, id, format).await,
        Command::History { action, format } => history(config, action, format).await,
    }
}

async fn search(config: Config, term: String, page: u32, format: Format, no_history: bool) -> Result<()> {
    let term = term.trim().to_string();
    if term.is_empty() {
        return Err(CinescopeError::InvalidInput("search term is empty".to_string()));
    }
    if page == 0 {
        return Err(CinescopeError::InvalidInput("page starts at 1".to_string()));
    }

    let service = CinescopeService::from_config(config).await?;

    // Recorded whether or not the request succeeds
    if !no_history {
        let store = service.load_store().await?;
        service.dispatch(store, StoreAction::AddQuery(term.clone())).await?;
    }

    let results = service.movies().search_movies(&term, page).await?;

    print!("{}", output::search(&results, format)?);
    Ok(())
}

async fn details(config: Config, id: MovieId, format: Format) -> Result<()> {
    let service = CinescopeService::from_config(config).await?;
    let details = service.details(id).await?;

    print!("{}", output::details(&details, service.images(), format)?);
    Ok(())
}

/// History commands only need the database, not an API key
async fn history(config: Config, action: Option<HistoryAction>, format: Format) -> Result<()> {
    let db = Database::new(&config.store.path).await?;
    let mut store = db.load_store_or_default().await?;

    if let Some(HistoryAction::Remove { index }) = action {
        if index >= store.searches.len() {
            return Err(CinescopeError::InvalidInput(format!(
                "no history entry at index {} ({} entries)",
                index,
                store.searches.len()
            )));
        }
        store = libcinescope::store::reduce(store, StoreAction::RemoveQuery(index));
        db.save_store(&store).await?;
    }

    print!("{}", output::history(&store, format)?);
    Ok(())
}
