use clap::{ArgAction, Parser, Subcommand};
use commands::{config, edit, library, search};
use watchlist_core::WatchlistError;

mod commands;
mod logging;
mod output;

#[derive(Parser)]
#[command(name = "watchlist")]
#[command(about = "Watchlist - Keep track of the movies you want to see")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "human", value_enum)]
    output: output::OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List saved movies, optionally filtered
    #[command(long_about = "List the movies in your watchlist. Filter by an exact genre name or show favorites only; --query narrows by a case-insensitive title match. Favorites ignore the other filters.")]
    List {
        /// Only movies tagged with this exact genre
        #[arg(long, conflicts_with = "favorites")]
        genre: Option<String>,

        /// Only favorite movies
        #[arg(long, action = ArgAction::SetTrue)]
        favorites: bool,

        /// Case-insensitive title search
        #[arg(long)]
        query: Option<String>,
    },
    /// List the genres present in the watchlist
    Genres {
        /// Include the "Favorite" option
        #[arg(long, action = ArgAction::SetTrue)]
        with_favorite: bool,
    },
    /// Show the home screen sections (Today's Picks, For You, Best This Year)
    Home,
    /// Show one saved movie in detail
    Show {
        /// IMDb id, e.g. tt0111161
        id: String,
    },
    /// Search the movie database by title
    Search {
        query: String,
    },
    /// Search by title and add a result to the watchlist
    #[command(long_about = "Search the movie database by title, pick one of the results and add it to the watchlist. Without --pick an interactive selection is shown.")]
    Add {
        query: String,

        /// 1-based position of the result to add
        #[arg(long)]
        pick: Option<usize>,

        /// Comment to save with the movie
        #[arg(long)]
        comment: Option<String>,
    },
    /// Toggle a movie's favorite flag
    Favorite {
        id: String,

        /// Mark as favorite instead of toggling
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "off")]
        on: bool,

        /// Unmark as favorite instead of toggling
        #[arg(long, action = ArgAction::SetTrue)]
        off: bool,
    },
    /// Set or clear a movie's comment
    Comment {
        id: String,

        /// New comment text (prompted for when omitted)
        text: Option<String>,

        /// Remove the comment
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "text")]
        clear: bool,
    },
    /// Remove a movie from the watchlist
    Remove {
        id: String,
    },
    /// Add the default movies if the watchlist is empty
    Seed,
    /// Manage configuration and the OMDb API key
    Config {
        #[command(subcommand)]
        cmd: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Show current configuration (masks the API key)
    Show,
    /// Store the OMDb API key in the credentials file
    #[command(name = "api-key")]
    ApiKey {
        /// The key (prompted for when omitted)
        key: Option<String>,

        /// Remove the stored key
        #[arg(long, action = ArgAction::SetTrue, conflicts_with = "key")]
        clear: bool,
    },
    /// Write a default config file
    Init {
        /// Overwrite an existing config file
        #[arg(long, action = ArgAction::SetTrue)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let context = commands::AppContext::load()?;
    logging::init_logging_with_file(cli.verbose, cli.quiet, context.config.logging.file.clone())
        .map_err(|e| color_eyre::eyre::eyre!("{}", e))?;

    let output = output::Output::new(cli.output, cli.quiet);

    let result = match cli.command {
        Commands::List { genre, favorites, query } => {
            library::run_list(&context, genre, favorites, query, &output)
        }
        Commands::Genres { with_favorite } => library::run_genres(&context, with_favorite, &output),
        Commands::Home => library::run_home(&context, &output),
        Commands::Show { id } => library::run_show(&context, &id, &output),
        Commands::Search { query } => search::run_search(&context, &query, &output).await,
        Commands::Add { query, pick, comment } => {
            search::run_add(&context, &query, pick, comment, &output).await
        }
        Commands::Favorite { id, on, off } => {
            let value = if on { Some(true) } else if off { Some(false) } else { None };
            edit::run_favorite(&context, &id, value, &output)
        }
        Commands::Comment { id, text, clear } => edit::run_comment(&context, &id, text, clear, &output),
        Commands::Remove { id } => edit::run_remove(&context, &id, &output),
        Commands::Seed => edit::run_seed(&context, &output),
        Commands::Config { cmd } => config::run_config(&context, cmd, &output),
    };

    // Domain failures get their one user-facing message instead of a report
    if let Err(report) = result {
        match report.downcast_ref::<WatchlistError>() {
            Some(WatchlistError::Cancelled) => {
                output.warn(WatchlistError::Cancelled.user_message());
                std::process::exit(130);
            }
            Some(err) => {
                output.error(err.user_message());
                std::process::exit(1);
            }
            None => return Err(report),
        }
    }

    Ok(())
}
