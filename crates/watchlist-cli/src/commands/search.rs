use super::progress::{is_interactive, Spinner};
use super::prompts::{prompt_select, prompt_string};
use super::table::search_results_table;
use super::{AppContext, Controller};
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;
use tracing::debug;
use watchlist_core::{SearchState, WatchlistError, WatchlistResult};
use watchlist_models::SearchResultItem;

/// Run a search, cancelling the in-flight request on Ctrl-C
async fn search_with_interrupt(
    controller: &Controller,
    query: &str,
    output: &Output,
) -> WatchlistResult<SearchState> {
    let state = SearchState::new().begin(query);
    let cancel = controller.cancel_handle();
    let spinner = Spinner::start(format!("Searching for '{}'...", query.trim()), output.is_human());

    let outcome = tokio::select! {
        result = controller.search(query) => result,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            Err(WatchlistError::Cancelled)
        }
    };
    spinner.finish();

    let results = outcome?;
    debug!("Search for '{}' returned {} results", query.trim(), results.len());
    Ok(state.resolve(Ok(results)))
}

pub async fn run_search(context: &AppContext, query: &str, output: &Output) -> Result<()> {
    let controller = context.online_controller()?;
    let state = search_with_interrupt(&controller, query, output).await?;

    if !output.is_human() {
        output.json(&json!({ "query": state.query, "results": state.results }));
        return Ok(());
    }

    if state.results.is_empty() {
        output.info("No movies found");
        return Ok(());
    }
    println!("{}", search_results_table(&state.results));
    Ok(())
}

fn result_label(item: &SearchResultItem) -> String {
    format!("{} ({}) {}", item.title, item.year, item.imdb_id)
}

/// Resolve `--pick N` (1-based) or ask interactively
fn choose(state: &SearchState, pick: Option<usize>, output: &Output) -> Result<Option<SearchState>> {
    if let Some(position) = pick {
        let selected = position.checked_sub(1).and_then(|index| state.select(index));
        return match selected {
            Some(selected) => Ok(Some(selected)),
            None => Err(WatchlistError::InvalidInput(format!(
                "--pick must be between 1 and {}",
                state.results.len()
            ))
            .into()),
        };
    }

    if state.results.len() == 1 {
        return Ok(state.select(0));
    }

    if !(output.is_human() && is_interactive()) {
        return Err(WatchlistError::InvalidInput(format!(
            "{} results found; pass --pick N to choose one",
            state.results.len()
        ))
        .into());
    }

    let labels: Vec<String> = state.results.iter().map(result_label).collect();
    Ok(prompt_select("Select a movie to add", &labels)?.and_then(|index| state.select(index)))
}

pub async fn run_add(
    context: &AppContext,
    query: &str,
    pick: Option<usize>,
    comment: Option<String>,
    output: &Output,
) -> Result<()> {
    let mut controller = context.online_controller()?;
    let state = search_with_interrupt(&controller, query, output).await?;

    if state.results.is_empty() {
        output.info("No movies found");
        return Ok(());
    }

    let Some(state) = choose(&state, pick, output)? else {
        output.info("Nothing selected");
        return Ok(());
    };
    let Some(selected) = state.selected else {
        return Ok(());
    };

    let comment = match comment {
        Some(comment) => Some(comment),
        None if output.is_human() && is_interactive() && pick.is_none() => {
            Some(prompt_string("Comment (optional)", None)?)
        }
        None => None,
    };

    let cancel = controller.cancel_handle();
    let spinner = Spinner::start(format!("Adding {}...", selected.title), output.is_human());
    let outcome = tokio::select! {
        result = controller.add_from_search_result(&selected, comment) => result,
        _ = tokio::signal::ctrl_c() => {
            cancel.cancel();
            Err(WatchlistError::Cancelled)
        }
    };
    spinner.finish();

    let record = outcome?;

    if !output.is_human() {
        output.json(&json!({ "added": record }));
        return Ok(());
    }
    output.success(format!("Added {} ({}) to your watchlist", record.title, record.year));
    Ok(())
}
