use super::progress::is_interactive;
use super::prompts::prompt_string;
use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use serde_json::json;
use watchlist_core::MovieRepository;

/// Toggle the favorite flag, or set it when `value` is given
pub fn run_favorite(context: &AppContext, imdb_id: &str, value: Option<bool>, output: &Output) -> Result<()> {
    let mut controller = context.offline_controller()?;
    let record = match value {
        Some(value) => controller.set_favorite(imdb_id, value)?,
        None => controller.toggle_favorite(imdb_id)?,
    };

    if !output.is_human() {
        output.json(&json!({ "movie": record }));
    } else if record.is_favorite {
        output.success(format!("{} added to favorites", record.title));
    } else {
        output.success(format!("{} removed from favorites", record.title));
    }
    Ok(())
}

pub fn run_comment(
    context: &AppContext,
    imdb_id: &str,
    text: Option<String>,
    clear: bool,
    output: &Output,
) -> Result<()> {
    let mut controller = context.offline_controller()?;
    let current = controller.get(imdb_id)?;

    let comment = if clear {
        None
    } else {
        match text {
            Some(text) => Some(text),
            None if is_interactive() => Some(prompt_string("Comment", current.comment.as_deref())?),
            None => {
                output.warn("No comment given. Pass the text, or --clear to remove the comment.");
                return Ok(());
            }
        }
    };

    let record = controller.set_comment(imdb_id, comment)?;
    if !output.is_human() {
        output.json(&json!({ "movie": record }));
        return Ok(());
    }
    match &record.comment {
        Some(comment) => output.success(format!("Comment for {} saved: {}", record.title, comment)),
        None => output.success(format!("Comment for {} cleared", record.title)),
    }
    Ok(())
}

pub fn run_remove(context: &AppContext, imdb_id: &str, output: &Output) -> Result<()> {
    let mut controller = context.offline_controller()?;
    let record = controller.remove(imdb_id)?;

    if !output.is_human() {
        output.json(&json!({ "removed": record }));
        return Ok(());
    }
    output.success(format!("Removed {} from your watchlist", record.title));
    Ok(())
}

/// Seed the defaults and report (inserted, total)
fn seed(context: &AppContext) -> Result<(usize, usize)> {
    let mut controller = context.unseeded_controller()?;
    let inserted = controller.seed_defaults()?;
    Ok((inserted, controller.repository().len()))
}

pub fn run_seed(context: &AppContext, output: &Output) -> Result<()> {
    let (inserted, total) = seed(context)?;

    if !output.is_human() {
        output.json(&json!({ "inserted": inserted, "total": total }));
        return Ok(());
    }
    if inserted == 0 {
        output.info(format!("Watchlist already has {} movie(s); nothing to seed", total));
    } else {
        output.success(format!("Added {} default movies", inserted));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::context_in;

    #[test]
    fn test_seed_fills_empty_watchlist_once() {
        let dir = tempfile::TempDir::new().unwrap();
        let context = context_in(dir.path());

        assert_eq!(seed(&context).unwrap(), (12, 12));
        assert_eq!(seed(&context).unwrap(), (0, 12));
    }
}
