use comfy_table::{Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use watchlist_models::{MovieRecord, SearchResultItem};

fn styled(mut table: Table) -> Table {
    table.load_preset(comfy_table::presets::UTF8_FULL);
    table.apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(title: &str) -> Cell {
    Cell::new(title).fg(Color::Cyan).add_attribute(Attribute::Bold)
}

pub fn favorite_mark(is_favorite: bool) -> String {
    if is_favorite {
        "★".yellow().to_string()
    } else {
        "☆".dimmed().to_string()
    }
}

pub fn movies_table(movies: &[MovieRecord]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header("ID"),
        header("Title"),
        header("Year"),
        header("Genres"),
        header("Fav"),
        header("Comment"),
    ]);
    for movie in movies {
        table.add_row(vec![
            Cell::new(&movie.imdb_id),
            Cell::new(&movie.title),
            Cell::new(&movie.year),
            Cell::new(movie.genres.join(", ")),
            Cell::new(favorite_mark(movie.is_favorite)),
            Cell::new(movie.comment.as_deref().unwrap_or("")),
        ]);
    }
    styled(table)
}

pub fn search_results_table(results: &[SearchResultItem]) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header("#"), header("ID"), header("Title"), header("Year"), header("Type")]);
    for (index, item) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&item.imdb_id),
            Cell::new(&item.title),
            Cell::new(&item.year),
            Cell::new(item.media_type.as_str()),
        ]);
    }
    styled(table)
}

/// Two-column key/value table with a title row
pub fn details_table(title: &str, rows: Vec<(&str, String)>) -> Table {
    let mut table = Table::new();
    table.set_header(vec![header(title)]);
    for (key, value) in rows {
        table.add_row(vec![Cell::new(key), Cell::new(value)]);
    }
    styled(table)
}
