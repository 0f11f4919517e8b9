use super::table::{details_table, favorite_mark, movies_table};
use super::AppContext;
use crate::output::Output;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use watchlist_core::{HomeSections, LibraryView, MovieFilter};
use watchlist_models::GenreSelection;

const EMPTY_MESSAGE: &str = "No movies found";

fn build_filter(genre: Option<String>, favorites: bool, query: Option<String>) -> MovieFilter {
    let selection = if favorites {
        GenreSelection::Favorite
    } else {
        genre
            .map(|label| GenreSelection::from_label(&label))
            .unwrap_or_default()
    };
    MovieFilter::new(selection, query.unwrap_or_default())
}

pub fn run_list(
    context: &AppContext,
    genre: Option<String>,
    favorites: bool,
    query: Option<String>,
    output: &Output,
) -> Result<()> {
    let controller = context.offline_controller()?;
    let filter = build_filter(genre, favorites, query);

    // An unfiltered list is the whole collection rather than the home rows
    let mut movies = if filter.is_unfiltered() {
        controller.movies()
    } else {
        match controller.library_view(&filter, context.config.home.section_size, &mut rand::thread_rng()) {
            LibraryView::Grid(movies) => movies,
            LibraryView::Sections(_) | LibraryView::Empty => Vec::new(),
        }
    };
    movies.sort_by_key(|movie| movie.date_added);

    if !output.is_human() {
        output.json(&json!({
            "filter": filter.selection.label(),
            "query": filter.normalized_query(),
            "movies": movies,
        }));
        return Ok(());
    }

    if movies.is_empty() {
        output.info(EMPTY_MESSAGE);
        return Ok(());
    }
    println!("{}", movies_table(&movies));
    output.info(format!("{} movie(s)", movies.len()));
    Ok(())
}

pub fn run_genres(context: &AppContext, with_favorite: bool, output: &Output) -> Result<()> {
    let controller = context.offline_controller()?;
    let genres = controller.genre_options(with_favorite);

    if !output.is_human() {
        output.json(&json!({ "genres": genres }));
        return Ok(());
    }
    for genre in genres {
        output.info(genre);
    }
    Ok(())
}

fn print_sections(sections: &HomeSections) {
    for (title, movies) in sections.rows() {
        println!("\n{}", title.bright_cyan().bold());
        if movies.is_empty() {
            println!("  {}", EMPTY_MESSAGE.dimmed());
            continue;
        }
        for movie in movies {
            println!(
                "  {} {} ({}) {}",
                favorite_mark(movie.is_favorite),
                movie.title,
                movie.year,
                movie.imdb_id.dimmed()
            );
        }
    }
}

pub fn run_home(context: &AppContext, output: &Output) -> Result<()> {
    let controller = context.offline_controller()?;
    let view = controller.library_view(
        &MovieFilter::default(),
        context.config.home.section_size,
        &mut rand::thread_rng(),
    );

    let sections = match view {
        LibraryView::Sections(sections) => sections,
        LibraryView::Grid(_) | LibraryView::Empty => HomeSections::default(),
    };

    if !output.is_human() {
        output.json(&json!({
            "todays_picks": sections.todays_picks,
            "for_you": sections.for_you,
            "best_this_year": sections.best_this_year,
        }));
        return Ok(());
    }
    print_sections(&sections);
    Ok(())
}

pub fn run_show(context: &AppContext, imdb_id: &str, output: &Output) -> Result<()> {
    let controller = context.offline_controller()?;
    let movie = controller.get(imdb_id)?;

    if !output.is_human() {
        output.json(&json!({ "movie": movie }));
        return Ok(());
    }

    let table = details_table(
        &movie.title,
        vec![
            ("IMDb ID", movie.imdb_id.clone()),
            ("Year", movie.year.clone()),
            ("Genres", movie.genres.join(", ")),
            ("Favorite", favorite_mark(movie.is_favorite)),
            ("Comment", movie.comment.clone().unwrap_or_default()),
            ("Added", movie.date_added.format("%Y-%m-%d").to_string()),
            ("Poster", movie.poster.clone()),
        ],
    );
    println!("{}", table);
    if !movie.plot.is_empty() {
        println!("\n{}", movie.plot);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_filter() {
        assert!(build_filter(None, false, None).is_unfiltered());
        assert_eq!(build_filter(Some("Drama".to_string()), false, None).selection.label(), "Drama");
        assert_eq!(
            build_filter(Some("Drama".to_string()), true, None).selection,
            GenreSelection::Favorite
        );
        assert_eq!(
            build_filter(None, false, Some(" dark ".to_string())).normalized_query(),
            Some("dark")
        );
    }
}
