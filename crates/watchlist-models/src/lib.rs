pub mod details;
pub mod genre;
pub mod media;
pub mod movie;
pub mod sample;
pub mod search_result;

pub use details::MovieDetails;
pub use genre::{GenreSelection, ALL_GENRES_LABEL, FAVORITE_LABEL};
pub use media::MediaType;
pub use movie::{MovieMutation, MovieRecord};
pub use sample::sample_movies;
pub use search_result::SearchResultItem;
