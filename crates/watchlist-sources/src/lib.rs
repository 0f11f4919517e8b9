pub mod error;
pub mod factory;
pub mod omdb;
pub mod traits;

pub use error::SourceError;
pub use factory::create_movie_database;
pub use omdb::OmdbClient;
pub use traits::MovieDatabase;
