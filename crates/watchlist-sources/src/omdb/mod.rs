pub mod api;
pub mod client;

pub use api::{SearchPage, split_genres};
pub use client::OmdbClient;
