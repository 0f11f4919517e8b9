use serde::{Deserialize, Serialize};
use crate::media::MediaType;

/// A single hit from a title search.
///
/// Transient: produced per search response and dropped once the user picks
/// one (or abandons the search). Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SearchResultItem {
    pub imdb_id: String,
    pub title: String,
    pub year: String, // Not always numeric ("2019–2022" for series)
    pub poster: String,
    pub media_type: MediaType,
}
