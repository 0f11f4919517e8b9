use serde::{Deserialize, Serialize};

/// Media type reported by the movie database for a search hit
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MediaType {
    Movie,
    Series,
    Episode,
    Game,
    #[serde(other)]
    Other,
}

impl MediaType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Movie => "movie",
            MediaType::Series => "series",
            MediaType::Episode => "episode",
            MediaType::Game => "game",
            MediaType::Other => "other",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_json() {
        let movie: MediaType = serde_json::from_str("\"movie\"").unwrap();
        assert_eq!(movie, MediaType::Movie);

        let series: MediaType = serde_json::from_str("\"series\"").unwrap();
        assert_eq!(series, MediaType::Series);

        // Unknown values must not break decoding of a whole search page
        let unknown: MediaType = serde_json::from_str("\"podcast\"").unwrap();
        assert_eq!(unknown, MediaType::Other);
    }
}
