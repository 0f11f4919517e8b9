use thiserror::Error;

/// Errors raised while talking to the movie database
#[derive(Debug, Error)]
pub enum SourceError {
    /// The API answered but reported a failure (bad key, unknown id, ...)
    #[error("{0}")]
    Api(String),

    #[error("Request failed: {status} - {body}")]
    Http { status: u16, body: String },

    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected {context} response: {source}")]
    Decode {
        context: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("{0}")]
    InvalidInput(String),
}

impl SourceError {
    /// Transport failures and server-side errors may succeed on a later attempt
    pub fn is_retryable(&self) -> bool {
        match self {
            SourceError::Transport(_) => true,
            SourceError::Http { status, .. } => *status >= 500,
            SourceError::Api(_) | SourceError::Decode { .. } | SourceError::InvalidInput(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_retryable() {
        assert!(SourceError::Http { status: 503, body: String::new() }.is_retryable());
        assert!(!SourceError::Http { status: 401, body: String::new() }.is_retryable());
        assert!(!SourceError::Api("Invalid API key!".to_string()).is_retryable());
        assert!(!SourceError::InvalidInput("empty".to_string()).is_retryable());

        let decode = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(!SourceError::Decode { context: "search", source: decode }.is_retryable());
    }

    #[test]
    fn test_display() {
        let err = SourceError::Http { status: 502, body: "Bad Gateway".to_string() };
        assert_eq!(err.to_string(), "Request failed: 502 - Bad Gateway");
    }
}
