use crate::error::SourceError;
use crate::omdb::api;
use crate::traits::MovieDatabase;
use async_trait::async_trait;
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use watchlist_config::OmdbConfig;
use watchlist_models::{MovieDetails, SearchResultItem};

/// Create a reqwest Client with a request timeout
pub fn create_omdb_client(timeout: Duration) -> Client {
    Client::builder()
        .user_agent(concat!("watchlist/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .build()
        .unwrap_or_else(|_| Client::new())
}

#[derive(Clone)]
pub struct OmdbClient {
    client: Arc<Client>,
    api_key: String,
    base_url: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl OmdbClient {
    pub fn new(api_key: String) -> Self {
        Self::from_config(&OmdbConfig::default(), api_key)
    }

    pub fn from_config(config: &OmdbConfig, api_key: String) -> Self {
        Self {
            client: Arc::new(create_omdb_client(Duration::from_secs(config.timeout_secs))),
            api_key,
            base_url: config.base_url.clone(),
            max_retries: config.max_retries,
            retry_backoff: Duration::from_millis(config.retry_backoff_ms),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_retry_policy(mut self, max_retries: u32, retry_backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = retry_backoff;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Search and keep OMDb's total hit count alongside the first page
    pub async fn search_page(&self, query: &str) -> Result<api::SearchPage, SourceError> {
        let query = require_non_empty(query, "Please enter a movie name.")?;
        let page = retry_with_backoff(self.max_retries, self.retry_backoff, "search", || {
            api::search_movies(&self.client, &self.base_url, &self.api_key, query)
        })
        .await?;
        info!(
            "OMDb search '{}' returned {} of {} results",
            query,
            page.items.len(),
            page.total_results
        );
        Ok(page)
    }
}

impl std::fmt::Debug for OmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // The API key stays out of logs and panics
        f.debug_struct("OmdbClient")
            .field("base_url", &self.base_url)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

fn require_non_empty<'a>(value: &'a str, message: &str) -> Result<&'a str, SourceError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(SourceError::InvalidInput(message.to_string()));
    }
    Ok(value)
}

/// Run `request`, retrying retryable failures with linear backoff
pub async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff: Duration,
    operation: &str,
    mut request: F,
) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SourceError>>,
{
    let mut attempt = 0;
    loop {
        match request().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_retryable() && attempt < max_retries => {
                attempt += 1;
                let delay = backoff * attempt;
                warn!(
                    "OMDb {} attempt {} failed: {}. Retrying in {:?}",
                    operation, attempt, e, delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

#[async_trait]
impl MovieDatabase for OmdbClient {
    fn source_name(&self) -> &str {
        "omdb"
    }

    async fn search_by_title(&self, query: &str) -> Result<Vec<SearchResultItem>, SourceError> {
        Ok(self.search_page(query).await?.items)
    }

    async fn fetch_details_by_id(&self, imdb_id: &str) -> Result<MovieDetails, SourceError> {
        let imdb_id = require_non_empty(imdb_id, "A movie id is required.")?;
        retry_with_backoff(self.max_retries, self.retry_backoff, "details", || {
            api::get_movie_details(&self.client, &self.base_url, &self.api_key, imdb_id)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::mpsc;

    /// Serve each canned (status, body) pair to one connection and report the request lines
    async fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::UnboundedReceiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut socket, _) = listener.accept().await.unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                loop {
                    let n = socket.read(&mut buf).await.unwrap();
                    request.extend_from_slice(&buf[..n]);
                    if n == 0 || request.windows(4).any(|w| w == b"\r\n\r\n") {
                        break;
                    }
                }
                let request = String::from_utf8_lossy(&request).to_string();
                let request_line = request.lines().next().unwrap_or_default().to_string();
                let _ = tx.send(request_line);

                let response = format!(
                    "HTTP/1.1 {} OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });

        (format!("http://{}/", addr), rx)
    }

    fn test_client(base_url: String) -> OmdbClient {
        OmdbClient::new("secret".to_string())
            .with_base_url(base_url)
            .with_retry_policy(2, Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_search_by_title_sends_query_parameters() {
        let body = r#"{"Search":[{"Title":"The Matrix","Year":"1999","imdbID":"tt0133093","Type":"movie","Poster":"N/A"}],"totalResults":"1","Response":"True"}"#;
        let (base_url, mut requests) = serve(vec![(200, body)]).await;

        let results = test_client(base_url).search_by_title("the matrix").await.unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].imdb_id, "tt0133093");

        let request_line = requests.recv().await.unwrap();
        assert!(request_line.starts_with("GET /?"));
        assert!(request_line.contains("s=the+matrix"));
        assert!(request_line.contains("apikey=secret"));
        assert!(request_line.contains("type=movie"));
    }

    #[tokio::test]
    async fn test_fetch_details_by_id() {
        let body = r#"{"Title":"The Matrix","Year":"1999","Genre":"Action, Sci-Fi","Plot":"Neo.","Poster":"N/A","imdbID":"tt0133093","Response":"True"}"#;
        let (base_url, mut requests) = serve(vec![(200, body)]).await;

        let details = test_client(base_url).fetch_details_by_id("tt0133093").await.unwrap();
        assert_eq!(details.genres, vec!["Action", "Sci-Fi"]);

        let request_line = requests.recv().await.unwrap();
        assert!(request_line.contains("i=tt0133093"));
        assert!(!request_line.contains("type=movie"));
    }

    #[tokio::test]
    async fn test_server_error_is_retried() {
        let body = r#"{"Response":"False","Error":"Movie not found!"}"#;
        let (base_url, mut requests) = serve(vec![(503, "busy"), (200, body)]).await;

        let results = test_client(base_url).search_by_title("nothing").await.unwrap();
        assert!(results.is_empty());
        assert!(requests.recv().await.is_some());
        assert!(requests.recv().await.is_some());
    }

    #[tokio::test]
    async fn test_client_error_envelope_carries_api_message() {
        let (base_url, mut requests) =
            serve(vec![(401, r#"{"Response":"False","Error":"Invalid API key!"}"#)]).await;

        match test_client(base_url).search_by_title("matrix").await {
            Err(SourceError::Api(message)) => assert_eq!(message, "Invalid API key!"),
            other => panic!("expected API error, got {:?}", other),
        }
        // Not retried: exactly one request reached the server
        assert!(requests.recv().await.is_some());
        assert!(requests.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_client_error_without_envelope_is_http() {
        let (base_url, _requests) = serve(vec![(403, "Forbidden")]).await;

        match test_client(base_url).search_by_title("matrix").await {
            Err(SourceError::Http { status, .. }) => assert_eq!(status, 403),
            other => panic!("expected HTTP error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_query_makes_no_request() {
        // Nothing listens on this address; a request would fail with a transport error
        let client = test_client("http://127.0.0.1:9/".to_string()).with_retry_policy(0, Duration::ZERO);
        assert!(matches!(
            client.search_by_title("   ").await,
            Err(SourceError::InvalidInput(_))
        ));
        assert!(matches!(
            client.fetch_details_by_id("").await,
            Err(SourceError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_retry_with_backoff_gives_up() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), SourceError> =
            retry_with_backoff(2, Duration::from_millis(1), "test", || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(SourceError::Http { status: 500, body: String::new() }) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(attempts.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_retry_with_backoff_skips_non_retryable() {
        let attempts = AtomicU32::new(0);
        let result: Result<(), SourceError> =
            retry_with_backoff(5, Duration::from_millis(1), "test", || {
                attempts.fetch_add(1, Ordering::SeqCst);
                async { Err(SourceError::Api("Invalid API key!".to_string())) }
            })
            .await;

        assert!(matches!(result, Err(SourceError::Api(_))));
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = OmdbClient::new("super-secret".to_string());
        assert!(!format!("{:?}", client).contains("super-secret"));
    }
}
