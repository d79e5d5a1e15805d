use tracing::instrument;

use crate::api;
use crate::error::Result;
use crate::model::*;
use crate::pipeline::{self, MatchApi};

/// Public host of the match and stream API.
pub const DEFAULT_BASE_URL: &str = "https://streamed.su";

/// The main entry point for talking to streamed.su.
///
/// `StreamedClient` wraps a [`reqwest::Client`] and exposes the raw feeds,
/// stream lookups, and the full match cycle used by the list view.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> football_streams::Result<()> {
/// use football_streams::{FilterKey, StreamedClient};
///
/// let client = StreamedClient::new();
/// let matches = client.fetch_matches(FilterKey::Upcoming).await?;
/// println!("Found {} upcoming matches", matches.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct StreamedClient {
    http: reqwest::Client,
    base_url: String,
}

impl StreamedClient {
    /// Create a new client with default settings.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Create a new client using the provided [`reqwest::Client`].
    ///
    /// Use this when you need to configure timeouts, proxies, headers, etc.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            http: client,
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Point the client at another host, e.g. a mirror.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch the raw match list served by one feed.
    #[instrument(skip(self))]
    pub async fn get_matches(&self, endpoint: Endpoint) -> Result<Vec<RawMatch>> {
        api::matches::get_matches(&self.http, &self.base_url, endpoint).await
    }

    /// Fetch the stream listing for a single source.
    #[instrument(skip(self))]
    pub async fn get_stream(&self, source: &RawSource) -> Result<StreamResponse> {
        api::stream::get_stream(&self.http, &self.base_url, source).await
    }

    /// Resolve the first embed URL offered for a source, if any.
    pub async fn resolve_embed_url(&self, source: &RawSource) -> Result<Option<String>> {
        Ok(self.get_stream(source).await?.first_embed_url())
    }

    /// Run the full fetch, enrich, classify and filter cycle for `filter`.
    #[instrument(skip(self))]
    pub async fn fetch_matches(&self, filter: FilterKey) -> Result<Vec<Match>> {
        pipeline::fetch_matches(self, filter).await
    }
}

impl Default for StreamedClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchApi for StreamedClient {
    async fn list_matches(&self, endpoint: Endpoint) -> Result<Vec<RawMatch>> {
        self.get_matches(endpoint).await
    }

    async fn first_embed_url(&self, source: &RawSource) -> Result<Option<String>> {
        self.resolve_embed_url(source).await
    }
}
