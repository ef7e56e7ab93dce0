//! Directory HTTP client.

use std::time::Duration;

use reqwest::Url;
use serde::de::DeserializeOwned;
use tracing::{Instrument, Span, error, info, info_span};

use super::error::DirectoryError;
use super::types::{Envelope, Station, StationList};

/// Default base URL for the WOG directory API.
const DEFAULT_BASE_URL: &str = "https://api.wog.ua";

/// Path segment of the station collection.
const STATIONS_PATH: &str = "fuel_stations";

/// Longest error body kept in a `DirectoryError::Api` message.
const MAX_ERROR_BODY_CHARS: usize = 500;

/// Configuration for the directory client.
#[derive(Debug, Clone)]
pub struct DirectoryConfig {
    /// Base URL for the API
    pub base_url: String,
    /// Request timeout in seconds; `None` keeps the transport default
    pub timeout_secs: Option<u64>,
    /// Parent span for every request made by the client
    pub span: Span,
}

impl DirectoryConfig {
    /// Create a config pointing at the production directory.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            span: Span::none(),
        }
    }

    /// Set a custom base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// Attach the process-wide span that request spans are parented to.
    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Client for the fuel station directory.
///
/// Each query performs exactly one GET and never retries. The client is
/// stateless apart from its connection pool, so clones can be shared
/// freely between concurrently handled commands.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    http: reqwest::Client,
    base_url: Url,
    span: Span,
}

impl DirectoryClient {
    /// Create a new directory client.
    pub fn new(config: DirectoryConfig) -> Result<Self, DirectoryError> {
        let base_url = Url::parse(&config.base_url).map_err(|e| DirectoryError::InvalidUrl {
            message: format!("{}: {e}", config.base_url),
        })?;

        if base_url.cannot_be_a_base() {
            return Err(DirectoryError::InvalidUrl {
                message: format!("{} cannot be used as a base URL", config.base_url),
            });
        }

        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let http = builder.build()?;

        Ok(Self {
            http,
            base_url,
            span: config.span,
        })
    }

    /// Fetch every station in the directory.
    pub async fn list_stations(&self) -> Result<Vec<Station>, DirectoryError> {
        let url = self.endpoint(None)?;
        let span = info_span!(parent: &self.span, "list_stations");

        let list: StationList = self.get_data(url).instrument(span).await?;
        Ok(list.stations)
    }

    /// Fetch a single station by its directory identifier.
    ///
    /// The identifier is percent-encoded as one path segment.
    pub async fn get_station(&self, id: &str) -> Result<Station, DirectoryError> {
        let url = self.endpoint(Some(id))?;
        let span = info_span!(parent: &self.span, "get_station", id);

        self.get_data(url).instrument(span).await
    }

    /// Build `{base}/fuel_stations[/{id}]`, keeping any path prefix of the base.
    fn endpoint(&self, id: Option<&str>) -> Result<Url, DirectoryError> {
        let mut url = self.base_url.clone();
        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| DirectoryError::InvalidUrl {
                    message: format!("{} cannot be used as a base URL", self.base_url),
                })?;
            segments.pop_if_empty().push(STATIONS_PATH);
            if let Some(id) = id {
                segments.push(id);
            }
        }
        Ok(url)
    }

    /// GET `url` and decode the `data` member of the response body.
    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> Result<T, DirectoryError> {
        let response = self.http.get(url.clone()).send().await.map_err(|e| {
            error!(%url, error = %e, "directory request failed");
            DirectoryError::Http(e)
        })?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(%url, status = status.as_u16(), "directory returned an error status");
            return Err(DirectoryError::Api {
                status: status.as_u16(),
                message: body.chars().take(MAX_ERROR_BODY_CHARS).collect(),
            });
        }

        info!(%url, status = status.as_u16(), "directory response");

        let body = response.text().await?;

        let envelope: Envelope<T> =
            serde_json::from_str(&body).map_err(|e| DirectoryError::Json {
                message: e.to_string(),
            })?;

        Ok(envelope.data)
    }
}
