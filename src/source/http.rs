//! HTTP data source.
//!
//! Fetches SQL detail documents from the monitor's web service at
//! `{endpoint}/ws/sql/{sqlId}`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use tracing::debug;

use super::{FetchError, SqlDocument, SqlSource};

/// Default base URL of the monitor web application.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/oraman";

/// A source that fetches documents from the monitor's web service.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: Client,
    endpoint: String,
    description: String,
}

impl HttpSource {
    /// Create a new builder for configuring the source.
    pub fn builder() -> HttpSourceBuilder {
        HttpSourceBuilder::default()
    }

    /// The base URL requests are made against.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The URL of the detail document for `sql_id`.
    pub fn url_for(&self, sql_id: &str) -> String {
        format!("{}/ws/sql/{}", self.endpoint, sql_id)
    }
}

#[async_trait]
impl SqlSource for HttpSource {
    async fn fetch(&self, sql_id: &str) -> Result<SqlDocument, FetchError> {
        let url = self.url_for(sql_id);
        debug!(%url, "fetching sql detail");

        let response = self.client.get(&url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(FetchError::NotFound(sql_id.to_string()));
        }

        if !response.status().is_success() {
            return Err(FetchError::Http(format!(
                "API returned status {}",
                response.status()
            )));
        }

        let doc: SqlDocument = response
            .json()
            .await
            .map_err(|e| FetchError::Parse(e.to_string()))?;

        Ok(doc)
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// Builder for HttpSource.
#[derive(Debug, Default)]
pub struct HttpSourceBuilder {
    endpoint: Option<String>,
    timeout: Option<Duration>,
    no_proxy: bool,
}

impl HttpSourceBuilder {
    /// Set the monitor base URL (e.g., "http://dbmon:8080/oraman").
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Set the request timeout (default: 10 seconds).
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Ignore proxy settings from the environment.
    pub fn no_proxy(mut self) -> Self {
        self.no_proxy = true;
        self
    }

    /// Build the source.
    pub fn build(self) -> Result<HttpSource, FetchError> {
        let timeout = self.timeout.unwrap_or(Duration::from_secs(10));

        let mut client = Client::builder().timeout(timeout);
        if self.no_proxy {
            client = client.no_proxy();
        }
        let client = client.build()?;

        let endpoint = self
            .endpoint
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
            .trim_end_matches('/')
            .to_string();
        let description = format!("http: {}", endpoint);

        Ok(HttpSource {
            client,
            endpoint,
            description,
        })
    }
}
