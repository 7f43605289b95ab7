//! HTTP client for the parking availability endpoint.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::Client;

use carpark_core::AppConfig;

use crate::error::ScraperError;

const ACCEPT: &str = "text/html,application/json;q=0.9,*/*;q=0.8";

/// `strftime` pattern for the cache-busting `t` query parameter.
const CACHE_BUST_FORMAT: &str = "%Y%m%d%H%M%S";

/// Body and declared content type of one availability response.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub url: String,
    pub body: String,
    /// Value of the `Content-Type` header, or empty when absent.
    pub content_type: String,
}

/// HTTP client for the availability endpoint.
///
/// Makes exactly one request per [`fetch`](Self::fetch) call. Non-2xx
/// responses and transport failures are returned as errors; nothing is
/// retried.
pub struct AvailabilityClient {
    client: Client,
    referer: String,
}

impl AvailabilityClient {
    /// Creates a client with the given request timeout, `User-Agent` and
    /// `Referer`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str, referer: &str) -> Result<Self, ScraperError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(timeout_secs.min(10)))
            .user_agent(user_agent)
            .build()?;
        Ok(Self {
            client,
            referer: referer.to_owned(),
        })
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`AvailabilityClient::new`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ScraperError> {
        Self::new(
            config.request_timeout_secs,
            &config.user_agent,
            &config.referer,
        )
    }

    /// Fetches current availability for `carpark_ids` in `category`.
    ///
    /// `now` drives the cache-busting parameter so repeated runs are never
    /// served a stale cached page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::InvalidEndpoint`]: `endpoint` is not a valid URL.
    /// - [`ScraperError::UnexpectedStatus`]: any non-2xx status.
    /// - [`ScraperError::Http`]: network, TLS or timeout failure.
    pub async fn fetch(
        &self,
        endpoint: &str,
        carpark_ids: &[String],
        category: &str,
        now: DateTime<Utc>,
    ) -> Result<FetchedResponse, ScraperError> {
        let url = Self::availability_url(endpoint, carpark_ids, category, now)?;
        tracing::info!(url = %url, "fetching availability");

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::ACCEPT, ACCEPT)
            .header(reqwest::header::REFERER, &self.referer)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_owned();

        let body = response.text().await?;
        tracing::debug!(bytes = body.len(), content_type = %content_type, "availability response received");

        Ok(FetchedResponse {
            url,
            body,
            content_type,
        })
    }

    /// Builds the request URL with the id list, category and cache buster.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidEndpoint`] if `endpoint` cannot be
    /// parsed.
    fn availability_url(
        endpoint: &str,
        carpark_ids: &[String],
        category: &str,
        now: DateTime<Utc>,
    ) -> Result<String, ScraperError> {
        let mut url =
            reqwest::Url::parse(endpoint).map_err(|e| ScraperError::InvalidEndpoint {
                endpoint: endpoint.to_owned(),
                reason: e.to_string(),
            })?;

        url.query_pairs_mut()
            .append_pair("carparkIdParam", &carpark_ids.join(", "))
            .append_pair("categoryParam", category)
            .append_pair("t", &now.format(CACHE_BUST_FORMAT).to_string());

        Ok(url.to_string())
    }
}

#[cfg(test)]
#[path = "../client_test.rs"]
mod tests;
