//! HTTP client used to fetch listing pages.

mod user_agent;

pub use user_agent::{resolve_user_agent, USER_AGENT};

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::{ExtractError, PageFetcher};

/// HTTP client with a per-request timeout and request logging.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    source_id: String,
}

impl HttpClient {
    /// Create a new HTTP client.
    /// - None: Use the default desktop browser user agent
    /// - Some(custom): Use custom user agent string
    pub fn new(
        source_id: &str,
        timeout: Duration,
        user_agent_config: Option<&str>,
    ) -> Result<Self, reqwest::Error> {
        let user_agent = resolve_user_agent(user_agent_config);
        let client = Client::builder()
            .user_agent(&user_agent)
            .timeout(timeout)
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            source_id: source_id.to_string(),
        })
    }

    /// Get page content as text. Non-success statuses are errors.
    pub async fn get_text(&self, url: &str) -> Result<String, ExtractError> {
        info!(source = %self.source_id, url, "Visiting");

        let start = Instant::now();
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| fetch_error(url, e))?;

        let status = response.status();
        debug!(
            source = %self.source_id,
            status = status.as_u16(),
            duration_ms = start.elapsed().as_millis() as u64,
            "Response"
        );

        if !status.is_success() {
            return Err(ExtractError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.text().await.map_err(|e| fetch_error(url, e))
    }
}

fn fetch_error(url: &str, err: reqwest::Error) -> ExtractError {
    if err.is_timeout() {
        return ExtractError::Fetch {
            url: url.to_string(),
            message: "request timed out".to_string(),
        };
    }
    ExtractError::Fetch {
        url: url.to_string(),
        message: err.to_string(),
    }
}

#[async_trait]
impl PageFetcher for HttpClient {
    async fn fetch(&self, url: &str) -> Result<String, ExtractError> {
        self.get_text(url).await
    }
}
