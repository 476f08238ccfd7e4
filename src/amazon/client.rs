//! HTTP client for Amazon requests using wreq for TLS fingerprint emulation.

use crate::amazon::regions::Region;
use crate::config::Config;
use crate::error::CounterError;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;
use wreq::Client;
use wreq_util::Emulation;

/// Trait for page fetching - enables mocking for tests.
#[async_trait]
pub trait ReviewSource: Send + Sync {
    /// Fetches the page at `url` and returns its HTML.
    async fn fetch(&self, url: &Url) -> Result<String>;
}

/// Amazon HTTP client with browser impersonation.
pub struct AmazonClient {
    client: Client,
}

impl AmazonClient {
    /// Creates a new Amazon client with the given configuration.
    pub async fn new(config: &Config) -> Result<Self> {
        let mut builder = Client::builder()
            .cookie_store(true)
            .gzip(true)
            .brotli(true)
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(10));

        // Configure proxy if specified
        if let Some(proxy_url) = &config.proxy {
            debug!("Configuring proxy: {}", proxy_url);
            let proxy = wreq::Proxy::all(proxy_url).context("Failed to configure proxy")?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build()?;

        Ok(Self { client })
    }

    /// Performs a GET request with browser-like headers.
    async fn get(&self, url: &Url) -> Result<String> {
        let host = url.host_str().unwrap_or_default();
        let region = Region::from_host(host).unwrap_or_else(|| {
            debug!("{} is not a known Amazon domain, defaulting to {}", host, Region::default());
            Region::default()
        });

        debug!("GET {}", url);

        let response = self
            .client
            .get(url.as_str())
            .emulation(Emulation::Chrome131)
            .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8")
            .header("Accept-Language", region.accept_language())
            .header("Accept-Encoding", "gzip, deflate, br")
            .header("Cache-Control", "no-cache")
            .header("Pragma", "no-cache")
            .header("Sec-Ch-Ua", "\"Chromium\";v=\"131\", \"Not_A Brand\";v=\"24\"")
            .header("Sec-Ch-Ua-Mobile", "?0")
            .header("Sec-Ch-Ua-Platform", "\"macOS\"")
            .header("Sec-Fetch-Dest", "document")
            .header("Sec-Fetch-Mode", "navigate")
            .header("Sec-Fetch-Site", "none")
            .header("Sec-Fetch-User", "?1")
            .header("Upgrade-Insecure-Requests", "1")
            .send()
            .await
            .map_err(|source| CounterError::Connection { url: url.to_string(), source })?;

        let status = response.status();
        debug!("Response status: {}", status);

        if status == 503 {
            warn!("Rate limited (503). Consider using a proxy.");
            return Err(CounterError::RateLimited { url: url.to_string() }.into());
        }

        if !status.is_success() {
            return Err(CounterError::HttpStatus { url: url.to_string(), status: status.as_u16() }
                .into());
        }

        // Check for redirect to a different host
        if response.uri().host() != url.host_str() {
            warn!(
                "Redirected to {}. Your IP may be associated with a different region.",
                response.uri()
            );
        }

        response.text().await.with_context(|| format!("Failed to read response body from {}", url))
    }
}

#[async_trait]
impl ReviewSource for AmazonClient {
    async fn fetch(&self, url: &Url) -> Result<String> {
        self.get(url).await
    }
}
