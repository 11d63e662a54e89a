// # HTTP IP Source
//
// This crate provides the HTTP-based IP source for the DDNS client.
//
// ## Architecture
//
// Fetches the current public IP from an external "what is my IP" service
// (e.g., ifconfig.me/ip, icanhazip.com) that answers with the address as
// plain text. One fetch is one GET; the poll loop in ddns-core decides when
// to call it.
//
// The body is trimmed and returned as-is. No format validation is
// performed: whatever the service answers is treated as the address.

use ddns_core::traits::IpSource;
use ddns_core::{Error, Result};

/// HTTP-based IP source
#[derive(Debug, Clone)]
pub struct HttpIpSource {
    /// URL to fetch IP from
    url: String,

    /// HTTP client (connection pool, reused across polls)
    client: reqwest::Client,
}

impl HttpIpSource {
    /// Create a new HTTP IP source
    ///
    /// # Parameters
    ///
    /// - `url`: URL to fetch IP from (e.g., "https://ifconfig.me/ip")
    ///
    /// Requests are never routed through the provider proxy and carry no
    /// explicit timeout beyond the transport default.
    pub fn new(url: impl Into<String>) -> Self {
        Self::with_client(url, reqwest::Client::new())
    }

    /// Create with a preconfigured HTTP client
    pub fn with_client(url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            url: url.into(),
            client,
        }
    }

    /// URL this source queries
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl IpSource for HttpIpSource {
    async fn fetch(&self) -> Result<String> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::transport(format!("GET {}", self.url), e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("IP service {} answered {}", self.url, status);
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::transport(format!("read body of {}", self.url), e))?;

        let ip = body.trim().to_string();
        tracing::debug!("IP service {} reports {}", self.url, ip);
        Ok(ip)
    }

    fn source_name(&self) -> &'static str {
        "http"
    }
}
