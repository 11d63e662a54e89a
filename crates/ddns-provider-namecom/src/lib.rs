// # name.com DNS Provider
//
// This crate provides the name.com (API v4) DNS provider for the DDNS client.
//
// ## API Calls
//
// Every call uses HTTP basic authentication with the account username and
// API token.
//
// ```http
// GET  https://api.name.com/v4/domains/{domain}/records        -> {"records": [...]}
// POST https://api.name.com/v4/domains/{domain}/records        <- record without id
// PUT  https://api.name.com/v4/domains/{domain}/records/{id}   <- full record
// ```
//
// ## Responsibilities
//
// - ✅ One HTTP request per trait call
// - ✅ Map failures to `Error::Transport` / `Error::Decode`
// - ✅ Optional HTTP proxy for all API calls
// - ❌ NO retry logic (owned by the poll loop)
// - ❌ NO decision on whether to create or update (owned by `reconcile`)
// - ❌ NO caching of the record set between calls

use async_trait::async_trait;
use ddns_core::traits::{DnsProvider, Record};
use ddns_core::{Error, Result};
use serde::Deserialize;

/// name.com API base URL
const NAMECOM_API_BASE: &str = "https://api.name.com/v4/domains";

/// Body of a record listing response
#[derive(Debug, Default, Deserialize)]
struct RecordList {
    #[serde(default)]
    records: Vec<Record>,
}

/// name.com DNS provider
///
/// # Security
///
/// The Debug implementation intentionally does NOT expose the API token.
pub struct NameComProvider {
    /// API username
    username: String,

    /// API token
    /// ⚠️ NEVER log this value
    token: String,

    /// Base URL up to and including `/domains`
    base_url: String,

    /// HTTP client for API requests
    client: reqwest::Client,

    /// Whether requests go through a proxy
    proxied: bool,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for NameComProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NameComProvider")
            .field("username", &self.username)
            .field("token", &"<REDACTED>")
            .field("base_url", &self.base_url)
            .field("proxied", &self.proxied)
            .finish()
    }
}

impl NameComProvider {
    /// Create a provider talking directly to the public name.com API
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        Self::builder(username, token).build()
    }

    /// Create a builder for custom configuration
    pub fn builder(username: impl Into<String>, token: impl Into<String>) -> NameComProviderBuilder {
        NameComProviderBuilder {
            username: username.into(),
            token: token.into(),
            base_url: NAMECOM_API_BASE.to_string(),
            proxy: None,
        }
    }

    /// Whether API calls are routed through a proxy
    pub fn is_proxied(&self) -> bool {
        self.proxied
    }

    /// Listing endpoint for `domain`
    fn records_url(&self, domain: &str) -> String {
        format!("{}/{}/records", self.base_url, domain)
    }

    /// Send an authenticated request and reject non-success statuses
    async fn send(&self, request: reqwest::RequestBuilder, context: &str) -> Result<reqwest::Response> {
        let response = request
            .basic_auth(&self.username, Some(&self.token))
            .send()
            .await
            .map_err(|e| Error::transport(context, e))?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unable to read error response".to_string());

        let message = match status.as_u16() {
            401 | 403 => format!(
                "Authentication failed: invalid username/token or insufficient permissions. Status: {}",
                status
            ),
            404 => format!("Not found: {} - {}", status, error_text),
            429 => format!("Rate limit exceeded. Status: {}", status),
            500..=599 => format!("name.com server error (transient): {} - {}", status, error_text),
            _ => format!("Request rejected: {} - {}", status, error_text),
        };
        Err(Error::transport(context, message))
    }
}

/// Builder for [`NameComProvider`]
#[derive(Clone)]
pub struct NameComProviderBuilder {
    username: String,
    token: String,
    base_url: String,
    proxy: Option<String>,
}

impl NameComProviderBuilder {
    /// Route API calls through an HTTP proxy
    ///
    /// An empty or unparseable proxy URL is logged and ignored.
    pub fn proxy(mut self, proxy: Option<&str>) -> Self {
        self.proxy = proxy.map(str::trim).filter(|p| !p.is_empty()).map(str::to_string);
        self
    }

    /// Override the API base URL (up to and including `/domains`)
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<NameComProvider> {
        if self.username.is_empty() || self.token.is_empty() {
            return Err(Error::config("name.com username and token are required"));
        }

        let mut builder = reqwest::Client::builder();
        let mut proxied = false;

        if let Some(ref proxy) = self.proxy {
            match reqwest::Proxy::all(proxy) {
                Ok(p) => {
                    builder = builder.proxy(p);
                    proxied = true;
                    tracing::info!("Enable proxy: {}", proxy);
                }
                Err(e) => {
                    tracing::warn!("Parse proxy failed: {}", e);
                }
            }
        }

        let client = builder
            .build()
            .map_err(|e| Error::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(NameComProvider {
            username: self.username,
            token: self.token,
            base_url: self.base_url,
            client,
            proxied,
        })
    }
}

#[async_trait]
impl DnsProvider for NameComProvider {
    async fn list_records(&self, domain: &str) -> Result<Vec<Record>> {
        let url = self.records_url(domain);
        tracing::debug!("GET {}", url);

        let response = self.send(self.client.get(&url), "list records").await?;
        let body = response
            .text()
            .await
            .map_err(|e| Error::transport("read record list", e))?;

        let list: RecordList =
            serde_json::from_str(&body).map_err(|e| Error::decode("record list", e))?;

        tracing::debug!("{} record(s) listed for {}", list.records.len(), domain);
        Ok(list.records)
    }

    async fn create_record(&self, domain: &str, record: &Record) -> Result<()> {
        let url = self.records_url(domain);
        tracing::debug!("POST {} host={}", url, record.host);

        self.send(self.client.post(&url).json(record), "create record").await?;
        Ok(())
    }

    async fn update_record(&self, domain: &str, record: &Record) -> Result<()> {
        let id = record
            .id
            .ok_or_else(|| Error::decode("update record", format!("record {} has no id", record.host)))?;
        let url = format!("{}/{}", self.records_url(domain), id);
        tracing::debug!("PUT {} host={}", url, record.host);

        self.send(self.client.put(&url).json(record), "update record").await?;
        Ok(())
    }

    fn provider_name(&self) -> &'static str {
        "name.com"
    }
}
