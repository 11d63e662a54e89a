//! Configuration types for the DDNS client
//!
//! All options are supplied once at process start and are immutable after that.

use crate::registry::HostRegistry;
use std::time::Duration;

/// Poll interval used when none (or an unparseable one) is configured
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(30);

/// Host list entry naming the zone apex; stored as the empty host
pub const APEX_HOST: &str = "@";

/// Main DDNS configuration
#[derive(Clone)]
pub struct DdnsConfig {
    /// Endpoint that answers with the caller's public IP as plain text
    pub fetch_ip_url: String,

    /// Provider API username
    pub username: String,

    /// Provider API token
    /// ⚠️ NEVER log this value
    pub token: String,

    /// DNS zone to manage
    pub domain: String,

    /// Hostnames within the zone to keep in sync
    pub hosts: Vec<String>,

    /// Optional HTTP proxy, used for provider API calls only
    pub proxy: Option<String>,

    /// Poll period
    pub interval: Duration,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for DdnsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DdnsConfig")
            .field("fetch_ip_url", &self.fetch_ip_url)
            .field("username", &self.username)
            .field("token", &"<REDACTED>")
            .field("domain", &self.domain)
            .field("hosts", &self.hosts)
            .field("proxy", &self.proxy)
            .field("interval", &self.interval)
            .finish()
    }
}

impl DdnsConfig {
    /// Create a new configuration with no hosts, no proxy and the default interval
    pub fn new(
        fetch_ip_url: impl Into<String>,
        username: impl Into<String>,
        token: impl Into<String>,
        domain: impl Into<String>,
    ) -> Self {
        Self {
            fetch_ip_url: fetch_ip_url.into(),
            username: username.into(),
            token: token.into(),
            domain: domain.into(),
            hosts: Vec::new(),
            proxy: None,
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Set the managed hosts from a comma-separated list
    pub fn with_hosts(mut self, hosts: &str) -> Self {
        self.hosts = parse_hosts(hosts);
        self
    }

    /// Set the provider proxy; empty strings mean "no proxy"
    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.trim().is_empty());
        self
    }

    /// Set the poll interval
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Build the initial host registry, every host unset
    pub fn registry(&self) -> HostRegistry {
        HostRegistry::from_hosts(self.hosts.iter().cloned())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.fetch_ip_url.is_empty() {
            return Err(crate::Error::config("fetch-ip URL is required"));
        }
        if !self.fetch_ip_url.starts_with("http://") && !self.fetch_ip_url.starts_with("https://") {
            return Err(crate::Error::config(format!(
                "fetch-ip URL must use HTTP or HTTPS scheme. Got: {}",
                self.fetch_ip_url
            )));
        }

        if self.username.is_empty() {
            return Err(crate::Error::config("username is required"));
        }
        if self.token.is_empty() {
            return Err(crate::Error::config("token is required"));
        }

        validate_domain_name(&self.domain)?;

        if self.hosts.is_empty() {
            return Err(crate::Error::config(
                "hosts must contain at least one hostname, e.g. --hosts @,www",
            ));
        }
        for host in &self.hosts {
            validate_host(host)?;
        }

        if self.interval.is_zero() {
            return Err(crate::Error::config("interval must be > 0"));
        }

        Ok(())
    }
}

/// Split a comma-separated host list, trimming entries and dropping empty ones
///
/// [`APEX_HOST`] becomes the empty host, which the provider uses for the
/// bare domain.
pub fn parse_hosts(hosts: &str) -> Vec<String> {
    hosts
        .split(',')
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(|h| if h == APEX_HOST { "" } else { h }.to_string())
        .collect()
}

/// Fully qualified name of `host` in `domain`, for logs
pub fn fqdn(host: &str, domain: &str) -> String {
    if host.is_empty() {
        domain.to_string()
    } else {
        format!("{}.{}", host, domain)
    }
}

/// Parse a duration string such as `30s`, `5m` or `1h 30m`
///
/// Missing or unparseable values fall back to [`DEFAULT_INTERVAL`].
pub fn parse_interval(interval: Option<&str>) -> Duration {
    let Some(raw) = interval.map(str::trim).filter(|s| !s.is_empty()) else {
        return DEFAULT_INTERVAL;
    };

    match humantime::parse_duration(raw) {
        Ok(d) if !d.is_zero() => d,
        Ok(_) => {
            tracing::warn!("Ignoring zero interval, using {:?}", DEFAULT_INTERVAL);
            DEFAULT_INTERVAL
        }
        Err(e) => {
            tracing::warn!(
                "Invalid interval '{}': {}, using {:?}",
                raw,
                e,
                DEFAULT_INTERVAL
            );
            DEFAULT_INTERVAL
        }
    }
}

/// Basic domain name validation per RFC 1035
fn validate_domain_name(domain: &str) -> Result<(), crate::Error> {
    if domain.is_empty() {
        return Err(crate::Error::config("domain is required"));
    }

    if domain.len() > 253 {
        return Err(crate::Error::config(format!(
            "Domain name too long: {} chars (max 253). Got: {}",
            domain.len(),
            domain
        )));
    }

    for label in domain.split('.') {
        if label.is_empty() {
            return Err(crate::Error::config(format!(
                "Domain name has empty label: '{}'",
                domain
            )));
        }

        if label.len() > 63 {
            return Err(crate::Error::config(format!(
                "Domain label too long: {} chars (max 63). Label: '{}'",
                label.len(),
                label
            )));
        }

        if !label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(crate::Error::config(format!(
                "Domain label contains invalid characters. Label: '{}'. \
                Valid: alphanumeric and hyphen only.",
                label
            )));
        }

        if label.starts_with('-') || label.ends_with('-') {
            return Err(crate::Error::config(format!(
                "Domain label cannot start or end with hyphen. Label: '{}'",
                label
            )));
        }
    }

    Ok(())
}

/// Hosts are relative to the zone; wildcards and underscores are allowed
///
/// The empty host is the zone apex.
fn validate_host(host: &str) -> Result<(), crate::Error> {
    if host.is_empty() {
        return Ok(());
    }
    for label in host.split('.') {
        if label.is_empty() || label.len() > 63 {
            return Err(crate::Error::config(format!("Invalid host: '{}'", host)));
        }
        if !label
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '*'))
        {
            return Err(crate::Error::config(format!(
                "Host contains invalid characters: '{}'",
                host
            )));
        }
    }
    Ok(())
}
