// # DNS Provider Trait
//
// Defines the interface for reading and writing address records through a
// provider's REST API.
//
// ## Implementations
//
// - name.com API v4: `ddns-provider-namecom` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::{DnsProvider, Record};
//
// let records = provider.list_records("example.com").await?;
// provider.create_record("example.com", &Record::address("home", "5.6.7.8")).await?;
// ```

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Record type handled by this client
pub const ADDRESS_RECORD_TYPE: &str = "A";

/// TTL, in seconds, given to records this client creates
pub const DEFAULT_TTL: u32 = 300;

/// One DNS resource record as known to the provider
///
/// Absent or empty fields are omitted when serialized, so a record that has
/// not been created yet carries no `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Provider-assigned identifier, absent until the record exists remotely
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u32>,

    /// Hostname relative to the zone
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub host: String,

    /// Record type, e.g. "A"
    #[serde(rename = "type", default, skip_serializing_if = "String::is_empty")]
    pub record_type: String,

    /// Record value; the IP address for address records
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub answer: String,

    /// Time-to-live in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ttl: Option<u32>,
}

impl Record {
    /// A new address record for `host` pointing at `ip`, with the default TTL
    pub fn address(host: impl Into<String>, ip: impl Into<String>) -> Self {
        Self {
            id: None,
            host: host.into(),
            record_type: ADDRESS_RECORD_TYPE.to_string(),
            answer: ip.into(),
            ttl: Some(DEFAULT_TTL),
        }
    }

    /// Whether this is an address ("A") record
    pub fn is_address(&self) -> bool {
        self.record_type == ADDRESS_RECORD_TYPE
    }
}

/// Trait for DNS provider implementations
///
/// Providers are isolated and stateless: every method is a single API call.
/// Deciding *whether* to create or update is owned by
/// [`crate::reconcile()`], retrying is owned by the poll loop.
///
/// # Errors
///
/// - [`crate::Error::Transport`] when the call cannot be completed or the
///   provider rejects it.
/// - [`crate::Error::Decode`] when a response cannot be parsed.
#[async_trait]
pub trait DnsProvider: Send + Sync {
    /// List every record in `domain`
    ///
    /// Returns all record types; filtering is the caller's job.
    async fn list_records(&self, domain: &str) -> Result<Vec<Record>, crate::Error>;

    /// Create `record` in `domain`
    ///
    /// The record has no `id`; the provider assigns one.
    async fn create_record(&self, domain: &str, record: &Record) -> Result<(), crate::Error>;

    /// Replace an existing record in `domain`, addressed by `record.id`
    async fn update_record(&self, domain: &str, record: &Record) -> Result<(), crate::Error>;

    /// Get the provider name (for logging/debugging)
    fn provider_name(&self) -> &'static str;
}
