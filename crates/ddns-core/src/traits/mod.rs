//! Core traits for the DDNS client
//!
//! This module defines the abstract interfaces that all implementations must follow.
//!
//! - [`IpSource`]: Observe the current public IP address
//! - [`DnsProvider`]: List, create and update records via a provider API

pub mod dns_provider;
pub mod ip_source;

pub use dns_provider::{ADDRESS_RECORD_TYPE, DEFAULT_TTL, DnsProvider, Record};
pub use ip_source::IpSource;
