//! Host registry
//!
//! The registry records, for every managed hostname, the IP address this
//! process last applied at the provider. It is populated once at startup,
//! owned by the poll loop and lent to the reconciler for each pass.
//!
//! ## Usage
//!
//! ```rust
//! use ddns_core::HostRegistry;
//!
//! let mut registry = HostRegistry::from_hosts(["home", "nas"]);
//! assert!(registry.needs_reconcile("5.6.7.8"));
//!
//! registry.record_applied("home", "5.6.7.8");
//! registry.record_applied("nas", "5.6.7.8");
//! assert!(!registry.needs_reconcile("5.6.7.8"));
//! ```

use std::collections::BTreeMap;

/// Hostname → last IP applied by this process
///
/// `None` means the host has not been applied yet in this run. Entries are
/// never removed. Iteration is in hostname order, which callers must not
/// rely on for anything but reproducible logs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostRegistry {
    hosts: BTreeMap<String, Option<String>>,
}

impl HostRegistry {
    /// Create a registry with every host unset
    ///
    /// Duplicate hostnames collapse into a single entry.
    pub fn from_hosts<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            hosts: hosts.into_iter().map(|h| (h.into(), None)).collect(),
        }
    }

    /// The IP last applied to `host`, if any
    pub fn last_applied(&self, host: &str) -> Option<&str> {
        self.hosts.get(host).and_then(|ip| ip.as_deref())
    }

    /// Record that `ip` was successfully applied to `host`
    ///
    /// Unknown hosts are ignored; the registry never grows after startup.
    pub fn record_applied(&mut self, host: &str, ip: &str) {
        if let Some(slot) = self.hosts.get_mut(host) {
            *slot = Some(ip.to_string());
        }
    }

    /// Whether any host's last applied IP differs from `ip`
    pub fn needs_reconcile(&self, ip: &str) -> bool {
        self.hosts.values().any(|last| last.as_deref() != Some(ip))
    }

    /// Managed hostnames
    pub fn hosts(&self) -> impl Iterator<Item = &str> {
        self.hosts.keys().map(String::as_str)
    }

    /// Hostname and last applied IP pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&str>)> {
        self.hosts.iter().map(|(h, ip)| (h.as_str(), ip.as_deref()))
    }

    /// Number of managed hosts
    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    /// Whether no hosts are managed
    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }
}
