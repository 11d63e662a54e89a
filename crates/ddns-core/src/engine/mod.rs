//! Core DDNS engine
//!
//! The DdnsEngine owns the poll loop:
//! - Observing the public IP via IpSource
//! - Checking the HostRegistry for hosts that are not on that IP yet
//! - Reconciling the provider's records via DnsProvider
//!
//! ## Architecture
//!
//! ```text
//!   interval tick
//!        │
//!        ▼
//! ┌─────────────┐   ip    ┌──────────────┐  any host stale?  ┌─────────────┐
//! │  IpSource   │───────▶│  DdnsEngine  │─────────────────▶│ reconcile() │
//! └─────────────┘         └──────────────┘                   └─────────────┘
//!                                │ owns                             │
//!                                ▼                                  ▼
//!                         ┌──────────────┐                   ┌─────────────┐
//!                         │ HostRegistry │◀── &mut ──────────│ DnsProvider │
//!                         └──────────────┘                   └─────────────┘
//! ```
//!
//! ## Poll Cycle
//!
//! 1. Wait for the next tick of the fixed interval
//! 2. Fetch the current IP; on failure, skip to the next tick
//! 3. If every host already holds that IP, do nothing
//! 4. Otherwise reconcile; on failure, log and retry at the next tick
//!
//! One cycle runs at a time. There is no backoff: the interval is constant
//! regardless of consecutive failures.

use crate::config::{DdnsConfig, fqdn};
use crate::error::Result;
use crate::reconcile::{HostUpdate, UpdateResult, reconcile};
use crate::registry::HostRegistry;
use crate::traits::{DnsProvider, IpSource};
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info, warn};

/// Result of a single poll cycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Every host already holds the observed IP; the provider was not contacted
    Unchanged {
        /// Observed IP
        ip: String,
    },

    /// The provider was reconciled against the observed IP
    Reconciled {
        /// Observed IP
        ip: String,
        /// Per-host results
        updates: Vec<HostUpdate>,
    },
}

/// Core DDNS engine
///
/// ## Lifecycle
///
/// 1. Create with [`DdnsEngine::new()`]
/// 2. Start with [`DdnsEngine::run()`]
/// 3. The loop never returns; drop the future to stop it
///
/// ## Threading
///
/// The engine is driven from a single task. The host registry is owned
/// here and only lent to the reconciler for the duration of a pass.
pub struct DdnsEngine {
    /// IP source for observing the public address
    ip_source: Box<dyn IpSource>,

    /// DNS provider for reading and writing records
    provider: Box<dyn DnsProvider>,

    /// Zone being managed
    domain: String,

    /// Last IP applied per host
    registry: HostRegistry,

    /// Poll period
    interval: Duration,
}

impl DdnsEngine {
    /// Create a new DDNS engine
    ///
    /// # Parameters
    ///
    /// - `ip_source`: IP source implementation
    /// - `provider`: DNS provider implementation
    /// - `config`: DDNS configuration (validated here)
    pub fn new(
        ip_source: Box<dyn IpSource>,
        provider: Box<dyn DnsProvider>,
        config: &DdnsConfig,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            ip_source,
            provider,
            domain: config.domain.clone(),
            registry: config.registry(),
            interval: config.interval,
        })
    }

    /// Current state of the host registry
    pub fn registry(&self) -> &HostRegistry {
        &self.registry
    }

    /// Poll period
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run the poll loop forever
    ///
    /// The first poll happens immediately, then once per interval. Missed
    /// ticks (a slow provider) delay the schedule rather than bursting.
    pub async fn run(&mut self) {
        info!(
            "Starting DDNS engine: {} host(s) in {} via {}, polling every {:?}",
            self.registry.len(),
            self.domain,
            self.provider.provider_name(),
            self.interval
        );

        for (host, last) in self.registry.iter() {
            info!(
                "Managing host: {} (last applied: {})",
                fqdn(host, &self.domain),
                last.unwrap_or("none")
            );
        }

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match self.poll_once().await {
                Ok(PollOutcome::Unchanged { ip }) => {
                    debug!("IP unchanged: {}", ip);
                }
                Ok(PollOutcome::Reconciled { ip, updates }) => {
                    let changed = updates
                        .iter()
                        .filter(|u| u.result != UpdateResult::Unchanged)
                        .count();
                    info!("Update IP success: {} ({} record(s) changed)", ip, changed);
                }
                Err(e) => {
                    error!("Poll cycle failed: {}", e);
                }
            }
        }
    }

    /// Run one poll cycle
    ///
    /// # Returns
    ///
    /// - `Ok(PollOutcome)`: What the cycle did
    /// - `Err(Error)`: The observer or the reconciler failed; the registry
    ///   keeps every value not confirmed by the provider
    pub async fn poll_once(&mut self) -> Result<PollOutcome> {
        let ip = match self.ip_source.fetch().await {
            Ok(ip) => ip,
            Err(e) => {
                warn!("Failed to fetch IP from {}: {}", self.ip_source.source_name(), e);
                return Err(e);
            }
        };

        if !self.registry.needs_reconcile(&ip) {
            return Ok(PollOutcome::Unchanged { ip });
        }

        info!("Found new IP: {}", ip);
        let updates = reconcile(&ip, &mut self.registry, self.provider.as_ref(), &self.domain).await?;

        Ok(PollOutcome::Reconciled { ip, updates })
    }
}

impl std::fmt::Debug for DdnsEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DdnsEngine")
            .field("ip_source", &self.ip_source.source_name())
            .field("provider", &self.provider.provider_name())
            .field("domain", &self.domain)
            .field("registry", &self.registry)
            .field("interval", &self.interval)
            .finish()
    }
}
