//! Record reconciliation
//!
//! Given the observed IP and the host registry, bring the provider's address
//! records into agreement with a minimal number of API calls:
//!
//! 1. One listing call for the whole domain
//! 2. Index the address records by host (last one seen wins)
//! 3. Per registry host: create if missing, skip if equal, update otherwise
//! 4. Record successful mutations in the registry
//!
//! The first failing call ends the pass. Hosts not reached keep their
//! previous registry value and are looked at again on the next IP change.

use crate::config::fqdn;
use crate::error::{Error, Result};
use crate::registry::HostRegistry;
use crate::traits::{DnsProvider, Record};
use std::collections::HashMap;
use tracing::{debug, info};

/// Outcome of reconciling a single host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateResult {
    /// No record existed; one was created
    Created,
    /// The record pointed elsewhere and was updated
    Updated {
        /// Answer the record held before the update
        previous: String,
    },
    /// The record already held the observed IP (no-op)
    Unchanged,
}

/// Per-host entry of a reconciliation report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostUpdate {
    /// Hostname
    pub host: String,
    /// What happened to it
    pub result: UpdateResult,
}

/// Reconcile the provider's address records in `domain` with `current_ip`
///
/// On success returns one [`HostUpdate`] per registry host. On failure the
/// registry reflects exactly the hosts mutated before the failing call.
pub async fn reconcile(
    current_ip: &str,
    registry: &mut HostRegistry,
    provider: &dyn DnsProvider,
    domain: &str,
) -> Result<Vec<HostUpdate>> {
    let records = provider.list_records(domain).await?;
    let mut index = index_address_records(records);
    debug!(
        "{} lists {} address record(s) for {}",
        provider.provider_name(),
        index.len(),
        domain
    );

    let hosts: Vec<String> = registry.hosts().map(str::to_string).collect();
    let mut report = Vec::with_capacity(hosts.len());

    for host in hosts {
        let result = match index.remove(&host) {
            None => {
                let record = Record::address(host.as_str(), current_ip);
                provider.create_record(domain, &record).await?;
                info!("Created record {} -> {}", fqdn(&host, domain), current_ip);
                UpdateResult::Created
            }
            Some(record) if record.answer == current_ip => {
                debug!(
                    "Record {} already points at {}",
                    fqdn(&host, domain),
                    current_ip
                );
                UpdateResult::Unchanged
            }
            Some(mut record) => {
                if record.id.is_none() {
                    return Err(Error::decode(
                        format!("record {}", fqdn(&host, domain)),
                        "listed record has no id",
                    ));
                }
                let previous = std::mem::replace(&mut record.answer, current_ip.to_string());
                provider.update_record(domain, &record).await?;
                info!(
                    "Updated record {} -> {} (was: {})",
                    fqdn(&host, domain),
                    current_ip,
                    previous
                );
                UpdateResult::Updated { previous }
            }
        };

        if result != UpdateResult::Unchanged {
            registry.record_applied(&host, current_ip);
        }
        report.push(HostUpdate { host, result });
    }

    Ok(report)
}

/// Index address records by host; a later record for the same host replaces an earlier one
fn index_address_records(records: Vec<Record>) -> HashMap<String, Record> {
    records
        .into_iter()
        .filter(Record::is_address)
        .map(|r| (r.host.clone(), r))
        .collect()
}
