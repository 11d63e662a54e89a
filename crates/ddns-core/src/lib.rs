// # ddns-core
//
// Core library for the polling DDNS client.
//
// ## Architecture Overview
//
// - **IpSource**: Trait for observing the current public IP address
// - **DnsProvider**: Trait for listing, creating and updating address records
// - **HostRegistry**: Last IP this process applied to each managed host
// - **reconcile**: Converges the provider's record set to the observed IP
// - **DdnsEngine**: Poll loop that ties the pieces together on a fixed interval
//
// ## Design Principles
//
// 1. **Separation of Concerns**: Decision-making lives here, HTTP lives in plugin crates
// 2. **Minimal Mutations**: At most one listing plus one mutating call per host per pass
// 3. **Idempotency**: Hosts already holding the observed IP are left alone
// 4. **Library-First**: The daemon is a thin shell around this crate

pub mod config;
pub mod engine;
pub mod error;
pub mod reconcile;
pub mod registry;
pub mod traits;

// Re-export core types for convenience
pub use config::DdnsConfig;
pub use engine::{DdnsEngine, PollOutcome};
pub use error::{Error, Result};
pub use reconcile::{HostUpdate, UpdateResult, reconcile};
pub use registry::HostRegistry;
pub use traits::{DnsProvider, IpSource, Record};
