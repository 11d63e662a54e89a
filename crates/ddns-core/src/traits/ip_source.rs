// # IP Source Trait
//
// Defines the interface for observing the caller's current public IP.
//
// ## Implementations
//
// - HTTP "what is my IP" endpoint: `ddns-ip-http` crate
//
// ## Usage
//
// ```rust,ignore
// use ddns_core::IpSource;
//
// #[tokio::main]
// async fn main() -> anyhow::Result<()> {
//     let source = /* IpSource implementation */;
//     let ip = source.fetch().await?;
//     println!("public IP: {}", ip);
//     Ok(())
// }
// ```

use async_trait::async_trait;

/// Trait for IP source implementations
///
/// An IP source is an **observer**, not a decision-maker: it reports what it
/// sees and leaves scheduling, retries and DNS updates to the engine.
///
/// # Contract
///
/// - One fetch is one attempt. No retry, no caching between calls.
/// - The returned text is the address as reported, whitespace trimmed.
///   No format validation is performed.
/// - Failure to complete the request or read the body is a
///   [`crate::Error::Transport`].
#[async_trait]
pub trait IpSource: Send + Sync {
    /// Fetch the current public IP address
    async fn fetch(&self) -> Result<String, crate::Error>;

    /// Short name for logging
    fn source_name(&self) -> &'static str {
        "ip-source"
    }
}
