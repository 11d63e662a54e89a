// # ddnsd - DDNS Daemon
//
// Thin integration layer: all DDNS logic lives in ddns-core.
//
// The ddnsd daemon is responsible for:
// 1. Reading configuration from flags (or environment variables)
// 2. Initializing logging and the runtime
// 3. Wiring the HTTP IP source and the name.com provider into the engine
// 4. Running the poll loop until SIGINT/SIGTERM
//
// ## Configuration
//
// | flag           | environment      | meaning                                   |
// |----------------|------------------|-------------------------------------------|
// | `--fetch-ip`   | `DDNS_FETCH_IP`  | URL answering with the public IP          |
// | `--username`   | `DDNS_USERNAME`  | name.com API username                     |
// | `--token`      | `DDNS_TOKEN`     | name.com API token                        |
// | `--domain`     | `DDNS_DOMAIN`    | zone to manage                            |
// | `--hosts`      | `DDNS_HOSTS`     | comma-separated hosts, `@` for the apex   |
// | `--proxy`      | `DDNS_PROXY`     | optional proxy for name.com API calls     |
// | `--interval`   | `DDNS_INTERVAL`  | poll period, e.g. `30s`, `5m` (default 30s) |
// | `--log-level`  | `DDNS_LOG_LEVEL` | trace, debug, info, warn, error           |
//
// ## Example
//
// ```bash
// ddnsd --fetch-ip https://ifconfig.me/ip \
//       --username alice --token "$NAMECOM_TOKEN" \
//       --domain example.com --hosts home,nas --interval 1m
// ```

use anyhow::{Context, Result};
use clap::Parser;
use ddns_core::config::parse_interval;
use ddns_core::{DdnsConfig, DdnsEngine};
use ddns_ip_http::HttpIpSource;
use ddns_provider_namecom::NameComProvider;
use std::process::ExitCode;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};

/// Exit codes for different termination scenarios
///
/// These codes follow systemd conventions:
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum DdnsExitCode {
    /// Clean shutdown (normal exit)
    CleanShutdown = 0,
    /// Configuration error or startup failure
    ConfigError = 1,
    /// Runtime error (unexpected failure)
    RuntimeError = 2,
}

impl From<DdnsExitCode> for ExitCode {
    fn from(code: DdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Keep name.com address records pointed at this host's public IP
#[derive(Parser)]
#[command(name = "ddnsd", version, about, long_about = None)]
struct Cli {
    /// URL that answers with the public IP as plain text
    #[arg(long = "fetch-ip", env = "DDNS_FETCH_IP", default_value = "")]
    fetch_ip: String,

    /// name.com API username
    #[arg(long, env = "DDNS_USERNAME", default_value = "")]
    username: String,

    /// name.com API token
    #[arg(long, env = "DDNS_TOKEN", default_value = "", hide_env_values = true)]
    token: String,

    /// Domain (zone) to manage
    #[arg(long, env = "DDNS_DOMAIN", default_value = "")]
    domain: String,

    /// Comma-separated host list, e.g. "@,home"; "@" is the bare domain
    #[arg(long, env = "DDNS_HOSTS", default_value = "")]
    hosts: String,

    /// Proxy URL for name.com API calls
    #[arg(long, env = "DDNS_PROXY")]
    proxy: Option<String>,

    /// Check IP interval, e.g. "30s", "5m"
    #[arg(long, env = "DDNS_INTERVAL")]
    interval: Option<String>,

    /// Log level
    #[arg(long = "log-level", env = "DDNS_LOG_LEVEL", default_value = "info")]
    log_level: String,
}

// Custom Debug implementation that hides the API token
impl std::fmt::Debug for Cli {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cli")
            .field("fetch_ip", &self.fetch_ip)
            .field("username", &self.username)
            .field("token", &"<REDACTED>")
            .field("domain", &self.domain)
            .field("hosts", &self.hosts)
            .field("proxy", &self.proxy)
            .field("interval", &self.interval)
            .field("log_level", &self.log_level)
            .finish()
    }
}

impl Cli {
    /// Parse the log level
    fn level(&self) -> Result<Level> {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Ok(Level::TRACE),
            "debug" => Ok(Level::DEBUG),
            "info" => Ok(Level::INFO),
            "warn" => Ok(Level::WARN),
            "error" => Ok(Level::ERROR),
            _ => anyhow::bail!(
                "log level '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }
    }

    /// Build the core configuration
    ///
    /// An unparseable interval falls back to the default with a warning,
    /// so this must run after logging is initialized.
    fn to_config(&self) -> DdnsConfig {
        DdnsConfig::new(&self.fetch_ip, &self.username, &self.token, &self.domain)
            .with_hosts(&self.hosts)
            .with_proxy(self.proxy.clone())
            .with_interval(parse_interval(self.interval.as_deref()))
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = match cli.level() {
        Ok(level) => level,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return DdnsExitCode::ConfigError.into();
        }
    };

    let subscriber = FmtSubscriber::builder().with_max_level(log_level).finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    let config = cli.to_config();
    if let Err(e) = config.validate() {
        error!("Configuration validation error: {}", e);
        return DdnsExitCode::ConfigError.into();
    }

    info!("Starting ddnsd daemon");
    info!(
        "Configuration loaded: {} host(s) in {}",
        config.hosts.len(),
        config.domain
    );

    // One poll cycle at a time, on one thread
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return DdnsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        match build_engine(&config) {
            Ok(engine) => run_daemon(engine).await,
            Err(e) => {
                error!("Startup error: {:#}", e);
                DdnsExitCode::ConfigError
            }
        }
    });

    result.into()
}

/// Wire the IP source and provider into an engine
fn build_engine(config: &DdnsConfig) -> Result<DdnsEngine> {
    let ip_source = HttpIpSource::new(config.fetch_ip_url.clone());

    let provider = NameComProvider::builder(&config.username, &config.token)
        .proxy(config.proxy.as_deref())
        .build()
        .context("failed to create name.com provider")?;

    DdnsEngine::new(Box::new(ip_source), Box::new(provider), config)
        .context("failed to create engine")
}

/// Run the engine until a shutdown signal arrives
async fn run_daemon(mut engine: DdnsEngine) -> DdnsExitCode {
    tokio::select! {
        _ = engine.run() => {
            error!("Poll loop ended unexpectedly");
            DdnsExitCode::RuntimeError
        }
        signal = wait_for_shutdown() => match signal {
            Ok(name) => {
                info!("Received shutdown signal: {}", name);
                info!("Shutting down daemon");
                DdnsExitCode::CleanShutdown
            }
            Err(e) => {
                error!("Shutdown error: {}", e);
                DdnsExitCode::RuntimeError
            }
        },
    }
}

/// Wait for shutdown signals (SIGTERM, SIGINT)
///
/// # Returns
///
/// Returns the name of the signal received.
#[cfg(unix)]
async fn wait_for_shutdown() -> Result<&'static str> {
    let mut sigterm = signal(SignalKind::terminate())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGTERM handler: {}", e))?;
    let mut sigint = signal(SignalKind::interrupt())
        .map_err(|e| anyhow::anyhow!("Failed to setup SIGINT handler: {}", e))?;

    let name = tokio::select! {
        _ = sigterm.recv() => "SIGTERM",
        _ = sigint.recv() => "SIGINT",
    };
    Ok(name)
}

/// Wait for shutdown signals (SIGINT only)
///
/// Fallback implementation for non-Unix platforms.
#[cfg(not(unix))]
async fn wait_for_shutdown() -> Result<&'static str> {
    tokio::signal::ctrl_c()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to wait for CTRL-C: {}", e))?;
    Ok("SIGINT")
}
