//! RemoteCloudPC host agent, entry point.
//!
//! # Usage
//!
//! ```text
//! cloudpc-host <SERVER_ADDRESS>
//! ```
//!
//! `SERVER_ADDRESS` is the relay's hostname or IP.  Without it the program
//! exits immediately and silently.  Once registered the assigned host id is
//! printed; press Enter or Ctrl+C to disconnect.
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cloudpc_host::application::HostController;
use cloudpc_host::domain::HostConfig;
use cloudpc_host::infrastructure::capture::FfmpegLauncher;
use cloudpc_host::infrastructure::input_simulation::native_simulator;
use cloudpc_host::infrastructure::relay::{operator_shutdown, run_relay_session};
use cloudpc_host::infrastructure::screen_info::PlatformScreenProbe;

// ── CLI argument definitions ──────────────────────────────────────────────────

/// RemoteCloudPC host agent.
#[derive(Debug, Parser)]
#[command(
    name = "cloudpc-host",
    disable_help_flag = true,
    disable_version_flag = true
)]
struct Cli {
    /// Hostname or IP address of the relay server.
    server_address: String,
}

impl Cli {
    fn into_host_config(self) -> HostConfig {
        HostConfig::for_server(self.server_address)
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Ok(cli) = Cli::try_parse() else {
        return Ok(());
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = cli.into_host_config();
    let screen = screen_probe()?
        .primary_screen_size()
        .context("failed to read the primary screen size")?;

    info!(
        "RemoteCloudPC host starting: relay={}, screen={screen}",
        config.relay_url()
    );

    let launcher = Arc::new(FfmpegLauncher::native(config.capture_program.clone()));
    let mut controller = HostController::new(config.clone(), screen, launcher, native_simulator());

    println!("Press Enter or Ctrl+C to exit.");
    let end = run_relay_session(&mut controller, &config, operator_shutdown()).await?;

    info!("RemoteCloudPC host stopped ({end:?})");
    Ok(())
}

#[cfg(any(target_os = "windows", target_os = "linux", target_os = "macos"))]
fn screen_probe() -> anyhow::Result<Box<dyn PlatformScreenProbe>> {
    Ok(Box::new(
        cloudpc_host::infrastructure::screen_info::NativeScreenProbe::new(),
    ))
}

#[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
fn screen_probe() -> anyhow::Result<Box<dyn PlatformScreenProbe>> {
    anyhow::bail!("reading the screen size is not supported on this platform")
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_takes_server_address_positionally() {
        // Arrange / Act
        let cli = Cli::try_parse_from(["cloudpc-host", "relay.example.net"]).unwrap();

        // Assert
        assert_eq!(cli.server_address, "relay.example.net");
    }

    #[test]
    fn test_cli_without_address_fails_to_parse() {
        assert!(Cli::try_parse_from(["cloudpc-host"]).is_err());
    }

    #[test]
    fn test_cli_help_flag_is_not_special() {
        assert!(Cli::try_parse_from(["cloudpc-host", "--help"]).is_err());
    }

    #[test]
    fn test_cli_extra_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["cloudpc-host", "a", "b"]).is_err());
    }

    #[test]
    fn test_into_host_config_builds_relay_url() {
        let cli = Cli::try_parse_from(["cloudpc-host", "10.1.2.3"]).unwrap();

        let config = cli.into_host_config();

        assert_eq!(config.relay_url(), "ws://10.1.2.3:8080");
        assert_eq!(config.stream_port, 8082);
    }
}
