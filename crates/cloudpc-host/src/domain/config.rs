//! Host configuration.
//!
//! [`HostConfig`] is the single source of truth for runtime settings.  The
//! only operator input is the relay server address (the one positional CLI
//! argument); every other value is a built-in default that matches the
//! relay's fixed port layout.
//!
//! # Relay port layout
//!
//! | Port | Protocol  | Purpose                                    |
//! |------|-----------|--------------------------------------------|
//! | 8080 | WebSocket | control envelopes (`ws://<addr>:8080`)     |
//! | 8082 | HTTP      | video ingest (`http://<addr>:8082/<hostid>`) |

use std::time::Duration;

use cloudpc_core::HostId;

/// All runtime configuration for the host agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    /// Hostname or IP address of the relay server, without scheme or port.
    pub server_address: String,

    /// Port of the relay's WebSocket control channel.
    pub relay_port: u16,

    /// Port of the relay's HTTP video ingest endpoint.
    pub stream_port: u16,

    /// Target capture frame rate passed to the capture process.
    pub frame_rate: u32,

    /// Target video bitrate in kbit/s.
    pub bitrate_kbps: u32,

    /// Capture executable, resolved through `PATH` when not absolute.
    pub capture_program: String,

    /// How often the relay loop checks whether the capture process exited.
    pub capture_poll_interval: Duration,
}

impl HostConfig {
    /// Returns the default configuration pointed at `server_address`.
    pub fn for_server(server_address: impl Into<String>) -> Self {
        Self {
            server_address: server_address.into(),
            ..Self::default()
        }
    }

    /// WebSocket URL of the relay control channel.
    pub fn relay_url(&self) -> String {
        format!("ws://{}:{}", self.server_address, self.relay_port)
    }

    /// HTTP URL the capture process streams to for `host_id`.
    pub fn stream_url(&self, host_id: &HostId) -> String {
        format!(
            "http://{}:{}/{}",
            self.server_address, self.stream_port, host_id
        )
    }
}

impl Default for HostConfig {
    /// | Field                 | Default       |
    /// |-----------------------|---------------|
    /// | server_address        | `127.0.0.1`   |
    /// | relay_port            | 8080          |
    /// | stream_port           | 8082          |
    /// | frame_rate            | 30            |
    /// | bitrate_kbps          | 2048          |
    /// | capture_program       | `ffmpeg`      |
    /// | capture_poll_interval | 1 second      |
    fn default() -> Self {
        Self {
            server_address: "127.0.0.1".to_string(),
            relay_port: 8080,
            stream_port: 8082,
            frame_rate: 30,
            bitrate_kbps: 2048,
            capture_program: "ffmpeg".to_string(),
            capture_poll_interval: Duration::from_secs(1),
        }
    }
}
