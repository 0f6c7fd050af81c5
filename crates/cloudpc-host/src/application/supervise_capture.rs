//! Capture Process Supervisor: owns the external screen-capture process.
//!
//! Streaming is delegated to a long-lived subprocess (ffmpeg in production)
//! that grabs the desktop, encodes it, and pushes it to the relay's ingest
//! endpoint.  The supervisor guarantees that at most one such process is
//! tracked at a time:
//!
//! - [`CaptureSupervisor::start`] refuses to launch while a process is
//!   tracked ([`CaptureError::AlreadyRunning`]).
//! - [`CaptureSupervisor::stop`] with nothing tracked is reported as
//!   [`CaptureError::NotRunning`] instead of being silently ignored.
//! - [`CaptureSupervisor::poll_exit`] notices a process that died on its own
//!   and stops tracking it, so the session can resynchronise.
//!
//! How the process is spawned is behind [`CaptureLauncher`]; the ffmpeg
//! implementation lives in the infrastructure layer.

use std::sync::Arc;

use cloudpc_core::{HostId, ScreenSize};
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::HostConfig;

/// Errors from starting or stopping the capture process.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The executable could not be spawned (missing, not executable, ...).
    #[error("failed to launch capture program `{program}`: {source}")]
    Launch {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// The tracked process could not be terminated.
    #[error("failed to stop capture process: {0}")]
    Stop(#[source] std::io::Error),

    #[error("a capture process is already running (pid {})", display_pid(*.0))]
    AlreadyRunning(Option<u32>),

    #[error("no capture process is running")]
    NotRunning,
}

fn display_pid(pid: Option<u32>) -> String {
    pid.map_or_else(|| "unknown".to_string(), |p| p.to_string())
}

/// Parameters for one capture process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureRequest {
    /// Physical resolution to grab.
    pub screen: ScreenSize,
    pub frame_rate: u32,
    pub bitrate_kbps: u32,
    /// Where the encoded stream is pushed (`http://<relay>:8082/<hostid>`).
    pub destination: String,
}

/// A running capture process.
pub trait CaptureProcess: Send {
    /// OS process id, if known.
    fn id(&self) -> Option<u32>;

    /// Terminates the process and reaps it.
    fn kill(&mut self) -> std::io::Result<()>;

    /// Returns a description of the exit status if the process has exited,
    /// without blocking.
    fn try_exit_status(&mut self) -> std::io::Result<Option<String>>;
}

/// Spawns capture processes.
#[cfg_attr(test, mockall::automock)]
pub trait CaptureLauncher: Send + Sync {
    /// # Errors
    ///
    /// Returns [`CaptureError::Launch`] if the process cannot be started.
    fn launch(&self, request: &CaptureRequest) -> Result<Box<dyn CaptureProcess>, CaptureError>;
}

/// Tracks at most one capture process for the session.
pub struct CaptureSupervisor {
    launcher: Arc<dyn CaptureLauncher>,
    config: HostConfig,
    running: Option<Box<dyn CaptureProcess>>,
}

impl CaptureSupervisor {
    pub fn new(launcher: Arc<dyn CaptureLauncher>, config: HostConfig) -> Self {
        Self {
            launcher,
            config,
            running: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.is_some()
    }

    /// Builds the request for streaming `screen` under `host_id`.
    pub fn request_for(&self, screen: ScreenSize, host_id: &HostId) -> CaptureRequest {
        CaptureRequest {
            screen,
            frame_rate: self.config.frame_rate,
            bitrate_kbps: self.config.bitrate_kbps,
            destination: self.config.stream_url(host_id),
        }
    }

    /// Launches the capture process for `host_id`.
    ///
    /// # Errors
    ///
    /// [`CaptureError::AlreadyRunning`] if a process is tracked, or whatever
    /// the launcher reports.  Nothing is tracked after a failure.
    pub fn start(&mut self, screen: ScreenSize, host_id: &HostId) -> Result<(), CaptureError> {
        if let Some(process) = &self.running {
            return Err(CaptureError::AlreadyRunning(process.id()));
        }

        let request = self.request_for(screen, host_id);
        let process = self.launcher.launch(&request)?;
        info!(
            "capture started (pid {}) at {} -> {}",
            display_pid(process.id()),
            request.screen,
            request.destination
        );
        self.running = Some(process);
        Ok(())
    }

    /// Terminates the tracked process.
    ///
    /// # Errors
    ///
    /// [`CaptureError::NotRunning`] if nothing is tracked, or
    /// [`CaptureError::Stop`] if the kill failed (the process stays tracked).
    pub fn stop(&mut self) -> Result<(), CaptureError> {
        let process = self.running.as_mut().ok_or(CaptureError::NotRunning)?;
        let pid = process.id();
        process.kill().map_err(CaptureError::Stop)?;
        self.running = None;
        info!("capture stopped (pid {})", display_pid(pid));
        Ok(())
    }

    /// Stops tracking the current process without killing it.
    ///
    /// Returns the pid of the released process, if there was one.
    pub fn abandon(&mut self) -> Option<u32> {
        let process = self.running.take()?;
        process.id()
    }

    /// Checks whether the tracked process exited on its own.
    ///
    /// Returns the exit description and stops tracking the process if so.
    pub fn poll_exit(&mut self) -> Option<String> {
        let process = self.running.as_mut()?;
        match process.try_exit_status() {
            Ok(Some(status)) => {
                self.running = None;
                Some(status)
            }
            Ok(None) => None,
            Err(e) => {
                warn!("could not query capture process status: {e}");
                None
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
