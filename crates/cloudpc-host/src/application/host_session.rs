//! Message Dispatcher: routes relay envelopes to the session, the capture
//! supervisor, and the input injector.
//!
//! [`HostController`] owns every piece of mutable host state.  The relay loop
//! feeds it one text frame at a time through [`HostController::handle_text`];
//! frames are processed strictly in arrival order and a failing frame never
//! stops the ones after it.
//!
//! # Routing
//!
//! | Envelope           | Effect                                              |
//! |--------------------|-----------------------------------------------------|
//! | `create-hostid`    | store the id, `AwaitingHostId → Hosting`            |
//! | `connect-guest`    | start capture, `Hosting → GuestConnected`           |
//! | `disconnect-guest` | stop capture, `GuestConnected → Hosting`            |
//! | `mouse-move`       | map to absolute space and move the pointer          |
//! | `mouse-down/up`    | press / release the button                          |
//! | `key-down`         | translate the key and inject text or a key stroke   |
//! | anything else      | ignored                                             |
//!
//! Guest-lifecycle envelopes check the transition first, run the capture
//! side effect, and only then commit the phase, so a failed launch or kill
//! leaves the phase where it was.

use std::sync::Arc;

use cloudpc_core::{
    decode_inbound, map_to_absolute, translate, HostId, InboundEnvelope, KeyMapError,
    ModifierSet, OutboundEnvelope, Phase, ProtocolError, ScreenSize, Session, SessionError,
    SessionEvent,
};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use super::inject_input::{InjectionError, InputInjector, InputSimulator};
use super::supervise_capture::{CaptureError, CaptureLauncher, CaptureSupervisor};
use crate::domain::HostConfig;

/// Everything that can go wrong while handling one relay frame or the
/// relay connection itself.
#[derive(Debug, Error)]
pub enum HostError {
    #[error(transparent)]
    MalformedEnvelope(#[from] ProtocolError),

    #[error("protocol violation: {0}")]
    ProtocolViolation(#[from] SessionError),

    #[error(transparent)]
    UnknownKey(#[from] KeyMapError),

    #[error("capture launch failed: {0}")]
    CaptureLaunch(#[source] CaptureError),

    #[error("capture stop failed: {0}")]
    CaptureStop(#[source] CaptureError),

    #[error(transparent)]
    Injection(#[from] InjectionError),

    #[error("relay transport error: {0}")]
    Transport(String),
}

/// What a successfully handled envelope did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatched {
    HostIdAssigned(HostId),
    GuestConnected,
    GuestDisconnected,
    /// Pointer or keyboard input was forwarded to the simulator.
    Input,
    /// The envelope type is not handled by the host.
    Ignored,
}

/// Owns the session and its side-effecting collaborators.
pub struct HostController {
    session: Session,
    capture: CaptureSupervisor,
    injector: InputInjector,
}

impl HostController {
    pub fn new(
        config: HostConfig,
        screen: ScreenSize,
        launcher: Arc<dyn CaptureLauncher>,
        simulator: Arc<dyn InputSimulator>,
    ) -> Self {
        Self {
            session: Session::new(screen),
            capture: CaptureSupervisor::new(launcher, config),
            injector: InputInjector::new(simulator),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn phase(&self) -> Phase {
        self.session.phase()
    }

    pub fn host_id(&self) -> Option<&HostId> {
        self.session.host_id()
    }

    /// Whether a capture process is currently tracked.
    pub fn is_capturing(&self) -> bool {
        self.capture.is_running()
    }

    /// The relay channel opened: returns the `connect-host` announcement.
    ///
    /// # Errors
    ///
    /// [`HostError::ProtocolViolation`] if the session was already opened.
    pub fn on_transport_open(&mut self) -> Result<OutboundEnvelope, HostError> {
        let announcement = self.session.open()?;
        info!("announcing host with screen {}", self.session.screen());
        Ok(announcement)
    }

    /// Handles one text frame, logging any failure instead of returning it.
    pub fn handle_text(&mut self, text: &str) -> Option<Dispatched> {
        match self.dispatch(text) {
            Ok(outcome) => Some(outcome),
            Err(e) => {
                log_dispatch_error(&e);
                None
            }
        }
    }

    /// Decodes one text frame and routes it.
    ///
    /// # Errors
    ///
    /// Any [`HostError`] except [`HostError::Transport`].
    pub fn dispatch(&mut self, text: &str) -> Result<Dispatched, HostError> {
        let envelope = decode_inbound(text)?;
        self.route(envelope)
    }

    /// Routes an already decoded envelope.
    ///
    /// # Errors
    ///
    /// See [`HostController::dispatch`].
    pub fn route(&mut self, envelope: InboundEnvelope) -> Result<Dispatched, HostError> {
        match envelope {
            InboundEnvelope::CreateHostId { host_id } => {
                self.session.assign_host_id(host_id.clone())?;
                info!("relay assigned host id {host_id}");
                Ok(Dispatched::HostIdAssigned(host_id))
            }
            InboundEnvelope::ConnectGuest => self.connect_guest(),
            InboundEnvelope::DisconnectGuest => self.disconnect_guest(),
            InboundEnvelope::MouseMove { x, y } => {
                let point = map_to_absolute(x, y, self.session.screen());
                self.injector.move_pointer(point)?;
                Ok(Dispatched::Input)
            }
            InboundEnvelope::MouseDown { button } => {
                self.injector.button(button, true)?;
                Ok(Dispatched::Input)
            }
            InboundEnvelope::MouseUp { button } => {
                self.injector.button(button, false)?;
                Ok(Dispatched::Input)
            }
            InboundEnvelope::KeyDown { key, shift, ctrl, alt } => {
                let action = translate(&key, ModifierSet::new(shift, ctrl, alt))?;
                self.injector.key(action)?;
                Ok(Dispatched::Input)
            }
            InboundEnvelope::Unknown => {
                debug!("ignoring envelope of unhandled type");
                Ok(Dispatched::Ignored)
            }
        }
    }

    fn connect_guest(&mut self) -> Result<Dispatched, HostError> {
        self.session.check(SessionEvent::GuestConnected)?;
        let host_id = self
            .session
            .host_id()
            .cloned()
            .ok_or(SessionError::InvalidTransition {
                phase: self.session.phase(),
                event: SessionEvent::GuestConnected,
            })?;

        self.capture
            .start(self.session.screen(), &host_id)
            .map_err(HostError::CaptureLaunch)?;
        self.session.advance(SessionEvent::GuestConnected)?;
        self.injector.reset();
        info!("guest connected to host {host_id}");
        Ok(Dispatched::GuestConnected)
    }

    fn disconnect_guest(&mut self) -> Result<Dispatched, HostError> {
        // In Hosting the stop is still attempted so that a missing capture
        // process surfaces as a stop error rather than a protocol violation.
        match self.session.phase() {
            Phase::GuestConnected | Phase::Hosting => {}
            phase => {
                return Err(SessionError::InvalidTransition {
                    phase,
                    event: SessionEvent::GuestDisconnected,
                }
                .into())
            }
        }

        self.capture.stop().map_err(HostError::CaptureStop)?;
        self.session.advance(SessionEvent::GuestDisconnected)?;
        info!("guest disconnected");
        Ok(Dispatched::GuestDisconnected)
    }

    /// Checks whether the capture process died on its own.
    ///
    /// Returns the exit description if it did; a guest session falls back to
    /// [`Phase::Hosting`].
    pub fn check_capture(&mut self) -> Option<String> {
        let status = self.capture.poll_exit()?;
        warn!("capture process exited unexpectedly ({status})");
        if self.session.advance(SessionEvent::CaptureLost).is_ok() {
            info!("no longer streaming; waiting for the next guest");
        }
        Some(status)
    }

    /// Stops capture and tears the session down.
    ///
    /// A failed stop is retried once.  If that also fails the process is
    /// released and may outlive the host.
    ///
    /// Returns the `disconnect-host` notice to send, if the relay ever
    /// assigned an id.
    pub fn shutdown(&mut self) -> Option<OutboundEnvelope> {
        if self.capture.is_running() {
            if let Err(e) = self.capture.stop() {
                warn!("could not stop capture during shutdown, retrying: {e}");
                if let Err(e) = self.capture.stop() {
                    let pid = self.capture.abandon();
                    error!(
                        "capture process {} left running after shutdown: {e}",
                        pid.map_or_else(|| "?".to_string(), |p| p.to_string())
                    );
                }
            }
        }
        self.session.teardown()
    }
}

fn log_dispatch_error(e: &HostError) {
    match e {
        HostError::MalformedEnvelope(_)
        | HostError::ProtocolViolation(_)
        | HostError::UnknownKey(_) => warn!("dropping relay envelope: {e}"),
        HostError::CaptureLaunch(_) | HostError::CaptureStop(_) | HostError::Injection(_) => {
            error!("{e}")
        }
        HostError::Transport(_) => warn!("{e}"),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
