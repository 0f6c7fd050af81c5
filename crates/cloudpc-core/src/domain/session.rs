//! Session State Machine: host identity and connection phase.
//!
//! ```text
//!                 TransportOpened            HostIdAssigned
//!  Disconnected ─────────────────▶ AwaitingHostId ─────────────▶ Hosting
//!       ▲                                                       │     ▲
//!       │ Teardown (from any phase)              GuestConnected │     │ GuestDisconnected
//!       │                                                       ▼     │ CaptureLost
//!       └─────────────────────────────────────────────────── GuestConnected
//! ```
//!
//! The machine only decides *whether* a transition is legal and records the
//! result.  Side effects (starting capture, sending envelopes) belong to the
//! caller, which is expected to [`Session::check`] first, perform the side
//! effect, and only then commit the transition.  A failed side effect
//! therefore never advances the phase.
//!
//! The host id is written exactly once, on `AwaitingHostId → Hosting`.

use thiserror::Error;
use tracing::debug;

use super::pointer::ScreenSize;
use crate::protocol::messages::{HostId, OutboundEnvelope};

/// Connection phase of the host session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// No relay connection, or the session has been torn down.
    Disconnected,
    /// `connect-host` was sent; waiting for the relay to assign an id.
    AwaitingHostId,
    /// Registered with the relay, no guest attached.
    Hosting,
    /// A guest is attached and the screen is being streamed.
    GuestConnected,
}

/// Something that can move the session to another phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionEvent {
    TransportOpened,
    HostIdAssigned,
    GuestConnected,
    GuestDisconnected,
    /// The capture process exited on its own while a guest was attached.
    CaptureLost,
    Teardown,
}

impl Phase {
    /// Returns the phase reached from `self` on `event`, or `None` if the
    /// event is not legal in this phase.
    pub fn next(self, event: SessionEvent) -> Option<Phase> {
        use Phase::*;
        use SessionEvent as E;

        match (self, event) {
            (_, E::Teardown) => Some(Disconnected),
            (Disconnected, E::TransportOpened) => Some(AwaitingHostId),
            (AwaitingHostId, E::HostIdAssigned) => Some(Hosting),
            (Hosting, E::GuestConnected) => Some(GuestConnected),
            (GuestConnected, E::GuestDisconnected | E::CaptureLost) => Some(Hosting),
            _ => None,
        }
    }
}

/// A transition the session refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("{event:?} is not valid while {phase:?}")]
    InvalidTransition { phase: Phase, event: SessionEvent },

    #[error("host id is already assigned ({0})")]
    HostIdAlreadyAssigned(HostId),
}

/// The host's session: phase, relay-assigned id, and fixed screen size.
#[derive(Debug, Clone)]
pub struct Session {
    phase: Phase,
    host_id: Option<HostId>,
    screen: ScreenSize,
}

impl Session {
    /// Creates a disconnected session for a host with the given screen.
    pub fn new(screen: ScreenSize) -> Self {
        Self {
            phase: Phase::Disconnected,
            host_id: None,
            screen,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn host_id(&self) -> Option<&HostId> {
        self.host_id.as_ref()
    }

    pub fn screen(&self) -> ScreenSize {
        self.screen
    }

    /// Returns the phase `event` would lead to, without changing anything.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] if `event` is illegal now.
    pub fn check(&self, event: SessionEvent) -> Result<Phase, SessionError> {
        self.phase.next(event).ok_or(SessionError::InvalidTransition {
            phase: self.phase,
            event,
        })
    }

    /// Applies `event` and returns the new phase.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] if `event` is illegal now; the
    /// phase is left unchanged.
    pub fn advance(&mut self, event: SessionEvent) -> Result<Phase, SessionError> {
        let next = self.check(event)?;
        debug!("session {:?} -> {:?} on {:?}", self.phase, next, event);
        self.phase = next;
        Ok(next)
    }

    /// The relay channel opened: returns the `connect-host` announcement and
    /// moves to [`Phase::AwaitingHostId`].
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless the session is disconnected.
    pub fn open(&mut self) -> Result<OutboundEnvelope, SessionError> {
        self.advance(SessionEvent::TransportOpened)?;
        Ok(OutboundEnvelope::ConnectHost {
            screen_width: self.screen.width(),
            screen_height: self.screen.height(),
        })
    }

    /// Stores the relay-assigned id and moves to [`Phase::Hosting`].
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless awaiting an id, or
    /// [`SessionError::HostIdAlreadyAssigned`] if an id was stored before.
    pub fn assign_host_id(&mut self, host_id: HostId) -> Result<(), SessionError> {
        self.check(SessionEvent::HostIdAssigned)?;
        if let Some(existing) = &self.host_id {
            return Err(SessionError::HostIdAlreadyAssigned(existing.clone()));
        }
        self.host_id = Some(host_id);
        debug!("session {:?} -> {:?} on HostIdAssigned", self.phase, Phase::Hosting);
        self.phase = Phase::Hosting;
        Ok(())
    }

    /// Tears the session down from any phase.
    ///
    /// Returns the `disconnect-host` notice to send, or `None` if the relay
    /// never assigned an id or the session was already disconnected.
    pub fn teardown(&mut self) -> Option<OutboundEnvelope> {
        let was_connected = self.phase != Phase::Disconnected;
        self.phase = Phase::Disconnected;

        match (&self.host_id, was_connected) {
            (Some(host_id), true) => Some(OutboundEnvelope::DisconnectHost {
                host_id: host_id.clone(),
            }),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(ScreenSize::new(1920, 1080).unwrap())
    }

    fn hosting(id: &str) -> Session {
        let mut s = session();
        s.open().unwrap();
        s.assign_host_id(HostId::from(id)).unwrap();
        s
    }

    #[test]
    fn test_new_session_is_disconnected_without_id() {
        let s = session();
        assert_eq!(s.phase(), Phase::Disconnected);
        assert!(s.host_id().is_none());
    }

    #[test]
    fn test_open_announces_screen_size() {
        // Arrange
        let mut s = session();

        // Act
        let envelope = s.open().unwrap();

        // Assert
        assert_eq!(
            envelope,
            OutboundEnvelope::ConnectHost { screen_width: 1920, screen_height: 1080 }
        );
        assert_eq!(s.phase(), Phase::AwaitingHostId);
    }

    #[test]
    fn test_open_twice_is_rejected() {
        let mut s = session();
        s.open().unwrap();
        assert!(matches!(s.open(), Err(SessionError::InvalidTransition { .. })));
        assert_eq!(s.phase(), Phase::AwaitingHostId);
    }

    #[test]
    fn test_assign_host_id_moves_to_hosting() {
        let s = hosting("42");
        assert_eq!(s.phase(), Phase::Hosting);
        assert_eq!(s.host_id().map(HostId::as_str), Some("42"));
    }

    #[test]
    fn test_second_host_id_is_rejected_and_first_is_kept() {
        // Arrange
        let mut s = hosting("42");

        // Act
        let result = s.assign_host_id(HostId::from("43"));

        // Assert
        assert!(result.is_err());
        assert_eq!(s.host_id().map(HostId::as_str), Some("42"));
        assert_eq!(s.phase(), Phase::Hosting);
    }

    #[test]
    fn test_host_id_before_open_is_rejected() {
        let mut s = session();
        let result = s.assign_host_id(HostId::from("1"));
        assert_eq!(
            result,
            Err(SessionError::InvalidTransition {
                phase: Phase::Disconnected,
                event: SessionEvent::HostIdAssigned,
            })
        );
        assert!(s.host_id().is_none());
    }

    #[test]
    fn test_guest_cycle() {
        let mut s = hosting("7");
        assert_eq!(s.advance(SessionEvent::GuestConnected), Ok(Phase::GuestConnected));
        assert_eq!(s.advance(SessionEvent::GuestDisconnected), Ok(Phase::Hosting));
        assert_eq!(s.advance(SessionEvent::GuestConnected), Ok(Phase::GuestConnected));
        assert_eq!(s.advance(SessionEvent::CaptureLost), Ok(Phase::Hosting));
    }

    #[test]
    fn test_guest_events_in_wrong_phase_leave_state_unchanged() {
        let mut s = hosting("7");
        assert!(s.advance(SessionEvent::GuestDisconnected).is_err());
        assert_eq!(s.phase(), Phase::Hosting);

        s.advance(SessionEvent::GuestConnected).unwrap();
        assert!(s.advance(SessionEvent::GuestConnected).is_err());
        assert_eq!(s.phase(), Phase::GuestConnected);
    }

    #[test]
    fn test_check_does_not_mutate() {
        let s = hosting("7");
        assert_eq!(s.check(SessionEvent::GuestConnected), Ok(Phase::GuestConnected));
        assert_eq!(s.phase(), Phase::Hosting);
    }

    #[test]
    fn test_no_phase_is_skipped() {
        assert_eq!(Phase::Disconnected.next(SessionEvent::HostIdAssigned), None);
        assert_eq!(Phase::Disconnected.next(SessionEvent::GuestConnected), None);
        assert_eq!(Phase::AwaitingHostId.next(SessionEvent::GuestConnected), None);
        assert_eq!(Phase::Hosting.next(SessionEvent::TransportOpened), None);
    }

    #[test]
    fn test_teardown_from_guest_connected_emits_disconnect_host() {
        // Arrange
        let mut s = hosting("42");
        s.advance(SessionEvent::GuestConnected).unwrap();

        // Act
        let notice = s.teardown();

        // Assert
        assert_eq!(
            notice,
            Some(OutboundEnvelope::DisconnectHost { host_id: HostId::from("42") })
        );
        assert_eq!(s.phase(), Phase::Disconnected);
    }

    #[test]
    fn test_teardown_without_host_id_emits_nothing() {
        let mut s = session();
        s.open().unwrap();
        assert_eq!(s.teardown(), None);
        assert_eq!(s.phase(), Phase::Disconnected);
    }

    #[test]
    fn test_second_teardown_emits_nothing() {
        let mut s = hosting("42");
        assert!(s.teardown().is_some());
        assert!(s.teardown().is_none());
    }
}
