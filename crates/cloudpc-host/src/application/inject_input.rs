//! Input Injector Adapter: replays guest input through the OS.
//!
//! The dispatcher hands already-translated actions (absolute pointer
//! positions, button transitions, [`KeyAction`]s) to [`InputInjector`],
//! which forwards them to an [`InputSimulator`] trait object.  The
//! platform-specific simulators live in the infrastructure layer.

use std::sync::Arc;

use cloudpc_core::{AbsolutePoint, KeyAction, ModifierSet, MouseButton, VirtualKeyCode};
use thiserror::Error;

/// Error type for input simulation.
#[derive(Debug, Error)]
pub enum InjectionError {
    /// The OS refused the synthetic input (e.g. UIPI blocked it, or the
    /// secure desktop is active).
    #[error("input rejected by the platform: {0}")]
    Rejected(String),
}

/// The input-simulation capability the host depends on.
///
/// Pointer positions are absolute, in the `[0, 65535]` space produced by
/// [`cloudpc_core::map_to_absolute`].  Every call is synchronous.
#[cfg_attr(test, mockall::automock)]
pub trait InputSimulator: Send + Sync {
    /// Moves the pointer to an absolute position on the primary screen.
    fn move_to(&self, point: AbsolutePoint) -> Result<(), InjectionError>;

    fn button_down(&self, button: MouseButton) -> Result<(), InjectionError>;

    fn button_up(&self, button: MouseButton) -> Result<(), InjectionError>;

    /// Types one character as text, independent of the keyboard layout.
    fn text_entry(&self, ch: char) -> Result<(), InjectionError>;

    /// Presses `modifiers` in order, strokes `code`, then releases the
    /// modifiers in reverse order.
    fn modified_key_stroke(
        &self,
        code: VirtualKeyCode,
        modifiers: ModifierSet,
    ) -> Result<(), InjectionError>;
}

/// Filters duplicate consecutive pointer positions.
///
/// Only guest positions are compared.  If the local user moves the pointer
/// between two identical guest positions, the second guest move is still
/// dropped; the filter is cleared on each guest connect.
#[derive(Default)]
struct DedupFilter {
    last_position: Option<AbsolutePoint>,
}

impl DedupFilter {
    fn should_send(&mut self, point: AbsolutePoint) -> bool {
        if self.last_position == Some(point) {
            return false;
        }
        self.last_position = Some(point);
        true
    }

    fn reset(&mut self) {
        self.last_position = None;
    }
}

/// Forwards translated guest input to the platform simulator.
pub struct InputInjector {
    simulator: Arc<dyn InputSimulator>,
    dedup: DedupFilter,
}

impl InputInjector {
    pub fn new(simulator: Arc<dyn InputSimulator>) -> Self {
        Self {
            simulator,
            dedup: DedupFilter::default(),
        }
    }

    /// Moves the pointer unless it is already at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError`] if the simulator rejects the move.
    pub fn move_pointer(&mut self, point: AbsolutePoint) -> Result<(), InjectionError> {
        if self.dedup.should_send(point) {
            if let Err(e) = self.simulator.move_to(point) {
                // The pointer did not move, so the next identical position must be retried.
                self.dedup.reset();
                return Err(e);
            }
        }
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`InjectionError`] if the simulator rejects the event.
    pub fn button(&self, button: MouseButton, pressed: bool) -> Result<(), InjectionError> {
        if pressed {
            self.simulator.button_down(button)
        } else {
            self.simulator.button_up(button)
        }
    }

    /// # Errors
    ///
    /// Returns [`InjectionError`] if the simulator rejects the key.
    pub fn key(&self, action: KeyAction) -> Result<(), InjectionError> {
        match action {
            KeyAction::Text(ch) => self.simulator.text_entry(ch),
            KeyAction::Stroke { code, modifiers } => {
                self.simulator.modified_key_stroke(code, modifiers)
            }
        }
    }

    /// Forgets the last pointer position (e.g. when a new guest attaches).
    pub fn reset(&mut self) {
        self.dedup.reset();
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
