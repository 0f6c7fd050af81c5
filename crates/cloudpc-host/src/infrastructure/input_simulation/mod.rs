//! Platform input simulators.
//!
//! Key strokes are expressed as Windows Virtual-Key codes, so only Windows
//! has a native simulator.  Elsewhere the host still streams its screen but
//! every guest input event is rejected, so the dispatcher logs each one.

use std::sync::Arc;

use cloudpc_core::{AbsolutePoint, ModifierSet, MouseButton, VirtualKeyCode};
use tracing::trace;

use crate::application::inject_input::{InjectionError, InputSimulator};

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

pub use mock::{RecordingInputSimulator, SimulatedInput};

/// Returns the simulator for the current platform.
pub fn native_simulator() -> Arc<dyn InputSimulator> {
    #[cfg(target_os = "windows")]
    {
        Arc::new(windows::WindowsInputSimulator::new())
    }

    #[cfg(not(target_os = "windows"))]
    {
        tracing::warn!(
            "no native input simulator on this platform; guest input will be rejected, not injected"
        );
        Arc::new(DiscardingInputSimulator)
    }
}

const UNSUPPORTED: &str = "input injection is not supported on this platform";

/// Rejects every event with [`InjectionError::Rejected`].
#[derive(Debug, Default, Clone, Copy)]
pub struct DiscardingInputSimulator;

impl DiscardingInputSimulator {
    fn reject() -> Result<(), InjectionError> {
        Err(InjectionError::Rejected(UNSUPPORTED.into()))
    }
}

impl InputSimulator for DiscardingInputSimulator {
    fn move_to(&self, point: AbsolutePoint) -> Result<(), InjectionError> {
        trace!(x = point.x, y = point.y, "discarding pointer move");
        Self::reject()
    }

    fn button_down(&self, button: MouseButton) -> Result<(), InjectionError> {
        trace!(?button, "discarding button press");
        Self::reject()
    }

    fn button_up(&self, button: MouseButton) -> Result<(), InjectionError> {
        trace!(?button, "discarding button release");
        Self::reject()
    }

    fn text_entry(&self, ch: char) -> Result<(), InjectionError> {
        trace!(?ch, "discarding text entry");
        Self::reject()
    }

    fn modified_key_stroke(
        &self,
        code: VirtualKeyCode,
        modifiers: ModifierSet,
    ) -> Result<(), InjectionError> {
        trace!(key = code.name(), ?modifiers, "discarding key stroke");
        Self::reject()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discarding_simulator_rejects_every_event() {
        // Arrange
        let sim = DiscardingInputSimulator;

        // Act
        let results = [
            sim.move_to(AbsolutePoint { x: 10, y: 20 }),
            sim.button_down(MouseButton::Left),
            sim.button_up(MouseButton::Left),
            sim.text_entry('q'),
            sim.modified_key_stroke(VirtualKeyCode::Return, ModifierSet::default()),
        ];

        // Assert
        for result in results {
            assert!(matches!(result, Err(InjectionError::Rejected(ref m)) if m == UNSUPPORTED));
        }
    }
}
