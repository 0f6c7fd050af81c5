//! Recording input simulator.
//!
//! Records every call in memory instead of touching the OS.  Used by tests on
//! any platform.
//!
//! ```ignore
//! let sim = Arc::new(RecordingInputSimulator::new());
//! let mut injector = InputInjector::new(sim.clone());
//! injector.key(KeyAction::Text('a')).unwrap();
//! assert_eq!(sim.recorded(), vec![SimulatedInput::Text('a')]);
//! ```
//!
//! Set `should_fail = true` before sharing it to make every call fail with
//! [`InjectionError::Rejected`].

use std::sync::Mutex;

use cloudpc_core::{AbsolutePoint, ModifierSet, MouseButton, VirtualKeyCode};

use crate::application::inject_input::{InjectionError, InputSimulator};

/// One recorded simulator call, in call order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimulatedInput {
    Move(AbsolutePoint),
    Button { button: MouseButton, pressed: bool },
    Text(char),
    Stroke { code: VirtualKeyCode, modifiers: ModifierSet },
}

#[derive(Default)]
pub struct RecordingInputSimulator {
    /// Every successful call, in order.
    pub events: Mutex<Vec<SimulatedInput>>,
    /// When true every call returns an error and nothing is recorded.
    pub should_fail: bool,
}

impl RecordingInputSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    /// Snapshot of the recorded calls.
    pub fn recorded(&self) -> Vec<SimulatedInput> {
        self.events.lock().map(|e| e.clone()).unwrap_or_default()
    }

    fn record(&self, input: SimulatedInput) -> Result<(), InjectionError> {
        if self.should_fail {
            return Err(InjectionError::Rejected("recording simulator set to fail".into()));
        }
        if let Ok(mut events) = self.events.lock() {
            events.push(input);
        }
        Ok(())
    }
}

impl InputSimulator for RecordingInputSimulator {
    fn move_to(&self, point: AbsolutePoint) -> Result<(), InjectionError> {
        self.record(SimulatedInput::Move(point))
    }

    fn button_down(&self, button: MouseButton) -> Result<(), InjectionError> {
        self.record(SimulatedInput::Button { button, pressed: true })
    }

    fn button_up(&self, button: MouseButton) -> Result<(), InjectionError> {
        self.record(SimulatedInput::Button { button, pressed: false })
    }

    fn text_entry(&self, ch: char) -> Result<(), InjectionError> {
        self.record(SimulatedInput::Text(ch))
    }

    fn modified_key_stroke(
        &self,
        code: VirtualKeyCode,
        modifiers: ModifierSet,
    ) -> Result<(), InjectionError> {
        self.record(SimulatedInput::Stroke { code, modifiers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calls_are_recorded_in_order() {
        let sim = RecordingInputSimulator::new();

        sim.move_to(AbsolutePoint { x: 1, y: 2 }).unwrap();
        sim.button_down(MouseButton::Right).unwrap();
        sim.text_entry('z').unwrap();

        assert_eq!(
            sim.recorded(),
            vec![
                SimulatedInput::Move(AbsolutePoint { x: 1, y: 2 }),
                SimulatedInput::Button { button: MouseButton::Right, pressed: true },
                SimulatedInput::Text('z'),
            ]
        );
    }

    #[test]
    fn test_failing_simulator_records_nothing() {
        let sim = RecordingInputSimulator::failing();

        let result = sim.button_up(MouseButton::Left);

        assert!(matches!(result, Err(InjectionError::Rejected(_))));
        assert!(sim.recorded().is_empty());
    }
}
