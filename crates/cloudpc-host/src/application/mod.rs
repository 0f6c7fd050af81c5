//! Application layer: use-cases that drive the host session.
//!
//! Platform access (process spawning, synthetic input) is reached only
//! through the [`supervise_capture::CaptureLauncher`] and
//! [`inject_input::InputSimulator`] traits, so everything here is testable
//! with mocks.

pub mod host_session;
pub mod inject_input;
pub mod supervise_capture;

pub use host_session::{Dispatched, HostController, HostError};
pub use inject_input::{InjectionError, InputInjector, InputSimulator};
pub use supervise_capture::{
    CaptureError, CaptureLauncher, CaptureProcess, CaptureRequest, CaptureSupervisor,
};
