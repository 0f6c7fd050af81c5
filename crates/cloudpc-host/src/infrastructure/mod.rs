//! Infrastructure layer: OS and network adapters.
//!
//! - `capture`: ffmpeg launcher behind `CaptureLauncher`
//! - `input_simulation`: SendInput simulator behind `InputSimulator`
//! - `relay`: WebSocket connection to the relay and the shutdown signal
//! - `screen_info`: primary screen size

pub mod capture;
pub mod input_simulation;
pub mod relay;
pub mod screen_info;
