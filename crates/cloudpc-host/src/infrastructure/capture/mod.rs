//! Capture process launchers.

pub mod ffmpeg;
pub mod mock;

pub use ffmpeg::{capture_args, CaptureSource, FfmpegLauncher};
pub use mock::RecordingCaptureLauncher;
