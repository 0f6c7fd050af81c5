//! ffmpeg-based screen capture.
//!
//! The capture process grabs the desktop with the platform's ffmpeg input
//! device, encodes MPEG-1 video and pushes it over HTTP to the relay's
//! ingest endpoint.  Its stdio is detached; only the exit status is observed.

use std::process::{Child, Command, Stdio};

use crate::application::supervise_capture::{
    CaptureError, CaptureLauncher, CaptureProcess, CaptureRequest,
};

/// ffmpeg input device used to grab the desktop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaptureSource {
    /// Windows GDI desktop grabber.
    Gdigrab,
    /// X11 grabber on the given display (e.g. `:0`).
    X11grab { display: String },
    /// macOS AVFoundation, first screen device.
    Avfoundation,
}

impl CaptureSource {
    /// The grabber for the platform the host was built for.
    pub fn native() -> Self {
        if cfg!(target_os = "windows") {
            CaptureSource::Gdigrab
        } else if cfg!(target_os = "macos") {
            CaptureSource::Avfoundation
        } else {
            CaptureSource::X11grab {
                display: std::env::var("DISPLAY").unwrap_or_else(|_| ":0".to_string()),
            }
        }
    }

    fn input_args(&self, request: &CaptureRequest) -> Vec<String> {
        let size = request.screen.to_string();
        let rate = request.frame_rate.to_string();
        let (size, rate) = (size.as_str(), rate.as_str());

        let args: Vec<&str> = match self {
            CaptureSource::Gdigrab => vec![
                "-f", "gdigrab", "-draw_mouse", "1", "-show_region", "1", "-framerate", rate,
                "-video_size", size, "-i", "desktop",
            ],
            CaptureSource::X11grab { display } => vec![
                "-f", "x11grab", "-draw_mouse", "1", "-framerate", rate, "-video_size", size,
                "-i", display.as_str(),
            ],
            CaptureSource::Avfoundation => vec![
                "-f", "avfoundation", "-capture_cursor", "1", "-framerate", rate, "-i",
                "1:none",
            ],
        };
        args.into_iter().map(str::to_string).collect()
    }
}

/// Full ffmpeg argument list for `request` grabbed from `source`.
pub fn capture_args(source: &CaptureSource, request: &CaptureRequest) -> Vec<String> {
    let mut args = source.input_args(request);
    if *source == CaptureSource::Avfoundation {
        args.push("-vf".to_string());
        args.push(format!(
            "scale={}:{}",
            request.screen.width(),
            request.screen.height()
        ));
    }
    args.extend([
        "-f".to_string(),
        "mpeg1video".to_string(),
        "-b:v".to_string(),
        format!("{}k", request.bitrate_kbps),
        request.destination.clone(),
    ]);
    args
}

/// Launches ffmpeg as a detached child process.
pub struct FfmpegLauncher {
    program: String,
    source: CaptureSource,
}

impl FfmpegLauncher {
    pub fn new(program: impl Into<String>, source: CaptureSource) -> Self {
        Self {
            program: program.into(),
            source,
        }
    }

    /// Launcher for `program` using the platform's native grabber.
    pub fn native(program: impl Into<String>) -> Self {
        Self::new(program, CaptureSource::native())
    }
}

impl CaptureLauncher for FfmpegLauncher {
    fn launch(&self, request: &CaptureRequest) -> Result<Box<dyn CaptureProcess>, CaptureError> {
        let args = capture_args(&self.source, request);
        tracing::debug!("spawning {} {}", self.program, args.join(" "));

        let child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|source| CaptureError::Launch {
                program: self.program.clone(),
                source,
            })?;

        Ok(Box::new(ChildProcess { child }))
    }
}

struct ChildProcess {
    child: Child,
}

impl CaptureProcess for ChildProcess {
    fn id(&self) -> Option<u32> {
        Some(self.child.id())
    }

    fn kill(&mut self) -> std::io::Result<()> {
        // An already exited child makes kill() fail with InvalidInput; reaping
        // it still counts as stopped.
        if self.child.try_wait()?.is_none() {
            self.child.kill()?;
        }
        self.child.wait()?;
        Ok(())
    }

    fn try_exit_status(&mut self) -> std::io::Result<Option<String>> {
        Ok(self.child.try_wait()?.map(|status| status.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cloudpc_core::ScreenSize;

    fn request() -> CaptureRequest {
        CaptureRequest {
            screen: ScreenSize::new(1920, 1080).unwrap(),
            frame_rate: 30,
            bitrate_kbps: 2048,
            destination: "http://relay.test:8082/42".to_string(),
        }
    }

    #[test]
    fn test_gdigrab_args() {
        let args = capture_args(&CaptureSource::Gdigrab, &request());
        assert_eq!(
            args.join(" "),
            "-f gdigrab -draw_mouse 1 -show_region 1 -framerate 30 -video_size 1920x1080 \
             -i desktop -f mpeg1video -b:v 2048k http://relay.test:8082/42"
        );
    }

    #[test]
    fn test_x11grab_uses_display() {
        let source = CaptureSource::X11grab { display: ":1".to_string() };

        let args = capture_args(&source, &request());

        assert_eq!(
            args.join(" "),
            "-f x11grab -draw_mouse 1 -framerate 30 -video_size 1920x1080 -i :1 \
             -f mpeg1video -b:v 2048k http://relay.test:8082/42"
        );
    }

    #[test]
    fn test_avfoundation_scales_to_screen() {
        let args = capture_args(&CaptureSource::Avfoundation, &request());
        let joined = args.join(" ");
        assert!(joined.contains("-i 1:none -vf scale=1920:1080"));
        assert!(joined.ends_with("-b:v 2048k http://relay.test:8082/42"));
    }

    #[test]
    fn test_destination_is_last_argument() {
        let args = capture_args(&CaptureSource::native(), &request());
        assert_eq!(args.last().map(String::as_str), Some("http://relay.test:8082/42"));
    }

    #[test]
    fn test_missing_program_is_a_launch_error() {
        // Arrange
        let launcher = FfmpegLauncher::new(
            "cloudpc-host-test-no-such-capture-program",
            CaptureSource::Gdigrab,
        );

        // Act
        let result = launcher.launch(&request());

        // Assert
        match result {
            Err(CaptureError::Launch { program, source }) => {
                assert_eq!(program, "cloudpc-host-test-no-such-capture-program");
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("launch of a missing program succeeded"),
        }
    }
}
