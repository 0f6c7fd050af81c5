//! Primary screen size probing.
//!
//! The host announces its physical resolution in `connect-host`, scales
//! guest pointer positions against it, and tells the capture process what
//! area to grab.  It is read once at startup.
//!
//! # Platform implementations
//!
//! Each platform implements [`PlatformScreenProbe`]; the correct one is
//! selected at compile time and re-exported as `NativeScreenProbe`:
//!
//! | Module    | OS      | API used                                   |
//! |-----------|---------|--------------------------------------------|
//! | `windows` | Windows | `GetSystemMetrics(SM_CXSCREEN/SM_CYSCREEN)` |
//! | `linux`   | Linux   | `XOpenDisplay` + `XDisplayWidth/Height`    |
//! | `macos`   | macOS   | `CGDisplay::main()` pixel size             |
//!
//! [`FixedScreenProbe`] is always compiled so tests run without a display.

use cloudpc_core::ScreenSize;
use thiserror::Error;

/// Error type for screen probing.
#[derive(Debug, Error)]
pub enum ScreenInfoError {
    /// The platform API call failed, e.g. "XOpenDisplay failed; DISPLAY=<unset>".
    #[error("platform API error while reading the screen size: {0}")]
    PlatformError(String),

    /// The platform reported a screen with no pixels.
    #[error("primary screen reported an empty size ({width}x{height})")]
    EmptyScreen { width: i64, height: i64 },
}

/// Reads the physical size of the primary screen.
pub trait PlatformScreenProbe: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ScreenInfoError`] if the OS query fails or reports an empty
    /// screen.
    fn primary_screen_size(&self) -> Result<ScreenSize, ScreenInfoError>;
}

/// Converts raw platform dimensions, rejecting zero or negative sizes.
pub(crate) fn screen_size_from(width: i64, height: i64) -> Result<ScreenSize, ScreenInfoError> {
    let size = u32::try_from(width)
        .ok()
        .zip(u32::try_from(height).ok())
        .and_then(|(w, h)| ScreenSize::new(w, h));
    size.ok_or(ScreenInfoError::EmptyScreen { width, height })
}

#[cfg(target_os = "windows")]
pub mod windows;

#[cfg(target_os = "windows")]
pub use windows::WindowsScreenProbe as NativeScreenProbe;

#[cfg(target_os = "linux")]
pub mod linux;

#[cfg(target_os = "linux")]
pub use linux::LinuxScreenProbe as NativeScreenProbe;

#[cfg(target_os = "macos")]
pub mod macos;

#[cfg(target_os = "macos")]
pub use macos::MacosScreenProbe as NativeScreenProbe;

/// A probe that always reports the size it was built with.
pub struct FixedScreenProbe {
    pub size: ScreenSize,
}

impl FixedScreenProbe {
    pub fn new(size: ScreenSize) -> Self {
        Self { size }
    }
}

impl PlatformScreenProbe for FixedScreenProbe {
    fn primary_screen_size(&self) -> Result<ScreenSize, ScreenInfoError> {
        Ok(self.size)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_probe_returns_its_size() {
        let size = ScreenSize::new(2560, 1440).unwrap();
        let probe = FixedScreenProbe::new(size);
        assert_eq!(probe.primary_screen_size().unwrap(), size);
    }

    #[test]
    fn test_screen_size_from_accepts_positive_dimensions() {
        let size = screen_size_from(1920, 1080).unwrap();
        assert_eq!((size.width(), size.height()), (1920, 1080));
    }

    #[test]
    fn test_screen_size_from_rejects_zero_and_negative() {
        assert!(matches!(
            screen_size_from(0, 1080),
            Err(ScreenInfoError::EmptyScreen { width: 0, height: 1080 })
        ));
        assert!(screen_size_from(1920, -1).is_err());
    }
}
