//! Windows primary screen size via `GetSystemMetrics`.

use cloudpc_core::ScreenSize;
use windows::Win32::UI::WindowsAndMessaging::{GetSystemMetrics, SM_CXSCREEN, SM_CYSCREEN};

use super::{screen_size_from, PlatformScreenProbe, ScreenInfoError};

/// Reads `SM_CXSCREEN` x `SM_CYSCREEN` of the primary monitor.
#[derive(Default)]
pub struct WindowsScreenProbe;

impl WindowsScreenProbe {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformScreenProbe for WindowsScreenProbe {
    fn primary_screen_size(&self) -> Result<ScreenSize, ScreenInfoError> {
        // SAFETY: GetSystemMetrics has no preconditions; it returns 0 on failure.
        let (width, height) =
            unsafe { (GetSystemMetrics(SM_CXSCREEN), GetSystemMetrics(SM_CYSCREEN)) };

        if width == 0 || height == 0 {
            return Err(ScreenInfoError::PlatformError(format!(
                "GetSystemMetrics returned {width}x{height}"
            )));
        }
        screen_size_from(i64::from(width), i64::from(height))
    }
}
