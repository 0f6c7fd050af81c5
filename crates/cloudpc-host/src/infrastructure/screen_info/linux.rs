//! Linux primary screen size via Xlib.
//!
//! Uses the default X screen of the display named by `DISPLAY`.  Without
//! Xrandr this is the whole X screen, which matches what `x11grab` captures.

use cloudpc_core::ScreenSize;
use x11::xlib;

use super::{screen_size_from, PlatformScreenProbe, ScreenInfoError};

#[derive(Default)]
pub struct LinuxScreenProbe;

impl LinuxScreenProbe {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformScreenProbe for LinuxScreenProbe {
    fn primary_screen_size(&self) -> Result<ScreenSize, ScreenInfoError> {
        // SAFETY: a null name makes Xlib use $DISPLAY.  The returned pointer is
        // released with XCloseDisplay below.
        let display = unsafe { xlib::XOpenDisplay(std::ptr::null()) };
        if display.is_null() {
            let display_env = std::env::var("DISPLAY").unwrap_or_else(|_| "<unset>".to_string());
            return Err(ScreenInfoError::PlatformError(format!(
                "XOpenDisplay failed; DISPLAY={display_env}"
            )));
        }

        // SAFETY: `display` is a valid non-null pointer from XOpenDisplay.
        let (width, height) = unsafe {
            let screen = xlib::XDefaultScreen(display);
            let size = (
                xlib::XDisplayWidth(display, screen),
                xlib::XDisplayHeight(display, screen),
            );
            xlib::XCloseDisplay(display);
            size
        };

        screen_size_from(i64::from(width), i64::from(height))
    }
}
