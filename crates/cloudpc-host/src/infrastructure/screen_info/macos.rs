//! macOS main display size via Core Graphics.
//!
//! `pixels_wide/high` report physical pixels, which is what avfoundation
//! captures on Retina displays.

use cloudpc_core::ScreenSize;
use core_graphics::display::CGDisplay;

use super::{screen_size_from, PlatformScreenProbe, ScreenInfoError};

#[derive(Default)]
pub struct MacosScreenProbe;

impl MacosScreenProbe {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformScreenProbe for MacosScreenProbe {
    fn primary_screen_size(&self) -> Result<ScreenSize, ScreenInfoError> {
        let main = CGDisplay::main();
        let width = i64::try_from(main.pixels_wide())
            .map_err(|e| ScreenInfoError::PlatformError(e.to_string()))?;
        let height = i64::try_from(main.pixels_high())
            .map_err(|e| ScreenInfoError::PlatformError(e.to_string()))?;
        screen_size_from(width, height)
    }
}
