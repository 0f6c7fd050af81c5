//! Pointer Coordinate Mapper.
//!
//! The guest reports pointer positions in pixels of the host screen as the
//! guest sees it (the same size the host advertised in `connect-host`).
//! Absolute injection uses a fixed `[0, 65535]` range on both axes whatever
//! the physical resolution, so each axis is scaled by `65535 / extent`.
//!
//! Positions outside the screen are clamped to the edge.  The fractional part
//! is truncated, so the centre of a 1920×1080 screen maps to `(32767, 32767)`.

use serde::{Deserialize, Serialize};

/// Upper bound of the absolute injection coordinate space.
pub const ABSOLUTE_MAX: u16 = u16::MAX;

/// Physical size of the host's primary screen in pixels.
///
/// Both dimensions are non-zero; use [`ScreenSize::new`] to construct one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScreenSize {
    width: u32,
    height: u32,
}

impl ScreenSize {
    /// Returns `None` if either dimension is zero.
    pub fn new(width: u32, height: u32) -> Option<Self> {
        (width > 0 && height > 0).then_some(Self { width, height })
    }

    pub fn width(self) -> u32 {
        self.width
    }

    pub fn height(self) -> u32 {
        self.height
    }
}

impl std::fmt::Display for ScreenSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A point in the absolute injection coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AbsolutePoint {
    pub x: u16,
    pub y: u16,
}

/// Maps a guest-reported pixel position to absolute injection coordinates.
///
/// `x = 0` maps to `0` and `x = width` maps to [`ABSOLUTE_MAX`]; the mapping
/// is monotonic in between.
pub fn map_to_absolute(x: f64, y: f64, screen: ScreenSize) -> AbsolutePoint {
    AbsolutePoint {
        x: scale_axis(x, screen.width),
        y: scale_axis(y, screen.height),
    }
}

fn scale_axis(value: f64, extent: u32) -> u16 {
    let max = f64::from(ABSOLUTE_MAX);
    let scaled = max * value / f64::from(extent);
    // NaN fails both comparisons in clamp and would survive it.
    if scaled.is_nan() {
        return 0;
    }
    scaled.clamp(0.0, max) as u16
}
