//! Measured inputs of the placement decision.

/// On-screen and on-page location of the tether, with its size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TetherBounds {
    /// Left edge relative to the viewport.
    pub screen_x: f64,
    /// Top edge relative to the viewport.
    pub screen_y: f64,
    /// Left edge relative to the document.
    pub x: f64,
    /// Top edge relative to the document.
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl TetherBounds {
    /// Bounds of a tether whose page and screen positions coincide (unscrolled document).
    #[must_use]
    pub const fn unscrolled(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            screen_x: x,
            screen_y: y,
            x,
            y,
            width,
            height,
        }
    }

    /// Viewport-relative bottom edge.
    #[inline]
    pub fn screen_bottom(&self) -> f64 {
        self.screen_y + self.height
    }
}

/// Size of the tethered content.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContentSize {
    pub width: f64,
    pub height: f64,
}

impl ContentSize {
    /// Missing content measures as zero.
    pub const ZERO: Self = Self::new(0.0, 0.0);

    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Inner size of the window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportSize {
    pub width: f64,
    pub height: f64,
}

impl ViewportSize {
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}
