//! Box geometry: client rectangles, the viewport and offset layout boxes.

use crate::NodeKey;
use serde::{Deserialize, Serialize};

/// A rectangle in CSS pixels, as returned by a bounding-client-rect query.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DomRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl DomRect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// The visible on-screen area of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Inner width of the window.
    pub width: f64,
    /// Inner height of the window.
    pub height: f64,
    /// Horizontal document scroll.
    pub scroll_x: f64,
    /// Vertical document scroll.
    pub scroll_y: f64,
}

impl Viewport {
    /// Create an unscrolled viewport.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    /// Return a copy scrolled to the given document position.
    #[must_use]
    pub const fn scrolled_to(self, scroll_x: f64, scroll_y: f64) -> Self {
        Self {
            scroll_x,
            scroll_y,
            ..self
        }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

/// Box geometry of an element as exposed through the offset-* and scroll-* properties.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutBox {
    /// Offset from the offset parent's left padding edge.
    pub offset_left: f64,
    /// Offset from the offset parent's top padding edge.
    pub offset_top: f64,
    /// The nearest positioned ancestor, `None` for the document body.
    pub offset_parent: Option<NodeKey>,
    /// Border-box width.
    pub width: f64,
    /// Border-box height.
    pub height: f64,
    /// Rounded width of the content including overflow.
    pub scroll_width: f64,
    /// Rounded height of the content including overflow.
    pub scroll_height: f64,
}

impl LayoutBox {
    /// A box at the given offset with equal border and scroll sizes.
    ///
    /// Scroll sizes are rounded the way browsers report `scrollWidth`/`scrollHeight`.
    #[must_use]
    pub fn new(offset_left: f64, offset_top: f64, width: f64, height: f64) -> Self {
        Self {
            offset_left,
            offset_top,
            offset_parent: None,
            width,
            height,
            scroll_width: width.round(),
            scroll_height: height.round(),
        }
    }

    /// Set the offset parent.
    #[must_use]
    pub const fn with_offset_parent(mut self, parent: NodeKey) -> Self {
        self.offset_parent = Some(parent);
        self
    }

    /// Override the scroll sizes (content overflowing the border box).
    #[must_use]
    pub const fn with_scroll_size(mut self, scroll_width: f64, scroll_height: f64) -> Self {
        self.scroll_width = scroll_width;
        self.scroll_height = scroll_height;
        self
    }
}
