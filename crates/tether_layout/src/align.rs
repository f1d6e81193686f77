//! Alignment enumerations.

use core::fmt;

/// Side of the tether the content's left edge is anchored to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HorizontalAlign {
    /// Content starts at the tether's left edge and extends right.
    #[default]
    Left,
    /// Content is anchored at the tether's right edge and extends left.
    Right,
}

impl HorizontalAlign {
    /// Value reported in the `data-horizontal-align` attribute.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }
}

impl fmt::Display for HorizontalAlign {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Side of the tether the content is anchored to vertically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VerticalAlign {
    /// Anchored at the tether's top edge, content opens upwards.
    Top,
    /// Anchored at the tether's bottom edge, content opens downwards.
    #[default]
    Bottom,
}

impl VerticalAlign {
    /// Value reported in the `data-vertical-align` attribute.
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Bottom => "bottom",
        }
    }
}

impl fmt::Display for VerticalAlign {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Both axis choices together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Alignment {
    pub horizontal: HorizontalAlign,
    pub vertical: VerticalAlign,
}

impl Alignment {
    #[must_use]
    pub const fn new(horizontal: HorizontalAlign, vertical: VerticalAlign) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}/{}", self.horizontal, self.vertical)
    }
}
