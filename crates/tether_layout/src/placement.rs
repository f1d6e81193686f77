//! Alignment decision and anchor computation.
//!
//! Horizontal: content extends to the right of the tether's left edge unless
//! that overflows the viewport and anchoring at the tether's right edge keeps
//! the content on screen. There is no further fallback: if both sides
//! overflow, the content stays left-aligned.
//!
//! Vertical: content opens below the tether unless the space left below is
//! under the configured minimum, in which case it opens above.

use crate::{Alignment, ContentSize, HorizontalAlign, TetherBounds, VerticalAlign, ViewportSize};
use serde::{Deserialize, Serialize};

/// Minimum space (px) below the tether for bottom alignment.
pub const DEFAULT_MIN_BOTTOM_SPACE: f64 = 120.0;

/// Border allowance (px) added by [`VerticalOverflowRule::ContentExtent`].
pub const BORDER_PX: f64 = 1.0;

/// How the space below the tether is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum VerticalOverflowRule {
    /// Space between the tether's bottom edge and the viewport bottom.
    #[default]
    TetherEdge,
    /// Space left after the content itself and a one-pixel border are placed below the tether.
    ContentExtent,
}

impl VerticalOverflowRule {
    /// Configuration name of the rule.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TetherEdge => "tether-edge",
            Self::ContentExtent => "content-extent",
        }
    }

    /// Parse a configuration name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "tether-edge" => Some(Self::TetherEdge),
            "content-extent" => Some(Self::ContentExtent),
            _ => None,
        }
    }

    /// Space (px) left below the tether under this rule; negative when overflowing.
    pub fn bottom_space(self, tether: &TetherBounds, content: ContentSize, viewport: ViewportSize) -> f64 {
        match self {
            Self::TetherEdge => viewport.height - tether.screen_bottom(),
            Self::ContentExtent => {
                viewport.height - (tether.screen_bottom() + content.height + BORDER_PX)
            }
        }
    }
}

/// Tunables of the vertical decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementOptions {
    pub min_bottom_space: f64,
    pub vertical_rule: VerticalOverflowRule,
}

impl Default for PlacementOptions {
    fn default() -> Self {
        Self {
            min_bottom_space: DEFAULT_MIN_BOTTOM_SPACE,
            vertical_rule: VerticalOverflowRule::default(),
        }
    }
}

/// A position relative to the document.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PagePoint {
    pub x: f64,
    pub y: f64,
}

/// Result of a placement: the chosen sides and the page-relative anchor.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Placement {
    pub alignment: Alignment,
    pub anchor: PagePoint,
}

/// Choose the horizontal side.
pub fn decide_horizontal(
    tether: &TetherBounds,
    content: ContentSize,
    viewport: ViewportSize,
) -> HorizontalAlign {
    let overflows_right = tether.screen_x + content.width > viewport.width;
    let fits_flipped = tether.screen_x + tether.width - content.width >= 0.0;
    if overflows_right && fits_flipped {
        HorizontalAlign::Right
    } else {
        HorizontalAlign::Left
    }
}

/// Choose the vertical side.
pub fn decide_vertical(
    tether: &TetherBounds,
    content: ContentSize,
    viewport: ViewportSize,
    options: PlacementOptions,
) -> VerticalAlign {
    let space = options.vertical_rule.bottom_space(tether, content, viewport);
    if space < options.min_bottom_space {
        VerticalAlign::Top
    } else {
        VerticalAlign::Bottom
    }
}

/// Page-relative anchor of the content for the given alignment.
pub fn anchor_point(tether: &TetherBounds, alignment: Alignment) -> PagePoint {
    let x = match alignment.horizontal {
        HorizontalAlign::Left => tether.x,
        HorizontalAlign::Right => tether.x + tether.width,
    };
    let y = match alignment.vertical {
        VerticalAlign::Top => tether.y,
        VerticalAlign::Bottom => tether.y + tether.height,
    };
    PagePoint { x, y }
}

/// Decide both sides and compute the anchor.
pub fn place(
    tether: &TetherBounds,
    content: ContentSize,
    viewport: ViewportSize,
    options: PlacementOptions,
) -> Placement {
    let alignment = Alignment::new(
        decide_horizontal(tether, content, viewport),
        decide_vertical(tether, content, viewport, options),
    );
    Placement {
        alignment,
        anchor: anchor_point(tether, alignment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tether() -> TetherBounds {
        TetherBounds {
            screen_x: 10.0,
            screen_y: 500.0,
            x: 10.0,
            y: 1300.0,
            width: 100.0,
            height: 30.0,
        }
    }

    /// Test the reference case: fits horizontally, too little space below.
    ///
    /// # Panics
    /// Panics if the content is not placed left/top at the tether's page position.
    #[test]
    fn left_top_near_viewport_bottom() {
        let placement = place(
            &sample_tether(),
            ContentSize::new(200.0, 50.0),
            ViewportSize::new(800.0, 600.0),
            PlacementOptions::default(),
        );
        assert_eq!(
            placement.alignment,
            Alignment::new(HorizontalAlign::Left, VerticalAlign::Top)
        );
        assert_eq!(placement.anchor, PagePoint { x: 10.0, y: 1300.0 });
    }

    /// Test that content overflowing both ways stays left-aligned.
    ///
    /// # Panics
    /// Panics if the horizontal decision flips although the flipped box is off screen.
    #[test]
    fn overflow_without_room_to_flip_stays_left() {
        let align = decide_horizontal(
            &sample_tether(),
            ContentSize::new(200.0, 50.0),
            ViewportSize::new(150.0, 600.0),
        );
        assert_eq!(align, HorizontalAlign::Left);
    }

    /// Test that overflow with room to flip aligns right and anchors at the right edge.
    ///
    /// # Panics
    /// Panics if the content is not anchored at the tether's right edge.
    #[test]
    fn overflow_with_room_flips_right() {
        let tether = TetherBounds::unscrolled(700.0, 100.0, 80.0, 20.0);
        let placement = place(
            &tether,
            ContentSize::new(150.0, 40.0),
            ViewportSize::new(800.0, 600.0),
            PlacementOptions::default(),
        );
        assert_eq!(
            placement.alignment,
            Alignment::new(HorizontalAlign::Right, VerticalAlign::Bottom)
        );
        assert_eq!(placement.anchor, PagePoint { x: 780.0, y: 120.0 });
    }

    /// Test the horizontal boundaries: exact fit stays left, exact flip goes right.
    ///
    /// # Panics
    /// Panics if either boundary is resolved the wrong way.
    #[test]
    fn horizontal_boundaries() {
        let viewport = ViewportSize::new(300.0, 600.0);
        let exact_fit = TetherBounds::unscrolled(100.0, 0.0, 50.0, 10.0);
        assert_eq!(
            decide_horizontal(&exact_fit, ContentSize::new(200.0, 10.0), viewport),
            HorizontalAlign::Left
        );
        let exact_flip = TetherBounds::unscrolled(150.0, 0.0, 50.0, 10.0);
        assert_eq!(
            decide_horizontal(&exact_flip, ContentSize::new(200.0, 10.0), viewport),
            HorizontalAlign::Right
        );
    }

    /// Test the vertical threshold and the configurable minimum.
    ///
    /// # Panics
    /// Panics if the threshold comparison is off.
    #[test]
    fn vertical_threshold() {
        let viewport = ViewportSize::new(800.0, 600.0);
        let content = ContentSize::new(10.0, 10.0);
        let exactly_enough = TetherBounds::unscrolled(0.0, 450.0, 10.0, 30.0);
        assert_eq!(
            decide_vertical(&exactly_enough, content, viewport, PlacementOptions::default()),
            VerticalAlign::Bottom
        );
        let tighter = PlacementOptions {
            min_bottom_space: 121.0,
            ..PlacementOptions::default()
        };
        assert_eq!(
            decide_vertical(&exactly_enough, content, viewport, tighter),
            VerticalAlign::Top
        );
        let below_viewport = TetherBounds::unscrolled(0.0, 900.0, 10.0, 30.0);
        assert_eq!(
            decide_vertical(&below_viewport, content, viewport, PlacementOptions::default()),
            VerticalAlign::Top
        );
    }

    /// Test that the content-extent rule accounts for the content height and border.
    ///
    /// # Panics
    /// Panics if the content-extent rule does not flip where the tether-edge rule does not.
    #[test]
    fn content_extent_rule() {
        let tether = TetherBounds::unscrolled(0.0, 300.0, 10.0, 30.0);
        let content = ContentSize::new(10.0, 150.0);
        let viewport = ViewportSize::new(800.0, 600.0);
        let extent = PlacementOptions {
            vertical_rule: VerticalOverflowRule::ContentExtent,
            ..PlacementOptions::default()
        };
        assert_eq!(
            decide_vertical(&tether, content, viewport, PlacementOptions::default()),
            VerticalAlign::Bottom
        );
        assert_eq!(
            decide_vertical(&tether, content, viewport, extent),
            VerticalAlign::Top
        );
        assert_eq!(
            VerticalOverflowRule::from_name(" Content-Extent "),
            Some(VerticalOverflowRule::ContentExtent)
        );
        assert_eq!(VerticalOverflowRule::from_name("flip"), None);
    }

    /// Test that every rule round-trips through its configuration name.
    ///
    /// # Panics
    /// Panics if a rule name does not parse back or the serde name differs.
    #[test]
    fn rule_names_match_serde() -> Result<(), serde_json::Error> {
        for rule in [VerticalOverflowRule::TetherEdge, VerticalOverflowRule::ContentExtent] {
            assert_eq!(VerticalOverflowRule::from_name(rule.as_str()), Some(rule));
            assert_eq!(serde_json::to_string(&rule)?, format!("\"{}\"", rule.as_str()));
        }
        Ok(())
    }
}
