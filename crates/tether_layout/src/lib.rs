//! Tethered content placement.
//!
//! Decides which side of a tether element floating content is anchored to and
//! where that anchor sits on the page. The decision is pure: callers measure
//! the tether, the content and the viewport, and apply the result themselves.

pub mod align;
pub mod bounds;
pub mod placement;

pub use align::{Alignment, HorizontalAlign, VerticalAlign};
pub use bounds::{ContentSize, TetherBounds, ViewportSize};
pub use placement::{
    BORDER_PX, DEFAULT_MIN_BOTTOM_SPACE, PagePoint, Placement, PlacementOptions,
    VerticalOverflowRule, anchor_point, decide_horizontal, decide_vertical, place,
};
