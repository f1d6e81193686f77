//! Writing the computed anchor onto the tethered element.

use crate::{RenderCapabilities, TetherHost};
use anyhow::Result;
use dom::NodeKey;
use tether_layout::PagePoint;

/// CSS pixel length in its shortest decimal form (`10px`, `10.5px`).
pub fn px(value: f64) -> String {
    // -0 prints as 0
    let normalized = value + 0.0;
    format!("{normalized}px")
}

/// Move `root` to `anchor`: a translate transform when the page supports it,
/// `left`/`top` offsets otherwise.
///
/// # Errors
/// Returns an error if the host rejects a style write.
pub fn apply_position<H: TetherHost + ?Sized>(
    host: &mut H,
    root: NodeKey,
    anchor: PagePoint,
    capabilities: RenderCapabilities,
) -> Result<()> {
    if capabilities.transforms_supported {
        let transform = format!("translate({}, {})", px(anchor.x), px(anchor.y));
        host.set_style(root, "transform", &transform)
    } else {
        host.set_style(root, "left", &px(anchor.x))?;
        host.set_style(root, "top", &px(anchor.y))
    }
}
