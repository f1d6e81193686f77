//! Measuring the tether, the content and the viewport through the host.

use crate::TetherHost;
use anyhow::Result;
use dom::{NodeKey, offset_chain};
use tether_layout::{ContentSize, TetherBounds, ViewportSize};

/// On-screen and on-page bounds of `tether`.
///
/// The screen position comes from the bounding client rect; the page position
/// sums `offset_left`/`offset_top` along the offset-parent chain.
///
/// # Errors
/// Returns an error if the host cannot measure a node in the chain, or the
/// chain does not terminate within [`dom::MAX_OFFSET_DEPTH`] hops.
pub fn tether_bounds<H: TetherHost + ?Sized>(host: &H, tether: NodeKey) -> Result<TetherBounds> {
    let rect = host.bounding_client_rect(tether)?;
    let (x, y) = page_offset(host, tether)?;
    Ok(TetherBounds {
        screen_x: rect.x,
        screen_y: rect.y,
        x,
        y,
        width: rect.width,
        height: rect.height,
    })
}

/// Document-relative position of `node`.
///
/// # Errors
/// See [`tether_bounds`].
pub fn page_offset<H: TetherHost + ?Sized>(host: &H, node: NodeKey) -> Result<(f64, f64)> {
    offset_chain(node, |key| host.layout_box(key))
}

/// Size of the tethered content: the first element child of `root`.
///
/// On high-density displays the precise bounding rect is used, elsewhere the
/// cheaper rounded scroll size. Missing content measures as zero.
///
/// # Errors
/// Returns an error if the host cannot measure `root` or its child.
pub fn content_size<H: TetherHost + ?Sized>(host: &H, root: NodeKey) -> Result<ContentSize> {
    let Some(content) = host.first_element_child(root)? else {
        return Ok(ContentSize::ZERO);
    };
    if host.device_pixel_ratio() > 1.0 {
        let bounds = host.bounding_client_rect(content)?;
        Ok(ContentSize::new(bounds.width, bounds.height))
    } else {
        let layout = host.layout_box(content)?;
        Ok(ContentSize::new(layout.scroll_width, layout.scroll_height))
    }
}

/// Inner size of the host window.
pub fn viewport_size<H: TetherHost + ?Sized>(host: &H) -> ViewportSize {
    let viewport = host.viewport();
    ViewportSize::new(viewport.width, viewport.height)
}
