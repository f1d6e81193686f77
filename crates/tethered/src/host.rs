//! Host interface.
//!
//! A tethered element never touches a concrete page type. Everything it reads
//! (geometry, window state) and writes (attributes, inline styles, event
//! subscriptions) goes through [`TetherHost`], so any page model can host it.

use anyhow::Result;
use dom::{Document, DomRect, EventTarget, LayoutBox, NodeKey, Viewport};

/// Page services a tethered element depends on.
pub trait TetherHost: EventTarget {
    /// Border box of `node` relative to the viewport.
    ///
    /// # Errors
    /// Returns an error if `node` cannot be measured.
    fn bounding_client_rect(&self, node: NodeKey) -> Result<DomRect>;

    /// Offset and scroll geometry of `node`.
    ///
    /// # Errors
    /// Returns an error if `node` cannot be measured.
    fn layout_box(&self, node: NodeKey) -> Result<LayoutBox>;

    /// First element child of `node`, if any.
    ///
    /// # Errors
    /// Returns an error if `node` is not in the page.
    fn first_element_child(&self, node: NodeKey) -> Result<Option<NodeKey>>;

    /// Current window size and scroll position.
    fn viewport(&self) -> Viewport;

    /// Ratio between physical and CSS pixels.
    fn device_pixel_ratio(&self) -> f64;

    /// Whether inline style `property` is understood by the page's style engine.
    fn supports_style_property(&self, property: &str) -> bool;

    /// Set attribute `name` on `node`.
    ///
    /// # Errors
    /// Returns an error if the write is rejected.
    fn set_attribute(&mut self, node: NodeKey, name: &str, value: &str) -> Result<()>;

    /// Set inline style `property` on `node`.
    ///
    /// # Errors
    /// Returns an error if the write is rejected.
    fn set_style(&mut self, node: NodeKey, property: &str, value: &str) -> Result<()>;
}

impl TetherHost for Document {
    fn bounding_client_rect(&self, node: NodeKey) -> Result<DomRect> {
        Self::bounding_client_rect(self, node)
    }

    fn layout_box(&self, node: NodeKey) -> Result<LayoutBox> {
        self.layout(node)
    }

    fn first_element_child(&self, node: NodeKey) -> Result<Option<NodeKey>> {
        Self::first_element_child(self, node)
    }

    fn viewport(&self) -> Viewport {
        Self::viewport(self)
    }

    fn device_pixel_ratio(&self) -> f64 {
        Self::device_pixel_ratio(self)
    }

    fn supports_style_property(&self, property: &str) -> bool {
        Self::supports_style_property(self, property)
    }

    fn set_attribute(&mut self, node: NodeKey, name: &str, value: &str) -> Result<()> {
        Self::set_attribute(self, node, name, value)
    }

    fn set_style(&mut self, node: NodeKey, property: &str, value: &str) -> Result<()> {
        Self::set_style(self, node, property, value)
    }
}
