//! Host-side DOM model used by tethered elements.
//! This crate centralizes the node keys, the DOM update model, event
//! subscription and an in-memory document with box geometry, so elements can
//! be driven headless and tested without a browser.

use serde::{Deserialize, Serialize};

/// Error types for DOM queries and event names.
pub mod error;
pub use error::DomError;

/// Rectangles, the viewport and layout boxes.
pub mod geometry;
pub use geometry::{DomRect, LayoutBox, Viewport};

/// Observed window events and the subscription interface.
pub mod events;
pub use events::{EventHub, EventTarget, EventType, ListenerCounts, ListenerId};

/// In-memory document with box geometry, attributes and inline styles.
pub mod document;
pub use document::{Document, MAX_OFFSET_DEPTH, offset_chain};

// ============================
// Stable Node keys
// ============================

/// A 64-bit stable key for DOM nodes.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeKey(pub u64);

impl NodeKey {
    /// The root node key (always present).
    pub const ROOT: Self = Self(0);
}

// ============================
// DOM Update model
// ============================

/// A batchable update applied to a document and recorded in its journal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DOMUpdate {
    /// Insert a new element under `parent` at child index `pos`.
    InsertElement {
        parent: NodeKey,
        node: NodeKey,
        tag: String,
        pos: usize,
    },
    /// Set an attribute on an element.
    SetAttr {
        node: NodeKey,
        name: String,
        value: String,
    },
    /// Set an inline style declaration on an element.
    SetStyle {
        node: NodeKey,
        property: String,
        value: String,
    },
    /// Replace the layout box of an element.
    SetBox { node: NodeKey, layout: LayoutBox },
    /// Remove an element and its descendants.
    RemoveNode { node: NodeKey },
}

impl DOMUpdate {
    /// The node this update targets.
    #[inline]
    pub const fn node(&self) -> NodeKey {
        match self {
            Self::InsertElement { node, .. }
            | Self::SetAttr { node, .. }
            | Self::SetStyle { node, .. }
            | Self::SetBox { node, .. }
            | Self::RemoveNode { node } => *node,
        }
    }
}

/// A subscriber that receives `DOMUpdate` values and mirrors them into its own state.
pub trait DOMSubscriber {
    /// Apply a single `DOMUpdate` to the subscriber state.
    ///
    /// # Errors
    /// Returns an error if the update references a node the subscriber does not know.
    fn apply_update(&mut self, update: DOMUpdate) -> anyhow::Result<()>;

    /// Apply a batch of updates in order, stopping at the first failure.
    ///
    /// # Errors
    /// Returns the first error reported by [`DOMSubscriber::apply_update`].
    fn apply_updates<I>(&mut self, updates: I) -> anyhow::Result<()>
    where
        I: IntoIterator<Item = DOMUpdate>,
        Self: Sized,
    {
        for update in updates {
            self.apply_update(update)?;
        }
        Ok(())
    }
}
