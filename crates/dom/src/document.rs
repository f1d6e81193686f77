//! In-memory document.
//!
//! Holds the element tree, per-element attributes, inline style declarations
//! and box geometry, plus the window state (viewport, scroll, device pixel
//! ratio) and the window event subscriptions. Every mutation is recorded as a
//! [`DOMUpdate`] in the journal so callers can observe exactly what was written.

use crate::{
    DOMSubscriber, DOMUpdate, DomError, DomRect, EventHub, EventTarget, EventType, LayoutBox,
    ListenerId, NodeKey, Viewport,
};
use anyhow::Result;
use std::collections::{BTreeMap, HashMap};

/// Upper bound on offset-parent hops before the chain is treated as cyclic.
pub const MAX_OFFSET_DEPTH: usize = 1024;

/// Sum `offset_left`/`offset_top` from `node` up its offset-parent chain.
///
/// `layout_of` resolves the box of each node on the way; its errors are
/// returned unchanged.
///
/// # Errors
/// Returns [`DomError::OffsetParentCycle`] if the chain is longer than
/// [`MAX_OFFSET_DEPTH`].
pub fn offset_chain<F>(node: NodeKey, mut layout_of: F) -> Result<(f64, f64)>
where
    F: FnMut(NodeKey) -> Result<LayoutBox>,
{
    let mut x = 0.0;
    let mut y = 0.0;
    let mut container = Some(node);
    for _ in 0..MAX_OFFSET_DEPTH {
        let Some(key) = container else {
            return Ok((x, y));
        };
        let layout = layout_of(key)?;
        x += layout.offset_left;
        y += layout.offset_top;
        container = layout.offset_parent;
    }
    match container {
        None => Ok((x, y)),
        Some(_) => Err(DomError::OffsetParentCycle(node).into()),
    }
}

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    parent: Option<NodeKey>,
    children: Vec<NodeKey>,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<String, String>,
    layout: LayoutBox,
}

impl Node {
    fn new(tag: &str, parent: Option<NodeKey>) -> Self {
        Self {
            tag: tag.to_ascii_lowercase(),
            parent,
            children: Vec::new(),
            attributes: BTreeMap::new(),
            styles: BTreeMap::new(),
            layout: LayoutBox::default(),
        }
    }
}

/// A headless page: element tree, geometry and window state.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: HashMap<NodeKey, Node>,
    next_key: u64,
    viewport: Viewport,
    device_pixel_ratio: f64,
    transforms_enabled: bool,
    events: EventHub,
    journal: Vec<DOMUpdate>,
}

impl Document {
    /// Create an empty document showing `viewport`.
    #[must_use]
    pub fn new(viewport: Viewport) -> Self {
        let mut nodes = HashMap::new();
        nodes.insert(NodeKey::ROOT, Node::new("#document", None));
        Self {
            nodes,
            next_key: 1,
            viewport,
            device_pixel_ratio: 1.0,
            transforms_enabled: true,
            events: EventHub::new(),
            journal: Vec::new(),
        }
    }

    /// Emulate a style engine without CSS transforms.
    #[must_use]
    pub fn without_transforms(mut self) -> Self {
        self.transforms_enabled = false;
        self
    }

    fn node(&self, key: NodeKey) -> Result<&Node, DomError> {
        self.nodes.get(&key).ok_or(DomError::UnknownNode(key))
    }

    fn node_mut(&mut self, key: NodeKey) -> Result<&mut Node, DomError> {
        self.nodes.get_mut(&key).ok_or(DomError::UnknownNode(key))
    }

    /// Whether `key` is in the document.
    pub fn contains(&self, key: NodeKey) -> bool {
        self.nodes.contains_key(&key)
    }

    /// Whether only the document root is present.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    // ============================
    // Tree mutation
    // ============================

    /// Insert an element with an explicit key under `parent` at child index `pos`.
    ///
    /// # Errors
    /// Returns an error if `parent` is unknown or `node` is already present.
    pub fn insert_element(
        &mut self,
        parent: NodeKey,
        node: NodeKey,
        tag: &str,
        pos: usize,
    ) -> Result<()> {
        if self.nodes.contains_key(&node) {
            return Err(DomError::DuplicateNode(node).into());
        }
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(DomError::UnknownParent(parent))?;
        let index = pos.min(parent_node.children.len());
        parent_node.children.insert(index, node);
        self.nodes.insert(node, Node::new(tag, Some(parent)));
        self.next_key = self.next_key.max(node.0.saturating_add(1));
        self.journal.push(DOMUpdate::InsertElement {
            parent,
            node,
            tag: tag.to_owned(),
            pos: index,
        });
        Ok(())
    }

    /// Append a new element with a freshly minted key and the given box.
    ///
    /// # Errors
    /// Returns an error if `parent` is unknown.
    pub fn append_element(&mut self, parent: NodeKey, tag: &str, layout: LayoutBox) -> Result<NodeKey> {
        let node = NodeKey(self.next_key);
        let pos = self.node(parent)?.children.len();
        self.insert_element(parent, node, tag, pos)?;
        self.set_layout(node, layout)?;
        Ok(node)
    }

    /// Remove `node` and all of its descendants.
    ///
    /// # Errors
    /// Returns an error if `node` is unknown or is the document root.
    pub fn remove_node(&mut self, node: NodeKey) -> Result<()> {
        if node == NodeKey::ROOT {
            return Err(DomError::UnknownNode(node).into());
        }
        let parent = self.node(node)?.parent;
        if let Some(parent_key) = parent
            && let Some(parent_node) = self.nodes.get_mut(&parent_key)
        {
            parent_node.children.retain(|child| *child != node);
        }
        self.remove_recursively(node);
        self.journal.push(DOMUpdate::RemoveNode { node });
        Ok(())
    }

    fn remove_recursively(&mut self, node: NodeKey) {
        if let Some(removed) = self.nodes.remove(&node) {
            for child in removed.children {
                self.remove_recursively(child);
            }
        }
    }

    /// Replace the layout box of `node`.
    ///
    /// # Errors
    /// Returns an error if `node` is unknown.
    pub fn set_layout(&mut self, node: NodeKey, layout: LayoutBox) -> Result<()> {
        self.node_mut(node)?.layout = layout;
        self.journal.push(DOMUpdate::SetBox { node, layout });
        Ok(())
    }

    /// Layout box of `node`.
    ///
    /// # Errors
    /// Returns an error if `node` is unknown.
    pub fn layout(&self, node: NodeKey) -> Result<LayoutBox> {
        Ok(self.node(node)?.layout)
    }

    // ============================
    // Attributes and styles
    // ============================

    /// Lowercase tag name of `node`.
    pub fn tag(&self, node: NodeKey) -> Option<&str> {
        self.nodes.get(&node).map(|found| found.tag.as_str())
    }

    /// Current value of attribute `name`.
    pub fn attribute(&self, node: NodeKey, name: &str) -> Option<&str> {
        self.nodes
            .get(&node)
            .and_then(|found| found.attributes.get(name))
            .map(String::as_str)
    }

    /// Set attribute `name` to `value`.
    ///
    /// # Errors
    /// Returns an error if `node` is unknown.
    pub fn set_attribute(&mut self, node: NodeKey, name: &str, value: &str) -> Result<()> {
        self.node_mut(node)?
            .attributes
            .insert(name.to_owned(), value.to_owned());
        self.journal.push(DOMUpdate::SetAttr {
            node,
            name: name.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    /// Current inline value of style `property`.
    pub fn style(&self, node: NodeKey, property: &str) -> Option<&str> {
        self.nodes
            .get(&node)
            .and_then(|found| found.styles.get(property))
            .map(String::as_str)
    }

    /// Set inline style `property` to `value`.
    ///
    /// # Errors
    /// Returns an error if `node` is unknown.
    pub fn set_style(&mut self, node: NodeKey, property: &str, value: &str) -> Result<()> {
        self.node_mut(node)?
            .styles
            .insert(property.to_owned(), value.to_owned());
        self.journal.push(DOMUpdate::SetStyle {
            node,
            property: property.to_owned(),
            value: value.to_owned(),
        });
        Ok(())
    }

    /// Whether the style engine accepts `property` as an inline declaration.
    pub fn supports_style_property(&self, property: &str) -> bool {
        property != "transform" || self.transforms_enabled
    }

    // ============================
    // Geometry
    // ============================

    /// First element child of `node`, if any.
    ///
    /// # Errors
    /// Returns an error if `node` is unknown.
    pub fn first_element_child(&self, node: NodeKey) -> Result<Option<NodeKey>> {
        Ok(self.node(node)?.children.first().copied())
    }

    /// Position of `node` relative to the document, summing the offset-parent chain.
    ///
    /// # Errors
    /// Returns an error if a node in the chain is unknown or the chain does not terminate.
    pub fn page_offset(&self, node: NodeKey) -> Result<(f64, f64)> {
        offset_chain(node, |key| self.layout(key))
    }

    /// Border box of `node` relative to the viewport.
    ///
    /// # Errors
    /// Returns an error if `node` or a node in its offset chain is unknown.
    pub fn bounding_client_rect(&self, node: NodeKey) -> Result<DomRect> {
        let layout = self.node(node)?.layout;
        let (page_x, page_y) = self.page_offset(node)?;
        Ok(DomRect::new(
            page_x - self.viewport.scroll_x,
            page_y - self.viewport.scroll_y,
            layout.width,
            layout.height,
        ))
    }

    // ============================
    // Window state
    // ============================

    #[inline]
    pub const fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Resize the window, keeping the scroll position.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    /// Scroll the document to the given position.
    pub fn scroll_to(&mut self, scroll_x: f64, scroll_y: f64) {
        self.viewport = self.viewport.scrolled_to(scroll_x, scroll_y);
    }

    #[inline]
    pub const fn device_pixel_ratio(&self) -> f64 {
        self.device_pixel_ratio
    }

    pub fn set_device_pixel_ratio(&mut self, ratio: f64) {
        self.device_pixel_ratio = ratio;
    }

    /// Window event subscriptions.
    #[inline]
    pub const fn events(&self) -> &EventHub {
        &self.events
    }

    // ============================
    // Journal
    // ============================

    /// Mutations recorded since the journal was last drained.
    pub fn journal(&self) -> &[DOMUpdate] {
        &self.journal
    }

    /// Drain and return the recorded mutations.
    pub fn take_journal(&mut self) -> Vec<DOMUpdate> {
        core::mem::take(&mut self.journal)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}

impl EventTarget for Document {
    fn add_event_listener(&mut self, event: EventType, listener: ListenerId) {
        self.events.add_event_listener(event, listener);
    }

    fn remove_event_listener(&mut self, event: EventType, listener: ListenerId) {
        self.events.remove_event_listener(event, listener);
    }
}

impl DOMSubscriber for Document {
    fn apply_update(&mut self, update: DOMUpdate) -> Result<()> {
        match update {
            DOMUpdate::InsertElement {
                parent,
                node,
                tag,
                pos,
            } => self.insert_element(parent, node, &tag, pos),
            DOMUpdate::SetAttr { node, name, value } => self.set_attribute(node, &name, &value),
            DOMUpdate::SetStyle {
                node,
                property,
                value,
            } => self.set_style(node, &property, &value),
            DOMUpdate::SetBox { node, layout } => self.set_layout(node, layout),
            DOMUpdate::RemoveNode { node } => self.remove_node(node),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_document() -> Result<(Document, NodeKey, NodeKey)> {
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        let container = doc.append_element(
            NodeKey::ROOT,
            "div",
            LayoutBox::new(40.0, 100.0, 400.0, 400.0),
        )?;
        let button = doc.append_element(
            container,
            "button",
            LayoutBox::new(15.0, 25.0, 80.0, 20.0).with_offset_parent(container),
        )?;
        Ok((doc, container, button))
    }

    /// Test that page offsets sum the offset-parent chain.
    ///
    /// # Panics
    /// Panics if the computed page offset or client rect is wrong.
    #[test]
    fn offsets_follow_offset_parent_chain() -> Result<()> {
        let (mut doc, _container, button) = nested_document()?;
        assert_eq!(doc.page_offset(button)?, (55.0, 125.0));
        doc.scroll_to(5.0, 100.0);
        assert_eq!(
            doc.bounding_client_rect(button)?,
            DomRect::new(50.0, 25.0, 80.0, 20.0)
        );
        Ok(())
    }

    /// Test that an offset-parent cycle is reported instead of looping.
    ///
    /// # Panics
    /// Panics if the cycle is not detected.
    #[test]
    fn offset_cycle_is_an_error() -> Result<()> {
        let (mut doc, container, button) = nested_document()?;
        doc.set_layout(
            container,
            LayoutBox::new(0.0, 0.0, 10.0, 10.0).with_offset_parent(button),
        )?;
        let err = doc.page_offset(button).err();
        assert_eq!(
            err.and_then(|found| found.downcast::<DomError>().ok()),
            Some(DomError::OffsetParentCycle(button))
        );
        Ok(())
    }

    /// Test that writes are journalled and removal drops descendants.
    ///
    /// # Panics
    /// Panics if the journal or the tree does not reflect the mutations.
    #[test]
    fn journal_and_removal() -> Result<()> {
        let (mut doc, container, button) = nested_document()?;
        doc.take_journal();
        doc.set_attribute(button, "data-state", "open")?;
        doc.set_style(button, "left", "10px")?;
        assert_eq!(doc.attribute(button, "data-state"), Some("open"));
        assert_eq!(doc.style(button, "left"), Some("10px"));
        assert_eq!(doc.take_journal().len(), 2);

        doc.remove_node(container)?;
        assert!(!doc.contains(button));
        assert!(doc.is_empty());
        assert_eq!(doc.journal(), &[DOMUpdate::RemoveNode { node: container }]);
        Ok(())
    }

    /// Test that a document can be built from a batch of updates.
    ///
    /// # Panics
    /// Panics if the mirrored document does not match the batch.
    #[test]
    fn apply_update_batch() -> Result<()> {
        let mut doc = Document::default();
        doc.apply_updates([
            DOMUpdate::InsertElement {
                parent: NodeKey::ROOT,
                node: NodeKey(10),
                tag: "DIV".into(),
                pos: 0,
            },
            DOMUpdate::SetAttr {
                node: NodeKey(10),
                name: "id".into(),
                value: "anchor".into(),
            },
        ])?;
        assert_eq!(doc.tag(NodeKey(10)), Some("div"));
        assert_eq!(doc.attribute(NodeKey(10), "id"), Some("anchor"));
        assert_eq!(doc.first_element_child(NodeKey::ROOT)?, Some(NodeKey(10)));

        let missing = doc.apply_update(DOMUpdate::RemoveNode { node: NodeKey(99) });
        assert!(missing.is_err());
        Ok(())
    }

    /// Test that a serialized journal rebuilds an equivalent document.
    ///
    /// # Panics
    /// Panics if the replayed document differs in geometry or styles.
    #[test]
    fn journal_replays_from_json() -> Result<()> {
        let (mut doc, _container, button) = nested_document()?;
        doc.set_style(button, "transform", "translate(5px, 6px)")?;
        let wire = serde_json::to_string(&doc.take_journal())?;

        let mut mirror = Document::new(doc.viewport());
        mirror.apply_updates(serde_json::from_str::<Vec<DOMUpdate>>(&wire)?)?;
        assert_eq!(mirror.page_offset(button)?, doc.page_offset(button)?);
        assert_eq!(mirror.layout(button)?, doc.layout(button)?);
        assert_eq!(mirror.style(button, "transform"), Some("translate(5px, 6px)"));
        assert_eq!(mirror.tag(button), Some("button"));
        Ok(())
    }

    /// Test the legacy style engine emulation.
    ///
    /// # Panics
    /// Panics if transform support is misreported.
    #[test]
    fn transform_support_flag() {
        assert!(Document::default().supports_style_property("transform"));
        let legacy = Document::default().without_transforms();
        assert!(!legacy.supports_style_property("transform"));
        assert!(legacy.supports_style_property("left"));
    }
}
