//! Page driver.
//!
//! Owns a [`Document`] and the tethered elements living in it, and plays the
//! part of the element lifecycle host: constructs elements, mounts and
//! unmounts them, and routes window events to the subscribed listeners.

use crate::{RenderCapabilities, TetherConfig, TetherError, TetheredElement};
use anyhow::Result;
use dom::{Document, DomError, EventType, ListenerId, NodeKey};
use std::collections::BTreeMap;

/// A document together with its tethered elements.
#[derive(Debug)]
pub struct TetherPage {
    document: Document,
    config: TetherConfig,
    capabilities: RenderCapabilities,
    elements: BTreeMap<ListenerId, TetheredElement>,
    next_listener: u32,
}

impl TetherPage {
    /// Wrap `document`, detecting its render capabilities once for the session.
    #[must_use]
    pub fn new(document: Document, config: TetherConfig) -> Self {
        let capabilities = RenderCapabilities::detect(&document);
        Self {
            document,
            config,
            capabilities,
            elements: BTreeMap::new(),
            next_listener: 1,
        }
    }

    #[inline]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable access for geometry changes that do not fire window events.
    #[inline]
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    #[inline]
    pub const fn capabilities(&self) -> RenderCapabilities {
        self.capabilities
    }

    #[inline]
    pub const fn config(&self) -> &TetherConfig {
        &self.config
    }

    /// Construct a tethered element for the existing node `root`.
    ///
    /// # Errors
    /// Returns an error if `root` is not in the document.
    pub fn create_element(&mut self, root: NodeKey) -> Result<ListenerId> {
        if !self.document.contains(root) {
            return Err(DomError::UnknownNode(root).into());
        }
        let listener = ListenerId(self.next_listener);
        self.next_listener += 1;
        let element = TetheredElement::new(
            &mut self.document,
            root,
            listener,
            &self.config,
            self.capabilities,
        )?;
        self.elements.insert(listener, element);
        Ok(listener)
    }

    /// Look up an element.
    ///
    /// # Errors
    /// Returns [`TetherError::UnknownElement`] for an unknown id.
    pub fn element(&self, id: ListenerId) -> Result<&TetheredElement> {
        self.elements
            .get(&id)
            .ok_or_else(|| TetherError::UnknownElement(id).into())
    }

    fn element_mut(&mut self, id: ListenerId) -> Result<&mut TetheredElement, TetherError> {
        self.elements
            .get_mut(&id)
            .ok_or(TetherError::UnknownElement(id))
    }

    /// Mount an element: subscribe it to window events and position it.
    ///
    /// # Errors
    /// Returns an error for an unknown id or a failed position update.
    pub fn mount(&mut self, id: ListenerId) -> Result<()> {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(TetherError::UnknownElement(id))?;
        element.on_mount(&mut self.document)
    }

    /// Unmount an element: drop its window event subscriptions.
    ///
    /// # Errors
    /// Returns an error for an unknown id.
    pub fn unmount(&mut self, id: ListenerId) -> Result<()> {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(TetherError::UnknownElement(id))?;
        element.on_unmount(&mut self.document);
        Ok(())
    }

    /// Assign (or clear) the tether of an element.
    ///
    /// # Errors
    /// Returns an error for an unknown id or a failed position update.
    pub fn set_tether(&mut self, id: ListenerId, tether: Option<NodeKey>) -> Result<()> {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(TetherError::UnknownElement(id))?;
        element.set_tether(&mut self.document, tether)
    }

    /// Change the minimum bottom space of an element; applies on its next update.
    ///
    /// # Errors
    /// Returns an error for an unknown id.
    pub fn set_min_bottom_space(&mut self, id: ListenerId, min_bottom_space: f64) -> Result<()> {
        self.element_mut(id)?.set_min_bottom_space(min_bottom_space);
        Ok(())
    }

    /// Force a position update of an element.
    ///
    /// # Errors
    /// Returns an error for an unknown id or a failed position update.
    pub fn update_position(&mut self, id: ListenerId) -> Result<()> {
        let element = self
            .elements
            .get_mut(&id)
            .ok_or(TetherError::UnknownElement(id))?;
        element.update_position(&mut self.document)
    }

    /// Fire `event`: update every element subscribed to it, in subscription order.
    ///
    /// Listeners run independently: a failed update does not keep the event
    /// from the elements subscribed after it. Returns the number of elements
    /// updated successfully.
    ///
    /// # Errors
    /// Returns the first failed update once every listener has run.
    pub fn dispatch(&mut self, event: EventType) -> Result<usize> {
        let listeners = self.document.events().listeners(event).to_vec();
        let mut updated = 0;
        let mut first_error = None;
        for listener in listeners {
            let Some(element) = self.elements.get_mut(&listener) else {
                continue;
            };
            match element.update_position(&mut self.document) {
                Ok(()) => updated += 1,
                Err(err) => {
                    log::warn!("Tethered element {listener:?} failed to handle {event}: {err}");
                    if first_error.is_none() {
                        first_error = Some(err);
                    }
                }
            }
        }
        log::trace!("Dispatched {event} to {updated} tethered elements");
        first_error.map_or(Ok(updated), Err)
    }

    /// Resize the window and fire `resize`.
    ///
    /// # Errors
    /// See [`TetherPage::dispatch`].
    pub fn resize(&mut self, width: f64, height: f64) -> Result<usize> {
        self.document.resize(width, height);
        self.dispatch(EventType::Resize)
    }

    /// Scroll the document and fire `scroll`.
    ///
    /// # Errors
    /// See [`TetherPage::dispatch`].
    pub fn scroll_to(&mut self, scroll_x: f64, scroll_y: f64) -> Result<usize> {
        self.document.scroll_to(scroll_x, scroll_y);
        self.dispatch(EventType::Scroll)
    }

    /// Unmount (if mounted) and drop an element.
    ///
    /// # Errors
    /// Returns an error for an unknown id.
    pub fn remove_element(&mut self, id: ListenerId) -> Result<TetheredElement> {
        let mut element = self
            .elements
            .remove(&id)
            .ok_or(TetherError::UnknownElement(id))?;
        if element.is_mounted() {
            element.on_unmount(&mut self.document);
        }
        Ok(element)
    }

    /// Ids of all elements, in creation order.
    pub fn element_ids(&self) -> impl Iterator<Item = ListenerId> + '_ {
        self.elements.keys().copied()
    }
}
