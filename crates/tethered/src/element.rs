//! The tethered element.
//!
//! Floats its content next to a tether element elsewhere in the document. The
//! element picks the side of the tether from the viewport space available,
//! moves itself to the matching tether corner, and reports the chosen sides
//! through the `data-horizontal-align` / `data-vertical-align` attributes.
//!
//! While mounted it follows the page: the host drives [`TetheredElement::update_position`]
//! for every observed window event the element subscribed its listener to.

use crate::attributes::AttributeReporter;
use crate::config::{TetherChangePolicy, TetherConfig};
use crate::measure::{content_size, tether_bounds, viewport_size};
use crate::style::apply_position;
use crate::{RenderCapabilities, TetherHost};
use anyhow::Result;
use dom::{EventType, ListenerId, NodeKey};
use tether_layout::{
    Alignment, HorizontalAlign, Placement, PlacementOptions, VerticalAlign, VerticalOverflowRule,
    place,
};

/// State of one tethered element.
#[derive(Debug, Clone)]
pub struct TetheredElement {
    root: NodeKey,
    listener: ListenerId,
    tether: Option<NodeKey>,
    alignment: Alignment,
    min_bottom_space: f64,
    vertical_rule: VerticalOverflowRule,
    observed_events: Vec<EventType>,
    tether_change: TetherChangePolicy,
    capabilities: RenderCapabilities,
    mounted: bool,
    reporter: AttributeReporter,
    last_placement: Option<Placement>,
}

impl TetheredElement {
    /// Create the element state for `root` and report the default alignment.
    ///
    /// `listener` is the id the element subscribes to window events under;
    /// `capabilities` are the page's detected style features.
    ///
    /// # Errors
    /// Returns an error if the host rejects the initial attribute writes.
    pub fn new<H: TetherHost + ?Sized>(
        host: &mut H,
        root: NodeKey,
        listener: ListenerId,
        config: &TetherConfig,
        capabilities: RenderCapabilities,
    ) -> Result<Self> {
        let mut element = Self {
            root,
            listener,
            tether: None,
            alignment: Alignment::default(),
            min_bottom_space: config.min_bottom_space,
            vertical_rule: config.vertical_rule,
            observed_events: config.observed_events(),
            tether_change: config.tether_change,
            capabilities,
            mounted: false,
            reporter: AttributeReporter::new(),
            last_placement: None,
        };
        element
            .reporter
            .report(host, element.root, element.alignment)?;
        Ok(element)
    }

    /// Called by the host once the element is attached to the document.
    ///
    /// Subscribes to the observed window events and positions the content.
    ///
    /// # Errors
    /// Returns an error if the initial position update fails; subscriptions stay in place.
    pub fn on_mount<H: TetherHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        for event in &self.observed_events {
            host.add_event_listener(*event, self.listener);
        }
        self.mounted = true;
        log::debug!(
            "Mounted tethered element {:?} as {:?} on {} events",
            self.root,
            self.listener,
            self.observed_events.len()
        );
        self.update_position(host)
    }

    /// Called by the host once the element is detached from the document.
    pub fn on_unmount<H: TetherHost + ?Sized>(&mut self, host: &mut H) {
        for event in &self.observed_events {
            host.remove_event_listener(*event, self.listener);
        }
        self.mounted = false;
        log::debug!("Unmounted tethered element {:?}", self.root);
    }

    /// Set the element the content is tethered to (`None` detaches it).
    ///
    /// # Errors
    /// Returns an error if the immediate position update fails.
    pub fn set_tether<H: TetherHost + ?Sized>(
        &mut self,
        host: &mut H,
        tether: Option<NodeKey>,
    ) -> Result<()> {
        self.tether = tether;
        log::debug!("Tethered element {:?} now follows {tether:?}", self.root);
        match self.tether_change {
            TetherChangePolicy::Recompute => self.update_position(host),
            TetherChangePolicy::Defer => Ok(()),
        }
    }

    /// Recompute alignment and position from the current page geometry.
    ///
    /// Does nothing while unmounted or without a tether.
    ///
    /// # Errors
    /// Returns an error if the host fails a measurement or a write.
    pub fn update_position<H: TetherHost + ?Sized>(&mut self, host: &mut H) -> Result<()> {
        let Some(tether) = self.tether.filter(|_| self.mounted) else {
            return Ok(());
        };

        let bounds = tether_bounds(host, tether)?;
        let content = content_size(host, self.root)?;
        let viewport = viewport_size(host);
        let placement = place(&bounds, content, viewport, self.placement_options());
        log::trace!(
            "Tether {tether:?} bounds={bounds:?} content={content:?} viewport={viewport:?} -> {} at ({}, {})",
            placement.alignment,
            placement.anchor.x,
            placement.anchor.y
        );

        self.alignment = placement.alignment;
        self.reporter.report(host, self.root, self.alignment)?;
        apply_position(host, self.root, placement.anchor, self.capabilities)?;
        self.last_placement = Some(placement);
        Ok(())
    }

    fn placement_options(&self) -> PlacementOptions {
        PlacementOptions {
            min_bottom_space: self.min_bottom_space,
            vertical_rule: self.vertical_rule,
        }
    }

    #[inline]
    pub const fn root(&self) -> NodeKey {
        self.root
    }

    #[inline]
    pub const fn listener(&self) -> ListenerId {
        self.listener
    }

    #[inline]
    pub const fn tether(&self) -> Option<NodeKey> {
        self.tether
    }

    #[inline]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[inline]
    pub const fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// The currently used horizontal alignment of the content to the tether.
    #[inline]
    pub const fn horizontal_align(&self) -> HorizontalAlign {
        self.alignment.horizontal
    }

    /// The currently used vertical alignment of the content to the tether.
    #[inline]
    pub const fn vertical_align(&self) -> VerticalAlign {
        self.alignment.vertical
    }

    /// Minimum space (px) below the tether for the content to open downwards.
    #[inline]
    pub const fn min_bottom_space(&self) -> f64 {
        self.min_bottom_space
    }

    /// Takes effect on the next position update.
    pub fn set_min_bottom_space(&mut self, min_bottom_space: f64) {
        self.min_bottom_space = min_bottom_space;
    }

    /// Window events the element subscribes to while mounted.
    pub fn observed_events(&self) -> &[EventType] {
        &self.observed_events
    }

    /// Most recent placement applied to the page.
    #[inline]
    pub const fn last_placement(&self) -> Option<Placement> {
        self.last_placement
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{HORIZONTAL_ALIGN_ATTR, VERTICAL_ALIGN_ATTR};
    use dom::{DOMUpdate, Document, LayoutBox, Viewport};
    use tether_layout::PagePoint;

    struct Fixture {
        doc: Document,
        root: NodeKey,
        tether: NodeKey,
    }

    /// Tether at (10, 500) sized 100x30, content 200x50, viewport 800x600.
    fn fixture() -> Result<Fixture> {
        let mut doc = Document::new(Viewport::new(800.0, 600.0));
        let tether = doc.append_element(NodeKey::ROOT, "a", LayoutBox::new(10.0, 500.0, 100.0, 30.0))?;
        let root = doc.append_element(NodeKey::ROOT, "szn-tethered", LayoutBox::default())?;
        doc.append_element(root, "div", LayoutBox::new(0.0, 0.0, 200.0, 50.0))?;
        doc.take_journal();
        Ok(Fixture { doc, root, tether })
    }

    fn element(fix: &mut Fixture, config: &TetherConfig) -> Result<TetheredElement> {
        TetheredElement::new(
            &mut fix.doc,
            fix.root,
            ListenerId(1),
            config,
            RenderCapabilities::modern(),
        )
    }

    /// Test that construction reports the default alignment.
    ///
    /// # Panics
    /// Panics if the default attributes are missing.
    #[test]
    fn construction_reports_defaults() -> Result<()> {
        let mut fix = fixture()?;
        let tethered = element(&mut fix, &TetherConfig::default())?;
        assert_eq!(tethered.alignment(), Alignment::default());
        assert_eq!(fix.doc.attribute(fix.root, HORIZONTAL_ALIGN_ATTR), Some("left"));
        assert_eq!(fix.doc.attribute(fix.root, VERTICAL_ALIGN_ATTR), Some("bottom"));
        Ok(())
    }

    /// Test that updates before mount or before a tether is set do not touch the page.
    ///
    /// # Panics
    /// Panics if any mutation is journalled.
    #[test]
    fn no_op_until_mounted_and_tethered() -> Result<()> {
        let mut fix = fixture()?;
        let mut tethered = element(&mut fix, &TetherConfig::default())?;
        fix.doc.take_journal();

        tethered.update_position(&mut fix.doc)?;
        tethered.set_tether(&mut fix.doc, Some(fix.tether))?;
        assert!(fix.doc.journal().is_empty());
        assert_eq!(tethered.last_placement(), None);

        tethered.set_tether(&mut fix.doc, None)?;
        tethered.on_mount(&mut fix.doc)?;
        assert!(fix.doc.journal().is_empty());
        Ok(())
    }

    /// Test the reference placement: left/top at the tether's page position.
    ///
    /// # Panics
    /// Panics if alignment, attributes or transform differ.
    #[test]
    fn reference_placement() -> Result<()> {
        let mut fix = fixture()?;
        let mut tethered = element(&mut fix, &TetherConfig::default())?;
        tethered.on_mount(&mut fix.doc)?;
        tethered.set_tether(&mut fix.doc, Some(fix.tether))?;

        assert_eq!(tethered.horizontal_align(), HorizontalAlign::Left);
        assert_eq!(tethered.vertical_align(), VerticalAlign::Top);
        assert_eq!(fix.doc.attribute(fix.root, VERTICAL_ALIGN_ATTR), Some("top"));
        assert_eq!(fix.doc.style(fix.root, "transform"), Some("translate(10px, 500px)"));
        assert_eq!(
            tethered.last_placement().map(|placement| placement.anchor),
            Some(PagePoint { x: 10.0, y: 500.0 })
        );
        Ok(())
    }

    /// Test that repeated updates write the same style and no attributes.
    ///
    /// # Panics
    /// Panics if an unchanged alignment is rewritten.
    #[test]
    fn repeated_update_is_idempotent() -> Result<()> {
        let mut fix = fixture()?;
        let mut tethered = element(&mut fix, &TetherConfig::default())?;
        tethered.on_mount(&mut fix.doc)?;
        tethered.set_tether(&mut fix.doc, Some(fix.tether))?;
        let first = fix.doc.take_journal();

        tethered.update_position(&mut fix.doc)?;
        let second = fix.doc.take_journal();
        assert_eq!(
            second,
            vec![DOMUpdate::SetStyle {
                node: fix.root,
                property: "transform".to_owned(),
                value: "translate(10px, 500px)".to_owned(),
            }]
        );
        assert!(first.contains(&second[0]));
        Ok(())
    }

    /// Test that the minimum bottom space can be tuned per element.
    ///
    /// # Panics
    /// Panics if a lower threshold does not switch back to bottom alignment.
    #[test]
    fn min_bottom_space_is_writable() -> Result<()> {
        let mut fix = fixture()?;
        let mut tethered = element(&mut fix, &TetherConfig::default())?;
        tethered.on_mount(&mut fix.doc)?;
        tethered.set_tether(&mut fix.doc, Some(fix.tether))?;
        assert_eq!(tethered.vertical_align(), VerticalAlign::Top);

        tethered.set_min_bottom_space(70.0);
        assert_eq!(tethered.vertical_align(), VerticalAlign::Top);
        tethered.update_position(&mut fix.doc)?;
        assert_eq!(tethered.vertical_align(), VerticalAlign::Bottom);
        assert_eq!(fix.doc.style(fix.root, "transform"), Some("translate(10px, 530px)"));
        Ok(())
    }

    /// Test that the deferred policy waits for the next update.
    ///
    /// # Panics
    /// Panics if the tether change positions the content immediately.
    #[test]
    fn deferred_tether_change() -> Result<()> {
        let mut fix = fixture()?;
        let config = TetherConfig {
            tether_change: TetherChangePolicy::Defer,
            ..TetherConfig::default()
        };
        let mut tethered = element(&mut fix, &config)?;
        tethered.on_mount(&mut fix.doc)?;
        tethered.set_tether(&mut fix.doc, Some(fix.tether))?;
        assert_eq!(fix.doc.style(fix.root, "transform"), None);

        tethered.update_position(&mut fix.doc)?;
        assert_eq!(fix.doc.style(fix.root, "transform"), Some("translate(10px, 500px)"));
        Ok(())
    }

    /// Test mount/unmount symmetry and that unmounted elements stop updating.
    ///
    /// # Panics
    /// Panics if a subscription leaks or an update runs after unmount.
    #[test]
    fn mount_unmount_symmetry() -> Result<()> {
        let mut fix = fixture()?;
        let config = TetherConfig {
            observe_wheel: false,
            ..TetherConfig::default()
        };
        let mut tethered = element(&mut fix, &config)?;
        tethered.on_mount(&mut fix.doc)?;
        assert_eq!(
            tethered.observed_events(),
            &[EventType::Resize, EventType::Scroll, EventType::TouchMove]
        );
        assert_eq!(fix.doc.events().len(), 3);
        assert!(!fix.doc.events().is_subscribed(EventType::Wheel, ListenerId(1)));

        tethered.on_unmount(&mut fix.doc);
        assert!(fix.doc.events().is_empty());
        for event in EventType::ALL {
            let counts = fix.doc.events().counts(event);
            assert_eq!(counts.attached, counts.detached);
        }

        fix.doc.take_journal();
        tethered.set_tether(&mut fix.doc, Some(fix.tether))?;
        assert!(fix.doc.journal().is_empty());
        Ok(())
    }

    /// Test that a tether removed from the page surfaces as an error.
    ///
    /// # Panics
    /// Panics if measuring a missing tether succeeds.
    #[test]
    fn missing_tether_propagates() -> Result<()> {
        let mut fix = fixture()?;
        let mut tethered = element(&mut fix, &TetherConfig::default())?;
        tethered.on_mount(&mut fix.doc)?;
        tethered.set_tether(&mut fix.doc, Some(fix.tether))?;
        fix.doc.remove_node(fix.tether)?;
        assert!(tethered.update_position(&mut fix.doc).is_err());
        Ok(())
    }
}
