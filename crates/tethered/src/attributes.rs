//! Alignment attributes.
//!
//! The chosen sides are mirrored onto `data-horizontal-align` and
//! `data-vertical-align` for stylesheets to hook into. Values are only written
//! when they differ from the last ones written.

use crate::TetherHost;
use anyhow::Result;
use dom::NodeKey;
use tether_layout::{Alignment, HorizontalAlign, VerticalAlign};

pub const HORIZONTAL_ALIGN_ATTR: &str = "data-horizontal-align";
pub const VERTICAL_ALIGN_ATTR: &str = "data-vertical-align";

/// Change-detecting writer for the alignment attributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AttributeReporter {
    last_horizontal: Option<HorizontalAlign>,
    last_vertical: Option<VerticalAlign>,
}

impl AttributeReporter {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            last_horizontal: None,
            last_vertical: None,
        }
    }

    /// Write the attributes of `alignment` that changed. Returns the number of writes.
    ///
    /// # Errors
    /// Returns an error if the host rejects a write; the memo of that axis is left untouched.
    pub fn report<H: TetherHost + ?Sized>(
        &mut self,
        host: &mut H,
        node: NodeKey,
        alignment: Alignment,
    ) -> Result<usize> {
        let mut writes = 0;
        if self.last_horizontal != Some(alignment.horizontal) {
            host.set_attribute(node, HORIZONTAL_ALIGN_ATTR, alignment.horizontal.as_str())?;
            self.last_horizontal = Some(alignment.horizontal);
            writes += 1;
        }
        if self.last_vertical != Some(alignment.vertical) {
            host.set_attribute(node, VERTICAL_ALIGN_ATTR, alignment.vertical.as_str())?;
            self.last_vertical = Some(alignment.vertical);
            writes += 1;
        }
        if writes > 0 {
            log::debug!("Reported alignment {alignment} on {node:?} ({writes} attribute writes)");
        }
        Ok(writes)
    }

    /// Last horizontal value written, if any.
    pub const fn last_horizontal(&self) -> Option<HorizontalAlign> {
        self.last_horizontal
    }

    /// Last vertical value written, if any.
    pub const fn last_vertical(&self) -> Option<VerticalAlign> {
        self.last_vertical
    }
}
