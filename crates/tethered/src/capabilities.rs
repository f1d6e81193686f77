//! Style features of the hosting page.

use crate::TetherHost;

/// Style features of the hosting page, detected once per page session and
/// shared by every tethered element on that page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderCapabilities {
    /// Inline `transform` declarations are honoured.
    pub transforms_supported: bool,
}

impl RenderCapabilities {
    /// Probe the host's style engine.
    pub fn detect<H: TetherHost + ?Sized>(host: &H) -> Self {
        let caps = Self {
            transforms_supported: host.supports_style_property("transform"),
        };
        log::debug!("Detected render capabilities: {caps:?}");
        caps
    }

    /// Capabilities of a current style engine.
    #[must_use]
    pub const fn modern() -> Self {
        Self {
            transforms_supported: true,
        }
    }

    /// Capabilities of a style engine positioning through `left`/`top` only.
    #[must_use]
    pub const fn legacy() -> Self {
        Self {
            transforms_supported: false,
        }
    }
}

impl Default for RenderCapabilities {
    fn default() -> Self {
        Self::modern()
    }
}
