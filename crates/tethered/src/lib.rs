//! Tethered content.
//!
//! A tethered element floats its content next to another element of the page
//! (the tether), choosing the side from the space left in the viewport and
//! following the tether as the window is resized, scrolled or touched.
//!
//! The element talks to the page only through [`TetherHost`]; the in-memory
//! [`dom::Document`] implements it, and [`TetherPage`] drives elements on such
//! a document the way a custom-element runtime would.

pub mod attributes;
pub mod capabilities;
pub mod config;
pub mod element;
pub mod error;
pub mod host;
pub mod measure;
pub mod page;
pub mod style;

pub use attributes::{AttributeReporter, HORIZONTAL_ALIGN_ATTR, VERTICAL_ALIGN_ATTR};
pub use capabilities::RenderCapabilities;
pub use config::{TetherChangePolicy, TetherConfig};
pub use element::TetheredElement;
pub use error::TetherError;
pub use host::TetherHost;
pub use page::TetherPage;

pub use tether_layout::{Alignment, HorizontalAlign, Placement, VerticalAlign, VerticalOverflowRule};
