//! Errors raised by the page driver and configuration loading.

use core::fmt;
use dom::ListenerId;
use std::error::Error;

/// Errors raised by the page driver and configuration loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TetherError {
    /// No tethered element is registered under this listener id.
    UnknownElement(ListenerId),
    /// A configuration value could not be used.
    InvalidConfig { key: String, value: String },
}

impl fmt::Display for TetherError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement(listener) => {
                write!(formatter, "No tethered element registered as {listener:?}")
            }
            Self::InvalidConfig { key, value } => {
                write!(formatter, "Invalid configuration value for {key}: {value:?}")
            }
        }
    }
}

impl Error for TetherError {}
