//! Errors raised by the in-memory document.

use crate::NodeKey;
use core::fmt;
use std::error::Error;

/// Errors raised by document queries and writes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomError {
    /// A query or write named a node that is not in the document.
    UnknownNode(NodeKey),
    /// A parent named by an insert is not in the document.
    UnknownParent(NodeKey),
    /// A node key is already in use.
    DuplicateNode(NodeKey),
    /// An event name that is not one of the observed window events.
    InvalidEvent(String),
    /// The offset-parent chain did not terminate.
    OffsetParentCycle(NodeKey),
}

impl fmt::Display for DomError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(node) => write!(formatter, "Unknown node: {node:?}"),
            Self::UnknownParent(node) => write!(formatter, "Unknown parent node: {node:?}"),
            Self::DuplicateNode(node) => write!(formatter, "Node already exists: {node:?}"),
            Self::InvalidEvent(name) => write!(formatter, "Unsupported event type: {name}"),
            Self::OffsetParentCycle(node) => {
                write!(formatter, "Offset parent chain starting at {node:?} does not terminate")
            }
        }
    }
}

impl Error for DomError {}
