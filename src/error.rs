//! Crate-level error types.

use std::fmt;

use crate::scene::{LayerId, NodeId};

/// Errors produced by the skylens crate.
#[derive(Debug)]
pub enum SkylensError {
    /// Focus was requested for a node that was never registered.
    UnknownNode(NodeId),
    /// A node id was registered twice.
    DuplicateNode(NodeId),
    /// A layer id was registered twice.
    DuplicateLayer(LayerId),
    /// A static transform contained a non-finite position or scale.
    InvalidTransform(String),
    /// TOML options parsing/serialization failure.
    OptionsParse(String),
    /// Generic I/O failure.
    Io(std::io::Error),
}

impl fmt::Display for SkylensError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownNode(id) => {
                write!(f, "unknown focus target: node {id}")
            }
            Self::DuplicateNode(id) => {
                write!(f, "node {id} is already registered")
            }
            Self::DuplicateLayer(id) => {
                write!(f, "layer {id} is already registered")
            }
            Self::InvalidTransform(msg) => {
                write!(f, "invalid static transform: {msg}")
            }
            Self::OptionsParse(msg) => {
                write!(f, "options parse error: {msg}")
            }
            Self::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for SkylensError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SkylensError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}
