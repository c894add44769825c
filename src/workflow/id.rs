//! Identity types for workflow graphs.
//!
//! Node identifiers are opaque strings. Workflows loaded from disk keep
//! whatever keys the author used; nodes appended by build steps get numeric
//! identifiers, either sequential or drawn from a reserved range.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Key of a node inside a `WorkflowGraph`.
#[derive(Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Numeric value of the identifier, if it is purely numeric.
    pub fn as_number(&self) -> Option<u32> {
        self.0.parse().ok()
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.0.is_empty()
    }
}

impl From<u32> for NodeId {
    fn from(value: u32) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for NodeId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for NodeId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid() {
            write!(f, "NodeId({})", self.0)
        } else {
            write!(f, "NodeId(INVALID)")
        }
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for NodeId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for NodeId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => NodeId(text),
            Raw::Number(number) => NodeId(number.to_string()),
        })
    }
}
