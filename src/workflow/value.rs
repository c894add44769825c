//! Node input values.
//!
//! An input is either a literal JSON value or a link to another node's output
//! slot. Links are never evaluated while the graph is being built; they only
//! describe where a value will come from once the workflow executes.

use crate::workflow::id::NodeId;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Reference to output `slot` of `node`. Serialized as `["<id>", slot]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeOutput {
    pub node: NodeId,
    pub slot: u32,
}

impl NodeOutput {
    pub fn new(node: impl Into<NodeId>, slot: u32) -> Self {
        Self {
            node: node.into(),
            slot,
        }
    }
}

impl Serialize for NodeOutput {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (self.node.as_str(), self.slot).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for NodeOutput {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Link ids are always strings; `[512, 512]` stays a literal.
        let (node, slot) = <(String, u32)>::deserialize(deserializer)?;
        Ok(Self {
            node: NodeId::new(node),
            slot,
        })
    }
}

/// A single node input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    Link(NodeOutput),
    Literal(Value),
}

impl InputValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        InputValue::Literal(value.into())
    }

    pub fn link(node: impl Into<NodeId>, slot: u32) -> Self {
        InputValue::Link(NodeOutput::new(node, slot))
    }

    pub fn as_link(&self) -> Option<&NodeOutput> {
        match self {
            InputValue::Link(output) => Some(output),
            _ => None,
        }
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            InputValue::Literal(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        self.as_literal().and_then(Value::as_i64)
    }

    pub fn is_link(&self) -> bool {
        matches!(self, InputValue::Link(_))
    }
}

impl From<NodeOutput> for InputValue {
    fn from(output: NodeOutput) -> Self {
        InputValue::Link(output)
    }
}
