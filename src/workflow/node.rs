//! Workflow node definition.
//!
//! A node is an operation kind (`class_type`) plus a named set of inputs.
//! Edges are not stored separately: every link lives inside the consumer's
//! inputs, so the graph's edge set is the union of all nodes' link inputs.

use crate::workflow::id::NodeId;
use crate::workflow::value::{InputValue, NodeOutput};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Key of the node in the workflow document.
    #[serde(skip)]
    pub id: NodeId,
    /// Operation kind, e.g. `VAEDecode`.
    pub class_type: String,
    #[serde(default)]
    pub inputs: BTreeMap<String, InputValue>,
    /// Editor metadata, carried through untouched.
    #[serde(rename = "_meta", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<serde_json::Value>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, class_type: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            class_type: class_type.into(),
            inputs: BTreeMap::new(),
            meta: None,
        }
    }

    pub fn with_input(mut self, name: impl Into<String>, value: impl Into<InputValue>) -> Self {
        self.inputs.insert(name.into(), value.into());
        self
    }

    pub fn input(&self, name: &str) -> Option<&InputValue> {
        self.inputs.get(name)
    }

    /// Reference to one of this node's output slots.
    pub fn output(&self, slot: u32) -> NodeOutput {
        NodeOutput::new(self.id.clone(), slot)
    }

    /// Link inputs as `(input name, upstream output)` pairs.
    pub fn links(&self) -> impl Iterator<Item = (&str, &NodeOutput)> {
        self.inputs
            .iter()
            .filter_map(|(name, value)| value.as_link().map(|link| (name.as_str(), link)))
    }

    pub fn is_class(&self, class_type: &str) -> bool {
        self.class_type == class_type
    }
}
