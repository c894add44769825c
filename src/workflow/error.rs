//! Workflow-specific error types.

use crate::workflow::id::NodeId;
use thiserror::Error;

/// Errors raised while loading or mutating a workflow graph.
#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Node id must not be empty")]
    InvalidNodeId,

    #[error("Node {0} has an empty class_type")]
    MissingClassType(NodeId),

    #[error("Duplicate node id {0}")]
    DuplicateNode(NodeId),

    #[error("Node {node} input '{input}' links to unknown node {target}")]
    DanglingLink {
        node: NodeId,
        input: String,
        target: NodeId,
    },

    #[error("Unknown node {0}")]
    UnknownNode(NodeId),

    #[error("Cycle detected in workflow graph ({scheduled} of {total} nodes scheduled)")]
    CycleDetected { scheduled: usize, total: usize },

    #[error("Invalid node {id}: {source}")]
    InvalidNode {
        id: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type WorkflowResult<T> = std::result::Result<T, WorkflowError>;
