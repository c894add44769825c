//! Errors raised by the frame extraction pass.

use crate::workflow::{NodeRole, WorkflowError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Extraction was requested but the workflow has no decode node.
    #[error("No {class_type} nodes found to extract frames from")]
    MissingDecodeNode { class_type: String },

    /// The graph refused an appended node. Nothing from the pass remains.
    #[error("Failed to append {role} node: {source}")]
    Append {
        role: NodeRole,
        #[source]
        source: WorkflowError,
    },
}
