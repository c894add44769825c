//! Roles a node plays in frame extraction.
//!
//! The concrete `class_type` for each role comes from configuration
//! (`NodeClassSettings`), so hosts with differently named node packs can
//! still use the pass.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// Turns latents into a batch of image frames. Read, never created.
    Decode,
    /// Selects a contiguous run of frames by start index and length.
    SliceBatch,
    /// Yields the number of frames in a batch at execution time.
    CountFrames,
    /// Outputs its input frames outside the workflow.
    SaveImage,
}

impl NodeRole {
    pub fn display_name(&self) -> &'static str {
        match self {
            NodeRole::Decode => "Decode",
            NodeRole::SliceBatch => "Slice Batch",
            NodeRole::CountFrames => "Count Frames",
            NodeRole::SaveImage => "Save Image",
        }
    }

    pub fn all() -> &'static [NodeRole] {
        &[
            NodeRole::Decode,
            NodeRole::SliceBatch,
            NodeRole::CountFrames,
            NodeRole::SaveImage,
        ]
    }

    pub fn is_sink(&self) -> bool {
        matches!(self, NodeRole::SaveImage)
    }

    pub fn description(&self) -> &'static str {
        match self {
            NodeRole::Decode => {
                "Source of the decoded frame batch.\n\
                 The last one in the workflow is the extraction source."
            }
            NodeRole::SliceBatch => {
                "Selects frames by batch_index and length.\n\
                 batch_index may be a link resolved at execution time."
            }
            NodeRole::CountFrames => {
                "Counts frames of the final image output.\n\
                 Feeds the last-frame slice index."
            }
            NodeRole::SaveImage => {
                "Saves and outputs the extracted frames.\n\
                 Gets a stable id from the reserved range."
            }
        }
    }
}

impl fmt::Display for NodeRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
