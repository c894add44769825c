//! Settings sections of the configuration file
//!
//! # Main Types
//!
//! - [`NodeClassSettings`] - Node class names used for each extraction role
//! - [`IdSettings`] - Reserved identifier range for the appended save nodes
//! - [`StepSettings`] - Whether and when the build step runs
//!
//! # Identifier Layout
//!
//! Save nodes get `reserved_base + <sub-index>`, one sub-index per logical
//! sink, so enabling several extraction modes never makes two sinks compete
//! for the same identifier. Slice and count nodes use ordinary sequential ids
//! starting at `first_dynamic_id`.

use crate::config::{DEFAULT_RESERVED_ID_BASE, DEFAULT_STEP_PRIORITY};
use crate::workflow::{NodeRole, DEFAULT_FIRST_DYNAMIC_ID};
use serde::{Deserialize, Serialize};

/// Node class names for each role
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeClassSettings {
    /// Class of the decode node whose output is sliced
    pub decode: String,
    /// Class of the batch slicing node
    pub slice_batch: String,
    /// Class of the frame counting node
    pub count_frames: String,
    /// Class of the image save sink
    pub save_image: String,
    /// `bit_depth` input passed to every save sink
    pub bit_depth: String,
}

impl Default for NodeClassSettings {
    fn default() -> Self {
        Self {
            decode: "VAEDecode".to_string(),
            slice_batch: "ImageFromBatch".to_string(),
            count_frames: "SwarmCountFrames".to_string(),
            save_image: "SwarmSaveImageWS".to_string(),
            bit_depth: "8bit".to_string(),
        }
    }
}

impl NodeClassSettings {
    /// Configured class name for `role`
    pub fn class_type(&self, role: NodeRole) -> &str {
        match role {
            NodeRole::Decode => &self.decode,
            NodeRole::SliceBatch => &self.slice_batch,
            NodeRole::CountFrames => &self.count_frames,
            NodeRole::SaveImage => &self.save_image,
        }
    }
}

/// Identifier allocation for appended nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdSettings {
    /// Start of the reserved range for save sinks
    pub reserved_base: u32,
    /// Sub-index of the first-frame sink
    pub first_frame_index: u32,
    /// Sub-index of the last-frame sink
    pub last_frame_index: u32,
    /// Sub-index of the frame-range sink
    pub range_index: u32,
    /// First sequential id for slice and count nodes
    pub first_dynamic_id: u32,
}

impl Default for IdSettings {
    fn default() -> Self {
        Self {
            reserved_base: DEFAULT_RESERVED_ID_BASE,
            first_frame_index: 0,
            last_frame_index: 1,
            range_index: 2,
            first_dynamic_id: DEFAULT_FIRST_DYNAMIC_ID,
        }
    }
}

/// Build step registration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StepSettings {
    /// Register the frame saver step at all
    pub enabled: bool,
    /// Position among the other build steps (lower runs first)
    pub priority: i32,
}

impl Default for StepSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            priority: DEFAULT_STEP_PRIORITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_type_per_role() {
        let classes = NodeClassSettings::default();
        assert_eq!(classes.class_type(NodeRole::Decode), "VAEDecode");
        assert_eq!(classes.class_type(NodeRole::SliceBatch), "ImageFromBatch");
        assert_eq!(classes.class_type(NodeRole::CountFrames), "SwarmCountFrames");
        assert_eq!(classes.class_type(NodeRole::SaveImage), "SwarmSaveImageWS");
    }

    #[test]
    fn test_default_sub_indices_are_distinct() {
        let ids = IdSettings::default();
        assert_ne!(ids.first_frame_index, ids.last_frame_index);
        assert_ne!(ids.last_frame_index, ids.range_index);
        assert_ne!(ids.first_frame_index, ids.range_index);
    }
}
