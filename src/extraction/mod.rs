//! Frame extraction
//!
//! Saves individual frames of a generated video as separate images by
//! appending slice and save nodes after the workflow's last decode node.
//!
//! # Architecture
//!
//! ```text
//! UserInput ──► ExtractionParams::resolve ──► ExtractionOptions
//!                                                   │
//!                                                   ▼
//! WorkflowGraph ◄── FrameExtractionInserter::insert ┘
//! ```
//!
//! - [`params`] registers the four user parameters and reads them back
//! - [`options`] holds the resolved request and range validation
//! - [`inserter`] performs the graph mutation

pub mod error;
pub mod inserter;
pub mod options;
pub mod params;

pub use error::ExtractionError;
pub use inserter::{ExtractedSink, FrameExtractionInserter, InsertionSummary, SinkKind};
pub use options::{ExtractionOptions, FrameRange, UNSET_BOUND};
pub use params::{ExtractionParams, GROUP_OTHER_FIXES};
