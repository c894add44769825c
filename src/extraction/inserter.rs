//! Frame extraction insertion pass.
//!
//! Given a workflow that already decodes a batch of frames, appends slice and
//! save nodes for the first frame, the last frame and/or a range of frames:
//!
//! ```text
//! [VAEDecode] ──► [ImageFromBatch 0,1] ──────────────────► [Save 50000]
//!      │
//!      ├────────► [ImageFromBatch <count>,1] ────────────► [Save 50001]
//!      │                    ▲
//!      │          [SwarmCountFrames] ◄── final image out
//!      │
//!      └────────► [ImageFromBatch start,end-start+1] ────► [Save 50002]
//! ```
//!
//! The last-frame slice uses the frame count itself as `batch_index`; the
//! slicing node clamps indices past the end to the final frame.
//!
//! The decode node is located before anything is appended, and a failed
//! append rolls the graph back, so the pass either adds all of its nodes or
//! none of them.

use crate::config::{FrameSaverConfig, IdSettings, NodeClassSettings};
use crate::extraction::error::ExtractionError;
use crate::extraction::options::{ExtractionOptions, FrameRange};
use crate::workflow::{InputValue, NodeId, NodeOutput, NodeRole, WorkflowGraph};

/// The logical sink an extraction produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    FirstFrame,
    LastFrame,
    Range,
}

impl SinkKind {
    pub fn label(&self) -> &'static str {
        match self {
            SinkKind::FirstFrame => "first frame",
            SinkKind::LastFrame => "last frame",
            SinkKind::Range => "frame range",
        }
    }
}

/// Nodes appended for one sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSink {
    pub kind: SinkKind,
    pub slice: NodeId,
    pub sink: NodeId,
    /// Counting node feeding the slice index (last frame only).
    pub frame_count: Option<NodeId>,
}

impl ExtractedSink {
    pub fn node_count(&self) -> usize {
        2 + usize::from(self.frame_count.is_some())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InsertionSummary {
    /// Decode node the slices read from; `None` when nothing was requested.
    pub decode: Option<NodeId>,
    pub sinks: Vec<ExtractedSink>,
}

impl InsertionSummary {
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn sink(&self, kind: SinkKind) -> Option<&ExtractedSink> {
        self.sinks.iter().find(|sink| sink.kind == kind)
    }

    pub fn appended_nodes(&self) -> usize {
        self.sinks.iter().map(ExtractedSink::node_count).sum()
    }
}

#[derive(Debug, Clone)]
pub struct FrameExtractionInserter {
    classes: NodeClassSettings,
    ids: IdSettings,
}

impl FrameExtractionInserter {
    pub fn new(config: &FrameSaverConfig) -> Self {
        Self {
            classes: config.nodes.clone(),
            ids: config.ids.clone(),
        }
    }

    /// Append the nodes `options` asks for.
    ///
    /// On error the graph is exactly as it was before the call.
    pub fn insert(
        &self,
        graph: &mut WorkflowGraph,
        options: &ExtractionOptions,
    ) -> Result<InsertionSummary, ExtractionError> {
        if !options.is_requested() {
            tracing::trace!("No frame extraction requested");
            return Ok(InsertionSummary::default());
        }

        let decode = self.find_decode_node(graph)?;
        let checkpoint = graph.checkpoint();

        match self.append_extractions(graph, &decode, options) {
            Ok(sinks) => {
                tracing::info!(
                    "Frame extraction from {}: {}",
                    decode,
                    sinks
                        .iter()
                        .map(|s| format!("{} -> {}", s.kind.label(), s.sink))
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                Ok(InsertionSummary {
                    decode: Some(decode),
                    sinks,
                })
            }
            Err(err) => {
                graph.rollback(checkpoint);
                Err(err)
            }
        }
    }

    /// The last decode node in insertion order. Read-only.
    pub fn find_decode_node(&self, graph: &WorkflowGraph) -> Result<NodeId, ExtractionError> {
        let decode_class = self.classes.class_type(NodeRole::Decode);
        graph
            .last_node_of_class(decode_class)
            .map(|node| node.id.clone())
            .ok_or_else(|| ExtractionError::MissingDecodeNode {
                class_type: decode_class.to_string(),
            })
    }

    fn append_extractions(
        &self,
        graph: &mut WorkflowGraph,
        decode: &NodeId,
        options: &ExtractionOptions,
    ) -> Result<Vec<ExtractedSink>, ExtractionError> {
        let frames = NodeOutput::new(decode.clone(), 0);
        let mut sinks = Vec::new();

        if options.save_first {
            sinks.push(self.append_first_frame(graph, &frames)?);
        }
        if options.save_last {
            sinks.push(self.append_last_frame(graph, &frames)?);
        }
        if let Some(range) = options.active_range() {
            sinks.push(self.append_range(graph, &frames, range)?);
        }

        Ok(sinks)
    }

    fn append_first_frame(
        &self,
        graph: &mut WorkflowGraph,
        frames: &NodeOutput,
    ) -> Result<ExtractedSink, ExtractionError> {
        let slice = self.append_slice(graph, InputValue::literal(0), 1, frames)?;
        let sink = self.append_sink(graph, &slice, self.ids.first_frame_index)?;
        Ok(ExtractedSink {
            kind: SinkKind::FirstFrame,
            slice,
            sink,
            frame_count: None,
        })
    }

    fn append_last_frame(
        &self,
        graph: &mut WorkflowGraph,
        frames: &NodeOutput,
    ) -> Result<ExtractedSink, ExtractionError> {
        let counted = match graph.final_image_out() {
            Some(output) => output.clone(),
            None => {
                tracing::warn!(
                    "No final image output declared, counting frames of {}",
                    frames.node
                );
                frames.clone()
            }
        };

        let frame_count = graph
            .create_node(
                self.classes.class_type(NodeRole::CountFrames),
                [("image", InputValue::Link(counted))],
            )
            .map_err(|source| ExtractionError::Append {
                role: NodeRole::CountFrames,
                source,
            })?;
        tracing::debug!("Appended frame counter {}", frame_count);

        let slice = self.append_slice(graph, InputValue::link(frame_count.clone(), 0), 1, frames)?;
        let sink = self.append_sink(graph, &slice, self.ids.last_frame_index)?;
        Ok(ExtractedSink {
            kind: SinkKind::LastFrame,
            slice,
            sink,
            frame_count: Some(frame_count),
        })
    }

    fn append_range(
        &self,
        graph: &mut WorkflowGraph,
        frames: &NodeOutput,
        range: FrameRange,
    ) -> Result<ExtractedSink, ExtractionError> {
        let slice = self.append_slice(
            graph,
            InputValue::literal(range.start()),
            range.frame_count(),
            frames,
        )?;
        let sink = self.append_sink(graph, &slice, self.ids.range_index)?;
        Ok(ExtractedSink {
            kind: SinkKind::Range,
            slice,
            sink,
            frame_count: None,
        })
    }

    fn append_slice(
        &self,
        graph: &mut WorkflowGraph,
        batch_index: InputValue,
        length: i64,
        frames: &NodeOutput,
    ) -> Result<NodeId, ExtractionError> {
        let slice = graph
            .create_node(
                self.classes.class_type(NodeRole::SliceBatch),
                [
                    ("batch_index", batch_index),
                    ("length", InputValue::literal(length)),
                    ("image", InputValue::Link(frames.clone())),
                ],
            )
            .map_err(|source| ExtractionError::Append {
                role: NodeRole::SliceBatch,
                source,
            })?;
        tracing::debug!("Appended batch slice {} (length {})", slice, length);
        Ok(slice)
    }

    fn append_sink(
        &self,
        graph: &mut WorkflowGraph,
        slice: &NodeId,
        sub_index: u32,
    ) -> Result<NodeId, ExtractionError> {
        let id = graph.stable_dynamic_id(self.ids.reserved_base, sub_index, self.sink_stride());
        let sink = graph
            .create_image_save_node(
                self.classes.class_type(NodeRole::SaveImage),
                NodeOutput::new(slice.clone(), 0),
                &self.classes.bit_depth,
                id,
            )
            .map_err(|source| ExtractionError::Append {
                role: NodeRole::SaveImage,
                source,
            })?;
        tracing::debug!("Appended save sink {}", sink);
        Ok(sink)
    }

    /// Probe step for sink ids: one past the largest sub-index, so each sink
    /// keeps to its own slots in the reserved range.
    fn sink_stride(&self) -> u32 {
        self.ids
            .first_frame_index
            .max(self.ids.last_frame_index)
            .max(self.ids.range_index)
            .saturating_add(1)
    }
}

impl Default for FrameExtractionInserter {
    fn default() -> Self {
        Self::new(&FrameSaverConfig::default())
    }
}
