//! Workflow graph and build-step plumbing.
//!
//! A workflow is a DAG of nodes described in API-format JSON. Build steps
//! registered on a [`WorkflowGenerator`] run once per build and append nodes
//! to the graph; none of them execute anything.
//!
//! # Layout
//!
//! ```text
//! [KSampler] ──► [VAEDecode] ──► [SaveImage]
//!                     │
//!                     └──► [ImageFromBatch] ──► [SwarmSaveImageWS]   (appended)
//! ```
//!
//! # Design
//!
//! - **Links live in inputs**: an edge is an `InputValue::Link` inside the
//!   consumer, so there is no separate edge list to keep in sync.
//! - **Append-only**: steps never rewire existing nodes.
//! - **Deferred values**: a link to a counting node stands in for a number
//!   only known at execution time.

pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod graph;
pub mod id;
pub mod node;
pub mod node_role;
pub mod value;

pub use diagnostics::{CollectedDiagnostics, Diagnostic, DiagnosticSink, TracingDiagnostics};
pub use error::{WorkflowError, WorkflowResult};
pub use generator::{BuildContext, StepFn, WorkflowGenerator};
pub use graph::{Checkpoint, WorkflowGraph, DEFAULT_FIRST_DYNAMIC_ID};
pub use id::NodeId;
pub use node::Node;
pub use node_role::NodeRole;
pub use value::{InputValue, NodeOutput};
