//! # FrameSaver-RS: Frame extraction for video generation workflows
//!
//! Adds optional outputs to a node-graph workflow that produces video: the
//! first frame, the last frame and/or a contiguous range of frames, each saved
//! as a separate image. The pass appends nodes after the workflow's last
//! `VAEDecode` node and never touches existing nodes.
//!
//! ## Architecture
//!
//! - **Workflow**: Append-only node graph, build steps and diagnostics
//! - **Extraction**: Parameter resolution and the node insertion pass
//! - **Extension**: Registers parameters and the build step at startup
//! - **Config**: Node class names, reserved id range and step priority
//!
//! ## Configuration
//!
//! The optional configuration file is stored in the platform-appropriate
//! config directory under `framesaver-rs`:
//!
//! - **Linux**: `~/.config/framesaver-rs/config.toml`
//! - **macOS**: `~/Library/Application Support/framesaver-rs/config.toml`
//! - **Windows**: `%APPDATA%\framesaver-rs\config.toml`
//!
//! ## Example
//!
//! ```ignore
//! use framesaver_rs::{
//!     config::{FrameSaverConfig, ParamRegistry, UserInput},
//!     extension::FrameSaverExtension,
//!     workflow::{TracingDiagnostics, WorkflowGenerator, WorkflowGraph},
//! };
//!
//! fn main() -> framesaver_rs::Result<()> {
//!     let config = FrameSaverConfig::load_from_default_location();
//!     let mut registry = ParamRegistry::new();
//!     let mut generator = WorkflowGenerator::new();
//!     let extension = FrameSaverExtension::init(&config, &mut registry, &mut generator);
//!
//!     let mut input = UserInput::new();
//!     if let Some(params) = extension.params() {
//!         input.set(&params.save_last, true);
//!     }
//!
//!     let mut graph = WorkflowGraph::load("workflow.json")?;
//!     generator.generate(&mut graph, &input, &mut TracingDiagnostics::new());
//!     graph.save("workflow.out.json")
//! }
//! ```

pub mod config;
pub mod error;
pub mod extension;
pub mod extraction;
pub mod workflow;

// Re-export commonly used types
pub use config::FrameSaverConfig;
pub use error::{FrameSaverError, Result};
pub use extension::FrameSaverExtension;
pub use extraction::{ExtractionOptions, FrameExtractionInserter};
pub use workflow::{WorkflowGenerator, WorkflowGraph};
