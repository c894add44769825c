//! Common test utilities and helpers

#![allow(dead_code)] // Test utilities may not all be used in every test file

pub mod builders;

use framesaver_rs::config::{FrameSaverConfig, ParamRegistry, UserInput};
use framesaver_rs::extension::FrameSaverExtension;
use framesaver_rs::workflow::{Node, NodeId, WorkflowGenerator, WorkflowGraph};

/// Generator with the frame saver registered against `config`
pub fn frame_saver_generator(config: &FrameSaverConfig) -> (FrameSaverExtension, WorkflowGenerator) {
    let mut registry = ParamRegistry::new();
    let mut generator = WorkflowGenerator::new();
    let extension = FrameSaverExtension::init(config, &mut registry, &mut generator);
    (extension, generator)
}

/// User input with the given extraction request
pub fn extraction_input(
    extension: &FrameSaverExtension,
    first: bool,
    last: bool,
    range: Option<(i64, i64)>,
) -> UserInput {
    let params = extension.params().expect("frame saver params registered");
    let mut input = UserInput::new();
    input.set(&params.save_first, first);
    input.set(&params.save_last, last);
    if let Some((start, end)) = range {
        input.set(&params.range_start, start);
        input.set(&params.range_end, end);
    }
    input
}

/// Nodes appended after the first `before` nodes
pub fn appended(graph: &WorkflowGraph, before: usize) -> &[Node] {
    &graph.nodes()[before..]
}

pub fn node<'a>(graph: &'a WorkflowGraph, id: &str) -> &'a Node {
    graph
        .node(&NodeId::from(id))
        .unwrap_or_else(|| panic!("node {} not in graph", id))
}
