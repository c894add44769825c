//! Test data builders for creating workflows

use framesaver_rs::workflow::{InputValue, Node, NodeOutput, WorkflowGraph};

/// Builder for text-to-video style workflows
///
/// Produces `loader -> sampler -> decode(s) -> [upscale] -> animation save`,
/// using the low ids real workflows use.
pub struct VideoWorkflowBuilder {
    decodes: usize,
    upscale: bool,
    declare_final: bool,
    extra: Vec<Node>,
}

impl VideoWorkflowBuilder {
    pub fn new() -> Self {
        Self {
            decodes: 1,
            upscale: false,
            declare_final: true,
            extra: Vec::new(),
        }
    }

    /// Number of `VAEDecode` nodes, each reading the sampler output
    pub fn decodes(mut self, count: usize) -> Self {
        self.decodes = count;
        self
    }

    /// Add an upscale after the last decode and make it the final output
    pub fn upscale(mut self) -> Self {
        self.upscale = true;
        self
    }

    /// Leave the final image output undeclared
    pub fn without_final_output(mut self) -> Self {
        self.declare_final = false;
        self
    }

    /// Extra node appended after the generated ones
    pub fn with_node(mut self, node: Node) -> Self {
        self.extra.push(node);
        self
    }

    pub fn build(self) -> WorkflowGraph {
        let mut graph = WorkflowGraph::new();
        graph
            .add_node(
                Node::new("4", "CheckpointLoaderSimple")
                    .with_input("ckpt_name", InputValue::literal("video.safetensors")),
            )
            .unwrap();
        graph
            .add_node(
                Node::new("3", "KSampler")
                    .with_input("model", InputValue::link("4", 0))
                    .with_input("seed", InputValue::literal(42))
                    .with_input("steps", InputValue::literal(20)),
            )
            .unwrap();

        let mut last = NodeOutput::new("3", 0);
        for i in 0..self.decodes {
            let id = (8 + i * 10).to_string();
            graph
                .add_node(
                    Node::new(id.as_str(), "VAEDecode")
                        .with_input("samples", InputValue::link("3", 0))
                        .with_input("vae", InputValue::link("4", 2)),
                )
                .unwrap();
            last = NodeOutput::new(id, 0);
        }

        if self.upscale {
            graph
                .add_node(
                    Node::new("90", "ImageScaleBy")
                        .with_input("image", InputValue::Link(last))
                        .with_input("scale_by", InputValue::literal(2.0)),
                )
                .unwrap();
            last = NodeOutput::new("90", 0);
        }

        graph
            .add_node(
                Node::new("9", "SwarmSaveAnimationWS")
                    .with_input("images", InputValue::Link(last.clone())),
            )
            .unwrap();

        for node in self.extra {
            graph.add_node(node).unwrap();
        }

        if self.declare_final {
            graph.set_final_image_out(last).unwrap();
        }
        graph
    }
}

impl Default for VideoWorkflowBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_video_workflow_builder() {
        let graph = VideoWorkflowBuilder::new().decodes(2).upscale().build();

        assert_eq!(graph.len(), 6);
        assert_eq!(graph.nodes_of_class("VAEDecode").count(), 2);
        assert_eq!(graph.final_image_out(), Some(&NodeOutput::new("90", 0)));
        assert!(graph.validate().is_ok());
    }
}
