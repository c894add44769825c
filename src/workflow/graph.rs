//! Append-only workflow graph.
//!
//! Nodes are kept in insertion order, which for loaded workflows is document
//! order. Build steps only ever append; the one exception is [`rollback`],
//! which lets a step discard exactly the nodes it appended itself.
//!
//! [`rollback`]: WorkflowGraph::rollback

use crate::error::{Result, ResultExt};
use crate::workflow::error::{WorkflowError, WorkflowResult};
use crate::workflow::id::NodeId;
use crate::workflow::node::Node;
use crate::workflow::value::{InputValue, NodeOutput};
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::path::Path;

/// First identifier handed out to nodes created without an explicit id.
pub const DEFAULT_FIRST_DYNAMIC_ID: u32 = 100;

/// Graph state captured by [`WorkflowGraph::checkpoint`].
#[derive(Debug, Clone)]
pub struct Checkpoint {
    len: usize,
    next_dynamic_id: u32,
    final_image_out: Option<NodeOutput>,
}

#[derive(Debug, Clone)]
pub struct WorkflowGraph {
    nodes: Vec<Node>,
    /// Node id -> index into `nodes`.
    index: HashMap<NodeId, usize>,
    next_dynamic_id: u32,
    /// Terminal image output of the workflow, independent of which node produces it.
    final_image_out: Option<NodeOutput>,
}

impl WorkflowGraph {
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            index: HashMap::new(),
            next_dynamic_id: DEFAULT_FIRST_DYNAMIC_ID,
            final_image_out: None,
        }
    }

    pub fn with_first_dynamic_id(mut self, id: u32) -> Self {
        self.next_dynamic_id = id;
        self
    }

    // ── Queries ──

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn node(&self, id: &NodeId) -> Option<&Node> {
        self.index.get(id).map(|&idx| &self.nodes[idx])
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.contains_key(id)
    }

    /// All nodes of `class_type`, in insertion order.
    pub fn nodes_of_class<'a>(&'a self, class_type: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.nodes.iter().filter(move |node| node.is_class(class_type))
    }

    pub fn last_node_of_class(&self, class_type: &str) -> Option<&Node> {
        self.nodes.iter().rev().find(|node| node.is_class(class_type))
    }

    /// Every edge as `(consumer, input name, producer output)`.
    pub fn links(&self) -> impl Iterator<Item = (&NodeId, &str, &NodeOutput)> {
        self.nodes
            .iter()
            .flat_map(|node| node.links().map(move |(input, link)| (&node.id, input, link)))
    }

    pub fn final_image_out(&self) -> Option<&NodeOutput> {
        self.final_image_out.as_ref()
    }

    // ── Mutation ──

    /// Append a node. Every link must point at a node that already exists.
    pub fn add_node(&mut self, node: Node) -> WorkflowResult<NodeId> {
        if !node.id.is_valid() {
            return Err(WorkflowError::InvalidNodeId);
        }
        if node.class_type.is_empty() {
            return Err(WorkflowError::MissingClassType(node.id));
        }
        if self.index.contains_key(&node.id) {
            return Err(WorkflowError::DuplicateNode(node.id));
        }
        for (input, link) in node.links() {
            if !self.index.contains_key(&link.node) {
                return Err(WorkflowError::DanglingLink {
                    node: node.id.clone(),
                    input: input.to_string(),
                    target: link.node.clone(),
                });
            }
        }

        let id = node.id.clone();
        self.index.insert(id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(id)
    }

    /// Append a node under the next free sequential id.
    pub fn create_node<I, K>(&mut self, class_type: impl Into<String>, inputs: I) -> WorkflowResult<NodeId>
    where
        I: IntoIterator<Item = (K, InputValue)>,
        K: Into<String>,
    {
        let id = self.allocate_dynamic_id();
        self.create_node_with_id(id, class_type, inputs)
    }

    pub fn create_node_with_id<I, K>(
        &mut self,
        id: NodeId,
        class_type: impl Into<String>,
        inputs: I,
    ) -> WorkflowResult<NodeId>
    where
        I: IntoIterator<Item = (K, InputValue)>,
        K: Into<String>,
    {
        let node = Node {
            id,
            class_type: class_type.into(),
            inputs: inputs
                .into_iter()
                .map(|(name, value)| (name.into(), value))
                .collect(),
            meta: None,
        };
        self.add_node(node)
    }

    /// Append an image save sink consuming `images`.
    pub fn create_image_save_node(
        &mut self,
        class_type: &str,
        images: NodeOutput,
        bit_depth: &str,
        id: NodeId,
    ) -> WorkflowResult<NodeId> {
        self.create_node_with_id(
            id,
            class_type,
            [
                ("images", InputValue::Link(images)),
                ("bit_depth", InputValue::literal(bit_depth)),
            ],
        )
    }

    /// First free identifier among `base + sub_index + k * stride`, k = 0, 1, ...
    ///
    /// With `stride` at least the number of sub-indices in use, each
    /// sub-index probes its own residue class, so the id one sub-index gets
    /// never depends on which other sub-indices were allocated. The result
    /// depends only on the graph's current ids, so two builds of the same
    /// workflow get the same identifiers.
    pub fn stable_dynamic_id(&self, base: u32, sub_index: u32, stride: u32) -> NodeId {
        let stride = stride.max(1);
        let mut candidate = base.wrapping_add(sub_index);
        loop {
            let id = NodeId::from(candidate);
            if !self.index.contains_key(&id) {
                return id;
            }
            candidate = candidate.wrapping_add(stride);
        }
    }

    fn allocate_dynamic_id(&mut self) -> NodeId {
        loop {
            let candidate = NodeId::from(self.next_dynamic_id);
            self.next_dynamic_id = self.next_dynamic_id.wrapping_add(1);
            if !self.index.contains_key(&candidate) {
                return candidate;
            }
        }
    }

    pub fn set_final_image_out(&mut self, output: NodeOutput) -> WorkflowResult<()> {
        if !self.index.contains_key(&output.node) {
            return Err(WorkflowError::UnknownNode(output.node));
        }
        self.final_image_out = Some(output);
        Ok(())
    }

    /// Declare the last node of `class_type` as the final image output,
    /// unless one is already declared.
    pub fn infer_final_image_out(&mut self, class_type: &str) -> Option<&NodeOutput> {
        if self.final_image_out.is_none() {
            self.final_image_out = self.last_node_of_class(class_type).map(|node| node.output(0));
        }
        self.final_image_out.as_ref()
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            len: self.nodes.len(),
            next_dynamic_id: self.next_dynamic_id,
            final_image_out: self.final_image_out.clone(),
        }
    }

    /// Drop every node appended since `checkpoint` was taken.
    pub fn rollback(&mut self, checkpoint: Checkpoint) {
        if checkpoint.len < self.nodes.len() {
            for node in self.nodes.drain(checkpoint.len..) {
                self.index.remove(&node.id);
            }
        }
        self.next_dynamic_id = checkpoint.next_dynamic_id;
        self.final_image_out = checkpoint.final_image_out;
    }

    // ── Validation (Kahn's algorithm) ──

    /// Node ids in dependency order. Fails on dangling links or cycles.
    pub fn topological_order(&self) -> WorkflowResult<Vec<NodeId>> {
        let n = self.nodes.len();
        let mut in_degree = vec![0usize; n];
        let mut adj: Vec<Vec<usize>> = vec![Vec::new(); n];

        for (to, node) in self.nodes.iter().enumerate() {
            for (input, link) in node.links() {
                let from = *self.index.get(&link.node).ok_or_else(|| WorkflowError::DanglingLink {
                    node: node.id.clone(),
                    input: input.to_string(),
                    target: link.node.clone(),
                })?;
                adj[from].push(to);
                in_degree[to] += 1;
            }
        }

        let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
        let mut order = Vec::with_capacity(n);

        while let Some(idx) = queue.pop_front() {
            order.push(idx);
            for &next in &adj[idx] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    queue.push_back(next);
                }
            }
        }

        if order.len() != n {
            return Err(WorkflowError::CycleDetected {
                scheduled: order.len(),
                total: n,
            });
        }

        Ok(order.into_iter().map(|idx| self.nodes[idx].id.clone()).collect())
    }

    pub fn validate(&self) -> WorkflowResult<()> {
        self.topological_order().map(|_| ())
    }

    // ── JSON documents ──

    /// Parse an API-format workflow: `{ "<id>": { "class_type", "inputs" } }`.
    ///
    /// A key repeated in the document is a [`WorkflowError::DuplicateNode`].
    pub fn from_json_str(json: &str) -> WorkflowResult<Self> {
        let DocumentEntries(entries) = serde_json::from_str(json)?;
        Self::from_entries(entries)
    }

    pub fn from_document(document: Map<String, Value>) -> WorkflowResult<Self> {
        Self::from_entries(document)
    }

    fn from_entries(entries: impl IntoIterator<Item = (String, Value)>) -> WorkflowResult<Self> {
        let mut graph = Self::new();
        for (key, body) in entries {
            let mut node: Node = serde_json::from_value(body).map_err(|source| {
                WorkflowError::InvalidNode {
                    id: key.clone(),
                    source,
                }
            })?;
            node.id = NodeId::new(key);
            if !node.id.is_valid() {
                return Err(WorkflowError::InvalidNodeId);
            }
            if node.class_type.is_empty() {
                return Err(WorkflowError::MissingClassType(node.id));
            }
            if graph.index.contains_key(&node.id) {
                return Err(WorkflowError::DuplicateNode(node.id));
            }
            // Links may point forward in document order; checked below.
            graph.index.insert(node.id.clone(), graph.nodes.len());
            graph.nodes.push(node);
        }
        graph.validate()?;
        tracing::debug!("Parsed workflow with {} nodes", graph.len());
        Ok(graph)
    }

    pub fn to_document(&self) -> WorkflowResult<Map<String, Value>> {
        let mut document = Map::new();
        for node in &self.nodes {
            document.insert(node.id.to_string(), serde_json::to_value(node)?);
        }
        Ok(document)
    }

    pub fn to_json_string_pretty(&self) -> WorkflowResult<String> {
        Ok(serde_json::to_string_pretty(&self.to_document()?)?)
    }

    /// Load a workflow file from disk
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let graph = Self::from_json_str(&content)
            .with_context(|| format!("Failed to parse workflow {:?}", path))?;
        tracing::info!("Loaded workflow {:?} ({} nodes)", path, graph.len());
        Ok(graph)
    }

    /// Save the workflow to disk as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let content = self
            .to_json_string_pretty()
            .with_context(|| format!("Failed to serialize workflow for {:?}", path))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Top-level workflow object as ordered `(key, body)` pairs.
///
/// `serde_json::Map` keeps only the last of repeated keys; this keeps all of
/// them so the graph can reject the repeat.
struct DocumentEntries(Vec<(String, Value)>);

impl<'de> Deserialize<'de> for DocumentEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = DocumentEntries;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a workflow object keyed by node id")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(entry) = map.next_entry::<String, Value>()? {
                    entries.push(entry);
                }
                Ok(DocumentEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl Default for WorkflowGraph {
    fn default() -> Self {
        Self::new()
    }
}
