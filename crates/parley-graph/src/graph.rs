use crate::edge::{EdgeIndex, GraphEdge};
use crate::node::{GraphNode, NodeIndex};
use parley_types::{EdgeId, NodeId};
use std::collections::HashMap;

/// Answer graph stored as two arenas.
///
/// Nodes and edges are addressed by [`NodeIndex`] / [`EdgeIndex`]; parent and
/// child links are indices resolved through the graph, never references.
/// Indices handed out by one graph are only meaningful for that graph.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    by_id: HashMap<NodeId, NodeIndex>,
    root: Option<NodeIndex>,
}

impl Graph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a node unless one with the same id exists.
    ///
    /// Returns `None` for a duplicate id; the existing node is left untouched.
    pub(crate) fn insert_node(&mut self, id: NodeId) -> Option<NodeIndex> {
        if self.by_id.contains_key(&id) {
            return None;
        }
        let index = NodeIndex(self.nodes.len());
        self.nodes.push(GraphNode::new(id));
        self.by_id.insert(id, index);
        Some(index)
    }

    pub(crate) fn add_answer(&mut self, node: NodeIndex, answer: impl Into<String>) {
        self.nodes[node.0].add_answer(answer);
    }

    /// Create an edge and register it with both endpoints
    pub(crate) fn connect<I, S>(
        &mut self,
        id: EdgeId,
        parent: NodeIndex,
        child: NodeIndex,
        keywords: I,
    ) -> EdgeIndex
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let index = EdgeIndex(self.edges.len());
        let mut edge = GraphEdge::new(id, parent, child);
        for keyword in keywords {
            edge.add_keyword(keyword);
        }
        self.edges.push(edge);

        self.nodes[child.0].add_parent_edge(index);
        self.nodes[parent.0].add_child_edge(index);
        index
    }

    pub(crate) fn set_root(&mut self, root: NodeIndex) {
        self.root = Some(root);
    }

    pub fn node(&self, index: NodeIndex) -> &GraphNode {
        &self.nodes[index.0]
    }

    pub fn edge(&self, index: EdgeIndex) -> &GraphEdge {
        &self.edges[index.0]
    }

    pub fn find_node(&self, id: NodeId) -> Option<NodeIndex> {
        self.by_id.get(&id).copied()
    }

    pub fn root(&self) -> Option<NodeIndex> {
        self.root
    }

    /// Nodes without incoming edges, in creation order
    pub fn root_candidates(&self) -> impl Iterator<Item = NodeIndex> + '_ {
        self.nodes()
            .filter(|(_, node)| node.is_root_candidate())
            .map(|(index, _)| index)
    }

    /// Outgoing edges of `node`, in the order they were loaded
    pub fn outgoing(&self, node: NodeIndex) -> impl Iterator<Item = (EdgeIndex, &GraphEdge)> + '_ {
        self.nodes[node.0]
            .child_edges()
            .iter()
            .map(move |&index| (index, &self.edges[index.0]))
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeIndex, &GraphNode)> + '_ {
        self.nodes
            .iter()
            .enumerate()
            .map(|(i, node)| (NodeIndex(i), node))
    }

    pub fn edges(&self) -> impl Iterator<Item = (EdgeIndex, &GraphEdge)> + '_ {
        self.edges
            .iter()
            .enumerate()
            .map(|(i, edge)| (EdgeIndex(i), edge))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
