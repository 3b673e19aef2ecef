use crate::edge::EdgeIndex;
use parley_types::NodeId;

/// Position of a node inside its [`Graph`](crate::Graph) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeIndex(pub(crate) usize);

impl NodeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A conversation state and the answers the bot may give on arrival
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphNode {
    id: NodeId,
    answers: Vec<String>,
    // outgoing, owned by this node
    child_edges: Vec<EdgeIndex>,
    // incoming, owned by the parent nodes
    parent_edges: Vec<EdgeIndex>,
}

impl GraphNode {
    pub(crate) fn new(id: NodeId) -> Self {
        Self {
            id,
            answers: Vec::new(),
            child_edges: Vec::new(),
            parent_edges: Vec::new(),
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn answers(&self) -> &[String] {
        &self.answers
    }

    pub fn child_edges(&self) -> &[EdgeIndex] {
        &self.child_edges
    }

    pub fn parent_edges(&self) -> &[EdgeIndex] {
        &self.parent_edges
    }

    /// Nodes without incoming edges may start a conversation
    pub fn is_root_candidate(&self) -> bool {
        self.parent_edges.is_empty()
    }

    pub(crate) fn add_answer(&mut self, answer: impl Into<String>) {
        self.answers.push(answer.into());
    }

    pub(crate) fn add_child_edge(&mut self, edge: EdgeIndex) {
        self.child_edges.push(edge);
    }

    pub(crate) fn add_parent_edge(&mut self, edge: EdgeIndex) {
        self.parent_edges.push(edge);
    }
}
