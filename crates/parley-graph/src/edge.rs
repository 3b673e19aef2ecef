use crate::node::NodeIndex;
use parley_types::EdgeId;

/// Position of an edge inside its [`Graph`](crate::Graph) arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeIndex(pub(crate) usize);

impl EdgeIndex {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Keyword-labelled transition from a parent node to a child node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    id: EdgeId,
    keywords: Vec<String>,
    parent: NodeIndex,
    child: NodeIndex,
}

impl GraphEdge {
    pub(crate) fn new(id: EdgeId, parent: NodeIndex, child: NodeIndex) -> Self {
        Self {
            id,
            keywords: Vec::new(),
            parent,
            child,
        }
    }

    pub fn id(&self) -> EdgeId {
        self.id
    }

    /// Keywords as written in the source; matching upper-cases them
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn parent(&self) -> NodeIndex {
        self.parent
    }

    pub fn child(&self) -> NodeIndex {
        self.child
    }

    pub(crate) fn add_keyword(&mut self, keyword: impl Into<String>) {
        self.keywords.push(keyword.into());
    }
}
