use std::path::Path;

use parley_types::{EdgeId, NodeId};
use tracing::{debug, error, info, warn};

use crate::error::{Endpoint, LoadError, LoadIssue, LoadReport};
use crate::graph::Graph;
use crate::node::NodeIndex;
use crate::tokenizer::{tag, tokenize, TokenLine};

/// A successfully loaded graph and whatever was skipped on the way
#[derive(Debug, Clone)]
pub struct Loaded {
    pub graph: Graph,
    pub report: LoadReport,
}

/// Builds a [`Graph`] from answer-graph records, one line at a time.
///
/// Malformed lines never abort the load: each one is recorded in the
/// [`LoadReport`] and skipped. Only a graph without any root fails.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    graph: Graph,
    report: LoadReport,
    line: usize,
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tokenize and apply the next line of the source
    pub fn push_line(&mut self, line: &str) -> &mut Self {
        let tokens = tokenize(line);
        self.push_tokens(&tokens)
    }

    /// Apply an already tokenized line
    pub fn push_tokens(&mut self, tokens: &TokenLine) -> &mut Self {
        self.line += 1;
        self.apply(tokens);
        self
    }

    /// Issues found so far
    pub fn report(&self) -> &LoadReport {
        &self.report
    }

    fn record(&mut self, issue: LoadIssue) {
        if issue.drops_record() {
            warn!("{}", issue);
        } else {
            debug!("{}", issue);
        }
        self.report.push(issue);
    }

    fn apply(&mut self, tokens: &TokenLine) {
        let line = self.line;

        // lines without a TYPE are comments or blank
        let Some(kind) = tokens.first(tag::TYPE) else {
            return;
        };

        let Some(raw_id) = tokens.first(tag::ID) else {
            self.record(LoadIssue::MissingId { line });
            return;
        };

        match kind.trim() {
            "NODE" => match raw_id.parse::<NodeId>() {
                Ok(id) => self.add_node(line, id, tokens),
                Err(source) => self.record(LoadIssue::InvalidId { line, source }),
            },
            "EDGE" => match raw_id.parse::<EdgeId>() {
                Ok(id) => self.add_edge(line, id, tokens),
                Err(source) => self.record(LoadIssue::InvalidId { line, source }),
            },
            other => self.record(LoadIssue::UnknownType {
                line,
                kind: other.to_string(),
            }),
        }
    }

    fn add_node(&mut self, line: usize, id: NodeId, tokens: &TokenLine) {
        let Some(index) = self.graph.insert_node(id) else {
            self.record(LoadIssue::DuplicateNode { line, id });
            return;
        };

        for answer in tokens.all(tag::ANSWER) {
            self.graph.add_answer(index, answer);
        }
        debug!(
            "Loaded {} with {} answers",
            id,
            self.graph.node(index).answers().len()
        );
    }

    fn add_edge(&mut self, line: usize, id: EdgeId, tokens: &TokenLine) {
        let parent = match self.resolve(line, id, Endpoint::Parent, tokens) {
            Ok(index) => index,
            Err(issue) => return self.record(issue),
        };
        let child = match self.resolve(line, id, Endpoint::Child, tokens) {
            Ok(index) => index,
            Err(issue) => return self.record(issue),
        };

        let edge = self
            .graph
            .connect(id, parent, child, tokens.all(tag::KEYWORD));
        debug!(
            "Loaded {} ({} -> {}) with {} keywords",
            id,
            self.graph.node(parent).id(),
            self.graph.node(child).id(),
            self.graph.edge(edge).keywords().len()
        );
    }

    fn resolve(
        &self,
        line: usize,
        id: EdgeId,
        endpoint: Endpoint,
        tokens: &TokenLine,
    ) -> Result<NodeIndex, LoadIssue> {
        let name = match endpoint {
            Endpoint::Parent => tag::PARENT,
            Endpoint::Child => tag::CHILD,
        };
        let raw = tokens
            .first(name)
            .ok_or(LoadIssue::MissingEndpoint { line, id, endpoint })?;
        let node = raw
            .parse::<NodeId>()
            .map_err(|source| LoadIssue::InvalidEndpoint {
                line,
                id,
                endpoint,
                source,
            })?;
        self.graph
            .find_node(node)
            .ok_or(LoadIssue::UnresolvedEndpoint {
                line,
                id,
                endpoint,
                node,
            })
    }

    /// Finish the load and pick the root.
    ///
    /// The root is the first node, in creation order, without incoming
    /// edges. Further candidates are reported as [`LoadIssue::MultipleRoots`].
    pub fn build(mut self) -> Result<Loaded, LoadError> {
        let candidates: Vec<NodeIndex> = self.graph.root_candidates().collect();

        let Some((&root, others)) = candidates.split_first() else {
            error!(
                "No root node found among {} nodes",
                self.graph.node_count()
            );
            return Err(LoadError::NoRoot {
                report: self.report,
            });
        };

        if !others.is_empty() {
            let issue = LoadIssue::MultipleRoots {
                candidates: candidates
                    .iter()
                    .map(|&index| self.graph.node(index).id())
                    .collect(),
                chosen: self.graph.node(root).id(),
            };
            warn!("{}", issue);
            self.report.push(issue);
        }

        self.graph.set_root(root);
        info!(
            nodes = self.graph.node_count(),
            edges = self.graph.edge_count(),
            issues = self.report.len(),
            "Answer graph loaded, root is {}",
            self.graph.node(root).id()
        );

        Ok(Loaded {
            graph: self.graph,
            report: self.report,
        })
    }
}

/// Build a graph from the full text of an answer-graph description
pub fn load_graph(text: &str) -> Result<Loaded, LoadError> {
    let mut builder = GraphBuilder::new();
    for line in text.lines() {
        builder.push_line(line);
    }
    builder.build()
}

/// Read and build a graph from a file on disk
pub fn load_graph_from_file(path: impl AsRef<Path>) -> Result<Loaded, LoadError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Loading answer graph from {}", path.display());
    load_graph(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_node_without_parents() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1><ANSWER:Hello>\n\
             <TYPE:NODE><ID:2><ANSWER:Bye>\n\
             <TYPE:EDGE><ID:1><PARENT:1><CHILD:2><KEYWORD:bye>",
        )
        .unwrap();

        let root = loaded.graph.root().unwrap();
        assert_eq!(loaded.graph.node(root).id(), NodeId(1));
        assert!(loaded.report.is_empty());
    }

    #[test]
    fn test_missing_id_is_reported_and_skipped() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ANSWER:orphan>",
        )
        .unwrap();

        assert_eq!(loaded.graph.node_count(), 1);
        assert_eq!(loaded.report.issues(), &[LoadIssue::MissingId { line: 2 }]);
    }

    #[test]
    fn test_non_integer_id_is_reported() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ID:two>",
        )
        .unwrap();

        assert_eq!(loaded.graph.node_count(), 1);
        assert!(matches!(
            loaded.report.issues(),
            [LoadIssue::InvalidId { line: 2, .. }]
        ));
    }

    #[test]
    fn test_lines_without_type_are_ignored() {
        let loaded = load_graph(
            "# answer graph\n\
             \n\
             <ID:4><ANSWER:no type here>\n\
             <TYPE:NODE><ID:1>",
        )
        .unwrap();

        assert_eq!(loaded.graph.node_count(), 1);
        assert!(loaded.report.is_empty());
    }

    #[test]
    fn test_nested_marker_is_not_a_record() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <a <TYPE:NODE><ID:2><ANSWER:smuggled>",
        )
        .unwrap();

        assert_eq!(loaded.graph.node_count(), 1);
        assert!(loaded.graph.find_node(NodeId(2)).is_none());
        assert!(loaded.report.is_empty());
    }

    #[test]
    fn test_unknown_type_is_reported() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:IMAGE><ID:2>",
        )
        .unwrap();

        assert_eq!(
            loaded.report.issues(),
            &[LoadIssue::UnknownType {
                line: 2,
                kind: "IMAGE".to_string()
            }]
        );
    }

    #[test]
    fn test_first_node_definition_wins() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1><ANSWER:first>\n\
             <TYPE:NODE><ID:1><ANSWER:second><ANSWER:third>",
        )
        .unwrap();

        let root = loaded.graph.root().unwrap();
        assert_eq!(loaded.graph.node(root).answers(), &["first".to_string()]);
        assert_eq!(
            loaded.report.issues(),
            &[LoadIssue::DuplicateNode {
                line: 2,
                id: NodeId(1)
            }]
        );
        assert!(loaded.report.dropped_lines().is_empty());
    }

    #[test]
    fn test_edge_to_unknown_parent_is_dropped() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ID:2>\n\
             <TYPE:EDGE><ID:1><PARENT:1><CHILD:2><KEYWORD:go>\n\
             <TYPE:EDGE><ID:2><PARENT:99><CHILD:2><KEYWORD:lost>",
        )
        .unwrap();

        assert_eq!(loaded.graph.edge_count(), 1);
        assert_eq!(
            loaded.report.issues(),
            &[LoadIssue::UnresolvedEndpoint {
                line: 4,
                id: EdgeId(2),
                endpoint: Endpoint::Parent,
                node: NodeId(99),
            }]
        );
        assert_eq!(loaded.report.dropped_lines(), vec![4]);
    }

    #[test]
    fn test_edge_missing_child_is_dropped() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:EDGE><ID:7><PARENT:1><KEYWORD:x>",
        )
        .unwrap();

        assert_eq!(loaded.graph.edge_count(), 0);
        assert_eq!(
            loaded.report.issues(),
            &[LoadIssue::MissingEndpoint {
                line: 2,
                id: EdgeId(7),
                endpoint: Endpoint::Child,
            }]
        );
    }

    #[test]
    fn test_edge_before_its_nodes_is_dropped() {
        let loaded = load_graph(
            "<TYPE:EDGE><ID:1><PARENT:1><CHILD:2>\n\
             <TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ID:2>",
        )
        .unwrap();

        assert_eq!(loaded.graph.edge_count(), 0);
        assert!(loaded.report.has_multiple_roots());
    }

    #[test]
    fn test_multiple_roots_choose_first_created() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:8>\n\
             <TYPE:NODE><ID:3>",
        )
        .unwrap();

        let root = loaded.graph.root().unwrap();
        assert_eq!(loaded.graph.node(root).id(), NodeId(8));
        assert_eq!(
            loaded.report.issues(),
            &[LoadIssue::MultipleRoots {
                candidates: vec![NodeId(8), NodeId(3)],
                chosen: NodeId(8),
            }]
        );
    }

    #[test]
    fn test_no_root_fails_with_report() {
        let err = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ID:2>\n\
             <TYPE:EDGE><ID:1><PARENT:1><CHILD:2>\n\
             <TYPE:EDGE><ID:2><PARENT:2><CHILD:1>\n\
             <TYPE:NODE>",
        )
        .unwrap_err();

        match err {
            LoadError::NoRoot { report } => {
                assert_eq!(report.issues(), &[LoadIssue::MissingId { line: 5 }]);
            }
            other => panic!("Expected NoRoot, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_source_has_no_root() {
        assert!(matches!(load_graph(""), Err(LoadError::NoRoot { .. })));
    }

    #[test]
    fn test_push_tokens_counts_lines() {
        let mut builder = GraphBuilder::new();
        builder
            .push_line("<TYPE:NODE><ID:1>")
            .push_tokens(&tokenize("<TYPE:NODE>"));

        assert_eq!(builder.report().issues(), &[LoadIssue::MissingId { line: 2 }]);
    }
}
