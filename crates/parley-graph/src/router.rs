use crate::distance::edit_distance;
use crate::edge::EdgeIndex;
use crate::graph::Graph;
use crate::node::NodeIndex;

/// Decides where the conversation goes after a user message
pub trait Router: Send + Sync {
    fn next(&self, graph: &Graph, current: NodeIndex, message: &str) -> NextNode;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextNode {
    /// Follow this edge to its child
    Edge {
        edge: EdgeIndex,
        keyword: String,
        distance: usize,
    },
    /// Nothing to match against, go back to the root
    Root,
}

/// Fuzzy keyword router:
/// every keyword of every outgoing edge is scored against the whole message
/// by edit distance, and the lowest score wins. Ties go to the edge and
/// keyword loaded first.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRouter;

impl Router for LevenshteinRouter {
    fn next(&self, graph: &Graph, current: NodeIndex, message: &str) -> NextNode {
        let mut best: Option<(EdgeIndex, &str, usize)> = None;

        for (index, edge) in graph.outgoing(current) {
            for keyword in edge.keywords() {
                let distance = edit_distance(keyword, message);
                // strict comparison keeps the first minimum
                if best.map_or(true, |(_, _, d)| distance < d) {
                    best = Some((index, keyword.as_str(), distance));
                }
            }
        }

        match best {
            Some((edge, keyword, distance)) => NextNode::Edge {
                edge,
                keyword: keyword.to_string(),
                distance,
            },
            None => NextNode::Root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::load_graph;
    use parley_types::EdgeId;

    fn edge_id(graph: &Graph, next: &NextNode) -> Option<EdgeId> {
        match next {
            NextNode::Edge { edge, .. } => Some(graph.edge(*edge).id()),
            NextNode::Root => None,
        }
    }

    #[test]
    fn test_closest_keyword_wins() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ID:2>\n\
             <TYPE:NODE><ID:3>\n\
             <TYPE:EDGE><ID:1><PARENT:1><CHILD:2><KEYWORD:hi>\n\
             <TYPE:EDGE><ID:2><PARENT:1><CHILD:3><KEYWORD:hello>",
        )
        .unwrap();
        let graph = &loaded.graph;
        let root = graph.root().unwrap();

        let next = LevenshteinRouter.next(graph, root, "helo");
        assert_eq!(edge_id(graph, &next), Some(EdgeId(2)));
        assert!(matches!(next, NextNode::Edge { distance: 1, .. }));
    }

    #[test]
    fn test_ties_go_to_first_loaded_edge() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ID:2>\n\
             <TYPE:NODE><ID:3>\n\
             <TYPE:EDGE><ID:1><PARENT:1><CHILD:2><KEYWORD:cat>\n\
             <TYPE:EDGE><ID:2><PARENT:1><CHILD:3><KEYWORD:bat>",
        )
        .unwrap();
        let graph = &loaded.graph;

        let next = LevenshteinRouter.next(graph, graph.root().unwrap(), "rat");
        assert_eq!(edge_id(graph, &next), Some(EdgeId(1)));
    }

    #[test]
    fn test_best_keyword_of_later_edge_beats_earlier_edge() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ID:2>\n\
             <TYPE:NODE><ID:3>\n\
             <TYPE:EDGE><ID:1><PARENT:1><CHILD:2><KEYWORD:pointer><KEYWORD:reference>\n\
             <TYPE:EDGE><ID:2><PARENT:1><CHILD:3><KEYWORD:stack><KEYWORD:heap>",
        )
        .unwrap();
        let graph = &loaded.graph;

        match LevenshteinRouter.next(graph, graph.root().unwrap(), "HEAP") {
            NextNode::Edge {
                edge,
                keyword,
                distance,
            } => {
                assert_eq!(graph.edge(edge).id(), EdgeId(2));
                assert_eq!(keyword, "heap");
                assert_eq!(distance, 0);
            }
            NextNode::Root => panic!("Expected an edge"),
        }
    }

    #[test]
    fn test_leaf_routes_to_root() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ID:2>\n\
             <TYPE:EDGE><ID:1><PARENT:1><CHILD:2><KEYWORD:go>",
        )
        .unwrap();
        let graph = &loaded.graph;
        let leaf = graph.find_node(parley_types::NodeId(2)).unwrap();

        assert_eq!(LevenshteinRouter.next(graph, leaf, "anything"), NextNode::Root);
    }

    #[test]
    fn test_edges_without_keywords_route_to_root() {
        let loaded = load_graph(
            "<TYPE:NODE><ID:1>\n\
             <TYPE:NODE><ID:2>\n\
             <TYPE:EDGE><ID:1><PARENT:1><CHILD:2>",
        )
        .unwrap();
        let graph = &loaded.graph;

        assert_eq!(
            LevenshteinRouter.next(graph, graph.root().unwrap(), "go"),
            NextNode::Root
        );
    }
}
