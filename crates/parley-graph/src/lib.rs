pub mod tokenizer;
pub mod node;
pub mod edge;
pub mod graph;
pub mod builder;
pub mod error;
pub mod distance;
pub mod router;
pub mod sink;
pub mod engine;

pub use tokenizer::{tokenize, Token, TokenLine};
pub use node::{GraphNode, NodeIndex};
pub use edge::{EdgeIndex, GraphEdge};
pub use graph::Graph;
pub use builder::{load_graph, load_graph_from_file, GraphBuilder, Loaded};
pub use error::{Endpoint, EngineError, LoadError, LoadIssue, LoadReport};
pub use distance::edit_distance;
pub use router::{LevenshteinRouter, NextNode, Router};
pub use sink::ResponseSink;
pub use engine::ConversationEngine;

// Re-export key types from parley-types
pub use parley_types::{EdgeId, EngineConfig, NodeId, SessionId, TurnEvent};
