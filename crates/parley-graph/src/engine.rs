use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use parley_types::{EngineConfig, SessionId, TurnEvent};

use crate::error::EngineError;
use crate::graph::Graph;
use crate::node::{GraphNode, NodeIndex};
use crate::router::{LevenshteinRouter, NextNode, Router};
use crate::sink::ResponseSink;

/// One conversation over a loaded answer graph.
///
/// The engine borrows the graph and only tracks where the conversation
/// currently is. Run one engine per user; the graph can be shared.
pub struct ConversationEngine<'g, R = ChaCha8Rng> {
    graph: &'g Graph,
    router: Box<dyn Router>,
    rng: R,
    config: EngineConfig,
    session_id: SessionId,
    root: NodeIndex,
    current: NodeIndex,
}

impl<'g> ConversationEngine<'g, ChaCha8Rng> {
    /// Create an engine at the graph's root.
    ///
    /// Answers are picked with a ChaCha generator seeded from
    /// `config.seed`, or from OS entropy when no seed is set.
    pub fn new(graph: &'g Graph, config: EngineConfig) -> Result<Self, EngineError> {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(graph, config, rng)
    }
}

impl<'g, R: RngCore> ConversationEngine<'g, R> {
    /// Create an engine drawing answers from the given random source
    pub fn with_rng(graph: &'g Graph, config: EngineConfig, rng: R) -> Result<Self, EngineError> {
        let root = graph.root().ok_or(EngineError::NoRoot)?;
        let session_id = SessionId::new();
        info!(session = %session_id, "Conversation engine ready at {}", graph.node(root).id());

        Ok(Self {
            graph,
            router: Box::new(LevenshteinRouter),
            rng,
            config,
            session_id,
            root,
            current: root,
        })
    }

    /// Replace the edge-matching policy
    pub fn with_router(mut self, router: impl Router + 'static) -> Self {
        self.router = Box::new(router);
        self
    }

    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    pub fn graph(&self) -> &'g Graph {
        self.graph
    }

    pub fn root(&self) -> NodeIndex {
        self.root
    }

    pub fn current(&self) -> NodeIndex {
        self.current
    }

    pub fn current_node(&self) -> &'g GraphNode {
        self.graph.node(self.current)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Place the conversation at the root and announce the session.
    ///
    /// With `greet_on_start` the root's answer is delivered and returned.
    pub fn start(&mut self, sink: &mut impl ResponseSink) -> Option<String> {
        self.current = self.root;
        sink.deliver(&TurnEvent::session_started(
            self.session_id,
            self.graph.node(self.root).id(),
        ));

        if self.config.greet_on_start {
            Some(self.arrive(self.root, sink))
        } else {
            None
        }
    }

    /// Run one turn: match `message` against the current node's edges,
    /// move along the winner (or back to the root) and answer.
    pub fn submit_message(&mut self, message: &str, sink: &mut impl ResponseSink) -> String {
        let from = self.graph.node(self.current).id();

        let target = match self.router.next(self.graph, self.current, message) {
            NextNode::Edge {
                edge,
                keyword,
                distance,
            } => {
                let edge = self.graph.edge(edge);
                debug!(
                    session = %self.session_id,
                    distance,
                    "Message matched keyword '{}' of {}",
                    keyword,
                    edge.id()
                );
                sink.deliver(&TurnEvent::EdgeMatched {
                    edge: edge.id(),
                    keyword,
                    distance,
                });
                edge.child()
            }
            NextNode::Root => {
                debug!(session = %self.session_id, "{} has no keywords to match, back to root", from);
                sink.deliver(&TurnEvent::FellBackToRoot { from });
                self.root
            }
        };

        self.arrive(target, sink)
    }

    fn arrive(&mut self, node: NodeIndex, sink: &mut impl ResponseSink) -> String {
        self.current = node;
        let id = self.graph.node(node).id();
        sink.deliver(&TurnEvent::Arrived { node: id });

        let answer = self.select_answer(node);
        sink.deliver(&TurnEvent::response(id, answer.clone()));
        answer
    }

    /// Pick one of the node's answers uniformly at random
    fn select_answer(&mut self, node: NodeIndex) -> String {
        let answers = self.graph.node(node).answers();
        match answers.len() {
            0 => {
                debug!("{} has no answers", self.graph.node(node).id());
                self.config.empty_response.clone()
            }
            1 => answers[0].clone(),
            n => answers[self.rng.gen_range(0..n)].clone(),
        }
    }
}
