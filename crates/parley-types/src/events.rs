use crate::ids::{EdgeId, NodeId, SessionId};
use serde::{Deserialize, Serialize};

/// Observable steps of a conversation turn
///
/// Every turn ends with exactly one `Response`. The other variants describe
/// how the engine got there and are meant for logs and debugging front-ends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TurnEvent {
    /// Engine placed at the root, before the first user message
    SessionStarted {
        session_id: SessionId,
        root: NodeId,
        timestamp: i64,
    },

    /// Best keyword match among the current node's outgoing edges
    EdgeMatched {
        edge: EdgeId,
        keyword: String,
        distance: usize,
    },

    /// Current node had no outgoing edges
    FellBackToRoot {
        from: NodeId,
    },

    /// Engine moved to a new current node
    Arrived {
        node: NodeId,
    },

    /// Answer sent back to the user
    Response {
        node: NodeId,
        content: String,
    },
}

impl TurnEvent {
    pub fn session_started(session_id: SessionId, root: NodeId) -> Self {
        Self::SessionStarted {
            session_id,
            root,
            timestamp: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn response(node: NodeId, content: impl Into<String>) -> Self {
        Self::Response {
            node,
            content: content.into(),
        }
    }

    pub fn is_response(&self) -> bool {
        matches!(self, Self::Response { .. })
    }

    pub fn response_content(&self) -> Option<&str> {
        match self {
            Self::Response { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_type_tag() {
        let event = TurnEvent::EdgeMatched {
            edge: EdgeId(4),
            keyword: "hello".to_string(),
            distance: 1,
        };
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["type"], "edge_matched");
        assert_eq!(json["edge"], 4);
        assert_eq!(json["distance"], 1);
    }

    #[test]
    fn test_response_accessors() {
        let event = TurnEvent::response(NodeId(1), "Hi there");
        assert!(event.is_response());
        assert_eq!(event.response_content(), Some("Hi there"));

        let other = TurnEvent::Arrived { node: NodeId(1) };
        assert!(!other.is_response());
        assert_eq!(other.response_content(), None);
    }

    #[test]
    fn test_session_started_has_timestamp() {
        let event = TurnEvent::session_started(SessionId::new(), NodeId(1));
        match event {
            TurnEvent::SessionStarted { timestamp, root, .. } => {
                assert!(timestamp > 0);
                assert_eq!(root, NodeId(1));
            }
            _ => panic!("Expected SessionStarted"),
        }
    }
}
