pub mod ids;
pub mod config;
pub mod events;

pub use ids::{NodeId, EdgeId, SessionId, ParseIdError};
pub use config::EngineConfig;
pub use events::TurnEvent;
