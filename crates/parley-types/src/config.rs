use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EngineConfig {
    /// Seed for answer selection. `None` draws from OS entropy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Reply used when the arrival node carries no answers
    #[serde(default)]
    pub empty_response: String,
    /// Emit a root answer when the session starts
    #[serde(default = "default_greet_on_start")]
    pub greet_on_start: bool,
}

fn default_greet_on_start() -> bool {
    true
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            empty_response: String::new(),
            greet_on_start: true,
        }
    }
}

impl EngineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_empty_response(mut self, response: impl Into<String>) -> Self {
        self.empty_response = response.into();
        self
    }

    pub fn with_greeting(mut self, enabled: bool) -> Self {
        self.greet_on_start = enabled;
        self
    }
}
