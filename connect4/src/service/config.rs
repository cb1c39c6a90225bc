//! Game service configuration.

use serde::{Deserialize, Serialize};

/// Game service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Capacity of the actor inbox. Senders wait once it is full.
    pub inbox_capacity: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self { inbox_capacity: 64 }
    }
}

impl GameConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.inbox_capacity == 0 {
            return Err("Inbox capacity must be at least 1".to_string());
        }
        Ok(())
    }
}
