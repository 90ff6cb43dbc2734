//! # Weaving Options
//!
//! Options shared by the query helpers. Every field has a default, so a JSON
//! file only needs to name what it overrides:
//!
//! ```json
//! { "recompute_offsets_after_insert": true }
//! ```

use crate::{Error, Result};
use serde::Deserialize;

/// Options for ilweave queries
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WeaveOptions {
    /// Simple name of the attribute marking a compiler-generated async method
    pub async_state_machine_attribute: String,
    /// Simple name of the interface implemented by async state machine types
    pub async_state_machine_interface: String,
    /// Re-lay instruction offsets after every batch insertion
    pub recompute_offsets_after_insert: bool,
}

impl Default for WeaveOptions {
    fn default() -> Self {
        Self {
            async_state_machine_attribute: "AsyncStateMachineAttribute".to_string(),
            async_state_machine_interface: "IAsyncStateMachine".to_string(),
            recompute_offsets_after_insert: false,
        }
    }
}

impl WeaveOptions {
    /// Load options from a JSON file
    pub fn load(path: &str) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| Error::config(format!("Failed to read options file {}: {}", path, e)))?;

        Self::parse(&contents)
    }

    /// Parse options from a JSON string
    pub fn parse(json: &str) -> Result<Self> {
        serde_json::from_str(json)
            .map_err(|e| Error::config(format!("Failed to parse options JSON: {}", e)))
    }
}
