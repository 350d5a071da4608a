//! Engine configuration.

use crate::capacity::DEFAULT_MAX_TILES;
use serde::{Deserialize, Serialize};

/// Configuration for the drag engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Maximum tiles per rack. Default: **8**.
    pub max_tiles: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_tiles: DEFAULT_MAX_TILES,
        }
    }
}

impl EngineConfig {
    pub fn with_max_tiles(max_tiles: usize) -> Self {
        Self { max_tiles }
    }
}
