pub mod capacity;
pub mod config;
pub mod history;
pub mod id;
pub mod model;
pub mod phase;
pub mod puzzle;
pub mod rules;
pub mod scoring;
pub mod words;

pub use capacity::{DEFAULT_MAX_TILES, can_accept};
pub use config::EngineConfig;
pub use history::{HistoryStore, MemoryStore, PlayHistory, PlayHistoryRecord};
pub use id::TileId;
pub use model::*;
pub use phase::GamePhase;
pub use puzzle::DailyPuzzle;
pub use rules::GameRules;
pub use scoring::{ScoreSummary, WordScore, score_rack, score_racks};
pub use words::WordList;
