//! Play history, keyed by puzzle date.
//!
//! The browser keeps history in `localStorage` under a single key holding a
//! JSON object of `date -> record`. Storage is injected through
//! [`HistoryStore`] so the same code runs against `localStorage`, an
//! in-memory map in tests, or anything else that stores strings.

use crate::model::RackCollection;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Storage key holding the whole history object.
pub const HISTORY_KEY: &str = "tile-game-history";

/// Minimal string key-value store.
pub trait HistoryStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl HistoryStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_string(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// The final arrangement and scores of one finished game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayHistoryRecord {
    pub racks: RackCollection,
    pub score: u32,
    pub target_score: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayHistory {
    records: BTreeMap<String, PlayHistoryRecord>,
}

impl PlayHistory {
    /// # Errors
    /// Returns a message if the stored JSON is not a history object.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid play history: {e}"))
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn get(&self, date: &str) -> Option<&PlayHistoryRecord> {
        self.records.get(date)
    }

    pub fn insert(&mut self, date: &str, record: PlayHistoryRecord) {
        self.records.insert(date.to_string(), record);
    }

    /// Dates played, oldest first.
    pub fn dates(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Read the whole history. Missing or corrupt data reads as empty.
pub fn load_history(store: &dyn HistoryStore) -> PlayHistory {
    let Some(raw) = store.get(HISTORY_KEY) else {
        return PlayHistory::default();
    };
    PlayHistory::from_json(&raw).unwrap_or_else(|e| {
        log::warn!("discarding stored history: {e}");
        PlayHistory::default()
    })
}

/// Record for `date`, if that puzzle was played.
pub fn load_record(store: &dyn HistoryStore, date: &str) -> Option<PlayHistoryRecord> {
    load_history(store).get(date).cloned()
}

/// Store `record` under `date`, replacing any earlier record for that date.
/// Corrupt existing history is overwritten.
pub fn save_record(store: &mut dyn HistoryStore, date: &str, record: PlayHistoryRecord) {
    let mut history = load_history(store);
    history.insert(date, record);
    store.set(HISTORY_KEY, history.to_json());
}

pub fn clear_history(store: &mut dyn HistoryStore) {
    store.remove(HISTORY_KEY);
}
