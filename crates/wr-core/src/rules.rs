//! Game rules served by the `/config` endpoint.
//!
//! Loaded once per session and passed by reference to whatever needs it
//! (scoring, the timer host). There is no global copy.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Timer length and scoring tables.
///
/// JSON shape (camelCase):
/// `{"timerSeconds":120,"multipliers":{"3":1,"4":2},"letterValues":{"A":1}}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRules {
    pub timer_seconds: u32,
    /// Score multiplier keyed by word length.
    pub multipliers: BTreeMap<usize, u32>,
    /// Point value per letter. Only the puzzle generator needs these; the
    /// client reads values straight off the tiles.
    #[serde(default)]
    pub letter_values: BTreeMap<String, u32>,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            timer_seconds: 120,
            multipliers: BTreeMap::new(),
            letter_values: BTreeMap::new(),
        }
    }
}

impl GameRules {
    /// Parse the `/config` response body.
    ///
    /// # Errors
    /// Returns a message naming the JSON problem.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid game rules: {e}"))
    }

    /// Multiplier for a word of `length` letters; unknown lengths score ×1.
    pub fn multiplier_for(&self, length: usize) -> u32 {
        self.multipliers.get(&length).copied().unwrap_or(1)
    }

    /// Point value of `letter`; unknown letters are worth nothing.
    pub fn letter_value(&self, letter: char) -> u32 {
        let mut buf = [0u8; 4];
        let key = letter.to_ascii_uppercase();
        self.letter_values
            .get(&*key.encode_utf8(&mut buf))
            .copied()
            .unwrap_or(0)
    }

    pub fn timer_millis(&self) -> u64 {
        u64::from(self.timer_seconds) * 1000
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RULES: &str = r#"{
        "timerSeconds": 90,
        "multipliers": {"3": 1, "4": 2, "5": 3, "6": 4},
        "letterValues": {"A": 1, "Q": 10}
    }"#;

    #[test]
    fn parses_camel_case_config() {
        let rules = GameRules::from_json(RULES).unwrap();
        assert_eq!(rules.timer_seconds, 90);
        assert_eq!(rules.multiplier_for(5), 3);
        assert_eq!(rules.letter_value('q'), 10);
        assert_eq!(rules.timer_millis(), 90_000);
    }

    #[test]
    fn unknown_lengths_default_to_one() {
        let rules = GameRules::from_json(RULES).unwrap();
        assert_eq!(rules.multiplier_for(9), 1);
        assert_eq!(rules.letter_value('Z'), 0);
    }

    #[test]
    fn letter_values_are_optional() {
        let rules = GameRules::from_json(r#"{"timerSeconds":60,"multipliers":{}}"#).unwrap();
        assert!(rules.letter_values.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let err = GameRules::from_json("{").unwrap_err();
        assert!(err.starts_with("invalid game rules"), "{err}");
    }
}
