//! Daily puzzle payload and its validation.
//!
//! The puzzle server hands out the player's starting racks together with
//! the intended solution. Both must be checked before they reach the drag
//! engine: the engine assumes a fully-formed collection and never recovers
//! from a tile that appears twice or not at all.

use crate::id::TileId;
use crate::model::{Rack, RackCollection, Tile, required_length};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// `GET /puzzle/{date}` response body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyPuzzle {
    pub initial_racks: RackCollection,
    pub target_solution: RackCollection,
    /// ISO date (`YYYY-MM-DD`); also the play-history key.
    pub date: String,
}

impl DailyPuzzle {
    /// Parse and validate a puzzle response.
    ///
    /// # Errors
    /// Returns a message if the JSON is malformed or the puzzle is
    /// inconsistent (see [`DailyPuzzle::validate`]).
    pub fn from_json(json: &str) -> Result<Self, String> {
        let puzzle: DailyPuzzle =
            serde_json::from_str(json).map_err(|e| format!("invalid puzzle: {e}"))?;
        if let Err(e) = puzzle.validate() {
            log::warn!("rejected puzzle: {e}");
            return Err(e);
        }
        Ok(puzzle)
    }

    /// Check the puzzle is playable:
    ///
    /// - initial and target have the same number of racks
    /// - target rack `i` spells a word of `i + 3` letters
    /// - no tile ID repeats in the initial racks
    /// - the target uses exactly the initial tiles, with the same letter and
    ///   value for each ID
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn validate(&self) -> Result<(), String> {
        let (initial, target) = (&self.initial_racks, &self.target_solution);
        if initial.is_empty() {
            return Err(format!("puzzle {} has no racks", self.date));
        }
        if initial.len() != target.len() {
            return Err(format!(
                "puzzle {}: {} initial racks but {} target racks",
                self.date,
                initial.len(),
                target.len()
            ));
        }
        for (i, rack) in target.iter().enumerate() {
            if rack.len() != required_length(i) {
                return Err(format!(
                    "puzzle {}: target rack {i} has {} tiles, expected {}",
                    self.date,
                    rack.len(),
                    required_length(i)
                ));
            }
        }

        let mut by_id: HashMap<TileId, Tile> = HashMap::with_capacity(initial.tile_count());
        for tile in initial.iter().flat_map(Rack::iter) {
            if by_id.insert(tile.id, *tile).is_some() {
                return Err(format!("puzzle {}: duplicate tile {}", self.date, tile.id));
            }
        }
        self.check_tiles(&by_id, target, "target solution")
    }

    /// Check that `racks` is an arrangement the player could have reached
    /// from this puzzle: the same number of racks, exactly the initial tiles
    /// with unchanged letters and values, and no rack grown past
    /// `max_tiles`.
    ///
    /// # Errors
    /// Returns the first problem found.
    pub fn check_arrangement(&self, racks: &RackCollection, max_tiles: usize) -> Result<(), String> {
        let initial = &self.initial_racks;
        if racks.len() != initial.len() {
            return Err(format!(
                "puzzle {}: arrangement has {} racks, expected {}",
                self.date,
                racks.len(),
                initial.len()
            ));
        }
        let by_id: HashMap<TileId, Tile> = initial
            .iter()
            .flat_map(Rack::iter)
            .map(|t| (t.id, *t))
            .collect();
        self.check_tiles(&by_id, racks, "arrangement")?;
        if !racks.within_capacity(max_tiles, initial) {
            return Err(format!(
                "puzzle {}: arrangement overfills a rack (max {max_tiles} tiles)",
                self.date
            ));
        }
        Ok(())
    }

    fn check_tiles(
        &self,
        by_id: &HashMap<TileId, Tile>,
        racks: &RackCollection,
        what: &str,
    ) -> Result<(), String> {
        if !self.initial_racks.is_rearrangement_of(racks) {
            return Err(format!(
                "puzzle {}: {what} does not use the initial tiles",
                self.date
            ));
        }
        for tile in racks.iter().flat_map(Rack::iter) {
            if by_id.get(&tile.id) != Some(tile) {
                return Err(format!(
                    "puzzle {}: tile {} differs between initial and {what}",
                    self.date, tile.id
                ));
            }
        }
        Ok(())
    }

    /// The player's starting arrangement.
    pub fn racks(&self) -> RackCollection {
        self.initial_racks.clone()
    }

    /// The intended answer, spelled out.
    pub fn target_words(&self) -> Vec<String> {
        self.target_solution.words()
    }
}
