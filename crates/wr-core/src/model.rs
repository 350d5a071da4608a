//! Core data model for a Word Racks board.
//!
//! A board is a fixed, ordered list of racks. Each rack is an ordered run of
//! tiles that spells (or fails to spell) a word. Rack `i` must spell a word
//! of length `i + 3`. Tiles are immutable; moving a tile only changes which
//! rack holds its ID and at which position.
//!
//! Invariant: every tile ID of a puzzle lives in exactly one rack, in the
//! committed collection and in every drag preview derived from it.

use crate::id::TileId;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::collections::HashMap;

/// Shortest word length; rack `i` requires `MIN_WORD_LEN + i` letters.
pub const MIN_WORD_LEN: usize = 3;

/// Word length rack `rack_index` has to spell to score.
pub const fn required_length(rack_index: usize) -> usize {
    rack_index + MIN_WORD_LEN
}

// ─── Tiles ───────────────────────────────────────────────────────────────

/// A single letter tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub id: TileId,
    pub letter: char,
    pub value: u32,
}

impl Tile {
    pub fn new(id: &str, letter: char, value: u32) -> Self {
        Self {
            id: TileId::intern(id),
            letter,
            value,
        }
    }
}

// ─── Racks ───────────────────────────────────────────────────────────────

/// An ordered run of tiles. Inline storage covers the default capacity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rack {
    tiles: SmallVec<[Tile; 8]>,
}

impl Rack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    /// Position of `id` within this rack.
    pub fn position(&self, id: TileId) -> Option<usize> {
        self.tiles.iter().position(|t| t.id == id)
    }

    /// The word currently spelled, left to right.
    pub fn word(&self) -> String {
        self.tiles.iter().map(|t| t.letter).collect()
    }

    /// Sum of tile values, regardless of word validity.
    pub fn value(&self) -> u32 {
        self.tiles
            .iter()
            .fold(0, |total, t| total.saturating_add(t.value))
    }

    /// Insert at `index`, clamped to the end of the rack.
    pub(crate) fn insert_clamped(&mut self, index: usize, tile: Tile) {
        let index = index.min(self.tiles.len());
        self.tiles.insert(index, tile);
    }

    pub(crate) fn remove_at(&mut self, index: usize) -> Tile {
        self.tiles.remove(index)
    }
}

impl FromIterator<Tile> for Rack {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self {
            tiles: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Rack {
    type Item = &'a Tile;
    type IntoIter = std::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}

// ─── Rack Collection ─────────────────────────────────────────────────────

/// The full ordered set of racks for one puzzle.
///
/// Rack count and order never change during play. The only structural
/// mutation is [`RackCollection::move_tile`], which removes a tile and
/// reinserts it, so the tile-ID multiset is preserved by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RackCollection {
    racks: Vec<Rack>,
}

impl RackCollection {
    pub fn new(racks: Vec<Rack>) -> Self {
        Self { racks }
    }

    pub fn len(&self) -> usize {
        self.racks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.racks.is_empty()
    }

    pub fn racks(&self) -> &[Rack] {
        &self.racks
    }

    pub fn rack(&self, index: usize) -> Option<&Rack> {
        self.racks.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rack> {
        self.racks.iter()
    }

    /// Find `(rack_index, position)` of a tile.
    pub fn locate(&self, id: TileId) -> Option<(usize, usize)> {
        self.racks
            .iter()
            .enumerate()
            .find_map(|(r, rack)| rack.position(id).map(|p| (r, p)))
    }

    /// Look up a tile by ID.
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.locate(id).map(|(r, p)| &self.racks[r].tiles()[p])
    }

    /// Move `id` into rack `to_rack` at `index` (clamped to the rack end).
    ///
    /// `index` is interpreted against the target rack *after* the tile has
    /// been removed from its source, which makes same-rack moves behave
    /// like an array move. Returns `false` (and leaves the collection
    /// untouched) if the tile or rack does not exist, or if nothing changed.
    pub fn move_tile(&mut self, id: TileId, to_rack: usize, index: usize) -> bool {
        let Some((from_rack, from_pos)) = self.locate(id) else {
            return false;
        };
        if to_rack >= self.racks.len() {
            return false;
        }
        let tile = self.racks[from_rack].remove_at(from_pos);
        let target = &mut self.racks[to_rack];
        let index = index.min(target.len());
        target.insert_clamped(index, tile);
        from_rack != to_rack || from_pos != index
    }

    /// The words currently spelled by each rack.
    pub fn words(&self) -> Vec<String> {
        self.racks.iter().map(Rack::word).collect()
    }

    /// Total tile count across every rack.
    pub fn tile_count(&self) -> usize {
        self.racks.iter().map(Rack::len).sum()
    }

    /// Multiset of tile IDs, counted per ID.
    pub fn tile_id_counts(&self) -> HashMap<TileId, usize> {
        let mut counts = HashMap::with_capacity(self.tile_count());
        for tile in self.racks.iter().flat_map(Rack::iter) {
            *counts.entry(tile.id).or_insert(0) += 1;
        }
        counts
    }

    /// Whether `other` holds exactly the same tiles, in any arrangement.
    pub fn is_rearrangement_of(&self, other: &RackCollection) -> bool {
        self.tile_count() == other.tile_count() && self.tile_id_counts() == other.tile_id_counts()
    }

    /// Whether no rack has grown past `max_tiles` since `start`. A rack
    /// that already started over the limit may keep its size but not grow.
    /// Collections of different shapes are never within capacity.
    pub fn within_capacity(&self, max_tiles: usize, start: &RackCollection) -> bool {
        self.racks.len() == start.racks.len()
            && self
                .racks
                .iter()
                .zip(&start.racks)
                .all(|(now, was)| now.len() <= max_tiles.max(was.len()))
    }
}

impl FromIterator<Rack> for RackCollection {
    fn from_iter<I: IntoIterator<Item = Rack>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// A point in host (client) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle measured by the host renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Zero-size, negative, or non-finite rectangles can never collide.
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }

    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.x && p.x <= self.right() && p.y >= self.y && p.y <= self.bottom()
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn top_left(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Same size, shifted by `(dx, dy)`.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Same size, with its top-left corner at `p`.
    pub fn with_origin(&self, p: Point) -> Self {
        Self::new(p.x, p.y, self.width, self.height)
    }

    /// Area of overlap with `other` (zero when they only touch).
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w > 0.0 && h > 0.0 { w * h } else { 0.0 }
    }

    /// Overlap area divided by union area, in `0.0..=1.0`.
    pub fn intersection_ratio(&self, other: &Rect) -> f32 {
        if self.is_degenerate() || other.is_degenerate() {
            return 0.0;
        }
        let overlap = self.intersection_area(other);
        if overlap <= 0.0 {
            return 0.0;
        }
        overlap / (self.area() + other.area() - overlap)
    }
}
