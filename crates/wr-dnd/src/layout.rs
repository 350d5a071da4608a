//! Droppable geometry supplied by the host.
//!
//! The engine never measures anything. Before each input event the host
//! reports where every tile and every rack container currently sits on
//! screen, as a [`DropLayout`]. Hosts that render a regular grid can let
//! [`GridMetrics`] build the layout from the racks instead.

use serde::{Deserialize, Serialize};
use wr_core::{Point, RackCollection, Rect, TileId};

/// Something a tile can be dropped on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum DropTarget {
    /// A tile: dropping here inserts before it.
    #[serde(rename_all = "camelCase")]
    Tile { id: TileId, rack_index: usize },
    /// A rack container: dropping here appends to the rack.
    #[serde(rename_all = "camelCase")]
    Rack { rack_index: usize },
}

impl DropTarget {
    pub fn rack_index(&self) -> usize {
        match self {
            DropTarget::Tile { rack_index, .. } | DropTarget::Rack { rack_index } => *rack_index,
        }
    }

    pub fn tile_id(&self) -> Option<TileId> {
        match self {
            DropTarget::Tile { id, .. } => Some(*id),
            DropTarget::Rack { .. } => None,
        }
    }

    pub fn is_tile(&self) -> bool {
        matches!(self, DropTarget::Tile { .. })
    }
}

/// A droppable target and where it is.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Droppable {
    pub target: DropTarget,
    pub rect: Rect,
}

/// Every droppable currently on screen, in paint order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DropLayout {
    pub droppables: Vec<Droppable>,
}

impl DropLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse host-measured geometry.
    ///
    /// # Errors
    /// Returns a message naming the JSON problem.
    pub fn from_json(json: &str) -> Result<Self, String> {
        serde_json::from_str(json).map_err(|e| format!("invalid layout: {e}"))
    }

    pub fn push(&mut self, target: DropTarget, rect: Rect) {
        self.droppables.push(Droppable { target, rect });
    }

    pub fn iter(&self) -> impl Iterator<Item = &Droppable> {
        self.droppables.iter()
    }

    pub fn rect_of(&self, target: &DropTarget) -> Option<Rect> {
        self.droppables
            .iter()
            .find(|d| d.target == *target)
            .map(|d| d.rect)
    }

    /// Current rectangle of a tile, wherever the host last drew it.
    pub fn tile_rect(&self, id: TileId) -> Option<Rect> {
        self.droppables
            .iter()
            .find(|d| d.target.tile_id() == Some(id))
            .map(|d| d.rect)
    }

    pub fn rack_rect(&self, rack_index: usize) -> Option<Rect> {
        self.rect_of(&DropTarget::Rack { rack_index })
    }

    /// Tile droppables the host drew inside `rack_index`.
    pub fn tiles_in_rack(&self, rack_index: usize) -> impl Iterator<Item = (TileId, Rect)> + '_ {
        self.droppables.iter().filter_map(move |d| match d.target {
            DropTarget::Tile { id, rack_index: r } if r == rack_index => Some((id, d.rect)),
            _ => None,
        })
    }

    /// Topmost tile under `p`, if any.
    pub fn hit_test_tile(&self, p: Point) -> Option<TileId> {
        // Last painted = topmost
        self.droppables
            .iter()
            .rev()
            .filter(|d| !d.rect.is_degenerate())
            .find_map(|d| d.target.tile_id().filter(|_| d.rect.contains(p)))
    }

    /// Lay `racks` out on a regular grid.
    pub fn grid(racks: &RackCollection, max_tiles: usize, metrics: &GridMetrics) -> Self {
        let mut layout = Self::new();
        for (r, rack) in racks.iter().enumerate() {
            for (slot, tile) in rack.iter().enumerate() {
                layout.push(
                    DropTarget::Tile {
                        id: tile.id,
                        rack_index: r,
                    },
                    metrics.tile_rect(r, slot),
                );
            }
            layout.push(
                DropTarget::Rack { rack_index: r },
                metrics.rack_rect(r, max_tiles.max(rack.len())),
            );
        }
        layout
    }
}

// ─── Grid metrics ────────────────────────────────────────────────────────

/// Geometry of a regular rack grid: one row per rack, one column per slot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GridMetrics {
    pub tile_width: f32,
    pub tile_height: f32,
    /// Horizontal space between tiles.
    pub gap: f32,
    /// Vertical space between racks.
    pub row_gap: f32,
    pub origin: Point,
}

impl Default for GridMetrics {
    fn default() -> Self {
        Self {
            tile_width: 48.0,
            tile_height: 48.0,
            gap: 4.0,
            row_gap: 16.0,
            origin: Point::new(0.0, 0.0),
        }
    }
}

impl GridMetrics {
    pub fn tile_rect(&self, rack_index: usize, slot: usize) -> Rect {
        Rect::new(
            self.origin.x + slot as f32 * (self.tile_width + self.gap),
            self.row_top(rack_index),
            self.tile_width,
            self.tile_height,
        )
    }

    /// The rack container spans `slots` tile columns.
    pub fn rack_rect(&self, rack_index: usize, slots: usize) -> Rect {
        let width = slots as f32 * (self.tile_width + self.gap) - self.gap;
        Rect::new(
            self.origin.x,
            self.row_top(rack_index),
            width.max(0.0),
            self.tile_height,
        )
    }

    fn row_top(&self, rack_index: usize) -> f32 {
        self.origin.y + rack_index as f32 * (self.tile_height + self.row_gap)
    }
}
