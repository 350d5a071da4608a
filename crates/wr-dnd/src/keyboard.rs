//! Keyboard dragging.
//!
//! Key codes map to [`KeyAction`]s; arrow keys are then turned into a new
//! position for the dragged tile. That position goes through the same
//! collision pipeline as a pointer drag, so a keyboard move and a pointer
//! move to the same spot always produce the same arrangement.
//!
//! - Left/Right: jump to the nearest tile in the *same* rack. At the edge
//!   nothing happens; the tile never leaks into another rack sideways.
//! - Up/Down: jump to the rack above/below, keeping the current column. The
//!   tile lands on whichever tile sits in that column, or in the rack's
//!   trailing space if the column is empty.

use crate::layout::DropLayout;
use wr_core::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

/// What a key press means to the drag engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Pick up the focused tile, or drop the one being dragged.
    PickUpOrDrop,
    /// Drop only (never starts a drag).
    Drop,
    Cancel,
    Move(Direction),
}

/// Static key bindings.
pub struct KeyMap;

impl KeyMap {
    /// Resolve a `KeyboardEvent.code` (or `key` for Space/Escape) to an
    /// action. Returns `None` for keys the engine ignores.
    pub fn resolve(code: &str) -> Option<KeyAction> {
        match code {
            "Space" | " " | "Enter" | "NumpadEnter" => Some(KeyAction::PickUpOrDrop),
            "Tab" => Some(KeyAction::Drop),
            "Escape" | "Esc" => Some(KeyAction::Cancel),
            "ArrowLeft" => Some(KeyAction::Move(Direction::Left)),
            "ArrowRight" => Some(KeyAction::Move(Direction::Right)),
            "ArrowUp" => Some(KeyAction::Move(Direction::Up)),
            "ArrowDown" => Some(KeyAction::Move(Direction::Down)),
            _ => None,
        }
    }
}

/// New top-left corner for the dragged tile after pressing `direction`.
///
/// `current` is the dragged tile's rectangle as it stands now and
/// `rack_index` the rack it currently sits in. Returns `None` when the key
/// produces no movement: edge of the rack, no rack beyond, or geometry the
/// host did not report.
pub fn keyboard_target(
    direction: Direction,
    rack_index: usize,
    rack_count: usize,
    current: Rect,
    layout: &DropLayout,
) -> Option<Point> {
    if current.is_degenerate() {
        return None;
    }

    match direction {
        Direction::Left | Direction::Right => {
            let mut row: Vec<Rect> = layout
                .tiles_in_rack(rack_index)
                .map(|(_, rect)| rect)
                .filter(|r| !r.is_degenerate())
                .collect();
            row.sort_by(|a, b| a.x.total_cmp(&b.x));

            let found = if direction == Direction::Right {
                row.iter().find(|r| r.x > current.x)
            } else {
                row.iter().rev().find(|r| r.x < current.x)
            };
            found.map(Rect::top_left)
        }
        Direction::Up | Direction::Down => {
            let next = if direction == Direction::Down {
                rack_index.checked_add(1)?
            } else {
                rack_index.checked_sub(1)?
            };
            if next >= rack_count {
                return None;
            }
            let row_rect = layout
                .rack_rect(next)
                .or_else(|| layout.tiles_in_rack(next).map(|(_, r)| r).next())
                .filter(|r| r.y.is_finite())?;
            Some(Point::new(current.x, row_rect.y))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridMetrics;
    use wr_core::{Rack, RackCollection, Tile};

    /// rack 0 = 3 tiles, rack 1 = 4 tiles
    fn layout() -> DropLayout {
        let rack = |prefix: &str, n: usize| -> Rack {
            (0..n)
                .map(|i| Tile::new(&format!("k-{prefix}{i}"), 'X', 1))
                .collect()
        };
        DropLayout::grid(
            &RackCollection::new(vec![rack("a", 3), rack("b", 4)]),
            8,
            &GridMetrics::default(),
        )
    }

    fn slot(rack: usize, slot: usize) -> Rect {
        GridMetrics::default().tile_rect(rack, slot)
    }

    #[test]
    fn key_codes() {
        assert_eq!(KeyMap::resolve("Space"), Some(KeyAction::PickUpOrDrop));
        assert_eq!(KeyMap::resolve("Enter"), Some(KeyAction::PickUpOrDrop));
        assert_eq!(KeyMap::resolve("Escape"), Some(KeyAction::Cancel));
        assert_eq!(KeyMap::resolve("Tab"), Some(KeyAction::Drop));
        assert_eq!(
            KeyMap::resolve("ArrowUp"),
            Some(KeyAction::Move(Direction::Up))
        );
        assert_eq!(KeyMap::resolve("KeyA"), None);
    }

    #[test]
    fn right_and_left_step_to_neighbours() {
        let layout = layout();
        let from = slot(0, 1);
        assert_eq!(
            keyboard_target(Direction::Right, 0, 2, from, &layout),
            Some(slot(0, 2).top_left())
        );
        assert_eq!(
            keyboard_target(Direction::Left, 0, 2, from, &layout),
            Some(slot(0, 0).top_left())
        );
    }

    #[test]
    fn horizontal_moves_stop_at_rack_edges() {
        let layout = layout();
        assert_eq!(keyboard_target(Direction::Right, 0, 2, slot(0, 2), &layout), None);
        assert_eq!(keyboard_target(Direction::Left, 0, 2, slot(0, 0), &layout), None);
    }

    #[test]
    fn vertical_moves_keep_the_column() {
        let layout = layout();
        assert_eq!(
            keyboard_target(Direction::Down, 0, 2, slot(0, 2), &layout),
            Some(slot(1, 2).top_left())
        );
        assert_eq!(
            keyboard_target(Direction::Up, 1, 2, slot(1, 3), &layout),
            Some(slot(0, 3).top_left())
        );
    }

    #[test]
    fn vertical_moves_stop_at_first_and_last_rack() {
        let layout = layout();
        assert_eq!(keyboard_target(Direction::Up, 0, 2, slot(0, 0), &layout), None);
        assert_eq!(keyboard_target(Direction::Down, 1, 2, slot(1, 0), &layout), None);
    }

    #[test]
    fn missing_geometry_means_no_movement() {
        let empty = DropLayout::new();
        assert_eq!(keyboard_target(Direction::Down, 0, 2, slot(0, 0), &empty), None);
        assert_eq!(keyboard_target(Direction::Right, 0, 2, slot(0, 0), &empty), None);
        let zero = Rect::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(keyboard_target(Direction::Right, 0, 2, zero, &layout()), None);
    }
}
