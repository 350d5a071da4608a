//! Collision policy: which droppable is the dragged tile over?
//!
//! Resolution is priority-ordered:
//!
//! 1. Rectangle overlap against every droppable, ranked by overlap ratio.
//! 2. Still overlapping its own slot → only the self collision. Without
//!    this the target flips between origin and destination every frame
//!    while the tile sits on the boundary.
//! 3. Any tile overlaps → only those. Without this, a drop aimed at a
//!    position inside a rack lands at the rack's end instead.
//! 4. Otherwise, rack containers whose rectangle holds the reference point
//!    (the pointer, or the tile's center when dragging by keyboard).
//!
//! The first collision in the result is the drop target.

use crate::layout::{DropLayout, DropTarget};
use smallvec::SmallVec;
use wr_core::{Point, Rect, TileId};

/// A droppable the dragged tile currently collides with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collision {
    pub target: DropTarget,
    pub rect: Rect,
    /// Overlap ratio for rectangle collisions; `1.0` for point containment.
    pub ratio: f32,
}

pub type Collisions = SmallVec<[Collision; 4]>;

/// All droppables overlapping `drag_rect`, best overlap first.
pub fn rect_intersection(drag_rect: Rect, layout: &DropLayout) -> Collisions {
    let mut hits: Collisions = layout
        .iter()
        .filter_map(|d| {
            let ratio = drag_rect.intersection_ratio(&d.rect);
            (ratio > 0.0).then_some(Collision {
                target: d.target,
                rect: d.rect,
                ratio,
            })
        })
        .collect();
    // Stable: equal ratios keep paint order.
    hits.sort_by(|a, b| b.ratio.total_cmp(&a.ratio));
    hits
}

/// Droppables accepted by `filter` whose rectangle contains `p`, nearest
/// center first.
pub fn pointer_within(
    p: Point,
    layout: &DropLayout,
    filter: impl Fn(&DropTarget) -> bool,
) -> Collisions {
    let mut hits: Collisions = layout
        .iter()
        .filter(|d| filter(&d.target) && !d.rect.is_degenerate() && d.rect.contains(p))
        .map(|d| Collision {
            target: d.target,
            rect: d.rect,
            ratio: 1.0,
        })
        .collect();
    hits.sort_by(|a, b| distance_sq(p, a.rect.center()).total_cmp(&distance_sq(p, b.rect.center())));
    hits
}

/// Apply the full priority policy for the tile `active`.
pub fn detect_collisions(
    active: TileId,
    drag_rect: Rect,
    reference: Point,
    layout: &DropLayout,
) -> Collisions {
    if drag_rect.is_degenerate() {
        return Collisions::new();
    }

    let collisions = rect_intersection(drag_rect, layout);

    if let Some(own) = collisions
        .iter()
        .find(|c| c.target.tile_id() == Some(active))
    {
        return smallvec::smallvec![*own];
    }

    let tiles: Collisions = collisions
        .iter()
        .filter(|c| c.target.is_tile())
        .copied()
        .collect();
    if !tiles.is_empty() {
        return tiles;
    }

    pointer_within(reference, layout, |t| !t.is_tile())
}

fn distance_sq(a: Point, b: Point) -> f32 {
    let (dx, dy) = (a.x - b.x, a.y - b.y);
    dx * dx + dy * dy
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridMetrics;
    use wr_core::{Rack, RackCollection, Tile};

    fn id(s: &str) -> TileId {
        TileId::intern(s)
    }

    /// rack 0 = [A, B, C], rack 1 = [D]
    fn layout() -> DropLayout {
        let r0: Rack = ["c-a", "c-b", "c-c"]
            .iter()
            .map(|s| Tile::new(s, 'X', 1))
            .collect();
        let r1: Rack = [Tile::new("c-d", 'D', 1)].into_iter().collect();
        DropLayout::grid(&RackCollection::new(vec![r0, r1]), 8, &GridMetrics::default())
    }

    fn tile_rect(slot: usize, rack: usize) -> Rect {
        GridMetrics::default().tile_rect(rack, slot)
    }

    #[test]
    fn self_collision_wins_while_overlapping_origin() {
        let layout = layout();
        // A nudged halfway toward B: overlaps both, but A is itself.
        let drag = tile_rect(0, 0).translate(26.0, 0.0);
        let hits = detect_collisions(id("c-a"), drag, drag.center(), &layout);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target.tile_id(), Some(id("c-a")));
    }

    #[test]
    fn tiles_beat_rack_container() {
        let layout = layout();
        // D dragged onto B's slot: overlaps B and rack 0's container.
        let drag = tile_rect(1, 0);
        let hits = detect_collisions(id("c-d"), drag, drag.center(), &layout);
        assert!(hits.iter().all(|c| c.target.is_tile()));
        assert_eq!(hits[0].target.tile_id(), Some(id("c-b")));
    }

    #[test]
    fn best_overlap_comes_first() {
        let layout = layout();
        // Mostly over C, a little over B.
        let drag = tile_rect(2, 0).translate(-10.0, 0.0);
        let hits = detect_collisions(id("c-d"), drag, drag.center(), &layout);
        assert_eq!(hits[0].target.tile_id(), Some(id("c-c")));
        assert_eq!(hits[1].target.tile_id(), Some(id("c-b")));
    }

    #[test]
    fn empty_space_falls_back_to_rack_containment() {
        let layout = layout();
        let drag = tile_rect(5, 1);
        let hits = detect_collisions(id("c-a"), drag, drag.center(), &layout);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, DropTarget::Rack { rack_index: 1 });
    }

    #[test]
    fn reference_point_outside_every_rack_means_no_target() {
        let layout = layout();
        let drag = tile_rect(5, 1);
        let far = Point::new(-100.0, -100.0);
        assert!(detect_collisions(id("c-a"), drag, far, &layout).is_empty());
    }

    #[test]
    fn degenerate_geometry_collides_with_nothing() {
        let layout = layout();
        let zero = Rect::new(10.0, 10.0, 0.0, 0.0);
        assert!(detect_collisions(id("c-a"), zero, zero.center(), &layout).is_empty());
        let nan = Rect::new(f32::NAN, 0.0, 48.0, 48.0);
        assert!(detect_collisions(id("c-a"), nan, Point::new(1.0, 1.0), &layout).is_empty());
    }
}
