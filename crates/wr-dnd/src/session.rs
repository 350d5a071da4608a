//! Drag session controller.
//!
//! The controller is a small state machine with one entry point,
//! [`DragController::handle`]:
//!
//! ```text
//!   Idle ──pick up──▶ Dragging ──drop───▶ Idle   (preview committed)
//!                        │
//!                        └─────cancel───▶ Idle   (preview discarded)
//! ```
//!
//! While dragging, every hover mutates only the session's *preview* copy of
//! the racks. The committed racks are replaced exactly once, on drop. Cancel
//! restores the snapshot taken at pick-up, however many hovers happened.
//!
//! Rejections (full rack, stale target, missing geometry) are silent: the
//! event simply produces no movement.

use crate::announce::{Announcement, OverKind};
use crate::collision::{Collision, detect_collisions};
use crate::input::DragEvent;
use crate::keyboard::{Direction, KeyAction, KeyMap, keyboard_target};
use crate::layout::{DropLayout, DropTarget};
use wr_core::{EngineConfig, Point, RackCollection, Rect, TileId, can_accept};

/// Which input started the current drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    Pointer,
    Keyboard,
}

/// Side effects for the host to act on, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEffect {
    /// Text for the live region.
    Announce(String),
    /// The preview arrangement changed; re-render and re-measure.
    PreviewChanged,
    /// Drop finished; these racks are now authoritative.
    Committed(RackCollection),
    /// Drag abandoned; the pre-drag racks are authoritative again.
    Cancelled,
}

// ─── Session ─────────────────────────────────────────────────────────────

/// State of one in-flight drag. Never outlives its gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    /// Racks as they were at pick-up.
    committed: RackCollection,
    /// Working copy mutated by hovers.
    preview: RackCollection,
    active: TileId,
    letter: char,
    mode: DragMode,
    /// Where the tile sat when picked up.
    origin_rect: Option<Rect>,
    pointer_origin: Option<Point>,
    /// Where the dragged tile is drawn now.
    drag_rect: Option<Rect>,
    pointer: Option<Point>,
    over: Option<DropTarget>,
}

impl DragSession {
    pub fn active(&self) -> TileId {
        self.active
    }

    pub fn mode(&self) -> DragMode {
        self.mode
    }

    pub fn committed(&self) -> &RackCollection {
        &self.committed
    }

    pub fn preview(&self) -> &RackCollection {
        &self.preview
    }

    pub fn over(&self) -> Option<DropTarget> {
        self.over
    }

    pub fn drag_rect(&self) -> Option<Rect> {
        self.drag_rect
    }

    fn track_pointer(&mut self, p: Point) {
        if let (Some(origin), Some(start)) = (self.origin_rect, self.pointer_origin) {
            self.drag_rect = Some(origin.translate(p.x - start.x, p.y - start.y));
        }
        self.pointer = Some(p);
    }

    /// Current drop target, or `None` if there is none or it went stale.
    fn resolve_target(&self, layout: &DropLayout) -> Option<Collision> {
        let drag_rect = self.drag_rect?;
        let reference = self.pointer.unwrap_or_else(|| drag_rect.center());
        let hits = detect_collisions(self.active, drag_rect, reference, layout);
        log::trace!("{:?} collisions: {:?}", self.active, hits);

        let first = hits.first().copied()?;
        let live = match first.target {
            DropTarget::Tile { id, .. } => self.preview.locate(id).is_some(),
            DropTarget::Rack { rack_index } => rack_index < self.preview.len(),
        };
        live.then_some(first)
    }

    /// The trailing space of `rack_index`, for keyboard moves whose new
    /// position collides with nothing.
    fn trailing_space(&self, layout: &DropLayout, rack_index: usize) -> Option<Collision> {
        if rack_index >= self.preview.len() {
            return None;
        }
        let rect = layout.rack_rect(rack_index).or(self.drag_rect)?;
        Some(Collision {
            target: DropTarget::Rack { rack_index },
            rect,
            ratio: 1.0,
        })
    }

    fn hover(
        &mut self,
        layout: &DropLayout,
        fallback: Option<Collision>,
        max_tiles: usize,
    ) -> Vec<DragEffect> {
        let mut effects = Vec::new();
        let hit = self.resolve_target(layout).or(fallback);
        let over = hit.map(|c| c.target);

        if !same_target(over, self.over) {
            self.over = over;
            effects.push(DragEffect::Announce(self.over_announcement(over)));
        }
        if let Some(hit) = hit
            && self.apply_move(&hit, max_tiles)
        {
            effects.push(DragEffect::PreviewChanged);
        }
        effects
    }

    /// Move the active tile in the preview according to `hit`.
    /// Returns `true` if the preview changed.
    fn apply_move(&mut self, hit: &Collision, max_tiles: usize) -> bool {
        let Some((from, _)) = self.preview.locate(self.active) else {
            return false;
        };
        let (to, mut index) = match hit.target {
            DropTarget::Tile { id, .. } => {
                if id == self.active {
                    return false;
                }
                match self.preview.locate(id) {
                    Some(found) => found,
                    None => return false,
                }
            }
            DropTarget::Rack { rack_index } => match self.preview.rack(rack_index) {
                Some(rack) => (rack_index, rack.len()),
                None => return false,
            },
        };

        if from != to {
            let target = &self.preview.racks()[to];
            if !can_accept(target, max_tiles) {
                log::debug!(
                    "rack {to} full ({} tiles); {:?} stays in rack {from}",
                    target.len(),
                    self.active
                );
                return false;
            }
        }

        // Past the target's far edge: insert after it, not before.
        if self.drag_rect.is_some_and(|r| r.y > hit.rect.bottom()) {
            index += 1;
        }

        self.preview.move_tile(self.active, to, index)
    }

    fn over_announcement(&self, over: Option<DropTarget>) -> String {
        let kind = match over {
            Some(DropTarget::Tile { id, .. }) => self
                .preview
                .tile(id)
                .map_or(OverKind::Nothing, |t| OverKind::Tile(t.letter)),
            Some(DropTarget::Rack { .. }) => OverKind::Rack,
            None => OverKind::Nothing,
        };
        Announcement::Over {
            letter: self.letter,
            over: kind,
        }
        .to_string()
    }
}

/// Targets are the same droppable if they name the same tile or rack; a
/// tile's rack index changes as it moves and does not count.
fn same_target(a: Option<DropTarget>, b: Option<DropTarget>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(DropTarget::Tile { id: x, .. }), Some(DropTarget::Tile { id: y, .. })) => x == y,
        (
            Some(DropTarget::Rack { rack_index: x }),
            Some(DropTarget::Rack { rack_index: y }),
        ) => x == y,
        _ => false,
    }
}

// ─── Controller ──────────────────────────────────────────────────────────

/// Either nothing is being dragged, or exactly one session is live.
#[derive(Debug, Clone, PartialEq)]
pub enum DragState {
    Idle { racks: RackCollection },
    Dragging(Box<DragSession>),
}

impl Default for DragState {
    fn default() -> Self {
        DragState::Idle {
            racks: RackCollection::default(),
        }
    }
}

/// Owns the committed racks and at most one drag session.
#[derive(Debug)]
pub struct DragController {
    config: EngineConfig,
    disabled: bool,
    state: DragState,
}

impl DragController {
    pub fn new(racks: RackCollection, config: EngineConfig) -> Self {
        Self {
            config,
            disabled: false,
            state: DragState::Idle { racks },
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn state(&self) -> &DragState {
        &self.state
    }

    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(session) => Some(&**session),
            DragState::Idle { .. } => None,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session().is_some()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn active_tile(&self) -> Option<TileId> {
        self.session().map(DragSession::active)
    }

    /// The authoritative racks. Unchanged by hovers.
    pub fn committed(&self) -> &RackCollection {
        match &self.state {
            DragState::Idle { racks } => racks,
            DragState::Dragging(session) => &session.committed,
        }
    }

    /// What to render: the preview while dragging, the committed racks
    /// otherwise.
    pub fn preview(&self) -> &RackCollection {
        match &self.state {
            DragState::Idle { racks } => racks,
            DragState::Dragging(session) => &session.preview,
        }
    }

    /// Replace the racks wholesale (new puzzle, restored history).
    /// A live drag is discarded without committing.
    pub fn set_racks(&mut self, racks: RackCollection) {
        if self.is_dragging() {
            log::debug!("racks replaced mid-drag; discarding preview");
        }
        self.state = DragState::Idle { racks };
    }

    /// While disabled, pick-ups are refused. Disabling mid-drag cancels it.
    pub fn set_disabled(&mut self, disabled: bool) -> Vec<DragEffect> {
        self.disabled = disabled;
        if disabled { self.cancel() } else { Vec::new() }
    }

    /// Feed one input event through the state machine.
    pub fn handle(&mut self, event: &DragEvent, layout: &DropLayout) -> Vec<DragEffect> {
        match event {
            DragEvent::PointerDown { x, y } => {
                let p = Point::new(*x, *y);
                match layout.hit_test_tile(p) {
                    Some(tile) => self.pick_up(tile, DragMode::Pointer, layout, Some(p)),
                    None => Vec::new(),
                }
            }
            DragEvent::PointerMove { x, y } => {
                let max_tiles = self.config.max_tiles;
                match self.session_in(DragMode::Pointer) {
                    Some(session) => {
                        session.track_pointer(Point::new(*x, *y));
                        session.hover(layout, None, max_tiles)
                    }
                    None => Vec::new(),
                }
            }
            DragEvent::PointerUp { x, y } => match self.session_in(DragMode::Pointer) {
                Some(session) => {
                    session.track_pointer(Point::new(*x, *y));
                    self.drop(layout)
                }
                None => Vec::new(),
            },
            DragEvent::Key { code, focused } => self.handle_key(code, *focused, layout),
            DragEvent::Cancel => self.cancel(),
        }
    }

    /// Abandon the live drag, if any. Calling it again is a no-op.
    pub fn cancel(&mut self) -> Vec<DragEffect> {
        let session = match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => session,
            idle => {
                self.state = idle;
                return Vec::new();
            }
        };
        let DragSession {
            committed,
            active,
            letter,
            ..
        } = *session;
        log::debug!("drag of {active:?} cancelled");
        self.state = DragState::Idle { racks: committed };
        vec![
            DragEffect::Announce(Announcement::Cancel { letter }.to_string()),
            DragEffect::Cancelled,
        ]
    }

    fn handle_key(
        &mut self,
        code: &str,
        focused: Option<TileId>,
        layout: &DropLayout,
    ) -> Vec<DragEffect> {
        let Some(action) = KeyMap::resolve(code) else {
            return Vec::new();
        };
        let mode = self.session().map(DragSession::mode);
        match (action, mode) {
            (KeyAction::Cancel, Some(_)) => self.cancel(),
            (KeyAction::PickUpOrDrop, None) => match focused {
                Some(tile) => self.pick_up(tile, DragMode::Keyboard, layout, None),
                None => Vec::new(),
            },
            (KeyAction::PickUpOrDrop | KeyAction::Drop, Some(DragMode::Keyboard)) => {
                self.drop(layout)
            }
            (KeyAction::Move(direction), Some(DragMode::Keyboard)) => self.step(direction, layout),
            _ => Vec::new(),
        }
    }

    fn session_in(&mut self, mode: DragMode) -> Option<&mut DragSession> {
        match &mut self.state {
            DragState::Dragging(session) if session.mode == mode => Some(&mut **session),
            _ => None,
        }
    }

    fn pick_up(
        &mut self,
        tile: TileId,
        mode: DragMode,
        layout: &DropLayout,
        pointer: Option<Point>,
    ) -> Vec<DragEffect> {
        if self.disabled {
            log::debug!("pick-up of {tile:?} refused: board disabled");
            return Vec::new();
        }
        let racks = match std::mem::take(&mut self.state) {
            DragState::Idle { racks } => racks,
            dragging => {
                log::debug!("pick-up of {tile:?} ignored: a drag is already live");
                self.state = dragging;
                return Vec::new();
            }
        };
        let Some(letter) = racks.tile(tile).map(|t| t.letter) else {
            log::debug!("pick-up of {tile:?} ignored: not on the board");
            self.state = DragState::Idle { racks };
            return Vec::new();
        };

        let origin = layout
            .iter()
            .find(|d| d.target.tile_id() == Some(tile) && !d.rect.is_degenerate());
        log::debug!("picked up {tile:?} ({mode:?})");
        self.state = DragState::Dragging(Box::new(DragSession {
            preview: racks.clone(),
            committed: racks,
            active: tile,
            letter,
            mode,
            origin_rect: origin.map(|d| d.rect),
            pointer_origin: pointer,
            drag_rect: origin.map(|d| d.rect),
            pointer,
            over: origin.map(|d| d.target),
        }));
        vec![DragEffect::Announce(
            Announcement::PickUp { letter }.to_string(),
        )]
    }

    fn step(&mut self, direction: Direction, layout: &DropLayout) -> Vec<DragEffect> {
        let max_tiles = self.config.max_tiles;
        let Some(session) = self.session_in(DragMode::Keyboard) else {
            return Vec::new();
        };
        let (Some(current), Some((rack_index, _))) =
            (session.drag_rect, session.preview.locate(session.active))
        else {
            return Vec::new();
        };
        let rack_count = session.preview.len();
        let Some(target) = keyboard_target(direction, rack_index, rack_count, current, layout)
        else {
            return Vec::new();
        };
        session.drag_rect = Some(current.with_origin(target));
        // Up/Down settle in the adjacent rack's trailing space when no tile
        // or rack droppable sits in the current column.
        let adjacent = match direction {
            Direction::Up => rack_index.checked_sub(1),
            Direction::Down => rack_index.checked_add(1),
            Direction::Left | Direction::Right => None,
        };
        let fallback = adjacent.and_then(|next| session.trailing_space(layout, next));
        session.hover(layout, fallback, max_tiles)
    }

    fn drop(&mut self, layout: &DropLayout) -> Vec<DragEffect> {
        let max_tiles = self.config.max_tiles;
        let mut session = match std::mem::take(&mut self.state) {
            DragState::Dragging(session) => session,
            idle => {
                self.state = idle;
                return Vec::new();
            }
        };

        let mut effects = Vec::new();
        // Settle on the final target; dropping on itself or nowhere keeps
        // the preview as it is.
        if let Some(hit) = session.resolve_target(layout)
            && session.apply_move(&hit, max_tiles)
        {
            effects.push(DragEffect::PreviewChanged);
        }

        let DragSession {
            preview,
            active,
            letter,
            ..
        } = *session;
        log::debug!("dropped {active:?}; committing {:?}", preview.words());
        effects.push(DragEffect::Announce(
            Announcement::Drop { letter }.to_string(),
        ));
        effects.push(DragEffect::Committed(preview.clone()));
        self.state = DragState::Idle { racks: preview };
        effects
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridMetrics;
    use pretty_assertions::assert_eq;
    use wr_core::{Rack, Tile};

    fn racks() -> RackCollection {
        let rack = |letters: &str| -> Rack {
            letters
                .chars()
                .map(|c| Tile::new(&format!("s-{c}"), c, 1))
                .collect()
        };
        RackCollection::new(vec![rack("ABC"), rack("DIRT")])
    }

    fn id(c: char) -> TileId {
        TileId::intern(&format!("s-{c}"))
    }

    fn layout_for(ctl: &DragController) -> DropLayout {
        DropLayout::grid(ctl.preview(), ctl.config().max_tiles, &GridMetrics::default())
    }

    fn center_of(ctl: &DragController, c: char) -> Point {
        layout_for(ctl).tile_rect(id(c)).unwrap().center()
    }

    fn press(ctl: &mut DragController, code: &str, focused: Option<char>) -> Vec<DragEffect> {
        let layout = layout_for(ctl);
        ctl.handle(&DragEvent::key(code, focused.map(id)), &layout)
    }

    #[test]
    fn pick_up_announces_and_snapshots() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        let effects = press(&mut ctl, "Space", Some('B'));
        assert_eq!(
            effects,
            vec![DragEffect::Announce("Picked up tile B".to_string())]
        );
        assert_eq!(ctl.active_tile(), Some(id('B')));
        assert_eq!(ctl.preview(), ctl.committed());
    }

    #[test]
    fn disabled_board_refuses_pick_up() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        ctl.set_disabled(true);
        assert!(press(&mut ctl, "Enter", Some('A')).is_empty());
        let p = center_of(&ctl, 'A');
        assert!(
            ctl.handle(&DragEvent::pointer_down(p.x, p.y), &layout_for(&ctl))
                .is_empty()
        );
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.preview(), &racks());
    }

    #[test]
    fn disabling_mid_drag_cancels() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        press(&mut ctl, "Space", Some('A'));
        press(&mut ctl, "ArrowDown", None);
        assert_ne!(ctl.preview(), &racks());
        let effects = ctl.set_disabled(true);
        assert_eq!(effects.last(), Some(&DragEffect::Cancelled));
        assert_eq!(ctl.committed(), &racks());
    }

    #[test]
    fn second_pick_up_is_ignored() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        press(&mut ctl, "Space", Some('A'));
        let p = center_of(&ctl, 'C');
        let effects = ctl.handle(&DragEvent::pointer_down(p.x, p.y), &layout_for(&ctl));
        assert!(effects.is_empty());
        assert_eq!(ctl.active_tile(), Some(id('A')));
    }

    #[test]
    fn hover_leaves_committed_untouched() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        press(&mut ctl, "Space", Some('B'));
        let effects = press(&mut ctl, "ArrowRight", None);
        assert_eq!(
            effects,
            vec![
                DragEffect::Announce("Tile B was moved over tile C.".to_string()),
                DragEffect::PreviewChanged,
            ]
        );
        assert_eq!(ctl.preview().words()[0], "ACB");
        assert_eq!(ctl.committed(), &racks());
    }

    #[test]
    fn cancel_is_idempotent() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        press(&mut ctl, "Space", Some('C'));
        press(&mut ctl, "ArrowDown", None);
        let effects = press(&mut ctl, "Escape", None);
        assert_eq!(
            effects,
            vec![
                DragEffect::Announce(
                    "Dragging was cancelled. Tile C was returned to its original position."
                        .to_string()
                ),
                DragEffect::Cancelled,
            ]
        );
        assert!(press(&mut ctl, "Escape", None).is_empty());
        assert!(ctl.cancel().is_empty());
        assert_eq!(ctl.committed(), &racks());
    }

    #[test]
    fn events_without_a_session_do_nothing() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        let layout = layout_for(&ctl);
        assert!(ctl.handle(&DragEvent::pointer_move(1.0, 1.0), &layout).is_empty());
        assert!(ctl.handle(&DragEvent::pointer_up(1.0, 1.0), &layout).is_empty());
        assert!(ctl.handle(&DragEvent::Cancel, &layout).is_empty());
        assert!(press(&mut ctl, "ArrowLeft", None).is_empty());
        assert!(press(&mut ctl, "Space", None).is_empty());
        // Empty space: nothing to pick up.
        assert!(ctl.handle(&DragEvent::pointer_down(300.0, 10.0), &layout).is_empty());
    }

    #[test]
    fn keyboard_drag_ignores_pointer_and_vice_versa() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        press(&mut ctl, "Space", Some('A'));
        let layout = layout_for(&ctl);
        assert!(ctl.handle(&DragEvent::pointer_move(200.0, 80.0), &layout).is_empty());
        assert!(ctl.handle(&DragEvent::pointer_up(200.0, 80.0), &layout).is_empty());
        assert!(ctl.is_dragging());
        press(&mut ctl, "Escape", None);

        let p = center_of(&ctl, 'A');
        ctl.handle(&DragEvent::pointer_down(p.x, p.y), &layout_for(&ctl));
        assert_eq!(ctl.session().map(DragSession::mode), Some(DragMode::Pointer));
        assert!(press(&mut ctl, "ArrowDown", None).is_empty());
        assert!(press(&mut ctl, "Space", None).is_empty());
        // Escape still cancels a pointer drag.
        assert_eq!(press(&mut ctl, "Escape", None).last(), Some(&DragEffect::Cancelled));
    }

    #[test]
    fn replacing_racks_mid_drag_discards_session() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        press(&mut ctl, "Space", Some('A'));
        let fresh = RackCollection::new(vec![Rack::new()]);
        ctl.set_racks(fresh.clone());
        assert!(!ctl.is_dragging());
        assert_eq!(ctl.committed(), &fresh);
    }

    #[test]
    fn pick_up_of_unknown_tile_is_ignored() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        let layout = layout_for(&ctl);
        let ghost = TileId::intern("s-ghost");
        assert!(
            ctl.handle(&DragEvent::key("Space", Some(ghost)), &layout)
                .is_empty()
        );
        assert_eq!(ctl.state(), &DragState::Idle { racks: racks() });
    }

    #[test]
    fn stale_layout_target_is_a_no_op() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        let p = center_of(&ctl, 'A');
        let mut layout = layout_for(&ctl);
        ctl.handle(&DragEvent::pointer_down(p.x, p.y), &layout);
        // The host still reports a tile that no longer exists, right where B is.
        let b_rect = layout.tile_rect(id('B')).unwrap();
        layout.droppables.retain(|d| d.target.tile_id() != Some(id('B')));
        layout.push(
            DropTarget::Tile {
                id: TileId::intern("s-gone"),
                rack_index: 0,
            },
            b_rect,
        );
        let c = b_rect.center();
        let effects = ctl.handle(&DragEvent::pointer_move(c.x, c.y), &layout);
        assert!(!effects.contains(&DragEffect::PreviewChanged));
        assert_eq!(ctl.preview(), &racks());
    }

    #[test]
    fn missing_geometry_means_no_movement() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        let empty = DropLayout::new();
        ctl.handle(&DragEvent::key("Space", Some(id('A'))), &empty);
        assert!(ctl.is_dragging());
        for code in ["ArrowRight", "ArrowDown"] {
            assert!(ctl.handle(&DragEvent::key(code, None), &empty).is_empty());
        }
        let effects = ctl.handle(&DragEvent::key("Space", None), &empty);
        assert_eq!(effects.last(), Some(&DragEffect::Committed(racks())));
    }

    #[test]
    fn below_target_far_edge_inserts_after() {
        let mut ctl = DragController::new(racks(), EngineConfig::default());
        press(&mut ctl, "Space", Some('A'));
        let DragState::Dragging(session) = &mut ctl.state else {
            panic!("expected a live drag");
        };
        session.drag_rect = Some(Rect::new(0.0, 200.0, 48.0, 48.0));
        let hit = Collision {
            target: DropTarget::Tile {
                id: id('D'),
                rack_index: 1,
            },
            rect: Rect::new(0.0, 64.0, 48.0, 48.0),
            ratio: 1.0,
        };
        assert!(session.apply_move(&hit, 8));
        assert_eq!(session.preview().words(), vec!["BC", "DAIRT"]);
    }

    #[test]
    fn same_target_ignores_rack_index_of_tiles() {
        let a = DropTarget::Tile {
            id: id('A'),
            rack_index: 0,
        };
        let moved = DropTarget::Tile {
            id: id('A'),
            rack_index: 1,
        };
        assert!(same_target(Some(a), Some(moved)));
        assert!(!same_target(Some(a), Some(DropTarget::Rack { rack_index: 0 })));
        assert!(!same_target(Some(a), None));
        assert!(same_target(None, None));
    }
}
