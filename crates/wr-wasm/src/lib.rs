//! WASM bridge for Word Racks: exposes the drag engine to the browser client.
//!
//! Compiled via `wasm-pack build --target web`. The page measures its DOM
//! (or asks for a synthetic grid), forwards pointer and key input, and
//! re-renders from `preview_json()` whenever an event reports a change.

use serde_json::json;
use wasm_bindgen::prelude::*;
use wr_core::scoring::{ScoreSummary, all_racks_valid, score_racks, total_score};
use wr_core::{
    DailyPuzzle, EngineConfig, GamePhase, GameRules, PlayHistoryRecord, RackCollection, TileId,
    WordList,
};
use wr_dnd::{DragController, DragEffect, DragEvent, DropLayout, GridMetrics, INSTRUCTIONS};

/// The main WASM-facing board controller.
///
/// Holds the drag controller plus everything the page needs to score a
/// game. All interaction from JS goes through this struct.
#[wasm_bindgen]
pub struct RacksBoard {
    controller: DragController,
    puzzle: Option<DailyPuzzle>,
    rules: GameRules,
    words: WordList,
    phase: GamePhase,
    /// Host override (modal open, results screen) on top of the phase.
    paused: bool,
    layout: DropLayout,
    /// When set, the layout is rebuilt from the preview before every event.
    grid: Option<GridMetrics>,
    announcements: Vec<String>,
}

#[wasm_bindgen]
impl RacksBoard {
    /// Create an empty board. `max_tiles == 0` uses the default capacity.
    #[wasm_bindgen(constructor)]
    pub fn new(max_tiles: usize) -> Self {
        console_error_panic_hook_setup();

        let config = if max_tiles == 0 {
            EngineConfig::default()
        } else {
            EngineConfig::with_max_tiles(max_tiles)
        };
        let mut board = Self {
            controller: DragController::new(RackCollection::default(), config),
            puzzle: None,
            rules: GameRules::default(),
            words: WordList::default(),
            phase: GamePhase::default(),
            paused: false,
            layout: DropLayout::new(),
            grid: None,
            announcements: Vec::new(),
        };
        board.sync_disabled();
        board
    }

    // ─── Loading ─────────────────────────────────────────────────────────

    /// Load a daily puzzle. Resets the phase to pre-game.
    /// Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn load_puzzle(&mut self, json: &str) -> String {
        match DailyPuzzle::from_json(json) {
            Ok(puzzle) => {
                log::debug!("loaded puzzle for {}", puzzle.date);
                self.controller.set_racks(puzzle.racks());
                self.puzzle = Some(puzzle);
                self.phase = GamePhase::PreGame;
                self.announcements.clear();
                self.sync_disabled();
                ok_json()
            }
            Err(e) => error_json(&e),
        }
    }

    /// Load timer, multipliers, and letter values.
    pub fn set_rules(&mut self, json: &str) -> String {
        match GameRules::from_json(json) {
            Ok(rules) => {
                self.rules = rules;
                ok_json()
            }
            Err(e) => error_json(&e),
        }
    }

    /// Load the dictionary (one word per line). Returns the word count.
    pub fn set_words(&mut self, text: &str) -> usize {
        self.words = WordList::parse(text);
        self.words.len()
    }

    /// Timer length from the loaded rules.
    pub fn timer_millis(&self) -> f64 {
        self.rules.timer_millis() as f64
    }

    // ─── Geometry ────────────────────────────────────────────────────────

    /// Replace the measured droppable geometry. Turns off grid mode.
    pub fn set_layout(&mut self, json: &str) -> String {
        match DropLayout::from_json(json) {
            Ok(layout) => {
                self.layout = layout;
                self.grid = None;
                ok_json()
            }
            Err(e) => error_json(&e),
        }
    }

    /// Let the engine lay racks out on a regular grid instead of reading
    /// measured geometry. An empty string uses the default metrics.
    pub fn use_grid(&mut self, json: &str) -> String {
        let metrics = if json.trim().is_empty() {
            Ok(GridMetrics::default())
        } else {
            serde_json::from_str::<GridMetrics>(json).map_err(|e| format!("invalid grid: {e}"))
        };
        match metrics {
            Ok(metrics) => {
                self.grid = Some(metrics);
                ok_json()
            }
            Err(e) => error_json(&e),
        }
    }

    /// Current layout as JSON (useful in grid mode to position tiles).
    pub fn layout_json(&mut self) -> String {
        self.refresh_grid();
        serde_json::to_string(&self.layout).unwrap_or_else(|_| r#"{"droppables":[]}"#.to_string())
    }

    // ─── Phase ───────────────────────────────────────────────────────────

    /// "Start Game". Returns `true` if the board is now playable.
    pub fn start(&mut self) -> bool {
        self.phase = self.phase.start();
        self.sync_disabled();
        self.phase == GamePhase::Playing
    }

    /// Timer expired or the player submitted. Any live drag is cancelled.
    /// Returns the results JSON (see [`RacksBoard::results_json`]).
    pub fn finish(&mut self) -> String {
        self.phase = self.phase.finish();
        self.sync_disabled();
        self.results_json()
    }

    pub fn phase(&self) -> String {
        match self.phase {
            GamePhase::PreGame => "pre-game",
            GamePhase::Playing => "playing",
            GamePhase::Finished => "finished",
        }
        .to_string()
    }

    /// Host-side pause. Pausing mid-drag cancels the drag.
    pub fn set_disabled(&mut self, disabled: bool) -> String {
        self.paused = disabled;
        self.sync_disabled()
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Returns JSON: `{"changed":bool,"committed":bool,"cancelled":bool,"dragging":bool}`.
    pub fn pointer_down(&mut self, x: f32, y: f32) -> String {
        self.dispatch(DragEvent::pointer_down(x, y))
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> String {
        self.dispatch(DragEvent::pointer_move(x, y))
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> String {
        self.dispatch(DragEvent::pointer_up(x, y))
    }

    /// Handle a key press. `focused_id` is the tile holding focus, or an
    /// empty string.
    pub fn key(&mut self, code: &str, focused_id: &str) -> String {
        // Unknown IDs cannot name a tile on the board; looking them up
        // without interning keeps host strings out of the interner.
        let focused = TileId::get(focused_id);
        self.dispatch(DragEvent::key(code, focused))
    }

    /// Cancel from outside the gesture (window blur, route change).
    pub fn cancel(&mut self) -> String {
        self.dispatch(DragEvent::Cancel)
    }

    pub fn is_dragging(&self) -> bool {
        self.controller.is_dragging()
    }

    /// ID of the tile being dragged, or empty string if none.
    pub fn active_tile(&self) -> String {
        self.controller
            .active_tile()
            .map(|id| id.as_str().to_string())
            .unwrap_or_default()
    }

    // ─── State ───────────────────────────────────────────────────────────

    /// What to render right now.
    pub fn preview_json(&self) -> String {
        racks_json(self.controller.preview())
    }

    pub fn committed_json(&self) -> String {
        racks_json(self.controller.committed())
    }

    /// Pending live-region messages as a JSON array, oldest first.
    pub fn take_announcements(&mut self) -> String {
        let pending = std::mem::take(&mut self.announcements);
        serde_json::to_string(&pending).unwrap_or_else(|_| "[]".to_string())
    }

    /// Keyboard drag instructions for `aria-describedby`.
    pub fn instructions(&self) -> String {
        INSTRUCTIONS.to_string()
    }

    /// Per-rack scores of the rendered arrangement. Returns JSON:
    /// `{"scores":[{"baseScore":n,"multiplier":n}],"total":n,"canSubmit":bool}`
    pub fn scores_json(&self) -> String {
        let scores = score_racks(self.controller.preview(), &self.rules, &self.words);
        json!({
            "scores": scores,
            "total": total_score(&scores),
            "canSubmit": all_racks_valid(&scores),
        })
        .to_string()
    }

    /// Summary, share text, and the record to store in play history.
    pub fn results_json(&self) -> String {
        let Some(puzzle) = &self.puzzle else {
            return error_json("no puzzle loaded");
        };
        let racks = self.controller.committed();
        let scores = score_racks(racks, &self.rules, &self.words);
        let target_scores = score_racks(&puzzle.target_solution, &self.rules, &self.words);
        let summary = ScoreSummary::new(&scores, &target_scores);
        let record = PlayHistoryRecord {
            racks: racks.clone(),
            score: summary.total_score,
            target_score: summary.target_score,
        };
        json!({
            "ok": true,
            "summary": summary,
            "scores": scores,
            "targetScores": target_scores,
            "targetWords": puzzle.target_words(),
            "reportText": summary.report_text(),
            "shareText": summary.share_text(&scores, &puzzle.date),
            "screenReaderText": summary.screen_reader_text(&target_scores, &puzzle.target_words()),
            "record": record,
        })
        .to_string()
    }

    /// Show a finished game from play history. The record's racks replace
    /// the board wholesale and the phase jumps to finished. The record must
    /// be an arrangement of the loaded puzzle.
    pub fn restore_record(&mut self, json: &str) -> String {
        let Some(puzzle) = &self.puzzle else {
            return error_json("no puzzle loaded");
        };
        let record = match serde_json::from_str::<PlayHistoryRecord>(json) {
            Ok(record) => record,
            Err(e) => return error_json(&format!("invalid record: {e}")),
        };
        let max_tiles = self.controller.config().max_tiles;
        if let Err(e) = puzzle.check_arrangement(&record.racks, max_tiles) {
            log::warn!("stored record for {} rejected: {e}", puzzle.date);
            return error_json(&format!("record does not match the loaded puzzle: {e}"));
        }
        self.controller.set_racks(record.racks);
        self.phase = GamePhase::Finished;
        self.sync_disabled();
        ok_json()
    }
}

impl RacksBoard {
    fn dispatch(&mut self, event: DragEvent) -> String {
        self.refresh_grid();
        let effects = self.controller.handle(&event, &self.layout);
        self.absorb(effects)
    }

    fn refresh_grid(&mut self) {
        if let Some(metrics) = &self.grid {
            self.layout = DropLayout::grid(
                self.controller.preview(),
                self.controller.config().max_tiles,
                metrics,
            );
        }
    }

    fn sync_disabled(&mut self) -> String {
        let disabled = self.paused || !self.phase.allows_drag();
        let effects = self.controller.set_disabled(disabled);
        self.absorb(effects)
    }

    /// Queue announcements and summarise the rest for JS.
    fn absorb(&mut self, effects: Vec<DragEffect>) -> String {
        let (mut changed, mut committed, mut cancelled) = (false, false, false);
        for effect in effects {
            match effect {
                DragEffect::Announce(text) => self.announcements.push(text),
                DragEffect::PreviewChanged => changed = true,
                DragEffect::Committed(_) => committed = true,
                DragEffect::Cancelled => {
                    changed = true;
                    cancelled = true;
                }
            }
        }
        json!({
            "changed": changed,
            "committed": committed,
            "cancelled": cancelled,
            "dragging": self.controller.is_dragging(),
        })
        .to_string()
    }
}

fn racks_json(racks: &RackCollection) -> String {
    serde_json::to_string(racks).unwrap_or_else(|_| "[]".to_string())
}

fn ok_json() -> String {
    r#"{"ok":true}"#.to_string()
}

fn error_json(message: &str) -> String {
    json!({ "ok": false, "error": message }).to_string()
}

/// Set up a panic hook that logs to console.error.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Word Racks WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone functions (no board needed) ──────────────────────────────

/// Validate puzzle JSON. Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_puzzle(json: &str) -> String {
    match DailyPuzzle::from_json(json) {
        Ok(_) => ok_json(),
        Err(e) => error_json(&e),
    }
}

/// Keyboard drag instructions, without constructing a board.
#[wasm_bindgen]
pub fn instructions() -> String {
    INSTRUCTIONS.to_string()
}
