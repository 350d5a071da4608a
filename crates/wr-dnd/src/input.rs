//! Input abstraction layer.
//!
//! Normalizes mouse, touch, and keyboard input into a single `DragEvent`
//! enum consumed by the drag controller. Coordinates are host client
//! coordinates, the same space the `DropLayout` is measured in.

use wr_core::TileId;

/// A normalized input event.
#[derive(Debug, Clone, PartialEq)]
pub enum DragEvent {
    /// Pointer pressed (mouse down, touch start).
    PointerDown { x: f32, y: f32 },

    /// Pointer moved (mouse move, touch move).
    PointerMove { x: f32, y: f32 },

    /// Pointer released.
    PointerUp { x: f32, y: f32 },

    /// Key pressed. `code` is `KeyboardEvent.code`; `focused` is the tile
    /// holding keyboard focus, if any.
    Key {
        code: String,
        focused: Option<TileId>,
    },

    /// Cancel from outside the gesture (window blur, game over, ...).
    Cancel,
}

impl DragEvent {
    pub fn pointer_down(x: f32, y: f32) -> Self {
        Self::PointerDown { x, y }
    }

    pub fn pointer_move(x: f32, y: f32) -> Self {
        Self::PointerMove { x, y }
    }

    pub fn pointer_up(x: f32, y: f32) -> Self {
        Self::PointerUp { x, y }
    }

    pub fn key(code: &str, focused: Option<TileId>) -> Self {
        Self::Key {
            code: code.to_string(),
            focused,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_keeps_code_and_focus() {
        let focused = TileId::intern("in-a");
        assert_eq!(
            DragEvent::key("ArrowUp", Some(focused)),
            DragEvent::Key {
                code: "ArrowUp".to_string(),
                focused: Some(focused),
            }
        );
    }
}
