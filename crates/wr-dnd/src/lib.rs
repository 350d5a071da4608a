pub mod announce;
pub mod collision;
pub mod input;
pub mod keyboard;
pub mod layout;
pub mod session;

pub use announce::{Announcement, INSTRUCTIONS, OverKind};
pub use collision::{Collision, detect_collisions};
pub use input::DragEvent;
pub use keyboard::{Direction, KeyAction, KeyMap, keyboard_target};
pub use layout::{DropLayout, DropTarget, Droppable, GridMetrics};
pub use session::{DragController, DragEffect, DragMode, DragSession, DragState};
