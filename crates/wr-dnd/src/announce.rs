//! Screen-reader announcements for the drag lifecycle.
//!
//! Each lifecycle event maps to one sentence for the host's live region.
//! Text is built fresh from the event every time; nothing is cached.

use std::fmt;

/// How to drag with the keyboard; attached to every draggable tile.
pub const INSTRUCTIONS: &str = "To pick up a tile, press space or enter. \
Use the arrow keys to move the tile within a rack or between racks. \
Press space or enter again to drop the tile in its new position, or press escape to cancel.";

/// What the dragged tile is over after a hover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverKind {
    /// Another tile, by letter.
    Tile(char),
    /// A rack's trailing space.
    Rack,
    Nothing,
}

/// A drag lifecycle event worth announcing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Announcement {
    PickUp { letter: char },
    Over { letter: char, over: OverKind },
    Drop { letter: char },
    Cancel { letter: char },
}

impl fmt::Display for Announcement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Announcement::PickUp { letter } => write!(f, "Picked up tile {letter}"),
            Announcement::Over {
                letter,
                over: OverKind::Tile(other),
            } => write!(f, "Tile {letter} was moved over tile {other}."),
            Announcement::Over {
                letter,
                over: OverKind::Rack,
            } => write!(
                f,
                "Tile {letter} was moved over an empty space in another rack."
            ),
            Announcement::Over {
                letter,
                over: OverKind::Nothing,
            } => write!(f, "Tile {letter} is no longer over a droppable area."),
            Announcement::Drop { letter } => write!(f, "Tile {letter} was dropped."),
            Announcement::Cancel { letter } => write!(
                f,
                "Dragging was cancelled. Tile {letter} was returned to its original position."
            ),
        }
    }
}
