//! Rack capacity policy.

use crate::model::Rack;

/// Default maximum number of tiles a rack may hold.
pub const DEFAULT_MAX_TILES: usize = 8;

/// May one more tile move into `rack`?
///
/// Callers must pass the rack as it currently stands in the drag preview,
/// not as it was when the gesture started: other tiles moved in during the
/// same session count toward the limit.
pub fn can_accept(rack: &Rack, max_tiles: usize) -> bool {
    rack.len() < max_tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Tile;

    fn rack_of(n: usize) -> Rack {
        (0..n)
            .map(|i| Tile::new(&format!("cap-{i}"), 'X', 1))
            .collect()
    }

    #[test]
    fn accepts_below_limit() {
        assert!(can_accept(&rack_of(0), 3));
        assert!(can_accept(&rack_of(2), 3));
    }

    #[test]
    fn rejects_full_and_overfull() {
        assert!(!can_accept(&rack_of(3), 3));
        assert!(!can_accept(&rack_of(4), 3));
        assert!(!can_accept(&rack_of(0), 0));
    }
}
