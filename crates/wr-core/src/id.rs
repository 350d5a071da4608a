use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Every tile ID seen by this process, interned once.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Stable identity of a letter tile: a 4-byte `Spur`, so comparing and
/// hashing never touch the string.
///
/// Identity is the only thing that survives a move: letters and values
/// travel with the tile, racks only ever reorder IDs.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TileId(Spur);

impl TileId {
    /// Look up `s`, interning it on first sight.
    pub fn intern(s: &str) -> Self {
        TileId(INTERNER.get_or_intern(s))
    }

    /// Look up `s` without interning it. Only IDs some puzzle or layout
    /// already introduced resolve.
    pub fn get(s: &str) -> Option<Self> {
        INTERNER.get(s).map(TileId)
    }

    /// The ID as the server spelled it.
    pub fn as_str(&self) -> &str {
        INTERNER.resolve(&self.0)
    }

    /// The `tile-{n}` form the puzzle server hands out.
    pub fn numbered(n: usize) -> Self {
        Self::intern(&format!("tile-{n}"))
    }
}

impl fmt::Debug for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.as_str())
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for TileId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TileId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = std::borrow::Cow::<str>::deserialize(deserializer)?;
        Ok(TileId::intern(&s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interning_roundtrip() {
        let a = TileId::intern("tile-7");
        let b = TileId::intern("tile-7");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "tile-7");
    }

    #[test]
    fn get_never_interns() {
        assert_eq!(TileId::get("tile-never-seen-by-anyone"), None);
        assert_eq!(TileId::get("tile-never-seen-by-anyone"), None);
        let known = TileId::intern("tile-41");
        assert_eq!(TileId::get("tile-41"), Some(known));
    }

    #[test]
    fn numbered_matches_server_format() {
        assert_eq!(TileId::numbered(12), TileId::intern("tile-12"));
        assert_ne!(TileId::numbered(1), TileId::numbered(2));
    }

    #[test]
    fn serializes_as_plain_string() {
        let id = TileId::intern("tile-3");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""tile-3""#);
        let back: TileId = serde_json::from_str(r#""tile-3""#).unwrap();
        assert_eq!(back, id);
    }
}
