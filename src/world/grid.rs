use std::collections::HashMap;
use std::num::NonZeroU8;

/// Wall-type identifier: a small positive integer whose only meaning is
/// "which texture".  Zero is reserved for empty space and unrepresentable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WallId(NonZeroU8);

impl WallId {
    pub fn new(raw: u8) -> Option<Self> {
        NonZeroU8::new(raw).map(WallId)
    }

    #[inline]
    pub fn get(self) -> u8 {
        self.0.get()
    }
}

/// Static tile map: integer (column, row) → wall type.
///
/// * Absent key ⇔ empty, passable space.
/// * Out-of-bounds lookups are simply empty — the caster's traversal cap
///   bounds every scan, so no sentinel border is required.
/// * Immutable once built.
///
/// IDs are **not** validated against any texture set here; that is
/// [`super::WallTextures::validate`]'s job at startup.
#[derive(Clone, Debug)]
pub struct TileGrid {
    tiles: HashMap<(i32, i32), WallId>,
    width: i32,
    height: i32,
}

impl TileGrid {
    /// Build from a rectangular array of cell values, 0 = empty.
    pub fn from_rows(rows: &[Vec<u8>]) -> Self {
        let mut tiles = HashMap::new();
        let mut width = 0;
        for (row, cells) in rows.iter().enumerate() {
            width = width.max(cells.len());
            for (col, &cell) in cells.iter().enumerate() {
                if let Some(id) = WallId::new(cell) {
                    tiles.insert((col as i32, row as i32), id);
                }
            }
        }
        Self {
            tiles,
            width: width as i32,
            height: rows.len() as i32,
        }
    }

    /// Parse a text map: `1`–`9` are wall types 1–9, `a`–`z` continue from
    /// 10, `.` and space are empty.  Anything else is treated as empty too,
    /// so stray characters cannot spawn walls.
    pub fn from_text(map: &str) -> Self {
        let rows: Vec<Vec<u8>> = map
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|line| {
                line.chars()
                    .map(|c| match c {
                        '1'..='9' => c as u8 - b'0',
                        'a'..='z' => c as u8 - b'a' + 10,
                        _ => 0,
                    })
                    .collect()
            })
            .collect();
        Self::from_rows(&rows)
    }

    /// O(1) wall lookup; `None` means passable (including out of bounds).
    #[inline]
    pub fn wall_at(&self, col: i32, row: i32) -> Option<WallId> {
        self.tiles.get(&(col, row)).copied()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Every distinct wall type the map references.
    pub fn wall_ids(&self) -> impl Iterator<Item = WallId> + '_ {
        let mut seen: Vec<WallId> = self.tiles.values().copied().collect();
        seen.sort_unstable();
        seen.dedup();
        seen.into_iter()
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_is_empty_everything_else_is_kept() {
        let grid = TileGrid::from_rows(&[vec![1, 0, 2], vec![0, 0, 0], vec![3, 0, 9]]);
        assert_eq!(grid.wall_at(0, 0).map(WallId::get), Some(1));
        assert_eq!(grid.wall_at(2, 0).map(WallId::get), Some(2));
        assert_eq!(grid.wall_at(2, 2).map(WallId::get), Some(9));
        assert_eq!(grid.wall_at(1, 0), None);
        assert_eq!(grid.wall_at(1, 1), None);
        assert_eq!((grid.width(), grid.height()), (3, 3));
    }

    #[test]
    fn out_of_bounds_is_passable() {
        let grid = TileGrid::from_rows(&[vec![1]]);
        assert_eq!(grid.wall_at(-1, 0), None);
        assert_eq!(grid.wall_at(0, 55), None);
        assert_eq!(grid.wall_at(i32::MAX, i32::MIN), None);
    }

    #[test]
    fn text_map_parses_digits_letters_and_blanks() {
        let grid = TileGrid::from_text("12.\n. a\n..b\n");
        assert_eq!(grid.wall_at(0, 0).map(WallId::get), Some(1));
        assert_eq!(grid.wall_at(1, 0).map(WallId::get), Some(2));
        assert_eq!(grid.wall_at(2, 1).map(WallId::get), Some(10));
        assert_eq!(grid.wall_at(2, 2).map(WallId::get), Some(11));
        assert_eq!(grid.wall_at(2, 0), None);
        assert_eq!(grid.wall_at(1, 1), None);
    }

    #[test]
    fn wall_ids_are_deduplicated() {
        let grid = TileGrid::from_rows(&[vec![2, 2, 1], vec![1, 0, 2]]);
        let ids: Vec<u8> = grid.wall_ids().map(WallId::get).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
