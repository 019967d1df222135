use crate::types::Tile;

/// Read-only tile queries consumed by agents and the collision pass.
pub trait TileMap {
    fn tile_at(&self, x: i32, y: i32) -> Tile;

    fn is_blocked(&self, tile: Tile) -> bool {
        matches!(tile, Tile::Wall | Tile::PenGate)
    }

    fn is_blocked_at(&self, x: i32, y: i32) -> bool {
        self.is_blocked(self.tile_at(x, y))
    }
}

/// Classic 28x31 layout, top row first. Row 0 is y = 30.
pub const CLASSIC_LAYOUT: [&str; 31] = [
    "############################",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#o####.#####.##.#####.####o#",
    "#.####.#####.##.#####.####.#",
    "#..........................#",
    "#.####.##.########.##.####.#",
    "#.####.##.########.##.####.#",
    "#......##....##....##......#",
    "######.##### ## #####.######",
    "######.##### ## #####.######",
    "######.##          ##.######",
    "######.## ###--### ##.######",
    "######.## #______# ##.######",
    "P     .   #______#   .     P",
    "######.## #______# ##.######",
    "######.## ######## ##.######",
    "######.##          ##.######",
    "######.## ######## ##.######",
    "######.## ######## ##.######",
    "#............##............#",
    "#.####.#####.##.#####.####.#",
    "#.####.#####.##.#####.####.#",
    "#o..##.......  .......##..o#",
    "###.##.##.########.##.##.###",
    "###.##.##.########.##.##.###",
    "#......##....##....##......#",
    "#.##########.##.##########.#",
    "#.##########.##.##########.#",
    "#..........................#",
    "############################",
];

#[derive(Clone, Debug)]
pub struct Maze {
    width: i32,
    height: i32,
    layout: Vec<Vec<Tile>>,
    tiles: Vec<Vec<Tile>>,
}

impl Maze {
    pub fn classic() -> Self {
        Self::from_rows(&CLASSIC_LAYOUT).expect("classic layout is well-formed")
    }

    /// Parses an ASCII layout. Returns `None` for ragged rows or unknown glyphs.
    pub fn from_rows(rows: &[&str]) -> Option<Self> {
        let width = rows.first()?.chars().count();
        let mut layout = Vec::with_capacity(rows.len());
        for row in rows {
            if row.chars().count() != width {
                return None;
            }
            let parsed: Option<Vec<Tile>> = row.chars().map(Tile::from_glyph).collect();
            layout.push(parsed?);
        }
        Some(Self {
            width: width as i32,
            height: rows.len() as i32,
            tiles: layout.clone(),
            layout,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn item_count(&self) -> u32 {
        self.tiles
            .iter()
            .flatten()
            .filter(|tile| matches!(tile, Tile::SmallItem | Tile::PowerItem))
            .count() as u32
    }

    /// Removes an item from the tile, returning what was there.
    pub fn take_item(&mut self, x: i32, y: i32) -> Option<Tile> {
        let (row, col) = self.index(x, y)?;
        let tile = self.tiles[row][col];
        if !matches!(tile, Tile::SmallItem | Tile::PowerItem) {
            return None;
        }
        self.tiles[row][col] = Tile::Open;
        Some(tile)
    }

    /// Restores every consumed item.
    pub fn reset(&mut self) {
        self.tiles = self.layout.clone();
    }

    fn index(&self, x: i32, y: i32) -> Option<(usize, usize)> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return None;
        }
        Some(((self.height - 1 - y) as usize, x as usize))
    }
}

impl TileMap for Maze {
    fn tile_at(&self, x: i32, y: i32) -> Tile {
        match self.index(x, y) {
            Some((row, col)) => self.tiles[row][col],
            None => Tile::Wall,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAP_HEIGHT, MAP_WIDTH, TOTAL_ITEMS};

    #[test]
    fn classic_layout_has_expected_dimensions_and_items() {
        let maze = Maze::classic();
        assert_eq!(maze.width(), MAP_WIDTH);
        assert_eq!(maze.height(), MAP_HEIGHT);
        assert_eq!(maze.item_count(), TOTAL_ITEMS);
    }

    #[test]
    fn y_axis_grows_upward() {
        let maze = Maze::classic();
        assert_eq!(maze.tile_at(0, 16), Tile::Portal);
        assert_eq!(maze.tile_at(27, 16), Tile::Portal);
        assert_eq!(maze.tile_at(13, 18), Tile::PenGate);
        assert_eq!(maze.tile_at(14, 16), Tile::PenInterior);
        assert_eq!(maze.tile_at(1, 27), Tile::PowerItem);
        assert_eq!(maze.tile_at(1, 7), Tile::PowerItem);
    }

    #[test]
    fn outside_grid_is_wall_and_gate_blocks() {
        let maze = Maze::classic();
        assert_eq!(maze.tile_at(-1, 16), Tile::Wall);
        assert_eq!(maze.tile_at(28, 16), Tile::Wall);
        assert!(maze.is_blocked_at(13, 18));
        assert!(!maze.is_blocked_at(14, 16));
        assert!(!maze.is_blocked_at(0, 16));
    }

    #[test]
    fn take_item_clears_tile_until_reset() {
        let mut maze = Maze::classic();
        assert_eq!(maze.take_item(1, 29), Some(Tile::SmallItem));
        assert_eq!(maze.take_item(1, 29), None);
        assert_eq!(maze.tile_at(1, 29), Tile::Open);
        assert_eq!(maze.item_count(), TOTAL_ITEMS - 1);
        maze.reset();
        assert_eq!(maze.tile_at(1, 29), Tile::SmallItem);
    }

    #[test]
    fn from_rows_rejects_ragged_or_unknown_rows() {
        assert!(Maze::from_rows(&["###", "##"]).is_none());
        assert!(Maze::from_rows(&["#x#"]).is_none());
        assert!(Maze::from_rows(&[]).is_none());
    }
}
