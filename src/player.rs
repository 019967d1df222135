use crate::constants::{
    PLAYER_SPEED, PLAYER_START_UNITS, PORTAL_EXIT_LEFT_X, PORTAL_EXIT_RIGHT_X, POWER_ITEM_SCORE,
    SMALL_ITEM_SCORE, TILE_UNITS,
};
use crate::maze::{Maze, TileMap};
use crate::position::Position;
use crate::types::{Direction, PlayerView, Tile};

/// The controlled agent. Turns are buffered until the next tile centre.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pos: Position,
    facing: Direction,
    requested: Direction,
    chomping: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

impl Player {
    pub fn new() -> Self {
        let (x, y) = PLAYER_START_UNITS;
        Self {
            pos: Position::from_units(x, y),
            facing: Direction::Left,
            requested: Direction::Left,
            chomping: true,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn tile(&self) -> (i32, i32) {
        self.pos.tile()
    }

    pub fn facing(&self) -> Direction {
        self.facing
    }

    pub fn requested(&self) -> Direction {
        self.requested
    }

    pub fn is_chomping(&self) -> bool {
        self.chomping
    }

    pub fn set_facing(&mut self, dir: Direction) {
        self.requested = dir;
    }

    pub fn suppress_animation(&mut self) {
        self.chomping = false;
    }

    pub fn resume_animation(&mut self) {
        self.chomping = true;
    }

    /// Eats whatever item sits on the current tile and returns its score.
    pub fn consume_current_tile(&mut self, maze: &mut Maze, items_left: &mut u32) -> u32 {
        let (x, y) = self.tile();
        let score = match maze.take_item(x, y) {
            Some(Tile::SmallItem) => SMALL_ITEM_SCORE,
            Some(Tile::PowerItem) => POWER_ITEM_SCORE,
            _ => return 0,
        };
        *items_left = items_left.saturating_sub(1);
        score
    }

    pub fn advance(&mut self, map: &impl TileMap) {
        if self.requested == self.facing.opposite() {
            self.facing = self.requested;
        }

        if self.pos.is_centered() {
            let (x, y) = self.tile();
            if map.tile_at(x, y) == Tile::Portal {
                let exit_x = if self.facing == Direction::Right {
                    PORTAL_EXIT_LEFT_X
                } else {
                    PORTAL_EXIT_RIGHT_X
                };
                self.pos.x = exit_x * TILE_UNITS;
            }
            if self.requested != self.facing && !self.is_blocked_toward(map, self.requested) {
                self.facing = self.requested;
            }
            if self.is_blocked_toward(map, self.facing) {
                return;
            }
        }

        self.pos.advance(self.facing, PLAYER_SPEED);
        if self.facing.is_vertical() {
            self.pos.snap_x();
        } else {
            self.pos.snap_y();
        }
    }

    fn is_blocked_toward(&self, map: &impl TileMap, dir: Direction) -> bool {
        let (x, y) = self.tile();
        let (nx, ny) = dir.offset(x, y, 1);
        map.is_blocked_at(nx, ny)
    }

    pub fn view(&self) -> PlayerView {
        let (tile_x, tile_y) = self.tile();
        PlayerView {
            x: self.pos.x_tiles(),
            y: self.pos.y_tiles(),
            tile_x,
            tile_y,
            dir: self.facing,
            chomping: self.chomping,
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, x_units: i32, y_units: i32, dir: Direction) {
        self.pos = Position::from_units(x_units, y_units);
        self.facing = dir;
        self.requested = dir;
    }
}
