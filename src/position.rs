//! Fixed-point grid coordinates.
//!
//! One tile is [`TILE_UNITS`] units, so a speed percentage `p` moves an agent
//! exactly `p` units per tick and tile centres are hit without drift.

use crate::constants::TILE_UNITS;
use crate::types::Direction;

/// Integer division rounding half away from zero, like C's `round`.
pub fn round_div(value: i32, divisor: i32) -> i32 {
    if value >= 0 {
        (2 * value + divisor) / (2 * divisor)
    } else {
        -((-2 * value + divisor) / (2 * divisor))
    }
}

pub fn distance_sq(a: (i32, i32), b: (i32, i32)) -> i64 {
    let dx = (a.0 - b.0) as i64;
    let dy = (a.1 - b.1) as i64;
    dx * dx + dy * dy
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn from_units(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn tile(&self) -> (i32, i32) {
        (round_div(self.x, TILE_UNITS), round_div(self.y, TILE_UNITS))
    }

    pub fn is_centered(&self) -> bool {
        self.x.rem_euclid(TILE_UNITS) == 0 && self.y.rem_euclid(TILE_UNITS) == 0
    }

    /// Re-aligns both axes to multiples of `step` so later centre checks hold.
    pub fn quantize(&mut self, step: i32) {
        self.x = round_div(self.x, step) * step;
        self.y = round_div(self.y, step) * step;
    }

    pub fn snap_x(&mut self) {
        self.x = round_div(self.x, TILE_UNITS) * TILE_UNITS;
    }

    pub fn snap_y(&mut self) {
        self.y = round_div(self.y, TILE_UNITS) * TILE_UNITS;
    }

    pub fn advance(&mut self, dir: Direction, units: i32) {
        let (dx, dy) = dir.delta();
        self.x += dx * units;
        self.y += dy * units;
    }

    pub fn x_tiles(&self) -> f32 {
        self.x as f32 / TILE_UNITS as f32
    }

    pub fn y_tiles(&self) -> f32 {
        self.y as f32 / TILE_UNITS as f32
    }
}

pub fn is_half_tile(units: i32) -> bool {
    units.rem_euclid(TILE_UNITS) == TILE_UNITS / 2
}
