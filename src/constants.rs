use crate::types::{GhostColor, Wave};

pub const TICK_RATE: u32 = 60;
pub const TICK_MS: u64 = 1000 / TICK_RATE as u64;

/// Fixed-point resolution of agent positions: one tile is this many units.
pub const TILE_UNITS: i32 = 1000;

pub const MAP_WIDTH: i32 = 28;
pub const MAP_HEIGHT: i32 = 31;

pub const TOTAL_ITEMS: u32 = 244;
pub const SMALL_ITEM_SCORE: u32 = 10;
pub const POWER_ITEM_SCORE: u32 = 50;
pub const CAPTURE_BASE_SCORE: u32 = 200;
pub const CAPTURE_MULTIPLIER_CAP: u32 = 4;
pub const EXTRA_LIFE_SCORE: u32 = 10_000;
pub const STARTING_LIVES: u32 = 2;

// Speed percentages; 100 % advances 0.1 tile per tick.
pub const NORMAL_SPEED: i32 = 100;
pub const VULNERABLE_SPEED: i32 = 40;
pub const CAPTURED_SPEED: i32 = 200;
pub const PEN_SPEED: i32 = 50;
pub const SLOW_CORRIDOR_SPEED: i32 = 50;
pub const PLAYER_SPEED: i32 = 100;

pub const READY_TICKS: u64 = 240;
pub const EVENT_DELAY_TICKS: u64 = 120;
pub const EAT_PAUSE_TICKS: u64 = 120;
pub const DYING_TICKS: u64 = 180;
pub const VULNERABLE_TICKS: u32 = 600;
pub const VULNERABLE_FLASH_TICKS: u32 = 480;

/// Tick marks at which the global wave switches, in ascending order.
pub const WAVE_SCHEDULE: [(u64, Wave); 7] = [
    (720, Wave::Pursuit),
    (1620, Wave::Disperse),
    (1920, Wave::Pursuit),
    (2820, Wave::Disperse),
    (3000, Wave::Pursuit),
    (3900, Wave::Disperse),
    (4100, Wave::Pursuit),
];

pub const BLUE_RELEASE_ITEMS: u32 = TOTAL_ITEMS - 30;
pub const BLUE_RELEASE_TICK: u64 = 300;
pub const YELLOW_RELEASE_ITEMS: u32 = TOTAL_ITEMS * 2 / 3;
pub const YELLOW_RELEASE_TICK: u64 = 420;

// Pen geometry, in tiles unless noted.
pub const PEN_CENTER_X_UNITS: i32 = 13_500;
pub const PEN_STEER_TOLERANCE_UNITS: i32 = 100;
pub const PEN_EXIT_Y: i32 = 19;
pub const PEN_REENTRY_ROWS: (i32, i32) = (15, 17);
pub const CAPTURED_TARGET: (i32, i32) = (14, 19);

/// Junction tiles from which an upward exit is never taken.
pub const NO_UP_JUNCTIONS: [(i32, i32); 4] = [(12, 19), (15, 19), (12, 7), (15, 7)];

pub const SLOW_CORRIDOR_ROW: i32 = 16;
pub const SLOW_CORRIDOR_LEFT_END: i32 = 6;
pub const SLOW_CORRIDOR_RIGHT_START: i32 = 21;

pub const PORTAL_EXIT_LEFT_X: i32 = 1;
pub const PORTAL_EXIT_RIGHT_X: i32 = 26;

pub const PLAYER_START_UNITS: (i32, i32) = (13_500, 7_000);

/// Pursuit distance (tiles) inside which yellow falls back to its corner.
pub const YELLOW_SHY_DISTANCE: f32 = 8.0;
pub const PINK_LOOKAHEAD: i32 = 4;
pub const BLUE_LOOKAHEAD: i32 = 2;

pub fn ghost_start_units(color: GhostColor) -> (i32, i32) {
    match color {
        GhostColor::Red => (13_500, 19_000),
        GhostColor::Pink => (13_500, 16_000),
        GhostColor::Blue => (11_500, 16_000),
        GhostColor::Yellow => (15_500, 16_000),
    }
}

pub fn disperse_corner(color: GhostColor) -> (i32, i32) {
    match color {
        GhostColor::Red => (25, 33),
        GhostColor::Pink => (2, 33),
        GhostColor::Blue => (27, -2),
        GhostColor::Yellow => (0, -2),
    }
}

pub fn capture_score(captured_before: u32) -> u32 {
    CAPTURE_BASE_SCORE * 2u32.pow(captured_before.min(CAPTURE_MULTIPLIER_CAP))
}
