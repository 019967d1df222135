use crate::constants::{
    ghost_start_units, CAPTURED_SPEED, NORMAL_SPEED, PEN_CENTER_X_UNITS, PEN_EXIT_Y,
    PEN_REENTRY_ROWS, PEN_SPEED, PEN_STEER_TOLERANCE_UNITS, PORTAL_EXIT_LEFT_X,
    PORTAL_EXIT_RIGHT_X, SLOW_CORRIDOR_LEFT_END, SLOW_CORRIDOR_RIGHT_START, SLOW_CORRIDOR_ROW,
    SLOW_CORRIDOR_SPEED, TILE_UNITS, VULNERABLE_FLASH_TICKS, VULNERABLE_SPEED, VULNERABLE_TICKS,
};
use crate::maze::TileMap;
use crate::position::{is_half_tile, Position};
use crate::rng::Rng;
use crate::types::{Direction, GhostColor, GhostMode, GhostView, Tile, Wave};

pub mod targeting;

pub use self::targeting::PursuitContext;
use self::targeting::{choose_direction, mode_target, open_exits};

/// What a movement step reports back to the owner of shared state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct StepOutcome {
    pub vulnerability_expired: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ghost {
    color: GhostColor,
    pos: Position,
    dir: Direction,
    mode: GhostMode,
    speed: i32,
    reverse_pending: bool,
    vulnerable_ticks: Option<u32>,
    show_score: bool,
}

impl Ghost {
    pub fn new(color: GhostColor, wave: Wave) -> Self {
        let (x, y) = ghost_start_units(color);
        let (dir, mode) = match color {
            GhostColor::Red => (Direction::Left, GhostMode::from(wave)),
            GhostColor::Pink => (Direction::Down, GhostMode::Departing),
            GhostColor::Blue | GhostColor::Yellow => (Direction::Up, GhostMode::Penned),
        };
        Self {
            color,
            pos: Position::from_units(x, y),
            dir,
            mode,
            speed: NORMAL_SPEED,
            reverse_pending: false,
            vulnerable_ticks: None,
            show_score: false,
        }
    }

    /// Restores the exact values `new` produced for this color.
    pub fn reset(&mut self, wave: Wave) {
        *self = Self::new(self.color, wave);
    }

    pub fn color(&self) -> GhostColor {
        self.color
    }

    pub fn position(&self) -> Position {
        self.pos
    }

    pub fn tile(&self) -> (i32, i32) {
        self.pos.tile()
    }

    pub fn direction(&self) -> Direction {
        self.dir
    }

    pub fn mode(&self) -> GhostMode {
        self.mode
    }

    pub fn speed_percent(&self) -> i32 {
        self.speed
    }

    pub fn reverse_pending(&self) -> bool {
        self.reverse_pending
    }

    pub fn vulnerable_ticks(&self) -> Option<u32> {
        self.vulnerable_ticks
    }

    pub fn show_score(&self) -> bool {
        self.show_score
    }

    pub fn is_flashing(&self) -> bool {
        self.mode == GhostMode::Vulnerable
            && self
                .vulnerable_ticks
                .is_some_and(|ticks| ticks >= VULNERABLE_FLASH_TICKS)
    }

    pub fn clear_show_score(&mut self) {
        self.show_score = false;
    }

    /// External mode change from the collision pass or the wave scheduler.
    pub fn set_mode(&mut self, mode: GhostMode, reverse: bool) {
        self.mode = mode;
        self.reverse_pending = reverse;
        match mode {
            GhostMode::Vulnerable => {
                self.vulnerable_ticks = Some(0);
                self.set_speed(VULNERABLE_SPEED);
            }
            GhostMode::Captured => {
                self.set_speed(CAPTURED_SPEED);
                self.show_score = true;
            }
            _ => {}
        }
    }

    /// Re-aligns the position to the new step so tile centres stay reachable.
    fn set_speed(&mut self, percent: i32) {
        self.speed = percent;
        self.pos.quantize(percent);
    }

    pub fn step(&mut self, map: &impl TileMap, ctx: &PursuitContext, rng: &mut Rng) -> StepOutcome {
        let outcome = StepOutcome {
            vulnerability_expired: self.tick_vulnerability(ctx.wave),
        };
        if self.mode == GhostMode::Captured {
            self.check_pen_return();
        }

        match self.mode {
            GhostMode::Penned => self.bounce_in_pen(map),
            GhostMode::Departing => self.steer_out_of_pen(map, ctx.wave),
            _ => {
                let tile = self.tile();
                if self.pos.is_centered() && map.tile_at(tile.0, tile.1) == Tile::Portal {
                    self.pass_portal();
                } else if self.reverse_pending {
                    self.dir = self.dir.opposite();
                    self.reverse_pending = false;
                } else {
                    let exits = self.exit_count(map);
                    if exits == 2 && self.is_blocked_ahead(map, self.dir) {
                        self.turn_corner(map);
                    } else if exits > 2 {
                        self.decide_at_junction(map, ctx, rng);
                    }
                }
            }
        }

        if self.mode != GhostMode::Captured && self.in_slow_corridor() {
            self.set_speed(SLOW_CORRIDOR_SPEED);
        }
        self.integrate();
        outcome
    }

    fn tick_vulnerability(&mut self, wave: Wave) -> bool {
        match self.vulnerable_ticks {
            Some(ticks) if ticks >= VULNERABLE_TICKS => {
                if self.mode == GhostMode::Vulnerable {
                    self.mode = GhostMode::from(wave);
                    self.set_speed(NORMAL_SPEED);
                }
                self.vulnerable_ticks = None;
                true
            }
            Some(ticks) => {
                self.vulnerable_ticks = Some(ticks + 1);
                false
            }
            None => false,
        }
    }

    fn check_pen_return(&mut self) {
        let window = (PEN_CENTER_X_UNITS - PEN_STEER_TOLERANCE_UNITS)
            ..=(PEN_CENTER_X_UNITS + PEN_STEER_TOLERANCE_UNITS);
        if !window.contains(&self.pos.x) {
            return;
        }
        let (_, tile_y) = self.tile();
        if tile_y == PEN_EXIT_Y {
            self.pos.x = PEN_CENTER_X_UNITS;
            self.dir = Direction::Down;
            self.set_speed(PEN_SPEED);
        } else if (PEN_REENTRY_ROWS.0..PEN_REENTRY_ROWS.1).contains(&tile_y) {
            self.mode = GhostMode::Departing;
        }
    }

    fn bounce_in_pen(&mut self, map: &impl TileMap) {
        self.set_speed(PEN_SPEED);
        if is_half_tile(self.pos.y)
            && is_half_tile(self.pos.x)
            && self.dir.is_vertical()
            && self.is_blocked_ahead(map, self.dir)
        {
            self.dir = self.dir.opposite();
        }
    }

    fn steer_out_of_pen(&mut self, map: &impl TileMap, wave: Wave) {
        let gate_y = PEN_EXIT_Y * TILE_UNITS;
        if self.pos.y < gate_y && self.dir != Direction::Down {
            self.set_speed(PEN_SPEED);
            if self.pos.x < PEN_CENTER_X_UNITS - PEN_STEER_TOLERANCE_UNITS {
                self.dir = Direction::Right;
            } else if self.pos.x > PEN_CENTER_X_UNITS + PEN_STEER_TOLERANCE_UNITS {
                self.dir = Direction::Left;
            } else {
                self.pos.x = PEN_CENTER_X_UNITS;
                self.dir = Direction::Up;
            }
        } else if self.pos.y >= gate_y {
            self.dir = Direction::Left;
            self.mode = GhostMode::from(wave);
            self.set_speed(NORMAL_SPEED);
        } else if is_half_tile(self.pos.y) && self.is_blocked_ahead(map, self.dir) {
            self.dir = Direction::Up;
        }
    }

    fn pass_portal(&mut self) {
        let exit_x = if self.dir == Direction::Right {
            PORTAL_EXIT_LEFT_X
        } else {
            PORTAL_EXIT_RIGHT_X
        };
        self.pos.x = exit_x * TILE_UNITS;
    }

    fn is_blocked_ahead(&self, map: &impl TileMap, dir: Direction) -> bool {
        let (x, y) = self.tile();
        let (nx, ny) = dir.offset(x, y, 1);
        map.is_blocked_at(nx, ny)
    }

    /// Passable neighbours, counted only when exactly on a tile centre.
    fn exit_count(&self, map: &impl TileMap) -> usize {
        if !self.pos.is_centered() {
            return 0;
        }
        Direction::ALL
            .into_iter()
            .filter(|dir| !self.is_blocked_ahead(map, *dir))
            .count()
    }

    fn turn_corner(&mut self, map: &impl TileMap) {
        if let Some(dir) = open_exits(map, self.tile(), self.dir).first() {
            self.dir = *dir;
        }
    }

    fn decide_at_junction(&mut self, map: &impl TileMap, ctx: &PursuitContext, rng: &mut Rng) {
        let tile = self.tile();
        match self.mode {
            GhostMode::Vulnerable => {
                let exits = open_exits(map, tile, self.dir);
                self.dir = rng
                    .pick(&exits)
                    .expect("decision point must offer a non-reversing exit");
                self.set_speed(VULNERABLE_SPEED);
            }
            mode => {
                let Some(target) = mode_target(mode, self.color, tile, ctx) else {
                    return;
                };
                self.dir = choose_direction(map, tile, self.dir, target)
                    .expect("decision point must offer a non-reversing exit");
                let speed = if mode == GhostMode::Captured {
                    CAPTURED_SPEED
                } else {
                    NORMAL_SPEED
                };
                self.set_speed(speed);
            }
        }
    }

    fn in_slow_corridor(&self) -> bool {
        let (x, y) = self.tile();
        y == SLOW_CORRIDOR_ROW && (x < SLOW_CORRIDOR_LEFT_END || x > SLOW_CORRIDOR_RIGHT_START)
    }

    /// Moves along the heading and snaps the cross axis back onto the grid.
    /// Agents steering inside or into the pen keep their half-tile offsets.
    fn integrate(&mut self) {
        self.pos.advance(self.dir, self.speed);
        let keeps_x_offset = matches!(
            self.mode,
            GhostMode::Penned | GhostMode::Departing | GhostMode::Captured
        );
        if self.dir.is_vertical() {
            if !keeps_x_offset {
                self.pos.snap_x();
            }
        } else if self.mode != GhostMode::Departing {
            self.pos.snap_y();
        }
    }

    pub fn view(&self) -> GhostView {
        let (tile_x, tile_y) = self.tile();
        GhostView {
            color: self.color,
            x: self.pos.x_tiles(),
            y: self.pos.y_tiles(),
            tile_x,
            tile_y,
            dir: self.dir,
            mode: self.mode,
            speed_percent: self.speed,
            vulnerable_ticks: self.vulnerable_ticks,
            flashing: self.is_flashing(),
            show_score: self.show_score,
        }
    }

    #[cfg(test)]
    pub(crate) fn place(&mut self, x_units: i32, y_units: i32, dir: Direction) {
        self.pos = Position::from_units(x_units, y_units);
        self.dir = dir;
    }
}
