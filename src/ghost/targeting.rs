//! Greedy single-step targeting shared by every wave-following and captured
//! agent: at a decision point pick the exit whose next tile is closest (in a
//! straight line) to the target.

use crate::constants::{
    disperse_corner, BLUE_LOOKAHEAD, CAPTURED_TARGET, NO_UP_JUNCTIONS, PINK_LOOKAHEAD,
    YELLOW_SHY_DISTANCE,
};
use crate::maze::TileMap;
use crate::position::distance_sq;
use crate::types::{Direction, GhostColor, GhostMode, Wave};

/// World facts every agent reads from the same pre-movement snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PursuitContext {
    pub player_tile: (i32, i32),
    pub player_facing: Direction,
    /// Red's tile before anyone moved this tick; blue's reflection pivot.
    pub leader_tile: (i32, i32),
    pub wave: Wave,
}

/// Passable exits from `tile` that do not reverse `heading`, in fixed order.
pub fn open_exits(map: &impl TileMap, tile: (i32, i32), heading: Direction) -> Vec<Direction> {
    Direction::ALL
        .into_iter()
        .filter(|dir| *dir != heading.opposite())
        .filter(|dir| {
            let (nx, ny) = dir.offset(tile.0, tile.1, 1);
            !map.is_blocked_at(nx, ny)
        })
        .collect()
}

pub fn choose_direction(
    map: &impl TileMap,
    tile: (i32, i32),
    heading: Direction,
    target: (i32, i32),
) -> Option<Direction> {
    let mut best: Option<(Direction, i64)> = None;
    for dir in open_exits(map, tile, heading) {
        if dir == Direction::Up && NO_UP_JUNCTIONS.contains(&tile) {
            continue;
        }
        let distance = distance_sq(dir.offset(tile.0, tile.1, 1), target);
        // Strict comparison: the earliest direction wins ties.
        if best.is_none_or(|(_, closest)| distance < closest) {
            best = Some((dir, distance));
        }
    }
    best.map(|(dir, _)| dir)
}

pub fn pursuit_target(color: GhostColor, own_tile: (i32, i32), ctx: &PursuitContext) -> (i32, i32) {
    let (px, py) = ctx.player_tile;
    match color {
        GhostColor::Red => ctx.player_tile,
        GhostColor::Pink => ctx.player_facing.offset(px, py, PINK_LOOKAHEAD),
        GhostColor::Blue => {
            let (ax, ay) = ctx.player_facing.offset(px, py, BLUE_LOOKAHEAD);
            let (lx, ly) = ctx.leader_tile;
            (lx + 2 * (ax - lx), ly + 2 * (ay - ly))
        }
        GhostColor::Yellow => {
            let shy = (YELLOW_SHY_DISTANCE * YELLOW_SHY_DISTANCE) as i64;
            if distance_sq(own_tile, ctx.player_tile) <= shy {
                disperse_corner(color)
            } else {
                ctx.player_tile
            }
        }
    }
}

/// Target tile for modes steered by targeting; `None` for the rest.
pub fn mode_target(
    mode: GhostMode,
    color: GhostColor,
    own_tile: (i32, i32),
    ctx: &PursuitContext,
) -> Option<(i32, i32)> {
    match mode {
        GhostMode::Disperse => Some(disperse_corner(color)),
        GhostMode::Pursuit => Some(pursuit_target(color, own_tile, ctx)),
        GhostMode::Captured => Some(CAPTURED_TARGET),
        GhostMode::Vulnerable | GhostMode::Departing | GhostMode::Penned => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::maze::Maze;

    fn cross_map() -> Maze {
        Maze::from_rows(&["#####", "## ##", "#   #", "## ##", "#####"])
            .expect("test map parses")
    }

    fn ctx(player_tile: (i32, i32), player_facing: Direction) -> PursuitContext {
        PursuitContext {
            player_tile,
            player_facing,
            leader_tile: (0, 0),
            wave: Wave::Pursuit,
        }
    }

    #[test]
    fn picks_exit_closest_to_target() {
        let map = cross_map();
        assert_eq!(
            choose_direction(&map, (2, 2), Direction::Up, (4, 2)),
            Some(Direction::Right)
        );
        assert_eq!(
            choose_direction(&map, (2, 2), Direction::Left, (2, 0)),
            Some(Direction::Down)
        );
    }

    #[test]
    fn never_reverses_even_toward_target() {
        let map = cross_map();
        assert_eq!(
            choose_direction(&map, (2, 2), Direction::Right, (0, 2)),
            Some(Direction::Up)
        );
    }

    #[test]
    fn equal_distances_prefer_fixed_order() {
        let map = cross_map();
        // Up and Right are both sqrt(2) from (3, 3); Up is checked first.
        assert_eq!(
            choose_direction(&map, (2, 2), Direction::Up, (3, 3)),
            Some(Direction::Up)
        );
        // Right and Down tie at sqrt(2) from (3, 1).
        assert_eq!(
            choose_direction(&map, (2, 2), Direction::Right, (3, 1)),
            Some(Direction::Right)
        );
    }

    #[test]
    fn restricted_junctions_never_go_up() {
        let maze = Maze::classic();
        assert_eq!(
            choose_direction(&maze, (12, 19), Direction::Left, (12, 30)),
            Some(Direction::Left)
        );
        assert_eq!(
            choose_direction(&maze, (15, 19), Direction::Right, (15, 30)),
            Some(Direction::Right)
        );
        let free = choose_direction(&maze, (6, 8), Direction::Left, (6, 30));
        assert_eq!(free, Some(Direction::Up));
    }

    #[test]
    fn dead_end_without_exits_yields_none() {
        let map = Maze::from_rows(&["###", "# #", "###"]).expect("test map parses");
        assert_eq!(choose_direction(&map, (1, 1), Direction::Up, (0, 0)), None);
    }

    #[test]
    fn pink_and_blue_look_ahead_of_player() {
        let c = PursuitContext {
            leader_tile: (10, 10),
            ..ctx((14, 7), Direction::Left)
        };
        assert_eq!(pursuit_target(GhostColor::Red, (0, 0), &c), (14, 7));
        assert_eq!(pursuit_target(GhostColor::Pink, (0, 0), &c), (10, 7));
        // Two ahead is (12, 7); doubling (10,10)->(12,7) from red lands on (14, 4).
        assert_eq!(pursuit_target(GhostColor::Blue, (0, 0), &c), (14, 4));
    }

    #[test]
    fn yellow_backs_off_within_eight_tiles() {
        let c = ctx((10, 10), Direction::Up);
        assert_eq!(pursuit_target(GhostColor::Yellow, (10, 19), &c), (10, 10));
        assert_eq!(pursuit_target(GhostColor::Yellow, (10, 18), &c), (0, -2));
        assert_eq!(pursuit_target(GhostColor::Yellow, (12, 12), &c), (0, -2));
    }

    #[test]
    fn mode_targets_cover_disperse_and_captured() {
        let c = ctx((1, 1), Direction::Up);
        assert_eq!(
            mode_target(GhostMode::Disperse, GhostColor::Pink, (5, 5), &c),
            Some((2, 33))
        );
        assert_eq!(
            mode_target(GhostMode::Captured, GhostColor::Blue, (5, 5), &c),
            Some((14, 19))
        );
        assert_eq!(
            mode_target(GhostMode::Vulnerable, GhostColor::Red, (5, 5), &c),
            None
        );
    }
}
