use crate::constants::{
    DYING_TICKS, EAT_PAUSE_TICKS, EVENT_DELAY_TICKS, READY_TICKS, STARTING_LIVES, TOTAL_ITEMS,
};
use crate::ghost::{Ghost, PursuitContext};
use crate::maze::Maze;
use crate::player::Player;
use crate::rng::Rng;
use crate::types::{Command, GameMode, GhostColor, RuntimeEvent, Snapshot, Wave};

mod collision_system;
mod wave_system;

/// Scalar game state owned by the engine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameState {
    pub tick: u64,
    /// Start of the pending level-clear, death or eat pause.
    pub timestamp: Option<u64>,
    pub score: u32,
    pub level: u32,
    pub lives: u32,
    pub extra_life_awarded: bool,
    pub items_left: u32,
    pub wave: Wave,
    pub captured_count: u32,
    pub mode: GameMode,
    pub saved_mode: Option<GameMode>,
}

impl GameState {
    fn new() -> Self {
        Self {
            tick: 0,
            timestamp: None,
            score: 0,
            level: 0,
            lives: STARTING_LIVES,
            extra_life_awarded: false,
            items_left: TOTAL_ITEMS,
            wave: Wave::Disperse,
            captured_count: 0,
            mode: GameMode::Ready,
            saved_mode: None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct GameEngine {
    state: GameState,
    maze: Maze,
    player: Player,
    ghosts: [Ghost; 4],
    rng: Rng,
    events: Vec<RuntimeEvent>,
}

impl GameEngine {
    pub fn new(seed: u32) -> Self {
        Self {
            state: GameState::new(),
            maze: Maze::classic(),
            player: Player::new(),
            ghosts: GhostColor::ALL.map(|color| Ghost::new(color, Wave::Disperse)),
            rng: Rng::new(seed),
            events: Vec::new(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn mode(&self) -> GameMode {
        self.state.mode
    }

    pub fn tick(&self) -> u64 {
        self.state.tick
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn ghosts(&self) -> &[Ghost] {
        &self.ghosts
    }

    /// One simulation tick. Paused games do not advance the tick counter.
    pub fn step(&mut self) {
        let tick = self.state.tick;
        match self.state.mode {
            GameMode::Ready => {
                if tick > READY_TICKS {
                    self.set_mode(GameMode::Playing);
                }
            }
            GameMode::Playing => match self.state.timestamp {
                None => self.play_tick(),
                Some(since) if tick >= since + EVENT_DELAY_TICKS => {
                    if self.state.items_left == 0 {
                        self.advance_level();
                    } else {
                        self.state.timestamp = Some(tick);
                        self.set_mode(GameMode::Dying);
                    }
                }
                Some(_) => {}
            },
            GameMode::EatPause => {
                if let Some(since) = self.state.timestamp {
                    if tick >= since + EAT_PAUSE_TICKS {
                        self.state.timestamp = None;
                        self.player.resume_animation();
                        self.set_mode(GameMode::Playing);
                    }
                }
            }
            GameMode::Dying => {
                if let Some(since) = self.state.timestamp {
                    if tick > since + DYING_TICKS {
                        if self.state.lives == 0 {
                            self.set_mode(GameMode::GameOver);
                        } else {
                            self.state.lives -= 1;
                            self.reset_level();
                        }
                    }
                }
            }
            GameMode::Paused | GameMode::GameOver => {}
        }

        if self.state.mode != GameMode::Paused {
            self.state.tick += 1;
        }
    }

    fn play_tick(&mut self) {
        self.resolve_collisions();
        self.player.advance(&self.maze);
        self.update_wave();
        self.move_ghosts();
    }

    fn move_ghosts(&mut self) {
        // Every agent targets from the positions held before anyone moved.
        let ctx = PursuitContext {
            player_tile: self.player.tile(),
            player_facing: self.player.facing(),
            leader_tile: self.ghosts[GhostColor::Red as usize].tile(),
            wave: self.state.wave,
        };
        for ghost in &mut self.ghosts {
            let outcome = ghost.step(&self.maze, &ctx, &mut self.rng);
            if outcome.vulnerability_expired {
                self.state.captured_count = 0;
                self.events.push(RuntimeEvent::VulnerabilityExpired {
                    color: ghost.color(),
                });
            }
        }
    }

    pub fn receive_command(&mut self, command: Command) {
        match command {
            Command::Turn(dir) if self.state.mode == GameMode::Playing => {
                self.player.set_facing(dir);
            }
            Command::Pause if self.state.mode != GameMode::Paused => {
                self.state.saved_mode = Some(self.state.mode);
                self.set_mode(GameMode::Paused);
            }
            Command::Turn(_) | Command::Pause | Command::Confirm => self.confirm(),
        }
    }

    fn confirm(&mut self) {
        match (self.state.mode, self.state.saved_mode) {
            (GameMode::Paused, Some(saved)) if saved != GameMode::GameOver => {
                self.state.saved_mode = None;
                self.set_mode(saved);
            }
            (GameMode::Paused, _) | (GameMode::GameOver, _) => self.restart_game(),
            _ => {}
        }
    }

    fn set_mode(&mut self, mode: GameMode) {
        if self.state.mode == mode {
            return;
        }
        self.events.push(RuntimeEvent::ModeChanged {
            from: self.state.mode,
            to: mode,
        });
        self.state.mode = mode;
    }

    fn advance_level(&mut self) {
        self.events.push(RuntimeEvent::LevelCleared {
            level: self.state.level,
        });
        self.state.items_left = TOTAL_ITEMS;
        self.state.level += 1;
        self.maze.reset();
        self.reset_level();
    }

    /// Puts every agent back at its start; score, lives and items persist.
    pub fn reset_level(&mut self) {
        self.state.tick = 0;
        self.state.timestamp = None;
        self.player.reset();
        self.state.wave = Wave::Disperse;
        self.state.captured_count = 0;
        for ghost in &mut self.ghosts {
            ghost.reset(Wave::Disperse);
        }
        self.set_mode(GameMode::Ready);
    }

    pub fn restart_game(&mut self) {
        self.state.score = 0;
        self.state.level = 0;
        self.state.lives = STARTING_LIVES;
        self.state.extra_life_awarded = false;
        self.state.items_left = TOTAL_ITEMS;
        self.state.saved_mode = None;
        self.maze.reset();
        self.reset_level();
    }

    pub fn build_snapshot(&mut self, include_events: bool) -> Snapshot {
        if self.state.mode != GameMode::EatPause {
            for ghost in &mut self.ghosts {
                ghost.clear_show_score();
            }
        }
        Snapshot {
            tick: self.state.tick,
            mode: self.state.mode,
            score: self.state.score,
            level: self.state.level,
            lives: self.state.lives,
            items_left: self.state.items_left,
            wave: self.state.wave,
            captured_count: self.state.captured_count,
            player: self.player.view(),
            ghosts: self.ghosts.iter().map(Ghost::view).collect(),
            events: if include_events {
                std::mem::take(&mut self.events)
            } else {
                Vec::new()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::constants::{
        EXTRA_LIFE_SCORE, POWER_ITEM_SCORE, SMALL_ITEM_SCORE, TOTAL_ITEMS, VULNERABLE_TICKS,
    };
    use crate::engine::GameEngine;
    use crate::ghost::Ghost;
    use crate::maze::TileMap;
    use crate::player::Player;
    use crate::types::{Command, Direction, GameMode, GhostColor, GhostMode, RuntimeEvent, Tile, Wave};

    fn playing_engine(tick: u64) -> GameEngine {
        let mut engine = GameEngine::new(42);
        engine.state.mode = GameMode::Playing;
        engine.state.tick = tick;
        engine
    }

    fn drain_events(engine: &mut GameEngine) -> Vec<RuntimeEvent> {
        engine.build_snapshot(true).events
    }

    #[test]
    fn ready_lasts_until_tick_exceeds_240() {
        let mut engine = GameEngine::new(1);
        for _ in 0..241 {
            engine.step();
        }
        assert_eq!(engine.tick(), 241);
        assert_eq!(engine.mode(), GameMode::Ready);
        engine.step();
        assert_eq!(engine.mode(), GameMode::Playing);
        assert_eq!(engine.tick(), 242);
    }

    #[test]
    fn every_ghost_moves_each_playing_tick() {
        let mut engine = playing_engine(241);
        let before: Vec<_> = engine.ghosts().iter().map(Ghost::position).collect();
        let player_before = engine.player().position();
        engine.step();
        for (ghost, old) in engine.ghosts().iter().zip(before) {
            assert_ne!(ghost.position(), old, "{:?} did not move", ghost.color());
        }
        assert_ne!(engine.player().position(), player_before);
    }

    #[test]
    fn wave_switches_at_each_scheduled_mark() {
        let mut engine = playing_engine(0);
        for tick in 0..=4_200 {
            engine.state.tick = tick;
            engine.update_wave();
        }
        let waves: Vec<Wave> = drain_events(&mut engine)
            .into_iter()
            .filter_map(|event| match event {
                RuntimeEvent::WaveChanged { wave } => Some(wave),
                _ => None,
            })
            .collect();
        assert_eq!(
            waves,
            vec![
                Wave::Pursuit,
                Wave::Disperse,
                Wave::Pursuit,
                Wave::Disperse,
                Wave::Pursuit,
                Wave::Disperse,
                Wave::Pursuit,
            ]
        );
        assert_eq!(engine.state.wave, Wave::Pursuit);
    }

    #[test]
    fn wave_switch_reverses_only_wave_following_ghosts() {
        let mut engine = playing_engine(719);
        engine.ghosts[2].set_mode(GhostMode::Captured, false);
        engine.ghosts[3].set_mode(GhostMode::Vulnerable, false);
        engine.update_wave();
        assert_eq!(engine.state.wave, Wave::Disperse);

        engine.state.tick = 720;
        engine.update_wave();
        assert_eq!(engine.state.wave, Wave::Pursuit);
        assert_eq!(engine.ghosts[0].mode(), GhostMode::Pursuit);
        assert!(engine.ghosts[0].reverse_pending());
        let untouched = [
            (1, GhostMode::Departing),
            (2, GhostMode::Captured),
            (3, GhostMode::Vulnerable),
        ];
        for (idx, mode) in untouched {
            assert_eq!(engine.ghosts[idx].mode(), mode);
            assert!(!engine.ghosts[idx].reverse_pending(), "{mode:?} reversed");
        }
    }

    #[test]
    fn penned_ghosts_stay_put_through_a_wave_switch() {
        let mut engine = playing_engine(720);
        engine.update_wave();
        for idx in [2, 3] {
            assert_eq!(engine.ghosts[idx].mode(), GhostMode::Penned);
            assert!(!engine.ghosts[idx].reverse_pending());
        }
    }

    #[test]
    fn wave_mark_missed_during_pause_is_applied_afterwards() {
        let mut engine = playing_engine(725);
        engine.update_wave();
        assert_eq!(engine.state.wave, Wave::Pursuit);
        assert_eq!(engine.ghosts[0].mode(), GhostMode::Pursuit);
    }

    #[test]
    fn power_item_turns_wave_and_vulnerable_ghosts_vulnerable() {
        let mut engine = playing_engine(300);
        engine.ghosts[3].set_mode(GhostMode::Vulnerable, false);
        engine.player.place(1_000, 7_000, Direction::Left);
        engine.resolve_collisions();

        assert_eq!(engine.state.score, POWER_ITEM_SCORE);
        assert_eq!(engine.state.items_left, TOTAL_ITEMS - 1);
        assert_eq!(engine.maze.tile_at(1, 7), Tile::Open);
        assert_eq!(engine.ghosts[0].mode(), GhostMode::Vulnerable);
        assert!(engine.ghosts[0].reverse_pending());
        assert_eq!(engine.ghosts[0].vulnerable_ticks(), Some(0));
        assert_eq!(engine.ghosts[1].mode(), GhostMode::Departing);
        assert_eq!(engine.ghosts[2].mode(), GhostMode::Penned);
        assert_eq!(engine.ghosts[3].mode(), GhostMode::Vulnerable);
        assert!(engine.ghosts[3].reverse_pending());
        assert!(drain_events(&mut engine)
            .contains(&RuntimeEvent::PowerItemEaten { x: 1, y: 7 }));
    }

    #[test]
    fn captures_double_in_value_and_pause_the_game() {
        let mut engine = playing_engine(300);
        engine.player.place(13_000, 7_000, Direction::Left);
        for ghost in &mut engine.ghosts {
            ghost.place(13_000, 7_000, Direction::Left);
            ghost.set_mode(GhostMode::Vulnerable, false);
        }
        engine.resolve_collisions();

        assert_eq!(engine.state.score, 200 + 400 + 800 + 1600);
        assert_eq!(engine.state.captured_count, 4);
        assert_eq!(engine.state.mode, GameMode::EatPause);
        assert_eq!(engine.state.timestamp, Some(300));
        assert!(!engine.player.is_chomping());
        for ghost in &engine.ghosts {
            assert_eq!(ghost.mode(), GhostMode::Captured);
            assert!(ghost.show_score());
        }
    }

    #[test]
    fn fifth_capture_in_a_row_is_capped() {
        let mut engine = playing_engine(300);
        engine.state.captured_count = 4;
        engine.player.place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].set_mode(GhostMode::Vulnerable, false);
        engine.resolve_collisions();
        assert_eq!(engine.state.score, 3_200);
        assert_eq!(engine.state.captured_count, 5);
    }

    #[test]
    fn eat_pause_lasts_120_ticks() {
        let mut engine = playing_engine(300);
        engine.player.place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].set_mode(GhostMode::Vulnerable, false);
        engine.resolve_collisions();

        let frozen = engine.ghosts[1].position();
        for _ in 0..120 {
            engine.step();
            assert_eq!(engine.mode(), GameMode::EatPause);
        }
        assert_eq!(engine.ghosts[1].position(), frozen);
        engine.step();
        assert_eq!(engine.mode(), GameMode::Playing);
        assert_eq!(engine.state.timestamp, None);
        assert!(engine.player.is_chomping());
    }

    #[test]
    fn show_score_clears_on_first_snapshot_after_eat_pause() {
        let mut engine = playing_engine(300);
        engine.player.place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].set_mode(GhostMode::Vulnerable, false);
        engine.resolve_collisions();

        assert!(engine.build_snapshot(false).ghosts[0].show_score);
        engine.state.mode = GameMode::Playing;
        assert!(!engine.build_snapshot(false).ghosts[0].show_score);
    }

    #[test]
    fn death_takes_precedence_over_capture_in_same_tick() {
        let mut engine = playing_engine(500);
        engine.player.place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].set_mode(GhostMode::Vulnerable, false);
        engine.ghosts[1].place(13_000, 7_000, Direction::Left);
        engine.ghosts[1].set_mode(GhostMode::Disperse, false);
        engine.resolve_collisions();

        assert_eq!(engine.state.score, 200);
        assert_eq!(engine.state.mode, GameMode::Playing);
        assert_eq!(engine.state.timestamp, Some(500));
        assert!(drain_events(&mut engine).contains(&RuntimeEvent::PlayerCaught {
            color: GhostColor::Pink
        }));
    }

    #[test]
    fn death_costs_a_life_and_resets_the_level() {
        let mut engine = playing_engine(500);
        engine.state.score = 1_230;
        engine.player.place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].place(13_000, 7_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.state.timestamp, Some(500));

        for _ in 0..121 {
            engine.step();
        }
        assert_eq!(engine.mode(), GameMode::Dying);
        assert_eq!(engine.state.timestamp, Some(620));
        for _ in 0..180 {
            engine.step();
        }
        assert_eq!(engine.mode(), GameMode::Dying);
        engine.step();

        assert_eq!(engine.mode(), GameMode::Ready);
        assert_eq!(engine.state.lives, 1);
        assert_eq!(engine.state.score, 1_230);
        assert_eq!(engine.tick(), 1);
        assert_eq!(engine.state.timestamp, None);
        assert_eq!(engine.player, Player::new());
        for ghost in &engine.ghosts {
            assert_eq!(*ghost, Ghost::new(ghost.color(), Wave::Disperse));
        }
    }

    #[test]
    fn last_death_ends_the_game() {
        let mut engine = playing_engine(500);
        engine.state.lives = 0;
        engine.player.place(13_000, 7_000, Direction::Left);
        engine.ghosts[0].place(13_000, 7_000, Direction::Left);
        engine.resolve_collisions();
        for _ in 0..302 {
            engine.step();
        }
        assert_eq!(engine.mode(), GameMode::GameOver);
        assert_eq!(engine.state.lives, 0);
    }

    #[test]
    fn clearing_all_items_advances_the_level() {
        let mut engine = playing_engine(1_000);
        engine.state.items_left = 1;
        engine.player.place(1_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.state.items_left, 0);
        assert_eq!(engine.state.timestamp, Some(1_000));
        assert!(!engine.player.is_chomping());

        for _ in 0..121 {
            engine.step();
        }
        assert_eq!(engine.mode(), GameMode::Ready);
        assert_eq!(engine.state.level, 1);
        assert_eq!(engine.state.items_left, TOTAL_ITEMS);
        assert_eq!(engine.maze.item_count(), TOTAL_ITEMS);
        assert_eq!(engine.state.lives, 2);
        assert!(drain_events(&mut engine).contains(&RuntimeEvent::LevelCleared { level: 0 }));
    }

    #[test]
    fn blue_leaves_after_thirty_items_once_tick_allows() {
        let mut engine = playing_engine(299);
        engine.state.items_left = 215;
        engine.player.place(1_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.state.items_left, 214);
        assert_eq!(engine.ghosts[2].mode(), GhostMode::Penned);

        engine.state.tick = 300;
        engine.player.place(2_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.ghosts[2].mode(), GhostMode::Departing);
        assert!(!engine.ghosts[2].reverse_pending());
        assert_eq!(engine.ghosts[3].mode(), GhostMode::Penned);
        assert!(drain_events(&mut engine).contains(&RuntimeEvent::GhostReleased {
            color: GhostColor::Blue
        }));
    }

    #[test]
    fn blue_leaves_on_the_thirtieth_item() {
        let mut engine = playing_engine(300);
        engine.state.items_left = 216;
        engine.player.place(1_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.state.items_left, 215);
        assert_eq!(engine.ghosts[2].mode(), GhostMode::Penned);

        engine.player.place(2_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.state.items_left, 214);
        assert_eq!(engine.ghosts[2].mode(), GhostMode::Departing);
    }

    #[test]
    fn only_one_ghost_leaves_the_pen_per_tick() {
        let mut engine = playing_engine(500);
        engine.state.items_left = 150;
        engine.player.place(1_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.ghosts[2].mode(), GhostMode::Departing);
        assert_eq!(engine.ghosts[3].mode(), GhostMode::Penned);
        let released: Vec<_> = drain_events(&mut engine)
            .into_iter()
            .filter(|event| matches!(event, RuntimeEvent::GhostReleased { .. }))
            .collect();
        assert_eq!(released, vec![RuntimeEvent::GhostReleased { color: GhostColor::Blue }]);

        engine.player.place(2_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.ghosts[3].mode(), GhostMode::Departing);
        assert!(drain_events(&mut engine).contains(&RuntimeEvent::GhostReleased {
            color: GhostColor::Yellow
        }));
    }

    #[test]
    fn yellow_leaves_after_a_third_of_items() {
        let mut engine = playing_engine(420);
        engine.ghosts[2].set_mode(GhostMode::Departing, false);
        engine.state.items_left = 163;
        engine.player.place(1_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.state.items_left, 162);
        assert_eq!(engine.ghosts[3].mode(), GhostMode::Departing);
    }

    #[test]
    fn extra_life_is_awarded_once() {
        let mut engine = playing_engine(300);
        engine.state.score = EXTRA_LIFE_SCORE - 5;
        engine.player.place(1_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.state.score, EXTRA_LIFE_SCORE + 5);
        assert_eq!(engine.state.lives, 3);

        engine.player.place(2_000, 1_000, Direction::Left);
        engine.resolve_collisions();
        assert_eq!(engine.state.score, EXTRA_LIFE_SCORE + 5 + SMALL_ITEM_SCORE);
        assert_eq!(engine.state.lives, 3);
        assert!(engine.state.extra_life_awarded);
    }

    #[test]
    fn vulnerability_expiry_resets_capture_count() {
        let mut engine = playing_engine(300);
        engine.ghosts[0].set_mode(GhostMode::Vulnerable, true);
        engine.state.captured_count = 2;
        for _ in 0..VULNERABLE_TICKS {
            engine.move_ghosts();
        }
        assert_eq!(engine.state.captured_count, 2);
        assert_eq!(engine.ghosts[0].mode(), GhostMode::Vulnerable);
        engine.move_ghosts();
        assert_eq!(engine.state.captured_count, 0);
        assert_eq!(engine.ghosts[0].mode(), GhostMode::Disperse);
        assert!(drain_events(&mut engine).contains(&RuntimeEvent::VulnerabilityExpired {
            color: GhostColor::Red
        }));
    }

    #[test]
    fn pause_freezes_ticks_and_resumes_saved_mode() {
        let mut engine = playing_engine(400);
        engine.receive_command(Command::Pause);
        assert_eq!(engine.mode(), GameMode::Paused);
        engine.step();
        engine.step();
        assert_eq!(engine.tick(), 400);

        engine.receive_command(Command::Pause);
        assert_eq!(engine.mode(), GameMode::Playing);

        engine.receive_command(Command::Pause);
        engine.receive_command(Command::Turn(Direction::Up));
        assert_eq!(engine.mode(), GameMode::Playing);
        assert_eq!(engine.player.requested(), Direction::Left);

        engine.receive_command(Command::Turn(Direction::Up));
        assert_eq!(engine.player.requested(), Direction::Up);
    }

    #[test]
    fn confirm_outside_pause_or_game_over_is_ignored() {
        let mut engine = playing_engine(400);
        engine.state.score = 70;
        engine.receive_command(Command::Confirm);
        assert_eq!(engine.mode(), GameMode::Playing);
        assert_eq!(engine.state.score, 70);
    }

    #[test]
    fn game_over_restarts_on_confirm_even_through_pause() {
        let mut engine = playing_engine(400);
        engine.state.mode = GameMode::GameOver;
        engine.state.score = 4_000;
        engine.state.level = 3;
        engine.state.lives = 0;
        engine.receive_command(Command::Pause);
        assert_eq!(engine.mode(), GameMode::Paused);
        engine.receive_command(Command::Confirm);

        assert_eq!(engine.mode(), GameMode::Ready);
        assert_eq!(engine.state.score, 0);
        assert_eq!(engine.state.level, 0);
        assert_eq!(engine.state.lives, 2);
        assert_eq!(engine.state.saved_mode, None);

        engine.state.mode = GameMode::GameOver;
        engine.receive_command(Command::Turn(Direction::Right));
        assert_eq!(engine.mode(), GameMode::Ready);
    }

    #[test]
    fn restart_matches_a_fresh_engine() {
        let mut engine = GameEngine::new(9);
        for _ in 0..900 {
            engine.step();
        }
        engine.restart_game();
        let fresh = GameEngine::new(9);
        assert_eq!(engine.state, fresh.state);
        assert_eq!(engine.player, fresh.player);
        assert_eq!(engine.ghosts, fresh.ghosts);
        assert_eq!(engine.maze.item_count(), TOTAL_ITEMS);
    }

    #[test]
    fn snapshot_serializes_camel_case_fields() {
        let mut engine = GameEngine::new(3);
        let snapshot = engine.build_snapshot(true);
        let value = serde_json::to_value(&snapshot).expect("snapshot serializes");
        assert_eq!(value["itemsLeft"], TOTAL_ITEMS);
        assert_eq!(value["mode"], "ready");
        assert_eq!(value["ghosts"].as_array().map(Vec::len), Some(4));
        assert_eq!(value["ghosts"][1]["mode"], "departing");
        assert_eq!(value["player"]["tileX"], 14);
    }
}
