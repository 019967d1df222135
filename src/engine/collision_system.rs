use super::*;

use crate::constants::{
    capture_score, BLUE_RELEASE_ITEMS, BLUE_RELEASE_TICK, EXTRA_LIFE_SCORE, POWER_ITEM_SCORE,
    SMALL_ITEM_SCORE, YELLOW_RELEASE_ITEMS, YELLOW_RELEASE_TICK,
};
use crate::types::GhostMode;

impl GameEngine {
    /// Item pickup, releases and player/agent contact for one playing tick.
    pub(super) fn resolve_collisions(&mut self) {
        let (x, y) = self.player.tile();
        let gained = self
            .player
            .consume_current_tile(&mut self.maze, &mut self.state.items_left);
        self.state.score += gained;
        match gained {
            SMALL_ITEM_SCORE => self.events.push(RuntimeEvent::ItemEaten {
                x,
                y,
                score: gained,
            }),
            POWER_ITEM_SCORE => {
                self.events.push(RuntimeEvent::PowerItemEaten { x, y });
                self.frighten_ghosts();
            }
            _ => {}
        }

        if !self.state.extra_life_awarded && self.state.score > EXTRA_LIFE_SCORE {
            self.state.lives += 1;
            self.state.extra_life_awarded = true;
            self.events.push(RuntimeEvent::ExtraLife {
                lives: self.state.lives,
            });
        }

        if self.state.items_left == 0 {
            self.state.timestamp = Some(self.state.tick);
            self.player.suppress_animation();
        } else {
            self.release_penned_ghosts();
        }

        self.resolve_contacts();
    }

    fn frighten_ghosts(&mut self) {
        let wave_mode = GhostMode::from(self.state.wave);
        for ghost in &mut self.ghosts {
            if ghost.mode() == wave_mode || ghost.mode() == GhostMode::Vulnerable {
                ghost.set_mode(GhostMode::Vulnerable, true);
            }
        }
    }

    /// At most one agent leaves the pen per tick, blue first.
    fn release_penned_ghosts(&mut self) {
        let items_left = self.state.items_left;
        let tick = self.state.tick;
        let blue = GhostColor::Blue as usize;
        let yellow = GhostColor::Yellow as usize;
        let released = if self.ghosts[blue].mode() == GhostMode::Penned
            && items_left <= BLUE_RELEASE_ITEMS
            && tick >= BLUE_RELEASE_TICK
        {
            Some(blue)
        } else if self.ghosts[yellow].mode() == GhostMode::Penned
            && items_left <= YELLOW_RELEASE_ITEMS
            && tick >= YELLOW_RELEASE_TICK
        {
            Some(yellow)
        } else {
            None
        };
        if let Some(idx) = released {
            self.ghosts[idx].set_mode(GhostMode::Departing, false);
            self.events.push(RuntimeEvent::GhostReleased {
                color: self.ghosts[idx].color(),
            });
        }
    }

    fn resolve_contacts(&mut self) {
        let player_tile = self.player.tile();
        let wave_mode = GhostMode::from(self.state.wave);
        for idx in 0..self.ghosts.len() {
            if self.ghosts[idx].tile() != player_tile {
                continue;
            }
            let color = self.ghosts[idx].color();
            let mode = self.ghosts[idx].mode();
            if mode == wave_mode {
                self.state.timestamp = Some(self.state.tick);
                self.player.suppress_animation();
                // A capture earlier in this pass must not keep the game in its eat pause.
                self.set_mode(GameMode::Playing);
                self.events.push(RuntimeEvent::PlayerCaught { color });
                break;
            }
            if mode == GhostMode::Vulnerable {
                self.ghosts[idx].set_mode(GhostMode::Captured, false);
                let score = capture_score(self.state.captured_count);
                self.state.score += score;
                self.state.captured_count += 1;
                self.state.timestamp = Some(self.state.tick);
                self.player.suppress_animation();
                self.set_mode(GameMode::EatPause);
                self.events.push(RuntimeEvent::GhostCaptured { color, score });
            }
        }
    }
}
