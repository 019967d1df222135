use super::*;

use crate::constants::WAVE_SCHEDULE;
use crate::types::GhostMode;

/// Wave prescribed by the schedule at `tick`; disperse before the first mark.
pub(super) fn scheduled_wave(tick: u64) -> Wave {
    WAVE_SCHEDULE
        .iter()
        .rev()
        .find(|(mark, _)| tick >= *mark)
        .map_or(Wave::Disperse, |(_, wave)| *wave)
}

impl GameEngine {
    /// Only agents following the outgoing wave switch, and they reverse.
    pub(super) fn update_wave(&mut self) {
        let next = scheduled_wave(self.state.tick);
        if next == self.state.wave {
            return;
        }
        let outgoing = GhostMode::from(self.state.wave);
        self.state.wave = next;
        for ghost in &mut self.ghosts {
            if ghost.mode() == outgoing {
                ghost.set_mode(GhostMode::from(next), true);
            }
        }
        self.events.push(RuntimeEvent::WaveChanged { wave: next });
    }
}
