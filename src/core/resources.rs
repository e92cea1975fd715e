//! Core domain: level-wide progress tracking.

use bevy::prelude::*;

/// Kill counter gating the level exit.
#[derive(Resource, Debug, Default)]
pub struct LevelProgress {
    pub enemies_killed: u32,
    pub total_enemies: u32,
}

impl LevelProgress {
    pub fn record_kill(&mut self) {
        self.enemies_killed += 1;
    }

    /// The exit unlocks once every enemy in the level is down.
    pub fn is_cleared(&self) -> bool {
        self.total_enemies > 0 && self.enemies_killed >= self.total_enemies
    }

    pub fn reset(&mut self, total_enemies: u32) {
        self.enemies_killed = 0;
        self.total_enemies = total_enemies;
    }
}
