//! Dev-tools: invincibility toggle and a periodic state readout. Built
//! only with the `dev-tools` feature.

use bevy::prelude::*;

use crate::combat::{EnemyAi, Health};
use crate::core::{GameState, LevelProgress, SimSet};
use crate::movement::{CharState, MovementState, Player};

#[derive(Resource, Debug, Default)]
struct Invincibility {
    enabled: bool,
}

#[derive(Resource)]
struct OverlayTimer(Timer);

impl Default for OverlayTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(1.0, TimerMode::Repeating))
    }
}

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Invincibility>()
            .init_resource::<OverlayTimer>()
            .add_systems(
                Update,
                (toggle_invincibility, restore_player_health, log_overlay)
                    .after(SimSet::Sweep)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

fn toggle_invincibility(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut invincibility: ResMut<Invincibility>,
) {
    if keyboard.just_pressed(KeyCode::F1) {
        invincibility.enabled = !invincibility.enabled;
        info!(
            "invincibility {}",
            if invincibility.enabled { "on" } else { "off" }
        );
    }
}

/// Heal-to-full each frame rather than intercepting the damage path, so
/// combat systems stay unaware of the toggle.
fn restore_player_health(
    invincibility: Res<Invincibility>,
    mut players: Query<&mut Health, With<Player>>,
) {
    if !invincibility.enabled {
        return;
    }
    for mut health in &mut players {
        health.restore_full();
    }
}

fn log_overlay(
    time: Res<Time>,
    mut timer: ResMut<OverlayTimer>,
    progress: Res<LevelProgress>,
    players: Query<(&CharState, &Health, &MovementState, &Transform), With<Player>>,
    enemies: Query<&EnemyAi>,
) {
    if !timer.0.tick(time.delta()).just_finished() {
        return;
    }

    if let Some((state, health, movement, transform)) = players.iter().next() {
        debug!(
            "player: {:?} hp={}/{} grounded={} pos=({:.0},{:.0})",
            state,
            health.current(),
            health.max(),
            movement.grounded,
            transform.translation.x,
            transform.translation.y
        );
    }
    let mut counts = std::collections::HashMap::new();
    for ai in &enemies {
        *counts.entry(format!("{:?}", ai.state)).or_insert(0u32) += 1;
    }
    debug!(
        "enemies: {:?} kills={}/{}",
        counts, progress.enemies_killed, progress.total_enemies
    );
}
