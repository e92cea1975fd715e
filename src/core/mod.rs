//! Core domain: game states, simulation phase ordering, and shared events.

mod events;
mod resources;
mod state;

pub use events::{SoundEvent, SoundId};
pub use resources::LevelProgress;
pub use state::{GameState, SimSet};

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .init_resource::<LevelProgress>()
            .add_message::<SoundEvent>()
            .configure_sets(
                Update,
                (
                    SimSet::Input,
                    SimSet::Ai,
                    SimSet::Physics,
                    SimSet::Combat,
                    SimSet::Sweep,
                )
                    .chain(),
            )
            .add_systems(Startup, setup_camera)
            .add_systems(Update, forward_sounds.in_set(SimSet::Sweep))
            .add_systems(OnEnter(GameState::LevelComplete), announce_level_complete)
            .add_systems(OnEnter(GameState::GameOver), announce_game_over);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Sink for sound requests. Audio mixing lives outside the core; here the
/// request is only surfaced for whatever backend is attached.
fn forward_sounds(mut sounds: MessageReader<SoundEvent>) {
    for event in sounds.read() {
        debug!("sound requested: {:?}", event.sound);
    }
}

fn announce_level_complete(progress: Res<LevelProgress>) {
    info!(
        "Level complete: {}/{} enemies defeated",
        progress.enemies_killed, progress.total_enemies
    );
}

fn announce_game_over() {
    info!("Game over");
}
