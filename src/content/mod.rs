//! Content domain: RON-backed definitions for characters, enemies, and gear.

mod data;
mod loader;
mod registry;

pub use data::{ArmorDef, CharacterDef, CombatKind, EnemyDef, HitboxDef, WeaponDef};
pub use registry::ContentRegistry;

use bevy::prelude::*;
use std::path::Path;

use crate::core::GameState;

/// The player character chosen for this run. Defaults to the first melee
/// character when nothing was selected.
#[derive(Resource, Debug, Default)]
pub struct SelectedCharacter {
    pub character_id: Option<String>,
}

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SelectedCharacter>()
            .add_systems(Startup, load_content);
    }
}

fn load_content(mut commands: Commands, mut next_state: ResMut<NextState<GameState>>) {
    let (mut registry, errors) = loader::load_all_content(Path::new("assets/data"));

    for error in &errors {
        warn!("{}", error);
    }
    // Missing or broken files are non-fatal: substitute built-in defaults
    // and keep running.
    registry.backfill_defaults();

    info!("{}", registry.summary());
    commands.insert_resource(registry);
    next_state.set(GameState::Playing);
}
