//! Movement domain: shared state machine and tile-collision platformer
//! physics for every character.

pub mod collision;
mod components;
mod resources;
mod systems;

pub use collision::CollisionRects;
pub use components::{
    CharState, Facing, HitboxGeometry, MovementState, Player, StateTimers, Velocity,
};
pub use resources::{MovementInput, MovementTuning};
pub use systems::state::{StateIntents, next_char_state};

use bevy::prelude::*;

use crate::core::{GameState, SimSet};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<CollisionRects>()
            .add_systems(
                Update,
                systems::read_move_input.in_set(SimSet::Input),
            )
            .add_systems(
                Update,
                (
                    systems::update_timers,
                    systems::apply_char_state,
                    systems::apply_fast_fall,
                    systems::apply_physics,
                )
                    .chain()
                    .in_set(SimSet::Physics)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
