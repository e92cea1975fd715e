//! Presentation: animation frame clocks, sprite orientation, and the
//! death pose. Everything here runs after combat so it renders the
//! state the simulation just settled on.

mod animation;


pub use animation::{AnimationClip, AnimationController, ai_state_clip, char_state_clip};

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;

use crate::combat::{AttackProfile, DeadTimer, Enemy, EnemyAi};
use crate::core::{GameState, SimSet};
use crate::movement::{CharState, Facing, MovementState, Player};

pub struct SpritesPlugin;

impl Plugin for SpritesPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                sync_player_clips,
                sync_enemy_clips,
                advance_animations,
                orient_sprites,
                apply_death_pose,
            )
                .chain()
                .after(SimSet::Combat)
                .run_if(in_state(GameState::Playing)),
        );
    }
}

fn sync_player_clips(
    mut query: Query<(&CharState, &AttackProfile, &mut AnimationController), With<Player>>,
) {
    for (state, profile, mut controller) in &mut query {
        controller.set_clip(char_state_clip(*state, profile.duration));
    }
}

fn sync_enemy_clips(mut query: Query<(&EnemyAi, &mut AnimationController), With<Enemy>>) {
    for (ai, mut controller) in &mut query {
        controller.set_clip(ai_state_clip(ai));
    }
}

fn advance_animations(time: Res<Time>, mut query: Query<&mut AnimationController>) {
    let dt = time.delta_secs();
    for mut controller in &mut query {
        controller.advance(dt);
    }
}

/// Sprites face along the movement state; the art's neutral pose looks
/// right.
fn orient_sprites(mut query: Query<(&MovementState, &mut Sprite)>) {
    for (movement, mut sprite) in &mut query {
        sprite.flip_x = movement.facing == Facing::Left;
    }
}

/// Dying entities tip over sideways for the duration of the death timer.
fn apply_death_pose(mut query: Query<(&MovementState, &mut Transform), With<DeadTimer>>) {
    for (movement, mut transform) in &mut query {
        transform.rotation = Quat::from_rotation_z(-movement.facing.sign() * FRAC_PI_2);
    }
}
