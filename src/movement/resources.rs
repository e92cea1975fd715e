//! Movement domain: tuning and input resources.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Defaults overridden per character from content data.
    pub move_speed: f32,
    pub jump_velocity: f32,
    /// Seconds after a jump during which fast-fall is suppressed.
    pub jump_protection_time: f32,
    pub fast_fall_cooldown: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            gravity: 1500.0,
            max_fall_speed: 900.0,
            move_speed: 240.0,
            jump_velocity: 620.0,
            jump_protection_time: 0.15,
            fast_fall_cooldown: 0.4,
        }
    }
}

/// Per-frame snapshot of the player's boolean intents.
#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    /// -1.0, 0.0, or 1.0.
    pub move_x: f32,
    pub jump_just_pressed: bool,
    pub crouch_held: bool,
    pub block_held: bool,
}
