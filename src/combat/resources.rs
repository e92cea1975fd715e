//! Combat domain: tuning and input resources.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct CombatTuning {
    /// Maximum gap between attack inputs for the combo chain to continue.
    pub combo_window: f32,
    /// Hit-stun duration applied on taking damage.
    pub hit_stun: f32,
    /// Player death pose duration before game over.
    pub player_death_duration: f32,
    /// Margin outside the level bounds before projectiles despawn.
    pub projectile_bounds_margin: f32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            combo_window: 0.8,
            hit_stun: 0.3,
            player_death_duration: 1.2,
            projectile_bounds_margin: 64.0,
        }
    }
}

#[derive(Resource, Debug, Default)]
pub struct CombatInput {
    pub attack_just_pressed: bool,
    /// Debug self-hit intent (dev-tools).
    pub hit_test: bool,
    /// Debug self-kill intent (dev-tools).
    pub death_test: bool,
}
