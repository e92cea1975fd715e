//! Combat domain: factions, health and mitigation, the player combo
//! chain, enemy AI, projectiles, and the death/sweep lifecycle.

pub mod ai;
pub mod components;
pub mod events;
pub mod projectile;
pub mod resources;
pub mod spawn;
mod systems;

#[cfg(test)]
mod tests;

pub use ai::{AiContext, AiDecision, AiState, EnemyAi, ledge_ahead, wall_ahead};
pub use components::{
    AttackInstance, AttackProfile, COMBO_MULTIPLIERS, CombatClass, Combatant, ComboState,
    DeadTimer, Enemy, EquippedArmor, EquippedWeapon, Health, Stats, Team, WeaponItem,
    combo_damage, effective_damage, melee_attack_box,
};
pub use events::{DamageEvent, DeathEvent};
pub use projectile::Projectile;
pub use resources::{CombatInput, CombatTuning};

use bevy::prelude::*;

use crate::core::{GameState, SimSet};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .init_resource::<CombatInput>()
            .add_message::<DamageEvent>()
            .add_message::<DeathEvent>()
            .add_systems(
                Update,
                systems::read_combat_input.in_set(SimSet::Input),
            )
            .add_systems(
                Update,
                (systems::tick_combo, systems::update_enemy_ai)
                    .in_set(SimSet::Ai)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                systems::move_projectiles
                    .in_set(SimSet::Physics)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (
                    systems::player_melee_hits,
                    systems::player_ranged_fire,
                    systems::enemy_melee_strikes,
                    systems::enemy_casts,
                    systems::projectile_hits,
                    systems::apply_damage,
                    systems::process_deaths,
                )
                    .chain()
                    .in_set(SimSet::Combat)
                    .run_if(in_state(GameState::Playing)),
            )
            .add_systems(
                Update,
                (systems::sweep_dead, systems::sweep_projectiles)
                    .in_set(SimSet::Sweep)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}
