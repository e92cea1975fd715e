//! Data definitions for the RON content files.
//!
//! These structs mirror the structure in assets/data/*.ron and are used
//! for deserialization. The ContentRegistry provides lookup by id.

use serde::{Deserialize, Serialize};

// ============================================================================
// Common wrapper for RON files with schema_version and items
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Shared pieces
// ============================================================================

/// How a combatant deals damage. Checked by value everywhere; there is no
/// per-variant type hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
pub enum CombatKind {
    #[default]
    Melee,
    Ranged,
}

/// Collision hitbox relative to the entity position. Smaller than the
/// visual sprite, centered unless offset.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct HitboxDef {
    pub offset_x: f32,
    pub offset_y: f32,
    pub width: f32,
    pub height: f32,
}

// ============================================================================
// Playable characters (characters.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CharacterDef {
    pub id: String,
    pub name: String,
    pub kind: CombatKind,
    pub max_health: i32,
    pub base_attack: i32,
    pub base_armor: i32,
    pub move_speed: f32,
    pub jump_velocity: f32,
    pub hitbox: HitboxDef,
    /// Seconds the attack state locks out movement and re-inputs.
    pub attack_duration: f32,
    /// Horizontal extent of the melee attack box past the leading edge.
    pub attack_reach: f32,
    /// Ranged characters only: projectile parameters.
    pub projectile_speed: f32,
    pub projectile_range: f32,
    pub starting_weapon_id: Option<String>,
    pub starting_armor_id: Option<String>,
}

// ============================================================================
// Enemies (enemies.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnemyDef {
    pub id: String,
    pub name: String,
    pub kind: CombatKind,
    pub max_health: i32,
    pub attack_power: i32,
    pub armor: i32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub patrol_radius: f32,
    pub detection_range: f32,
    /// Multiplier over detection_range giving the (larger) lose-aggro
    /// radius, so engagement has hysteresis at the detection boundary.
    pub lose_aggro_factor: f32,
    pub vertical_tolerance: f32,
    pub attack_range: f32,
    /// Ranged enemies keep away: they refuse to attack closer than this.
    pub min_attack_range: f32,
    pub attack_duration: f32,
    pub attack_cooldown: f32,
    pub hit_stun: f32,
    /// Death pose duration before the corpse is swept.
    pub death_duration: f32,
    pub hitbox: HitboxDef,
    /// Narrow the hitbox toward facing (75% width, leading edge fixed) so
    /// melee range is asymmetric and attacks whiff from behind.
    pub directional_hitbox: bool,
    /// Ranged enemies only: animation frame that releases the projectile.
    pub cast_frame: u32,
    pub projectile_speed: f32,
    pub projectile_range: f32,
}

// ============================================================================
// Equipment (weapons.ron, armor.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WeaponDef {
    pub id: String,
    pub name: String,
    pub attack_bonus: i32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ArmorDef {
    pub id: String,
    pub name: String,
    pub defense_bonus: i32,
}
