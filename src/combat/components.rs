//! Combat domain: components and combat-related state types.

use bevy::prelude::*;

use crate::content::CombatKind;
use crate::movement::Facing;

/// Marks an entity as a combat participant.
#[derive(Component, Debug)]
pub struct Combatant;

#[derive(Component, Debug)]
pub struct Enemy;

/// Team affiliation to prevent friendly fire. Projectiles carry the team
/// of their shooter.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Team {
    Player,
    Enemy,
}

impl Team {
    pub fn opposes(self, other: Team) -> bool {
        self != other
    }
}

/// How this combatant attacks. Value-checked; there is no trait hierarchy
/// behind it.
#[derive(Component, Debug, Clone, Copy)]
pub struct CombatClass(pub CombatKind);

/// Health in whole points, clamped to `0..=max`.
#[derive(Component, Debug, Clone)]
pub struct Health {
    current: i32,
    max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(0);
        Self { current: max, max }
    }

    pub fn current(&self) -> i32 {
        self.current
    }

    pub fn max(&self) -> i32 {
        self.max
    }

    /// Apply already-mitigated damage. Returns the points actually lost;
    /// health never goes below zero and a depleted pool stays depleted.
    pub fn apply(&mut self, amount: i32) -> i32 {
        let actual = amount.clamp(0, self.current);
        self.current -= actual;
        actual
    }

    /// Refill a living pool to max. A depleted pool stays depleted.
    pub fn restore_full(&mut self) {
        if self.current > 0 {
            self.current = self.max;
        }
    }

    pub fn is_depleted(&self) -> bool {
        self.current == 0
    }
}

/// Base offensive/defensive stats before equipment.
#[derive(Component, Debug, Clone, Copy)]
pub struct Stats {
    pub base_attack: i32,
    pub base_armor: i32,
}

/// Immutable weapon value object; additive attack bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeaponItem {
    pub name: String,
    pub attack_bonus: i32,
}

/// Immutable armor value object; additive defense bonus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArmorItem {
    pub name: String,
    pub defense_bonus: i32,
}

/// At most one weapon, swappable.
#[derive(Component, Debug, Default)]
pub struct EquippedWeapon(pub Option<WeaponItem>);

/// At most one armor piece, swappable.
#[derive(Component, Debug, Default)]
pub struct EquippedArmor(pub Option<ArmorItem>);

impl EquippedWeapon {
    pub fn attack_bonus(&self) -> i32 {
        self.0.as_ref().map_or(0, |w| w.attack_bonus)
    }
}

impl EquippedArmor {
    pub fn defense_bonus(&self) -> i32 {
        self.0.as_ref().map_or(0, |a| a.defense_bonus)
    }
}

/// Damage that survives armor. Never negative.
pub fn effective_damage(raw: i32, armor: i32) -> i32 {
    (raw - armor).max(0)
}

/// Combo multipliers indexed by combo level.
pub const COMBO_MULTIPLIERS: [f32; 3] = [1.0, 1.25, 1.5];

/// Damage for a combo hit. Rounds half up (`f32::round` is
/// half-away-from-zero, which is half-up for positive damage): base 25 at
/// level 2 gives 37.5 -> 38.
pub fn combo_damage(base_plus_bonus: i32, level: u8) -> i32 {
    let multiplier = COMBO_MULTIPLIERS[(level as usize).min(COMBO_MULTIPLIERS.len() - 1)];
    (base_plus_bonus as f32 * multiplier).round() as i32
}

/// Melee combo chain tracking. The timer counts *up* since the last
/// attack input; exceeding the window resets the chain to level 0.
#[derive(Component, Debug, Clone)]
pub struct ComboState {
    pub level: u8,
    pub time_since_attack: f32,
}

impl Default for ComboState {
    fn default() -> Self {
        Self {
            level: 0,
            time_since_attack: f32::INFINITY,
        }
    }
}

impl ComboState {
    pub fn tick(&mut self, dt: f32) {
        self.time_since_attack += dt;
    }

    /// Register an attack input: advance the chain cyclically while still
    /// inside the window, otherwise restart at level 0. Returns the level
    /// this attack lands at.
    pub fn register_attack(&mut self, window: f32) -> u8 {
        if self.time_since_attack > window {
            self.level = 0;
        } else {
            self.level = (self.level + 1) % COMBO_MULTIPLIERS.len() as u8;
        }
        self.time_since_attack = 0.0;
        self.level
    }
}

/// Player attack parameters from the character definition.
#[derive(Component, Debug, Clone, Copy)]
pub struct AttackProfile {
    /// Seconds the Attack state locks.
    pub duration: f32,
    /// Horizontal extent of the melee box past the leading hitbox edge.
    pub reach: f32,
    /// Ranged characters only.
    pub projectile_speed: f32,
    pub projectile_range: f32,
}

/// Per-attack-instance guard: one damage application (melee) or one
/// projectile (ranged) per attack, reset when a new attack begins.
#[derive(Component, Debug, Default)]
pub struct AttackInstance {
    pub has_resolved: bool,
}

/// Melee attack box: fixed reach extending from the attacker's leading
/// hitbox edge in its facing direction.
pub fn melee_attack_box(hitbox: Rect, facing: Facing, reach: f32) -> Rect {
    match facing {
        Facing::Right => Rect::new(
            hitbox.max.x,
            hitbox.min.y,
            hitbox.max.x + reach,
            hitbox.max.y,
        ),
        Facing::Left => Rect::new(
            hitbox.min.x - reach,
            hitbox.min.y,
            hitbox.min.x,
            hitbox.max.y,
        ),
    }
}

/// Death pose countdown. The entity keeps rendering while this runs and
/// is swept when it finishes; only then does it count as fully dead.
#[derive(Component, Debug, Clone, Copy)]
pub struct DeadTimer {
    pub remaining: f32,
}

impl DeadTimer {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
        }
    }

    pub fn tick(&mut self, dt: f32) {
        self.remaining -= dt;
    }

    pub fn is_finished(&self) -> bool {
        self.remaining <= 0.0
    }
}
