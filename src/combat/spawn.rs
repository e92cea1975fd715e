//! Combat domain: player and enemy spawning from content definitions.

use bevy::prelude::*;

use crate::combat::ai::EnemyAi;
use crate::combat::components::{
    ArmorItem, AttackInstance, AttackProfile, CombatClass, Combatant, ComboState, Enemy,
    EquippedArmor, EquippedWeapon, Health, Stats, Team, WeaponItem,
};
use crate::content::{CharacterDef, CombatKind, ContentRegistry, EnemyDef};
use crate::movement::{CharState, HitboxGeometry, MovementState, Player, StateTimers, Velocity};
use crate::sprites::AnimationController;

/// Spawn the player from a character definition, resolving starting
/// equipment from the registry. Unknown item ids degrade to bare hands.
pub fn spawn_player(
    commands: &mut Commands,
    registry: &ContentRegistry,
    def: &CharacterDef,
    position: Vec2,
) -> Entity {
    let weapon = def
        .starting_weapon_id
        .as_ref()
        .and_then(|id| registry.weapons.get(id))
        .map(|w| WeaponItem {
            name: w.name.clone(),
            attack_bonus: w.attack_bonus,
        });
    let armor = def
        .starting_armor_id
        .as_ref()
        .and_then(|id| registry.armors.get(id))
        .map(|a| ArmorItem {
            name: a.name.clone(),
            defense_bonus: a.defense_bonus,
        });

    if def.starting_weapon_id.is_some() && weapon.is_none() {
        warn!(
            "character '{}' references unknown starting weapon",
            def.id
        );
    }

    info!(
        "spawning player '{}' ({:?}) at {:?}",
        def.id, def.kind, position
    );

    commands
        .spawn((
            (
                Player,
                Combatant,
                Team::Player,
                CombatClass(def.kind),
                Health::new(def.max_health),
                Stats {
                    base_attack: def.base_attack,
                    base_armor: def.base_armor,
                },
                EquippedWeapon(weapon),
                EquippedArmor(armor),
                ComboState::default(),
                AttackProfile {
                    duration: def.attack_duration,
                    reach: def.attack_reach,
                    projectile_speed: def.projectile_speed,
                    projectile_range: def.projectile_range,
                },
                AttackInstance::default(),
            ),
            (
                CharState::default(),
                StateTimers::default(),
                MovementState::default(),
                Velocity::default(),
                HitboxGeometry::new(
                    Vec2::new(def.hitbox.offset_x, def.hitbox.offset_y),
                    Vec2::new(def.hitbox.width, def.hitbox.height),
                ),
                AnimationController::default(),
            ),
            (
                Sprite {
                    color: Color::srgb(0.9, 0.9, 0.9),
                    custom_size: Some(Vec2::new(def.hitbox.width, def.hitbox.height)),
                    ..default()
                },
                Transform::from_xyz(position.x, position.y, 0.0),
            ),
        ))
        .id()
}

/// Spawn one enemy from its definition, anchored to `position` as its
/// initial patrol center.
pub fn spawn_enemy(
    commands: &mut Commands,
    def: &EnemyDef,
    position: Vec2,
    patrol_radius_override: Option<f32>,
) -> Entity {
    let color = match def.kind {
        CombatKind::Melee => Color::srgb(0.8, 0.3, 0.3),
        CombatKind::Ranged => Color::srgb(0.7, 0.3, 0.8),
    };

    commands
        .spawn((
            (
                Enemy,
                Combatant,
                Team::Enemy,
                CombatClass(def.kind),
                Health::new(def.max_health),
                Stats {
                    base_attack: def.attack_power,
                    base_armor: def.armor,
                },
                EnemyAi::from_def(def, position, patrol_radius_override),
            ),
            (
                MovementState::default(),
                Velocity::default(),
                HitboxGeometry::new(
                    Vec2::new(def.hitbox.offset_x, def.hitbox.offset_y),
                    Vec2::new(def.hitbox.width, def.hitbox.height),
                ),
                AnimationController::default(),
            ),
            (
                Sprite {
                    color,
                    custom_size: Some(Vec2::new(def.hitbox.width, def.hitbox.height)),
                    ..default()
                },
                Transform::from_xyz(position.x, position.y, 0.0),
            ),
        ))
        .id()
}
