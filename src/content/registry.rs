//! ContentRegistry resource providing HashMap lookups for loaded content.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;

/// Central registry for all loaded game content, keyed by id.
#[derive(Resource, Default)]
pub struct ContentRegistry {
    pub characters: HashMap<String, CharacterDef>,
    pub enemies: HashMap<String, EnemyDef>,
    pub weapons: HashMap<String, WeaponDef>,
    pub armors: HashMap<String, ArmorDef>,
}

impl ContentRegistry {
    /// Returns a summary of loaded content counts for logging.
    pub fn summary(&self) -> String {
        format!(
            "ContentRegistry loaded: characters={}, enemies={}, weapons={}, armors={}",
            self.characters.len(),
            self.enemies.len(),
            self.weapons.len(),
            self.armors.len()
        )
    }

    /// Built-in definitions used whenever a data file is missing or
    /// malformed. Content absence degrades, it never crashes the game.
    pub fn builtin_defaults() -> Self {
        let mut registry = Self::default();

        for character in [default_varen(), default_lyra()] {
            registry.characters.insert(character.id.clone(), character);
        }
        for enemy in [default_knight(), default_mage()] {
            registry.enemies.insert(enemy.id.clone(), enemy);
        }
        for weapon in [
            WeaponDef {
                id: "weapon_iron_sword".to_string(),
                name: "Iron Sword".to_string(),
                attack_bonus: 15,
            },
            WeaponDef {
                id: "weapon_hunting_bow".to_string(),
                name: "Hunting Bow".to_string(),
                attack_bonus: 6,
            },
        ] {
            registry.weapons.insert(weapon.id.clone(), weapon);
        }
        for armor in [
            ArmorDef {
                id: "armor_leather".to_string(),
                name: "Leather Jerkin".to_string(),
                defense_bonus: 2,
            },
            ArmorDef {
                id: "armor_plate".to_string(),
                name: "Plate Cuirass".to_string(),
                defense_bonus: 5,
            },
        ] {
            registry.armors.insert(armor.id.clone(), armor);
        }

        registry
    }

    /// Fill any empty category from the built-in defaults.
    pub fn backfill_defaults(&mut self) {
        let defaults = Self::builtin_defaults();
        if self.characters.is_empty() {
            self.characters = defaults.characters;
        }
        if self.enemies.is_empty() {
            self.enemies = defaults.enemies;
        }
        if self.weapons.is_empty() {
            self.weapons = defaults.weapons;
        }
        if self.armors.is_empty() {
            self.armors = defaults.armors;
        }
    }
}

fn default_varen() -> CharacterDef {
    CharacterDef {
        id: "character_varen".to_string(),
        name: "Varen".to_string(),
        kind: CombatKind::Melee,
        max_health: 100,
        base_attack: 10,
        base_armor: 1,
        move_speed: 240.0,
        jump_velocity: 620.0,
        hitbox: HitboxDef {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 28.0,
            height: 52.0,
        },
        attack_duration: 0.35,
        attack_reach: 40.0,
        projectile_speed: 0.0,
        projectile_range: 0.0,
        starting_weapon_id: Some("weapon_iron_sword".to_string()),
        starting_armor_id: Some("armor_leather".to_string()),
    }
}

fn default_lyra() -> CharacterDef {
    CharacterDef {
        id: "character_lyra".to_string(),
        name: "Lyra".to_string(),
        kind: CombatKind::Ranged,
        max_health: 80,
        base_attack: 8,
        base_armor: 0,
        move_speed: 260.0,
        jump_velocity: 640.0,
        hitbox: HitboxDef {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 26.0,
            height: 50.0,
        },
        attack_duration: 0.4,
        attack_reach: 0.0,
        projectile_speed: 420.0,
        projectile_range: 600.0,
        starting_weapon_id: Some("weapon_hunting_bow".to_string()),
        starting_armor_id: None,
    }
}

fn default_knight() -> EnemyDef {
    EnemyDef {
        id: "enemy_knight".to_string(),
        name: "Hollow Knight".to_string(),
        kind: CombatKind::Melee,
        max_health: 50,
        attack_power: 12,
        armor: 2,
        patrol_speed: 80.0,
        chase_speed: 160.0,
        patrol_radius: 120.0,
        detection_range: 400.0,
        lose_aggro_factor: 1.5,
        vertical_tolerance: 200.0,
        attack_range: 80.0,
        min_attack_range: 0.0,
        attack_duration: 0.4,
        attack_cooldown: 1.0,
        hit_stun: 0.3,
        death_duration: 1.0,
        hitbox: HitboxDef {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 36.0,
            height: 48.0,
        },
        directional_hitbox: true,
        cast_frame: 0,
        projectile_speed: 0.0,
        projectile_range: 0.0,
    }
}

fn default_mage() -> EnemyDef {
    EnemyDef {
        id: "enemy_mage".to_string(),
        name: "Ash Mage".to_string(),
        kind: CombatKind::Ranged,
        max_health: 30,
        attack_power: 14,
        armor: 0,
        patrol_speed: 60.0,
        chase_speed: 120.0,
        patrol_radius: 100.0,
        detection_range: 400.0,
        lose_aggro_factor: 1.5,
        vertical_tolerance: 200.0,
        attack_range: 350.0,
        min_attack_range: 150.0,
        attack_duration: 0.6,
        attack_cooldown: 1.6,
        hit_stun: 0.3,
        death_duration: 1.0,
        hitbox: HitboxDef {
            offset_x: 0.0,
            offset_y: 0.0,
            width: 30.0,
            height: 46.0,
        },
        directional_hitbox: false,
        cast_frame: 2,
        projectile_speed: 300.0,
        projectile_range: 600.0,
    }
}
