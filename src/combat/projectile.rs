//! Combat domain: projectiles with a travel-distance budget.

use bevy::prelude::*;

use crate::combat::components::Team;

/// A projectile in flight. Damage is fixed at spawn from the shooter's
/// total attack; the budget counts down as it travels.
#[derive(Component, Debug, Clone)]
pub struct Projectile {
    pub damage: i32,
    pub team: Team,
    pub size: Vec2,
    pub max_distance: f32,
    pub traveled: f32,
    pub active: bool,
    /// Single-use: consumed on the first hit.
    pub has_dealt_damage: bool,
}

impl Projectile {
    pub fn new(damage: i32, team: Team, size: Vec2, max_distance: f32) -> Self {
        Self {
            damage,
            team,
            size,
            max_distance,
            traveled: 0.0,
            active: true,
            has_dealt_damage: false,
        }
    }

    /// Record a movement step and expire once the budget is spent.
    pub fn advance(&mut self, step: Vec2) {
        self.traveled += step.length();
        if self.traveled >= self.max_distance {
            self.active = false;
        }
    }

    /// First valid hit consumes the projectile.
    pub fn mark_hit(&mut self) {
        self.has_dealt_damage = true;
        self.active = false;
    }

    pub fn hitbox_at(&self, pos: Vec2) -> Rect {
        Rect::from_center_size(pos, self.size)
    }
}
