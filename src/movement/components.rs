//! Movement domain: components shared by the player and enemies.

use bevy::prelude::*;

#[derive(Component, Debug)]
pub struct Player;

/// World-space velocity in pixels per second. Entities move only through
/// the collision resolver; the transform is never advanced directly.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct Velocity(pub Vec2);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn flip(self) -> Facing {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Authoritative animation/combat state for player-like entities,
/// recomputed every frame from inputs, ground contact, and timers.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharState {
    #[default]
    Idle,
    Walk,
    Crouch,
    Jump,
    Fall,
    Attack,
    Block,
    Hit,
    Dead,
}

/// Countdown timers locking the Attack and Hit states. Plain decrementing
/// seconds, not scheduler constructs.
#[derive(Component, Debug, Default, Clone, Copy)]
pub struct StateTimers {
    pub attack: f32,
    pub hit: f32,
}

/// Ground contact, facing, and the fast-fall bookkeeping.
#[derive(Component, Debug, Default)]
pub struct MovementState {
    pub grounded: bool,
    pub facing: Facing,
    pub fast_falling: bool,
    pub fast_fall_cooldown: f32,
    /// Short window after a jump during which fast-fall cannot trigger,
    /// so it cannot fire on the jump's first frames.
    pub jump_protection: f32,
}

impl MovementState {
    /// Fast-fall trigger check: airborne, not already latched this
    /// airborne period, cooldown and jump protection expired, and not
    /// still rising.
    pub fn can_fast_fall(&self, vy: f32) -> bool {
        !self.grounded
            && !self.fast_falling
            && self.fast_fall_cooldown <= 0.0
            && self.jump_protection <= 0.0
            && vy <= 0.0
    }

    /// Latch the fast-fall for this airborne period and start its
    /// cooldown.
    pub fn begin_fast_fall(&mut self, cooldown: f32) {
        self.fast_falling = true;
        self.fast_fall_cooldown = cooldown;
    }

    /// Ground contact clears the fast-fall latch.
    pub fn land(&mut self) {
        self.grounded = true;
        self.fast_falling = false;
    }
}

/// Collision hitbox relative to the entity transform. The world-space
/// rect is always derived from the transform; it is never mutated on its
/// own.
#[derive(Component, Debug, Clone, Copy)]
pub struct HitboxGeometry {
    pub offset: Vec2,
    pub size: Vec2,
}

impl HitboxGeometry {
    pub fn new(offset: Vec2, size: Vec2) -> Self {
        Self { offset, size }
    }

    /// World-space hitbox for an entity positioned at `pos`.
    pub fn rect_at(&self, pos: Vec2) -> Rect {
        Rect::from_center_size(pos + self.offset, self.size)
    }

    /// Variant narrowed toward `facing` (75% width, leading edge fixed),
    /// used by enemies whose melee range should whiff from behind.
    pub fn directional_rect_at(&self, pos: Vec2, facing: Facing) -> Rect {
        let full = self.rect_at(pos);
        let narrowed_width = self.size.x * 0.75;
        match facing {
            Facing::Right => Rect::new(
                full.max.x - narrowed_width,
                full.min.y,
                full.max.x,
                full.max.y,
            ),
            Facing::Left => Rect::new(
                full.min.x,
                full.min.y,
                full.min.x + narrowed_width,
                full.max.y,
            ),
        }
    }
}
