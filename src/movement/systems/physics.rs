//! Movement domain: gravity, fast-fall, and collision-resolved motion.

use bevy::prelude::*;

use crate::movement::collision::{
    CollisionRects, PushAxis, integrate_gravity, resolve_horizontal, resolve_vertical, unstuck,
};
use crate::movement::{HitboxGeometry, MovementInput, MovementState, MovementTuning, Player, Velocity};

/// Fast-fall: while airborne with crouch held, snap straight to terminal
/// velocity, once per airborne period. Jump protection keeps it from
/// firing on the first frames of the same jump.
pub(crate) fn apply_fast_fall(
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut Velocity, &mut MovementState), With<Player>>,
) {
    for (mut velocity, mut movement) in &mut query {
        if !input.crouch_held {
            movement.fast_falling = false;
            continue;
        }
        if !movement.can_fast_fall(velocity.0.y) {
            continue;
        }

        velocity.0.y = -tuning.max_fall_speed;
        movement.begin_fast_fall(tuning.fast_fall_cooldown);
        debug!("fast-fall triggered");
    }
}

/// Integrate gravity and resolve motion against the static level
/// geometry: sub-stepped vertical pass, full-rejection horizontal pass,
/// then the unstuck escape hatch.
pub(crate) fn apply_physics(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    rects: Res<CollisionRects>,
    mut query: Query<(
        &mut Transform,
        &mut Velocity,
        &mut MovementState,
        &HitboxGeometry,
    )>,
) {
    let dt = time.delta_secs();
    if dt <= 0.0 {
        return;
    }

    for (mut transform, mut velocity, mut movement, geometry) in &mut query {
        velocity.0.y = integrate_gravity(velocity.0.y, tuning.gravity, tuning.max_fall_speed, dt);

        // Vertical, sub-stepped.
        let hitbox = geometry.rect_at(transform.translation.truncate());
        let vertical = resolve_vertical(hitbox, velocity.0.y * dt, &rects.0);
        transform.translation.y += vertical.dy;
        if vertical.landed {
            movement.land();
            velocity.0.y = 0.0;
        } else {
            movement.grounded = false;
            if vertical.hit_ceiling {
                velocity.0.y = 0.0;
            }
        }

        // Horizontal, all-or-nothing.
        let hitbox = geometry.rect_at(transform.translation.truncate());
        let dx = resolve_horizontal(hitbox, velocity.0.x * dt, &rects.0);
        transform.translation.x += dx;

        // Unstuck pass for the overlap the independent axes can produce.
        let hitbox = geometry.rect_at(transform.translation.truncate());
        if let Some((push, axis)) = unstuck(hitbox, &rects.0) {
            transform.translation.x += push.x;
            transform.translation.y += push.y;
            match axis {
                PushAxis::X => velocity.0.x = 0.0,
                PushAxis::Y => velocity.0.y = 0.0,
            }
        }
    }
}
