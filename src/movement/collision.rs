//! Movement domain: AABB collision resolution against static level geometry.
//!
//! All resolution is done with pure functions over `Rect` so the same code
//! drives players, enemies, and the unit tests. Vertical and horizontal
//! motion resolve independently; a final unstuck pass catches the rare
//! overlap the independent axes can still produce.

use bevy::prelude::*;

/// Largest displacement a single sub-step may cover. Frames that would
/// move further are split so thin geometry cannot be tunneled through.
pub const MAX_MOVE_PER_STEP: f32 = 8.0;
/// Upper bound on sub-steps per frame.
pub const MAX_PHYSICS_STEPS: u32 = 8;
/// Extra clearance applied when pushing an embedded hitbox out.
pub const UNSTUCK_EPSILON: f32 = 0.1;

/// Static collision rectangles for the current level. Immutable for the
/// lifetime of the level and shared read-only with every entity. An empty
/// list is a legitimate degraded mode: the entity is simply uncollided.
#[derive(Resource, Debug, Default)]
pub struct CollisionRects(pub Vec<Rect>);

/// Strict-overlap test; rects that merely touch do not collide. This is
/// what lets a floor-snapped hitbox rest exactly on a rectangle's top edge
/// without re-colliding every frame.
pub fn overlaps(a: Rect, b: Rect) -> bool {
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}

fn shifted(rect: Rect, delta: Vec2) -> Rect {
    Rect {
        min: rect.min + delta,
        max: rect.max + delta,
    }
}

fn first_overlap(hitbox: Rect, rects: &[Rect]) -> Option<Rect> {
    rects.iter().copied().find(|r| overlaps(hitbox, *r))
}

/// Gravity integration with terminal velocity.
pub fn integrate_gravity(vy: f32, gravity: f32, max_fall_speed: f32, dt: f32) -> f32 {
    (vy - gravity * dt).max(-max_fall_speed)
}

/// Outcome of a vertical resolution pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VerticalMove {
    /// Resolved vertical displacement to apply this frame.
    pub dy: f32,
    /// Bottom edge snapped onto a floor.
    pub landed: bool,
    /// Top edge snapped under a ceiling.
    pub hit_ceiling: bool,
}

/// Move a hitbox vertically by `dy`, sub-stepping when the displacement
/// exceeds [`MAX_MOVE_PER_STEP`]. The first overlapping rectangle found in
/// a sub-step resolves by snapping the offending edge and stops the pass.
pub fn resolve_vertical(hitbox: Rect, dy: f32, rects: &[Rect]) -> VerticalMove {
    let free = VerticalMove {
        dy,
        landed: false,
        hit_ceiling: false,
    };
    if rects.is_empty() || dy == 0.0 {
        return free;
    }

    let steps = ((dy.abs() / MAX_MOVE_PER_STEP).ceil() as u32).clamp(1, MAX_PHYSICS_STEPS);
    let step = dy / steps as f32;

    let mut moved = 0.0;
    for _ in 0..steps {
        let tentative = shifted(hitbox, Vec2::new(0.0, moved + step));
        match first_overlap(tentative, rects) {
            None => moved += step,
            Some(rect) => {
                if dy < 0.0 {
                    // Falling: snap bottom onto the floor.
                    return VerticalMove {
                        dy: rect.max.y - hitbox.min.y,
                        landed: true,
                        hit_ceiling: false,
                    };
                } else {
                    // Rising: snap top under the ceiling.
                    return VerticalMove {
                        dy: rect.min.y - hitbox.max.y,
                        landed: false,
                        hit_ceiling: true,
                    };
                }
            }
        }
    }

    VerticalMove {
        dy: moved,
        ..free
    }
}

/// Move a hitbox horizontally by `dx`. Any overlap cancels the whole
/// displacement for this frame; there is no partial push-out here.
pub fn resolve_horizontal(hitbox: Rect, dx: f32, rects: &[Rect]) -> f32 {
    if rects.is_empty() || dx == 0.0 {
        return dx;
    }
    let tentative = shifted(hitbox, Vec2::new(dx, 0.0));
    if first_overlap(tentative, rects).is_some() {
        0.0
    } else {
        dx
    }
}

/// Axis along which an unstuck correction was applied. The caller zeroes
/// the matching velocity component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PushAxis {
    X,
    Y,
}

/// Post-resolution escape hatch: if the hitbox still overlaps a rectangle
/// (independent axis resolution, or a spawn inside geometry), push it out
/// along the cheapest of the four edges plus a small epsilon. Only the
/// first overlapping rectangle is processed per frame. Ties resolve in the
/// fixed order left, right, bottom, top.
pub fn unstuck(hitbox: Rect, rects: &[Rect]) -> Option<(Vec2, PushAxis)> {
    let rect = first_overlap(hitbox, rects)?;

    let candidates = [
        // (push-out distance, displacement direction, axis)
        (hitbox.max.x - rect.min.x, Vec2::new(-1.0, 0.0), PushAxis::X),
        (rect.max.x - hitbox.min.x, Vec2::new(1.0, 0.0), PushAxis::X),
        (hitbox.max.y - rect.min.y, Vec2::new(0.0, -1.0), PushAxis::Y),
        (rect.max.y - hitbox.min.y, Vec2::new(0.0, 1.0), PushAxis::Y),
    ];

    let (distance, direction, axis) = candidates
        .into_iter()
        .reduce(|best, candidate| if candidate.0 < best.0 { candidate } else { best })?;

    Some((direction * (distance + UNSTUCK_EPSILON), axis))
}
