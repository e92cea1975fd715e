//! Combat domain: enemy AI state machine and per-frame decisions.
//!
//! The decision logic lives in pure methods on [`EnemyAi`] driven by an
//! [`AiContext`] snapshot, so patrol probes, aggro hysteresis, and the
//! attack gating can be exercised directly in tests.

use bevy::prelude::*;

use crate::content::{CombatKind, EnemyDef};
use crate::movement::Facing;
use crate::movement::collision::overlaps;

/// Width of the ledge/wall probe rectangles placed just past the leading
/// hitbox edge.
const PROBE_WIDTH: f32 = 6.0;
/// How far below the feet the ledge probe looks for ground.
const PROBE_DEPTH: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    #[default]
    Idle,
    Patrol,
    Chase,
    Attack,
    Hit,
    Dead,
}

/// Per-enemy behavior state and tuning, built from an [`EnemyDef`].
#[derive(Component, Debug, Clone)]
pub struct EnemyAi {
    pub state: AiState,
    pub kind: CombatKind,
    pub patrol_center: Vec2,
    pub patrol_radius: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub detection_range: f32,
    /// Larger than `detection_range`; used only while engaged so the
    /// Patrol/Chase boundary has hysteresis.
    pub lose_aggro_range: f32,
    pub vertical_tolerance: f32,
    pub attack_range: f32,
    /// Ranged keep-away: no attack closer than this.
    pub min_attack_range: f32,
    pub attack_duration: f32,
    pub attack_cooldown: f32,
    pub hit_stun: f32,
    pub death_duration: f32,
    /// Narrow the melee hitbox toward facing.
    pub directional_hitbox: bool,
    /// Ranged: animation frame that releases the projectile.
    pub cast_frame: u32,
    pub projectile_speed: f32,
    pub projectile_range: f32,
    pub attack_timer: f32,
    pub cooldown_timer: f32,
    pub hit_timer: f32,
    /// One damage application (or one projectile) per attack instance.
    pub has_dealt_damage: bool,
}

impl EnemyAi {
    pub fn from_def(def: &EnemyDef, spawn: Vec2, patrol_radius_override: Option<f32>) -> Self {
        Self {
            state: AiState::Idle,
            kind: def.kind,
            patrol_center: spawn,
            patrol_radius: patrol_radius_override.unwrap_or(def.patrol_radius),
            patrol_speed: def.patrol_speed,
            chase_speed: def.chase_speed,
            detection_range: def.detection_range,
            lose_aggro_range: def.detection_range * def.lose_aggro_factor,
            vertical_tolerance: def.vertical_tolerance,
            attack_range: def.attack_range,
            min_attack_range: def.min_attack_range,
            attack_duration: def.attack_duration,
            attack_cooldown: def.attack_cooldown,
            hit_stun: def.hit_stun,
            death_duration: def.death_duration,
            directional_hitbox: def.directional_hitbox,
            cast_frame: def.cast_frame,
            projectile_speed: def.projectile_speed,
            projectile_range: def.projectile_range,
            attack_timer: 0.0,
            cooldown_timer: 0.0,
            hit_timer: 0.0,
            has_dealt_damage: false,
        }
    }

    /// Target within attack distance? Ranged enemies also refuse targets
    /// inside their keep-away band.
    pub fn can_attack_at(&self, distance: f32) -> bool {
        distance <= self.attack_range && distance >= self.min_attack_range
    }

    /// Enter Hit: zero-velocity stun that preempts everything but Dead.
    pub fn enter_hit(&mut self) {
        if self.state != AiState::Dead {
            self.state = AiState::Hit;
            self.hit_timer = self.hit_stun;
        }
    }

    pub fn enter_dead(&mut self) {
        self.state = AiState::Dead;
    }

    fn start_attack(&mut self) {
        self.state = AiState::Attack;
        self.attack_timer = self.attack_duration;
        self.cooldown_timer = self.attack_cooldown;
        self.has_dealt_damage = false;
    }

    /// Advance the state machine one frame. Returns the locomotion the
    /// caller should apply; Hit, Attack, and Dead hold still.
    pub fn tick(&mut self, ctx: &AiContext) -> AiDecision {
        if self.cooldown_timer > 0.0 {
            self.cooldown_timer -= ctx.dt;
        }

        match self.state {
            AiState::Dead => return AiDecision::hold(ctx.facing),
            AiState::Hit => {
                self.hit_timer -= ctx.dt;
                if self.hit_timer <= 0.0 {
                    self.state = AiState::Idle;
                }
                return AiDecision::hold(ctx.facing);
            }
            AiState::Attack => {
                self.attack_timer -= ctx.dt;
                if self.attack_timer <= 0.0 {
                    self.state = AiState::Idle;
                }
                return AiDecision::hold(ctx.facing);
            }
            AiState::Idle | AiState::Patrol | AiState::Chase => {}
        }

        // While engaged, the larger lose-aggro radius applies; otherwise
        // the target must enter the detection radius.
        let engaged = self.state == AiState::Chase;
        let acquisition_range = if engaged {
            self.lose_aggro_range
        } else {
            self.detection_range
        };

        let target = ctx.live_target().filter(|target| {
            let to_target = *target - ctx.self_pos;
            to_target.length() <= acquisition_range
                && to_target.y.abs() <= self.vertical_tolerance
        });

        match target {
            Some(target_pos) => {
                let facing = if target_pos.x >= ctx.self_pos.x {
                    Facing::Right
                } else {
                    Facing::Left
                };
                let distance = (target_pos - ctx.self_pos).length();

                if self.can_attack_at(distance) && self.cooldown_timer <= 0.0 {
                    self.start_attack();
                    AiDecision {
                        move_x: 0.0,
                        facing,
                        started_attack: true,
                    }
                } else {
                    self.state = AiState::Chase;
                    let dir = (target_pos.x - ctx.self_pos.x).signum();
                    AiDecision {
                        move_x: dir * self.chase_speed,
                        facing,
                        started_attack: false,
                    }
                }
            }
            None => {
                if engaged {
                    // Aggro dropped: re-anchor the patrol around wherever
                    // the chase ended and settle for a frame.
                    self.patrol_center = ctx.self_pos;
                    self.state = AiState::Idle;
                    return AiDecision::hold(ctx.facing);
                }

                self.state = AiState::Patrol;
                let facing = if self.should_reverse(ctx) {
                    ctx.facing.flip()
                } else {
                    ctx.facing
                };
                AiDecision {
                    move_x: facing.sign() * self.patrol_speed,
                    facing,
                    started_attack: false,
                }
            }
        }
    }

    /// Patrol reversal triggers: a ledge ahead (grounded only), a wall
    /// ahead, or walking past the patrol radius.
    fn should_reverse(&self, ctx: &AiContext) -> bool {
        let offset = ctx.self_pos.x - self.patrol_center.x;
        if offset.abs() > self.patrol_radius && offset * ctx.facing.sign() > 0.0 {
            return true;
        }

        if wall_ahead(ctx.self_hitbox, ctx.facing, ctx.rects) {
            return true;
        }

        ctx.grounded && ledge_ahead(ctx.self_hitbox, ctx.facing, ctx.rects)
    }
}

/// Probe just past the leading edge at mid-body height; any overlap means
/// a wall.
pub fn wall_ahead(hitbox: Rect, facing: Facing, rects: &[Rect]) -> bool {
    let quarter = hitbox.height() * 0.25;
    let probe = match facing {
        Facing::Right => Rect::new(
            hitbox.max.x,
            hitbox.center().y - quarter,
            hitbox.max.x + PROBE_WIDTH,
            hitbox.center().y + quarter,
        ),
        Facing::Left => Rect::new(
            hitbox.min.x - PROBE_WIDTH,
            hitbox.center().y - quarter,
            hitbox.min.x,
            hitbox.center().y + quarter,
        ),
    };
    rects.iter().any(|r| overlaps(probe, *r))
}

/// Probe just past the leading edge at ground level; *no* overlap means a
/// drop-off ahead.
pub fn ledge_ahead(hitbox: Rect, facing: Facing, rects: &[Rect]) -> bool {
    let probe = match facing {
        Facing::Right => Rect::new(
            hitbox.max.x,
            hitbox.min.y - PROBE_DEPTH,
            hitbox.max.x + PROBE_WIDTH,
            hitbox.min.y,
        ),
        Facing::Left => Rect::new(
            hitbox.min.x - PROBE_WIDTH,
            hitbox.min.y - PROBE_DEPTH,
            hitbox.min.x,
            hitbox.min.y,
        ),
    };
    !rects.iter().any(|r| overlaps(probe, *r))
}

/// Read-only world snapshot for one AI tick.
pub struct AiContext<'a> {
    pub dt: f32,
    pub self_pos: Vec2,
    pub self_hitbox: Rect,
    pub facing: Facing,
    pub grounded: bool,
    /// Target position, if a player exists.
    pub target_pos: Option<Vec2>,
    pub target_dead: bool,
    pub rects: &'a [Rect],
}

impl AiContext<'_> {
    fn live_target(&self) -> Option<Vec2> {
        if self.target_dead {
            None
        } else {
            self.target_pos
        }
    }
}

/// Locomotion output of one AI tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiDecision {
    /// Horizontal velocity to apply.
    pub move_x: f32,
    pub facing: Facing,
    pub started_attack: bool,
}

impl AiDecision {
    fn hold(facing: Facing) -> Self {
        Self {
            move_x: 0.0,
            facing,
            started_attack: false,
        }
    }
}
