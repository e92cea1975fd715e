use bevy::math::{Rect, Vec2};

use super::ai::{AiContext, AiState, EnemyAi, ledge_ahead, wall_ahead};
use super::components::{
    COMBO_MULTIPLIERS, ComboState, DeadTimer, Health, combo_damage, effective_damage,
    melee_attack_box,
};
use super::projectile::Projectile;
use crate::content::{ContentRegistry, EnemyDef};
use crate::movement::Facing;
use crate::movement::collision::overlaps;

const DT: f32 = 1.0 / 60.0;

// ----------------------------------------------------------------------------
// Damage math
// ----------------------------------------------------------------------------

#[test]
fn test_armor_subtracts_and_floors_at_zero() {
    assert_eq!(effective_damage(25, 2), 23);
    assert_eq!(effective_damage(5, 5), 0);
    assert_eq!(effective_damage(3, 10), 0);
}

#[test]
fn test_combo_damage_rounds_half_up() {
    // Base 25 through the three multipliers: 25, 31.25, 37.5.
    assert_eq!(combo_damage(25, 0), 25);
    assert_eq!(combo_damage(25, 1), 31);
    assert_eq!(combo_damage(25, 2), 38);
}

#[test]
fn test_combo_level_saturates_the_multiplier_table() {
    let top = combo_damage(20, (COMBO_MULTIPLIERS.len() - 1) as u8);
    assert_eq!(combo_damage(20, 200), top);
}

#[test]
fn test_combo_chain_advances_inside_the_window() {
    let mut combo = ComboState::default();
    // The very first attack always lands at level 0.
    assert_eq!(combo.register_attack(0.8), 0);

    combo.tick(0.5);
    assert_eq!(combo.register_attack(0.8), 1);
    combo.tick(0.5);
    assert_eq!(combo.register_attack(0.8), 2);
    // The chain wraps back around rather than clamping.
    combo.tick(0.5);
    assert_eq!(combo.register_attack(0.8), 0);
}

#[test]
fn test_combo_chain_resets_after_the_window() {
    let mut combo = ComboState::default();
    combo.register_attack(0.8);
    combo.tick(0.5);
    combo.register_attack(0.8);
    assert_eq!(combo.level, 1);

    combo.tick(0.81);
    assert_eq!(combo.register_attack(0.8), 0);
}

// ----------------------------------------------------------------------------
// Health
// ----------------------------------------------------------------------------

#[test]
fn test_health_floors_at_zero() {
    let mut health = Health::new(50);
    assert_eq!(health.apply(10), 10);
    assert_eq!(health.current(), 40);

    // Overkill only drains what is left.
    assert_eq!(health.apply(100), 40);
    assert_eq!(health.current(), 0);
    assert!(health.is_depleted());
}

#[test]
fn test_depleted_health_stays_depleted() {
    let mut health = Health::new(30);
    health.apply(30);
    assert_eq!(health.apply(10), 0);

    health.restore_full();
    assert!(health.is_depleted());
}

#[test]
fn test_restore_full_heals_the_living() {
    let mut health = Health::new(80);
    health.apply(35);
    health.restore_full();
    assert_eq!(health.current(), 80);
}

#[test]
fn test_repeated_damage_sequence() {
    // A knight-sized pool under repeated identical hits.
    let mut health = Health::new(50);
    for expected in [40, 30, 20, 10, 0] {
        health.apply(effective_damage(12, 2));
        assert_eq!(health.current(), expected);
    }
    assert!(health.is_depleted());
}

// ----------------------------------------------------------------------------
// Melee reach
// ----------------------------------------------------------------------------

#[test]
fn test_melee_box_extends_from_the_leading_edge() {
    let body = Rect::new(-14.0, 0.0, 14.0, 52.0);

    let right = melee_attack_box(body, Facing::Right, 40.0);
    assert_eq!(right.min.x, 14.0);
    assert_eq!(right.max.x, 54.0);
    assert_eq!(right.min.y, 0.0);
    assert_eq!(right.max.y, 52.0);

    let left = melee_attack_box(body, Facing::Left, 40.0);
    assert_eq!(left.min.x, -54.0);
    assert_eq!(left.max.x, -14.0);
}

#[test]
fn test_melee_box_misses_targets_behind() {
    let body = Rect::new(-14.0, 0.0, 14.0, 52.0);
    let behind = Rect::new(-60.0, 0.0, -20.0, 52.0);

    assert!(!overlaps(melee_attack_box(body, Facing::Right, 40.0), behind));
    assert!(overlaps(melee_attack_box(body, Facing::Left, 40.0), behind));
}

// ----------------------------------------------------------------------------
// Projectiles
// ----------------------------------------------------------------------------

#[test]
fn test_projectile_expires_on_its_travel_budget() {
    let mut projectile = Projectile::new(8, super::Team::Player, Vec2::new(12.0, 6.0), 600.0);
    let step = Vec2::new(300.0 * DT, 0.0);

    let mut steps = 0;
    while projectile.active {
        projectile.advance(step);
        steps += 1;
        assert!(steps <= 121, "projectile failed to expire");
    }
    assert_eq!(steps, 120);
    assert!((projectile.traveled - 600.0).abs() < step.length());
}

#[test]
fn test_projectile_range_is_distance_not_time() {
    // The same range expires at (nearly) the same distance whether the
    // frames are long or short.
    let mut coarse = Projectile::new(8, super::Team::Enemy, Vec2::new(12.0, 6.0), 600.0);
    while coarse.active {
        coarse.advance(Vec2::new(300.0 / 30.0, 0.0));
    }
    let mut fine = Projectile::new(8, super::Team::Enemy, Vec2::new(12.0, 6.0), 600.0);
    while fine.active {
        fine.advance(Vec2::new(300.0 / 120.0, 0.0));
    }
    assert!((coarse.traveled - fine.traveled).abs() <= 300.0 / 30.0);
}

#[test]
fn test_projectile_hit_consumes_it() {
    let mut projectile = Projectile::new(8, super::Team::Player, Vec2::new(12.0, 6.0), 600.0);
    projectile.mark_hit();
    assert!(projectile.has_dealt_damage);
    assert!(!projectile.active);
}

// ----------------------------------------------------------------------------
// Dead timer
// ----------------------------------------------------------------------------

#[test]
fn test_dead_timer_finishes_after_its_duration() {
    let mut timer = DeadTimer::new(1.0);
    for _ in 0..59 {
        timer.tick(DT);
    }
    assert!(!timer.is_finished());
    timer.tick(DT);
    timer.tick(DT);
    assert!(timer.is_finished());
}

// ----------------------------------------------------------------------------
// Patrol probes
// ----------------------------------------------------------------------------

#[test]
fn test_wall_probe_sees_only_the_facing_side() {
    let body = Rect::new(0.0, 0.0, 36.0, 48.0);
    let wall = Rect::new(38.0, -10.0, 50.0, 60.0);

    assert!(wall_ahead(body, Facing::Right, &[wall]));
    assert!(!wall_ahead(body, Facing::Left, &[wall]));
}

#[test]
fn test_ledge_probe_reports_missing_ground() {
    let body = Rect::new(0.0, 0.0, 36.0, 48.0);
    // Floor continues to the right of the body but ends flush at its
    // left edge.
    let floor = Rect::new(0.0, -20.0, 100.0, 0.0);

    assert!(!ledge_ahead(body, Facing::Right, &[floor]));
    assert!(ledge_ahead(body, Facing::Left, &[floor]));
}

// ----------------------------------------------------------------------------
// Enemy AI
// ----------------------------------------------------------------------------

fn knight_def() -> EnemyDef {
    ContentRegistry::builtin_defaults().enemies["enemy_knight"].clone()
}

fn mage_def() -> EnemyDef {
    ContentRegistry::builtin_defaults().enemies["enemy_mage"].clone()
}

/// Wide floor under the enemy hitbox so patrol probes see solid ground.
fn wide_floor() -> Rect {
    Rect::new(-1000.0, -40.0, 1000.0, -24.0)
}

fn ctx_at<'a>(pos: Vec2, facing: Facing, target: Option<Vec2>, rects: &'a [Rect]) -> AiContext<'a> {
    AiContext {
        dt: DT,
        self_pos: pos,
        self_hitbox: Rect::from_center_size(pos, Vec2::new(36.0, 48.0)),
        facing,
        grounded: true,
        target_pos: target,
        target_dead: false,
        rects,
    }
}

#[test]
fn test_idle_enemy_starts_patrolling_without_a_target() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    let floor = [wide_floor()];
    let decision = ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, None, &floor));

    assert_eq!(ai.state, AiState::Patrol);
    assert_eq!(decision.move_x, ai.patrol_speed);
    assert_eq!(decision.facing, Facing::Right);
}

#[test]
fn test_patrol_reverses_at_the_radius() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    let floor = [wide_floor()];
    // Past the radius and still walking away.
    let pos = Vec2::new(ai.patrol_radius + 10.0, 0.0);
    let decision = ai.tick(&ctx_at(pos, Facing::Right, None, &floor));

    assert_eq!(decision.facing, Facing::Left);
    assert_eq!(decision.move_x, -ai.patrol_speed);
}

#[test]
fn test_patrol_reverses_at_walls_and_ledges() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    let wall = Rect::new(20.0, -30.0, 40.0, 40.0);
    let decision = ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, None, &[wall]));
    assert_eq!(decision.facing, Facing::Left);

    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    // Ground under the body only; a drop-off on the right.
    let floor = Rect::new(-40.0, -40.0, 18.0, -24.0);
    let decision = ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, None, &[floor]));
    assert_eq!(decision.facing, Facing::Left);
}

#[test]
fn test_detection_uses_distance_and_vertical_tolerance() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);

    // Inside detection range: chase.
    let near = Some(Vec2::new(300.0, 0.0));
    let decision = ai.tick(&ctx_at(Vec2::ZERO, Facing::Left, near, &[]));
    assert_eq!(ai.state, AiState::Chase);
    assert_eq!(decision.facing, Facing::Right);
    assert_eq!(decision.move_x, ai.chase_speed);

    // Too far above: ignored even though horizontally close.
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    let overhead = Some(Vec2::new(100.0, ai.vertical_tolerance + 50.0));
    ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, overhead, &[]));
    assert_eq!(ai.state, AiState::Patrol);

    // Outside detection range: ignored.
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    let far = Some(Vec2::new(ai.detection_range + 50.0, 0.0));
    ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, far, &[]));
    assert_eq!(ai.state, AiState::Patrol);
}

#[test]
fn test_chase_holds_out_to_the_lose_aggro_range() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, Some(Vec2::new(300.0, 0.0)), &[]));
    assert_eq!(ai.state, AiState::Chase);

    // Beyond detection but inside the lose-aggro radius: still chasing.
    let drifting = Some(Vec2::new(ai.detection_range + 100.0, 0.0));
    ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, drifting, &[]));
    assert_eq!(ai.state, AiState::Chase);

    // Beyond the lose-aggro radius: disengage and re-anchor the patrol.
    let here = Vec2::new(80.0, 0.0);
    let gone = Some(Vec2::new(ai.lose_aggro_range + 200.0, 0.0));
    let decision = ai.tick(&ctx_at(here, Facing::Right, gone, &[]));
    assert_eq!(ai.state, AiState::Idle);
    assert_eq!(ai.patrol_center, here);
    assert_eq!(decision.move_x, 0.0);
}

#[test]
fn test_attack_starts_in_range_and_respects_cooldown() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    let close = Some(Vec2::new(60.0, 0.0));

    let decision = ai.tick(&ctx_at(Vec2::ZERO, Facing::Left, close, &[]));
    assert!(decision.started_attack);
    assert_eq!(decision.move_x, 0.0);
    assert_eq!(decision.facing, Facing::Right);
    assert_eq!(ai.state, AiState::Attack);
    assert!(!ai.has_dealt_damage);

    // Run out the attack.
    let frames = (ai.attack_duration / DT).ceil() as u32 + 1;
    for _ in 0..frames {
        ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, close, &[]));
    }
    assert_ne!(ai.state, AiState::Attack);

    // Cooldown still running: the enemy closes in instead of swinging.
    let decision = ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, close, &[]));
    assert!(!decision.started_attack);
    assert_eq!(ai.state, AiState::Chase);
}

#[test]
fn test_damage_guard_resets_only_on_a_new_attack() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    let close = Some(Vec2::new(60.0, 0.0));

    ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, close, &[]));
    assert_eq!(ai.state, AiState::Attack);
    // The strike lands once; the guard persists for the rest of the
    // attack no matter how long the hitboxes keep overlapping.
    ai.has_dealt_damage = true;
    for _ in 0..30 {
        ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, close, &[]));
    }
    assert!(ai.has_dealt_damage);

    // Run out the cooldown; the next attack re-arms the guard.
    let mut started = false;
    for _ in 0..200 {
        if ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, close, &[])).started_attack {
            started = true;
            break;
        }
    }
    assert!(started);
    assert_eq!(ai.state, AiState::Attack);
    assert!(!ai.has_dealt_damage);
}

#[test]
fn test_ranged_enemies_keep_their_distance_band() {
    let ai = EnemyAi::from_def(&mage_def(), Vec2::ZERO, None);
    assert!(!ai.can_attack_at(ai.min_attack_range - 10.0));
    assert!(ai.can_attack_at(200.0));
    assert!(!ai.can_attack_at(ai.attack_range + 10.0));
}

#[test]
fn test_hit_stun_interrupts_and_recovers() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, Some(Vec2::new(300.0, 0.0)), &[]));
    ai.enter_hit();
    assert_eq!(ai.state, AiState::Hit);

    let decision = ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, Some(Vec2::new(300.0, 0.0)), &[]));
    assert_eq!(decision.move_x, 0.0);

    let frames = (ai.hit_stun / DT).ceil() as u32 + 1;
    for _ in 0..frames {
        ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, None, &[]));
    }
    assert_ne!(ai.state, AiState::Hit);
}

#[test]
fn test_dead_enemies_never_move_again() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    ai.enter_dead();

    for _ in 0..120 {
        let decision = ai.tick(&ctx_at(Vec2::ZERO, Facing::Right, Some(Vec2::new(40.0, 0.0)), &[]));
        assert_eq!(decision.move_x, 0.0);
        assert!(!decision.started_attack);
    }
    assert_eq!(ai.state, AiState::Dead);
}

#[test]
fn test_dead_players_draw_no_aggro() {
    let mut ai = EnemyAi::from_def(&knight_def(), Vec2::ZERO, None);
    let mut ctx = ctx_at(Vec2::ZERO, Facing::Right, Some(Vec2::new(200.0, 0.0)), &[]);
    ctx.target_dead = true;

    ai.tick(&ctx);
    assert_eq!(ai.state, AiState::Patrol);
}

#[test]
fn test_knight_engagement_sequence() {
    let def = knight_def();
    let mut ai = EnemyAi::from_def(&def, Vec2::ZERO, None);
    let mut pos = Vec2::ZERO;
    let target = Vec2::new(350.0, 0.0);

    // One decision is enough to flip from Idle into Chase.
    let decision = ai.tick(&ctx_at(pos, Facing::Left, Some(target), &[]));
    assert_eq!(ai.state, AiState::Chase);

    // Walk the decisions forward until the knight is in range.
    pos.x += decision.move_x * DT;
    for _ in 0..2000 {
        let decision = ai.tick(&ctx_at(pos, Facing::Right, Some(target), &[]));
        if decision.started_attack {
            break;
        }
        pos.x += decision.move_x * DT;
    }
    assert_eq!(ai.state, AiState::Attack);
    assert!((target.x - pos.x) <= def.attack_range + def.chase_speed * DT);

    // Cut the knight down: four sword hits of raw 12 against armor 2.
    let mut health = Health::new(def.max_health);
    for expected in [40, 30, 20, 10] {
        health.apply(effective_damage(12, def.armor));
        assert_eq!(health.current(), expected);
    }
    health.apply(effective_damage(25, def.armor));
    assert!(health.is_depleted());

    // Death is a pose first; the enemy only counts as gone once the
    // timer expires.
    ai.enter_dead();
    let mut timer = DeadTimer::new(def.death_duration);
    let frames = (def.death_duration / DT).ceil() as u32;
    for _ in 0..frames - 1 {
        timer.tick(DT);
        assert!(!timer.is_finished());
    }
    timer.tick(DT);
    timer.tick(DT);
    assert!(timer.is_finished());
    assert_eq!(ai.state, AiState::Dead);
}
