//! Combat domain: hit detection, damage resolution, deaths, and sweep.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::combat::ai::{AiContext, AiState, EnemyAi};
use crate::combat::components::{
    AttackInstance, AttackProfile, CombatClass, Combatant, ComboState, DeadTimer, Enemy,
    EquippedArmor, EquippedWeapon, Health, Stats, Team, combo_damage, effective_damage,
    melee_attack_box,
};
use crate::combat::events::{DamageEvent, DeathEvent};
use crate::combat::projectile::Projectile;
use crate::combat::resources::{CombatInput, CombatTuning};
use crate::content::CombatKind;
use crate::core::{GameState, LevelProgress, SoundEvent, SoundId};
use crate::levels::LevelBounds;
use crate::movement::collision::{CollisionRects, overlaps};
use crate::movement::{
    CharState, HitboxGeometry, MovementState, Player, StateTimers, Velocity,
};
use crate::sprites::AnimationController;

const PROJECTILE_SIZE: Vec2 = Vec2::new(12.0, 6.0);

pub(crate) fn read_combat_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input: ResMut<CombatInput>,
) {
    input.attack_just_pressed =
        keyboard.just_pressed(KeyCode::KeyZ) || keyboard.just_pressed(KeyCode::KeyJ);
    // Self-hit / self-kill test intents, only wired up in dev builds.
    input.hit_test = cfg!(feature = "dev-tools") && keyboard.just_pressed(KeyCode::KeyH);
    input.death_test = cfg!(feature = "dev-tools") && keyboard.just_pressed(KeyCode::KeyG);
}

/// The combo window counts up between attack inputs.
pub(crate) fn tick_combo(time: Res<Time>, mut query: Query<&mut ComboState, With<Player>>) {
    let dt = time.delta_secs();
    for mut combo in &mut query {
        combo.tick(dt);
    }
}

/// Per-enemy behavior selection. A missing or dead player is a legitimate
/// untargeted mode: enemies simply patrol.
#[allow(clippy::type_complexity)]
pub(crate) fn update_enemy_ai(
    time: Res<Time>,
    rects: Res<CollisionRects>,
    mut sounds: MessageWriter<SoundEvent>,
    player_query: Query<(&Transform, &CharState), With<Player>>,
    mut enemy_query: Query<
        (
            &Transform,
            &HitboxGeometry,
            &mut MovementState,
            &mut Velocity,
            &mut EnemyAi,
            &mut AnimationController,
        ),
        (With<Enemy>, Without<Player>),
    >,
) {
    let dt = time.delta_secs();
    let target = player_query.iter().next();

    for (transform, geometry, mut movement, mut velocity, mut ai, mut animation) in
        &mut enemy_query
    {
        let pos = transform.translation.truncate();
        let ctx = AiContext {
            dt,
            self_pos: pos,
            self_hitbox: geometry.rect_at(pos),
            facing: movement.facing,
            grounded: movement.grounded,
            target_pos: target.map(|(t, _)| t.translation.truncate()),
            target_dead: target.map_or(true, |(_, state)| *state == CharState::Dead),
            rects: &rects.0,
        };

        let decision = ai.tick(&ctx);
        velocity.0.x = decision.move_x;
        movement.facing = decision.facing;
        if decision.started_attack {
            // The attack animation begins now; without this the cast
            // frame would compare against whatever loop frame the chase
            // clip happened to be on.
            animation.restart();
            sounds.write(SoundEvent {
                sound: SoundId::Attack,
            });
        }
    }
}

/// Player melee swing vs enemy hitboxes. The attack-instance guard keeps
/// a multi-frame overlap from landing twice.
#[allow(clippy::type_complexity)]
pub(crate) fn player_melee_hits(
    mut damage_events: MessageWriter<DamageEvent>,
    mut player_query: Query<
        (
            &Transform,
            &HitboxGeometry,
            &MovementState,
            &CharState,
            &CombatClass,
            &AttackProfile,
            &mut AttackInstance,
            &Stats,
            &EquippedWeapon,
            &ComboState,
        ),
        With<Player>,
    >,
    enemy_query: Query<
        (Entity, &Transform, &HitboxGeometry, &EnemyAi),
        (With<Enemy>, Without<DeadTimer>),
    >,
) {
    for (transform, geometry, movement, state, class, profile, mut attack, stats, weapon, combo) in
        &mut player_query
    {
        if *state != CharState::Attack || class.0 != CombatKind::Melee || attack.has_resolved {
            continue;
        }

        let hitbox = geometry.rect_at(transform.translation.truncate());
        let swing = melee_attack_box(hitbox, movement.facing, profile.reach);
        let damage = combo_damage(stats.base_attack + weapon.attack_bonus(), combo.level);

        let mut landed = false;
        for (enemy, enemy_transform, enemy_geometry, ai) in &enemy_query {
            if ai.state == AiState::Dead {
                continue;
            }
            let enemy_hitbox = enemy_geometry.rect_at(enemy_transform.translation.truncate());
            if overlaps(swing, enemy_hitbox) {
                damage_events.write(DamageEvent {
                    target: enemy,
                    amount: damage,
                });
                landed = true;
            }
        }
        if landed {
            attack.has_resolved = true;
        }
    }
}

/// Ranged player characters release one projectile per attack. Damage is
/// fixed at spawn from the shooter's total attack.
#[allow(clippy::type_complexity)]
pub(crate) fn player_ranged_fire(
    mut commands: Commands,
    mut sounds: MessageWriter<SoundEvent>,
    mut player_query: Query<
        (
            &Transform,
            &HitboxGeometry,
            &MovementState,
            &CharState,
            &CombatClass,
            &AttackProfile,
            &mut AttackInstance,
            &Stats,
            &EquippedWeapon,
        ),
        With<Player>,
    >,
) {
    for (transform, geometry, movement, state, class, profile, mut attack, stats, weapon) in
        &mut player_query
    {
        if *state != CharState::Attack || class.0 != CombatKind::Ranged || attack.has_resolved {
            continue;
        }

        let damage = stats.base_attack + weapon.attack_bonus();
        spawn_projectile(
            &mut commands,
            transform.translation.truncate(),
            geometry,
            movement,
            damage,
            Team::Player,
            profile.projectile_speed,
            profile.projectile_range,
        );
        attack.has_resolved = true;
        sounds.write(SoundEvent {
            sound: SoundId::ProjectileFire,
        });
    }
}

/// Melee enemies test their (directionally narrowed) hitbox against the
/// player at the moment the attack tries to deal damage, at most once
/// per attack instance.
#[allow(clippy::type_complexity)]
pub(crate) fn enemy_melee_strikes(
    mut damage_events: MessageWriter<DamageEvent>,
    player_query: Query<(Entity, &Transform, &HitboxGeometry, &CharState), With<Player>>,
    mut enemy_query: Query<
        (&Transform, &HitboxGeometry, &MovementState, &mut EnemyAi, &Stats),
        (With<Enemy>, Without<Player>, Without<DeadTimer>),
    >,
) {
    let Some((player, player_transform, player_geometry, player_state)) =
        player_query.iter().next()
    else {
        return;
    };
    if *player_state == CharState::Dead {
        return;
    }
    let player_hitbox = player_geometry.rect_at(player_transform.translation.truncate());

    for (transform, geometry, movement, mut ai, stats) in &mut enemy_query {
        if ai.state != AiState::Attack || ai.kind != CombatKind::Melee || ai.has_dealt_damage {
            continue;
        }

        let pos = transform.translation.truncate();
        let reach = if ai.directional_hitbox {
            geometry.directional_rect_at(pos, movement.facing)
        } else {
            geometry.rect_at(pos)
        };

        if overlaps(reach, player_hitbox) {
            damage_events.write(DamageEvent {
                target: player,
                amount: stats.base_attack,
            });
            ai.has_dealt_damage = true;
        }
    }
}

/// Ranged enemies release their projectile on the cast frame of the
/// attack animation, once per attack instance.
#[allow(clippy::type_complexity)]
pub(crate) fn enemy_casts(
    mut commands: Commands,
    mut sounds: MessageWriter<SoundEvent>,
    mut enemy_query: Query<
        (
            &Transform,
            &HitboxGeometry,
            &MovementState,
            &AnimationController,
            &mut EnemyAi,
            &Stats,
        ),
        (With<Enemy>, Without<DeadTimer>),
    >,
) {
    for (transform, geometry, movement, animation, mut ai, stats) in &mut enemy_query {
        if ai.state != AiState::Attack || ai.kind != CombatKind::Ranged || ai.has_dealt_damage {
            continue;
        }
        if animation.current_frame < ai.cast_frame {
            continue;
        }

        spawn_projectile(
            &mut commands,
            transform.translation.truncate(),
            geometry,
            movement,
            stats.base_attack,
            Team::Enemy,
            ai.projectile_speed,
            ai.projectile_range,
        );
        ai.has_dealt_damage = true;
        sounds.write(SoundEvent {
            sound: SoundId::ProjectileFire,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn spawn_projectile(
    commands: &mut Commands,
    shooter_pos: Vec2,
    shooter_geometry: &HitboxGeometry,
    shooter_movement: &MovementState,
    damage: i32,
    team: Team,
    speed: f32,
    range: f32,
) {
    let dir = shooter_movement.facing.sign();
    let spawn_x = shooter_pos.x + dir * (shooter_geometry.size.x * 0.5 + PROJECTILE_SIZE.x);
    let color = match team {
        Team::Player => Color::srgb(0.95, 0.9, 0.4),
        Team::Enemy => Color::srgb(0.9, 0.4, 0.95),
    };

    commands.spawn((
        Projectile::new(damage, team, PROJECTILE_SIZE, range),
        Velocity(Vec2::new(dir * speed, 0.0)),
        Sprite {
            color,
            custom_size: Some(PROJECTILE_SIZE),
            ..default()
        },
        Transform::from_xyz(spawn_x, shooter_pos.y + shooter_geometry.offset.y, 1.0),
    ));
}

/// Straight-line projectile motion with the travel budget and map-bounds
/// margin checks.
pub(crate) fn move_projectiles(
    time: Res<Time>,
    tuning: Res<CombatTuning>,
    bounds: Res<LevelBounds>,
    mut query: Query<(&mut Transform, &Velocity, &mut Projectile)>,
) {
    let dt = time.delta_secs();

    for (mut transform, velocity, mut projectile) in &mut query {
        if !projectile.active {
            continue;
        }

        let step = velocity.0 * dt;
        transform.translation.x += step.x;
        transform.translation.y += step.y;
        projectile.advance(step);

        let pos = transform.translation.truncate();
        let margin = tuning.projectile_bounds_margin;
        if pos.x < bounds.0.min.x - margin
            || pos.x > bounds.0.max.x + margin
            || pos.y < bounds.0.min.y - margin
            || pos.y > bounds.0.max.y + margin
        {
            projectile.active = false;
        }
    }
}

/// First overlap with a living target of the opposite faction deals the
/// projectile's damage once and consumes it.
#[allow(clippy::type_complexity)]
pub(crate) fn projectile_hits(
    mut damage_events: MessageWriter<DamageEvent>,
    mut projectile_query: Query<(&Transform, &mut Projectile)>,
    target_query: Query<
        (Entity, &Transform, &HitboxGeometry, &Team),
        (With<Combatant>, Without<Projectile>, Without<DeadTimer>),
    >,
) {
    for (projectile_transform, mut projectile) in &mut projectile_query {
        if !projectile.active || projectile.has_dealt_damage {
            continue;
        }
        let hitbox = projectile.hitbox_at(projectile_transform.translation.truncate());

        for (target, target_transform, geometry, team) in &target_query {
            if !projectile.team.opposes(*team) {
                continue;
            }
            let target_hitbox = geometry.rect_at(target_transform.translation.truncate());
            if overlaps(hitbox, target_hitbox) {
                damage_events.write(DamageEvent {
                    target,
                    amount: projectile.damage,
                });
                projectile.mark_hit();
                break;
            }
        }
    }
}

/// Mitigate and apply damage. Armor subtracts, blocking negates, health
/// floors at zero, and the dead take nothing further.
#[allow(clippy::type_complexity)]
pub(crate) fn apply_damage(
    mut damage_events: MessageReader<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut sounds: MessageWriter<SoundEvent>,
    tuning: Res<CombatTuning>,
    mut query: Query<(
        &mut Health,
        &Stats,
        Option<&EquippedArmor>,
        Option<&mut CharState>,
        Option<&mut StateTimers>,
        Option<&mut EnemyAi>,
        &mut Velocity,
    )>,
) {
    for event in damage_events.read() {
        let Ok((mut health, stats, armor, char_state, timers, ai, mut velocity)) =
            query.get_mut(event.target)
        else {
            continue;
        };

        // Dead entities are beyond harm; no side effects re-fire.
        if health.is_depleted() {
            continue;
        }

        let blocking = char_state
            .as_ref()
            .is_some_and(|state| **state == CharState::Block);
        if blocking {
            sounds.write(SoundEvent {
                sound: SoundId::Block,
            });
            continue;
        }

        let total_armor = stats.base_armor + armor.map_or(0, |a| a.defense_bonus());
        let damage = effective_damage(event.amount, total_armor);
        if damage == 0 {
            continue;
        }

        health.apply(damage);
        debug!(
            "damage applied: target={:?}, raw={}, mitigated={}, health={}",
            event.target,
            event.amount,
            damage,
            health.current()
        );

        if health.is_depleted() {
            death_events.write(DeathEvent {
                entity: event.target,
            });
            continue;
        }

        // Hit stun: zero horizontal velocity and lock the state.
        velocity.0.x = 0.0;
        if let Some(mut state) = char_state {
            *state = CharState::Hit;
            if let Some(mut timers) = timers {
                timers.hit = tuning.hit_stun;
            }
        }
        if let Some(mut ai) = ai {
            ai.enter_hit();
        }
        sounds.write(SoundEvent {
            sound: SoundId::Hit,
        });
    }
}

/// Transition to Dead exactly once: zero velocity, floor health, start
/// the death pose timer.
#[allow(clippy::type_complexity)]
pub(crate) fn process_deaths(
    mut commands: Commands,
    mut death_events: MessageReader<DeathEvent>,
    mut sounds: MessageWriter<SoundEvent>,
    tuning: Res<CombatTuning>,
    mut query: Query<
        (
            &mut Health,
            &mut Velocity,
            Option<&mut CharState>,
            Option<&mut EnemyAi>,
        ),
        Without<DeadTimer>,
    >,
) {
    for event in death_events.read() {
        let Ok((mut health, mut velocity, char_state, ai)) = query.get_mut(event.entity) else {
            continue;
        };

        let drain = health.current();
        health.apply(drain);
        velocity.0 = Vec2::ZERO;

        let duration = if let Some(mut ai) = ai {
            ai.enter_dead();
            ai.death_duration
        } else {
            tuning.player_death_duration
        };
        if let Some(mut state) = char_state {
            *state = CharState::Dead;
        }

        commands.entity(event.entity).insert(DeadTimer::new(duration));
        sounds.write(SoundEvent {
            sound: SoundId::Death,
        });
        info!("entity {:?} died", event.entity);
    }
}

/// Sweep finished corpses after combat resolution so a dying entity
/// still renders its last frame but can no longer give or take damage.
pub(crate) fn sweep_dead(
    mut commands: Commands,
    time: Res<Time>,
    mut progress: ResMut<LevelProgress>,
    mut next_state: ResMut<NextState<GameState>>,
    mut query: Query<(Entity, &mut DeadTimer, Option<&Enemy>, Option<&Player>)>,
) {
    let dt = time.delta_secs();

    for (entity, mut timer, enemy, player) in &mut query {
        timer.tick(dt);
        if !timer.is_finished() {
            continue;
        }

        if enemy.is_some() {
            progress.record_kill();
            info!(
                "enemy defeated ({}/{})",
                progress.enemies_killed, progress.total_enemies
            );
        }
        if player.is_some() {
            next_state.set(GameState::GameOver);
        }
        commands.entity(entity).despawn();
    }
}

/// Remove spent projectiles after combat resolution.
pub(crate) fn sweep_projectiles(
    mut commands: Commands,
    query: Query<(Entity, &Projectile)>,
) {
    for (entity, projectile) in &query {
        if !projectile.active {
            commands.entity(entity).despawn();
        }
    }
}
