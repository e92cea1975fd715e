//! Movement domain: the shared character state machine.
//!
//! `next_char_state` is the single authoritative transition function; the
//! systems around it sample intents, apply entry side effects, and run the
//! state-lock timers.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{
    AttackInstance, AttackProfile, CombatClass, CombatInput, CombatTuning, ComboState, DeathEvent,
};
use crate::content::CombatKind;
use crate::core::{SoundEvent, SoundId};
use crate::movement::{
    CharState, MovementInput, MovementState, MovementTuning, Player, StateTimers, Velocity,
};

/// Boolean intents plus derived facts the transition function needs.
#[derive(Debug, Default, Clone, Copy)]
pub struct StateIntents {
    pub move_x: f32,
    pub jump: bool,
    pub attack: bool,
    pub block: bool,
    pub crouch: bool,
    pub hit: bool,
    pub die: bool,
    pub grounded: bool,
    pub rising: bool,
}

/// Recompute the character state. Priority order, highest first, each arm
/// short-circuiting the rest: Dead, locked Hit, locked Attack, death
/// intent, hit intent, attack intent, jump, block, crouch, airborne,
/// walk/idle.
pub fn next_char_state(current: CharState, timers: &StateTimers, intents: &StateIntents) -> CharState {
    if current == CharState::Dead {
        return CharState::Dead;
    }
    if current == CharState::Hit && timers.hit > 0.0 {
        return CharState::Hit;
    }
    if current == CharState::Attack && timers.attack > 0.0 {
        return CharState::Attack;
    }
    if intents.die {
        return CharState::Dead;
    }
    if intents.hit {
        return CharState::Hit;
    }
    if intents.attack {
        return CharState::Attack;
    }
    if intents.jump && intents.grounded {
        return CharState::Jump;
    }
    if intents.block && intents.grounded {
        return CharState::Block;
    }
    if intents.crouch && intents.grounded {
        return CharState::Crouch;
    }
    if !intents.grounded {
        return if intents.rising {
            CharState::Jump
        } else {
            CharState::Fall
        };
    }
    if intents.move_x != 0.0 {
        CharState::Walk
    } else {
        CharState::Idle
    }
}

/// Count down the state-lock and fast-fall timers.
pub(crate) fn update_timers(
    time: Res<Time>,
    mut query: Query<(&mut StateTimers, Option<&mut MovementState>)>,
) {
    let dt = time.delta_secs();

    for (mut timers, movement) in &mut query {
        if timers.attack > 0.0 {
            timers.attack -= dt;
        }
        if timers.hit > 0.0 {
            timers.hit -= dt;
        }
        if let Some(mut movement) = movement {
            if movement.fast_fall_cooldown > 0.0 {
                movement.fast_fall_cooldown -= dt;
            }
            if movement.jump_protection > 0.0 {
                movement.jump_protection -= dt;
            }
        }
    }
}

/// Recompute the player state and apply entry side effects.
#[allow(clippy::type_complexity)]
pub(crate) fn apply_char_state(
    input: Res<MovementInput>,
    combat_input: Res<CombatInput>,
    tuning: Res<MovementTuning>,
    combat_tuning: Res<CombatTuning>,
    mut sounds: MessageWriter<SoundEvent>,
    mut deaths: MessageWriter<DeathEvent>,
    mut query: Query<
        (
            Entity,
            &mut CharState,
            &mut StateTimers,
            &mut MovementState,
            &mut Velocity,
            &CombatClass,
            &AttackProfile,
            &mut AttackInstance,
            &mut ComboState,
        ),
        With<Player>,
    >,
) {
    for (
        entity,
        mut state,
        mut timers,
        mut movement,
        mut velocity,
        class,
        profile,
        mut attack,
        mut combo,
    ) in &mut query
    {
        let intents = StateIntents {
            move_x: input.move_x,
            jump: input.jump_just_pressed,
            attack: combat_input.attack_just_pressed,
            block: input.block_held,
            crouch: input.crouch_held,
            hit: combat_input.hit_test,
            die: combat_input.death_test,
            grounded: movement.grounded,
            rising: velocity.0.y > 0.0,
        };

        let next = next_char_state(*state, &timers, &intents);
        if next != *state {
            match next {
                CharState::Attack => {
                    velocity.0.x = 0.0;
                    timers.attack = profile.duration;
                    attack.has_resolved = false;
                    if class.0 == CombatKind::Melee {
                        combo.register_attack(combat_tuning.combo_window);
                    }
                    sounds.write(SoundEvent {
                        sound: SoundId::Attack,
                    });
                }
                CharState::Jump => {
                    velocity.0.y = tuning.jump_velocity;
                    movement.grounded = false;
                    movement.jump_protection = tuning.jump_protection_time;
                    sounds.write(SoundEvent {
                        sound: SoundId::Jump,
                    });
                }
                CharState::Hit => {
                    velocity.0.x = 0.0;
                    timers.hit = combat_tuning.hit_stun;
                    sounds.write(SoundEvent {
                        sound: SoundId::Hit,
                    });
                }
                CharState::Dead => {
                    velocity.0 = Vec2::ZERO;
                    deaths.write(DeathEvent { entity });
                }
                _ => {}
            }
            debug!("player state {:?} -> {:?}", *state, next);
            *state = next;
        }

        // Horizontal control for states that allow it; Crouch and Block
        // plant the character, Attack/Hit/Dead keep their locked velocity.
        match *state {
            CharState::Idle | CharState::Walk | CharState::Jump | CharState::Fall => {
                velocity.0.x = input.move_x * tuning.move_speed;
                if input.move_x > 0.0 {
                    movement.facing = crate::movement::Facing::Right;
                } else if input.move_x < 0.0 {
                    movement.facing = crate::movement::Facing::Left;
                }
            }
            CharState::Crouch | CharState::Block => {
                velocity.0.x = 0.0;
            }
            CharState::Attack | CharState::Hit | CharState::Dead => {}
        }
    }
}
