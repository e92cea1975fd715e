//! Combat domain: combat-related events.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Raw (pre-mitigation) damage directed at an entity. Mitigation and
/// all on-hit side effects resolve at the target.
#[derive(Debug)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: i32,
}

impl Message for DamageEvent {}

/// Emitted exactly once when an entity's health reaches zero.
#[derive(Debug)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}
