//! Core domain: cross-cutting events.

use bevy::ecs::message::Message;

/// Named sounds the simulation requests on state transitions. The audio
/// backend is an external collaborator; inside the core these are
/// fire-and-forget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundId {
    Jump,
    Attack,
    Block,
    Hit,
    Death,
    ProjectileFire,
}

#[derive(Debug)]
pub struct SoundEvent {
    pub sound: SoundId,
}

impl Message for SoundEvent {}
