//! Core domain: game state definitions for the level flow.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Default)]
pub enum GameState {
    #[default]
    Boot,
    Playing,
    LevelComplete,
    GameOver,
}

/// Per-frame simulation phases. Configured as a strict chain so that
/// physics always precedes hit-testing and hit-testing always precedes
/// the dead-entity sweep within a frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SimSet {
    Input,
    Ai,
    Physics,
    Combat,
    Sweep,
}
