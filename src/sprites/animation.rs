//! Frame-counter animation over flat-colored sprites. There are no
//! texture atlases; the frame counter exists so timed behaviors (the
//! mage's cast frame, death poses) key off a shared clock.

use bevy::prelude::*;

use crate::combat::ai::{AiState, EnemyAi};
use crate::movement::CharState;

/// Fallback cadence for clips that don't derive their timing from an
/// attack duration.
pub const DEFAULT_FRAME_DURATION: f32 = 0.12;

/// A playable clip: how many frames, how fast, and whether it wraps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationClip {
    pub frames: u32,
    pub frame_duration: f32,
    pub looping: bool,
}

impl AnimationClip {
    pub const fn still() -> Self {
        Self {
            frames: 1,
            frame_duration: DEFAULT_FRAME_DURATION,
            looping: false,
        }
    }

    pub const fn looped(frames: u32) -> Self {
        Self {
            frames,
            frame_duration: DEFAULT_FRAME_DURATION,
            looping: true,
        }
    }

    /// A one-shot clip whose frames divide `duration` evenly.
    pub fn timed(frames: u32, duration: f32) -> Self {
        Self {
            frames,
            frame_duration: duration / frames as f32,
            looping: false,
        }
    }
}

#[derive(Component, Debug, Clone)]
pub struct AnimationController {
    pub current_frame: u32,
    pub frame_timer: f32,
    clip: AnimationClip,
}

impl Default for AnimationController {
    fn default() -> Self {
        Self {
            current_frame: 0,
            frame_timer: 0.0,
            clip: AnimationClip::still(),
        }
    }
}

impl AnimationController {
    /// Switch clips, restarting only when the clip actually changes.
    pub fn set_clip(&mut self, clip: AnimationClip) {
        if clip != self.clip {
            self.clip = clip;
            self.restart();
        }
    }

    /// Restart the current clip from frame zero. Attack starters call
    /// this directly so a frame left over from the previous clip cannot
    /// satisfy a cast-frame check before the clip sync runs.
    pub fn restart(&mut self) {
        self.current_frame = 0;
        self.frame_timer = 0.0;
    }

    pub fn advance(&mut self, dt: f32) {
        if self.clip.frames <= 1 {
            return;
        }
        self.frame_timer += dt;
        while self.frame_timer >= self.clip.frame_duration {
            self.frame_timer -= self.clip.frame_duration;
            if self.current_frame + 1 < self.clip.frames {
                self.current_frame += 1;
            } else if self.clip.looping {
                self.current_frame = 0;
            }
        }
    }
}

/// Player clip table. Attack timing comes from the character's attack
/// duration so the swing spans the whole locked state.
pub fn char_state_clip(state: CharState, attack_duration: f32) -> AnimationClip {
    match state {
        CharState::Idle => AnimationClip::looped(2),
        CharState::Walk => AnimationClip::looped(4),
        CharState::Attack => AnimationClip::timed(4, attack_duration),
        CharState::Crouch
        | CharState::Jump
        | CharState::Fall
        | CharState::Block
        | CharState::Hit
        | CharState::Dead => AnimationClip::still(),
    }
}

/// Enemy clip table. The attack clip divides the attack duration into
/// four frames so a cast frame of 2 lands mid-swing.
pub fn ai_state_clip(ai: &EnemyAi) -> AnimationClip {
    match ai.state {
        AiState::Patrol | AiState::Chase => AnimationClip::looped(4),
        AiState::Attack => AnimationClip::timed(4, ai.attack_duration),
        AiState::Idle | AiState::Hit | AiState::Dead => AnimationClip::still(),
    }
}
