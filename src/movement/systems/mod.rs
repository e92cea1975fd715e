//! Movement domain: system modules for the per-frame update.

pub(crate) mod input;
pub(crate) mod physics;
pub(crate) mod state;

pub(crate) use input::read_move_input;
pub(crate) use physics::{apply_fast_fall, apply_physics};
pub(crate) use state::{apply_char_state, update_timers};
