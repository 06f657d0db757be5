// Platformer movement
//
// Everything that turns sampled input and collision results into body writes:
// - `config`: tuning values and probe geometry
// - `probe`: shape casts answering grounded / wall / corner questions
// - `state`: jump counters, dash progress and the per-tick motion mode
// - `commands`: the body writes one fixed tick produces
// - `controller`: the frame/fixed state machine tying it together

pub mod commands;
pub mod config;
pub mod controller;
pub mod probe;
pub mod state;

#[cfg(test)]
pub(crate) mod test_body;

pub use commands::{BodyCommands, BodyState, TickOutput};
pub use config::{ConfigError, MovementConfig, ProbeConfig, BASE_MOVEMENT, BASE_PROBE};
pub use controller::MovementController;
pub use probe::{CollisionFlags, CollisionProbe, WallSide};
pub use state::{DashState, JumpKind, JumpState, MotionMode, WallJumpHalt};
