// Input handling for the movement core
//
// The host polls its devices and hands over one `InputSnapshot` per frame.
// This module only interprets that snapshot:
//
// - `snapshot`: the sampled axes and button states for a frame
// - `buffer`: countdown buffers for one-shot actions (jump, dash) and the
//   facing/recent-direction bookkeeping derived from the horizontal axis
//
// ## Usage Example
//
// ```rust
// use rusted_movement::engine::input::{InputBuffer, InputSnapshot};
//
// let mut buffer = InputBuffer::new(0.1, 0.1);
// let snapshot = InputSnapshot::new(1.0, 0.0).with_jump_pressed();
// buffer.sample(snapshot, 1.0 / 60.0);
// assert!(buffer.jump_available());
// assert!(buffer.facing().is_right());
// ```

pub mod buffer;
pub mod snapshot;

pub use buffer::{Action, ActionBuffer, Facing, InputBuffer};
pub use snapshot::InputSnapshot;
