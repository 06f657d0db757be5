// Game layer: the movement controller and the player that owns it

pub mod movement;
pub mod player;

pub use movement::{MotionMode, MovementConfig, MovementController};
pub use player::Player;
