// Platformer movement core
//
// - `core`: small math helpers and the cooldown timer
// - `engine`: fixed-timestep loop, input buffering and the rapier physics world
// - `game`: the movement controller and the player bound to a rapier body

pub mod core;
pub mod engine;
pub mod game;
