// Core utilities shared by the engine and game layers

pub mod cooldown;
pub mod math;

pub use cooldown::CooldownTimer;
