// Body writes produced by one controller tick

use super::state::MotionMode;
use crate::engine::physics::{ForceMode, MovementBody};
use glam::Vec2;

/// The parts of the body the controller reads at the start of a tick
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyState {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Used to size the running force so one step can't pass the speed cap
    pub mass: f32,
}

impl BodyState {
    /// State of a unit-mass body
    pub fn new(position: Vec2, velocity: Vec2) -> Self {
        Self {
            position,
            velocity,
            mass: 1.0,
        }
    }

    pub fn with_mass(mut self, mass: f32) -> Self {
        self.mass = mass;
        self
    }

    /// Read the state off a live body
    pub fn from_body(body: &impl MovementBody) -> Self {
        Self {
            position: body.position(),
            velocity: body.velocity(),
            mass: body.mass(),
        }
    }
}

/// Every write the controller wants to make for one tick
///
/// `None` leaves the body's value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BodyCommands {
    pub velocity: Option<Vec2>,
    /// Continuous force for the coming physics step
    pub force: Option<Vec2>,
    /// Impulse applied after the velocity write
    pub impulse: Option<Vec2>,
    pub linear_drag: Option<f32>,
    pub gravity_scale: Option<f32>,
}

impl BodyCommands {
    /// Apply the writes in order: velocity, force, impulse, drag, gravity
    pub fn apply(&self, body: &mut impl MovementBody) {
        if let Some(velocity) = self.velocity {
            body.set_velocity(velocity);
        }
        if let Some(force) = self.force {
            body.add_force(force, ForceMode::Force);
        }
        if let Some(impulse) = self.impulse {
            body.add_force(impulse, ForceMode::Impulse);
        }
        if let Some(drag) = self.linear_drag {
            body.set_linear_drag(drag);
        }
        if let Some(scale) = self.gravity_scale {
            body.set_gravity_scale(scale);
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Result of one fixed tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickOutput {
    pub mode: MotionMode,
    pub commands: BodyCommands,
}
