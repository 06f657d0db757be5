// Point-mass body for driving the controller without a physics world

use crate::engine::physics::{ForceMode, MovementBody};
use glam::Vec2;

/// Integrates force, impulse, drag and scaled gravity like a rigid body with
/// locked rotation
#[derive(Debug, Clone)]
pub(crate) struct PointBody {
    pub position: Vec2,
    pub velocity: Vec2,
    pub drag: f32,
    pub gravity_scale: f32,
    pub mass: f32,
    pub pending_force: Vec2,
}

impl PointBody {
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            drag: 0.0,
            gravity_scale: 1.0,
            mass: 1.0,
            pending_force: Vec2::ZERO,
        }
    }

    /// Advance one physics step; forces act for this step only
    pub fn integrate(&mut self, dt: f32, gravity: Vec2) {
        let acceleration = self.pending_force / self.mass + gravity * self.gravity_scale;
        self.velocity += acceleration * dt;
        self.velocity *= 1.0 / (1.0 + dt * self.drag);
        self.position += self.velocity * dt;
        self.pending_force = Vec2::ZERO;
    }
}

impl MovementBody for PointBody {
    fn position(&self) -> Vec2 {
        self.position
    }

    fn velocity(&self) -> Vec2 {
        self.velocity
    }

    fn mass(&self) -> f32 {
        self.mass
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    fn linear_drag(&self) -> f32 {
        self.drag
    }

    fn set_linear_drag(&mut self, drag: f32) {
        self.drag = drag;
    }

    fn gravity_scale(&self) -> f32 {
        self.gravity_scale
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.gravity_scale = scale;
    }

    fn add_force(&mut self, force: Vec2, mode: ForceMode) {
        match mode {
            ForceMode::Force => self.pending_force += force,
            ForceMode::Impulse => self.velocity += force / self.mass,
        }
    }
}
