// Physics system using rapier2d

pub mod body;
pub mod collision;
mod world;

pub use body::{ColliderHandle, ForceMode, MovementBody, RapierBody, RigidBodyHandle};
pub use collision::{CollisionLayer, LayerMask};
pub use world::{PhysicsWorld, ShapeQuery};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::{vector, Real, Vector};

/// Physics world lookup errors
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("Rigid body {0:?} is no longer in the physics world")]
    MissingBody(RigidBodyHandle),
}
