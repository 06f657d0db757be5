use super::collision::CollisionLayer;
use glam::Vec2;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// How a force passed to [`MovementBody::add_force`] is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceMode {
    /// Continuous force integrated over the next physics step only
    Force,
    /// Instantaneous change in momentum
    Impulse,
}

/// The rigid body surface the movement controller reads and writes
///
/// The host physics world owns the body; the controller only borrows it for
/// the duration of a fixed tick.
pub trait MovementBody {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    fn mass(&self) -> f32;
    fn set_velocity(&mut self, velocity: Vec2);
    fn linear_drag(&self) -> f32;
    fn set_linear_drag(&mut self, drag: f32);
    fn gravity_scale(&self) -> f32;
    fn set_gravity_scale(&mut self, scale: f32);
    fn add_force(&mut self, force: Vec2, mode: ForceMode);
}

/// [`MovementBody`] adapter over a rapier rigid body
pub struct RapierBody<'a> {
    body: &'a mut RigidBody,
}

impl<'a> RapierBody<'a> {
    pub fn new(body: &'a mut RigidBody) -> Self {
        Self { body }
    }
}

impl MovementBody for RapierBody<'_> {
    fn position(&self) -> Vec2 {
        let t = self.body.translation();
        Vec2::new(t.x, t.y)
    }

    fn velocity(&self) -> Vec2 {
        let v = self.body.linvel();
        Vec2::new(v.x, v.y)
    }

    fn mass(&self) -> f32 {
        self.body.mass()
    }

    fn set_velocity(&mut self, velocity: Vec2) {
        self.body.set_linvel(vector![velocity.x, velocity.y], true);
    }

    fn linear_drag(&self) -> f32 {
        self.body.linear_damping()
    }

    fn set_linear_drag(&mut self, drag: f32) {
        self.body.set_linear_damping(drag);
    }

    fn gravity_scale(&self) -> f32 {
        self.body.gravity_scale()
    }

    fn set_gravity_scale(&mut self, scale: f32) {
        self.body.set_gravity_scale(scale, true);
    }

    fn add_force(&mut self, force: Vec2, mode: ForceMode) {
        let force = vector![force.x, force.y];
        match mode {
            // Cleared by PhysicsWorld::step once integrated
            ForceMode::Force => self.body.add_force(force, true),
            ForceMode::Impulse => self.body.apply_impulse(force, true),
        }
    }
}

/// Builder for creating rigid bodies with common configurations
pub struct BodyBuilder {
    body_type: RigidBodyType,
    position: Isometry<Real>,
    linvel: Vector<Real>,
    gravity_scale: Real,
    linear_damping: Real,
    can_sleep: bool,
    ccd: bool,
    locked_axes: LockedAxes,
}

impl BodyBuilder {
    /// Create a new dynamic body (affected by forces and collisions)
    pub fn new_dynamic() -> Self {
        Self {
            body_type: RigidBodyType::Dynamic,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: 1.0,
            linear_damping: 0.0,
            can_sleep: true,
            ccd: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Create a new fixed (static) body (completely immovable)
    pub fn new_fixed() -> Self {
        Self {
            body_type: RigidBodyType::Fixed,
            position: Isometry::identity(),
            linvel: Vector::zeros(),
            gravity_scale: 0.0,
            linear_damping: 0.0,
            can_sleep: false,
            ccd: false,
            locked_axes: LockedAxes::empty(),
        }
    }

    /// Set the initial position of the body
    pub fn position(mut self, x: Real, y: Real) -> Self {
        self.position = Isometry::translation(x, y);
        self
    }

    /// Set the initial linear velocity
    pub fn linvel(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    /// Set the gravity scale (1.0 = normal gravity, 0.0 = no gravity)
    pub fn gravity_scale(mut self, scale: Real) -> Self {
        self.gravity_scale = scale;
        self
    }

    /// Set the initial linear drag
    pub fn linear_damping(mut self, damping: Real) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set whether the body can sleep when inactive
    pub fn can_sleep(mut self, can_sleep: bool) -> Self {
        self.can_sleep = can_sleep;
        self
    }

    /// Enable continuous collision detection (fast dashes shouldn't tunnel)
    pub fn ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Lock rotation (useful for player characters)
    pub fn lock_rotation(mut self) -> Self {
        self.locked_axes = LockedAxes::ROTATION_LOCKED;
        self
    }

    /// Build the rigid body
    pub fn build(self) -> RigidBody {
        RigidBodyBuilder::new(self.body_type)
            .position(self.position)
            .linvel(self.linvel)
            .gravity_scale(self.gravity_scale)
            .linear_damping(self.linear_damping)
            .can_sleep(self.can_sleep)
            .ccd_enabled(self.ccd)
            .locked_axes(self.locked_axes)
            .build()
    }
}

/// Builder for creating colliders with common configurations
pub struct ColliderBuilder2D {
    shape: SharedShape,
    layer: CollisionLayer,
    friction: Real,
    restitution: Real,
    density: Real,
}

impl ColliderBuilder2D {
    /// Create a box-shaped collider
    pub fn box_shape(half_width: Real, half_height: Real) -> Self {
        Self {
            shape: SharedShape::cuboid(half_width, half_height),
            layer: CollisionLayer::Default,
            friction: 0.5,
            restitution: 0.0,
            density: 1.0,
        }
    }

    /// Set the collision layer used for filtering
    pub fn layer(mut self, layer: CollisionLayer) -> Self {
        self.layer = layer;
        self
    }

    /// Set friction coefficient (0.0 = no friction, 1.0 = high friction)
    pub fn friction(mut self, friction: Real) -> Self {
        self.friction = friction;
        self
    }

    /// Set restitution/bounciness (0.0 = no bounce, 1.0 = perfect bounce)
    pub fn restitution(mut self, restitution: Real) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set density (mass will be calculated from shape volume)
    pub fn density(mut self, density: Real) -> Self {
        self.density = density;
        self
    }

    /// Build the collider
    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .collision_groups(self.layer.to_interaction_groups())
            .friction(self.friction)
            .restitution(self.restitution)
            .density(self.density)
            .build()
    }
}

/// Common rigid body configurations for platformer levels
pub mod presets {
    use super::*;

    /// Create a player character body (dynamic, rotation locked, CCD on)
    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_dynamic()
            .position(x, y)
            .lock_rotation()
            .gravity_scale(1.0)
            .can_sleep(false) // Players should never sleep
            .ccd(true)
            .build()
    }

    /// Create a player collider (box, frictionless so walls don't grip)
    ///
    /// Density is picked for unit mass, so an impulse equals the velocity change.
    pub fn player_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::Player)
            .friction(0.0)
            .restitution(0.0)
            .density(1.0 / (width * height))
            .build()
    }

    /// Create a static level body
    pub fn level_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::new_fixed().position(x, y).build()
    }

    /// Create a floor/platform collider
    pub fn ground_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::Ground)
            .friction(0.3)
            .build()
    }

    /// Create a wall collider
    pub fn wall_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::Wall)
            .friction(0.0)
            .build()
    }

    /// Create a ceiling ledge collider reported by corner checks
    pub fn corner_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::box_shape(width / 2.0, height / 2.0)
            .layer(CollisionLayer::CornerAssist)
            .friction(0.3)
            .build()
    }
}
