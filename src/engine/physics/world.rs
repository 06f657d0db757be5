use glam::Vec2;
use rapier2d::parry::query::ShapeCastOptions;
use rapier2d::parry::shape::Cuboid;
use rapier2d::prelude::*;

use super::body::RapierBody;
use super::collision::LayerMask;
use super::PhysicsError;

/// Layer-masked geometric queries against static level geometry
pub trait ShapeQuery {
    /// Sweep an axis-aligned box of full extents `size` from `origin` along
    /// `direction` for `distance` units. A box already overlapping a
    /// collider at its origin counts as a hit.
    fn box_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Vec2,
        distance: f32,
        layers: LayerMask,
    ) -> bool;

    /// Cast a ray from `origin` along `direction` for `length` units
    fn ray_cast(&self, origin: Vec2, direction: Vec2, length: f32, layers: LayerMask) -> bool;
}

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    /// Gravity vector
    gravity: Vector<Real>,

    /// Integration parameters for the physics simulation
    integration_parameters: IntegrationParameters,

    /// Physics pipeline handles collision detection and solving
    physics_pipeline: PhysicsPipeline,

    /// Island manager for sleeping bodies
    island_manager: IslandManager,

    /// Broad phase collision detection
    broad_phase: DefaultBroadPhase,

    /// Narrow phase collision detection
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver for fast-moving objects
    ccd_solver: CCDSolver,

    /// Query pipeline for raycasts and shape casts
    query_pipeline: QueryPipeline,

    /// Rigid body set
    rigid_body_set: RigidBodySet,

    /// Collider set
    collider_set: ColliderSet,
}

impl PhysicsWorld {
    /// Create a new physics world with default settings
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, -9.81])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        // Fixed timestep of 1/60 seconds (60 FPS)
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
        }
    }

    /// Step the physics simulation forward by one timestep
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );

        // Rapier keeps user forces until reset; continuous forces act for one step
        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
        }
    }

    /// Rebuild the query acceleration structure without stepping
    ///
    /// Needed after inserting level geometry when queries must see it before
    /// the first `step`.
    pub fn refresh_queries(&mut self) {
        self.query_pipeline
            .update(&self.rigid_body_set, &self.collider_set);
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Remove a rigid body and all its attached colliders
    pub fn remove_rigid_body(&mut self, handle: RigidBodyHandle) {
        self.rigid_body_set.remove(
            handle,
            &mut self.island_manager,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            true, // remove attached colliders
        );
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Borrow a body as a [`MovementBody`], failing if the handle is stale
    pub fn movement_body(
        &mut self,
        handle: RigidBodyHandle,
    ) -> Result<RapierBody<'_>, PhysicsError> {
        self.rigid_body_set
            .get_mut(handle)
            .map(RapierBody::new)
            .ok_or(PhysicsError::MissingBody(handle))
    }

    /// Position of a body, failing if the handle is stale
    pub fn body_position(&self, handle: RigidBodyHandle) -> Result<Vec2, PhysicsError> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
            .ok_or(PhysicsError::MissingBody(handle))
    }

    /// Velocity of a body, failing if the handle is stale
    pub fn body_velocity(&self, handle: RigidBodyHandle) -> Result<Vec2, PhysicsError> {
        self.rigid_body_set
            .get(handle)
            .map(|body| Vec2::new(body.linvel().x, body.linvel().y))
            .ok_or(PhysicsError::MissingBody(handle))
    }

    /// Set the timestep for physics simulation
    pub fn set_timestep(&mut self, dt: Real) {
        self.integration_parameters.dt = dt;
    }

    /// Get the current timestep
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }

    /// Number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.rigid_body_set.len()
    }
}

impl ShapeQuery for PhysicsWorld {
    fn box_cast(
        &self,
        origin: Vec2,
        size: Vec2,
        direction: Vec2,
        distance: f32,
        layers: LayerMask,
    ) -> bool {
        if layers.is_empty() {
            return false;
        }

        let shape = Cuboid::new(vector![size.x / 2.0, size.y / 2.0]);
        let shape_pos = Isometry::translation(origin.x, origin.y);
        let dir = direction.normalize_or_zero();
        let shape_vel = vector![dir.x, dir.y];
        let options = ShapeCastOptions {
            max_time_of_impact: distance.max(0.0),
            target_distance: 0.0,
            stop_at_penetration: true,
            compute_impact_geometry_on_penetration: false,
        };

        self.query_pipeline
            .cast_shape(
                &self.rigid_body_set,
                &self.collider_set,
                &shape_pos,
                &shape_vel,
                &shape,
                options,
                layers.query_filter(),
            )
            .is_some()
    }

    fn ray_cast(&self, origin: Vec2, direction: Vec2, length: f32, layers: LayerMask) -> bool {
        if layers.is_empty() {
            return false;
        }

        let dir = direction.normalize_or_zero();
        let ray = Ray::new(point![origin.x, origin.y], vector![dir.x, dir.y]);
        self.query_pipeline
            .cast_ray(
                &self.rigid_body_set,
                &self.collider_set,
                &ray,
                length.max(0.0),
                true,
                layers.query_filter(),
            )
            .is_some()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::super::body::{presets, ForceMode, MovementBody};
    use super::super::collision::CollisionLayer;
    use super::*;

    fn world_with_floor() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        // Floor top surface at y = 0
        let floor = world.add_rigid_body(presets::level_body(0.0, -0.5));
        world.add_collider(presets::ground_collider(20.0, 1.0), floor);
        // Wall inner face at x = 2
        let wall = world.add_rigid_body(presets::level_body(2.5, 5.0));
        world.add_collider(presets::wall_collider(1.0, 10.0), wall);
        world.refresh_queries();
        world
    }

    #[test]
    fn test_box_cast_hits_floor_below() {
        let world = world_with_floor();
        let ground = LayerMask::from_layer(CollisionLayer::Ground);
        let size = Vec2::new(0.8, 0.2);

        assert!(world.box_cast(Vec2::new(0.0, 1.05), size, Vec2::NEG_Y, 1.0, ground));
        assert!(!world.box_cast(Vec2::new(0.0, 3.0), size, Vec2::NEG_Y, 1.0, ground));
    }

    #[test]
    fn test_box_cast_respects_layers() {
        let world = world_with_floor();
        let wall = LayerMask::from_layer(CollisionLayer::Wall);
        // Floor is right below, but only walls are requested
        assert!(!world.box_cast(
            Vec2::new(-5.0, 0.5),
            Vec2::new(0.8, 0.2),
            Vec2::NEG_Y,
            1.0,
            wall
        ));
    }

    #[test]
    fn test_box_cast_finds_wall_to_the_right() {
        let world = world_with_floor();
        let wall = LayerMask::from_layer(CollisionLayer::Wall);
        let size = Vec2::new(0.2, 1.0);

        assert!(world.box_cast(Vec2::new(1.5, 3.0), size, Vec2::X, 0.5, wall));
        assert!(!world.box_cast(Vec2::new(1.5, 3.0), size, Vec2::NEG_X, 0.5, wall));
    }

    #[test]
    fn test_ray_cast() {
        let world = world_with_floor();
        let ground = LayerMask::from_layer(CollisionLayer::Ground);
        assert!(world.ray_cast(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 2.0, ground));
        assert!(!world.ray_cast(Vec2::new(0.0, 1.0), Vec2::Y, 2.0, ground));
        assert!(!world.ray_cast(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 2.0, LayerMask::NONE));
    }

    #[test]
    fn test_missing_body_is_an_error() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(presets::player_body(0.0, 0.0));
        world.remove_rigid_body(handle);
        assert!(matches!(
            world.movement_body(handle),
            Err(PhysicsError::MissingBody(_))
        ));
        assert!(world.body_position(handle).is_err());
    }

    #[test]
    fn test_refresh_queries_sees_new_geometry() {
        let mut world = PhysicsWorld::new();
        let ground = LayerMask::from_layer(CollisionLayer::Ground);
        let ledge = world.add_rigid_body(presets::level_body(0.0, -0.5));
        world.add_collider(presets::ground_collider(4.0, 1.0), ledge);

        // Not indexed yet
        assert!(!world.ray_cast(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 2.0, ground));

        world.refresh_queries();
        assert!(world.ray_cast(Vec2::new(0.0, 1.0), Vec2::NEG_Y, 2.0, ground));
    }

    #[test]
    fn test_timestep_drives_step_length() {
        let mut world = PhysicsWorld::new();
        world.set_timestep(0.0625);
        assert_eq!(world.timestep(), 0.0625);

        let handle = world.add_rigid_body(presets::player_body(0.0, 10.0));
        world.add_collider(presets::player_collider(1.0, 2.0), handle);
        world.step();

        // One step of free fall under -9.81
        let vy = world.body_velocity(handle).expect("body exists").y;
        assert!((vy + 9.81 * 0.0625).abs() < 1e-3, "vy {}", vy);
    }

    #[test]
    fn test_step_clears_continuous_forces() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(presets::player_body(0.0, 10.0));
        world.add_collider(presets::player_collider(1.0, 2.0), handle);

        let mut body = world.movement_body(handle).expect("body exists");
        body.add_force(Vec2::new(50.0, 0.0), ForceMode::Force);
        world.step();

        let body = world.get_rigid_body(handle).expect("body exists");
        assert_eq!(body.user_force().x, 0.0);
        assert!(body.linvel().x > 0.0);
    }
}
