// Player entity: a movement controller bound to a rapier body

use crate::engine::input::InputSnapshot;
use crate::engine::physics::{
    body::presets, ColliderHandle, PhysicsError, PhysicsWorld, RigidBodyHandle,
};
use crate::game::movement::{BodyState, MotionMode, MovementController};
use glam::Vec2;

/// Collider extents of the player box
pub const PLAYER_SIZE: Vec2 = Vec2::new(1.0, 2.0);

/// A controllable character living in a [`PhysicsWorld`]
#[derive(Debug)]
pub struct Player {
    pub controller: MovementController,
    /// Handle to the player's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Handle to the player's collider
    pub collider_handle: ColliderHandle,
}

impl Player {
    /// Create the player's body and collider and add them to the world
    pub fn spawn(
        controller: MovementController,
        physics: &mut PhysicsWorld,
        spawn_x: f32,
        spawn_y: f32,
    ) -> Self {
        let body = presets::player_body(spawn_x, spawn_y);
        let body_handle = physics.add_rigid_body(body);

        let collider = presets::player_collider(PLAYER_SIZE.x, PLAYER_SIZE.y);
        let collider_handle = physics.add_collider(collider, body_handle);

        log::info!("Player spawned at ({:.2}, {:.2})", spawn_x, spawn_y);

        Self {
            controller,
            body_handle,
            collider_handle,
        }
    }

    /// Per-frame input sampling
    pub fn frame_update(&mut self, snapshot: InputSnapshot, dt: f32) {
        self.controller.frame_update(snapshot, dt);
    }

    /// One fixed tick: probe the world, run the controller, write the body
    ///
    /// Call before `PhysicsWorld::step` so forces land in the coming step.
    pub fn fixed_update(
        &mut self,
        physics: &mut PhysicsWorld,
        dt: f32,
    ) -> Result<MotionMode, PhysicsError> {
        let state = BodyState::from_body(&physics.movement_body(self.body_handle)?);
        let flags = self.controller.probe().probe(physics, state.position);

        let output = self.controller.fixed_update(flags, state, dt);

        let mut body = physics.movement_body(self.body_handle)?;
        output.commands.apply(&mut body);
        Ok(output.mode)
    }

    /// Body yaw for the current facing, for hosts that flip the sprite by rotation
    pub fn yaw_degrees(&self) -> f32 {
        self.controller.facing().yaw_degrees()
    }

    pub fn position(&self, physics: &PhysicsWorld) -> Result<Vec2, PhysicsError> {
        physics.body_position(self.body_handle)
    }

    pub fn velocity(&self, physics: &PhysicsWorld) -> Result<Vec2, PhysicsError> {
        physics.body_velocity(self.body_handle)
    }

    /// Remove the player from the world
    pub fn despawn(self, physics: &mut PhysicsWorld) {
        physics.remove_rigid_body(self.body_handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::movement::{JumpKind, MovementConfig};

    const DT: f32 = 1.0 / 60.0;

    /// Floor with its top at y = 0
    fn level() -> PhysicsWorld {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rigid_body(presets::level_body(0.0, -0.5));
        world.add_collider(presets::ground_collider(200.0, 1.0), floor);
        world.refresh_queries();
        world
    }

    fn tick(player: &mut Player, world: &mut PhysicsWorld, snapshot: InputSnapshot) -> MotionMode {
        player.frame_update(snapshot, DT);
        let mode = player.fixed_update(world, DT).expect("player body");
        world.step();
        mode
    }

    fn settle(player: &mut Player, world: &mut PhysicsWorld) {
        for _ in 0..30 {
            tick(player, world, InputSnapshot::idle());
        }
    }

    #[test]
    fn test_spawn_adds_body() {
        let mut world = level();
        let player = Player::spawn(MovementController::default(), &mut world, 0.0, 1.0);
        assert_eq!(world.body_count(), 2);
        assert_eq!(player.position(&world).expect("position"), Vec2::new(0.0, 1.0));
    }

    #[test]
    fn test_player_lands_on_floor() {
        let mut world = level();
        let mut player = Player::spawn(MovementController::default(), &mut world, 0.0, 3.0);

        settle(&mut player, &mut world);
        let mode = tick(&mut player, &mut world, InputSnapshot::idle());

        assert_eq!(mode, MotionMode::Grounded);
        assert!(player.controller.flags().grounded);
        let y = player.position(&world).expect("position").y;
        assert!((y - 1.0).abs() < 0.1, "resting height {}", y);
    }

    #[test]
    fn test_player_jumps_off_floor() {
        let mut world = level();
        let mut player = Player::spawn(MovementController::default(), &mut world, 0.0, 1.0);
        settle(&mut player, &mut world);

        let mode = tick(
            &mut player,
            &mut world,
            InputSnapshot::idle().with_jump_pressed(),
        );
        assert_eq!(mode, MotionMode::Jumping(JumpKind::Ground));
        assert!(player.velocity(&world).expect("velocity").y > 5.0);

        let start = player.position(&world).expect("position").y;
        for _ in 0..5 {
            tick(&mut player, &mut world, InputSnapshot::idle().with_jump_held());
        }
        assert!(player.position(&world).expect("position").y > start);
    }

    #[test]
    fn test_player_runs_right() {
        let mut world = level();
        let mut player = Player::spawn(MovementController::default(), &mut world, 0.0, 1.0);
        settle(&mut player, &mut world);

        let max = MovementConfig::default().max_move_speed;
        let mut peak: f32 = 0.0;
        for _ in 0..180 {
            tick(&mut player, &mut world, InputSnapshot::new(1.0, 0.0));
            // Read after the physics step has integrated the running force
            peak = peak.max(player.velocity(&world).expect("velocity").x);
        }

        assert!(peak <= max + 1e-3, "peak speed {}", peak);
        assert!(peak > max - 0.5, "never got up to speed: {}", peak);
        assert!(player.position(&world).expect("position").x > 10.0);
        assert!(player.controller.facing().is_right());
        assert_eq!(player.yaw_degrees(), 0.0);
    }

    #[test]
    fn test_player_turns_to_face_left() {
        let mut world = level();
        let mut player = Player::spawn(MovementController::default(), &mut world, 0.0, 1.0);
        settle(&mut player, &mut world);

        tick(&mut player, &mut world, InputSnapshot::new(-1.0, 0.0));
        assert_eq!(player.yaw_degrees(), 180.0);

        // Releasing the stick keeps the facing
        tick(&mut player, &mut world, InputSnapshot::idle());
        assert_eq!(player.yaw_degrees(), 180.0);
    }

    #[test]
    fn test_neutral_wall_jump_off_a_real_wall() {
        let mut world = level();
        // Inner face at x = 2
        let wall = world.add_rigid_body(presets::level_body(2.5, 5.0));
        world.add_collider(presets::wall_collider(1.0, 10.0), wall);
        world.refresh_queries();

        let mut player = Player::spawn(MovementController::default(), &mut world, 1.4, 6.0);
        let mut reached_wall = false;
        for _ in 0..30 {
            tick(&mut player, &mut world, InputSnapshot::new(1.0, 0.0));
            let flags = player.controller.flags();
            if flags.touching_wall_right && !flags.grounded {
                reached_wall = true;
                break;
            }
        }
        assert!(reached_wall, "never touched the wall in the air");

        // Still pushing into the wall
        let mode = tick(&mut player, &mut world, InputSnapshot::new(1.0, 0.0).with_jump_pressed());
        assert_eq!(mode, MotionMode::Jumping(JumpKind::NeutralWall));
        assert!(player.velocity(&world).expect("velocity").y > 0.0);
    }

    #[test]
    fn test_fixed_update_after_despawn_fails() {
        let mut world = level();
        let mut player = Player::spawn(MovementController::default(), &mut world, 0.0, 1.0);
        let handle = player.body_handle;
        world.remove_rigid_body(handle);

        let err = player.fixed_update(&mut world, DT).unwrap_err();
        assert!(matches!(err, PhysicsError::MissingBody(h) if h == handle));
    }
}
