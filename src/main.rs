use anyhow::{Context, Result};
use log::info;

use rusted_movement::engine::game_loop::GameLoop;
use rusted_movement::engine::input::InputSnapshot;
use rusted_movement::engine::physics::{body::presets, PhysicsWorld};
use rusted_movement::game::{MotionMode, MovementConfig, MovementController, Player};

/// Seconds of simulated play
const DEMO_LENGTH: f32 = 5.0;

/// Inner face of the wall the demo jumps off
const WALL_FACE_X: f32 = 8.0;

/// Held buttons for one frame; presses are derived from edges
#[derive(Debug, Clone, Copy, Default)]
struct Held {
    horizontal: f32,
    vertical: f32,
    jump: bool,
    dash: bool,
    grab: bool,
}

impl Held {
    fn snapshot(self, previous: Held) -> InputSnapshot {
        let mut snapshot = InputSnapshot::new(self.horizontal, self.vertical);
        snapshot.jump_held = self.jump;
        snapshot.jump_pressed = self.jump && !previous.jump;
        snapshot.dash_pressed = self.dash && !previous.dash;
        snapshot.wall_grab_held = self.grab;
        snapshot
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    RunUp,
    JumpAtWall,
    Grab,
    WallJump,
    Dash,
    FastFall,
    Done,
}

/// Pretend player that reacts to what the character is doing
struct Driver {
    phase: Phase,
    since: f32,
}

impl Driver {
    fn new() -> Self {
        Self {
            phase: Phase::Idle,
            since: 0.0,
        }
    }

    fn enter(&mut self, phase: Phase, now: f32) {
        info!("t={:.3} driver: {:?} -> {:?}", now, self.phase, phase);
        self.phase = phase;
        self.since = now;
    }

    fn input(&mut self, now: f32, x: f32, player: &Player) -> Held {
        let flags = player.controller.flags();
        let elapsed = now - self.since;
        let right = Held {
            horizontal: 1.0,
            ..Held::default()
        };

        match self.phase {
            Phase::Idle if elapsed >= 0.5 => self.enter(Phase::RunUp, now),
            Phase::RunUp if flags.grounded && x > WALL_FACE_X - 4.0 => {
                self.enter(Phase::JumpAtWall, now)
            }
            Phase::JumpAtWall if flags.on_wall() && !flags.grounded => self.enter(Phase::Grab, now),
            // Missed the wall; land and try again
            Phase::JumpAtWall if flags.grounded && elapsed > 0.25 => self.enter(Phase::RunUp, now),
            Phase::Grab if elapsed >= 0.15 || flags.grounded => self.enter(Phase::WallJump, now),
            Phase::WallJump if elapsed >= 0.1 => self.enter(Phase::Dash, now),
            Phase::Dash if elapsed >= 0.1 => self.enter(Phase::FastFall, now),
            Phase::FastFall if flags.grounded && elapsed > 0.1 => self.enter(Phase::Done, now),
            _ => {}
        }

        match self.phase {
            Phase::Idle | Phase::Done => Held::default(),
            Phase::RunUp => right,
            Phase::JumpAtWall => Held { jump: true, ..right },
            Phase::Grab => Held { grab: true, ..right },
            // Still pushing into the wall: neutral wall jump
            Phase::WallJump => Held { jump: true, ..right },
            Phase::Dash => Held {
                horizontal: -1.0,
                vertical: 1.0,
                dash: true,
                ..Held::default()
            },
            Phase::FastFall => Held {
                vertical: -1.0,
                ..Held::default()
            },
        }
    }
}

/// Floor along y = 0, a wall on the right and a ledge over the run-up
fn build_level(physics: &mut PhysicsWorld) {
    let floor = physics.add_rigid_body(presets::level_body(0.0, -0.5));
    physics.add_collider(presets::ground_collider(40.0, 1.0), floor);

    let wall = physics.add_rigid_body(presets::level_body(WALL_FACE_X + 0.5, 5.0));
    physics.add_collider(presets::wall_collider(1.0, 10.0), wall);

    let ledge = physics.add_rigid_body(presets::level_body(-3.0, 4.5));
    physics.add_collider(presets::corner_collider(2.0, 0.5), ledge);

    physics.refresh_queries();
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Starting movement demo...");

    let controller = MovementController::try_new(MovementConfig::default())
        .context("invalid movement config")?;

    let mut physics = PhysicsWorld::new();
    build_level(&mut physics);
    let mut player = Player::spawn(controller, &mut physics, 0.0, 1.0);

    let mut game_loop = GameLoop::new();
    physics.set_timestep(game_loop.fixed_timestep());
    let dt = physics.timestep();

    let mut driver = Driver::new();
    let mut previous = Held::default();
    let mut last_mode: Option<MotionMode> = None;
    let mut frame = 0u32;
    let mut elapsed = 0.0;

    while elapsed < DEMO_LENGTH {
        // Uneven frame pacing: mostly 60 fps with the occasional slow frame
        let frame_dt = if frame % 7 == 6 { 1.0 / 24.0 } else { 1.0 / 60.0 };
        frame += 1;
        elapsed += frame_dt;

        let x = player.position(&physics)?.x;
        let held = driver.input(elapsed, x, &player);
        player.frame_update(held.snapshot(previous), frame_dt);
        previous = held;

        for _ in 0..game_loop.begin_frame(frame_dt) {
            let mode = player.fixed_update(&mut physics, dt)?;
            physics.step();

            if last_mode != Some(mode) {
                let position = player.position(&physics)?;
                let velocity = player.velocity(&physics)?;
                info!(
                    "t={:.3} {:<18} pos=({:6.2}, {:6.2}) vel=({:6.2}, {:6.2}) yaw={:>3.0}",
                    game_loop.simulated_time(),
                    mode.name(),
                    position.x,
                    position.y,
                    velocity.x,
                    velocity.y,
                    player.yaw_degrees()
                );
                last_mode = Some(mode);
            }
        }
    }

    let position = player.position(&physics)?;
    info!(
        "Demo finished after {} frames / {} fixed updates, player at ({:.2}, {:.2})",
        game_loop.frame_count(),
        game_loop.update_count(),
        position.x,
        position.y
    );

    Ok(())
}
