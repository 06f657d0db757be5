// Platformer movement state machine
//
// Two phases, mirroring the game loop:
// - `frame_update` runs once per rendered frame: samples input, counts the
//   action buffers down, updates facing and starts dashes.
// - `fixed_update` runs once per physics tick: consumes the collision flags
//   and produces the single set of body writes for that tick.

use super::commands::{BodyCommands, BodyState, TickOutput};
use super::config::{ConfigError, MovementConfig};
use super::probe::{CollisionFlags, CollisionProbe, WallSide};
use super::state::{DashState, JumpKind, JumpState, MotionMode, WallJumpHalt};
use crate::core::math::{axis_sign, lerp_vec2};
use crate::engine::input::{Action, Facing, InputBuffer, InputSnapshot};
use crate::engine::physics::{MovementBody, ShapeQuery};
use glam::Vec2;
use log::{debug, trace};

/// Drives a platformer body from sampled input and collision flags
#[derive(Debug, Clone)]
pub struct MovementController {
    config: MovementConfig,
    probe: CollisionProbe,
    input: InputBuffer,
    /// Flags from the most recent fixed tick (used by the frame phase)
    flags: CollisionFlags,
    jump: JumpState,
    dash: DashState,
    wall_jump_halt: WallJumpHalt,
    /// Simulation time in seconds, advanced at the end of every fixed tick
    clock: f32,
    last_mode: Option<MotionMode>,
}

impl MovementController {
    /// Create a controller without validating the config
    pub fn new(config: MovementConfig) -> Self {
        Self {
            probe: CollisionProbe::new(config.probe.clone()),
            input: InputBuffer::new(config.jump_buffer_length, config.dash_buffer_length),
            flags: CollisionFlags::default(),
            jump: JumpState::new(config.extra_jumps, config.hang_time),
            dash: DashState::default(),
            wall_jump_halt: WallJumpHalt::new(config.wall_jump_x_velocity_halt_delay),
            clock: 0.0,
            last_mode: None,
            config,
        }
    }

    /// Create a controller, rejecting unusable configs
    pub fn try_new(config: MovementConfig) -> Result<Self, ConfigError> {
        if let Err(err) = config.validate() {
            log::warn!("Rejected movement config: {}", err);
            return Err(err);
        }
        Ok(Self::new(config))
    }

    /// Frame phase: sample input and start a dash if one is buffered
    pub fn frame_update(&mut self, snapshot: InputSnapshot, dt: f32) {
        self.input.sample(snapshot, dt);

        if self.can_dash() {
            let direction = self.dash_direction();
            self.dash.start(direction);
            self.jump.is_jumping = false;
            debug!(
                "Dash started toward ({:.2}, {:.2}) at t={:.3}",
                direction.x, direction.y, self.clock
            );
        }
    }

    /// Fixed phase: decide this tick's motion mode and the body writes
    pub fn fixed_update(&mut self, flags: CollisionFlags, body: BodyState, dt: f32) -> TickOutput {
        if flags.grounded && !self.flags.grounded {
            debug!("Landed at t={:.3}", self.clock);
        }
        self.flags = flags;
        let mut commands = BodyCommands::default();
        let mut velocity = body.velocity;

        // Runs regardless of mode; a running dash overwrites it below
        if self.wall_jump_halt.poll(self.clock) {
            velocity.x = 0.0;
            debug!("Neutral wall jump halted horizontal velocity at t={:.3}", self.clock);
        }

        let mode = if self.dash.is_running(self.config.dash_length) {
            velocity = self.dash.direction * self.config.dash_speed;
            self.dash.advance(dt);
            commands.linear_drag = Some(0.0);
            commands.gravity_scale = Some(0.0);
            MotionMode::Dashing
        } else {
            if self.dash.is_dashing {
                self.dash.finish();
                debug!("Dash finished after {:.3}s", self.dash.elapsed);
            }
            self.move_character(&mut velocity, &mut commands, body.mass, dt)
        };

        if velocity != body.velocity {
            commands.velocity = Some(velocity);
        }

        if self.last_mode != Some(mode) {
            debug!("Motion mode -> {}", mode.name());
            self.last_mode = Some(mode);
        }
        trace!(
            "t={:.3} mode={} vel=({:.2}, {:.2}) flags={:?}",
            self.clock,
            mode.name(),
            velocity.x,
            velocity.y,
            flags
        );

        self.clock += dt;
        TickOutput { mode, commands }
    }

    /// Fixed phase against a live body: probe, tick and apply
    pub fn step(
        &mut self,
        query: &impl ShapeQuery,
        body: &mut impl MovementBody,
        dt: f32,
    ) -> MotionMode {
        let flags = self.probe.probe(query, body.position());
        let output = self.fixed_update(flags, BodyState::from_body(body), dt);
        output.commands.apply(body);
        output.mode
    }

    /// Every non-dash branch: run, drag, bookkeeping, jump, wall handling
    fn move_character(
        &mut self,
        velocity: &mut Vec2,
        commands: &mut BodyCommands,
        mass: f32,
        dt: f32,
    ) -> MotionMode {
        let config = &self.config;
        let flags = self.flags;
        let horizontal = self.input.horizontal();
        let wall_grab = self.is_wall_grabbing();

        if wall_grab {
            let target = Vec2::new(horizontal * config.max_move_speed, velocity.y);
            *velocity = lerp_vec2(*velocity, target, config.wall_grab_blend_rate * dt);
        } else {
            if velocity.x.abs() > config.max_move_speed {
                velocity.x = velocity.x.signum() * config.max_move_speed;
            }
            if horizontal != 0.0 {
                // Never push past the cap within the coming step
                let headroom = (config.max_move_speed - velocity.x * horizontal).max(0.0);
                let force = config.movement_acceleration.min(headroom * mass / dt);
                if force > 0.0 {
                    commands.force = Some(Vec2::new(horizontal * force, 0.0));
                }
            }
        }

        let mut mode = if flags.grounded {
            let changing_direction = axis_sign(velocity.x) * axis_sign(horizontal) < 0.0;
            let coasting = horizontal.abs() < config.ground_drag_input_threshold;
            commands.linear_drag = Some(if coasting || changing_direction {
                config.ground_linear_drag
            } else {
                0.0
            });

            self.dash.has_dashed_since_grounded = false;
            self.jump.refill(config.extra_jumps, config.hang_time);
            MotionMode::Grounded
        } else {
            commands.linear_drag = Some(config.air_linear_drag);
            commands.gravity_scale = Some(self.gravity_multiplier(velocity.y));
            self.jump.hang_time_remaining -= dt;
            if !flags.on_wall() || velocity.y < 0.0 {
                self.jump.is_jumping = false;
            }
            if wall_grab {
                MotionMode::WallGrab
            } else {
                MotionMode::Airborne
            }
        };

        if self.can_jump() {
            let kind = self.jump_kind();
            let direction = match (kind, flags.wall_side()) {
                (JumpKind::Wall | JumpKind::NeutralWall, Some(side)) => Vec2::new(side.away(), 1.0),
                _ => Vec2::Y,
            };
            self.perform_jump(kind, direction, velocity, commands);
            mode = MotionMode::Jumping(kind);
        }

        if !self.jump.is_jumping {
            let sliding = self.is_wall_sliding(velocity.y) && horizontal != 0.0;
            if sliding {
                velocity.y = -self.config.max_move_speed * self.config.wall_slide_modifier;
            }
            if flags.on_wall() {
                self.stick_to_wall(velocity);
                if flags.airborne() && !wall_grab {
                    mode = MotionMode::OnWall { sliding };
                }
            }
        }

        mode
    }

    fn perform_jump(
        &mut self,
        kind: JumpKind,
        direction: Vec2,
        velocity: &mut Vec2,
        commands: &mut BodyCommands,
    ) {
        if kind == JumpKind::Extra {
            self.jump.extra_jumps_remaining = self.jump.extra_jumps_remaining.saturating_sub(1);
        }

        velocity.y = 0.0;
        commands.linear_drag = Some(self.config.air_linear_drag);
        commands.impulse = Some(direction * self.config.jump_force);
        self.jump.hang_time_remaining = 0.0;
        self.input.consume(Action::Jump);
        self.jump.is_jumping = true;

        if kind == JumpKind::NeutralWall {
            self.wall_jump_halt.schedule(self.clock);
        }

        debug!(
            "{} at t={:.3}, extra jumps left: {}",
            MotionMode::Jumping(kind).name(),
            self.clock,
            self.jump.extra_jumps_remaining
        );
    }

    /// Classify the jump the current tick would perform
    fn jump_kind(&self) -> JumpKind {
        let flags = self.flags;
        let horizontal = self.input.horizontal();

        if flags.on_wall() && flags.airborne() {
            let toward_wall = match flags.wall_side() {
                Some(WallSide::Right) => horizontal > 0.0,
                Some(WallSide::Left) => horizontal < 0.0,
                None => false,
            };
            if toward_wall {
                JumpKind::NeutralWall
            } else {
                JumpKind::Wall
            }
        } else if flags.grounded {
            JumpKind::Ground
        } else if self.jump.in_hang_time() {
            JumpKind::Coyote
        } else {
            JumpKind::Extra
        }
    }

    /// Gravity scale for an airborne tick
    fn gravity_multiplier(&self, velocity_y: f32) -> f32 {
        let config = &self.config;
        if self.input.vertical() < 0.0 {
            config.down_multiplier
        } else if velocity_y < 0.0 {
            config.fall_multiplier
        } else if velocity_y > 0.0 && !self.input.jump_held() {
            config.low_jump_fall_multiplier
        } else {
            config.jump_gravity
        }
    }

    /// Push toward the touched wall unless the input points away from it
    fn stick_to_wall(&self, velocity: &mut Vec2) {
        let horizontal = self.input.horizontal();
        let speed = self.config.wall_stick_speed;
        if self.flags.touching_wall_right {
            if horizontal >= 0.0 {
                velocity.x = speed;
            }
        } else if horizontal <= 0.0 {
            velocity.x = -speed;
        }
    }

    /// Initial dash direction from the current input
    fn dash_direction(&self) -> Vec2 {
        let horizontal = self.input.horizontal();
        let vertical = self.input.vertical();

        let raw = if self.flags.airborne() && horizontal == 0.0 && vertical != 0.0 {
            Vec2::new(0.0, vertical)
        } else {
            Vec2::new(self.input.recent_horizontal(), vertical)
        };

        // A zero vector has no direction; fall back to facing
        raw.try_normalize()
            .unwrap_or(Vec2::new(self.input.facing().sign(), 0.0))
    }

    /// A dash is buffered and hasn't been spent this ground/air cycle
    pub fn can_dash(&self) -> bool {
        self.input.dash_available() && !self.dash.has_dashed_since_grounded
    }

    /// A jump is buffered and something allows it
    pub fn can_jump(&self) -> bool {
        self.input.jump_available()
            && (self.jump.in_hang_time()
                || self.jump.extra_jumps_remaining > 0
                || self.flags.on_wall())
    }

    /// On a wall, in the air, holding the grab button
    pub fn is_wall_grabbing(&self) -> bool {
        self.flags.on_wall() && self.flags.airborne() && self.input.wall_grab_held()
    }

    /// On a wall, in the air, not grabbing, and falling
    pub fn is_wall_sliding(&self, velocity_y: f32) -> bool {
        self.flags.on_wall()
            && self.flags.airborne()
            && !self.input.wall_grab_held()
            && velocity_y < 0.0
    }

    /// Forget all transient state (respawn)
    pub fn reset(&mut self) {
        self.input.reset();
        self.flags = CollisionFlags::default();
        self.jump = JumpState::new(self.config.extra_jumps, self.config.hang_time);
        self.dash = DashState::default();
        self.wall_jump_halt = WallJumpHalt::new(self.config.wall_jump_x_velocity_halt_delay);
        self.last_mode = None;
    }

    pub fn config(&self) -> &MovementConfig {
        &self.config
    }

    pub fn probe(&self) -> &CollisionProbe {
        &self.probe
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn flags(&self) -> CollisionFlags {
        self.flags
    }

    pub fn jump_state(&self) -> &JumpState {
        &self.jump
    }

    pub fn dash_state(&self) -> &DashState {
        &self.dash
    }

    pub fn facing(&self) -> Facing {
        self.input.facing()
    }

    /// Simulation time in seconds
    pub fn clock(&self) -> f32 {
        self.clock
    }

    /// Whether a neutral wall jump halt is still waiting to fire
    pub fn wall_jump_halt_pending(&self) -> bool {
        self.wall_jump_halt.is_pending()
    }

    /// Mode chosen by the most recent fixed tick
    pub fn last_mode(&self) -> Option<MotionMode> {
        self.last_mode
    }
}

impl Default for MovementController {
    fn default() -> Self {
        Self::new(MovementConfig::default())
    }
}
