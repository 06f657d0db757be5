// Movement tuning - every knob the controller reads

use crate::engine::physics::{CollisionLayer, LayerMask};
use glam::Vec2;

/// Collision probe geometry, relative to the body center
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeConfig {
    /// Full extents of the box swept downward for the ground check
    pub ground_box_size: Vec2,
    /// How far the ground box is swept below the body center
    pub ground_cast_distance: f32,
    /// Full extents of the box swept sideways for the wall checks
    pub wall_box_size: Vec2,
    /// How far the wall box is swept to each side
    pub wall_cast_distance: f32,
    /// Length of the upward corner rays
    pub top_raycast_length: f32,
    /// Offset of the outer corner rays (mirrored on x for the left side)
    pub edge_raycast_offset: Vec2,
    /// Offset of the inner corner rays (mirrored on x for the left side)
    pub inner_raycast_offset: Vec2,
    /// Layers that count as floor
    pub ground_layer: LayerMask,
    /// Layers that count as wall
    pub wall_layer: LayerMask,
    /// Layers the corner rays look for
    pub corner_correct_layer: LayerMask,
}

/// Movement tuning for a platformer character
///
/// Speeds are in units/second, durations in seconds, drag is the body's
/// linear damping coefficient, and gravity values are gravity-scale factors.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementConfig {
    // Running
    /// Constant force applied toward the input direction
    pub movement_acceleration: f32,
    /// Horizontal speed cap
    pub max_move_speed: f32,
    /// Drag while grounded and not actively accelerating
    pub ground_linear_drag: f32,
    /// Below this absolute horizontal input the ground drag applies
    pub ground_drag_input_threshold: f32,

    // Jumping
    /// Upward impulse of a jump
    pub jump_force: f32,
    /// Gravity scale while rising with jump held
    pub jump_gravity: f32,
    /// Drag while airborne
    pub air_linear_drag: f32,
    /// Gravity scale while falling
    pub fall_multiplier: f32,
    /// Gravity scale while rising with jump released (short hop)
    pub low_jump_fall_multiplier: f32,
    /// Gravity scale while holding down in the air
    pub down_multiplier: f32,
    /// Jumps available in the air once coyote time has run out
    pub extra_jumps: u32,
    /// Coyote time after leaving the ground
    pub hang_time: f32,
    /// How long a jump press is remembered
    pub jump_buffer_length: f32,

    // Dashing
    pub dash_speed: f32,
    pub dash_length: f32,
    /// How long a dash press is remembered
    pub dash_buffer_length: f32,

    // Walls
    /// Wall slide speed as a fraction of `max_move_speed`
    pub wall_slide_modifier: f32,
    /// Delay before a neutral wall jump loses its horizontal velocity
    pub wall_jump_x_velocity_halt_delay: f32,
    /// Horizontal speed that keeps the body pressed against a wall
    pub wall_stick_speed: f32,
    /// Per-second blend toward the input speed while grabbing a wall
    pub wall_grab_blend_rate: f32,

    // Collision
    pub probe: ProbeConfig,
}

/// Probe geometry sized for a 1 x 2 box character
pub const BASE_PROBE: ProbeConfig = ProbeConfig {
    ground_box_size: Vec2::new(0.9, 0.1),
    ground_cast_distance: 1.0,
    wall_box_size: Vec2::new(0.1, 1.8),
    wall_cast_distance: 0.5,
    top_raycast_length: 0.5,
    edge_raycast_offset: Vec2::new(0.45, 1.0),
    inner_raycast_offset: Vec2::new(0.2, 1.0),
    ground_layer: LayerMask::from_layer(CollisionLayer::Ground),
    wall_layer: LayerMask::from_layer(CollisionLayer::Wall),
    corner_correct_layer: LayerMask::from_layer(CollisionLayer::CornerAssist),
};

/// Default movement feel
pub const BASE_MOVEMENT: MovementConfig = MovementConfig {
    movement_acceleration: 70.0,
    max_move_speed: 12.0,
    ground_linear_drag: 7.0,
    ground_drag_input_threshold: 0.4,

    jump_force: 12.0,
    jump_gravity: 1.0,
    air_linear_drag: 2.5,
    fall_multiplier: 8.0,
    low_jump_fall_multiplier: 5.0,
    down_multiplier: 12.0,
    extra_jumps: 1,
    hang_time: 0.1,
    jump_buffer_length: 0.1,

    dash_speed: 15.0,
    dash_length: 0.3,
    dash_buffer_length: 0.1,

    wall_slide_modifier: 0.5,
    wall_jump_x_velocity_halt_delay: 0.2,
    wall_stick_speed: 1.0,
    wall_grab_blend_rate: 0.5,

    probe: BASE_PROBE,
};

impl Default for MovementConfig {
    fn default() -> Self {
        BASE_MOVEMENT
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        BASE_PROBE
    }
}

/// Rejected movement configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),

    #[error("{field} must not be negative, got {value}")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be greater than zero, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{0} layer mask is empty")]
    EmptyLayerMask(&'static str),
}

impl MovementConfig {
    /// Check that every value is usable by the controller
    pub fn validate(&self) -> Result<(), ConfigError> {
        let non_negative = [
            ("movement_acceleration", self.movement_acceleration),
            ("ground_linear_drag", self.ground_linear_drag),
            ("ground_drag_input_threshold", self.ground_drag_input_threshold),
            ("jump_force", self.jump_force),
            ("jump_gravity", self.jump_gravity),
            ("air_linear_drag", self.air_linear_drag),
            ("fall_multiplier", self.fall_multiplier),
            ("low_jump_fall_multiplier", self.low_jump_fall_multiplier),
            ("down_multiplier", self.down_multiplier),
            ("hang_time", self.hang_time),
            ("jump_buffer_length", self.jump_buffer_length),
            ("dash_length", self.dash_length),
            ("dash_buffer_length", self.dash_buffer_length),
            ("wall_slide_modifier", self.wall_slide_modifier),
            ("wall_jump_x_velocity_halt_delay", self.wall_jump_x_velocity_halt_delay),
            ("wall_stick_speed", self.wall_stick_speed),
            ("wall_grab_blend_rate", self.wall_grab_blend_rate),
            ("ground_cast_distance", self.probe.ground_cast_distance),
            ("wall_cast_distance", self.probe.wall_cast_distance),
            ("top_raycast_length", self.probe.top_raycast_length),
        ];
        for (field, value) in non_negative {
            check_finite(field, value)?;
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        for (field, value) in [
            ("max_move_speed", self.max_move_speed),
            ("dash_speed", self.dash_speed),
        ] {
            check_finite(field, value)?;
            if value <= 0.0 {
                return Err(ConfigError::NotPositive { field, value });
            }
        }

        for (field, value) in [
            ("ground_box_size", self.probe.ground_box_size),
            ("wall_box_size", self.probe.wall_box_size),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(field));
            }
            let smallest = value.min_element();
            if smallest <= 0.0 {
                return Err(ConfigError::NotPositive {
                    field,
                    value: smallest,
                });
            }
        }

        for (field, value) in [
            ("edge_raycast_offset", self.probe.edge_raycast_offset),
            ("inner_raycast_offset", self.probe.inner_raycast_offset),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NotFinite(field));
            }
        }

        for (field, mask) in [
            ("ground", self.probe.ground_layer),
            ("wall", self.probe.wall_layer),
            ("corner correction", self.probe.corner_correct_layer),
        ] {
            if mask.is_empty() {
                return Err(ConfigError::EmptyLayerMask(field));
            }
        }

        Ok(())
    }
}

fn check_finite(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotFinite(field))
    }
}
