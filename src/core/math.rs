// Math utilities and helper functions

use glam::Vec2;

/// Tolerance used when comparing accumulated simulation times
pub const TIME_EPSILON: f32 = 1e-5;

/// Linear interpolation
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Component-wise linear interpolation between two vectors
///
/// `t` is clamped to `[0, 1]`, matching the usual engine `Lerp` semantics.
pub fn lerp_vec2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    let t = t.clamp(0.0, 1.0);
    Vec2::new(lerp(a.x, b.x, t), lerp(a.y, b.y, t))
}

/// Sign of an axis value with zero mapping to zero (unlike `f32::signum`)
pub fn axis_sign(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
