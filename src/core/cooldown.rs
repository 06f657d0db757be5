// Reusable cooldown timer keyed on an explicit simulation clock

use super::math::TIME_EPSILON;

/// A timer that stays active for a fixed duration after being started
///
/// The timer never reads a global clock; callers pass the current simulation
/// time in seconds. It only stores the expiry timestamp.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CooldownTimer {
    duration: f32,
    expires_at: f32,
}

impl CooldownTimer {
    /// Create a timer with the given duration (seconds). Starts inactive.
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            expires_at: f32::NEG_INFINITY,
        }
    }

    /// Configured duration in seconds
    pub fn duration(&self) -> f32 {
        self.duration
    }

    /// Start (or restart) the timer at simulation time `now`
    pub fn start(&mut self, now: f32) {
        self.expires_at = now + self.duration;
    }

    /// Whether `now` is still before the expiry timestamp
    pub fn is_active(&self, now: f32) -> bool {
        now + TIME_EPSILON < self.expires_at
    }

    /// Seconds left until expiry (zero once expired)
    pub fn remaining(&self, now: f32) -> f32 {
        (self.expires_at - now).max(0.0)
    }
}
