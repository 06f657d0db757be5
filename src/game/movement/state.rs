// Movement state: jump counters, dash progress and the per-tick motion mode

use crate::core::CooldownTimer;
use glam::Vec2;

/// How a jump was performed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JumpKind {
    /// From the ground
    Ground,
    /// Shortly after leaving the ground, inside the hang time window
    Coyote,
    /// Mid-air, spending one extra jump
    Extra,
    /// Off a wall, away from it
    Wall,
    /// Off a wall while pushing toward it; horizontal speed is killed later
    NeutralWall,
}

impl JumpKind {
    pub fn is_wall_jump(self) -> bool {
        matches!(self, Self::Wall | Self::NeutralWall)
    }
}

/// The single branch that owns the body's velocity for a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MotionMode {
    /// Dash override: fixed speed, no gravity, no drag
    Dashing,
    /// A jump impulse was applied this tick
    Jumping(JumpKind),
    /// Touching a wall while airborne or pressed against it; `sliding` when
    /// the fall speed was clamped
    OnWall { sliding: bool },
    /// Holding onto a wall, horizontal speed blended toward the input
    WallGrab,
    /// Running on the ground
    Grounded,
    /// Free flight under the gravity multipliers
    Airborne,
}

impl MotionMode {
    pub fn is_dashing(self) -> bool {
        self == Self::Dashing
    }

    pub fn is_jump(self) -> bool {
        matches!(self, Self::Jumping(_))
    }

    /// Short label for logs and debug overlays
    pub fn name(self) -> &'static str {
        match self {
            Self::Dashing => "dash",
            Self::Jumping(JumpKind::Ground) => "jump",
            Self::Jumping(JumpKind::Coyote) => "coyote_jump",
            Self::Jumping(JumpKind::Extra) => "extra_jump",
            Self::Jumping(JumpKind::Wall) => "wall_jump",
            Self::Jumping(JumpKind::NeutralWall) => "neutral_wall_jump",
            Self::OnWall { sliding: true } => "wall_slide",
            Self::OnWall { sliding: false } => "wall_stick",
            Self::WallGrab => "wall_grab",
            Self::Grounded => "grounded",
            Self::Airborne => "airborne",
        }
    }
}

/// Jump bookkeeping: extra jumps, coyote time and the rising flag
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpState {
    pub extra_jumps_remaining: u32,
    pub hang_time_remaining: f32,
    pub is_jumping: bool,
}

impl JumpState {
    pub fn new(extra_jumps: u32, hang_time: f32) -> Self {
        Self {
            extra_jumps_remaining: extra_jumps,
            hang_time_remaining: hang_time,
            is_jumping: false,
        }
    }

    /// Restore every counter to its maximum (called on grounded ticks)
    pub fn refill(&mut self, extra_jumps: u32, hang_time: f32) {
        self.extra_jumps_remaining = extra_jumps;
        self.hang_time_remaining = hang_time;
    }

    /// Still inside the coyote window
    pub fn in_hang_time(&self) -> bool {
        self.hang_time_remaining > 0.0
    }
}

/// A timed dash; at most one per ground/air cycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DashState {
    pub is_dashing: bool,
    pub has_dashed_since_grounded: bool,
    /// Unit direction of the current (or last) dash
    pub direction: Vec2,
    /// Seconds of dash already simulated
    pub elapsed: f32,
}

impl Default for DashState {
    fn default() -> Self {
        Self {
            is_dashing: false,
            has_dashed_since_grounded: false,
            direction: Vec2::X,
            elapsed: 0.0,
        }
    }
}

impl DashState {
    /// Begin a dash along `direction` (already normalized)
    pub fn start(&mut self, direction: Vec2) {
        self.is_dashing = true;
        self.has_dashed_since_grounded = true;
        self.direction = direction;
        self.elapsed = 0.0;
    }

    /// Whether the dash still owns the tick, given its configured length
    pub fn is_running(&self, length: f32) -> bool {
        self.is_dashing && self.elapsed + crate::core::math::TIME_EPSILON < length
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    pub fn finish(&mut self) {
        self.is_dashing = false;
    }
}

/// Delayed horizontal halt scheduled by a neutral wall jump
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallJumpHalt {
    timer: CooldownTimer,
    pending: bool,
}

impl WallJumpHalt {
    pub fn new(delay: f32) -> Self {
        Self {
            timer: CooldownTimer::new(delay),
            pending: false,
        }
    }

    /// Arm the halt at simulation time `now`; re-arming restarts the delay
    pub fn schedule(&mut self, now: f32) {
        self.timer.start(now);
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Returns true exactly once, on the first poll after the delay elapsed
    pub fn poll(&mut self, now: f32) -> bool {
        if self.pending && !self.timer.is_active(now) {
            self.pending = false;
            true
        } else {
            false
        }
    }

    /// Seconds until the halt fires, if armed
    pub fn remaining(&self, now: f32) -> Option<f32> {
        self.pending.then(|| self.timer.remaining(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jump_state_refill() {
        let mut jump = JumpState::new(2, 0.1);
        jump.extra_jumps_remaining = 0;
        jump.hang_time_remaining = -0.3;
        assert!(!jump.in_hang_time());

        jump.refill(2, 0.1);
        assert_eq!(jump.extra_jumps_remaining, 2);
        assert_eq!(jump.hang_time_remaining, 0.1);
        assert!(jump.in_hang_time());
    }

    #[test]
    fn test_dash_runs_for_length() {
        let mut dash = DashState::default();
        dash.start(Vec2::new(0.0, 1.0));
        assert!(dash.has_dashed_since_grounded);

        for _ in 0..4 {
            assert!(dash.is_running(0.25));
            dash.advance(0.0625);
        }
        assert!(!dash.is_running(0.25));

        dash.finish();
        assert!(!dash.is_dashing);
        // Finishing does not give the dash back
        assert!(dash.has_dashed_since_grounded);
    }

    #[test]
    fn test_wall_jump_halt_fires_once() {
        let mut halt = WallJumpHalt::new(0.125);
        assert!(!halt.poll(0.0));

        halt.schedule(1.0);
        assert!(halt.is_pending());
        assert_eq!(halt.remaining(1.0625), Some(0.0625));
        assert!(!halt.poll(1.0625));
        assert!(halt.poll(1.125));
        assert!(!halt.poll(1.1875));
        assert!(!halt.is_pending());
        assert_eq!(halt.remaining(2.0), None);
    }

    #[test]
    fn test_motion_mode_names() {
        assert_eq!(MotionMode::Dashing.name(), "dash");
        assert_eq!(MotionMode::Jumping(JumpKind::NeutralWall).name(), "neutral_wall_jump");
        assert_eq!(MotionMode::OnWall { sliding: true }.name(), "wall_slide");
        assert!(MotionMode::Jumping(JumpKind::Extra).is_jump());
        assert!(JumpKind::Wall.is_wall_jump());
        assert!(!JumpKind::Coyote.is_wall_jump());
    }
}
