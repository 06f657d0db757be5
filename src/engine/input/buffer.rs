// Input buffering for one-shot actions

use super::snapshot::InputSnapshot;

/// One-shot actions that are remembered for a short window after the press
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Jump,
    Dash,
}

/// Countdown buffer for a single action
///
/// Pressing the action sets the countdown to the configured window; every
/// other frame it is decremented by the frame delta. The counter is allowed
/// to go negative: availability only compares it against zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionBuffer {
    window: f32,
    remaining: f32,
}

impl ActionBuffer {
    /// Create a new buffer with the given window length (seconds)
    pub fn new(window: f32) -> Self {
        Self {
            window,
            remaining: 0.0,
        }
    }

    /// Advance the buffer by one frame
    pub fn update(&mut self, pressed: bool, dt: f32) {
        if pressed {
            self.remaining = self.window;
        } else {
            self.remaining -= dt;
        }
    }

    /// Whether the action is currently buffered
    pub fn is_available(&self) -> bool {
        self.remaining > 0.0
    }

    /// Drop the buffered press so it can't fire again
    pub fn consume(&mut self) {
        self.remaining = 0.0;
    }

    /// Seconds left in the buffer (may be negative)
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    pub fn window(&self) -> f32 {
        self.window
    }
}

/// Direction the character faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn is_right(self) -> bool {
        self == Facing::Right
    }

    /// +1 for right, -1 for left
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    /// Yaw in degrees for hosts that flip the character by rotation
    pub fn yaw_degrees(self) -> f32 {
        match self {
            Facing::Right => 0.0,
            Facing::Left => 180.0,
        }
    }
}

/// Input state for the movement controller
///
/// Holds the latest snapshot, both action buffers, the facing direction and
/// the most recent nonzero horizontal input.
#[derive(Debug, Clone)]
pub struct InputBuffer {
    current: InputSnapshot,
    jump: ActionBuffer,
    dash: ActionBuffer,
    facing: Facing,
    recent_horizontal: f32,
}

impl InputBuffer {
    /// Create a new input buffer with the jump and dash windows (seconds)
    pub fn new(jump_window: f32, dash_window: f32) -> Self {
        Self {
            current: InputSnapshot::default(),
            jump: ActionBuffer::new(jump_window),
            dash: ActionBuffer::new(dash_window),
            facing: Facing::Right,
            recent_horizontal: 0.0,
        }
    }

    /// Sample a new frame of input
    /// Call this once per frame, before any fixed updates for that frame
    pub fn sample(&mut self, snapshot: InputSnapshot, dt: f32) {
        self.current = snapshot;
        self.jump.update(snapshot.jump_pressed, dt);
        self.dash.update(snapshot.dash_pressed, dt);

        if snapshot.horizontal == 1.0 {
            self.facing = Facing::Right;
            self.recent_horizontal = 1.0;
        } else if snapshot.horizontal == -1.0 {
            self.facing = Facing::Left;
            self.recent_horizontal = -1.0;
        }
    }

    /// The snapshot sampled this frame
    pub fn current(&self) -> &InputSnapshot {
        &self.current
    }

    pub fn horizontal(&self) -> f32 {
        self.current.horizontal
    }

    pub fn vertical(&self) -> f32 {
        self.current.vertical
    }

    pub fn jump_held(&self) -> bool {
        self.current.jump_held
    }

    pub fn wall_grab_held(&self) -> bool {
        self.current.wall_grab_held
    }

    /// Check if an action is buffered
    pub fn is_available(&self, action: Action) -> bool {
        self.buffer(action).is_available()
    }

    pub fn jump_available(&self) -> bool {
        self.jump.is_available()
    }

    pub fn dash_available(&self) -> bool {
        self.dash.is_available()
    }

    /// Consume a buffered action
    pub fn consume(&mut self, action: Action) {
        match action {
            Action::Jump => self.jump.consume(),
            Action::Dash => self.dash.consume(),
        }
    }

    /// Access the countdown for an action
    pub fn buffer(&self, action: Action) -> &ActionBuffer {
        match action {
            Action::Jump => &self.jump,
            Action::Dash => &self.dash,
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Last nonzero horizontal input (0 until the first press)
    pub fn recent_horizontal(&self) -> f32 {
        self.recent_horizontal
    }

    /// Clear every buffered action and the sampled snapshot
    pub fn reset(&mut self) {
        self.current = InputSnapshot::default();
        self.jump.consume();
        self.dash.consume();
    }
}
