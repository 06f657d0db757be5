// Per-frame input snapshot handed over by the host

/// Raw directional input and button state for a single frame
///
/// Axes are raw (unsmoothed) and expected in `{-1, 0, 1}`; anything else is
/// snapped to the nearest of those values by [`InputSnapshot::new`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Horizontal axis (-1 = left, 1 = right)
    pub horizontal: f32,
    /// Vertical axis (-1 = down, 1 = up)
    pub vertical: f32,
    /// Jump button is held this frame
    pub jump_held: bool,
    /// Jump button went down this frame
    pub jump_pressed: bool,
    /// Dash button went down this frame
    pub dash_pressed: bool,
    /// Wall grab button is held this frame
    pub wall_grab_held: bool,
}

impl InputSnapshot {
    /// Snapshot with the given axes and no buttons
    pub fn new(horizontal: f32, vertical: f32) -> Self {
        Self {
            horizontal: snap_axis(horizontal),
            vertical: snap_axis(vertical),
            ..Self::default()
        }
    }

    /// No input at all
    pub fn idle() -> Self {
        Self::default()
    }

    /// Mark jump as pressed this frame (and therefore held)
    pub fn with_jump_pressed(mut self) -> Self {
        self.jump_pressed = true;
        self.jump_held = true;
        self
    }

    /// Mark jump as held without a new press
    pub fn with_jump_held(mut self) -> Self {
        self.jump_held = true;
        self
    }

    pub fn with_dash_pressed(mut self) -> Self {
        self.dash_pressed = true;
        self
    }

    pub fn with_wall_grab(mut self) -> Self {
        self.wall_grab_held = true;
        self
    }
}

/// Snap an analog axis reading to a raw digital axis value
fn snap_axis(value: f32) -> f32 {
    if value >= 0.5 {
        1.0
    } else if value <= -0.5 {
        -1.0
    } else {
        0.0
    }
}
