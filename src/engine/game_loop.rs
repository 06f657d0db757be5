/// Game loop timing and control system
///
/// Implements a fixed timestep accumulator driven by an explicit frame delta.
/// The frame phase (input sampling, buffer countdowns) runs once per rendered
/// frame; the fixed phase (collision probing, movement state machine, physics
/// step) runs zero or more times per frame depending on accumulated time.

/// Target physics/update rate (60 updates per second)
pub const FIXED_TIMESTEP: f32 = 1.0 / 60.0;

/// Maximum number of physics steps per frame to prevent spiral of death
const MAX_PHYSICS_STEPS: u32 = 5;

/// Game loop timing state
#[derive(Debug)]
pub struct GameLoop {
    /// Fixed update interval in seconds
    fixed_timestep: f32,

    /// Accumulated time for fixed timestep updates
    accumulator: f32,

    /// Total simulated time (sum of executed fixed steps)
    simulated_time: f32,

    /// Whether the game is paused
    paused: bool,

    /// Current frame number
    frame_count: u64,

    /// Total updates executed
    update_count: u64,
}

impl GameLoop {
    /// Create a new game loop at the default 60 Hz fixed rate
    pub fn new() -> Self {
        Self::with_timestep(FIXED_TIMESTEP)
    }

    /// Create a new game loop with a custom fixed timestep (seconds)
    pub fn with_timestep(fixed_timestep: f32) -> Self {
        Self {
            fixed_timestep,
            accumulator: 0.0,
            simulated_time: 0.0,
            paused: false,
            frame_count: 0,
            update_count: 0,
        }
    }

    /// Begin a new frame that took `frame_dt` seconds, returns the number of
    /// fixed updates to run
    pub fn begin_frame(&mut self, frame_dt: f32) -> u32 {
        self.frame_count += 1;
        let frame_dt = frame_dt.max(0.0);

        // If paused, don't accumulate time for updates
        if self.paused {
            return 0;
        }

        self.accumulator += frame_dt;

        let mut updates = 0;
        while self.accumulator >= self.fixed_timestep && updates < MAX_PHYSICS_STEPS {
            self.accumulator -= self.fixed_timestep;
            updates += 1;
        }

        // Drop the backlog we refused to simulate
        if updates == MAX_PHYSICS_STEPS && self.accumulator >= self.fixed_timestep {
            log::warn!(
                "Fixed step backlog of {:.3}s dropped after {} steps",
                self.accumulator,
                MAX_PHYSICS_STEPS
            );
            self.accumulator %= self.fixed_timestep;
        }

        self.update_count += updates as u64;
        self.simulated_time += updates as f32 * self.fixed_timestep;
        updates
    }

    /// Get the fixed timestep for physics updates (in seconds)
    pub fn fixed_timestep(&self) -> f32 {
        self.fixed_timestep
    }

    /// Get the interpolation alpha for smooth rendering between physics steps
    pub fn alpha(&self) -> f32 {
        self.accumulator / self.fixed_timestep
    }

    /// Total simulated time in seconds
    pub fn simulated_time(&self) -> f32 {
        self.simulated_time
    }

    /// Get total number of frames begun
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Get total number of updates executed
    pub fn update_count(&self) -> u64 {
        self.update_count
    }

    /// Check if game is paused
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Pause the game
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Game paused");
        }
    }

    /// Resume the game
    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Reset accumulator to prevent update burst
            self.accumulator = 0.0;
            log::info!("Game resumed");
        }
    }

    /// Toggle pause state
    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for GameLoop {
    fn default() -> Self {
        Self::new()
    }
}
