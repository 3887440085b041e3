//! Pong Deluxe - two-paddle arcade ball simulation
//!
//! Core modules:
//! - `sim`: Simulation core (physics, AI, power-ups, match rules)
//! - `settings`: Match configuration with JSON import/export
//! - `persistence`: File-backed settings storage
//! - `snapshot`: Per-tick render/HUD outputs for front ends

pub mod persistence;
pub mod settings;
pub mod sim;
pub mod snapshot;

pub use settings::{AiDifficulty, Mode, Settings, SettingsError, WallMode};
pub use sim::{GameState, TickInput, tick};
pub use snapshot::Frame;

/// Game configuration constants
pub mod consts {
    /// Nominal frame step (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest elapsed time fed to a single tick (stalls, backgrounded tabs)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Field dimensions
    pub const FIELD_WIDTH: f32 = 960.0;
    pub const FIELD_HEIGHT: f32 = 540.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 16.0;
    /// Gap between the field edge and the paddle's outer face
    pub const PADDLE_INSET: f32 = 36.0;
    /// Human paddle speed (pixels/s)
    pub const PADDLE_SPEED: f32 = 500.0;
    /// Effective height band, regardless of grow/shrink stacking
    pub const MIN_PADDLE_HEIGHT: f32 = 40.0;
    pub const MAX_PADDLE_HEIGHT: f32 = 240.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 9.0;
    pub const BALL_MAX_VY: f32 = 560.0;
    /// Floor under the horizontal radicand after a paddle hit (pixels²/s²)
    pub const MIN_VX_SQUARED: f32 = 100.0;
    /// Upper bound on contact sub-steps per ball per tick
    pub const MAX_BALL_SUBSTEPS: u32 = 64;
    /// Serve tilt range (radians, either side of horizontal)
    pub const SERVE_TILT: f32 = 0.35;
    /// Balls on the field at serve in multiball mode
    pub const MULTIBALL_COUNT: usize = 3;

    /// AI aim wobble period (seconds per radian of the sine)
    pub const AI_JITTER_PERIOD: f32 = 0.6;

    /// Curveball
    pub const CURVE_SPIN: f32 = 180.0;
    pub const CURVE_HORIZONTAL_NUDGE: f32 = 0.05;
    pub const CURVE_VERTICAL_DAMPING: f32 = 0.02;

    /// Power-ups
    pub const POWERUP_CHANCE: f64 = 0.18;
    pub const POWERUP_RADIUS: f32 = 12.0;
    pub const POWERUP_LIFETIME: f32 = 12.0;
    pub const POWERUP_MARGIN_X: f32 = 80.0;
    pub const POWERUP_MARGIN_Y: f32 = 60.0;
    pub const SLOW_FACTOR: f32 = 0.8;
    pub const FAST_FACTOR: f32 = 1.25;
    pub const INVERT_DURATION: f32 = 6.0;

    /// Paddle effect stacks
    pub const EFFECT_STACK_CAP: f32 = 3.0;
    /// Stack levels lost per second
    pub const EFFECT_DECAY_RATE: f32 = 0.25;
    pub const GROW_PER_LEVEL: f32 = 0.3;
    pub const SHRINK_PER_LEVEL: f32 = 0.25;

    /// Solid-wall obstacles
    pub const MIN_OBSTACLES: usize = 1;
    pub const MAX_OBSTACLES: usize = 3;

    /// Pause between a point and the next serve becoming available (seconds)
    pub const SCORE_PAUSE: f32 = 0.75;
}
