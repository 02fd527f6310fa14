use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Game tuning parameters for Pong
#[derive(Debug, Clone, Copy)]
pub struct Params;

impl Params {
    // Players
    pub const PLAYER_COUNT: usize = 2;

    // Paddle
    pub const PADDLE_SPEED: f32 = 3.0; // units per frame

    // Ball
    pub const BALL_MASS: f32 = 1.0;
    pub const BALL_RESTITUTION: f32 = 1.0;

    // Serve
    pub const SERVE_SPEED: f32 = 141.421_36; // 100 * sqrt(2)
    pub const SERVE_BASE_DELAY: f32 = 1.0;
    pub const SERVE_EXTRA_DELAY: f32 = 3.0;
    pub const SERVE_IMPULSE_DURATION: f32 = 0.1;
    pub const SERVE_ARC_MIN: f32 = 0.1 * PI;
    pub const SERVE_ARC_MAX: f32 = 0.9 * PI;

    // Physics
    pub const FIXED_DT: f32 = 1.0 / 60.0;
    pub const MAX_DT: f32 = 0.1;
}

/// Which detector decides that the ball left the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExitDetection {
    /// Only `End` contacts between ball and board score.
    ContactEnd,
    /// Only the per-frame bounding box test scores.
    BoundsCheck,
    /// Contacts first, bounds test only when no reset is pending yet.
    #[default]
    Both,
}

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub paddle_speed: f32,
    pub ball_mass: f32,
    pub ball_restitution: f32,
    pub serve_speed: f32,
    pub serve_base_delay: f32,
    pub serve_extra_delay: f32,
    pub serve_impulse_duration: f32,
    pub serve_arc_min: f32,
    pub serve_arc_max: f32,
    pub exit_detection: ExitDetection,
    /// Points needed to take the match. `None` plays forever.
    pub win_score: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paddle_speed: Params::PADDLE_SPEED,
            ball_mass: Params::BALL_MASS,
            ball_restitution: Params::BALL_RESTITUTION,
            serve_speed: Params::SERVE_SPEED,
            serve_base_delay: Params::SERVE_BASE_DELAY,
            serve_extra_delay: Params::SERVE_EXTRA_DELAY,
            serve_impulse_duration: Params::SERVE_IMPULSE_DURATION,
            serve_arc_min: Params::SERVE_ARC_MIN,
            serve_arc_max: Params::SERVE_ARC_MAX,
            exit_detection: ExitDetection::default(),
            win_score: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a RON document. Missing fields keep their defaults.
    pub fn from_ron_str(source: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(source)
    }
}
