use glam::Vec2;
use rand::Rng;
use std::f32::consts::PI;

use crate::params::Config;
use crate::resources::GameRng;

/// Serve lifecycle of the ball after a reset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ServePhase {
    /// Ball in flight; nothing to do until the next point.
    InPlay,
    /// Ball parked at the centre until the delay runs out.
    Waiting { remaining: f32 },
    /// Impulse being spread over the serve window.
    Serving {
        remaining: f32,
        impulse: Vec2,
        applied: Vec2,
    },
}

/// Serve delay: base wait plus a uniform extra, so `[base, base + extra)`.
pub fn sample_delay(config: &Config, rng: &mut GameRng) -> f32 {
    let extra = if config.serve_extra_delay > 0.0 {
        rng.0.gen_range(0.0..config.serve_extra_delay)
    } else {
        0.0
    };
    config.serve_base_delay + extra
}

/// Serve direction: uniform in the arc, mirrored half of the time.
pub fn sample_angle(config: &Config, rng: &mut GameRng) -> f32 {
    let angle = if config.serve_arc_max > config.serve_arc_min {
        rng.0.gen_range(config.serve_arc_min..config.serve_arc_max)
    } else {
        config.serve_arc_min
    };
    if rng.0.gen_bool(0.5) {
        angle + PI
    } else {
        angle
    }
}

/// Angle measured from the +y axis, so the arc keeps serves off both axes.
pub fn serve_impulse(angle: f32, speed: f32) -> Vec2 {
    Vec2::new(angle.sin() * speed, angle.cos() * speed)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Serve {
    pub phase: ServePhase,
}

impl Default for Serve {
    fn default() -> Self {
        Self {
            phase: ServePhase::InPlay,
        }
    }
}

impl Serve {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the lifecycle with a fresh delay. Any serve in progress is
    /// dropped. Returns the sampled delay.
    pub fn restart(&mut self, config: &Config, rng: &mut GameRng) -> f32 {
        let remaining = sample_delay(config, rng);
        self.phase = ServePhase::Waiting { remaining };
        remaining
    }

    pub fn is_in_play(&self) -> bool {
        self.phase == ServePhase::InPlay
    }

    /// Advance by `dt` and return the share of the impulse to apply this
    /// frame. Over a whole serve window the shares add up to the full impulse.
    pub fn advance(&mut self, dt: f32, config: &Config, rng: &mut GameRng) -> Option<Vec2> {
        match self.phase {
            ServePhase::InPlay => None,
            ServePhase::Waiting { remaining } => {
                let remaining = remaining - dt;
                if remaining > 0.0 {
                    self.phase = ServePhase::Waiting { remaining };
                    return None;
                }
                let angle = sample_angle(config, rng);
                let impulse = serve_impulse(angle, config.serve_speed);
                tracing::debug!(angle, ?impulse, "serving ball");
                self.phase = ServePhase::Serving {
                    remaining: config.serve_impulse_duration,
                    impulse,
                    applied: Vec2::ZERO,
                };
                None
            }
            ServePhase::Serving {
                remaining,
                impulse,
                applied,
            } => {
                let left = remaining - dt;
                if left <= 0.0 || config.serve_impulse_duration <= 0.0 {
                    self.phase = ServePhase::InPlay;
                    return Some(impulse - applied);
                }
                let share = impulse * (dt / config.serve_impulse_duration);
                self.phase = ServePhase::Serving {
                    remaining: left,
                    impulse,
                    applied: applied + share,
                };
                Some(share)
            }
        }
    }
}
