use glam::Vec2;
use tracing::debug;

use crate::{BodyHandle, Config, GameRng, MatchState, PhysicsWorld, Serve};

/// Park the ball at `center` with all motion removed and start a new serve.
pub fn reset_ball(
    physics: &mut dyn PhysicsWorld,
    ball: BodyHandle,
    center: Vec2,
    serve: &mut Serve,
    config: &Config,
    rng: &mut GameRng,
) {
    physics.set_position(ball, center);
    physics.set_velocity(ball, Vec2::ZERO);
    physics.set_angular_velocity(ball, 0.0);
    let delay = serve.restart(config, rng);
    debug!(delay, "ball reset");
}

/// Perform the reset requested by a point, if any. The request is consumed,
/// so a second call in the same frame does nothing.
pub fn apply_pending_reset(
    physics: &mut dyn PhysicsWorld,
    ball: Option<BodyHandle>,
    center: Vec2,
    state: &mut MatchState,
    serve: &mut Serve,
    config: &Config,
    rng: &mut GameRng,
) -> bool {
    let Some(ball) = ball else {
        return false;
    };
    if !state.take_pending_reset() {
        return false;
    }
    reset_ball(physics, ball, center, serve, config, rng);
    true
}

/// Step the serve lifecycle and push this frame's share of the impulse.
/// Returns true on the frame the ball goes into play.
pub fn advance_serve(
    physics: &mut dyn PhysicsWorld,
    ball: Option<BodyHandle>,
    serve: &mut Serve,
    dt: f32,
    config: &Config,
    rng: &mut GameRng,
) -> bool {
    let Some(ball) = ball else {
        return false;
    };
    let Some(impulse) = serve.advance(dt, config, rng) else {
        return false;
    };
    physics.apply_impulse(ball, impulse);
    serve.is_in_play()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ArcadePhysics, BodyDef, ServePhase, Side};

    fn setup() -> (ArcadePhysics, BodyHandle, Serve, Config, GameRng) {
        let mut physics = ArcadePhysics::default();
        let ball = physics.create_body(BodyDef::ball(Vec2::new(-105.0, 20.0), 3.0, 1.0, 1.0));
        physics.set_velocity(ball, Vec2::new(-140.0, 12.0));
        physics.set_angular_velocity(ball, 2.0);
        (physics, ball, Serve::new(), Config::new(), GameRng::new(42))
    }

    #[test]
    fn test_reset_zeroes_motion_and_centres() {
        let (mut physics, ball, mut serve, config, mut rng) = setup();
        let mut state = MatchState::new();
        state.award(Side::Right);

        let done = apply_pending_reset(
            &mut physics,
            Some(ball),
            Vec2::ZERO,
            &mut state,
            &mut serve,
            &config,
            &mut rng,
        );

        assert!(done);
        assert_eq!(physics.position(ball), Some(Vec2::ZERO));
        assert_eq!(physics.velocity(ball), Some(Vec2::ZERO));
        assert_eq!(physics.angular_velocity(ball), Some(0.0));
        assert!(!state.pending_reset);
        assert!(matches!(serve.phase, ServePhase::Waiting { .. }));
    }

    #[test]
    fn test_second_reset_in_same_frame_is_noop() {
        let (mut physics, ball, mut serve, config, mut rng) = setup();
        let mut state = MatchState::new();
        state.award(Side::Left);

        assert!(apply_pending_reset(&mut physics, Some(ball), Vec2::ZERO, &mut state, &mut serve, &config, &mut rng));
        let phase_after_first = serve.phase;
        assert!(!apply_pending_reset(&mut physics, Some(ball), Vec2::ZERO, &mut state, &mut serve, &config, &mut rng));
        assert_eq!(serve.phase, phase_after_first, "serve must not be rescheduled");
    }

    #[test]
    fn test_no_request_no_reset() {
        let (mut physics, ball, mut serve, config, mut rng) = setup();
        let mut state = MatchState::new();
        assert!(!apply_pending_reset(&mut physics, Some(ball), Vec2::ZERO, &mut state, &mut serve, &config, &mut rng));
        assert_eq!(physics.position(ball), Some(Vec2::new(-105.0, 20.0)));
    }

    #[test]
    fn test_missing_ball_keeps_request() {
        let (mut physics, _ball, mut serve, config, mut rng) = setup();
        let mut state = MatchState::new();
        state.award(Side::Left);
        assert!(!apply_pending_reset(&mut physics, None, Vec2::ZERO, &mut state, &mut serve, &config, &mut rng));
        assert!(state.pending_reset);
    }

    #[test]
    fn test_serve_applies_full_impulse_once() {
        let (mut physics, ball, mut serve, config, mut rng) = setup();
        reset_ball(&mut physics, ball, Vec2::ZERO, &mut serve, &config, &mut rng);

        let mut served_frames = 0;
        for _ in 0..600 {
            if advance_serve(&mut physics, Some(ball), &mut serve, 1.0 / 60.0, &config, &mut rng) {
                served_frames += 1;
            }
        }

        assert_eq!(served_frames, 1);

        let speed = physics.velocity(ball).unwrap().length();
        assert!((speed - config.serve_speed).abs() < 1e-2, "speed {speed}");
        assert!(serve.is_in_play());
    }
}
