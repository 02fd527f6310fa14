use tracing::{debug, info};

use crate::systems::*;
use crate::{
    ArcadePhysics, Config, ContactQueue, Events, ExitDetection, Field, FieldLayout, GameRng,
    InputManager, MatchState, PhysicsWorld, ScoreDisplay, Serve, Side, Time,
};

/// A running match: physics, field handles and match state, advanced one
/// frame at a time by [`Game::tick`].
pub struct Game<P: PhysicsWorld = ArcadePhysics> {
    pub physics: P,
    pub field: Field,
    pub config: Config,
    pub state: MatchState,
    pub serve: Serve,
    pub rng: GameRng,
    pub time: Time,
    pub events: Events,
    contacts: ContactQueue,
}

impl Game<ArcadePhysics> {
    /// Game on the built-in arcade solver.
    pub fn arcade(layout: FieldLayout, config: Config, seed: u64) -> Self {
        Self::new(ArcadePhysics::default(), layout, config, seed)
    }
}

impl<P: PhysicsWorld> Game<P> {
    /// Build the field in `physics` and schedule the opening serve.
    pub fn new(mut physics: P, layout: FieldLayout, config: Config, seed: u64) -> Self {
        let field = Field::build(&mut physics, layout, &config);
        let mut game = Self {
            physics,
            field,
            config,
            state: MatchState::new(),
            serve: Serve::new(),
            rng: GameRng::new(seed),
            time: Time::new(),
            events: Events::new(),
            contacts: ContactQueue::new(),
        };
        if let Some(ball) = game.field.ball {
            let center = game.field.layout.center();
            reset_ball(
                &mut game.physics,
                ball,
                center,
                &mut game.serve,
                &game.config,
                &mut game.rng,
            );
        }
        game
    }

    /// Run one frame, in order: input, paddles, physics, scoring, reset and
    /// serve, score display.
    pub fn tick(
        &mut self,
        dt: f32,
        input: &mut InputManager,
        display: &mut dyn ScoreDisplay,
    ) -> &Events {
        self.events.clear();
        self.time.advance(dt);

        // 1. Poll input
        input.update();

        // 2. Move & clamp paddles
        move_paddles(
            &mut self.physics,
            &self.field.paddles,
            input,
            &self.field.layout,
            self.config.paddle_speed,
        );

        // 3. Physics
        self.physics.step(dt, &mut self.contacts);

        // 4. Contacts, then the bounds detector
        self.detect_exits();

        // 5. Pending reset and serve
        self.events.ball_reset = self.apply_pending_reset();
        self.events.served = advance_serve(
            &mut self.physics,
            self.field.ball,
            &mut self.serve,
            dt,
            &self.config,
            &mut self.rng,
        );
        if self.events.served {
            debug!(frame = self.time.frame, "ball in play");
        }

        // 6. Score display
        display.show(self.state.score_left, self.state.score_right);

        &self.events
    }

    fn detect_exits(&mut self) {
        match self.config.exit_detection {
            ExitDetection::ContactEnd | ExitDetection::Both => {
                let sides = resolve_contacts(&mut self.contacts, &mut self.state);
                self.events.points.extend(sides);
            }
            ExitDetection::BoundsCheck => self.contacts.clear(),
        }

        let bounds_enabled = matches!(
            self.config.exit_detection,
            ExitDetection::BoundsCheck | ExitDetection::Both
        );
        // One exit, one point: skip when a contact already asked for a reset
        if bounds_enabled && !self.state.pending_reset {
            if let Some(side) = self.check_ball_bounds() {
                self.events.points.push(side);
            }
        }

        if let Some(winner) = self.winner() {
            if !self.events.points.is_empty() {
                info!(%winner, left = self.state.score_left, right = self.state.score_right, "match point reached");
            }
        }
    }

    fn check_ball_bounds(&mut self) -> Option<Side> {
        let ball = self.physics.bounding_box(self.field.ball?)?;
        let board = self.physics.bounding_box(self.field.board)?;
        check_bounds(&ball, &board, &mut self.state)
    }

    /// Reset the ball if a point asked for it. Safe to call more than once
    /// per frame.
    pub fn apply_pending_reset(&mut self) -> bool {
        let center = self.field.layout.center();
        apply_pending_reset(
            &mut self.physics,
            self.field.ball,
            center,
            &mut self.state,
            &mut self.serve,
            &self.config,
            &mut self.rng,
        )
    }

    /// Queue a contact notification for the next frame's resolution step.
    /// For engines that report contacts outside [`PhysicsWorld::step`].
    pub fn push_contact(&mut self, event: crate::ContactEvent) {
        self.contacts.push(event);
    }

    pub fn winner(&self) -> Option<Side> {
        self.config
            .win_score
            .and_then(|target| self.state.has_winner(target))
    }

    pub fn ball_position(&self) -> Option<glam::Vec2> {
        self.physics.position(self.field.ball?)
    }

    pub fn ball_velocity(&self) -> Option<glam::Vec2> {
        self.physics.velocity(self.field.ball?)
    }

    pub fn paddle_y(&self, player: usize) -> Option<f32> {
        let body = self.field.paddle(player)?;
        self.physics.position(body).map(|p| p.y)
    }
}
