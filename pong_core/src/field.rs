use glam::Vec2;
use tracing::warn;

use crate::{BodyDef, BodyHandle, Config, FieldLayout, PhysicsWorld};

/// Paddle body driven by one player's input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerPaddle {
    pub player: usize,
    pub body: BodyHandle,
}

/// Handles to every body of the play field, resolved once at build time.
#[derive(Debug, Clone)]
pub struct Field {
    pub layout: FieldLayout,
    pub board: BodyHandle,
    pub ball: Option<BodyHandle>,
    pub paddles: Vec<PlayerPaddle>,
}

impl Field {
    /// Create the bodies described by `layout` in `physics`.
    pub fn build(physics: &mut dyn PhysicsWorld, layout: FieldLayout, config: &Config) -> Self {
        let board = physics.create_body(BodyDef::board(layout.board));
        let width = layout.board.size().x;

        match layout.walls {
            Some(walls) => {
                physics.create_body(BodyDef::wall("top wall", walls.top_y, width));
                physics.create_body(BodyDef::wall("bottom wall", walls.bottom_y, width));
            }
            None => warn!("field has no walls, paddles clamp to the board"),
        }

        let paddles: Vec<PlayerPaddle> = layout
            .paddles
            .iter()
            .map(|p| PlayerPaddle {
                player: p.player,
                body: physics.create_body(BodyDef::paddle(
                    if p.player == 0 { "left paddle" } else { "right paddle" },
                    Vec2::new(p.x, layout.clamp_paddle_y(p.y)),
                    layout.paddle_size,
                )),
            })
            .collect();

        let ball = match layout.ball_radius {
            Some(radius) => Some(physics.create_body(BodyDef::ball(
                layout.center(),
                radius,
                config.ball_mass,
                config.ball_restitution,
            ))),
            None => {
                warn!("field has no ball, serving and scoring are inert");
                None
            }
        };

        Self {
            layout,
            board,
            ball,
            paddles,
        }
    }

    pub fn paddle(&self, player: usize) -> Option<BodyHandle> {
        self.paddles
            .iter()
            .find(|p| p.player == player)
            .map(|p| p.body)
    }
}
