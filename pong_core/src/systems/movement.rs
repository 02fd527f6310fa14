use crate::{FieldLayout, InputManager, PhysicsWorld, PlayerPaddle};

/// Apply one frame of paddle movement, then clamp to the wall range.
/// Clamping runs every frame whether or not the paddle moved.
pub fn move_paddle(y: f32, intent: f32, paddle_speed: f32, layout: &FieldLayout) -> f32 {
    layout.clamp_paddle_y(y + intent * paddle_speed)
}

/// Move every paddle that exists in the field by its player's intent.
pub fn move_paddles(
    physics: &mut dyn PhysicsWorld,
    paddles: &[PlayerPaddle],
    input: &InputManager,
    layout: &FieldLayout,
    paddle_speed: f32,
) {
    for paddle in paddles {
        let Some(pos) = physics.position(paddle.body) else {
            continue;
        };
        let intent = input.movement(paddle.player);
        let y = move_paddle(pos.y, intent, paddle_speed, layout);
        physics.set_position(paddle.body, glam::Vec2::new(pos.x, y));
    }
}
