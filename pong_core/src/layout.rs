use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::LayoutError;
use crate::params::Params;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec2 {
        self.max - self.min
    }

    /// Check if circle intersects AABB
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        let closest = self.closest_point(center);
        (center - closest).length_squared() <= radius * radius
    }

    pub fn closest_point(&self, point: Vec2) -> Vec2 {
        Vec2::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }

    /// True when `inner` pokes out through the left or right edge.
    /// Vertical overhang is ignored.
    pub fn escapes_horizontally(&self, inner: &Aabb) -> bool {
        inner.min.x < self.min.x || inner.max.x > self.max.x
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaddleLayout {
    pub player: usize,
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallLayout {
    pub top_y: f32,
    pub bottom_y: f32,
}

/// Static description of the play field, normally read from a RON asset.
///
/// Items that are absent leave the matching feature inert: no ball means
/// nothing to serve or score, no paddle for a player means that player's
/// input moves nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldLayout {
    pub board: Aabb,
    pub walls: Option<WallLayout>,
    pub paddles: Vec<PaddleLayout>,
    pub paddle_size: Vec2,
    pub ball_radius: Option<f32>,
}

impl Default for FieldLayout {
    fn default() -> Self {
        Self {
            board: Aabb::from_center_size(Vec2::ZERO, Vec2::new(200.0, 150.0)),
            walls: Some(WallLayout {
                top_y: 75.0,
                bottom_y: -75.0,
            }),
            paddles: vec![
                PaddleLayout {
                    player: 0,
                    x: -90.0,
                    y: 0.0,
                },
                PaddleLayout {
                    player: 1,
                    x: 90.0,
                    y: 0.0,
                },
            ],
            paddle_size: Vec2::new(4.0, 30.0),
            ball_radius: Some(3.0),
        }
    }
}

impl FieldLayout {
    pub fn from_ron_str(source: &str) -> Result<Self, LayoutError> {
        let layout: Self = ron::from_str(source)?;
        layout.validate()?;
        Ok(layout)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| LayoutError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_ron_str(&source)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let size = self.board.size();
        if size.x <= 0.0 || size.y <= 0.0 {
            return Err(LayoutError::Invalid(format!(
                "board must have a positive size, got {size}"
            )));
        }
        if let Some(walls) = self.walls {
            if walls.bottom_y >= walls.top_y {
                return Err(LayoutError::Invalid(format!(
                    "bottom wall ({}) must sit below top wall ({})",
                    walls.bottom_y, walls.top_y
                )));
            }
        }
        if matches!(self.ball_radius, Some(r) if r <= 0.0) {
            return Err(LayoutError::Invalid("ball radius must be positive".into()));
        }
        if !self.paddles.is_empty() && (self.paddle_size.x <= 0.0 || self.paddle_size.y <= 0.0) {
            return Err(LayoutError::Invalid("paddle size must be positive".into()));
        }
        for (i, paddle) in self.paddles.iter().enumerate() {
            if paddle.player >= Params::PLAYER_COUNT {
                return Err(LayoutError::Invalid(format!(
                    "paddle for player {} but only {} players exist",
                    paddle.player,
                    Params::PLAYER_COUNT
                )));
            }
            if self.paddles[..i].iter().any(|p| p.player == paddle.player) {
                return Err(LayoutError::Invalid(format!(
                    "player {} has more than one paddle",
                    paddle.player
                )));
            }
        }
        Ok(())
    }

    /// Where the ball is placed on reset.
    pub fn center(&self) -> Vec2 {
        self.board.center()
    }

    /// Vertical range a paddle centre may occupy. Falls back to the board
    /// when the field has no walls.
    pub fn paddle_range(&self) -> (f32, f32) {
        match self.walls {
            Some(walls) => (walls.bottom_y, walls.top_y),
            None => (self.board.min.y, self.board.max.y),
        }
    }

    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        let (bottom, top) = self.paddle_range();
        y.clamp(bottom, top)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = FieldLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.center(), Vec2::ZERO);
        assert_eq!(layout.paddles.len(), 2);
    }

    #[test]
    fn test_clamp_paddle_y() {
        let layout = FieldLayout::default();
        assert_eq!(layout.clamp_paddle_y(500.0), 75.0);
        assert_eq!(layout.clamp_paddle_y(-500.0), -75.0);
        assert_eq!(layout.clamp_paddle_y(12.0), 12.0);
    }

    #[test]
    fn test_paddle_range_without_walls_uses_board() {
        let layout = FieldLayout {
            walls: None,
            ..FieldLayout::default()
        };
        assert_eq!(layout.paddle_range(), (-75.0, 75.0));
    }

    #[test]
    fn test_escapes_horizontally_ignores_vertical() {
        let board = Aabb::from_center_size(Vec2::ZERO, Vec2::new(200.0, 100.0));
        let above = Aabb::from_center_size(Vec2::new(0.0, 60.0), Vec2::splat(20.0));
        assert!(!board.escapes_horizontally(&above));

        let left = Aabb::from_center_size(Vec2::new(-95.0, 0.0), Vec2::splat(20.0));
        assert!(board.escapes_horizontally(&left));
    }

    #[test]
    fn test_parse_partial_layout() {
        let layout = FieldLayout::from_ron_str(
            "(board: (min: (-100.0, -50.0), max: (100.0, 50.0)), walls: Some((top_y: 50.0, bottom_y: -50.0)))",
        )
        .unwrap();
        assert_eq!(layout.board.size(), Vec2::new(200.0, 100.0));
        assert_eq!(layout.paddle_range(), (-50.0, 50.0));
        assert_eq!(layout.ball_radius, Some(3.0));
    }

    #[test]
    fn test_inverted_walls_rejected() {
        let err = FieldLayout::from_ron_str("(walls: Some((top_y: -10.0, bottom_y: 10.0)))")
            .unwrap_err();
        assert!(matches!(err, LayoutError::Invalid(_)));
    }

    #[test]
    fn test_unknown_player_rejected() {
        let err = FieldLayout::from_ron_str("(paddles: [(player: 2, x: 0.0, y: 0.0)])").unwrap_err();
        assert!(matches!(err, LayoutError::Invalid(_)));
    }

    #[test]
    fn test_duplicate_player_rejected() {
        let err = FieldLayout::from_ron_str(
            "(paddles: [(player: 0, x: -90.0, y: 0.0), (player: 0, x: 90.0, y: 0.0)])",
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::Invalid(_)));
    }

    #[test]
    fn test_malformed_layout_is_parse_error() {
        let err = FieldLayout::from_ron_str("(board: oops)").unwrap_err();
        assert!(matches!(err, LayoutError::Parse(_)));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FieldLayout::load("/definitely/not/here.ron").unwrap_err();
        assert!(matches!(err, LayoutError::Io { .. }));
    }
}
