use tracing::{info, trace};

use crate::{
    Aabb, CollisionCategory, ContactEvent, ContactPhase, ContactQueue, MatchState, Side,
};

/// Score a single contact notification. Returns the side that scored.
///
/// Only the end of a ball/board contact counts: the ball has just
/// separated from the field rectangle.
pub fn resolve_contact(event: &ContactEvent, state: &mut MatchState) -> Option<Side> {
    if event.phase != ContactPhase::End
        || !event.is_pair(CollisionCategory::BALL, CollisionCategory::BOARD)
    {
        trace!(?event, "contact ignored");
        return None;
    }

    let side = Side::scoring_for_exit_x(event.contact_x);
    state.award(side);
    info!(%side, x = event.contact_x, left = state.score_left, right = state.score_right, "point (contact)");
    Some(side)
}

/// Drain the frame's contacts in order, scoring each ball exit.
pub fn resolve_contacts(contacts: &mut ContactQueue, state: &mut MatchState) -> Vec<Side> {
    contacts
        .drain()
        .filter_map(|event| resolve_contact(&event, state))
        .collect()
}

/// Per-frame exit test on bounding boxes. Only the left and right edges of
/// the board count; the walls keep the ball in vertically.
pub fn check_bounds(ball: &Aabb, board: &Aabb, state: &mut MatchState) -> Option<Side> {
    if !board.escapes_horizontally(ball) {
        return None;
    }
    let side = Side::scoring_for_exit_x(ball.center().x);
    state.award(side);
    info!(%side, x = ball.center().x, left = state.score_left, right = state.score_right, "point (bounds)");
    Some(side)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn exit_event(x: f32) -> ContactEvent {
        ContactEvent::new(
            CollisionCategory::BALL,
            CollisionCategory::BOARD,
            x,
            ContactPhase::End,
        )
    }

    fn board() -> Aabb {
        Aabb::new(Vec2::new(-100.0, -60.0), Vec2::new(100.0, 60.0))
    }

    fn ball_at(x: f32, y: f32) -> Aabb {
        Aabb::from_center_size(Vec2::new(x, y), Vec2::splat(6.0))
    }

    #[test]
    fn test_right_player_scores_when_ball_exits_left() {
        let mut state = MatchState::new();
        assert_eq!(resolve_contact(&exit_event(-101.0), &mut state), Some(Side::Right));
        assert_eq!((state.score_left, state.score_right), (0, 1));
        assert!(state.pending_reset);
    }

    #[test]
    fn test_left_player_scores_when_ball_exits_right() {
        let mut state = MatchState::new();
        assert_eq!(resolve_contact(&exit_event(101.0), &mut state), Some(Side::Left));
        assert_eq!((state.score_left, state.score_right), (1, 0));
    }

    #[test]
    fn test_zero_x_counts_for_left_player() {
        let mut state = MatchState::new();
        resolve_contact(&exit_event(0.0), &mut state);
        assert_eq!(state.score_left, 1);
    }

    #[test]
    fn test_pair_order_does_not_matter() {
        let mut state = MatchState::new();
        let event = ContactEvent::new(
            CollisionCategory::BOARD,
            CollisionCategory::BALL,
            -50.0,
            ContactPhase::End,
        );
        assert_eq!(resolve_contact(&event, &mut state), Some(Side::Right));
    }

    #[test]
    fn test_begin_never_scores() {
        let mut state = MatchState::new();
        let event = ContactEvent::new(
            CollisionCategory::BALL,
            CollisionCategory::BOARD,
            -101.0,
            ContactPhase::Begin,
        );
        assert_eq!(resolve_contact(&event, &mut state), None);
        assert_eq!(state, MatchState::new());
    }

    #[test]
    fn test_other_pairs_change_nothing() {
        let mut state = MatchState::new();
        for (a, b) in [
            (CollisionCategory::BALL, CollisionCategory::WALL),
            (CollisionCategory::BALL, CollisionCategory::PADDLE),
            (CollisionCategory::PADDLE, CollisionCategory::WALL),
        ] {
            let event = ContactEvent::new(a, b, -200.0, ContactPhase::End);
            assert_eq!(resolve_contact(&event, &mut state), None);
        }
        assert_eq!(state, MatchState::new());
    }

    #[test]
    fn test_every_exit_event_scores_once() {
        let mut state = MatchState::new();
        let mut queue = ContactQueue::new();
        for i in 0..10 {
            let x = if i % 2 == 0 { -120.0 } else { 120.0 };
            queue.push(exit_event(x));
        }
        assert_eq!(resolve_contacts(&mut queue, &mut state).len(), 10);
        assert_eq!(state.total_points(), 10);
        assert_eq!((state.score_left, state.score_right), (5, 5));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_bounds_ball_at_minus_105() {
        let mut state = MatchState::new();
        let board = Aabb::new(Vec2::new(-100.0, -60.0), Vec2::new(100.0, 60.0));
        assert_eq!(check_bounds(&ball_at(-105.0, 0.0), &board, &mut state), Some(Side::Right));
        assert_eq!((state.score_left, state.score_right), (0, 1));
        assert!(state.pending_reset);
    }

    #[test]
    fn test_bounds_two_left_exits() {
        let mut state = MatchState::new();
        check_bounds(&ball_at(-105.0, 0.0), &board(), &mut state);
        state.take_pending_reset();
        check_bounds(&ball_at(-105.0, 0.0), &board(), &mut state);
        assert_eq!((state.score_left, state.score_right), (0, 2));
    }

    #[test]
    fn test_bounds_partial_overhang_counts() {
        // Edge past the board while the centre is still inside
        let mut state = MatchState::new();
        assert_eq!(check_bounds(&ball_at(98.0, 0.0), &board(), &mut state), Some(Side::Left));
    }

    #[test]
    fn test_bounds_vertical_escape_ignored() {
        let mut state = MatchState::new();
        assert_eq!(check_bounds(&ball_at(0.0, 80.0), &board(), &mut state), None);
        assert_eq!(check_bounds(&ball_at(0.0, 0.0), &board(), &mut state), None);
        assert_eq!(state.total_points(), 0);
    }
}
