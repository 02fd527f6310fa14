use std::fmt;

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this frame
    pub now: f32, // Total elapsed time
    pub frame: u64,
}

impl Time {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, dt: f32) {
        self.dt = dt;
        self.now += dt;
        self.frame += 1;
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 0.0,
            now: 0.0,
            frame: 0,
        }
    }
}

/// Player side. Left is player 0, right is player 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Who scores when the ball leaves the field at horizontal position `x`.
    /// Leaving on the left (negative x) is a point for the right player.
    pub fn scoring_for_exit_x(x: f32) -> Self {
        if x < 0.0 {
            Side::Right
        } else {
            Side::Left
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// Score and ball-reset request for the current match
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchState {
    pub score_left: u32,
    pub score_right: u32,
    pub pending_reset: bool,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one point for `side` and ask for a ball reset.
    pub fn award(&mut self, side: Side) {
        match side {
            Side::Left => self.score_left += 1,
            Side::Right => self.score_right += 1,
        }
        self.pending_reset = true;
    }

    pub fn score(&self, side: Side) -> u32 {
        match side {
            Side::Left => self.score_left,
            Side::Right => self.score_right,
        }
    }

    pub fn total_points(&self) -> u32 {
        self.score_left + self.score_right
    }

    /// Read and clear the reset request.
    pub fn take_pending_reset(&mut self) -> bool {
        std::mem::take(&mut self.pending_reset)
    }

    pub fn has_winner(&self, win_score: u32) -> Option<Side> {
        if self.score_left >= win_score {
            Some(Side::Left)
        } else if self.score_right >= win_score {
            Some(Side::Right)
        } else {
            None
        }
    }
}

/// What happened during the last frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Events {
    pub points: Vec<Side>,
    pub ball_reset: bool,
    pub served: bool,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.points.clear();
        self.ball_reset = false;
        self.served = false;
    }

    pub fn scored(&self, side: Side) -> bool {
        self.points.contains(&side)
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_side_mapping() {
        assert_eq!(Side::scoring_for_exit_x(-105.0), Side::Right);
        assert_eq!(Side::scoring_for_exit_x(-0.001), Side::Right);
        assert_eq!(Side::scoring_for_exit_x(0.0), Side::Left);
        assert_eq!(Side::scoring_for_exit_x(105.0), Side::Left);
    }

    #[test]
    fn test_award_increments_one_side() {
        let mut state = MatchState::new();
        state.award(Side::Right);
        assert_eq!(state.score_left, 0);
        assert_eq!(state.score_right, 1);
        assert!(state.pending_reset);
    }

    #[test]
    fn test_total_points_counts_every_award() {
        let mut state = MatchState::new();
        for i in 0..25 {
            let side = if i % 3 == 0 { Side::Left } else { Side::Right };
            state.award(side);
        }
        assert_eq!(state.total_points(), 25);
        assert_eq!(state.score(Side::Left), 9);
        assert_eq!(state.score(Side::Right), 16);
    }

    #[test]
    fn test_take_pending_reset_clears_flag() {
        let mut state = MatchState::new();
        state.award(Side::Left);
        assert!(state.take_pending_reset());
        assert!(!state.take_pending_reset());
        assert!(!state.pending_reset);
    }

    #[test]
    fn test_time_advance() {
        let mut time = Time::new();
        time.advance(0.5);
        time.advance(0.25);
        assert_eq!(time.dt, 0.25);
        assert_eq!(time.now, 0.75);
        assert_eq!(time.frame, 2);
    }

    #[test]
    fn test_events_clear() {
        let mut events = Events::new();
        events.points.push(Side::Left);
        events.ball_reset = true;
        events.served = true;

        events.clear();

        assert!(!events.scored(Side::Left));
        assert!(!events.ball_reset);
        assert!(!events.served);
    }

    #[test]
    fn test_has_winner() {
        let mut state = MatchState::new();
        for _ in 0..4 {
            state.award(Side::Right);
        }
        assert_eq!(state.has_winner(5), None);
        state.award(Side::Right);
        assert_eq!(state.has_winner(5), Some(Side::Right));
    }
}
