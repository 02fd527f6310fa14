use tracing::info;

/// Consumer of the two score values, refreshed once per frame.
pub trait ScoreDisplay {
    fn show(&mut self, left: u32, right: u32);
}

/// Writes the score to the log whenever it changes.
#[derive(Debug, Default)]
pub struct LogScoreDisplay {
    last: Option<(u32, u32)>,
}

impl LogScoreDisplay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_shown(&self) -> Option<(u32, u32)> {
        self.last
    }
}

impl ScoreDisplay for LogScoreDisplay {
    fn show(&mut self, left: u32, right: u32) {
        if self.last != Some((left, right)) {
            info!(left, right, "score");
            self.last = Some((left, right));
        }
    }
}
