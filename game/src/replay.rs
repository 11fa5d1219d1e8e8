use std::time::Duration;

use engine::DelayTimer;

use crate::movelog::MoveRecord;

/// Pause between replayed moves.
pub const REPLAY_STEP: Duration = Duration::from_secs(1);

/// Paced delivery of a recorded game's moves, one per elapsed step.
///
/// Delivery is strictly sequential: the timer is re-armed only after a move
/// has been handed out, so a long stall followed by a huge `dt` still
/// releases a single move. Cancelling drops the pending delivery and leaves
/// the cursor wherever it got to.
pub struct ReplayDriver {
    moves: Vec<MoveRecord>,
    cursor: usize,
    timer: DelayTimer,
}

impl ReplayDriver {
    pub fn new(moves: Vec<MoveRecord>) -> Self {
        Self::with_step(moves, REPLAY_STEP)
    }

    pub fn with_step(moves: Vec<MoveRecord>, step: Duration) -> Self {
        let mut timer = DelayTimer::new(step);
        if !moves.is_empty() {
            timer.arm();
        }
        Self {
            moves,
            cursor: 0,
            timer,
        }
    }

    /// Advance the pacing clock; hands out the next move on the tick where
    /// the step delay expires.
    pub fn tick(&mut self, dt: Duration) -> Option<MoveRecord> {
        if !self.timer.tick(dt) {
            return None;
        }
        let record = self.moves.get(self.cursor).copied()?;
        self.cursor += 1;
        if self.cursor < self.moves.len() {
            self.timer.arm();
        }
        Some(record)
    }

    pub fn cancel(&mut self) {
        self.timer.cancel();
    }

    pub fn delivered(&self) -> usize {
        self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.cursor >= self.moves.len()
    }
}
