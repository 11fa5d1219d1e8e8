use std::time::Duration;

use engine::store::KvStore;
use serde::Serialize;

use crate::match_core::{MatchCore, MatchSnapshot, MatchStatus, MoveOutcome};
use crate::movelog::{GameId, MoveLog, MoveRecord};
use crate::replay::{REPLAY_STEP, ReplayDriver};
use crate::report::{GameReport, NullSink, ResultSink};
use crate::view::{Modal, ModalEvent};

/// Read-only view of the whole session for the host shell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub game_id: GameId,
    pub modal: Modal,
    pub replaying: bool,
    pub state: MatchSnapshot,
}

/// The embedded game engine a host UI shell drives.
///
/// Owns the match core, the per-game move log, the modal visibility signal,
/// and at most one replay run. Every operation is a silent no-op on invalid
/// input: callers may poke speculatively and compare snapshots to learn
/// whether anything happened. All mutation is synchronous inside these
/// methods; the only pacing is the replay timer pumped through `tick`.
pub struct GameSession {
    core: MatchCore,
    log: MoveLog,
    modal: Modal,
    game_id: GameId,
    next_game_id: GameId,
    replay: Option<ReplayDriver>,
    replay_step: Duration,
    sink: Box<dyn ResultSink>,
}

impl GameSession {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self::with_log(MoveLog::new(store))
    }

    /// A session whose move log never leaves the process.
    pub fn in_memory() -> Self {
        Self::with_log(MoveLog::in_memory())
    }

    fn with_log(log: MoveLog) -> Self {
        Self {
            core: MatchCore::new(),
            log,
            modal: Modal::default(),
            game_id: 0,
            next_game_id: 0,
            replay: None,
            replay_step: REPLAY_STEP,
            sink: Box::new(NullSink),
        }
    }

    pub fn with_sink(mut self, sink: Box<dyn ResultSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn with_replay_step(mut self, step: Duration) -> Self {
        self.replay_step = step;
        self
    }

    /// Start a fresh playthrough: new game id, cleared board, player one to
    /// move. Any running replay is abandoned, and records a previous run
    /// left under the recycled id are purged before the first move lands.
    pub fn begin_game(&mut self) {
        self.next_game_id += 1;
        self.game_id = self.next_game_id;
        self.replay = None;
        self.core.reset();
        self.log.clear_game(self.game_id);
    }

    /// `begin_game` plus the visibility signal: whatever modal was up comes
    /// down.
    pub fn restart(&mut self) {
        self.begin_game();
        self.modal = self.modal.handle(ModalEvent::Dismissed);
    }

    /// Drop the current player's piece into `col`. No-op unless a live game
    /// is in progress; replayed games are driven internally by `tick`, never
    /// through here.
    pub fn make_move(&mut self, col: usize) {
        if self.replay.is_some() {
            return;
        }

        let player = self.core.current_player();
        let turn = self.core.turn_count();
        let Ok(outcome) = self.core.apply_move(col) else {
            return;
        };

        self.log.append(MoveRecord {
            game_id: self.game_id,
            turn,
            player,
            column: col,
        });

        match outcome {
            MoveOutcome::Placed { .. } => {}
            MoveOutcome::Won { .. } => self.finish(ModalEvent::GameWon),
            MoveOutcome::Drawn { .. } => self.finish(ModalEvent::GameDrawn),
        }
    }

    /// Take back the most recent move. No-op unless a live game is in
    /// progress and a move is there to take back; never available twice in a
    /// row.
    pub fn undo_move(&mut self) {
        if self.replay.is_some() {
            return;
        }
        if self.core.undo_move().is_ok() {
            self.log.remove_last(self.game_id);
        }
    }

    pub fn undo_available(&self) -> bool {
        self.replay.is_none()
            && self.core.status() == MatchStatus::InProgress
            && self.core.last_move().is_some()
    }

    /// Rebuild a recorded game move by move at the replay cadence. No-op
    /// while a live game is being played, while another replay is running,
    /// or when nothing is recorded under `game_id`.
    pub fn start_replay(&mut self, game_id: GameId) {
        if self.replay.is_some() || self.core.status() == MatchStatus::InProgress {
            return;
        }
        let moves = self.log.read_all(game_id);
        if moves.is_empty() {
            return;
        }

        self.game_id = game_id;
        self.core.reset();
        self.replay = Some(ReplayDriver::with_step(moves, self.replay_step));
        self.modal = self.modal.handle(ModalEvent::ReplayStarted);
    }

    /// Stop a running replay, leaving the board in whatever partial state it
    /// reached.
    pub fn cancel_replay(&mut self) {
        if let Some(mut driver) = self.replay.take() {
            driver.cancel();
        }
    }

    /// Pump the replay pacing clock. The host shell calls this from its
    /// event loop with the elapsed time since the last call; each expiry of
    /// the replay step applies exactly one recorded move, and its win/draw
    /// check resolves before the next one is scheduled.
    pub fn tick(&mut self, dt: Duration) {
        let Some(driver) = self.replay.as_mut() else {
            return;
        };
        let delivered = driver.tick(dt);
        let done = driver.is_done();

        if let Some(record) = delivered {
            // Replayed moves re-run the full move pipeline but are already
            // recorded: nothing is appended and nothing is re-reported.
            match self.core.apply_move(record.column) {
                Ok(MoveOutcome::Won { .. }) => {
                    self.modal = self.modal.handle(ModalEvent::GameWon);
                }
                Ok(MoveOutcome::Drawn { .. }) => {
                    self.modal = self.modal.handle(ModalEvent::GameDrawn);
                }
                Ok(MoveOutcome::Placed { .. }) | Err(_) => {}
            }
        }

        if done {
            self.replay = None;
        }
    }

    pub fn dismiss_modal(&mut self) {
        self.modal = self.modal.handle(ModalEvent::Dismissed);
    }

    pub fn modal(&self) -> Modal {
        self.modal
    }

    pub fn status(&self) -> MatchStatus {
        self.core.status()
    }

    pub fn replaying(&self) -> bool {
        self.replay.is_some()
    }

    pub fn game_id(&self) -> GameId {
        self.game_id
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            game_id: self.game_id,
            modal: self.modal,
            replaying: self.replay.is_some(),
            state: self.core.snapshot(),
        }
    }

    fn finish(&mut self, event: ModalEvent) {
        self.modal = self.modal.handle(event);
        let report = GameReport::from_records(self.game_id, &self.log.read_all(self.game_id));
        self.sink.deliver(&report);
    }
}
