use serde::{Deserialize, Serialize};

use crate::board::{Board, DropError, Player};
use crate::rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    NotStarted,
    InProgress,
    Won(Player),
    Draw,
}

/// The single most recent move, kept for exactly one level of undo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastMove {
    pub column: usize,
    pub row: usize,
    pub player: Player,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    Placed { row: usize },
    Won { row: usize },
    Drawn { row: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejected {
    NotInProgress,
    InvalidColumn,
    ColumnFull,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoRejected {
    NotInProgress,
    NothingToUndo,
}

/// Read-only view of the match for the presentation layer. The board is
/// row-major with the bottom row first; cells hold 0 or a player index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub board: Vec<Vec<u8>>,
    pub status: MatchStatus,
    pub current_player: Player,
    pub turn_count: u32,
    pub last_move: Option<LastMove>,
}

/// The rules core of one match: board occupancy, whose turn it is, and how
/// the match ends. Everything else (move recording, replay pacing, modal
/// visibility, result reporting) is layered on top by the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchCore {
    board: Board,
    status: MatchStatus,
    current_player: Player,
    turn_count: u32,
    last_move: Option<LastMove>,
}

impl MatchCore {
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            status: MatchStatus::NotStarted,
            current_player: Player::One,
            turn_count: 0,
            last_move: None,
        }
    }

    /// Clear the board and hand the first turn to player one.
    pub fn reset(&mut self) {
        *self = Self::new();
        self.status = MatchStatus::InProgress;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> MatchStatus {
        self.status
    }

    pub fn current_player(&self) -> Player {
        self.current_player
    }

    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn last_move(&self) -> Option<LastMove> {
        self.last_move
    }

    /// Drop the current player's piece into a column and settle the
    /// consequences: a completed line ends the match in a win, a full board
    /// without one ends it in a draw, anything else passes the turn.
    /// The turn counter always ends up equal to the number of completed
    /// moves, terminal moves included.
    pub fn apply_move(&mut self, col: usize) -> Result<MoveOutcome, MoveRejected> {
        if self.status != MatchStatus::InProgress {
            return Err(MoveRejected::NotInProgress);
        }

        let player = self.current_player;
        let row = self.board.drop_piece(col, player).map_err(|e| match e {
            DropError::InvalidColumn => MoveRejected::InvalidColumn,
            DropError::ColumnFull => MoveRejected::ColumnFull,
        })?;

        self.last_move = Some(LastMove {
            column: col,
            row,
            player,
        });
        self.turn_count += 1;

        if rules::wins_at(&self.board, col, row, player) {
            self.status = MatchStatus::Won(player);
            return Ok(MoveOutcome::Won { row });
        }

        // Draw when the 42nd piece lands and completes no line.
        if self.board.is_full() {
            self.status = MatchStatus::Draw;
            return Ok(MoveOutcome::Drawn { row });
        }

        self.current_player = player.other();
        Ok(MoveOutcome::Placed { row })
    }

    /// Exact inverse of the immediately preceding `apply_move`. Only one
    /// level deep: the last-move slot is cleared, so a second consecutive
    /// undo has nothing to act on.
    pub fn undo_move(&mut self) -> Result<LastMove, UndoRejected> {
        if self.status != MatchStatus::InProgress {
            return Err(UndoRejected::NotInProgress);
        }
        let Some(last) = self.last_move else {
            return Err(UndoRejected::NothingToUndo);
        };

        self.board.remove_top(last.column);
        self.current_player = last.player;
        self.turn_count -= 1;
        self.last_move = None;
        Ok(last)
    }

    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            board: self.board.rows(),
            status: self.status,
            current_player: self.current_player,
            turn_count: self.turn_count,
            last_move: self.last_move,
        }
    }
}

impl Default for MatchCore {
    fn default() -> Self {
        Self::new()
    }
}
