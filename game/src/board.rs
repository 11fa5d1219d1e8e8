use serde::{Deserialize, Serialize};

pub const COLS: usize = 7;
pub const ROWS: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn index(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }

    pub fn from_index(index: u8) -> Option<Player> {
        match index {
            1 => Some(Player::One),
            2 => Some(Player::Two),
            _ => None,
        }
    }

    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Taken(Player),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropError {
    InvalidColumn,
    ColumnFull,
}

/// The 7x6 occupancy grid. Column-major, row 0 at the bottom: the first
/// piece dropped into a column lands at row 0 and later pieces stack upward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; ROWS]; COLS],
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; ROWS]; COLS],
        }
    }

    /// Read-only lookup. Out-of-range coordinates read as empty so scan code
    /// never has to special-case the board edge.
    pub fn occupant(&self, col: usize, row: usize) -> Cell {
        if col >= COLS || row >= ROWS {
            return Cell::Empty;
        }
        self.cells[col][row]
    }

    /// Number of pieces stacked in a column.
    pub fn column_height(&self, col: usize) -> usize {
        if col >= COLS {
            return 0;
        }
        (0..ROWS)
            .take_while(|&row| self.cells[col][row] != Cell::Empty)
            .count()
    }

    /// Drop a piece into a column; returns the row it landed in.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, DropError> {
        if col >= COLS {
            return Err(DropError::InvalidColumn);
        }
        let row = self.column_height(col);
        if row >= ROWS {
            return Err(DropError::ColumnFull);
        }
        self.cells[col][row] = Cell::Taken(player);
        Ok(row)
    }

    /// Remove and return the topmost piece of a column. Used only by undo.
    pub fn remove_top(&mut self, col: usize) -> Option<Player> {
        if col >= COLS {
            return None;
        }
        let height = self.column_height(col);
        if height == 0 {
            return None;
        }
        let Cell::Taken(player) = self.cells[col][height - 1] else {
            return None;
        };
        self.cells[col][height - 1] = Cell::Empty;
        Some(player)
    }

    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.column_height(col) == ROWS)
    }

    /// Row-major view for snapshots, bottom row first: 0 for empty cells,
    /// otherwise the occupying player's index.
    pub fn rows(&self) -> Vec<Vec<u8>> {
        (0..ROWS)
            .map(|row| {
                (0..COLS)
                    .map(|col| match self.cells[col][row] {
                        Cell::Empty => 0,
                        Cell::Taken(player) => player.index(),
                    })
                    .collect()
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                assert_eq!(board.occupant(col, row), Cell::Empty);
            }
        }
        assert!(!board.is_full());
    }

    #[test]
    fn pieces_land_at_the_bottom_and_stack_upward() {
        let mut board = Board::new();

        assert_eq!(board.drop_piece(3, Player::One), Ok(0));
        assert_eq!(board.drop_piece(3, Player::Two), Ok(1));

        assert_eq!(board.occupant(3, 0), Cell::Taken(Player::One));
        assert_eq!(board.occupant(3, 1), Cell::Taken(Player::Two));
        assert_eq!(board.column_height(3), 2);
    }

    #[test]
    fn drop_rejects_out_of_range_columns() {
        let mut board = Board::new();
        assert_eq!(board.drop_piece(COLS, Player::One), Err(DropError::InvalidColumn));
    }

    #[test]
    fn drop_rejects_a_full_column_without_mutating_it() {
        let mut board = Board::new();
        for _ in 0..ROWS {
            board.drop_piece(0, Player::One).expect("column has room");
        }

        let before = board;
        assert_eq!(board.drop_piece(0, Player::Two), Err(DropError::ColumnFull));
        assert_eq!(board, before);
    }

    #[test]
    fn remove_top_returns_the_most_recent_piece() {
        let mut board = Board::new();
        board.drop_piece(2, Player::One).expect("drop");
        board.drop_piece(2, Player::Two).expect("drop");

        assert_eq!(board.remove_top(2), Some(Player::Two));
        assert_eq!(board.column_height(2), 1);
        assert_eq!(board.occupant(2, 1), Cell::Empty);
    }

    #[test]
    fn remove_top_of_an_empty_column_is_none() {
        let mut board = Board::new();
        assert_eq!(board.remove_top(4), None);
        assert_eq!(board.remove_top(COLS + 1), None);
    }

    #[test]
    fn board_fills_after_forty_two_pieces() {
        let mut board = Board::new();
        for col in 0..COLS {
            for _ in 0..ROWS {
                board.drop_piece(col, Player::One).expect("room");
            }
        }
        assert!(board.is_full());
    }

    #[test]
    fn rows_view_reports_player_indices_bottom_first() {
        let mut board = Board::new();
        board.drop_piece(0, Player::One).expect("drop");
        board.drop_piece(0, Player::Two).expect("drop");
        board.drop_piece(6, Player::Two).expect("drop");

        let rows = board.rows();
        assert_eq!(rows.len(), ROWS);
        assert_eq!(rows[0][0], 1);
        assert_eq!(rows[1][0], 2);
        assert_eq!(rows[0][6], 2);
        assert_eq!(rows[0][3], 0);
    }
}
