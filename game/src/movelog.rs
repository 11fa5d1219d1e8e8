use engine::store::{KvStore, MemoryStore};

use crate::board::{COLS, Player};

pub type GameId = u32;

/// One completed move, as recorded for undo, replay, and result reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRecord {
    pub game_id: GameId,
    pub turn: u32,
    pub player: Player,
    pub column: usize,
}

fn record_key(game_id: GameId, turn: u32) -> String {
    format!("{game_id}.{turn}")
}

fn encode_value(player: Player, column: usize) -> String {
    format!("{}.{}", player.index(), column)
}

fn decode_value(value: &str) -> Option<(Player, usize)> {
    let (player, column) = value.split_once('.')?;
    let player = Player::from_index(player.parse().ok()?)?;
    let column: usize = column.parse().ok()?;
    if column >= COLS {
        return None;
    }
    Some((player, column))
}

/// Append-only per-game move record, backed by whatever key-value store is
/// available. Records live under `"{game_id}.{turn}"` keys so one store can
/// hold any number of finished games side by side.
pub struct MoveLog {
    store: Box<dyn KvStore>,
}

impl MoveLog {
    pub fn new(store: Box<dyn KvStore>) -> Self {
        Self { store }
    }

    /// A log that never leaves the process. Also the degraded mode when no
    /// persistent store is reachable: undo and same-session replay still
    /// work.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStore::new()))
    }

    pub fn append(&mut self, record: MoveRecord) {
        self.store.set(
            &record_key(record.game_id, record.turn),
            &encode_value(record.player, record.column),
        );
    }

    /// Drop the most recent record of a game, if any.
    pub fn remove_last(&mut self, game_id: GameId) {
        let count = self.count(game_id);
        if count > 0 {
            self.store.remove(&record_key(game_id, count - 1));
        }
    }

    /// All records of a game in turn order. Reading probes ascending turn
    /// keys and stops at the first gap, so a truncated or corrupted tail
    /// simply ends the sequence early instead of failing.
    pub fn read_all(&self, game_id: GameId) -> Vec<MoveRecord> {
        let mut records = Vec::new();
        for turn in 0.. {
            let Some(value) = self.store.get(&record_key(game_id, turn)) else {
                break;
            };
            let Some((player, column)) = decode_value(&value) else {
                break;
            };
            records.push(MoveRecord {
                game_id,
                turn,
                player,
                column,
            });
        }
        records
    }

    /// Purge every record of a game. Game ids restart from zero each
    /// process run, so a recycled id must not inherit a previous run's
    /// moves.
    pub fn clear_game(&mut self, game_id: GameId) {
        for turn in 0.. {
            let key = record_key(game_id, turn);
            if self.store.get(&key).is_none() {
                break;
            }
            self.store.remove(&key);
        }
    }

    fn count(&self, game_id: GameId) -> u32 {
        let mut count = 0;
        while self.store.get(&record_key(game_id, count)).is_some() {
            count += 1;
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(game_id: GameId, turn: u32, player: Player, column: usize) -> MoveRecord {
        MoveRecord {
            game_id,
            turn,
            player,
            column,
        }
    }

    #[test]
    fn values_encode_player_and_column() {
        assert_eq!(encode_value(Player::One, 3), "1.3");
        assert_eq!(encode_value(Player::Two, 6), "2.6");

        assert_eq!(decode_value("1.3"), Some((Player::One, 3)));
        assert_eq!(decode_value("2.0"), Some((Player::Two, 0)));
    }

    #[test]
    fn decode_rejects_malformed_values() {
        assert_eq!(decode_value(""), None);
        assert_eq!(decode_value("1"), None);
        assert_eq!(decode_value("3.0"), None);
        assert_eq!(decode_value("1.7"), None);
        assert_eq!(decode_value("one.two"), None);
    }

    #[test]
    fn records_read_back_in_turn_order() {
        let mut log = MoveLog::in_memory();
        log.append(record(1, 0, Player::One, 3));
        log.append(record(1, 1, Player::Two, 4));
        log.append(record(2, 0, Player::One, 0));

        assert_eq!(
            log.read_all(1),
            vec![record(1, 0, Player::One, 3), record(1, 1, Player::Two, 4)]
        );
        assert_eq!(log.read_all(2), vec![record(2, 0, Player::One, 0)]);
        assert_eq!(log.read_all(3), Vec::new());
    }

    #[test]
    fn remove_last_drops_only_the_newest_record() {
        let mut log = MoveLog::in_memory();
        log.append(record(1, 0, Player::One, 3));
        log.append(record(1, 1, Player::Two, 4));

        log.remove_last(1);
        assert_eq!(log.read_all(1), vec![record(1, 0, Player::One, 3)]);

        log.remove_last(1);
        assert_eq!(log.read_all(1), Vec::new());

        // Removing from an empty game is a no-op.
        log.remove_last(1);
        assert_eq!(log.read_all(1), Vec::new());
    }

    #[test]
    fn clear_game_purges_a_recycled_id() {
        let mut log = MoveLog::in_memory();
        for turn in 0..5 {
            log.append(record(1, turn, Player::One, 0));
        }
        log.append(record(2, 0, Player::Two, 6));

        log.clear_game(1);
        assert_eq!(log.read_all(1), Vec::new());
        assert_eq!(log.read_all(2), vec![record(2, 0, Player::Two, 6)]);
    }
}
