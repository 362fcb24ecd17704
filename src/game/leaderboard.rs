//! Ranked leaderboard derivation

use std::collections::HashMap;

use uuid::Uuid;

use crate::game::constants::LEADERBOARD_SIZE;
use crate::game::display_name;
use crate::game::world::PlayerState;
use crate::ws::protocol::LeaderboardEntry;

/// Derive the top-N leaderboard from current player stats.
/// Pure function; the result is not mutated between recomputations.
pub fn rank(players: &HashMap<Uuid, PlayerState>) -> Vec<LeaderboardEntry> {
    let mut entries: Vec<LeaderboardEntry> = players
        .values()
        .map(|p| LeaderboardEntry {
            id: p.id,
            name: display_name(&p.id),
            score: p.score,
            kills: p.kills,
            deaths: p.deaths,
        })
        .collect();

    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries.truncate(LEADERBOARD_SIZE);
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player_with_score(score: u32) -> PlayerState {
        let mut p = PlayerState::stub();
        p.score = score;
        p
    }

    #[test]
    fn sorted_by_score_descending() {
        let mut players = HashMap::new();
        for score in [5, 30, 0, 12] {
            let p = player_with_score(score);
            players.insert(p.id, p);
        }

        let board = rank(&players);
        assert_eq!(board.len(), 4);
        for pair in board.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
        assert_eq!(board[0].score, 30);
    }

    #[test]
    fn truncated_to_top_ten() {
        let mut players = HashMap::new();
        for score in 0..15 {
            let p = player_with_score(score);
            players.insert(p.id, p);
        }

        let board = rank(&players);
        assert_eq!(board.len(), LEADERBOARD_SIZE);
        // The lowest five scores fell off
        assert!(board.iter().all(|e| e.score >= 5));
    }

    #[test]
    fn entries_carry_display_names() {
        let p = player_with_score(1);
        let id = p.id;
        let mut players = HashMap::new();
        players.insert(id, p);

        let board = rank(&players);
        assert_eq!(board[0].name, format!("Player_{}", &id.to_string()[..8]));
    }
}
