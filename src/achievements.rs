//! Achievements and statistics for human-versus-AI matches.
//!
//! `Progress` is plain data: it is evaluated against a finished `Game` and
//! serialised by whoever owns the progress file. Seat 0 is the human and
//! seat 1 the AI, as in the interactive front-end.
use crate::ai::AiPolicy;
use crate::engine::{Game, Winner};
use crate::player::HistoryEntry;
use log::{info, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const SKIN_OF_YOUR_TEETH: &str = "By the Skin of Your Teeth";
pub const DOMINATING_VICTORY: &str = "Dominating Victory";
pub const COMEBACK_KING: &str = "Comeback King";

/// Achievement names with their descriptions.
pub const ACHIEVEMENTS: [(&str, &str); 3] = [
    (
        SKIN_OF_YOUR_TEETH,
        "Win against AI with 100 or fewer points more than the AI",
    ),
    (DOMINATING_VICTORY, "Win with more than double the AI's points"),
    (COMEBACK_KING, "Win after being behind by 500+ points"),
];

pub const WINS_AGAINST_AGGRESSIVE: &str = "Wins against Aggressive AI";
pub const WINS_AGAINST_CAUTIOUS: &str = "Wins against Cautious AI";
pub const WINS_AGAINST_ADAPTIVE: &str = "Wins against Adaptive AI";
pub const TOTAL_WINS: &str = "Total Wins against AI";
pub const TOTAL_GAMES: &str = "Total number of Games against AI";

pub const STATISTICS: [&str; 5] = [
    WINS_AGAINST_AGGRESSIVE,
    WINS_AGAINST_CAUTIOUS,
    WINS_AGAINST_ADAPTIVE,
    TOTAL_WINS,
    TOTAL_GAMES,
];

fn wins_key(policy: AiPolicy) -> &'static str {
    match policy {
        AiPolicy::Aggressive => WINS_AGAINST_AGGRESSIVE,
        AiPolicy::Cautious => WINS_AGAINST_CAUTIOUS,
        AiPolicy::Adaptive => WINS_AGAINST_ADAPTIVE,
    }
}

/// Unlocked achievements and statistic counters, as stored in the progress
/// file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Progress {
    pub achievements: BTreeMap<String, bool>,
    pub statistics: BTreeMap<String, u32>,
}

impl Default for Progress {
    fn default() -> Self {
        Progress {
            achievements: ACHIEVEMENTS
                .iter()
                .map(|(name, _)| (name.to_string(), false))
                .collect(),
            statistics: STATISTICS.iter().map(|key| (key.to_string(), 0)).collect(),
        }
    }
}

impl Progress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fills in missing entries with defaults and drops unknown ones, so a
    /// snapshot written by another version loads cleanly.
    pub fn normalize(&mut self) {
        self.achievements
            .retain(|name, _| ACHIEVEMENTS.iter().any(|(known, _)| *known == name.as_str()));
        self.statistics
            .retain(|key, _| STATISTICS.contains(&key.as_str()));
        for (name, _) in ACHIEVEMENTS {
            self.achievements.entry(name.to_string()).or_insert(false);
        }
        for key in STATISTICS {
            self.statistics.entry(key.to_string()).or_insert(0);
        }
    }

    pub fn is_unlocked(&self, name: &str) -> bool {
        self.achievements.get(name).copied().unwrap_or(false)
    }

    pub fn count(&self, key: &str) -> Option<u32> {
        self.statistics.get(key).copied()
    }

    /// Increments a statistic. Unknown keys are logged and ignored.
    pub fn record(&mut self, key: &str) -> bool {
        match self.statistics.get_mut(key) {
            Some(count) => {
                *count += 1;
                true
            }
            None => {
                warn!("statistic key '{}' not found", key);
                false
            }
        }
    }

    fn unlock(&mut self, name: &'static str, unlocked: &mut Vec<&'static str>) {
        if !self.is_unlocked(name) {
            self.achievements.insert(name.to_string(), true);
            info!("achievement unlocked: {}", name);
            unlocked.push(name);
        }
    }

    /// Unlocks whatever the final scores earn the human.
    ///
    /// `human_history` is the human's turn history; the comeback check
    /// compares the AI's final score against the human's second-to-last
    /// entry (or the human's final score when the history is shorter).
    ///
    /// # Returns
    /// The achievements unlocked by this call.
    pub fn check_achievements(
        &mut self,
        human_score: i32,
        ai_score: i32,
        human_history: &[HistoryEntry],
        win_threshold: i32,
    ) -> Vec<&'static str> {
        let mut unlocked = Vec::new();
        let won = human_score > ai_score;

        if won && human_score - ai_score <= 100 {
            self.unlock(SKIN_OF_YOUR_TEETH, &mut unlocked);
        }
        if won && human_score >= ai_score * 2 {
            self.unlock(DOMINATING_VICTORY, &mut unlocked);
        }
        let previous = match human_history.len() {
            n if n >= 2 => human_history[n - 2].points,
            _ => human_score,
        };
        if won && ai_score - previous >= 500 && ai_score > win_threshold {
            self.unlock(COMEBACK_KING, &mut unlocked);
        }
        unlocked
    }

    /// End-of-match bookkeeping for a finished game with an AI in seat 1.
    ///
    /// Counts the game, counts a human win against that policy, and checks
    /// achievements when seat 0 is human. Does nothing while the match is
    /// still running or when seat 1 is human.
    pub fn record_match<R: Rng>(&mut self, game: &Game<R>) -> Vec<&'static str> {
        let Some(result) = game.winner_result() else {
            return Vec::new();
        };
        let Some(policy) = game.player(1).policy() else {
            return Vec::new();
        };

        self.record(TOTAL_GAMES);
        if result.winner == Winner::Player(0) {
            self.record(TOTAL_WINS);
            self.record(wins_key(policy));
        }

        if game.player(0).is_ai() {
            return Vec::new();
        }
        self.check_achievements(
            result.scores[0],
            result.scores[1],
            game.history(0),
            game.win_threshold(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Player;

    #[test]
    fn test_default_progress_has_every_key() {
        let progress = Progress::new();
        assert_eq!(progress.achievements.len(), 3);
        assert_eq!(progress.statistics.len(), 5);
        assert!(!progress.is_unlocked(COMEBACK_KING));
        assert_eq!(progress.count(TOTAL_GAMES), Some(0));
        assert_eq!(progress.count("Games on the Moon"), None);
    }

    #[test]
    fn test_record_unknown_key_is_a_no_op() {
        let mut progress = Progress::new();
        assert!(progress.record(TOTAL_WINS));
        assert!(!progress.record("Wins against Nobody"));
        assert_eq!(progress.count(TOTAL_WINS), Some(1));
        assert_eq!(progress.statistics.len(), 5);
    }

    #[test]
    fn test_close_win() {
        let mut progress = Progress::new();
        let unlocked = progress.check_achievements(10050, 9980, &[], 10000);
        assert_eq!(unlocked, vec![SKIN_OF_YOUR_TEETH]);
        // Already unlocked: not reported again.
        assert!(progress
            .check_achievements(10050, 9980, &[], 10000)
            .is_empty());
    }

    #[test]
    fn test_dominating_win() {
        let mut progress = Progress::new();
        assert_eq!(
            progress.check_achievements(10000, 5000, &[], 10000),
            vec![DOMINATING_VICTORY]
        );
        let mut progress = Progress::new();
        assert!(progress.check_achievements(6000, 7000, &[], 5000).is_empty());
    }

    #[test]
    fn test_comeback() {
        let history = [
            HistoryEntry::banked(500),
            HistoryEntry::banked(300),
            HistoryEntry::banked(9900),
        ];
        let mut progress = Progress::new();
        let unlocked = progress.check_achievements(10700, 10200, &history, 10000);
        assert_eq!(unlocked, vec![COMEBACK_KING]);

        // AI never got past the threshold.
        let mut progress = Progress::new();
        assert!(progress
            .check_achievements(10700, 9800, &history, 10000)
            .is_empty());
    }

    #[test]
    fn test_normalize_fills_and_drops() {
        let json = r#"{"achievements":{"Comeback King":true,"Old Badge":true},"statistics":{"Total Wins against AI":4}}"#;
        let mut progress: Progress = serde_json::from_str(json).unwrap();
        progress.normalize();
        assert!(progress.is_unlocked(COMEBACK_KING));
        assert!(!progress.achievements.contains_key("Old Badge"));
        assert_eq!(progress.achievements.len(), 3);
        assert_eq!(progress.count(TOTAL_WINS), Some(4));
        assert_eq!(progress.count(TOTAL_GAMES), Some(0));

        let empty: Progress = serde_json::from_str("{}").unwrap();
        assert_eq!(empty, Progress::new());
    }

    #[test]
    fn test_record_match_against_ai() {
        let mut game = Game::with_seed(6);
        game.set_win_threshold(1000).unwrap();
        game.set_player(1, Player::ai(AiPolicy::Cautious));

        let mut progress = Progress::new();
        assert!(progress.record_match(&game).is_empty());
        assert_eq!(progress.count(TOTAL_GAMES), Some(0));

        // Human banks 1000 with three 1s; the AI then plays its final turn.
        game.roll_with_faces(&[1, 1, 1, 2, 3, 4]).unwrap();
        assert!(game.toggle_combination(0));
        assert!(game.bank());
        while !game.is_game_over() {
            crate::ai::play_turn(&mut game).unwrap();
        }

        progress.record_match(&game);
        assert_eq!(progress.count(TOTAL_GAMES), Some(1));
        let human_won = game.winner_result().unwrap().winner == Winner::Player(0);
        let wins = if human_won { 1 } else { 0 };
        assert_eq!(progress.count(TOTAL_WINS), Some(wins));
        assert_eq!(progress.count(WINS_AGAINST_CAUTIOUS), Some(wins));
        assert_eq!(progress.count(WINS_AGAINST_ADAPTIVE), Some(0));
    }

    #[test]
    fn test_record_match_ignores_human_opponent() {
        let mut game = Game::with_seed(7);
        game.set_win_threshold(1000).unwrap();
        game.roll_with_faces(&[1, 1, 1, 2, 3, 4]).unwrap();
        assert!(game.toggle_combination(0));
        assert!(game.bank());
        game.roll_with_faces(&[2, 2, 2, 3, 4, 6]).unwrap();
        assert!(game.toggle_combination(0));
        game.roll_with_faces(&[2, 3, 4]).unwrap();
        assert!(game.is_game_over());

        let mut progress = Progress::new();
        assert!(progress.record_match(&game).is_empty());
        assert_eq!(progress, Progress::new());
    }
}
