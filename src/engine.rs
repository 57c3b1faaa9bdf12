//! The turn controller: a two-seat Zilch match as a state machine.
//!
//! This module defines:
//! - `GameConfig`: the match settings (win threshold).
//! - `Phase`, `RollOutcome`, `TurnOutcome`, `MatchResult`: what callers observe.
//! - `Game`: owns both players, the dice, the current combination menu and the
//!   random generator, and accepts the commands `roll`, `toggle_combination`,
//!   `bank`, `restart_match` and `clear_match`.
//!
//! Illegal commands are rejected without touching any state and reported
//! through their return value.
use crate::dice::{random_face, DiceSet, NUM_DICE};
use crate::player::{HistoryEntry, Player};
use crate::scoring::{evaluate, is_zilch, Combination, CombinationKind};
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

pub const NUM_PLAYERS: usize = 2;
/// Soft points needed before a turn may be banked.
pub const BANK_MINIMUM: i32 = 300;
/// Consecutive zilches that trigger the penalty.
pub const ZILCH_STREAK_LIMIT: u8 = 3;
pub const ZILCH_PENALTY: i32 = 500;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    #[error("win threshold {0} is outside {min}..={max}", min = GameConfig::MIN_WIN_THRESHOLD, max = GameConfig::MAX_WIN_THRESHOLD)]
    ThresholdOutOfRange(i32),
    #[error("win threshold {0} is not a multiple of {step}", step = GameConfig::WIN_THRESHOLD_STEP)]
    ThresholdNotOnStep(i32),
}

/// Match settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub win_threshold: i32,
}

impl GameConfig {
    pub const DEFAULT_WIN_THRESHOLD: i32 = 10000;
    pub const MIN_WIN_THRESHOLD: i32 = 1000;
    pub const MAX_WIN_THRESHOLD: i32 = 20000;
    pub const WIN_THRESHOLD_STEP: i32 = 500;

    /// Validates a win threshold.
    ///
    /// # Examples
    /// ```
    /// use zilch::engine::{ConfigError, GameConfig};
    /// assert_eq!(GameConfig::new(2500).unwrap().win_threshold, 2500);
    /// assert_eq!(GameConfig::new(750), Err(ConfigError::ThresholdOutOfRange(750)));
    /// assert_eq!(GameConfig::new(1250), Err(ConfigError::ThresholdNotOnStep(1250)));
    /// ```
    pub fn new(win_threshold: i32) -> Result<Self, ConfigError> {
        if !(Self::MIN_WIN_THRESHOLD..=Self::MAX_WIN_THRESHOLD).contains(&win_threshold) {
            return Err(ConfigError::ThresholdOutOfRange(win_threshold));
        }
        if win_threshold % Self::WIN_THRESHOLD_STEP != 0 {
            return Err(ConfigError::ThresholdNotOnStep(win_threshold));
        }
        Ok(GameConfig { win_threshold })
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            win_threshold: Self::DEFAULT_WIN_THRESHOLD,
        }
    }
}

/// The observable phase of the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The current player may roll: first roll of the turn, or a combination
    /// has been selected from the latest roll.
    AwaitingRoll,
    /// A roll is on the table and nothing from it has been selected yet.
    AwaitingSelection,
    GameOver,
}

/// How a turn ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    Banked { player: usize, points: i32 },
    /// `penalty` is the amount taken from hard points (0 unless the streak
    /// limit was reached).
    Zilched { player: usize, penalty: i32 },
}

impl TurnOutcome {
    pub fn player(&self) -> usize {
        match *self {
            TurnOutcome::Banked { player, .. } | TurnOutcome::Zilched { player, .. } => player,
        }
    }
}

/// Result of an accepted roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollOutcome {
    /// The roll offers at least one scoring combination.
    Scoring,
    /// Nothing scored; the turn has already been committed and passed on.
    Zilched(TurnOutcome),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Winner {
    Player(usize),
    Tie,
}

/// Final standing, available once the match is over.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MatchResult {
    pub winner: Winner,
    /// Hard points by seat.
    pub scores: [i32; NUM_PLAYERS],
}

fn default_players() -> [Player; NUM_PLAYERS] {
    [Player::human("Player 1"), Player::human("Player 2")]
}

/// A two-player match.
///
/// The generator is used for every die face and every AI risk roll, so a
/// seeded `Game` replays identically.
///
/// # Examples
/// ```
/// use zilch::engine::{Game, Phase, RollOutcome};
///
/// let mut game = Game::with_seed(1);
/// assert_eq!(game.phase(), Phase::AwaitingRoll);
/// let outcome = game.roll_with_faces(&[3, 3, 3, 2, 4, 6]);
/// assert_eq!(outcome, Some(RollOutcome::Scoring));
/// assert_eq!(game.current_combinations()[0].label(), "Three 3s");
/// assert!(game.toggle_combination(0));
/// assert_eq!(game.soft_points(), 300);
/// assert!(game.bank());
/// assert_eq!(game.hard_points(0), 300);
/// assert_eq!(game.current_player_index(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Game<R: Rng = SmallRng> {
    config: GameConfig,
    players: [Player; NUM_PLAYERS],
    current: usize,
    dice: DiceSet,
    combinations: Vec<Combination>,
    selected: Vec<bool>,
    previously_held: Vec<usize>,
    rolls_this_turn: u32,
    game_over: bool,
    last_outcome: Option<TurnOutcome>,
    rng: R,
}

impl Game<SmallRng> {
    /// A match between two default human seats, seeded from entropy.
    pub fn new() -> Self {
        Game::with_rng(SmallRng::from_entropy())
    }

    /// A reproducible match: the same seed and the same commands give the
    /// same dice.
    pub fn with_seed(seed: u64) -> Self {
        Game::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl Default for Game<SmallRng> {
    fn default() -> Self {
        Game::new()
    }
}

impl<R: Rng> Game<R> {
    pub fn with_rng(rng: R) -> Self {
        Game {
            config: GameConfig::default(),
            players: default_players(),
            current: 0,
            dice: DiceSet::new(),
            combinations: Vec::new(),
            selected: Vec::new(),
            previously_held: Vec::new(),
            rolls_this_turn: 0,
            game_over: false,
            last_outcome: None,
            rng,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn win_threshold(&self) -> i32 {
        self.config.win_threshold
    }

    pub fn players(&self) -> &[Player; NUM_PLAYERS] {
        &self.players
    }

    /// # Panics
    /// If `index` is not a seat (`>= NUM_PLAYERS`).
    pub fn player(&self, index: usize) -> &Player {
        &self.players[index]
    }

    pub fn current_player_index(&self) -> usize {
        self.current
    }

    pub fn current_player(&self) -> &Player {
        &self.players[self.current]
    }

    /// Seat of the player not currently acting.
    pub fn opponent_index(&self) -> usize {
        (self.current + 1) % NUM_PLAYERS
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// The combination menu of the latest roll, in evaluation order. Empty
    /// between turns.
    pub fn current_combinations(&self) -> &[Combination] {
        &self.combinations
    }

    pub fn is_selected(&self, id: usize) -> bool {
        self.selected.get(id).copied().unwrap_or(false)
    }

    /// Ids of the combinations selected from the latest roll.
    pub fn selected_ids(&self) -> Vec<usize> {
        self.selected
            .iter()
            .enumerate()
            .filter(|&(_, &s)| s)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn any_selected(&self) -> bool {
        self.selected.iter().any(|&s| s)
    }

    /// Dice that were already held when the latest roll was thrown.
    pub fn previously_held(&self) -> &[usize] {
        &self.previously_held
    }

    /// Soft points of the player to act.
    pub fn soft_points(&self) -> i32 {
        self.players[self.current].soft_points
    }

    /// # Panics
    /// If `player` is not a seat.
    pub fn hard_points(&self, player: usize) -> i32 {
        self.players[player].hard_points
    }

    /// # Panics
    /// If `player` is not a seat.
    pub fn history(&self, player: usize) -> &[HistoryEntry] {
        &self.players[player].history
    }

    /// Rolls taken by the current player this turn.
    pub fn rolls_this_turn(&self) -> u32 {
        self.rolls_this_turn
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// The most recent bank or zilch, if any turn has ended this match.
    pub fn last_outcome(&self) -> Option<TurnOutcome> {
        self.last_outcome
    }

    pub(crate) fn rng_mut(&mut self) -> &mut R {
        &mut self.rng
    }

    /// A roll is allowed on the first roll of a turn, or once something from
    /// the latest roll has been selected.
    pub fn can_roll(&self) -> bool {
        !self.game_over && (self.players[self.current].first_roll_of_turn || self.any_selected())
    }

    pub fn can_bank(&self) -> bool {
        !self.game_over && self.any_selected() && self.soft_points() >= BANK_MINIMUM
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.can_roll() {
            Phase::AwaitingRoll
        } else {
            Phase::AwaitingSelection
        }
    }

    /// The final standing, or `None` while the match is still running.
    /// Equal hard points are reported as a tie.
    pub fn winner_result(&self) -> Option<MatchResult> {
        if !self.game_over {
            return None;
        }
        let scores = [self.players[0].hard_points, self.players[1].hard_points];
        let winner = match scores[0].cmp(&scores[1]) {
            std::cmp::Ordering::Greater => Winner::Player(0),
            std::cmp::Ordering::Less => Winner::Player(1),
            std::cmp::Ordering::Equal => Winner::Tie,
        };
        Some(MatchResult { winner, scores })
    }

    /// Rolls the unheld dice, or all six if every die is held.
    ///
    /// # Returns
    /// * `None` if the roll is not allowed (see `can_roll`); nothing changes.
    /// * `Some(RollOutcome::Scoring)` with a fresh combination menu.
    /// * `Some(RollOutcome::Zilched(..))` if nothing scored. The zilch has
    ///   already been committed and the turn passed on.
    pub fn roll(&mut self) -> Option<RollOutcome> {
        if !self.can_roll() {
            debug!("roll rejected for {}", self.players[self.current].name);
            return None;
        }
        let rng = &mut self.rng;
        let reset = self.dice.roll_with(|| random_face(&mut *rng));
        Some(self.after_roll(reset))
    }

    /// Same as `roll`, but the rerolled dice show `faces`, in index order.
    ///
    /// `faces` must hold exactly one value in `1..=6` per die being thrown
    /// (six when every die is held); anything else rejects the roll.
    pub fn roll_with_faces(&mut self, faces: &[u8]) -> Option<RollOutcome> {
        if !self.can_roll() {
            debug!("roll rejected for {}", self.players[self.current].name);
            return None;
        }
        let thrown = if self.dice.all_held() {
            NUM_DICE
        } else {
            self.dice.unheld_count()
        };
        if faces.len() != thrown || faces.iter().any(|f| !(1..=6).contains(f)) {
            warn!(
                "scripted roll {:?} does not fit {} thrown dice",
                faces, thrown
            );
            return None;
        }
        let mut script = faces.iter().copied();
        let reset = self.dice.roll_with(|| script.next().unwrap_or(1));
        Some(self.after_roll(reset))
    }

    fn after_roll(&mut self, reset: bool) -> RollOutcome {
        self.previously_held = if reset {
            Vec::new()
        } else {
            self.dice.held_indices()
        };
        self.rolls_this_turn += 1;
        self.players[self.current].first_roll_of_turn = false;
        self.combinations = evaluate(self.dice.dice());
        self.selected = vec![false; self.combinations.len()];
        debug!(
            "{} rolled {} ({} combinations)",
            self.players[self.current].name,
            self.dice,
            self.combinations.len()
        );

        if is_zilch(&self.combinations) {
            RollOutcome::Zilched(self.commit_zilch())
        } else {
            RollOutcome::Scoring
        }
    }

    /// Selects or deselects combination `id` of the latest roll.
    ///
    /// Selecting holds its dice and adds its points to the soft score;
    /// selecting it again undoes exactly that. A combination whose dice are
    /// already held (by an earlier roll or by another selection) cannot be
    /// selected.
    ///
    /// # Returns
    /// `true` if the toggle was applied.
    pub fn toggle_combination(&mut self, id: usize) -> bool {
        if self.game_over {
            return false;
        }
        let Some(combo) = self.combinations.get(id) else {
            debug!("no combination {}", id);
            return false;
        };
        if combo.kind == CombinationKind::Zilch {
            return false;
        }
        let points = combo.points;
        let dice = combo.dice.clone();
        let player = &mut self.players[self.current];

        if self.selected[id] {
            for &i in dice.iter().filter(|&&i| !self.previously_held.contains(&i)) {
                self.dice.set_held(i, false);
            }
            player.soft_points -= points;
            self.selected[id] = false;
            debug!("{} deselected {}", player.name, self.combinations[id]);
        } else {
            if dice.iter().any(|&i| self.dice.is_held(i)) {
                debug!(
                    "{} overlaps dice already held",
                    self.combinations[id]
                );
                return false;
            }
            for &i in &dice {
                self.dice.set_held(i, true);
            }
            player.soft_points += points;
            self.selected[id] = true;
            debug!("{} selected {}", player.name, self.combinations[id]);
        }
        true
    }

    /// Banks the current player's soft points and ends the turn.
    ///
    /// # Returns
    /// `false` (nothing changes) unless something was selected from the
    /// latest roll and the soft score is at least `BANK_MINIMUM`.
    pub fn bank(&mut self) -> bool {
        if !self.can_bank() {
            debug!(
                "bank rejected for {} at {} soft points",
                self.players[self.current].name,
                self.soft_points()
            );
            return false;
        }
        let seat = self.current;
        let player = &mut self.players[seat];
        let points = player.soft_points;
        player.hard_points += points;
        player.history.push(HistoryEntry::banked(points));
        player.soft_points = 0;
        player.zilch_streak = 0;
        player.first_roll_of_turn = true;
        info!(
            "{} banked {} points ({} total)",
            player.name, points, player.hard_points
        );
        self.last_outcome = Some(TurnOutcome::Banked {
            player: seat,
            points,
        });
        self.advance_turn();
        true
    }

    fn commit_zilch(&mut self) -> TurnOutcome {
        let seat = self.current;
        let player = &mut self.players[seat];
        player.zilch_streak += 1;
        let penalty = if player.zilch_streak >= ZILCH_STREAK_LIMIT {
            player.zilch_streak = 0;
            player.hard_points -= ZILCH_PENALTY;
            player.history.push(HistoryEntry::penalty(ZILCH_PENALTY));
            info!(
                "{} zilched {} times in a row and loses {} points",
                player.name, ZILCH_STREAK_LIMIT, ZILCH_PENALTY
            );
            ZILCH_PENALTY
        } else {
            player.history.push(HistoryEntry::zilch());
            info!("{} zilched (streak {})", player.name, player.zilch_streak);
            0
        };
        player.soft_points = 0;
        player.first_roll_of_turn = true;
        let outcome = TurnOutcome::Zilched {
            player: seat,
            penalty,
        };
        self.last_outcome = Some(outcome);
        self.advance_turn();
        outcome
    }

    /// Passes the dice to the other seat. The match ends when the player now
    /// to act has already reached the threshold, which gives the other player
    /// one last turn after the threshold is first crossed.
    fn advance_turn(&mut self) {
        self.current = (self.current + 1) % NUM_PLAYERS;
        self.combinations.clear();
        self.selected.clear();
        self.previously_held.clear();
        self.dice.release_all();
        self.rolls_this_turn = 0;
        if self.players[self.current].hard_points >= self.config.win_threshold {
            self.game_over = true;
            info!(
                "game over: {} {} - {} {}",
                self.players[0].name,
                self.players[0].hard_points,
                self.players[1].hard_points,
                self.players[1].name
            );
        }
    }

    /// Starts a new match with the same seats and threshold. Seat 0 moves
    /// first.
    pub fn restart_match(&mut self) {
        for player in self.players.iter_mut() {
            player.reset();
        }
        self.current = 0;
        self.dice = DiceSet::new();
        self.combinations.clear();
        self.selected.clear();
        self.previously_held.clear();
        self.rolls_this_turn = 0;
        self.game_over = false;
        self.last_outcome = None;
    }

    /// Back to two default human seats and the default threshold.
    pub fn clear_match(&mut self) {
        self.players = default_players();
        self.config = GameConfig::default();
        self.restart_match();
    }

    /// Replaces a seat and starts a new match.
    ///
    /// # Returns
    /// `false` if `seat` does not exist; nothing changes.
    pub fn set_player(&mut self, seat: usize, player: Player) -> bool {
        let Some(slot) = self.players.get_mut(seat) else {
            debug!("no seat {}", seat);
            return false;
        };
        *slot = player;
        self.restart_match();
        true
    }

    /// Changes the win threshold and starts a new match.
    pub fn set_win_threshold(&mut self, win_threshold: i32) -> Result<(), ConfigError> {
        self.config = GameConfig::new(win_threshold)?;
        self.restart_match();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::AiPolicy;

    fn game_with_threshold(threshold: i32) -> Game {
        let mut game = Game::with_seed(42);
        game.set_win_threshold(threshold).unwrap();
        game
    }

    fn select(game: &mut Game, kind: CombinationKind) {
        let id = game
            .current_combinations()
            .iter()
            .position(|c| c.kind == kind)
            .unwrap();
        assert!(game.toggle_combination(id));
    }

    /// Banks 300 with three 3s.
    fn bank_300(game: &mut Game) {
        game.roll_with_faces(&[3, 3, 3, 2, 4, 6]).unwrap();
        select(game, CombinationKind::n_of_a_kind(3, 3));
        assert!(game.bank());
    }

    /// Takes three 2s, then zilches on the three remaining dice.
    fn zilch_turn(game: &mut Game) -> TurnOutcome {
        game.roll_with_faces(&[2, 2, 2, 3, 4, 6]).unwrap();
        select(game, CombinationKind::n_of_a_kind(2, 3));
        match game.roll_with_faces(&[2, 3, 4]) {
            Some(RollOutcome::Zilched(outcome)) => outcome,
            other => panic!("expected a zilch, got {:?}", other),
        }
    }

    /// Banks 1200: three 1s, then a pair of 1s.
    fn bank_1200(game: &mut Game) {
        game.roll_with_faces(&[1, 1, 1, 2, 3, 4]).unwrap();
        select(game, CombinationKind::n_of_a_kind(1, 3));
        assert_eq!(game.roll_with_faces(&[1, 1, 3]), Some(RollOutcome::Scoring));
        select(game, CombinationKind::Double1);
        assert_eq!(game.soft_points(), 1200);
        assert!(game.bank());
    }

    #[test]
    fn test_new_game_state() {
        let game = Game::with_seed(1);
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(game.win_threshold(), GameConfig::DEFAULT_WIN_THRESHOLD);
        assert_eq!(game.player(0).name, "Player 1");
        assert_eq!(game.player(1).name, "Player 2");
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert!(game.can_roll());
        assert!(!game.can_bank());
        assert!(game.current_combinations().is_empty());
        assert_eq!(game.winner_result(), None);
        assert_eq!(game.last_outcome(), None);
    }

    #[test]
    fn test_config_validation() {
        assert!(GameConfig::new(1000).is_ok());
        assert!(GameConfig::new(20000).is_ok());
        assert_eq!(
            GameConfig::new(20500),
            Err(ConfigError::ThresholdOutOfRange(20500))
        );
        assert_eq!(
            GameConfig::new(1100),
            Err(ConfigError::ThresholdNotOnStep(1100))
        );
        let mut game = Game::with_seed(1);
        assert!(game.set_win_threshold(0).is_err());
        assert_eq!(game.win_threshold(), GameConfig::DEFAULT_WIN_THRESHOLD);
    }

    #[test]
    fn test_selection_gate() {
        let mut game = Game::with_seed(3);
        assert_eq!(
            game.roll_with_faces(&[2, 2, 2, 3, 4, 6]),
            Some(RollOutcome::Scoring)
        );
        assert_eq!(game.phase(), Phase::AwaitingSelection);
        assert!(!game.can_roll());
        let before = game.dice().clone();
        assert_eq!(game.roll(), None);
        assert_eq!(game.dice(), &before);
        assert_eq!(game.rolls_this_turn(), 1);

        assert!(game.toggle_combination(0));
        assert_eq!(game.soft_points(), 200);
        assert_eq!(game.dice().held_indices(), vec![0, 1, 2]);
        assert_eq!(game.phase(), Phase::AwaitingRoll);
        assert_eq!(game.roll_with_faces(&[5, 3, 4]), Some(RollOutcome::Scoring));
        assert_eq!(game.rolls_this_turn(), 2);
        assert_eq!(game.previously_held(), &[0, 1, 2]);
        for i in 0..3 {
            assert_eq!(game.dice().get(i).face, 2);
        }
    }

    #[test]
    fn test_bank_minimum() {
        let mut game = Game::with_seed(5);
        game.roll_with_faces(&[2, 2, 2, 3, 4, 6]).unwrap();
        assert!(!game.bank());
        select(&mut game, CombinationKind::n_of_a_kind(2, 3));
        assert!(!game.can_bank());
        assert!(!game.bank());
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(game.soft_points(), 200);

        let mut game = Game::with_seed(5);
        bank_300(&mut game);
        assert_eq!(game.hard_points(0), 300);
        assert_eq!(game.history(0), &[HistoryEntry::banked(300)]);
        assert_eq!(game.player(0).soft_points(), 0);
        assert!(game.player(0).is_first_roll_of_turn());
        assert_eq!(game.current_player_index(), 1);
        assert_eq!(
            game.last_outcome(),
            Some(TurnOutcome::Banked {
                player: 0,
                points: 300
            })
        );
        assert_eq!(game.dice().held_count(), 0);
        assert!(game.current_combinations().is_empty());
    }

    #[test]
    fn test_toggle_round_trip_restores_state() {
        let mut game = Game::with_seed(8);
        game.roll_with_faces(&[1, 5, 5, 2, 3, 1]).unwrap();
        let dice = game.dice().clone();
        let soft = game.soft_points();
        for id in 0..game.current_combinations().len() {
            assert!(game.toggle_combination(id));
            assert!(game.toggle_combination(id));
            assert_eq!(game.dice(), &dice);
            assert_eq!(game.soft_points(), soft);
            assert!(!game.any_selected());
        }
    }

    #[test]
    fn test_overlapping_selection_is_rejected() {
        let mut game = Game::with_seed(9);
        game.roll_with_faces(&[1, 2, 3, 4, 5, 6]).unwrap();
        let kinds: Vec<_> = game
            .current_combinations()
            .iter()
            .map(|c| c.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                CombinationKind::Straight,
                CombinationKind::Single1,
                CombinationKind::Single5
            ]
        );
        assert!(game.toggle_combination(0));
        assert!(!game.toggle_combination(1));
        assert_eq!(game.soft_points(), 1750);
        assert!(game.toggle_combination(0));
        assert!(game.toggle_combination(1));
        assert!(game.toggle_combination(2));
        assert!(!game.toggle_combination(0));
        assert_eq!(game.soft_points(), 150);
        assert_eq!(game.selected_ids(), vec![1, 2]);
    }

    #[test]
    fn test_toggle_without_menu_is_rejected() {
        let mut game = Game::with_seed(10);
        assert!(!game.toggle_combination(0));
        game.roll_with_faces(&[2, 2, 2, 3, 4, 6]).unwrap();
        assert!(!game.toggle_combination(7));
    }

    #[test]
    fn test_zilch_passes_turn() {
        let mut game = Game::with_seed(11);
        let outcome = zilch_turn(&mut game);
        assert_eq!(
            outcome,
            TurnOutcome::Zilched {
                player: 0,
                penalty: 0
            }
        );
        assert_eq!(game.history(0), &[HistoryEntry::zilch()]);
        assert_eq!(game.player(0).zilch_streak(), 1);
        assert_eq!(game.player(0).soft_points(), 0);
        assert_eq!(game.hard_points(0), 0);
        assert_eq!(game.current_player_index(), 1);
        assert_eq!(game.last_outcome(), Some(outcome));
        assert!(game.can_roll());
    }

    #[test]
    fn test_third_zilch_costs_penalty() {
        let mut game = Game::with_seed(12);
        for turn in 0..3 {
            zilch_turn(&mut game);
            let outcome = zilch_turn(&mut game);
            if turn == 2 {
                assert_eq!(
                    outcome,
                    TurnOutcome::Zilched {
                        player: 1,
                        penalty: ZILCH_PENALTY
                    }
                );
            }
        }
        assert_eq!(
            game.history(0),
            &[
                HistoryEntry::zilch(),
                HistoryEntry::zilch(),
                HistoryEntry {
                    points: -500,
                    zilch: false
                }
            ]
        );
        assert_eq!(game.hard_points(0), -500);
        assert_eq!(game.player(0).zilch_streak(), 0);
        assert_eq!(game.hard_points(1), -500);
    }

    #[test]
    fn test_bank_resets_zilch_streak() {
        let mut game = Game::with_seed(13);
        zilch_turn(&mut game);
        zilch_turn(&mut game);
        zilch_turn(&mut game);
        zilch_turn(&mut game);
        bank_300(&mut game);
        assert_eq!(game.player(0).zilch_streak(), 0);
        zilch_turn(&mut game);
        zilch_turn(&mut game);
        assert_eq!(game.player(0).zilch_streak(), 1);
        assert_eq!(game.hard_points(0), 300);
    }

    #[test]
    fn test_final_chance_then_game_over() {
        let mut game = game_with_threshold(1000);
        bank_1200(&mut game);
        assert_eq!(game.hard_points(0), 1200);
        assert_eq!(game.current_player_index(), 1);
        assert!(!game.is_game_over());
        assert_eq!(game.winner_result(), None);

        zilch_turn(&mut game);
        assert!(game.is_game_over());
        assert_eq!(game.phase(), Phase::GameOver);
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(
            game.winner_result(),
            Some(MatchResult {
                winner: Winner::Player(0),
                scores: [1200, 0]
            })
        );
        assert!(!game.can_roll());
        assert_eq!(game.roll(), None);
        assert!(!game.bank());
    }

    #[test]
    fn test_final_chance_can_overtake() {
        let mut game = game_with_threshold(1000);
        bank_1200(&mut game);
        game.roll_with_faces(&[1, 1, 1, 1, 2, 3]).unwrap();
        select(&mut game, CombinationKind::n_of_a_kind(1, 4));
        assert!(game.bank());
        let result = game.winner_result().unwrap();
        assert_eq!(result.winner, Winner::Player(1));
        assert_eq!(result.scores, [1200, 2000]);
    }

    #[test]
    fn test_equal_scores_are_a_tie() {
        let mut game = game_with_threshold(1000);
        bank_1200(&mut game);
        bank_1200(&mut game);
        assert_eq!(game.winner_result().unwrap().winner, Winner::Tie);
    }

    #[test]
    fn test_all_held_rerolls_full_set() {
        let mut game = Game::with_seed(14);
        game.roll_with_faces(&[1, 1, 1, 5, 5, 5]).unwrap();
        select(&mut game, CombinationKind::n_of_a_kind(1, 3));
        select(&mut game, CombinationKind::n_of_a_kind(5, 3));
        assert_eq!(game.soft_points(), 1500);
        assert!(game.dice().all_held());
        // Three faces are not enough once the whole set is thrown again.
        assert_eq!(game.roll_with_faces(&[2, 3, 4]), None);
        assert_eq!(
            game.roll_with_faces(&[2, 2, 3, 3, 4, 4]),
            Some(RollOutcome::Scoring)
        );
        assert_eq!(game.dice().held_count(), 0);
        assert!(game.previously_held().is_empty());
        assert_eq!(game.soft_points(), 1500);
        assert_eq!(
            game.current_combinations()[0].kind,
            CombinationKind::ThreePairs
        );
    }

    #[test]
    fn test_bad_scripted_roll_is_rejected() {
        let mut game = Game::with_seed(15);
        assert_eq!(game.roll_with_faces(&[1, 2, 3]), None);
        assert_eq!(game.roll_with_faces(&[1, 2, 3, 4, 5, 7]), None);
        assert!(game.player(0).is_first_roll_of_turn());
        assert_eq!(game.rolls_this_turn(), 0);
    }

    #[test]
    fn test_seeded_games_roll_identically() {
        let mut a = Game::with_seed(2024);
        let mut b = Game::with_seed(2024);
        assert_eq!(a.roll(), b.roll());
        assert_eq!(a.dice(), b.dice());
        assert_eq!(a.current_combinations(), b.current_combinations());
    }

    #[test]
    fn test_restart_and_clear_match() {
        let mut game = game_with_threshold(1000);
        game.set_player(1, Player::ai(AiPolicy::Aggressive));
        bank_1200(&mut game);
        zilch_turn(&mut game);
        assert!(game.is_game_over());

        game.restart_match();
        assert!(!game.is_game_over());
        assert_eq!(game.current_player_index(), 0);
        assert_eq!(game.hard_points(0), 0);
        assert!(game.history(1).is_empty());
        assert_eq!(game.player(1).name, "Aggressive AI");
        assert_eq!(game.win_threshold(), 1000);

        game.clear_match();
        assert_eq!(game.player(1).name, "Player 2");
        assert!(!game.player(1).is_ai());
        assert_eq!(game.win_threshold(), GameConfig::DEFAULT_WIN_THRESHOLD);
    }

    #[test]
    fn test_set_player_rejects_unknown_seat() {
        let mut game = Game::with_seed(16);
        game.roll_with_faces(&[1, 2, 2, 3, 4, 6]).unwrap();
        assert!(game.toggle_combination(0));

        assert!(!game.set_player(NUM_PLAYERS, Player::ai(AiPolicy::Cautious)));
        assert_eq!(game.soft_points(), 100);
        assert!(!game.player(0).is_ai());
        assert!(!game.player(1).is_ai());

        assert!(game.set_player(1, Player::ai(AiPolicy::Cautious)));
        assert_eq!(game.soft_points(), 0);
        assert_eq!(game.player(1).policy(), Some(AiPolicy::Cautious));
    }
}
