//! Automated opponents.
//!
//! Three personalities share one shape:
//! - `select_hands` picks which combinations of the latest roll to hold:
//!   whole-set specials first, then predefined multi-combination sets, then a
//!   fixed priority list.
//! - `should_bank` decides whether to stop. Shared guards come first; past
//!   them Aggressive and Cautious compare a 1..=100 risk roll against fixed
//!   thresholds, while Adaptive compares the exact non-zilch probability of
//!   the next roll against limits that depend on the score gap.
//!
//! `play_turn` drives a whole AI turn through the ordinary `Game` commands.
use crate::dice::NUM_DICE;
use crate::engine::{Game, RollOutcome, TurnOutcome, BANK_MINIMUM};
use crate::probability::safe_probability;
use crate::scoring::{Combination, CombinationKind};
use log::{debug, warn};
use rand::Rng;
use std::fmt;
use thiserror::Error;

use CombinationKind::{Double1, Double5, Nothing, Single1, Single5, Straight, ThreePairs};

/// The three opponent personalities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AiPolicy {
    /// Rolls on with high risk tolerance; banks above 2000 soft points.
    Aggressive,
    /// Banks early; banks above 1500 soft points.
    Cautious,
    /// Uses `safe_probability` and the score gap instead of fixed thresholds.
    Adaptive,
}

impl AiPolicy {
    pub const ALL: [AiPolicy; 3] = [AiPolicy::Aggressive, AiPolicy::Cautious, AiPolicy::Adaptive];

    pub fn default_name(&self) -> &'static str {
        match self {
            AiPolicy::Aggressive => "Aggressive AI",
            AiPolicy::Cautious => "Cautious AI",
            AiPolicy::Adaptive => "Adaptive AI",
        }
    }
}

impl fmt::Display for AiPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AiPolicy::Aggressive => "Aggressive",
            AiPolicy::Cautious => "Cautious",
            AiPolicy::Adaptive => "Adaptive",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum AiTurnError {
    #[error("seat {0} is not controlled by an AI")]
    NotAiTurn(usize),
    #[error("the match is already over")]
    GameOver,
    #[error("AI turn stalled: {0}")]
    Stalled(&'static str),
}

/// What a policy sees when deciding. Built from the game with
/// `TurnContext::from_game`, or by hand in tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TurnContext {
    pub soft_points: i32,
    pub hard_points: i32,
    pub opponent_hard_points: i32,
    pub win_threshold: i32,
    /// Dice currently held.
    pub dice_held: usize,
    /// Rolls taken this turn beyond the first.
    pub rerolls: u32,
}

impl TurnContext {
    pub fn from_game<R: Rng>(game: &Game<R>) -> Self {
        let player = game.current_player();
        TurnContext {
            soft_points: player.soft_points(),
            hard_points: player.hard_points(),
            opponent_hard_points: game.hard_points(game.opponent_index()),
            win_threshold: game.win_threshold(),
            dice_held: game.dice().held_count(),
            rerolls: game.rolls_this_turn().saturating_sub(1),
        }
    }

    pub fn dice_remaining(&self) -> usize {
        NUM_DICE.saturating_sub(self.dice_held)
    }
}

const fn n_of_a_kind(face: u8, count: u8) -> CombinationKind {
    CombinationKind::n_of_a_kind(face, count)
}

/// Whole-set combinations, taken on sight.
const SPECIAL: [CombinationKind; 3] = [Nothing, Straight, ThreePairs];

/// Run faces paired with a 1 (every face but 1) and with a 5 (every face but 5).
const WITH_ONES: [u8; 5] = [6, 5, 4, 3, 2];
const WITH_FIVES: [u8; 5] = [1, 6, 4, 3, 2];
/// Run faces that leave both a 1 and a 5 free.
const CORE_FACES: [u8; 4] = [2, 3, 4, 6];

/// Three-combination sets, in preference order.
fn three_combos() -> Vec<[CombinationKind; 3]> {
    let rows = [
        (4, Single1, Single5),
        (3, Double1, Single5),
        (3, Single1, Double5),
        (3, Single1, Single5),
    ];
    let mut combos = Vec::with_capacity(16);
    for (count, a, b) in rows {
        for face in CORE_FACES {
            combos.push([n_of_a_kind(face, count), a, b]);
        }
    }
    combos
}

/// Two-combination sets, in preference order.
fn two_combos() -> Vec<[CombinationKind; 2]> {
    let mut combos = Vec::with_capacity(84);
    for first in 1..=6u8 {
        for second in (1..=6u8).filter(|&f| f != first) {
            combos.push([n_of_a_kind(first, 3), n_of_a_kind(second, 3)]);
        }
    }
    let runs: [(u8, &[u8; 5], CombinationKind); 10] = [
        (5, &WITH_ONES, Single1),
        (5, &WITH_FIVES, Single5),
        (4, &WITH_ONES, Double1),
        (4, &WITH_ONES, Single1),
        (4, &WITH_FIVES, Double5),
        (4, &WITH_FIVES, Single5),
        (3, &WITH_ONES, Double1),
        (3, &WITH_ONES, Single1),
        (3, &WITH_FIVES, Double5),
        (3, &WITH_FIVES, Single5),
    ];
    for (count, faces, extra) in runs {
        for &face in faces {
            combos.push([n_of_a_kind(face, count), extra]);
        }
    }
    combos.extend([
        [Double1, Double5],
        [Double1, Single5],
        [Single1, Double5],
        [Single1, Single5],
    ]);
    combos
}

/// Single-combination fallback, best first.
fn priority_list() -> Vec<CombinationKind> {
    let mut list = Vec::with_capacity(28);
    for count in [6u8, 5, 4, 3] {
        for face in [1u8, 6, 5, 4, 3, 2] {
            list.push(n_of_a_kind(face, count));
        }
    }
    list.extend([Double1, Single1, Double5, Single5]);
    list
}

fn find(combos: &[Combination], kind: CombinationKind) -> Option<usize> {
    combos.iter().position(|c| c.kind == kind)
}

/// Ids of every kind in `kinds`, or `None` if any is missing.
fn find_all(combos: &[Combination], kinds: &[CombinationKind]) -> Option<Vec<usize>> {
    kinds.iter().map(|&kind| find(combos, kind)).collect()
}

fn dice_used(kinds: &[CombinationKind]) -> usize {
    kinds.iter().map(|k| k.dice_count()).sum()
}

/// Outcome of a fixed-threshold banking rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
    Bank,
    KeepRolling,
    /// Bank if a 1..=100 risk roll comes out above this value.
    RiskAbove(u32),
}

impl Verdict {
    fn decide<R: Rng + ?Sized>(self, rng: &mut R) -> bool {
        match self {
            Verdict::Bank => true,
            Verdict::KeepRolling => false,
            Verdict::RiskAbove(threshold) => {
                let risk: u32 = rng.gen_range(1..=100);
                debug!("risk roll {} against {}", risk, threshold);
                risk > threshold
            }
        }
    }
}

pub(crate) fn aggressive_verdict(ctx: &TurnContext) -> Verdict {
    let soft = ctx.soft_points;
    let held = ctx.dice_held;
    if soft >= 2000 {
        return Verdict::Bank;
    }
    let threshold = match ctx.rerolls {
        0 => {
            if soft >= 800 && held == 4 {
                75
            } else if soft >= 600 && held == 5 {
                60
            } else if soft > 300 && held == 5 {
                55
            } else if soft == 300 && held >= 4 {
                70
            } else {
                65
            }
        }
        1 => {
            if soft >= 1000 && held >= 4 {
                22
            } else {
                35
            }
        }
        _ => match held {
            1 => 35,
            2 => 25,
            3 => 15,
            _ => 8,
        },
    };
    Verdict::RiskAbove(threshold)
}

pub(crate) fn cautious_verdict(ctx: &TurnContext) -> Verdict {
    let soft = ctx.soft_points;
    let held = ctx.dice_held;
    if soft >= 1500 {
        return Verdict::Bank;
    }
    match ctx.rerolls {
        0 => {
            if soft >= 300 && held == 3 {
                Verdict::RiskAbove(88)
            } else if soft >= 500 && held == 4 {
                Verdict::RiskAbove(60)
            } else if soft >= 450 && held == 5 {
                Verdict::RiskAbove(55)
            } else if soft > 300 && held == 5 {
                Verdict::RiskAbove(55)
            } else if soft == 300 && held >= 4 {
                Verdict::RiskAbove(70)
            } else if soft > 1000 {
                Verdict::Bank
            } else {
                Verdict::RiskAbove(55)
            }
        }
        1 => {
            if soft < 500 {
                Verdict::KeepRolling
            } else if soft > 1000 {
                Verdict::RiskAbove(15)
            } else if soft == 500 && held == 1 {
                Verdict::RiskAbove(65)
            } else if held == 1 {
                Verdict::RiskAbove(58)
            } else if soft < 600 && held == 2 {
                Verdict::RiskAbove(55)
            } else if held == 2 {
                Verdict::RiskAbove(50)
            } else if soft < 800 && held == 3 {
                Verdict::RiskAbove(42)
            } else if held == 3 {
                Verdict::RiskAbove(33)
            } else if held >= 4 {
                Verdict::Bank
            } else {
                Verdict::RiskAbove(35)
            }
        }
        _ => {
            if soft < 1200 {
                Verdict::Bank
            } else {
                match held {
                    1 => Verdict::RiskAbove(18),
                    2 => Verdict::RiskAbove(12),
                    _ => Verdict::Bank,
                }
            }
        }
    }
}

/// Chance the next roll scores, less 0.03 per reroll already taken.
fn adjusted_probability(remaining: usize, rerolls: u32) -> f64 {
    safe_probability(remaining) - 0.03 * f64::from(rerolls)
}

pub(crate) fn adaptive_should_bank(ctx: &TurnContext) -> bool {
    let p = adjusted_probability(ctx.dice_remaining(), ctx.rerolls);
    let ai = ctx.hard_points;
    let opponent = ctx.opponent_hard_points;
    let limit = if opponent >= ai {
        if opponent >= ai + 1000 {
            0.30
        } else if opponent >= ai + 500 {
            0.40
        } else {
            0.50
        }
    } else if ai >= opponent + 1000 {
        0.80
    } else if ai >= opponent + 500 {
        0.70
    } else {
        0.55
    };
    debug!("adaptive: p={:.3} limit={:.2}", p, limit);
    p < limit
}

impl AiPolicy {
    /// Ids of the combinations in `combos` to hold, in toggle order.
    ///
    /// An empty result means nothing is selectable (a zilch menu).
    ///
    /// # Examples
    /// ```
    /// use zilch::ai::{AiPolicy, TurnContext};
    /// use zilch::dice::DiceSet;
    /// use zilch::scoring::evaluate;
    ///
    /// let combos = evaluate(DiceSet::from_faces([3, 3, 3, 6, 6, 6]).dice());
    /// let ctx = TurnContext {
    ///     soft_points: 0,
    ///     hard_points: 0,
    ///     opponent_hard_points: 0,
    ///     win_threshold: 10000,
    ///     dice_held: 0,
    ///     rerolls: 0,
    /// };
    /// assert_eq!(AiPolicy::Cautious.select_hands(&combos, &ctx), vec![0, 1]);
    /// ```
    pub fn select_hands(&self, combos: &[Combination], ctx: &TurnContext) -> Vec<usize> {
        if let Some(id) = SPECIAL.iter().find_map(|&kind| find(combos, kind)) {
            return vec![id];
        }

        let remaining = ctx.dice_remaining();
        let exact_fit_only = *self != AiPolicy::Aggressive;
        let fits = |kinds: &[CombinationKind]| !exact_fit_only || dice_used(kinds) == remaining;

        for combo in three_combos().iter().filter(|c| fits(&c[..])) {
            if let Some(ids) = find_all(combos, combo) {
                return ids;
            }
        }
        for combo in two_combos().iter().filter(|c| fits(&c[..])) {
            if let Some(ids) = find_all(combos, combo) {
                return ids;
            }
        }

        if *self == AiPolicy::Adaptive {
            if let Some(ids) = adaptive_pick(combos, remaining, ctx.rerolls) {
                return ids;
            }
        }

        priority_list()
            .into_iter()
            .find_map(|kind| find(combos, kind))
            .map(|id| vec![id])
            .unwrap_or_default()
    }

    /// Decides whether to bank now. Draws at most one risk roll from `rng`.
    pub fn should_bank<R: Rng + ?Sized>(&self, ctx: &TurnContext, rng: &mut R) -> bool {
        if ctx.opponent_hard_points >= ctx.win_threshold {
            return ctx.opponent_hard_points < ctx.hard_points + ctx.soft_points;
        }
        if ctx.soft_points < BANK_MINIMUM {
            return false;
        }
        if ctx.hard_points + ctx.soft_points >= ctx.win_threshold {
            return true;
        }
        match self {
            AiPolicy::Aggressive => aggressive_verdict(ctx).decide(rng),
            AiPolicy::Cautious => cautious_verdict(ctx).decide(rng),
            AiPolicy::Adaptive => adaptive_should_bank(ctx),
        }
    }
}

/// Adaptive's extra selection step: a forced three-combination on a late
/// full-set roll, else the available two-combination that costs the least
/// probability of scoring on the next roll.
fn adaptive_pick(combos: &[Combination], remaining: usize, rerolls: u32) -> Option<Vec<usize>> {
    let current = adjusted_probability(remaining, rerolls);
    if current < 0.92 && remaining == NUM_DICE {
        if let Some(ids) = three_combos()
            .iter()
            .find_map(|combo| find_all(combos, combo))
        {
            return Some(ids);
        }
    }

    let mut best = None;
    let mut best_drop = 0.35;
    for combo in two_combos() {
        let Some(ids) = find_all(combos, &combo) else {
            continue;
        };
        let used = dice_used(&combo);
        if used > remaining {
            continue;
        }
        let next = safe_probability(remaining - used) - (0.01 * f64::from(rerolls) + 0.01);
        let drop = current - next;
        if drop < best_drop {
            best_drop = drop;
            best = Some(ids);
        }
    }
    best
}

/// Plays the current seat's whole turn with its AI policy.
///
/// Each pass rolls and hands the roll to `play_roll`. A zilch ends the turn
/// inside the roll.
///
/// # Returns
/// How the turn ended, or an error if the seat is human, the match is over,
/// or a command the policy relied on was rejected.
pub fn play_turn<R: Rng>(game: &mut Game<R>) -> Result<TurnOutcome, AiTurnError> {
    if game.is_game_over() {
        return Err(AiTurnError::GameOver);
    }
    let seat = game.current_player_index();
    let policy = game
        .current_player()
        .policy()
        .ok_or(AiTurnError::NotAiTurn(seat))?;

    loop {
        match game.roll() {
            None => return Err(AiTurnError::Stalled("roll rejected")),
            Some(RollOutcome::Zilched(outcome)) => return Ok(outcome),
            Some(RollOutcome::Scoring) => {}
        }
        if let Some(outcome) = play_roll(game, policy)? {
            return Ok(outcome);
        }
    }
}

/// One decision on the roll currently on the table: hold `policy`'s
/// selection, then ask `should_bank`.
///
/// A selection that holds every die skips the bank question, since the next
/// roll throws all six again for free. A bank the controller rejects means
/// roll again.
///
/// # Returns
/// `Some(outcome)` if the turn was banked, `None` if the seat should roll
/// again.
pub fn play_roll<R: Rng>(
    game: &mut Game<R>,
    policy: AiPolicy,
) -> Result<Option<TurnOutcome>, AiTurnError> {
    let ctx = TurnContext::from_game(game);
    let picks = policy.select_hands(game.current_combinations(), &ctx);
    for id in picks {
        if !game.toggle_combination(id) {
            warn!("{} could not hold combination {}", policy, id);
        }
    }
    if !game.any_selected() {
        return Err(AiTurnError::Stalled("nothing selected"));
    }
    debug!(
        "{} holds {} with {} soft points",
        game.current_player().name,
        game.dice(),
        game.soft_points()
    );

    if game.dice().all_held() {
        return Ok(None);
    }
    let ctx = TurnContext::from_game(game);
    if policy.should_bank(&ctx, game.rng_mut()) && game.bank() {
        return Ok(game.last_outcome());
    }
    Ok(None)
}
