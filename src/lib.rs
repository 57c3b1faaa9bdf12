//! # Zilch Library
//!
//! This library provides the rules engine for Zilch, a two-player dice game
//! in the Farkle family, and three automated opponents.
//!
//! It is used by two binaries:
//! - `human_player`: Interactive play on the command line, human against
//!   human or against one of the AI policies.
//! - `policy_evaluator`: Plays seeded AI-versus-AI matches and reports how
//!   each policy fares against the others.
//!
//! ## Modules
//! - `dice`: The six dice (`Die`, `DiceSet`) and rolling of unheld dice.
//! - `scoring`: Hand evaluation. Maps the unheld dice to the scoring
//!   combinations they offer (`evaluate`, `Combination`, `CombinationKind`).
//! - `player`: Per-seat ledger of banked and at-risk points, zilch streak and
//!   turn history.
//! - `engine`: The turn state machine (`Game`): roll, toggle, bank, zilch,
//!   turn passing and the final-chance win rule.
//! - `probability`: The exact probability that a reroll scores.
//! - `ai`: The Aggressive, Cautious and Adaptive policies and `play_turn`.
//! - `achievements`: Achievement and statistic bookkeeping for matches
//!   against the AI.
//! - `utils`: Parsing dice from text.

pub mod achievements;
pub mod ai;
pub mod dice;
pub mod engine;
pub mod player;
pub mod probability;
pub mod scoring;
pub mod utils;
