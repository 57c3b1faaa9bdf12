//! Per-competitor ledger.
use crate::ai::AiPolicy;
use std::fmt;

/// One finished turn as recorded in a player's history.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Points banked, 0 for a plain zilch, or the negative penalty.
    pub points: i32,
    /// `true` for a zilch that did not trigger the penalty.
    pub zilch: bool,
}

impl HistoryEntry {
    pub fn banked(points: i32) -> Self {
        HistoryEntry {
            points,
            zilch: false,
        }
    }

    pub fn zilch() -> Self {
        HistoryEntry {
            points: 0,
            zilch: true,
        }
    }

    pub fn penalty(points: i32) -> Self {
        HistoryEntry {
            points: -points,
            zilch: false,
        }
    }
}

impl fmt::Display for HistoryEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.zilch {
            write!(f, "Zilch")
        } else {
            write!(f, "{} pts", self.points)
        }
    }
}

/// Who makes the decisions for a seat.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Controller {
    #[default]
    Human,
    Ai(AiPolicy),
}

/// A competitor: identity, banked and at-risk scores, zilch streak and turn
/// history.
///
/// All mutation goes through the turn controller in `engine`; callers only
/// read.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub controller: Controller,
    pub(crate) hard_points: i32,
    pub(crate) soft_points: i32,
    pub(crate) zilch_streak: u8,
    pub(crate) first_roll_of_turn: bool,
    pub(crate) history: Vec<HistoryEntry>,
}

impl Player {
    pub fn new(name: impl Into<String>, controller: Controller) -> Self {
        Player {
            name: name.into(),
            controller,
            hard_points: 0,
            soft_points: 0,
            zilch_streak: 0,
            first_roll_of_turn: true,
            history: Vec::new(),
        }
    }

    pub fn human(name: impl Into<String>) -> Self {
        Player::new(name, Controller::Human)
    }

    /// An AI seat named after its policy, e.g. "Cautious AI".
    pub fn ai(policy: AiPolicy) -> Self {
        Player::new(policy.default_name(), Controller::Ai(policy))
    }

    pub fn hard_points(&self) -> i32 {
        self.hard_points
    }

    pub fn soft_points(&self) -> i32 {
        self.soft_points
    }

    pub fn zilch_streak(&self) -> u8 {
        self.zilch_streak
    }

    pub fn is_first_roll_of_turn(&self) -> bool {
        self.first_roll_of_turn
    }

    /// Finished turns, oldest first.
    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    pub fn is_ai(&self) -> bool {
        matches!(self.controller, Controller::Ai(_))
    }

    pub fn policy(&self) -> Option<AiPolicy> {
        match self.controller {
            Controller::Ai(policy) => Some(policy),
            Controller::Human => None,
        }
    }

    /// Clears scores, streak and history but keeps name and controller.
    pub(crate) fn reset(&mut self) {
        self.hard_points = 0;
        self.soft_points = 0;
        self.zilch_streak = 0;
        self.first_roll_of_turn = true;
        self.history.clear();
    }
}
