//! The six dice on the table.
//!
//! This module defines:
//! - `Die`: a single face value (1-6) plus its held flag.
//! - `DiceSet`: the fixed set of `NUM_DICE` dice, which owns rerolling of the
//!   unheld dice and the "all held means release everything" rule.
use rand::Rng;
use std::fmt;

/// Number of dice in play. Every hand is evaluated against this many dice.
pub const NUM_DICE: usize = 6;

/// A single die: its face value and whether it is held out of the next roll.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Die {
    /// Face value, always in `1..=6` once rolled.
    pub face: u8,
    /// Held dice keep their face when the set is rerolled.
    pub held: bool,
}

impl Default for Die {
    fn default() -> Self {
        Die {
            face: 1,
            held: false,
        }
    }
}

/// Draws a single face value in `1..=6`.
pub fn random_face(rng: &mut impl Rng) -> u8 {
    rng.gen_range(1..=6u8)
}

/// The fixed set of six dice.
///
/// Only the turn controller mutates held flags; rolling only ever changes the
/// faces of dice that are not held.
///
/// # Examples
/// ```
/// use zilch::dice::{DiceSet, NUM_DICE};
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let mut dice = DiceSet::new();
/// let mut rng = SmallRng::seed_from_u64(7);
/// dice.roll(&mut rng);
/// assert!(dice.faces().iter().all(|&f| (1..=6).contains(&f)));
/// assert_eq!(dice.held_count(), 0);
/// assert_eq!(dice.faces().len(), NUM_DICE);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct DiceSet {
    dice: [Die; NUM_DICE],
}

impl DiceSet {
    /// Creates a set with every die showing 1 and nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an unheld set showing the given faces.
    ///
    /// Faces are not validated here; scripted sets are normally built through
    /// `utils::dice_from_str`, which rejects anything outside `1..=6`.
    pub fn from_faces(faces: [u8; NUM_DICE]) -> Self {
        let mut dice = [Die::default(); NUM_DICE];
        for (die, face) in dice.iter_mut().zip(faces) {
            die.face = face;
        }
        DiceSet { dice }
    }

    pub fn dice(&self) -> &[Die; NUM_DICE] {
        &self.dice
    }

    pub fn get(&self, index: usize) -> Die {
        self.dice[index]
    }

    /// Current face values in index order.
    pub fn faces(&self) -> [u8; NUM_DICE] {
        let mut faces = [0u8; NUM_DICE];
        for (face, die) in faces.iter_mut().zip(self.dice.iter()) {
            *face = die.face;
        }
        faces
    }

    pub fn held_count(&self) -> usize {
        self.dice.iter().filter(|d| d.held).count()
    }

    /// Number of dice that would be thrown by the next roll.
    pub fn unheld_count(&self) -> usize {
        NUM_DICE - self.held_count()
    }

    pub fn all_held(&self) -> bool {
        self.dice.iter().all(|d| d.held)
    }

    /// Indices of the held dice, ascending.
    pub fn held_indices(&self) -> Vec<usize> {
        self.dice
            .iter()
            .enumerate()
            .filter(|(_, d)| d.held)
            .map(|(i, _)| i)
            .collect()
    }

    pub fn is_held(&self, index: usize) -> bool {
        self.dice[index].held
    }

    pub(crate) fn set_held(&mut self, index: usize, held: bool) {
        self.dice[index].held = held;
    }

    pub(crate) fn release_all(&mut self) {
        for die in self.dice.iter_mut() {
            die.held = false;
        }
    }

    /// Rolls every unheld die with `rng`.
    ///
    /// If every die is currently held, the whole set is released first and
    /// all six dice are thrown.
    ///
    /// # Returns
    /// `true` if the all-held reset happened.
    pub fn roll(&mut self, rng: &mut impl Rng) -> bool {
        self.roll_with(|| random_face(&mut *rng))
    }

    /// Same as `roll`, but each rerolled die takes its face from `next_face`,
    /// called once per rerolled die in index order.
    pub fn roll_with(&mut self, mut next_face: impl FnMut() -> u8) -> bool {
        let reset = self.all_held();
        if reset {
            self.release_all();
        }
        for die in self.dice.iter_mut().filter(|d| !d.held) {
            die.face = next_face();
        }
        reset
    }
}

impl fmt::Display for DiceSet {
    /// Faces separated by spaces, held dice in brackets: `[1] 4 [5] 2 2 6`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, die) in self.dice.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            if die.held {
                write!(f, "[{}]", die.face)?;
            } else {
                write!(f, "{}", die.face)?;
            }
        }
        Ok(())
    }
}
