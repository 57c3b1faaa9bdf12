//! Hand evaluation: which scoring combinations the unheld dice offer.
//!
//! Evaluation is stateless. Every rule is checked independently, so a single
//! roll can offer several overlapping combinations (a straight also offers its
//! single 1 and single 5); the turn controller decides which of them may be
//! held together.
use crate::dice::{Die, NUM_DICE};
use log::error;
use std::fmt;

pub const STRAIGHT_POINTS: i32 = 1750;
pub const THREE_PAIRS_POINTS: i32 = 1500;
/// Six of a kind scores this flat amount whatever the face.
pub const SIX_OF_A_KIND_POINTS: i32 = 2500;
pub const SINGLE_1_POINTS: i32 = 100;
pub const DOUBLE_1_POINTS: i32 = 200;
pub const SINGLE_5_POINTS: i32 = 50;
pub const DOUBLE_5_POINTS: i32 = 100;
/// Awarded for a fresh six-dice roll that matches no other rule.
pub const NOTHING_POINTS: i32 = 500;

/// Three-of-a-kind value per face, indexed by face (index 0 unused).
const THREE_OF_A_KIND_BASE: [i32; 7] = [0, 1000, 200, 300, 400, 500, 600];

/// The structured identity of a scoring combination.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CombinationKind {
    /// 1-2-3-4-5-6.
    Straight,
    /// Three distinct faces, two of each.
    ThreePairs,
    /// `count` (3 to 6) dice showing `face`.
    NOfAKind { face: u8, count: u8 },
    Single1,
    Double1,
    Single5,
    Double5,
    /// A fresh six-dice roll with no other match.
    Nothing,
    /// No scoring die at all; ends the turn.
    Zilch,
}

impl CombinationKind {
    pub const fn n_of_a_kind(face: u8, count: u8) -> Self {
        CombinationKind::NOfAKind { face, count }
    }

    /// Number of dice this combination consumes.
    pub fn dice_count(&self) -> usize {
        match self {
            CombinationKind::Straight | CombinationKind::ThreePairs | CombinationKind::Nothing => {
                NUM_DICE
            }
            CombinationKind::NOfAKind { count, .. } => *count as usize,
            CombinationKind::Single1 | CombinationKind::Single5 => 1,
            CombinationKind::Double1 | CombinationKind::Double5 => 2,
            CombinationKind::Zilch => 0,
        }
    }

    /// Whole-set combinations an automated player takes on sight.
    pub fn is_special(&self) -> bool {
        matches!(
            self,
            CombinationKind::Nothing | CombinationKind::Straight | CombinationKind::ThreePairs
        )
    }
}

impl fmt::Display for CombinationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CombinationKind::Straight => write!(f, "Straight"),
            CombinationKind::ThreePairs => write!(f, "Three Pairs"),
            CombinationKind::NOfAKind { face, count } => {
                let word = match count {
                    3 => "Three",
                    4 => "Four",
                    5 => "Five",
                    6 => "Six",
                    _ => "Many",
                };
                write!(f, "{} {}s", word, face)
            }
            CombinationKind::Single1 => write!(f, "Single 1"),
            CombinationKind::Double1 => write!(f, "Double 1"),
            CombinationKind::Single5 => write!(f, "Single 5"),
            CombinationKind::Double5 => write!(f, "Double 5"),
            CombinationKind::Nothing => write!(f, "Nothing"),
            CombinationKind::Zilch => write!(f, "ZILCH"),
        }
    }
}

/// One selectable scoring option produced by `evaluate`.
///
/// Combinations are rebuilt from scratch after every roll and never mutated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Combination {
    pub kind: CombinationKind,
    /// Points added to the soft score when selected (removed when deselected).
    pub points: i32,
    /// Indices into the dice set of the dice this option holds, ascending.
    pub dice: Vec<usize>,
}

impl Combination {
    /// Human-readable label, e.g. `"Three 2s"` or `"Single 5"`.
    pub fn label(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} pts)", self.kind, self.points)
    }
}

/// Counts faces, indexed by face value (index 0 unused).
pub fn count_faces(faces: &[u8]) -> [usize; 7] {
    let mut counts = [0usize; 7];
    for &face in faces {
        if (1..=6).contains(&face) {
            counts[face as usize] += 1;
        }
    }
    counts
}

/// Returns `true` iff `faces` is exactly 1 through 6 in any order.
///
/// # Examples
/// ```
/// use zilch::scoring::is_straight;
/// assert!(is_straight(&[3, 1, 2, 6, 5, 4]));
/// assert!(!is_straight(&[1, 2, 3, 4, 5, 5]));
/// assert!(!is_straight(&[1, 2, 3, 4, 5]));
/// ```
pub fn is_straight(faces: &[u8]) -> bool {
    if faces.len() != NUM_DICE {
        return false;
    }
    let mut sorted = faces.to_vec();
    sorted.sort_unstable();
    sorted.iter().copied().eq(1..=6u8)
}

/// Points for `count` dice of the same `face`.
///
/// The three-of-a-kind base is `face * 100`, except that 1s are worth 1000.
/// Each die beyond the third doubles the value. Faces outside `1..=6` or
/// fewer than three dice are a caller error: the result is 0 and the error is
/// logged.
///
/// # Examples
/// ```
/// use zilch::scoring::n_of_a_kind_points;
/// assert_eq!(n_of_a_kind_points(1, 3), 1000);
/// assert_eq!(n_of_a_kind_points(2, 4), 400);
/// assert_eq!(n_of_a_kind_points(6, 6), 4800);
/// assert_eq!(n_of_a_kind_points(7, 3), 0);
/// ```
pub fn n_of_a_kind_points(face: u8, count: u8) -> i32 {
    if !(1..=6).contains(&face) || count < 3 {
        error!(
            "invalid n-of-a-kind scoring input: face={} count={}",
            face, count
        );
        return 0;
    }
    let base = THREE_OF_A_KIND_BASE[face as usize];
    match 1i32
        .checked_shl(u32::from(count - 3))
        .and_then(|multiplier| base.checked_mul(multiplier))
    {
        Some(points) => points,
        None => {
            error!("n-of-a-kind points overflow: face={} count={}", face, count);
            0
        }
    }
}

/// Lists the scoring combinations offered by the unheld dice in `dice`.
///
/// Held dice are ignored. Dice indices in the result refer to positions in
/// `dice`. The order is fixed: straight, three pairs, six/five/four of a kind,
/// each three of a kind by ascending face, single or double 1, single or
/// double 5, then `Nothing` (fresh roll only) and finally `Zilch` when nothing
/// else matched. The result is never empty.
///
/// # Examples
/// ```
/// use zilch::dice::DiceSet;
/// use zilch::scoring::{evaluate, CombinationKind};
///
/// let dice = DiceSet::from_faces([2, 2, 2, 1, 4, 6]);
/// let kinds: Vec<_> = evaluate(dice.dice()).into_iter().map(|c| c.kind).collect();
/// assert_eq!(
///     kinds,
///     vec![CombinationKind::n_of_a_kind(2, 3), CombinationKind::Single1]
/// );
/// ```
pub fn evaluate(dice: &[Die]) -> Vec<Combination> {
    let free: Vec<(usize, u8)> = dice
        .iter()
        .enumerate()
        .filter(|(_, d)| !d.held)
        .map(|(i, d)| (i, d.face))
        .collect();
    let faces: Vec<u8> = free.iter().map(|&(_, face)| face).collect();
    let counts = count_faces(&faces);
    let all_free: Vec<usize> = free.iter().map(|&(i, _)| i).collect();
    let indices_of = |face: u8| -> Vec<usize> {
        free.iter()
            .filter(|&&(_, f)| f == face)
            .map(|&(i, _)| i)
            .collect()
    };

    let mut combinations = Vec::new();

    if is_straight(&faces) {
        combinations.push(Combination {
            kind: CombinationKind::Straight,
            points: STRAIGHT_POINTS,
            dice: all_free.clone(),
        });
    }

    let distinct = counts.iter().filter(|&&c| c > 0).count();
    if distinct == 3 && counts.iter().all(|&c| c == 0 || c == 2) {
        combinations.push(Combination {
            kind: CombinationKind::ThreePairs,
            points: THREE_PAIRS_POINTS,
            dice: all_free.clone(),
        });
    }

    for count in [6u8, 5, 4] {
        if let Some(face) = (1..=6u8).find(|&f| counts[f as usize] == count as usize) {
            let points = if count == 6 {
                SIX_OF_A_KIND_POINTS
            } else {
                n_of_a_kind_points(face, count)
            };
            combinations.push(Combination {
                kind: CombinationKind::n_of_a_kind(face, count),
                points,
                dice: indices_of(face),
            });
        }
    }

    for face in (1..=6u8).filter(|&f| counts[f as usize] == 3) {
        combinations.push(Combination {
            kind: CombinationKind::n_of_a_kind(face, 3),
            points: n_of_a_kind_points(face, 3),
            dice: indices_of(face),
        });
    }

    let singles = [
        (1u8, CombinationKind::Single1, SINGLE_1_POINTS, CombinationKind::Double1, DOUBLE_1_POINTS),
        (5u8, CombinationKind::Single5, SINGLE_5_POINTS, CombinationKind::Double5, DOUBLE_5_POINTS),
    ];
    for (face, single, single_points, double, double_points) in singles {
        match counts[face as usize] {
            1 => combinations.push(Combination {
                kind: single,
                points: single_points,
                dice: indices_of(face),
            }),
            2 => combinations.push(Combination {
                kind: double,
                points: double_points,
                dice: indices_of(face),
            }),
            _ => {}
        }
    }

    if combinations.is_empty() && free.len() == NUM_DICE {
        combinations.push(Combination {
            kind: CombinationKind::Nothing,
            points: NOTHING_POINTS,
            dice: all_free,
        });
    }

    if combinations.is_empty() {
        combinations.push(Combination {
            kind: CombinationKind::Zilch,
            points: 0,
            dice: Vec::new(),
        });
    }

    combinations
}

/// `true` when `combinations` is the zilch-only menu.
pub fn is_zilch(combinations: &[Combination]) -> bool {
    combinations
        .iter()
        .all(|c| c.kind == CombinationKind::Zilch)
}
