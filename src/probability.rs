//! Exact risk model used by the adaptive policy.
//!
//! `safe_probability(n)` is the chance that throwing `n` dice shows at least
//! one scoring die: a 1, a 5, or three or more of a kind. Favourable outcomes
//! are counted over the `6^n` equally likely throws by inclusion-exclusion.
use crate::dice::NUM_DICE;

/// Binomial coefficient `n choose r`; 0 when `r > n`.
///
/// # Examples
/// ```
/// use zilch::probability::combination;
/// assert_eq!(combination(5, 3), 10);
/// assert_eq!(combination(4, 0), 1);
/// assert_eq!(combination(2, 3), 0);
/// ```
pub fn combination(n: u64, r: u64) -> u64 {
    if r > n {
        return 0;
    }
    let mut result = 1;
    for i in 0..r {
        result = result * (n - i) / (i + 1);
    }
    result
}

/// Total equally likely throws of `dice` dice.
pub fn total_outcomes(dice: usize) -> i64 {
    6i64.pow(dice as u32)
}

/// Throws of `dice` dice that contain a scoring die.
///
/// Counts the runs of a kind, adds the throws with at least one 1 or 5, then
/// removes the runs of 1s or 5s counted twice. Returns `None` for 0 or 6 dice,
/// where the answer does not depend on counting: a fresh six-dice throw
/// always scores (at worst "Nothing").
pub fn favourable_outcomes(dice: usize) -> Option<i64> {
    let c = |n: u64, r: u64| combination(n, r) as i64;
    let total = total_outcomes(dice);
    let no_one_or_five = 4i64.pow(dice as u32);
    let favourable = match dice {
        1 => 2,
        2 => total - no_one_or_five,
        3 => {
            let mut f = 6 + (total - no_one_or_five);
            // Three 1s or three 5s.
            f -= 2;
            f
        }
        4 => {
            let mut f = 6 + 6 * c(4, 3) * 5 + (total - no_one_or_five);
            f -= 2 * c(4, 3) * 4;
            f -= 4 * c(4, 2) * 2;
            f += 2;
            f
        }
        5 => {
            let mut f = 6 + 6 * 5 * c(5, 4) + 6 * c(5, 3) * 5 * 4 + (total - no_one_or_five);
            f -= 2 * c(5, 3) * 16;
            f -= 2 * c(5, 4) * 4;
            f -= 4 * c(5, 2) * 2;
            f += 2;
            f
        }
        _ => return None,
    };
    Some(favourable)
}

/// Probability that rerolling `remaining` dice does not zilch.
///
/// # Examples
/// ```
/// use zilch::probability::safe_probability;
/// assert!((safe_probability(1) - 1.0 / 3.0).abs() < 1e-9);
/// assert!((safe_probability(2) - 5.0 / 9.0).abs() < 1e-9);
/// assert_eq!(safe_probability(6), 1.0);
/// ```
pub fn safe_probability(remaining: usize) -> f64 {
    match favourable_outcomes(remaining) {
        Some(favourable) if remaining < NUM_DICE => {
            favourable as f64 / total_outcomes(remaining) as f64
        }
        _ => 1.0,
    }
}
