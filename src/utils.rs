use crate::dice::NUM_DICE;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseDiceError {
    #[error("unrecognized character '{ch}' at position {position}")]
    InvalidFace { ch: char, position: usize },
    #[error("expected at most {max} dice, found {found}", max = NUM_DICE)]
    TooMany { found: usize },
}

/// Parses face values from text such as `"1 5 5 2"`, `"1,5,5,2"` or `"1552"`.
///
/// Each digit `1`-`6` is one die. Spaces and commas are separators and are
/// otherwise ignored. Used for scripted rolls in tests and for the practice
/// roll command of `human_player`.
///
/// # Arguments
/// * `s`: The text to parse.
///
/// # Returns
/// * `Ok(Vec<u8>)` with up to `NUM_DICE` faces, in order.
/// * `Err(ParseDiceError)` for any other character or for more than
///   `NUM_DICE` dice.
///
/// # Examples
/// ```
/// use zilch::utils::{dice_from_str, ParseDiceError};
///
/// assert_eq!(dice_from_str("1 5 5 2").unwrap(), vec![1, 5, 5, 2]);
/// assert_eq!(dice_from_str("115234").unwrap(), vec![1, 1, 5, 2, 3, 4]);
/// assert_eq!(
///     dice_from_str("1 7"),
///     Err(ParseDiceError::InvalidFace { ch: '7', position: 2 })
/// );
/// ```
pub fn dice_from_str(s: &str) -> Result<Vec<u8>, ParseDiceError> {
    let mut faces = Vec::with_capacity(NUM_DICE);
    for (position, ch) in s.chars().enumerate() {
        match ch {
            '1'..='6' => faces.push(ch as u8 - b'0'),
            ' ' | ',' | '\t' => {}
            _ => return Err(ParseDiceError::InvalidFace { ch, position }),
        }
    }
    if faces.len() > NUM_DICE {
        return Err(ParseDiceError::TooMany { found: faces.len() });
    }
    Ok(faces)
}
