//! Dice roller.
//!
//! Parses and rolls `NdM` specifications such as `"1d4"` or `"2d6"`.
//! Malformed specifications never fail a command: `roll` evaluates them
//! to `0`. Modifier suffixes (`"1d6+2"`) are not part of the notation and
//! are treated as malformed.

use std::str::FromStr;

use tracing::warn;

use super::error::DiceError;
use super::rng::DiceSource;

/// A parsed `NdM` dice specification.
///
/// Construction guarantees `1 <= count <= MAX_COUNT`, `sides >= 1` and
/// `count * sides <= i32::MAX`, so every result fits in an `i32`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DiceSpec {
    count: u32,
    sides: u32,
}

impl DiceSpec {
    /// A single d20.
    pub const D20: DiceSpec = DiceSpec { count: 1, sides: 20 };

    /// Most dice a single spec may roll.
    pub const MAX_COUNT: u32 = 1000;

    /// Create a dice spec, rejecting zero parts and results outside `i32`.
    pub fn new(count: u32, sides: u32) -> Result<Self, DiceError> {
        if count == 0 {
            return Err(DiceError::InvalidCount(count.to_string()));
        }
        if sides == 0 {
            return Err(DiceError::InvalidSides(sides.to_string()));
        }
        let fits = count <= Self::MAX_COUNT
            && count
                .checked_mul(sides)
                .is_some_and(|max| i32::try_from(max).is_ok());
        if !fits {
            return Err(DiceError::TooLarge(format!("{}d{}", count, sides)));
        }
        Ok(Self { count, sides })
    }

    /// Number of dice rolled.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Sides per die.
    #[must_use]
    pub fn sides(&self) -> u32 {
        self.sides
    }

    /// Sum `count` independent draws from `1..=sides`.
    ///
    /// Faces outside `1..=sides` from a misbehaving source are clamped.
    pub fn roll(&self, rng: &mut dyn DiceSource) -> i32 {
        (0..self.count).fold(0i32, |total, _| {
            let face = rng.roll_die(self.sides).clamp(1, self.sides);
            total.saturating_add(i32::try_from(face).unwrap_or(i32::MAX))
        })
    }

    /// Smallest possible result.
    #[must_use]
    pub fn min(&self) -> i32 {
        i32::try_from(self.count).unwrap_or(i32::MAX)
    }

    /// Largest possible result.
    #[must_use]
    pub fn max(&self) -> i32 {
        self.count
            .checked_mul(self.sides)
            .and_then(|max| i32::try_from(max).ok())
            .unwrap_or(i32::MAX)
    }
}

impl FromStr for DiceSpec {
    type Err = DiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let notation = s.trim().to_lowercase();

        let d_pos = notation
            .find('d')
            .ok_or_else(|| DiceError::MissingSeparator(s.to_string()))?;

        let count_str = &notation[..d_pos];
        let count = parse_positive(count_str)
            .ok_or_else(|| DiceError::InvalidCount(count_str.to_string()))?;

        let sides_str = &notation[d_pos + 1..];
        let sides = parse_positive(sides_str)
            .ok_or_else(|| DiceError::InvalidSides(sides_str.to_string()))?;

        Self::new(count, sides)
    }
}

impl std::fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d{}", self.count, self.sides)
    }
}

fn parse_positive(s: &str) -> Option<u32> {
    // u32::from_str accepts a leading '+', which is not valid notation
    if !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse::<u32>().ok().filter(|&n| n > 0)
}

/// Roll a dice specification string.
///
/// Returns `0` when the spec is not a valid `NdM` with positive `N` and `M`,
/// or when its largest result does not fit in an `i32`.
pub fn roll(spec: &str, rng: &mut dyn DiceSource) -> i32 {
    match spec.parse::<DiceSpec>() {
        Ok(dice) => dice.roll(rng),
        Err(err) => {
            warn!(spec, error = %err, "malformed dice spec rolls 0");
            0
        }
    }
}
