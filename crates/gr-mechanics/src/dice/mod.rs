//! Dice pool notation: parsing, formatting, and bounds.
//!
//! A pool is written `[count]['d'[sides]][(+|-)modifier][(x|X)multiplier]`,
//! e.g. `2d+1`, `3d10-2`, `d6`, `1dx2`, or a flat value such as `-4`.
//! GURPS style leaves out an implicit count of one and the default six
//! sides, so `1d6+2` is written `d+2`.

pub mod algebra;
pub mod roll;

pub use algebra::{add, add_strict, subtract, subtract_strict};
pub use roll::{UniformDraw, roll, roll_detailed};

use std::fmt::Write as _;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

/// Faces on a die when the notation leaves them out.
pub const DEFAULT_SIDES: i32 = 6;

static DICE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d+)?(d)?(\d+)?([+-]\d+)?(?:[xX](\d+))?$").expect("dice pattern is valid")
});

/// A dice pool: `count` dice of `sides` faces, plus `modifier`, times `multiplier`.
///
/// `sides == 0` marks a flat value with no random component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiceSpec {
    /// Number of dice rolled.
    pub count: i32,
    /// Faces on each die (0 for a flat value).
    pub sides: i32,
    /// Flat amount added to the dice total.
    pub modifier: i32,
    /// Factor applied to the final total.
    pub multiplier: i32,
}

impl Default for DiceSpec {
    fn default() -> Self {
        Self {
            count: 0,
            sides: 0,
            modifier: 0,
            multiplier: 1,
        }
    }
}

impl DiceSpec {
    /// Create a pool of `count` dice with `sides` faces and a modifier.
    pub fn new(count: i32, sides: i32, modifier: i32) -> Self {
        Self {
            count,
            sides,
            modifier,
            multiplier: 1,
        }
    }

    /// Create a flat value with no dice.
    pub fn flat(value: i32) -> Self {
        Self {
            modifier: value,
            ..Self::default()
        }
    }

    /// Return a copy with the given multiplier.
    pub fn with_multiplier(self, multiplier: i32) -> Self {
        Self { multiplier, ..self }
    }

    /// Parse dice notation.
    ///
    /// A die marker with sides but no count means one die (`d6` is `1d6`);
    /// a count with no sides means six-sided dice (`2d` is `2d6`). Without
    /// a die marker the leading digits are a flat value and any signed
    /// group adds to it.
    pub fn parse(text: &str) -> RulesResult<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(RulesError::InvalidFormat(text.to_string()));
        }
        let caps = DICE_PATTERN
            .captures(trimmed)
            .ok_or_else(|| RulesError::InvalidFormat(text.to_string()))?;

        let number = |index: usize| -> RulesResult<Option<i32>> {
            caps.get(index)
                .map(|m| {
                    m.as_str()
                        .parse::<i32>()
                        .map_err(|_| RulesError::InvalidFormat(text.to_string()))
                })
                .transpose()
        };

        let leading = number(1)?;
        let trailing = number(3)?;
        let signed = number(4)?.unwrap_or(0);
        let multiplier = number(5)?.unwrap_or(1);

        let spec = if caps.get(2).is_some() {
            Self {
                count: leading.unwrap_or(1),
                sides: trailing.unwrap_or(DEFAULT_SIDES),
                modifier: signed,
                multiplier,
            }
        } else {
            let base = leading.or(trailing).unwrap_or(0);
            Self {
                count: 0,
                sides: 0,
                modifier: base
                    .checked_add(signed)
                    .ok_or_else(|| RulesError::InvalidFormat(text.to_string()))?,
                multiplier,
            }
        };

        let spec = spec.normalize();
        tracing::debug!(input = trimmed, parsed = %spec, "parsed dice notation");
        Ok(spec)
    }

    /// Clamp count and sides to at least zero and the multiplier to at least one.
    pub fn normalize(self) -> Self {
        Self {
            count: self.count.max(0),
            sides: self.sides.max(0),
            modifier: self.modifier,
            multiplier: self.multiplier.max(1),
        }
    }

    /// True if this pool has no random component.
    pub fn is_flat(&self) -> bool {
        self.count == 0 && self.sides == 0
    }

    /// Format the pool. GURPS style omits a count of one and six sides.
    pub fn format(&self, gurps_style: bool) -> String {
        let mut out = String::new();
        if self.count > 0 {
            if !(gurps_style && self.count == 1) {
                let _ = write!(out, "{}", self.count);
            }
            out.push('d');
            if !(gurps_style && self.sides == DEFAULT_SIDES) {
                let _ = write!(out, "{}", self.sides);
            }
        }
        if self.modifier != 0 {
            let _ = write!(out, "{:+}", self.modifier);
        }
        if out.is_empty() {
            out.push('0');
        }
        if self.multiplier != 1 {
            let _ = write!(out, "x{}", self.multiplier);
        }
        out
    }

    /// Smallest total this pool can produce, saturating at the `i64` range.
    pub fn min(&self) -> i64 {
        let dice = if self.sides > 0 { self.count } else { 0 };
        (i64::from(dice) + i64::from(self.modifier)).saturating_mul(i64::from(self.multiplier))
    }

    /// Largest total this pool can produce, saturating at the `i64` range.
    pub fn max(&self) -> i64 {
        let dice = i64::from(self.count) * i64::from(self.sides);
        (dice + i64::from(self.modifier)).saturating_mul(i64::from(self.multiplier))
    }
}

impl FromStr for DiceSpec {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for DiceSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format(true))
    }
}
