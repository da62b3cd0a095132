//! Six-sided damage dice in GURPS canonical form.
//!
//! One die is worth four points of modifier when trading between the two,
//! so `1d+3` becomes `2d-1` and `3d-3` becomes `2d+1`. In canonical form
//! a single die carries a modifier below +3 and larger pools carry a
//! modifier from -1 to +2.
//!
//! Counts and modifiers saturate at the `i32` range instead of wrapping.

use serde::{Deserialize, Serialize};

use crate::dice::{DEFAULT_SIDES, DiceSpec};
use crate::error::{RulesError, RulesResult};

/// Modifier points equivalent to one die.
pub const POINTS_PER_DIE: i32 = 4;

/// A damage roll of six-sided dice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DamageDice {
    /// Number of dice.
    pub count: i32,
    /// Flat amount added to the dice.
    pub modifier: i32,
    /// Factor applied to the total.
    pub multiplier: i32,
    /// Faces per die (six unless converted from another pool).
    pub sides: i32,
}

impl DamageDice {
    /// Create `count` six-sided dice plus `modifier`.
    pub fn new(count: i32, modifier: i32) -> Self {
        Self {
            count,
            modifier,
            multiplier: 1,
            sides: DEFAULT_SIDES,
        }
    }

    /// Bring the dice to canonical form by trading dice for modifier points.
    pub fn normalize(self) -> Self {
        if self.count == 1 && self.modifier < 3 {
            return self;
        }
        let (count, modifier) = if self.modifier > 2 {
            let gained = (self.modifier - 3) / POINTS_PER_DIE + 1;
            (
                self.count.saturating_add(gained),
                (self.modifier - 3) % POINTS_PER_DIE - 1,
            )
        } else if self.modifier < -1 && self.count > 1 {
            let wanted = (2 - i64::from(self.modifier)) / i64::from(POINTS_PER_DIE);
            let spent = wanted.min(i64::from(self.count) - 1);
            (
                saturate(i64::from(self.count) - spent),
                saturate(i64::from(self.modifier) + spent * i64::from(POINTS_PER_DIE)),
            )
        } else {
            (self.count, self.modifier)
        };
        Self {
            count,
            modifier,
            ..self
        }
    }

    /// True if the dice are already in canonical form.
    pub fn is_canonical(&self) -> bool {
        match self.count {
            1 => self.modifier < 3,
            c if c > 1 => (-1..=2).contains(&self.modifier),
            _ => true,
        }
    }

    /// Re-express `other` with this value's dice count.
    pub fn normalize_count(&self, other: &DamageDice) -> DamageDice {
        let traded = i64::from(other.count) - i64::from(self.count);
        DamageDice {
            count: self.count,
            modifier: saturate(i64::from(other.modifier) + i64::from(POINTS_PER_DIE) * traded),
            ..*other
        }
    }

    /// The bonus that, added to `other`, makes it equivalent to `self`.
    pub fn difference(&self, other: &DamageDice) -> i32 {
        self.modifier.saturating_sub(self.normalize_count(other).modifier)
    }

    /// Add a flat amount and return the canonical result.
    pub fn plus(self, flat: i32) -> Self {
        Self {
            modifier: self.modifier.saturating_add(flat),
            ..self
        }
        .normalize()
    }
}

fn saturate(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(if value < 0 { i32::MIN } else { i32::MAX })
}

impl std::fmt::Display for DamageDice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d", self.count)?;
        if self.sides != DEFAULT_SIDES {
            write!(f, "{}", self.sides)?;
        }
        if self.modifier != 0 {
            write!(f, "{:+}", self.modifier)?;
        }
        if self.multiplier != 1 {
            write!(f, "x{}", self.multiplier)?;
        }
        Ok(())
    }
}

impl From<DamageDice> for DiceSpec {
    fn from(dice: DamageDice) -> Self {
        DiceSpec {
            count: dice.count,
            sides: dice.sides,
            modifier: dice.modifier,
            multiplier: dice.multiplier,
        }
    }
}

impl TryFrom<DiceSpec> for DamageDice {
    type Error = RulesError;

    fn try_from(spec: DiceSpec) -> Result<Self, Self::Error> {
        if spec.sides != DEFAULT_SIDES && !spec.is_flat() {
            return Err(RulesError::SidesMismatch {
                left: DEFAULT_SIDES,
                right: spec.sides,
            });
        }
        Ok(Self {
            count: spec.count,
            modifier: spec.modifier,
            multiplier: spec.multiplier,
            sides: DEFAULT_SIDES,
        })
    }
}

/// Parse damage notation such as `2d-1` into canonical damage dice.
pub fn parse_damage(text: &str) -> RulesResult<DamageDice> {
    let dice = DamageDice::try_from(DiceSpec::parse(text)?)?;
    Ok(dice.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn normalize_table() {
        assert_eq!(DamageDice::new(1, 3).normalize(), DamageDice::new(2, -1));
        assert_eq!(DamageDice::new(2, -5).normalize(), DamageDice::new(1, -1));
        assert_eq!(DamageDice::new(10, 10).normalize(), DamageDice::new(12, 2));
    }

    #[test]
    fn normalize_leaves_canonical_single_die() {
        assert_eq!(DamageDice::new(1, -4).normalize(), DamageDice::new(1, -4));
        assert_eq!(DamageDice::new(1, 2).normalize(), DamageDice::new(1, 2));
    }

    #[test]
    fn normalize_count_and_difference() {
        let base = DamageDice::new(2, 1);
        let other = DamageDice::new(1, 2);
        assert_eq!(base.normalize_count(&other), DamageDice::new(2, -2));
        assert_eq!(base.difference(&other), 3);
        assert_eq!(other.difference(&base), -3);
    }

    #[test]
    fn plus_renormalizes() {
        assert_eq!(DamageDice::new(2, 1).plus(2), DamageDice::new(3, -1));
        assert_eq!(DamageDice::new(2, 0).plus(-3), DamageDice::new(1, 1));
    }

    #[test]
    fn normalize_extreme_values() {
        assert_eq!(
            DamageDice::new(i32::MAX, 3).normalize(),
            DamageDice::new(i32::MAX, -1)
        );
        assert_eq!(
            DamageDice::new(1, i32::MAX).normalize(),
            DamageDice::new(536_870_913, -1)
        );
        assert_eq!(
            DamageDice::new(2, i32::MIN).normalize(),
            DamageDice::new(1, i32::MIN + 4)
        );
        assert_eq!(
            DamageDice::new(i32::MAX, -i32::MAX).normalize(),
            DamageDice::new(i32::MAX - 536_870_912, 1)
        );
    }

    #[test]
    fn extreme_counts_saturate_comparisons() {
        let few = DamageDice::new(0, 0);
        let many = DamageDice::new(i32::MAX, 0);
        assert_eq!(few.normalize_count(&many).modifier, i32::MAX);
        assert_eq!(many.normalize_count(&few).modifier, i32::MIN);
        assert_eq!(few.difference(&many), i32::MIN + 1);
        assert_eq!(DamageDice::new(2, i32::MAX).plus(1).count, 536_870_914);
    }

    #[test]
    fn display_always_shows_count() {
        assert_eq!(DamageDice::new(1, 0).to_string(), "1d");
        assert_eq!(DamageDice::new(2, -1).to_string(), "2d-1");
        assert_eq!(DamageDice::new(13, 2).to_string(), "13d+2");
        let tripled = DamageDice {
            multiplier: 3,
            ..DamageDice::new(6, 0)
        };
        assert_eq!(tripled.to_string(), "6dx3");
    }

    #[test]
    fn parse_damage_normalizes() {
        assert_eq!(parse_damage("1d+3").unwrap(), DamageDice::new(2, -1));
        assert_eq!(parse_damage("d").unwrap(), DamageDice::new(1, 0));
        assert!(matches!(
            parse_damage("2d8"),
            Err(RulesError::SidesMismatch { .. })
        ));
        assert!(parse_damage("2d+x").is_err());
    }

    fn canonical() -> impl Strategy<Value = DamageDice> {
        (1..40i32, -20..20i32).prop_map(|(count, modifier)| {
            DamageDice::new(count, modifier).normalize()
        })
    }

    proptest! {
        #[test]
        fn normalized_dice_are_canonical(count in 1..200i32, modifier in -500..500i32) {
            let dice = DamageDice::new(count, modifier).normalize();
            prop_assert!(dice.is_canonical(), "{dice:?} is not canonical");
        }

        #[test]
        fn normalize_preserves_average(count in 1..200i32, modifier in -500..500i32) {
            let dice = DamageDice::new(count, modifier);
            let normal = dice.normalize();
            prop_assert_eq!(normal.difference(&dice), 0);
        }

        #[test]
        fn canonical_dice_round_trip(dice in canonical()) {
            let parsed = DiceSpec::parse(&dice.to_string()).unwrap();
            prop_assert_eq!(parsed, DiceSpec::from(dice));
        }

        #[test]
        fn self_difference_is_zero(count in 0..100i32, modifier in -50..50i32) {
            let dice = DamageDice::new(count, modifier);
            prop_assert_eq!(dice.difference(&dice.normalize_count(&dice)), 0);
        }
    }
}
