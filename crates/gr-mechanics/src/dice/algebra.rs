//! Combining dice pools.
//!
//! Operands are flattened first: the multiplier is folded into count and
//! modifier, so `2dx2` combines as `4d`. This is a notational shortcut and
//! does not preserve the distribution of "roll, then multiply".

use serde::{Deserialize, Serialize};

use super::DiceSpec;
use crate::error::{RulesError, RulesResult};

/// Which way two pools are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// Sum counts and modifiers.
    Add,
    /// Remove the right pool's dice and modifier from the left.
    Subtract,
}

/// How pools with different side counts are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SidesPolicy {
    /// Side counts must match.
    Strict,
    /// A flat operand adopts the other operand's sides.
    #[default]
    Lenient,
}

impl DiceSpec {
    /// Fold the multiplier into count and modifier.
    pub fn flatten_multiplier(self) -> RulesResult<Self> {
        let overflow = || RulesError::Overflow("multiplier flattening");
        Ok(Self {
            count: self.count.checked_mul(self.multiplier).ok_or_else(overflow)?,
            sides: self.sides,
            modifier: self
                .modifier
                .checked_mul(self.multiplier)
                .ok_or_else(overflow)?,
            multiplier: 1,
        })
    }
}

/// Add two pools that must share a side count.
pub fn add_strict(left: &DiceSpec, right: &DiceSpec) -> RulesResult<DiceSpec> {
    combine(left, right, Operation::Add, SidesPolicy::Strict)
}

/// Subtract `right` from `left`; side counts must match. The count never drops below zero.
pub fn subtract_strict(left: &DiceSpec, right: &DiceSpec) -> RulesResult<DiceSpec> {
    combine(left, right, Operation::Subtract, SidesPolicy::Strict)
}

/// Add two pools, letting a flat value join any pool.
pub fn add(left: &DiceSpec, right: &DiceSpec) -> RulesResult<DiceSpec> {
    combine(left, right, Operation::Add, SidesPolicy::Lenient)
}

/// Subtract `right` from `left`, letting a flat value join any pool.
pub fn subtract(left: &DiceSpec, right: &DiceSpec) -> RulesResult<DiceSpec> {
    combine(left, right, Operation::Subtract, SidesPolicy::Lenient)
}

/// Combine two pools with the given operation and sides policy.
pub fn combine(
    left: &DiceSpec,
    right: &DiceSpec,
    operation: Operation,
    policy: SidesPolicy,
) -> RulesResult<DiceSpec> {
    let mut left = left.flatten_multiplier()?;
    let mut right = right.flatten_multiplier()?;

    if left.sides != right.sides {
        match policy {
            SidesPolicy::Lenient if right.is_flat() => right.sides = left.sides,
            SidesPolicy::Lenient if left.is_flat() => left.sides = right.sides,
            _ => {
                return Err(RulesError::SidesMismatch {
                    left: left.sides,
                    right: right.sides,
                });
            }
        }
    }

    let combined = match operation {
        Operation::Add => {
            let overflow = || RulesError::Overflow("dice addition");
            DiceSpec::new(
                left.count.checked_add(right.count).ok_or_else(overflow)?,
                left.sides,
                left.modifier.checked_add(right.modifier).ok_or_else(overflow)?,
            )
        }
        Operation::Subtract => {
            let overflow = || RulesError::Overflow("dice subtraction");
            DiceSpec::new(
                left.count.checked_sub(right.count).ok_or_else(overflow)?.max(0),
                left.sides,
                left.modifier.checked_sub(right.modifier).ok_or_else(overflow)?,
            )
        }
    };
    Ok(combined.normalize())
}

/// Parse both operands, combine them, and format the result.
pub fn combine_text(
    left: &str,
    right: &str,
    operation: Operation,
    policy: SidesPolicy,
    gurps_style: bool,
) -> RulesResult<String> {
    let left = DiceSpec::parse(left)?;
    let right = DiceSpec::parse(right)?;
    let result = combine(&left, &right, operation, policy)?;
    tracing::debug!(%left, %right, ?operation, ?policy, %result, "combined dice");
    Ok(result.format(gurps_style))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(text: &str) -> DiceSpec {
        DiceSpec::parse(text).unwrap()
    }

    #[test]
    fn flatten_folds_multiplier() {
        let flat = parse("2d+1x3").flatten_multiplier().unwrap();
        assert_eq!(flat, DiceSpec::new(6, 6, 3));
    }

    #[test]
    fn strict_add_same_sides() {
        let sum = add_strict(&parse("2d+1"), &parse("1d-3")).unwrap();
        assert_eq!(sum.to_string(), "3d-2");
    }

    #[test]
    fn strict_add_flattens_first() {
        let sum = add_strict(&parse("2dx2"), &parse("d+1")).unwrap();
        assert_eq!(sum.to_string(), "5d+1");
    }

    #[test]
    fn strict_add_rejects_mismatch() {
        let err = add_strict(&parse("2d"), &parse("1d10")).unwrap_err();
        assert!(matches!(
            err,
            RulesError::SidesMismatch { left: 6, right: 10 }
        ));
    }

    #[test]
    fn strict_add_rejects_flat_against_dice() {
        assert!(add_strict(&parse("2d"), &parse("+3")).is_err());
    }

    #[test]
    fn strict_subtract_clamps_count() {
        let diff = subtract_strict(&parse("1d+2"), &parse("3d+1")).unwrap();
        assert_eq!(diff, DiceSpec::new(0, 6, 1));
        assert_eq!(diff.to_string(), "+1");
    }

    #[test]
    fn lenient_add_folds_flat_operand() {
        assert_eq!(add(&parse("2d"), &parse("3")).unwrap().to_string(), "2d+3");
        assert_eq!(add(&parse("-1"), &parse("3d10")).unwrap().to_string(), "3d10-1");
    }

    #[test]
    fn lenient_subtract_folds_flat_operand() {
        assert_eq!(
            subtract(&parse("2d+1"), &parse("4")).unwrap().to_string(),
            "2d-3"
        );
        assert_eq!(
            subtract(&parse("5"), &parse("2d+1")).unwrap().to_string(),
            "+4"
        );
    }

    #[test]
    fn lenient_still_rejects_two_dice_pools() {
        assert!(matches!(
            add(&parse("2d8"), &parse("1d6")),
            Err(RulesError::SidesMismatch { .. })
        ));
    }

    #[test]
    fn two_flat_values_combine() {
        assert_eq!(add(&parse("3"), &parse("-5")).unwrap().to_string(), "-2");
    }

    #[test]
    fn text_combination() {
        assert_eq!(
            combine_text("2d+1", "1d+2", Operation::Add, SidesPolicy::Strict, true).unwrap(),
            "3d+3"
        );
        assert_eq!(
            combine_text("3d", "1", Operation::Subtract, SidesPolicy::Lenient, true).unwrap(),
            "3d-1"
        );
        assert_eq!(
            combine_text("d", "d", Operation::Add, SidesPolicy::Lenient, false).unwrap(),
            "2d6"
        );
        assert!(combine_text("3d", "oops", Operation::Add, SidesPolicy::Lenient, true).is_err());
    }

    #[test]
    fn flatten_rejects_overflow() {
        assert!(matches!(
            parse("2dx2000000000").flatten_multiplier(),
            Err(RulesError::Overflow(_))
        ));
        assert!(matches!(
            parse("d+2000000000x2").flatten_multiplier(),
            Err(RulesError::Overflow(_))
        ));
        let edge = parse("2147483647dx1").flatten_multiplier().unwrap();
        assert_eq!(edge.count, i32::MAX);
    }

    #[test]
    fn add_rejects_overflow() {
        assert!(matches!(
            add(&parse("2dx2000000000"), &parse("1d")),
            Err(RulesError::Overflow(_))
        ));
        assert!(matches!(
            add(&parse("2147483647"), &parse("1")),
            Err(RulesError::Overflow(_))
        ));
        assert!(matches!(
            add_strict(&parse("2147483647d"), &parse("1d")),
            Err(RulesError::Overflow(_))
        ));
        assert_eq!(
            add(&parse("2147483646"), &parse("1")).unwrap(),
            DiceSpec::flat(i32::MAX)
        );
    }

    #[test]
    fn subtract_rejects_overflow() {
        let lowest = DiceSpec::flat(i32::MIN);
        assert!(matches!(
            subtract(&lowest, &parse("1")),
            Err(RulesError::Overflow(_))
        ));
        assert_eq!(
            subtract(&parse("2147483647d"), &parse("2147483647d")).unwrap(),
            DiceSpec::new(0, 6, 0)
        );
    }
}
