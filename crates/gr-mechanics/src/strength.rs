//! Damage and basic lift derived from Strength.
//!
//! These follow the published GURPS progression. The breakpoints (10, 19,
//! 28, 40, 50, 59, 79) are where the table changes step size and have no
//! simpler closed form.

use serde::{Deserialize, Serialize};

use crate::damage::DamageDice;

/// Basic lift in pounds: `ST² / 5`, to one decimal below 10 and whole pounds above.
pub fn calculate_lift(strength: i32) -> f64 {
    let raw = f64::from(strength) * f64::from(strength) / 5.0;
    if raw < 10.0 {
        (raw * 10.0).round() / 10.0
    } else {
        raw.round()
    }
}

/// Swinging damage for a Strength score.
pub fn calculate_swing_damage(strength: i32) -> DamageDice {
    if strength < 10 {
        return DamageDice::new(1, -(5 - strength.saturating_sub(1).div_euclid(2)));
    }
    if strength < 28 {
        let steps = strength - 9;
        return DamageDice::new(steps.div_euclid(4) + 1, steps.rem_euclid(4) - 1);
    }
    let mut value = strength;
    if strength > 40 {
        value -= (strength - 40).div_euclid(5);
    }
    if strength > 59 {
        value += 1;
    }
    value += 9;
    eighths(value)
}

/// Thrusting damage for a Strength score.
pub fn calculate_thrust_damage(strength: i32) -> DamageDice {
    if strength < 19 {
        return DamageDice::new(1, -(6 - strength.saturating_sub(1).div_euclid(2)));
    }
    let mut value = strength - 11;
    if strength > 50 {
        value -= 1;
    }
    if strength > 79 {
        value -= 1 + (strength - 80).div_euclid(5);
    }
    eighths(value)
}

/// Above the low range, every eight points is one die and every two points is +1.
fn eighths(value: i32) -> DamageDice {
    DamageDice::new(
        value.div_euclid(8) + 1,
        value.rem_euclid(8).div_euclid(2) - 1,
    )
}

/// Everything Strength determines, computed together.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthProfile {
    /// The Strength score.
    pub strength: i32,
    /// Basic lift in pounds.
    pub lift: f64,
    /// Swinging damage.
    pub swing: DamageDice,
    /// Thrusting damage.
    pub thrust: DamageDice,
}

impl StrengthProfile {
    /// Compute lift, swing, and thrust for a Strength score.
    pub fn for_strength(strength: i32) -> Self {
        let profile = Self {
            strength,
            lift: calculate_lift(strength),
            swing: calculate_swing_damage(strength),
            thrust: calculate_thrust_damage(strength),
        };
        tracing::debug!(
            strength,
            lift = profile.lift,
            swing = %profile.swing,
            thrust = %profile.thrust,
            "computed strength profile"
        );
        profile
    }
}
