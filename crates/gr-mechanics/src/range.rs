//! Speed/range penalties and size modifiers.
//!
//! A [`RangeTable`] is an ascending list of distance thresholds in yards.
//! Lookups take the first entry whose bound is at or above the distance.
//! Tables are data: the Basic Set table and the simplified range bands
//! are provided, and callers can supply their own.

use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};
use crate::measure::{ConversionPolicy, LengthUnit, LinearMeasurement};

/// Relative slack when comparing a distance to a bound, so that a
/// converted `1.5 in` still lands on the `1.5 in` threshold.
const BOUND_TOLERANCE: f64 = 1e-9;

/// Size thresholds below two yards, smallest first.
const SMALL_SIZES: [(f64, LengthUnit, i32); 15] = [
    (1.0 / 5.0, LengthUnit::Inch, -15),
    (1.0 / 3.0, LengthUnit::Inch, -14),
    (1.0 / 2.0, LengthUnit::Inch, -13),
    (2.0 / 3.0, LengthUnit::Inch, -12),
    (1.0, LengthUnit::Inch, -11),
    (1.5, LengthUnit::Inch, -10),
    (2.0, LengthUnit::Inch, -9),
    (3.0, LengthUnit::Inch, -8),
    (5.0, LengthUnit::Inch, -7),
    (8.0, LengthUnit::Inch, -6),
    (1.0, LengthUnit::Foot, -5),
    (1.5, LengthUnit::Foot, -4),
    (2.0, LengthUnit::Foot, -3),
    (1.0, LengthUnit::Yard, -2),
    (1.5, LengthUnit::Yard, -1),
];

/// One row of a range table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RangeThreshold {
    /// Largest distance in yards this row covers; `None` covers everything beyond.
    #[serde(default)]
    pub max: Option<f64>,
    /// Penalty applied at this distance.
    pub penalty: i32,
    /// Optional band name (e.g. "Short").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl RangeThreshold {
    /// A row covering distances up to `max` yards.
    pub fn up_to(max: f64, penalty: i32) -> Self {
        Self {
            max: Some(max),
            penalty,
            description: None,
        }
    }

    /// A final row covering every larger distance.
    pub fn unbounded(penalty: i32) -> Self {
        Self {
            max: None,
            penalty,
            description: None,
        }
    }

    /// Attach a band name.
    pub fn described(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn covers(&self, distance: f64) -> bool {
        match self.max {
            None => true,
            Some(max) => at_most(distance, max),
        }
    }
}

/// An ordered speed/range table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RangeTable {
    /// Rows in ascending order of `max`.
    pub entries: Vec<RangeThreshold>,
}

impl RangeTable {
    /// Wrap a list of rows. Ordering is checked at lookup time.
    pub fn new(entries: Vec<RangeThreshold>) -> Self {
        Self { entries }
    }

    /// The Basic Set speed/range table.
    ///
    /// 2 yd is 0, then each step of the 3, 5, 7, 10, 15, 20, 30, 50, 70,
    /// 100... progression costs one more point.
    pub fn standard() -> Self {
        let mut entries = vec![
            RangeThreshold::up_to(2.0, 0),
            RangeThreshold::up_to(3.0, -1),
            RangeThreshold::up_to(5.0, -2),
            RangeThreshold::up_to(7.0, -3),
        ];
        let mut penalty = -4;
        let mut scale = 1.0;
        for _ in 0..7 {
            for step in [10.0, 15.0, 20.0, 30.0, 50.0, 70.0] {
                entries.push(RangeThreshold::up_to(step * scale, penalty));
                penalty -= 1;
            }
            scale *= 10.0;
        }
        entries.push(RangeThreshold::unbounded(penalty));
        Self { entries }
    }

    /// Simplified range bands from Monster Hunters.
    pub fn simplified() -> Self {
        Self {
            entries: vec![
                RangeThreshold::up_to(5.0, 0).described("Close"),
                RangeThreshold::up_to(20.0, -3).described("Short"),
                RangeThreshold::up_to(100.0, -7).described("Medium"),
                RangeThreshold::up_to(500.0, -11).described("Long"),
                RangeThreshold::unbounded(-15).described("Extreme"),
            ],
        }
    }

    /// Check that the table is non-empty, strictly ascending, and unbounded only at the end.
    pub fn validate(&self) -> RulesResult<()> {
        if self.entries.is_empty() {
            return Err(RulesError::InvalidConfig("range table is empty".to_string()));
        }
        let last = self.entries.len() - 1;
        let mut previous: Option<f64> = None;
        for (index, entry) in self.entries.iter().enumerate() {
            match entry.max {
                None if index != last => {
                    return Err(RulesError::InvalidConfig(format!(
                        "unbounded range row {index} is not last"
                    )));
                }
                None => {}
                Some(max) if max.is_nan() => {
                    return Err(RulesError::InvalidConfig(format!(
                        "range row {index} has no numeric bound"
                    )));
                }
                Some(max) => {
                    if previous.is_some_and(|p| max <= p) {
                        return Err(RulesError::InvalidConfig(format!(
                            "range row {index} ({max} yd) is not above the previous row"
                        )));
                    }
                    previous = Some(max);
                }
            }
        }
        Ok(())
    }

    /// The row that applies at `distance` yards.
    pub fn lookup(&self, distance: f64) -> RulesResult<&RangeThreshold> {
        if distance.is_nan() || self.validate().is_err() {
            return Err(RulesError::NoApplicableRange(distance));
        }
        self.entries
            .iter()
            .find(|entry| entry.covers(distance))
            .ok_or(RulesError::NoApplicableRange(distance))
    }
}

fn at_most(distance: f64, bound: f64) -> bool {
    distance <= bound + bound.abs().max(1.0) * BOUND_TOLERANCE
}

/// Speed/range penalty for a distance in yards.
pub fn speed_range_penalty(distance: f64, table: &RangeTable) -> RulesResult<i32> {
    let entry = table.lookup(distance)?;
    tracing::debug!(distance, penalty = entry.penalty, "range lookup");
    Ok(entry.penalty)
}

/// Speed/range penalty for a measurement in any unit.
pub fn penalty_for_measurement(
    measurement: &LinearMeasurement,
    policy: ConversionPolicy,
    table: &RangeTable,
) -> RulesResult<i32> {
    speed_range_penalty(measurement.to_yards(policy), table)
}

/// Size modifier for an object whose longest dimension is `size` yards.
///
/// Below two yards a fixed scale applies; above it the size scale mirrors
/// the range table.
pub fn size_modifier(size: f64, table: &RangeTable) -> RulesResult<i32> {
    if size.is_nan() {
        return Err(RulesError::NoApplicableRange(size));
    }
    for (amount, unit, modifier) in SMALL_SIZES {
        let bound = amount * unit.yards_per_unit(ConversionPolicy::Real);
        if at_most(size, bound) {
            tracing::debug!(size, modifier, "size lookup");
            return Ok(modifier);
        }
    }
    let modifier = -speed_range_penalty(size, table)?;
    tracing::debug!(size, modifier, "size lookup");
    Ok(modifier)
}
