//! Linear measurements and conversion to yards.
//!
//! Range and size tables are indexed in yards. Imperial units convert
//! exactly; metric units depend on the [`ConversionPolicy`] the caller picks.

use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{RulesError, RulesResult};

static MEASUREMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^([+-]?(?:\d+(?:\.\d*)?|\.\d+))\s*([A-Za-z'"]*)$"#)
        .expect("measurement pattern is valid")
});

/// Yards in a meter.
const YARDS_PER_METER: f64 = 1.0 / 0.9144;

/// A unit of length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LengthUnit {
    /// Inch.
    Inch,
    /// Foot.
    Foot,
    /// Yard, the base unit.
    #[default]
    Yard,
    /// Statute mile.
    Mile,
    /// Millimeter.
    Millimeter,
    /// Centimeter.
    Centimeter,
    /// Meter.
    Meter,
    /// Kilometer.
    Kilometer,
}

impl LengthUnit {
    /// Look up a unit by any of its accepted spellings.
    pub fn from_token(token: &str) -> Option<Self> {
        let token = token.trim();
        match token {
            "'" => return Some(Self::Foot),
            "\"" => return Some(Self::Inch),
            _ => {}
        }
        match token.to_lowercase().as_str() {
            "" | "y" | "yd" | "yds" | "yard" | "yards" => Some(Self::Yard),
            "ft" | "foot" | "feet" => Some(Self::Foot),
            "in" | "inch" | "inches" => Some(Self::Inch),
            "mi" | "mile" | "miles" => Some(Self::Mile),
            "mm" | "millimeter" | "millimeters" => Some(Self::Millimeter),
            "cm" | "centimeter" | "centimeters" => Some(Self::Centimeter),
            "m" | "meter" | "meters" => Some(Self::Meter),
            "km" | "kilometer" | "kilometers" => Some(Self::Kilometer),
            _ => None,
        }
    }

    /// True for units of the metric ladder.
    pub fn is_metric(self) -> bool {
        matches!(
            self,
            Self::Millimeter | Self::Centimeter | Self::Meter | Self::Kilometer
        )
    }

    /// Yards per one of this unit under the given policy.
    pub fn yards_per_unit(self, policy: ConversionPolicy) -> f64 {
        match (self, policy) {
            (Self::Inch, _) => 1.0 / 36.0,
            (Self::Foot, _) => 1.0 / 3.0,
            (Self::Yard, _) => 1.0,
            (Self::Mile, _) => 1760.0,
            (Self::Millimeter, ConversionPolicy::Real) => YARDS_PER_METER / 1000.0,
            (Self::Centimeter, ConversionPolicy::Real) => YARDS_PER_METER / 100.0,
            (Self::Meter, ConversionPolicy::Real) => YARDS_PER_METER,
            (Self::Kilometer, ConversionPolicy::Real) => YARDS_PER_METER * 1000.0,
            (Self::Millimeter, ConversionPolicy::Game) => 1.0 / 900.0,
            (Self::Centimeter, ConversionPolicy::Game) => 1.0 / 90.0,
            (Self::Meter, ConversionPolicy::Game) => 1.0,
            (Self::Kilometer, ConversionPolicy::Game) => 1000.0,
        }
    }

    /// Short display symbol.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::Inch => "in",
            Self::Foot => "ft",
            Self::Yard => "yd",
            Self::Mile => "mi",
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Meter => "m",
            Self::Kilometer => "km",
        }
    }
}

impl std::fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// How metric lengths convert to yards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionPolicy {
    /// Exact ratios (1 yd = 0.9144 m).
    #[default]
    Real,
    /// Game-table ratios: 1 m = 1 yd, 1 in = 2.5 cm.
    Game,
}

/// A length with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearMeasurement {
    /// Numeric amount.
    pub value: f64,
    /// Unit of `value`.
    pub unit: LengthUnit,
}

impl LinearMeasurement {
    /// Create a measurement.
    pub fn new(value: f64, unit: LengthUnit) -> Self {
        Self { value, unit }
    }

    /// Parse text like `30`, `12 ft`, `5'`, `2.5km`. No unit means yards.
    pub fn parse(text: &str) -> RulesResult<Self> {
        let trimmed = text.trim();
        let invalid = || RulesError::InvalidFormat(text.to_string());
        let caps = MEASUREMENT_PATTERN.captures(trimmed).ok_or_else(invalid)?;
        let value: f64 = caps[1].parse().map_err(|_| invalid())?;
        let unit = LengthUnit::from_token(&caps[2]).ok_or_else(invalid)?;
        Ok(Self { value, unit })
    }

    /// Convert to yards.
    pub fn to_yards(self, policy: ConversionPolicy) -> f64 {
        measurement_to_base_unit(self.value, self.unit, policy)
    }
}

impl FromStr for LinearMeasurement {
    type Err = RulesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for LinearMeasurement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.unit)
    }
}

/// Convert a length to yards.
pub fn measurement_to_base_unit(value: f64, unit: LengthUnit, policy: ConversionPolicy) -> f64 {
    value * unit.yards_per_unit(policy)
}
