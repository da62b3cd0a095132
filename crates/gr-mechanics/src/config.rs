//! Caller-supplied rules configuration.

use serde::{Deserialize, Serialize};

use crate::error::RulesResult;
use crate::measure::ConversionPolicy;
use crate::range::{RangeTable, RangeThreshold};

/// Which speed/range table to use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "entries")]
pub enum RangeTableChoice {
    /// The Basic Set speed/range table.
    #[default]
    Standard,
    /// Simplified range bands.
    Simplified,
    /// An explicit table.
    Custom(Vec<RangeThreshold>),
}

impl RangeTableChoice {
    /// Build the table this choice names.
    pub fn table(&self) -> RangeTable {
        match self {
            Self::Standard => RangeTable::standard(),
            Self::Simplified => RangeTable::simplified(),
            Self::Custom(entries) => RangeTable::new(entries.clone()),
        }
    }
}

/// Options that vary between campaigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Speed/range table for range and size lookups.
    pub range_table: RangeTableChoice,
    /// How metric lengths convert to yards.
    pub conversion: ConversionPolicy,
    /// Trade large positive modifiers for extra dice before rolling.
    pub extra_dice_from_modifiers: bool,
    /// Format dice GURPS style (`d+2` rather than `1d6+2`).
    pub gurps_style: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            range_table: RangeTableChoice::Standard,
            conversion: ConversionPolicy::Real,
            extra_dice_from_modifiers: false,
            gurps_style: true,
        }
    }
}

impl RulesConfig {
    /// Load and validate a configuration from JSON.
    pub fn from_json(json: &str) -> RulesResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.range_table.table().validate()?;
        tracing::debug!(?config, "loaded rules config");
        Ok(config)
    }

    /// Set the range table.
    pub fn with_range_table(mut self, range_table: RangeTableChoice) -> Self {
        self.range_table = range_table;
        self
    }

    /// Set the metric conversion policy.
    pub fn with_conversion(mut self, conversion: ConversionPolicy) -> Self {
        self.conversion = conversion;
        self
    }

    /// Enable or disable trading modifiers for extra dice.
    pub fn with_extra_dice_from_modifiers(mut self, enabled: bool) -> Self {
        self.extra_dice_from_modifiers = enabled;
        self
    }

    /// Choose GURPS-style or plain dice formatting.
    pub fn with_gurps_style(mut self, gurps_style: bool) -> Self {
        self.gurps_style = gurps_style;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RulesError;

    #[test]
    fn default_values() {
        let config = RulesConfig::default();
        assert_eq!(config.range_table, RangeTableChoice::Standard);
        assert_eq!(config.conversion, ConversionPolicy::Real);
        assert!(!config.extra_dice_from_modifiers);
        assert!(config.gurps_style);
    }

    #[test]
    fn builder_chain() {
        let config = RulesConfig::default()
            .with_range_table(RangeTableChoice::Simplified)
            .with_conversion(ConversionPolicy::Game)
            .with_extra_dice_from_modifiers(true)
            .with_gurps_style(false);
        assert_eq!(config.range_table, RangeTableChoice::Simplified);
        assert_eq!(config.conversion, ConversionPolicy::Game);
        assert!(config.extra_dice_from_modifiers);
        assert!(!config.gurps_style);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = RulesConfig::from_json(r#"{ "conversion": "game" }"#).unwrap();
        assert_eq!(config.conversion, ConversionPolicy::Game);
        assert_eq!(config.range_table, RangeTableChoice::Standard);
        assert!(config.gurps_style);
    }

    #[test]
    fn custom_table_from_json() {
        let json = r#"{
            "range_table": {
                "kind": "custom",
                "entries": [
                    { "max": 10, "penalty": 0 },
                    { "max": 100, "penalty": -5, "description": "far" },
                    { "penalty": -10 }
                ]
            }
        }"#;
        let config = RulesConfig::from_json(json).unwrap();
        let table = config.range_table.table();
        assert_eq!(table.entries.len(), 3);
        assert_eq!(table.entries[2].max, None);
        assert_eq!(table.lookup(50.0).unwrap().penalty, -5);
    }

    #[test]
    fn simplified_from_json() {
        let config = RulesConfig::from_json(r#"{ "range_table": { "kind": "simplified" } }"#)
            .unwrap();
        assert_eq!(config.range_table, RangeTableChoice::Simplified);
    }

    #[test]
    fn misordered_custom_table_rejected() {
        let json = r#"{
            "range_table": {
                "kind": "custom",
                "entries": [ { "max": 10, "penalty": 0 }, { "max": 5, "penalty": -1 } ]
            }
        }"#;
        assert!(matches!(
            RulesConfig::from_json(json),
            Err(RulesError::InvalidConfig(_))
        ));
    }

    #[test]
    fn malformed_json_rejected() {
        assert!(matches!(
            RulesConfig::from_json("{ not json"),
            Err(RulesError::InvalidConfig(_))
        ));
    }
}
