//! GURPS dice notation and combat-math rules engine.
//!
//! Parses and combines dice pools, rolls them with a pluggable random
//! source, keeps six-sided damage dice in canonical form, derives damage
//! and lift from Strength, looks up speed/range penalties and size
//! modifiers, and works out hits from automatic fire. Every operation is
//! a pure function over value types.

pub mod config;
pub mod damage;
pub mod dice;
pub mod error;
pub mod fire;
pub mod measure;
pub mod range;
pub mod strength;

pub use config::{RangeTableChoice, RulesConfig};
pub use damage::DamageDice;
pub use dice::DiceSpec;
pub use dice::algebra::{Operation, SidesPolicy};
pub use dice::roll::{PoolRoll, UniformDraw};
pub use error::{RulesError, RulesResult};
pub use fire::{FireProfile, FireResolution, RateOfFire};
pub use measure::{ConversionPolicy, LengthUnit, LinearMeasurement};
pub use range::{RangeTable, RangeThreshold, size_modifier, speed_range_penalty};
pub use strength::StrengthProfile;
