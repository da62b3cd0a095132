//! Error types for the rules engine.

/// Errors that can occur during rules computations.
#[derive(Debug, thiserror::Error)]
pub enum RulesError {
    /// Text does not match the dice, measurement, or rate-of-fire grammar.
    #[error("invalid format: '{0}'")]
    InvalidFormat(String),

    /// Two dice pools with different, non-foldable side counts were combined.
    #[error("cannot combine d{left} with d{right}")]
    SidesMismatch {
        /// Sides of the left operand.
        left: i32,
        /// Sides of the right operand.
        right: i32,
    },

    /// A distance lookup found no entry in the range table.
    #[error("no applicable range for distance {0}")]
    NoApplicableRange(f64),

    /// A divisor that must be positive was zero.
    #[error("division by zero: {0} must be positive")]
    DivideByZero(&'static str),

    /// Dice arithmetic left the range of the pool's integer fields.
    #[error("arithmetic overflow in {0}")]
    Overflow(&'static str),

    /// A pool has more dice than can be listed face by face.
    #[error("too many dice to list: {count} (limit {limit})")]
    TooManyDice {
        /// Dice in the pool.
        count: i32,
        /// Largest pool whose faces are listed.
        limit: i32,
    },

    /// The supplied configuration cannot be used.
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<serde_json::Error> for RulesError {
    fn from(err: serde_json::Error) -> Self {
        Self::InvalidConfig(err.to_string())
    }
}

/// Convenience result type for rules operations.
pub type RulesResult<T> = Result<T, RulesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages() {
        assert_eq!(
            RulesError::InvalidFormat("2d+a".to_string()).to_string(),
            "invalid format: '2d+a'"
        );
        assert_eq!(
            RulesError::SidesMismatch { left: 6, right: 10 }.to_string(),
            "cannot combine d6 with d10"
        );
        assert_eq!(
            RulesError::DivideByZero("recoil").to_string(),
            "division by zero: recoil must be positive"
        );
        assert_eq!(
            RulesError::Overflow("dice addition").to_string(),
            "arithmetic overflow in dice addition"
        );
        assert_eq!(
            RulesError::TooManyDice {
                count: 20_000,
                limit: 10_000
            }
            .to_string(),
            "too many dice to list: 20000 (limit 10000)"
        );
    }

    #[test]
    fn json_errors_become_config_errors() {
        let err = serde_json::from_str::<u32>("nope").unwrap_err();
        assert!(matches!(RulesError::from(err), RulesError::InvalidConfig(_)));
    }
}
