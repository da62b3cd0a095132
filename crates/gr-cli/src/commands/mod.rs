pub mod arithmetic;
pub mod damage;
pub mod fire;
pub mod range;
pub mod roll;
pub mod strength;

use std::path::Path;

use gr_mechanics::RulesConfig;

/// Load the rules configuration, or the defaults when no file is given.
pub fn load_config(path: Option<&Path>) -> Result<RulesConfig, String> {
    let Some(path) = path else {
        return Ok(RulesConfig::default());
    };
    tracing::debug!(path = %path.display(), "loading rules config");
    let json = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read config '{}': {e}", path.display()))?;
    RulesConfig::from_json(&json).map_err(|e| format!("{}: {e}", path.display()))
}
