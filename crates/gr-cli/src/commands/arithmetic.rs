use gr_mechanics::dice::algebra::{SidesPolicy, combine_text};
use gr_mechanics::{Operation, RulesConfig};

pub fn run(
    config: &RulesConfig,
    left: &str,
    right: &str,
    operation: Operation,
    strict: bool,
) -> Result<(), String> {
    let policy = if strict {
        SidesPolicy::Strict
    } else {
        SidesPolicy::Lenient
    };

    let result = combine_text(left, right, operation, policy, config.gurps_style)
        .map_err(|e| e.to_string())?;
    println!("{result}");

    Ok(())
}
