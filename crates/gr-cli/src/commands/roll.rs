use colored::Colorize;
use gr_mechanics::dice::roll::roll_detailed;
use gr_mechanics::{DiceSpec, RulesConfig};
use rand::SeedableRng;
use rand::rngs::StdRng;

pub fn run(
    config: &RulesConfig,
    dice: &str,
    seed: Option<u64>,
    extra_dice: bool,
) -> Result<(), String> {
    let spec = DiceSpec::parse(dice).map_err(|e| e.to_string())?;
    let extra = extra_dice || config.extra_dice_from_modifiers;

    let result = match seed {
        Some(seed) => roll_detailed(&spec, extra, &mut StdRng::seed_from_u64(seed)),
        None => roll_detailed(&spec, extra, &mut rand::rng()),
    }
    .map_err(|e| e.to_string())?;

    let faces: Vec<String> = result.faces.iter().map(u32::to_string).collect();
    println!(
        "  {} [{}] = {}",
        result.rolled.format(config.gurps_style),
        faces.join(", "),
        result.total.to_string().bold().green()
    );
    if result.rolled != spec {
        println!("  (rolled as {} instead of {})", result.rolled, spec);
    }

    Ok(())
}
