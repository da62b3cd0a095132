use comfy_table::{ContentArrangement, Table};
use gr_mechanics::StrengthProfile;

pub fn run(scores: &[i32]) -> Result<(), String> {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ST", "Thrust", "Swing", "Basic Lift"]);

    for &strength in scores {
        let profile = StrengthProfile::for_strength(strength);
        table.add_row(vec![
            profile.strength.to_string(),
            profile.thrust.to_string(),
            profile.swing.to_string(),
            format!("{} lbs", profile.lift),
        ]);
    }

    println!("{table}");
    Ok(())
}
