use gr_mechanics::{LinearMeasurement, RulesConfig, size_modifier};

pub fn run_range(config: &RulesConfig, distance: &str) -> Result<(), String> {
    let measurement = LinearMeasurement::parse(distance).map_err(|e| e.to_string())?;
    let yards = measurement.to_yards(config.conversion);
    let table = config.range_table.table();
    let entry = table.lookup(yards).map_err(|e| e.to_string())?;
    let penalty = entry.penalty;

    match &entry.description {
        Some(band) => println!("{penalty:+} ({band}, {} yd)", round_yards(yards)),
        None => println!("{penalty:+} ({} yd)", round_yards(yards)),
    }
    Ok(())
}

pub fn run_size(config: &RulesConfig, length: &str) -> Result<(), String> {
    let measurement = LinearMeasurement::parse(length).map_err(|e| e.to_string())?;
    let yards = measurement.to_yards(config.conversion);
    let modifier =
        size_modifier(yards, &config.range_table.table()).map_err(|e| e.to_string())?;
    println!("SM {modifier:+}");
    Ok(())
}

fn round_yards(yards: f64) -> f64 {
    (yards * 100.0).round() / 100.0
}
