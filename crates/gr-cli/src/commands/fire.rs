use gr_mechanics::FireProfile;
use gr_mechanics::fire::resolve;

pub fn run(rof: &str, recoil: i32, shots: Option<i32>, margin: i32) -> Result<(), String> {
    let profile = FireProfile::new(recoil, rof);
    let result = resolve(&profile, shots, margin).map_err(|e| e.to_string())?;

    println!("  RoF {} (Rcl {})", result.label, result.recoil);
    println!("  Rapid fire bonus: {:+}", result.rapid_fire_bonus);
    println!("  Hits: {}", result.hit_count);
    Ok(())
}
