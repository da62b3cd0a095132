use gr_mechanics::damage::parse_damage;

pub fn run(dice: &str, plus: i32) -> Result<(), String> {
    let damage = parse_damage(dice).map_err(|e| e.to_string())?;
    println!("{}", damage.plus(plus));
    Ok(())
}
