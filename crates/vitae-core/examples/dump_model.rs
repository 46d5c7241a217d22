use std::env;

use vitae_core::Model;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = env::args().nth(1).ok_or("missing document path")?;
    let contents = std::fs::read_to_string(&path)?;
    let raw: serde_json::Value = serde_json::from_str(&contents)?;

    let model = Model::load(&raw)?;
    let json = serde_json::to_string_pretty(&model.dump())?;
    println!("{json}");

    Ok(())
}
