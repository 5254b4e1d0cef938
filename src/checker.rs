use std::fs::read_to_string;

use tv_transcripts::config::CONFIG;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let raw = read_to_string(&CONFIG.store.path)?;
    let store: serde_json::Value = serde_json::from_str(&raw)?;
    let count = store
        .as_object()
        .map(|m| m.len())
        .ok_or("transcript store is not a json object")?;
    println!("total number of transcripts: {}", count);
    Ok(())
}
