use serde::Serialize;
use tafel_core::error::TafelError;

pub fn print<T: Serialize>(value: &T) -> Result<(), TafelError> {
    let json = serde_json::to_string_pretty(value)?;
    println!("{json}");
    Ok(())
}
