pub mod checklist;
pub mod contractor;
pub mod db;
pub mod event;
pub mod record;
pub mod seed;

use serde::Serialize;

pub type CommandResult = Result<(), Box<dyn std::error::Error>>;

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> CommandResult {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
