//! Migration framework
//!
//! Provides:
//! - Embedded SQL migrations, applied in id order
//! - One transaction per migration
//! - Checksum verification of already-applied migrations

mod checksums;
mod embedded;
mod runner;

pub use embedded::{get_migrations, Migration};
pub use runner::apply_migrations;
