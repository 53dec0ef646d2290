// Library surface for the game core, shared by the binary and headless tests.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod countries;
pub mod error;
pub mod pool;
pub mod quiz;
pub mod runtime;
pub mod telemetry;

pub use error::{Error, Result};
pub use quiz::{Quiz, Snapshot};
