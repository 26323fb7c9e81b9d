//! Validator configuration.
//!
//! A config file selects which validators run and which of them are skipped
//! for particular rules. See [`ValidatorConfig`] for the format.

pub mod loader;
pub mod schema;

pub use loader::{load_config_file, parse_config};
pub use schema::{OneOrMany, ValidatorConfig, ALL_VALIDATORS};
