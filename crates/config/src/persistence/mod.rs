//! Configuration file location and format.
//!
//! Responsibilities:
//! - Determine the standard configuration file path.
//! - Read named profiles from the JSON config file.
//!
//! Does NOT handle:
//! - Loading environment variables (see `loader` module).
//! - High-level configuration merging (see `loader` module).
//!
//! Invariants:
//! - Profile names are unique within a configuration file.

mod file;
mod path;

pub use file::{ConfigFile, ConfigFileError, read_config_file};

pub(crate) use path::default_config_path;
