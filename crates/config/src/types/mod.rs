//! Configuration type definitions for selchord.
//!
//! Responsibilities:
//! - Define action identifiers, deployment variants, detector settings, API
//!   settings, search URLs and profiles.
//! - Provide serialization helpers for sensitive types.
//!
//! Does NOT handle:
//! - Configuration loading from files or environment variables (see `loader` module).
//! - Reading the config file (see `persistence` module).
//! - Binding parsing or validation (see `keybind` module at crate root).
//!
//! Invariants:
//! - All secret types use `secrecy::SecretString` to prevent accidental logging.
//! - `KEYRING_SERVICE` is the canonical service name for all keyring operations.

mod action;
mod auth;
mod config;
mod detector;
mod profile;

pub use action::{ActionId, UnknownActionError};
pub use auth::SecureValue;
pub use config::{ApiConfig, Config, SearchUrls};
pub use detector::{DetectorSettings, ReadinessSettings, SuppressionPolicy, Variant};
pub use profile::ProfileConfig;
