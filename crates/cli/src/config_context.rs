//! Configuration context for command execution.
//!
//! Responsibilities:
//! - Distinguish between commands that run against a loaded config and those
//!   that need none.
//!
//! Does NOT handle:
//! - Configuration loading (done in `main()`).
//!
//! Invariants:
//! - A placeholder never reaches a command that calls the API.

use selchord_config::Config;

pub(crate) enum ConfigCommandContext {
    /// Config loaded from profile, environment and CLI overrides.
    Real(Box<Config>),
    /// For commands that work without API settings (ticket-summary).
    Placeholder,
}

impl ConfigCommandContext {
    /// Extract the real config, failing if this is a placeholder.
    pub(crate) fn into_real_config(self) -> anyhow::Result<Config> {
        match self {
            ConfigCommandContext::Real(config) => Ok(*config),
            ConfigCommandContext::Placeholder => {
                anyhow::bail!("this command requires a loaded configuration")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use selchord_config::Variant;

    #[test]
    fn test_placeholder_has_no_config() {
        assert!(ConfigCommandContext::Placeholder.into_real_config().is_err());
    }

    #[test]
    fn test_real_config_unwraps() {
        let context = ConfigCommandContext::Real(Box::new(Config::for_variant(Variant::Hosted)));
        assert_eq!(context.into_real_config().unwrap().variant, Variant::Hosted);
    }
}
