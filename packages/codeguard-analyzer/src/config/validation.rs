//! Configuration validation

use super::error::ConfigResult;

/// Trait for validatable configuration objects
///
/// # Example
/// ```rust,ignore
/// use codeguard_analyzer::config::{RuleConfig, Validatable};
///
/// let rules = RuleConfig { max_file_lines: 0, ..Default::default() };
/// assert!(rules.validate().is_err());
/// ```
pub trait Validatable {
    /// Returns `Ok(())` if valid, `Err(ConfigError)` with details if invalid.
    fn validate(&self) -> ConfigResult<()>;

    /// Section name used in error messages
    fn config_name(&self) -> &'static str {
        "Config"
    }
}
