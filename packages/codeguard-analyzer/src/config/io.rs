//! Configuration I/O (YAML/Env loading)
//!
//! Defines the YAML schema and the environment overlay.

use serde::{Deserialize, Serialize};

use super::error::{ConfigError, ConfigResult};
use super::sections::{HistoryConfig, ReportConfig, RuleConfig};

/// Schema versions this build reads
pub const SUPPORTED_VERSIONS: &[u32] = &[1];

/// Overrides `history.backend`
pub const ENV_HISTORY_BACKEND: &str = "CODEGUARD_HISTORY_BACKEND";

/// Overrides `history.path`
pub const ENV_HISTORY_PATH: &str = "CODEGUARD_HISTORY_PATH";

/// YAML Schema v1
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigFileV1 {
    /// Schema version (always 1 for v1)
    pub version: Option<u32>,

    #[serde(default)]
    pub rules: RuleConfig,

    #[serde(default)]
    pub history: HistoryConfig,

    #[serde(default)]
    pub report: ReportConfig,
}

impl ConfigFileV1 {
    /// Parse a document and check its version
    pub fn parse(content: &str) -> ConfigResult<Self> {
        let file: ConfigFileV1 = serde_yaml::from_str(content)?;

        match file.version {
            None => Err(ConfigError::MissingVersion),
            Some(found) if !SUPPORTED_VERSIONS.contains(&found) => {
                Err(ConfigError::UnsupportedVersion {
                    found,
                    supported: SUPPORTED_VERSIONS.to_vec(),
                })
            }
            Some(_) => Ok(file),
        }
    }
}

/// Apply history overrides from a variable lookup
///
/// Takes the lookup as a closure so tests need not touch the process
/// environment.
pub fn apply_history_overrides<F>(history: &mut HistoryConfig, lookup: F) -> ConfigResult<()>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(backend) = lookup(ENV_HISTORY_BACKEND) {
        history.backend = backend.parse()?;
    }
    if let Some(path) = lookup(ENV_HISTORY_PATH) {
        history.path = path.into();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HistoryBackend;
    use std::collections::HashMap;
    use std::path::PathBuf;

    #[test]
    fn test_parse_full_document() {
        let yaml = r#"
version: 1
rules:
  max_file_lines: 150
  max_function_lines: 30
history:
  backend: sqlite
  path: data/history.db
report:
  dir: /var/tmp/reports
  retention_secs: 60
"#;
        let file = ConfigFileV1::parse(yaml).unwrap();
        assert_eq!(file.rules.max_file_lines, 150);
        assert_eq!(file.rules.max_function_lines, 30);
        assert_eq!(file.history.backend, HistoryBackend::Sqlite);
        assert_eq!(file.history.path, PathBuf::from("data/history.db"));
        assert_eq!(file.report.retention_secs, 60);
    }

    #[test]
    fn test_sections_default_when_absent() {
        let file = ConfigFileV1::parse("version: 1\nrules:\n  max_file_lines: 10\n").unwrap();
        assert_eq!(file.rules.max_file_lines, 10);
        assert_eq!(file.rules.max_function_lines, 20);
        assert_eq!(file.history, HistoryConfig::default());
        assert_eq!(file.report, ReportConfig::default());
    }

    #[test]
    fn test_missing_version() {
        let result = ConfigFileV1::parse("rules:\n  max_file_lines: 10\n");
        assert!(matches!(result, Err(ConfigError::MissingVersion)));
    }

    #[test]
    fn test_unsupported_version() {
        let result = ConfigFileV1::parse("version: 2\n");
        assert!(matches!(
            result,
            Err(ConfigError::UnsupportedVersion { found: 2, .. })
        ));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let result = ConfigFileV1::parse("version: 1\nrules:\n  max_lines: 10\n");
        assert!(matches!(result, Err(ConfigError::Yaml(_))));
    }

    #[test]
    fn test_history_overrides() {
        let env: HashMap<&str, &str> = [
            (ENV_HISTORY_BACKEND, "memory"),
            (ENV_HISTORY_PATH, "/tmp/other.json"),
        ]
        .into_iter()
        .collect();

        let mut history = HistoryConfig::default();
        apply_history_overrides(&mut history, |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(history.backend, HistoryBackend::Memory);
        assert_eq!(history.path, PathBuf::from("/tmp/other.json"));
    }

    #[test]
    fn test_bad_backend_override() {
        let mut history = HistoryConfig::default();
        let result = apply_history_overrides(&mut history, |key| {
            (key == ENV_HISTORY_BACKEND).then(|| "mongo".to_string())
        });
        assert!(matches!(result, Err(ConfigError::UnknownBackend(_))));
        assert_eq!(history.backend, HistoryBackend::Json);
    }
}
