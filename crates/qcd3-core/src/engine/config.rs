use crate::core::damping::level::DampingFamily;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

pub const DEFAULT_ROUTINE: &str = "qcd3::workflows::qcschema::run";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Settings of the QCSchema runner.
///
/// ```toml
/// default-level = "d3zero"
/// routine = "my_workflow.dispersion"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct RunnerConfig {
    /// Damping family used when a request carries no level hint.
    pub default_level: DampingFamily,
    /// Routine name stamped into result provenance.
    pub routine: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            default_level: DampingFamily::Rational,
            routine: DEFAULT_ROUTINE.to_string(),
        }
    }
}

impl RunnerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }
}

#[derive(Default)]
pub struct RunnerConfigBuilder {
    default_level: Option<DampingFamily>,
    routine: Option<String>,
}

impl RunnerConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn default_level(mut self, level: DampingFamily) -> Self {
        self.default_level = Some(level);
        self
    }
    pub fn routine(mut self, routine: &str) -> Self {
        self.routine = Some(routine.to_string());
        self
    }

    pub fn build(self) -> RunnerConfig {
        let defaults = RunnerConfig::default();
        RunnerConfig {
            default_level: self.default_level.unwrap_or(defaults.default_level),
            routine: self.routine.unwrap_or(defaults.routine),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn default_config_uses_rational_damping() {
        let config = RunnerConfig::default();
        assert_eq!(config.default_level, DampingFamily::Rational);
        assert_eq!(config.routine, DEFAULT_ROUTINE);
    }

    #[test]
    fn load_succeeds_with_valid_toml() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("runner.toml");
        let mut file = File::create(&file_path).unwrap();
        writeln!(
            file,
            r#"
            default-level = "D3ZeroM"
            routine = "workflow.dispersion"
            "#
        )
        .unwrap();

        let config = RunnerConfig::load(&file_path).unwrap();
        assert_eq!(config.default_level, DampingFamily::ModifiedZero);
        assert_eq!(config.routine, "workflow.dispersion");
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = RunnerConfig::from_toml_str(r#"default-level = "d3bjm""#).unwrap();
        assert_eq!(config.default_level, DampingFamily::ModifiedRational);
        assert_eq!(config.routine, DEFAULT_ROUTINE);

        assert_eq!(RunnerConfig::from_toml_str("").unwrap(), RunnerConfig::default());
    }

    #[test]
    fn invalid_level_and_unknown_keys_are_rejected() {
        assert!(matches!(
            RunnerConfig::from_toml_str(r#"default-level = "d4""#),
            Err(ConfigError::Toml(_))
        ));
        assert!(matches!(
            RunnerConfig::from_toml_str(r#"level = "d3bj""#),
            Err(ConfigError::Toml(_))
        ));
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempdir().unwrap();
        let result = RunnerConfig::load(&dir.path().join("absent.toml"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }

    #[test]
    fn builder_overrides_only_what_is_set() {
        let config = RunnerConfigBuilder::new()
            .default_level(DampingFamily::Zero)
            .build();
        assert_eq!(config.default_level, DampingFamily::Zero);
        assert_eq!(config.routine, DEFAULT_ROUTINE);

        let config = RunnerConfigBuilder::new().routine("custom").build();
        assert_eq!(config.default_level, DampingFamily::Rational);
        assert_eq!(config.routine, "custom");
    }
}
