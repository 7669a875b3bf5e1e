use ::config::ConfigError;
use serde::Deserialize;
use std::path::Path;

const ENVIRONMENT_PREFIX: &str = "FNFILTER";

/// Where an adapter reports failures of the functions it wraps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SinkKind {
    Tracing,
    Stderr,
}

impl Default for SinkKind {
    fn default() -> Self {
        SinkKind::Tracing
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdapterConfig {
    /// Replaces the adapter's default description.
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub diagnostics: SinkKind,
}

/// Reads an adapter configuration from `path`, overridden by `FNFILTER_*`
/// environment variables.
pub fn load_config(path: &Path) -> Result<AdapterConfig, ConfigError> {
    let mut s = config::Config::default();
    s.merge(config::File::from(path))?;
    s.merge(config::Environment::with_prefix(ENVIRONMENT_PREFIX))?;
    s.try_into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempdir::TempDir;

    #[test]
    fn test_load_config() {
        let dir = TempDir::new("fnfilter").unwrap();
        let path = dir.path().join("filter.toml");
        fs::write(
            &path,
            "description = \"drops the header row\"\ndiagnostics = \"stderr\"\n",
        )
        .unwrap();

        let config = load_config(&path).unwrap();

        assert_eq!(
            config,
            AdapterConfig {
                description: Some("drops the header row".to_string()),
                diagnostics: SinkKind::Stderr,
            }
        );
    }

    #[test]
    fn test_load_config_defaults() {
        let dir = TempDir::new("fnfilter").unwrap();
        let path = dir.path().join("empty.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(load_config(&path).unwrap(), AdapterConfig::default());
    }

    #[test]
    fn test_load_config_missing_file() {
        let dir = TempDir::new("fnfilter").unwrap();
        assert!(load_config(&dir.path().join("missing.toml")).is_err());
    }
}
