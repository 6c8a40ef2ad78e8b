//! YAML configuration for `manpage-extract`.
//!
//! Every field is optional; command-line flags take precedence over values
//! read from the file.
//!
//! # Example YAML
//!
//! ```yaml
//! database: pages.db
//! prefix: mp_
//! format: json
//! jobs: 4
//! persist: true
//! ```

use std::path::{Path, PathBuf};

use manpage_parser::output::OutputFormat;
use serde::{Deserialize, Serialize};

/// Table prefix used when neither the file nor the command line sets one.
pub const DEFAULT_PREFIX: &str = "mp_";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config '{}': {source}", .path.display())]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Settings for the `parse` command, as read from a file or flags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// SQLite database file used when persisting.
    pub database: Option<PathBuf>,
    /// Table prefix.
    pub prefix: Option<String>,
    /// Output format for printed pages.
    pub format: Option<OutputFormat>,
    /// Number of parallel parse jobs.
    pub jobs: Option<usize>,
    /// Whether parsed pages are written to the database.
    pub persist: Option<bool>,
}

impl Config {
    /// Loads configuration from a YAML file.
    ///
    /// An empty file yields the default configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Layers `overrides` on top of `self`; set fields in `overrides` win.
    pub fn merge(self, overrides: Config) -> Config {
        Config {
            database: overrides.database.or(self.database),
            prefix: overrides.prefix.or(self.prefix),
            format: overrides.format.or(self.format),
            jobs: overrides.jobs.or(self.jobs),
            persist: overrides.persist.or(self.persist),
        }
    }

    pub fn prefix(&self) -> &str {
        self.prefix.as_deref().unwrap_or(DEFAULT_PREFIX)
    }

    pub fn format(&self) -> OutputFormat {
        self.format.unwrap_or_default()
    }

    pub fn persist(&self) -> bool {
        self.persist.unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn test_load_full_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(
            &path,
            "database: pages.db\nprefix: t_\nformat: markdown\njobs: 2\npersist: true\n",
        )
        .unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.database, Some(PathBuf::from("pages.db")));
        assert_eq!(config.prefix(), "t_");
        assert_eq!(config.format(), OutputFormat::Markdown);
        assert_eq!(config.jobs, Some(2));
        assert!(config.persist());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.prefix(), DEFAULT_PREFIX);
        assert_eq!(config.format(), OutputFormat::Text);
        assert!(!config.persist());
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "databse: typo.db\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Yaml { .. }));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load("/nonexistent/manpage-config.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let file = Config {
            database: Some(PathBuf::from("file.db")),
            prefix: Some("file_".to_string()),
            format: Some(OutputFormat::Yaml),
            jobs: Some(8),
            persist: Some(true),
        };
        let flags = Config {
            database: Some(PathBuf::from("flag.db")),
            format: Some(OutputFormat::Json),
            ..Config::default()
        };

        let merged = file.merge(flags);
        assert_eq!(merged.database, Some(PathBuf::from("flag.db")));
        assert_eq!(merged.prefix(), "file_");
        assert_eq!(merged.format(), OutputFormat::Json);
        assert_eq!(merged.jobs, Some(8));
        assert!(merged.persist());
    }
}
