//! Extension configuration (`.lovely-sets.toml`)

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::logging::warn;
use crate::sets::{HashSet, SetVariant, SortedSet};

pub const CONFIG_FILE: &str = ".lovely-sets.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub classes: ClassesConfig,

    #[serde(default)]
    pub methods: MethodsConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Host class names for each set variant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassesConfig {
    #[serde(default = "default_sorted_set")]
    pub sorted_set: String,

    #[serde(default = "default_hash_set")]
    pub hash_set: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MethodsConfig {
    /// Extra names bound to the length accessor (e.g. `size`, `count`)
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,

    #[serde(default)]
    pub json: bool,

    #[serde(default)]
    pub spans: bool,

    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for ClassesConfig {
    fn default() -> Self {
        Self {
            sorted_set: default_sorted_set(),
            hash_set: default_hash_set(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
            spans: false,
            file: None,
        }
    }
}

fn default_sorted_set() -> String {
    SortedSet::CLASS_NAME.to_string()
}

fn default_hash_set() -> String {
    HashSet::CLASS_NAME.to_string()
}

fn default_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content)
    }

    /// Parse configuration from TOML string
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Find and load `.lovely-sets.toml` from `start` or its parents.
    ///
    /// Unreadable or malformed files are skipped; defaults when none is found.
    pub fn discover_from(start: &Path) -> Self {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let config_path = dir.join(CONFIG_FILE);
            if config_path.is_file() {
                match Self::load(&config_path) {
                    Ok(config) => return config,
                    Err(err) => {
                        warn!(path = %config_path.display(), error = %err, "Ignoring config");
                    }
                }
            }

            current = dir.parent().map(Path::to_path_buf);
        }

        Self::default()
    }

    /// [`Config::discover_from`] starting at the current directory
    pub fn discover() -> Self {
        std::env::current_dir()
            .map(|dir| Self::discover_from(&dir))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.classes.sorted_set, "SortedSet");
        assert_eq!(config.classes.hash_set, "HashSet");
        assert!(config.methods.aliases.is_empty());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_parse_partial() {
        let config = Config::parse(
            r#"
            [methods]
            aliases = ["size", "count"]

            [classes]
            hash_set = "IdentitySet"
            "#,
        )
        .unwrap();

        assert_eq!(config.methods.aliases, vec!["size", "count"]);
        assert_eq!(config.classes.hash_set, "IdentitySet");
        assert_eq!(config.classes.sorted_set, "SortedSet");
    }

    #[test]
    fn test_parse_error() {
        let err = Config::parse("[methods]\naliases = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/.lovely-sets.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_discover_walks_parents() {
        let root = tempfile::tempdir().unwrap();
        let nested = root.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        let mut file = fs::File::create(root.path().join(CONFIG_FILE)).unwrap();
        writeln!(file, "[logging]\nlevel = \"debug\"\njson = true").unwrap();

        let config = Config::discover_from(&nested);
        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json);
    }

    #[test]
    fn test_discover_skips_malformed() {
        let root = tempfile::tempdir().unwrap();
        fs::write(root.path().join(CONFIG_FILE), "not = [valid").unwrap();

        let config = Config::discover_from(root.path());
        assert_eq!(config, Config::default());
    }
}
