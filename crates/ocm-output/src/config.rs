//! User configuration.
//!
//! The configuration is a JSON document, by default `~/.ocm.json`. The
//! `OCM_CONFIG` environment variable points to a different file. Only the
//! settings that affect output are read here; unknown keys are ignored.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{OutputError, Result};

/// Environment variable with the location of the configuration file.
pub const CONFIG_ENV: &str = "OCM_CONFIG";

/// Environment variable overriding the configured pager.
pub const PAGER_ENV: &str = "OCM_PAGER";

/// Name of the configuration file in the home directory.
pub const CONFIG_FILE: &str = ".ocm.json";

/// Output related settings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Pager command line, for example `less -R`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pager: Option<String>,
}

impl Config {
    /// Location of the configuration file.
    ///
    /// Returns `None` when `OCM_CONFIG` isn't set and the home directory
    /// can't be determined.
    pub fn location() -> Option<PathBuf> {
        match env::var_os(CONFIG_ENV) {
            Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
            _ => dirs::home_dir().map(|home| home.join(CONFIG_FILE)),
        }
    }

    /// Loads the configuration from its default location.
    ///
    /// A missing file gives the default configuration.
    pub fn load() -> Result<Self> {
        match Self::location() {
            Some(path) => Self::load_from(path),
            None => {
                debug!("no home directory, using default configuration");
                Ok(Self::default())
            }
        }
    }

    /// Loads the configuration from a file.
    ///
    /// A missing file gives the default configuration.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "configuration file not found");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(OutputError::ConfigRead {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = serde_json::from_str(&text).map_err(|source| OutputError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Pager to use: `OCM_PAGER` if set, otherwise the configured one.
    ///
    /// Blank values mean no pager.
    pub fn pager(&self) -> Option<String> {
        let pager = match env::var(PAGER_ENV) {
            Ok(pager) => Some(pager),
            Err(_) => self.pager.clone(),
        };
        pager.filter(|pager| !pager.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn write_config(dir: &TempDir, text: &str) -> PathBuf {
        let path = dir.path().join("ocm.json");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(dir.path().join("missing.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn reads_pager_and_ignores_unknown_keys() {
        let dir = TempDir::new().unwrap();
        let path = write_config(
            &dir,
            r#"{"access_token": "x", "url": "https://api.openshift.com", "pager": "less -R"}"#,
        );
        let config = Config::load_from(path).unwrap();
        assert_eq!(config.pager.as_deref(), Some("less -R"));
    }

    #[test]
    fn invalid_json_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, "{ pager: ");
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(err, OutputError::ConfigParse { path: ref p, .. } if *p == path));
    }

    #[test]
    fn directory_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from(dir.path()).unwrap_err();
        assert!(matches!(err, OutputError::ConfigRead { .. }));
    }

    #[test]
    #[serial]
    fn location_from_environment() {
        env::set_var(CONFIG_ENV, "/tmp/other.json");
        assert_eq!(Config::location(), Some(PathBuf::from("/tmp/other.json")));
        env::remove_var(CONFIG_ENV);
    }

    #[test]
    #[serial]
    fn load_uses_environment_location() {
        let dir = TempDir::new().unwrap();
        let path = write_config(&dir, r#"{"pager": "more"}"#);
        env::set_var(CONFIG_ENV, &path);
        let config = Config::load();
        env::remove_var(CONFIG_ENV);
        assert_eq!(config.unwrap().pager.as_deref(), Some("more"));
    }

    #[test]
    #[serial]
    fn pager_environment_overrides_file() {
        let config = Config {
            pager: Some("less".to_string()),
        };

        env::remove_var(PAGER_ENV);
        assert_eq!(config.pager().as_deref(), Some("less"));

        env::set_var(PAGER_ENV, "more");
        assert_eq!(config.pager().as_deref(), Some("more"));

        env::set_var(PAGER_ENV, "  ");
        assert_eq!(config.pager(), None);

        env::remove_var(PAGER_ENV);
    }

    #[test]
    #[serial]
    fn blank_configured_pager_is_none() {
        env::remove_var(PAGER_ENV);
        let config = Config {
            pager: Some(String::new()),
        };
        assert_eq!(config.pager(), None);
    }
}
