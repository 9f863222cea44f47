use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::model::config::AppConfig;

const APP_DIR: &str = "chaos-todo";

/// Error type for config loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError { path: PathBuf, source: io::Error },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Per-user data directory for the app. Falls back to the working directory
/// when the platform has no data dir.
pub fn data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("."))
}

pub fn default_config_path() -> PathBuf {
    data_dir().join("config.toml")
}

/// Read config from `path`. A missing file yields the defaults; a file that
/// exists but does not parse is an error.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(AppConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::ReadError {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&text).map_err(|source| ConfigError::ParseError {
        path: path.to_path_buf(),
        source,
    })
}

/// Store file path: explicit override, then config, then the data dir.
pub fn resolve_store_path(config: &AppConfig, override_path: Option<&Path>) -> PathBuf {
    override_path
        .map(Path::to_path_buf)
        .or_else(|| config.storage.path.clone())
        .unwrap_or_else(|| data_dir().join("store.json"))
}

pub fn resolve_log_path(config: &AppConfig) -> PathBuf {
    config
        .log
        .file
        .clone()
        .unwrap_or_else(|| data_dir().join("chaos-todo.log"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join("config.toml")).unwrap();
        assert_eq!(config.storage.key, "chaosToDoTasks");
    }

    #[test]
    fn reads_storage_section() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            "[storage]\npath = \"/tmp/tasks.json\"\nkey = \"work\"\n",
        )
        .unwrap();
        let config = read_config(&path).unwrap();
        assert_eq!(config.storage.key, "work");
        assert_eq!(
            resolve_store_path(&config, None),
            PathBuf::from("/tmp/tasks.json")
        );
    }

    #[test]
    fn override_beats_config() {
        let mut config = AppConfig::default();
        config.storage.path = Some(PathBuf::from("/tmp/a.json"));
        assert_eq!(
            resolve_store_path(&config, Some(Path::new("/tmp/b.json"))),
            PathBuf::from("/tmp/b.json")
        );
    }

    #[test]
    fn malformed_config_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[ui\ncounter_steps = ").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
