//! Handles settings for the application. Configuration is read from an
//! optional `settings.toml` (or any format `config` understands) and from
//! `EXPENSES__*` environment variables, e.g. `EXPENSES__STORE__PATH`.
use std::path::PathBuf;

use config::{Config, ConfigError, Environment, File};
use expense_store::{DEFAULT_PATH, IdStrategy};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    /// Log level applied to this binary and the store.
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Store {
    #[serde(default = "default_path")]
    pub path: PathBuf,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    /// Read a malformed document as empty instead of failing.
    #[serde(default)]
    pub recover_malformed: bool,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            path: default_path(),
            id_strategy: IdStrategy::default(),
            recover_malformed: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    #[serde(default)]
    pub store: Store,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_path() -> PathBuf {
    PathBuf::from(DEFAULT_PATH)
}

impl Settings {
    pub fn new(file: &str) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name(file).required(false))
            .add_source(Environment::with_prefix("EXPENSES").separator("__"))
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_without_any_source() {
        let settings = Settings::new("does-not-exist").unwrap();
        assert_eq!(settings.app.level, "info");
        assert_eq!(settings.store.path, PathBuf::from(DEFAULT_PATH));
        assert_eq!(settings.store.id_strategy, IdStrategy::NextAfterMax);
        assert!(!settings.store.recover_malformed);
    }
}
