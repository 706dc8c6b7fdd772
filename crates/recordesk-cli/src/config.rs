// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use recordesk_app::{DEFAULT_PAGE_LIMIT, StoreConfig};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::Level;

use crate::logging::{LogConfig, LogFormat};

pub const APP_NAME: &str = "recordesk";
const CONFIG_VERSION: i64 = 1;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_LOG_FORMAT: &str = "compact";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub version: i64,
    #[serde(default)]
    pub store: Store,
    #[serde(default)]
    pub log: Log,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            store: Store::default(),
            log: Log::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Store {
    pub page_limit: Option<u32>,
    pub selected_menu: Option<String>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            page_limit: Some(DEFAULT_PAGE_LIMIT),
            selected_menu: Some(String::new()),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Log {
    pub level: Option<String>,
    pub format: Option<String>,
}

impl Default for Log {
    fn default() -> Self {
        Self {
            level: Some(DEFAULT_LOG_LEVEL.to_owned()),
            format: Some(DEFAULT_LOG_FORMAT.to_owned()),
        }
    }
}

impl Config {
    pub fn default_path() -> Result<PathBuf> {
        if let Some(path) = env::var_os("RECORDESK_CONFIG_PATH") {
            return Ok(PathBuf::from(path));
        }

        let config_root = dirs::config_dir().ok_or_else(|| {
            anyhow!(
                "cannot resolve config directory; set RECORDESK_CONFIG_PATH to the config file"
            )
        })?;

        let app_dir = config_root.join(APP_NAME);
        fs::create_dir_all(&app_dir)
            .with_context(|| format!("create config directory {}", app_dir.display()))?;
        Ok(app_dir.join("config.toml"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let raw = fs::read_to_string(path)
            .with_context(|| format!("read config file {}", path.display()))?;
        let value: toml::Value = toml::from_str(&raw)
            .with_context(|| format!("parse TOML config {}", path.display()))?;

        let version = value
            .get("version")
            .and_then(toml::Value::as_integer)
            .ok_or_else(|| {
                anyhow!(
                    "config file {} has no version; add `version = 1` and put values under [store] and [log]",
                    path.display()
                )
            })?;

        if version != CONFIG_VERSION {
            bail!(
                "unsupported config version {} in {}; expected version = 1",
                version,
                path.display()
            );
        }

        let config: Config = value
            .try_into()
            .with_context(|| format!("decode config {}", path.display()))?;
        config.validate(path)?;
        Ok(config)
    }

    fn validate(&self, path: &Path) -> Result<()> {
        self.store_config()
            .validate()
            .with_context(|| format!("invalid [store] section in {}", path.display()))?;
        self.log_level()
            .with_context(|| format!("invalid [log] section in {}", path.display()))?;
        self.log_format()
            .with_context(|| format!("invalid [log] section in {}", path.display()))?;
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            page_limit: self.store.page_limit.unwrap_or(DEFAULT_PAGE_LIMIT),
            selected_menu: self.store.selected_menu.clone().unwrap_or_default(),
        }
    }

    pub fn log_level(&self) -> Result<Level> {
        let raw = self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL);
        raw.parse::<Level>().map_err(|_| {
            anyhow!("log.level {raw:?} is not one of: error, warn, info, debug, trace")
        })
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        let raw = self.log.format.as_deref().unwrap_or(DEFAULT_LOG_FORMAT);
        LogFormat::parse(raw)
            .ok_or_else(|| anyhow!("log.format {raw:?} is not one of: pretty, compact, json"))
    }

    pub fn log_config(&self) -> Result<LogConfig> {
        Ok(LogConfig {
            level: self.log_level()?,
            format: self.log_format()?,
        })
    }

    pub fn example_config(path: &Path) -> String {
        format!(
            "# recordesk config\n# Place this file at: {}\n\nversion = 1\n\n[store]\npage_limit = {}\n# Menu selected when the store starts\nselected_menu = \"\"\n\n[log]\n# error | warn | info | debug | trace (RUST_LOG overrides)\nlevel = \"{}\"\n# pretty | compact | json\nformat = \"{}\"\n",
            path.display(),
            DEFAULT_PAGE_LIMIT,
            DEFAULT_LOG_LEVEL,
            DEFAULT_LOG_FORMAT,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Config;
    use crate::logging::LogFormat;
    use anyhow::Result;
    use recordesk_testkit::temp_file;
    use std::sync::{Mutex, OnceLock};
    use tracing::Level;

    fn env_lock() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        match ENV_LOCK.get_or_init(|| Mutex::new(())).lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[test]
    fn missing_config_uses_defaults() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let config = Config::load(&temp.path().join("missing.toml"))?;
        assert_eq!(config.version, 1);
        assert_eq!(config.store_config().page_limit, 25);
        assert_eq!(config.log_level()?, Level::INFO);
        assert_eq!(config.log_format()?, LogFormat::Compact);
        Ok(())
    }

    #[test]
    fn unversioned_config_is_rejected_with_actionable_message() -> Result<()> {
        let (_temp, path) = temp_file("config.toml", "[store]\npage_limit = 10\n")?;
        let error = Config::load(&path).expect_err("unversioned config should fail");
        let message = error.to_string();
        assert!(message.contains("version = 1"));
        assert!(message.contains("[store] and [log]"));
        Ok(())
    }

    #[test]
    fn v1_config_parses() -> Result<()> {
        let (_temp, path) = temp_file(
            "config.toml",
            "version = 1\n[store]\npage_limit = 50\nselected_menu = \"orders\"\n[log]\nlevel = \"debug\"\nformat = \"json\"\n",
        )?;

        let config = Config::load(&path)?;
        let store = config.store_config();
        assert_eq!(store.page_limit, 50);
        assert_eq!(store.selected_menu, "orders");
        let log = config.log_config()?;
        assert_eq!(log.level, Level::DEBUG);
        assert_eq!(log.format, LogFormat::Json);
        Ok(())
    }

    #[test]
    fn malformed_config_returns_parse_error() -> Result<()> {
        let (_temp, path) = temp_file("config.toml", "{{not toml")?;
        let error = Config::load(&path).expect_err("malformed config should fail");
        assert!(error.to_string().contains("parse TOML config"));
        Ok(())
    }

    #[test]
    fn unsupported_config_version_is_rejected() -> Result<()> {
        let (_temp, path) = temp_file("config.toml", "version = 2\n")?;
        let error = Config::load(&path).expect_err("v2 config should fail");
        assert!(error.to_string().contains("unsupported config version 2"));
        Ok(())
    }

    #[test]
    fn zero_page_limit_is_rejected() -> Result<()> {
        let (_temp, path) = temp_file("config.toml", "version = 1\n[store]\npage_limit = 0\n")?;
        let error = Config::load(&path).expect_err("zero page limit should fail");
        let message = format!("{error:#}");
        assert!(message.contains("[store]"), "unexpected message: {message}");
        assert!(
            message.contains("page limit must be positive"),
            "unexpected message: {message}"
        );
        Ok(())
    }

    #[test]
    fn unknown_log_level_and_format_are_rejected() -> Result<()> {
        let (_temp, path) = temp_file("config.toml", "version = 1\n[log]\nlevel = \"loud\"\n")?;
        let error = Config::load(&path).expect_err("bad level should fail");
        assert!(format!("{error:#}").contains("log.level"));

        let (_temp, path) = temp_file("config.toml", "version = 1\n[log]\nformat = \"xml\"\n")?;
        let error = Config::load(&path).expect_err("bad format should fail");
        assert!(format!("{error:#}").contains("log.format"));
        Ok(())
    }

    #[test]
    fn default_path_honors_env_override() -> Result<()> {
        let _guard = env_lock();
        let temp = tempfile::tempdir()?;
        let override_path = temp.path().join("custom-config.toml");
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::set_var("RECORDESK_CONFIG_PATH", &override_path);
        }
        let resolved = Config::default_path()?;
        // SAFETY: test cleanup for process-local env mutation.
        unsafe {
            std::env::remove_var("RECORDESK_CONFIG_PATH");
        }
        assert_eq!(resolved, override_path);
        Ok(())
    }

    #[test]
    fn default_path_uses_config_toml_suffix_when_no_env_override() -> Result<()> {
        let _guard = env_lock();
        // SAFETY: test-only process-local env mutation.
        unsafe {
            std::env::remove_var("RECORDESK_CONFIG_PATH");
        }
        let path = Config::default_path()?;
        assert!(path.ends_with("recordesk/config.toml"));
        Ok(())
    }

    #[test]
    fn example_config_round_trips_through_load() -> Result<()> {
        let temp = tempfile::tempdir()?;
        let path = temp.path().join("config.toml");
        let example = Config::example_config(&path);
        assert!(example.contains("version = 1"));
        assert!(example.contains("[store]"));
        assert!(example.contains("[log]"));

        std::fs::write(&path, example)?;
        let config = Config::load(&path)?;
        assert_eq!(config.store_config().page_limit, 25);
        Ok(())
    }
}
