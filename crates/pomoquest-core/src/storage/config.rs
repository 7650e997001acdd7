//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Default timer profile and message rotation speed
//! - Local notification permission and completion bell
//! - Push relay endpoint
//!
//! Configuration is stored at `~/.config/pomoquest/config.toml`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::data_dir;
use crate::error::{ConfigError, Result};
use crate::notify::NotificationPermission;
use crate::timer::Profile;

/// Timer configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerConfig {
    #[serde(default)]
    pub default_profile: Profile,
    #[serde(default = "default_rotation_interval_secs")]
    pub rotation_interval_secs: u64,
}

/// Local notification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default)]
    pub permission: NotificationPermission,
    /// Ring the terminal bell on completion.
    #[serde(default = "default_true")]
    pub bell: bool,
}

/// Push relay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_relay_url")]
    pub relay_url: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/pomoquest/config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timer: TimerConfig,
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub push: PushConfig,
}

fn default_rotation_interval_secs() -> u64 {
    4
}
fn default_true() -> bool {
    true
}
fn default_relay_url() -> String {
    "http://localhost:3000/api/send-push".into()
}

impl Default for TimerConfig {
    fn default() -> Self {
        Self {
            default_profile: Profile::default(),
            rotation_interval_secs: default_rotation_interval_secs(),
        }
    }
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            permission: NotificationPermission::default(),
            bell: true,
        }
    }
}

impl Default for PushConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            relay_url: default_relay_url(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => serde_json::Value::Number(
                        value
                            .parse::<u64>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?
                            .into(),
                    ),
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        serde_json::from_str(value).map_err(|e| invalid(e.to_string()))?
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults there if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))?;
        Ok(())
    }

    /// Reject values that parse but cannot work.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.timer.rotation_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timer.rotation_interval_secs".into(),
                message: "must be greater than zero".into(),
            });
        }
        match url::Url::parse(&self.push.relay_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
            Ok(url) => Err(ConfigError::InvalidValue {
                key: "push.relay_url".into(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => Err(ConfigError::InvalidValue {
                key: "push.relay_url".into(),
                message: e.to_string(),
            }),
        }
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Update a value in memory by dot-separated key. Does not persist.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// field (including enum fields such as `timer.default_profile`).
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Update a value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    pub fn rotation_interval(&self) -> Duration {
        Duration::from_secs(self.timer.rotation_interval_secs)
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.timer.default_profile, Profile::Middle);
        assert_eq!(parsed.timer.rotation_interval_secs, 4);
        assert_eq!(parsed.notifications.permission, NotificationPermission::Granted);
        assert!(!parsed.push.enabled);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let parsed: Config = toml::from_str("[timer]\ndefault_profile = \"senior\"\n").unwrap();
        assert_eq!(parsed.timer.default_profile, Profile::Senior);
        assert_eq!(parsed.timer.rotation_interval_secs, 4);
        assert!(parsed.notifications.bell);
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("timer.default_profile").as_deref(), Some("middle"));
        assert_eq!(cfg.get("notifications.bell").as_deref(), Some("true"));
        assert_eq!(cfg.get("timer.rotation_interval_secs").as_deref(), Some("4"));
        assert!(cfg.get("timer.missing_key").is_none());
    }

    #[test]
    fn apply_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.apply("notifications.bell", "false").unwrap();
        cfg.apply("timer.rotation_interval_secs", "10").unwrap();
        cfg.apply("timer.default_profile", "junior").unwrap();
        cfg.apply("notifications.permission", "denied").unwrap();
        assert!(!cfg.notifications.bell);
        assert_eq!(cfg.timer.rotation_interval_secs, 10);
        assert_eq!(cfg.timer.default_profile, Profile::Junior);
        assert_eq!(cfg.notifications.permission, NotificationPermission::Denied);
    }

    #[test]
    fn apply_rejects_bad_input_without_changing_config() {
        let mut cfg = Config::default();
        assert!(cfg.apply("timer.nonexistent", "1").is_err());
        assert!(cfg.apply("notifications.bell", "maybe").is_err());
        assert!(cfg.apply("timer.default_profile", "staff").is_err());
        assert!(cfg.apply("timer.rotation_interval_secs", "0").is_err());
        assert!(cfg.apply("push.relay_url", "not a url").is_err());
        assert!(cfg.apply("", "x").is_err());
        assert_eq!(cfg.timer.default_profile, Profile::Middle);
        assert_eq!(cfg.timer.rotation_interval_secs, 4);
    }

    #[test]
    fn load_from_missing_file_writes_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.timer.default_profile, Profile::Middle);
    }

    #[test]
    fn load_from_rejects_invalid_relay_scheme() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[push]\nrelay_url = \"ftp://relay.example.com\"\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
