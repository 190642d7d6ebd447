//! Shared configuration for the rmspivot CLI.
//!
//! TOML file at the platform config dir, merged with `RMSPIVOT_*`
//! environment overrides via figment. Owns the priority alarm list — a
//! hand-maintained display ordering, configuration rather than derived
//! data — and the output defaults.

use std::path::PathBuf;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Alarm categories pinned to the top of every report, in display
    /// order. Categories observed in the data but absent here follow
    /// alphabetically.
    #[serde(default = "default_priority_alarms")]
    pub priority_alarms: Vec<String>,

    /// Output defaults, overridable per invocation by CLI flags.
    #[serde(default)]
    pub defaults: Defaults,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            priority_alarms: default_priority_alarms(),
            defaults: Defaults::default(),
        }
    }
}

/// The hand-maintained priority ordering shipped as the default.
fn default_priority_alarms() -> Vec<String> {
    [
        "Mains Fail",
        "Battery Low",
        "DCDB-01 Primary Disconnect",
        "MDB Fault",
        "PG Run",
        "Door Open",
    ]
    .map(str::to_owned)
    .to_vec()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "rmspivot", "rmspivot").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("rmspivot");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    let path = config_path();

    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .merge(Env::prefixed("RMSPIVOT_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning the defaults if the file doesn't exist.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<(), ConfigError> {
    let path = config_path();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(&path, toml_str)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_priority_list_matches_shipped_ordering() {
        let cfg = Config::default();
        assert_eq!(
            cfg.priority_alarms,
            vec![
                "Mains Fail",
                "Battery Low",
                "DCDB-01 Primary Disconnect",
                "MDB Fault",
                "PG Run",
                "Door Open",
            ]
        );
        assert_eq!(cfg.defaults.output, "table");
        assert_eq!(cfg.defaults.color, "auto");
    }

    #[test]
    fn config_round_trips_through_toml() {
        let cfg = Config {
            priority_alarms: vec!["Mains Fail".into()],
            defaults: Defaults {
                output: "json".into(),
                color: "never".into(),
            },
        };
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&text).expect("deserialize");
        assert_eq!(back.priority_alarms, cfg.priority_alarms);
        assert_eq!(back.defaults.output, "json");
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let back: Config = toml::from_str("").expect("deserialize empty");
        assert_eq!(back.priority_alarms.len(), 6);
        assert_eq!(back.defaults.output, "table");
    }
}
