//! Configuration for Capacity Checkr.
//!
//! Layers defaults, a TOML file and `CHECKR_`-prefixed environment
//! variables, then resolves the endpoint URL either directly or from the
//! deployment-output file written by the deploy step.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use url::Url;

use checkr_core::{PollerConfig, Schedule};

/// Output keys starting with this prefix are taken as the endpoint when no
/// explicit key is configured.
const ENDPOINT_KEY_PREFIX: &str = "Endpoint";

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no endpoint configured (set `endpoint` or `outputs.file`)")]
    NoEndpoint,

    #[error("deployment output {stack}.{key} not found in {path}")]
    OutputNotFound {
        path: PathBuf,
        stack: String,
        key: String,
    },

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("malformed deployment outputs: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── Config structs ──────────────────────────────────────────────────

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    /// Endpoint URL. Takes precedence over `outputs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    /// Milliseconds between polls.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    /// Poll once at startup instead of waiting a full interval.
    #[serde(default)]
    pub immediate: bool,

    /// Request timeout. Unset means no timeout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,

    #[serde(default)]
    pub outputs: Outputs,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: None,
            interval_ms: default_interval_ms(),
            immediate: false,
            timeout_secs: None,
            outputs: Outputs::default(),
        }
    }
}

fn default_interval_ms() -> u64 {
    5000
}

/// Where to find the endpoint in the deployment-output file.
///
/// The file maps stack names to their outputs:
/// `{ "HelloCdkStack": { "Endpoint8024A810": "https://..." } }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Outputs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,

    /// Stack to read. Unset searches every stack in name order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,

    /// Output key. Unset picks the first key starting with `Endpoint`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "capacity-checkr", "capacity-checkr").map_or_else(
        || {
            let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
            p.push(".config");
            p.push("capacity-checkr");
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

// ── Config loading ──────────────────────────────────────────────────

/// Load config from the canonical path + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load config from `path` + environment. A missing file is not an error.
///
/// Nested keys use a double underscore: `CHECKR_OUTPUTS__FILE`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("CHECKR_").split("__"));

    Ok(figment.extract()?)
}

// ── Resolution ──────────────────────────────────────────────────────

impl Config {
    /// Poll interval, rejecting zero.
    pub fn interval(&self) -> Result<Duration, ConfigError> {
        if self.interval_ms == 0 {
            return Err(ConfigError::Validation {
                field: "interval_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(Duration::from_millis(self.interval_ms))
    }

    /// The endpoint URL: `endpoint` if set, else looked up in `outputs.file`.
    pub fn resolve_endpoint(&self) -> Result<Url, ConfigError> {
        if let Some(ref endpoint) = self.endpoint {
            return parse_url("endpoint", endpoint);
        }
        let Some(ref file) = self.outputs.file else {
            return Err(ConfigError::NoEndpoint);
        };
        endpoint_from_outputs(file, self.outputs.stack.as_deref(), self.outputs.key.as_deref())
    }

    /// Build the poller configuration.
    pub fn poller_config(&self) -> Result<PollerConfig, ConfigError> {
        let interval = self.interval()?;
        let mut config = PollerConfig::new(self.resolve_endpoint()?, interval);
        if self.immediate {
            config.schedule = config.schedule.immediately();
        }
        config.timeout = self.timeout_secs.map(Duration::from_secs);
        Ok(config)
    }
}

/// Read the endpoint URL out of a deployment-output file.
pub fn endpoint_from_outputs(
    path: &Path,
    stack: Option<&str>,
    key: Option<&str>,
) -> Result<Url, ConfigError> {
    let raw = std::fs::read_to_string(path)?;
    let stacks: BTreeMap<String, BTreeMap<String, Value>> = serde_json::from_str(&raw)?;

    let not_found = || ConfigError::OutputNotFound {
        path: path.to_path_buf(),
        stack: stack.unwrap_or("*").to_owned(),
        key: key.map_or_else(|| format!("{ENDPOINT_KEY_PREFIX}*"), str::to_owned),
    };

    let candidates: Vec<(&String, &BTreeMap<String, Value>)> = match stack {
        Some(name) => vec![stacks.get_key_value(name).ok_or_else(not_found)?],
        None => stacks.iter().collect(),
    };

    for (stack_name, outputs) in candidates {
        let found = match key {
            Some(k) => outputs.get_key_value(k),
            None => outputs
                .iter()
                .find(|(k, _)| k.starts_with(ENDPOINT_KEY_PREFIX)),
        };
        let Some((output_key, value)) = found else {
            continue;
        };
        let field = format!("{stack_name}.{output_key}");
        let Some(url) = value.as_str() else {
            return Err(ConfigError::Validation {
                field,
                reason: "expected a URL string".into(),
            });
        };
        return parse_url(&field, url);
    }

    Err(not_found())
}

fn parse_url(field: &str, raw: &str) -> Result<Url, ConfigError> {
    raw.parse().map_err(|e| ConfigError::Validation {
        field: field.into(),
        reason: format!("invalid URL {raw:?}: {e}"),
    })
}
