// src/config.rs
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::timeline::clock::DEFAULT_TIMEZONE;
use crate::timeline::{DayNames, LocalClock, WeeklyAssembler};

pub const ENV_CONFIG_PATH: &str = "GRAPH_CONFIG_PATH";
pub const ENV_TIMEZONE: &str = "GRAPH_TIMEZONE";

const DEFAULT_TOML_PATH: &str = "config/graph.toml";
const DEFAULT_JSON_PATH: &str = "config/graph.json";

fn default_timezone() -> String {
    DEFAULT_TIMEZONE.to_string()
}
fn default_service_name() -> String {
    "light-status-graph".to_string()
}
fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// IANA zone every instant is projected into.
    #[serde(default = "default_timezone")]
    pub timezone: String,
    /// Monday-first short names used in day labels.
    #[serde(default)]
    pub day_names: DayNames,
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            day_names: DayNames::default(),
            service_name: default_service_name(),
            version: default_version(),
        }
    }
}

impl GraphConfig {
    /// Load from an explicit path. Supports TOML or JSON formats.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading graph config from {}", path.display()))?;
        let ext = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        let cfg = parse_config(&content, ext.as_str())
            .with_context(|| format!("parsing graph config {}", path.display()))?;
        cfg.validated()
    }

    /// Load using env var + fallbacks:
    /// 1) $GRAPH_CONFIG_PATH
    /// 2) config/graph.toml
    /// 3) config/graph.json
    /// 4) built-in defaults
    ///
    /// `$GRAPH_TIMEZONE` overrides the zone afterwards.
    pub fn load_default() -> Result<Self> {
        let mut cfg = if let Ok(p) = std::env::var(ENV_CONFIG_PATH) {
            let pb = PathBuf::from(p);
            if !pb.exists() {
                return Err(anyhow!("{ENV_CONFIG_PATH} points to non-existent path"));
            }
            Self::load_from(&pb)?
        } else if Path::new(DEFAULT_TOML_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_TOML_PATH))?
        } else if Path::new(DEFAULT_JSON_PATH).exists() {
            Self::load_from(Path::new(DEFAULT_JSON_PATH))?
        } else {
            Self::default()
        };

        if let Ok(tz) = std::env::var(ENV_TIMEZONE) {
            if !tz.trim().is_empty() {
                cfg.timezone = tz.trim().to_string();
            }
        }
        cfg.validated()
    }

    fn validated(self) -> Result<Self> {
        self.clock()?;
        Ok(self)
    }

    pub fn clock(&self) -> Result<LocalClock> {
        Ok(LocalClock::from_name(&self.timezone)?)
    }

    pub fn assembler(&self) -> Result<WeeklyAssembler> {
        Ok(WeeklyAssembler::new(self.clock()?, self.day_names.clone()))
    }
}

fn parse_config(s: &str, hint_ext: &str) -> Result<GraphConfig> {
    if hint_ext == "json" {
        return Ok(serde_json::from_str(s)?);
    }
    match toml::from_str::<GraphConfig>(s) {
        Ok(cfg) => Ok(cfg),
        Err(toml_err) => serde_json::from_str(s).map_err(|_| anyhow!(toml_err)),
    }
}
