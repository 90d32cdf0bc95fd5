// SPDX-License-Identifier: MIT
// Copyright (c) 2026 StarTuz

use crate::logbook::PilotRole;
use directories::ProjectDirs;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Civil twilight.
pub const DEFAULT_TWILIGHT_THRESHOLD_DEG: f64 = -6.0;
pub const DEFAULT_CARRIER_CODE: &str = "ACA";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightConfig {
    /// Sun altitude (degrees) below which a sampled minute counts as night.
    pub twilight_threshold_deg: f64,
    /// Flight-number prefix recognised by the OFP extractor.
    pub carrier_code: String,
    #[serde(deserialize_with = "lenient_role")]
    pub default_role: PilotRole,
}

impl Default for NightConfig {
    fn default() -> Self {
        Self {
            twilight_threshold_deg: DEFAULT_TWILIGHT_THRESHOLD_DEG,
            carrier_code: DEFAULT_CARRIER_CODE.to_string(),
            default_role: PilotRole::PilotFlying,
        }
    }
}

/// `PM` in any case is pilot monitoring; any other string is pilot flying.
fn lenient_role<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PilotRole, D::Error> {
    let raw = String::deserialize(deserializer)?;
    Ok(PilotRole::parse_lenient(&raw))
}

impl NightConfig {
    pub fn default_path() -> PathBuf {
        ProjectDirs::from("org", "nightlog", "nightlog")
            .map(|dirs| dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: NightConfig =
            serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("Loaded config from {:?}: {:?}", path, config);
        Ok(config)
    }

    /// Like [`NightConfig::load`], but a missing file means defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::debug!("No config at {:?}; using defaults", path);
            return Ok(Self::default());
        }
        Self::load(path)
    }
}
