//! Simulation constants, loadable from a TOML file.
//!
//! Every field has a default matching the classical configuration, so an
//! empty file (or no file at all) yields a runnable setup:
//!
//! ```toml
//! [memory]
//! size = 256
//! relocating_time = 20.0
//!
//! [processor]
//! quantum = 50.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SimSettings {
    #[serde(default)]
    pub memory: MemorySettings,
    #[serde(default)]
    pub disc: DiscSettings,
    #[serde(default)]
    pub processor: ProcessorSettings,
    #[serde(default)]
    pub multiprogramming: MultiprogrammingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MemorySettings {
    #[serde(default = "default_memory_size")]
    pub size: u64,
    #[serde(default = "default_relocating_time")]
    pub relocating_time: f64,
}

impl Default for MemorySettings {
    fn default() -> Self {
        Self {
            size: default_memory_size(),
            relocating_time: default_relocating_time(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DiscSettings {
    #[serde(default = "default_positioning_time")]
    pub positioning_time: f64,
    #[serde(default = "default_latency_time")]
    pub latency_time: f64,
    #[serde(default = "default_transfer_rate")]
    pub transfer_rate: f64,
}

impl Default for DiscSettings {
    fn default() -> Self {
        Self {
            positioning_time: default_positioning_time(),
            latency_time: default_latency_time(),
            transfer_rate: default_transfer_rate(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProcessorSettings {
    #[serde(default = "default_quantum")]
    pub quantum: f64,
    #[serde(default)]
    pub overhead_time: f64,
}

impl Default for ProcessorSettings {
    fn default() -> Self {
        Self {
            quantum: default_quantum(),
            overhead_time: 0.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MultiprogrammingSettings {
    #[serde(default = "default_multiprogramming_limit")]
    pub limit: u32,
}

impl Default for MultiprogrammingSettings {
    fn default() -> Self {
        Self {
            limit: default_multiprogramming_limit(),
        }
    }
}

fn default_memory_size() -> u64 {
    256
}

fn default_relocating_time() -> f64 {
    20.0
}

fn default_positioning_time() -> f64 {
    5.0
}

fn default_latency_time() -> f64 {
    5.0
}

fn default_transfer_rate() -> f64 {
    40.0
}

fn default_quantum() -> f64 {
    50.0
}

fn default_multiprogramming_limit() -> u32 {
    4
}

/// Loads settings from a TOML file.
pub fn load_settings(path: impl AsRef<Path>) -> Result<SimSettings, ConfigError> {
    let text = std::fs::read_to_string(path)?;
    let settings = toml::from_str(&text)?;
    Ok(settings)
}
