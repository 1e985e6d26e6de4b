//! Configuration management for aie-ss.
//!
//! Configuration is loaded from multiple sources in priority order:
//! 1. Environment variables (`AIE_SS_ARCH`, `AIE_SS_BASE_ADDR`)
//! 2. Project-local config file (`./aie-ss.toml`)
//! 3. User config file (`~/.config/aie-ss/config.toml`)
//! 4. Built-in defaults
//!
//! # Config File Format
//!
//! ```toml
//! # aie-ss.toml
//!
//! # Target architecture: aie2 (npu1) or aie2p (npu2)
//! arch = "aie2"
//!
//! # Address of tile (0,0) in the register space
//! base_addr = 0x0
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};

use crate::device::arch_config::{arch_from_name, ArchConfig};

/// Global cached configuration.
static CONFIG: OnceLock<Config> = OnceLock::new();

const DEFAULT_ARCH: &str = "aie2";

/// aie-ss configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Target architecture name.
    pub arch: Option<String>,

    /// Array base address added to every tile address.
    pub base_addr: Option<u64>,
}

impl Config {
    /// Load configuration from all sources.
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(user_config) = Self::load_user_config() {
            config.merge(user_config);
        }

        if let Some(local_config) = Self::load_local_config() {
            config.merge(local_config);
        }

        config.apply_env_overrides();

        config
    }

    /// Get the cached global configuration.
    ///
    /// Loads configuration on first call and caches it.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(|| {
            let config = Self::load();
            log::debug!("Loaded configuration: {:?}", config);
            config
        })
    }

    /// Architecture name, with fallback to `aie2`.
    pub fn arch_name(&self) -> &str {
        self.arch.as_deref().unwrap_or(DEFAULT_ARCH)
    }

    /// Resolve the architecture. `None` if the name is unknown.
    pub fn arch_config(&self) -> Option<Arc<dyn ArchConfig>> {
        arch_from_name(self.arch_name())
    }

    /// Array base address, with fallback to 0.
    pub fn base_addr(&self) -> u64 {
        self.base_addr.unwrap_or(0)
    }

    /// Load user configuration from ~/.config/aie-ss/config.toml
    fn load_user_config() -> Option<Self> {
        let config_path = Self::user_config_path()?;
        Self::load_from_file(&config_path)
    }

    /// Load project-local configuration from ./aie-ss.toml
    fn load_local_config() -> Option<Self> {
        Self::load_from_file(Path::new("aie-ss.toml"))
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge another config into this one.
    /// Only overrides fields that are Some in the other config.
    fn merge(&mut self, other: Self) {
        if other.arch.is_some() {
            self.arch = other.arch;
        }
        if other.base_addr.is_some() {
            self.base_addr = other.base_addr;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(arch) = std::env::var("AIE_SS_ARCH") {
            log::info!("Using AIE_SS_ARCH from environment: {}", arch);
            self.arch = Some(arch);
        }
        if let Ok(addr) = std::env::var("AIE_SS_BASE_ADDR") {
            match parse_u64(&addr) {
                Some(value) => {
                    log::info!("Using AIE_SS_BASE_ADDR from environment: 0x{:X}", value);
                    self.base_addr = Some(value);
                }
                None => log::warn!("Ignoring AIE_SS_BASE_ADDR: not a number: {}", addr),
            }
        }
    }

    /// Get the path to the user config file (for display/creation).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("aie-ss").join("config.toml"))
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        r#"# aie-ss configuration
# Place this file at ~/.config/aie-ss/config.toml or ./aie-ss.toml

# Target architecture: aie2 / npu1 (Phoenix, HawkPoint) or aie2p / npu2 (Strix)
arch = "aie2"

# Address of tile (0,0); every register address is offset by this
# base_addr = 0x20000000000
"#
        .to_string()
    }
}

/// Parse a decimal or `0x`-prefixed hexadecimal number.
pub fn parse_u64(s: &str) -> Option<u64> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => s.replace('_', "").parse().ok(),
    }
}
