//! Configuration loading and parsing
//!
//! An optional TOML file can supply the same inputs as the command line;
//! explicit flags always win over config file values.
//!
//! ```toml
//! [input]
//! xdc = "board.xdc"
//! bsdl = "xc7a100t_csg324.bsd"
//! replay = "capture.hex"
//!
//! [monitor]
//! sensitivity = "reset_n led"
//! interval_ms = 100
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration (loaded from config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
}

/// Input file selection
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct InputConfig {
    /// XDC constraints file (pin-to-signal mapping)
    pub xdc: Option<PathBuf>,
    /// BSDL boundary register description
    pub bsdl: Option<PathBuf>,
    /// Captured sample stream to replay (stdin when absent)
    pub replay: Option<PathBuf>,
}

/// Monitoring loop settings
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MonitorConfig {
    /// Sensitivity list applied during resolution
    pub sensitivity: Option<String>,
    /// Override for the default-suppressed clock signal name
    pub clock_signal: Option<String>,
    /// Delay between samples in milliseconds
    pub interval_ms: Option<u64>,
    /// Stop after this many samples
    pub max_samples: Option<u64>,
}

/// Load and parse a config.toml file
pub fn load_config(path: &Path) -> Result<AppConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {:?}", path))?;
    let config: AppConfig = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {:?}", path))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
[input]
xdc = "board.xdc"
bsdl = "part.bsd"
replay = "capture.hex"

[monitor]
sensitivity = "reset_n led"
clock_signal = "sys_clk"
interval_ms = 100
max_samples = 50
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.input.xdc, Some(PathBuf::from("board.xdc")));
        assert_eq!(config.input.bsdl, Some(PathBuf::from("part.bsd")));
        assert_eq!(config.monitor.sensitivity.as_deref(), Some("reset_n led"));
        assert_eq!(config.monitor.clock_signal.as_deref(), Some("sys_clk"));
        assert_eq!(config.monitor.interval_ms, Some(100));
        assert_eq!(config.monitor.max_samples, Some(50));
    }

    #[test]
    fn test_sections_are_optional() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert!(config.input.xdc.is_none());
        assert!(config.monitor.sensitivity.is_none());
    }
}
