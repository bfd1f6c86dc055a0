//! Decoder configuration types
//!
//! This module defines the minimal configuration needed by the decoder
//! library. Polling cadence, input file selection and output formatting are
//! handled by the application layer.

use serde::{Deserialize, Serialize};

/// Configuration for resolving a boundary scan chain
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Optional sensitivity list: a free-text allow-list. A bit is active
    /// only if its resolved signal name occurs in this string
    /// (case-insensitive substring match).
    #[serde(default)]
    pub sensitivity: Option<String>,

    /// Signal name suppressed by default when no sensitivity list is given
    #[serde(default = "default_clock_signal")]
    pub clock_signal: String,

    /// Upper bound accepted for a declared boundary register length
    #[serde(default = "default_max_boundary_bits")]
    pub max_boundary_bits: usize,
}

fn default_clock_signal() -> String {
    "CLK_IN".to_string()
}

fn default_max_boundary_bits() -> usize {
    crate::types::MAX_BOUNDARY_BITS
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            sensitivity: None,
            clock_signal: default_clock_signal(),
            max_boundary_bits: default_max_boundary_bits(),
        }
    }
}

impl DecoderConfig {
    /// Create a new decoder configuration with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method: set the sensitivity list
    pub fn with_sensitivity(mut self, sensitivity: impl Into<String>) -> Self {
        self.sensitivity = Some(sensitivity.into());
        self
    }

    /// Builder method: override the default-suppressed clock signal name
    pub fn with_clock_signal(mut self, name: impl Into<String>) -> Self {
        self.clock_signal = name.into();
        self
    }
}
