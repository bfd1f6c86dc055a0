//! Core types for the boundary scan decoder library
//!
//! This module defines the fundamental types the decoder works with: the
//! records produced by the XDC and BSDL parsers, the bit-packed sample
//! buffer read from the scan chain, and the change events the detector
//! emits. The decoder only outputs change events - it does not print or
//! decide how they are presented.

use chrono::{DateTime, Utc};
use std::fmt;

/// Timestamp type used throughout the decoder
pub type Timestamp = DateTime<Utc>;

/// Result type for decoder operations
pub type Result<T> = std::result::Result<T, DecoderError>;

/// Display name used for a boundary bit whose pin has no XDC mapping
pub const UNKNOWN_SIGNAL: &str = "<unknown>";

/// Sanity cap on the boundary register length declared by a BSDL file.
/// Cell definitions with indices at or beyond this are dropped.
pub const MAX_BOUNDARY_BITS: usize = 8192;

/// Errors that can occur during decoding
#[derive(Debug, thiserror::Error)]
pub enum DecoderError {
    #[error("Failed to parse XDC file: {0}")]
    XdcParseError(String),

    #[error("Failed to parse BSDL file: {0}")]
    BsdlParseError(String),

    #[error("Scan chain transport failed: {0}")]
    TransportError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One pin-to-signal mapping parsed from an XDC constraints file
///
/// Produced from a line carrying both a `PACKAGE_PIN` and a `get_ports`
/// token. Duplicate pin names are kept as-is; lookup resolves to the first
/// record in source order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinRecord {
    /// Physical package pin name (e.g. "AB1")
    pub pin_name: String,
    /// Top-level port signal name (e.g. "clk_in"), braces stripped,
    /// internal array-index brackets preserved
    pub signal_name: String,
}

/// One boundary register cell parsed from a BSDL file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundaryCell {
    /// Position of this cell in the boundary register
    pub index: usize,
    /// Full cell name from the BSDL (e.g. "IO_T14")
    pub full_name: String,
    /// Cell function: "input", "output3", "controlr", ...
    pub cell_type: String,
    /// Default/safe value field from the cell descriptor
    pub default_value: String,
    /// Package pin this cell observes: the substring of `full_name`
    /// after its last underscore
    pub pin_name: String,
}

/// A raw bit-packed boundary register read
///
/// Bit `i` lives in byte `i >> 3` at mask `1 << (i & 7)`. Reads past the
/// end of the captured data yield 0, so a short transport read never
/// panics the detector.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleBuffer {
    bytes: Vec<u8>,
}

impl SampleBuffer {
    /// Create an empty buffer (every bit reads as 0)
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap captured scan bytes
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Value of bit `index`, 0 if the buffer is too short
    pub fn bit(&self, index: usize) -> bool {
        self.bytes
            .get(index >> 3)
            .map_or(false, |byte| (byte >> (index & 7)) & 1 == 1)
    }

    /// Number of captured bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// True if no bytes were captured
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Raw captured bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl From<&[u8]> for SampleBuffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes.to_vec())
    }
}

/// A reported state change of one visible boundary bit
///
/// Emitted by the change detector; the presentation layer decides how to
/// render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalChange {
    /// Wall-clock time the change was detected
    pub timestamp: Timestamp,
    /// Position of the cell in the boundary register
    pub bit_index: usize,
    /// Full cell name from the BSDL
    pub full_name: String,
    /// Package pin the cell observes
    pub pin_name: String,
    /// Resolved top-level signal name, or [`UNKNOWN_SIGNAL`]
    pub signal_name: String,
    /// New bit value
    pub value: bool,
}

impl fmt::Display for SignalChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bit#{} : {} (pin {}, signal {}) = {:x}",
            self.bit_index,
            self.full_name,
            self.pin_name,
            self.signal_name,
            self.value as u8
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_buffer_bit_addressing() {
        let buf = SampleBuffer::from_bytes(vec![0b0000_0101, 0b1000_0000]);
        assert!(buf.bit(0));
        assert!(!buf.bit(1));
        assert!(buf.bit(2));
        assert!(buf.bit(15));
        assert!(!buf.bit(14));
    }

    #[test]
    fn test_sample_buffer_short_read_is_zero() {
        let buf = SampleBuffer::from_bytes(vec![0xff]);
        assert!(buf.bit(7));
        assert!(!buf.bit(8));
        assert!(!buf.bit(4096));

        let empty = SampleBuffer::new();
        assert!(!empty.bit(0));
    }

    #[test]
    fn test_signal_change_display() {
        let change = SignalChange {
            timestamp: Utc::now(),
            bit_index: 12,
            full_name: "U5_RESET_N".to_string(),
            pin_name: "N".to_string(),
            signal_name: "reset_n".to_string(),
            value: true,
        };
        assert_eq!(
            format!("{}", change),
            "bit#12 : U5_RESET_N (pin N, signal reset_n) = 1"
        );
    }
}
