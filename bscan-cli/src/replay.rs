//! Offline replay scan-chain source
//!
//! Feeds the monitor from a captured sample stream instead of live
//! hardware: one hex-encoded boundary register capture per line,
//! whitespace between bytes tolerated, `#` comment lines and blank lines
//! skipped. End of input ends the monitoring loop.

use bscan_decoder::{DecoderError, Result, ScanChain};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

/// A [`ScanChain`] that replays captured sample lines
pub struct ReplayChain<R> {
    reader: R,
    line_number: u64,
}

impl ReplayChain<BufReader<File>> {
    /// Replay samples from a capture file
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl ReplayChain<BufReader<io::Stdin>> {
    /// Replay samples piped on standard input
    pub fn from_stdin() -> Self {
        Self::new(BufReader::new(io::stdin()))
    }
}

impl<R: BufRead> ReplayChain<R> {
    /// Replay samples from any buffered reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
        }
    }
}

impl<R: BufRead> ScanChain for ReplayChain<R> {
    // The capture already happened; TAP operations are no-ops here.
    fn reset(&mut self) -> Result<()> {
        Ok(())
    }

    fn write_ir(&mut self, _value: u32, _bits: u8) -> Result<()> {
        Ok(())
    }

    fn sample(&mut self, bytes: usize) -> Result<Option<Vec<u8>>> {
        loop {
            let mut text = String::new();
            let read = self.reader.read_line(&mut text)?;
            if read == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            let trimmed = text.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut buffer = decode_hex_line(trimmed).map_err(|e| {
                DecoderError::TransportError(format!("replay line {}: {}", self.line_number, e))
            })?;
            // Short captures read as all-zero past their end
            if buffer.len() < bytes {
                buffer.resize(bytes, 0);
            }
            return Ok(Some(buffer));
        }
    }
}

/// Decode one line of hex byte pairs, ignoring embedded whitespace
fn decode_hex_line(line: &str) -> std::result::Result<Vec<u8>, String> {
    let digits: String = line.chars().filter(|c| !c.is_whitespace()).collect();
    if digits.len() % 2 != 0 {
        return Err(format!("odd number of hex digits ({})", digits.len()));
    }

    (0..digits.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| format!("invalid hex byte '{}'", &digits[i..i + 2]))
        })
        .collect()
}
