//! XDC constraints file parser
//!
//! Extracts pin-to-signal mappings from Vivado XDC files. The only lines of
//! interest carry both a `PACKAGE_PIN` and a `get_ports` token, e.g.
//!
//! ```text
//! set_property PACKAGE_PIN AB1 [get_ports {clk_in}]
//! ```
//!
//! Everything else in the file (clocks, IO standards, comments) is ignored.

use crate::types::{DecoderError, PinRecord, Result};
use std::path::Path;

const PACKAGE_PIN_MARKER: &str = "PACKAGE_PIN ";
const GET_PORTS_MARKER: &str = "get_ports ";

/// Parse an XDC file and return the pin records in source order
pub(crate) fn parse_xdc_file(path: &Path) -> Result<Vec<PinRecord>> {
    log::info!("Parsing XDC file: {:?}", path);

    let bytes = std::fs::read(path).map_err(|e| {
        DecoderError::XdcParseError(format!("Failed to read file {:?}: {}", path, e))
    })?;

    // XDC files are ASCII in practice; tolerate stray high bytes in comments
    let content = String::from_utf8_lossy(&bytes);

    let records: Vec<PinRecord> = content.lines().filter_map(parse_xdc_line).collect();

    log::info!("Parsed {} pin mappings from {:?}", records.len(), path);

    Ok(records)
}

/// Parse a single XDC line into a pin record
///
/// Returns `None` for comment lines and for lines missing either token.
fn parse_xdc_line(line: &str) -> Option<PinRecord> {
    if line.starts_with('#') {
        return None;
    }

    let pin_name = extract_pin_name(line)?;
    let signal_name = extract_signal_name(line)?;

    Some(PinRecord {
        pin_name: pin_name.to_string(),
        signal_name: signal_name.to_string(),
    })
}

/// The token immediately following `PACKAGE_PIN `, up to the next whitespace
fn extract_pin_name(line: &str) -> Option<&str> {
    let at = line.find(PACKAGE_PIN_MARKER)?;
    let rest = &line[at + PACKAGE_PIN_MARKER.len()..];
    let name = rest.split_whitespace().next()?;
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

/// The text between `get_ports ` and the matching closing bracket
///
/// Tracks nested `[`/`]` depth so array-index brackets inside the port name
/// (e.g. `{led[2]}`) are skipped; one layer of enclosing braces is stripped.
fn extract_signal_name(line: &str) -> Option<&str> {
    let at = line.find(GET_PORTS_MARKER)?;
    let rest = &line[at + GET_PORTS_MARKER.len()..];

    let mut depth = 0usize;
    let mut end = None;
    for (i, ch) in rest.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' => {
                if depth > 0 {
                    depth -= 1;
                } else {
                    end = Some(i);
                    break;
                }
            }
            _ => {}
        }
    }

    let name = &rest[..end?];
    let name = name.strip_prefix('{').unwrap_or(name);
    let name = name.strip_suffix('}').unwrap_or(name);
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}
