//! Change report and hex dump formatting
//!
//! Renders the detector's change events for the console. Formatting is
//! split from printing so the output can be asserted in tests.

use bscan_decoder::SignalChange;
use std::fmt::Write as _;

/// Print a change report for one sample iteration
pub fn print_changes(elapsed_ms: u64, changes: &[SignalChange]) {
    print!("{}", format_changes(elapsed_ms, changes));
}

/// Format a change report: one timestamp header, then one line per bit
pub fn format_changes(elapsed_ms: u64, changes: &[SignalChange]) -> String {
    let mut out = String::new();
    if changes.is_empty() {
        return out;
    }

    let _ = writeln!(out, "T+{}ms >>> Signal(s) changed.", elapsed_ms);
    for change in changes {
        let _ = writeln!(out, "{}", change);
    }
    out
}

/// Print a raw capture when no BSDL is available to decode it
pub fn print_hex_dump(label: &str, bytes: &[u8]) {
    print!("{}", format_hex_dump(label, bytes));
}

/// Format bytes as a classic offset-prefixed hex dump, 16 per row
pub fn format_hex_dump(label: &str, bytes: &[u8]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}:", label);
    for (row, chunk) in bytes.chunks(16).enumerate() {
        let _ = write!(out, "  {:04x}:", row * 16);
        for byte in chunk {
            let _ = write!(out, " {:02x}", byte);
        }
        let _ = writeln!(out);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use bscan_decoder::Timestamp;

    fn change(bit_index: usize, value: bool) -> SignalChange {
        SignalChange {
            timestamp: Timestamp::default(),
            bit_index,
            full_name: format!("IO_T{}", bit_index),
            pin_name: format!("T{}", bit_index),
            signal_name: format!("led[{}]", bit_index),
            value,
        }
    }

    #[test]
    fn test_format_changes() {
        let report = format_changes(1500, &[change(3, true), change(7, false)]);
        assert_eq!(
            report,
            "T+1500ms >>> Signal(s) changed.\n\
             bit#3 : IO_T3 (pin T3, signal led[3]) = 1\n\
             bit#7 : IO_T7 (pin T7, signal led[7]) = 0\n"
        );
    }

    #[test]
    fn test_empty_changes_print_nothing() {
        assert_eq!(format_changes(42, &[]), "");
    }

    #[test]
    fn test_format_hex_dump() {
        let dump = format_hex_dump("boundary data", &[0xaa; 17]);
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "boundary data:");
        assert!(lines[1].starts_with("  0000: aa aa"));
        assert_eq!(lines[2], "  0010: aa");
    }
}
