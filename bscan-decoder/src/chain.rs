//! Pin table and resolved boundary chain
//!
//! Joins the two parsed tables: every boundary register cell is looked up
//! by its pin name in the XDC pin table, producing one [`ResolvedBit`] per
//! declared register position with a display name, a visibility flag and an
//! ignore flag. Resolution runs once after both files are loaded; the chain
//! is read-only afterwards.

use crate::config::DecoderConfig;
use crate::formats::BsdlFile;
use crate::types::{BoundaryCell, PinRecord, UNKNOWN_SIGNAL};
use std::collections::HashMap;

/// Insertion-ordered collection of pin-to-signal mappings
///
/// Duplicate pin names are kept; lookup returns the first record in source
/// order.
#[derive(Debug, Clone, Default)]
pub struct PinTable {
    records: Vec<PinRecord>,
    /// Pin name -> index of its first record
    by_pin: HashMap<String, usize>,
}

impl PinTable {
    /// Create an empty pin table
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record, keeping earlier records authoritative for lookup
    pub fn add_record(&mut self, record: PinRecord) {
        let index = self.records.len();
        self.by_pin.entry(record.pin_name.clone()).or_insert(index);
        self.records.push(record);
    }

    /// Signal name mapped to `pin_name`, if any
    pub fn lookup(&self, pin_name: &str) -> Option<&str> {
        self.by_pin
            .get(pin_name)
            .map(|&i| self.records[i].signal_name.as_str())
    }

    /// All records in source order
    pub fn records(&self) -> &[PinRecord] {
        &self.records
    }

    /// Number of records (duplicates included)
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no records were parsed
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Display attributes derived for one boundary register position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedBit {
    /// Signal mapped to the cell's pin, or [`UNKNOWN_SIGNAL`]
    pub signal_name: String,
    /// Suppressed from change reports when true
    pub ignore: bool,
    /// Only "input" cells are shown
    pub show: bool,
}

/// One boundary register position: the parsed cell (if the BSDL defined
/// one at this index) plus its resolved display attributes
#[derive(Debug, Clone)]
pub struct ChainBit {
    /// Cell definition, `None` when the declared length covers an index no
    /// cell line defined
    pub cell: Option<BoundaryCell>,
    /// Resolved display attributes
    pub resolved: ResolvedBit,
}

/// Summary counters for a resolved chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainStats {
    /// Entity name from the BSDL, if one was declared
    pub part_name: Option<String>,
    /// Number of pin mappings loaded
    pub pins: usize,
    /// Declared boundary register length
    pub boundary_bits: usize,
    /// Bits with an "input" cell type
    pub visible_bits: usize,
    /// Visible bits that pass the ignore gate
    pub active_bits: usize,
}

/// The fully resolved boundary scan chain
#[derive(Debug, Clone, Default)]
pub struct BoundaryChain {
    part_name: Option<String>,
    bits: Vec<ChainBit>,
    pin_count: usize,
    /// True when a sensitivity list was applied during resolution
    sensitivity_filtered: bool,
}

impl BoundaryChain {
    /// Join the boundary cell table with the pin table
    ///
    /// For each index in `[0, boundary_length)`: the first cell definition
    /// for that index wins, its pin is looked up in the pin table, and the
    /// show/ignore flags are derived per `config`. Resolution is
    /// idempotent: the same inputs always produce the same chain.
    pub(crate) fn resolve(bsdl: &BsdlFile, pins: &PinTable, config: &DecoderConfig) -> Self {
        let length = bsdl.boundary_length.min(config.max_boundary_bits);

        let mut cells: Vec<Option<BoundaryCell>> = vec![None; length];
        for cell in &bsdl.cells {
            if cell.index >= length {
                log::debug!(
                    "Dropping boundary cell #{} past declared length {}",
                    cell.index,
                    length
                );
                continue;
            }
            if cells[cell.index].is_some() {
                log::debug!("Duplicate definition for boundary cell #{}", cell.index);
                continue;
            }
            cells[cell.index] = Some(cell.clone());
        }

        let bits = cells
            .into_iter()
            .map(|cell| {
                let resolved = match &cell {
                    Some(cell) => resolve_cell(cell, pins, config),
                    // Declared but never defined: nothing to show
                    None => ResolvedBit {
                        signal_name: UNKNOWN_SIGNAL.to_string(),
                        ignore: true,
                        show: false,
                    },
                };
                ChainBit { cell, resolved }
            })
            .collect();

        Self {
            part_name: bsdl.part_name.clone(),
            bits,
            pin_count: pins.len(),
            sensitivity_filtered: config.sensitivity.is_some(),
        }
    }

    /// Entity name from the BSDL
    pub fn part_name(&self) -> Option<&str> {
        self.part_name.as_deref()
    }

    /// All register positions in index order
    pub fn bits(&self) -> &[ChainBit] {
        &self.bits
    }

    /// Declared boundary register length
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    /// True when no BSDL was loaded (or it declared zero bits)
    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// True when a sensitivity list was applied during resolution
    pub fn sensitivity_filtered(&self) -> bool {
        self.sensitivity_filtered
    }

    /// Visible, non-ignored bits: `(index, resolved signal name)`
    pub fn active_bits(&self) -> impl Iterator<Item = (usize, &str)> {
        self.bits
            .iter()
            .enumerate()
            .filter(|(_, bit)| bit.resolved.show && !bit.resolved.ignore)
            .map(|(i, bit)| (i, bit.resolved.signal_name.as_str()))
    }

    /// Summary counters
    pub fn stats(&self) -> ChainStats {
        let visible_bits = self.bits.iter().filter(|b| b.resolved.show).count();
        let active_bits = self.active_bits().count();
        ChainStats {
            part_name: self.part_name.clone(),
            pins: self.pin_count,
            boundary_bits: self.bits.len(),
            visible_bits,
            active_bits,
        }
    }
}

/// Derive display attributes for one defined cell
fn resolve_cell(cell: &BoundaryCell, pins: &PinTable, config: &DecoderConfig) -> ResolvedBit {
    let signal_name = pins
        .lookup(&cell.pin_name)
        .unwrap_or(UNKNOWN_SIGNAL)
        .to_string();

    let show = cell.cell_type == "input";

    let ignore = match &config.sensitivity {
        Some(list) => !contains_ignore_ascii_case(list, &signal_name),
        None => signal_name == config.clock_signal,
    };

    ResolvedBit {
        signal_name,
        ignore,
        show,
    }
}

/// Case-insensitive substring test (`needle` inside `haystack`)
fn contains_ignore_ascii_case(haystack: &str, needle: &str) -> bool {
    haystack
        .to_ascii_lowercase()
        .contains(&needle.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pin(pin_name: &str, signal_name: &str) -> PinRecord {
        PinRecord {
            pin_name: pin_name.to_string(),
            signal_name: signal_name.to_string(),
        }
    }

    fn cell(index: usize, full_name: &str, cell_type: &str) -> BoundaryCell {
        let pin_name = full_name.rsplit('_').next().unwrap_or(full_name);
        BoundaryCell {
            index,
            full_name: full_name.to_string(),
            cell_type: cell_type.to_string(),
            default_value: "X".to_string(),
            pin_name: pin_name.to_string(),
        }
    }

    fn test_bsdl() -> BsdlFile {
        BsdlFile {
            part_name: Some("XC7A100T".to_string()),
            boundary_length: 6,
            cells: vec![
                cell(0, "IO_AB1", "input"),
                cell(1, "IO_T14", "input"),
                cell(2, "IO_T15", "output3"),
                cell(4, "IO_N15", "input"),
            ],
        }
    }

    fn test_pins() -> PinTable {
        let mut pins = PinTable::new();
        pins.add_record(pin("AB1", "CLK_IN"));
        pins.add_record(pin("T14", "led[0]"));
        pins.add_record(pin("T15", "led[1]"));
        pins
    }

    #[test]
    fn test_pin_table_first_match_wins() {
        let mut pins = PinTable::new();
        pins.add_record(pin("AB1", "clk_in"));
        pins.add_record(pin("AB1", "clk_alt"));
        assert_eq!(pins.lookup("AB1"), Some("clk_in"));
        assert_eq!(pins.len(), 2);
        assert_eq!(pins.lookup("ZZ9"), None);
    }

    #[test]
    fn test_resolve_joins_tables() {
        let chain = BoundaryChain::resolve(&test_bsdl(), &test_pins(), &DecoderConfig::new());

        assert_eq!(chain.len(), 6);
        assert_eq!(chain.part_name(), Some("XC7A100T"));

        // Input cell with a mapped pin
        let bit = &chain.bits()[1];
        assert_eq!(bit.resolved.signal_name, "led[0]");
        assert!(bit.resolved.show);
        assert!(!bit.resolved.ignore);

        // Output cell: resolved but not shown
        let bit = &chain.bits()[2];
        assert_eq!(bit.resolved.signal_name, "led[1]");
        assert!(!bit.resolved.show);

        // Unmapped pin resolves to the sentinel
        let bit = &chain.bits()[4];
        assert_eq!(bit.resolved.signal_name, UNKNOWN_SIGNAL);
        assert!(bit.resolved.show);

        // Declared-but-undefined positions are not shown
        let bit = &chain.bits()[3];
        assert!(bit.cell.is_none());
        assert!(!bit.resolved.show);
        assert!(bit.resolved.ignore);
    }

    #[test]
    fn test_clock_suppressed_without_sensitivity() {
        let chain = BoundaryChain::resolve(&test_bsdl(), &test_pins(), &DecoderConfig::new());
        let bit = &chain.bits()[0];
        assert_eq!(bit.resolved.signal_name, "CLK_IN");
        assert!(bit.resolved.show);
        assert!(bit.resolved.ignore);
        assert!(!chain.sensitivity_filtered());
    }

    #[test]
    fn test_sensitivity_filter_overrides_clock_rule() {
        let config = DecoderConfig::new().with_sensitivity("clk_in led[0]");
        let chain = BoundaryChain::resolve(&test_bsdl(), &test_pins(), &config);

        // Case-insensitive substring match admits the clock
        assert!(!chain.bits()[0].resolved.ignore);
        assert!(!chain.bits()[1].resolved.ignore);
        // Unmapped signal is not in the list
        assert!(chain.bits()[4].resolved.ignore);
        assert!(chain.sensitivity_filtered());

        let active: Vec<_> = chain.active_bits().collect();
        assert_eq!(active, vec![(0, "CLK_IN"), (1, "led[0]")]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let bsdl = test_bsdl();
        let pins = test_pins();
        let config = DecoderConfig::new().with_sensitivity("led");

        let first = BoundaryChain::resolve(&bsdl, &pins, &config);
        let second = BoundaryChain::resolve(&bsdl, &pins, &config);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.bits().iter().zip(second.bits().iter()) {
            assert_eq!(a.resolved, b.resolved);
        }
    }

    #[test]
    fn test_duplicate_cell_index_first_definition_wins() {
        let mut bsdl = test_bsdl();
        bsdl.cells.push(cell(0, "IO_DUP_AB1", "output3"));
        let chain = BoundaryChain::resolve(&bsdl, &test_pins(), &DecoderConfig::new());
        assert_eq!(
            chain.bits()[0].cell.as_ref().unwrap().full_name,
            "IO_AB1"
        );
    }

    #[test]
    fn test_stats() {
        let chain = BoundaryChain::resolve(&test_bsdl(), &test_pins(), &DecoderConfig::new());
        let stats = chain.stats();
        assert_eq!(stats.part_name.as_deref(), Some("XC7A100T"));
        assert_eq!(stats.pins, 3);
        assert_eq!(stats.boundary_bits, 6);
        // bits 0, 1 and 4 are inputs
        assert_eq!(stats.visible_bits, 3);
        // CLK_IN is ignored by default
        assert_eq!(stats.active_bits, 2);
    }
}
