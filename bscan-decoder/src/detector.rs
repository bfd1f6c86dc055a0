//! Per-sample change detection
//!
//! Compares each boundary register sample against the previous one and
//! emits a [`SignalChange`] event for every visible bit that changed. The
//! detector never prints: rendering the event list is the application's
//! job, which keeps detection testable without capturing console output.
//!
//! First-sample behavior matches the monitoring tool this decoder serves:
//! with no sensitivity list, the first sample reports every visible bit
//! (the suppressed clock included) so the operator sees the initial pin
//! state; with a sensitivity list, even the first sample is gated by the
//! per-bit ignore flag.

use crate::chain::BoundaryChain;
use crate::types::{SampleBuffer, SignalChange};
use chrono::Utc;

/// Stateful change detector over a resolved boundary chain
#[derive(Debug)]
pub struct ChangeDetector {
    chain: BoundaryChain,
    previous: SampleBuffer,
    first_sample: bool,
}

impl ChangeDetector {
    /// Create a detector; the next sample it sees is the "first" one
    pub fn new(chain: BoundaryChain) -> Self {
        Self {
            chain,
            previous: SampleBuffer::new(),
            first_sample: true,
        }
    }

    /// The chain this detector reports on
    pub fn chain(&self) -> &BoundaryChain {
        &self.chain
    }

    /// Compare `current` against the previous sample
    ///
    /// Returns the change events in bit-index order, then makes `current`
    /// the new previous sample. Bytes missing from a short capture read
    /// as 0.
    pub fn detect(&mut self, current: &[u8]) -> Vec<SignalChange> {
        let sample = SampleBuffer::from(current);
        let report_ignored = self.first_sample && !self.chain.sensitivity_filtered();
        let timestamp = Utc::now();

        let mut changes = Vec::new();
        for (index, bit) in self.chain.bits().iter().enumerate() {
            if !bit.resolved.show {
                continue;
            }

            let value = sample.bit(index);
            if !self.first_sample && value == self.previous.bit(index) {
                continue;
            }
            if !report_ignored && bit.resolved.ignore {
                continue;
            }

            if let Some(cell) = &bit.cell {
                changes.push(SignalChange {
                    timestamp,
                    bit_index: index,
                    full_name: cell.full_name.clone(),
                    pin_name: cell.pin_name.clone(),
                    signal_name: bit.resolved.signal_name.clone(),
                    value,
                });
            }
        }

        self.previous = sample;
        self.first_sample = false;
        changes
    }
}
