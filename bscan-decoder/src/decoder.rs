//! Main decoder API
//!
//! This module provides the primary interface for the decoder library.
//! The Decoder struct is the entry point for loading input files and
//! resolving the boundary chain they describe.

use crate::chain::{BoundaryChain, PinTable};
use crate::config::DecoderConfig;
use crate::formats::BsdlFile;
use crate::types::Result;
use std::path::Path;

/// The main decoder struct - entry point for loading and resolving
#[derive(Debug, Default)]
pub struct Decoder {
    /// Pin-to-signal mappings accumulated from XDC files
    pins: PinTable,
    /// Boundary register description, once a BSDL was loaded
    bsdl: Option<BsdlFile>,
}

impl Decoder {
    /// Create a new decoder instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load an XDC file and add its pin mappings to the pin table
    ///
    /// May be called several times; records accumulate in load order and
    /// the first record for a pin stays authoritative.
    ///
    /// # Example
    /// ```no_run
    /// use bscan_decoder::Decoder;
    /// use std::path::Path;
    ///
    /// let mut decoder = Decoder::new();
    /// decoder.add_xdc(Path::new("board.xdc")).unwrap();
    /// ```
    pub fn add_xdc(&mut self, path: &Path) -> Result<()> {
        log::info!("Loading XDC file: {:?}", path);

        let records = crate::formats::parse_xdc_file(path)?;
        for record in records {
            self.pins.add_record(record);
        }

        log::info!("XDC file loaded successfully: {:?}", path);
        Ok(())
    }

    /// Load a BSDL file describing the boundary register
    ///
    /// A scan chain with one TAP has one BSDL; loading a second replaces
    /// the first.
    pub fn add_bsdl(&mut self, path: &Path) -> Result<()> {
        log::info!("Loading BSDL file: {:?}", path);

        let bsdl = crate::formats::parse_bsdl_file(path)?;
        if self.bsdl.is_some() {
            log::warn!("Replacing previously loaded BSDL description");
        }
        self.bsdl = Some(bsdl);

        log::info!("BSDL file loaded successfully: {:?}", path);
        Ok(())
    }

    /// True once a BSDL description was loaded
    pub fn has_bsdl(&self) -> bool {
        self.bsdl.is_some()
    }

    /// Number of pin mappings loaded so far
    pub fn pin_count(&self) -> usize {
        self.pins.len()
    }

    /// Join the loaded tables into a resolved boundary chain
    ///
    /// With no BSDL loaded the chain is empty (callers fall back to raw
    /// hex dumps). Resolution does not consume the decoder and is
    /// idempotent.
    pub fn resolve(&self, config: &DecoderConfig) -> BoundaryChain {
        match &self.bsdl {
            Some(bsdl) => BoundaryChain::resolve(bsdl, &self.pins, config),
            None => BoundaryChain::default(),
        }
    }
}
