//! Input file parsers (XDC, BSDL)
//!
//! This module contains the line-oriented parsers for the two input file
//! formats. Both formats are consumed via minimal pattern matching over the
//! handful of fields this tool needs, not a full grammar; lines that do not
//! match are skipped silently.

pub(crate) mod bsdl;
pub(crate) mod xdc;

pub(crate) use bsdl::{parse_bsdl_file, BsdlFile};
pub(crate) use xdc::parse_xdc_file;
