//! BSDL boundary-scan description parser
//!
//! Pulls two things out of a BSDL file: the BOUNDARY_LENGTH attribute
//! (part name plus register length) and the per-cell lines of the
//! BOUNDARY_REGISTER attribute, e.g.
//!
//! ```text
//! attribute BOUNDARY_LENGTH of XC7A100T_CSG324 : entity is 1367;
//! "   12 (BC_2, U5_RESET_N, input, X)," &
//! ```
//!
//! Only `BC_<n>` cell descriptors with a name, type and default field are
//! recorded; anything else (control cells named `*`, VHDL boilerplate) is
//! skipped.

use crate::types::{BoundaryCell, DecoderError, Result, MAX_BOUNDARY_BITS};
use std::path::Path;

const BOUNDARY_LENGTH_MARKER: &str = "attribute BOUNDARY_LENGTH of ";

/// Parsed contents of one BSDL file
#[derive(Debug, Clone, Default)]
pub(crate) struct BsdlFile {
    /// Entity name from the BOUNDARY_LENGTH attribute
    pub part_name: Option<String>,
    /// Declared boundary register length in bits
    pub boundary_length: usize,
    /// Cell definitions in file order; indices may repeat or exceed the
    /// declared length, resolution decides what to keep
    pub cells: Vec<BoundaryCell>,
}

/// Parse a BSDL file
pub(crate) fn parse_bsdl_file(path: &Path) -> Result<BsdlFile> {
    log::info!("Parsing BSDL file: {:?}", path);

    let bytes = std::fs::read(path).map_err(|e| {
        DecoderError::BsdlParseError(format!("Failed to read file {:?}: {}", path, e))
    })?;
    let content = String::from_utf8_lossy(&bytes);

    let mut bsdl = BsdlFile::default();

    for line in content.lines() {
        if let Some((part, length)) = parse_boundary_length(line) {
            if length > MAX_BOUNDARY_BITS {
                log::warn!(
                    "Declared boundary length {} exceeds the {} bit cap, clamping",
                    length,
                    MAX_BOUNDARY_BITS
                );
                bsdl.boundary_length = MAX_BOUNDARY_BITS;
            } else {
                bsdl.boundary_length = length;
            }
            log::info!(
                "Part is assumed to be a {}, with {} bits of boundary scan data",
                part,
                bsdl.boundary_length
            );
            bsdl.part_name = Some(part);
            continue;
        }

        if let Some(cell) = parse_cell_line(line) {
            if cell.index >= MAX_BOUNDARY_BITS {
                log::debug!("Dropping out-of-range boundary cell #{}", cell.index);
                continue;
            }
            bsdl.cells.push(cell);
        }
    }

    log::info!(
        "Parsed {} boundary cells from {:?}",
        bsdl.cells.len(),
        path
    );

    Ok(bsdl)
}

/// Match `attribute BOUNDARY_LENGTH of <part> : entity is <count>;`
fn parse_boundary_length(line: &str) -> Option<(String, usize)> {
    let rest = line.trim_start().strip_prefix(BOUNDARY_LENGTH_MARKER)?;
    let (part, rest) = rest.split_once(':')?;
    let part = part.trim();
    let rest = rest.trim_start().strip_prefix("entity is")?;
    let digits: &str = rest
        .trim_start()
        .split(|c: char| !c.is_ascii_digit())
        .next()?;
    if part.is_empty() || digits.is_empty() {
        return None;
    }
    Some((part.to_string(), digits.parse().ok()?))
}

/// Match one boundary register cell line:
/// `"<index> (BC_<n>, <name>, <type>, <default>...`
///
/// The pin name is derived as the substring after the last underscore of
/// the cell name (the whole name if it has no underscore).
fn parse_cell_line(line: &str) -> Option<BoundaryCell> {
    let rest = line.trim_start().strip_prefix('"')?;
    let rest = rest.trim_start();

    let digits_len = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits_len == 0 {
        return None;
    }
    let index: usize = rest[..digits_len].parse().ok()?;

    let rest = rest[digits_len..].trim_start().strip_prefix("(BC_")?;
    let cell_digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    if cell_digits == 0 {
        return None;
    }

    let mut fields = rest[cell_digits..].strip_prefix(',')?.splitn(3, ',');
    let full_name = fields.next()?.trim();
    let cell_type = fields.next()?.trim();
    let default_value = fields.next()?.split([',', ')']).next()?.trim();

    if full_name.is_empty()
        || full_name == "*"
        || cell_type.is_empty()
        || default_value.is_empty()
        || full_name.contains(')')
        || cell_type.contains(')')
    {
        return None;
    }

    let pin_name = full_name.rsplit('_').next().unwrap_or(full_name);

    Some(BoundaryCell {
        index,
        full_name: full_name.to_string(),
        cell_type: cell_type.to_string(),
        default_value: default_value.to_string(),
        pin_name: pin_name.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_boundary_length_attribute() {
        let (part, length) = parse_boundary_length(
            "attribute BOUNDARY_LENGTH of XC7A100T_CSG324 : entity is 1367;",
        )
        .unwrap();
        assert_eq!(part, "XC7A100T_CSG324");
        assert_eq!(length, 1367);

        assert!(parse_boundary_length("attribute INSTRUCTION_LENGTH of X : entity is 6;").is_none());
    }

    #[test]
    fn test_parse_cell_line() {
        let cell = parse_cell_line("    \"  12 (BC_2, U5_RESET_N, input, X),\" &").unwrap();
        assert_eq!(cell.index, 12);
        assert_eq!(cell.full_name, "U5_RESET_N");
        assert_eq!(cell.cell_type, "input");
        assert_eq!(cell.default_value, "X");
        assert_eq!(cell.pin_name, "N");
    }

    #[test]
    fn test_pin_name_is_suffix_after_last_underscore() {
        let cell = parse_cell_line("  \"3 (BC_2, IO_L1P_T0_D00_14, input, X),\" &").unwrap();
        assert_eq!(cell.pin_name, "14");

        // A name with no underscore maps to itself
        let cell = parse_cell_line("  \"4 (BC_2, DONE, input, X),\" &").unwrap();
        assert_eq!(cell.pin_name, "DONE");
    }

    #[test]
    fn test_control_cells_skipped() {
        // Control cells carry "*" instead of a port name
        assert!(parse_cell_line("  \"5 (BC_2, *, controlr, 1),\" &").is_none());
    }

    #[test]
    fn test_incomplete_cell_lines_skipped() {
        assert!(parse_cell_line("  \"6 (BC_2, IO_T14, input),\" &").is_none());
        assert!(parse_cell_line("attribute BOUNDARY_REGISTER of X : entity is").is_none());
        assert!(parse_cell_line("").is_none());
    }

    #[test]
    fn test_cell_with_trailing_fields() {
        // Output cells carry extra control/disable fields after the default
        let cell =
            parse_cell_line("  \"7 (BC_2, IO_T15, output3, X, 5, 1, PULL0),\" &").unwrap();
        assert_eq!(cell.cell_type, "output3");
        assert_eq!(cell.default_value, "X");
    }

    #[test]
    fn test_parse_file() {
        let bsdl_content = "\
entity XC7A100T_CSG324 is
attribute BOUNDARY_LENGTH of XC7A100T_CSG324 : entity is 16;
attribute BOUNDARY_REGISTER of XC7A100T_CSG324 : entity is
  \"0 (BC_2, IO_AB1, input, X),\" &
  \"1 (BC_2, *, controlr, 1),\" &
  \"2 (BC_2, IO_T14, output3, X, 1, 1, PULL0),\" &
  \"12 (BC_2, U5_RESET_N, input, X),\" &
  \"9000 (BC_2, IO_FAR, input, X);\"
";
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(bsdl_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let bsdl = parse_bsdl_file(temp_file.path()).unwrap();

        assert_eq!(bsdl.part_name.as_deref(), Some("XC7A100T_CSG324"));
        assert_eq!(bsdl.boundary_length, 16);
        // control cell and the out-of-range index are dropped
        assert_eq!(bsdl.cells.len(), 3);
        assert_eq!(bsdl.cells[0].index, 0);
        assert_eq!(bsdl.cells[1].index, 2);
        assert_eq!(bsdl.cells[2].index, 12);
        assert_eq!(bsdl.cells[2].pin_name, "N");
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = parse_bsdl_file(Path::new("/nonexistent/part.bsd"));
        assert!(matches!(result, Err(DecoderError::BsdlParseError(_))));
    }
}
