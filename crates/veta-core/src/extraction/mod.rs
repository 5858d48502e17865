pub mod assay_csv;
pub mod assay_xlsx;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::VetaError;
use crate::model::RawAssayRow;

/// Required assay columns, in their canonical export spelling.
pub const REQUIRED_COLUMNS: [&str; 5] = ["TMH", "TMS", "%Cu", "Au g/TM", "Ag g/TM"];

/// A source line that could not be used, with the reason it was dropped.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkippedLine {
    pub line: usize,
    pub text: String,
    pub reason: String,
}

/// Rows loaded from one assay file, before field validation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParsedDataset {
    pub rows: Vec<RawAssayRow>,
    pub skipped_lines: Vec<SkippedLine>,
}

/// Indices of the five required assay columns within a header row.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnMap {
    pub wet: usize,
    pub dry: usize,
    pub copper: usize,
    pub gold: usize,
    pub silver: usize,
}

impl ColumnMap {
    pub(crate) fn from_headers(headers: &[String]) -> Result<ColumnMap, VetaError> {
        Ok(ColumnMap {
            wet: find_column(headers, "TMH")?,
            dry: find_column(headers, "TMS")?,
            copper: find_column(headers, "%Cu")?,
            gold: find_column(headers, "Au g/TM")?,
            silver: find_column(headers, "Ag g/TM")?,
        })
    }
}

fn find_column(headers: &[String], wanted: &'static str) -> Result<usize, VetaError> {
    headers
        .iter()
        .position(|h| header_matches(h, wanted))
        .ok_or(VetaError::MissingColumn { column: wanted })
}

/// Case- and spacing-tolerant header comparison, so "  %cu " and
/// "AU G/TM" match the canonical names.
fn header_matches(header: &str, wanted: &str) -> bool {
    normalize_header(header) == normalize_header(wanted)
}

fn normalize_header(s: &str) -> String {
    s.to_lowercase().replace(char::is_whitespace, "")
}

/// Parse one numeric cell. Accepts ',' as the decimal mark (the source
/// exports are Spanish-locale, which is also why they separate columns
/// with ';'). Empty or non-numeric text yields `None`.
pub(crate) fn parse_decimal(s: &str) -> Option<Decimal> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let candidate = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };
    candidate.parse::<Decimal>().ok()
}
