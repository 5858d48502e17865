use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use rust_decimal::Decimal;

use crate::error::VetaError;
use crate::extraction::{parse_decimal, ColumnMap, ParsedDataset, SkippedLine};
use crate::model::RawAssayRow;

/// How many leading rows to scan for the header (assay workbooks often
/// carry a title block above the table).
const HEADER_SCAN_ROWS: usize = 10;

/// Parse an assay workbook (first sheet) into raw rows.
///
/// Returns the same `ParsedDataset` that `parse_assay_csv()` produces,
/// so the result slots directly into `AssayDataset::from_rows()`.
pub fn parse_assay_xlsx(bytes: &[u8]) -> Result<ParsedDataset, VetaError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| VetaError::ParseError(format!("failed to open xlsx: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| VetaError::ParseError("workbook has no sheets".into()))?;
    let sheet = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| VetaError::ParseError(format!("sheet '{sheet_name}' unreadable: {e}")))?;

    let grid: Vec<&[Data]> = sheet.rows().collect();

    // Locate the header row within the leading rows
    let mut header: Option<(usize, ColumnMap)> = None;
    let mut first_err: Option<VetaError> = None;
    for (idx, row) in grid.iter().take(HEADER_SCAN_ROWS).enumerate() {
        let headers: Vec<String> = row.iter().map(cell_text).collect();
        match ColumnMap::from_headers(&headers) {
            Ok(columns) => {
                header = Some((idx, columns));
                break;
            }
            Err(e) => {
                if first_err.is_none() {
                    first_err = Some(e);
                }
            }
        }
    }

    let (header_idx, columns) = match header {
        Some(found) => found,
        None => {
            return Err(
                first_err.unwrap_or_else(|| VetaError::ParseError("empty workbook".into()))
            )
        }
    };

    let mut rows = Vec::new();
    let mut skipped_lines = Vec::new();

    for (offset, row) in grid[header_idx + 1..].iter().enumerate() {
        let line = header_idx + offset + 2;

        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let raw = RawAssayRow {
            line,
            wet_tonnage: cell_as_decimal(row, columns.wet),
            dry_tonnage: cell_as_decimal(row, columns.dry),
            copper_grade: cell_as_decimal(row, columns.copper),
            gold_grade: cell_as_decimal(row, columns.gold),
            silver_grade: cell_as_decimal(row, columns.silver),
        };

        if raw.wet_tonnage.is_none()
            && raw.dry_tonnage.is_none()
            && raw.copper_grade.is_none()
            && raw.gold_grade.is_none()
            && raw.silver_grade.is_none()
        {
            skipped_lines.push(SkippedLine {
                line,
                text: row.iter().map(cell_text).collect::<Vec<_>>().join(";"),
                reason: "no numeric assay values".into(),
            });
            continue;
        }

        rows.push(raw);
    }

    if rows.is_empty() {
        return Err(VetaError::ParseError(
            "no assay rows found in workbook".into(),
        ));
    }

    Ok(ParsedDataset {
        rows,
        skipped_lines,
    })
}

fn cell_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Empty => String::new(),
        _ => format!("{cell}"),
    }
}

fn cell_as_decimal(row: &[Data], idx: usize) -> Option<Decimal> {
    match row.get(idx)? {
        Data::Float(f) => Some(f64_to_decimal(*f)),
        Data::Int(i) => Some(Decimal::from(*i)),
        Data::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Convert f64 to Decimal via string round-trip, avoiding
/// floating-point artifacts (e.g., 0.0035_f64 becoming 0.00349999...).
fn f64_to_decimal(f: f64) -> Decimal {
    let s = format!("{f}");
    s.parse::<Decimal>()
        .unwrap_or_else(|_| Decimal::try_from(f).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn f64_to_decimal_preserves_precision() {
        assert_eq!(f64_to_decimal(0.0035), dec!(0.0035));
        assert_eq!(f64_to_decimal(68.0), dec!(68));
        assert_eq!(f64_to_decimal(1.23), dec!(1.23));
    }

    #[test]
    fn string_cells_parse_with_comma_mark() {
        let row = vec![Data::String("1,25".into()), Data::Float(4.5)];
        assert_eq!(cell_as_decimal(&row, 0), Some(dec!(1.25)));
        assert_eq!(cell_as_decimal(&row, 1), Some(dec!(4.5)));
        assert_eq!(cell_as_decimal(&row, 2), None);
    }
}
