use csv::{ReaderBuilder, StringRecord};
use rust_decimal::Decimal;

use crate::error::VetaError;
use crate::extraction::{parse_decimal, ColumnMap, ParsedDataset, SkippedLine};
use crate::model::RawAssayRow;

/// Parse an assay CSV export into raw rows.
///
/// The source exports use ';' as the field separator with ',' as the
/// decimal mark; a comma-separated file is accepted too (chosen by
/// sniffing the header line). Blank rows are dropped silently, rows
/// with no numeric content at all are reported as skipped, and rows
/// with some fields missing surface later as `DataShape` errors when
/// the dataset is validated.
pub fn parse_assay_csv(bytes: &[u8]) -> Result<ParsedDataset, VetaError> {
    let delimiter = sniff_delimiter(bytes);
    let mut reader = ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(bytes);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_string()).collect();
    let columns = ColumnMap::from_headers(&headers)?;

    let mut rows = Vec::new();
    let mut skipped_lines = Vec::new();

    for (idx, result) in reader.records().enumerate() {
        // 1-based source line, counting the header as line 1
        let line = idx + 2;

        let record = match result {
            Ok(record) => record,
            Err(e) => {
                skipped_lines.push(SkippedLine {
                    line,
                    text: String::new(),
                    reason: format!("unreadable row: {e}"),
                });
                continue;
            }
        };

        if record.iter().all(|field| field.is_empty()) {
            continue;
        }

        let row = RawAssayRow {
            line,
            wet_tonnage: cell(&record, columns.wet),
            dry_tonnage: cell(&record, columns.dry),
            copper_grade: cell(&record, columns.copper),
            gold_grade: cell(&record, columns.gold),
            silver_grade: cell(&record, columns.silver),
        };

        if row.wet_tonnage.is_none()
            && row.dry_tonnage.is_none()
            && row.copper_grade.is_none()
            && row.gold_grade.is_none()
            && row.silver_grade.is_none()
        {
            skipped_lines.push(SkippedLine {
                line,
                text: record.iter().collect::<Vec<_>>().join(";"),
                reason: "no numeric assay values".into(),
            });
            continue;
        }

        rows.push(row);
    }

    if rows.is_empty() {
        return Err(VetaError::ParseError("no assay rows found".into()));
    }

    tracing::debug!(
        rows = rows.len(),
        skipped = skipped_lines.len(),
        "parsed assay csv"
    );

    Ok(ParsedDataset {
        rows,
        skipped_lines,
    })
}

fn cell(record: &StringRecord, idx: usize) -> Option<Decimal> {
    record.get(idx).and_then(parse_decimal)
}

/// The exports separate with ';'; fall back to ',' when the header
/// line carries no semicolons.
fn sniff_delimiter(bytes: &[u8]) -> u8 {
    let first_line_end = bytes
        .iter()
        .position(|&b| b == b'\n')
        .unwrap_or(bytes.len());
    if bytes[..first_line_end].contains(&b';') {
        b';'
    } else {
        b','
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parses_semicolon_export() {
        let csv = "TMH;TMS;%Cu;Au g/TM;Ag g/TM\n10;9;1,2;2;10\n5;4,5;0,5;1;5\n";
        let parsed = parse_assay_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.rows.len(), 2);
        assert!(parsed.skipped_lines.is_empty());
        assert_eq!(parsed.rows[0].copper_grade, Some(dec!(1.2)));
        assert_eq!(parsed.rows[1].dry_tonnage, Some(dec!(4.5)));
    }

    #[test]
    fn parses_comma_separated_fallback() {
        let csv = "TMH,TMS,%Cu,Au g/TM,Ag g/TM\n10,9,1.2,2,10\n";
        let parsed = parse_assay_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].wet_tonnage, Some(dec!(10)));
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "TMH;TMS;%Cu;Au g/TM\n10;9;1,2;2\n";
        match parse_assay_csv(csv.as_bytes()) {
            Err(VetaError::MissingColumn { column }) => assert_eq!(column, "Ag g/TM"),
            other => panic!("expected MissingColumn, got {other:?}"),
        }
    }

    #[test]
    fn blank_rows_dropped_and_text_rows_skipped_with_reason() {
        let csv = "TMH;TMS;%Cu;Au g/TM;Ag g/TM\n10;9;1,2;2;10\n;;;;\ntotals below;-;-;-;-\n";
        let parsed = parse_assay_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.skipped_lines.len(), 1);
        assert_eq!(parsed.skipped_lines[0].line, 4);
        assert!(parsed.skipped_lines[0].reason.contains("no numeric"));
    }

    #[test]
    fn partial_row_survives_for_downstream_validation() {
        let csv = "TMH;TMS;%Cu;Au g/TM;Ag g/TM\n10;9;;2;10\n";
        let parsed = parse_assay_csv(csv.as_bytes()).unwrap();
        assert_eq!(parsed.rows.len(), 1);
        assert_eq!(parsed.rows[0].copper_grade, None);
        assert_eq!(parsed.rows[0].line, 2);
    }

    #[test]
    fn header_only_file_is_an_error() {
        let csv = "TMH;TMS;%Cu;Au g/TM;Ag g/TM\n";
        assert!(matches!(
            parse_assay_csv(csv.as_bytes()),
            Err(VetaError::ParseError(_))
        ));
    }
}
