use rust_decimal::Decimal;
use veta_core::extraction::ParsedDataset;
use veta_core::model::MaterialType;
use veta_core::summary::outcome::{AnalysisResult, SummaryRow};

/// Print per-material tier tables and the general summary.
///
/// Numbers are shown at four decimals, matching the reporting format
/// the mine site uses. The last column is each row's share of the
/// parent's dry tonnage.
pub fn print(result: &AnalysisResult, show_unclassified: bool) {
    for ds in &result.datasets {
        println!("=== {} ({}) ===\n", ds.material, ds.scheme_name);
        print_header();

        for tier in &ds.tiers {
            print_row(&tier.row, share(&tier.row, &ds.total));
        }
        if show_unclassified && ds.unclassified_count > 0 {
            print_row(&ds.unclassified, share(&ds.unclassified, &ds.total));
        }
        print_separator();
        print_row(&ds.total, None);

        if !show_unclassified && ds.unclassified_count > 0 {
            println!(
                "\n  ({} record(s) below cutoff: in totals, not in tiers)",
                ds.unclassified_count
            );
        }
        println!();
    }

    println!("=== General summary ===\n");
    print_header();
    for ds in &result.datasets {
        print_row(&ds.total, share(&ds.total, &result.grand_total));
    }
    print_separator();
    print_row(&result.grand_total, None);
}

/// Text listing of parsed rows, for `veta parse`.
pub fn format_parsed(material: MaterialType, parsed: &ParsedDataset) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} rows ({} material)\n\n",
        parsed.rows.len(),
        material
    ));
    out.push_str(&format!(
        "  {:>5}  {:>10}  {:>10}  {:>8}  {:>8}  {:>8}\n",
        "line", "TMH", "TMS", "%Cu", "Au g/TM", "Ag g/TM"
    ));

    for row in &parsed.rows {
        out.push_str(&format!(
            "  {:>5}  {:>10}  {:>10}  {:>8}  {:>8}  {:>8}\n",
            row.line,
            opt(row.wet_tonnage),
            opt(row.dry_tonnage),
            opt(row.copper_grade),
            opt(row.gold_grade),
            opt(row.silver_grade),
        ));
    }

    if !parsed.skipped_lines.is_empty() {
        out.push('\n');
        for skipped in &parsed.skipped_lines {
            out.push_str(&format!(
                "  line {} skipped: {}\n",
                skipped.line, skipped.reason
            ));
        }
    }

    out
}

fn print_header() {
    println!(
        "  {:<14} {:>12} {:>12} {:>10} {:>10} {:>10} {:>8}",
        "", "TMH", "TMS", "%Cu", "Au g/TM", "Ag g/TM", "% TMS"
    );
}

fn print_separator() {
    println!("  {}", "-".repeat(82));
}

fn print_row(row: &SummaryRow, share: Option<Decimal>) {
    let share_text = match share {
        Some(pct) => format!("{pct}%"),
        None => String::new(),
    };
    println!(
        "  {:<14} {:>12} {:>12} {:>10} {:>10} {:>10} {:>8}",
        row.label,
        fmt4(row.total_wet_tonnage),
        fmt4(row.total_dry_tonnage),
        fmt4(row.weighted_copper_grade),
        fmt4(row.weighted_gold_grade),
        fmt4(row.weighted_silver_grade),
        share_text
    );
}

fn fmt4(value: Decimal) -> String {
    value.round_dp(4).to_string()
}

fn share(row: &SummaryRow, parent: &SummaryRow) -> Option<Decimal> {
    if parent.total_dry_tonnage > Decimal::ZERO {
        Some(
            (row.total_dry_tonnage / parent.total_dry_tonnage * Decimal::ONE_HUNDRED).round_dp(1),
        )
    } else {
        None
    }
}

fn opt(value: Option<Decimal>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "-".into(),
    }
}
