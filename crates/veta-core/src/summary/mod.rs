pub mod outcome;

use rust_decimal::Decimal;

use crate::model::AssayRecord;
use outcome::SummaryRow;

/// Tonnage-weighted aggregation over one group of records.
///
/// Tonnages are summed; each grade is averaged over the group weighted
/// by dry tonnage. An empty group, or one whose dry tonnage sums to
/// zero, yields an all-zero row. The zero-denominator case is a normal
/// condition, not an error: a tier with no samples this period simply
/// reports zeros.
pub fn aggregate(label: impl Into<String>, records: &[AssayRecord]) -> SummaryRow {
    let mut total_wet = Decimal::ZERO;
    let mut total_dry = Decimal::ZERO;
    let mut copper_sum = Decimal::ZERO;
    let mut gold_sum = Decimal::ZERO;
    let mut silver_sum = Decimal::ZERO;

    for record in records {
        total_wet += record.wet_tonnage;
        total_dry += record.dry_tonnage;
        copper_sum += record.copper_grade * record.dry_tonnage;
        gold_sum += record.gold_grade * record.dry_tonnage;
        silver_sum += record.silver_grade * record.dry_tonnage;
    }

    SummaryRow {
        label: label.into(),
        total_wet_tonnage: total_wet,
        total_dry_tonnage: total_dry,
        weighted_copper_grade: weighted(copper_sum, total_dry),
        weighted_gold_grade: weighted(gold_sum, total_dry),
        weighted_silver_grade: weighted(silver_sum, total_dry),
    }
}

/// Roll disjoint summary rows up into one parent row.
///
/// Tonnages are summed directly; each weighted grade is recomputed
/// using the children's dry tonnages as weights, which equals
/// re-aggregating the union of the raw records (weighted means compose
/// over a partition). Children with zero dry tonnage contribute
/// nothing, so all-zero rows from empty groups are safe to include.
pub fn combine(label: impl Into<String>, rows: &[SummaryRow]) -> SummaryRow {
    let mut total_wet = Decimal::ZERO;
    let mut total_dry = Decimal::ZERO;
    let mut copper_sum = Decimal::ZERO;
    let mut gold_sum = Decimal::ZERO;
    let mut silver_sum = Decimal::ZERO;

    for row in rows {
        total_wet += row.total_wet_tonnage;
        total_dry += row.total_dry_tonnage;
        copper_sum += row.weighted_copper_grade * row.total_dry_tonnage;
        gold_sum += row.weighted_gold_grade * row.total_dry_tonnage;
        silver_sum += row.weighted_silver_grade * row.total_dry_tonnage;
    }

    SummaryRow {
        label: label.into(),
        total_wet_tonnage: total_wet,
        total_dry_tonnage: total_dry,
        weighted_copper_grade: weighted(copper_sum, total_dry),
        weighted_gold_grade: weighted(gold_sum, total_dry),
        weighted_silver_grade: weighted(silver_sum, total_dry),
    }
}

fn weighted(grade_tonnage_sum: Decimal, total_dry: Decimal) -> Decimal {
    if total_dry > Decimal::ZERO {
        grade_tonnage_sum / total_dry
    } else {
        Decimal::ZERO
    }
}
