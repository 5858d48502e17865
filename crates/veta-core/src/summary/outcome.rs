use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::model::{MaterialType, Tier};

/// Tonnage totals and tonnage-weighted grades for one group of records.
///
/// Immutable once computed. The weighted grades are averages over the
/// group weighted by each record's dry tonnage; a group with zero dry
/// tonnage reports 0 for every weighted grade.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// Tier name, material-type name, or "Total".
    pub label: String,
    pub total_wet_tonnage: Decimal,
    pub total_dry_tonnage: Decimal,
    pub weighted_copper_grade: Decimal,
    pub weighted_gold_grade: Decimal,
    pub weighted_silver_grade: Decimal,
}

impl SummaryRow {
    pub fn zero(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            total_wet_tonnage: Decimal::ZERO,
            total_dry_tonnage: Decimal::ZERO,
            weighted_copper_grade: Decimal::ZERO,
            weighted_gold_grade: Decimal::ZERO,
            weighted_silver_grade: Decimal::ZERO,
        }
    }
}

/// Summary for one grade tier within a material.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierSummary {
    pub tier: Tier,
    pub record_count: usize,
    pub row: SummaryRow,
}

/// Per-material outcome: one row per tier, the below-cutoff remainder,
/// and the material total over the unfiltered record set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub material: MaterialType,
    pub scheme_name: String,
    pub tiers: Vec<TierSummary>,
    pub unclassified_count: usize,
    pub unclassified: SummaryRow,
    pub total: SummaryRow,
}

/// Full analysis outcome across all supplied datasets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub datasets: Vec<DatasetSummary>,
    pub grand_total: SummaryRow,
}
