pub mod classify;
pub mod error;
pub mod extraction;
pub mod model;
pub mod scheme;
pub mod summary;

use error::VetaError;
use model::{AssayDataset, MaterialType, Tier};
use scheme::schema::GradeSchemeDef;
use summary::outcome::{AnalysisResult, DatasetSummary, SummaryRow, TierSummary};
use summary::{aggregate, combine};

/// Label of the below-cutoff remainder row.
pub const UNCLASSIFIED_LABEL: &str = "Below cutoff";
/// Label of the grand-total row.
pub const GRAND_TOTAL_LABEL: &str = "Total";

/// Main API entry point: classify each dataset's records into grade
/// tiers and produce weighted summary rows per tier, per material and
/// overall.
///
/// Each dataset is matched to the scheme for its material type. Per
/// material, the tier rows cover only classified records while the
/// material total is aggregated over the full unfiltered set, so
/// below-cutoff records count toward totals without appearing in any
/// tier. The grand total is rolled up from the material totals.
pub fn analyze(
    datasets: &[AssayDataset],
    schemes: &[GradeSchemeDef],
) -> Result<AnalysisResult, VetaError> {
    if datasets.is_empty() {
        return Err(VetaError::EmptyInput);
    }

    let mut summaries = Vec::new();
    for dataset in datasets {
        let scheme = scheme_for(dataset.material, schemes)?;
        summaries.push(summarize_dataset(dataset, scheme));
    }

    let material_totals: Vec<SummaryRow> = summaries.iter().map(|s| s.total.clone()).collect();
    let grand_total = combine(GRAND_TOTAL_LABEL, &material_totals);

    Ok(AnalysisResult {
        datasets: summaries,
        grand_total,
    })
}

/// Convenience wrapper using the builtin schemes for both materials.
pub fn analyze_with_presets(datasets: &[AssayDataset]) -> Result<AnalysisResult, VetaError> {
    let schemes = scheme::builtin::default_schemes()?;
    analyze(datasets, &schemes)
}

fn scheme_for(
    material: MaterialType,
    schemes: &[GradeSchemeDef],
) -> Result<&GradeSchemeDef, VetaError> {
    schemes
        .iter()
        .find(|s| s.material == material)
        .ok_or_else(|| VetaError::SchemeMismatch {
            material: material.to_string(),
        })
}

/// Summarize one material's records: per-tier rows, the below-cutoff
/// remainder, and the material total.
fn summarize_dataset(dataset: &AssayDataset, scheme: &GradeSchemeDef) -> DatasetSummary {
    let parts = classify::partition(&dataset.records, scheme);

    let tiers = Tier::ALL
        .iter()
        .map(|&tier| {
            let records = parts.tier(tier);
            TierSummary {
                tier,
                record_count: records.len(),
                row: aggregate(tier.to_string(), records),
            }
        })
        .collect();

    DatasetSummary {
        material: dataset.material,
        scheme_name: scheme.name.clone(),
        tiers,
        unclassified_count: parts.unclassified.len(),
        unclassified: aggregate(UNCLASSIFIED_LABEL, &parts.unclassified),
        total: aggregate(dataset.material.to_string(), &dataset.records),
    }
}
