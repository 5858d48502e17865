//! Integration tests for the analyze() pipeline: CSV bytes in,
//! summary rows out, plus the aggregation consistency properties.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use veta_core::error::VetaError;
use veta_core::extraction::assay_csv::parse_assay_csv;
use veta_core::model::{AssayDataset, AssayRecord, MaterialType, Tier};
use veta_core::scheme::builtin::default_schemes;
use veta_core::summary::{aggregate, combine};
use veta_core::{analyze, analyze_with_presets};

fn record(wet: Decimal, dry: Decimal, cu: Decimal, au: Decimal, ag: Decimal) -> AssayRecord {
    AssayRecord {
        wet_tonnage: wet,
        dry_tonnage: dry,
        copper_grade: cu,
        gold_grade: au,
        silver_grade: ag,
    }
}

fn assert_close(a: Decimal, b: Decimal) {
    let scale = a.abs().max(b.abs()).max(Decimal::ONE);
    assert!(
        (a - b).abs() <= scale * dec!(0.000000001),
        "{a} not within tolerance of {b}"
    );
}

// ---------------------------------------------------------------------------
// Worked example: two sulfide records, one high and one low
// ---------------------------------------------------------------------------
#[test]
fn sulfide_worked_example() {
    let dataset = AssayDataset::new(
        MaterialType::Sulfide,
        vec![
            record(dec!(10), dec!(9), dec!(1.2), dec!(2), dec!(10)),
            record(dec!(5), dec!(4.5), dec!(0.5), dec!(1), dec!(5)),
        ],
    );

    let result = analyze_with_presets(&[dataset]).unwrap();
    assert_eq!(result.datasets.len(), 1);
    let ds = &result.datasets[0];

    let high = ds.tiers.iter().find(|t| t.tier == Tier::High).unwrap();
    assert_eq!(high.record_count, 1);
    assert_eq!(high.row.total_dry_tonnage, dec!(9));
    assert_eq!(high.row.weighted_copper_grade, dec!(1.2));
    assert_eq!(high.row.weighted_gold_grade, dec!(2));
    assert_eq!(high.row.weighted_silver_grade, dec!(10));

    let low = ds.tiers.iter().find(|t| t.tier == Tier::Low).unwrap();
    assert_eq!(low.row.total_dry_tonnage, dec!(4.5));
    assert_eq!(low.row.weighted_copper_grade, dec!(0.5));

    let medium = ds.tiers.iter().find(|t| t.tier == Tier::Medium).unwrap();
    assert_eq!(medium.record_count, 0);
    assert_eq!(medium.row.total_dry_tonnage, dec!(0));

    assert_eq!(result.grand_total.total_dry_tonnage, dec!(13.5));
    assert_eq!(
        result.grand_total.weighted_copper_grade.round_dp(4),
        dec!(0.9667)
    );
}

// ---------------------------------------------------------------------------
// Property: tier dry tonnages sum to total minus below-cutoff
// ---------------------------------------------------------------------------
#[test]
fn tier_tonnage_sums_to_total_minus_unclassified() {
    let dataset = AssayDataset::new(
        MaterialType::Mixed,
        vec![
            record(dec!(2), dec!(1.8), dec!(0.05), dec!(0.1), dec!(1)), // below cutoff
            record(dec!(10), dec!(9), dec!(1.5), dec!(2), dec!(10)),
            record(dec!(6), dec!(5.4), dec!(2.5), dec!(1), dec!(4)),
            record(dec!(4), dec!(3.6), dec!(3.5), dec!(0.5), dec!(2)),
        ],
    );

    let result = analyze_with_presets(&[dataset]).unwrap();
    let ds = &result.datasets[0];

    let tier_dry: Decimal = ds.tiers.iter().map(|t| t.row.total_dry_tonnage).sum();
    assert_eq!(
        tier_dry,
        ds.total.total_dry_tonnage - ds.unclassified.total_dry_tonnage
    );
    assert_eq!(ds.unclassified_count, 1);
    assert_eq!(ds.unclassified.total_dry_tonnage, dec!(1.8));
    // Below-cutoff record still counts in the material total
    assert_eq!(ds.total.total_dry_tonnage, dec!(19.8));
}

// ---------------------------------------------------------------------------
// Property: per-tier roll-up equals direct aggregation of classified set
// ---------------------------------------------------------------------------
#[test]
fn tier_rollup_matches_direct_aggregation() {
    let records = vec![
        record(dec!(10), dec!(9), dec!(1.2), dec!(2), dec!(10)),
        record(dec!(5), dec!(4.5), dec!(0.5), dec!(1), dec!(5)),
        record(dec!(7), dec!(6.3), dec!(0.9), dec!(1.5), dec!(8)),
        record(dec!(3), dec!(2.7), dec!(0.85), dec!(0.7), dec!(3)),
    ];
    let dataset = AssayDataset::new(MaterialType::Sulfide, records.clone());

    let result = analyze_with_presets(&[dataset]).unwrap();
    let ds = &result.datasets[0];

    let tier_rows: Vec<_> = ds.tiers.iter().map(|t| t.row.clone()).collect();
    let rolled = combine("Total", &tier_rows);
    let direct = aggregate("Total", &records);

    assert_eq!(rolled.total_wet_tonnage, direct.total_wet_tonnage);
    assert_eq!(rolled.total_dry_tonnage, direct.total_dry_tonnage);
    assert_close(rolled.weighted_copper_grade, direct.weighted_copper_grade);
    assert_close(rolled.weighted_gold_grade, direct.weighted_gold_grade);
    assert_close(rolled.weighted_silver_grade, direct.weighted_silver_grade);
}

// ---------------------------------------------------------------------------
// Property: cross-material roll-up equals aggregating the union
// ---------------------------------------------------------------------------
#[test]
fn grand_total_matches_union_of_materials() {
    let sulfide = vec![
        record(dec!(10), dec!(9), dec!(1.2), dec!(2), dec!(10)),
        record(dec!(5), dec!(4.5), dec!(0.5), dec!(1), dec!(5)),
    ];
    let mixed = vec![
        record(dec!(8), dec!(7.2), dec!(2.5), dec!(0.8), dec!(6)),
        record(dec!(4), dec!(3.6), dec!(3.2), dec!(0.4), dec!(2)),
    ];

    let result = analyze_with_presets(&[
        AssayDataset::new(MaterialType::Sulfide, sulfide.clone()),
        AssayDataset::new(MaterialType::Mixed, mixed.clone()),
    ])
    .unwrap();

    let mut union = sulfide;
    union.extend(mixed);
    let direct = aggregate("Total", &union);

    assert_eq!(
        result.grand_total.total_wet_tonnage,
        direct.total_wet_tonnage
    );
    assert_eq!(
        result.grand_total.total_dry_tonnage,
        direct.total_dry_tonnage
    );
    assert_close(
        result.grand_total.weighted_copper_grade,
        direct.weighted_copper_grade,
    );
    assert_close(
        result.grand_total.weighted_gold_grade,
        direct.weighted_gold_grade,
    );
    assert_close(
        result.grand_total.weighted_silver_grade,
        direct.weighted_silver_grade,
    );
}

// ---------------------------------------------------------------------------
// Empty dataset: all-zero rows everywhere, no error
// ---------------------------------------------------------------------------
#[test]
fn empty_dataset_yields_zero_rows() {
    let result =
        analyze_with_presets(&[AssayDataset::new(MaterialType::Sulfide, vec![])]).unwrap();
    let ds = &result.datasets[0];

    for tier in &ds.tiers {
        assert_eq!(tier.row.total_dry_tonnage, dec!(0));
        assert_eq!(tier.row.weighted_copper_grade, dec!(0));
    }
    assert_eq!(ds.total.total_wet_tonnage, dec!(0));
    assert_eq!(result.grand_total.weighted_silver_grade, dec!(0));
}

// ---------------------------------------------------------------------------
// No datasets at all is an input error
// ---------------------------------------------------------------------------
#[test]
fn no_datasets_is_an_error() {
    let schemes = default_schemes().unwrap();
    assert!(matches!(analyze(&[], &schemes), Err(VetaError::EmptyInput)));
}

// ---------------------------------------------------------------------------
// A dataset whose material has no scheme is a mismatch
// ---------------------------------------------------------------------------
#[test]
fn material_without_scheme_is_a_mismatch() {
    let sulfide_only: Vec<_> = default_schemes()
        .unwrap()
        .into_iter()
        .filter(|s| s.material == MaterialType::Sulfide)
        .collect();
    let dataset = AssayDataset::new(
        MaterialType::Mixed,
        vec![record(dec!(1), dec!(1), dec!(2.5), dec!(1), dec!(1))],
    );

    let result = analyze(&[dataset], &sulfide_only);
    assert!(matches!(
        result,
        Err(VetaError::SchemeMismatch { material }) if material == "Mixed"
    ));
}

// ---------------------------------------------------------------------------
// End to end from CSV bytes, including a row that fails validation
// ---------------------------------------------------------------------------
#[test]
fn csv_to_summary_end_to_end() {
    let csv = "TMH;TMS;%Cu;Au g/TM;Ag g/TM\n10;9;1,2;2;10\n5;4,5;0,5;1;5\n";
    let parsed = parse_assay_csv(csv.as_bytes()).unwrap();
    let dataset = AssayDataset::from_rows(MaterialType::Sulfide, parsed.rows).unwrap();

    let result = analyze_with_presets(&[dataset]).unwrap();
    assert_eq!(
        result.grand_total.weighted_copper_grade.round_dp(4),
        dec!(0.9667)
    );
}

#[test]
fn csv_row_missing_grade_fails_validation() {
    let csv = "TMH;TMS;%Cu;Au g/TM;Ag g/TM\n10;9;;2;10\n";
    let parsed = parse_assay_csv(csv.as_bytes()).unwrap();
    let result = AssayDataset::from_rows(MaterialType::Sulfide, parsed.rows);
    assert!(matches!(
        result,
        Err(VetaError::DataShape { field: "%Cu", row: 2 })
    ));
}
