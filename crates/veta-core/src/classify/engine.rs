use rust_decimal::Decimal;

use crate::model::{AssayRecord, Tier};
use crate::scheme::schema::GradeSchemeDef;

/// Records of one material type split by copper-grade tier.
///
/// The split is total: every input record lands in exactly one of the
/// four groups.
#[derive(Debug, Clone, Default)]
pub struct TierPartition {
    pub low: Vec<AssayRecord>,
    pub medium: Vec<AssayRecord>,
    pub high: Vec<AssayRecord>,
    /// Below the scheme cutoff. Left out of the tier tables but still
    /// part of the material totals.
    pub unclassified: Vec<AssayRecord>,
}

impl TierPartition {
    pub fn tier(&self, tier: Tier) -> &[AssayRecord] {
        match tier {
            Tier::Low => &self.low,
            Tier::Medium => &self.medium,
            Tier::High => &self.high,
        }
    }

    pub fn len(&self) -> usize {
        self.low.len() + self.medium.len() + self.high.len() + self.unclassified.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Assign a copper grade to a tier, or `None` below the scheme cutoff.
///
/// Boundary policy: medium is closed on both ends, low is
/// closed-low/open-high, high is open-low and unbounded. A grade equal
/// to `medium_min` or `medium_max` is medium, never low or high.
pub fn tier_of(scheme: &GradeSchemeDef, copper_grade: Decimal) -> Option<Tier> {
    if copper_grade < scheme.cutoff {
        None
    } else if copper_grade < scheme.medium_min {
        Some(Tier::Low)
    } else if copper_grade <= scheme.medium_max {
        Some(Tier::Medium)
    } else {
        Some(Tier::High)
    }
}

/// Partition records by grade tier under the given scheme.
pub fn partition(records: &[AssayRecord], scheme: &GradeSchemeDef) -> TierPartition {
    let mut parts = TierPartition::default();

    for record in records {
        match tier_of(scheme, record.copper_grade) {
            Some(Tier::Low) => parts.low.push(*record),
            Some(Tier::Medium) => parts.medium.push(*record),
            Some(Tier::High) => parts.high.push(*record),
            None => parts.unclassified.push(*record),
        }
    }

    tracing::debug!(
        scheme = %scheme.name,
        low = parts.low.len(),
        medium = parts.medium.len(),
        high = parts.high.len(),
        unclassified = parts.unclassified.len(),
        "partitioned {} records",
        records.len()
    );

    parts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheme::builtin::load_preset;
    use rust_decimal_macros::dec;

    fn record(cu: Decimal) -> AssayRecord {
        AssayRecord {
            wet_tonnage: dec!(1),
            dry_tonnage: dec!(1),
            copper_grade: cu,
            gold_grade: dec!(0),
            silver_grade: dec!(0),
        }
    }

    #[test]
    fn sulfide_boundaries() {
        let scheme = load_preset("sulfide").unwrap();
        assert_eq!(tier_of(&scheme, dec!(0.0999)), None);
        assert_eq!(tier_of(&scheme, dec!(0.1)), Some(Tier::Low));
        assert_eq!(tier_of(&scheme, dec!(0.7999)), Some(Tier::Low));
        // 0.8 is medium, not low
        assert_eq!(tier_of(&scheme, dec!(0.8)), Some(Tier::Medium));
        // 1.0 is medium, not high
        assert_eq!(tier_of(&scheme, dec!(1.0)), Some(Tier::Medium));
        assert_eq!(tier_of(&scheme, dec!(1.0000001)), Some(Tier::High));
    }

    #[test]
    fn mixed_boundaries() {
        let scheme = load_preset("mixed").unwrap();
        assert_eq!(tier_of(&scheme, dec!(0.05)), None);
        assert_eq!(tier_of(&scheme, dec!(1.9)), Some(Tier::Low));
        assert_eq!(tier_of(&scheme, dec!(2.0)), Some(Tier::Medium));
        assert_eq!(tier_of(&scheme, dec!(3.0)), Some(Tier::Medium));
        assert_eq!(tier_of(&scheme, dec!(3.01)), Some(Tier::High));
    }

    #[test]
    fn partition_is_exhaustive_and_disjoint() {
        let scheme = load_preset("sulfide").unwrap();
        let records: Vec<AssayRecord> = [
            dec!(0.05),
            dec!(0.1),
            dec!(0.5),
            dec!(0.8),
            dec!(0.9),
            dec!(1.0),
            dec!(1.2),
            dec!(4.0),
        ]
        .iter()
        .map(|&cu| record(cu))
        .collect();

        let parts = partition(&records, &scheme);
        assert_eq!(parts.len(), records.len());
        assert_eq!(parts.unclassified.len(), 1);
        assert_eq!(parts.low.len(), 2);
        assert_eq!(parts.medium.len(), 3);
        assert_eq!(parts.high.len(), 2);
    }

    #[test]
    fn empty_input_partitions_empty() {
        let scheme = load_preset("mixed").unwrap();
        let parts = partition(&[], &scheme);
        assert!(parts.is_empty());
    }
}
