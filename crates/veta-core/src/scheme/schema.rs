use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::model::{MaterialType, Tier};

/// Copper-grade tier boundaries for one material type.
///
/// Three boundary values define the four possible outcomes:
///
/// ```text
///            cutoff        medium_min       medium_max
///   below ----|---- Low ----|---- Medium ----|---- High
/// ```
///
/// Low is closed-low/open-high, Medium is closed on both ends, High is
/// open-low and unbounded. Records below `cutoff` belong to no tier but
/// still count toward material totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradeSchemeDef {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub version: String,
    pub material: MaterialType,
    /// Copper grade below which a record is left out of the tier tables.
    pub cutoff: Decimal,
    /// Lower bound of the medium tier (inclusive).
    pub medium_min: Decimal,
    /// Upper bound of the medium tier (inclusive).
    pub medium_max: Decimal,
    #[serde(default)]
    pub tier_descriptions: BTreeMap<String, String>,
}

impl GradeSchemeDef {
    /// Human-readable copper-grade interval for a tier.
    pub fn interval(&self, tier: Tier) -> String {
        match tier {
            Tier::Low => format!("{} <= %Cu < {}", self.cutoff, self.medium_min),
            Tier::Medium => format!("{} <= %Cu <= {}", self.medium_min, self.medium_max),
            Tier::High => format!("%Cu > {}", self.medium_max),
        }
    }
}
