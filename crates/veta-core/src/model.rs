use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::VetaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialType {
    Sulfide,
    Mixed,
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MaterialType::Sulfide => write!(f, "Sulfide"),
            MaterialType::Mixed => write!(f, "Mixed"),
        }
    }
}

impl MaterialType {
    /// Accepts English and the Spanish names used in the source exports
    /// ("sulfuros.csv" / "mixto.csv").
    pub fn from_str_loose(s: &str) -> Option<MaterialType> {
        let lower = s.trim().to_lowercase();
        if lower.contains("sulf") {
            Some(MaterialType::Sulfide)
        } else if lower.contains("mix") {
            Some(MaterialType::Mixed)
        } else {
            None
        }
    }
}

/// Copper-grade tier, ordered from lowest to highest grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Low,
    Medium,
    High,
}

impl Tier {
    pub const ALL: [Tier; 3] = [Tier::Low, Tier::Medium, Tier::High];

    /// Lowercase key used in scheme files.
    pub fn key(&self) -> &'static str {
        match self {
            Tier::Low => "low",
            Tier::Medium => "medium",
            Tier::High => "high",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Tier::Low => write!(f, "Low grade"),
            Tier::Medium => write!(f, "Medium grade"),
            Tier::High => write!(f, "High grade"),
        }
    }
}

/// One sampled ore lot with its tonnages and assayed grades.
///
/// Tonnages are metric tonnes (TMH wet, TMS dry); copper is percent,
/// gold and silver are grams per dry tonne.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AssayRecord {
    pub wet_tonnage: Decimal,
    pub dry_tonnage: Decimal,
    pub copper_grade: Decimal,
    pub gold_grade: Decimal,
    pub silver_grade: Decimal,
}

/// One data row as the loader produced it, before field presence has
/// been checked. `line` is the 1-based source row for error messages.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawAssayRow {
    pub line: usize,
    pub wet_tonnage: Option<Decimal>,
    pub dry_tonnage: Option<Decimal>,
    pub copper_grade: Option<Decimal>,
    pub gold_grade: Option<Decimal>,
    pub silver_grade: Option<Decimal>,
}

impl RawAssayRow {
    pub fn into_record(self) -> Result<AssayRecord, VetaError> {
        Ok(AssayRecord {
            wet_tonnage: require(self.wet_tonnage, "TMH", self.line)?,
            dry_tonnage: require(self.dry_tonnage, "TMS", self.line)?,
            copper_grade: require(self.copper_grade, "%Cu", self.line)?,
            gold_grade: require(self.gold_grade, "Au g/TM", self.line)?,
            silver_grade: require(self.silver_grade, "Ag g/TM", self.line)?,
        })
    }
}

fn require(value: Option<Decimal>, field: &'static str, row: usize) -> Result<Decimal, VetaError> {
    value.ok_or(VetaError::DataShape { field, row })
}

/// All records of one material type, ready for classification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssayDataset {
    pub material: MaterialType,
    pub records: Vec<AssayRecord>,
}

impl AssayDataset {
    pub fn new(material: MaterialType, records: Vec<AssayRecord>) -> Self {
        Self { material, records }
    }

    /// Validate loader rows into typed records. A row with any required
    /// field absent fails the whole dataset with the field name.
    pub fn from_rows(material: MaterialType, rows: Vec<RawAssayRow>) -> Result<Self, VetaError> {
        let records = rows
            .into_iter()
            .map(RawAssayRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { material, records })
    }
}
