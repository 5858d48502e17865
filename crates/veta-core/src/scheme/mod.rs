pub mod builtin;
pub mod schema;

use crate::error::VetaError;
use rust_decimal::Decimal;
use schema::GradeSchemeDef;
use std::path::Path;

/// Load a grade scheme from a JSON file.
pub fn load_scheme(path: &Path) -> Result<GradeSchemeDef, VetaError> {
    let content = std::fs::read_to_string(path).map_err(|e| VetaError::SchemeLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let scheme: GradeSchemeDef =
        serde_json::from_str(&content).map_err(|e| VetaError::SchemeLoad {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
    validate_scheme(&scheme)?;
    Ok(scheme)
}

/// Parse a grade scheme from a JSON string (no file path context).
pub fn parse_scheme_str(json: &str) -> Result<GradeSchemeDef, VetaError> {
    let scheme: GradeSchemeDef = serde_json::from_str(json).map_err(VetaError::Json)?;
    validate_scheme(&scheme)?;
    Ok(scheme)
}

/// Validate that a scheme's boundaries are well-formed.
pub fn validate_scheme(scheme: &GradeSchemeDef) -> Result<(), VetaError> {
    if scheme.name.is_empty() {
        return Err(VetaError::SchemeInvalid("name must not be empty".into()));
    }

    if scheme.cutoff < Decimal::ZERO {
        return Err(VetaError::SchemeInvalid(format!(
            "cutoff {} must not be negative",
            scheme.cutoff
        )));
    }

    if scheme.cutoff >= scheme.medium_min {
        return Err(VetaError::SchemeInvalid(format!(
            "cutoff {} must be below medium_min {} (the low tier would be empty)",
            scheme.cutoff, scheme.medium_min
        )));
    }

    if scheme.medium_min > scheme.medium_max {
        return Err(VetaError::SchemeInvalid(format!(
            "medium_min {} must not exceed medium_max {}",
            scheme.medium_min, scheme.medium_max
        )));
    }

    Ok(())
}
