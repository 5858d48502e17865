use crate::error::VetaError;
use crate::model::MaterialType;
use crate::scheme::schema::GradeSchemeDef;

const SULFIDE_JSON: &str = include_str!("../../../../schemes/sulfide.json");
const MIXED_JSON: &str = include_str!("../../../../schemes/mixed.json");

/// Available predefined schemes.
pub const PRESETS: &[&str] = &["sulfide", "mixed"];

/// Load a predefined scheme by name.
pub fn load_preset(name: &str) -> Result<GradeSchemeDef, VetaError> {
    match name {
        "sulfide" => crate::scheme::parse_scheme_str(SULFIDE_JSON),
        "mixed" => crate::scheme::parse_scheme_str(MIXED_JSON),
        _ => Err(VetaError::SchemeInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}

/// The predefined scheme for a material type.
pub fn preset_for(material: MaterialType) -> Result<GradeSchemeDef, VetaError> {
    match material {
        MaterialType::Sulfide => load_preset("sulfide"),
        MaterialType::Mixed => load_preset("mixed"),
    }
}

/// All predefined schemes, one per material type.
pub fn default_schemes() -> Result<Vec<GradeSchemeDef>, VetaError> {
    PRESETS.iter().map(|name| load_preset(name)).collect()
}
