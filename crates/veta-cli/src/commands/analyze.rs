use std::path::{Path, PathBuf};

use veta_core::error::VetaError;
use veta_core::extraction::{assay_csv, assay_xlsx, ParsedDataset};
use veta_core::model::{AssayDataset, MaterialType};
use veta_core::scheme::schema::GradeSchemeDef;
use veta_core::scheme::{builtin, load_scheme};

use crate::output;

pub fn run(
    sulfide: Option<PathBuf>,
    mixed: Option<PathBuf>,
    scheme_files: Vec<PathBuf>,
    output_format: &str,
    show_unclassified: bool,
) -> Result<(), VetaError> {
    let mut inputs: Vec<(MaterialType, PathBuf)> = Vec::new();
    if let Some(path) = sulfide {
        inputs.push((MaterialType::Sulfide, path));
    }
    if let Some(path) = mixed {
        inputs.push((MaterialType::Mixed, path));
    }
    if inputs.is_empty() {
        return Err(VetaError::EmptyInput);
    }

    // Custom scheme files first, then builtin presets for any material
    // not covered by a custom file
    let mut schemes: Vec<GradeSchemeDef> = Vec::new();
    for path in &scheme_files {
        schemes.push(load_scheme(path)?);
    }
    for preset in builtin::PRESETS {
        let def = builtin::load_preset(preset)?;
        if !schemes.iter().any(|s| s.material == def.material) {
            schemes.push(def);
        }
    }

    let mut datasets = Vec::new();
    for (material, path) in &inputs {
        let parsed = load_input(path)?;
        report_skipped(path, &parsed);
        datasets.push(AssayDataset::from_rows(*material, parsed.rows)?);
    }

    let result = veta_core::analyze(&datasets, &schemes)?;

    match output_format {
        "json" => output::json::print(&result)?,
        _ => output::table::print(&result, show_unclassified),
    }

    Ok(())
}

/// Read an assay file, dispatching on extension (.xlsx or CSV).
pub(crate) fn load_input(path: &Path) -> Result<ParsedDataset, VetaError> {
    let bytes = std::fs::read(path)?;
    let is_xlsx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);
    if is_xlsx {
        assay_xlsx::parse_assay_xlsx(&bytes)
    } else {
        assay_csv::parse_assay_csv(&bytes)
    }
}

fn report_skipped(path: &Path, parsed: &ParsedDataset) {
    for skipped in &parsed.skipped_lines {
        eprintln!(
            "{}: line {} skipped: {}",
            path.display(),
            skipped.line,
            skipped.reason
        );
    }
}
