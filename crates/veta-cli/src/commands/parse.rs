use std::path::PathBuf;

use veta_core::error::VetaError;
use veta_core::model::MaterialType;

use crate::output;

pub fn run(
    input_file: PathBuf,
    material: &str,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), VetaError> {
    let material = MaterialType::from_str_loose(material).ok_or_else(|| {
        VetaError::ParseError(format!(
            "unknown material type '{material}' (expected 'sulfide' or 'mixed')"
        ))
    })?;

    let parsed = super::analyze::load_input(&input_file)?;

    let as_json = || {
        serde_json::to_string_pretty(&serde_json::json!({
            "material": material,
            "rows": parsed.rows,
            "skipped_lines": parsed.skipped_lines,
        }))
    };

    match output_file {
        Some(path) => {
            // Always write JSON when saving to file
            std::fs::write(&path, as_json()?)?;
            eprintln!(
                "Parsed {} row(s), written to {}",
                parsed.rows.len(),
                path.display()
            );
            if !parsed.skipped_lines.is_empty() {
                eprintln!("  {} line(s) skipped during parsing", parsed.skipped_lines.len());
            }
        }
        None => match output_format {
            "json" => println!("{}", as_json()?),
            _ => println!("{}", output::table::format_parsed(material, &parsed)),
        },
    }

    Ok(())
}
