use veta_core::error::VetaError;
use veta_core::summary::outcome::AnalysisResult;

pub fn print(result: &AnalysisResult) -> Result<(), VetaError> {
    let json = serde_json::to_string_pretty(result)?;
    println!("{json}");
    Ok(())
}
