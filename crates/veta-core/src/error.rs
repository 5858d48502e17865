use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum VetaError {
    #[error("row {row} is missing required field '{field}'")]
    DataShape { field: &'static str, row: usize },

    #[error("input has no '{column}' column. Expected columns: TMH; TMS; %Cu; Au g/TM; Ag g/TM")]
    MissingColumn { column: &'static str },

    #[error("failed to parse input: {0}")]
    ParseError(String),

    #[error("failed to load scheme from {path}: {reason}")]
    SchemeLoad { path: PathBuf, reason: String },

    #[error("invalid scheme: {0}")]
    SchemeInvalid(String),

    #[error("no scheme provided for material type '{material}'")]
    SchemeMismatch { material: String },

    #[error("no datasets to analyze")]
    EmptyInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}
