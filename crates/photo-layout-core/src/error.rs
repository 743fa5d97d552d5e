use thiserror::Error;

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Unknown layout strategy: {0}")]
    UnknownStrategy(String),
    #[error("Invalid resolution: {0} px/mm (must be finite and > 0)")]
    InvalidResolution(f64),
    #[error("Invalid page size: {width_mm}x{height_mm} mm")]
    InvalidPageSize { width_mm: f64, height_mm: f64 },
    #[error("Invalid photo '{id}': {reason}")]
    InvalidPhoto { id: String, reason: String },
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

pub type Result<T> = std::result::Result<T, LayoutError>;
