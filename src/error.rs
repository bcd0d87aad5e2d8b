use thiserror::Error;

/// Top-level error type for the ilot layout engine.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

/// Errors related to input geometry.
///
/// The zone classifier absorbs these: the offending entity is dropped and
/// the run continues.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("polygon has {0} distinct vertices, at least 3 required")]
    TooFewVertices(usize),

    #[error("polygon has zero area")]
    ZeroArea,

    #[error("polyline is not closed")]
    NotClosed,
}

/// Errors in a settings document. Fatal for the run.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("size category {index}: min area {min} exceeds max area {max}")]
    InvalidCategory { index: usize, min: f64, max: f64 },

    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: String, value: f64 },

    #[error("min ilot size {min} must be positive and not exceed max ilot size {max}")]
    InvalidIlotSizeRange { min: f64, max: f64 },

    #[error("corridor width must be positive, got {0}")]
    NonPositiveCorridorWidth(f64),

    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Convenience type alias for results using [`LayoutError`].
pub type Result<T> = std::result::Result<T, LayoutError>;
