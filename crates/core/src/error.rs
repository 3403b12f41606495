use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("frame width bounds must be finite (min {min}, max {max})")]
    NonFiniteBounds { min: f64, max: f64 },
    #[error("minimum frame width must be positive, got {0}")]
    NonPositiveMinWidth(f64),
    #[error("minimum frame width {min} exceeds maximum {max}")]
    InvertedBounds { min: f64, max: f64 },
    #[error("invalid config JSON: {0}")]
    Json(String),
}

/// Conditions under which no drawing is possible. Initialization aborts on
/// any of these; there is no degraded mode.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SetupError {
    #[error("no drawing surface with id '{id}'")]
    MissingSurface { id: String },
    #[error("element '{id}' is not a canvas")]
    NotACanvas { id: String },
    #[error("2D drawing context unavailable")]
    ContextUnavailable,
    #[error("host environment unavailable: {0}")]
    Host(String),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("config: {0}")]
    Config(#[from] ConfigError),
    #[error("setup: {0}")]
    Setup(#[from] SetupError),
}
