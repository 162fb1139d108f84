use thiserror::Error;

/// Errors raised while building or ingesting stroke data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("Invalid color value: {0:?}")]
    InvalidColor(String),

    #[error("Stroke width must be finite and non-negative, got {0}")]
    InvalidWidth(f64),

    #[error("Unparsable point: {0:?}")]
    InvalidPoint(String),
}
