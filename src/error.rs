//! Error type shared by every plothelper operation.

use thiserror::Error;

/// Errors reported synchronously to the caller. No operation returns a partial
/// result alongside an error.
#[derive(Debug, Error)]
pub enum PlotError {
    /// The caller passed something the operation cannot work with: an empty
    /// sequence, an unknown panel tag, a non-positive size, ...
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A number fell through every branch of the scientific-notation formatter.
    #[error("Value {0} has no scientific-notation representation")]
    UnrepresentableValue(f64),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Image encoding error: {0}")]
    Image(#[from] image::ImageError),

    /// The drawing backend could not produce its output.
    #[error("Render error: {0}")]
    Render(String),
}

pub type Result<T, E = PlotError> = std::result::Result<T, E>;

impl PlotError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PlotError::InvalidInput(msg.into())
    }
}
