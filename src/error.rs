// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Error types for the inference library.

use std::fmt;

/// Result type alias for inference operations.
pub type Result<T> = std::result::Result<T, InferenceError>;

/// Main error type for the inference library.
///
/// Every variant ends up as a single line on stderr and exit status 1 in the
/// CLI; the variant only changes the message prefix.
#[derive(Debug)]
pub enum InferenceError {
    /// Error loading the model artifact.
    ModelLoadError(String),
    /// Error loading the scaler artifact.
    ScalerLoadError(String),
    /// Missing, malformed, or non-numeric feature input.
    InputError(String),
    /// Feature vector arity disagrees with the fitted scaler or model.
    ShapeMismatch(String),
    /// Error during scaling or model inference.
    InferenceError(String),
    /// Invalid configuration provided.
    ConfigError(String),
    /// Wrapped `std::io::Error`
    Io(std::io::Error),
}

impl fmt::Display for InferenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ModelLoadError(msg) => write!(f, "Model load error: {msg}"),
            Self::ScalerLoadError(msg) => write!(f, "Scaler load error: {msg}"),
            Self::InputError(msg) => write!(f, "Input error: {msg}"),
            Self::ShapeMismatch(msg) => write!(f, "Shape mismatch: {msg}"),
            Self::InferenceError(msg) => write!(f, "Inference error: {msg}"),
            Self::ConfigError(msg) => write!(f, "Config error: {msg}"),
            Self::Io(err) => write!(f, "IO error: {err}"),
        }
    }
}

impl std::error::Error for InferenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for InferenceError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}
