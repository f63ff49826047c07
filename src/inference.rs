// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Inference configuration.
//!
//! This module defines the [`InferenceConfig`] struct, which names the two
//! artifacts to load and controls how binary margins become labels.

use std::path::PathBuf;

use crate::error::{InferenceError, Result};

/// Default model artifact file name, looked up in the working directory.
pub const DEFAULT_MODEL: &str = "water_model.json";

/// Default scaler artifact file name, looked up in the working directory.
pub const DEFAULT_SCALER: &str = "scaler.json";

/// Default decision threshold for binary probabilities.
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// Configuration for potability inference.
///
/// # Example
///
/// ```rust
/// use potability_inference::InferenceConfig;
///
/// let config = InferenceConfig::new()
///     .with_model("artifacts/water_model.json")
///     .with_scaler("artifacts/scaler.json")
///     .with_threshold(0.5);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    /// Path to the XGBoost JSON model.
    pub model_path: PathBuf,
    /// Path to the scaler JSON.
    pub scaler_path: PathBuf,
    /// A binary sample is labelled 1 when its probability is strictly above
    /// this value.
    pub threshold: f64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL),
            scaler_path: PathBuf::from(DEFAULT_SCALER),
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl InferenceConfig {
    /// Create a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the model artifact path.
    #[must_use]
    pub fn with_model(mut self, path: impl Into<PathBuf>) -> Self {
        self.model_path = path.into();
        self
    }

    /// Set the scaler artifact path.
    #[must_use]
    pub fn with_scaler(mut self, path: impl Into<PathBuf>) -> Self {
        self.scaler_path = path.into();
        self
    }

    /// Set the binary decision threshold.
    ///
    /// # Arguments
    ///
    /// * `threshold` - Probability cut-off, strictly between 0 and 1.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    /// Check that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ConfigError`] if the threshold is outside `(0, 1)`.
    pub fn validate(&self) -> Result<()> {
        if self.threshold > 0.0 && self.threshold < 1.0 {
            Ok(())
        } else {
            Err(InferenceError::ConfigError(format!(
                "threshold must be between 0 and 1, got {}",
                self.threshold
            )))
        }
    }
}
