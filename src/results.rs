// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Prediction results.

use std::fmt;

/// Speed metrics for one prediction, in milliseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Speed {
    /// Time spent loading artifacts, `None` when not measured.
    pub load: Option<f64>,
    /// Time spent scaling the feature vector.
    pub preprocess: Option<f64>,
    /// Time spent evaluating the trees and choosing a label.
    pub inference: Option<f64>,
}

impl Speed {
    /// Create a new Speed instance with all timings.
    ///
    /// # Arguments
    ///
    /// * `load` - Time in milliseconds.
    /// * `preprocess` - Time in milliseconds.
    /// * `inference` - Time in milliseconds.
    #[must_use]
    pub const fn new(load: f64, preprocess: f64, inference: f64) -> Self {
        Self {
            load: Some(load),
            preprocess: Some(preprocess),
            inference: Some(inference),
        }
    }

    /// Get total time.
    ///
    /// # Returns
    ///
    /// * Sum of load, preprocess, and inference times in milliseconds.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.load.unwrap_or(0.0) + self.preprocess.unwrap_or(0.0) + self.inference.unwrap_or(0.0)
    }
}

/// The outcome of classifying one feature vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    /// Predicted class label.
    pub label: i64,
    /// Class probabilities, one per class. Empty for objectives that only
    /// produce a margin (`binary:logitraw`, `binary:hinge`).
    pub probabilities: Vec<f64>,
    /// Raw margin per output group.
    pub margin: Vec<f64>,
    /// Timing information.
    pub speed: Speed,
}

impl Prediction {
    /// Probability of the predicted label, if the objective yields one.
    #[must_use]
    pub fn confidence(&self) -> Option<f64> {
        usize::try_from(self.label)
            .ok()
            .and_then(|i| self.probabilities.get(i).copied())
    }

    /// Human-readable name of a binary potability label.
    #[must_use]
    pub const fn label_name(&self) -> &'static str {
        match self.label {
            1 => "POTABLE",
            0 => "NON-POTABLE",
            _ => "UNKNOWN",
        }
    }
}

impl fmt::Display for Prediction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label)
    }
}
