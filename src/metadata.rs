// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Model metadata read from XGBoost JSON artifacts.
//!
//! XGBoost keeps the learner parameters (`base_score`, `num_class`,
//! `num_feature`) as strings inside `learner.learner_model_param`, and the
//! producing library version as a top-level `[major, minor, patch]` array.

use crate::error::{InferenceError, Result};
use crate::objective::Objective;
use crate::utils::{parse_number_list, pluralize};

/// Metadata extracted from an XGBoost model artifact.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelMetadata {
    /// The objective the model was trained with.
    pub objective: Objective,
    /// Booster kind (`gbtree` or `dart`).
    pub booster: String,
    /// Number of input features the model expects.
    pub num_feature: usize,
    /// Number of classes (2 for binary objectives).
    pub num_class: usize,
    /// Base score per output group, as stored in the artifact.
    pub base_score: Vec<f64>,
    /// Feature names, if the model was trained on a named frame.
    pub feature_names: Vec<String>,
    /// XGBoost version that wrote the artifact, e.g. `2.0.3`.
    pub version: Option<String>,
    /// Number of trees in the ensemble.
    pub num_trees: usize,
}

impl Default for ModelMetadata {
    fn default() -> Self {
        Self {
            objective: Objective::default(),
            booster: "gbtree".to_string(),
            num_feature: 0,
            num_class: 2,
            base_score: vec![0.5],
            feature_names: Vec::new(),
            version: None,
            num_trees: 0,
        }
    }
}

impl ModelMetadata {
    /// Build metadata from the raw learner parameters of a JSON model.
    ///
    /// # Arguments
    ///
    /// * `objective` - Objective name, e.g. `binary:logistic`.
    /// * `base_score` - Raw `base_score` string (`"5E-1"` or `"[5E-1]"`).
    /// * `num_class` - Raw `num_class` string; `"0"` for binary models.
    /// * `num_feature` - Raw `num_feature` string.
    ///
    /// # Errors
    ///
    /// Returns an error if a parameter is malformed, the objective is not a
    /// classification objective, or the class count contradicts it.
    pub fn from_learner_params(
        objective: &str,
        base_score: &str,
        num_class: &str,
        num_feature: &str,
    ) -> Result<Self> {
        let objective: Objective = objective
            .parse()
            .map_err(|e| InferenceError::ModelLoadError(format!("{e}")))?;

        let base_score = parse_number_list(base_score).ok_or_else(|| {
            InferenceError::ModelLoadError(format!("Invalid base_score value: {base_score}"))
        })?;

        let num_class: usize = if num_class.trim().is_empty() {
            0
        } else {
            parse_count(num_class, "num_class")?
        };
        let num_feature = parse_count(num_feature, "num_feature")?;

        let num_class = if objective.is_multiclass() {
            if num_class < 2 {
                return Err(InferenceError::ModelLoadError(format!(
                    "Objective {objective} requires num_class >= 2, got {num_class}"
                )));
            }
            num_class
        } else {
            if num_class > 2 {
                return Err(InferenceError::ModelLoadError(format!(
                    "Objective {objective} is binary but num_class is {num_class}"
                )));
            }
            2
        };

        Ok(Self {
            objective,
            num_feature,
            num_class,
            base_score,
            ..Self::default()
        })
    }

    /// Number of margins produced per row (1 for binary, `num_class` otherwise).
    #[must_use]
    pub const fn num_groups(&self) -> usize {
        if self.objective.is_multiclass() {
            self.num_class
        } else {
            1
        }
    }

    /// Position of a named feature in the input vector.
    #[must_use]
    pub fn feature_index(&self, name: &str) -> Option<usize> {
        self.feature_names.iter().position(|n| n == name)
    }

    /// Short human-readable description for diagnostics.
    #[must_use]
    pub fn model_name(&self) -> String {
        let version = self
            .version
            .as_ref()
            .map_or_else(String::new, |v| format!(" {v}"));
        format!(
            "XGBoost{version} {} ({}, {})",
            self.booster,
            self.objective,
            pluralize(self.num_trees, "tree", "trees")
        )
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn parse_count(raw: &str, key: &str) -> Result<usize> {
    // Counts are written as "9" but older exports sometimes use "9E0".
    let trimmed = raw.trim();
    trimmed
        .parse::<usize>()
        .ok()
        .or_else(|| {
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.fract() == 0.0 && *v >= 0.0)
                .map(|v| v as usize)
        })
        .ok_or_else(|| InferenceError::ModelLoadError(format!("Invalid {key} value: {raw}")))
}
