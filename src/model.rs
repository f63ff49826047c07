// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Potability model loading and inference.
//!
//! This module provides [`PotabilityModel`], which pairs a fitted scaler with
//! an XGBoost tree ensemble and turns raw feature vectors into class labels.

use std::path::Path;
use std::time::Instant;

use ndarray::{ArrayView1, ArrayView2, Axis};

use crate::booster::Booster;
use crate::error::{InferenceError, Result};
use crate::inference::InferenceConfig;
use crate::input::{FeatureVector, parse_features};
use crate::metadata::ModelMetadata;
use crate::objective::Objective;
use crate::results::{Prediction, Speed};
use crate::scaler::Scaler;
use crate::utils::{argmax, logit, sigmoid, softmax};

/// Scaler plus classifier, loaded once and immutable afterwards.
///
/// All prediction methods take `&self`, so one loaded model can be shared
/// between threads behind an `Arc` without locking.
///
/// # Example
///
/// ```no_run
/// use potability_inference::PotabilityModel;
///
/// let model = PotabilityModel::load("water_model.json", "scaler.json")?;
/// let features = model.parse_input("[7.2, 150, 320, 2.8, 180, 350, 2.5, 45.0, 0.8]")?;
/// let prediction = model.predict(features.as_slice())?;
/// println!("{}", prediction.label);
/// # Ok::<(), potability_inference::InferenceError>(())
/// ```
pub struct PotabilityModel {
    /// Tree ensemble.
    booster: Booster,
    /// Feature scaler applied before the trees.
    scaler: Scaler,
    /// Inference configuration.
    config: InferenceConfig,
    /// Time spent loading both artifacts, in milliseconds.
    load_time: f64,
}

impl PotabilityModel {
    /// Load the model and scaler artifacts from the given paths.
    ///
    /// # Errors
    ///
    /// Returns an error if either artifact is missing or can't be parsed.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(model_path: P, scaler_path: Q) -> Result<Self> {
        Self::load_with_config(
            InferenceConfig::new()
                .with_model(model_path.as_ref())
                .with_scaler(scaler_path.as_ref()),
        )
    }

    /// Load both artifacts named by a configuration.
    ///
    /// The model is read first, then the scaler; the first failure wins.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ConfigError`] for an invalid configuration,
    /// [`InferenceError::ModelLoadError`] or [`InferenceError::ScalerLoadError`]
    /// if an artifact can't be loaded.
    pub fn load_with_config(config: InferenceConfig) -> Result<Self> {
        config.validate()?;

        let start = Instant::now();
        let booster = Booster::load(&config.model_path)?;
        let scaler = Scaler::load(&config.scaler_path)?;
        let load_time = start.elapsed().as_secs_f64() * 1000.0;

        let mut model = Self::from_parts(booster, scaler, config)?;
        model.load_time = load_time;
        Ok(model)
    }

    /// Assemble a model from already-loaded parts.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ConfigError`] for an invalid configuration.
    pub fn from_parts(booster: Booster, scaler: Scaler, config: InferenceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            booster,
            scaler,
            config,
            load_time: 0.0,
        })
    }

    /// Parse a JSON feature vector, ordering object input by feature name.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::InputError`] if the JSON is invalid or
    /// contains non-numeric values.
    pub fn parse_input(&self, json: &str) -> Result<FeatureVector> {
        parse_features(json, self.feature_names())
    }

    /// Classify a single feature vector.
    ///
    /// The vector is wrapped in a batch of one, scaled, and passed through
    /// the trees.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ShapeMismatch`] if the vector length differs
    /// from what the scaler or model was fitted on.
    pub fn predict(&self, features: &[f64]) -> Result<Prediction> {
        let batch = ArrayView1::from(features).insert_axis(Axis(0));
        self.predict_batch(batch)?
            .pop()
            .ok_or_else(|| InferenceError::InferenceError("Model returned no prediction".to_string()))
    }

    /// Parse and classify a JSON feature vector in one step.
    ///
    /// # Errors
    ///
    /// Returns any error from [`Self::parse_input`] or [`Self::predict`].
    pub fn predict_json(&self, json: &str) -> Result<Prediction> {
        let features = self.parse_input(json)?;
        self.predict(features.as_slice())
    }

    /// Classify every row of a batch.
    ///
    /// # Arguments
    ///
    /// * `batch` - Raw features, shape `(n_rows, n_features)`.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ShapeMismatch`] if the column count differs
    /// from what the scaler or model was fitted on.
    pub fn predict_batch(&self, batch: ArrayView2<'_, f64>) -> Result<Vec<Prediction>> {
        let start_preprocess = Instant::now();
        let scaled = self.scaler.transform(batch)?;
        let preprocess_time = start_preprocess.elapsed().as_secs_f64() * 1000.0;

        let start_inference = Instant::now();
        let margins = self.booster.predict_margin(scaled.view())?;
        let mut predictions = margins
            .rows()
            .into_iter()
            .map(|row| {
                let margin = row.to_vec();
                let (label, probabilities) = self.decide(&margin)?;
                Ok(Prediction {
                    label,
                    probabilities,
                    margin,
                    speed: Speed::default(),
                })
            })
            .collect::<Result<Vec<_>>>()?;
        let inference_time = start_inference.elapsed().as_secs_f64() * 1000.0;

        #[allow(clippy::cast_precision_loss)]
        let rows = predictions.len().max(1) as f64;
        for prediction in &mut predictions {
            prediction.speed = Speed {
                load: None,
                preprocess: Some(preprocess_time / rows),
                inference: Some(inference_time / rows),
            };
        }

        Ok(predictions)
    }

    /// Turn the margins of one row into a label and class probabilities.
    ///
    /// Binary probabilities are computed in single precision, as the margin
    /// itself is.
    #[allow(clippy::cast_possible_truncation)]
    fn decide(&self, margin: &[f64]) -> Result<(i64, Vec<f64>)> {
        let first = || {
            margin.first().copied().ok_or_else(|| {
                InferenceError::InferenceError("Model produced an empty margin".to_string())
            })
        };

        match self.booster.metadata().objective {
            Objective::BinaryLogistic => {
                let p = f64::from(sigmoid(first()? as f32));
                Ok((i64::from(p > self.config.threshold), vec![1.0 - p, p]))
            }
            Objective::BinaryLogitRaw => {
                let m = first()?;
                Ok((i64::from(m > logit(self.config.threshold)), Vec::new()))
            }
            Objective::BinaryHinge => Ok((i64::from(first()? > 0.0), Vec::new())),
            Objective::MultiSoftprob | Objective::MultiSoftmax => {
                let probabilities = softmax(margin);
                let label = i64::try_from(argmax(&probabilities)).map_err(|e| {
                    InferenceError::InferenceError(format!("Class index out of range: {e}"))
                })?;
                Ok((label, probabilities))
            }
        }
    }

    /// Feature names recorded by the model, falling back to the scaler's.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        let names = &self.booster.metadata().feature_names;
        if names.is_empty() {
            self.scaler.feature_names()
        } else {
            names.as_slice()
        }
    }

    /// Number of features the model expects.
    #[must_use]
    pub const fn num_features(&self) -> usize {
        self.booster.metadata().num_feature
    }

    /// Get the model metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ModelMetadata {
        self.booster.metadata()
    }

    /// Get the scaler.
    #[must_use]
    pub const fn scaler(&self) -> &Scaler {
        &self.scaler
    }

    /// Get the inference configuration.
    #[must_use]
    pub const fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Time spent loading the artifacts, in milliseconds.
    #[must_use]
    pub const fn load_time(&self) -> f64 {
        self.load_time
    }
}

impl std::fmt::Debug for PotabilityModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PotabilityModel")
            .field("objective", &self.metadata().objective)
            .field("num_features", &self.num_features())
            .field("num_trees", &self.booster.num_trees())
            .field("scaler", &self.scaler.kind())
            .finish_non_exhaustive()
    }
}
