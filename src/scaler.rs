// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Fitted feature scalers.
//!
//! The scaler artifact is a JSON dump of the fitted parameters of a
//! scikit-learn `StandardScaler` or `MinMaxScaler`. Trailing-underscore
//! attribute names (`mean_`, `scale_`, ...) are accepted as aliases so the
//! attributes can be dumped verbatim:
//!
//! ```json
//! { "type": "standard", "mean": [7.08, 196.4], "scale": [1.47, 32.9] }
//! ```

use std::path::Path;

use ndarray::{Array1, Array2, ArrayView2, Axis};
use serde::Deserialize;

use crate::error::{InferenceError, Result};

/// Kind of scaler stored in the artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalerKind {
    /// Standardization: `(x - mean) / scale`.
    #[default]
    #[serde(alias = "StandardScaler")]
    Standard,
    /// Min-max normalization: `x * scale + min`.
    #[serde(alias = "MinMaxScaler")]
    MinMax,
}

#[derive(Debug, Deserialize)]
struct ScalerJson {
    #[serde(default, rename = "type")]
    kind: ScalerKind,
    #[serde(default, alias = "mean_")]
    mean: Option<Vec<f64>>,
    #[serde(default, alias = "scale_")]
    scale: Option<Vec<f64>>,
    #[serde(default, alias = "min_")]
    min: Option<Vec<f64>>,
    #[serde(default = "default_true")]
    with_mean: bool,
    #[serde(default = "default_true")]
    with_std: bool,
    #[serde(default, alias = "n_features_in_")]
    n_features_in: Option<usize>,
    #[serde(default, alias = "feature_names_in_")]
    feature_names_in: Vec<String>,
}

const fn default_true() -> bool {
    true
}

/// Fitted column parameters, applied in the same order scikit-learn does.
#[derive(Debug, Clone)]
enum Params {
    /// `(x - mean) / scale`; disabled steps hold 0 and 1.
    Standard { mean: Array1<f64>, scale: Array1<f64> },
    /// `x * scale + min`.
    MinMax { scale: Array1<f64>, min: Array1<f64> },
}

/// A fitted, immutable affine transform applied column-wise.
#[derive(Debug, Clone)]
pub struct Scaler {
    kind: ScalerKind,
    params: Params,
    feature_names: Vec<String>,
}

impl Scaler {
    /// Load a scaler from a JSON artifact.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ScalerLoadError`] if the file is missing,
    /// unreadable, or does not describe a valid fitted scaler.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InferenceError::ScalerLoadError(format!(
                "Scaler file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ScalerLoadError(format!("Failed to read {}: {e}", path.display()))
        })?;

        Self::from_json_str(&content).map_err(|e| match e {
            InferenceError::ScalerLoadError(msg) => {
                InferenceError::ScalerLoadError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parse a scaler from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ScalerLoadError`] if the JSON is malformed,
    /// a required parameter is missing, or parameter lengths disagree.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let json: ScalerJson = serde_json::from_str(content)
            .map_err(|e| InferenceError::ScalerLoadError(format!("Invalid scaler JSON: {e}")))?;

        let require = |field: Option<Vec<f64>>, name: &str| {
            field.ok_or_else(|| {
                InferenceError::ScalerLoadError(format!(
                    "{} scaler is missing '{name}'",
                    kind_name(json.kind)
                ))
            })
        };

        let params = match json.kind {
            ScalerKind::Standard => {
                let mean = if json.with_mean {
                    Some(require(json.mean.clone(), "mean")?)
                } else {
                    json.mean.clone()
                };
                let scale = if json.with_std {
                    Some(require(json.scale.clone(), "scale")?)
                } else {
                    json.scale.clone()
                };
                let n = mean
                    .as_ref()
                    .or(scale.as_ref())
                    .map(Vec::len)
                    .or(json.n_features_in)
                    .ok_or_else(|| {
                        InferenceError::ScalerLoadError(
                            "standard scaler has no parameters to infer its width from".to_string(),
                        )
                    })?;

                // A zero variance column is left unscaled.
                let scale = match scale.filter(|_| json.with_std) {
                    Some(s) => s
                        .into_iter()
                        .map(|v| if v == 0.0 { 1.0 } else { v })
                        .collect(),
                    None => vec![1.0; n],
                };
                let mean = mean.filter(|_| json.with_mean).unwrap_or_else(|| vec![0.0; n]);
                check_len(&mean, n, "mean")?;
                check_len(&scale, n, "scale")?;

                Params::Standard {
                    mean: Array1::from(mean),
                    scale: Array1::from(scale),
                }
            }
            ScalerKind::MinMax => {
                let scale = require(json.scale.clone(), "scale")?;
                let min = require(json.min.clone(), "min")?;
                check_len(&min, scale.len(), "min")?;
                Params::MinMax {
                    scale: Array1::from(scale),
                    min: Array1::from(min),
                }
            }
        };

        let n = params.width();
        if let Some(expected) = json.n_features_in
            && expected != n
        {
            return Err(InferenceError::ScalerLoadError(format!(
                "n_features_in is {expected} but parameters have {n} entries"
            )));
        }
        if !json.feature_names_in.is_empty() {
            check_len_names(&json.feature_names_in, n)?;
        }

        Ok(Self {
            kind: json.kind,
            params,
            feature_names: json.feature_names_in,
        })
    }

    /// Scale a batch of rows.
    ///
    /// # Arguments
    ///
    /// * `batch` - Raw features, shape `(n_rows, n_features)`.
    ///
    /// # Returns
    ///
    /// A new array of the same shape with every column transformed.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ShapeMismatch`] if the column count differs
    /// from the number of features the scaler was fitted on, and
    /// [`InferenceError::InputError`] if any value is infinite. `NaN` passes
    /// through as a missing value.
    pub fn transform(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let expected = self.n_features();
        if batch.ncols() != expected {
            return Err(InferenceError::ShapeMismatch(format!(
                "X has {} features, but the {} scaler is expecting {expected} features as input",
                batch.ncols(),
                kind_name(self.kind)
            )));
        }
        if batch.iter().any(|v| v.is_infinite()) {
            return Err(InferenceError::InputError(
                "Input X contains infinity or a value too large for dtype('float64')".to_string(),
            ));
        }

        let row = |a: &Array1<f64>| a.view().insert_axis(Axis(0)).to_owned();
        let scaled = match &self.params {
            Params::Standard { mean, scale } => (&batch - &row(mean)) / &row(scale),
            Params::MinMax { scale, min } => &batch * &row(scale) + &row(min),
        };
        Ok(scaled)
    }

    /// Number of features the scaler was fitted on.
    #[must_use]
    pub fn n_features(&self) -> usize {
        self.params.width()
    }

    /// Scaler kind.
    #[must_use]
    pub const fn kind(&self) -> ScalerKind {
        self.kind
    }

    /// Feature names seen at fit time, if recorded.
    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }
}

impl Params {
    fn width(&self) -> usize {
        match self {
            Self::Standard { mean, .. } => mean.len(),
            Self::MinMax { scale, .. } => scale.len(),
        }
    }
}

const fn kind_name(kind: ScalerKind) -> &'static str {
    match kind {
        ScalerKind::Standard => "standard",
        ScalerKind::MinMax => "min-max",
    }
}

fn check_len(values: &[f64], n: usize, name: &str) -> Result<()> {
    if values.len() == n {
        Ok(())
    } else {
        Err(InferenceError::ScalerLoadError(format!(
            "'{name}' has {} entries, expected {n}",
            values.len()
        )))
    }
}

fn check_len_names(names: &[String], n: usize) -> Result<()> {
    if names.len() == n {
        Ok(())
    } else {
        Err(InferenceError::ScalerLoadError(format!(
            "'feature_names_in' has {} entries, expected {n}",
            names.len()
        )))
    }
}
