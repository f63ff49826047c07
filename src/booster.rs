// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Native evaluation of XGBoost tree ensembles.
//!
//! Reads the JSON model format written by `Booster.save_model("model.json")`
//! and walks the trees directly, so no XGBoost runtime is needed at
//! inference time.
//!
//! Layout of the parts of the format used here:
//!
//! ```text
//! {
//!   "learner": {
//!     "feature_names": [...],
//!     "gradient_booster": {
//!       "name": "gbtree",
//!       "model": { "trees": [...], "tree_info": [0, 0, ...] }
//!     },
//!     "learner_model_param": { "base_score": "5E-1", "num_class": "0", "num_feature": "9" },
//!     "objective": { "name": "binary:logistic" }
//!   },
//!   "version": [2, 0, 3]
//! }
//! ```
//!
//! DART models nest the tree model under `gradient_booster.gbtree` and carry
//! per-tree weights in `weight_drop`.

use std::path::Path;

use ndarray::{Array2, ArrayView2};
use serde::Deserialize;

use crate::error::{InferenceError, Result};
use crate::metadata::ModelMetadata;
use crate::utils::logit;

/// A scalar XGBoost may write either as a JSON string or a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(f64),
    Text(String),
}

impl Scalar {
    fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// `default_left` is an int array in JSON exports and a bool array in some
/// converted models.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Int(u8),
}

impl Flag {
    const fn is_set(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModelJson {
    learner: LearnerJson,
    #[serde(default)]
    version: Vec<u32>,
}

#[derive(Debug, Deserialize)]
struct LearnerJson {
    #[serde(default)]
    feature_names: Vec<String>,
    gradient_booster: GradientBoosterJson,
    learner_model_param: LearnerModelParamJson,
    objective: ObjectiveJson,
}

#[derive(Debug, Deserialize)]
struct LearnerModelParamJson {
    base_score: Scalar,
    #[serde(default)]
    num_class: Option<Scalar>,
    num_feature: Scalar,
}

#[derive(Debug, Deserialize)]
struct ObjectiveJson {
    name: String,
}

#[derive(Debug, Deserialize)]
struct GradientBoosterJson {
    name: String,
    #[serde(default)]
    model: Option<GbTreeModelJson>,
    #[serde(default)]
    gbtree: Option<Box<GradientBoosterJson>>,
    #[serde(default)]
    weight_drop: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct GbTreeModelJson {
    trees: Vec<TreeJson>,
    #[serde(default)]
    tree_info: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct TreeJson {
    left_children: Vec<i32>,
    right_children: Vec<i32>,
    split_indices: Vec<usize>,
    split_conditions: Vec<f32>,
    #[serde(default)]
    default_left: Vec<Flag>,
    #[serde(default)]
    split_type: Vec<u8>,
}

/// A single tree node.
#[derive(Debug, Clone, PartialEq)]
enum Node {
    /// Internal split: go left when `value < threshold`, missing follows `default_left`.
    Split {
        feature: usize,
        threshold: f32,
        left: usize,
        right: usize,
        default_left: bool,
    },
    /// Leaf with its output value.
    Leaf(f32),
}

/// A single regression tree.
#[derive(Debug, Clone)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    /// Build a tree from its JSON arrays, checking every index.
    fn from_json(json: TreeJson, index: usize, num_feature: usize) -> Result<Self> {
        let n = json.left_children.len();
        let invalid = |msg: String| InferenceError::ModelLoadError(format!("tree {index}: {msg}"));

        if n == 0 {
            return Err(invalid("tree has no nodes".to_string()));
        }
        if json.right_children.len() != n
            || json.split_indices.len() != n
            || json.split_conditions.len() != n
        {
            return Err(invalid("node arrays have different lengths".to_string()));
        }
        if !json.default_left.is_empty() && json.default_left.len() != n {
            return Err(invalid("default_left has the wrong length".to_string()));
        }
        if json.split_type.iter().any(|t| *t != 0) {
            return Err(invalid("categorical splits are not supported".to_string()));
        }

        let mut nodes = Vec::with_capacity(n);
        for i in 0..n {
            let (left, right) = (json.left_children[i], json.right_children[i]);
            if left == -1 && right == -1 {
                nodes.push(Node::Leaf(json.split_conditions[i]));
                continue;
            }

            // Children always come after their parent, which also rules out cycles.
            let child = |c: i32| -> Result<usize> {
                usize::try_from(c)
                    .ok()
                    .filter(|c| *c > i && *c < n)
                    .ok_or_else(|| invalid(format!("node {i} has invalid child {c}")))
            };
            let feature = json.split_indices[i];
            if feature >= num_feature {
                return Err(invalid(format!(
                    "node {i} splits on feature {feature} but the model has {num_feature} features"
                )));
            }

            nodes.push(Node::Split {
                feature,
                threshold: json.split_conditions[i],
                left: child(left)?,
                right: child(right)?,
                default_left: json.default_left.get(i).is_some_and(Flag::is_set),
            });
        }

        Ok(Self { nodes })
    }

    /// Evaluate the tree for one row.
    fn predict(&self, row: &[f32]) -> f32 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                Node::Leaf(value) => return *value,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    default_left,
                } => {
                    let value = row[*feature];
                    idx = if value.is_nan() {
                        if *default_left { *left } else { *right }
                    } else if value < *threshold {
                        *left
                    } else {
                        *right
                    };
                }
            }
        }
    }
}

/// An immutable XGBoost tree ensemble.
#[derive(Debug, Clone)]
pub struct Booster {
    trees: Vec<Tree>,
    /// Output group (class) of each tree.
    tree_info: Vec<usize>,
    /// Per-tree weight; all ones except for DART.
    tree_weights: Vec<f32>,
    /// Margin added to every output group before the trees.
    base_margin: Vec<f32>,
    metadata: ModelMetadata,
}

impl Booster {
    /// Load a booster from an XGBoost JSON model file.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ModelLoadError`] if the file is missing,
    /// unreadable, or not a supported XGBoost JSON model.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(InferenceError::ModelLoadError(format!(
                "Model file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            InferenceError::ModelLoadError(format!("Failed to read {}: {e}", path.display()))
        })?;

        Self::from_json_str(&content).map_err(|e| match e {
            InferenceError::ModelLoadError(msg) => {
                InferenceError::ModelLoadError(format!("{}: {msg}", path.display()))
            }
            other => other,
        })
    }

    /// Parse a booster from XGBoost JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ModelLoadError`] if the JSON is malformed or
    /// describes a model this evaluator cannot run.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let json: ModelJson = serde_json::from_str(content)
            .map_err(|e| InferenceError::ModelLoadError(format!("Invalid XGBoost JSON model: {e}")))?;

        let learner = json.learner;
        let params = &learner.learner_model_param;
        let mut metadata = ModelMetadata::from_learner_params(
            &learner.objective.name,
            &params.base_score.to_text(),
            &params
                .num_class
                .as_ref()
                .map_or_else(|| "0".to_string(), Scalar::to_text),
            &params.num_feature.to_text(),
        )?;

        let booster_name = learner.gradient_booster.name.clone();
        let (model, weight_drop) = match booster_name.as_str() {
            "gbtree" => (learner.gradient_booster.model, Vec::new()),
            "dart" => {
                let inner = learner.gradient_booster.gbtree.ok_or_else(|| {
                    InferenceError::ModelLoadError("DART model has no gbtree section".to_string())
                })?;
                (inner.model, learner.gradient_booster.weight_drop)
            }
            other => {
                return Err(InferenceError::ModelLoadError(format!(
                    "Unsupported booster '{other}', expected gbtree or dart"
                )));
            }
        };
        let model = model.ok_or_else(|| {
            InferenceError::ModelLoadError("Gradient booster has no model section".to_string())
        })?;

        let num_trees = model.trees.len();
        let num_groups = metadata.num_groups();

        let tree_info = if model.tree_info.is_empty() {
            vec![0; num_trees]
        } else {
            model.tree_info
        };
        if tree_info.len() != num_trees {
            return Err(InferenceError::ModelLoadError(format!(
                "tree_info lists {} trees but the model has {num_trees}",
                tree_info.len()
            )));
        }
        if let Some(group) = tree_info.iter().find(|g| **g >= num_groups) {
            return Err(InferenceError::ModelLoadError(format!(
                "tree assigned to output group {group} but the model has {num_groups}"
            )));
        }

        #[allow(clippy::cast_possible_truncation)]
        let tree_weights: Vec<f32> = if weight_drop.is_empty() {
            vec![1.0; num_trees]
        } else if weight_drop.len() == num_trees {
            weight_drop.iter().map(|w| *w as f32).collect()
        } else {
            return Err(InferenceError::ModelLoadError(format!(
                "weight_drop lists {} weights but the model has {num_trees} trees",
                weight_drop.len()
            )));
        };

        let trees = model
            .trees
            .into_iter()
            .enumerate()
            .map(|(i, t)| Tree::from_json(t, i, metadata.num_feature))
            .collect::<Result<Vec<_>>>()?;

        let base_margin = Self::base_margin(&metadata, num_groups)?;

        if !learner.feature_names.is_empty() && learner.feature_names.len() != metadata.num_feature {
            return Err(InferenceError::ModelLoadError(format!(
                "model lists {} feature names but has {} features",
                learner.feature_names.len(),
                metadata.num_feature
            )));
        }

        metadata.booster = booster_name;
        metadata.feature_names = learner.feature_names;
        metadata.num_trees = num_trees;
        if !json.version.is_empty() {
            metadata.version = Some(
                json.version
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("."),
            );
        }

        Ok(Self {
            trees,
            tree_info,
            tree_weights,
            base_margin,
            metadata,
        })
    }

    /// Base margin per output group, derived from `base_score`.
    #[allow(clippy::cast_possible_truncation)]
    fn base_margin(metadata: &ModelMetadata, num_groups: usize) -> Result<Vec<f32>> {
        let scores = match metadata.base_score.len() {
            1 => vec![metadata.base_score[0]; num_groups],
            n if n == num_groups => metadata.base_score.clone(),
            n => {
                return Err(InferenceError::ModelLoadError(format!(
                    "base_score has {n} values but the model has {num_groups} output groups"
                )));
            }
        };

        Ok(scores
            .into_iter()
            .map(|s| {
                if metadata.objective.base_score_is_probability() {
                    logit(s) as f32
                } else {
                    s as f32
                }
            })
            .collect())
    }

    /// Compute raw margins for a batch of rows.
    ///
    /// # Arguments
    ///
    /// * `batch` - Rows of features, shape `(n_rows, num_feature)`.
    ///
    /// # Returns
    ///
    /// Margins of shape `(n_rows, num_groups)`.
    ///
    /// # Errors
    ///
    /// Returns [`InferenceError::ShapeMismatch`] if the column count differs
    /// from the number of features the model was trained on, and
    /// [`InferenceError::InputError`] if a value is infinite in single
    /// precision.
    #[allow(clippy::cast_possible_truncation)]
    pub fn predict_margin(&self, batch: ArrayView2<'_, f64>) -> Result<Array2<f64>> {
        let expected = self.metadata.num_feature;
        if batch.ncols() != expected {
            return Err(InferenceError::ShapeMismatch(format!(
                "feature shape mismatch, expected: {expected}, got: {}",
                batch.ncols()
            )));
        }

        let num_groups = self.metadata.num_groups();
        let mut margins = Array2::<f64>::zeros((batch.nrows(), num_groups));
        let mut row = vec![0.0f32; expected];

        for (r, features) in batch.rows().into_iter().enumerate() {
            // XGBoost evaluates in single precision.
            for (dst, src) in row.iter_mut().zip(features.iter()) {
                *dst = *src as f32;
            }
            if row.iter().any(|v| v.is_infinite()) {
                return Err(InferenceError::InputError(
                    "Input data contains `inf` or a value too large, while `missing` is not set to `inf`"
                        .to_string(),
                ));
            }

            let mut sums = self.base_margin.clone();
            for ((tree, group), weight) in self
                .trees
                .iter()
                .zip(&self.tree_info)
                .zip(&self.tree_weights)
            {
                sums[*group] += tree.predict(&row) * weight;
            }

            for (g, sum) in sums.into_iter().enumerate() {
                margins[[r, g]] = f64::from(sum);
            }
        }

        Ok(margins)
    }

    /// Get the model metadata.
    #[must_use]
    pub const fn metadata(&self) -> &ModelMetadata {
        &self.metadata
    }

    /// Number of trees in the ensemble.
    #[must_use]
    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    /// Two stumps over two features.
    const STUMPS: &str = r#"{
        "learner": {
            "feature_names": ["a", "b"],
            "gradient_booster": {
                "name": "gbtree",
                "model": {
                    "trees": [
                        {
                            "left_children": [1, -1, -1],
                            "right_children": [2, -1, -1],
                            "split_indices": [0, 0, 0],
                            "split_conditions": [0.0, -0.4, 0.6],
                            "default_left": [1, 0, 0],
                            "split_type": [0, 0, 0]
                        },
                        {
                            "left_children": [1, -1, -1],
                            "right_children": [2, -1, -1],
                            "split_indices": [1, 0, 0],
                            "split_conditions": [1.0, 0.1, -0.5],
                            "default_left": [0, 0, 0],
                            "split_type": [0, 0, 0]
                        }
                    ],
                    "tree_info": [0, 0]
                }
            },
            "learner_model_param": { "base_score": "5E-1", "num_class": "0", "num_feature": "2" },
            "objective": { "name": "binary:logistic" }
        },
        "version": [2, 0, 3]
    }"#;

    fn margin(booster: &Booster, a: f64, b: f64) -> f64 {
        booster.predict_margin(array![[a, b]].view()).unwrap()[[0, 0]]
    }

    #[test]
    fn test_parse_metadata() {
        let booster = Booster::from_json_str(STUMPS).unwrap();
        let meta = booster.metadata();
        assert_eq!(booster.num_trees(), 2);
        assert_eq!(meta.num_feature, 2);
        assert_eq!(meta.feature_names, vec!["a", "b"]);
        assert_eq!(meta.version.as_deref(), Some("2.0.3"));
        assert_eq!(meta.booster, "gbtree");
    }

    #[test]
    fn test_split_direction() {
        let booster = Booster::from_json_str(STUMPS).unwrap();
        // base_score 0.5 contributes a zero margin
        assert!((margin(&booster, 1.0, 0.0) - 0.7).abs() < 1e-6);
        assert!((margin(&booster, -1.0, 0.0) - -0.3).abs() < 1e-6);
        assert!((margin(&booster, 1.0, 2.0) - 0.1).abs() < 1e-6);
        // equal to the threshold goes right
        assert!((margin(&booster, 0.0, 1.0) - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_missing_follows_default() {
        let booster = Booster::from_json_str(STUMPS).unwrap();
        // tree 0 defaults left (-0.4), tree 1 defaults right (-0.5)
        assert!((margin(&booster, f64::NAN, f64::NAN) - -0.9).abs() < 1e-6);
    }

    #[test]
    fn test_shape_mismatch() {
        let booster = Booster::from_json_str(STUMPS).unwrap();
        let err = booster
            .predict_margin(array![[1.0, 2.0, 3.0]].view())
            .unwrap_err();
        assert!(matches!(err, InferenceError::ShapeMismatch(_)));
        assert!(err.to_string().contains("expected: 2, got: 3"));
    }

    #[test]
    fn test_batch_rows_are_independent() {
        let booster = Booster::from_json_str(STUMPS).unwrap();
        let margins = booster
            .predict_margin(array![[1.0, 0.0], [-1.0, 0.0]].view())
            .unwrap();
        assert_eq!(margins.shape(), &[2, 1]);
        assert!((margins[[0, 0]] - 0.7).abs() < 1e-6);
        assert!((margins[[1, 0]] - -0.3).abs() < 1e-6);
    }

    #[test]
    fn test_base_score_is_logit_for_logistic() {
        let json = STUMPS.replace("\"5E-1\"", "\"[7.5E-1]\"");
        let booster = Booster::from_json_str(&json).unwrap();
        let expected = 0.7 + 3.0f64.ln();
        assert!((margin(&booster, 1.0, 0.0) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_rejects_bad_models() {
        assert!(matches!(
            Booster::from_json_str("not json").unwrap_err(),
            InferenceError::ModelLoadError(_)
        ));

        let categorical = STUMPS.replacen("\"split_type\": [0, 0, 0]", "\"split_type\": [1, 0, 0]", 1);
        let err = Booster::from_json_str(&categorical).unwrap_err();
        assert!(err.to_string().contains("categorical"));

        let cyclic = STUMPS.replacen("\"left_children\": [1, -1, -1]", "\"left_children\": [0, -1, -1]", 1);
        assert!(Booster::from_json_str(&cyclic).is_err());

        let out_of_range = STUMPS.replacen("\"split_indices\": [1, 0, 0]", "\"split_indices\": [5, 0, 0]", 1);
        assert!(Booster::from_json_str(&out_of_range).is_err());

        let linear = STUMPS.replace("\"gbtree\"", "\"gblinear\"");
        assert!(Booster::from_json_str(&linear).is_err());
    }

    #[test]
    fn test_dart_weights() {
        let dart = r#"{
            "learner": {
                "gradient_booster": {
                    "name": "dart",
                    "gbtree": {
                        "name": "gbtree",
                        "model": {
                            "trees": [{
                                "left_children": [-1],
                                "right_children": [-1],
                                "split_indices": [0],
                                "split_conditions": [0.8]
                            }],
                            "tree_info": [0]
                        }
                    },
                    "weight_drop": [0.5]
                },
                "learner_model_param": { "base_score": "5E-1", "num_class": "0", "num_feature": "2" },
                "objective": { "name": "binary:logistic" }
            }
        }"#;
        let booster = Booster::from_json_str(dart).unwrap();
        assert_eq!(booster.metadata().booster, "dart");
        assert!((margin(&booster, 0.0, 0.0) - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_infinite_values_rejected() {
        let booster = Booster::from_json_str(STUMPS).unwrap();
        let err = booster
            .predict_margin(array![[f64::INFINITY, 0.0]].view())
            .unwrap_err();
        assert!(matches!(err, InferenceError::InputError(_)));

        // overflows f32
        let err = booster.predict_margin(array![[0.0, 1e300]].view()).unwrap_err();
        assert!(matches!(err, InferenceError::InputError(_)));
    }

    #[test]
    fn test_tree_info_routes_to_groups() {
        let json = STUMPS
            .replace("\"tree_info\": [0, 0]", "\"tree_info\": [0, 1]")
            .replace("\"num_class\": \"0\"", "\"num_class\": \"2\"")
            .replace("binary:logistic", "multi:softprob");
        let booster = Booster::from_json_str(&json).unwrap();
        let margins = booster.predict_margin(array![[1.0, 0.0]].view()).unwrap();
        assert_eq!(margins.shape(), &[1, 2]);
        // multi-class base_score 0.5 is added as a raw margin
        assert!((margins[[0, 0]] - 1.1).abs() < 1e-6);
        assert!((margins[[0, 1]] - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_load_missing_file() {
        let err = Booster::load("nonexistent_model.json").unwrap_err();
        assert!(matches!(err, InferenceError::ModelLoadError(_)));
        assert!(err.to_string().contains("not found"));
    }
}
