// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Shared artifact fixtures for the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

/// Three-tree `binary:logistic` model over the nine water-quality features.
///
/// - tree 0: ph < 0 → -0.4, else 0.6 (missing goes left)
/// - tree 1: solids < 1 → 0.1, else -0.5
/// - tree 2: sulfate < -1 → (turbidity < 0.5 → 0.2, else -0.3), else 0.05
pub const WATER_MODEL: &str = r#"{
    "learner": {
        "attributes": {},
        "feature_names": ["ph", "hardness", "solids", "chloramines", "sulfate",
                          "conductivity", "organic_carbon", "trihalomethanes", "turbidity"],
        "feature_types": ["float", "float", "float", "float", "float",
                          "float", "float", "float", "float"],
        "gradient_booster": {
            "gbtree_model_param": { "num_parallel_tree": "1", "num_trees": "3" },
            "model": {
                "gbtree_model_param": { "num_parallel_tree": "1", "num_trees": "3" },
                "iteration_indptr": [0, 1, 2, 3],
                "tree_info": [0, 0, 0],
                "trees": [
                    {
                        "base_weights": [0.0, -0.4, 0.6],
                        "categories": [],
                        "categories_nodes": [],
                        "categories_segments": [],
                        "categories_sizes": [],
                        "default_left": [1, 0, 0],
                        "id": 0,
                        "left_children": [1, -1, -1],
                        "loss_changes": [12.5, 0.0, 0.0],
                        "parents": [2147483647, 0, 0],
                        "right_children": [2, -1, -1],
                        "split_conditions": [0.0, -0.4, 0.6],
                        "split_indices": [0, 0, 0],
                        "split_type": [0, 0, 0],
                        "sum_hessian": [100.0, 40.0, 60.0],
                        "tree_param": { "num_deleted": "0", "num_feature": "9", "num_nodes": "3", "size_leaf_vector": "1" }
                    },
                    {
                        "base_weights": [0.0, 0.1, -0.5],
                        "default_left": [0, 0, 0],
                        "id": 1,
                        "left_children": [1, -1, -1],
                        "right_children": [2, -1, -1],
                        "split_conditions": [1.0, 0.1, -0.5],
                        "split_indices": [2, 0, 0],
                        "split_type": [0, 0, 0]
                    },
                    {
                        "base_weights": [0.0, 0.0, 0.05, 0.2, -0.3],
                        "default_left": [0, 1, 0, 0, 0],
                        "id": 2,
                        "left_children": [1, 3, -1, -1, -1],
                        "right_children": [2, 4, -1, -1, -1],
                        "split_conditions": [-1.0, 0.5, 0.05, 0.2, -0.3],
                        "split_indices": [4, 8, 0, 0, 0],
                        "split_type": [0, 0, 0, 0, 0]
                    }
                ]
            },
            "name": "gbtree"
        },
        "learner_model_param": {
            "base_score": "5E-1",
            "boost_from_average": "1",
            "num_class": "0",
            "num_feature": "9",
            "num_target": "1"
        },
        "objective": {
            "name": "binary:logistic",
            "reg_loss_param": { "scale_pos_weight": "1" }
        }
    },
    "version": [2, 0, 3]
}"#;

/// Standard scaler fitted on the same nine features.
pub const WATER_SCALER: &str = r#"{
    "type": "standard",
    "mean_": [7.0, 196.0, 22000.0, 7.1, 333.0, 426.0, 14.3, 66.4, 3.97],
    "scale_": [1.5, 32.9, 8768.0, 1.58, 41.4, 80.8, 3.3, 16.2, 0.78],
    "with_mean": true,
    "with_std": true,
    "n_features_in_": 9,
    "feature_names_in_": ["ph", "hardness", "solids", "chloramines", "sulfate",
                          "conductivity", "organic_carbon", "trihalomethanes", "turbidity"]
}"#;

/// Margin 0.6 + 0.1 + 0.2 = 0.9, labelled 1.
pub const POTABLE_SAMPLE: &str = "[7.2, 150, 320, 2.8, 180, 350, 2.5, 45.0, 0.8]";

/// Margin -0.4 - 0.5 + 0.05 = -0.85, labelled 0.
pub const HAZARD_SAMPLE: &str = "[5.0, 150, 45000, 2.8, 400, 350, 2.5, 45.0, 0.8]";

/// Write both artifacts under their default names.
pub fn write_artifacts(dir: &Path) {
    fs::write(dir.join("water_model.json"), WATER_MODEL).unwrap();
    fs::write(dir.join("scaler.json"), WATER_SCALER).unwrap();
}
