// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

#![allow(clippy::multiple_crate_versions)]

//! # Potability Inference
//!
//! Classifies a water sample as potable or not with a pretrained XGBoost
//! model. The raw measurements are scaled with the scaler fitted alongside
//! the model, the trees are evaluated natively in Rust, and the predicted
//! class label comes back as an integer.
//!
//! ## Artifacts
//!
//! Two read-only files, produced by the training pipeline:
//!
//! | File | Contents |
//! |------|----------|
//! | `water_model.json` | XGBoost model saved with `Booster.save_model("water_model.json")` |
//! | `scaler.json` | Fitted scaler parameters (`mean`/`scale` or `scale`/`min`) |
//!
//! ## CLI Usage
//!
//! The binary is meant to be spawned by another process. The feature vector
//! is the only positional argument:
//!
//! ```bash
//! potability-inference '[7.2, 150, 320, 2.8, 180, 350, 2.5, 45.0, 0.8]'
//! # stdout: 1
//! ```
//!
//! On success stdout holds exactly one line with the label and the exit
//! status is 0. On any failure stdout stays empty, stderr holds the reason,
//! and the exit status is 1.
//!
//! | Option | Short | Description | Default |
//! |--------|-------|-------------|---------|
//! | `--model` | `-m` | Path to XGBoost JSON model | `water_model.json` |
//! | `--scaler` | `-s` | Path to scaler JSON | `scaler.json` |
//! | `--threshold` | | Binary decision threshold | `0.5` |
//! | `--verbose` | `-v` | Diagnostics on stderr | `false` |
//!
//! ## Node.js
//!
//! ```javascript
//! const { spawn } = require('child_process');
//!
//! const proc = spawn('potability-inference', [JSON.stringify(values)]);
//! let out = '';
//! proc.stdout.on('data', (d) => { out += d; });
//! proc.on('close', (code) => {
//!     if (code === 0) console.log(out.trim() === '1' ? 'POTABLE' : 'NON-POTABLE');
//! });
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use potability_inference::PotabilityModel;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Load once, predict many times
//!     let model = PotabilityModel::load("water_model.json", "scaler.json")?;
//!
//!     let prediction = model.predict(&[7.2, 150.0, 320.0, 2.8, 180.0, 350.0, 2.5, 45.0, 0.8])?;
//!     println!("{} ({})", prediction.label, prediction.label_name());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`model`] | [`PotabilityModel`]: scaler plus booster, `predict` |
//! | [`booster`] | Native XGBoost JSON tree ensemble evaluation |
//! | [`scaler`] | Fitted standard and min-max scalers |
//! | [`input`] | JSON feature vector parsing |
//! | [`inference`] | [`InferenceConfig`] and default artifact names |
//! | [`metadata`] | Learner parameters read from the model |
//! | [`objective`] | Supported XGBoost objectives |
//! | [`results`] | [`Prediction`] and [`Speed`] |
//! | [`error`] | Error types ([`InferenceError`], [`Result`]) |

// Modules
pub mod booster;
pub mod cli;
pub mod error;
pub mod inference;
pub mod input;
pub mod metadata;
pub mod model;
pub mod objective;
pub mod results;
pub mod scaler;
pub mod utils;

// Re-export main types for convenience
pub use booster::Booster;
pub use error::{InferenceError, Result};
pub use inference::InferenceConfig;
pub use input::{FeatureVector, parse_features};
pub use metadata::ModelMetadata;
pub use model::PotabilityModel;
pub use objective::Objective;
pub use results::{Prediction, Speed};
pub use scaler::{Scaler, ScalerKind};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
