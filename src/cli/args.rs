// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use crate::inference::{DEFAULT_MODEL, DEFAULT_SCALER, DEFAULT_THRESHOLD};
use clap::Parser;

/// CLI arguments parser.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"Output:
    stdout  the predicted class label as a single line, e.g. 1
    stderr  a diagnostic message on failure
    exit    0 on success, 1 on any failure

Examples:
    potability-inference '[7.2, 150, 320, 2.8, 180, 350, 2.5, 45.0, 0.8]'
    potability-inference --model models/water_model.json --scaler models/scaler.json '[...]'
    potability-inference --verbose '{"ph": 7.2, "hardness": 150, ...}'"#)]
pub struct Cli {
    /// Feature vector as a JSON array of numbers (or an object keyed by feature name)
    #[arg(value_name = "FEATURES")]
    pub features: String,

    /// Path to the XGBoost JSON model
    #[arg(short, long, default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Path to the scaler JSON
    #[arg(short, long, default_value = DEFAULT_SCALER)]
    pub scaler: String,

    /// Probability above which a binary sample is labelled 1
    #[arg(long, default_value_t = DEFAULT_THRESHOLD)]
    pub threshold: f64,

    /// Print model summary, probabilities, and timings to stderr
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Arguments after the feature vector, accepted and ignored
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true, num_args = 0..)]
    pub ignored: Vec<String>,
}
