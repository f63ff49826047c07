// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

use crate::cli::args::Cli;
use crate::cli::logging::set_verbose;
use crate::{InferenceConfig, PotabilityModel, Prediction, Result, VERSION};
use crate::{section, verbose, warn};

/// Load the artifacts, classify the feature vector from the command line,
/// and return the prediction.
///
/// Nothing is written to stdout here; the caller prints the label only once
/// the whole pipeline has succeeded.
///
/// # Errors
///
/// Returns the first failure from loading, parsing, scaling, or inference.
pub fn run_prediction(args: &Cli) -> Result<Prediction> {
    set_verbose(args.verbose);

    let config = InferenceConfig::new()
        .with_model(&args.model)
        .with_scaler(&args.scaler)
        .with_threshold(args.threshold);

    let model = PotabilityModel::load_with_config(config)?;

    section!("potability-inference {VERSION}");
    verbose!(
        "{} summary: {} features, {} classes, {:?} scaler",
        model.metadata().model_name(),
        model.num_features(),
        model.metadata().num_class,
        model.scaler().kind()
    );
    check_feature_names(&model);
    if !args.ignored.is_empty() {
        verbose!("ignoring extra arguments: {:?}", args.ignored);
    }

    let features = model.parse_input(&args.features)?;
    verbose!("input: {:?}", features.as_slice());

    let mut prediction = model.predict(features.as_slice())?;
    prediction.speed.load = Some(model.load_time());

    match prediction.confidence() {
        Some(p) => verbose!(
            "prediction: {} ({}) p={p:.4}",
            prediction.label,
            prediction.label_name()
        ),
        None => verbose!(
            "prediction: {} ({}) margin={:?}",
            prediction.label,
            prediction.label_name(),
            prediction.margin
        ),
    }
    verbose!(
        "Speed: {:.1}ms load, {:.3}ms preprocess, {:.3}ms inference",
        prediction.speed.load.unwrap_or(0.0),
        prediction.speed.preprocess.unwrap_or(0.0),
        prediction.speed.inference.unwrap_or(0.0)
    );

    Ok(prediction)
}

/// Warn when the scaler was fitted on differently named columns than the model.
fn check_feature_names(model: &PotabilityModel) {
    let model_names = &model.metadata().feature_names;
    let scaler_names = model.scaler().feature_names();
    if !model_names.is_empty() && !scaler_names.is_empty() && model_names.as_slice() != scaler_names
    {
        warn!(
            "scaler feature names {:?} differ from model feature names {:?}",
            scaler_names, model_names
        );
    }
}
