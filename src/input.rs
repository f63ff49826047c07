// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Feature vector input parsing.
//!
//! The calling process passes the feature vector as a JSON array in a single
//! command-line argument, e.g. `[7.2, 150, 320, 2.8, 180, 350, 2.5, 45.0, 0.8]`.
//! A JSON object keyed by feature name is also accepted when the model
//! records its feature names; its values are reordered to match the model.
//!
//! No arity check happens here. A vector of the wrong length is rejected by
//! the scaler or the model when it is used.

use serde_json::Value;

use crate::error::{InferenceError, Result};

/// An ordered sequence of raw feature values.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    /// Feature values in model order.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the vector has no features.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Parse a feature vector from JSON text.
///
/// # Arguments
///
/// * `json` - The raw command-line argument.
/// * `feature_names` - The model's feature names, used to order object input.
///
/// # Errors
///
/// Returns [`InferenceError::InputError`] if the text is not valid JSON, is
/// neither an array nor an object, or contains a value that cannot be
/// converted to a float.
pub fn parse_features(json: &str, feature_names: &[String]) -> Result<FeatureVector> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| InferenceError::InputError(format!("Invalid JSON input: {e}")))?;

    match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| to_float(v).map_err(|e| at(&format!("element {i}"), e)))
            .collect::<Result<Vec<_>>>()
            .map(FeatureVector),
        Value::Object(map) => {
            if feature_names.is_empty() {
                return Err(InferenceError::InputError(
                    "Object input requires a model with feature names; pass a JSON array instead"
                        .to_string(),
                ));
            }
            if let Some(extra) = map.keys().find(|k| !feature_names.contains(k)) {
                return Err(InferenceError::InputError(format!(
                    "Unknown feature '{extra}'"
                )));
            }
            feature_names
                .iter()
                .map(|name| {
                    let v = map.get(name).ok_or_else(|| {
                        InferenceError::InputError(format!("Missing feature '{name}'"))
                    })?;
                    to_float(v).map_err(|e| at(&format!("feature '{name}'"), e))
                })
                .collect::<Result<Vec<_>>>()
                .map(FeatureVector)
        }
        other => Err(InferenceError::InputError(format!(
            "Expected a JSON array of numbers, got {}",
            type_name(&other)
        ))),
    }
}

/// Convert one JSON value to a float the way a lenient numeric cast would:
/// numbers as-is, numeric strings parsed, booleans as 1 or 0.
fn to_float(value: &Value) -> Result<f64> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| InferenceError::InputError(format!("{n} is not representable as a float"))),
        Value::String(s) => parse_float_str(s).ok_or_else(|| {
            InferenceError::InputError(format!("could not convert string to float: '{s}'"))
        }),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        other => Err(InferenceError::InputError(format!(
            "float() argument must be a string or a number, not {}",
            type_name(other)
        ))),
    }
}

fn parse_float_str(s: &str) -> Option<f64> {
    let t = s.trim();
    match t.to_ascii_lowercase().trim_start_matches(['+', '-']) {
        "nan" => Some(f64::NAN),
        "inf" | "infinity" => Some(if t.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        }),
        _ => t.replace('_', "").parse().ok().filter(|_| !t.starts_with('_') && !t.ends_with('_')),
    }
}

fn at(location: &str, err: InferenceError) -> InferenceError {
    match err {
        InferenceError::InputError(msg) => InferenceError::InputError(format!("{location}: {msg}")),
        other => other,
    }
}

const fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_array() {
        let v = parse_features("[45000, 7.2, 120.5, -3]", &[]).unwrap();
        assert_eq!(v.as_slice(), &[45000.0, 7.2, 120.5, -3.0]);
        assert_eq!(v.len(), 4);
    }

    #[test]
    fn test_lenient_elements() {
        let v = parse_features(r#"["7.2", " 3 ", true, false, "1e3"]"#, &[]).unwrap();
        assert_eq!(v.as_slice(), &[7.2, 3.0, 1.0, 0.0, 1000.0]);

        let v = parse_features(r#"["nan", "-inf", "Infinity"]"#, &[]).unwrap();
        assert!(v.as_slice()[0].is_nan());
        assert_eq!(v.as_slice()[1], f64::NEG_INFINITY);
        assert_eq!(v.as_slice()[2], f64::INFINITY);
    }

    #[test]
    fn test_empty_array_is_accepted() {
        let v = parse_features("[]", &[]).unwrap();
        assert!(v.is_empty());
    }

    #[test]
    fn test_rejects_non_numeric() {
        for bad in [r#"[1, "abc"]"#, "[1, null]", "[[1, 2]]", r#"[{"a": 1}]"#, r#"["_1"]"#] {
            let err = parse_features(bad, &[]).unwrap_err();
            assert!(matches!(err, InferenceError::InputError(_)), "{bad}");
        }
        let err = parse_features(r#"[1, "abc"]"#, &[]).unwrap_err();
        assert!(err.to_string().contains("element 1"));
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = parse_features("not-json", &[]).unwrap_err();
        assert!(err.to_string().starts_with("Input error: Invalid JSON input"));
        assert!(parse_features("", &[]).is_err());
        assert!(parse_features("42", &[]).is_err());
        assert!(parse_features(r#""[1, 2]""#, &[]).is_err());
    }

    #[test]
    fn test_object_ordered_by_feature_names() {
        let v = parse_features(r#"{"hardness": 150, "ph": 7.2}"#, &names(&["ph", "hardness"])).unwrap();
        assert_eq!(v.as_slice(), &[7.2, 150.0]);
    }

    #[test]
    fn test_object_errors() {
        let err = parse_features(r#"{"ph": 7.2}"#, &[]).unwrap_err();
        assert!(err.to_string().contains("feature names"));

        let err = parse_features(r#"{"ph": 7.2}"#, &names(&["ph", "hardness"])).unwrap_err();
        assert!(err.to_string().contains("Missing feature 'hardness'"));

        let err = parse_features(r#"{"ph": 7.2, "lead": 1}"#, &names(&["ph"])).unwrap_err();
        assert!(err.to_string().contains("Unknown feature 'lead'"));
    }
}
