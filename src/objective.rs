// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Learning objectives recorded in XGBoost model artifacts.
//!
//! The objective decides how raw tree margins become class labels, so the
//! model refuses to load anything it cannot turn into a classification.

use std::fmt;
use std::str::FromStr;

/// Classification objectives supported by the booster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Objective {
    /// Logistic regression for binary classification, outputs probability.
    #[default]
    BinaryLogistic,
    /// Logistic regression for binary classification, outputs raw margin.
    BinaryLogitRaw,
    /// Hinge loss for binary classification, outputs 0 or 1.
    BinaryHinge,
    /// Softmax over classes, outputs per-class probabilities.
    MultiSoftprob,
    /// Softmax over classes, outputs the class index.
    MultiSoftmax,
}

impl Objective {
    /// Returns the name used in the XGBoost JSON model.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BinaryLogistic => "binary:logistic",
            Self::BinaryLogitRaw => "binary:logitraw",
            Self::BinaryHinge => "binary:hinge",
            Self::MultiSoftprob => "multi:softprob",
            Self::MultiSoftmax => "multi:softmax",
        }
    }

    /// Returns whether this objective separates exactly two classes.
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(
            self,
            Self::BinaryLogistic | Self::BinaryLogitRaw | Self::BinaryHinge
        )
    }

    /// Returns whether this objective produces one margin per class.
    #[must_use]
    pub const fn is_multiclass(&self) -> bool {
        matches!(self, Self::MultiSoftprob | Self::MultiSoftmax)
    }

    /// Returns whether `base_score` is stored as a probability and must be
    /// converted with the logit before it is added to tree outputs.
    #[must_use]
    pub const fn base_score_is_probability(&self) -> bool {
        matches!(self, Self::BinaryLogistic | Self::BinaryLogitRaw)
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Objective {
    type Err = ObjectiveParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "binary:logistic" => Ok(Self::BinaryLogistic),
            "binary:logitraw" => Ok(Self::BinaryLogitRaw),
            "binary:hinge" => Ok(Self::BinaryHinge),
            "multi:softprob" => Ok(Self::MultiSoftprob),
            "multi:softmax" => Ok(Self::MultiSoftmax),
            _ => Err(ObjectiveParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an unsupported objective string.
#[derive(Debug, Clone)]
pub struct ObjectiveParseError(String);

impl fmt::Display for ObjectiveParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported objective '{}', expected one of: binary:logistic, binary:logitraw, binary:hinge, multi:softprob, multi:softmax",
            self.0
        )
    }
}

impl std::error::Error for ObjectiveParseError {}
