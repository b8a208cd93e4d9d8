//! Error types for the sorter crate.

use std::fmt;

use thiserror::Error;

/// Invalid arguments given to a step builder.
///
/// The builder records the first of these and the next terminal call
/// returns it wrapped in [`SortError::InvalidStep`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StepError {
    /// A dig step was given no path segments.
    #[error("dig requires at least one path segment")]
    EmptyPath,

    /// A call step was given an empty method name.
    #[error("call requires a non-empty method name")]
    EmptyMethodName,
}

/// Where an incomparable pair was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The pipeline has no extraction steps; the raw items were compared.
    RawItems,
    /// The values came out of the pipeline's extraction and transform steps.
    Derived,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::RawItems => write!(f, "no extraction configured"),
            Stage::Derived => write!(f, "after extraction"),
        }
    }
}

/// Errors that can occur when building or executing a sort.
#[derive(Debug, Error)]
pub enum SortError {
    /// A step was built from unusable arguments.
    #[error("invalid step: {0}")]
    InvalidStep(#[from] StepError),

    /// Two derived values have no defined relative order.
    #[error("comparison of {left_type} {left} with {right_type} {right} failed ({stage})")]
    Incomparable {
        left: String,
        left_type: &'static str,
        right: String,
        right_type: &'static str,
        stage: Stage,
    },

    /// Pipeline configuration could not be parsed as JSON.
    #[error("invalid pipeline config: {0}")]
    Json(#[from] serde_json::Error),

    /// Pipeline configuration could not be parsed as YAML.
    #[error("invalid pipeline config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type for sorter operations.
pub type Result<T> = std::result::Result<T, SortError>;
