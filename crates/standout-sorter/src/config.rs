//! Serializable pipeline definitions.
//!
//! A sort can be described in YAML or JSON and compiled into a
//! [`Pipeline`]:
//!
//! ```yaml
//! steps:
//!   - dig: { path: [":user", "name"], indifferent: true }
//!   - call: { name: fetch, args: [tags], kwargs: { default: [] } }
//!   - fold: lower
//! direction: desc
//! nils: first
//! ```
//!
//! Path segments are strings or integers. A string with a leading `:` is a
//! symbol key (`":user"`), any other string is a textual key, and an
//! integer is a list index.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_yaml::with::singleton_map_recursive;

use crate::error::{Result, SortError};
use crate::ordering::{Dir, Nils};
use crate::pipeline::Pipeline;
use crate::step::{Case, Step};
use crate::traits::Args;
use crate::value::{Key, Value};

/// A complete sort description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Shaping steps, applied in order.
    #[serde(default)]
    pub steps: Vec<StepConfig>,
    /// Final direction.
    #[serde(default)]
    pub direction: Dir,
    /// Nil placement.
    #[serde(default)]
    pub nils: Nils,
}

impl PipelineConfig {
    /// Parses a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parses a configuration from YAML.
    ///
    /// Steps are single-key maps (`- fold: lower`), the same shape as JSON,
    /// rather than YAML tags.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml);
        Ok(singleton_map_recursive::deserialize(deserializer)?)
    }

    /// Parses and compiles a YAML configuration in one go.
    pub fn pipeline_from_yaml(yaml: &str) -> Result<Pipeline> {
        Self::from_yaml(yaml)?.try_into()
    }
}

/// One step of a [`PipelineConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepConfig {
    /// Walk a path of keys.
    Dig {
        path: Vec<SegmentConfig>,
        #[serde(default)]
        indifferent: bool,
    },
    /// Invoke a named operation.
    Call {
        name: String,
        #[serde(default)]
        args: Vec<serde_json::Value>,
        #[serde(default)]
        kwargs: BTreeMap<String, serde_json::Value>,
    },
    /// Fold text case.
    Fold(Case),
    /// Set nil placement.
    Nils(Nils),
    /// Set direction.
    Direction(Dir),
}

/// A path segment as written in configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SegmentConfig {
    Index(i64),
    Name(String),
}

impl From<SegmentConfig> for Key {
    fn from(segment: SegmentConfig) -> Self {
        match segment {
            SegmentConfig::Index(i) => Key::Int(i),
            SegmentConfig::Name(name) => match name.strip_prefix(':') {
                Some(sym) if !sym.is_empty() => Key::sym(sym),
                _ => Key::Str(name),
            },
        }
    }
}

impl TryFrom<StepConfig> for Step {
    type Error = SortError;

    fn try_from(config: StepConfig) -> Result<Self> {
        let step = match config {
            StepConfig::Dig { path, indifferent } => Step::dig(path, indifferent)?,
            StepConfig::Call { name, args, kwargs } => {
                let args = Args {
                    positional: args.iter().map(Value::from).collect(),
                    keyword: kwargs
                        .iter()
                        .map(|(k, v)| (k.clone(), Value::from(v)))
                        .collect(),
                };
                Step::call(name, args)?
            }
            StepConfig::Fold(case) => Step::Fold(case),
            StepConfig::Nils(nils) => Step::Nils(nils),
            StepConfig::Direction(dir) => Step::Direction(dir),
        };
        Ok(step)
    }
}

impl TryFrom<PipelineConfig> for Pipeline {
    type Error = SortError;

    fn try_from(config: PipelineConfig) -> Result<Self> {
        let mut pipeline = Pipeline::new();
        for step in config.steps {
            pipeline.add(step.try_into()?);
        }
        pipeline.add(Step::Direction(config.direction));
        pipeline.add(Step::Nils(config.nils));
        Ok(pipeline)
    }
}
