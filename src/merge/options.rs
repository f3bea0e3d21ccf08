//! Merge configuration.

use super::{MergeError, Merger};
use crate::value::{Array, Value};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;

/// Signature of a caller-provided sequence strategy.
///
/// Receives the active merger (for recursive merges and clones sharing the
/// same visited set), the target sequence and the source sequence, and
/// returns the merged value.
pub type ArrayMergeFn = dyn Fn(&mut Merger<'_>, Array, &Array) -> Result<Value, MergeError>;

/// ArrayMerge selects how two sequences combine.
#[derive(Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayMerge {
    /// Append source elements not already present in target, compared by
    /// deep equality. Mutates and returns the target sequence.
    #[default]
    Union,
    /// Build a new sequence of clones of target's then source's elements.
    Concat,
    /// Delegate to a caller function.
    #[serde(skip)]
    Custom(Rc<ArrayMergeFn>),
}

impl ArrayMerge {
    /// Wraps a closure as a custom strategy.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(&mut Merger<'_>, Array, &Array) -> Result<Value, MergeError> + 'static,
    {
        ArrayMerge::Custom(Rc::new(f))
    }
}

impl fmt::Debug for ArrayMerge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArrayMerge::Union => f.write_str("Union"),
            ArrayMerge::Concat => f.write_str("Concat"),
            ArrayMerge::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// MergeOptions controls a merge.
///
/// Deserializes from a camelCase record; missing fields take their
/// defaults:
///
/// ```json
/// { "ignoreNull": true, "ignoreCircular": false, "arrayMerge": "concat" }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MergeOptions {
    /// Treat a `Null` source as a no-op instead of an overwrite.
    pub ignore_null: bool,
    /// Leave a repeated source subtree unmerged instead of failing.
    pub ignore_circular: bool,
    pub array_merge: ArrayMerge,
}

impl MergeOptions {
    /// Creates a new MergeOptionsBuilder.
    pub fn builder() -> MergeOptionsBuilder {
        MergeOptionsBuilder::new()
    }

    /// Parses options from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parses options from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }
}

/// MergeOptionsBuilder builds [`MergeOptions`].
#[derive(Debug, Default)]
pub struct MergeOptionsBuilder {
    options: MergeOptions,
}

impl MergeOptionsBuilder {
    /// Creates a new MergeOptionsBuilder with default options.
    pub fn new() -> Self {
        MergeOptionsBuilder::default()
    }

    /// Sets whether a `Null` source is ignored.
    pub fn ignore_null(mut self, value: bool) -> Self {
        self.options.ignore_null = value;
        self
    }

    /// Sets whether circular sources are skipped instead of rejected.
    pub fn ignore_circular(mut self, value: bool) -> Self {
        self.options.ignore_circular = value;
        self
    }

    /// Sets the sequence strategy.
    pub fn array_merge(mut self, strategy: ArrayMerge) -> Self {
        self.options.array_merge = strategy;
        self
    }

    /// Builds the MergeOptions.
    pub fn build(self) -> MergeOptions {
        self.options
    }
}
