//! # Deep Merge
//!
//! Deep merge, deep clone, deep equality and path operations over dynamic
//! value trees.
//!
//! Values are nested mappings and sequences plus the built-in special
//! kinds (dates, patterns, binary buffers, typed arrays, keyed maps, sets,
//! errors and callables). Mappings, sequences, callables and errors are
//! shared references, so a tree may share subtrees or contain itself.
//!
//! ## Modules
//!
//! - [`value`] - The value model, its classifier and the JSON/YAML bridge
//! - [`compare`] - Deep equality and cycle detection
//! - [`merge`] - The recursive merge engine, sequence strategies and clone
//! - [`path`] - Path parsing and get/set/pick/omit
//!
//! ## Example
//!
//! ```
//! use deep_merge::{merge, value::from_json};
//!
//! let target = from_json(r#"{"a": [1, 2, 3], "x": {"y": "z"}}"#).unwrap();
//! let source = from_json(r#"{"a": [2, 3, 4], "x": {"w": 1}}"#).unwrap();
//! let merged = merge(target, &[source]).unwrap();
//! assert_eq!(
//!     merged,
//!     from_json(r#"{"a": [1, 2, 3, 4], "x": {"y": "z", "w": 1}}"#).unwrap()
//! );
//! ```

pub mod compare;
pub mod merge;
pub mod path;
pub mod value;

pub use compare::{deep_equal, is_circular};
pub use merge::{
    array_merge_concat, array_merge_union, clone, merge, merge_ext, merge_value, ArrayMerge,
    ArrayMergeFn, MergeError, MergeOptions, MergeOptionsBuilder, Merger,
};
pub use path::{get, get_or, omit, pick, set, split_path, split_props, IntoKeys, IntoProps};
pub use value::{
    Array, ErrorValue, Function, KeyedMap, Kind, Object, PatternError, Property, RegExp, Symbol,
    TypedArray, TypedArrayKind, Value, ValueSet,
};
