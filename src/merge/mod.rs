//! Merge module - Deep merge and deep copy of value trees.
//!
//! This module provides the recursive merge engine, its options, the
//! sequence strategies and the clone built on top of them.

mod array;
mod clone;
mod error;
mod guard;
mod merger;
mod options;


pub use array::*;
pub use clone::*;
pub use error::*;
pub use guard::*;
pub use merger::*;
pub use options::*;
