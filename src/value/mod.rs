//! Value module - In-memory representation of dynamically typed trees.
//!
//! This module provides the value model, its classifier and the equality
//! relations the merge engine builds on.

mod callable;
mod convert;
mod display;
mod object;
mod semantics;
mod special;
mod value;

pub use callable::*;
pub use convert::*;
pub use object::*;
pub use semantics::*;
pub use special::*;
pub use value::*;
