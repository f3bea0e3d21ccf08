//! Path module - Property paths and the operations driven by them.
//!
//! This module provides the path parser and get/set/pick/omit over value
//! trees.

mod access;
mod parser;

#[cfg(test)]
mod access_test;

pub use access::*;
pub use parser::*;
