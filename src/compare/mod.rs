//! Compare module - Structural equality and cycle probing.
//!
//! This module provides the deep equality used to de-duplicate sequence
//! elements during a merge, and a traversal that reports whether a value
//! reaches itself.

mod circular;
mod deep_equal;

pub use circular::*;
pub use deep_equal::*;
