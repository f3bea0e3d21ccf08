//! Merge errors.

use thiserror::Error;

/// MergeError represents a failure during a merge.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MergeError {
    /// A source mapping or sequence was reached again while it was still
    /// being merged. `path` locates the repeated reference in the source,
    /// e.g. `.a.b.c` or `.items[2]`.
    #[error("{path}: can not merge circular structures")]
    Circular { path: String },
}

impl MergeError {
    /// Creates a circular structure error.
    pub fn circular(path: impl Into<String>) -> Self {
        MergeError::Circular { path: path.into() }
    }

    /// Returns the location of the failure.
    pub fn path(&self) -> &str {
        match self {
            MergeError::Circular { path } => path,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_message() {
        let err = MergeError::circular(".a.c");
        assert_eq!(err.to_string(), ".a.c: can not merge circular structures");
        assert_eq!(err.path(), ".a.c");
    }
}
