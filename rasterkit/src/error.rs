//! Error types for labeling, indexing and the elementwise helpers.

use thiserror::Error;

use crate::common::ShapeError;
use crate::sample::SampleType;

/// Input-contract violations. All of them are detected before a result is
/// returned; there are no partial results.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Shape mismatch for {context}: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        context: &'static str,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("{context} must be an image or image stack, got shape {shape:?}")]
    NotImage {
        context: &'static str,
        shape: Vec<usize>,
    },

    #[error("Arrays of rank {rank} are not supported, rank must be within {min}..={max}")]
    UnsupportedRank { rank: usize, min: usize, max: usize },

    #[error("Only integer sample types are supported, got {sample_type}")]
    NonIntegerType { sample_type: SampleType },

    #[error("Value range {min}..={max} needs {span} table entries, more than 32-bit addressing allows")]
    ValueRange { min: i128, max: i128, span: u128 },

    #[error("Failed to allocate {entries} entries for the {what}")]
    AllocationFailed { what: &'static str, entries: u64 },

    #[error("{count} elements exceed 32-bit addressing")]
    TooManyElements { count: u64 },

    #[error("Clump ids start at 1, got {0}")]
    InvalidClumpId(u32),

    #[error("Clump id space exhausted when labeling from start id {start_id}")]
    ClumpIdOverflow { start_id: u32 },

    #[error("Stacks must have the same number of layers: {first} != {second}")]
    LayerCountMismatch { first: usize, second: usize },

    #[error("{context} needs at least one input")]
    EmptyInput { context: &'static str },

    #[error(transparent)]
    Shape(#[from] ShapeError),
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_mismatch_error_message() {
        let err = Error::ShapeMismatch {
            context: "validity mask",
            expected: vec![3, 4],
            actual: vec![4, 3],
        };
        let msg = err.to_string();
        assert!(msg.contains("validity mask"));
        assert!(msg.contains("[3, 4]"));
        assert!(msg.contains("[4, 3]"));
    }

    #[test]
    fn test_non_integer_error_names_type() {
        let err = Error::NonIntegerType {
            sample_type: SampleType::F64,
        };
        assert_eq!(err.to_string(), "Only integer sample types are supported, got f64");
    }

    #[test]
    fn test_value_range_error_message() {
        let err = Error::ValueRange {
            min: 0,
            max: u32::MAX as i128,
            span: u32::MAX as u128 + 1,
        };
        let msg = err.to_string();
        assert!(msg.contains("4294967296"));
        assert!(msg.contains("32-bit"));
    }

    #[test]
    fn test_shape_error_is_transparent() {
        let shape_err = ShapeError::RankMismatch {
            expected: 2,
            actual: 3,
            shape: vec![1, 2, 3],
        };
        let err: Error = shape_err.clone().into();
        assert_eq!(err.to_string(), shape_err.to_string());
    }

    #[test]
    fn test_allocation_error_message() {
        let err = Error::AllocationFailed {
            what: "value histogram",
            entries: 42,
        };
        assert_eq!(
            err.to_string(),
            "Failed to allocate 42 entries for the value histogram"
        );
    }
}
