//! Error types for histogram binning and storage
//!
//! Provides a unified error type for all gridhist crates.
//!
//! Every variant is fatal to the offending call: the engine never retries a
//! failed operation, and buffered-fill replay is deliberate batching rather
//! than error recovery. Programming-contract violations (dereferencing a
//! finished cursor, direct indexing outside the declared shape) panic instead
//! of returning a variant, and are never silently clamped.

use thiserror::Error;

/// Core error type for histogram construction and filling
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed construction input (edge sequences, axis lists, shape vectors)
    #[error("Construction error: {0}")]
    Construction(String),

    /// Two lengths or shapes that must agree do not
    #[error("Shape mismatch in {context}: expected {expected}, got {actual}")]
    ShapeMismatch {
        expected: usize,
        actual: usize,
        context: String,
    },

    /// Stored element layout does not match the requested one
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Arena allocation failed or the requested capacity overflows
    #[error("Allocation error: {0}")]
    Allocation(String),

    /// Index validation failed on a fallible lookup path
    #[error("Indexing fault: {0}")]
    IndexingFault(String),

    /// A sample that cannot be binned (wrong arity, non-finite coordinate)
    #[error("Invalid sample: {0}")]
    InvalidSample(String),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Create an error for an edge sequence that is too short
    pub fn too_few_edges(required: usize, actual: usize, context: &str) -> Self {
        Self::Construction(format!(
            "{context} requires at least {required} edges, got {actual}"
        ))
    }

    /// Create an error for edges that are not strictly ascending
    pub fn edges_not_ascending(position: usize) -> Self {
        Self::Construction(format!(
            "edges must be strictly ascending, violation at position {position}"
        ))
    }

    /// Create an error for mismatched vector lengths
    pub fn shape_mismatch(expected: usize, actual: usize, context: &str) -> Self {
        Self::ShapeMismatch {
            expected,
            actual,
            context: context.to_string(),
        }
    }

    /// Create an error for a failed or overflowing allocation
    pub fn allocation(requested: usize, context: &str) -> Self {
        Self::Allocation(format!("{context}: {requested} elements"))
    }

    /// Create an error for a NaN or infinite sample coordinate
    pub fn non_finite(axis: usize) -> Self {
        Self::InvalidSample(format!("coordinate on axis {axis} is NaN or infinite"))
    }

    /// Create an error for an axis index outside the histogram
    pub fn axis_out_of_range(axis: usize, n_axes: usize) -> Self {
        Self::IndexingFault(format!("axis {axis} out of range for {n_axes} axes"))
    }
}
