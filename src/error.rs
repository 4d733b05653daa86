//! Error types for ganita

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Ganita error types
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// A decomposition pivot is zero or below the configured tolerance,
    /// so the linear system cannot be solved directly.
    #[error("singular matrix: |pivot| = {pivot_magnitude:e} is below tolerance {tolerance:e}")]
    SingularMatrix {
        /// Magnitude of the smallest offending pivot
        pivot_magnitude: f64,
        /// Tolerance the pivot was compared against
        tolerance: f64,
    },

    /// A geometric operation hit a degenerate configuration, such as
    /// normalizing a near-zero-length vector.
    #[error("degenerate geometry: length {length:e} is too close to zero")]
    DegenerateGeometry {
        /// Length of the offending vector
        length: f64,
    },

    /// A runtime-sized input does not match the fixed dimension.
    #[error("dimension mismatch: expected {expected} elements, got {actual}")]
    DimensionMismatch {
        /// Number of elements the fixed-dimension type requires
        expected: usize,
        /// Number of elements actually supplied
        actual: usize,
    },
}
