// ─────────────────────────────────────────────────────────────────────
// Lorenz-96 Multiscale — Error Hierarchy
// ─────────────────────────────────────────────────────────────────────

use thiserror::Error;

/// Root error type for all Lorenz-96 failures.
///
/// RHS evaluation itself never fails; these errors are raised at
/// construction time and at the outer edges (drivers, bindings).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum L96Error {
    /// Model descriptor built from a non-positive K or J.
    #[error("invalid model descriptor: {0}")]
    InvalidDescriptor(String),

    /// Buffer length does not match the model's state length.
    #[error("shape mismatch: expected length {expected}, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// Invalid driver input (step size, save cadence).
    #[error("validation error: {0}")]
    Validation(String),
}

pub type L96Result<T> = Result<T, L96Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape_message() {
        let e = L96Error::Shape {
            expected: 56,
            actual: 48,
        };
        assert_eq!(e.to_string(), "shape mismatch: expected length 56, got 48");
    }

    #[test]
    fn test_descriptor_message() {
        let e = L96Error::InvalidDescriptor("K must be >= 1, got 0".into());
        assert!(e.to_string().starts_with("invalid model descriptor"));
    }
}
