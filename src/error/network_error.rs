use thiserror::Error;

/// Errors raised while building, configuring, or evaluating a `Network`.
///
/// None of these are transient: they all indicate a caller supplied a shape
/// or a value that does not fit the network, so retrying is pointless.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("Invalid topology: {message}")]
    InvalidTopology { message: String },

    #[error("Dimension mismatch in {context}: expected {expected}, got {actual}")]
    DimensionMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("Allocation of {requested} parameters failed")]
    AllocationFailure { requested: usize },

    #[error("{what} index {index} out of range (len {len})")]
    IndexOutOfRange {
        what: &'static str,
        index: usize,
        len: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NetworkError {
    pub(crate) fn invalid_topology(message: impl Into<String>) -> Self {
        NetworkError::InvalidTopology { message: message.into() }
    }

    pub(crate) fn dimension_mismatch(
        context: impl Into<String>,
        expected: usize,
        actual: usize,
    ) -> Self {
        NetworkError::DimensionMismatch {
            context: context.into(),
            expected,
            actual,
        }
    }

    /// Returns `Ok(())` when `actual == expected`, otherwise a `DimensionMismatch`.
    pub(crate) fn check_len(context: &str, expected: usize, actual: usize) -> Result<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(NetworkError::dimension_mismatch(context, expected, actual))
        }
    }
}

pub type Result<T> = std::result::Result<T, NetworkError>;
