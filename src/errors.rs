//! Error types for the health log
//!
//! Store errors are never fatal: the session turns them into warnings.
//! Everything else surfaces through `AppError` and ends up in `main`.

use thiserror::Error;

/// Failures of the in-memory record store
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Removing from a store that holds no records
    #[error("the record store is empty")]
    EmptyStore,

    /// Position outside `[0, len)`
    #[error("record index {index} out of range (store holds {len} records)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Crate-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration could not be read, parsed or validated
    #[error("Configuration error: {0}")]
    Config(String),

    /// Logging could not be set up
    #[error("Logging error: {0}")]
    Logging(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for health log operations
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_messages() {
        assert_eq!(StoreError::EmptyStore.to_string(), "the record store is empty");
        assert_eq!(
            StoreError::IndexOutOfRange { index: 3, len: 2 }.to_string(),
            "record index 3 out of range (store holds 2 records)"
        );
    }

    #[test]
    fn test_app_error_messages() {
        let err = AppError::Config("height_cm must be between 100 and 250".to_string());
        assert_eq!(err.to_string(), "Configuration error: height_cm must be between 100 and 250");

        let err: AppError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
