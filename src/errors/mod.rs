//! Error handling utilities for the diario crate.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the crate, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.
//!
//! Note that the public store operations (`EntryStore`, `CredentialGate`,
//! `KeygenStore` loads) do not surface these errors: they catch backend
//! failures and convert them into an empty result or a success flag, so that
//! a broken backend never crashes the calling view. `AppError` is what flows
//! through the internal plumbing and through the operations that do propagate
//! (configuration loading, backend setup, keygen saves).

use std::io;
use thiserror::Error;

/// Represents specific error cases that can occur when talking to the
/// key-value backend.
///
/// # Examples
///
/// ```
/// use diario::errors::StorageError;
///
/// let error = StorageError::Sqlite(rusqlite::Error::InvalidQuery);
/// assert!(format!("{}", error).contains("Backend error"));
/// ```
#[derive(Debug, Error)]
pub enum StorageError {
    /// SQLite error from the backing store.
    #[error("Backend error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// A stored document could not be serialized or deserialized.
    #[error("Malformed stored document: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Represents all possible errors that can occur in the diario crate.
///
/// This enum is the central error type used across the crate, with variants
/// for different error categories. It uses `thiserror` for deriving the
/// `Error` trait implementation and formatted error messages.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use diario::errors::AppError;
///
/// let error = AppError::Config("Data directory path is empty".to_string());
/// assert_eq!(
///     format!("{}", error),
///     "Configuration error: Data directory path is empty"
/// );
/// ```
///
/// Converting from an IO error:
/// ```
/// use diario::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Errors from the key-value backend or the documents stored in it.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use diario::errors::{AppError, AppResult};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Config("something went wrong".to_string()));
///     }
///     Ok("operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");

        let app_error: AppError = io_error.into();

        match app_error {
            AppError::Io(inner) => {
                assert_eq!(inner.kind(), io::ErrorKind::NotFound);
            }
            _ => panic!("Expected AppError::Io variant"),
        }
    }

    #[test]
    fn test_storage_error_conversion_to_app_error() {
        let storage_error = StorageError::Sqlite(rusqlite::Error::InvalidQuery);

        let app_error: AppError = storage_error.into();

        match app_error {
            AppError::Storage(StorageError::Sqlite(_)) => {}
            _ => panic!("Expected AppError::Storage variant"),
        }
    }

    #[test]
    fn test_app_error_display() {
        let config_error = AppError::Config("Invalid configuration".to_string());
        assert_eq!(
            format!("{}", config_error),
            "Configuration error: Invalid configuration"
        );

        let io_error = io::Error::new(io::ErrorKind::PermissionDenied, "permission denied");
        let app_io_error = AppError::Io(io_error);
        assert_eq!(format!("{}", app_io_error), "I/O error: permission denied");
    }

    #[test]
    fn test_storage_error_source_chaining() {
        use std::error::Error;

        let json_error = serde_json::from_str::<Vec<u8>>("not json").unwrap_err();
        let storage_error = StorageError::Serialization(json_error);
        let app_error = AppError::Storage(storage_error);

        // AppError -> StorageError -> serde_json::Error
        let first = app_error.source().expect("AppError should have a source");
        let storage = first
            .downcast_ref::<StorageError>()
            .expect("First source should be StorageError");
        assert!(storage.source().is_some());
    }

    #[test]
    fn test_error_display_prefixes() {
        let errors: Vec<(AppError, &str)> = vec![
            (AppError::Config("test".to_string()), "Configuration error: "),
            (AppError::Io(io::Error::other("test")), "I/O error: "),
            (
                AppError::Storage(StorageError::Sqlite(rusqlite::Error::InvalidQuery)),
                "Storage error: ",
            ),
        ];

        for (error, expected_prefix) in errors {
            let display = format!("{}", error);
            assert!(
                display.starts_with(expected_prefix),
                "Error display should start with prefix: {}",
                expected_prefix
            );
        }
    }
}
