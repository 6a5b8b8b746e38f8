//! Error types for the libclang bindings
//!
//! libclang reports failure through null handles and integer status codes.
//! Status codes surface here as enum values carrying the raw number, so codes
//! added by newer libclang releases are still reported faithfully.

use std::ffi::NulError;
use std::path::PathBuf;

use crate::config::ConfigError;
use crate::translation_unit::{ErrorCode, SaveError};

/// Errors raised by the binding layer
#[derive(Debug, thiserror::Error)]
pub enum ClangError {
    /// libclang could not be located or loaded
    #[error("Failed to load libclang: {0}")]
    LibraryLoad(String),

    /// A library guard is already alive on this thread
    #[error("libclang is already loaded on this thread")]
    AlreadyLoaded,

    /// Parsing a translation unit failed
    #[error("Failed to parse {path}: {code}")]
    Parse { path: PathBuf, code: ErrorCode },

    /// Reparsing a translation unit failed; the unit must be disposed
    #[error("Failed to reparse translation unit: {code}")]
    Reparse { code: ErrorCode },

    /// Saving a translation unit failed
    #[error("Failed to save translation unit to {path}: {code}")]
    Save { path: PathBuf, code: SaveError },

    /// libclang returned no completion results
    #[error("Code completion failed at {file}:{line}:{column}")]
    Completion {
        file: PathBuf,
        line: u32,
        column: u32,
    },

    /// Indexing stopped on an unrecoverable failure
    #[error("Indexing failed: {code}")]
    Indexing { code: ErrorCode },

    /// A string argument contained an interior NUL byte
    #[error("Argument contains an interior NUL byte: {0}")]
    InteriorNul(#[from] NulError),

    /// libclang only accepts UTF-8 paths through this binding
    #[error("Path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, ClangError>;

impl ClangError {
    /// Create a library load error with context
    pub fn library_load(reason: impl Into<String>) -> Self {
        Self::LibraryLoad(reason.into())
    }
}
