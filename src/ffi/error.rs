//! FFI Error Types

use std::path::PathBuf;

use thiserror::Error;

/// Error type for FFI operations
#[derive(Debug, Error)]
pub enum FfiError {
    /// Platform identifier has no shared-library naming convention
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    /// Failed to load a library
    #[error("Failed to load library '{}': {reason}", .path.display())]
    LoadError { path: PathBuf, reason: String },

    /// Failed to unload a library
    #[error("Failed to unload library '{}': {reason}", .path.display())]
    UnloadError { path: PathBuf, reason: String },

    /// Symbol not found in library
    #[error("Symbol '{symbol}' not found in '{}': {reason}", .library.display())]
    SymbolNotFound {
        symbol: String,
        library: PathBuf,
        reason: String,
    },

    /// Invalid symbol name
    #[error("Invalid symbol name: {0:?}")]
    InvalidSymbol(String),

    /// Declaration could not be parsed
    #[error("Invalid signature declaration: {0:?}")]
    InvalidSignature(String),

    /// Declared signature disagrees with the bound function type
    #[error("Signature mismatch for '{symbol}': declared `{declared}`, bound as `{bound}`")]
    SignatureMismatch {
        symbol: String,
        declared: String,
        bound: String,
    },

    /// Byte string cannot cross the boundary as a C string
    #[error("Invalid string argument: {0}")]
    InvalidString(String),
}

/// Result type for FFI operations.
pub type FfiResult<T> = Result<T, FfiError>;
