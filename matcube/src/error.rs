//! Error type for file-level MAT5 operations

pub use matcube_core::MatError;

/// Errors surfaced by the file-level API
///
/// Parse-level failures carry the [`MatError`] describing what was wrong
/// with the bytes; `VariableNotFound` means the scan completed without a
/// matrix matching the request.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed MAT5 data: {0}")]
    Format(#[from] MatError),
    #[error("variable not found")]
    VariableNotFound,
}

/// Result type for file-level MAT5 operations
pub type Result<T> = std::result::Result<T, Error>;
