//! Persistence errors.

use std::path::PathBuf;

use thiserror::Error;

/// Failure reading or writing the high-score table.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Underlying file could not be read or written.
    #[error("high-score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Table could not be encoded.
    #[error("failed to encode high-score table: {0}")]
    Encode(#[source] bincode::Error),

    /// Stored bytes are not a valid table.
    #[error("corrupt high-score file {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = StoreError::Io {
            path: PathBuf::from("/tmp/scores.bin"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let text = err.to_string();
        assert!(text.contains("/tmp/scores.bin"));
        assert!(text.contains("denied"));
    }
}
