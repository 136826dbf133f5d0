//! Error types for the Nautilus pipeline

/// Result type alias using [`Error`]
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Main error type for the Nautilus pipeline
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Compressor construction rejected the requested level
    #[error("invalid compression level {level}, expected -1..=9")]
    CompressorInit {
        /// The rejected level
        level: i32,
    },

    /// I/O error from the underlying writer
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP error
    #[error("HTTP error: {0}")]
    Http(#[from] http::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in production)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Whether this error is recoverable by serving the response
    /// uncompressed instead of failing the request.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::CompressorInit { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compressor_init_message() {
        let err = Error::CompressorInit { level: 12 };
        assert_eq!(err.to_string(), "invalid compression level 12, expected -1..=9");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset by peer");
        let err = Error::from(io);
        assert!(matches!(err, Error::Io(_)));
        assert!(!err.is_recoverable());
    }
}
