//! Error types for simq

use thiserror::Error;

/// Main error type for simq
#[derive(Error, Debug)]
pub enum SimqError {
    /// Configuration error (missing or malformed host list or config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Malformed test matrix file
    #[error("Matrix error: {0}")]
    Matrix(String),

    /// Remote launch could not be started
    #[error("Launch error: {0}")]
    Launch(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for simq operations
pub type SimqResult<T> = Result<T, SimqError>;

impl From<toml::de::Error> for SimqError {
    fn from(err: toml::de::Error) -> Self {
        SimqError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SimqError::Config("bad host line".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad host line");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: SimqError = io_err.into();
        assert!(matches!(err, SimqError::Io(_)));
    }
}
