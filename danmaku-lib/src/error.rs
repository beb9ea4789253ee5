use thiserror::Error;

/// Main error type for the danmaku library
#[derive(Error, Debug)]
pub enum DanmakuError {
    /// A caller-supplied date or hour filter could not be used
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),

    /// A standard I/O error while reading segment files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing decoded records to JSON failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, DanmakuError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_filter_message() {
        let err = DanmakuError::InvalidFilter("date \"2024-13-01\"".to_string());
        assert_eq!(err.to_string(), "Invalid filter: date \"2024-13-01\"");
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: DanmakuError = io.into();
        assert!(matches!(err, DanmakuError::Io(_)));
    }
}
