use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Bridge operation failed: {0}")]
    OperationFailed(String),

    #[error("Operation timed out after {0:?}")]
    Timeout(Duration),
}

pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let failed = BridgeError::OperationFailed("connection refused".to_string());
        assert_eq!(failed.to_string(), "Bridge operation failed: connection refused");

        let timeout = BridgeError::Timeout(Duration::from_secs(10));
        assert_eq!(timeout.to_string(), "Operation timed out after 10s");
    }
}
