use thiserror::Error;

pub type Result<T> = std::result::Result<T, DiscoveryError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DiscoveryError {
    #[error("Invalid mood preset: {name}. Available: {available}")]
    InvalidPreset { name: String, available: String },

    #[error("Discovery level must be between 0 and 100, got {0}")]
    OutOfRangeDiscoveryLevel(i64),

    #[error("Upstream {operation} failed: {message}")]
    UpstreamFetchFailure {
        operation: &'static str,
        message: String,
    },
}

impl DiscoveryError {
    pub fn upstream(operation: &'static str, message: impl Into<String>) -> Self {
        Self::UpstreamFetchFailure {
            operation,
            message: message.into(),
        }
    }

    /// Precondition violations are the caller's fault and are never retried.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InvalidPreset { .. } | Self::OutOfRangeDiscoveryLevel(_)
        )
    }
}
