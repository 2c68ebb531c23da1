use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    /// Malformed or out-of-domain input, the batch is aborted.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("No viable strategy: {}", .failures.join("; "))]
    NoViableStrategy { failures: Vec<String> },
}

impl DispatchError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        DispatchError::InvalidArgument(message.into())
    }
}
