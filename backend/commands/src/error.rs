use parley_core::ParleyError;
use thiserror::Error;

/// Why an invocation ended in the generic failure reply.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Unknown command or parameters that do not match the declaration.
    #[error(transparent)]
    Invalid(#[from] ParleyError),

    #[error("{0:#}")]
    Handler(anyhow::Error),

    #[error("handler panicked: {0}")]
    Panicked(String),

    #[error("commands are not registered yet")]
    NotReady,
}

impl CommandError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Invalid(ParleyError::MalformedInvocation(message.into()))
    }
}
