use thiserror::Error;

/// Top-level error type for the Parley bot.
#[derive(Debug, Error)]
pub enum ParleyError {
    /// The platform rejected the command set, or the registration call failed.
    /// Fatal at startup.
    #[error("command registration failed: {0}")]
    Registration(String),

    #[error("{service} API error: {message}")]
    RemoteApi { service: String, message: String },

    #[error("log delivery failed: {0}")]
    LoggingDelivery(String),

    #[error("malformed invocation: {0}")]
    MalformedInvocation(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ParleyError {
    pub fn remote(service: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RemoteApi {
            service: service.into(),
            message: message.into(),
        }
    }

    /// Whether this failure must abort startup rather than a single invocation.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Registration(_) | Self::Config(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_names_service() {
        let err = ParleyError::remote("grammar", "status 500");
        assert_eq!(err.to_string(), "grammar API error: status 500");
        assert!(!err.is_fatal());
    }

    #[test]
    fn registration_is_fatal() {
        assert!(ParleyError::Registration("duplicate name".into()).is_fatal());
        assert!(!ParleyError::LoggingDelivery("timeout".into()).is_fatal());
    }
}
