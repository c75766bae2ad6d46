use thiserror::Error;

/// Top-level error type for the EduCheck backend.
///
/// Most client code absorbs transport failures into fallback values instead
/// of propagating them; this type covers the places where a failure is
/// actually surfaced (validation, storage, configuration, the gateway).
#[derive(Debug, Error)]
pub enum EduCheckError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("transport error ({status}): {message}")]
    Transport { status: u16, message: String },

    #[error("request timed out after {0}s")]
    Timeout(u64),

    #[error("unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl EduCheckError {
    /// User-facing message for a non-2xx status from one of the remote
    /// collaborators. The gateway maps these onto its JSON error bodies.
    pub fn message_for_status(status: u16) -> &'static str {
        match status {
            413 => "Image file too large",
            429 => "Too many requests",
            s if s >= 500 => "Server error",
            408 => "Request timeout",
            _ => "API error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_message_mapping() {
        assert_eq!(EduCheckError::message_for_status(413), "Image file too large");
        assert_eq!(EduCheckError::message_for_status(429), "Too many requests");
        assert_eq!(EduCheckError::message_for_status(500), "Server error");
        assert_eq!(EduCheckError::message_for_status(503), "Server error");
        assert_eq!(EduCheckError::message_for_status(408), "Request timeout");
        assert_eq!(EduCheckError::message_for_status(404), "API error");
    }

    #[test]
    fn test_error_display() {
        let err = EduCheckError::Transport {
            status: 429,
            message: "rate limited".into(),
        };
        assert_eq!(err.to_string(), "transport error (429): rate limited");
    }
}
