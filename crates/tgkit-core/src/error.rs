use thiserror::Error;

/// Top-level error type for tgkit.
#[derive(Debug, Error)]
pub enum TgError {
    /// The server answered with `ok: false`.
    #[error("api error {error_code}: {description}")]
    Api {
        description: String,
        /// Numeric code reported by the server (0 when absent).
        error_code: i64,
    },

    /// Network failure or a response body that is not JSON.
    #[error("transport error: {0}")]
    Transport(String),

    /// The `result` field did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TgError {
    /// The server's numeric error code, if this is an application-level rejection.
    pub fn error_code(&self) -> Option<i64> {
        match self {
            Self::Api { error_code, .. } => Some(*error_code),
            _ => None,
        }
    }
}
