//! Error types for storage access and configuration parsing.
//!
//! None of these escape to the page: the store facade and the startup code
//! log them and fall back to defaults.

/// Failure talking to the key-value backend or (de)serializing a value.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached at all (storage disabled, no window).
    #[error("key-value storage is unavailable")]
    Unavailable,
    #[error("failed to read `{key}`: {reason}")]
    Read { key: String, reason: String },
    /// Typically a quota error from the browser.
    #[error("failed to write `{key}`: {reason}")]
    Write { key: String, reason: String },
    #[error("failed to remove `{key}`: {reason}")]
    Remove { key: String, reason: String },
    #[error("failed to enumerate keys: {0}")]
    Keys(String),
    #[error("failed to encode value for `{key}`: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// The stored text is not valid JSON for the requested type.
    #[error("failed to decode value for `{key}`: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Page configuration could not be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
