//! Crate-level error types.
//!
//! [`RatescopeError`] unifies the startup error sources (configuration,
//! terminal I/O, HTTP client construction, JSON) behind a single enum so
//! callers can match on the variant they care about while still using the
//! `?` operator for easy propagation.
//!
//! Errors raised while the UI is running are recovered closer to where
//! they happen: fetch failures become a [`FetchError`](crate::api::FetchError)
//! shown inline, and speech failures a
//! [`SpeechError`](crate::speech::SpeechError).

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RatescopeError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum RatescopeError {
    /// An environment variable was malformed or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// Terminal or file I/O failed.
    #[error("io error: {0}")]
    Io(String),

    /// The HTTP client could not be built or a request failed outright.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<std::io::Error> for RatescopeError {
    fn from(err: std::io::Error) -> Self {
        RatescopeError::Io(err.to_string())
    }
}
