//! Directory API error types.

/// Errors that can occur when querying the station directory.
///
/// Any of these ends the current command; the caller replies with a
/// fixed "unavailable" message and never retries.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// HTTP request failed (network error, timeout, etc.)
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned a non-success status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected `{"data": ...}` shape
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Base URL could not be used to build endpoint URLs
    #[error("invalid URL: {message}")]
    InvalidUrl { message: String },
}
