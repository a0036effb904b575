//! Error types for the Sales Dashboard
//!
//! Centralized error handling using snafu for ergonomic error definitions.
//! Fetch errors (`Transport`, `Server`, `Parse`) are collapsed into a
//! `FetchState::Failure` reason at the view boundary.

use snafu::Snafu;

/// Main error type for the application
#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    /// Invalid input or configuration
    #[snafu(display("Invalid: {message}"))]
    Invalid { message: String },

    /// Network unreachable, connection reset or request timed out
    #[snafu(display("network error: {source}"))]
    Transport { source: reqwest::Error },

    /// Remote service answered with a non-success status
    #[snafu(display("server responded with {status}"))]
    Server { status: reqwest::StatusCode },

    /// Response body could not be decoded
    #[snafu(display("malformed response: {message}"))]
    Parse { message: String },

    /// IO error (file operations)
    #[snafu(display("IO error: {source}"))]
    Io { source: std::io::Error },

    /// TOML deserialization error
    #[snafu(display("TOML parse error: {source}"))]
    TomlDe { source: toml::de::Error },

    /// TOML serialization error
    #[snafu(display("TOML serialize error: {source}"))]
    TomlSe { source: toml::ser::Error },

    /// Async runtime could not be started
    #[snafu(display("Runtime error: {message}"))]
    Runtime { message: String },
}

impl Error {
    /// Whether this error came from a remote fetch (as opposed to local setup)
    pub fn is_fetch_error(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. } | Error::Server { .. } | Error::Parse { .. }
        )
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Error::Io { source }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Error::Parse {
            message: source.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(source: toml::de::Error) -> Self {
        Error::TomlDe { source }
    }
}

impl From<toml::ser::Error> for Error {
    fn from(source: toml::ser::Error) -> Self {
        Error::TomlSe { source }
    }
}

/// Result type alias for convenience
pub type Result<T, E = Error> = std::result::Result<T, E>;
