//! FetchState - Per-View Remote Data State

use std::sync::Arc;

/// Lifecycle of one view's remote data
///
/// `Idle → Loading → {Success, Failure}`, and back to `Loading` on any
/// dependency change.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState<T> {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A request for the current parameters is in flight
    Loading,
    /// Data for the current parameters
    Success(T),
    /// The request for the current parameters failed
    Failure(Arc<str>),
}

impl<T> FetchState<T> {
    /// Check if currently loading
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Check if loaded successfully
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    /// Check if there was an error
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Get the loaded data if any
    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success(data) => Some(data),
            _ => None,
        }
    }

    /// Get error message if any
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failure(reason) => Some(reason),
            _ => None,
        }
    }

    /// Short name of the variant, for logs
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Success(_) => "success",
            Self::Failure(_) => "failure",
        }
    }
}
