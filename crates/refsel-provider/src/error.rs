//! Error types for provider calls.

use std::time::Duration;

use thiserror::Error;

/// Errors a provider call can report.
///
/// To the selector every variant is a fetch failure; the message is shown
/// inline and the session carries on.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The repository id is unknown to the provider.
    #[error("repository not found: {0}")]
    RepositoryNotFound(String),

    /// The branch, tag, or commit does not exist.
    #[error("ref not found: {0}")]
    RefNotFound(String),

    /// The backend could not serve the request.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// The call did not complete within the configured timeout.
    #[error("request timed out after {0:?}")]
    TimedOut(Duration),

    /// A repository fixture could not be read or is inconsistent.
    #[error("fixture error: {0}")]
    Fixture(String),

    /// I/O error while reading a fixture.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for provider operations.
pub type ProviderResult<T> = std::result::Result<T, ProviderError>;
