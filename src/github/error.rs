//! Error types exposed by the activity collection layer.

use thiserror::Error;

use super::rate_limit::RateLimitInfo;

/// Errors surfaced while configuring the client or talking to GitHub.
///
/// Pipeline stages that must not abort a batch (later listing pages and
/// individual statistics polls) store these values inside the record or
/// report they produced instead of returning them.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ActivityError {
    /// Networking failed before a response was received.
    #[error("network error talking to GitHub: {message}")]
    Transport {
        /// Transport-level error detail.
        message: String,
    },

    /// GitHub answered with a status the caller could not accept.
    #[error("{message}")]
    HttpStatus {
        /// Numeric HTTP status returned by GitHub.
        status: u16,
        /// Operation context and GitHub's message.
        message: String,
    },

    /// The response body did not match the expected JSON shape.
    #[error("decoding response failed: {message}")]
    Decode {
        /// Deserialisation error detail.
        message: String,
    },

    /// The statistics endpoint never became ready within the poll deadline.
    #[error("server ({url}) failed to respond after {deadline_secs}s")]
    Timeout {
        /// Statistics URL that was being polled.
        url: String,
        /// Deadline that elapsed, in seconds.
        deadline_secs: u64,
    },

    /// A single page or repository could not be fetched while the rest of
    /// the batch succeeded.
    #[error("partial fetch failed: {message}")]
    PartialFetch {
        /// Description of the item that failed.
        message: String,
    },

    /// GitHub rejected the listing request because the quota is exhausted.
    #[error("GitHub API rate limit exceeded: {message}")]
    RateLimitExceeded {
        /// Rate limit info if it could be fetched.
        rate_limit: Option<RateLimitInfo>,
        /// Error message from GitHub.
        message: String,
    },

    /// GitHub rejected the supplied credentials.
    #[error("GitHub rejected the credentials: {message}")]
    Authentication {
        /// GitHub error message returned with the 401 response.
        message: String,
    },

    /// The organization argument was blank or malformed.
    #[error("organization name is invalid: {value:?}")]
    InvalidOrganization {
        /// The rejected input.
        value: String,
    },

    /// A repository full name was not of the form `owner/name`.
    #[error("repository name must match owner/name: {value:?}")]
    InvalidRepositoryName {
        /// The rejected input.
        value: String,
    },

    /// An API URL or host could not be parsed.
    #[error("API URL is invalid: {0}")]
    InvalidUrl(String),

    /// A required credential was not supplied by any configuration source.
    #[error("missing credential: set {variable}")]
    MissingCredentials {
        /// Environment variable that would supply the credential.
        variable: &'static str,
    },

    /// Configuration could not be loaded.
    #[error("configuration error: {message}")]
    Configuration {
        /// Details about the configuration failure.
        message: String,
    },

    /// Writing the report failed.
    #[error("I/O error: {message}")]
    Io {
        /// Error detail from the underlying I/O operation.
        message: String,
    },
}
