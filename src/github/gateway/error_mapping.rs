//! Error mapping helpers for the Octocrab gateway implementation.

use http::StatusCode;

use crate::github::error::ActivityError;

/// Checks if an octocrab error represents a network/transport issue.
const fn is_network_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Http { .. }
            | octocrab::Error::Hyper { .. }
            | octocrab::Error::Service { .. }
    )
}

/// Checks if an octocrab error came from deserialising a response body.
const fn is_decode_error(error: &octocrab::Error) -> bool {
    matches!(
        error,
        octocrab::Error::Json { .. } | octocrab::Error::Serde { .. }
    )
}

/// Checks whether the GitHub error represents a rate limit error based on the
/// HTTP status and message / documentation URL content.
pub(super) fn is_rate_limit_error(source: &octocrab::GitHubError) -> bool {
    let is_rate_limit_status = matches!(
        source.status_code,
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
    );

    let message_indicates_rate_limit = source.message.to_lowercase().contains("rate limit")
        || source
            .documentation_url
            .as_deref()
            .is_some_and(|url| url.contains("rate-limit"));

    is_rate_limit_status && message_indicates_rate_limit
}

pub(super) fn map_octocrab_error(operation: &str, error: &octocrab::Error) -> ActivityError {
    if let octocrab::Error::GitHub { source, .. } = error {
        return map_http_error(operation, source.status_code, &source.message);
    }

    if is_decode_error(error) {
        return ActivityError::Decode {
            message: format!("{operation} failed: {error}"),
        };
    }

    if is_network_error(error) {
        return ActivityError::Transport {
            message: format!("{operation} failed: {error}"),
        };
    }

    ActivityError::Transport {
        message: format!("{operation} could not be sent: {error}"),
    }
}

pub(super) fn map_http_error(operation: &str, status: StatusCode, message: &str) -> ActivityError {
    if status == StatusCode::UNAUTHORIZED {
        ActivityError::Authentication {
            message: format!("{operation} failed: GitHub returned {status} {message}"),
        }
    } else {
        ActivityError::HttpStatus {
            status: status.as_u16(),
            message: format!("{operation} failed with status {status}: {message}"),
        }
    }
}
