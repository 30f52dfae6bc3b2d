//! Identity wrappers for organizations, repositories and credentials.

use url::Url;

use super::error::ActivityError;

const PUBLIC_API_BASE: &str = "https://api.github.com";

/// Organization login wrapper to avoid stringly typed parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationName(String);

impl OrganizationName {
    /// Validates an organization login.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidOrganization`] when the value is blank
    /// or contains a path separator.
    pub fn new(value: &str) -> Result<Self, ActivityError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.contains('/') {
            return Err(ActivityError::InvalidOrganization {
                value: value.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the organization login.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

/// Organization-qualified repository name such as `octo/hello-world`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryFullName(String);

impl RepositoryFullName {
    /// Parses an `owner/name` pair.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidRepositoryName`] unless the input has
    /// exactly one `/` with non-empty text on both sides.
    pub fn parse(value: &str) -> Result<Self, ActivityError> {
        let invalid = || ActivityError::InvalidRepositoryName {
            value: value.to_owned(),
        };
        let (owner, name) = value.split_once('/').ok_or_else(invalid)?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(invalid());
        }
        Ok(Self(value.to_owned()))
    }

    /// Returns the full `owner/name` string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the repository segment.
    #[must_use]
    pub fn name(&self) -> &str {
        self.0.split_once('/').map_or("", |(_, name)| name)
    }

    pub(crate) fn commit_activity_path(&self) -> String {
        format!("/repos/{}/stats/commit_activity", self.0)
    }
}

/// Personal access token wrapper enforcing presence.
#[derive(Clone, PartialEq, Eq)]
pub struct PersonalAccessToken(String);

impl PersonalAccessToken {
    /// Validates that the token is non-empty and trims whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::MissingCredentials`] when the supplied string
    /// is blank.
    pub fn new(token: impl AsRef<str>) -> Result<Self, ActivityError> {
        let trimmed = token.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ActivityError::MissingCredentials {
                variable: "GITHUB_TOKEN",
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the token value.
    #[must_use]
    pub const fn value(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for PersonalAccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PersonalAccessToken(****)")
    }
}

/// Username and token pair sent as HTTP Basic authentication.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    username: String,
    token: PersonalAccessToken,
}

impl BasicCredentials {
    /// Pairs a username with a token.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::MissingCredentials`] when the username is
    /// blank.
    pub fn new(
        username: impl AsRef<str>,
        token: PersonalAccessToken,
    ) -> Result<Self, ActivityError> {
        let trimmed = username.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ActivityError::MissingCredentials {
                variable: "GITHUB_USERNAME",
            });
        }
        Ok(Self {
            username: trimmed.to_owned(),
            token,
        })
    }

    /// Borrow the username.
    #[must_use]
    pub const fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Borrow the token.
    #[must_use]
    pub const fn token(&self) -> &PersonalAccessToken {
        &self.token
    }
}

/// Root URL of the REST API every request path is resolved against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiBase(Url);

impl ApiBase {
    /// The public `api.github.com` endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidUrl`] if the built-in URL fails to
    /// parse, which only happens if the `url` crate changes behaviour.
    pub fn public() -> Result<Self, ActivityError> {
        Self::parse(PUBLIC_API_BASE)
    }

    /// Uses an explicit API URL verbatim.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidUrl`] when the input is not an
    /// absolute URL with a host.
    pub fn parse(input: &str) -> Result<Self, ActivityError> {
        let parsed =
            Url::parse(input).map_err(|error| ActivityError::InvalidUrl(error.to_string()))?;
        if parsed.host_str().is_none() {
            return Err(ActivityError::InvalidUrl(
                "API URL must include a host".to_owned(),
            ));
        }
        Ok(Self(parsed))
    }

    /// Derives the API base for a web host.
    ///
    /// `github.com` maps to the public API; any other host is treated as a
    /// GitHub Enterprise Server exposing the API under `/api/v3`.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidUrl`] when the host cannot form a URL.
    pub fn for_host(host: &str) -> Result<Self, ActivityError> {
        let trimmed = host.trim().trim_end_matches('/');
        if trimmed.eq_ignore_ascii_case("github.com") {
            return Self::public();
        }

        let with_scheme = if trimmed.contains("://") {
            trimmed.to_owned()
        } else {
            format!("https://{trimmed}")
        };
        let mut api_url = Url::parse(&with_scheme)
            .map_err(|error| ActivityError::InvalidUrl(error.to_string()))?;
        if api_url.host_str().is_none() {
            return Err(ActivityError::InvalidUrl(
                "GitHub host must not be empty".to_owned(),
            ));
        }
        api_url.set_path("api/v3");
        Ok(Self(api_url))
    }

    /// Borrow the URL as a string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Joins an absolute API path (starting with `/`) onto the base.
    #[must_use]
    pub fn join_path(&self, path: &str) -> String {
        format!("{}{path}", self.0.as_str().trim_end_matches('/'))
    }
}
