//! Octocrab client construction for the activity gateway.

use http::Uri;
use octocrab::Octocrab;

use crate::github::error::ActivityError;
use crate::github::locator::{ApiBase, BasicCredentials};

use super::error_mapping::map_octocrab_error;

/// Octocrab-backed gateway for both the listing and statistics endpoints.
pub struct OctocrabActivityGateway {
    pub(super) client: Octocrab,
    pub(super) api_base: ApiBase,
}

impl OctocrabActivityGateway {
    /// Builds a Basic-Auth Octocrab client for the given API base.
    ///
    /// # Errors
    ///
    /// Returns [`ActivityError::InvalidUrl`] when the base URI cannot be
    /// parsed or [`ActivityError::Configuration`] when Octocrab rejects it.
    pub fn for_credentials(
        credentials: &BasicCredentials,
        api_base: &ApiBase,
    ) -> Result<Self, ActivityError> {
        let client = build_octocrab_client(credentials, api_base)?;
        Ok(Self {
            client,
            api_base: api_base.clone(),
        })
    }
}

fn build_octocrab_client(
    credentials: &BasicCredentials,
    api_base: &ApiBase,
) -> Result<Octocrab, ActivityError> {
    let base_uri: Uri = api_base
        .as_str()
        .parse::<Uri>()
        .map_err(|error| ActivityError::InvalidUrl(error.to_string()))?;

    Octocrab::builder()
        .basic_auth(
            credentials.username().to_owned(),
            credentials.token().value().to_owned(),
        )
        .base_uri(base_uri)
        .map_err(|error| ActivityError::Configuration {
            message: format!("build client failed: {error}"),
        })?
        .build()
        .map_err(|error| map_octocrab_error("build client", &error))
}
