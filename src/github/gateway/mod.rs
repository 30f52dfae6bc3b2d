//! Gateways for the organization listing and statistics endpoints.
//!
//! The pipeline talks to GitHub only through the traits defined here, so the
//! listing fan-out and the statistics poller can be exercised against mocks
//! while the Octocrab implementation handles real HTTP requests.

mod client;
mod commit_activity;
mod error_mapping;
mod repository;

pub use client::OctocrabActivityGateway;

use async_trait::async_trait;

use crate::github::error::ActivityError;
use crate::github::locator::{OrganizationName, RepositoryFullName};
use crate::github::models::{ActivityWeek, RepositoryRecord};
use crate::github::pagination::PageInfo;

/// Items per listing page requested from GitHub.
pub const LISTING_PAGE_SIZE: u8 = 100;

/// One decoded page of the organization repository listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryPage {
    /// Repositories on this page, in server order.
    pub records: Vec<RepositoryRecord>,
    /// Where this page sits in the listing.
    pub page_info: PageInfo,
}

/// Classification of a single `commit_activity` response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActivityResponse {
    /// 200: the statistics job has finished.
    Ready(Vec<ActivityWeek>),
    /// 204: the repository has no commit history.
    Empty,
    /// 403: the caller may not read this repository's statistics.
    Forbidden,
    /// Any other status, including 202 while GitHub computes the data.
    Pending(u16),
}

/// Fetches single pages of an organization's repository listing.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RepositoryPageGateway: Send + Sync {
    /// Fetch `page` (1-based) of the listing sorted by last push.
    async fn repository_page(
        &self,
        organization: &OrganizationName,
        page: u32,
    ) -> Result<RepositoryPage, ActivityError>;
}

/// Issues one request against a repository's statistics endpoint.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommitActivityGateway: Send + Sync {
    /// Absolute URL of the statistics endpoint for `repository`.
    fn commit_activity_url(&self, repository: &RepositoryFullName) -> String;

    /// Request the weekly commit activity once, without retrying.
    async fn commit_activity(
        &self,
        repository: &RepositoryFullName,
    ) -> Result<ActivityResponse, ActivityError>;
}
