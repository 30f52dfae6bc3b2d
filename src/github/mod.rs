//! GitHub boundary: identities, models, errors and gateways.
//!
//! This module wraps Octocrab to list an organization's repositories and to
//! request per-repository commit statistics. Errors are mapped into
//! [`ActivityError`] variants so the pipeline can decide which failures abort
//! an organization and which are recorded against a single item.

pub mod error;
pub mod gateway;
pub mod locator;
pub mod models;
pub mod pagination;
pub mod rate_limit;

pub use error::ActivityError;
pub use gateway::{
    ActivityResponse, CommitActivityGateway, LISTING_PAGE_SIZE, OctocrabActivityGateway,
    RepositoryPage, RepositoryPageGateway,
};
pub use locator::{
    ApiBase, BasicCredentials, OrganizationName, PersonalAccessToken, RepositoryFullName,
};
pub use models::{ActivityReport, ActivityWeek, RepositoryRecord};
pub use pagination::PageInfo;
pub use rate_limit::RateLimitInfo;

#[cfg(test)]
pub use gateway::{MockCommitActivityGateway, MockRepositoryPageGateway};
