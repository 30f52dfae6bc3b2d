//! repo-pulse ranks an organization's repositories by how many commits they
//! received over the last six months.
//!
//! The [`github`] module wraps Octocrab behind gateway traits for the
//! repository listing and commit statistics endpoints. The [`activity`]
//! module drives the collection pipeline: paginated listing with dynamic
//! fan-out, recency filtering, a backoff poller for statistics that GitHub
//! computes asynchronously, and the final ranking. [`config`] resolves
//! credentials and the API base from files, environment and flags.

pub mod activity;
pub mod config;
pub mod github;

pub use activity::{
    ActivityIntake, Clock, FixedClock, RankedRepository, RepositoryLister, StatsOrchestrator,
    StatsPoller, SystemClock, filter_recent, rank,
};
pub use config::RepoPulseConfig;
pub use github::{
    ActivityError, ActivityReport, ActivityWeek, ApiBase, BasicCredentials,
    OctocrabActivityGateway, OrganizationName, PersonalAccessToken, RepositoryFullName,
    RepositoryRecord,
};
