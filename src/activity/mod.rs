//! The activity collection pipeline.
//!
//! Data flows one way: [`RepositoryLister`] gathers every repository of an
//! organization, [`filter_recent`] keeps those pushed inside the six-month
//! window, [`StatsOrchestrator`] polls each one's weekly statistics with a
//! [`StatsPoller`], and [`rank`] orders the resulting reports.
//! [`ActivityIntake`] runs the whole flow for one organization.

pub mod clock;
pub mod intake;
pub mod listing;
pub mod orchestrator;
pub mod poller;
pub mod ranking;
pub mod recency;
mod worker_pool;

pub use clock::{Clock, FixedClock, SystemClock, six_months_before};
pub use intake::ActivityIntake;
pub use listing::RepositoryLister;
pub use orchestrator::{STATS_POOL_WIDTH, StatsOrchestrator};
pub use poller::{
    BACKOFF_UNIT, BackoffSchedule, POLL_DEADLINE, PollOutcome, StatsPoller, summarise_weeks,
};
pub use ranking::{RankedRepository, rank};
pub use recency::filter_recent;
