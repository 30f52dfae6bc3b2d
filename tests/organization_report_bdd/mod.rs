//! Support modules for the organization report BDD tests.

pub(crate) mod domain;
pub(crate) mod state;

pub(crate) use domain::{CommitCount, EntryCount, MonthsAgo, PageCount, Position, StatusCode};
pub(crate) use state::{
    ReportState, SeededRepository, StatisticsReply, ensure_runtime_and_server, mount_organization,
    run_ranking,
};
