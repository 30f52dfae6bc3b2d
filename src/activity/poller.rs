//! Statistics polling against an eventually consistent endpoint.
//!
//! GitHub computes commit statistics in a background job and answers 202
//! until the job finishes. Each poll is a small state machine: request,
//! classify the response, and either finish or back off and try again
//! until the deadline passes.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, warn};

use crate::activity::clock::{Clock, six_months_before};
use crate::github::error::ActivityError;
use crate::github::gateway::{ActivityResponse, CommitActivityGateway};
use crate::github::locator::RepositoryFullName;
use crate::github::models::{ActivityReport, ActivityWeek};

/// Wall-clock ceiling on retries for one repository.
pub const POLL_DEADLINE: Duration = Duration::from_secs(120);

/// Base delay doubled after every pending response.
pub const BACKOFF_UNIT: Duration = Duration::from_secs(1);

/// Terminal outcome of one statistics poll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome {
    /// Statistics were returned.
    Ready(Vec<ActivityWeek>),
    /// The repository has no commit history.
    Empty,
    /// The caller may not read this repository's statistics.
    Forbidden,
    /// The request never reached GitHub or the connection failed.
    TransportFailure(ActivityError),
    /// GitHub answered 200 with a body that could not be decoded.
    DecodeFailure(ActivityError),
    /// Statistics stayed pending until the deadline passed.
    TimedOut,
}

/// Result of classifying a single attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Step {
    Done(PollOutcome),
    Retry(u16),
}

impl Step {
    fn classify(response: Result<ActivityResponse, ActivityError>) -> Self {
        match response {
            Ok(ActivityResponse::Ready(weeks)) => Self::Done(PollOutcome::Ready(weeks)),
            Ok(ActivityResponse::Empty) => Self::Done(PollOutcome::Empty),
            Ok(ActivityResponse::Forbidden) => Self::Done(PollOutcome::Forbidden),
            Ok(ActivityResponse::Pending(status)) => Self::Retry(status),
            Err(error @ ActivityError::Decode { .. }) => {
                Self::Done(PollOutcome::DecodeFailure(error))
            }
            Err(error) => Self::Done(PollOutcome::TransportFailure(error)),
        }
    }
}

/// Exponential backoff bounded by a deadline.
///
/// The n-th delay is `unit * 2^n`. A delay that would run past the
/// deadline is shortened so one last attempt lands on the deadline itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffSchedule {
    started: Instant,
    deadline: Duration,
    unit: Duration,
    tries: u32,
}

impl BackoffSchedule {
    /// Starts a schedule whose clock begins at `started`.
    #[must_use]
    pub const fn new(started: Instant, deadline: Duration, unit: Duration) -> Self {
        Self {
            started,
            deadline,
            unit,
            tries: 0,
        }
    }

    /// Number of delays handed out so far.
    #[must_use]
    pub const fn tries(&self) -> u32 {
        self.tries
    }

    /// Returns the next delay, or `None` once the deadline has passed.
    pub fn next_delay(&mut self, now: Instant) -> Option<Duration> {
        let elapsed = now.saturating_duration_since(self.started);
        let remaining = self.deadline.checked_sub(elapsed).filter(|left| !left.is_zero())?;
        let delay = 2_u32
            .checked_pow(self.tries)
            .and_then(|factor| self.unit.checked_mul(factor))
            .map_or(remaining, |full| full.min(remaining));
        self.tries = self.tries.saturating_add(1);
        Some(delay)
    }
}

/// Polls one repository's statistics endpoint until a terminal state.
pub struct StatsPoller<G> {
    gateway: Arc<G>,
    clock: Arc<dyn Clock>,
    deadline: Duration,
    unit: Duration,
}

impl<G> StatsPoller<G>
where
    G: CommitActivityGateway,
{
    /// Creates a poller with the standard deadline and backoff unit.
    #[must_use]
    pub const fn new(gateway: Arc<G>, clock: Arc<dyn Clock>) -> Self {
        Self {
            gateway,
            clock,
            deadline: POLL_DEADLINE,
            unit: BACKOFF_UNIT,
        }
    }

    /// Drives the retry loop for `repository` to a terminal outcome.
    pub async fn poll_outcome(&self, repository: &RepositoryFullName) -> PollOutcome {
        let mut schedule = BackoffSchedule::new(Instant::now(), self.deadline, self.unit);
        loop {
            let response = self.gateway.commit_activity(repository).await;
            let status = match Step::classify(response) {
                Step::Done(outcome) => return outcome,
                Step::Retry(status) => status,
            };
            warn!(
                repository = repository.as_str(),
                status,
                attempt = schedule.tries().saturating_add(1),
                "(http {status}); retrying request"
            );
            let Some(delay) = schedule.next_delay(Instant::now()) else {
                return PollOutcome::TimedOut;
            };
            debug!(
                repository = repository.as_str(),
                delay_secs = delay.as_secs_f64(),
                "backing off"
            );
            tokio::time::sleep(delay).await;
        }
    }

    /// Polls `repository` and summarises the outcome as a report.
    ///
    /// Every outcome yields exactly one report; failures carry their error.
    pub async fn poll(&self, repository: &RepositoryFullName) -> ActivityReport {
        let url = self.gateway.commit_activity_url(repository);
        let owned = repository.clone();
        match self.poll_outcome(repository).await {
            PollOutcome::Ready(weeks) => {
                let summary = summarise_weeks(&weeks, self.clock.as_ref());
                ActivityReport::summarised(url.to_lowercase(), owned, summary)
            }
            PollOutcome::Empty | PollOutcome::Forbidden => {
                ActivityReport::summarised(url, owned, 0)
            }
            PollOutcome::TransportFailure(error) | PollOutcome::DecodeFailure(error) => {
                ActivityReport::failed(url, owned, error)
            }
            PollOutcome::TimedOut => {
                let error = ActivityError::Timeout {
                    url: url.clone(),
                    deadline_secs: self.deadline.as_secs(),
                };
                ActivityReport::failed(url, owned, error)
            }
        }
    }

    /// Report for a repository whose poll never produced a result.
    pub(crate) fn abandoned(&self, repository: RepositoryFullName) -> ActivityReport {
        let url = self.gateway.commit_activity_url(&repository);
        let error = ActivityError::PartialFetch {
            message: format!("statistics worker for {} stopped", repository.as_str()),
        };
        ActivityReport::failed(url, repository, error)
    }
}

/// Sums the commit totals of weeks starting inside the activity window.
#[must_use]
pub fn summarise_weeks(weeks: &[ActivityWeek], clock: &dyn Clock) -> u64 {
    let cutoff = six_months_before(clock.now());
    weeks
        .iter()
        .filter(|week| week.week_start > cutoff)
        .fold(0_u64, |sum, week| sum.saturating_add(week.commit_total))
}
