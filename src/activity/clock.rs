//! Wall-clock capability and the six-month activity window.

use chrono::{DateTime, Months, Utc};

/// Length of the activity window in calendar months.
pub const ACTIVITY_WINDOW_MONTHS: u32 = 6;

/// Source of the current UTC time.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Clock backed by the system time.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock that always reports the same instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(DateTime<Utc>);

impl FixedClock {
    /// Creates a clock frozen at `now`.
    #[must_use]
    pub const fn new(now: DateTime<Utc>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Start of the activity window ending at `now`.
///
/// Month arithmetic clamps to the last valid day, so 31 August maps to the
/// last day of February.
#[must_use]
pub fn six_months_before(now: DateTime<Utc>) -> DateTime<Utc> {
    now.checked_sub_months(Months::new(ACTIVITY_WINDOW_MONTHS))
        .unwrap_or(DateTime::<Utc>::MIN_UTC)
}
