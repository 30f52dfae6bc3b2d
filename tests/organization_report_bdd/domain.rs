//! Typed step placeholders for the organization report BDD tests.

use std::num::ParseIntError;
use std::str::FromStr;

macro_rules! count_newtype {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub(crate) struct $name($inner);

        impl $name {
            pub(crate) const fn value(self) -> $inner {
                self.0
            }
        }

        impl FromStr for $name {
            type Err = ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<$inner>().map(Self)
            }
        }
    };
}

count_newtype!(
    /// Commits made in the most recent week.
    CommitCount(u64)
);
count_newtype!(
    /// Number of lines in a ranking.
    EntryCount(usize)
);
count_newtype!(
    /// Whole months between the last push and now.
    MonthsAgo(u32)
);
count_newtype!(
    /// HTTP status code.
    StatusCode(u16)
);

/// Number of listing pages (at least one).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageCount(u32);

impl PageCount {
    pub(crate) const fn value(self) -> u32 {
        self.0
    }
}

impl FromStr for PageCount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<u32>().map_err(|error| error.to_string())?;
        if value == 0 {
            return Err("PageCount must be >= 1".to_owned());
        }
        Ok(Self(value))
    }
}

/// 1-based position within a ranking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Position(usize);

impl Position {
    pub(crate) const fn index(self) -> usize {
        self.0.saturating_sub(1)
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.parse::<usize>().map_err(|error| error.to_string())?;
        if value == 0 {
            return Err("Position must be >= 1".to_owned());
        }
        Ok(Self(value))
    }
}
