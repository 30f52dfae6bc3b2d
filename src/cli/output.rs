//! Output formatting utilities for CLI operations.

use std::io::{self, Write};

use repo_pulse::{ActivityError, RankedRepository};

/// Writes one organization's ranking: a `Summary` heading, a divider, then
/// `name: commits` per repository in the given order.
pub fn write_ranking<W: Write>(
    writer: &mut W,
    ranking: &[RankedRepository],
) -> Result<(), ActivityError> {
    writeln!(writer).map_err(|e| io_error(&e))?;
    writeln!(writer, "Summary").map_err(|e| io_error(&e))?;
    writeln!(writer, "-------").map_err(|e| io_error(&e))?;

    for entry in ranking {
        writeln!(writer, "{}: {}", entry.name, entry.commit_summary).map_err(|e| io_error(&e))?;
    }

    writer.flush().map_err(|e| io_error(&e))
}

fn io_error(error: &io::Error) -> ActivityError {
    ActivityError::Io {
        message: error.to_string(),
    }
}
