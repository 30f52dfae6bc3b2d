//! Commit activity ranking for each organization argument.

use std::io::{self, Write};
use std::sync::Arc;

use repo_pulse::github::{CommitActivityGateway, RepositoryPageGateway};
use repo_pulse::{
    ActivityError, ActivityIntake, ApiBase, BasicCredentials, Clock, OctocrabActivityGateway,
    OrganizationName, RepoPulseConfig, SystemClock,
};
use tracing::error;

use super::output::write_ranking;

/// Per-organization results of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Organizations whose ranking was written.
    pub succeeded: usize,
    /// Organizations that failed, in argument order.
    pub failed: Vec<String>,
}

impl RunSummary {
    /// Returns true when no organization failed.
    #[must_use]
    pub const fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Ranks every organization against GitHub and writes the reports to stdout.
///
/// # Errors
///
/// Returns an error when credentials or the API base cannot be resolved, or
/// when writing the report fails.
pub async fn run(
    config: &RepoPulseConfig,
    organizations: &[String],
) -> Result<RunSummary, ActivityError> {
    let mut stdout = io::stdout().lock();
    run_with_gateway_builder(
        config,
        organizations,
        OctocrabActivityGateway::for_credentials,
        Arc::new(SystemClock),
        &mut stdout,
    )
    .await
}

/// Ranks every organization using a custom gateway builder and clock.
///
/// A failing organization is logged as `Something went wrong: ...` and the
/// run moves on to the next one.
///
/// This function is exposed for testing with fake gateways.
pub async fn run_with_gateway_builder<G, F, W>(
    config: &RepoPulseConfig,
    organizations: &[String],
    build_gateway: F,
    clock: Arc<dyn Clock>,
    writer: &mut W,
) -> Result<RunSummary, ActivityError>
where
    G: RepositoryPageGateway + CommitActivityGateway + 'static,
    F: FnOnce(&BasicCredentials, &ApiBase) -> Result<G, ActivityError>,
    W: Write,
{
    let credentials = config.credentials()?;
    let api_base = config.api_base()?;
    let gateway = build_gateway(&credentials, &api_base)?;
    let intake = ActivityIntake::new(Arc::new(gateway), clock);

    let mut summary = RunSummary::default();
    for raw in organizations {
        let ranking = match OrganizationName::new(raw) {
            Ok(organization) => intake.rank_organization(&organization).await,
            Err(invalid) => Err(invalid),
        };
        match ranking {
            Ok(entries) => {
                write_ranking(writer, &entries)?;
                summary.succeeded += 1;
            }
            Err(failure) => {
                error!(organization = raw.as_str(), "Something went wrong: {failure}");
                summary.failed.push(raw.clone());
            }
        }
    }
    Ok(summary)
}
