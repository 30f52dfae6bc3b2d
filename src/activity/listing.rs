//! Full organization listing with dynamic page fan-out.
//!
//! Page 1 is fetched first because only its `Link` header reveals how many
//! pages exist. The remaining pages are then fetched by one worker each.

use std::sync::Arc;

use tracing::debug;

use crate::activity::worker_pool::run_pool;
use crate::github::error::ActivityError;
use crate::github::gateway::RepositoryPageGateway;
use crate::github::locator::OrganizationName;
use crate::github::models::RepositoryRecord;

/// Collects every repository record of an organization.
#[derive(Debug)]
pub struct RepositoryLister<G> {
    gateway: Arc<G>,
}

impl<G> RepositoryLister<G>
where
    G: RepositoryPageGateway + 'static,
{
    /// Creates a lister over the given page gateway.
    #[must_use]
    pub const fn new(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Lists all repositories of `organization`.
    ///
    /// Records within a page keep server order. Pages after the first are
    /// appended in completion order. A later page that fails contributes a
    /// single placeholder record carrying [`ActivityError::PartialFetch`].
    ///
    /// # Errors
    ///
    /// Returns the gateway error when page 1 cannot be fetched or decoded.
    pub async fn list(
        &self,
        organization: &OrganizationName,
    ) -> Result<Vec<RepositoryRecord>, ActivityError> {
        let first = self.gateway.repository_page(organization, 1).await?;
        let mut records = first.records;
        let remaining: Vec<u32> = first.page_info.remaining_pages().collect();
        if remaining.is_empty() {
            return Ok(records);
        }

        debug!(
            organization = organization.as_str(),
            pages = remaining.len(),
            "fetching remaining listing pages"
        );
        let gateway = Arc::clone(&self.gateway);
        let owner = organization.clone();
        let pages = run_pool(remaining.len(), remaining, move |page| {
            let page_gateway = Arc::clone(&gateway);
            let page_owner = owner.clone();
            async move { fetch_page_records(page_gateway.as_ref(), &page_owner, page).await }
        })
        .await;

        for page_records in pages {
            records.extend(page_records);
        }
        Ok(records)
    }
}

async fn fetch_page_records<G>(
    gateway: &G,
    organization: &OrganizationName,
    page: u32,
) -> Vec<RepositoryRecord>
where
    G: RepositoryPageGateway + ?Sized,
{
    match gateway.repository_page(organization, page).await {
        Ok(repository_page) => repository_page.records,
        Err(error) => vec![RepositoryRecord::failed(ActivityError::PartialFetch {
            message: format!(
                "repository page {page} of {}: {error}",
                organization.as_str()
            ),
        })],
    }
}
