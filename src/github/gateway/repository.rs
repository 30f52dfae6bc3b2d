//! Organization repository listing through Octocrab.

use async_trait::async_trait;
use chrono::Utc;
use octocrab::Page;

use crate::github::error::ActivityError;
use crate::github::locator::OrganizationName;
use crate::github::models::{ApiRepository, RepositoryRecord};
use crate::github::pagination::PageInfo;
use crate::github::rate_limit::RateLimitInfo;

use super::client::OctocrabActivityGateway;
use super::error_mapping::{is_rate_limit_error, map_octocrab_error};
use super::{LISTING_PAGE_SIZE, RepositoryPage, RepositoryPageGateway};

const OPERATION: &str = "list repositories";

#[async_trait]
impl RepositoryPageGateway for OctocrabActivityGateway {
    async fn repository_page(
        &self,
        organization: &OrganizationName,
        page: u32,
    ) -> Result<RepositoryPage, ActivityError> {
        if page == 0 {
            return Err(ActivityError::Configuration {
                message: "listing page must be at least 1".to_owned(),
            });
        }

        let page_str = page.to_string();
        let per_page_str = LISTING_PAGE_SIZE.to_string();
        let query_params = [
            ("sort", "pushed"),
            ("per_page", per_page_str.as_str()),
            ("page", page_str.as_str()),
        ];
        let path = format!("/orgs/{}/repos", organization.as_str());

        let page_result: Page<ApiRepository> =
            match self.client.get(path, Some(&query_params)).await {
                Ok(page_result) => page_result,
                Err(error) => {
                    return Err(self
                        .map_octocrab_error_with_rate_limit(OPERATION, &error)
                        .await);
                }
            };

        let page_info = PageInfo::new(page).with_last_page(page_result.number_of_pages());
        let records = page_result
            .items
            .into_iter()
            .map(RepositoryRecord::from)
            .collect();

        Ok(RepositoryPage { records, page_info })
    }
}

impl OctocrabActivityGateway {
    async fn map_octocrab_error_with_rate_limit(
        &self,
        operation: &str,
        error: &octocrab::Error,
    ) -> ActivityError {
        match error {
            octocrab::Error::GitHub { source, .. } if is_rate_limit_error(source) => {
                let rate_limit = self.fetch_rate_limit_info().await;
                let base_message =
                    format!("{operation} failed: {message}", message = source.message);
                let message = match &rate_limit {
                    Some(quota) => format!("{base_message}; {}", quota.describe(Utc::now())),
                    None => base_message,
                };

                ActivityError::RateLimitExceeded {
                    rate_limit,
                    message,
                }
            }
            _ => map_octocrab_error(operation, error),
        }
    }

    async fn fetch_rate_limit_info(&self) -> Option<RateLimitInfo> {
        let rate = self.client.ratelimit().get().await.ok()?.rate;
        let Ok(limit) = u32::try_from(rate.limit) else {
            return None;
        };
        let Ok(remaining) = u32::try_from(rate.remaining) else {
            return None;
        };
        Some(RateLimitInfo::new(limit, remaining, rate.reset))
    }
}
