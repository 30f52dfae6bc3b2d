//! Single-shot requests against the repository statistics endpoint.
//!
//! GitHub computes `commit_activity` in a background job. Until the job has
//! finished the endpoint answers `202 Accepted` with no data, so this module
//! only classifies one response; retrying is the poller's job.

use async_trait::async_trait;
use http::{StatusCode, Uri};

use crate::github::error::ActivityError;
use crate::github::locator::RepositoryFullName;
use crate::github::models::decode_activity_weeks;

use super::client::OctocrabActivityGateway;
use super::error_mapping::map_octocrab_error;
use super::{ActivityResponse, CommitActivityGateway};

const OPERATION: &str = "commit activity";

#[async_trait]
impl CommitActivityGateway for OctocrabActivityGateway {
    fn commit_activity_url(&self, repository: &RepositoryFullName) -> String {
        self.api_base.join_path(&repository.commit_activity_path())
    }

    async fn commit_activity(
        &self,
        repository: &RepositoryFullName,
    ) -> Result<ActivityResponse, ActivityError> {
        let uri: Uri = repository
            .commit_activity_path()
            .parse::<Uri>()
            .map_err(|error| ActivityError::InvalidUrl(error.to_string()))?;

        let response = self
            .client
            ._get(uri)
            .await
            .map_err(|error| map_octocrab_error(OPERATION, &error))?;

        match response.status() {
            StatusCode::OK => {
                let body = self
                    .client
                    .body_to_string(response)
                    .await
                    .map_err(|error| map_octocrab_error(OPERATION, &error))?;

                decode_activity_weeks(&body)
                    .map(ActivityResponse::Ready)
                    .map_err(|error| ActivityError::Decode {
                        message: format!(
                            "{error} for {url}",
                            url = self.commit_activity_url(repository)
                        ),
                    })
            }
            StatusCode::NO_CONTENT => Ok(ActivityResponse::Empty),
            StatusCode::FORBIDDEN => Ok(ActivityResponse::Forbidden),
            status => Ok(ActivityResponse::Pending(status.as_u16())),
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::OctocrabActivityGateway;
    use crate::github::error::ActivityError;
    use crate::github::gateway::{ActivityResponse, CommitActivityGateway};
    use crate::github::locator::{
        ApiBase, BasicCredentials, PersonalAccessToken, RepositoryFullName,
    };

    const STATS_PATH: &str = "/repos/acme/rockets/stats/commit_activity";
    const ENTERPRISE_ROOT: &str = "/api/v3";

    fn gateway_with_root(server: &MockServer, api_root: &str) -> OctocrabActivityGateway {
        let token = PersonalAccessToken::new("ghp_example").expect("token should be valid");
        let credentials =
            BasicCredentials::new("octocat", token).expect("credentials should be valid");
        let api_base = ApiBase::parse(&format!("{}{api_root}", server.uri()))
            .expect("server URI should parse");
        OctocrabActivityGateway::for_credentials(&credentials, &api_base)
            .expect("should create gateway")
    }

    fn gateway_for(server: &MockServer) -> OctocrabActivityGateway {
        gateway_with_root(server, "")
    }

    fn repository() -> RepositoryFullName {
        RepositoryFullName::parse("acme/rockets").expect("name should parse")
    }

    async fn respond_once(template: ResponseTemplate) -> Result<ActivityResponse, ActivityError> {
        let server = MockServer::start().await;
        let gateway = gateway_for(&server);

        Mock::given(method("GET"))
            .and(path(STATS_PATH))
            .and(header_exists("authorization"))
            .respond_with(template)
            .mount(&server)
            .await;

        gateway.commit_activity(&repository()).await
    }

    #[tokio::test]
    async fn ready_response_decodes_weeks() {
        let result = respond_once(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            { "total": 5, "week": 1_790_000_000_i64, "days": [1, 1, 1, 1, 1, 0, 0] },
            { "total": 3, "week": 1_790_604_800_i64, "days": [0, 0, 3, 0, 0, 0, 0] }
        ])))
        .await;

        let Ok(ActivityResponse::Ready(weeks)) = result else {
            panic!("expected Ready, got {result:?}");
        };
        let totals: Vec<u64> = weeks.iter().map(|week| week.commit_total).collect();
        assert_eq!(totals, vec![5, 3]);
    }

    #[rstest]
    #[case::computing(202, ActivityResponse::Pending(202))]
    #[case::empty(204, ActivityResponse::Empty)]
    #[case::forbidden(403, ActivityResponse::Forbidden)]
    #[case::not_found(404, ActivityResponse::Pending(404))]
    #[tokio::test]
    async fn statuses_are_classified(#[case] status: u16, #[case] expected: ActivityResponse) {
        let result = respond_once(ResponseTemplate::new(status)).await;
        assert_eq!(result, Ok(expected));
    }

    #[tokio::test]
    async fn enterprise_base_path_prefixes_the_request_and_url() {
        let server = MockServer::start().await;
        let gateway = gateway_with_root(&server, ENTERPRISE_ROOT);
        let enterprise_path = format!("{ENTERPRISE_ROOT}{STATS_PATH}");

        Mock::given(method("GET"))
            .and(path(enterprise_path.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "total": 4, "week": 1_790_000_000_i64 }
            ])))
            .expect(1)
            .mount(&server)
            .await;

        let result = gateway.commit_activity(&repository()).await;

        let Ok(ActivityResponse::Ready(weeks)) = result else {
            panic!("expected Ready, got {result:?}");
        };
        assert_eq!(weeks.len(), 1);
        assert_eq!(
            gateway.commit_activity_url(&repository()),
            format!("{}{enterprise_path}", server.uri())
        );
    }

    #[tokio::test]
    async fn malformed_ready_body_is_a_decode_error_naming_the_url() {
        let result = respond_once(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "unexpected": true })),
        )
        .await;

        match result {
            Err(ActivityError::Decode { message }) => assert!(
                message.contains(STATS_PATH),
                "expected URL in message, got `{message}`"
            ),
            other => panic!("expected Decode, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn unreachable_server_is_a_transport_error() {
        let server = MockServer::start().await;
        let gateway = gateway_for(&server);
        drop(server);

        let result = gateway.commit_activity(&repository()).await;

        assert!(
            matches!(result, Err(ActivityError::Transport { .. })),
            "expected Transport, got {result:?}"
        );
    }

    #[rstest]
    fn statistics_url_is_absolute() {
        let token = PersonalAccessToken::new("ghp_example").expect("token should be valid");
        let credentials =
            BasicCredentials::new("octocat", token).expect("credentials should be valid");
        let api_base = ApiBase::public().expect("public base should parse");
        let runtime = tokio::runtime::Runtime::new().expect("runtime should start");
        let gateway = {
            let _guard = runtime.enter();
            OctocrabActivityGateway::for_credentials(&credentials, &api_base)
                .expect("should create gateway")
        };

        assert_eq!(
            gateway.commit_activity_url(&repository()),
            "https://api.github.com/repos/acme/rockets/stats/commit_activity"
        );
    }
}
