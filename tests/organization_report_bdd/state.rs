//! Scenario state, mock server wiring and pipeline invocation for the
//! organization report BDD tests.

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use repo_pulse::{
    ActivityError, ActivityIntake, ApiBase, BasicCredentials, FixedClock,
    OctocrabActivityGateway, OrganizationName, PersonalAccessToken, RankedRepository,
};
use rstest_bdd::Slot;
use rstest_bdd_macros::ScenarioState;
use serde_json::{Value, json};
use tokio::runtime::Runtime;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Commits placed in a week well outside the six-month window for every
/// repository; they must never show up in a ranking.
const ANCIENT_COMMITS: u64 = 99;

/// Shared runtime wrapper that can be stored in an rstest-bdd Slot.
#[derive(Clone)]
pub(crate) struct SharedRuntime(Rc<RefCell<Runtime>>);

impl SharedRuntime {
    fn new(runtime: Runtime) -> Self {
        Self(Rc::new(RefCell::new(runtime)))
    }

    pub(crate) fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
        self.0.borrow().block_on(future)
    }
}

/// How the statistics endpoint answers for one repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StatisticsReply {
    Commits(u64),
    Forbidden,
    Empty,
}

/// One repository seeded into the mock organization.
#[derive(Debug, Clone)]
pub(crate) struct SeededRepository {
    pub(crate) name: String,
    pub(crate) months_ago: u32,
    pub(crate) statistics: StatisticsReply,
}

#[derive(ScenarioState, Default)]
pub(crate) struct ReportState {
    pub(crate) runtime: Slot<SharedRuntime>,
    pub(crate) server: Slot<MockServer>,
    pub(crate) organization: Slot<String>,
    pub(crate) pages: Slot<u32>,
    pub(crate) repositories: Slot<Vec<SeededRepository>>,
    pub(crate) missing: Slot<bool>,
    pub(crate) result: Slot<Vec<RankedRepository>>,
    pub(crate) error: Slot<ActivityError>,
}

/// The instant every scenario treats as "now".
pub(crate) fn reference_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 16, 12, 0, 0)
        .single()
        .unwrap_or_else(|| panic!("reference date must be valid"))
}

/// Ensures the runtime and server are initialised in `ReportState`.
pub(crate) fn ensure_runtime_and_server(state: &ReportState) -> SharedRuntime {
    if state.runtime.with_ref(|_| ()).is_none() {
        let runtime = Runtime::new()
            .unwrap_or_else(|error| panic!("failed to create Tokio runtime: {error}"));
        state.runtime.set(SharedRuntime::new(runtime));
    }

    let shared_runtime = state
        .runtime
        .get()
        .unwrap_or_else(|| panic!("runtime not initialised after set"));

    if state.server.with_ref(|_| ()).is_none() {
        state.server.set(shared_runtime.block_on(MockServer::start()));
    }

    shared_runtime
}

/// Mounts the listing pages and statistics endpoints described by `state`.
pub(crate) fn mount_organization(state: &ReportState, runtime: &SharedRuntime) {
    let organization = state
        .organization
        .get()
        .unwrap_or_else(|| panic!("organization not set"));
    let server_uri = state
        .server
        .with_ref(MockServer::uri)
        .unwrap_or_else(|| panic!("mock server URL missing"));
    let repos_path = format!("/orgs/{organization}/repos");

    if state.missing.get().unwrap_or(false) {
        let not_found = ResponseTemplate::new(404).set_body_json(json!({
            "message": "Not Found",
            "documentation_url": "https://docs.github.com/rest/repos/repos"
        }));
        mount(
            state,
            runtime,
            Mock::given(method("GET"))
                .and(path(repos_path))
                .respond_with(not_found),
        );
        return;
    }

    let repositories = state.repositories.get().unwrap_or_default();
    let pages = state.pages.get().unwrap_or(1);
    let page_slots = usize::try_from(pages).unwrap_or(1);
    let per_page = repositories.len().div_ceil(page_slots).max(1);
    let mut chunks = repositories.chunks(per_page);

    for page in 1..=pages {
        let items: Vec<Value> = chunks
            .next()
            .unwrap_or_default()
            .iter()
            .map(|repository| listing_entry(&organization, repository))
            .collect();
        let mut response = ResponseTemplate::new(200).set_body_json(items);
        if pages > 1 {
            response = response.insert_header(
                "Link",
                format!(
                    "<{server_uri}{repos_path}?sort=pushed&per_page=100&page={pages}>; rel=\"last\""
                ),
            );
        }
        let mock = Mock::given(method("GET"))
            .and(path(repos_path.clone()))
            .and(query_param("sort", "pushed"))
            .and(query_param("page", page.to_string()))
            .respond_with(response);
        mount(state, runtime, mock);
    }

    for repository in &repositories {
        let stats_path = format!(
            "/repos/{organization}/{}/stats/commit_activity",
            repository.name
        );
        let response = match repository.statistics {
            StatisticsReply::Commits(total) => {
                ResponseTemplate::new(200).set_body_json(activity_weeks(total))
            }
            StatisticsReply::Forbidden => ResponseTemplate::new(403)
                .set_body_json(json!({"message": "Repository access blocked"})),
            StatisticsReply::Empty => ResponseTemplate::new(204),
        };
        mount(
            state,
            runtime,
            Mock::given(method("GET")).and(path(stats_path)).respond_with(response),
        );
    }
}

fn mount(state: &ReportState, runtime: &SharedRuntime, mock: Mock) {
    state
        .server
        .with_ref(|server| {
            runtime.block_on(mock.mount(server));
        })
        .unwrap_or_else(|| panic!("mock server not initialised"));
}

fn listing_entry(organization: &str, repository: &SeededRepository) -> Value {
    let pushed_at = reference_now()
        .checked_sub_months(Months::new(repository.months_ago))
        .unwrap_or_else(|| panic!("push date out of range"));
    json!({
        "full_name": format!("{organization}/{}", repository.name),
        "pushed_at": pushed_at.to_rfc3339(),
    })
}

fn activity_weeks(recent_total: u64) -> Value {
    let ancient_week = reference_now() - Duration::days(300);
    let recent_week = reference_now() - Duration::days(7);
    json!([
        {"total": ANCIENT_COMMITS, "week": ancient_week.timestamp()},
        {"total": recent_total, "week": recent_week.timestamp()},
    ])
}

/// Runs the full pipeline against the mock server.
pub(crate) fn run_ranking(state: &ReportState) -> Result<Vec<RankedRepository>, ActivityError> {
    let runtime = state.runtime.get().ok_or_else(|| ActivityError::Configuration {
        message: "runtime not initialised".to_owned(),
    })?;
    let server_uri = state
        .server
        .with_ref(MockServer::uri)
        .ok_or_else(|| ActivityError::Configuration {
            message: "mock server URL missing".to_owned(),
        })?;
    let organization = OrganizationName::new(&state.organization.get().unwrap_or_default())?;

    runtime.block_on(async {
        let api_base = ApiBase::parse(&server_uri)?;
        let credentials =
            BasicCredentials::new("octocat", PersonalAccessToken::new("ghp_example")?)?;
        let gateway = OctocrabActivityGateway::for_credentials(&credentials, &api_base)?;
        let intake = ActivityIntake::new(
            Arc::new(gateway),
            Arc::new(FixedClock::new(reference_now())),
        );
        intake.rank_organization(&organization).await
    })
}
