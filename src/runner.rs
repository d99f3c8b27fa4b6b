//! Suite execution.

use std::time::Instant;

use tracing::{info, warn};

use crate::client::ApiClient;
use crate::config::{AuthConfig, FixtureConfig};
use crate::contract::{Case, Group, Suite, SuiteContext};
use crate::error::AppError;
use crate::report::{CaseOutcome, CaseStatus, RunReport};

/// Runs suites against one server, case by case.
pub struct Runner {
    client: ApiClient,
    auth: AuthConfig,
    fixtures: FixtureConfig,
    filter: Option<String>,
}

impl Runner {
    /// Create a new runner.
    pub fn new(client: ApiClient, auth: AuthConfig, fixtures: FixtureConfig) -> Self {
        Self {
            client,
            auth,
            fixtures,
            filter: None,
        }
    }

    /// Only run cases whose id contains `filter` (case-insensitive).
    pub fn with_filter(mut self, filter: Option<String>) -> Self {
        self.filter = filter.filter(|f| !f.trim().is_empty()).map(|f| f.to_lowercase());
        self
    }

    /// True when `case` passes the id filter.
    pub fn selects(&self, case: &Case) -> bool {
        match &self.filter {
            Some(filter) => case.id.to_lowercase().contains(filter),
            None => true,
        }
    }

    /// Run `suites` in order and collect every outcome.
    pub async fn run(&self, suites: &[Suite]) -> RunReport {
        let start = Instant::now();
        let mut report = RunReport::new(self.client.base_url());

        for suite in suites {
            self.run_suite(suite, &mut report).await;
        }

        report.duration_secs = start.elapsed().as_secs_f64();
        info!("Run finished: {}", report.summary());
        report
    }

    async fn run_suite(&self, suite: &Suite, report: &mut RunReport) {
        info!("Running suite {} ({} cases)", suite.name, suite.case_count());
        let mut ctx = SuiteContext::new(self.client.clone(), self.auth.clone(), self.fixtures.clone());

        for group in &suite.groups {
            self.run_group(suite.name, group, &mut ctx, report).await;
        }
    }

    async fn run_group(&self, suite: &str, group: &Group, ctx: &mut SuiteContext, report: &mut RunReport) {
        let cases: Vec<&Case> = group.cases.iter().filter(|c| self.selects(c)).collect();
        if cases.is_empty() {
            return;
        }

        // A failed setup fails the first selected case and skips the rest.
        let mut setup_error = None;
        if let Some(setup) = &group.setup {
            if let Err(e) = (setup.run)(&mut *ctx).await {
                warn!("Setup {} failed in {}: {e}", setup.id, group.title);
                setup_error = Some(format!("setup {} failed: {}", setup.id, describe(&e)));
            }
        }

        for (index, case) in cases.into_iter().enumerate() {
            let start = Instant::now();
            let status = match &setup_error {
                Some(message) if index == 0 => CaseStatus::Failed {
                    message: message.clone(),
                },
                Some(_) => CaseStatus::Skipped {
                    reason: "group setup failed".to_string(),
                },
                None => match (case.run)(&mut *ctx).await {
                    Ok(()) => CaseStatus::Passed,
                    Err(e) => {
                        warn!("{} failed: {e}", case.id);
                        CaseStatus::Failed { message: describe(&e) }
                    }
                },
            };

            report.outcomes.push(CaseOutcome {
                suite: suite.to_string(),
                group: group.title.to_string(),
                id: case.id.to_string(),
                title: case.title.to_string(),
                status,
                duration_ms: start.elapsed().as_millis() as u64,
            });
        }
    }
}

/// Assertion failures read as-is; transport failures are labelled.
fn describe(err: &AppError) -> String {
    match err {
        AppError::Assertion(assertion) => assertion.to_string(),
        AppError::Http(e) => format!("request failed: {e}"),
        other => other.to_string(),
    }
}
