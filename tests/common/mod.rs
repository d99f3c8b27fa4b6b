//! Shared helpers for contract tests against mock servers.

#![allow(dead_code)]

use dept_api_contract::client::ApiClient;
use dept_api_contract::config::{AuthConfig, FixtureConfig, ServerConfig};
use dept_api_contract::contract::Suite;
use dept_api_contract::report::{CaseStatus, RunReport};
use dept_api_contract::runner::Runner;
use serde_json::{Value, json};

pub const INVALID_TOKEN: &str = "invalid-token";

pub fn auth() -> AuthConfig {
    AuthConfig {
        token: Some("good-token".to_string()),
        insufficient_scope_token: INVALID_TOKEN.to_string(),
    }
}

pub fn client(base_url: &str) -> ApiClient {
    let server = ServerConfig {
        base_url: base_url.to_string(),
        timeout_secs: 5,
    };
    ApiClient::new(&server, &auth()).expect("Failed to build client")
}

/// Run the cases of `suite` whose id contains `filter`.
pub async fn run(base_url: &str, suite: Suite, filter: &str) -> RunReport {
    Runner::new(client(base_url), auth(), FixtureConfig::default())
        .with_filter(Some(filter.to_string()))
        .run(&[suite])
        .await
}

/// Standard envelope body.
pub fn envelope(code: u16, path: &str, data: Value) -> String {
    json!({
        "metadata": { "httpCode": code, "path": path, "message": if code == 200 { "OK" } else { "Error" } },
        "data": data,
        "error": null
    })
    .to_string()
}

/// Status recorded for case `id`.
pub fn status_of<'a>(report: &'a RunReport, id: &str) -> &'a CaseStatus {
    &report
        .outcomes
        .iter()
        .find(|o| o.id == id)
        .unwrap_or_else(|| panic!("no outcome for {id}"))
        .status
}

pub fn failure_message(report: &RunReport, id: &str) -> String {
    match status_of(report, id) {
        CaseStatus::Failed { message } => message.clone(),
        other => panic!("{id} did not fail: {other:?}"),
    }
}
