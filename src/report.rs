//! Run outcomes and their text and JSON renderings.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;

/// Result of one case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum CaseStatus {
    Passed,
    Failed { message: String },
    Skipped { reason: String },
}

impl CaseStatus {
    fn label(&self) -> &'static str {
        match self {
            Self::Passed => "PASS",
            Self::Failed { .. } => "FAIL",
            Self::Skipped { .. } => "SKIP",
        }
    }
}

/// Recorded outcome of one case.
#[derive(Debug, Clone, Serialize)]
pub struct CaseOutcome {
    pub suite: String,
    pub group: String,
    pub id: String,
    pub title: String,
    #[serde(flatten)]
    pub status: CaseStatus,
    pub duration_ms: u64,
}

/// Outcomes of a whole run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub base_url: String,
    pub started_at: DateTime<Utc>,
    pub duration_secs: f64,
    pub outcomes: Vec<CaseOutcome>,
}

impl RunReport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            started_at: Utc::now(),
            duration_secs: 0.0,
            outcomes: Vec::new(),
        }
    }

    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Passed))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Failed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|s| matches!(s, CaseStatus::Skipped { .. }))
    }

    /// True when no case failed.
    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }

    /// Get summary message.
    pub fn summary(&self) -> String {
        format!(
            "Passed: {}, Failed: {}, Skipped: {} (took {:.1}s)",
            self.passed(),
            self.failed(),
            self.skipped(),
            self.duration_secs
        )
    }

    /// One line per case, failure details indented below, summary last.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Target: {} ({})", self.base_url, self.started_at.format("%Y-%m-%d %H:%M:%S UTC"));

        let mut current_suite = "";
        for outcome in &self.outcomes {
            if outcome.suite != current_suite {
                current_suite = &outcome.suite;
                let _ = writeln!(out, "\n[{current_suite}]");
            }
            let _ = writeln!(
                out,
                "  {} {} - {} ({} ms)",
                outcome.status.label(),
                outcome.id,
                outcome.title,
                outcome.duration_ms
            );
            match &outcome.status {
                CaseStatus::Failed { message } => {
                    for line in message.lines() {
                        let _ = writeln!(out, "       {line}");
                    }
                }
                CaseStatus::Skipped { reason } => {
                    let _ = writeln!(out, "       {reason}");
                }
                CaseStatus::Passed => {}
            }
        }

        let _ = writeln!(out, "\n{}", self.summary());
        out
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    fn count(&self, pred: impl Fn(&CaseStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}
