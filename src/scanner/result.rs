use super::catalog::CheckId;
use super::checks::{Outcome, Verdict};
use super::grade::{self, Grade};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Monotonic identifier of one run. Updates tagged with an older id are stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RunId(pub u64);

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Pending,
    Running,
    Passed,
    Warning,
    Failed,
}

impl CheckStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, CheckStatus::Passed | CheckStatus::Warning | CheckStatus::Failed)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            CheckStatus::Pending => "pending",
            CheckStatus::Running => "running",
            CheckStatus::Passed => "passed",
            CheckStatus::Warning => "warning",
            CheckStatus::Failed => "failed",
        }
    }
}

impl From<Verdict> for CheckStatus {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Passed => CheckStatus::Passed,
            Verdict::Warning => CheckStatus::Warning,
            Verdict::Failed => CheckStatus::Failed,
        }
    }
}

/// One check's state within a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Check {
    pub id: CheckId,
    pub status: CheckStatus,
    pub score: u32,
    pub max_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl Check {
    pub fn pending(id: CheckId) -> Self {
        Self {
            id,
            status: CheckStatus::Pending,
            score: 0,
            max_score: id.max_score(),
            details: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.id.name()
    }

    pub fn description(&self) -> &'static str {
        self.id.description()
    }

    /// `pending -> running`. Returns false if the check already moved on.
    pub(crate) fn begin(&mut self) -> bool {
        if self.status != CheckStatus::Pending {
            return false;
        }
        self.status = CheckStatus::Running;
        true
    }

    /// `running -> passed | warning | failed`. A resolved check never changes again.
    /// Scores above the check's maximum are clamped.
    pub(crate) fn resolve(&mut self, outcome: Outcome) -> bool {
        if self.status != CheckStatus::Running {
            return false;
        }
        self.status = outcome.verdict.into();
        self.score = outcome.score.min(self.max_score);
        self.details = Some(outcome.details);
        true
    }
}

/// Pass/warn/fail counts of a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    pub passed: u32,
    pub warnings: u32,
    pub failed: u32,
}

/// A completed run. Immutable; a new scan replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    pub run_id: RunId,
    pub checks: Vec<Check>,
    pub total_score: u32,
    pub max_score: u32,
    pub timestamp: DateTime<Utc>,
}

impl ScanResult {
    /// Aggregate terminal checks. Returns `None` if any check is unresolved.
    pub fn from_checks(run_id: RunId, checks: Vec<Check>, timestamp: DateTime<Utc>) -> Option<Self> {
        if checks.iter().any(|c| !c.status.is_terminal()) {
            return None;
        }
        Some(Self::aggregate(run_id, checks, timestamp))
    }

    /// Sum scores without checking statuses. Callers guarantee every check resolved.
    pub(crate) fn aggregate(run_id: RunId, checks: Vec<Check>, timestamp: DateTime<Utc>) -> Self {
        let total_score = checks.iter().map(|c| c.score).sum();
        let max_score = checks.iter().map(|c| c.max_score).sum();
        Self {
            run_id,
            checks,
            total_score,
            max_score,
            timestamp,
        }
    }

    pub fn grade(&self) -> Grade {
        Grade::from_score(self.total_score, self.max_score)
    }

    pub fn percentage(&self) -> f64 {
        grade::percentage(self.total_score, self.max_score)
    }

    pub fn summary(&self) -> ResultSummary {
        let mut summary = ResultSummary::default();
        for check in &self.checks {
            match check.status {
                CheckStatus::Passed => summary.passed += 1,
                CheckStatus::Warning => summary.warnings += 1,
                CheckStatus::Failed => summary.failed += 1,
                CheckStatus::Pending | CheckStatus::Running => {}
            }
        }
        summary
    }

    pub fn check(&self, id: CheckId) -> Option<&Check> {
        self.checks.iter().find(|c| c.id == id)
    }
}
