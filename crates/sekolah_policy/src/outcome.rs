//! Check outcomes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a single check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    Passed,
    Skipped,
    Failed,
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::Passed => write!(f, "passed"),
            CheckStatus::Skipped => write!(f, "skipped"),
            CheckStatus::Failed => write!(f, "failed"),
        }
    }
}

/// Result of evaluating one check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationOutcome {
    pub check: String,
    pub status: CheckStatus,
    pub message: Option<String>,
    #[serde(default)]
    pub metrics: BTreeMap<String, String>,
}

impl ValidationOutcome {
    pub fn pass(check: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            status: CheckStatus::Passed,
            message: None,
            metrics: BTreeMap::new(),
        }
    }

    pub fn fail(check: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            status: CheckStatus::Failed,
            message: Some(message.into()),
            metrics: BTreeMap::new(),
        }
    }

    pub fn skip(check: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            check: check.into(),
            status: CheckStatus::Skipped,
            message: Some(reason.into()),
            metrics: BTreeMap::new(),
        }
    }

    /// Pass or fail depending on `ok`, keeping the message either way.
    pub fn gate(check: impl Into<String>, ok: bool, message: impl Into<String>) -> Self {
        if ok {
            Self::pass(check).with_message(message)
        } else {
            Self::fail(check, message)
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_metric(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.metrics.insert(key.into(), value.to_string());
        self
    }

    /// Skipped checks count as passed.
    pub fn passed(&self) -> bool {
        self.status != CheckStatus::Failed
    }

    pub fn skipped(&self) -> bool {
        self.status == CheckStatus::Skipped
    }
}

/// Share of `bad` in `total`, as a percentage. Zero when `total` is zero.
pub fn percent(bad: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        bad as f64 / total as f64 * 100.0
    }
}

/// True when `bad` exceeds `tolerance` of `total`. At-threshold is within.
pub fn exceeds(bad: usize, total: usize, tolerance: f64) -> bool {
    bad as f64 > total as f64 * tolerance
}
