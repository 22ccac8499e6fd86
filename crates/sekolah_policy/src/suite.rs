//! Check harness.
//!
//! Runs named checks, times them and records the outcome. A check that
//! returns an error is recorded as a failure; it never stops the run.

use std::path::Path;
use std::time::Instant;

use sekolah_data::Table;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::checks;
use crate::error::{PolicyError, PolicyResult};
use crate::outcome::ValidationOutcome;
use crate::policy::DataPolicy;
use crate::structure::{Section, StructureCheck};
use crate::validator::{DataCheck, RowValidator};

/// Title of the section holding the table checks.
pub const FUNCTIONAL_SECTION: &str = "Functional Data";

/// Recorded result of one check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRecord {
    pub name: String,
    pub passed: bool,
    #[serde(default)]
    pub skipped: bool,
    /// Wall time in seconds
    pub duration: f64,
    pub error: Option<String>,
    /// Informational message of a passing or skipped check
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl CheckRecord {
    fn from_outcome(name: String, outcome: ValidationOutcome, duration: f64) -> Self {
        let passed = outcome.passed();
        let skipped = outcome.skipped();
        let (error, detail) = if passed {
            (None, outcome.message)
        } else {
            (outcome.message, None)
        };

        Self {
            name,
            passed,
            skipped,
            duration,
            error,
            detail,
        }
    }

    fn from_error(name: String, err: PolicyError, duration: f64) -> Self {
        Self {
            name,
            passed: false,
            skipped: false,
            duration,
            error: Some(err.to_string()),
            detail: None,
        }
    }
}

/// Summary statistics for a suite run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SuiteSummary {
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Percentage of passed checks, two decimals
    pub success_rate: f64,
    /// Seconds, four decimals
    pub total_duration: f64,
}

/// Round to a fixed number of decimals.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Ordered collection of check records.
#[derive(Debug, Clone, Default)]
pub struct CheckSuite {
    results: Vec<CheckRecord>,
}

impl CheckSuite {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a check and record its outcome under `name`.
    pub fn run_check<F>(&mut self, name: impl Into<String>, check: F) -> &CheckRecord
    where
        F: FnOnce() -> PolicyResult<ValidationOutcome>,
    {
        let name = name.into();
        let start = Instant::now();
        let result = check();
        let duration = start.elapsed().as_secs_f64();

        let record = match result {
            Ok(outcome) => CheckRecord::from_outcome(name, outcome, duration),
            Err(e) => {
                error!("Check '{}' raised: {}", name, e);
                CheckRecord::from_error(name, e, duration)
            }
        };

        self.results.push(record);
        &self.results[self.results.len() - 1]
    }

    pub fn results(&self) -> &[CheckRecord] {
        &self.results
    }

    pub fn failures(&self) -> Vec<&CheckRecord> {
        self.results.iter().filter(|r| !r.passed).collect()
    }

    /// True when every check passed or was skipped.
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }

    pub fn summary(&self) -> SuiteSummary {
        let total = self.results.len();
        let passed = self.results.iter().filter(|r| r.passed).count();
        let total_duration: f64 = self.results.iter().map(|r| r.duration).sum();
        let success_rate = if total == 0 {
            0.0
        } else {
            round_to(passed as f64 / total as f64 * 100.0, 2)
        };

        SuiteSummary {
            total,
            passed,
            failed: total - passed,
            success_rate,
            total_duration: round_to(total_duration, 4),
        }
    }
}

/// Outcome of loading the data table, shared by every table check.
enum Loaded {
    Table(Option<Table>),
    Failed(String),
}

impl Loaded {
    fn load(validator: &RowValidator<'_>, path: &Path) -> Self {
        match validator.load(path) {
            Ok(table) => Loaded::Table(table),
            Err(e) => {
                error!("Failed to load {:?}: {}", path, e);
                Loaded::Failed(e.to_string())
            }
        }
    }

    fn evaluate(&self, validator: &RowValidator<'_>, check: DataCheck) -> PolicyResult<ValidationOutcome> {
        match self {
            Loaded::Table(table) => validator.evaluate(check, table.as_ref()),
            Loaded::Failed(message) => Err(PolicyError::CheckFailed {
                check: check.name().to_string(),
                message: message.clone(),
            }),
        }
    }
}

fn run_table_checks(
    suite: &mut CheckSuite,
    validator: &RowValidator<'_>,
    path: &Path,
    loaded: &Loaded,
    include_basic: bool,
) {
    suite.run_check(checks::names::DATA_FILE_EXISTS, || Ok(validator.file_exists(path)));
    for check in DataCheck::ALL {
        if check == DataCheck::BasicColumns && !include_basic {
            continue;
        }
        suite.run_check(check.name(), || loaded.evaluate(validator, check));
    }
    suite.run_check(checks::names::MALFORMED_TOLERATED, checks::malformed_rows_tolerated);
}

/// Run every layout and data check for a project root.
pub fn run_all(root: &Path, policy: &DataPolicy) -> CheckSuite {
    let mut suite = CheckSuite::new();
    let validator = RowValidator::new(policy);
    let data_path = policy.data_path(root);

    let mut current: Option<Section> = None;
    for check in StructureCheck::plan(policy) {
        let section = check.section();
        if current != Some(section) {
            info!("Running {} Tests...", section.title());
            current = Some(section);
        }
        suite.run_check(check.name(policy), || check.evaluate(root, policy));
    }

    let loaded = Loaded::load(&validator, &data_path);
    if current != Some(Section::DataLayout) {
        info!("Running {} Tests...", Section::DataLayout.title());
    }
    suite.run_check(DataCheck::BasicColumns.name(), || {
        loaded.evaluate(&validator, DataCheck::BasicColumns)
    });

    info!("Running {} Tests...", FUNCTIONAL_SECTION);
    run_table_checks(&mut suite, &validator, &data_path, &loaded, false);

    suite
}

/// Run only the data checks against an explicit file.
pub fn run_data(path: &Path, policy: &DataPolicy) -> CheckSuite {
    let mut suite = CheckSuite::new();
    let validator = RowValidator::new(policy);
    let loaded = Loaded::load(&validator, path);

    info!("Running {} Tests...", FUNCTIONAL_SECTION);
    run_table_checks(&mut suite, &validator, path, &loaded, true);

    suite
}
