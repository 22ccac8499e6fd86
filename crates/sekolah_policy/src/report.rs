//! Console and JSON reports for a suite run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::PolicyResult;
use crate::suite::{round_to, CheckRecord, CheckSuite, SuiteSummary};

const RULE_WIDTH: usize = 60;

/// Machine-readable report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteReport {
    pub results: Vec<CheckRecord>,
    pub summary: SuiteSummary,
    pub generated_at: DateTime<Utc>,
}

impl SuiteReport {
    pub fn new(suite: &CheckSuite) -> Self {
        let results = suite
            .results()
            .iter()
            .cloned()
            .map(|mut record| {
                record.duration = round_to(record.duration, 4);
                record
            })
            .collect();

        Self {
            results,
            summary: suite.summary(),
            generated_at: Utc::now(),
        }
    }

    pub fn to_json(&self) -> PolicyResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Title block printed before a run.
pub fn banner(title: &str) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    format!("{rule}\n{title}\n{rule}\n")
}

fn status_line(record: &CheckRecord) -> String {
    let status = if record.passed { "✓ PASS" } else { "✗ FAIL" };
    let skipped = if record.skipped { " [skipped]" } else { "" };
    format!("{} {}{} ({:.4}s)", status, record.name, skipped, record.duration)
}

/// Human-readable report.
///
/// Verbose mode lists every check; otherwise only failures are listed.
pub fn render_text(suite: &CheckSuite, verbose: bool) -> String {
    let summary = suite.summary();
    let mut report = String::new();

    report.push('\n');
    report.push_str(&banner("TEST RESULTS"));

    if verbose {
        for record in suite.results() {
            report.push_str(&status_line(record));
            report.push('\n');
            if let Some(error) = &record.error {
                report.push_str(&format!("    Error: {}\n", error));
            }
            if let Some(detail) = &record.detail {
                report.push_str(&format!("    Detail: {}\n", detail));
            }
        }
    } else {
        let failures = suite.failures();
        if !failures.is_empty() {
            report.push_str("\nFailed Tests:\n");
            for record in failures {
                report.push_str(&format!("  ✗ {}\n", record.name));
                if let Some(error) = &record.error {
                    report.push_str(&format!("    Error: {}\n", error));
                }
            }
        }
    }

    let rule = "-".repeat(RULE_WIDTH);
    report.push('\n');
    report.push_str(&rule);
    report.push('\n');
    report.push_str(&format!("Total:    {}\n", summary.total));
    report.push_str(&format!("Passed:   {}\n", summary.passed));
    report.push_str(&format!("Failed:   {}\n", summary.failed));
    report.push_str(&format!("Success:  {:.2}%\n", summary.success_rate));
    report.push_str(&format!("Duration: {:.4}s\n", summary.total_duration));
    report.push_str(&rule);
    report.push('\n');

    if summary.failed == 0 {
        report.push_str("✓ All tests passed!\n");
    } else {
        report.push_str(&format!("✗ {} test(s) failed\n", summary.failed));
    }
    report.push_str(&"=".repeat(RULE_WIDTH));
    report.push('\n');

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::ValidationOutcome;

    fn sample_suite() -> CheckSuite {
        let mut suite = CheckSuite::new();
        suite.run_check("first", || Ok(ValidationOutcome::pass("first")));
        suite.run_check("second", || Ok(ValidationOutcome::fail("second", "2/10 coordinates out of bounds")));
        suite.run_check("third", || Ok(ValidationOutcome::skip("third", "no data rows")));
        suite
    }

    #[test]
    fn test_compact_text_lists_only_failures() {
        let text = render_text(&sample_suite(), false);

        assert!(text.contains("Failed Tests:"));
        assert!(text.contains("  ✗ second\n    Error: 2/10 coordinates out of bounds"));
        assert!(!text.contains("first"));
        assert!(text.contains("Total:    3"));
        assert!(text.contains("Success:  66.67%"));
        assert!(text.contains("✗ 1 test(s) failed"));
    }

    #[test]
    fn test_verbose_text_lists_everything() {
        let text = render_text(&sample_suite(), true);

        assert!(text.contains("✓ PASS first ("));
        assert!(text.contains("✗ FAIL second ("));
        assert!(text.contains("✓ PASS third [skipped] ("));
        assert!(text.contains("    Detail: no data rows"));
    }

    #[test]
    fn test_all_passed_verdict() {
        let mut suite = CheckSuite::new();
        suite.run_check("only", || Ok(ValidationOutcome::pass("only")));

        let text = render_text(&suite, false);
        assert!(!text.contains("Failed Tests:"));
        assert!(text.contains("✓ All tests passed!"));
    }

    #[test]
    fn test_json_shape() {
        let report = SuiteReport::new(&sample_suite());
        let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();

        let results = json["results"].as_array().unwrap();
        assert_eq!(results.len(), 3);
        assert_eq!(results[0]["name"], "first");
        assert_eq!(results[0]["passed"], true);
        assert!(results[0]["error"].is_null());
        assert!(results[0]["duration"].is_number());
        assert_eq!(results[1]["error"], "2/10 coordinates out of bounds");
        assert_eq!(results[2]["skipped"], true);

        assert_eq!(json["summary"]["total"], 3);
        assert_eq!(json["summary"]["failed"], 1);
        assert_eq!(json["summary"]["success_rate"], 66.67);
        assert!(json["generated_at"].is_string());
    }
}
