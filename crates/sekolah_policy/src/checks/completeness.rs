//! Field completeness checks.

use sekolah_data::Table;
use tracing::warn;

use super::{names, NO_DATA_ROWS};
use crate::outcome::{exceeds, percent, ValidationOutcome};
use crate::policy::DataPolicy;

/// The table has at least one data row.
///
/// A header-only file is reported as skipped, never failed.
pub fn has_content(table: &Table) -> ValidationOutcome {
    if table.is_empty() {
        warn!("Data file has a header but no data rows");
        return ValidationOutcome::skip(names::HAS_CONTENT, NO_DATA_ROWS);
    }

    ValidationOutcome::pass(names::HAS_CONTENT)
        .with_message(format!("{} data rows", table.len()))
        .with_metric("rows", table.len())
        .with_metric("ragged_rows", table.stats.ragged_rows)
        .with_metric("skipped_rows", table.stats.skipped_rows)
}

/// Each completeness field may be blank in at most the tolerated share of
/// rows. A column missing from the header counts as blank everywhere.
pub fn required_fields_present(table: &Table, policy: &DataPolicy) -> ValidationOutcome {
    if table.is_empty() {
        return ValidationOutcome::skip(names::FIELDS_PRESENT, NO_DATA_ROWS);
    }

    let fields = &policy.completeness_fields;
    let empty_counts = table.records().iter().fold(vec![0usize; fields.len()], |mut counts, record| {
        for (count, field) in counts.iter_mut().zip(fields) {
            if record.is_blank(field) {
                *count += 1;
            }
        }
        counts
    });

    let total = table.len();
    let failures: Vec<String> = fields
        .iter()
        .zip(&empty_counts)
        .filter(|(_, &empty)| exceeds(empty, total, policy.tolerances.empty_fields))
        .map(|(field, &empty)| {
            format!(
                "Field '{}' has {} empty values ({:.2}%)",
                field,
                empty,
                percent(empty, total)
            )
        })
        .collect();

    let mut outcome = if failures.is_empty() {
        ValidationOutcome::pass(names::FIELDS_PRESENT)
    } else {
        ValidationOutcome::fail(names::FIELDS_PRESENT, failures.join("; "))
    };
    for (field, empty) in fields.iter().zip(empty_counts) {
        outcome = outcome.with_metric(format!("empty.{}", field), empty);
    }
    outcome.with_metric("rows", total)
}
