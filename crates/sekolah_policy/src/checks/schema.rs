//! Header schema checks.

use sekolah_data::Table;

use super::{names, NO_DATA_ROWS};
use crate::outcome::ValidationOutcome;
use crate::policy::DataPolicy;

/// Basic required columns. Skipped when the table has no data rows.
pub fn basic_columns(table: &Table, policy: &DataPolicy) -> ValidationOutcome {
    if table.is_empty() {
        return ValidationOutcome::skip(names::BASIC_COLUMNS, NO_DATA_ROWS);
    }
    required_columns(names::BASIC_COLUMNS, table, &policy.columns.basic)
}

/// Extended required columns. Evaluated against the header even when the
/// table has no data rows.
pub fn extended_columns(table: &Table, policy: &DataPolicy) -> ValidationOutcome {
    required_columns(names::EXTENDED_COLUMNS, table, &policy.columns.extended)
}

fn required_columns(check: &str, table: &Table, required: &[String]) -> ValidationOutcome {
    let missing = table.missing_columns(required);

    if missing.is_empty() {
        ValidationOutcome::pass(check).with_metric("columns", required.len())
    } else {
        let quoted: Vec<String> = missing.iter().map(|c| format!("'{}'", c)).collect();
        ValidationOutcome::fail(
            check,
            format!("Required column(s) missing: {}", quoted.join(", ")),
        )
        .with_metric("missing", missing.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::fixtures;
    use crate::outcome::CheckStatus;
    use sekolah_data::TableReader;

    #[test]
    fn test_full_header_passes() {
        let table = fixtures::table(&[fixtures::row("1", "0", "100")]);
        let policy = DataPolicy::default();

        assert_eq!(basic_columns(&table, &policy).status, CheckStatus::Passed);
        assert_eq!(extended_columns(&table, &policy).status, CheckStatus::Passed);
    }

    #[test]
    fn test_missing_npsn_is_named() {
        let table = TableReader::read_str("nama,provinsi,kab_kota,kecamatan\nA,B,C,D\n").unwrap();
        let policy = DataPolicy::default();

        let outcome = basic_columns(&table, &policy);
        assert_eq!(outcome.status, CheckStatus::Failed);
        assert!(outcome.message.unwrap().contains("'npsn'"));

        let outcome = extended_columns(&table, &policy);
        assert_eq!(outcome.status, CheckStatus::Failed);
        let message = outcome.message.unwrap();
        assert!(message.contains("'npsn'"));
        assert!(message.contains("'updated_at'"));
    }

    #[test]
    fn test_header_only_table() {
        let table = TableReader::read_str("npsn,nama\n").unwrap();
        let policy = DataPolicy::default();

        assert_eq!(basic_columns(&table, &policy).status, CheckStatus::Skipped);
        assert_eq!(extended_columns(&table, &policy).status, CheckStatus::Failed);

        let full = fixtures::empty_table();
        assert_eq!(extended_columns(&full, &policy).status, CheckStatus::Passed);
    }
}
