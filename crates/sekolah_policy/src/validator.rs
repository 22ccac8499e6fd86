//! Row validator.
//!
//! Loads the data file once and runs the table checks against it. A missing
//! file fails only the existence check; every table check is then skipped.

use std::path::Path;

use sekolah_data::{DataError, Table, TableReader};
use tracing::{info, warn};

use crate::checks::{self, names};
use crate::error::PolicyResult;
use crate::outcome::ValidationOutcome;
use crate::policy::DataPolicy;

/// Checks that read the loaded table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataCheck {
    HasContent,
    BasicColumns,
    ExtendedColumns,
    CoordinatesNumeric,
    CoordinatesInBounds,
    KeysUnique,
    FieldsPresent,
    KeysNumeric,
}

impl DataCheck {
    /// Table checks in report order.
    pub const ALL: [DataCheck; 8] = [
        DataCheck::HasContent,
        DataCheck::BasicColumns,
        DataCheck::ExtendedColumns,
        DataCheck::CoordinatesNumeric,
        DataCheck::CoordinatesInBounds,
        DataCheck::KeysUnique,
        DataCheck::FieldsPresent,
        DataCheck::KeysNumeric,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DataCheck::HasContent => names::HAS_CONTENT,
            DataCheck::BasicColumns => names::BASIC_COLUMNS,
            DataCheck::ExtendedColumns => names::EXTENDED_COLUMNS,
            DataCheck::CoordinatesNumeric => names::COORDINATES_NUMERIC,
            DataCheck::CoordinatesInBounds => names::COORDINATES_IN_BOUNDS,
            DataCheck::KeysUnique => names::KEYS_UNIQUE,
            DataCheck::FieldsPresent => names::FIELDS_PRESENT,
            DataCheck::KeysNumeric => names::KEYS_NUMERIC,
        }
    }

    /// Evaluate this check against a loaded table.
    pub fn evaluate(&self, table: &Table, policy: &DataPolicy) -> PolicyResult<ValidationOutcome> {
        let outcome = match self {
            DataCheck::HasContent => checks::has_content(table),
            DataCheck::BasicColumns => checks::basic_columns(table, policy),
            DataCheck::ExtendedColumns => checks::extended_columns(table, policy),
            DataCheck::CoordinatesNumeric => checks::coordinates_numeric(table, policy),
            DataCheck::CoordinatesInBounds => checks::coordinates_within_bounds(table, policy),
            DataCheck::KeysUnique => checks::keys_unique(table, policy),
            DataCheck::FieldsPresent => checks::required_fields_present(table, policy),
            DataCheck::KeysNumeric => return checks::keys_well_formed(table, policy),
        };
        Ok(outcome)
    }
}

/// Runs the data checks for one policy.
pub struct RowValidator<'a> {
    policy: &'a DataPolicy,
}

impl<'a> RowValidator<'a> {
    pub fn new(policy: &'a DataPolicy) -> Self {
        Self { policy }
    }

    /// Load the table, `None` when the file does not exist.
    pub fn load(&self, path: &Path) -> PolicyResult<Option<Table>> {
        match TableReader::read_path(path) {
            Ok(table) => {
                info!("Loaded {} rows from {:?}", table.len(), path);
                Ok(Some(table))
            }
            Err(DataError::NotFound(_)) => {
                warn!("Data file not found: {:?}", path);
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Existence of the data file is a hard requirement.
    pub fn file_exists(&self, path: &Path) -> ValidationOutcome {
        if path.is_file() {
            ValidationOutcome::pass(names::DATA_FILE_EXISTS)
        } else {
            ValidationOutcome::fail(
                names::DATA_FILE_EXISTS,
                format!("{} should exist after ETL", path.display()),
            )
        }
    }

    /// Evaluate one table check, skipping it when there is no table.
    pub fn evaluate(&self, check: DataCheck, table: Option<&Table>) -> PolicyResult<ValidationOutcome> {
        match table {
            Some(table) => check.evaluate(table, self.policy),
            None => Ok(ValidationOutcome::skip(check.name(), "data file not found")),
        }
    }
}
