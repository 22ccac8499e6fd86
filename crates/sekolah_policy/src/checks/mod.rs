//! Row validator checks.
//!
//! Every check is a pure function over an immutable [`Table`] and the
//! active [`DataPolicy`]. Checks never fail on an empty table: absence of
//! data is not a data-quality defect. Only the header-based schema checks
//! are hard failures.
//!
//! [`Table`]: sekolah_data::Table
//! [`DataPolicy`]: crate::policy::DataPolicy

pub mod completeness;
pub mod coordinates;
pub mod keys;
pub mod malformed;
pub mod schema;

pub use completeness::{has_content, required_fields_present};
pub use coordinates::{coordinates_numeric, coordinates_within_bounds};
pub use keys::{keys_unique, keys_well_formed};
pub use malformed::{malformed_rows_tolerated, MALFORMED_SAMPLE};
pub use schema::{basic_columns, extended_columns};

/// Check names, as they appear in reports.
pub mod names {
    pub const DATA_FILE_EXISTS: &str = "ETL output file exists";
    pub const HAS_CONTENT: &str = "ETL output has content";
    pub const BASIC_COLUMNS: &str = "schools.csv has required columns";
    pub const EXTENDED_COLUMNS: &str = "CSV has all required columns";
    pub const COORDINATES_NUMERIC: &str = "CSV lat/lon are numeric";
    pub const COORDINATES_IN_BOUNDS: &str = "Coordinates within Indonesia bounds";
    pub const KEYS_UNIQUE: &str = "NPSN values are unique";
    pub const FIELDS_PRESENT: &str = "Required fields have data";
    pub const KEYS_NUMERIC: &str = "NPSN values are numeric";
    pub const MALFORMED_TOLERATED: &str = "Handles malformed CSV gracefully";
}

/// Reason attached to every check skipped on a header-only table.
pub(crate) const NO_DATA_ROWS: &str = "no data rows";

/// Keep at most this many offending values in a failure message.
pub(crate) const SAMPLE_LIMIT: usize = 5;
