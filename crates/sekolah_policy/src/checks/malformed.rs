//! Reader tolerance for malformed input.

use std::io::Write;

use sekolah_data::TableReader;
use tracing::debug;

use super::names;
use crate::error::PolicyResult;
use crate::outcome::ValidationOutcome;

/// One well-formed data row followed by a row with the wrong field count.
pub const MALFORMED_SAMPLE: &str = "npsn,nama\nvalid,valid\ninvalid row without proper csv\n";

/// Round-trip [`MALFORMED_SAMPLE`] through a temporary file and require
/// the reader to recover at least one record.
pub fn malformed_rows_tolerated() -> PolicyResult<ValidationOutcome> {
    let mut file = tempfile::Builder::new()
        .prefix("sekolah-malformed-")
        .suffix(".csv")
        .tempfile()?;
    file.write_all(MALFORMED_SAMPLE.as_bytes())?;
    file.flush()?;

    let table = TableReader::read_path(file.path())?;
    debug!(
        "Malformed sample parsed into {} rows ({} ragged)",
        table.len(),
        table.stats.ragged_rows
    );

    Ok(ValidationOutcome::gate(
        names::MALFORMED_TOLERATED,
        !table.is_empty(),
        format!("Parsed {} row(s), {} ragged", table.len(), table.stats.ragged_rows),
    )
    .with_metric("rows", table.len()))
}
