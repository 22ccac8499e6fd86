//! CSV table reading.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ErrorKind, ReaderBuilder};
use tracing::{debug, warn};

use crate::error::{DataError, DataResult};
use crate::models::{LoadStats, Record, Table};

/// Reader for comma-separated tables with a header row.
pub struct TableReader;

impl TableReader {
    /// Read a table from a file path.
    pub fn read_path(path: impl AsRef<Path>) -> DataResult<Table> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DataError::NotFound(path.to_path_buf()));
        }

        debug!("Reading table from {:?}", path);
        let table = Self::read_from(File::open(path)?)?;
        debug!(
            "Loaded {} rows ({} ragged, {} skipped) from {:?}",
            table.len(),
            table.stats.ragged_rows,
            table.stats.skipped_rows,
            path
        );
        Ok(table)
    }

    /// Read a table from in-memory text.
    pub fn read_str(content: &str) -> DataResult<Table> {
        Self::read_from(content.as_bytes())
    }

    /// Read a table from any byte source.
    ///
    /// Ragged rows are kept: short rows are padded with empty values and
    /// extra fields are dropped. Rows that are not valid UTF-8 are skipped.
    pub fn read_from<R: Read>(source: R) -> DataResult<Table> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(source);

        let headers: Vec<String> = rdr
            .headers()?
            .iter()
            .enumerate()
            .map(|(i, h)| {
                if i == 0 {
                    h.trim_start_matches('\u{feff}').to_string()
                } else {
                    h.to_string()
                }
            })
            .collect();

        let mut records = Vec::new();
        let mut stats = LoadStats::default();

        for (idx, result) in rdr.records().enumerate() {
            let row = match result {
                Ok(row) => row,
                Err(e) if matches!(e.kind(), ErrorKind::Utf8 { .. }) => {
                    warn!("Skipping undecodable row {}: {}", idx + 1, e);
                    stats.skipped_rows += 1;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            if row.len() != headers.len() {
                debug!(
                    "Row {} has {} fields, header has {}",
                    idx + 1,
                    row.len(),
                    headers.len()
                );
                stats.ragged_rows += 1;
            }

            records.push(Record::from_row(&headers, row.iter()));
        }

        Ok(Table::new(headers, records).with_stats(stats))
    }
}
