//! # sekolah_data
//!
//! In-memory model of the `schools.csv` dataset and the reader that builds it.
//!
//! A [`Table`] is loaded once per validation run and never mutated. The
//! reader is tolerant: rows whose field count does not match
//! the header are aligned best-effort instead of aborting the load.
//!
//! ## Example
//!
//! ```rust,no_run
//! use sekolah_data::TableReader;
//!
//! let table = TableReader::read_path("data/schools.csv").unwrap();
//! println!("{} rows, {} ragged", table.len(), table.stats.ragged_rows);
//!
//! for record in table.records() {
//!     println!("{}", record.trimmed("npsn"));
//! }
//! ```

pub mod error;
pub mod models;
pub mod reader;

pub use error::{DataError, DataResult};
pub use models::{LoadStats, Record, Table};
pub use reader::TableReader;
