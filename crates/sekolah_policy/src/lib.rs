//! # sekolah_policy
//!
//! Data-quality checks and project smoke checks for the sekolah-pseo
//! schools dataset.
//!
//! This crate provides:
//! - **Row Validator**: schema, coordinate, key and completeness checks over a loaded table
//! - **Data Policy**: column lists, bounds and tolerances, loadable from YAML
//! - **Structure Checks**: required files and directories of the site project
//! - **Check Suite**: timed harness that records every outcome and never aborts early
//! - **Reports**: console and JSON rendering of a suite run
//!
//! Tolerance checks fail only when the share of defective values exceeds
//! the configured threshold. Every check that reads table content passes
//! as skipped when there are no data rows.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::path::Path;
//! use sekolah_policy::{render_text, run_all, DataPolicy};
//!
//! let policy = DataPolicy::default();
//! let suite = run_all(Path::new("."), &policy);
//!
//! println!("{}", render_text(&suite, false));
//! if !suite.passed() {
//!     std::process::exit(1);
//! }
//! ```

pub mod checks;
pub mod error;
pub mod outcome;
pub mod policy;
pub mod report;
pub mod structure;
pub mod suite;
pub mod validator;

pub use error::{PolicyError, PolicyResult};
pub use outcome::{CheckStatus, ValidationOutcome};
pub use policy::{
    ColumnPolicy, CoordinatePolicy, DataPolicy, GeoBounds, StructurePolicy, Tolerances, DEFAULT_POLICY_FILE,
};
pub use report::{banner, render_text, SuiteReport};
pub use structure::{Section, StructureCheck};
pub use suite::{run_all, run_data, CheckRecord, CheckSuite, SuiteSummary};
pub use validator::{DataCheck, RowValidator};
