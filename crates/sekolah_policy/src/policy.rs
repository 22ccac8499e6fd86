//! Declarative data policy.
//!
//! The policy holds every column list, bound and tolerance the checks use.
//! It can be loaded from a YAML file; any key left out falls back to the
//! defaults for the schools dataset.

use std::path::{Path, PathBuf};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};

/// Default policy file name looked up in the project root.
pub const DEFAULT_POLICY_FILE: &str = "sekolah-check.yaml";

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Complete policy for a validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataPolicy {
    /// Data file, relative to the project root
    pub data_file: PathBuf,
    /// Primary key column
    pub key_column: String,
    /// Pattern every non-empty key must match
    pub key_pattern: String,
    /// Required column lists
    pub columns: ColumnPolicy,
    /// Fields that must be mostly non-empty
    pub completeness_fields: Vec<String>,
    /// Coordinate columns and parse sample size
    pub coordinates: CoordinatePolicy,
    /// Geographic bounding box
    pub bounds: GeoBounds,
    /// Statistical tolerances
    pub tolerances: Tolerances,
    /// Project layout checks
    pub structure: StructurePolicy,
}

impl Default for DataPolicy {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("data/schools.csv"),
            key_column: "npsn".to_string(),
            key_pattern: "^[0-9]+$".to_string(),
            columns: ColumnPolicy::default(),
            completeness_fields: strings(&["npsn", "nama", "provinsi", "kab_kota"]),
            coordinates: CoordinatePolicy::default(),
            bounds: GeoBounds::default(),
            tolerances: Tolerances::default(),
            structure: StructurePolicy::default(),
        }
    }
}

impl DataPolicy {
    /// Load a policy from a YAML file.
    pub fn from_file(path: &Path) -> PolicyResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse and validate a policy from YAML.
    pub fn from_yaml(yaml: &str) -> PolicyResult<Self> {
        let policy: Self = serde_yaml::from_str(yaml)?;
        policy.validate()?;
        Ok(policy)
    }

    pub fn to_yaml(&self) -> PolicyResult<String> {
        serde_yaml::to_string(self).map_err(PolicyError::from)
    }

    /// Compile the key pattern.
    pub fn key_regex(&self) -> PolicyResult<Regex> {
        Regex::new(&self.key_pattern).map_err(|e| {
            PolicyError::InvalidConfiguration(format!(
                "key_pattern '{}' is not a valid regex: {}",
                self.key_pattern, e
            ))
        })
    }

    /// Reject configurations the checks cannot evaluate meaningfully.
    pub fn validate(&self) -> PolicyResult<()> {
        if self.key_column.trim().is_empty() {
            return Err(PolicyError::InvalidConfiguration(
                "key_column cannot be empty".to_string(),
            ));
        }
        self.key_regex()?;
        self.tolerances.validate()?;
        self.bounds.validate()?;
        Ok(())
    }

    /// Resolve the data file against a project root.
    pub fn data_path(&self, root: &Path) -> PathBuf {
        root.join(&self.data_file)
    }
}

/// Required column lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnPolicy {
    pub basic: Vec<String>,
    pub extended: Vec<String>,
}

impl Default for ColumnPolicy {
    fn default() -> Self {
        Self {
            basic: strings(&["npsn", "nama", "provinsi", "kab_kota", "kecamatan"]),
            extended: strings(&[
                "npsn",
                "nama",
                "bentuk_pendidikan",
                "status",
                "alamat",
                "kelurahan",
                "kecamatan",
                "kab_kota",
                "provinsi",
                "lat",
                "lon",
                "updated_at",
            ]),
        }
    }
}

/// Coordinate column names and parse sample size.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatePolicy {
    pub lat_column: String,
    pub lon_column: String,
    pub sample_size: usize,
}

impl Default for CoordinatePolicy {
    fn default() -> Self {
        Self {
            lat_column: "lat".to_string(),
            lon_column: "lon".to_string(),
            sample_size: 10,
        }
    }
}

/// Inclusive latitude/longitude bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeoBounds {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl Default for GeoBounds {
    /// Indonesia.
    fn default() -> Self {
        Self {
            lat_min: -11.0,
            lat_max: 6.0,
            lon_min: 95.0,
            lon_max: 141.0,
        }
    }
}

impl GeoBounds {
    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.lat_min..=self.lat_max).contains(&lat) && (self.lon_min..=self.lon_max).contains(&lon)
    }

    fn validate(&self) -> PolicyResult<()> {
        if !(self.lat_min <= self.lat_max && self.lon_min <= self.lon_max) {
            return Err(PolicyError::InvalidConfiguration(format!(
                "bounds are inverted: lat [{}, {}], lon [{}, {}]",
                self.lat_min, self.lat_max, self.lon_min, self.lon_max
            )));
        }
        Ok(())
    }
}

/// Maximum acceptable share of defective values per check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tolerances {
    pub out_of_bounds: f64,
    pub duplicate_keys: f64,
    pub empty_fields: f64,
    pub malformed_keys: f64,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            out_of_bounds: 0.05,
            duplicate_keys: 0.01,
            empty_fields: 0.10,
            malformed_keys: 0.01,
        }
    }
}

impl Tolerances {
    fn validate(&self) -> PolicyResult<()> {
        let named = [
            ("out_of_bounds", self.out_of_bounds),
            ("duplicate_keys", self.duplicate_keys),
            ("empty_fields", self.empty_fields),
            ("malformed_keys", self.malformed_keys),
        ];

        for (name, value) in named {
            if !(0.0..=1.0).contains(&value) {
                return Err(PolicyError::InvalidConfiguration(format!(
                    "tolerance '{}' must be between 0 and 1, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }
}

/// Expected project layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StructurePolicy {
    pub package_manifest: PathBuf,
    pub package_name: String,
    pub required_dirs: Vec<String>,
    pub env_example: PathBuf,
    pub readme: PathBuf,
    pub readme_min_length: usize,
    pub readme_marker: String,
    pub scripts_dir: PathBuf,
    pub script_tests: Vec<String>,
    pub workflows_dir: PathBuf,
    pub workflows: Vec<String>,
    pub external_dir: PathBuf,
    pub dist_dir: PathBuf,
}

impl Default for StructurePolicy {
    fn default() -> Self {
        Self {
            package_manifest: PathBuf::from("package.json"),
            package_name: "sekolah-pseo".to_string(),
            required_dirs: strings(&["src", "scripts", "data", "docs"]),
            env_example: PathBuf::from(".env.example"),
            readme: PathBuf::from("README.md"),
            readme_min_length: 100,
            readme_marker: "Sekolah PSEO".to_string(),
            scripts_dir: PathBuf::from("scripts"),
            script_tests: strings(&[
                "utils.test.js",
                "rate-limiter.test.js",
                "resilience.test.js",
                "PageBuilder.test.js",
            ]),
            workflows_dir: PathBuf::from(".github/workflows"),
            workflows: strings(&["on-push.yml"]),
            external_dir: PathBuf::from("external"),
            dist_dir: PathBuf::from("dist"),
        }
    }
}
