//! Integration tests for the check suite against on-disk projects.

use std::fs;
use std::path::Path;
use tempfile::tempdir;

use sekolah_policy::{
    checks::names, render_text, run_all, run_data, DataCheck, DataPolicy, StructureCheck, SuiteReport,
    DEFAULT_POLICY_FILE,
};

const HEADER: &str =
    "npsn,nama,bentuk_pendidikan,status,alamat,kelurahan,kecamatan,kab_kota,provinsi,lat,lon,updated_at";

fn school(npsn: &str, lat: &str, lon: &str) -> String {
    format!(
        "{npsn},SD Negeri {npsn},SD,NEGERI,\"Jl. Merdeka No. 1, RT 02\",Menteng,Menteng,Jakarta Pusat,DKI Jakarta,{lat},{lon},2024-01-15"
    )
}

fn write_csv(path: &Path, rows: &[String]) {
    let mut content = String::from(HEADER);
    content.push('\n');
    for row in rows {
        content.push_str(row);
        content.push('\n');
    }
    fs::write(path, content).unwrap();
}

fn clean_rows(n: usize) -> Vec<String> {
    (0..n)
        .map(|i| school(&(20_100_000 + i).to_string(), "-6.1754", "106.8272"))
        .collect()
}

/// Lay out a project that satisfies every layout check.
fn scaffold_project(root: &Path, policy: &DataPolicy) {
    let structure = &policy.structure;

    fs::write(
        root.join(&structure.package_manifest),
        r#"{"name": "sekolah-pseo", "version": "0.3.1", "private": true}"#,
    )
    .unwrap();
    for dir in &structure.required_dirs {
        fs::create_dir_all(root.join(dir)).unwrap();
    }
    fs::write(root.join(&structure.env_example), "SITE_URL=https://example.org\n").unwrap();
    fs::write(
        root.join(&structure.readme),
        format!(
            "# Sekolah PSEO\n\nProgrammatic pages for every school in Indonesia.\n\n{}\n",
            "Build the site with `npm run build` after running the ETL step. ".repeat(3)
        ),
    )
    .unwrap();
    for file in &structure.script_tests {
        fs::write(root.join(&structure.scripts_dir).join(file), "test('ok', () => {});\n").unwrap();
    }
    let workflows = root.join(&structure.workflows_dir);
    fs::create_dir_all(&workflows).unwrap();
    for file in &structure.workflows {
        fs::write(workflows.join(file), "on: push\n").unwrap();
    }
    fs::create_dir_all(root.join(&structure.external_dir)).unwrap();
}

/// A complete project with clean data passes every check.
#[test]
fn test_full_project_passes() {
    let temp = tempdir().unwrap();
    let policy = DataPolicy::default();
    scaffold_project(temp.path(), &policy);
    write_csv(&policy.data_path(temp.path()), &clean_rows(40));

    let suite = run_all(temp.path(), &policy);

    let failures: Vec<_> = suite.failures().iter().map(|r| (&r.name, &r.error)).collect();
    assert!(failures.is_empty(), "unexpected failures: {:?}", failures);
    assert!(suite.passed());

    let plan = StructureCheck::plan(&policy).len();
    // basic columns, existence, seven table checks, malformed
    assert_eq!(suite.results().len(), plan + 10);
    assert!(suite.results().iter().all(|r| !r.skipped));

    // the dist probe leaves nothing behind
    assert!(!temp.path().join(&policy.structure.dist_dir).exists());
}

/// An empty directory fails layout checks but never aborts the run.
#[test]
fn test_empty_project_reports_every_check() {
    let temp = tempdir().unwrap();
    let policy = DataPolicy::default();

    let suite = run_all(temp.path(), &policy);

    let plan = StructureCheck::plan(&policy).len();
    assert_eq!(suite.results().len(), plan + 10);
    assert!(!suite.passed());

    let names_failed: Vec<&str> = suite.failures().iter().map(|r| r.name.as_str()).collect();
    assert!(names_failed.contains(&"package.json exists and is valid"));
    assert!(names_failed.contains(&names::DATA_FILE_EXISTS));
    // table checks are skipped without a data file
    assert!(!names_failed.contains(&names::KEYS_UNIQUE));
    assert!(!names_failed.contains(&names::MALFORMED_TOLERATED));
}

/// A header-only data file fails nothing on the data side.
#[test]
fn test_header_only_data() {
    let temp = tempdir().unwrap();
    let policy = DataPolicy::default();
    let path = temp.path().join("schools.csv");
    write_csv(&path, &[]);

    let suite = run_data(&path, &policy);

    assert!(suite.passed(), "{:?}", suite.failures());
    let extended = suite
        .results()
        .iter()
        .find(|r| r.name == names::EXTENDED_COLUMNS)
        .unwrap();
    assert!(!extended.skipped);
    let content = suite.results().iter().find(|r| r.name == names::HAS_CONTENT).unwrap();
    assert!(content.skipped);
}

/// Defects under tolerance pass; defects over tolerance fail.
#[test]
fn test_tolerance_thresholds() {
    let temp = tempdir().unwrap();
    let policy = DataPolicy::default();
    let path = temp.path().join("schools.csv");

    // 5 of 100 out of bounds is exactly at the 5% threshold
    let mut rows = clean_rows(95);
    rows.extend((0..5).map(|i| school(&(30_000_000 + i).to_string(), "48.85", "2.35")));
    write_csv(&path, &rows);

    let suite = run_data(&path, &policy);
    let bounds = suite
        .results()
        .iter()
        .find(|r| r.name == names::COORDINATES_IN_BOUNDS)
        .unwrap();
    assert!(bounds.passed, "{:?}", bounds.error);

    rows.push(school("30000099", "48.85", "2.35"));
    write_csv(&path, &rows);

    let suite = run_data(&path, &policy);
    let bounds = suite
        .results()
        .iter()
        .find(|r| r.name == names::COORDINATES_IN_BOUNDS)
        .unwrap();
    assert!(!bounds.passed);
    assert!(bounds.error.as_deref().unwrap().contains("Too many invalid coordinates"));
}

/// An unreadable data file fails every table check and the run goes on.
#[test]
fn test_unreadable_file_fails_table_checks() {
    let temp = tempdir().unwrap();
    let policy = DataPolicy::default();
    let path = temp.path().join("schools.csv");
    fs::write(&path, b"npsn,na\xff\xfema\n20100001,SD Negeri 1\n").unwrap();

    let suite = run_data(&path, &policy);
    let results = suite.results();
    assert_eq!(results.len(), DataCheck::ALL.len() + 2);

    let exists = results.iter().find(|r| r.name == names::DATA_FILE_EXISTS).unwrap();
    assert!(exists.passed);
    let malformed = results.iter().find(|r| r.name == names::MALFORMED_TOLERATED).unwrap();
    assert!(malformed.passed);

    for check in DataCheck::ALL {
        let record = results.iter().find(|r| r.name == check.name()).unwrap();
        assert!(!record.passed, "{} should fail", record.name);
        let error = record.error.as_deref().unwrap();
        assert!(error.starts_with("Check evaluation failed"), "{}", error);
        assert!(error.to_lowercase().contains("utf-8"), "{}", error);
    }
    assert_eq!(suite.summary().failed, DataCheck::ALL.len());
}

/// Duplicate and non-numeric keys are reported together.
#[test]
fn test_key_defects() {
    let temp = tempdir().unwrap();
    let policy = DataPolicy::default();
    let path = temp.path().join("schools.csv");

    let mut rows = clean_rows(10);
    rows.push(school("20100000", "-6.2", "106.8"));
    rows.push(school("P9990001", "-6.2", "106.8"));
    write_csv(&path, &rows);

    let suite = run_data(&path, &policy);
    let failed: Vec<&str> = suite.failures().iter().map(|r| r.name.as_str()).collect();

    assert_eq!(failed, vec![names::KEYS_UNIQUE, names::KEYS_NUMERIC]);
}

/// Missing columns in a real file fail both schema checks.
#[test]
fn test_missing_columns() {
    let temp = tempdir().unwrap();
    let policy = DataPolicy::default();
    let path = temp.path().join("schools.csv");
    fs::write(&path, "npsn,nama\n20100001,SD Negeri 1\n").unwrap();

    let suite = run_data(&path, &policy);
    let basic = suite.results().iter().find(|r| r.name == names::BASIC_COLUMNS).unwrap();
    let extended = suite
        .results()
        .iter()
        .find(|r| r.name == names::EXTENDED_COLUMNS)
        .unwrap();

    assert!(!basic.passed);
    assert!(basic.error.as_deref().unwrap().contains("'provinsi'"));
    assert!(!extended.passed);
}

/// A policy file in the project root narrows what the run expects.
#[test]
fn test_policy_file_customizes_run() {
    let temp = tempdir().unwrap();
    let policy_path = temp.path().join(DEFAULT_POLICY_FILE);
    fs::write(
        &policy_path,
        r#"
data_file: build/sekolah.csv
structure:
  required_dirs: [build]
  script_tests: []
  workflows: []
"#,
    )
    .unwrap();

    let policy = DataPolicy::from_file(&policy_path).unwrap();
    scaffold_project(temp.path(), &policy);
    write_csv(&temp.path().join("build/sekolah.csv"), &clean_rows(3));

    let suite = run_all(temp.path(), &policy);
    assert!(suite.passed(), "{:?}", suite.failures());
    assert!(suite
        .results()
        .iter()
        .any(|r| r.name == "sekolah.csv data file exists"));
}

/// Reports render from a finished suite.
#[test]
fn test_reports() {
    let temp = tempdir().unwrap();
    let policy = DataPolicy::default();
    let path = temp.path().join("schools.csv");
    write_csv(&path, &clean_rows(5));

    let suite = run_data(&path, &policy);

    let text = render_text(&suite, true);
    assert!(text.contains("TEST RESULTS"));
    assert!(text.contains(&format!("✓ PASS {}", names::DATA_FILE_EXISTS)));
    assert!(text.contains("✓ All tests passed!"));

    let json: serde_json::Value = serde_json::from_str(&SuiteReport::new(&suite).to_json().unwrap()).unwrap();
    assert_eq!(json["summary"]["total"], suite.results().len());
    assert_eq!(json["summary"]["success_rate"], 100.0);
}
