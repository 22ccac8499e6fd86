//! Project layout checks.
//!
//! Smoke checks on the files and directories the site build expects next
//! to the data. All paths are relative to the project root.

use std::fs;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::PolicyResult;
use crate::outcome::ValidationOutcome;
use crate::policy::{DataPolicy, StructurePolicy};

/// Report sections the layout checks belong to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    ProjectStructure,
    Configuration,
    ScriptTests,
    Workflows,
    DataLayout,
}

impl Section {
    pub fn title(&self) -> &'static str {
        match self {
            Section::ProjectStructure => "Project Structure",
            Section::Configuration => "Configuration",
            Section::ScriptTests => "JavaScript Tests Check",
            Section::Workflows => "GitHub Workflows",
            Section::DataLayout => "Data Validation",
        }
    }
}

/// A single layout check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructureCheck {
    PackageManifest,
    PackageFields,
    Directory(String),
    DataFile,
    EnvExample,
    Readme,
    ScriptTest(String),
    WorkflowsDir,
    Workflow(String),
    ExternalDir,
    DistCreatable,
}

impl StructureCheck {
    /// Every layout check for a policy, in report order.
    pub fn plan(policy: &DataPolicy) -> Vec<StructureCheck> {
        let structure = &policy.structure;
        let mut plan = vec![StructureCheck::PackageManifest, StructureCheck::PackageFields];
        plan.extend(structure.required_dirs.iter().cloned().map(StructureCheck::Directory));
        plan.push(StructureCheck::DataFile);
        plan.push(StructureCheck::EnvExample);
        plan.push(StructureCheck::Readme);
        plan.extend(structure.script_tests.iter().cloned().map(StructureCheck::ScriptTest));
        plan.push(StructureCheck::WorkflowsDir);
        plan.extend(structure.workflows.iter().cloned().map(StructureCheck::Workflow));
        plan.push(StructureCheck::ExternalDir);
        plan.push(StructureCheck::DistCreatable);
        plan
    }

    pub fn section(&self) -> Section {
        match self {
            StructureCheck::PackageManifest
            | StructureCheck::PackageFields
            | StructureCheck::Directory(_)
            | StructureCheck::DataFile => Section::ProjectStructure,
            StructureCheck::EnvExample | StructureCheck::Readme => Section::Configuration,
            StructureCheck::ScriptTest(_) => Section::ScriptTests,
            StructureCheck::WorkflowsDir | StructureCheck::Workflow(_) => Section::Workflows,
            StructureCheck::ExternalDir | StructureCheck::DistCreatable => Section::DataLayout,
        }
    }

    pub fn name(&self, policy: &DataPolicy) -> String {
        let structure = &policy.structure;
        match self {
            StructureCheck::PackageManifest => {
                format!("{} exists and is valid", structure.package_manifest.display())
            }
            StructureCheck::PackageFields => {
                format!("{} has required fields", structure.package_manifest.display())
            }
            StructureCheck::Directory(dir) => format!("Directory exists: {}/", dir),
            StructureCheck::DataFile => {
                let name = policy
                    .data_file
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_else(|| policy.data_file.display().to_string());
                format!("{} data file exists", name)
            }
            StructureCheck::EnvExample => format!("{} exists", structure.env_example.display()),
            StructureCheck::Readme => format!("{} exists with content", structure.readme.display()),
            StructureCheck::ScriptTest(file) => format!("JS test file exists: {}", file),
            StructureCheck::WorkflowsDir => {
                format!("{} directory exists", structure.workflows_dir.display())
            }
            StructureCheck::Workflow(file) => format!("{} workflow exists", file),
            StructureCheck::ExternalDir => {
                format!("{}/ directory exists", structure.external_dir.display())
            }
            StructureCheck::DistCreatable => {
                format!("{}/ directory can be created", structure.dist_dir.display())
            }
        }
    }

    /// Evaluate the check against a project root.
    pub fn evaluate(&self, root: &Path, policy: &DataPolicy) -> PolicyResult<ValidationOutcome> {
        let check = self.name(policy);
        let structure = &policy.structure;

        let outcome = match self {
            StructureCheck::PackageManifest => {
                path_exists(check, &root.join(&structure.package_manifest), "package manifest")
            }
            StructureCheck::PackageFields => return package_fields(check, root, structure),
            StructureCheck::Directory(dir) => dir_exists(check, &root.join(dir)),
            StructureCheck::DataFile => path_exists(check, &policy.data_path(root), "data file"),
            StructureCheck::EnvExample => {
                path_exists(check, &root.join(&structure.env_example), "environment example")
            }
            StructureCheck::Readme => return readme_content(check, root, structure),
            StructureCheck::ScriptTest(file) => {
                path_exists(check, &root.join(&structure.scripts_dir).join(file), "test file")
            }
            StructureCheck::WorkflowsDir => dir_exists(check, &root.join(&structure.workflows_dir)),
            StructureCheck::Workflow(file) => {
                path_exists(check, &root.join(&structure.workflows_dir).join(file), "workflow")
            }
            StructureCheck::ExternalDir => dir_exists(check, &root.join(&structure.external_dir)),
            StructureCheck::DistCreatable => return dist_creatable(check, &root.join(&structure.dist_dir)),
        };
        Ok(outcome)
    }
}

fn path_exists(check: String, path: &Path, what: &str) -> ValidationOutcome {
    if path.exists() {
        ValidationOutcome::pass(check)
    } else {
        ValidationOutcome::fail(check, format!("Expected {} to exist: {}", what, path.display()))
    }
}

fn dir_exists(check: String, path: &Path) -> ValidationOutcome {
    if path.is_dir() {
        ValidationOutcome::pass(check)
    } else {
        ValidationOutcome::fail(check, format!("Required directory {} should exist", path.display()))
    }
}

/// `package.json` parses and carries the expected name and a version.
fn package_fields(check: String, root: &Path, structure: &StructurePolicy) -> PolicyResult<ValidationOutcome> {
    let path = root.join(&structure.package_manifest);
    if !path.is_file() {
        return Ok(ValidationOutcome::fail(check, format!("{} not found", path.display())));
    }

    let manifest: Map<String, Value> = serde_json::from_str(&fs::read_to_string(&path)?)?;
    debug!("Package manifest {:?} has {} keys", path, manifest.len());

    let name = manifest.get("name").and_then(Value::as_str);
    if name != Some(structure.package_name.as_str()) {
        return Ok(ValidationOutcome::fail(
            check,
            format!("Expected name '{}' but got {:?}", structure.package_name, name),
        ));
    }
    // presence is enough; the value is not inspected
    if !manifest.contains_key("version") {
        return Ok(ValidationOutcome::fail(
            check,
            format!("Expected 'version' in {}", structure.package_manifest.display()),
        ));
    }

    Ok(ValidationOutcome::pass(check))
}

/// README exists, is substantial and names the project.
fn readme_content(check: String, root: &Path, structure: &StructurePolicy) -> PolicyResult<ValidationOutcome> {
    let path = root.join(&structure.readme);
    if !path.is_file() {
        return Ok(ValidationOutcome::fail(check, format!("{} should exist", path.display())));
    }

    let content = fs::read_to_string(&path)?;
    let length = content.chars().count();
    if length <= structure.readme_min_length {
        return Ok(ValidationOutcome::fail(
            check,
            format!(
                "README should have substantial content ({} chars, need more than {})",
                length, structure.readme_min_length
            ),
        ));
    }
    if !content.contains(&structure.readme_marker) {
        return Ok(ValidationOutcome::fail(
            check,
            format!("README should mention '{}'", structure.readme_marker),
        ));
    }

    Ok(ValidationOutcome::pass(check).with_metric("chars", length))
}

/// An existing build directory is left untouched. A missing one is created
/// and removed again.
fn dist_creatable(check: String, dist: &Path) -> PolicyResult<ValidationOutcome> {
    if dist.exists() {
        return Ok(if dist.is_dir() {
            ValidationOutcome::pass(check).with_message("already exists")
        } else {
            ValidationOutcome::fail(check, format!("{} exists but is not a directory", dist.display()))
        });
    }

    fs::create_dir_all(dist)?;
    let created = dist.is_dir();
    fs::remove_dir_all(dist)?;
    debug!("Probed creation of {:?}", dist);

    Ok(ValidationOutcome::gate(
        check,
        created,
        format!("{} should be creatable", dist.display()),
    ))
}
