//! Skill bundle validation.
//!
//! [`validate`] inspects a bundle directory and returns every [`Finding`]
//! instead of stopping at the first one. It never writes to disk.
//!
//! # Rules
//!
//! - `SKILL.md`: required, uppercase, YAML frontmatter followed by a body
//! - `name`: required, lowercase, 1-64 chars, alphanumeric + hyphen only,
//!   no leading/trailing/consecutive hyphens, must match directory name (NFKC normalized)
//! - `description`: required, 1-1024 chars
//! - `license`: optional string, non-empty if provided
//! - `compatibility`: optional string, max 500 chars
//! - subdirectories: only `scripts/`, `references/`, `assets/` (warning otherwise)
//! - resource directories: must hold real content (warning otherwise)

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::debug;
use unicode_normalization::UnicodeNormalization;
use walkdir::WalkDir;

use crate::error::Finding;
use crate::formatting::parse_manifest;
use crate::skill::{
    ALLOWED_FIELDS, MANIFEST_FILE, MAX_COMPATIBILITY_LENGTH, MAX_DESCRIPTION_LENGTH,
    MAX_SKILL_NAME_LENGTH, PLACEHOLDER_MARKER, RESOURCE_DIRS,
};

/// Files larger than this are treated as real content without being read.
const PLACEHOLDER_SCAN_LIMIT: u64 = 64 * 1024;

/// Knobs for [`validate_with`].
#[derive(Debug, Clone, Default)]
pub struct ValidateOptions {
    /// Extra subdirectory names accepted next to the standard resource directories.
    pub allowed_dirs: Vec<String>,
}

impl ValidateOptions {
    pub(crate) fn allows_dir(&self, name: &str) -> bool {
        RESOURCE_DIRS.contains(&name) || self.allowed_dirs.iter().any(|dir| dir == name)
    }
}

/// Validate a bundle with default options.
pub fn validate(bundle: &Path) -> Vec<Finding> {
    validate_with(bundle, &ValidateOptions::default())
}

/// Validate a bundle, returning all findings in a stable order.
pub fn validate_with(bundle: &Path, options: &ValidateOptions) -> Vec<Finding> {
    let mut findings = Vec::new();

    if !bundle.is_dir() {
        findings.push(Finding::NotADirectory(bundle.to_path_buf()));
        return findings;
    }

    match find_manifest(bundle) {
        None => findings.push(Finding::ManifestMissing),
        Some(path) => findings.extend(check_manifest(bundle, &path)),
    }

    findings.extend(check_directories(bundle, options));

    debug!(
        bundle = %bundle.display(),
        findings = findings.len(),
        "validated skill bundle"
    );
    findings
}

/// Whether any finding blocks packaging.
pub fn has_errors(findings: &[Finding]) -> bool {
    findings.iter().any(Finding::is_error)
}

/// Locate the manifest, preferring the uppercase spelling.
pub fn find_manifest(bundle: &Path) -> Option<PathBuf> {
    let entries = fs::read_dir(bundle).ok()?;
    let mut fallback = None;
    for entry in entries.filter_map(Result::ok) {
        let name = entry.file_name();
        let Some(name) = name.to_str() else {
            continue;
        };
        if name == MANIFEST_FILE {
            return Some(entry.path());
        }
        if name.eq_ignore_ascii_case(MANIFEST_FILE) {
            fallback = Some(entry.path());
        }
    }
    fallback
}

fn check_manifest(bundle: &Path, path: &Path) -> Vec<Finding> {
    let mut findings = Vec::new();

    if path.file_name().and_then(|n| n.to_str()) != Some(MANIFEST_FILE) {
        findings.push(Finding::ManifestCase);
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            findings.push(Finding::ManifestUnreadable {
                path: path.to_path_buf(),
                reason: err.to_string(),
            });
            return findings;
        }
    };

    match parse_manifest(&content) {
        Ok(manifest) => {
            findings.extend(validate_metadata(&manifest.metadata, Some(bundle)));
            let placeholder_description = manifest
                .description()
                .is_some_and(|text| text.contains("[TODO"));
            if placeholder_description || manifest.body.contains("[TODO") {
                findings.push(Finding::PlaceholderContent);
            }
        }
        Err(err) => findings.push(Finding::ManifestMalformed(err.to_string())),
    }

    findings
}

fn check_directories(bundle: &Path, options: &ValidateOptions) -> Vec<Finding> {
    let mut findings = Vec::new();

    let Ok(entries) = fs::read_dir(bundle) else {
        return findings;
    };
    let mut dirs: Vec<(String, PathBuf)> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
        .map(|entry| (entry.file_name().to_string_lossy().to_string(), entry.path()))
        .filter(|(name, _)| !name.starts_with('.'))
        .collect();
    dirs.sort();

    for (name, path) in dirs {
        if !options.allows_dir(&name) {
            findings.push(Finding::UnexpectedDirectory(name));
        } else if RESOURCE_DIRS.contains(&name.as_str()) && !has_real_content(&path) {
            findings.push(Finding::EmptyResourceDirectory(name));
        }
    }

    findings
}

/// True when `dir` holds at least one file that is not a generated example.
fn has_real_content(dir: &Path) -> bool {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .any(|entry| !is_placeholder_file(entry.path()))
}

fn is_placeholder_file(path: &Path) -> bool {
    let small = fs::metadata(path).is_ok_and(|meta| meta.len() <= PLACEHOLDER_SCAN_LIMIT);
    if !small {
        return false;
    }
    fs::read(path).is_ok_and(|bytes| {
        String::from_utf8_lossy(&bytes).contains(PLACEHOLDER_MARKER)
    })
}

/// Validate the metadata extracted from a SKILL.md file.
///
/// `skill_dir`, when given, is used to check that the name matches the
/// directory the manifest lives in.
pub fn validate_metadata(
    metadata: &BTreeMap<String, Value>,
    skill_dir: Option<&Path>,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    let extra_fields: Vec<String> = metadata
        .keys()
        .filter(|key| !ALLOWED_FIELDS.contains(&key.as_str()))
        .cloned()
        .collect();
    if !extra_fields.is_empty() {
        findings.push(Finding::UnexpectedFields {
            fields: extra_fields.join(", "),
            allowed: &ALLOWED_FIELDS,
        });
    }

    match metadata.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => {
            findings.extend(validate_name(name, skill_dir));
        }
        Some(_) => findings.push(Finding::EmptyField("name".to_string())),
        None => findings.push(Finding::MissingField("name".to_string())),
    }

    match metadata.get("description") {
        Some(Value::String(description)) if !description.trim().is_empty() => {
            let actual = description.chars().count();
            if actual > MAX_DESCRIPTION_LENGTH {
                findings.push(Finding::DescriptionTooLong {
                    limit: MAX_DESCRIPTION_LENGTH,
                    actual,
                });
            }
        }
        Some(_) => findings.push(Finding::EmptyField("description".to_string())),
        None => findings.push(Finding::MissingField("description".to_string())),
    }

    match metadata.get("license") {
        Some(Value::String(license)) if license.trim().is_empty() => {
            findings.push(Finding::EmptyLicense);
        }
        Some(Value::String(_)) | None => {}
        Some(_) => findings.push(Finding::InvalidType("license".to_string())),
    }

    match metadata.get("compatibility") {
        Some(Value::String(text)) => {
            let actual = text.chars().count();
            if actual > MAX_COMPATIBILITY_LENGTH {
                findings.push(Finding::CompatibilityTooLong {
                    limit: MAX_COMPATIBILITY_LENGTH,
                    actual,
                });
            }
        }
        None => {}
        Some(_) => findings.push(Finding::InvalidType("compatibility".to_string())),
    }

    findings
}

/// Check a skill name against the naming convention.
///
/// Names are compared after NFKC normalisation so visually identical
/// spellings of the same name are accepted.
pub fn validate_name(name: &str, skill_dir: Option<&Path>) -> Vec<Finding> {
    let mut findings = Vec::new();

    if name.trim().is_empty() {
        findings.push(Finding::EmptyField("name".to_string()));
        return findings;
    }

    let normalized = normalize_name(name);
    let actual = normalized.chars().count();

    if actual > MAX_SKILL_NAME_LENGTH {
        findings.push(Finding::NameTooLong {
            name: normalized.clone(),
            limit: MAX_SKILL_NAME_LENGTH,
            actual,
        });
    }

    if normalized != normalized.to_lowercase() {
        findings.push(Finding::NameNotLowercase(normalized.clone()));
    }

    if normalized.starts_with('-') || normalized.ends_with('-') {
        findings.push(Finding::NameInvalidHyphen);
    }

    if normalized.contains("--") {
        findings.push(Finding::NameConsecutiveHyphens);
    }

    if !normalized.chars().all(|c| c.is_alphanumeric() || c == '-') {
        findings.push(Finding::NameInvalidChars(normalized.clone()));
    }

    if let Some(dir_name) = skill_dir
        .and_then(Path::file_name)
        .map(|n| n.to_string_lossy().to_string())
    {
        let dir_norm: String = dir_name.nfkc().collect();
        if dir_norm != normalized {
            findings.push(Finding::NameMismatch {
                dir: dir_name,
                name: normalized,
            });
        }
    }

    findings
}

/// Trim and NFKC-normalise a skill name.
pub fn normalize_name(name: &str) -> String {
    name.trim().nfkc().collect()
}
