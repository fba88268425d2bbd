//! Scaffolding for new skill bundles.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use tracing::info;

use crate::error::InitError;
use crate::formatting::format_frontmatter;
use crate::paths::ensure_dir;
use crate::skill::{MANIFEST_FILE, PLACEHOLDER_MARKER};
use crate::validation::{normalize_name, validate_name};

const DESCRIPTION_PLACEHOLDER: &str =
    "[TODO: Explain what this skill does and when it should be used.]";

/// Create a new bundle called `name` under `target_root`.
///
/// The bundle directory must not exist yet; on conflict nothing is written.
pub fn init(name: &str, target_root: &Path) -> Result<PathBuf, InitError> {
    let problems = validate_name(name, None);
    if !problems.is_empty() {
        return Err(InitError::InvalidName {
            name: name.to_string(),
            problems: problems.iter().map(ToString::to_string).collect(),
        });
    }
    let name = normalize_name(name);

    ensure_dir(target_root).map_err(|source| InitError::Io {
        path: target_root.to_path_buf(),
        source,
    })?;

    let bundle = target_root.join(&name);
    match fs::create_dir(&bundle) {
        Ok(()) => {}
        Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(InitError::NameConflict { path: bundle });
        }
        Err(source) => return Err(InitError::Io { path: bundle, source }),
    }

    let mut metadata = BTreeMap::new();
    metadata.insert("name".to_string(), Value::String(name.clone()));
    metadata.insert(
        "description".to_string(),
        Value::String(DESCRIPTION_PLACEHOLDER.to_string()),
    );
    let manifest = format!("{}\n\n{}", format_frontmatter(&metadata)?, manifest_body(&name));
    write(&bundle.join(MANIFEST_FILE), &manifest)?;

    let script = bundle.join("scripts").join("example.py");
    write(
        &script,
        &format!(
            "#!/usr/bin/env python3\n# {PLACEHOLDER_MARKER}\n\"\"\"Example helper for {name}. Replace or delete.\"\"\"\n\n\nif __name__ == \"__main__\":\n    print(\"{name}: replace this script\")\n"
        ),
    )?;
    make_executable(&script)?;

    write(
        &bundle.join("references").join("example.md"),
        &format!(
            "<!-- {PLACEHOLDER_MARKER} -->\n# Reference notes for {name}\n\nPut documentation the agent should read on demand here.\n"
        ),
    )?;
    write(
        &bundle.join("assets").join("example.txt"),
        &format!(
            "{PLACEHOLDER_MARKER}\nFiles used in the skill's output (templates, images, fonts) go in assets/.\n"
        ),
    )?;

    info!(bundle = %bundle.display(), "initialized skill");
    Ok(bundle)
}

fn manifest_body(name: &str) -> String {
    let title = name
        .split('-')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect()
            })
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "# {title}\n\n\
         ## Overview\n\n\
         [TODO: One or two sentences on what this skill enables.]\n\n\
         ## Instructions\n\n\
         [TODO: Step-by-step guidance for using the skill.]\n\n\
         ## Resources\n\n\
         - `scripts/`: executable helpers\n\
         - `references/`: documentation loaded on demand\n\
         - `assets/`: files used in output\n"
    )
}

fn write(path: &Path, contents: &str) -> Result<(), InitError> {
    let io_error = |source| InitError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        ensure_dir(parent).map_err(io_error)?;
    }
    fs::write(path, contents).map_err(io_error)
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<(), InitError> {
    use std::os::unix::fs::PermissionsExt;

    let io_error = |source| InitError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut permissions = fs::metadata(path).map_err(io_error)?.permissions();
    permissions.set_mode(0o755);
    fs::set_permissions(path, permissions).map_err(io_error)
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
const fn make_executable(_path: &Path) -> Result<(), InitError> {
    Ok(())
}
