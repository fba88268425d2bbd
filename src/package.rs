//! Packaging a validated bundle into a distributable archive.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use walkdir::WalkDir;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::error::{Finding, PackageError};
use crate::formatting::parse_manifest;
use crate::paths::ensure_dir;
use crate::skill::{archive_file_name, MANIFEST_FILE, RESOURCE_DIRS};
use crate::validation::{find_manifest, has_errors, normalize_name, validate_with, ValidateOptions};

/// What [`package_with_report`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageReport {
    pub archive: PathBuf,
    /// Archive entry names, in the order they were written.
    pub entries: Vec<String>,
    /// Warning-severity findings that did not stop packaging.
    pub warnings: Vec<Finding>,
}

/// Package `bundle` into `<name>.zip` in `output_dir` (or the bundle itself).
pub fn package(bundle: &Path, output_dir: Option<&Path>) -> Result<PathBuf, PackageError> {
    package_with_report(bundle, output_dir, &ValidateOptions::default())
        .map(|report| report.archive)
}

/// Validate, then write the archive.
///
/// Nothing is created when validation reports an error. The archive is
/// written to a temporary file next to its destination and moved into
/// place once complete, so a failed run never leaves a truncated archive.
pub fn package_with_report(
    bundle: &Path,
    output_dir: Option<&Path>,
    options: &ValidateOptions,
) -> Result<PackageReport, PackageError> {
    if !bundle.is_dir() {
        return Err(PackageError::NotFound(bundle.to_path_buf()));
    }

    let findings = validate_with(bundle, options);
    if has_errors(&findings) {
        return Err(PackageError::Aborted { findings });
    }
    let name = manifest_name(bundle)?;

    let bundle = canonical(bundle)?;
    let output_dir = match output_dir {
        Some(dir) => {
            ensure_dir(dir).map_err(|source| PackageError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
            canonical(dir)?
        }
        None => bundle.clone(),
    };
    let archive = output_dir.join(archive_file_name(&name));

    let files = collect_files(&bundle, &archive, options);
    let entries = write_archive(&name, &files, &output_dir, &archive)?;

    info!(archive = %archive.display(), entries = entries.len(), "packaged skill");
    Ok(PackageReport {
        archive,
        entries,
        warnings: findings,
    })
}

fn manifest_name(bundle: &Path) -> Result<String, PackageError> {
    let malformed = |reason: String| PackageError::Aborted {
        findings: vec![Finding::ManifestMalformed(reason)],
    };

    let path = find_manifest(bundle).ok_or_else(|| PackageError::Aborted {
        findings: vec![Finding::ManifestMissing],
    })?;
    let content = fs::read_to_string(&path).map_err(|source| PackageError::Io {
        path: path.clone(),
        source,
    })?;
    let manifest = parse_manifest(&content).map_err(|err| malformed(err.to_string()))?;
    manifest
        .name()
        .map(normalize_name)
        .ok_or_else(|| malformed("frontmatter has no name".to_string()))
}

fn canonical(path: &Path) -> Result<PathBuf, PackageError> {
    fs::canonicalize(path).map_err(|source| PackageError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Files to archive as (absolute path, path relative to the bundle), sorted.
fn collect_files(bundle: &Path, archive: &Path, options: &ValidateOptions) -> Vec<(PathBuf, String)> {
    let mut files = vec![(bundle.join(MANIFEST_FILE), MANIFEST_FILE.to_string())];

    let dirs = RESOURCE_DIRS
        .iter()
        .map(|dir| (*dir).to_string())
        .chain(options.allowed_dirs.iter().cloned());
    for dir in dirs {
        let root = bundle.join(&dir);
        if !root.is_dir() {
            continue;
        }
        let walker = WalkDir::new(&root)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != "__pycache__")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .filter(|entry| entry.path().extension().is_none_or(|ext| ext != "pyc"))
            .filter(|entry| entry.path() != archive);
        for entry in walker {
            let Ok(relative) = entry.path().strip_prefix(bundle) else {
                continue;
            };
            let relative = relative
                .components()
                .map(|part| part.as_os_str().to_string_lossy())
                .collect::<Vec<_>>()
                .join("/");
            files.push((entry.path().to_path_buf(), relative));
        }
    }

    files.sort_by(|a, b| a.1.cmp(&b.1));
    files.dedup_by(|a, b| a.1 == b.1);
    files
}

fn write_archive(
    name: &str,
    files: &[(PathBuf, String)],
    output_dir: &Path,
    archive: &Path,
) -> Result<Vec<String>, PackageError> {
    let zip_error = |source| PackageError::Archive {
        path: archive.to_path_buf(),
        source,
    };
    let io_error = |path: &Path| {
        let path = path.to_path_buf();
        move |source| PackageError::Io { path, source }
    };

    let mut temp = tempfile::Builder::new()
        .prefix(".skill-forge-")
        .suffix(".zip.tmp")
        .tempfile_in(output_dir)
        .map_err(io_error(output_dir))?;

    let mut entries = Vec::with_capacity(files.len());
    {
        let mut writer = ZipWriter::new(temp.as_file_mut());
        for (path, relative) in files {
            let entry_name = format!("{name}/{relative}");
            let options = SimpleFileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(file_mode(path));
            writer
                .start_file(entry_name.as_str(), options)
                .map_err(zip_error)?;
            let mut source = File::open(path).map_err(io_error(path))?;
            io::copy(&mut source, &mut writer).map_err(io_error(path))?;
            debug!(entry = %entry_name, "added");
            entries.push(entry_name);
        }
        writer.finish().map_err(zip_error)?;
    }

    temp.persist(archive)
        .map_err(|err| PackageError::Io {
            path: archive.to_path_buf(),
            source: err.error,
        })?;
    Ok(entries)
}

#[cfg(unix)]
fn file_mode(path: &Path) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    fs::metadata(path)
        .map(|meta| meta.permissions().mode() & 0o777)
        .unwrap_or(0o644)
}

#[cfg(not(unix))]
const fn file_mode(_path: &Path) -> u32 {
    0o644
}
