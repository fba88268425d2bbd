//! Listing and deleting fetched materials.
//!
//! Materials live in up to two places: the project's
//! `.claude/temp-materials` and the user's global `skill-materials`. The
//! registry never caches: every call rescans the filesystem.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::CleanupError;
use crate::paths::{global_materials_root, project_materials_root, LocationContext, Mode};
use crate::skill::is_single_component;

/// One materials directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialsEntry {
    pub name: String,
    pub path: PathBuf,
    /// Total size of regular files, in bytes.
    pub size: u64,
    pub modified: Option<SystemTime>,
    /// The location the entry was found in; `None` for custom output paths.
    pub scope: Option<Mode>,
}

impl MaterialsEntry {
    /// Describe the directory at `path`, measuring it now.
    pub fn from_dir(name: &str, path: PathBuf, scope: Option<Mode>) -> Self {
        let modified = fs::metadata(&path).and_then(|meta| meta.modified()).ok();
        Self {
            name: name.to_string(),
            size: dir_size(&path),
            path,
            modified,
            scope,
        }
    }
}

/// A directory scanned for materials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterialsLocation {
    pub scope: Mode,
    pub root: PathBuf,
}

#[derive(Debug)]
pub enum DeleteOutcome {
    /// The first match was removed. `residual` is a same-named entry that
    /// remains in a later location.
    Deleted {
        entry: MaterialsEntry,
        residual: Option<MaterialsEntry>,
    },
    Declined {
        entry: MaterialsEntry,
    },
    NotFound {
        searched: Vec<PathBuf>,
    },
}

#[derive(Debug, Default)]
pub struct BulkDeleteReport {
    pub deleted: Vec<MaterialsEntry>,
    pub failed: Vec<(MaterialsEntry, CleanupError)>,
    /// The batch confirmation was refused; nothing was touched.
    pub declined: bool,
}

#[derive(Debug, Clone)]
pub struct MaterialsRegistry {
    locations: Vec<MaterialsLocation>,
}

impl MaterialsRegistry {
    /// Project location first (when `context` is in project mode), then global.
    pub fn new(context: &LocationContext, home: &Path) -> Self {
        let mut locations = Vec::with_capacity(2);
        if let Some(root) = &context.project_root {
            locations.push(MaterialsLocation {
                scope: Mode::Project,
                root: project_materials_root(root),
            });
        }
        let global = global_materials_root(home);
        if locations.iter().all(|location| location.root != global) {
            locations.push(MaterialsLocation {
                scope: Mode::Global,
                root: global,
            });
        }
        Self { locations }
    }

    pub fn locations(&self) -> &[MaterialsLocation] {
        &self.locations
    }

    /// Every materials directory, location by location, sorted by name within each.
    pub fn list(&self) -> Vec<MaterialsEntry> {
        self.locations.iter().flat_map(scan).collect()
    }

    /// Entries called `name`, in location order.
    pub fn find(&self, name: &str) -> Vec<MaterialsEntry> {
        self.locations
            .iter()
            .map(|location| (location, location.root.join(name)))
            .filter(|(_, path)| fs::symlink_metadata(path).is_ok_and(|meta| meta.is_dir()))
            .map(|(location, path)| MaterialsEntry::from_dir(name, path, Some(location.scope)))
            .collect()
    }

    /// Delete the first entry called `name`.
    ///
    /// `confirm` is asked only when `force` is false; a refusal leaves the
    /// entry in place.
    pub fn delete(
        &self,
        name: &str,
        force: bool,
        confirm: impl FnOnce(&MaterialsEntry) -> bool,
    ) -> Result<DeleteOutcome, CleanupError> {
        if !is_single_component(name) {
            return Err(CleanupError::InvalidName(name.to_string()));
        }

        let mut matches = self.find(name).into_iter();
        let Some(entry) = matches.next() else {
            return Ok(DeleteOutcome::NotFound {
                searched: self
                    .locations
                    .iter()
                    .map(|location| location.root.clone())
                    .collect(),
            });
        };

        if !force && !confirm(&entry) {
            debug!(name, "deletion declined");
            return Ok(DeleteOutcome::Declined { entry });
        }

        remove(&entry)?;
        Ok(DeleteOutcome::Deleted {
            entry,
            residual: matches.next(),
        })
    }

    /// Delete one previously listed entry, as picked interactively.
    ///
    /// The entry must sit directly inside one of this registry's locations.
    pub fn delete_entry(&self, entry: &MaterialsEntry) -> Result<(), CleanupError> {
        let known = self
            .locations
            .iter()
            .any(|location| entry.path.parent() == Some(location.root.as_path()));
        if !known || !is_single_component(&entry.name) {
            return Err(CleanupError::InvalidName(entry.name.clone()));
        }
        remove(entry)
    }

    /// Delete every listed entry after a single confirmation.
    ///
    /// A failure on one entry is recorded and the rest are still attempted.
    pub fn delete_all(
        &self,
        force: bool,
        confirm: impl FnOnce(&[MaterialsEntry]) -> bool,
    ) -> BulkDeleteReport {
        let entries = self.list();
        if entries.is_empty() {
            return BulkDeleteReport::default();
        }
        if !force && !confirm(&entries) {
            return BulkDeleteReport {
                declined: true,
                ..BulkDeleteReport::default()
            };
        }

        let mut report = BulkDeleteReport::default();
        for entry in entries {
            match remove(&entry) {
                Ok(()) => report.deleted.push(entry),
                Err(err) => {
                    warn!(path = %entry.path.display(), error = %err, "could not delete");
                    report.failed.push((entry, err));
                }
            }
        }
        report
    }
}

fn scan(location: &MaterialsLocation) -> Vec<MaterialsEntry> {
    let Ok(read_dir) = fs::read_dir(&location.root) else {
        return Vec::new();
    };

    let mut entries: Vec<MaterialsEntry> = read_dir
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_ok_and(|kind| kind.is_dir()))
        .filter_map(|entry| {
            let name = entry.file_name().to_str()?.to_string();
            (!name.starts_with('.')).then(|| {
                MaterialsEntry::from_dir(&name, entry.path(), Some(location.scope))
            })
        })
        .collect();
    entries.sort_by(|a, b| a.name.cmp(&b.name));
    entries
}

fn remove(entry: &MaterialsEntry) -> Result<(), CleanupError> {
    fs::remove_dir_all(&entry.path).map_err(|source| CleanupError::Io {
        path: entry.path.clone(),
        source,
    })?;
    info!(path = %entry.path.display(), "deleted materials");
    Ok(())
}

/// Sum of regular file sizes under `path`. Symlinks are not followed.
pub fn dir_size(path: &Path) -> u64 {
    WalkDir::new(path)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| entry.metadata().ok())
        .map(|meta| meta.len())
        .sum()
}

/// Human-readable size: `512 B`, `12.3 KB`, `4.0 MB`.
pub fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut size = bytes as f64 / 1024.0;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{size:.1} {}", UNITS[unit])
}
