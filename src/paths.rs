//! Location resolution.
//!
//! Whether a command runs "inside a project" decides where materials and
//! skills live. The answer is recomputed from the filesystem on every call;
//! nothing is cached and nothing is created while resolving.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Tooling configuration directory looked for in ancestors and used for project storage.
pub const CONFIG_DIR: &str = ".claude";

/// Version-control marker looked for in ancestors.
pub const VCS_MARKER: &str = ".git";

const PROJECT_MATERIALS_DIR: &str = "temp-materials";
const GLOBAL_MATERIALS_DIR: &str = "skill-materials";
const SKILLS_DIR: &str = "skills";

/// Which kind of location a context resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Project,
    Global,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => f.write_str("project"),
            Self::Global => f.write_str("global"),
        }
    }
}

/// Where materials and skills live for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationContext {
    pub mode: Mode,
    /// The ancestor carrying the project marker, in project mode.
    pub project_root: Option<PathBuf>,
    pub materials_root: PathBuf,
    pub skills_root: PathBuf,
}

impl LocationContext {
    /// Directory holding the materials called `name`.
    pub fn materials_dir(&self, name: &str) -> PathBuf {
        self.materials_root.join(name)
    }

    /// Directory holding the skill called `name`.
    pub fn skills_dir(&self, name: &str) -> PathBuf {
        self.skills_root.join(name)
    }
}

/// Resolve the location context for `start_dir`.
///
/// Walks `start_dir` and its ancestors up to the filesystem root looking for
/// `.git` or `.claude`. Never fails and never touches the filesystem beyond
/// existence checks.
pub fn resolve_context(start_dir: &Path, home: &Path) -> LocationContext {
    match find_project_root(start_dir) {
        Some(root) => {
            debug!(root = %root.display(), "resolved project context");
            let config = root.join(CONFIG_DIR);
            LocationContext {
                mode: Mode::Project,
                materials_root: config.join(PROJECT_MATERIALS_DIR),
                skills_root: config.join(SKILLS_DIR),
                project_root: Some(root),
            }
        }
        None => {
            debug!(home = %home.display(), "resolved global context");
            global_context(home)
        }
    }
}

/// The global-mode context rooted at `home`.
pub fn global_context(home: &Path) -> LocationContext {
    LocationContext {
        mode: Mode::Global,
        project_root: None,
        materials_root: global_materials_root(home),
        skills_root: home.join(CONFIG_DIR).join(SKILLS_DIR),
    }
}

/// Materials root used in global mode.
pub fn global_materials_root(home: &Path) -> PathBuf {
    home.join(GLOBAL_MATERIALS_DIR)
}

/// Materials root used in project mode for `project_root`.
pub fn project_materials_root(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR).join(PROJECT_MATERIALS_DIR)
}

/// First ancestor of `start_dir` (inclusive) that carries a project marker.
pub fn find_project_root(start_dir: &Path) -> Option<PathBuf> {
    let start = std::path::absolute(start_dir).unwrap_or_else(|_| start_dir.to_path_buf());
    start
        .ancestors()
        .find(|dir| dir.join(VCS_MARKER).exists() || dir.join(CONFIG_DIR).exists())
        .map(Path::to_path_buf)
}

/// Create `path` and its parents. An existing directory is fine.
pub fn ensure_dir(path: &Path) -> io::Result<()> {
    fs::create_dir_all(path)
}
