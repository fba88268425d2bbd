//! Core skill constants shared by the initializer, validator and packager.

/// Name of the manifest file at the root of every skill bundle.
pub const MANIFEST_FILE: &str = "SKILL.md";

/// Subdirectories a bundle may carry next to its manifest.
pub const RESOURCE_DIRS: [&str; 3] = ["scripts", "references", "assets"];

/// Extension of packaged archives.
pub const ARCHIVE_EXTENSION: &str = "zip";

/// Marker written into generated example files so they can be told apart from real content.
pub const PLACEHOLDER_MARKER: &str = "skill-forge:placeholder";

/// Maximum length for skill names (in characters).
pub const MAX_SKILL_NAME_LENGTH: usize = 64;

/// Maximum length for descriptions (in characters).
pub const MAX_DESCRIPTION_LENGTH: usize = 1024;

/// Maximum length for compatibility notes (in characters).
pub const MAX_COMPATIBILITY_LENGTH: usize = 500;

/// Fields allowed in SKILL.md frontmatter.
pub const ALLOWED_FIELDS: [&str; 6] = [
    "name",
    "description",
    "license",
    "allowed-tools",
    "metadata",
    "compatibility",
];

/// Order in which fields are written in formatted output.
pub const FIELD_ORDER: [&str; 6] = [
    "name",
    "description",
    "license",
    "compatibility",
    "allowed-tools",
    "metadata",
];

/// File name of the archive produced for a skill called `name`.
pub fn archive_file_name(name: &str) -> String {
    format!("{name}.{ARCHIVE_EXTENSION}")
}

/// Whether `name` can be used as exactly one path component.
///
/// Rejects empty names, `.`/`..`, separators and NUL so a caller-supplied
/// name can never escape the directory it is joined onto.
pub fn is_single_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}
