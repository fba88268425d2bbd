//! Error types for skill-forge.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when parsing SKILL.md frontmatter.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The file does not start with YAML frontmatter delimiter.
    #[error("SKILL.md must start with YAML frontmatter (---)")]
    MissingFrontmatter,

    /// The frontmatter is not properly closed with a second delimiter.
    #[error("SKILL.md frontmatter not properly closed with ---")]
    UnclosedFrontmatter,

    /// The YAML in the frontmatter is invalid.
    #[error("Invalid YAML in frontmatter: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    /// The frontmatter is not a YAML mapping.
    #[error("SKILL.md frontmatter must be a YAML mapping")]
    NotAMapping,

    /// A frontmatter key is not a string.
    #[error("Frontmatter keys must be strings")]
    NonStringKey,

    /// A value cannot be rendered back into frontmatter.
    #[error("Unsupported YAML value type for formatting")]
    UnsupportedValueType,
}

/// How serious a [`Finding`] is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Worth reporting, but does not block packaging.
    Warning,
    /// Blocks packaging until resolved.
    Error,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Warning => f.write_str("warning"),
            Self::Error => f.write_str("error"),
        }
    }
}

/// A structural or metadata defect found in a skill bundle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Finding {
    #[error("Not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("Missing required file: SKILL.md")]
    ManifestMissing,

    #[error("Failed to read {}: {reason}", .path.display())]
    ManifestUnreadable { path: PathBuf, reason: String },

    #[error("SKILL.md should be uppercase")]
    ManifestCase,

    /// The frontmatter could not be parsed.
    #[error("{0}")]
    ManifestMalformed(String),

    #[error("Missing required field in frontmatter: {0}")]
    MissingField(String),

    #[error("Field '{0}' must be a non-empty string")]
    EmptyField(String),

    #[error("Field '{0}' must be a string")]
    InvalidType(String),

    #[error("Unexpected fields in frontmatter: {fields}. Only {allowed:?} are allowed.")]
    UnexpectedFields {
        fields: String,
        allowed: &'static [&'static str],
    },

    #[error("Skill name '{name}' exceeds {limit} character limit ({actual} chars)")]
    NameTooLong {
        name: String,
        limit: usize,
        actual: usize,
    },

    #[error("Skill name '{0}' must be lowercase")]
    NameNotLowercase(String),

    #[error("Skill name cannot start or end with a hyphen")]
    NameInvalidHyphen,

    #[error("Skill name cannot contain consecutive hyphens")]
    NameConsecutiveHyphens,

    #[error("Skill name '{0}' contains invalid characters. Only letters, digits, and hyphens are allowed.")]
    NameInvalidChars(String),

    #[error("Directory name '{dir}' must match skill name '{name}'")]
    NameMismatch { dir: String, name: String },

    #[error("Description exceeds {limit} character limit ({actual} chars)")]
    DescriptionTooLong { limit: usize, actual: usize },

    #[error("Compatibility exceeds {limit} character limit ({actual} chars)")]
    CompatibilityTooLong { limit: usize, actual: usize },

    #[error("Field 'license' must not be empty when provided")]
    EmptyLicense,

    /// A subdirectory outside scripts/references/assets.
    #[error("Unexpected directory '{0}': only scripts/, references/ and assets/ are packaged")]
    UnexpectedDirectory(String),

    /// A resource directory that is empty or only holds generated examples.
    #[error("Resource directory '{0}/' has no content beyond placeholders; fill it or remove it")]
    EmptyResourceDirectory(String),

    #[error("SKILL.md still contains [TODO] placeholders")]
    PlaceholderContent,
}

impl Finding {
    /// Severity of this kind of finding.
    pub const fn severity(&self) -> Severity {
        match self {
            Self::UnexpectedDirectory(_)
            | Self::EmptyResourceDirectory(_)
            | Self::PlaceholderContent => Severity::Warning,
            _ => Severity::Error,
        }
    }

    /// Stable kebab-case identifier for this kind of finding.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::NotADirectory(_) => "not-a-directory",
            Self::ManifestMissing => "manifest-missing",
            Self::ManifestUnreadable { .. } => "manifest-unreadable",
            Self::ManifestCase => "manifest-case",
            Self::ManifestMalformed(_) => "manifest-malformed",
            Self::MissingField(_) => "missing-field",
            Self::EmptyField(_) => "empty-field",
            Self::InvalidType(_) => "invalid-type",
            Self::UnexpectedFields { .. } => "unexpected-fields",
            Self::NameTooLong { .. } => "name-too-long",
            Self::NameNotLowercase(_) => "name-not-lowercase",
            Self::NameInvalidHyphen => "name-invalid-hyphen",
            Self::NameConsecutiveHyphens => "name-consecutive-hyphens",
            Self::NameInvalidChars(_) => "name-invalid-chars",
            Self::NameMismatch { .. } => "name-mismatch",
            Self::DescriptionTooLong { .. } => "description-too-long",
            Self::CompatibilityTooLong { .. } => "compatibility-too-long",
            Self::EmptyLicense => "empty-license",
            Self::UnexpectedDirectory(_) => "unexpected-directory",
            Self::EmptyResourceDirectory(_) => "empty-resource-directory",
            Self::PlaceholderContent => "placeholder-content",
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity() == Severity::Error
    }
}

/// Errors raised while acquiring source materials.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The source string matched no classification rule.
    #[error("Cannot tell what kind of source '{raw}' is; pass it with --git <url> or --docs <url> --name <name>")]
    Ambiguous { raw: String },

    /// Nothing to fetch.
    #[error("At least one source is required (--git, --docs or --source)")]
    NoSources,

    /// The destination name is not usable as a directory name.
    #[error("Invalid materials name '{0}': use a plain directory name without separators")]
    InvalidName(String),

    /// The destination exists and `clean` was not requested.
    #[error("Destination already exists: {}; rerun with --clean to replace it or choose another name", .path.display())]
    Collision { path: PathBuf },

    /// Two sources in one request would land on the same path.
    #[error("{descriptor} would overwrite {}, which another source in this request also writes; give one of them a different --name", .path.display())]
    TargetConflict { descriptor: String, path: PathBuf },

    /// An external program failed for one descriptor.
    #[error("{tool} failed for {descriptor}: {detail}{}", hint_suffix(.tool))]
    ToolFailure {
        descriptor: String,
        tool: String,
        detail: String,
    },

    /// A fast-path or plain-text download failed.
    #[error("Download of {url} failed: {detail}")]
    Download { url: String, detail: String },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to record sources: {0}")]
    Record(#[from] serde_yaml::Error),
}

fn hint_suffix(tool: &str) -> &'static str {
    if tool.contains("markitdown") {
        " (install it with: pip install 'markitdown[all]')"
    } else if tool.contains("git") {
        " (check the URL, network access and credentials)"
    } else {
        ""
    }
}

/// Errors raised while creating a new skill skeleton.
#[derive(Debug, Error)]
pub enum InitError {
    #[error("Invalid skill name '{name}': {}", .problems.join("; "))]
    InvalidName { name: String, problems: Vec<String> },

    /// The target directory already exists.
    #[error("Skill already exists: {}; pick a different name or remove it first", .path.display())]
    NameConflict { path: PathBuf },

    #[error("Failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Format(#[from] ParseError),
}

/// Errors raised while packaging a skill.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Skill folder not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Validation reported error-severity findings.
    #[error("Validation failed with {} error(s); fix them before packaging", error_count(.findings))]
    Aborted { findings: Vec<Finding> },

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write archive {}: {source}", .path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

fn error_count(findings: &[Finding]) -> usize {
    findings.iter().filter(|finding| finding.is_error()).count()
}

/// Errors raised by the materials registry.
#[derive(Debug, Error)]
pub enum CleanupError {
    #[error("Invalid materials name '{0}': use a plain directory name without separators")]
    InvalidName(String),

    #[error("Failed to delete {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
