//! Turn source material into packaged Agent Skills.
//!
//! The pipeline has four stages, each usable on its own:
//!
//! 1. [`source`] classifies raw strings into repositories, documentation or
//!    local paths, and [`fetch`] pulls them into a materials directory
//!    chosen by [`paths`].
//! 2. [`init`] scaffolds a new skill bundle.
//! 3. [`validation`] checks a bundle and reports typed findings.
//! 4. [`package`] archives a bundle that has no error-severity findings.
//!
//! [`materials`] lists and removes fetched materials afterwards.

pub mod config;
pub mod error;
pub mod fetch;
pub mod formatting;
pub mod init;
pub mod materials;
pub mod package;
pub mod paths;
pub mod probe;
pub mod skill;
pub mod source;
pub mod validation;

#[cfg(test)]
mod testing;

pub use config::Settings;
pub use error::{
    CleanupError, FetchError, Finding, InitError, PackageError, ParseError, Severity,
};
pub use fetch::{FetchOptions, FetchRequest, Fetcher, MaterialsStats};
pub use formatting::{format_frontmatter, parse_manifest, render_manifest, Manifest};
pub use init::init;
pub use materials::{
    format_size, BulkDeleteReport, DeleteOutcome, MaterialsEntry, MaterialsRegistry,
};
pub use package::{package, package_with_report, PackageReport};
pub use paths::{resolve_context, LocationContext, Mode};
pub use probe::{FastPathManifest, FastPathProbe};
pub use source::{Classification, SourceClassifier, SourceDescriptor};
pub use validation::{has_errors, validate, validate_with, ValidateOptions};
