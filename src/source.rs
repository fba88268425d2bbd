//! Source classification.
//!
//! A raw source string is matched against a fixed, ordered list of rules.
//! The first rule that recognises it builds the descriptor; if none does the
//! string is [`Classification::Ambiguous`] and the caller has to ask the user
//! what was meant.

use std::path::{Path, PathBuf};

use lazy_static::lazy_static;
use regex::Regex;
use reqwest::Url;
use serde::Serialize;
use tracing::debug;

/// Hosts whose `owner/name` URLs are always repositories.
const REPOSITORY_HOSTS: [&str; 4] = ["github.com", "gitlab.com", "bitbucket.org", "codeberg.org"];

/// Host prefixes that mark a documentation site.
const DOC_HOST_PREFIXES: [&str; 7] = [
    "docs.",
    "doc.",
    "documentation.",
    "developer.",
    "developers.",
    "devdocs.",
    "wiki.",
];

/// Path fragments that mark a documentation page.
const DOC_PATH_TOKENS: [&str; 7] = [
    "/docs",
    "/doc/",
    "/documentation",
    "/guide",
    "/manual",
    "/reference",
    "/wiki",
];

/// Hosting suffixes used almost exclusively for documentation.
const DOC_HOST_SUFFIXES: [&str; 5] = [
    ".readthedocs.io",
    ".readthedocs.org",
    ".gitbook.io",
    ".github.io",
    ".mintlify.app",
];

lazy_static! {
    static ref HOSTED_REPOSITORY: Regex = {
        let hosts = REPOSITORY_HOSTS
            .iter()
            .map(|host| regex::escape(host))
            .collect::<Vec<_>>()
            .join("|");
        Regex::new(&format!(
            r"(?i)^(?:https?://)?(?:www\.)?(?:{hosts})/[\w.-]+/([\w.-]+?)(?:\.git)?/?$"
        ))
        .expect("hosted repository pattern")
    };
    static ref SSH_SHORTHAND: Regex =
        Regex::new(r"^[\w.-]+@[\w.-]+:(?:[\w.~-]+/)*([\w.-]+?)(?:\.git)?/?$")
            .expect("ssh shorthand pattern");
    static ref SCHEME_REPOSITORY: Regex =
        Regex::new(r"(?i)^(?:ssh|git|git\+ssh)://\S+?/([\w.-]+?)(?:\.git)?/?$")
            .expect("scheme repository pattern");
    static ref GIT_SUFFIX: Regex =
        Regex::new(r"(?i)^https?://[^/\s]+/(?:[^/\s]+/)*([^/\s]+?)\.git/?$")
            .expect("git suffix pattern");
    static ref BARE_HOST: Regex =
        Regex::new(r"^[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)+(?::\d+)?(?:/\S*)?$")
            .expect("bare host pattern");
}

/// A git repository to clone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryRef {
    pub url: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth: Option<u32>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub single_branch: bool,
}

impl RepositoryRef {
    /// A reference to `url` with the name taken from its last path segment.
    pub fn from_url(url: &str) -> Self {
        Self {
            url: url.to_string(),
            name: repository_name(url),
            branch: None,
            depth: None,
            single_branch: false,
        }
    }
}

/// Documentation to convert: a site URL or a document file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocRef {
    pub location: String,
    pub name: String,
}

impl DocRef {
    /// Whether the location is an http(s) URL rather than a local file.
    pub fn is_remote(&self) -> bool {
        let lower = self.location.to_ascii_lowercase();
        lower.starts_with("http://") || lower.starts_with("https://")
    }
}

/// An existing local file or directory, used in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalRef {
    pub path: PathBuf,
}

/// What one user-supplied source string refers to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SourceDescriptor {
    Repository(RepositoryRef),
    Docs(DocRef),
    Local(LocalRef),
}

impl SourceDescriptor {
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Repository(_) => "repository",
            Self::Docs(_) => "docs",
            Self::Local(_) => "local",
        }
    }

    /// Short logical name used for destination directories.
    pub fn name(&self) -> String {
        match self {
            Self::Repository(repo) => repo.name.clone(),
            Self::Docs(doc) => doc.name.clone(),
            Self::Local(local) => local
                .path
                .file_stem()
                .map(|stem| slugify(&stem.to_string_lossy()))
                .unwrap_or_else(|| "local".to_string()),
        }
    }

    /// `kind location`, for messages.
    pub fn label(&self) -> String {
        match self {
            Self::Repository(repo) => format!("repository {}", repo.url),
            Self::Docs(doc) => format!("docs {}", doc.location),
            Self::Local(local) => format!("local {}", local.path.display()),
        }
    }

    /// Replace the display name of a documentation source.
    ///
    /// Repository and local names come from the source itself and are kept.
    #[must_use]
    pub fn with_name(self, name: &str) -> Self {
        match self {
            Self::Docs(doc) => Self::Docs(DocRef {
                name: name.to_string(),
                ..doc
            }),
            other => other,
        }
    }
}

impl std::fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (name: {})", self.label(), self.name())
    }
}

/// Result of classifying one raw string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Source(SourceDescriptor),
    Ambiguous { raw: String },
}

type Matcher = fn(&SourceClassifier, &str) -> Option<SourceDescriptor>;

/// Rules in priority order.
const RULES: [(&str, Matcher); 3] = [
    ("repository", SourceClassifier::match_repository),
    ("documentation", SourceClassifier::match_documentation),
    ("local", SourceClassifier::match_local),
];

/// Classifies raw source strings.
#[derive(Debug, Clone)]
pub struct SourceClassifier {
    home: PathBuf,
}

impl SourceClassifier {
    /// `home` is used to expand `~` in local paths.
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Classify `raw`. Every input yields exactly one outcome.
    pub fn classify(&self, raw: &str) -> Classification {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            for (label, matcher) in RULES {
                if let Some(descriptor) = matcher(self, trimmed) {
                    debug!(rule = label, source = trimmed, "classified source");
                    return Classification::Source(descriptor);
                }
            }
        }
        debug!(source = trimmed, "source is ambiguous");
        Classification::Ambiguous {
            raw: raw.to_string(),
        }
    }

    fn match_repository(&self, raw: &str) -> Option<SourceDescriptor> {
        if let Some(url) = parse_web_url(raw) {
            if let Some(host) = repository_host(&url) {
                return hosted_repository(raw, host, &url).map(SourceDescriptor::Repository);
            }
        }
        let recognised = [&*SSH_SHORTHAND, &*SCHEME_REPOSITORY, &*GIT_SUFFIX]
            .iter()
            .any(|pattern| pattern.is_match(raw));
        recognised.then(|| SourceDescriptor::Repository(RepositoryRef::from_url(raw)))
    }

    fn match_documentation(&self, raw: &str) -> Option<SourceDescriptor> {
        let url = parse_web_url(raw)?;
        if repository_host(&url).is_some() {
            return None;
        }
        let host = url.host_str()?.to_ascii_lowercase();
        let path = url.path().to_ascii_lowercase();

        let documentation = DOC_HOST_PREFIXES.iter().any(|prefix| host.starts_with(prefix))
            || DOC_PATH_TOKENS.iter().any(|token| path.contains(token))
            || DOC_HOST_SUFFIXES.iter().any(|suffix| host.ends_with(suffix));
        if !documentation {
            return None;
        }

        Some(SourceDescriptor::Docs(DocRef {
            location: url.to_string(),
            name: doc_name(&host, &path),
        }))
    }

    fn match_local(&self, raw: &str) -> Option<SourceDescriptor> {
        let path_like = raw == "~"
            || raw.starts_with("~/")
            || raw.starts_with('/')
            || raw.starts_with("./")
            || raw.starts_with("../")
            || raw == "."
            || raw == ".."
            || Path::new(raw).is_absolute();
        if !path_like {
            return None;
        }

        let path = self.expand_home(raw);
        path.exists()
            .then(|| SourceDescriptor::Local(LocalRef { path }))
    }

    fn expand_home(&self, raw: &str) -> PathBuf {
        if raw == "~" {
            self.home.clone()
        } else if let Some(rest) = raw.strip_prefix("~/") {
            self.home.join(rest)
        } else {
            PathBuf::from(raw)
        }
    }
}

/// Repository name: the last path segment without a trailing `.git`.
pub fn repository_name(url: &str) -> String {
    let trimmed = url.trim().trim_end_matches('/');
    let last = trimmed
        .rsplit(['/', ':'])
        .next()
        .unwrap_or(trimmed);
    let name = last.strip_suffix(".git").unwrap_or(last);
    if matches!(name, "" | "." | "..") {
        "repository".to_string()
    } else {
        name.to_string()
    }
}

/// The known repository host serving `url`, ignoring `www.`.
fn repository_host(url: &Url) -> Option<&'static str> {
    let host = url.host_str()?.to_ascii_lowercase();
    let host = host.strip_prefix("www.").unwrap_or(&host);
    REPOSITORY_HOSTS.iter().copied().find(|known| *known == host)
}

/// Repository behind a URL on a known host.
///
/// The repository is `owner/name`, or on GitLab the whole group path up to
/// the `/-/` marker. Deeper pages (`tree/main/docs`, `wiki`) resolve to the
/// repository they belong to; an owner alone resolves to nothing.
fn hosted_repository(raw: &str, host: &str, url: &Url) -> Option<RepositoryRef> {
    let segments = url.path_segments()?.filter(|segment| !segment.is_empty());
    let repository: Vec<&str> = if host == "gitlab.com" {
        segments.take_while(|segment| *segment != "-").collect()
    } else {
        segments.take(2).collect()
    };
    if repository.len() < 2 {
        return None;
    }
    if HOSTED_REPOSITORY.is_match(raw) {
        return Some(RepositoryRef::from_url(raw));
    }

    let path = repository.join("/");
    let path = path.strip_suffix(".git").unwrap_or(&path);
    Some(RepositoryRef::from_url(&format!("https://{host}/{path}")))
}

fn parse_web_url(raw: &str) -> Option<Url> {
    let lower = raw.to_ascii_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Url::parse(raw).ok()
    } else if BARE_HOST.is_match(raw) {
        Url::parse(&format!("https://{raw}")).ok()
    } else {
        None
    }
}

/// Display name for a documentation host.
///
/// Drops `www.` and one documentation prefix, then takes the first label.
/// When only a top-level label would remain (`docs.rs`), the first path
/// segment is used instead.
fn doc_name(host: &str, path: &str) -> String {
    let host = host.strip_prefix("www.").unwrap_or(host);
    let stripped = DOC_HOST_PREFIXES
        .iter()
        .find_map(|prefix| host.strip_prefix(prefix))
        .unwrap_or(host);

    let labels: Vec<&str> = stripped.split('.').filter(|l| !l.is_empty()).collect();
    let name = if labels.len() >= 2 {
        labels[0]
    } else {
        path.split('/')
            .find(|segment| !segment.is_empty())
            .or_else(|| host.split('.').next())
            .unwrap_or("docs")
    };
    slugify(name)
}

/// Lowercase `text` and collapse anything but letters and digits into single hyphens.
fn slugify(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_alphanumeric() {
            out.extend(ch.to_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }
    let slug = out.trim_matches('-');
    if slug.is_empty() {
        "source".to_string()
    } else {
        slug.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn classifier() -> SourceClassifier {
        SourceClassifier::new("/nonexistent-home")
    }

    fn repository(raw: &str) -> RepositoryRef {
        match classifier().classify(raw) {
            Classification::Source(SourceDescriptor::Repository(repo)) => repo,
            other => panic!("{raw} classified as {other:?}"),
        }
    }

    fn docs(raw: &str) -> DocRef {
        match classifier().classify(raw) {
            Classification::Source(SourceDescriptor::Docs(doc)) => doc,
            other => panic!("{raw} classified as {other:?}"),
        }
    }

    #[test]
    fn repository_urls_yield_last_segment() {
        assert_eq!(repository("https://github.com/acme/toolkit").name, "toolkit");
        assert_eq!(repository("git@github.com:acme/toolkit.git").name, "toolkit");
        assert_eq!(repository("github.com/acme/toolkit/").name, "toolkit");
        assert_eq!(repository("https://gitlab.com/acme/tool.kit.git").name, "tool.kit");
        assert_eq!(repository("ssh://git@example.org/acme/toolkit.git").name, "toolkit");
        assert_eq!(
            repository("https://git.example.org/team/sub/toolkit.git").name,
            "toolkit"
        );
    }

    #[test]
    fn deeper_pages_on_repository_hosts_name_the_repository() {
        for raw in [
            "https://github.com/acme/toolkit/tree/main/docs",
            "https://github.com/acme/toolkit/wiki",
            "https://www.github.com/acme/toolkit/blob/main/README.md",
        ] {
            let repo = repository(raw);
            assert_eq!(repo.name, "toolkit", "{raw}");
            assert_eq!(repo.url, "https://github.com/acme/toolkit", "{raw}");
        }

        let nested = repository("https://gitlab.com/group/sub/project");
        assert_eq!(nested.name, "project");
        assert_eq!(nested.url, "https://gitlab.com/group/sub/project");

        let wiki = repository("https://gitlab.com/group/sub/project/-/wikis/home");
        assert_eq!(wiki.name, "project");
        assert_eq!(wiki.url, "https://gitlab.com/group/sub/project");
    }

    #[test]
    fn repository_url_is_kept_verbatim() {
        let repo = repository("https://github.com/acme/toolkit");
        assert_eq!(repo.url, "https://github.com/acme/toolkit");
        assert_eq!(repo.branch, None);
        assert_eq!(repo.depth, None);
    }

    #[test]
    fn documentation_hosts_strip_doc_token() {
        assert_eq!(docs("https://docs.acme.com").name, "acme");
        assert_eq!(docs("https://acme.readthedocs.io").name, "acme");
        assert_eq!(docs("docs.acme.com/guide/intro").name, "acme");
        assert_eq!(docs("https://www.acme.com/docs/start").name, "acme");
        assert_eq!(docs("https://developer.apple.com/documentation").name, "apple");
        assert_eq!(docs("https://docs.rs/serde").name, "serde");
    }

    #[test]
    fn repository_rule_wins_over_documentation() {
        // Both rules could apply to a docs.* host ending in .git; the repository rule runs first.
        assert_eq!(repository("https://docs.acme.com/acme/handbook.git").name, "handbook");
    }

    #[test]
    fn local_paths_must_exist() {
        let tmp = TempDir::new().expect("temp dir");
        let existing = tmp.path().display().to_string();
        assert_eq!(
            classifier().classify(&existing),
            Classification::Source(SourceDescriptor::Local(LocalRef {
                path: tmp.path().to_path_buf()
            }))
        );

        let missing = tmp.path().join("missing").display().to_string();
        assert!(matches!(
            classifier().classify(&missing),
            Classification::Ambiguous { .. }
        ));
    }

    #[test]
    fn tilde_expands_against_home() {
        let tmp = TempDir::new().expect("temp dir");
        std::fs::create_dir_all(tmp.path().join("notes")).expect("mkdir");
        let classifier = SourceClassifier::new(tmp.path());
        assert_eq!(
            classifier.classify("~/notes"),
            Classification::Source(SourceDescriptor::Local(LocalRef {
                path: tmp.path().join("notes")
            }))
        );
    }

    #[test]
    fn unknown_inputs_are_ambiguous() {
        for raw in [
            "",
            "   ",
            "toolkit",
            "https://example.com/pricing",
            "https://github.com/acme",
            "https://github.com/docs",
            "https://gitlab.com/",
            "relative/path",
        ] {
            assert!(
                matches!(classifier().classify(raw), Classification::Ambiguous { .. }),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn explicit_name_overrides_docs_only() {
        let doc = SourceDescriptor::Docs(docs("https://docs.acme.com")).with_name("acme-api");
        assert_eq!(doc.name(), "acme-api");
        let repo = SourceDescriptor::Repository(repository("https://github.com/acme/toolkit"))
            .with_name("other");
        assert_eq!(repo.name(), "toolkit");
    }

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("My Manual (v2)"), "my-manual-v2");
        assert_eq!(slugify("---"), "source");
    }

    proptest! {
        #[test]
        fn prop_classify_is_total(raw in "\\PC{0,40}") {
            let outcome = classifier().classify(&raw);
            let is_source = matches!(outcome, Classification::Source(_));
            let is_ambiguous = matches!(outcome, Classification::Ambiguous { .. });
            prop_assert!(is_source ^ is_ambiguous);
        }

        #[test]
        fn prop_hosted_repositories_keep_name(
            owner in "[a-z][a-z0-9-]{0,10}",
            name in "[a-z][a-z0-9_-]{0,10}",
            suffix in prop::bool::ANY,
        ) {
            let url = format!(
                "https://github.com/{owner}/{name}{}",
                if suffix { ".git" } else { "" }
            );
            prop_assert_eq!(repository(&url).name, name);
        }
    }
}
