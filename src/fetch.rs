//! Acquisition of source materials.
//!
//! One call fetches an ordered set of sources into a single destination
//! directory. Each kind of source lands in its own place so a combined
//! repository + documentation fetch never overwrites itself:
//!
//! ```text
//! <materials_root>/<name>/
//!   ...                      single repository, cloned at the root
//!   <repo>/...               one directory per repository when there are several
//!   docs_scraped/<doc>.md    converted or fast-path documentation
//!   .sources.yaml            what was fetched and where it landed
//! ```
//!
//! Local sources are referenced in `.sources.yaml`, not copied.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use serde::Serialize;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::config::Settings;
use crate::error::FetchError;
use crate::materials::MaterialsEntry;
use crate::paths::{ensure_dir, LocationContext};
use crate::probe::{FastPathManifest, FastPathProbe};
use crate::skill::is_single_component;
use crate::source::{DocRef, RepositoryRef, SourceDescriptor};

/// Subdirectory receiving documentation.
pub const DOCS_DIR: &str = "docs_scraped";

/// Record of what a materials directory was fetched from.
pub const SOURCES_FILE: &str = ".sources.yaml";

/// What to fetch and under which name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub descriptors: Vec<SourceDescriptor>,
    pub destination_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// Remove an existing destination before fetching.
    pub clean: bool,
    /// Skip the fast-path probe and always convert documentation.
    pub force_scrape: bool,
    /// Use this directory instead of `<materials_root>/<name>`.
    pub output: Option<PathBuf>,
}

/// Fetches sources using external programs.
#[derive(Debug, Clone)]
pub struct Fetcher {
    git_program: String,
    converter_program: String,
    probe: FastPathProbe,
}

#[derive(Debug, Serialize)]
struct SourceRecord<'a> {
    #[serde(flatten)]
    source: &'a SourceDescriptor,
    landed_at: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    fast_path: Option<FastPathManifest>,
}

#[derive(Debug, Serialize)]
struct SourcesFile<'a> {
    name: &'a str,
    sources: Vec<SourceRecord<'a>>,
}

impl Fetcher {
    pub fn new(settings: &Settings, probe: FastPathProbe) -> Self {
        Self {
            git_program: settings.git_program.clone(),
            converter_program: settings.converter_program.clone(),
            probe,
        }
    }

    /// Fetch every descriptor of `request` into one destination.
    ///
    /// A failure aborts the call and names the descriptor that failed;
    /// whatever earlier descriptors produced is left in place.
    pub fn fetch(
        &self,
        request: &FetchRequest,
        context: &LocationContext,
        options: &FetchOptions,
    ) -> Result<MaterialsEntry, FetchError> {
        if request.descriptors.is_empty() {
            return Err(FetchError::NoSources);
        }
        if !is_single_component(&request.destination_name) {
            return Err(FetchError::InvalidName(request.destination_name.clone()));
        }

        let destination = options
            .output
            .clone()
            .unwrap_or_else(|| context.materials_dir(&request.destination_name));
        let steps = plan(&request.descriptors, &destination)?;
        prepare_destination(&destination, options.clean)?;
        info!(destination = %destination.display(), sources = request.descriptors.len(), "fetching");

        let mut records = Vec::with_capacity(steps.len());
        for (descriptor, target) in steps {
            let record = match descriptor {
                SourceDescriptor::Repository(repo) => {
                    self.clone_repository(descriptor, repo, &target)?;
                    SourceRecord {
                        source: descriptor,
                        landed_at: target,
                        fast_path: None,
                    }
                }
                SourceDescriptor::Docs(doc) => {
                    let fast_path = self.fetch_docs(descriptor, doc, &target, options)?;
                    SourceRecord {
                        source: descriptor,
                        landed_at: target,
                        fast_path,
                    }
                }
                SourceDescriptor::Local(local) => {
                    if !local.path.exists() {
                        return Err(FetchError::Io {
                            path: local.path.clone(),
                            source: std::io::Error::from(std::io::ErrorKind::NotFound),
                        });
                    }
                    debug!(path = %local.path.display(), "referencing local source");
                    SourceRecord {
                        source: descriptor,
                        landed_at: local.path.clone(),
                        fast_path: None,
                    }
                }
            };
            records.push(record);
        }

        let sources_path = destination.join(SOURCES_FILE);
        let yaml = serde_yaml::to_string(&SourcesFile {
            name: &request.destination_name,
            sources: records,
        })?;
        fs::write(&sources_path, yaml).map_err(|source| FetchError::Io {
            path: sources_path,
            source,
        })?;

        let scope = options.output.is_none().then_some(context.mode);
        Ok(MaterialsEntry::from_dir(
            &request.destination_name,
            destination,
            scope,
        ))
    }

    fn clone_repository(
        &self,
        descriptor: &SourceDescriptor,
        repo: &RepositoryRef,
        target: &Path,
    ) -> Result<(), FetchError> {
        let mut command = Command::new(&self.git_program);
        command.arg("clone");
        if let Some(depth) = repo.depth {
            command.arg("--depth").arg(depth.to_string());
        }
        if let Some(branch) = &repo.branch {
            command.arg("--branch").arg(branch);
        }
        if repo.single_branch {
            command.arg("--single-branch");
        }
        command
            .arg(&repo.url)
            .arg(target)
            .env("GIT_TERMINAL_PROMPT", "0");

        info!(url = %repo.url, target = %target.display(), "cloning repository");
        self.run(descriptor, &format!("{} clone", self.git_program), &mut command)
    }

    /// Returns the fast-path manifest used, if any.
    fn fetch_docs(
        &self,
        descriptor: &SourceDescriptor,
        doc: &DocRef,
        target: &Path,
        options: &FetchOptions,
    ) -> Result<Option<FastPathManifest>, FetchError> {
        if let Some(parent) = target.parent() {
            ensure_dir(parent).map_err(|source| FetchError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        if doc.is_remote() && !options.force_scrape {
            if is_text_document(&doc.location) {
                self.probe.download(&doc.location, target)?;
                return Ok(None);
            }
            if let Some(manifest) = self.probe.probe(&doc.location) {
                match self.probe.download(&manifest.url, target) {
                    Ok(_) => return Ok(Some(manifest)),
                    Err(err) => warn!(error = %err, "fast path download failed, converting instead"),
                }
            }
        }

        let mut command = Command::new(&self.converter_program);
        command.arg(&doc.location).arg("-o").arg(target);
        info!(source = %doc.location, target = %target.display(), "converting documentation");
        self.run(descriptor, &self.converter_program, &mut command)?;
        Ok(None)
    }

    fn run(
        &self,
        descriptor: &SourceDescriptor,
        tool: &str,
        command: &mut Command,
    ) -> Result<(), FetchError> {
        let failure = |detail: String| FetchError::ToolFailure {
            descriptor: descriptor.label(),
            tool: tool.to_string(),
            detail,
        };

        let output = command
            .stdin(Stdio::null())
            .output()
            .map_err(|err| failure(format!("could not start: {err}")))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let detail = stderr
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .map(|line| format!("{} ({})", line.trim(), output.status))
            .unwrap_or_else(|| output.status.to_string());
        Err(failure(detail))
    }
}

fn prepare_destination(destination: &Path, clean: bool) -> Result<(), FetchError> {
    let io_error = |source| FetchError::Io {
        path: destination.to_path_buf(),
        source,
    };

    if destination.exists() {
        if !clean {
            return Err(FetchError::Collision {
                path: destination.to_path_buf(),
            });
        }
        info!(destination = %destination.display(), "cleaning existing destination");
        if destination.is_dir() {
            fs::remove_dir_all(destination).map_err(io_error)?;
        } else {
            fs::remove_file(destination).map_err(io_error)?;
        }
    }

    ensure_dir(destination).map_err(io_error)
}

/// Decide where each descriptor lands.
///
/// A lone repository is cloned into the destination root and runs first,
/// because git refuses to clone into a non-empty directory. Everything else
/// keeps the caller's order. Names used as path components must be plain
/// directory names, and no two sources may share a target.
fn plan<'a>(
    descriptors: &'a [SourceDescriptor],
    destination: &Path,
) -> Result<Vec<(&'a SourceDescriptor, PathBuf)>, FetchError> {
    let repositories = descriptors
        .iter()
        .filter(|d| matches!(d, SourceDescriptor::Repository(_)))
        .count();

    let mut claimed = HashSet::new();
    let mut steps = Vec::with_capacity(descriptors.len());
    for descriptor in descriptors {
        let target = match descriptor {
            SourceDescriptor::Repository(_) if repositories == 1 => destination.to_path_buf(),
            SourceDescriptor::Repository(repo) => {
                if !is_single_component(&repo.name) {
                    return Err(FetchError::InvalidName(repo.name.clone()));
                }
                destination.join(&repo.name)
            }
            SourceDescriptor::Docs(doc) => {
                if !is_single_component(&doc.name) {
                    return Err(FetchError::InvalidName(doc.name.clone()));
                }
                destination.join(DOCS_DIR).join(format!("{}.md", doc.name))
            }
            SourceDescriptor::Local(local) => {
                steps.push((descriptor, local.path.clone()));
                continue;
            }
        };
        if !claimed.insert(target.clone()) {
            return Err(FetchError::TargetConflict {
                descriptor: descriptor.label(),
                path: target,
            });
        }
        steps.push((descriptor, target));
    }

    if repositories == 1 {
        // Stable: only the root clone moves.
        steps.sort_by_key(|(descriptor, _)| !matches!(descriptor, SourceDescriptor::Repository(_)));
    }
    Ok(steps)
}

fn is_text_document(location: &str) -> bool {
    let path = location.split(['?', '#']).next().unwrap_or(location);
    path.to_ascii_lowercase().ends_with(".txt")
}

/// File counts and size of a materials directory, ignoring `.git`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterialsStats {
    pub total_files: usize,
    pub markdown_files: usize,
    pub python_files: usize,
    pub javascript_files: usize,
    pub json_files: usize,
    pub total_bytes: u64,
}

impl MaterialsStats {
    pub fn collect(dir: &Path) -> Self {
        let mut stats = Self::default();
        let files = WalkDir::new(dir)
            .into_iter()
            .filter_entry(|entry| entry.file_name() != ".git")
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file());

        for entry in files {
            stats.total_files += 1;
            stats.total_bytes += entry.metadata().map(|meta| meta.len()).unwrap_or(0);
            let extension = entry
                .path()
                .extension()
                .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
                .unwrap_or_default();
            match extension.as_str() {
                "md" | "markdown" => stats.markdown_files += 1,
                "py" => stats.python_files += 1,
                "js" | "jsx" | "ts" | "tsx" => stats.javascript_files += 1,
                "json" => stats.json_files += 1,
                _ => {}
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::paths::global_context;
    use crate::source::LocalRef;
    use crate::testing::{loopback_client, serve};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn fetcher(settings: &Settings) -> Fetcher {
        Fetcher::new(settings, FastPathProbe::with_client(loopback_client()))
    }

    fn local(path: &Path) -> SourceDescriptor {
        SourceDescriptor::Local(LocalRef {
            path: path.to_path_buf(),
        })
    }

    fn request(descriptors: Vec<SourceDescriptor>, name: &str) -> FetchRequest {
        FetchRequest {
            descriptors,
            destination_name: name.to_string(),
        }
    }

    fn git(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(["-c", "user.name=Test", "-c", "user.email=test@example.com"])
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .expect("run git");
        assert!(status.success(), "git {args:?} failed");
    }

    fn upstream_repo(root: &Path) -> PathBuf {
        let repo = root.join("upstream").join("toolkit");
        fs::create_dir_all(&repo).expect("mkdir");
        fs::write(repo.join("README.md"), "# Toolkit\n").expect("write");
        git(&repo, &["init", "-q"]);
        git(&repo, &["add", "."]);
        git(&repo, &["commit", "-q", "-m", "init"]);
        repo
    }

    #[test]
    fn collision_leaves_destination_untouched() {
        let tmp = TempDir::new().expect("temp dir");
        let context = global_context(&tmp.path().join("home"));
        let dest = context.materials_dir("toolkit");
        fs::create_dir_all(&dest).expect("mkdir");
        fs::write(dest.join("notes.md"), "keep me").expect("write");

        let err = fetcher(&Settings::default())
            .fetch(
                &request(vec![local(tmp.path())], "toolkit"),
                &context,
                &FetchOptions::default(),
            )
            .unwrap_err();

        assert!(matches!(err, FetchError::Collision { ref path } if *path == dest));
        assert_eq!(fs::read_to_string(dest.join("notes.md")).expect("read"), "keep me");
        assert!(!dest.join(SOURCES_FILE).exists());
    }

    #[test]
    fn clean_replaces_destination() {
        let tmp = TempDir::new().expect("temp dir");
        let context = global_context(&tmp.path().join("home"));
        let dest = context.materials_dir("notes");
        fs::create_dir_all(&dest).expect("mkdir");
        fs::write(dest.join("stale.md"), "old").expect("write");
        let source_dir = tmp.path().join("my-notes");
        fs::create_dir_all(&source_dir).expect("mkdir");

        let options = FetchOptions {
            clean: true,
            ..FetchOptions::default()
        };
        let entry = fetcher(&Settings::default())
            .fetch(&request(vec![local(&source_dir)], "notes"), &context, &options)
            .expect("fetch");

        assert_eq!(entry.path, dest);
        assert!(!dest.join("stale.md").exists());
        let record = fs::read_to_string(dest.join(SOURCES_FILE)).expect("record");
        assert!(record.contains("kind: local"));
        assert!(record.contains("my-notes"));
    }

    #[test]
    fn rejects_unsafe_names_and_empty_requests() {
        let tmp = TempDir::new().expect("temp dir");
        let context = global_context(tmp.path());
        let fetcher = fetcher(&Settings::default());

        let err = fetcher
            .fetch(
                &request(vec![local(tmp.path())], "../escape"),
                &context,
                &FetchOptions::default(),
            )
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidName(_)));

        let err = fetcher
            .fetch(&request(Vec::new(), "empty"), &context, &FetchOptions::default())
            .unwrap_err();
        assert!(matches!(err, FetchError::NoSources));
    }

    #[cfg(unix)]
    #[test]
    fn same_named_docs_conflict_before_anything_is_written() {
        let tmp = TempDir::new().expect("temp dir");
        let converter = crate::testing::fake_program(
            tmp.path(),
            "fake-markitdown",
            r#"printf '# converted %s\n' "$1" > "$3""#,
        );
        let first = tmp.path().join("a.pdf");
        let second = tmp.path().join("b.pdf");
        fs::write(&first, "%PDF a").expect("write");
        fs::write(&second, "%PDF b").expect("write");

        let settings = Settings {
            converter_program: converter.display().to_string(),
            ..Settings::default()
        };
        let context = global_context(&tmp.path().join("home"));
        let descriptors = vec![
            SourceDescriptor::Docs(DocRef {
                location: first.display().to_string(),
                name: "manual".to_string(),
            }),
            SourceDescriptor::Docs(DocRef {
                location: second.display().to_string(),
                name: "manual".to_string(),
            }),
        ];

        let err = fetcher(&settings)
            .fetch(&request(descriptors, "manuals"), &context, &FetchOptions::default())
            .unwrap_err();
        assert!(
            matches!(err, FetchError::TargetConflict { ref descriptor, ref path }
                if descriptor.contains("b.pdf") && path.ends_with("docs_scraped/manual.md"))
        );
        assert!(!context.materials_dir("manuals").exists());
    }

    #[test]
    fn repositories_sharing_a_name_conflict() {
        let dest = Path::new("/materials/combo");
        let descriptors = vec![
            SourceDescriptor::Repository(RepositoryRef::from_url("https://github.com/acme/toolkit")),
            SourceDescriptor::Repository(RepositoryRef::from_url("https://gitlab.com/other/toolkit")),
        ];
        let err = plan(&descriptors, dest).unwrap_err();
        assert!(
            matches!(err, FetchError::TargetConflict { ref path, .. } if path == &dest.join("toolkit"))
        );
    }

    #[test]
    fn doc_names_cannot_leave_the_destination() {
        let tmp = TempDir::new().expect("temp dir");
        let home = tmp.path().join("home");
        let context = global_context(&home);
        let descriptors = vec![
            local(tmp.path()),
            SourceDescriptor::Docs(DocRef {
                location: "https://docs.acme.com/".to_string(),
                name: "../../../escaped".to_string(),
            }),
        ];

        let err = fetcher(&Settings::default())
            .fetch(&request(descriptors, "safe"), &context, &FetchOptions::default())
            .unwrap_err();
        assert!(matches!(err, FetchError::InvalidName(ref name) if name == "../../../escaped"));
        assert!(!context.materials_dir("safe").exists());
        assert!(!home.join("escaped.md").exists());
        assert!(!tmp.path().join("escaped.md").exists());
    }

    #[test]
    fn repository_subdirectories_must_be_plain_names() {
        let descriptors = vec![
            SourceDescriptor::Repository(RepositoryRef::from_url("https://github.com/acme/one")),
            SourceDescriptor::Repository(RepositoryRef {
                name: "nested/two".to_string(),
                ..RepositoryRef::from_url("https://github.com/acme/two")
            }),
        ];
        let err = plan(&descriptors, Path::new("/materials/combo")).unwrap_err();
        assert!(matches!(err, FetchError::InvalidName(ref name) if name == "nested/two"));
    }

    #[test]
    fn clones_single_repository_into_root() {
        let tmp = TempDir::new().expect("temp dir");
        let upstream = upstream_repo(tmp.path());
        let context = global_context(&tmp.path().join("home"));

        let descriptor = SourceDescriptor::Repository(RepositoryRef {
            depth: Some(1),
            ..RepositoryRef::from_url(&format!("file://{}", upstream.display()))
        });
        let entry = fetcher(&Settings::default())
            .fetch(
                &request(vec![descriptor], "toolkit"),
                &context,
                &FetchOptions::default(),
            )
            .expect("fetch");

        assert_eq!(entry.name, "toolkit");
        assert!(entry.path.join("README.md").is_file());
        assert!(entry.path.join(".git").is_dir());
        assert!(entry.size > 0);

        let stats = MaterialsStats::collect(&entry.path);
        assert_eq!(stats.markdown_files, 1);
        // README.md plus the sources record; .git is skipped.
        assert_eq!(stats.total_files, 2);
    }

    #[cfg(unix)]
    #[test]
    fn combined_fetch_keeps_docs_apart_and_clones_first() {
        let tmp = TempDir::new().expect("temp dir");
        let upstream = upstream_repo(tmp.path());
        let converter = crate::testing::fake_program(
            tmp.path(),
            "fake-markitdown",
            r#"printf '# converted %s\n' "$1" > "$3""#,
        );
        let manual = tmp.path().join("manual.pdf");
        fs::write(&manual, "%PDF").expect("write");

        let settings = Settings {
            converter_program: converter.display().to_string(),
            ..Settings::default()
        };
        let context = global_context(&tmp.path().join("home"));
        let descriptors = vec![
            SourceDescriptor::Docs(DocRef {
                location: manual.display().to_string(),
                name: "manual".to_string(),
            }),
            SourceDescriptor::Repository(RepositoryRef::from_url(&upstream.display().to_string())),
        ];

        let entry = fetcher(&settings)
            .fetch(&request(descriptors, "combo"), &context, &FetchOptions::default())
            .expect("fetch");

        assert!(entry.path.join("README.md").is_file());
        let converted = fs::read_to_string(entry.path.join(DOCS_DIR).join("manual.md"))
            .expect("converted docs");
        assert!(converted.starts_with("# converted "));
    }

    #[test]
    fn tool_failure_names_descriptor_and_keeps_partial_materials() {
        let tmp = TempDir::new().expect("temp dir");
        let upstream = upstream_repo(tmp.path());
        let settings = Settings {
            converter_program: tmp.path().join("missing-converter").display().to_string(),
            ..Settings::default()
        };
        let context = global_context(&tmp.path().join("home"));
        let descriptors = vec![
            SourceDescriptor::Repository(RepositoryRef::from_url(&upstream.display().to_string())),
            SourceDescriptor::Docs(DocRef {
                location: tmp.path().join("handbook.docx").display().to_string(),
                name: "handbook".to_string(),
            }),
        ];

        let err = fetcher(&settings)
            .fetch(&request(descriptors, "partial"), &context, &FetchOptions::default())
            .unwrap_err();

        match err {
            FetchError::ToolFailure { descriptor, .. } => assert!(descriptor.contains("handbook.docx")),
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(context.materials_dir("partial").join("README.md").is_file());
    }

    #[test]
    fn failed_clone_reports_repository() {
        let tmp = TempDir::new().expect("temp dir");
        let context = global_context(&tmp.path().join("home"));
        let missing = tmp.path().join("no-such-repo").display().to_string();

        let err = fetcher(&Settings::default())
            .fetch(
                &request(
                    vec![SourceDescriptor::Repository(RepositoryRef::from_url(&missing))],
                    "broken",
                ),
                &context,
                &FetchOptions::default(),
            )
            .unwrap_err();
        assert!(
            matches!(err, FetchError::ToolFailure { ref descriptor, .. } if descriptor.contains("no-such-repo"))
        );
    }

    #[test]
    fn fast_path_is_downloaded_unless_scraping_is_forced() {
        let tmp = TempDir::new().expect("temp dir");
        let server = serve(&[("/llms-full.txt", "# Acme docs\n")]);
        let base = server.url();
        let settings = Settings {
            converter_program: tmp.path().join("missing-converter").display().to_string(),
            ..Settings::default()
        };
        let context = global_context(&tmp.path().join("home"));
        let doc = SourceDescriptor::Docs(DocRef {
            location: format!("{base}/docs/"),
            name: "acme".to_string(),
        });

        let entry = fetcher(&settings)
            .fetch(
                &request(vec![doc.clone()], "acme"),
                &context,
                &FetchOptions::default(),
            )
            .expect("fetch");
        assert_eq!(
            fs::read_to_string(entry.path.join(DOCS_DIR).join("acme.md")).expect("read"),
            "# Acme docs\n"
        );
        let record = fs::read_to_string(entry.path.join(SOURCES_FILE)).expect("record");
        assert!(record.contains("variant: full"));

        let options = FetchOptions {
            clean: true,
            force_scrape: true,
            ..FetchOptions::default()
        };
        let err = fetcher(&settings)
            .fetch(&request(vec![doc], "acme"), &context, &options)
            .unwrap_err();
        assert!(matches!(err, FetchError::ToolFailure { .. }));
    }

    #[test]
    fn plan_places_each_kind_apart() {
        let dest = Path::new("/materials/combo");
        let descriptors = vec![
            SourceDescriptor::Repository(RepositoryRef::from_url("https://github.com/acme/one")),
            SourceDescriptor::Repository(RepositoryRef::from_url("https://github.com/acme/two")),
            SourceDescriptor::Docs(DocRef {
                location: "https://docs.acme.com/".to_string(),
                name: "acme".to_string(),
            }),
        ];
        let targets: Vec<PathBuf> = plan(&descriptors, dest)
            .expect("plan")
            .into_iter()
            .map(|(_, target)| target)
            .collect();
        assert_eq!(
            targets,
            vec![
                dest.join("one"),
                dest.join("two"),
                dest.join(DOCS_DIR).join("acme.md"),
            ]
        );
    }

    #[test]
    fn text_documents_are_detected() {
        assert!(is_text_document("https://acme.com/llms.txt"));
        assert!(is_text_document("https://acme.com/llms-full.TXT?ref=x"));
        assert!(!is_text_document("https://acme.com/docs"));
    }
}
