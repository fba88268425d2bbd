use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skill_forge::config::{DEFAULT_CONVERTER_PROGRAM, DEFAULT_GIT_PROGRAM};
use skill_forge::source::{DocRef, RepositoryRef};
use skill_forge::{
    format_size, init, package_with_report, resolve_context, validate_with, BulkDeleteReport,
    Classification, DeleteOutcome, FastPathProbe, FetchError, FetchOptions, FetchRequest, Fetcher,
    Finding, LocationContext, MaterialsEntry, MaterialsRegistry, MaterialsStats, PackageError,
    Settings, SourceClassifier, SourceDescriptor, ValidateOptions,
};

#[derive(Parser)]
#[command(
    name = "skill-forge",
    version,
    about = "Fetch source material and build, validate and package Agent Skills"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct GlobalArgs {
    /// Home directory used for global materials and skills
    #[arg(long, global = true, env = "SKILL_FORGE_HOME", value_name = "DIR")]
    home: Option<PathBuf>,
    /// Program used to clone repositories
    #[arg(long, global = true, env = "SKILL_FORGE_GIT", default_value = DEFAULT_GIT_PROGRAM)]
    git_program: String,
    /// Program used to convert documentation to markdown
    #[arg(long, global = true, env = "SKILL_FORGE_CONVERTER", default_value = DEFAULT_CONVERTER_PROGRAM)]
    converter: String,
    /// Timeout for each fast-path probe request
    #[arg(long, global = true, env = "SKILL_FORGE_PROBE_TIMEOUT", default_value_t = 5, value_name = "SECS")]
    probe_timeout: u64,
    /// More log output (-v info, -vv debug); SKILL_FORGE_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

impl GlobalArgs {
    fn settings(&self) -> Settings {
        Settings {
            home: self.home.clone(),
            git_program: self.git_program.clone(),
            converter_program: self.converter.clone(),
            probe_timeout: Duration::from_secs(self.probe_timeout),
        }
    }
}

#[derive(Subcommand)]
enum Command {
    /// Show how each source string would be fetched
    Classify {
        #[arg(required = true)]
        sources: Vec<String>,
    },
    /// Fetch repositories and documentation into a materials directory
    Fetch(FetchArgs),
    /// Look for llms.txt manifests on a documentation site
    ProbeFastPath {
        url: String,
        /// Report every manifest found, not just the preferred one
        #[arg(long)]
        all: bool,
    },
    /// Create a new skill from the template
    Init {
        name: String,
        /// Directory to create the skill in (default: the skills directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Check a skill bundle
    Validate {
        bundle: PathBuf,
        /// Extra top-level directory to accept (repeatable)
        #[arg(long = "allow-dir", value_name = "DIR")]
        allow_dirs: Vec<String>,
    },
    /// Validate and archive a skill bundle
    Package {
        bundle: PathBuf,
        output_dir: Option<PathBuf>,
        /// Extra top-level directory to accept and package (repeatable)
        #[arg(long = "allow-dir", value_name = "DIR")]
        allow_dirs: Vec<String>,
    },
    /// List or delete fetched materials
    Cleanup {
        name: Option<String>,
        #[arg(long, conflicts_with_all = ["name", "all"])]
        list: bool,
        #[arg(long, conflicts_with = "name")]
        all: bool,
        /// Do not ask for confirmation
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args)]
struct FetchArgs {
    /// Repository URL to clone
    #[arg(long)]
    git: Option<String>,
    #[arg(long, requires = "git")]
    branch: Option<String>,
    #[arg(long, requires = "git")]
    depth: Option<u32>,
    #[arg(long, requires = "git")]
    single_branch: bool,
    /// Documentation URL or document file to convert
    #[arg(long, requires = "name")]
    docs: Option<String>,
    /// Name for the documentation and the materials directory
    #[arg(long)]
    name: Option<String>,
    /// Any source; its kind is detected (repeatable)
    #[arg(long)]
    source: Vec<String>,
    /// Fetch into this directory instead of the materials root
    #[arg(long)]
    output: Option<PathBuf>,
    /// Replace an existing materials directory
    #[arg(long)]
    clean: bool,
    /// Always convert documentation, even when llms.txt exists
    #[arg(long)]
    no_fast_path: bool,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.global.verbose);
    let settings = cli.global.settings();

    let exit_code = match cli.command {
        Command::Classify { sources } => run_classify(&settings, &sources),
        Command::Fetch(args) => run_fetch(&settings, &args),
        Command::ProbeFastPath { url, all } => run_probe(&settings, &url, all),
        Command::Init { name, path } => run_init(&settings, &name, path),
        Command::Validate { bundle, allow_dirs } => run_validate(&bundle, allow_dirs),
        Command::Package {
            bundle,
            output_dir,
            allow_dirs,
        } => run_package(&bundle, output_dir.as_deref(), allow_dirs),
        Command::Cleanup {
            name,
            list,
            all,
            force,
        } => run_cleanup(&settings, name.as_deref(), list, all, force),
    };

    std::process::exit(exit_code);
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env("SKILL_FORGE_LOG").unwrap_or_else(|_| EnvFilter::new(level)))
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}

fn context(settings: &Settings) -> LocationContext {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_context(&cwd, &settings.home_dir())
}

fn run_classify(settings: &Settings, sources: &[String]) -> i32 {
    let classifier = SourceClassifier::new(settings.home_dir());
    let mut ambiguous = false;

    for raw in sources {
        match classifier.classify(raw) {
            Classification::Source(descriptor) => println!("{raw}: {descriptor}"),
            Classification::Ambiguous { raw } => {
                eprintln!("{}", FetchError::Ambiguous { raw });
                ambiguous = true;
            }
        }
    }

    i32::from(ambiguous)
}

fn run_fetch(settings: &Settings, args: &FetchArgs) -> i32 {
    let descriptors = match fetch_descriptors(settings, args) {
        Ok(descriptors) => descriptors,
        Err(err) => {
            eprintln!("{err}");
            return 1;
        }
    };

    let destination_name = match (&args.git, &args.name) {
        (Some(_), _) => descriptors[0].name(),
        (None, Some(name)) => name.clone(),
        (None, None) => descriptors[0].name(),
    };

    let probe = match FastPathProbe::new(settings.probe_timeout) {
        Ok(probe) => probe,
        Err(err) => {
            eprintln!("Failed to set up HTTP client: {err}");
            return 1;
        }
    };
    let fetcher = Fetcher::new(settings, probe);
    let location = context(settings);
    let request = FetchRequest {
        descriptors,
        destination_name,
    };
    let options = FetchOptions {
        clean: args.clean,
        force_scrape: args.no_fast_path,
        output: args.output.clone(),
    };

    let entry = match fetcher.fetch(&request, &location, &options) {
        Ok(entry) => entry,
        Err(err) => {
            eprintln!("Fetch failed: {err}");
            return 1;
        }
    };

    println!(
        "Fetched {} source(s) into {}",
        request.descriptors.len(),
        entry.path.display()
    );
    print_stats(&MaterialsStats::collect(&entry.path));
    println!();
    println!("Next steps:");
    println!("  skill-forge init {}", entry.name);
    println!("  skill-forge cleanup {} (when the skill is done)", entry.name);
    0
}

/// Explicit `--git` and `--docs` first, then classified `--source` values.
fn fetch_descriptors(
    settings: &Settings,
    args: &FetchArgs,
) -> Result<Vec<SourceDescriptor>, FetchError> {
    let mut descriptors = Vec::new();

    if let Some(url) = &args.git {
        descriptors.push(SourceDescriptor::Repository(RepositoryRef {
            branch: args.branch.clone(),
            depth: args.depth,
            single_branch: args.single_branch,
            ..RepositoryRef::from_url(url)
        }));
    }
    if let (Some(location), Some(name)) = (&args.docs, &args.name) {
        descriptors.push(SourceDescriptor::Docs(DocRef {
            location: location.clone(),
            name: name.clone(),
        }));
    }

    let classifier = SourceClassifier::new(settings.home_dir());
    for raw in &args.source {
        match classifier.classify(raw) {
            Classification::Source(descriptor) => descriptors.push(match &args.name {
                Some(name) => descriptor.with_name(name),
                None => descriptor,
            }),
            Classification::Ambiguous { raw } => return Err(FetchError::Ambiguous { raw }),
        }
    }

    if descriptors.is_empty() {
        return Err(FetchError::NoSources);
    }
    Ok(descriptors)
}

fn print_stats(stats: &MaterialsStats) {
    println!(
        "  {} files, {}",
        stats.total_files,
        format_size(stats.total_bytes)
    );
    let kinds = [
        ("markdown", stats.markdown_files),
        ("python", stats.python_files),
        ("js/ts", stats.javascript_files),
        ("json", stats.json_files),
    ];
    for (kind, count) in kinds.iter().filter(|(_, count)| *count > 0) {
        println!("  {kind}: {count}");
    }
}

fn run_probe(settings: &Settings, url: &str, all: bool) -> i32 {
    let probe = match FastPathProbe::new(settings.probe_timeout) {
        Ok(probe) => probe,
        Err(err) => {
            eprintln!("Failed to set up HTTP client: {err}");
            return 1;
        }
    };

    let found = if all {
        probe.probe_all(url)
    } else {
        probe.probe(url).into_iter().collect()
    };

    if found.is_empty() {
        println!("No llms.txt found for {url}; documentation will be converted page by page.");
    } else {
        for manifest in found {
            println!("{} ({})", manifest.url, manifest.variant);
        }
    }
    0
}

fn run_init(settings: &Settings, name: &str, path: Option<PathBuf>) -> i32 {
    let target_root = path.unwrap_or_else(|| context(settings).skills_root);

    match init(name, &target_root) {
        Ok(bundle) => {
            println!("Initialized skill at {}", bundle.display());
            println!();
            println!("Next steps:");
            println!("  1. Fill in the description and the [TODO] sections of SKILL.md");
            println!("  2. Replace or delete the example files");
            println!("  3. skill-forge validate {}", bundle.display());
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn run_validate(bundle: &Path, allow_dirs: Vec<String>) -> i32 {
    let options = ValidateOptions {
        allowed_dirs: allow_dirs,
    };
    let findings = validate_with(bundle, &options);

    if findings.is_empty() {
        println!("Skill is valid!");
        return 0;
    }

    print_findings(bundle, &findings);
    i32::from(findings.iter().any(Finding::is_error))
}

fn print_findings(bundle: &Path, findings: &[Finding]) {
    let (errors, warnings): (Vec<&Finding>, Vec<&Finding>) =
        findings.iter().partition(|finding| finding.is_error());

    if !errors.is_empty() {
        eprintln!("Validation failed for {}:", bundle.display());
        for finding in errors {
            eprintln!("  - [{}] {finding}", finding.code());
        }
    }
    if !warnings.is_empty() {
        println!("Warnings for {}:", bundle.display());
        for finding in warnings {
            println!("  - [{}] {finding}", finding.code());
        }
    }
}

fn run_package(bundle: &Path, output_dir: Option<&Path>, allow_dirs: Vec<String>) -> i32 {
    let options = ValidateOptions {
        allowed_dirs: allow_dirs,
    };

    match package_with_report(bundle, output_dir, &options) {
        Ok(report) => {
            print_findings(bundle, &report.warnings);
            for entry in &report.entries {
                println!("  added: {entry}");
            }
            println!("Packaged skill to {}", report.archive.display());
            0
        }
        Err(PackageError::Aborted { findings }) => {
            print_findings(bundle, &findings);
            eprintln!("Packaging aborted; nothing was written.");
            1
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn run_cleanup(settings: &Settings, name: Option<&str>, list: bool, all: bool, force: bool) -> i32 {
    let registry = MaterialsRegistry::new(&context(settings), &settings.home_dir());

    if list {
        print_entries(&registry, &registry.list(), false);
        return 0;
    }
    if all {
        return report_bulk(&registry.delete_all(force, confirm_delete_all));
    }
    match name {
        Some(name) => cleanup_named(&registry, name, force),
        None => cleanup_interactive(&registry, force),
    }
}

fn cleanup_named(registry: &MaterialsRegistry, name: &str, force: bool) -> i32 {
    let outcome = registry.delete(name, force, |entry| {
        confirm(&format!(
            "Delete {} ({})? [y/N] ",
            entry.path.display(),
            format_size(entry.size)
        ))
    });

    match outcome {
        Ok(DeleteOutcome::Deleted { entry, residual }) => {
            println!("Deleted {} ({})", entry.path.display(), format_size(entry.size));
            if let Some(residual) = residual {
                println!(
                    "Note: '{}' also exists at {}",
                    residual.name,
                    residual.path.display()
                );
            }
            0
        }
        Ok(DeleteOutcome::Declined { .. }) => {
            println!("Cancelled.");
            0
        }
        Ok(DeleteOutcome::NotFound { searched }) => {
            println!("No materials named '{name}'. Searched:");
            for path in searched {
                println!("  {}", path.display());
            }
            0
        }
        Err(err) => {
            eprintln!("{err}");
            1
        }
    }
}

fn cleanup_interactive(registry: &MaterialsRegistry, force: bool) -> i32 {
    let entries = registry.list();
    if entries.is_empty() {
        print_entries(registry, &entries, false);
        return 0;
    }
    print_entries(registry, &entries, true);

    let Some(choice) = prompt("Delete which? (number, 'all', or 'quit'): ") else {
        return 0;
    };
    match choice.as_str() {
        "" | "q" | "quit" => 0,
        "all" => report_bulk(&registry.delete_all(force, confirm_delete_all)),
        number => {
            let Some(entry) = number
                .parse::<usize>()
                .ok()
                .and_then(|index| index.checked_sub(1))
                .and_then(|index| entries.get(index))
            else {
                eprintln!("Invalid choice: {number}");
                return 1;
            };
            let question = format!("Delete {}? [y/N] ", entry.path.display());
            if !force && !confirm(&question) {
                println!("Cancelled.");
                return 0;
            }
            match registry.delete_entry(entry) {
                Ok(()) => {
                    println!("Deleted {}", entry.path.display());
                    0
                }
                Err(err) => {
                    eprintln!("{err}");
                    1
                }
            }
        }
    }
}

fn print_entries(registry: &MaterialsRegistry, entries: &[MaterialsEntry], numbered: bool) {
    if entries.is_empty() {
        println!("No materials found. Searched:");
        for location in registry.locations() {
            println!("  {}", location.root.display());
        }
        return;
    }

    let total: u64 = entries.iter().map(|entry| entry.size).sum();
    println!("Materials ({} total, {}):", entries.len(), format_size(total));
    for (index, entry) in entries.iter().enumerate() {
        let scope = entry
            .scope
            .map_or_else(|| "custom".to_string(), |scope| scope.to_string());
        let marker = if numbered {
            format!("{:>3}. ", index + 1)
        } else {
            "  ".to_string()
        };
        println!(
            "{marker}{:<24} {:>10}  [{scope}] {}",
            entry.name,
            format_size(entry.size),
            entry.path.display()
        );
    }
}

fn report_bulk(report: &BulkDeleteReport) -> i32 {
    if report.declined {
        println!("Cancelled.");
        return 0;
    }
    if report.deleted.is_empty() && report.failed.is_empty() {
        println!("No materials to delete.");
        return 0;
    }
    for entry in &report.deleted {
        println!("Deleted {}", entry.path.display());
    }
    for (entry, err) in &report.failed {
        eprintln!("Could not delete {}: {err}", entry.path.display());
    }
    i32::from(!report.failed.is_empty())
}

fn confirm_delete_all(entries: &[MaterialsEntry]) -> bool {
    let total: u64 = entries.iter().map(|entry| entry.size).sum();
    println!(
        "This deletes {} materials directories ({}).",
        entries.len(),
        format_size(total)
    );
    prompt("Type DELETE ALL to confirm: ").is_some_and(|answer| answer == "DELETE ALL")
}

fn confirm(question: &str) -> bool {
    prompt(question).is_some_and(|answer| matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes"))
}

/// Print `question` and read one trimmed line; `None` at end of input.
fn prompt(question: &str) -> Option<String> {
    print!("{question}");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(line.trim().to_string()),
    }
}
