//! CLI entry point for the dirscope tool.
//!
//! This binary walks a directory, classifies what it finds and prints a
//! one-line summary per file, followed by directories, the number of ignored
//! files and the git remote URL.
//!
//! # Usage
//!
//! ```bash
//! dirscope [OPTIONS] <COMMAND>
//!
//! # List the top level of the current directory
//! dirscope scan
//!
//! # Walk three levels deep, including modification times
//! dirscope --path ~/src/project --max-depth 3 scan --detailed
//!
//! # Generate CSV report
//! dirscope report --format csv --output report.csv
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::fmt::Write as _;
use std::io::{self, Write};
use std::time::SystemTime;

use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand, ValueEnum};
use ds_classify::{MimeTable, UNKNOWN};
use ds_core::{ClassificationResult, Config, FileMetadata};
use ds_scanner::{ScanReport, Scanner, StatsSnapshot};
use serde::Serialize;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Walks a directory tree and describes every file in it.
///
/// Files are labelled by name and content, directories are listed
/// separately, and dotfiles, `vendor`, `.git` and entries named in a
/// top-level `.gitignore` or `.ignore` are counted as ignored.
#[derive(Parser)]
#[command(name = "dirscope", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    command: Commands,

    /// Directory to examine.
    ///
    /// Defaults to the configuration file's root, or `.`.
    #[arg(short, long, global = true, env = "DIRSCOPE_PATH")]
    path: Option<Utf8PathBuf>,

    /// JSON configuration file.
    #[arg(long, global = true, env = "DIRSCOPE_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Maximum number of path segments below the root to record.
    #[arg(long, global = true)]
    max_depth: Option<usize>,

    /// Do not treat top-level `.ignore`/`.gitignore` lines as ignore rules.
    #[arg(long, global = true)]
    no_ignore_files: bool,

    /// List dotfiles like any other file.
    #[arg(long, global = true)]
    show_hidden: bool,

    /// Number of walker threads (defaults to all cores).
    #[arg(long, global = true)]
    threads: Option<usize>,

    /// `mime.types` file replacing the built-in MIME table.
    #[arg(long, global = true, env = "DIRSCOPE_MIME_TYPES")]
    mime_types: Option<Utf8PathBuf>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored log output.
    #[arg(long, global = true)]
    no_color: bool,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Examine the directory and print one line per file.
    Scan {
        /// Include how long ago each file was modified.
        #[arg(short, long)]
        detailed: bool,
    },

    /// Generate a machine-readable report.
    Report {
        /// Output format.
        #[arg(short, long, value_enum, default_value_t = ReportFormat::Json)]
        format: ReportFormat,

        /// Output file (defaults to stdout).
        #[arg(short, long)]
        output: Option<Utf8PathBuf>,
    },
}

/// Report output format.
#[derive(Clone, Copy, ValueEnum)]
enum ReportFormat {
    /// JSON format.
    Json,
    /// CSV format.
    Csv,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default. Logs go
/// to stderr so they never interleave with the listing.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(format!("{level},ignore=warn,globset=warn"))
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(use_ansi)
                .with_writer(io::stderr),
        )
        .with(filter)
        .init();
}

/// Builds a [`Config`] from the optional configuration file and CLI flags.
///
/// Flags override values from the file.
///
/// # Errors
///
/// Returns an error if the configuration file cannot be loaded or the
/// resulting options are invalid.
fn build_config(cli: &Cli) -> color_eyre::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)
            .map_err(|e| color_eyre::eyre::eyre!("Failed to load config {path}: {e}"))?,
        None => Config::default(),
    };

    if let Some(path) = &cli.path {
        config.scan.root_path.clone_from(path);
    }
    if let Some(depth) = cli.max_depth {
        config.scan.max_depth = depth;
    }
    if cli.no_ignore_files {
        config.scan.respect_ignore_files = false;
    }
    if cli.show_hidden {
        config.scan.respect_hidden_files = false;
    }
    if cli.threads.is_some() {
        config.scan.threads = cli.threads;
    }
    if cli.mime_types.is_some() {
        config.classify.mime_types_path.clone_from(&cli.mime_types);
    }

    config
        .scan
        .validate()
        .map_err(|e| color_eyre::eyre::eyre!("Invalid options: {e}"))?;

    Ok(config)
}

/// Loads the configured MIME table, or the built-in one.
///
/// A table that fails to load is replaced by an empty one, so unknown
/// extensions stay "Unknown" instead of aborting the scan.
fn load_mime_table(config: &Config) -> MimeTable {
    let Some(path) = &config.classify.mime_types_path else {
        return MimeTable::builtin();
    };
    match MimeTable::load(path) {
        Ok(table) => table,
        Err(err) => {
            warn!(path = %path, error = %err, "Failed to load MIME table, continuing without one");
            MimeTable::empty()
        }
    }
}

/// Creates a [`Scanner`] from the configuration.
///
/// # Errors
///
/// Returns an error if the root is not a directory.
fn create_scanner(config: &Config) -> color_eyre::Result<Scanner> {
    Scanner::new(config, load_mime_table(config))
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create scanner: {e}"))
}

// =============================================================================
// COMMAND IMPLEMENTATIONS
// =============================================================================

/// Runs a scan and prints the listing.
///
/// # Errors
///
/// Returns an error if the walk fails or stdout is closed.
fn run_scan(config: &Config, detailed: bool) -> color_eyre::Result<()> {
    info!(root = %config.scan.root_path, "Starting scan");

    let scanner = create_scanner(config)?;
    let report = scanner.scan()?;

    let listing = Listing {
        read_size_threshold: config.classify.read_size_threshold,
        detailed,
        now: SystemTime::now(),
    };

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    listing.write(&mut handle, &report)?;
    handle.flush()?;

    Ok(())
}

/// Generates a report in the specified format.
///
/// # Errors
///
/// Returns an error if scanning or writing fails.
fn run_report(
    config: &Config,
    format: ReportFormat,
    output: Option<&Utf8Path>,
) -> color_eyre::Result<()> {
    info!(root = %config.scan.root_path, "Generating report");

    let scanner = create_scanner(config)?;
    let report = scanner.scan()?;
    let rows = report_rows(&report);

    let content = match format {
        ReportFormat::Json => generate_json_report(&report, &rows)?,
        ReportFormat::Csv => generate_csv_report(&rows),
    };

    if let Some(output_path) = output {
        std::fs::write(output_path.as_std_path(), &content)?;
        info!(path = %output_path, "Report written");
    } else {
        let stdout = io::stdout();
        let mut handle = stdout.lock();
        write!(handle, "{content}")?;
    }

    Ok(())
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Renders a [`ScanReport`] as the plain-text listing.
struct Listing {
    read_size_threshold: u64,
    detailed: bool,
    now: SystemTime,
}

impl Listing {
    /// Writes files, directories, the ignored count and the git URL, each
    /// section followed by a blank line when it printed anything.
    fn write(&self, out: &mut impl Write, report: &ScanReport) -> io::Result<()> {
        let mut printed = false;
        for (path, meta, class) in report.files() {
            let description = class.map_or(UNKNOWN, |c| c.description.as_str());
            let size = size_description(&meta, class, self.read_size_threshold);
            if self.detailed {
                let age = format_age(meta.modified, self.now);
                writeln!(out, "{path};[{description}];{age};{size}")?;
            } else {
                writeln!(out, "{path};[{description}];{size}")?;
            }
            printed = true;
        }
        end_section(out, &mut printed)?;

        for dir in report.directories() {
            writeln!(out, "[dir] {dir}/")?;
            printed = true;
        }
        end_section(out, &mut printed)?;

        if let Some(sentence) = ignored_sentence(report.findings.ignored_files().len()) {
            writeln!(out, "{sentence}")?;
            printed = true;
        }
        end_section(out, &mut printed)?;

        if let Some(git) = report.findings.git() {
            writeln!(out, "Git URL: {}", git.url)?;
            printed = true;
        }
        end_section(out, &mut printed)
    }
}

fn end_section(out: &mut impl Write, printed: &mut bool) -> io::Result<()> {
    if std::mem::take(printed) {
        writeln!(out)?;
    }
    Ok(())
}

/// The last column of a listing line.
///
/// Files that were not read, or could not be read, are "too large to
/// analyze". Without classification the raw byte size is shown.
fn size_description(
    meta: &FileMetadata,
    class: Option<&ClassificationResult>,
    read_size_threshold: u64,
) -> String {
    if meta.size >= read_size_threshold {
        return "too large to analyze".to_owned();
    }
    match class {
        None
        | Some(ClassificationResult {
            is_binary: true, ..
        }) => format!("{} bytes", meta.size),
        Some(ClassificationResult {
            line_count: Some(lines),
            ..
        }) => format!("{lines} lines"),
        Some(_) => "too large to analyze".to_owned(),
    }
}

/// "3 hours ago" style age of a modification time, or `-` if unknown.
fn format_age(modified: Option<SystemTime>, now: SystemTime) -> String {
    const MINUTE: u64 = 60;
    const HOUR: u64 = 60 * MINUTE;
    const DAY: u64 = 24 * HOUR;

    let Some(modified) = modified else {
        return "-".to_owned();
    };
    // Clock skew puts some files in the future.
    let secs = now.duration_since(modified).map_or(0, |d| d.as_secs());

    let (count, unit) = match secs {
        s if s < MINUTE => return "now".to_owned(),
        s if s < HOUR => (s / MINUTE, "minute"),
        s if s < DAY => (s / HOUR, "hour"),
        s => (s / DAY, "day"),
    };
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}

fn ignored_sentence(count: usize) -> Option<String> {
    match count {
        0 => None,
        1 => Some("There is also one ignored file.".to_owned()),
        n => Some(format!("There are also {n} ignored files.")),
    }
}

/// One path of a report.
#[derive(Debug, Serialize)]
struct ReportRow<'a> {
    path: &'a Utf8Path,
    status: &'static str,
    is_dir: bool,
    size: u64,
    description: Option<&'a str>,
    is_binary: Option<bool>,
    line_count: Option<usize>,
}

/// Regular paths first, then ignored ones, each in path order.
fn report_rows(report: &ScanReport) -> Vec<ReportRow<'_>> {
    let findings = &report.findings;
    let regular = findings
        .regular_files()
        .iter()
        .map(|path| (path.as_path(), "regular"));
    let ignored = findings
        .ignored_files()
        .iter()
        .map(|path| (path.as_path(), "ignored"));

    regular
        .chain(ignored)
        .map(|(path, status)| {
            let meta = findings
                .metadata(path)
                .copied()
                .unwrap_or_else(|| FileMetadata::file(0));
            let class = report.classification(path);
            ReportRow {
                path,
                status,
                is_dir: meta.is_dir,
                size: meta.size,
                description: class.map(|c| c.description.as_str()),
                is_binary: class.map(|c| c.is_binary),
                line_count: class.and_then(|c| c.line_count),
            }
        })
        .collect()
}

/// Generates a JSON report.
fn generate_json_report(
    report: &ScanReport,
    rows: &[ReportRow<'_>],
) -> color_eyre::Result<String> {
    #[derive(Serialize)]
    struct Report<'a> {
        root: &'a Utf8Path,
        git_url: Option<&'a str>,
        stats: &'a StatsSnapshot,
        files: &'a [ReportRow<'a>],
    }

    let report = Report {
        root: &report.root,
        git_url: report.findings.git().map(|g| g.url.as_str()),
        stats: &report.stats,
        files: rows,
    };
    serde_json::to_string_pretty(&report)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to serialize JSON: {}", e))
}

/// Generates a CSV report.
fn generate_csv_report(rows: &[ReportRow<'_>]) -> String {
    let mut output = String::from("path,status,is_dir,size,description,is_binary,line_count\n");

    for row in rows {
        let escaped_path = escape_csv(row.path.as_str());
        let description = escape_csv(row.description.unwrap_or_default());
        let is_binary = row.is_binary.map(|b| b.to_string()).unwrap_or_default();
        let line_count = row.line_count.map(|n| n.to_string()).unwrap_or_default();
        let ReportRow {
            status,
            is_dir,
            size,
            ..
        } = row;

        // Use write! to avoid extra allocation from format!
        let _ = writeln!(
            output,
            "{escaped_path},{status},{is_dir},{size},{description},{is_binary},{line_count}"
        );
    }

    output
}

/// Escapes a string for CSV output.
fn escape_csv(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_owned()
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // 1. Install color-eyre FIRST (before any potential panics)
    color_eyre::install()?;

    // 2. Parse CLI arguments
    let cli = Cli::parse();

    // 3. Initialize tracing (handles --no-color for log output)
    init_tracing(cli.verbose, cli.no_color);

    // 4. Route to appropriate command
    let config = build_config(&cli)?;
    match &cli.command {
        Commands::Scan { detailed } => run_scan(&config, *detailed),
        Commands::Report { format, output } => run_report(&config, *format, output.as_deref()),
    }
}
