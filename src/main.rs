//! dirinfo - Directory statistics at a glance.
//!
//! Usage:
//!   dirinfo                      Prompt for a path and options
//!   dirinfo [PATH]               Report on PATH
//!   dirinfo [PATH] --tree        Also save tree listings at depths 1-3
//!   dirinfo [PATH] -f json       Print the report as JSON
//!   dirinfo --help               Show help

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};
use tracing::Level;
use tracing_subscriber::EnvFilter;

use dirinfo_core::{DEFAULT_TREE_PREFIX, DirectoryReport, ScanConfig, ScanError, TreeConfig};
use dirinfo_report::{TreeRunner, format_size, plan_invocations, render_stat};
use dirinfo_scan::Aggregator;

const WIDE: usize = 60;

#[derive(Parser)]
#[command(
    name = "dirinfo",
    version,
    about = "Report file counts, extensions, sizes and tree listings for a directory",
    long_about = "dirinfo counts the files beneath a directory and each of its subfolders, \
                  ranks file extensions, totals directory sizes, and can save `tree` \
                  listings at several depths.\n\n\
                  Run without a path to be prompted for every option."
)]
struct Cli {
    /// Directory to analyze (prompted for when omitted)
    path: Option<PathBuf>,

    /// Save tree listings
    #[arg(long, conflicts_with = "no_tree")]
    tree: bool,

    /// Do not save tree listings (and do not ask)
    #[arg(long)]
    no_tree: bool,

    /// Filename prefix for tree listings
    #[arg(short, long)]
    prefix: Option<String>,

    /// Tree depth to render; repeat for several listings
    #[arg(short = 'L', long = "depth", value_parser = clap::value_parser!(u32).range(1..))]
    depths: Vec<u32>,

    /// Directory the tree listings are written into
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Tree utility to run
    #[arg(long, default_value = "tree")]
    tree_utility: String,

    /// Number of extensions to rank
    #[arg(short = 'n', long, default_value = "10")]
    top: usize,

    /// Output format
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Include hidden files and directories
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    hidden: bool,

    /// Follow symbolic links into directories
    #[arg(long)]
    follow_links: bool,

    /// Log debug events to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default, PartialEq, Eq)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(cli.verbose);

    let text = cli.format == OutputFormat::Text;
    if text {
        println!("\n{}", "=".repeat(WIDE));
        println!("DIRECTORY INFORMATION");
        println!("{}", "=".repeat(WIDE));
    }

    let interactive = cli.path.is_none();
    let path = match &cli.path {
        Some(path) => path.clone(),
        None => PathBuf::from(prompt("\nEnter full path to analyze: ", text)?),
    };

    let config = ScanConfig::builder()
        .root(path)
        .top_extensions(cli.top)
        .include_hidden(cli.hidden)
        .follow_symlinks(cli.follow_links)
        .build();
    let config = match config {
        Ok(config) => config,
        Err(ScanError::EmptyRoot) => {
            eprintln!("Full path can not be empty. Aborting.");
            std::process::exit(1);
        }
        Err(err) => return Err(err.into()),
    };

    let tree_config = tree_config(&cli, interactive, text)?;
    let date = Local::now().date_naive();

    let report = Aggregator::with_config(config).analyze();

    match cli.format {
        OutputFormat::Text => {
            print_counts(&report);
            print_sizes(&report);
            println!("\n{}", "-".repeat(WIDE));
            println!("TREE STRUCTURE OUTPUT");
            println!("{}", "-".repeat(WIDE));
            let generated = match &tree_config {
                Some(tree_config) => run_trees(tree_config, &report, date, true)?,
                None => Vec::new(),
            };
            print_summary(&report, tree_config.is_some(), &generated);
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            if let Some(tree_config) = &tree_config {
                run_trees(tree_config, &report, date, false)?;
            }
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .init();
}

/// Ask a question and read one trimmed line from stdin.
///
/// The question goes to stderr unless the report itself is text, so that
/// machine-readable stdout stays clean.
fn prompt(question: &str, text: bool) -> Result<String> {
    if text {
        print!("{question}");
        io::stdout().flush()?;
    } else {
        eprint!("{question}");
        io::stderr().flush()?;
    }

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}

/// Decide whether and how to produce tree listings.
fn tree_config(cli: &Cli, interactive: bool, text: bool) -> Result<Option<TreeConfig>> {
    let wanted = if cli.tree {
        true
    } else if cli.no_tree || !interactive {
        false
    } else {
        let answer = prompt("\nDo you need tree command info? (y/n) ", text)?;
        matches!(answer.as_str(), "y" | "Y" | "yes")
    };

    if !wanted {
        return Ok(None);
    }

    let prefix = match &cli.prefix {
        Some(prefix) => prefix.clone(),
        None if interactive => prompt("\nEnter filename for tree command results: ", text)?,
        None => DEFAULT_TREE_PREFIX.to_string(),
    };

    let mut config = TreeConfig::with_prefix(&prefix);
    if !cli.depths.is_empty() {
        config.depths = cli.depths.clone();
    }
    config.utility = cli.tree_utility.clone();
    config.output_dir = cli.output_dir.clone();
    Ok(Some(config))
}

fn print_counts(report: &DirectoryReport) {
    println!("\n{}", "-".repeat(WIDE));
    println!("FILE COUNTS");
    println!("{}", "-".repeat(WIDE));

    println!(
        "\nNumber of files in current directory: {}",
        report.total_files
    );

    println!("\nNumber of files in each subfolder:");
    for folder in &report.subfolders {
        println!("  {}/: {} files", folder.name, folder.file_count);
    }

    if report.total_files > 0 {
        println!("\nTop {} extension files", report.top_extensions.len());
        for stat in &report.top_extensions {
            println!("{}", render_stat(stat));
        }
    }
}

fn print_sizes(report: &DirectoryReport) {
    println!("\n{}", "-".repeat(WIDE));
    println!("DIRECTORY SIZES");
    println!("{}", "-".repeat(WIDE));

    println!(
        "\nSize of current directory: {}",
        format_size(report.total_size)
    );

    if !report.subfolders.is_empty() {
        println!("\nSize of each subfolder:");
        for folder in &report.subfolders {
            println!("  {}/: {}", folder.name, format_size(folder.size));
        }
    }
}

/// Run every planned listing; failures are reported and skipped.
///
/// Returns the (depth, file) pairs that were written.
fn run_trees(
    config: &TreeConfig,
    report: &DirectoryReport,
    date: NaiveDate,
    text: bool,
) -> Result<Vec<(u32, PathBuf)>> {
    let invocations = plan_invocations(config, &report.root, date)?;
    let runner = TreeRunner::from_config(config);
    let mut generated = Vec::new();

    let say = |line: String| {
        if text {
            println!("{line}");
        } else {
            eprintln!("{line}");
        }
    };

    say("\nGenerating tree command output...".to_string());
    for invocation in &invocations {
        say(format!("\nLevel {}:", invocation.depth));
        match runner.run(invocation) {
            Ok(path) => {
                say(format!("  ✓ Tree output saved to: {}", path.display()));
                generated.push((invocation.depth, path));
            }
            Err(err) => {
                say(format!("  ✗ {err}"));
                if let Some(hint) = err.install_hint() {
                    for line in hint.lines() {
                        say(format!("     {line}"));
                    }
                }
            }
        }
    }

    Ok(generated)
}

fn print_summary(report: &DirectoryReport, trees_requested: bool, generated: &[(u32, PathBuf)]) {
    println!("\n{}", "=".repeat(WIDE));
    println!("SUMMARY");
    println!("{}", "=".repeat(WIDE));
    println!("• Current directory: {}", report.root.display());
    println!("• Files in current directory: {}", report.total_files);
    println!("• Total size: {}", format_size(report.total_size));

    if trees_requested {
        println!("• Tree outputs generated:");
        for (depth, path) in generated {
            println!("  - Level {depth}: {}", path.display());
        }
    }

    if report.has_warnings() {
        println!(
            "• Incomplete data: {} path(s) could not be read",
            report.warnings.len()
        );
        for warning in &report.warnings {
            println!("  - {}", warning.path.display());
        }
    }

    println!("\nScan completed.");
    println!("{}", "=".repeat(WIDE));
}
