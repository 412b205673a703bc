//! esfmt - Rule-driven JavaScript code formatter

#![warn(clippy::all)]
#![warn(clippy::pedantic)]

use std::fs::File;
use std::io::{self, BufReader, Cursor, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

use esfmt::process::format_file;
use esfmt::{parse_args, CliArgs, Config, Result};
use glob::Pattern;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

/// JavaScript file extensions to process
const JS_EXTENSIONS: &[&str] = &["js", "mjs", "cjs", "JS"];

/// Default maximum file size in bytes (100 MB)
/// Files larger than this are skipped to prevent memory exhaustion
const DEFAULT_MAX_FILE_SIZE: u64 = 100 * 1024 * 1024;

/// Environment variable holding `tracing` filter directives
const LOG_ENV: &str = "ESFMT_LOG";

/// What happened to one input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Unchanged,
    Changed,
    Skipped,
}

fn main() -> Result<()> {
    let args = parse_args();
    init_tracing(args.debug);

    let use_stdin =
        args.inputs.is_empty() || (args.inputs.len() == 1 && args.inputs[0].as_os_str() == "-");

    // If no inputs and running interactively, print usage; otherwise read from stdin
    if args.inputs.is_empty() && io::stdin().is_terminal() {
        print_usage();
        return Ok(());
    }

    if use_stdin {
        let config = build_config(&args, None)?;
        let outcome = process_stdin(&config, &args)?;
        if args.check && outcome == Outcome::Changed {
            std::process::exit(1);
        }
        return Ok(());
    }

    // For explicit config files, we use one config for all files
    // For auto-discovery, each file may have its own config
    let base_config = if args.config.is_none() {
        None
    } else {
        Some(build_config(&args, None)?)
    };

    if let Some(jobs) = args.jobs {
        if jobs > 0 {
            if let Err(e) = rayon::ThreadPoolBuilder::new()
                .num_threads(jobs)
                .build_global()
            {
                eprintln!("Warning: failed to configure thread pool: {e}");
            }
        }
    }

    let files = collect_files(&args);

    if files.is_empty() {
        if !args.silent {
            eprintln!("No JavaScript files found to format.");
        }
        return Ok(());
    }

    let use_sequential = args.stdout || args.jobs == Some(1);
    let summary = if use_sequential {
        process_files_sequential(&files, base_config.as_ref(), &args)
    } else {
        process_files_parallel(&files, base_config.as_ref(), &args)
    };

    if summary.errors > 0 || (args.check && summary.changed > 0) {
        std::process::exit(1);
    }
    Ok(())
}

/// Install the stderr subscriber; `ESFMT_LOG` wins over `--debug`
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(if debug { "esfmt=debug" } else { "warn" }));
    // a second subscriber only fails when one is already installed
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

/// Build configuration from CLI args and optional config file
///
/// If `for_path` is provided and no explicit config file is specified,
/// uses auto-discovery to find config files in parent directories.
fn build_config(args: &CliArgs, for_path: Option<&Path>) -> Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        tracing::debug!(path = %config_path.display(), "using explicit config file");
        Config::from_toml_file(config_path)?
    } else {
        let start = match for_path {
            Some(path) => path.to_path_buf(),
            None => std::env::current_dir().unwrap_or_default(),
        };
        if args.debug {
            let discovered = Config::discover_config_files(&start);
            if discovered.is_empty() {
                eprintln!("[DEBUG] No config files discovered for: {}", start.display());
            } else {
                eprintln!("[DEBUG] Discovered config files for {}:", start.display());
                for f in &discovered {
                    eprintln!("[DEBUG]   - {}", f.display());
                }
            }
        }
        Config::from_discovered_files(&start)
    };

    args.apply_to(&mut config);

    if args.debug {
        print_config_debug(&config);
    }

    if let Some(error) = config.validate() {
        anyhow::bail!("Invalid configuration: {error}");
    }

    Ok(config)
}

/// Print configuration values in debug mode
fn print_config_debug(config: &Config) {
    eprintln!("[DEBUG] Configuration:");
    eprintln!("[DEBUG]   indent: {}", config.indent);
    eprintln!("[DEBUG]   use_tabs: {}", config.use_tabs);
    let tables = [
        ("whitespace.before", &config.whitespace.before),
        ("whitespace.after", &config.whitespace.after),
        ("line_break.before", &config.line_break.before),
        ("line_break.after", &config.line_break.after),
    ];
    for (name, table) in tables {
        eprintln!("[DEBUG]   {name}:");
        for (rule, amount) in table {
            eprintln!("[DEBUG]     {rule} = {amount}");
        }
    }
}

/// Collect all files to process, handling directories and recursive flag
fn collect_files(args: &CliArgs) -> Vec<PathBuf> {
    let exclude_patterns: Vec<Pattern> = args
        .exclude
        .iter()
        .filter_map(|p| match Pattern::new(p) {
            Ok(pattern) => Some(pattern),
            Err(e) => {
                eprintln!("Warning: ignoring invalid exclude pattern {p:?}: {e}");
                None
            }
        })
        .collect();

    let custom_extensions = &args.extensions;

    let mut files = Vec::new();

    for input in &args.inputs {
        if input.is_file() {
            if !is_excluded(input, &exclude_patterns) {
                files.push(input.clone());
            }
        } else if input.is_dir() {
            if args.recursive {
                // WalkDir reports symlink loops as errors; those entries are skipped
                for entry in WalkDir::new(input)
                    .follow_links(true)
                    .max_depth(256)
                    .into_iter()
                    .filter_entry(|entry| !is_excluded(entry.path(), &exclude_patterns))
                    .filter_map(std::result::Result::ok)
                {
                    let path = entry.path();
                    if path.is_file() && is_js_file(path, custom_extensions) {
                        files.push(path.to_path_buf());
                    }
                }
            } else if let Ok(entries) = std::fs::read_dir(input) {
                for entry in entries.filter_map(std::result::Result::ok) {
                    let path = entry.path();
                    if path.is_file()
                        && is_js_file(&path, custom_extensions)
                        && !is_excluded(&path, &exclude_patterns)
                    {
                        files.push(path);
                    }
                }
            }
        } else if !args.silent {
            eprintln!("Warning: {} does not exist", input.display());
        }
    }

    files
}

/// Check if a path matches any exclusion pattern
fn is_excluded(path: &Path, patterns: &[Pattern]) -> bool {
    if patterns.is_empty() {
        return false;
    }

    let path_str = path.to_string_lossy();

    patterns.iter().any(|pattern| {
        pattern.matches(&path_str)
            || path.components().any(|component| match component {
                std::path::Component::Normal(c) => pattern.matches(&c.to_string_lossy()),
                _ => false,
            })
    })
}

/// Count the number of lines in a byte buffer
#[allow(clippy::naive_bytecount)]
fn count_lines(contents: &[u8]) -> usize {
    let newlines = contents.iter().filter(|&&b| b == b'\n').count();
    if contents.is_empty() {
        0
    } else if contents.last() == Some(&b'\n') {
        newlines
    } else {
        newlines + 1
    }
}

/// Check if a file has a JavaScript extension
/// Checks against both default extensions and any custom extensions provided
fn is_js_file(path: &Path, custom_extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            JS_EXTENSIONS.contains(&ext)
                || custom_extensions
                    .iter()
                    .any(|custom| custom.strip_prefix('.').unwrap_or(custom) == ext)
        })
}

/// Counters collected over a run
#[derive(Debug, Default)]
struct Summary {
    formatted: usize,
    changed: usize,
    errors: usize,
}

/// Resolve the config for `path` and process it
fn run_one(path: &Path, base_config: Option<&Config>, args: &CliArgs) -> Result<Outcome> {
    match base_config {
        Some(config) => process_single_file(path, config, args),
        None => process_single_file(path, &build_config(args, Some(path))?, args),
    }
}

/// Process files sequentially (for stdout output)
fn process_files_sequential(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
) -> Summary {
    let mut summary = Summary::default();
    for path in files {
        match run_one(path, base_config, args) {
            Ok(Outcome::Changed) => {
                summary.formatted += 1;
                summary.changed += 1;
            }
            Ok(Outcome::Unchanged) => summary.formatted += 1,
            Ok(Outcome::Skipped) => {}
            Err(e) => {
                summary.errors += 1;
                eprintln!("Error formatting {}: {e:#}", path.display());
            }
        }
    }
    summary
}

/// Process files in parallel using Rayon
fn process_files_parallel(
    files: &[PathBuf],
    base_config: Option<&Config>,
    args: &CliArgs,
) -> Summary {
    let success_count = AtomicUsize::new(0);
    let changed_count = AtomicUsize::new(0);
    let error_count = AtomicUsize::new(0);

    files
        .par_iter()
        .for_each(|path| match run_one(path, base_config, args) {
            Ok(outcome) => {
                if outcome != Outcome::Skipped {
                    success_count.fetch_add(1, Ordering::Relaxed);
                }
                if outcome == Outcome::Changed {
                    changed_count.fetch_add(1, Ordering::Relaxed);
                }
            }
            Err(e) => {
                error_count.fetch_add(1, Ordering::Relaxed);
                eprintln!("Error formatting {}: {e:#}", path.display());
            }
        });

    let summary = Summary {
        formatted: success_count.load(Ordering::Relaxed),
        changed: changed_count.load(Ordering::Relaxed),
        errors: error_count.load(Ordering::Relaxed),
    };

    if !args.silent {
        let verb = if args.check { "Checked" } else { "Formatted" };
        if summary.errors == 0 {
            eprintln!("{verb} {} files successfully.", summary.formatted);
        } else {
            eprintln!(
                "{verb} {} files, {} errors.",
                summary.formatted, summary.errors
            );
        }
        if args.check && summary.changed > 0 {
            eprintln!("{} files would be reformatted.", summary.changed);
        }
    }
    summary
}

/// Process a single file
fn process_single_file(path: &Path, config: &Config, args: &CliArgs) -> Result<Outcome> {
    // Check file size BEFORE reading to prevent memory exhaustion
    let file_size = std::fs::metadata(path)?.len();
    if file_size > DEFAULT_MAX_FILE_SIZE {
        if !args.silent {
            eprintln!(
                "Skipping {} ({} MB exceeds limit of {} MB)",
                path.display(),
                file_size / (1024 * 1024),
                DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
            );
        }
        return Ok(Outcome::Skipped);
    }

    let mut file_contents = Vec::new();
    File::open(path)?.read_to_end(&mut file_contents)?;

    if let Some(max_lines) = args.exclude_max_lines {
        let line_count = count_lines(&file_contents);
        if line_count > max_lines {
            if !args.silent {
                eprintln!(
                    "Skipping {} ({} lines exceeds limit of {})",
                    path.display(),
                    line_count,
                    max_lines
                );
            }
            return Ok(Outcome::Skipped);
        }
    }

    if !args.silent && !args.stdout && !args.check {
        eprintln!("Formatting: {}", path.display());
    }

    let name = path.to_string_lossy();
    let reader = BufReader::new(Cursor::new(&file_contents));
    let mut output = Vec::new();
    format_file(reader, &mut output, config, &name)?;

    let outcome = if output == file_contents {
        Outcome::Unchanged
    } else {
        Outcome::Changed
    };

    if args.check {
        if outcome == Outcome::Changed && !args.silent {
            println!("{}", path.display());
        }
    } else if args.stdout {
        io::stdout().write_all(&output)?;
    } else if outcome == Outcome::Changed {
        std::fs::write(path, &output)?;
    }

    Ok(outcome)
}

/// Process input from stdin, output to stdout
fn process_stdin(config: &Config, args: &CliArgs) -> Result<Outcome> {
    let mut stdin_contents = Vec::new();
    io::stdin().read_to_end(&mut stdin_contents)?;

    #[allow(clippy::cast_possible_truncation)]
    let stdin_size = stdin_contents.len() as u64;
    if stdin_size > DEFAULT_MAX_FILE_SIZE {
        anyhow::bail!(
            "stdin input too large ({} MB exceeds limit of {} MB)",
            stdin_size / (1024 * 1024),
            DEFAULT_MAX_FILE_SIZE / (1024 * 1024)
        );
    }

    let reader = BufReader::new(Cursor::new(&stdin_contents));
    let mut output = Vec::new();
    format_file(reader, &mut output, config, "stdin")?;

    let outcome = if output == stdin_contents {
        Outcome::Unchanged
    } else {
        Outcome::Changed
    };

    if args.check {
        if outcome == Outcome::Changed && !args.silent {
            println!("stdin");
        }
    } else {
        io::stdout().write_all(&output)?;
    }

    Ok(outcome)
}

fn print_usage() {
    println!(
        "esfmt v{} - JavaScript code formatter",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("Usage:");
    println!("  esfmt [OPTIONS] <FILE>...");
    println!("  esfmt [OPTIONS] -r <DIRECTORY>");
    println!("  esfmt [OPTIONS] -              # Read from stdin");
    println!("  cat file.js | esfmt            # Pipe input");
    println!();
    println!("Examples:");
    println!("  esfmt file.js                                 # Format in-place");
    println!("  esfmt -r src/                                 # Recursively format directory");
    println!("  esfmt --check -r src/                         # List files needing formatting");
    println!("  esfmt -i 4 file.js                            # Use 4-space indent");
    println!("  esfmt --whitespace-before ArgumentList=1 a.js # Space inside call parens");
    println!();
    println!("Rule overrides take RULE=N, where N is the number of spaces or line");
    println!("breaks and -1 keeps what the source has.");
    println!();
    println!("Supported extensions: .js, .mjs, .cjs (add more with -x)");
    println!();
    println!("Config file auto-discovery:");
    println!("  Searches for esfmt.toml in parent directories");
    println!("  starting from the file being formatted up to the root directory.");
    println!("  Also checks esfmt.toml in the home directory.");
    println!("  More specific configs (closer to file) override less specific ones.");
    println!();
    println!("Run with --help for the full option list. Set {LOG_ENV} for tracing output.");
}
