//! Command-line interface for esfmt.
//!
//! Defines CLI arguments using clap builder API

use std::path::PathBuf;

use clap::{Arg, ArgAction, Command};

use crate::config::Config;
use crate::error::FormatError;
use crate::style::Rule;

/// A `RULE=N` override from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleSetting {
    pub rule: Rule,
    pub amount: i8,
}

/// Parse `RULE=N`, where N may be negative to preserve the source spacing
fn parse_rule_setting(value: &str) -> Result<RuleSetting, String> {
    let (name, amount) = value
        .split_once('=')
        .ok_or_else(|| format!("expected RULE=N, got `{value}`"))?;
    let rule = name
        .trim()
        .parse::<Rule>()
        .map_err(|e: FormatError| e.to_string())?;
    let amount = amount
        .trim()
        .parse::<i8>()
        .map_err(|e| format!("invalid amount `{amount}`: {e}"))?;
    Ok(RuleSetting { rule, amount })
}

/// CLI arguments parsed from command line
#[derive(Debug, Clone)]
pub struct CliArgs {
    /// Files or directories to format
    pub inputs: Vec<PathBuf>,

    /// Number of spaces per indent level
    pub indent: Option<usize>,

    /// Indent with tabs
    pub tabs: bool,

    /// Whitespace overrides, applied before the token
    pub whitespace_before: Vec<RuleSetting>,

    /// Whitespace overrides, applied after the token
    pub whitespace_after: Vec<RuleSetting>,

    /// Line break overrides, applied before the token
    pub line_break_before: Vec<RuleSetting>,

    /// Line break overrides, applied after the token
    pub line_break_after: Vec<RuleSetting>,

    /// Output to stdout instead of in-place
    pub stdout: bool,

    /// Report files that would change without modifying them
    pub check: bool,

    /// Config file path
    pub config: Option<PathBuf>,

    /// Recursive directory processing
    pub recursive: bool,

    /// Silent mode (no output)
    pub silent: bool,

    /// Number of parallel jobs (0 = auto, 1 = sequential)
    pub jobs: Option<usize>,

    /// Exclude patterns for files/directories (glob patterns)
    pub exclude: Vec<String>,

    /// Custom JavaScript file extensions (in addition to defaults)
    pub extensions: Vec<String>,

    /// Exclude files with more than this many lines
    pub exclude_max_lines: Option<usize>,

    /// Enable debug output
    pub debug: bool,
}

impl CliArgs {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(indent) = self.indent {
            config.indent = indent;
        }
        if self.tabs {
            config.use_tabs = true;
        }
        let tables = [
            (&self.whitespace_before, &mut config.whitespace.before),
            (&self.whitespace_after, &mut config.whitespace.after),
            (&self.line_break_before, &mut config.line_break.before),
            (&self.line_break_after, &mut config.line_break.after),
        ];
        for (settings, table) in tables {
            table.extend(settings.iter().map(|s| (s.rule, s.amount)));
        }
    }
}

fn rule_arg(id: &'static str, help: &'static str) -> Arg {
    Arg::new(id)
        .long(id)
        .help(help)
        .value_name("RULE=N")
        .action(ArgAction::Append)
        .allow_hyphen_values(true)
        .value_parser(parse_rule_setting)
}

/// Build the clap Command for parsing CLI arguments
#[must_use]
pub fn build_cli() -> Command {
    Command::new("esfmt")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Rule-driven JavaScript code formatter")
        .arg(
            Arg::new("inputs")
                .help("Files or directories to format (- for stdin)")
                .value_name("FILE")
                .num_args(1..)
                .required(false)
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("indent")
                .short('i')
                .long("indent")
                .help("Number of spaces per indent level [default: 2]")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("tabs")
                .long("tabs")
                .help("Indent with tabs instead of spaces")
                .action(ArgAction::SetTrue),
        )
        .arg(rule_arg(
            "whitespace-before",
            "Spaces before a rule's token, -1 to preserve (can be repeated)",
        ))
        .arg(rule_arg(
            "whitespace-after",
            "Spaces after a rule's token, -1 to preserve (can be repeated)",
        ))
        .arg(rule_arg(
            "line-break-before",
            "Line breaks before a rule's token, -1 to preserve (can be repeated)",
        ))
        .arg(rule_arg(
            "line-break-after",
            "Line breaks after a rule's token, -1 to preserve (can be repeated)",
        ))
        .arg(
            Arg::new("stdout")
                .short('s')
                .long("stdout")
                .help("Output to stdout instead of modifying files in-place")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("check")
                .long("check")
                .help("List files that are not formatted and exit with failure")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .help("Path to configuration file (overrides auto-discovery)")
                .value_name("FILE")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("recursive")
                .short('r')
                .long("recursive")
                .help("Recursively format directories")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("exclude")
                .short('e')
                .long("exclude")
                .help("Exclude files/directories matching pattern (glob syntax, can be repeated)")
                .value_name("PATTERN")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("extension")
                .short('x')
                .long("extension")
                .help("Additional JavaScript file extension (can be repeated, e.g., -x jsx)")
                .value_name("EXT")
                .action(ArgAction::Append),
        )
        .arg(
            Arg::new("exclude-max-lines")
                .short('m')
                .long("exclude-max-lines")
                .help("Exclude files with more than this many lines")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            Arg::new("debug")
                .short('D')
                .long("debug")
                .help("Enable debug output (shows config and formatter tracing)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("silent")
                .short('S')
                .long("silent")
                .help("Silent mode (no output, for editor integration)")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("jobs")
                .short('j')
                .long("jobs")
                .help("Number of parallel jobs (0=auto, 1=sequential)")
                .value_name("NUM")
                .value_parser(clap::value_parser!(usize)),
        )
}

/// Parse CLI arguments from command line
#[must_use]
pub fn parse_args() -> CliArgs {
    args_from_matches(&build_cli().get_matches())
}

/// Parse CLI arguments from an iterator (for testing)
#[must_use]
pub fn parse_args_from<I, T>(args: I) -> CliArgs
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    args_from_matches(&build_cli().get_matches_from(args))
}

fn settings(matches: &clap::ArgMatches, id: &str) -> Vec<RuleSetting> {
    matches
        .get_many::<RuleSetting>(id)
        .map(|vals| vals.copied().collect())
        .unwrap_or_default()
}

/// Convert clap `ArgMatches` to `CliArgs`
fn args_from_matches(matches: &clap::ArgMatches) -> CliArgs {
    CliArgs {
        inputs: matches
            .get_many::<PathBuf>("inputs")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        indent: matches.get_one::<usize>("indent").copied(),
        tabs: matches.get_flag("tabs"),
        whitespace_before: settings(matches, "whitespace-before"),
        whitespace_after: settings(matches, "whitespace-after"),
        line_break_before: settings(matches, "line-break-before"),
        line_break_after: settings(matches, "line-break-after"),
        stdout: matches.get_flag("stdout"),
        check: matches.get_flag("check"),
        config: matches.get_one::<PathBuf>("config").cloned(),
        recursive: matches.get_flag("recursive"),
        exclude: matches
            .get_many::<String>("exclude")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        extensions: matches
            .get_many::<String>("extension")
            .map(|vals| vals.cloned().collect())
            .unwrap_or_default(),
        exclude_max_lines: matches.get_one::<usize>("exclude-max-lines").copied(),
        debug: matches.get_flag("debug"),
        silent: matches.get_flag("silent"),
        jobs: matches.get_one::<usize>("jobs").copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_builds() {
        let cmd = build_cli();
        assert_eq!(cmd.get_name(), "esfmt");
    }

    #[test]
    fn test_cli_defaults() {
        let matches = build_cli().try_get_matches_from(vec!["esfmt"]).unwrap();
        assert!(matches.get_many::<PathBuf>("inputs").is_none());
        assert!(!matches.get_flag("tabs"));
        assert!(!matches.get_flag("stdout"));
        assert!(!matches.get_flag("check"));
    }

    #[test]
    fn test_rule_overrides() {
        let args = parse_args_from(vec![
            "esfmt",
            "--whitespace-before",
            "ArgumentList=1",
            "--whitespace-before=ParameterList=1",
            "--line-break-after",
            "Property=-1",
            "file.js",
        ]);
        assert_eq!(
            args.whitespace_before,
            vec![
                RuleSetting {
                    rule: Rule::ArgumentList,
                    amount: 1
                },
                RuleSetting {
                    rule: Rule::ParameterList,
                    amount: 1
                },
            ]
        );
        assert_eq!(
            args.line_break_after,
            vec![RuleSetting {
                rule: Rule::Property,
                amount: -1
            }]
        );
        assert!(args.whitespace_after.is_empty());
        assert!(args.line_break_before.is_empty());
    }

    #[test]
    fn test_unknown_rule_rejected() {
        let err = build_cli()
            .try_get_matches_from(vec!["esfmt", "--whitespace-after", "Arrow=1", "file.js"])
            .unwrap_err();
        assert!(
            err.to_string().contains("unknown rule name `Arrow`"),
            "{err}"
        );
    }

    #[test]
    fn test_malformed_setting_rejected() {
        assert!(parse_rule_setting("FunctionName").is_err());
        assert!(parse_rule_setting("FunctionName=lots").is_err());
        assert_eq!(
            parse_rule_setting("FunctionName = 2"),
            Ok(RuleSetting {
                rule: Rule::FunctionName,
                amount: 2
            })
        );
    }

    #[test]
    fn test_apply_to_config() {
        let args = parse_args_from(vec![
            "esfmt",
            "-i",
            "4",
            "--tabs",
            "--whitespace-after",
            "FunctionName=1",
            "file.js",
        ]);
        let mut config = Config::default();
        args.apply_to(&mut config);
        assert_eq!(config.indent, 4);
        assert!(config.use_tabs);
        assert_eq!(config.whitespace.after.get(&Rule::FunctionName), Some(&1));
        assert_eq!(config.whitespace.before.get(&Rule::ParameterList), Some(&0));
    }

    #[test]
    fn test_check_and_stdout() {
        let args = parse_args_from(vec!["esfmt", "--check", "-s", "file.js"]);
        assert!(args.check);
        assert!(args.stdout);
    }

    #[test]
    fn test_exclude_multiple() {
        let args = parse_args_from(vec![
            "esfmt", "-r", "-e", "*.min.js", "--exclude", "dist*", "src/",
        ]);
        assert_eq!(args.exclude, vec!["*.min.js", "dist*"]);
        assert!(args.recursive);
    }

    #[test]
    fn test_extensions() {
        let args = parse_args_from(vec!["esfmt", "-r", "-x", "jsx", "--extension", "es6", "src/"]);
        assert_eq!(args.extensions, vec!["jsx", "es6"]);
    }

    #[test]
    fn test_exclude_max_lines_short_flag() {
        let args = parse_args_from(vec!["esfmt", "-m", "500", "file.js"]);
        assert_eq!(args.exclude_max_lines, Some(500));
    }

    #[test]
    fn test_debug_and_jobs() {
        let args = parse_args_from(vec!["esfmt", "-D", "-j", "4", "file.js"]);
        assert!(args.debug);
        assert_eq!(args.jobs, Some(4));
        assert!(!args.silent);
    }
}
