//! Configuration management for esfmt.
//!
//! This module provides the [`Config`] struct which controls all formatting behavior.
//! Configuration can be loaded from:
//! - TOML files (`esfmt.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the file
//! being formatted up to the filesystem root, plus the user's home directory.
//!
//! Spacing is configured per rule in four tables. A table maps rule names to
//! an amount of spaces or line breaks; `-1` leaves the source as written:
//!
//! ```toml
//! indent = 4
//!
//! [whitespace.before]
//! ArgumentList = 1
//!
//! [line_break.after]
//! FunctionDeclarationOpeningBrace = 2
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::style::{Rule, RuleTable};

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["esfmt.toml", ".esfmt.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

fn table(entries: &[(Rule, i8)]) -> RuleTable {
    entries.iter().copied().collect()
}

const OPENING_BRACES: [Rule; 7] = [
    Rule::FunctionDeclarationOpeningBrace,
    Rule::ObjectExpressionOpeningBrace,
    Rule::IfStatementOpeningBrace,
    Rule::ElseIfStatementOpeningBrace,
    Rule::ElseStatementOpeningBrace,
    Rule::WhileStatementOpeningBrace,
    Rule::ForStatementOpeningBrace,
];

const CLOSING_BRACES: [Rule; 7] = [
    Rule::FunctionDeclarationClosingBrace,
    Rule::ObjectExpressionClosingBrace,
    Rule::IfStatementClosingBrace,
    Rule::ElseIfStatementClosingBrace,
    Rule::ElseStatementClosingBrace,
    Rule::WhileStatementClosingBrace,
    Rule::ForStatementClosingBrace,
];

/// Every brace rule set to `amount`
fn braces(rules: &[Rule], amount: i8) -> impl Iterator<Item = (Rule, i8)> + '_ {
    rules.iter().map(move |&rule| (rule, amount))
}

// Serde default functions
fn default_indent() -> usize {
    2
}

fn default_whitespace() -> SpacingTables {
    let mut before = table(&[
        (Rule::ParameterList, 0),
        (Rule::ParameterComma, 0),
        (Rule::ArgumentList, 0),
        (Rule::ArgumentComma, 0),
        (Rule::CommaOperator, 0),
        (Rule::ForStatementSemicolon, 0),
        (Rule::BinaryExpressionOperator, 1),
        (Rule::LogicalExpressionOperator, 1),
        (Rule::AssignmentOperator, 1),
        (Rule::PropertyValue, 1),
        (Rule::VariableName, 1),
        (Rule::VariableValue, 1),
        (Rule::ForStatementExpression, 1),
        (Rule::WhileStatementConditional, 1),
        (Rule::IfStatementConditional, 1),
    ]);
    before.extend(braces(&OPENING_BRACES, 1));
    before.extend(braces(&CLOSING_BRACES, 1));

    let mut after = table(&[
        (Rule::FunctionName, 0),
        (Rule::ParameterList, 0),
        (Rule::ArgumentList, 0),
        (Rule::PropertyName, 0),
        (Rule::ParameterComma, 1),
        (Rule::ArgumentComma, 1),
        (Rule::BinaryExpressionOperator, 1),
        (Rule::LogicalExpressionOperator, 1),
        (Rule::AssignmentOperator, 1),
        (Rule::CommaOperator, 1),
        (Rule::VariableName, 1),
        (Rule::ForStatementSemicolon, 1),
        (Rule::IfStatementConditional, 1),
        (Rule::WhileStatementConditional, 1),
        (Rule::ForStatementExpression, 1),
    ]);
    after.extend(braces(&OPENING_BRACES, 1));
    after.extend(braces(&CLOSING_BRACES, -1));
    // `} else` stays on one line
    after.insert(Rule::IfStatementClosingBrace, 1);

    SpacingTables { before, after }
}

fn default_line_break() -> SpacingTables {
    let mut before = table(&[
        (Rule::VariableValue, 0),
        (Rule::ElseStatement, 0),
        (Rule::ElseIfStatement, 0),
        (Rule::Property, 1),
        (Rule::VariableName, 1),
    ]);
    before.extend(braces(&OPENING_BRACES, 0));
    before.extend(braces(&CLOSING_BRACES, 1));

    let mut after = table(&[(Rule::Property, 1)]);
    after.extend(braces(&OPENING_BRACES, 1));
    after.extend(braces(&CLOSING_BRACES, -1));

    SpacingTables { before, after }
}

/// Amounts applied before and after the token a rule anchors on
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpacingTables {
    #[serde(default)]
    pub before: RuleTable,
    #[serde(default)]
    pub after: RuleTable,
}

impl SpacingTables {
    /// Override entries with those of `other`
    fn merge(&mut self, other: &SpacingTables) {
        self.before.extend(&other.before);
        self.after.extend(&other.after);
    }

    fn out_of_range(&self, max: i8) -> Option<(Rule, i8)> {
        self.before
            .iter()
            .chain(&self.after)
            .map(|(&rule, &amount)| (rule, amount))
            .find(|&(_, amount)| !(-1..=max).contains(&amount))
    }
}

/// Main configuration struct for esfmt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Number of spaces per indent level (default: 2)
    #[serde(default = "default_indent")]
    pub indent: usize,

    /// Indent with one tab per level instead of spaces (default: false)
    #[serde(default)]
    pub use_tabs: bool,

    /// Spaces around rule anchors
    #[serde(default = "default_whitespace")]
    pub whitespace: SpacingTables,

    /// Line breaks around rule anchors
    #[serde(default = "default_line_break")]
    pub line_break: SpacingTables,
}

/// Partial configuration for TOML parsing
///
/// Scalars are `Option<T>` so we can distinguish between "explicitly set"
/// and "not specified" when merging configs. Tables only hold the rules a
/// file mentions.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub indent: Option<usize>,
    pub use_tabs: Option<bool>,
    #[serde(default)]
    pub whitespace: SpacingTables,
    #[serde(default)]
    pub line_break: SpacingTables,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            indent: default_indent(),
            use_tabs: false,
            whitespace: default_whitespace(),
            line_break: default_line_break(),
        }
    }
}

impl Config {
    /// Maximum reasonable indent size
    const MAX_INDENT: usize = 16;
    /// Maximum spaces a whitespace rule may ask for
    const MAX_SPACES: i8 = 8;
    /// Maximum line breaks a line break rule may ask for
    const MAX_LINE_BREAKS: i8 = 4;

    /// Validate configuration values are within reasonable bounds
    ///
    /// Returns an error message if validation fails, None if valid.
    #[must_use]
    pub fn validate(&self) -> Option<String> {
        if self.indent == 0 {
            return Some("indent must be at least 1".to_string());
        }
        if self.indent > Self::MAX_INDENT {
            return Some(format!(
                "indent {} exceeds maximum of {}",
                self.indent,
                Self::MAX_INDENT
            ));
        }
        if let Some((rule, amount)) = self.whitespace.out_of_range(Self::MAX_SPACES) {
            return Some(format!(
                "whitespace amount {amount} for {rule} is outside -1..={}",
                Self::MAX_SPACES
            ));
        }
        if let Some((rule, amount)) = self.line_break.out_of_range(Self::MAX_LINE_BREAKS) {
            return Some(format!(
                "line_break amount {amount} for {rule} is outside -1..={}",
                Self::MAX_LINE_BREAKS
            ));
        }
        None
    }

    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Parse configuration from TOML text, on top of the defaults
    pub fn from_toml_str(contents: &str) -> anyhow::Result<Self> {
        let partial: PartialConfig = toml::from_str(contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.indent {
            self.indent = v;
        }
        if let Some(v) = partial.use_tabs {
            self.use_tabs = v;
        }
        // Merge tables (partial values override)
        self.whitespace.merge(&partial.whitespace);
        self.line_break.merge(&partial.line_break);
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Root first, so more specific files come later
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let mut config = Self::default();
        for path in &Self::discover_config_files(start_path) {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => {
                        tracing::debug!(path = %path.display(), "applying config file");
                        config.apply_partial(&partial);
                    }
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::FormatError;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.indent, 2);
        assert!(!config.use_tabs);
        assert_eq!(config.whitespace.after.get(&Rule::FunctionName), Some(&0));
        assert_eq!(config.line_break.before.get(&Rule::Property), Some(&1));
        assert_eq!(
            config.whitespace.after.get(&Rule::IfStatementClosingBrace),
            Some(&1)
        );
        assert_eq!(
            config.whitespace.after.get(&Rule::ElseStatementClosingBrace),
            Some(&-1)
        );
    }

    #[test]
    fn test_every_brace_has_a_default() {
        let config = Config::default();
        for rule in OPENING_BRACES.iter().chain(&CLOSING_BRACES) {
            assert!(config.line_break.before.contains_key(rule), "{rule}");
            assert!(config.whitespace.before.contains_key(rule), "{rule}");
        }
    }

    #[test]
    fn test_config_apply_partial() {
        let mut base = Config::default();

        let mut partial = PartialConfig {
            indent: Some(4),
            ..Default::default()
        };
        partial.whitespace.before.insert(Rule::ArgumentList, 1);

        base.apply_partial(&partial);
        assert_eq!(base.indent, 4);
        assert_eq!(base.whitespace.before.get(&Rule::ArgumentList), Some(&1));
        // Other entries should remain at defaults
        assert_eq!(base.whitespace.before.get(&Rule::ParameterList), Some(&0));
        assert!(!base.use_tabs);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut base = Config::default();
        base.indent = 4;

        let partial = PartialConfig {
            use_tabs: Some(true),
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert_eq!(base.indent, 4);
        assert!(base.use_tabs);
    }

    #[test]
    fn test_from_toml_str_tables() {
        let config = Config::from_toml_str(
            "indent = 4\n\n[whitespace.before]\nArgumentList = 1\n\n[line_break.after]\nProperty = -1\n",
        )
        .unwrap();
        assert_eq!(config.indent, 4);
        assert_eq!(config.whitespace.before.get(&Rule::ArgumentList), Some(&1));
        assert_eq!(config.line_break.after.get(&Rule::Property), Some(&-1));
        assert_eq!(config.line_break.before.get(&Rule::Property), Some(&1));
    }

    #[test]
    fn test_from_toml_str_unknown_rule() {
        let err = Config::from_toml_str("[whitespace.before]\nArrowBody = 1\n").unwrap_err();
        assert!(err.to_string().contains("ArrowBody"), "{err}");
    }

    #[test]
    fn test_unknown_rule_is_typed() {
        let err = "ArrowBody".parse::<Rule>().unwrap_err();
        assert!(matches!(
            err,
            FormatError::UnknownRule(name) if name == "ArrowBody"
        ));
    }

    #[test]
    fn test_from_discovered_files_returns_default_when_empty() {
        let path = PathBuf::from("/nonexistent/unique/path/file.js");
        let config = Config::from_discovered_files(&path);
        assert_eq!(config.indent, 2);
    }

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(
            config.validate().is_none(),
            "Default config should be valid"
        );
    }

    #[test]
    fn test_validate_indent_zero() {
        let config = Config {
            indent: 0,
            ..Default::default()
        };
        assert!(config.validate().unwrap().contains("indent"));
    }

    #[test]
    fn test_validate_indent_too_large() {
        let config = Config {
            indent: 100,
            ..Default::default()
        };
        assert!(config.validate().is_some());
    }

    #[test]
    fn test_validate_whitespace_amount() {
        let mut config = Config::default();
        config.whitespace.after.insert(Rule::CommaOperator, 9);
        let message = config.validate().unwrap();
        assert!(message.contains("CommaOperator"), "{message}");
    }

    #[test]
    fn test_validate_line_break_amount() {
        let mut config = Config::default();
        config.line_break.before.insert(Rule::Property, -2);
        assert!(config.validate().unwrap().contains("line_break"));
    }
}
