//! esfmt - Rule-driven JavaScript code formatter
//!
//! Source text is split into a lossless token stream, parsed into a syntax
//! tree, and every node kind with a formatter adjusts the whitespace, line
//! breaks and indentation around its tokens according to a table of named
//! rules. Only whitespace and line break tokens are ever inserted or removed.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod process;
pub mod style;
pub mod syntax;
pub mod token;

// Re-export commonly used types
pub use cli::{build_cli, parse_args, parse_args_from, CliArgs, RuleSetting};
pub use config::{Config, SpacingTables};
pub use error::{FormatError, Result};
pub use format::format_ast;
pub use process::{format_file, format_source};
pub use style::{Amount, Rule, RuleTable, Rules};
