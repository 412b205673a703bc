//! Formatting pipeline
//!
//! Implements the main formatting pipeline:
//! - Tokenize the source into a lossless token stream
//! - Parse the significant tokens into a syntax tree
//! - Assign indentation levels to every node
//! - Run the node formatters over the stream and serialize it back

use std::io::{BufRead, Write};

use anyhow::Context;
use tracing::{debug, instrument};

use crate::config::Config;
use crate::format::format_ast;
use crate::style::Rules;
use crate::syntax::{assign_indent_levels, parse};
use crate::token::tokenize;
use crate::Result;

/// Format a whole source text
///
/// Sources without any code (empty, only whitespace or only comments) come
/// back unchanged.
#[instrument(level = "debug", skip_all, fields(bytes = source.len()))]
pub fn format_source(source: &str, config: &Config) -> Result<String> {
    let mut tokens = tokenize(source)?;
    let has_code = tokens.significant().any(|id| !tokens.kind(id).is_comment());
    if !has_code {
        debug!("nothing to format");
        return Ok(source.to_string());
    }
    debug!(tokens = tokens.len(), "tokenized");

    let mut ast = parse(&tokens)?;
    assign_indent_levels(&mut ast);
    debug!(nodes = ast.len(), "parsed");

    let rules = Rules::from_config(config);
    format_ast(&ast, &mut tokens, &rules)?;
    Ok(tokens.to_source())
}

/// Format everything readable from `input` into `output`
///
/// Nothing is written when formatting fails.
pub fn format_file<R: BufRead, W: Write>(
    mut input: R,
    output: &mut W,
    config: &Config,
    filename: &str,
) -> Result<()> {
    let mut source = String::new();
    input
        .read_to_string(&mut source)
        .with_context(|| format!("{filename}: input is not valid UTF-8"))?;

    let formatted = format_source(&source, config).with_context(|| filename.to_string())?;
    output.write_all(formatted.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Cursor};

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::FormatError;

    #[test]
    fn test_format_source_defaults() {
        let out = format_source("function foo(a,b){return a}\n", &Config::default()).unwrap();
        assert_eq!(out, "function foo(a, b) {\n  return a\n}\n");
    }

    #[test]
    fn test_blank_source_unchanged() {
        assert_eq!(format_source("", &Config::default()).unwrap(), "");
        assert_eq!(
            format_source("  \n\t\n", &Config::default()).unwrap(),
            "  \n\t\n"
        );
    }

    #[test]
    fn test_comment_only_source() {
        let source = "// nothing here\n/* at all */\n";
        assert_eq!(format_source(source, &Config::default()).unwrap(), source);
        assert_eq!(
            format_source("// license", &Config::default()).unwrap(),
            "// license"
        );
        assert_eq!(
            format_source("  /* header */", &Config::default()).unwrap(),
            "  /* header */"
        );
    }

    #[test]
    fn test_format_file_writes_output() {
        let reader = BufReader::new(Cursor::new("x=1+2;\n".as_bytes()));
        let mut output = Vec::new();
        format_file(reader, &mut output, &Config::default(), "test.js").unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "x = 1 + 2;\n");
    }

    #[test]
    fn test_format_file_syntax_error_writes_nothing() {
        let reader = BufReader::new(Cursor::new("a b;".as_bytes()));
        let mut output = Vec::new();
        let err = format_file(reader, &mut output, &Config::default(), "bad.js").unwrap_err();
        assert!(output.is_empty());
        assert!(err.to_string().contains("bad.js"));
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_format_file_lex_error() {
        let reader = BufReader::new(Cursor::new("a = 'open;\n".as_bytes()));
        let mut output = Vec::new();
        let err = format_file(reader, &mut output, &Config::default(), "lex.js").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::Lex { .. })
        ));
    }
}
