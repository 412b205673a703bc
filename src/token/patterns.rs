/// Regex patterns for JavaScript lexical elements
///
/// All patterns are compiled once at first use via `LazyLock` and anchored at
/// the start of the remaining input.
use std::sync::LazyLock;

use regex::{Regex, RegexBuilder};

/// Build an anchored regex from a compile-time constant pattern.
///
/// # Panics
///
/// Panics if the pattern is invalid. All patterns in this module are constants
/// verified by the tests below, so this can only fire during development.
fn build_re(pattern: &str) -> Regex {
    RegexBuilder::new(&format!("^(?:{pattern})"))
        .unicode(true)
        .build()
        .unwrap_or_else(|_| panic!("Invalid regex pattern: {pattern}"))
}

pub static LINE_BREAK_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"\r\n|\n|\r|\u{2028}|\u{2029}"));
pub static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"[ \t\x0B\x0C\u{00A0}\u{FEFF}]+"));

pub static LINE_COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"//[^\r\n\u{2028}\u{2029}]*"));
pub static BLOCK_COMMENT_RE: LazyLock<Regex> = LazyLock::new(|| build_re(r"/\*(?s:.*?)\*/"));

// String literals, escapes may continue the literal onto the next line
pub static STRING_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(r#""(?:[^"\\\r\n]|\\(?:\r\n|(?s:.)))*"|'(?:[^'\\\r\n]|\\(?:\r\n|(?s:.)))*'"#)
});

pub static NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(r"0[xX][0-9a-fA-F]+|0[bB][01]+|0[oO][0-7]+|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?")
});

pub static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| build_re(r"[A-Za-z_$\p{L}][A-Za-z0-9_$\p{L}\p{Nd}]*"));

// Longest operators first so `>>>=` is never split into `>>` `>=`
pub static PUNCTUATOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    build_re(
        r">>>=|\.\.\.|===|!==|\*\*=|<<=|>>=|>>>|&&=|\|\|=|\?\?=|=>|==|!=|<=|>=|&&|\|\||\?\?|\+\+|--|\+=|-=|\*=|/=|%=|&=|\|=|\^=|<<|>>|\*\*|[{}()\[\];,<>+\-*/%&|^!~?:=.@#]",
    )
});

/// Reserved words lexed as [`TokenKind::Keyword`](super::TokenKind::Keyword)
pub const KEYWORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete", "do",
    "else", "export", "extends", "false", "finally", "for", "function", "if", "import", "in",
    "instanceof", "let", "new", "null", "return", "super", "switch", "this", "throw", "true",
    "try", "typeof", "var", "void", "while", "with",
];
