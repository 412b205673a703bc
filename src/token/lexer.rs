//! Regex-driven JavaScript tokenizer.
//!
//! Produces every character of the input as part of some token, so that
//! [`TokenStream::to_source`] reproduces the input exactly. Each line break is
//! its own token; horizontal whitespace is grouped into runs.

use regex::Regex;

use super::patterns::{
    BLOCK_COMMENT_RE, IDENTIFIER_RE, KEYWORDS, LINE_BREAK_RE, LINE_COMMENT_RE, NUMBER_RE,
    PUNCTUATOR_RE, STRING_RE, WHITESPACE_RE,
};
use super::{Token, TokenKind, TokenStream};
use crate::error::{FormatError, Result};

/// Match `re` at the start of `rest`, returning the matched length
fn match_len(re: &Regex, rest: &str) -> Option<usize> {
    re.find(rest).map(|m| m.end()).filter(|&len| len > 0)
}

/// Classify the token at the start of `rest`
fn next_token(rest: &str) -> std::result::Result<(TokenKind, usize), String> {
    if let Some(len) = match_len(&LINE_BREAK_RE, rest) {
        return Ok((TokenKind::LineBreak, len));
    }
    if let Some(len) = match_len(&WHITESPACE_RE, rest) {
        return Ok((TokenKind::WhiteSpace, len));
    }
    if rest.starts_with("//") {
        let len = match_len(&LINE_COMMENT_RE, rest).unwrap_or(2);
        return Ok((TokenKind::LineComment, len));
    }
    if rest.starts_with("/*") {
        return match_len(&BLOCK_COMMENT_RE, rest)
            .map(|len| (TokenKind::BlockComment, len))
            .ok_or_else(|| "unterminated block comment".to_string());
    }
    if rest.starts_with(['"', '\'']) {
        return match_len(&STRING_RE, rest)
            .map(|len| (TokenKind::String, len))
            .ok_or_else(|| "unterminated string literal".to_string());
    }
    let starts_number = rest.starts_with(|c: char| c.is_ascii_digit())
        || (rest.starts_with('.') && rest[1..].starts_with(|c: char| c.is_ascii_digit()));
    if starts_number {
        if let Some(len) = match_len(&NUMBER_RE, rest) {
            return Ok((TokenKind::Numeric, len));
        }
    }
    if let Some(len) = match_len(&IDENTIFIER_RE, rest) {
        let kind = if KEYWORDS.contains(&&rest[..len]) {
            TokenKind::Keyword
        } else {
            TokenKind::Identifier
        };
        return Ok((kind, len));
    }
    if let Some(len) = match_len(&PUNCTUATOR_RE, rest) {
        return Ok((TokenKind::Punctuator, len));
    }
    let ch = rest.chars().next().unwrap_or_default();
    Err(format!("unexpected character `{ch}`"))
}

/// Split `source` into a token stream
pub fn tokenize(source: &str) -> Result<TokenStream> {
    let mut stream = TokenStream::new();
    let mut rest = source;
    let mut line = 1;

    while !rest.is_empty() {
        let (kind, len) =
            next_token(rest).map_err(|message| FormatError::Lex { line, message })?;
        let (text, tail) = rest.split_at(len);
        match kind {
            TokenKind::LineBreak => line += 1,
            TokenKind::BlockComment | TokenKind::String => line += text.matches('\n').count(),
            _ => {}
        }
        stream.push(Token::new(kind, text));
        rest = tail;
    }

    tracing::trace!(tokens = stream.len(), lines = line, "tokenized source");
    Ok(stream)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        let stream = tokenize(source).unwrap();
        stream
            .iter()
            .map(|id| (stream.kind(id), stream.value(id).to_string()))
            .collect()
    }

    #[test]
    fn test_round_trip() {
        let source = "var a = 1,\r\n    b = 'x';\t// done\n/* block\n */ if (a) { b() }\n";
        let stream = tokenize(source).unwrap();
        assert_eq!(stream.to_source(), source);
    }

    #[test]
    fn test_token_kinds() {
        let tokens = kinds("if (x >= 0.5) return\n");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Keyword, "if".to_string()),
                (TokenKind::WhiteSpace, " ".to_string()),
                (TokenKind::Punctuator, "(".to_string()),
                (TokenKind::Identifier, "x".to_string()),
                (TokenKind::WhiteSpace, " ".to_string()),
                (TokenKind::Punctuator, ">=".to_string()),
                (TokenKind::WhiteSpace, " ".to_string()),
                (TokenKind::Numeric, "0.5".to_string()),
                (TokenKind::Punctuator, ")".to_string()),
                (TokenKind::WhiteSpace, " ".to_string()),
                (TokenKind::Keyword, "return".to_string()),
                (TokenKind::LineBreak, "\n".to_string()),
            ]
        );
    }

    #[test]
    fn test_each_line_break_is_a_token() {
        let tokens = kinds("a\n\n\nb");
        let breaks = tokens
            .iter()
            .filter(|(kind, _)| *kind == TokenKind::LineBreak)
            .count();
        assert_eq!(breaks, 3);
    }

    #[test]
    fn test_member_dot_is_punctuator() {
        let tokens = kinds("a.b");
        assert_eq!(tokens[1], (TokenKind::Punctuator, ".".to_string()));
    }

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("x = 'abc\n").unwrap_err();
        match err.downcast_ref::<FormatError>() {
            Some(FormatError::Lex { line, message }) => {
                assert_eq!(*line, 1);
                assert!(message.contains("unterminated string"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unexpected_character_reports_line() {
        let err = tokenize("a\nb\n\\").unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::Lex { line: 3, .. })
        ));
    }
}
