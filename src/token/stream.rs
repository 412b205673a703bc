/// `TokenStream` - Arena-backed doubly linked list of tokens
///
/// Every token lives in a slot of a `Vec`; `prev`/`next` links are slot
/// indices. Insertion appends a slot and relinks its neighbours, removal
/// unlinks the slot and marks it dead. Ids of live tokens stay valid for the
/// whole life of the stream.
use std::ops::Index;

use super::{Token, TokenKind};
use crate::error::{FormatError, Result};

/// Stable handle to a token in a [`TokenStream`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl TokenId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone)]
struct Slot {
    token: Token,
    prev: Option<TokenId>,
    next: Option<TokenId>,
    live: bool,
}

/// Mutable token sequence shared by all formatters of one pass
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    slots: Vec<Slot>,
    head: Option<TokenId>,
    tail: Option<TokenId>,
    live: usize,
}

impl TokenStream {
    /// Create an empty stream
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a stream holding `tokens` in order
    #[must_use]
    pub fn from_tokens(tokens: impl IntoIterator<Item = Token>) -> Self {
        let mut stream = Self::new();
        for token in tokens {
            stream.push(token);
        }
        stream
    }

    fn alloc(&mut self, token: Token) -> TokenId {
        let id = TokenId(u32::try_from(self.slots.len()).expect("token arena overflow"));
        self.slots.push(Slot {
            token,
            prev: None,
            next: None,
            live: true,
        });
        self.live += 1;
        id
    }

    /// Append a token at the end of the stream
    pub fn push(&mut self, token: Token) -> TokenId {
        let id = self.alloc(token);
        match self.tail {
            Some(tail) => {
                self.slots[tail.index()].next = Some(id);
                self.slots[id.index()].prev = Some(tail);
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        id
    }

    /// Number of live tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.live
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    #[must_use]
    pub fn first(&self) -> Option<TokenId> {
        self.head
    }

    #[must_use]
    pub fn last(&self) -> Option<TokenId> {
        self.tail
    }

    #[must_use]
    pub fn token(&self, id: TokenId) -> &Token {
        &self.slots[id.index()].token
    }

    #[must_use]
    pub fn kind(&self, id: TokenId) -> TokenKind {
        self.token(id).kind
    }

    #[must_use]
    pub fn value(&self, id: TokenId) -> &str {
        &self.token(id).value
    }

    #[must_use]
    pub fn next(&self, id: TokenId) -> Option<TokenId> {
        self.slots[id.index()].next
    }

    #[must_use]
    pub fn prev(&self, id: TokenId) -> Option<TokenId> {
        self.slots[id.index()].prev
    }

    #[must_use]
    pub fn is_live(&self, id: TokenId) -> bool {
        self.slots[id.index()].live
    }

    /// Replace the text of a whitespace run
    pub fn set_value(&mut self, id: TokenId, value: impl Into<String>) {
        self.slots[id.index()].token.value = value.into();
    }

    /// Insert `token` immediately before `anchor`
    pub fn insert_before(&mut self, anchor: TokenId, token: Token) -> TokenId {
        let id = self.alloc(token);
        let prev = self.prev(anchor);
        self.slots[id.index()].prev = prev;
        self.slots[id.index()].next = Some(anchor);
        self.slots[anchor.index()].prev = Some(id);
        match prev {
            Some(prev) => self.slots[prev.index()].next = Some(id),
            None => self.head = Some(id),
        }
        id
    }

    /// Insert `token` immediately after `anchor`
    pub fn insert_after(&mut self, anchor: TokenId, token: Token) -> TokenId {
        let id = self.alloc(token);
        let next = self.next(anchor);
        self.slots[id.index()].prev = Some(anchor);
        self.slots[id.index()].next = next;
        self.slots[anchor.index()].next = Some(id);
        match next {
            Some(next) => self.slots[next.index()].prev = Some(id),
            None => self.tail = Some(id),
        }
        id
    }

    /// Unlink a whitespace run or line break
    ///
    /// Significant tokens are protected: removing one would change the program.
    pub fn remove(&mut self, id: TokenId) -> Result<()> {
        let token = self.token(id);
        if token.is_significant() {
            return Err(FormatError::ProtectedToken(token.value.clone()).into());
        }
        if !self.is_live(id) {
            return Ok(());
        }
        let (prev, next) = (self.prev(id), self.next(id));
        match prev {
            Some(prev) => self.slots[prev.index()].next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.slots[next.index()].prev = prev,
            None => self.tail = prev,
        }
        self.slots[id.index()].live = false;
        self.live -= 1;
        Ok(())
    }

    /// Iterate over live tokens in order
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            stream: self,
            cursor: self.head,
        }
    }

    /// Iterate over tokens that are neither whitespace nor line break
    pub fn significant(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.iter().filter(|&id| self.token(id).is_significant())
    }

    /// Serialize the stream back to source text
    #[must_use]
    pub fn to_source(&self) -> String {
        self.iter().map(|id| self.value(id)).collect()
    }

    /// 1-based line number of a token, for diagnostics
    #[must_use]
    pub fn line_of(&self, id: TokenId) -> usize {
        let mut line = 1;
        for current in self.iter() {
            if current == id {
                break;
            }
            let token = self.token(current);
            match token.kind {
                TokenKind::LineBreak => line += 1,
                TokenKind::BlockComment => line += token.value.matches('\n').count(),
                _ => {}
            }
        }
        line
    }
}

impl Index<TokenId> for TokenStream {
    type Output = Token;

    fn index(&self, id: TokenId) -> &Token {
        self.token(id)
    }
}

/// Iterator over the live tokens of a stream
pub struct Iter<'a> {
    stream: &'a TokenStream,
    cursor: Option<TokenId>,
}

impl Iterator for Iter<'_> {
    type Item = TokenId;

    fn next(&mut self) -> Option<TokenId> {
        let current = self.cursor?;
        self.cursor = self.stream.next(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stream(parts: &[(TokenKind, &str)]) -> TokenStream {
        TokenStream::from_tokens(parts.iter().map(|(k, v)| Token::new(*k, *v)))
    }

    #[test]
    fn test_insert_and_serialize() {
        let mut tokens = stream(&[
            (TokenKind::Identifier, "a"),
            (TokenKind::Punctuator, "+"),
            (TokenKind::Identifier, "b"),
        ]);
        let plus = tokens.next(tokens.first().unwrap()).unwrap();
        tokens.insert_before(plus, Token::whitespace(1));
        tokens.insert_after(plus, Token::whitespace(1));
        assert_eq!(tokens.to_source(), "a + b");
        assert_eq!(tokens.len(), 5);
    }

    #[test]
    fn test_remove_keeps_ids_stable() {
        let mut tokens = stream(&[
            (TokenKind::Identifier, "a"),
            (TokenKind::WhiteSpace, "  "),
            (TokenKind::Identifier, "b"),
        ]);
        let a = tokens.first().unwrap();
        let ws = tokens.next(a).unwrap();
        let b = tokens.next(ws).unwrap();
        tokens.remove(ws).unwrap();
        assert_eq!(tokens.next(a), Some(b));
        assert_eq!(tokens.prev(b), Some(a));
        assert!(!tokens.is_live(ws));
        assert_eq!(tokens.to_source(), "ab");
    }

    #[test]
    fn test_remove_significant_fails() {
        let mut tokens = stream(&[(TokenKind::Keyword, "if")]);
        let err = tokens.remove(tokens.first().unwrap()).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<FormatError>(),
            Some(FormatError::ProtectedToken(v)) if v == "if"
        ));
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut tokens = stream(&[
            (TokenKind::WhiteSpace, " "),
            (TokenKind::Identifier, "x"),
            (TokenKind::LineBreak, "\n"),
        ]);
        tokens.remove(tokens.first().unwrap()).unwrap();
        tokens.remove(tokens.last().unwrap()).unwrap();
        assert_eq!(tokens.first(), tokens.last());
        assert_eq!(tokens.to_source(), "x");
    }

    #[test]
    fn test_line_of() {
        let tokens = stream(&[
            (TokenKind::Identifier, "a"),
            (TokenKind::LineBreak, "\n"),
            (TokenKind::BlockComment, "/*\n*/"),
            (TokenKind::Identifier, "b"),
        ]);
        let b = tokens.last().unwrap();
        assert_eq!(tokens.line_of(b), 3);
    }
}
