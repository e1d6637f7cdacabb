//! Type signature tokenizer
//!
//! Converts a raw signature string into a token sequence. Bracketed groups
//! are extracted as balanced substrings and tokenized by a nested lexer,
//! so each nesting level owns its own cursor.

use crate::token::Token;
use thiserror::Error;

/// Maximum bracket nesting accepted before tokenizing fails
pub const MAX_DEPTH: usize = 128;

/// Tokenizer errors
///
/// Both variants are fatal: they mean the signature is malformed and no
/// partial token list is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenizeError {
    #[error("Tokenizer made no progress at byte {position}: unexpected '{found}'")]
    NoProgress { position: usize, found: char },

    #[error("Type signature nests deeper than {limit} brackets at byte {position}")]
    TooDeep { position: usize, limit: usize },
}

/// Tokenize result type
pub type TokenizeResult<T> = Result<T, TokenizeError>;

/// Reserved punctuation characters
pub fn is_punctuation(ch: char) -> bool {
    matches!(ch, '{' | '}' | '<' | '>' | '-' | '|')
}

/// Characters that delimit groups but never belong to an atom
fn is_structural(ch: char) -> bool {
    matches!(ch, '(' | ')' | '[' | ']')
}

/// Position within the source being tokenized
#[derive(Debug, Clone, Copy)]
struct Cursor<'a> {
    source: &'a str,
    /// Current byte position
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self { source, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn bump(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    /// Consume characters while `pred` holds, returning the consumed slice
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(ch) = self.peek() {
            if !pred(ch) {
                break;
            }
            self.pos += ch.len_utf8();
        }
        &self.source[start..self.pos]
    }
}

/// Lexer for one nesting level of a type signature
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    /// Byte offset of this source within the outermost signature
    offset: usize,
    /// Bracket nesting depth of this source
    depth: usize,
    /// Whether a `,` splits groups here instead of belonging to an atom
    group_context: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer for a top-level signature
    pub fn new(source: &'a str) -> Self {
        Self::with_group_context(source, false)
    }

    /// Create a lexer, choosing whether commas act as group separators
    pub fn with_group_context(source: &'a str, group_context: bool) -> Self {
        Self {
            cursor: Cursor::new(source),
            offset: 0,
            depth: 0,
            group_context,
        }
    }

    fn nested(source: &'a str, offset: usize, depth: usize, group_context: bool) -> Self {
        Self {
            cursor: Cursor::new(source),
            offset,
            depth,
            group_context,
        }
    }

    /// Tokenize the entire input
    ///
    /// Tuples and tables come back pre-grouping: a single group that may
    /// still contain [`Token::Separator`]s. Run [`crate::separate_groups`]
    /// over the result, or use [`crate::tokenize`] which does both.
    pub fn tokenize(mut self) -> TokenizeResult<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    /// Get the next token, or `None` once only whitespace remains
    fn next_token(&mut self) -> TokenizeResult<Option<Token>> {
        self.cursor.eat_while(char::is_whitespace);

        let Some(ch) = self.cursor.peek() else {
            return Ok(None);
        };

        let token = match ch {
            '(' => Token::Tuple(vec![self.read_group('(', ')', true)?]),
            '{' => Token::Table(vec![self.read_group('{', '}', true)?]),
            '[' => Token::Indexer(self.read_group('[', ']', false)?),
            ',' if self.group_context => {
                self.cursor.bump();
                Token::Separator
            }
            c if is_punctuation(c) => {
                self.cursor.bump();
                if c == '-' && self.cursor.peek() == Some('>') {
                    self.cursor.bump();
                    Token::Arrow
                } else if c == '|' {
                    Token::Union
                } else {
                    Token::Punctuation(c)
                }
            }
            _ => self.read_atom(ch)?,
        };

        Ok(Some(token))
    }

    /// Read the longest run of atom characters
    fn read_atom(&mut self, found: char) -> TokenizeResult<Token> {
        let start = self.cursor.pos;
        let group_context = self.group_context;
        let atom = self.cursor.eat_while(|c| {
            !c.is_whitespace()
                && !is_punctuation(c)
                && !is_structural(c)
                && !(group_context && c == ',')
        });

        if atom.is_empty() {
            return Err(TokenizeError::NoProgress {
                position: self.offset + start,
                found,
            });
        }

        Ok(match atom.strip_suffix(':') {
            Some(label) => Token::Identifier(label.to_string()),
            None => Token::AtomType(atom.to_string()),
        })
    }

    /// Extract a balanced `open ... close` group and tokenize its contents
    ///
    /// Only the delimiter pair being read is counted; the first `close` at
    /// depth zero ends the group.
    fn read_group(&mut self, open: char, close: char, group_context: bool) -> TokenizeResult<Vec<Token>> {
        let open_pos = self.cursor.pos;
        self.cursor.bump();

        if self.depth + 1 > MAX_DEPTH {
            return Err(TokenizeError::TooDeep {
                position: self.offset + open_pos,
                limit: MAX_DEPTH,
            });
        }

        let inner_start = self.cursor.pos;
        let mut depth = 0usize;
        loop {
            match self.cursor.peek() {
                None => {
                    // No matching delimiter: the scan cannot move past `open`
                    return Err(TokenizeError::NoProgress {
                        position: self.offset + open_pos,
                        found: open,
                    });
                }
                Some(c) if c == close => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                Some(c) if c == open => depth += 1,
                Some(_) => {}
            }
            self.cursor.bump();
        }

        let inner = &self.cursor.source[inner_start..self.cursor.pos];
        self.cursor.bump();

        Lexer::nested(inner, self.offset + inner_start, self.depth + 1, group_context).tokenize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn atom(s: &str) -> Token {
        Token::AtomType(s.to_string())
    }

    fn raw(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize().unwrap()
    }

    // ==========================================================================
    // Basic token type tests
    // ==========================================================================

    #[test]
    fn test_empty_input() {
        assert!(raw("").is_empty());
        assert!(raw("   \t\n").is_empty());
    }

    #[test]
    fn test_single_atom() {
        assert_eq!(raw("string"), vec![atom("string")]);
    }

    #[test]
    fn test_variadic_atom() {
        assert_eq!(raw("...string"), vec![atom("...string")]);
    }

    #[test]
    fn test_qualified_atom() {
        assert_eq!(raw("Roact.Element"), vec![atom("Roact.Element")]);
    }

    #[test]
    fn test_whitespace_is_skipped() {
        assert_eq!(raw("  Foo   Bar "), vec![atom("Foo"), atom("Bar")]);
    }

    #[test]
    fn test_arrow() {
        assert_eq!(raw("a -> b"), vec![atom("a"), Token::Arrow, atom("b")]);
        assert_eq!(raw("a->b"), vec![atom("a"), Token::Arrow, atom("b")]);
    }

    #[test]
    fn test_union() {
        assert_eq!(
            raw("Foo | Bar"),
            vec![atom("Foo"), Token::Union, atom("Bar")]
        );
    }

    #[test]
    fn test_lone_dash_is_punctuation() {
        assert_eq!(raw("-"), vec![Token::Punctuation('-')]);
        assert_eq!(
            raw("- >"),
            vec![Token::Punctuation('-'), Token::Punctuation('>')]
        );
    }

    #[test]
    fn test_generic_brackets_are_punctuation() {
        assert_eq!(
            raw("Promise<T>"),
            vec![
                atom("Promise"),
                Token::Punctuation('<'),
                atom("T"),
                Token::Punctuation('>'),
            ]
        );
    }

    #[test]
    fn test_identifier() {
        assert_eq!(
            raw("self: Foo"),
            vec![Token::Identifier("self".to_string()), atom("Foo")]
        );
    }

    #[test]
    fn test_lone_colon_is_empty_identifier() {
        assert_eq!(
            raw("[string] : number"),
            vec![
                Token::Indexer(vec![atom("string")]),
                Token::Identifier(String::new()),
                atom("number"),
            ]
        );
    }

    #[test]
    fn test_question_mark_stays_in_atom() {
        assert_eq!(raw("string?"), vec![atom("string?")]);
    }

    // ==========================================================================
    // Group tests
    // ==========================================================================

    #[test]
    fn test_tuple_is_pre_grouping() {
        assert_eq!(
            raw("(a, b)"),
            vec![Token::Tuple(vec![vec![atom("a"), Token::Separator, atom("b")]])]
        );
    }

    #[test]
    fn test_empty_tuple() {
        assert_eq!(raw("()"), vec![Token::Tuple(vec![vec![]])]);
    }

    #[test]
    fn test_table() {
        assert_eq!(
            raw("{string: number}"),
            vec![Token::Table(vec![vec![
                Token::Identifier("string".to_string()),
                atom("number"),
            ]])]
        );
    }

    #[test]
    fn test_indexer_does_not_split_on_commas() {
        assert_eq!(
            raw("[a, b]"),
            vec![Token::Indexer(vec![atom("a,"), atom("b")])]
        );
    }

    #[test]
    fn test_comma_outside_group_is_atom_text() {
        assert_eq!(raw("a, b"), vec![atom("a,"), atom("b")]);
    }

    #[test]
    fn test_group_context_lexer() {
        assert_eq!(
            Lexer::with_group_context("a, b", true).tokenize().unwrap(),
            vec![atom("a"), Token::Separator, atom("b")]
        );
    }

    #[test]
    fn test_nested_balanced_parens() {
        let tokens = raw("((a) -> b)");
        assert_eq!(
            tokens,
            vec![Token::Tuple(vec![vec![
                Token::Tuple(vec![vec![atom("a")]]),
                Token::Arrow,
                atom("b"),
            ]])]
        );
    }

    #[test]
    fn test_only_matching_pair_is_counted() {
        // `{` inside a tuple does not affect paren balance
        let tokens = raw("({a})");
        assert_eq!(
            tokens,
            vec![Token::Tuple(vec![vec![Token::Table(vec![vec![atom("a")]])]])]
        );
    }

    #[test]
    fn test_atom_stops_at_open_paren() {
        assert_eq!(
            raw("foo(bar)"),
            vec![atom("foo"), Token::Tuple(vec![vec![atom("bar")]])]
        );
    }

    // ==========================================================================
    // Error tests
    // ==========================================================================

    #[test]
    fn test_unterminated_tuple_is_fatal() {
        let err = Lexer::new("(number, string").tokenize().unwrap_err();
        assert_eq!(
            err,
            TokenizeError::NoProgress {
                position: 0,
                found: '('
            }
        );
    }

    #[test]
    fn test_unterminated_nested_reports_absolute_position() {
        let err = Lexer::new("(a, [b)").tokenize().unwrap_err();
        assert_eq!(
            err,
            TokenizeError::NoProgress {
                position: 4,
                found: '['
            }
        );
    }

    #[test]
    fn test_stray_close_paren_is_fatal() {
        let err = Lexer::new("a)").tokenize().unwrap_err();
        assert_eq!(
            err,
            TokenizeError::NoProgress {
                position: 1,
                found: ')'
            }
        );
    }

    #[test]
    fn test_depth_guard() {
        let deep = format!("{}{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        let err = Lexer::new(&deep).tokenize().unwrap_err();
        assert!(matches!(err, TokenizeError::TooDeep { limit: MAX_DEPTH, .. }));

        let ok = format!("{}{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert!(Lexer::new(&ok).tokenize().is_ok());
    }

    #[test]
    fn test_error_message() {
        let err = Lexer::new("]").tokenize().unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tokenizer made no progress at byte 0: unexpected ']'"
        );
    }

    #[test]
    fn test_multibyte_atoms() {
        assert_eq!(raw("Ünïcode -> ok"), vec![atom("Ünïcode"), Token::Arrow, atom("ok")]);
    }
}
