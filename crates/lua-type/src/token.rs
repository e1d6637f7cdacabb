//! Token tree types for type signatures
//!
//! A signature such as `(number, string) -> boolean` tokenizes into a flat
//! sequence whose bracketed groups nest further token sequences.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One comma-separated sub-sequence inside a tuple or table
pub type Group = Vec<Token>;

/// A token in a type signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Token {
    /// A reserved punctuation character that is not otherwise consumed (`<`, `>`, `-`, ...)
    Punctuation(char),
    /// `->`
    Arrow,
    /// `|`
    Union,
    /// A label preceding a colon, e.g. `self` in `self: Foo`
    Identifier(String),
    /// A bare type name such as `string`, `MyClass` or `...string`
    AtomType(String),
    /// `( ... )`, one entry per comma-separated group
    Tuple(Vec<Group>),
    /// `{ ... }`, one entry per comma-separated group
    Table(Vec<Group>),
    /// `[ ... ]`, a single inner sequence
    Indexer(Group),
    /// A comma inside a group before group separation
    ///
    /// Only the tokenizer produces this; [`crate::separate_groups`] removes
    /// every occurrence.
    Separator,
}

/// Write a token sequence in canonical spacing
///
/// Tokens are separated by one space, except that no space goes before
/// punctuation or a bare `:`, or after an opening `<`.
pub fn write_tokens(f: &mut fmt::Formatter<'_>, tokens: &[Token]) -> fmt::Result {
    let mut prev: Option<&Token> = None;
    for token in tokens {
        if let Some(prev) = prev {
            let tight = matches!(token, Token::Punctuation(_))
                || matches!(token, Token::Identifier(name) if name.is_empty())
                || matches!(prev, Token::Punctuation('<'));
            if !tight {
                f.write_str(" ")?;
            }
        }
        write!(f, "{}", token)?;
        prev = Some(token);
    }
    Ok(())
}

fn write_groups(f: &mut fmt::Formatter<'_>, groups: &[Group]) -> fmt::Result {
    for (i, group) in groups.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write_tokens(f, group)?;
    }
    Ok(())
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Punctuation(c) => write!(f, "{}", c),
            Token::Arrow => f.write_str("->"),
            Token::Union => f.write_str("|"),
            Token::Identifier(name) => write!(f, "{}:", name),
            Token::AtomType(name) => f.write_str(name),
            Token::Tuple(groups) => {
                f.write_str("(")?;
                write_groups(f, groups)?;
                f.write_str(")")
            }
            Token::Table(groups) => {
                f.write_str("{")?;
                write_groups(f, groups)?;
                f.write_str("}")
            }
            Token::Indexer(tokens) => {
                f.write_str("[")?;
                write_tokens(f, tokens)?;
                f.write_str("]")
            }
            Token::Separator => f.write_str(","),
        }
    }
}

/// A fully tokenized signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    pub tokens: Vec<Token>,
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_tokens(f, &self.tokens)
    }
}
