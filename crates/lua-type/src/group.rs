//! Group separation
//!
//! The lexer leaves each tuple and table as one flat group with
//! [`Token::Separator`] markers. This pass splits those groups at the
//! separators, recursing into nested groups first.

use crate::token::{Group, Token};

/// Split the groups of a tuple or table at separators
///
/// Other tokens are returned unchanged, except that indexer contents are
/// visited so groups nested inside them are separated too. Applying this
/// to an already separated token is a no-op.
pub fn separate_groups(token: Token) -> Token {
    match token {
        Token::Tuple(groups) => Token::Tuple(split_groups(groups)),
        Token::Table(groups) => Token::Table(split_groups(groups)),
        Token::Indexer(tokens) => Token::Indexer(tokens.into_iter().map(separate_groups).collect()),
        other => other,
    }
}

fn split_groups(groups: Vec<Group>) -> Vec<Group> {
    let mut result = Vec::with_capacity(groups.len());

    for group in groups {
        let mut current = Vec::new();
        for token in group {
            match token {
                Token::Separator => result.push(std::mem::take(&mut current)),
                token => current.push(separate_groups(token)),
            }
        }
        result.push(current);
    }

    // A tuple or table always has at least one group
    if result.is_empty() {
        result.push(Vec::new());
    }

    result
}
