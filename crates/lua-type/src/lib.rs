//! lua-type: Tokenizer for Lua/Luau type signatures
//!
//! This crate provides:
//! - Signature tokenizer (nested `()`, `{}`, `[]` groups, `->`, `|`)
//! - Group separation of comma-delimited tuple and table contents
//! - Token tree types with a canonical text form
//!
//! # Example
//!
//! ```
//! use lua_type::{tokenize, Token};
//!
//! let tokens = tokenize("(number, string) -> boolean").unwrap();
//! assert_eq!(tokens.len(), 3);
//! assert_eq!(tokens[1], Token::Arrow);
//! ```

pub mod group;
pub mod lexer;
pub mod token;

pub use group::separate_groups;
pub use lexer::{Lexer, MAX_DEPTH, TokenizeError, TokenizeResult, is_punctuation};
pub use token::{Group, Signature, Token};

/// Tokenize a signature and separate its groups
pub fn tokenize(code: &str) -> TokenizeResult<Vec<Token>> {
    let tokens = Lexer::new(code).tokenize()?;
    Ok(tokens.into_iter().map(separate_groups).collect())
}

/// Parse a signature into a [`Signature`]
pub fn parse(code: &str) -> TokenizeResult<Signature> {
    tokenize(code).map(|tokens| Signature { tokens })
}
