//! Type signature rendering
//!
//! Walks a token tree and produces render nodes. Tuple and table brackets,
//! arrows and union bars are colored by nesting depth, cycling through
//! [`PALETTE`]; recognized type names become links.

use crate::error::{CoreError, Result};
use crate::symbols::SymbolTable;
use lua_type::Token;
use moondoc_hast::Node;

/// Bracket colors, indexed by nesting depth modulo the palette size
pub const PALETTE: [&str; 6] = ["purple", "green", "yellow", "cyan", "orange", "red"];

/// Class of punctuation that is not depth-colored
pub const OP_CLASS: &str = "lua-op";
/// Class wrapping a type name
pub const ATOM_CLASS: &str = "lua-atom";
/// Class of one indented line
pub const INSET_CLASS: &str = "lua-inset";
/// Class of a whole rendered signature
pub const TYPE_CLASS: &str = "lua-type";

const ARROW_GLYPH: &str = " \u{2192} ";
const UNION_GLYPH: &str = " | ";
const NBSP: char = '\u{a0}';

/// Palette color for a nesting depth
pub fn bracket_color(depth: usize) -> &'static str {
    PALETTE[depth % PALETTE.len()]
}

/// CSS class for a nesting depth, e.g. `lua-purple`
pub fn depth_class(depth: usize) -> String {
    format!("lua-{}", bracket_color(depth))
}

/// Tokenize and render a signature
///
/// A signature the tokenizer cannot get through is an error naming the
/// offending string.
pub fn render_signature(code: &str, symbols: &SymbolTable) -> Result<Node> {
    let tokens = lua_type::tokenize(code).map_err(|source| CoreError::Signature {
        signature: code.to_string(),
        source,
    })?;
    Ok(render_tokens(&tokens, symbols))
}

/// Render an already tokenized signature
pub fn render_tokens(tokens: &[Token], symbols: &SymbolTable) -> Node {
    let renderer = TokenRenderer { symbols };
    let mut children = Vec::new();
    renderer.render_sequence(tokens, 0, &mut children);
    Node::span(TYPE_CLASS, children)
}

/// `name: ` label of a parameter, field or identifier
pub fn label(name: &str) -> Node {
    Node::code(None, vec![Node::text(format!("{}:{}", name, NBSP))])
}

/// Renderer state
struct TokenRenderer<'a> {
    symbols: &'a SymbolTable,
}

impl TokenRenderer<'_> {
    fn render_sequence(&self, tokens: &[Token], depth: usize, out: &mut Vec<Node>) {
        for token in tokens {
            self.render_token(token, depth, out);
        }
    }

    fn render_token(&self, token: &Token, depth: usize, out: &mut Vec<Node>) {
        match token {
            Token::Tuple(groups) => self.render_groups(("(", ")"), groups, depth, out),
            Token::Table(groups) => self.render_groups(("{", "}"), groups, depth, out),
            Token::Indexer(inner) => {
                out.push(Node::styled(OP_CLASS, "["));
                self.render_sequence(inner, depth + 1, out);
                out.push(Node::styled(OP_CLASS, "]"));
            }
            Token::Arrow => out.push(Node::styled(depth_class(depth), ARROW_GLYPH)),
            Token::Union => out.push(Node::styled(depth_class(depth), UNION_GLYPH)),
            Token::Punctuation(c) => out.push(Node::styled(OP_CLASS, c.to_string())),
            Token::Identifier(name) => out.push(label(name)),
            Token::AtomType(name) => out.push(self.render_atom(name)),
            // Group separation removes every separator before rendering
            Token::Separator => out.push(Node::plain_span(vec![Node::text(
                "unknown token separator",
            )])),
        }
    }

    fn render_groups(
        &self,
        (open, close): (&str, &str),
        groups: &[Vec<Token>],
        depth: usize,
        out: &mut Vec<Node>,
    ) {
        let class = depth_class(depth);
        out.push(Node::styled(&class, open));

        match groups {
            [] => {}
            [group] => self.render_sequence(group, depth + 1, out),
            _ => {
                for (i, group) in groups.iter().enumerate() {
                    let mut line = Vec::new();
                    self.render_sequence(group, depth + 1, &mut line);
                    if i + 1 < groups.len() {
                        line.push(Node::styled(&class, ","));
                    }
                    out.push(Node::div(Some(INSET_CLASS.to_string()), line));
                }
            }
        }

        out.push(Node::styled(class, close));
    }

    fn render_atom(&self, name: &str) -> Node {
        let text = Node::text(name);
        let child = match self.symbols.destination(name) {
            Some(dest) => Node::link(dest.url(), dest.is_external(), vec![text]),
            None => text,
        };
        Node::code(Some(ATOM_CLASS.to_string()), vec![child])
    }
}
