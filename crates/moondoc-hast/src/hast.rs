//! hast (HTML Abstract Syntax Tree) types
//!
//! A small subset of HTML element nodes needed for API pages.
//! Element names follow https://github.com/syntax-tree/hast where they overlap.

use serde::{Deserialize, Serialize};

/// Root node of a page body
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Root {
    pub children: Vec<Node>,
}

/// A render node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Node {
    // Block nodes
    Div(Div),
    Heading(Heading),
    Table(Table),
    TableRow(TableRow),
    TableCell(TableCell),

    // Inline nodes
    Text(Text),
    Code(Code),
    Span(Span),
    Link(Link),
    Delete(Delete),

    // Trusted raw HTML, e.g. rendered markdown
    Html(Html),
}

/// `<div>`: a block, or one inset line of a signature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Div {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub children: Vec<Node>,
}

/// `<h1>` to `<h6>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Heading {
    pub depth: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub children: Vec<Node>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub children: Vec<Node>,
}

/// `<th>` when `header` is set, `<td>` otherwise
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub header: bool,
    pub children: Vec<Node>,
}

/// Text node, escaped on output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub value: String,
}

/// `<code>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Code {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    pub children: Vec<Node>,
}

/// `<span>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub children: Vec<Node>,
}

/// `<a>`
///
/// External links point off-site and are written with `rel="noopener"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Link {
    pub url: String,
    pub external: bool,
    pub children: Vec<Node>,
}

/// `<del>`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Delete {
    pub children: Vec<Node>,
}

/// Raw HTML, written verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Html {
    pub value: String,
}

// Convenience constructors
impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(Text {
            value: value.into(),
        })
    }

    pub fn span(class: impl Into<String>, children: Vec<Node>) -> Self {
        Node::Span(Span {
            class: Some(class.into()),
            title: None,
            children,
        })
    }

    /// A span holding a single text node
    pub fn styled(class: impl Into<String>, value: impl Into<String>) -> Self {
        Node::span(class, vec![Node::text(value)])
    }

    pub fn plain_span(children: Vec<Node>) -> Self {
        Node::Span(Span {
            class: None,
            title: None,
            children,
        })
    }

    pub fn span_with_title(
        class: impl Into<String>,
        title: impl Into<String>,
        children: Vec<Node>,
    ) -> Self {
        Node::Span(Span {
            class: Some(class.into()),
            title: Some(title.into()),
            children,
        })
    }

    pub fn code(class: Option<String>, children: Vec<Node>) -> Self {
        Node::Code(Code { class, children })
    }

    pub fn link(url: impl Into<String>, external: bool, children: Vec<Node>) -> Self {
        Node::Link(Link {
            url: url.into(),
            external,
            children,
        })
    }

    pub fn div(class: Option<String>, children: Vec<Node>) -> Self {
        Node::Div(Div {
            class,
            id: None,
            children,
        })
    }

    pub fn div_with_id(
        class: Option<String>,
        id: impl Into<String>,
        children: Vec<Node>,
    ) -> Self {
        Node::Div(Div {
            class,
            id: Some(id.into()),
            children,
        })
    }

    pub fn heading(depth: u8, id: Option<String>, children: Vec<Node>) -> Self {
        Node::Heading(Heading {
            depth,
            id,
            children,
        })
    }

    pub fn table(children: Vec<Node>) -> Self {
        Node::Table(Table { children })
    }

    pub fn table_row(children: Vec<Node>) -> Self {
        Node::TableRow(TableRow { children })
    }

    pub fn table_cell(header: bool, children: Vec<Node>) -> Self {
        Node::TableCell(TableCell { header, children })
    }

    pub fn delete(children: Vec<Node>) -> Self {
        Node::Delete(Delete { children })
    }

    pub fn html(value: impl Into<String>) -> Self {
        Node::Html(Html {
            value: value.into(),
        })
    }

    /// Children of an element node, or `None` for text and raw HTML
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Div(n) => Some(&n.children),
            Node::Heading(n) => Some(&n.children),
            Node::Table(n) => Some(&n.children),
            Node::TableRow(n) => Some(&n.children),
            Node::TableCell(n) => Some(&n.children),
            Node::Code(n) => Some(&n.children),
            Node::Span(n) => Some(&n.children),
            Node::Link(n) => Some(&n.children),
            Node::Delete(n) => Some(&n.children),
            Node::Text(_) | Node::Html(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants
    ///
    /// Raw HTML contributes nothing.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&t.value),
            Node::Html(_) => {}
            _ => {
                for child in self.children().unwrap_or_default() {
                    child.collect_text(out);
                }
            }
        }
    }
}

impl Root {
    pub fn new(children: Vec<Node>) -> Self {
        Self { children }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_content_nested() {
        let node = Node::code(
            None,
            vec![
                Node::styled("lua-op", "("),
                Node::link("/api/Foo", false, vec![Node::text("Foo")]),
                Node::html("<br>"),
                Node::styled("lua-op", ")"),
            ],
        );
        assert_eq!(node.text_content(), "(Foo)");
    }

    #[test]
    fn test_children_of_leaf() {
        assert!(Node::text("x").children().is_none());
        assert!(Node::html("<hr>").children().is_none());
        assert_eq!(Node::delete(vec![Node::text("x")]).children().map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_serialize_tagged() {
        let json = serde_json::to_string(&Node::styled("lua-op", "|")).unwrap();
        assert_eq!(
            json,
            r#"{"type":"span","class":"lua-op","children":[{"type":"text","value":"|"}]}"#
        );
    }
}
