//! moondoc-hast: HTML node tree and writer for moondoc
//!
//! This crate provides:
//! - hast (HTML Abstract Syntax Tree) node types (subset)
//! - Serialization to HTML, optionally as a complete document
//!
//! ## Example
//!
//! ```rust
//! use moondoc_hast::{Node, Root, hast_to_html, WriterOptions};
//!
//! let page = Root::new(vec![
//!     Node::heading(1, None, vec![Node::text("Signal")]),
//!     Node::styled("lua-op", "<"),
//! ]);
//!
//! let html = hast_to_html(&page, &WriterOptions::default());
//! assert!(html.contains("<h1>Signal</h1>"));
//! assert!(html.contains("&lt;"));
//! ```

pub mod hast;
pub mod writer;

pub use hast::{
    Code, Delete, Div, Heading, Html, Link, Node, Root, Span, Table, TableCell, TableRow, Text,
};
pub use writer::{Document, WriterOptions, escape_html, hast_to_html, node_to_html};
