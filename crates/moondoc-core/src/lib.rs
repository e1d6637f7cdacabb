//! moondoc-core: Core library for rendering Lua API documentation
//!
//! This crate provides:
//! - The extractor JSON document model
//! - The symbol table used to link type names
//! - Type signature rendering with depth-colored brackets
//! - Member, markdown and class page rendering to a hast tree
//!
//! ## Example
//!
//! ```rust
//! use moondoc_core::{SymbolTable, parse_classes, render_signature};
//! use moondoc_hast::node_to_html;
//!
//! let classes = parse_classes(r#"[{ "name": "Signal" }]"#).unwrap();
//! let symbols = SymbolTable::build(&classes, "/");
//!
//! let node = render_signature("(Signal) -> ()", &symbols).unwrap();
//! assert!(node_to_html(&node).contains(r#"<a href="/api/Signal">Signal</a>"#));
//! ```

pub mod doc;
pub mod error;
pub mod lua_type;
pub mod markdown;
pub mod member;
pub mod page;
pub mod symbols;

pub use doc::{
    Deprecated, ErrorEntry, ExternalType, Field, Function, FunctionType, LuaClass, Member,
    MemberKind, MemberMeta, Param, Property, Realm, Return, Source, TypeDef, parse_classes,
};
pub use error::{CoreError, Result};
pub use lua_type::{PALETTE, bracket_color, render_signature, render_tokens};
pub use markdown::{render_inline_markdown, render_markdown, resolve_reference};
pub use page::{ClassPage, RenderContext, TocEntry, render_class_page, visible_members};
pub use symbols::{BUILTIN_TYPES, Destination, SymbolTable, normalize_base_url};

/// A node of rendered output
pub type RenderNode = moondoc_hast::Node;
