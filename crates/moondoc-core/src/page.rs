//! Class page rendering

use crate::doc::{LuaClass, Member, MemberKind};
use crate::error::Result;
use crate::markdown::render_markdown;
use crate::member::{badges, render_member, tag};
use crate::symbols::SymbolTable;
use moondoc_hast::{Node, Root};
use serde::Serialize;

/// Read-only state shared by every render call of a build
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub symbols: &'a SymbolTable,
    /// Repository URL prefix for source links
    pub source_url: Option<&'a str>,
    /// Include members marked private
    pub show_private: bool,
}

/// Table of contents entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TocEntry {
    pub value: String,
    pub id: String,
    pub children: Vec<TocEntry>,
}

/// A rendered class page
#[derive(Debug, Clone, PartialEq)]
pub struct ClassPage {
    pub name: String,
    pub title: String,
    /// First line of the class description, for page metadata
    pub summary: Option<String>,
    pub body: Vec<Node>,
    pub toc: Vec<TocEntry>,
}

impl ClassPage {
    pub fn to_root(&self) -> Root {
        Root::new(self.body.clone())
    }
}

/// Members of one section as they appear on the page
///
/// Ignored members are dropped, and private ones unless `show_private`.
/// Deprecated members move after the others; order is otherwise kept.
pub fn visible_members(class: &LuaClass, kind: MemberKind, show_private: bool) -> Vec<Member<'_>> {
    let mut members: Vec<Member<'_>> = class
        .members(kind)
        .into_iter()
        .filter(|m| !m.meta().ignore)
        .filter(|m| show_private || !m.meta().private)
        .collect();
    // Stable sort
    members.sort_by_key(|m| m.meta().deprecated.is_some());
    members
}

/// Render a class to a page body and table of contents
pub fn render_class_page(class: &LuaClass, ctx: &RenderContext<'_>) -> Result<ClassPage> {
    let mut body = vec![Node::heading(1, None, vec![Node::text(&class.name)])];

    let mut labels = badges(&class.meta);
    labels.extend(class.meta.tags.iter().map(String::as_str).map(tag));
    if !labels.is_empty() {
        body.push(Node::div(Some("class-tags".to_string()), labels));
    }

    if !class.desc.trim().is_empty() {
        body.push(Node::div(
            Some("description".to_string()),
            vec![Node::html(render_markdown(&class.desc, ctx.symbols))],
        ));
    }

    let mut toc = Vec::new();
    for kind in MemberKind::ALL {
        let members = visible_members(class, kind, ctx.show_private);
        if members.is_empty() {
            continue;
        }

        body.push(Node::heading(
            2,
            Some(kind.as_str().to_string()),
            vec![Node::text(kind.title())],
        ));
        for member in &members {
            body.push(render_member(class, *member, ctx)?);
        }

        toc.push(TocEntry {
            value: kind.title().to_string(),
            id: kind.as_str().to_string(),
            children: members
                .iter()
                .map(|m| TocEntry {
                    value: m.name().to_string(),
                    id: m.name().to_string(),
                    children: Vec::new(),
                })
                .collect(),
        });
    }

    Ok(ClassPage {
        name: class.name.clone(),
        title: class.name.clone(),
        summary: class
            .desc
            .lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string),
        body,
        toc,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::{Deprecated, Function, MemberMeta, Property, TypeDef, parse_classes};
    use moondoc_hast::{WriterOptions, hast_to_html};

    fn function(name: &str, meta: MemberMeta) -> Function {
        Function {
            name: name.to_string(),
            meta,
            ..Default::default()
        }
    }

    fn deprecated() -> MemberMeta {
        MemberMeta {
            deprecated: Some(Deprecated::default()),
            ..Default::default()
        }
    }

    fn signal() -> LuaClass {
        LuaClass {
            name: "Signal".to_string(),
            desc: "\nAn event emitter.\n\nMore details.".to_string(),
            functions: vec![
                function("Old", deprecated()),
                function("Connect", MemberMeta::default()),
                function(
                    "Hidden",
                    MemberMeta {
                        ignore: true,
                        ..Default::default()
                    },
                ),
                function(
                    "Internal",
                    MemberMeta {
                        private: true,
                        ..Default::default()
                    },
                ),
                function("Fire", MemberMeta::default()),
            ],
            properties: vec![Property {
                name: "Name".to_string(),
                lua_type: "string".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    fn names(members: &[Member<'_>]) -> Vec<String> {
        members.iter().map(|m| m.name().to_string()).collect()
    }

    #[test]
    fn test_visible_members_filter_and_order() {
        let class = signal();
        assert_eq!(
            names(&visible_members(&class, MemberKind::Functions, false)),
            vec!["Connect", "Fire", "Old"]
        );
        assert_eq!(
            names(&visible_members(&class, MemberKind::Functions, true)),
            vec!["Connect", "Internal", "Fire", "Old"]
        );
    }

    #[test]
    fn test_toc_sections_and_children() {
        let class = signal();
        let symbols = SymbolTable::build(std::slice::from_ref(&class), "/");
        let ctx = RenderContext {
            symbols: &symbols,
            source_url: None,
            show_private: false,
        };
        let page = render_class_page(&class, &ctx).unwrap();

        let sections: Vec<_> = page.toc.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(sections, vec!["properties", "functions"]);
        let functions: Vec<_> = page.toc[1].children.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(functions, vec!["Connect", "Fire", "Old"]);
    }

    #[test]
    fn test_page_metadata() {
        let class = signal();
        let symbols = SymbolTable::new();
        let ctx = RenderContext {
            symbols: &symbols,
            source_url: None,
            show_private: false,
        };
        let page = render_class_page(&class, &ctx).unwrap();
        assert_eq!(page.name, "Signal");
        assert_eq!(page.title, "Signal");
        assert_eq!(page.summary.as_deref(), Some("An event emitter."));
    }

    #[test]
    fn test_page_sections_in_order() {
        let mut class = signal();
        class.types.push(TypeDef {
            name: "Handler".to_string(),
            lua_type: Some("() -> ()".to_string()),
            ..Default::default()
        });
        let symbols = SymbolTable::build(std::slice::from_ref(&class), "/");
        let ctx = RenderContext {
            symbols: &symbols,
            source_url: None,
            show_private: false,
        };
        let page = render_class_page(&class, &ctx).unwrap();
        let html = hast_to_html(&page.to_root(), &WriterOptions::default());

        let types = html.find(r#"<h2 id="types">"#).unwrap();
        let properties = html.find(r#"<h2 id="properties">"#).unwrap();
        let functions = html.find(r#"<h2 id="functions">"#).unwrap();
        assert!(types < properties && properties < functions);
        assert!(html.starts_with("<h1>Signal</h1>"));
        assert!(!html.contains("Hidden"));
        assert!(!html.contains("Internal"));
    }

    #[test]
    fn test_malformed_signature_fails_page() {
        let classes = parse_classes(
            r#"[{ "name": "Broken", "properties": [{ "name": "x", "lua_type": "{ number" }] }]"#,
        )
        .unwrap();
        let symbols = SymbolTable::new();
        let ctx = RenderContext {
            symbols: &symbols,
            source_url: None,
            show_private: false,
        };
        let err = render_class_page(&classes[0], &ctx).unwrap_err();
        assert!(err.to_string().contains("`{ number`"));
    }
}
