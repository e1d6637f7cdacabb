//! Class member rendering
//!
//! Each member renders as a header (anchor heading, badges, release line,
//! deprecation notice) followed by a kind-specific signature line and its
//! description.

use crate::doc::{Function, LuaClass, Member, MemberMeta, Param, Property, Return, TypeDef};
use crate::error::Result;
use crate::lua_type::{INSET_CLASS, OP_CLASS, label, render_signature};
use crate::markdown::{render_inline_markdown, render_markdown};
use crate::page::RenderContext;
use moondoc_hast::Node;

const NBSP: &str = "\u{a0}";

/// Admonition body used when a deprecation carries no description
pub const DEFAULT_DEPRECATION_TEXT: &str = "This item is deprecated. Do not use it for new work.";

/// Number of tag color classes, `tag-color-0` to `tag-color-8`
const TAG_COLORS: u32 = 9;

/// Render one member: header, signature and description
pub fn render_member(class: &LuaClass, member: Member<'_>, ctx: &RenderContext<'_>) -> Result<Node> {
    let mut children = render_member_header(member, ctx);
    let body = match member {
        Member::Function(f) => render_function(&class.name, f, ctx)?,
        Member::Property(p) => render_property(&class.name, p, ctx)?,
        Member::Type(t) => render_typedef(t, ctx)?,
    };
    children.extend(body);
    Ok(Node::div(Some("member".to_string()), children))
}

// ============================================================================
// Header
// ============================================================================

/// Anchor heading, badges, release line and deprecation notice
pub fn render_member_header(member: Member<'_>, ctx: &RenderContext<'_>) -> Vec<Node> {
    let meta = member.meta();
    let name = Node::text(member.name());
    let title = if meta.deprecated.is_some() {
        Node::code(None, vec![Node::delete(vec![name])])
    } else {
        Node::code(None, vec![name])
    };

    let mut nodes = vec![Node::heading(3, Some(member.name().to_string()), vec![title])];

    let mut badges = badges(meta);
    if member.yields() {
        badges.push(badge("Yields"));
    }
    if member.readonly() {
        badges.push(badge("Read Only"));
    }
    badges.extend(meta.tags.iter().map(String::as_str).map(tag));
    if !badges.is_empty() {
        nodes.push(Node::div(Some("badges".to_string()), badges));
    }

    let mut details: Vec<Node> = release_line(meta)
        .into_iter()
        .map(|text| Node::styled("release-version", text))
        .collect();
    if let (Some(base), Some(source)) = (ctx.source_url, &meta.source) {
        let url = format!("{}/{}#L{}", base.trim_end_matches('/'), source.path, source.line);
        details.push(Node::span(
            "source-link",
            vec![Node::link(url, true, vec![Node::text("</>")])],
        ));
    }
    if !details.is_empty() {
        nodes.push(Node::div(Some("details".to_string()), details));
    }

    if let Some(deprecated) = &meta.deprecated {
        let title = match &deprecated.version {
            Some(version) => format!("This was deprecated in {}", version),
            None => "This was deprecated".to_string(),
        };
        let desc = deprecated
            .desc
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(DEFAULT_DEPRECATION_TEXT);
        nodes.push(Node::div(
            Some("admonition admonition-caution".to_string()),
            vec![
                Node::div(Some("admonition-title".to_string()), vec![Node::text(title)]),
                Node::html(render_markdown(desc, ctx.symbols)),
            ],
        ));
    }

    nodes
}

/// Realm and Private badges shared by classes and members
pub fn badges(meta: &MemberMeta) -> Vec<Node> {
    let mut nodes: Vec<Node> = meta.realm.iter().map(|r| badge(r.as_str())).collect();
    if meta.private {
        nodes.push(badge("Private"));
    }
    nodes
}

fn badge(label: &str) -> Node {
    let class = format!("badge badge-{}", label.to_lowercase().replace(' ', "-"));
    match badge_title(label) {
        Some(title) => Node::span_with_title(class, title, vec![Node::text(label)]),
        None => Node::styled(class, label),
    }
}

fn badge_title(label: &str) -> Option<&'static str> {
    let title = match label {
        "Server" => "This item only works when running on the server.",
        "Client" => "This item only works when running on the client.",
        "Plugin" => "This item only works when running in the context of a plugin.",
        "Yields" => {
            "This is a yielding function. When called, it will pause the Lua thread that called the function until a result is ready to be returned, without interrupting other scripts."
        }
        "Private" => "This item is only intended to be used by the module's authors.",
        "Read Only" => "This item is read only and cannot be modified.",
        _ => return None,
    };
    Some(title)
}

/// Free-form tag, colored by a hash of its text
pub fn tag(label: &str) -> Node {
    let sum: u32 = label.chars().map(u32::from).fold(0, u32::wrapping_add);
    Node::styled(format!("tag tag-color-{}", sum % TAG_COLORS), label)
}

/// Release status text, if any
pub fn release_line(meta: &MemberMeta) -> Vec<String> {
    let deprecated_in = |version: &Option<String>| match version {
        Some(v) => format!("deprecated in {}", v),
        None => "deprecated".to_string(),
    };

    let mut lines = Vec::new();
    match (&meta.since, &meta.deprecated) {
        (Some(since), None) => lines.push(format!("since {}", since)),
        (None, Some(d)) => lines.push(deprecated_in(&d.version)),
        (Some(since), Some(d)) => {
            lines.push(format!("since {}, {}", since, deprecated_in(&d.version)))
        }
        (None, None) => {}
    }
    if meta.unreleased && meta.deprecated.is_none() {
        lines.push("unreleased".to_string());
    }
    lines
}

// ============================================================================
// Signatures
// ============================================================================

fn signature_line(children: Vec<Node>) -> Node {
    Node::div(Some("member-signature".to_string()), children)
}

fn op(text: &str) -> Node {
    Node::styled(OP_CLASS, text)
}

fn comma() -> Node {
    Node::code(None, vec![Node::text(",")])
}

fn inline_description(desc: &str, ctx: &RenderContext<'_>) -> Option<Node> {
    if desc.trim().is_empty() {
        return None;
    }
    Some(Node::span(
        "inline-description",
        vec![Node::html(render_inline_markdown(desc, ctx.symbols))],
    ))
}

fn description(desc: &str, ctx: &RenderContext<'_>) -> Option<Node> {
    if desc.trim().is_empty() {
        return None;
    }
    Some(Node::div(
        Some("description".to_string()),
        vec![Node::html(render_markdown(desc, ctx.symbols))],
    ))
}

fn param(p: &Param, ctx: &RenderContext<'_>) -> Result<Vec<Node>> {
    Ok(vec![label(&p.name), render_signature(&p.lua_type, ctx.symbols)?])
}

/// One indented line per entry, comma after all but the last
fn inset_lines(entries: Vec<(Vec<Node>, &str)>, ctx: &RenderContext<'_>) -> Node {
    let count = entries.len();
    let lines = entries
        .into_iter()
        .enumerate()
        .map(|(i, (mut line, desc))| {
            if i + 1 < count {
                line.push(comma());
            }
            line.extend(inline_description(desc, ctx));
            Node::div(None, line)
        })
        .collect();
    Node::div(Some(INSET_CLASS.to_string()), lines)
}

fn render_returns(returns: &[Return], ctx: &RenderContext<'_>) -> Result<Vec<Node>> {
    let mut nodes = Vec::new();
    match returns {
        [single] => {
            nodes.push(render_signature(&single.lua_type, ctx.symbols)?);
            nodes.extend(inline_description(&single.desc, ctx));
        }
        _ => {
            nodes.push(op("("));
            if !returns.is_empty() {
                let entries = returns
                    .iter()
                    .map(|r| Ok((vec![render_signature(&r.lua_type, ctx.symbols)?], r.desc.as_str())))
                    .collect::<Result<Vec<_>>>()?;
                nodes.push(inset_lines(entries, ctx));
            }
            nodes.push(op(")"));
        }
    }
    Ok(nodes)
}

/// `for <returns> in Class do`
fn render_iterator(class_name: &str, f: &Function, ctx: &RenderContext<'_>) -> Result<Vec<Node>> {
    let keyword = |k: &str| Node::code(Some("lua-red".to_string()), vec![Node::text(k)]);
    let gap = || Node::text(NBSP.repeat(2));

    let mut nodes = vec![keyword("for"), gap()];
    for (i, ret) in f.returns.iter().enumerate() {
        let mut item = vec![render_signature(&ret.lua_type, ctx.symbols)?];
        if i + 1 < f.returns.len() {
            item.push(comma());
        }
        item.extend(inline_description(&ret.desc, ctx));
        item.push(Node::text(NBSP));
        nodes.push(Node::plain_span(item));
    }
    nodes.push(Node::text(NBSP));
    nodes.push(keyword("in"));
    nodes.push(gap());
    nodes.push(Node::code(
        Some("lua-green".to_string()),
        vec![Node::text(class_name)],
    ));
    nodes.push(gap());
    nodes.push(keyword("do"));
    Ok(nodes)
}

/// Signature line of a function
pub fn render_function_signature(
    class_name: &str,
    f: &Function,
    ctx: &RenderContext<'_>,
) -> Result<Node> {
    if f.name == "__iter" {
        return Ok(signature_line(render_iterator(class_name, f, ctx)?));
    }

    let mut nodes = Vec::new();
    if f.name == "__call" {
        nodes.push(Node::code(
            Some("lua-green".to_string()),
            vec![Node::text(class_name)],
        ));
    } else {
        nodes.push(Node::code(
            None,
            vec![Node::text(format!("{}{}", class_name, f.function_type.operator()))],
        ));
        nodes.push(Node::code(
            Some("lua-green".to_string()),
            vec![Node::text(&f.name)],
        ));
    }

    nodes.push(op("("));
    let inline = f.params.len() < 2 && f.params.first().is_none_or(|p| p.desc.trim().is_empty());
    if inline {
        if let Some(p) = f.params.first() {
            nodes.extend(param(p, ctx)?);
        }
    } else {
        let entries = f
            .params
            .iter()
            .map(|p| Ok((param(p, ctx)?, p.desc.as_str())))
            .collect::<Result<Vec<_>>>()?;
        nodes.push(inset_lines(entries, ctx));
    }
    nodes.push(op(")"));
    nodes.push(op(" \u{2192} "));
    nodes.extend(render_returns(&f.returns, ctx)?);

    Ok(signature_line(nodes))
}

fn errors_table(f: &Function, ctx: &RenderContext<'_>) -> Vec<Node> {
    if f.errors.is_empty() {
        return Vec::new();
    }

    let header = Node::table_row(vec![
        Node::table_cell(true, vec![Node::text("Type")]),
        Node::table_cell(true, vec![Node::text("Description")]),
    ]);
    let rows = f.errors.iter().map(|e| {
        Node::table_row(vec![
            Node::table_cell(false, vec![Node::code(None, vec![Node::text(&e.lua_type)])]),
            Node::table_cell(
                false,
                vec![Node::html(render_inline_markdown(&e.desc, ctx.symbols))],
            ),
        ])
    });

    vec![
        Node::heading(4, None, vec![Node::text("Errors")]),
        Node::table(std::iter::once(header).chain(rows).collect()),
    ]
}

/// Signature, description and errors of a function
pub fn render_function(class_name: &str, f: &Function, ctx: &RenderContext<'_>) -> Result<Vec<Node>> {
    let mut nodes = vec![render_function_signature(class_name, f, ctx)?];
    nodes.extend(description(&f.desc, ctx));
    nodes.extend(errors_table(f, ctx));
    Ok(nodes)
}

/// `Class.name: <type>` and description
pub fn render_property(class_name: &str, p: &Property, ctx: &RenderContext<'_>) -> Result<Vec<Node>> {
    let mut nodes = vec![signature_line(vec![
        Node::code(None, vec![Node::text(format!("{}.{}:{}", class_name, p.name, NBSP))]),
        render_signature(&p.lua_type, ctx.symbols)?,
    ])];
    nodes.extend(description(&p.desc, ctx));
    Ok(nodes)
}

/// `type Name = <type>` or `interface Name { ... }`, then description
pub fn render_typedef(t: &TypeDef, ctx: &RenderContext<'_>) -> Result<Vec<Node>> {
    let keyword = |k: &str| Node::code(Some("lua-purple".to_string()), vec![Node::text(k)]);

    let line = match &t.lua_type {
        Some(lua_type) => vec![
            keyword("type"),
            Node::text(" "),
            Node::code(None, vec![Node::text(format!("{} = ", t.name))]),
            render_signature(lua_type, ctx.symbols)?,
        ],
        None => {
            let fields = t
                .fields
                .iter()
                .map(|field| {
                    let mut line = vec![
                        label(&field.name),
                        render_signature(&field.lua_type, ctx.symbols)?,
                    ];
                    line.extend(inline_description(&field.desc, ctx));
                    Ok(Node::div(None, line))
                })
                .collect::<Result<Vec<_>>>()?;
            vec![
                keyword("interface"),
                Node::text(" "),
                Node::code(None, vec![Node::text(format!("{} {{", t.name))]),
                Node::div(Some(INSET_CLASS.to_string()), fields),
                Node::code(None, vec![Node::text("}")]),
            ]
        }
    };

    let mut nodes = vec![signature_line(line)];
    nodes.extend(description(&t.desc, ctx));
    Ok(nodes)
}
