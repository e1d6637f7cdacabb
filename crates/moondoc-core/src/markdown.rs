//! Markdown descriptions
//!
//! Descriptions are CommonMark with tables and strikethrough. A shortcut
//! reference such as `[Signal]` with no matching definition is looked up in
//! the symbol table; `[Signal.Connect]` and `[Signal:Connect]` link to the
//! member anchor on the class page. Raw HTML is escaped, not passed through.

use crate::symbols::SymbolTable;
use pulldown_cmark::{BrokenLink, CowStr, Event, LinkType, Options, Parser, html};

/// Render a description to HTML
pub fn render_markdown(text: &str, symbols: &SymbolTable) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let callback = |link| resolve_broken_link(link, symbols);
    let parser =
        Parser::new_with_broken_link_callback(text, options, Some(callback)).map(|event| match event {
            Event::Html(s) | Event::InlineHtml(s) => Event::Text(s),
            e => e,
        });

    let mut out = String::new();
    html::push_html(&mut out, parser);
    out
}

/// Render a short description for use inside a line
///
/// A lone paragraph loses its `<p>` wrapper.
pub fn render_inline_markdown(text: &str, symbols: &SymbolTable) -> String {
    let out = render_markdown(text, symbols);
    match out
        .trim_end()
        .strip_prefix("<p>")
        .and_then(|s| s.strip_suffix("</p>"))
    {
        Some(inner) if !inner.contains("<p>") => inner.to_string(),
        _ => out,
    }
}

/// Resolve the label of a shortcut reference to a URL
pub fn resolve_reference(reference: &str, symbols: &SymbolTable) -> Option<String> {
    let reference = reference.trim().trim_matches('`');
    if let Some(url) = symbols.get(reference) {
        return Some(url.to_string());
    }

    let (class, member) = reference.split_once(['.', ':'])?;
    if member.is_empty() {
        return None;
    }
    symbols
        .get(class)
        .map(|url| format!("{}#{}", url, member))
}

fn resolve_broken_link<'a>(
    link: BrokenLink<'a>,
    symbols: &SymbolTable,
) -> Option<(CowStr<'a>, CowStr<'a>)> {
    match link.link_type {
        LinkType::Shortcut => {
            resolve_reference(&link.reference, symbols).map(|url| (url.into(), "".into()))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols() -> SymbolTable {
        let mut table = SymbolTable::new();
        table.insert("Signal", "/api/Signal");
        table.insert("Promise", "https://eryn.io/roblox-lua-promise");
        table
    }

    #[test]
    fn test_empty_description() {
        assert_eq!(render_markdown("   \n", &symbols()), "");
    }

    #[test]
    fn test_paragraph() {
        assert_eq!(
            render_markdown("Hello *world*", &symbols()),
            "<p>Hello <em>world</em></p>\n"
        );
    }

    #[test]
    fn test_shortcut_reference_to_class() {
        assert_eq!(
            render_markdown("See [Signal].", &symbols()),
            "<p>See <a href=\"/api/Signal\">Signal</a>.</p>\n"
        );
    }

    #[test]
    fn test_shortcut_reference_to_member() {
        let out = render_markdown("Call [Signal:Connect] or [Signal.new]", &symbols());
        assert!(out.contains(r#"<a href="/api/Signal#Connect">Signal:Connect</a>"#));
        assert!(out.contains(r#"<a href="/api/Signal#new">Signal.new</a>"#));
    }

    #[test]
    fn test_unresolved_reference_stays_literal() {
        assert_eq!(
            render_markdown("An [unknown] thing", &symbols()),
            "<p>An [unknown] thing</p>\n"
        );
    }

    #[test]
    fn test_explicit_definition_wins() {
        let text = "[Signal]\n\n[Signal]: https://example.com/signal";
        assert!(render_markdown(text, &symbols()).contains(r#"href="https://example.com/signal""#));
    }

    #[test]
    fn test_inline_link_untouched() {
        let out = render_markdown("[docs](https://example.com)", &symbols());
        assert!(out.contains(r#"<a href="https://example.com">docs</a>"#));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let out = render_markdown("a <script>x</script> b", &symbols());
        assert!(!out.contains("<script>"));
        assert!(out.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_table_and_strikethrough() {
        let out = render_markdown("| a |\n|---|\n| ~~b~~ |", &symbols());
        assert!(out.contains("<table>"));
        assert!(out.contains("<del>b</del>"));
    }

    #[test]
    fn test_inline_strips_single_paragraph() {
        assert_eq!(
            render_inline_markdown("The **callback**", &symbols()),
            "The <strong>callback</strong>"
        );
    }

    #[test]
    fn test_inline_keeps_multiple_paragraphs() {
        let out = render_inline_markdown("one\n\ntwo", &symbols());
        assert_eq!(out, "<p>one</p>\n<p>two</p>\n");
    }

    #[test]
    fn test_resolve_reference() {
        let table = symbols();
        assert_eq!(resolve_reference("`Signal`", &table).as_deref(), Some("/api/Signal"));
        assert_eq!(
            resolve_reference("Promise.new", &table).as_deref(),
            Some("https://eryn.io/roblox-lua-promise#new")
        );
        assert_eq!(resolve_reference("Signal.", &table), None);
        assert_eq!(resolve_reference("Nothing", &table), None);
    }
}
