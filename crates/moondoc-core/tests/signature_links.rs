//! End-to-end tests: signature text through the symbol table to HTML

use moondoc_core::{
    BUILTIN_TYPES, CoreError, PALETTE, SymbolTable, bracket_color, parse_classes, render_signature,
};
use moondoc_hast::node_to_html;

const API_JSON: &str = r#"[
    {
        "name": "Foo",
        "types": [{ "name": "FooOptions", "fields": [] }]
    },
    {
        "name": "Promise",
        "functions": [
            {
                "name": "new",
                "function_type": "static",
                "external_types": [{ "name": "string", "url": "https://example.com/string" }]
            }
        ]
    }
]"#;

fn symbols() -> SymbolTable {
    SymbolTable::build(&parse_classes(API_JSON).unwrap(), "/docs/")
}

fn html(code: &str) -> String {
    node_to_html(&render_signature(code, &symbols()).unwrap())
}

#[test]
fn builtin_type_links_to_reference() {
    let table = SymbolTable::build(&[], "/");
    let node = render_signature("boolean", &table).unwrap();
    let (_, url) = BUILTIN_TYPES
        .iter()
        .find(|(name, _)| *name == "boolean")
        .unwrap();
    assert!(node_to_html(&node).contains(&format!(r#"<a href="{}" rel="noopener">boolean</a>"#, url)));
}

#[test]
fn documented_class_links_internally() {
    let out = html("Foo | Bar");
    assert!(out.contains(r#"<a href="/docs/api/Foo">Foo</a>"#));
    assert!(out.contains(r#"<code class="lua-atom">Bar</code>"#));
}

#[test]
fn nested_type_links_to_anchor() {
    assert!(html("FooOptions?").contains(r#"<a href="/docs/api/Foo#FooOptions">FooOptions?</a>"#));
}

#[test]
fn variadic_label_is_kept() {
    assert!(html("(...Foo) -> ()").contains(r#"<a href="/docs/api/Foo">...Foo</a>"#));
}

#[test]
fn external_override_beats_builtin() {
    assert!(html("string").contains(r#"<a href="https://example.com/string" rel="noopener">string</a>"#));
}

#[test]
fn absolute_base_url_links_same_site() {
    let table = SymbolTable::build(&parse_classes(API_JSON).unwrap(), "https://example.com/lib");
    let out = node_to_html(&render_signature("Foo | FooOptions", &table).unwrap());
    assert!(out.contains(r#"<a href="https://example.com/lib/api/Foo">Foo</a>"#));
    assert!(out.contains(r#"<a href="https://example.com/lib/api/Foo#FooOptions">FooOptions</a>"#));
    assert!(!out.contains("noopener"));
}

#[test]
fn depth_colors_cycle() {
    // Seven levels of nesting wrap around to the first color
    let out = html("(((((((x)))))))");
    assert_eq!(bracket_color(0), bracket_color(PALETTE.len()));
    assert_eq!(out.matches(r#"<span class="lua-purple">(</span>"#).count(), 2);
    assert_eq!(out.matches(r#"<span class="lua-green">(</span>"#).count(), 1);
}

#[test]
fn unterminated_group_is_fatal() {
    let err = render_signature("(number, string -> boolean", &symbols()).unwrap_err();
    assert!(matches!(err, CoreError::Signature { .. }));
}

#[test]
fn rendering_is_deterministic() {
    let source = "(self: Foo, callback: (...any) -> ()) -> { [string]: Promise<FooOptions> }";
    assert_eq!(html(source), html(source));
}
