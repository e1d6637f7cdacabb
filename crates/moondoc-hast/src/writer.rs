//! hast to HTML writer
//!
//! Converts a hast tree into an HTML string, optionally wrapped in a full
//! document shell.

use crate::hast::{Node, Root};

/// Options for the HTML writer
#[derive(Debug, Clone, Default)]
pub struct WriterOptions {
    /// Wrap the body in a complete HTML document
    pub document: Option<Document>,
}

/// Document shell content
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub title: String,
    pub description: Option<String>,
    /// Stylesheet hrefs, one `<link>` each
    pub stylesheets: Vec<String>,
    /// Emit a `meta refresh` redirect to this URL
    pub redirect: Option<String>,
}

/// Convert hast to HTML
pub fn hast_to_html(root: &Root, options: &WriterOptions) -> String {
    let mut writer = Writer::new(options);
    writer.write_root(root)
}

/// Convert a single node to HTML
pub fn node_to_html(node: &Node) -> String {
    let options = WriterOptions::default();
    let mut writer = Writer::new(&options);
    writer.write_node(node);
    writer.output
}

/// Escape text or an attribute value
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

/// HTML writer state
struct Writer<'a> {
    options: &'a WriterOptions,
    output: String,
}

impl<'a> Writer<'a> {
    fn new(options: &'a WriterOptions) -> Self {
        Self {
            options,
            output: String::new(),
        }
    }

    fn write_root(&mut self, root: &Root) -> String {
        if let Some(doc) = &self.options.document {
            self.write_head(doc);
        }

        // One top-level node per line
        for (i, node) in root.children.iter().enumerate() {
            if i > 0 {
                self.output.push('\n');
            }
            self.write_node(node);
        }

        if self.options.document.is_some() {
            self.output.push_str("\n</body>\n</html>\n");
        }

        std::mem::take(&mut self.output)
    }

    fn write_head(&mut self, doc: &Document) {
        self.output.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        self.output.push_str("<meta charset=\"utf-8\">\n");
        self.output
            .push_str(&format!("<title>{}</title>\n", escape_html(&doc.title)));
        if let Some(description) = &doc.description {
            self.output.push_str(&format!(
                "<meta name=\"description\" content=\"{}\">\n",
                escape_html(description)
            ));
        }
        if let Some(url) = &doc.redirect {
            self.output.push_str(&format!(
                "<meta http-equiv=\"refresh\" content=\"0; url={}\">\n",
                escape_html(url)
            ));
        }
        for href in &doc.stylesheets {
            self.output.push_str(&format!(
                "<link rel=\"stylesheet\" href=\"{}\">\n",
                escape_html(href)
            ));
        }
        self.output.push_str("</head>\n<body>\n");
    }

    fn write_node(&mut self, node: &Node) {
        match node {
            Node::Text(t) => self.output.push_str(&escape_html(&t.value)),
            Node::Html(h) => self.output.push_str(&h.value),
            Node::Div(d) => {
                self.open("div", &[("id", d.id.as_deref()), ("class", d.class.as_deref())]);
                self.write_children(&d.children);
                self.close("div");
            }
            Node::Heading(h) => {
                let tag = format!("h{}", h.depth.clamp(1, 6));
                self.open(&tag, &[("id", h.id.as_deref())]);
                self.write_children(&h.children);
                self.close(&tag);
            }
            Node::Table(t) => {
                self.open("table", &[]);
                self.write_children(&t.children);
                self.close("table");
            }
            Node::TableRow(r) => {
                self.open("tr", &[]);
                self.write_children(&r.children);
                self.close("tr");
            }
            Node::TableCell(c) => {
                let tag = if c.header { "th" } else { "td" };
                self.open(tag, &[]);
                self.write_children(&c.children);
                self.close(tag);
            }
            Node::Code(c) => {
                self.open("code", &[("class", c.class.as_deref())]);
                self.write_children(&c.children);
                self.close("code");
            }
            Node::Span(s) => {
                self.open(
                    "span",
                    &[("class", s.class.as_deref()), ("title", s.title.as_deref())],
                );
                self.write_children(&s.children);
                self.close("span");
            }
            Node::Link(l) => {
                let rel = l.external.then_some("noopener");
                self.open("a", &[("href", Some(l.url.as_str())), ("rel", rel)]);
                self.write_children(&l.children);
                self.close("a");
            }
            Node::Delete(d) => {
                self.open("del", &[]);
                self.write_children(&d.children);
                self.close("del");
            }
        }
    }

    fn write_children(&mut self, children: &[Node]) {
        for child in children {
            self.write_node(child);
        }
    }

    /// Write an opening tag; attributes with no value are omitted
    fn open(&mut self, tag: &str, attrs: &[(&str, Option<&str>)]) {
        self.output.push('<');
        self.output.push_str(tag);
        for (name, value) in attrs {
            if let Some(value) = value {
                self.output
                    .push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
            }
        }
        self.output.push('>');
    }

    fn close(&mut self, tag: &str) {
        self.output.push_str("</");
        self.output.push_str(tag);
        self.output.push('>');
    }
}
