//! moondoc-site: Site generation for moondoc
//!
//! This crate turns extractor output into a static API site:
//! - Content loading from one or more extractor JSON files
//! - Sidebar ordering from the configured class order
//! - Page rendering in parallel against a shared symbol table
//! - Data files for client-side consumers (`sidebar.json`, `symbols.json`, `options.json`)
//!
//! This crate is designed to be used by various interfaces (CLI, build scripts, etc.)

pub mod sidebar;

pub use sidebar::{
    ClassOrder, ClassOrderSection, SidebarItem, build_sidebar, render_sidebar,
    validate_class_order,
};

use moondoc_core::{
    ClassPage, CoreError, LuaClass, RenderContext, SymbolTable, TocEntry, normalize_base_url,
    parse_classes, render_class_page,
};
use moondoc_hast::{Document, Node, Root, WriterOptions, hast_to_html};
use rayon::prelude::*;
use serde::Serialize;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Stylesheet written next to the pages
pub const STYLESHEET_NAME: &str = "moondoc.css";

const STYLESHEET: &str = "\
.lua-purple { color: #c678dd; }
.lua-green { color: #98c379; }
.lua-yellow { color: #e5c07b; }
.lua-cyan { color: #56b6c2; }
.lua-orange { color: #d19a66; }
.lua-red { color: #e06c75; }
.lua-op { color: #abb2bf; }
.lua-atom { color: #61afef; }
.lua-inset { padding-left: 2em; }
.member-signature { font-family: monospace; }
";

/// Errors that can occur during site generation
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to load {file}: {source}")]
    Core {
        file: PathBuf,
        #[source]
        source: CoreError,
    },

    #[error("Class {0} is defined more than once")]
    DuplicateClass(String),

    #[error("Class name {0:?} cannot be used as a file name")]
    InvalidClassName(String),

    #[error("\"{0}\" listed in class_order does not exist")]
    UnknownClassInOrder(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to render class {class}: {source}")]
    Render {
        class: String,
        #[source]
        source: CoreError,
    },
}

/// Result type for site operations
pub type Result<T> = std::result::Result<T, SiteError>;

/// All documented classes of a build, sorted by name
#[derive(Debug, Clone, Default)]
pub struct ApiContent {
    pub classes: Vec<LuaClass>,
}

impl ApiContent {
    /// Load and merge extractor JSON files
    pub fn load(paths: &[PathBuf]) -> Result<Self> {
        let mut classes = Vec::new();
        for path in paths {
            debug!(file = %path.display(), "Loading API content");
            let json = fs::read_to_string(path)?;
            let loaded = parse_classes(&json).map_err(|source| SiteError::Core {
                file: path.clone(),
                source,
            })?;
            classes.extend(loaded);
        }
        Self::from_classes(classes)
    }

    /// Sort classes by name, rejecting duplicates
    ///
    /// Names become file names under `api/`, so a name that is empty,
    /// contains a path separator or is `.`/`..` is rejected.
    pub fn from_classes(mut classes: Vec<LuaClass>) -> Result<Self> {
        classes.sort_by(|a, b| a.name.cmp(&b.name));

        let mut seen = HashSet::new();
        for class in &classes {
            if !is_valid_file_stem(&class.name) {
                return Err(SiteError::InvalidClassName(class.name.clone()));
            }
            if !seen.insert(class.name.as_str()) {
                return Err(SiteError::DuplicateClass(class.name.clone()));
            }
        }

        Ok(Self { classes })
    }

    pub fn names(&self) -> Vec<&str> {
        self.classes.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

/// Options for site generation
#[derive(Debug, Clone)]
pub struct SiteOptions {
    /// URL prefix the site is served under
    pub base_url: String,
    /// Site title, appended to page titles
    pub title: Option<String>,
    /// Repository URL prefix for source links
    pub source_url: Option<String>,
    pub class_order: ClassOrder,
    /// Include members marked private
    pub show_private: bool,
    /// Number of parallel jobs (None = use all CPUs)
    pub parallel_jobs: Option<usize>,
}

impl Default for SiteOptions {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            title: None,
            source_url: None,
            class_order: ClassOrder::default(),
            show_private: false,
            parallel_jobs: None,
        }
    }
}

/// Contents of `options.json`
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SiteOptionsData<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    source_url: Option<&'a str>,
    base_url: &'a str,
    class_order: &'a ClassOrder,
}

/// Result of a site build
#[derive(Debug)]
pub struct BuildResult {
    /// Class pages written, in class name order
    pub pages: Vec<PathBuf>,
    /// Every file written, pages included
    pub output_files: Vec<PathBuf>,
    pub sidebar: Vec<SidebarItem>,
}

/// Builds a site from loaded content
pub struct SiteBuilder {
    content: ApiContent,
    options: SiteOptions,
}

impl SiteBuilder {
    pub fn new(content: ApiContent, options: SiteOptions) -> Self {
        Self { content, options }
    }

    /// Symbol table for the loaded content
    pub fn symbols(&self) -> SymbolTable {
        SymbolTable::build(&self.content.classes, &self.options.base_url)
    }

    /// Render every page and data file into `out_dir`
    ///
    /// The class order is validated before any page renders. A malformed
    /// signature in any class fails the whole build.
    pub fn build(&self, out_dir: &Path) -> Result<BuildResult> {
        let base_url = normalize_base_url(&self.options.base_url);
        let sidebar = build_sidebar(&self.content.names(), &self.options.class_order, &base_url)?;
        let symbols = self.symbols();

        info!(
            classes = self.content.len(),
            output = %out_dir.display(),
            "Building API site"
        );

        // Configure thread pool if specified
        if let Some(n) = self.options.parallel_jobs {
            rayon::ThreadPoolBuilder::new()
                .num_threads(n)
                .build_global()
                .ok();
        }

        let api_dir = out_dir.join("api");
        fs::create_dir_all(&api_dir)?;

        let ctx = RenderContext {
            symbols: &symbols,
            source_url: self.options.source_url.as_deref(),
            show_private: self.options.show_private,
        };

        let pages = self
            .content
            .classes
            .par_iter()
            .map(|class| self.write_page(class, &ctx, &sidebar, &base_url, &api_dir))
            .collect::<Result<Vec<_>>>()?;

        let mut output_files = pages.clone();
        output_files.push(self.write_redirect(&sidebar, &base_url, &api_dir)?);
        output_files.push(write_file(
            &out_dir.join("sidebar.json"),
            &serde_json::to_string_pretty(&sidebar)?,
        )?);
        output_files.push(write_file(&out_dir.join("symbols.json"), &symbols.to_json()?)?);
        output_files.push(write_file(
            &out_dir.join("options.json"),
            &serde_json::to_string_pretty(&SiteOptionsData {
                source_url: self.options.source_url.as_deref(),
                base_url: &base_url,
                class_order: &self.options.class_order,
            })?,
        )?);
        output_files.push(write_file(&out_dir.join(STYLESHEET_NAME), STYLESHEET)?);

        info!(pages = pages.len(), "Build finished");

        Ok(BuildResult {
            pages,
            output_files,
            sidebar,
        })
    }

    fn write_page(
        &self,
        class: &LuaClass,
        ctx: &RenderContext<'_>,
        sidebar: &[SidebarItem],
        base_url: &str,
        api_dir: &Path,
    ) -> Result<PathBuf> {
        let page = render_class_page(class, ctx).map_err(|source| SiteError::Render {
            class: class.name.clone(),
            source,
        })?;

        let options = WriterOptions {
            document: Some(Document {
                title: self.page_title(&page.title),
                description: page.summary.clone(),
                stylesheets: vec![format!("{}{}", base_url, STYLESHEET_NAME)],
                redirect: None,
            }),
        };
        let html = hast_to_html(&page_layout(&page, sidebar), &options);

        write_file(
            &api_dir.join(format!("{}.json", class.name)),
            &serde_json::to_string_pretty(class)?,
        )?;
        let path = write_file(&api_dir.join(format!("{}.html", class.name)), &html)?;
        debug!(class = %class.name, path = %path.display(), "Wrote page");
        Ok(path)
    }

    /// `api/index.html`, redirecting to the first sidebar entry
    fn write_redirect(
        &self,
        sidebar: &[SidebarItem],
        base_url: &str,
        api_dir: &Path,
    ) -> Result<PathBuf> {
        let target = SidebarItem::first_href(sidebar).unwrap_or(base_url);
        let options = WriterOptions {
            document: Some(Document {
                title: self.page_title("API"),
                redirect: Some(target.to_string()),
                ..Default::default()
            }),
        };
        let body = Root::new(vec![Node::link(
            target,
            false,
            vec![Node::text("Continue to the API reference")],
        )]);
        write_file(&api_dir.join("index.html"), &hast_to_html(&body, &options))
    }

    fn page_title(&self, title: &str) -> String {
        match &self.options.title {
            Some(site) => format!("{} | {}", title, site),
            None => title.to_string(),
        }
    }
}

/// Sidebar, page body and table of contents
fn page_layout(page: &ClassPage, sidebar: &[SidebarItem]) -> Root {
    Root::new(vec![
        render_sidebar(sidebar, &page.name),
        Node::div(Some("content".to_string()), page.body.clone()),
        Node::div(Some("toc".to_string()), render_toc(&page.toc)),
    ])
}

fn render_toc(entries: &[TocEntry]) -> Vec<Node> {
    entries
        .iter()
        .map(|entry| {
            let mut children = vec![Node::link(
                format!("#{}", entry.id),
                false,
                vec![Node::text(&entry.value)],
            )];
            children.extend(render_toc(&entry.children));
            Node::div(Some("toc-entry".to_string()), children)
        })
        .collect()
}

fn is_valid_file_stem(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains(['/', '\\'])
}

fn write_file(path: &Path, contents: &str) -> Result<PathBuf> {
    fs::write(path, contents)?;
    Ok(path.to_path_buf())
}
