//! Sidebar ordering
//!
//! The sidebar lists every class. A configured class order puts the listed
//! classes first, optionally grouped into collapsed sections; the remaining
//! classes follow sorted by name.

use crate::{Result, SiteError};
use moondoc_hast::Node;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Configured class order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ClassOrder {
    /// Plain list of class names
    Names(Vec<String>),
    /// Named sections, each listing class names
    Sections(Vec<ClassOrderSection>),
}

impl Default for ClassOrder {
    fn default() -> Self {
        ClassOrder::Names(Vec::new())
    }
}

/// One entry of a sectioned class order
///
/// Without a `section` title the classes are listed inline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ClassOrderSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default)]
    pub classes: Vec<String>,
}

impl ClassOrder {
    pub fn is_empty(&self) -> bool {
        match self {
            ClassOrder::Names(names) => names.is_empty(),
            ClassOrder::Sections(sections) => sections.is_empty(),
        }
    }

    /// Every class name the order mentions, in order
    pub fn listed_names(&self) -> Vec<&str> {
        match self {
            ClassOrder::Names(names) => names.iter().map(String::as_str).collect(),
            ClassOrder::Sections(sections) => sections
                .iter()
                .flat_map(|s| s.classes.iter().map(String::as_str))
                .collect(),
        }
    }
}

/// A sidebar entry
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SidebarItem {
    Link {
        label: String,
        href: String,
    },
    Category {
        label: String,
        collapsible: bool,
        collapsed: bool,
        items: Vec<SidebarItem>,
    },
}

impl SidebarItem {
    fn link(name: &str, base_url: &str) -> Self {
        SidebarItem::Link {
            label: name.to_string(),
            href: format!("{}api/{}", base_url, name),
        }
    }

    /// First link in depth-first order
    pub fn first_href(items: &[SidebarItem]) -> Option<&str> {
        items.iter().find_map(|item| match item {
            SidebarItem::Link { href, .. } => Some(href.as_str()),
            SidebarItem::Category { items, .. } => Self::first_href(items),
        })
    }
}

/// Check every listed class exists
pub fn validate_class_order(names: &[&str], class_order: &ClassOrder) -> Result<()> {
    let known: HashSet<&str> = names.iter().copied().collect();
    match class_order
        .listed_names()
        .into_iter()
        .find(|name| !known.contains(name))
    {
        Some(name) => Err(SiteError::UnknownClassInOrder(name.to_string())),
        None => Ok(()),
    }
}

/// Build the sidebar for a set of class names
///
/// `base_url` must already end with `/`.
pub fn build_sidebar(
    names: &[&str],
    class_order: &ClassOrder,
    base_url: &str,
) -> Result<Vec<SidebarItem>> {
    validate_class_order(names, class_order)?;

    let listed: HashSet<&str> = class_order.listed_names().into_iter().collect();
    let mut unlisted: Vec<&str> = names
        .iter()
        .copied()
        .filter(|name| !listed.contains(name))
        .collect();
    unlisted.sort_unstable();
    unlisted.dedup();

    let mut items = Vec::new();
    match class_order {
        ClassOrder::Names(order) => {
            items.extend(order.iter().map(|name| SidebarItem::link(name, base_url)));
        }
        ClassOrder::Sections(sections) => {
            for section in sections {
                let links = section.classes.iter().map(|name| SidebarItem::link(name, base_url));
                match &section.section {
                    Some(label) => items.push(SidebarItem::Category {
                        label: label.clone(),
                        collapsible: true,
                        collapsed: true,
                        items: links.collect(),
                    }),
                    None => items.extend(links),
                }
            }
        }
    }
    items.extend(unlisted.into_iter().map(|name| SidebarItem::link(name, base_url)));

    Ok(items)
}

/// Render the sidebar as navigation nodes
///
/// The link for `current` is marked active.
pub fn render_sidebar(items: &[SidebarItem], current: &str) -> Node {
    Node::div(Some("sidebar".to_string()), render_items(items, current))
}

fn render_items(items: &[SidebarItem], current: &str) -> Vec<Node> {
    items
        .iter()
        .map(|item| match item {
            SidebarItem::Link { label, href } => {
                let class = if label == current {
                    "sidebar-link active"
                } else {
                    "sidebar-link"
                };
                Node::div(
                    Some(class.to_string()),
                    vec![Node::link(href, false, vec![Node::text(label)])],
                )
            }
            SidebarItem::Category { label, items, .. } => Node::div(
                Some("sidebar-category".to_string()),
                std::iter::once(Node::div(
                    Some("sidebar-category-label".to_string()),
                    vec![Node::text(label)],
                ))
                .chain(render_items(items, current))
                .collect(),
            ),
        })
        .collect()
}
