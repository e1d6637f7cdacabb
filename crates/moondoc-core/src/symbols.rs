//! Symbol table: type name to documentation URL
//!
//! Built once per content load and shared read-only by every render call.
//! Entries are merged in increasing precedence:
//!
//! 1. builtin type names and their reference URLs
//! 2. documented classes, `{base}api/{Class}`
//! 3. types nested in a class, `{base}api/{Class}#{Type}`
//! 4. explicit external types declared anywhere in the content
//!
//! A later tier overwrites an earlier one on a name collision. Classes and
//! nested types are internal whatever `base_url` looks like; builtins and
//! external types are classified by their URL.

use crate::doc::LuaClass;
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use url::Url;

/// Builtin type names and their reference URLs
pub const BUILTIN_TYPES: [(&str, &str); 9] = [
    ("any", "https://www.lua.org/manual/5.4/manual.html#2.1"),
    ("nil", "https://create.roblox.com/docs/luau/nil"),
    ("boolean", "https://create.roblox.com/docs/luau/booleans"),
    ("number", "https://www.lua.org/manual/5.4/manual.html#2.1"),
    ("string", "https://create.roblox.com/docs/luau/strings"),
    ("function", "https://create.roblox.com/docs/luau/functions"),
    ("userdata", "https://create.roblox.com/docs/luau/userdata"),
    ("thread", "https://www.lua.org/manual/5.4/manual.html#2.6"),
    ("table", "https://create.roblox.com/docs/luau/tables"),
];

/// Where a resolved name points
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// Absolute URL on another site
    External(String),
    /// Path within the generated site
    Internal(String),
}

impl Destination {
    /// Classify a URL: anything with a scheme is external
    pub fn classify(url: &str) -> Self {
        if Url::parse(url).is_ok() {
            Destination::External(url.to_string())
        } else {
            Destination::Internal(url.to_string())
        }
    }

    pub fn url(&self) -> &str {
        match self {
            Destination::External(url) | Destination::Internal(url) => url,
        }
    }

    pub fn is_external(&self) -> bool {
        matches!(self, Destination::External(_))
    }
}

/// Mapping from bare type name to documentation URL
///
/// Serializes as a JSON object of name to URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: BTreeMap<String, Destination>,
}

impl Serialize for SymbolTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(name, dest)| (name, dest.url())))
    }
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the table for a set of documented classes
    pub fn build(classes: &[LuaClass], base_url: &str) -> Self {
        let base = normalize_base_url(base_url);
        let mut table = Self::new();

        for (name, url) in BUILTIN_TYPES {
            table.insert(name, url);
        }

        for class in classes {
            table.insert_internal(&class.name, format!("{}api/{}", base, class.name));
        }

        for class in classes {
            for ty in &class.types {
                table.insert_internal(&ty.name, format!("{}api/{}#{}", base, class.name, ty.name));
            }
        }

        for class in classes {
            for external in class.external_types() {
                table.insert(&external.name, &external.url);
            }
        }

        table
    }

    /// Insert or overwrite an entry, classifying the URL
    pub fn insert(&mut self, name: impl Into<String>, url: impl Into<String>) {
        let url = url.into();
        self.entries.insert(name.into(), Destination::classify(&url));
    }

    /// Insert or overwrite an entry for a page of this site
    pub fn insert_internal(&mut self, name: impl Into<String>, url: impl Into<String>) {
        self.entries
            .insert(name.into(), Destination::Internal(url.into()));
    }

    /// Exact lookup without sanitization
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(Destination::url)
    }

    /// Look up the text of an atom, ignoring non-word characters
    ///
    /// `...Foo` and `Foo` resolve to the same entry.
    pub fn resolve(&self, text: &str) -> Option<&str> {
        self.get(&sanitize_name(text))
    }

    /// Destination of an atom, ignoring non-word characters
    pub fn destination(&self, text: &str) -> Option<&Destination> {
        self.entries.get(&sanitize_name(text))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by name
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Destination)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Serialize as a JSON object sorted by name
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Strip every character that is not alphanumeric or `_`
pub fn sanitize_name(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_')
        .collect()
}

/// Ensure a base URL ends with exactly one `/`
pub fn normalize_base_url(base_url: &str) -> String {
    format!("{}/", base_url.trim_end_matches('/'))
}
