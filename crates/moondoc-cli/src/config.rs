//! Configuration file support for moondoc CLI
//!
//! Loads settings from `moondoc.toml` configuration file.

use anyhow::{Context, Result};
use moondoc_site::{ClassOrder, ClassOrderSection, SiteOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default configuration file name
pub const CONFIG_FILE_NAME: &str = "moondoc.toml";

/// Schema URL for the configuration file
pub const SCHEMA_URL: &str =
    "https://raw.githubusercontent.com/moondoc/moondoc/main/crates/moondoc-cli/schema/moondoc.schema.json";

/// Root configuration structure
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct Config {
    /// Site metadata
    #[serde(skip_serializing_if = "SiteConfig::is_empty")]
    pub site: SiteConfig,
    /// API page configuration
    #[serde(skip_serializing_if = "ApiConfig::is_empty")]
    pub api: ApiConfig,
    /// Build output configuration
    #[serde(skip_serializing_if = "BuildConfig::is_empty")]
    pub build: BuildConfig,
}

/// Site metadata
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct SiteConfig {
    /// URL prefix the site is served under (default: "/")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Site title, appended to every page title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Repository URL prefix for source links, e.g. "https://github.com/user/repo/blob/main"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_url: Option<String>,
}

impl SiteConfig {
    fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.title.is_none() && self.source_url.is_none()
    }
}

/// API page configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ApiConfig {
    /// Include members marked private (default: false)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_private: Option<bool>,
    /// Sidebar order: a list of class names, or a list of sections
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class_order: Option<ClassOrderConfig>,
}

impl ApiConfig {
    fn is_empty(&self) -> bool {
        self.show_private.is_none() && self.class_order.is_none()
    }
}

/// Sidebar class order
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum ClassOrderConfig {
    /// Class names, listed first in this order
    Names(Vec<String>),
    /// Sections of class names; a section without a title lists its classes inline
    Sections(Vec<ClassOrderSectionConfig>),
}

/// One section of the sidebar class order
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct ClassOrderSectionConfig {
    /// Collapsed category title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    /// Class names in this section
    pub classes: Vec<String>,
}

impl From<ClassOrderConfig> for ClassOrder {
    fn from(config: ClassOrderConfig) -> Self {
        match config {
            ClassOrderConfig::Names(names) => ClassOrder::Names(names),
            ClassOrderConfig::Sections(sections) => ClassOrder::Sections(
                sections
                    .into_iter()
                    .map(|s| ClassOrderSection {
                        section: s.section,
                        classes: s.classes,
                    })
                    .collect(),
            ),
        }
    }
}

/// Build output configuration
#[derive(Debug, Default, Clone, Deserialize, Serialize, JsonSchema)]
#[serde(default)]
pub struct BuildConfig {
    /// Output directory (default: "build")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<PathBuf>,
    /// Number of parallel jobs (default: number of CPUs)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl BuildConfig {
    fn is_empty(&self) -> bool {
        self.output.is_none() && self.jobs.is_none()
    }
}

impl Config {
    /// Load configuration from a specific file path
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Try to load configuration from a directory (looks for `moondoc.toml`)
    ///
    /// Returns `Ok(None)` if the config file doesn't exist.
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            Ok(Some(Self::load(&config_path)?))
        } else {
            Ok(None)
        }
    }

    /// Generate JSON schema for the configuration
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// Generate JSON schema as a string
    pub fn json_schema_string() -> Result<String> {
        let schema = Self::json_schema();
        serde_json::to_string_pretty(&schema).context("Failed to serialize JSON schema")
    }

    /// Serialize configuration to TOML string with schema directive
    pub fn to_toml_with_schema(&self) -> Result<String> {
        let toml_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        Ok(format!("#:schema {}\n\n{}", SCHEMA_URL, toml_content))
    }

    /// Create a sample configuration for the init command
    pub fn sample() -> Self {
        Config {
            site: SiteConfig {
                base_url: Some("/".to_string()),
                title: Some("My Library".to_string()),
                source_url: Some("https://github.com/user/repo/blob/main".to_string()),
            },
            api: ApiConfig {
                show_private: Some(false),
                class_order: None, // all classes sorted by name
            },
            build: BuildConfig {
                output: Some(PathBuf::from("build")),
                jobs: None, // use all CPUs
            },
        }
    }

    /// Site options from this configuration
    pub fn site_options(&self) -> SiteOptions {
        let defaults = SiteOptions::default();
        SiteOptions {
            base_url: self.site.base_url.clone().unwrap_or(defaults.base_url),
            title: self.site.title.clone(),
            source_url: self.site.source_url.clone(),
            class_order: self
                .api
                .class_order
                .clone()
                .map(ClassOrder::from)
                .unwrap_or_default(),
            show_private: self.api.show_private.unwrap_or(defaults.show_private),
            parallel_jobs: self.build.jobs,
        }
    }
}
