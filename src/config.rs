//! Wiki configuration module.
//!
//! Handles loading and validating `wiki.toml` from the content root. All
//! fields have defaults; a missing config file means a single default
//! section rooted at the content directory.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! base_dir = ""             # Subdirectory of the content root holding sections
//!
//! [site]
//! title = "Wiki"            # Site display title
//! base_url = ""             # Absolute URL prefix for emitted links
//!
//! [default]                 # Section used when no [[sections]] are declared
//! include_index_in_page_title = false
//! create_book = false
//!
//! [[sections]]              # One block per named section
//! key = "user-manual"
//! include_index_in_page_title = true
//! create_book = true
//!
//! [cms]
//! enabled = false           # Emit admin/config.yml for a git-backed CMS
//! media_folder = "assets/media"
//!
//! [cms.backend]             # Passed through to the CMS verbatim
//! name = "git-gateway"
//! branch = "main"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Wiki configuration loaded from `wiki.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WikiConfig {
    /// Subdirectory of the content root holding the wiki sections.
    pub base_dir: String,
    /// Site-wide display settings.
    pub site: SiteConfig,
    /// Section used when `sections` is empty. Its key is always empty.
    pub default: SectionConfig,
    /// Named sections, in display order.
    pub sections: Vec<SectionConfig>,
    /// CMS admin config emission.
    pub cms: CmsConfig,
}

impl WikiConfig {
    /// Validate config invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = BTreeSet::new();
        for section in &self.sections {
            if !seen.insert(section.key.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "duplicate section key '{}'",
                    section.key
                )));
            }
        }
        if self.cms.enabled && !self.cms.backend.contains_key("name") {
            return Err(ConfigError::Validation(
                "cms.enabled requires cms.backend.name".into(),
            ));
        }
        Ok(())
    }

    /// The sections to index: the declared ones, or the default section
    /// (empty key) when none are declared.
    pub fn effective_sections(&self) -> Vec<SectionConfig> {
        if self.sections.is_empty() {
            let mut default = self.default.clone();
            default.key = String::new();
            vec![default]
        } else {
            self.sections.clone()
        }
    }
}

/// Site-wide display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site display title, used for the cross-section index.
    pub title: String,
    /// Absolute URL prefix for emitted links (empty = site-relative).
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Wiki".to_string(),
            base_url: String::new(),
        }
    }
}

/// Per-section configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SectionConfig {
    /// Section key: directory under `base_dir`, and the default display
    /// title. Empty for the default section.
    pub key: String,
    /// Prefix every content page title with its ordinal (`"1. "`).
    pub include_index_in_page_title: bool,
    /// Produce a consolidated single-document book artifact.
    pub create_book: bool,
}

/// CMS admin config emission settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CmsConfig {
    /// Emit `admin/config.yml` during generation.
    pub enabled: bool,
    /// Media upload directory, relative to the content root.
    pub media_folder: String,
    /// Backend settings passed through to the CMS verbatim.
    pub backend: toml::Table,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            media_folder: "assets/media".to_string(),
            backend: toml::Table::new(),
        }
    }
}

/// Load `wiki.toml` from the content root, falling back to defaults when the
/// file doesn't exist.
pub fn load_config(root: &Path) -> Result<WikiConfig, ConfigError> {
    let path = root.join("wiki.toml");
    let config: WikiConfig = if path.exists() {
        toml::from_str(&fs::read_to_string(&path)?)?
    } else {
        WikiConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A documented stock `wiki.toml`, printed by `gen-config`.
pub fn stock_config_toml() -> String {
    r#"# summark configuration - all options shown with their defaults

# Subdirectory of the content root holding the wiki sections
base_dir = ""

[site]
title = "Wiki"            # Site display title
base_url = ""             # Absolute URL prefix for emitted links

# Section used when no [[sections]] are declared
[default]
include_index_in_page_title = false
create_book = false

# Declare one block per named section:
#
# [[sections]]
# key = "user-manual"
# include_index_in_page_title = true
# create_book = true

[cms]
enabled = false           # Emit admin/config.yml for a git-backed CMS
media_folder = "assets/media"

# Backend settings passed through to the CMS verbatim:
#
# [cms.backend]
# name = "git-gateway"
# branch = "main"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn defaults_when_no_config_file() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).unwrap();
        assert_eq!(config.site.title, "Wiki");
        assert_eq!(config.base_dir, "");
        assert!(config.sections.is_empty());
        assert!(!config.cms.enabled);
    }

    #[test]
    fn sections_parse_in_order() {
        let config: WikiConfig = toml::from_str(
            r#"
            [[sections]]
            key = "user-manual"
            include_index_in_page_title = true

            [[sections]]
            key = "developer-guide"
            create_book = true
            "#,
        )
        .unwrap();
        let keys: Vec<&str> = config.sections.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["user-manual", "developer-guide"]);
        assert!(config.sections[0].include_index_in_page_title);
        assert!(config.sections[1].create_book);
    }

    #[test]
    fn unknown_keys_rejected() {
        let result: Result<WikiConfig, _> = toml::from_str("unknown_option = true\n");
        assert!(result.is_err());
    }

    #[test]
    fn duplicate_section_keys_rejected() {
        let config: WikiConfig = toml::from_str(
            r#"
            [[sections]]
            key = "guide"
            [[sections]]
            key = "guide"
            "#,
        )
        .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn cms_enabled_requires_backend_name() {
        let config: WikiConfig = toml::from_str("[cms]\nenabled = true\n").unwrap();
        assert!(config.validate().is_err());

        let config: WikiConfig =
            toml::from_str("[cms]\nenabled = true\n[cms.backend]\nname = \"git-gateway\"\n")
                .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn effective_sections_falls_back_to_default() {
        let config: WikiConfig = toml::from_str(
            r#"
            [default]
            include_index_in_page_title = true
            "#,
        )
        .unwrap();
        let sections = config.effective_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].key, "");
        assert!(sections[0].include_index_in_page_title);
    }

    #[test]
    fn effective_sections_ignores_default_when_declared() {
        let config: WikiConfig = toml::from_str(
            r#"
            [[sections]]
            key = "guide"
            "#,
        )
        .unwrap();
        let sections = config.effective_sections();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].key, "guide");
    }

    #[test]
    fn stock_config_parses_to_defaults() {
        let config: WikiConfig = toml::from_str(&stock_config_toml()).unwrap();
        assert_eq!(config.site.title, "Wiki");
        assert!(config.sections.is_empty());
        assert_eq!(config.cms.media_folder, "assets/media");
    }
}
