//! Content resource loading.
//!
//! A [`Resource`] is one content file: its location relative to the content
//! root, optional TOML front matter, and the raw body. The [`Resolver`] is
//! the only component that touches the filesystem during indexing — every
//! lookup goes through it, which keeps the chain-building logic pure and
//! testable against a temp directory.
//!
//! ## Front matter
//!
//! Files may open with a TOML block between `+++` fences:
//!
//! ```text
//! +++
//! title = "User Manual"
//! +++
//!
//! # Welcome
//! ...
//! ```
//!
//! Unknown keys are allowed — front matter is free-form page data; only
//! `title` has built-in meaning (section title resolution).
//!
//! ## Lookup modes
//!
//! - [`Resolver::entry`]: exact relative path, extension included. Used for
//!   summary link targets, which name their files explicitly.
//! - [`Resolver::locate_entry`]: extension search (`.md`, then `.html`).
//!   Used for summary documents, which are addressed without an extension.

use crate::reference::normalize_path;
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Front matter parse error in '{path}': {source}")]
    FrontMatter {
        path: String,
        source: toml::de::Error,
    },
}

/// Extensions tried by [`Resolver::locate_entry`], in priority order.
const RESOURCE_EXTENSIONS: &[&str] = &["md", "html"];

/// A loaded content file (or a synthesized stand-in for a missing one).
#[derive(Debug, Clone)]
pub struct Resource {
    /// Path relative to the content root, normalized, extension included.
    pub path: String,
    /// File stem without extension.
    pub file_name: String,
    /// File extension (`md`, `html`).
    pub extension: String,
    /// Parsed front matter table. Empty when the file has none.
    pub front_matter: toml::Table,
    /// Body with front matter stripped.
    pub body: String,
    /// False for stand-ins synthesized for missing link targets.
    pub backed_by_file: bool,
}

/// Split a normalized relative path into (file stem, extension).
fn split_name(rel: &str) -> (String, String) {
    let full_name = rel.rsplit_once('/').map(|(_, f)| f).unwrap_or(rel);
    match full_name.rsplit_once('.') {
        Some((stem, ext)) => (stem.to_string(), ext.to_string()),
        None => (full_name.to_string(), String::new()),
    }
}

impl Resource {
    fn from_file(rel: &str, content: &str) -> Result<Self, ResolveError> {
        let rel = normalize_path(rel);
        let (file_name, extension) = split_name(&rel);
        let (front_matter, body) = split_front_matter(content).map_err(|e| {
            ResolveError::FrontMatter {
                path: rel.clone(),
                source: e,
            }
        })?;
        Ok(Resource {
            path: rel,
            file_name,
            extension,
            front_matter,
            body,
            backed_by_file: true,
        })
    }

    /// Synthesize an in-memory resource, used as the stand-in for a missing
    /// link target. `rel` is where the file would live. The body is taken
    /// verbatim; no front matter splitting.
    pub fn synthesized(rel: &str, body: &str) -> Self {
        let rel = normalize_path(rel);
        let (file_name, extension) = split_name(&rel);
        Resource {
            path: rel,
            file_name,
            extension,
            front_matter: toml::Table::new(),
            body: body.to_string(),
            backed_by_file: false,
        }
    }

    /// Front matter `title`, if present.
    pub fn title(&self) -> Option<&str> {
        self.front_matter.get("title").and_then(|v| v.as_str())
    }

    /// Compile the body to HTML. Markdown compiles through pulldown-cmark;
    /// `.html` bodies pass through untouched.
    pub fn compile_content(&self) -> String {
        if self.extension == "html" {
            return self.body.clone();
        }
        let parser = Parser::new(&self.body);
        let mut out = String::new();
        md_html::push_html(&mut out, parser);
        out
    }
}

/// Split optional `+++`-fenced TOML front matter from a document body.
fn split_front_matter(content: &str) -> Result<(toml::Table, String), toml::de::Error> {
    let Some(rest) = content.strip_prefix("+++") else {
        return Ok((toml::Table::new(), content.to_string()));
    };
    // The opening fence must be its own line.
    let Some(rest) = rest.strip_prefix('\n').or_else(|| rest.strip_prefix("\r\n")) else {
        return Ok((toml::Table::new(), content.to_string()));
    };
    match rest.split_once("+++") {
        Some((raw, body)) => {
            let table: toml::Table = toml::from_str(raw)?;
            Ok((table, body.trim_start_matches(['\r', '\n']).to_string()))
        }
        // Unterminated fence: treat the whole document as body.
        None => Ok((toml::Table::new(), content.to_string())),
    }
}

/// Filesystem-backed resource lookup over a content root.
#[derive(Debug)]
pub struct Resolver {
    root: PathBuf,
}

impl Resolver {
    pub fn new(root: &Path) -> Self {
        Resolver {
            root: root.to_path_buf(),
        }
    }

    /// Exact lookup of a root-relative path. `Ok(None)` when the file does
    /// not exist; I/O failures other than not-found propagate.
    pub fn entry(&self, rel: &str) -> Result<Option<Resource>, ResolveError> {
        let rel = normalize_path(rel);
        match fs::read_to_string(self.root.join(&rel)) {
            Ok(content) => Ok(Some(Resource::from_file(&rel, &content)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Lookup without an extension, trying each known resource extension in
    /// priority order.
    pub fn locate_entry(&self, rel_no_ext: &str) -> Result<Option<Resource>, ResolveError> {
        for ext in RESOURCE_EXTENSIONS {
            if let Some(resource) = self.entry(&format!("{rel_no_ext}.{ext}"))? {
                return Ok(Some(resource));
            }
        }
        Ok(None)
    }
}
