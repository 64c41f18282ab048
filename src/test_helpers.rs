//! Shared test utilities for the summark test suite.
//!
//! Fixture trees are built programmatically into temp directories — content
//! files are tiny, so tests write exactly the tree they need:
//!
//! ```rust
//! let tmp = tempdir();
//! write_file(tmp.path(), "summary.md", "- [A](a.md)\n");
//! write_file(tmp.path(), "a.md", "# A\n");
//!
//! let manifest = index(tmp.path()).unwrap();
//! let section = find_section(&manifest.model, "");
//! assert_eq!(page_titles(section), vec!["A"]);
//! ```

use crate::model::{WikiModel, WikiSection};
use std::path::Path;
use tempfile::TempDir;

/// Fresh temp directory for a fixture tree.
pub fn tempdir() -> TempDir {
    TempDir::new().unwrap()
}

/// Write a content file at a root-relative path, creating parents.
pub fn write_file(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(path, content).unwrap();
}

/// A standard two-section fixture: `guide` and `manual`, one page each.
pub fn two_section_fixture() -> TempDir {
    let tmp = tempdir();
    write_file(
        tmp.path(),
        "wiki.toml",
        "[[sections]]\nkey = \"guide\"\n\n[[sections]]\nkey = \"manual\"\n",
    );
    write_file(tmp.path(), "guide/summary.md", "- [Intro](intro.md)\n");
    write_file(tmp.path(), "guide/intro.md", "# Intro\n");
    write_file(tmp.path(), "manual/summary.md", "- [Setup](setup.md)\n");
    write_file(tmp.path(), "manual/setup.md", "# Setup\n");
    tmp
}

/// Find a section by key. Panics with the available keys on a miss.
pub fn find_section<'a>(model: &'a WikiModel, key: &str) -> &'a WikiSection {
    model.section(key).unwrap_or_else(|| {
        let keys: Vec<&str> = model.sections.iter().map(|s| s.key.as_str()).collect();
        panic!("section '{key}' not found. Available: {keys:?}")
    })
}

/// All content page titles in chain order.
pub fn page_titles(section: &WikiSection) -> Vec<&str> {
    section.pages.iter().map(|p| p.title.as_str()).collect()
}
