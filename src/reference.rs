//! Output references: where a page lives in the generated site.
//!
//! Every page carries an [`OutputRef`] describing its final location. The
//! same reference answers two questions:
//!
//! - **URL**: what links to this page look like (`url`)
//! - **Output file**: which file the generate stage writes (`output_file`)
//!
//! ## Pretty vs exact URLs
//!
//! Pretty references render as a directory with an `index.html` inside, so
//! links end in a trailing slash. Exact references keep their file name and
//! extension verbatim — used for derived artifacts like the section book,
//! which must be addressable as a single file.
//!
//! ```text
//! pretty:           user-manual/installation.md → /user-manual/installation/
//! directory index:  user-manual/advanced/index.md → /user-manual/advanced/
//! exact:            user-manual/book.html → /user-manual/book.html
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How the generate stage should treat a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Rendered through the site page template (header, navigation, body).
    Template,
    /// Written as-is: derived artifacts that bypass the page template.
    Raw,
}

/// Final output location of a page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRef {
    /// Directory segments relative to the output root, no leading or
    /// trailing slash. Empty for the site root.
    pub path: String,
    /// File stem without extension.
    pub file_name: String,
    /// Source extension (`md`, `html`). Only surfaces in exact URLs.
    pub extension: String,
    /// Pretty references render as `{path}/{file_name}/index.html`.
    pub use_pretty_url: bool,
    /// Directory indexes collapse the file name segment entirely:
    /// `advanced/index.md` is addressed as `advanced/`.
    pub directory_index: bool,
}

impl OutputRef {
    /// Build a pretty reference from a source-relative path like
    /// `user-manual/installation.md`.
    pub fn from_source_path(rel: &str) -> Self {
        let rel = normalize_path(rel);
        let (path, full_name) = match rel.rsplit_once('/') {
            Some((p, f)) => (p.to_string(), f.to_string()),
            None => (String::new(), rel),
        };
        let (file_name, extension) = match full_name.rsplit_once('.') {
            Some((stem, ext)) => (stem.to_string(), ext.to_string()),
            None => (full_name, String::new()),
        };
        OutputRef {
            path,
            file_name,
            extension,
            use_pretty_url: true,
            directory_index: false,
        }
    }

    /// Mark this reference as its directory's index page.
    pub fn set_directory_index(&mut self) {
        self.directory_index = true;
    }

    /// Site-relative URL with the configured base URL prefixed.
    ///
    /// Pretty URLs end with a trailing slash; exact URLs keep the file name
    /// and extension.
    pub fn url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        let tail = if self.use_pretty_url {
            if self.directory_index {
                if self.path.is_empty() {
                    String::new()
                } else {
                    format!("{}/", self.path)
                }
            } else if self.path.is_empty() {
                format!("{}/", self.file_name)
            } else {
                format!("{}/{}/", self.path, self.file_name)
            }
        } else {
            let name = if self.extension.is_empty() {
                self.file_name.clone()
            } else {
                format!("{}.{}", self.file_name, self.extension)
            };
            if self.path.is_empty() {
                name
            } else {
                format!("{}/{}", self.path, name)
            }
        };
        format!("{base}/{tail}")
    }

    /// The source-relative file this reference was built from.
    pub fn source_file(&self) -> String {
        let name = if self.extension.is_empty() {
            self.file_name.clone()
        } else {
            format!("{}.{}", self.file_name, self.extension)
        };
        if self.path.is_empty() {
            name
        } else {
            format!("{}/{}", self.path, name)
        }
    }

    /// File to write under the output root, matching [`Self::url`].
    pub fn output_file(&self) -> PathBuf {
        let mut out = PathBuf::new();
        if !self.path.is_empty() {
            out.push(&self.path);
        }
        if self.use_pretty_url {
            if !self.directory_index {
                out.push(&self.file_name);
            }
            out.push("index.html");
        } else if self.extension.is_empty() {
            out.push(&self.file_name);
        } else {
            out.push(format!("{}.{}", self.file_name, self.extension));
        }
        out
    }
}

/// Normalize a slash-separated path: backslashes become slashes, duplicate
/// slashes collapse, leading and trailing slashes are stripped.
pub fn normalize_path(path: &str) -> String {
    path.replace('\\', "/")
        .split('/')
        .filter(|seg| !seg.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join two normalized path fragments, tolerating empty fragments.
pub fn join_path(base: &str, rest: &str) -> String {
    let base = normalize_path(base);
    let rest = normalize_path(rest);
    if base.is_empty() {
        rest
    } else if rest.is_empty() {
        base
    } else {
        format!("{base}/{rest}")
    }
}

/// Whether an href points outside the site (absolute or protocol-relative).
pub fn is_external(href: &str) -> bool {
    href.starts_with("//") || href.contains("://") || href.starts_with("mailto:")
}

/// Strip the extension from an href, keeping the directory part.
pub fn remove_extension(href: &str) -> String {
    match href.rsplit_once('/') {
        Some((dir, name)) => match name.rsplit_once('.') {
            Some((stem, _)) => format!("{dir}/{stem}"),
            None => href.to_string(),
        },
        None => match href.rsplit_once('.') {
            Some((stem, _)) => stem.to_string(),
            None => href.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pretty_url_gets_own_directory() {
        let r = OutputRef::from_source_path("user-manual/installation.md");
        assert_eq!(r.url(""), "/user-manual/installation/");
        assert_eq!(
            r.output_file(),
            PathBuf::from("user-manual/installation/index.html")
        );
    }

    #[test]
    fn directory_index_collapses_file_name() {
        let mut r = OutputRef::from_source_path("user-manual/advanced/index.md");
        r.set_directory_index();
        assert_eq!(r.url(""), "/user-manual/advanced/");
        assert_eq!(
            r.output_file(),
            PathBuf::from("user-manual/advanced/index.html")
        );
    }

    #[test]
    fn exact_url_keeps_extension() {
        let mut r = OutputRef::from_source_path("user-manual/book.html");
        r.use_pretty_url = false;
        assert_eq!(r.url(""), "/user-manual/book.html");
        assert_eq!(r.output_file(), PathBuf::from("user-manual/book.html"));
    }

    #[test]
    fn root_level_page() {
        let r = OutputRef::from_source_path("getting-started.md");
        assert_eq!(r.url(""), "/getting-started/");
        assert_eq!(r.output_file(), PathBuf::from("getting-started/index.html"));
    }

    #[test]
    fn root_directory_index() {
        let mut r = OutputRef::from_source_path("summary.md");
        r.set_directory_index();
        assert_eq!(r.url(""), "/");
        assert_eq!(r.output_file(), PathBuf::from("index.html"));
    }

    #[test]
    fn source_file_round_trips() {
        let r = OutputRef::from_source_path("user-manual/installation.md");
        assert_eq!(r.source_file(), "user-manual/installation.md");
    }

    #[test]
    fn base_url_is_prefixed() {
        let r = OutputRef::from_source_path("guide/intro.md");
        assert_eq!(r.url("https://example.com"), "https://example.com/guide/intro/");
        assert_eq!(r.url("https://example.com/"), "https://example.com/guide/intro/");
    }

    #[test]
    fn normalize_strips_and_collapses() {
        assert_eq!(normalize_path("/wiki//user-manual/"), "wiki/user-manual");
        assert_eq!(normalize_path("wiki\\pages"), "wiki/pages");
        assert_eq!(normalize_path(""), "");
    }

    #[test]
    fn join_tolerates_empty_fragments() {
        assert_eq!(join_path("wiki", "page.md"), "wiki/page.md");
        assert_eq!(join_path("", "page.md"), "page.md");
        assert_eq!(join_path("wiki/", "/page.md"), "wiki/page.md");
        assert_eq!(join_path("wiki", ""), "wiki");
    }

    #[test]
    fn external_detection() {
        assert!(is_external("https://example.com/page"));
        assert!(is_external("http://example.com"));
        assert!(is_external("//cdn.example.com/lib.js"));
        assert!(is_external("mailto:someone@example.com"));
        assert!(!is_external("pages/intro.md"));
        assert!(!is_external("intro.md"));
    }

    #[test]
    fn remove_extension_keeps_directories() {
        assert_eq!(remove_extension("pages/intro.md"), "pages/intro");
        assert_eq!(remove_extension("intro.md"), "intro");
        assert_eq!(remove_extension("pages/intro"), "pages/intro");
        assert_eq!(remove_extension("a.b/intro.md"), "a.b/intro");
    }
}
