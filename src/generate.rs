//! HTML site generation.
//!
//! Stage 2 of the build pipeline. Takes the index manifest and writes the
//! final static site.
//!
//! ## Generated Pages
//!
//! - **Summary pages** (`/{section}/index.html`): a section's landing page —
//!   its rewritten table of contents
//! - **Wiki pages** (`/{section}/{page}/index.html`): content pages with
//!   previous/next navigation
//! - **Sections page** (`/index.html` of the wiki root): cross-section index,
//!   only when more than one section resolved
//! - **Book pages** (`/{section}/book.html`): consolidated single-document
//!   artifact, written raw without site chrome
//! - **Admin config** (`/admin/config.yml`): CMS configuration, when enabled
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                  # Sections page (or sole section's summary)
//! ├── user-manual/
//! │   ├── index.html              # Summary page
//! │   ├── book.html               # Book artifact (if configured)
//! │   ├── installation/
//! │   │   └── index.html
//! │   └── advanced/
//! │       └── queries/
//! │           └── index.html
//! └── admin/
//!     └── config.yml              # CMS admin config (if enabled)
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Page bodies are already-compiled HTML from the index stage and are
//! injected pre-escaped; everything else is type-safe Rust with automatic
//! escaping.

use crate::cms::{self, CmsError};
use crate::index::Manifest;
use crate::model::{BookPage, SectionsPage, WikiModel, WikiPage, WikiSection};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("CMS error: {0}")]
    Cms(#[from] CmsError),
}

const CSS: &str = include_str!("../static/style.css");

/// Read a manifest written by the index stage.
pub fn load_manifest(manifest_path: &Path) -> Result<Manifest, GenerateError> {
    let content = fs::read_to_string(manifest_path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Generate the static site from an index manifest.
pub fn generate(manifest: &Manifest, output_dir: &Path) -> Result<(), GenerateError> {
    let base_url = &manifest.config.site.base_url;
    let model = &manifest.model;

    fs::create_dir_all(output_dir)?;

    for section in &model.sections {
        let summary_html = render_summary_page(section, model, base_url);
        write_page(output_dir, &section.summary.reference.output_file(), summary_html)?;

        for page in &section.pages {
            let page_html = render_wiki_page(page, section, base_url);
            write_page(output_dir, &page.reference.output_file(), page_html)?;
        }

        if let Some(book) = &section.book {
            let book_html = render_book(book, section);
            write_page(output_dir, &book.reference.output_file(), book_html)?;
        }
    }

    if let Some(sections_page) = &model.sections_page {
        let html = render_sections_page(sections_page, model, base_url);
        write_page(output_dir, &sections_page.reference.output_file(), html)?;
    }

    if manifest.config.cms.enabled {
        let yaml = cms::admin_config(&manifest.config, &model.collections(base_url))?;
        let admin_path = output_dir.join("admin/config.yml");
        fs::create_dir_all(admin_path.parent().unwrap_or(output_dir))?;
        fs::write(admin_path, yaml)?;
    }

    println!("Site generated at {}", output_dir.display());
    Ok(())
}

fn write_page(output_dir: &Path, rel: &Path, markup: Markup) -> Result<(), GenerateError> {
    let path = output_dir.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, markup.into_string())?;
    Ok(())
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure.
fn base_document(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                (content)
            }
        }
    }
}

/// Breadcrumb up-link shown above every templated page.
fn breadcrumb(label: &str, url: &str) -> Markup {
    html! {
        nav.breadcrumb {
            a href=(url) { (label) }
        }
    }
}

/// Previous/next navigation at the foot of a content page.
fn chain_nav(previous: Option<&WikiPage>, next: Option<&WikiPage>, base_url: &str) -> Markup {
    html! {
        nav.chain {
            @if let Some(prev) = previous {
                a.prev href=(prev.reference.url(base_url)) { "← " (prev.title) }
            } @else {
                span.prev {}
            }
            @if let Some(next) = next {
                a.next href=(next.reference.url(base_url)) { (next.title) " →" }
            } @else {
                span.next {}
            }
        }
    }
}

fn render_wiki_page(page: &WikiPage, section: &WikiSection, base_url: &str) -> Markup {
    base_document(
        &page.title,
        html! {
            header.site-header {
                (breadcrumb(&section.summary.title, &section.summary.reference.url(base_url)))
            }
            main.wiki-page {
                h1 { (page.title) }
                article { (PreEscaped(page.body.as_str())) }
            }
            (chain_nav(
                section.previous_of(page.ordinal),
                section.next_of(page.ordinal),
                base_url,
            ))
        },
    )
}

fn render_summary_page(section: &WikiSection, model: &WikiModel, base_url: &str) -> Markup {
    let summary = &section.summary;
    base_document(
        &summary.title,
        html! {
            header.site-header {
                @if let Some(sections_page) = &model.sections_page {
                    (breadcrumb(&sections_page.title, &sections_page.reference.url(base_url)))
                }
            }
            main.summary {
                h1 { (summary.title) }
                nav.toc { (PreEscaped(summary.body.as_str())) }
                @if let Some(book) = &section.book {
                    p.book-link {
                        a href=(book.reference.url(base_url)) { "Read as a single page" }
                    }
                }
            }
        },
    )
}

fn render_sections_page(page: &SectionsPage, model: &WikiModel, base_url: &str) -> Markup {
    base_document(
        &page.title,
        html! {
            main.sections {
                h1 { (page.title) }
                ul.section-list {
                    @for section in &model.sections {
                        li {
                            a href=(section.summary.reference.url(base_url)) {
                                (section.title)
                            }
                            span.count { " (" (section.pages.len()) " pages)" }
                        }
                    }
                }
            }
        },
    )
}

/// The book artifact: the whole section as one self-contained document.
/// Written raw — no site chrome, no navigation.
fn render_book(book: &BookPage, section: &WikiSection) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                title { (book.title) }
                style { (PreEscaped(CSS)) }
            }
            body.book {
                h1 { (book.title) }
                nav.toc { (PreEscaped(section.summary.body.as_str())) }
                @for page in &section.pages {
                    hr;
                    section {
                        h1 { (page.title) }
                        (PreEscaped(page.body.as_str()))
                    }
                }
            }
        }
    }
}
