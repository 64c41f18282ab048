//! CLI output formatting for the build stages.
//!
//! Output is information-centric: the primary display for every entity is
//! its semantic identity — section title, page ordinal and title — with
//! source files and output URLs as secondary context. Warnings are grouped
//! at the end of the run rather than interleaved with progress.
//!
//! ```text
//! Sections
//! 001 User Manual (3 pages)
//!     Source: user-manual/summary.md
//!     001 Installation → /user-manual/installation/
//!     002 Advanced Queries → /user-manual/advanced/queries/
//!     Book → /user-manual/book.html
//!
//! Warnings
//!     Could not find wiki page at 'user-manual/missing.md', using empty stand-in
//! ```
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::diagnostics::Warning;
use crate::index::Manifest;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{pos:0>3}")
}

const INDENT: &str = "    ";

/// Pluralize a page count.
fn page_count(n: usize) -> String {
    if n == 1 {
        "1 page".to_string()
    } else {
        format!("{n} pages")
    }
}

/// Format the index stage result: sections, their chained pages, warnings.
pub fn format_index_output(manifest: &Manifest) -> Vec<String> {
    let base_url = &manifest.config.site.base_url;
    let mut lines = Vec::new();

    lines.push("Sections".to_string());
    if manifest.model.sections.is_empty() {
        lines.push(format!("{INDENT}(none resolved)"));
    }
    for (i, section) in manifest.model.sections.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            section.title,
            page_count(section.pages.len())
        ));
        lines.push(format!(
            "{INDENT}Source: {}",
            section.summary.reference.source_file()
        ));
        for page in &section.pages {
            let marker = if page.placeholder { " (missing)" } else { "" };
            lines.push(format!(
                "{INDENT}{} {}{marker} → {}",
                format_index(page.ordinal),
                page.title,
                page.reference.url(base_url)
            ));
        }
        if let Some(book) = &section.book {
            lines.push(format!("{INDENT}Book → {}", book.reference.url(base_url)));
        }
    }

    if let Some(sections_page) = &manifest.model.sections_page {
        lines.push(String::new());
        lines.push(format!(
            "Sections index → {}",
            sections_page.reference.url(base_url)
        ));
    }

    lines.extend(format_warnings(&manifest.warnings));
    lines
}

/// Format the generate stage result: page counts per kind.
pub fn format_generate_output(manifest: &Manifest) -> Vec<String> {
    let sections = manifest.model.sections.len();
    let pages: usize = manifest
        .model
        .sections
        .iter()
        .map(|s| s.pages.len())
        .sum();
    let books = manifest
        .model
        .sections
        .iter()
        .filter(|s| s.book.is_some())
        .count();

    let mut line = format!(
        "Generated {sections} section{}, {}",
        if sections == 1 { "" } else { "s" },
        page_count(pages)
    );
    if books > 0 {
        line.push_str(&format!(", {books} book{}", if books == 1 { "" } else { "s" }));
    }
    if manifest.config.cms.enabled {
        line.push_str(", admin config");
    }
    vec![line]
}

fn format_warnings(warnings: &[Warning]) -> Vec<String> {
    if warnings.is_empty() {
        return Vec::new();
    }
    let mut lines = vec![String::new(), "Warnings".to_string()];
    for warning in warnings {
        lines.push(format!("{INDENT}{warning}"));
    }
    lines
}

pub fn print_index_output(manifest: &Manifest) {
    for line in format_index_output(manifest) {
        println!("{line}");
    }
}

pub fn print_generate_output(manifest: &Manifest) {
    for line in format_generate_output(manifest) {
        println!("{line}");
    }
}
