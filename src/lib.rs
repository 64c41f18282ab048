//! # summark
//!
//! A minimal static wiki generator driven by a summary table of contents.
//! Your filesystem is the data source: each wiki section is a directory with
//! a `summary.md` whose links define the pages and their reading order.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! Summark processes content through two independent stages, connected by a
//! JSON manifest:
//!
//! ```text
//! 1. Index     wiki/     →  manifest.json   (summary parsing → page model)
//! 2. Generate  manifest  →  dist/           (final HTML site)
//! ```
//!
//! This separation exists for three reasons:
//!
//! - **Debuggability**: the manifest is human-readable JSON you can inspect —
//!   every page's ordinal, URL, and navigation links are visible before any
//!   HTML exists.
//! - **Testability**: indexing is a pure function from a content tree to a
//!   model, so tests exercise ordering, chaining, and fallback behavior
//!   without rendering anything.
//! - **Stable contracts**: the generate stage only knows the manifest, so
//!   the summary-resolution rules can evolve without touching templates.
//!
//! # The Content Model
//!
//! A **section** is an independently configured group of pages. Its
//! `summary.md` is the table of contents: every internal link becomes a
//! page, in document order, with a 1-based ordinal. Pages chain into a
//! previous/next reading sequence, and the summary (with its links rewritten
//! to the final page URLs) becomes the section's landing page. A missing
//! link target is not an error — an empty stand-in page is synthesized so
//! the wiki's structure can lead its content.
//!
//! With multiple sections, a cross-section index page ties the wikis
//! together. A section can also emit a **book**: the whole section
//! consolidated into a single HTML document.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`index`] | Stage 1 — summary resolution, page chaining, model aggregation |
//! | [`generate`] | Stage 2 — renders the final HTML site from the manifest using Maud |
//! | [`config`] | `wiki.toml` loading and validation |
//! | [`model`] | The wiki content model serialized between stages |
//! | [`summary`] | Link extraction and href rewriting over compiled summary HTML |
//! | [`resource`] | Filesystem resource lookup, front matter, markdown compilation |
//! | [`reference`] | Output locations: URL and output-file derivation |
//! | [`diagnostics`] | Non-fatal warning collection for the index stage |
//! | [`cms`] | CMS admin config emission from the model's collections |
//! | [`naming`] | Section-key display casing |
//! | [`output`] | CLI output formatting — tree-based display of build results |
//!
//! # Design Decisions
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Malformed markup is a build error, template variables
//! are Rust expressions, interpolation is auto-escaped, and there is no
//! template directory to ship or get out of sync.
//!
//! ## Ownership of the Navigation Chain
//!
//! Pages form a doubly-linked previous/next sequence, but no page references
//! another: each section owns its pages as an ordered vector and the chain
//! is exposed through derived accessors. There are no reference cycles and
//! no links to keep consistent.
//!
//! ## Warnings, Not Failures
//!
//! A wiki under construction is the normal case. Missing link targets
//! synthesize empty stand-in pages; a section without a summary is dropped.
//! The build always completes with whatever resolved, and every fallback is
//! reported at the end of the run.

pub mod cms;
pub mod config;
pub mod diagnostics;
pub mod generate;
pub mod index;
pub mod model;
pub mod naming;
pub mod output;
pub mod reference;
pub mod resource;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_helpers;
