//! Wiki indexing: summary resolution and page chaining.
//!
//! Stage 1 of the build pipeline. Reads `wiki.toml`, locates each section's
//! summary document, and turns its table of contents into a chained page
//! model, producing a [`Manifest`] that the generate stage consumes.
//!
//! ## Section resolution
//!
//! For each configured section (or the default section when none are
//! declared):
//!
//! 1. Locate `{base_dir}/{key}/summary.{md,html}` and compile it to HTML.
//! 2. Extract the summary's internal links in document order.
//! 3. Resolve each link against the content root. Missing targets get an
//!    empty synthesized stand-in page and a warning; indexing continues.
//! 4. Assign 1-based ordinals (external links don't count) and chain pages
//!    into the section's navigation sequence.
//! 5. Rewrite the summary's internal hrefs to the final page URLs; the
//!    result becomes the section's landing page body.
//!
//! A section whose summary is missing is dropped from the model: named
//! sections leave a warning behind, the default section is dropped
//! silently. No per-section condition aborts the build, and one section's
//! failure does not affect the others.

use crate::config::{self, SectionConfig, WikiConfig};
use crate::diagnostics::{Diagnostics, Warning};
use crate::model::{
    BookPage, PageDescriptor, SummaryPage, WikiModel, WikiPage, WikiSection, section_source_dir,
};
use crate::naming;
use crate::reference::{OutputRef, join_path, remove_extension};
use crate::resource::{ResolveError, Resolver, Resource};
use crate::summary::{self, SummaryError};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Resource error: {0}")]
    Resolve(#[from] ResolveError),
    #[error("Summary error: {0}")]
    Summary(#[from] SummaryError),
}

/// Manifest output from the index stage.
#[derive(Debug, Serialize, Deserialize)]
pub struct Manifest {
    /// Flattened page list in section-then-ordinal order.
    pub pages: Vec<PageDescriptor>,
    pub model: WikiModel,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub warnings: Vec<Warning>,
    pub config: WikiConfig,
}

/// Index a content directory: load config, resolve every section, and
/// aggregate the model.
pub fn index(source: &Path) -> Result<Manifest, IndexError> {
    let config = config::load_config(source)?;
    let resolver = Resolver::new(source);
    let mut diagnostics = Diagnostics::new();

    let model = build_model(&resolver, &config, &mut diagnostics)?;
    let pages = model.all_pages(&config.site.base_url);

    Ok(Manifest {
        pages,
        model,
        warnings: diagnostics.into_warnings(),
        config,
    })
}

/// Resolve all configured sections into a [`WikiModel`].
pub fn build_model(
    resolver: &Resolver,
    config: &WikiConfig,
    diagnostics: &mut Diagnostics,
) -> Result<WikiModel, IndexError> {
    let mut sections = Vec::new();
    for section_config in config.effective_sections() {
        if let Some(section) = load_section(resolver, config, &section_config, diagnostics)? {
            sections.push(section);
        }
    }
    Ok(WikiModel::initialize(
        sections,
        &config.base_dir,
        &config.site.title,
    ))
}

/// Load one section: locate its summary, build the page chain, assemble the
/// section. `None` means the section produced nothing and is dropped.
fn load_section(
    resolver: &Resolver,
    config: &WikiConfig,
    section_config: &SectionConfig,
    diagnostics: &mut Diagnostics,
) -> Result<Option<WikiSection>, IndexError> {
    let source_dir = section_source_dir(&config.base_dir, &section_config.key);

    let Some(summary) = resolver.locate_entry(&join_path(&source_dir, "summary"))? else {
        // Only named sections warn: an absent default section just means
        // the site has no unnamed wiki.
        if !section_config.key.is_empty() {
            diagnostics.warn(Warning::SummaryNotFound {
                key: section_config.key.clone(),
                dir: source_dir,
            });
        }
        return Ok(None);
    };

    let compiled = summary.compile_content();
    let links = summary::extract_links(&compiled)?;

    let mut pages = Vec::new();
    let mut urls = Vec::new();
    for (i, link) in links.iter().enumerate() {
        let ordinal = i + 1;
        let full_path = join_path(&source_dir, &link.href);

        let resource = match resolver.entry(&full_path)? {
            Some(resource) => resource,
            None => {
                diagnostics.warn(Warning::LinkTargetNotFound {
                    path: full_path.clone(),
                });
                let page_path = join_path(&source_dir, &remove_extension(&link.href));
                Resource::synthesized(&format!("{page_path}/index.md"), &link.text)
            }
        };

        let mut reference = OutputRef::from_source_path(&resource.path);
        if resource.file_name.eq_ignore_ascii_case("index") {
            reference.set_directory_index();
        }

        let title = if section_config.include_index_in_page_title {
            format!("{ordinal}. {}", link.text)
        } else {
            link.text.clone()
        };

        urls.push(reference.url(&config.site.base_url));
        pages.push(WikiPage {
            title,
            section_key: section_config.key.clone(),
            ordinal,
            body: resource.compile_content(),
            placeholder: !resource.backed_by_file,
            source: resource.path.clone(),
            reference,
        });
    }

    let body = summary::rewrite_links(&compiled, &urls)?;

    let title = summary
        .title()
        .map(str::to_string)
        .filter(|t| !t.is_empty())
        .or_else(|| {
            (!section_config.key.is_empty())
                .then(|| naming::display_title(&section_config.key))
        })
        .unwrap_or_else(|| "Wiki".to_string());

    let mut summary_ref = OutputRef::from_source_path(&summary.path);
    summary_ref.set_directory_index();

    let book = section_config.create_book.then(|| {
        let mut reference = OutputRef::from_source_path(&join_path(&source_dir, "book.html"));
        reference.use_pretty_url = false;
        BookPage {
            section_key: section_config.key.clone(),
            title: title.clone(),
            reference,
        }
    });

    Ok(Some(WikiSection {
        key: section_config.key.clone(),
        title: title.clone(),
        source_dir,
        include_index_in_page_title: section_config.include_index_in_page_title,
        summary: SummaryPage {
            section_key: section_config.key.clone(),
            title,
            reference: summary_ref,
            body,
        },
        pages,
        book,
    }))
}
