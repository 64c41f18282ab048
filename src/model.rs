//! The wiki content model.
//!
//! Built once by the index stage and read-only afterward. The model is fully
//! owned data — it serializes to `manifest.json` between the index and
//! generate stages.
//!
//! ## Navigation chain ownership
//!
//! Content pages form a doubly-linked previous/next sequence, but no page
//! holds a reference to another: each [`WikiSection`] owns its pages as an
//! ordered vector (position = ordinal - 1) and exposes the chain as the
//! derived accessors [`WikiSection::previous_of`] / [`WikiSection::next_of`].
//! The relation is acyclic and mutually consistent by construction — there
//! are no cross-references to keep in sync.

use crate::reference::{OutputRef, RenderMode, join_path, normalize_path};
use serde::{Deserialize, Serialize};

/// A content page within a section's navigation chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiPage {
    /// Display title: anchor text, optionally prefixed with the ordinal.
    pub title: String,
    /// Key of the owning section.
    pub section_key: String,
    /// 1-based position within the section chain.
    pub ordinal: usize,
    /// Final output location.
    pub reference: OutputRef,
    /// Compiled HTML body.
    pub body: String,
    /// True when the link target was missing and this page is an empty
    /// synthesized stand-in.
    pub placeholder: bool,
    /// Source file relative to the content root. For placeholders this is
    /// where the file would live.
    pub source: String,
}

/// A section's table-of-contents page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryPage {
    pub section_key: String,
    /// Section title (front matter > cased key > "Wiki").
    pub title: String,
    pub reference: OutputRef,
    /// Rewritten TOC HTML: internal hrefs point at final page URLs.
    pub body: String,
}

/// Consolidated single-document artifact for a section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookPage {
    pub section_key: String,
    pub title: String,
    /// Exact (non-pretty) reference; books are addressed as a single file.
    pub reference: OutputRef,
}

/// Cross-section index page, present when more than one section resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionsPage {
    pub title: String,
    pub reference: OutputRef,
    /// Empty at index time; the generate stage fills it from the section
    /// list.
    pub body: String,
}

/// One configured wiki section with its resolved page chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiSection {
    /// Section key (empty = default section).
    pub key: String,
    /// Display title.
    pub title: String,
    /// Directory relative to the content root where this section's pages
    /// are authored.
    pub source_dir: String,
    pub include_index_in_page_title: bool,
    pub summary: SummaryPage,
    /// Content pages in ordinal order (`pages[i].ordinal == i + 1`).
    pub pages: Vec<WikiPage>,
    pub book: Option<BookPage>,
}

impl WikiSection {
    /// Page by 1-based ordinal.
    pub fn page(&self, ordinal: usize) -> Option<&WikiPage> {
        self.pages.get(ordinal.checked_sub(1)?)
    }

    /// The page before the given ordinal, if any.
    pub fn previous_of(&self, ordinal: usize) -> Option<&WikiPage> {
        if ordinal <= 1 {
            None
        } else {
            self.page(ordinal - 1)
        }
    }

    /// The page after the given ordinal, if any.
    pub fn next_of(&self, ordinal: usize) -> Option<&WikiPage> {
        self.page(ordinal + 1)
    }
}

/// What kind of page a flattened descriptor refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageKind {
    Summary,
    Wiki,
    Book,
    Sections,
}

/// Flattened page surface handed to the generate stage and the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageDescriptor {
    pub kind: PageKind,
    pub title: String,
    pub section_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordinal: Option<usize>,
    pub url: String,
    pub render_mode: RenderMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_url: Option<String>,
    /// Source file relative to the content root, absent for pages with no
    /// authored source (book, cross-section index).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// A navigable grouping of pages exposed for site-wide menus and the CMS
/// admin config. Closed set of variants; consumers match exhaustively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Collection {
    /// A fixed set of existing pages (one per section: summary + content).
    File {
        key: String,
        title: String,
        pages: Vec<PageDescriptor>,
    },
    /// An authorable directory where new pages may be created.
    Folder {
        key: String,
        title: String,
        folder: String,
        can_create: bool,
    },
    /// Synthesized stand-in resources awaiting authoring (missing link
    /// targets).
    Resource {
        key: String,
        title: String,
        resources: Vec<String>,
    },
}

/// Aggregate of all resolved sections.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WikiModel {
    /// Sections in config order. Keys are unique.
    pub sections: Vec<WikiSection>,
    /// Cross-section index, present iff more than one section resolved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sections_page: Option<SectionsPage>,
}

impl WikiModel {
    /// Aggregate resolved sections. With more than one section, a
    /// cross-section index page is created at the wiki root and becomes
    /// every summary's structural parent.
    pub fn initialize(sections: Vec<WikiSection>, base_dir: &str, site_title: &str) -> Self {
        let sections_page = if sections.len() > 1 {
            let mut reference = OutputRef {
                path: normalize_path(base_dir),
                file_name: "wiki".to_string(),
                extension: "md".to_string(),
                use_pretty_url: true,
                directory_index: false,
            };
            reference.set_directory_index();
            Some(SectionsPage {
                title: site_title.to_string(),
                reference,
                body: String::new(),
            })
        } else {
            None
        };
        WikiModel {
            sections,
            sections_page,
        }
    }

    /// Section lookup by key.
    pub fn section(&self, key: &str) -> Option<&WikiSection> {
        self.sections.iter().find(|s| s.key == key)
    }

    /// All pages built during indexing, in section-then-ordinal order:
    /// summary + content pages + book per section, then the cross-section
    /// index.
    pub fn all_pages(&self, base_url: &str) -> Vec<PageDescriptor> {
        let mut pages = Vec::new();
        let sections_url = self
            .sections_page
            .as_ref()
            .map(|p| p.reference.url(base_url));

        for section in &self.sections {
            let summary_url = section.summary.reference.url(base_url);
            pages.push(PageDescriptor {
                kind: PageKind::Summary,
                title: section.summary.title.clone(),
                section_key: section.key.clone(),
                ordinal: None,
                url: summary_url.clone(),
                render_mode: RenderMode::Template,
                previous_url: None,
                next_url: None,
                parent_url: sections_url.clone(),
                source: Some(section.summary.reference.source_file()),
            });
            for page in &section.pages {
                pages.push(PageDescriptor {
                    kind: PageKind::Wiki,
                    title: page.title.clone(),
                    section_key: section.key.clone(),
                    ordinal: Some(page.ordinal),
                    url: page.reference.url(base_url),
                    render_mode: RenderMode::Template,
                    previous_url: section
                        .previous_of(page.ordinal)
                        .map(|p| p.reference.url(base_url)),
                    next_url: section
                        .next_of(page.ordinal)
                        .map(|p| p.reference.url(base_url)),
                    parent_url: Some(summary_url.clone()),
                    source: Some(page.source.clone()),
                });
            }
            if let Some(book) = &section.book {
                pages.push(PageDescriptor {
                    kind: PageKind::Book,
                    title: book.title.clone(),
                    section_key: section.key.clone(),
                    ordinal: None,
                    url: book.reference.url(base_url),
                    render_mode: RenderMode::Raw,
                    previous_url: None,
                    next_url: None,
                    parent_url: Some(summary_url),
                    source: None,
                });
            }
        }

        if let Some(sections_page) = &self.sections_page {
            pages.push(PageDescriptor {
                kind: PageKind::Sections,
                title: sections_page.title.clone(),
                section_key: String::new(),
                ordinal: None,
                url: sections_page.reference.url(base_url),
                render_mode: RenderMode::Template,
                previous_url: None,
                next_url: None,
                parent_url: None,
                source: None,
            });
        }

        pages
    }

    /// One navigable grouping per section for site-wide menus, plus the
    /// authoring-oriented groupings consumed by the CMS emitter.
    pub fn collections(&self, base_url: &str) -> Vec<Collection> {
        let mut collections = Vec::new();
        for section in &self.sections {
            let summary_url = section.summary.reference.url(base_url);
            let mut pages = vec![PageDescriptor {
                kind: PageKind::Summary,
                title: section.summary.title.clone(),
                section_key: section.key.clone(),
                ordinal: None,
                url: summary_url.clone(),
                render_mode: RenderMode::Template,
                previous_url: None,
                next_url: None,
                parent_url: None,
                source: Some(section.summary.reference.source_file()),
            }];
            for page in &section.pages {
                pages.push(PageDescriptor {
                    kind: PageKind::Wiki,
                    title: page.title.clone(),
                    section_key: section.key.clone(),
                    ordinal: Some(page.ordinal),
                    url: page.reference.url(base_url),
                    render_mode: RenderMode::Template,
                    previous_url: None,
                    next_url: None,
                    parent_url: Some(summary_url.clone()),
                    source: Some(page.source.clone()),
                });
            }
            collections.push(Collection::File {
                key: section.key.clone(),
                title: section.title.clone(),
                pages,
            });
            collections.push(Collection::Folder {
                key: section.key.clone(),
                title: section.title.clone(),
                folder: section.source_dir.clone(),
                can_create: true,
            });
            let missing: Vec<String> = section
                .pages
                .iter()
                .filter(|p| p.placeholder)
                .map(|p| p.source.clone())
                .collect();
            if !missing.is_empty() {
                collections.push(Collection::Resource {
                    key: section.key.clone(),
                    title: section.title.clone(),
                    resources: missing,
                });
            }
        }
        collections
    }
}

/// Source directory of a section relative to the content root.
pub fn section_source_dir(base_dir: &str, key: &str) -> String {
    join_path(base_dir, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_page(key: &str, ordinal: usize, placeholder: bool) -> WikiPage {
        let source = format!("{key}/page-{ordinal}.md");
        WikiPage {
            title: format!("Page {ordinal}"),
            section_key: key.to_string(),
            ordinal,
            reference: OutputRef::from_source_path(&source),
            body: format!("<p>page {ordinal}</p>"),
            placeholder,
            source,
        }
    }

    fn make_section(key: &str, page_count: usize, with_book: bool) -> WikiSection {
        let mut summary_ref = OutputRef::from_source_path(&format!("{key}/summary.md"));
        summary_ref.set_directory_index();
        WikiSection {
            key: key.to_string(),
            title: crate::naming::display_title(key),
            source_dir: key.to_string(),
            include_index_in_page_title: false,
            summary: SummaryPage {
                section_key: key.to_string(),
                title: crate::naming::display_title(key),
                reference: summary_ref,
                body: "<ul></ul>".to_string(),
            },
            pages: (1..=page_count).map(|i| make_page(key, i, false)).collect(),
            book: with_book.then(|| {
                let mut reference = OutputRef::from_source_path(&format!("{key}/book.html"));
                reference.use_pretty_url = false;
                BookPage {
                    section_key: key.to_string(),
                    title: crate::naming::display_title(key),
                    reference,
                }
            }),
        }
    }

    #[test]
    fn chain_accessors_are_mutually_consistent() {
        let section = make_section("guide", 4, false);
        for page in &section.pages {
            if let Some(next) = section.next_of(page.ordinal) {
                let back = section.previous_of(next.ordinal).unwrap();
                assert_eq!(back.ordinal, page.ordinal);
            }
            if let Some(prev) = section.previous_of(page.ordinal) {
                let forward = section.next_of(prev.ordinal).unwrap();
                assert_eq!(forward.ordinal, page.ordinal);
            }
        }
    }

    #[test]
    fn chain_boundaries_are_open() {
        let section = make_section("guide", 3, false);
        assert!(section.previous_of(1).is_none());
        assert!(section.next_of(3).is_none());
        assert_eq!(section.previous_of(2).unwrap().ordinal, 1);
        assert_eq!(section.next_of(2).unwrap().ordinal, 3);
    }

    #[test]
    fn ordinals_are_dense_from_one() {
        let section = make_section("guide", 5, false);
        let ordinals: Vec<usize> = section.pages.iter().map(|p| p.ordinal).collect();
        assert_eq!(ordinals, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn sections_page_only_with_multiple_sections() {
        let one = WikiModel::initialize(vec![make_section("a", 1, false)], "wiki", "Wiki");
        assert!(one.sections_page.is_none());

        let two = WikiModel::initialize(
            vec![make_section("a", 1, false), make_section("b", 1, false)],
            "wiki",
            "Wiki",
        );
        let page = two.sections_page.as_ref().unwrap();
        assert_eq!(page.reference.url(""), "/wiki/");
        assert!(page.body.is_empty());
    }

    #[test]
    fn all_pages_in_section_then_ordinal_order() {
        let model = WikiModel::initialize(
            vec![make_section("a", 2, true), make_section("b", 1, false)],
            "",
            "Wiki",
        );
        let kinds: Vec<(PageKind, String)> = model
            .all_pages("")
            .iter()
            .map(|p| (p.kind, p.section_key.clone()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                (PageKind::Summary, "a".to_string()),
                (PageKind::Wiki, "a".to_string()),
                (PageKind::Wiki, "a".to_string()),
                (PageKind::Book, "a".to_string()),
                (PageKind::Summary, "b".to_string()),
                (PageKind::Wiki, "b".to_string()),
                (PageKind::Sections, "".to_string()),
            ]
        );
    }

    #[test]
    fn summaries_parent_to_sections_page_when_present() {
        let model = WikiModel::initialize(
            vec![make_section("a", 1, false), make_section("b", 1, false)],
            "",
            "Wiki",
        );
        let pages = model.all_pages("");
        let summary = pages.iter().find(|p| p.kind == PageKind::Summary).unwrap();
        assert_eq!(summary.parent_url.as_deref(), Some("/"));
    }

    #[test]
    fn single_section_summary_has_no_parent() {
        let model = WikiModel::initialize(vec![make_section("a", 1, false)], "", "Wiki");
        let pages = model.all_pages("");
        let summary = pages.iter().find(|p| p.kind == PageKind::Summary).unwrap();
        assert!(summary.parent_url.is_none());
    }

    #[test]
    fn wiki_pages_carry_navigation_urls() {
        let model = WikiModel::initialize(vec![make_section("a", 3, false)], "", "Wiki");
        let pages = model.all_pages("");
        let middle = pages
            .iter()
            .find(|p| p.ordinal == Some(2))
            .unwrap();
        assert_eq!(middle.previous_url.as_deref(), Some("/a/page-1/"));
        assert_eq!(middle.next_url.as_deref(), Some("/a/page-3/"));
        assert_eq!(middle.parent_url.as_deref(), Some("/a/"));
    }

    #[test]
    fn book_renders_raw_at_exact_url() {
        let model = WikiModel::initialize(vec![make_section("a", 1, true)], "", "Wiki");
        let pages = model.all_pages("");
        let book = pages.iter().find(|p| p.kind == PageKind::Book).unwrap();
        assert_eq!(book.render_mode, RenderMode::Raw);
        assert_eq!(book.url, "/a/book.html");
    }

    #[test]
    fn collections_cover_all_variants() {
        let mut section = make_section("a", 2, false);
        section.pages[1].placeholder = true;
        let model = WikiModel::initialize(vec![section], "", "Wiki");
        let collections = model.collections("");

        assert!(matches!(&collections[0], Collection::File { pages, .. } if pages.len() == 3));
        assert!(
            matches!(&collections[1], Collection::Folder { folder, can_create, .. } if folder == "a" && *can_create)
        );
        assert!(
            matches!(&collections[2], Collection::Resource { resources, .. } if resources == &vec!["a/page-2.md".to_string()])
        );
    }

    #[test]
    fn no_resource_collection_without_placeholders() {
        let model = WikiModel::initialize(vec![make_section("a", 2, false)], "", "Wiki");
        let collections = model.collections("");
        assert_eq!(collections.len(), 2);
    }

    #[test]
    fn section_lookup_by_key() {
        let model = WikiModel::initialize(
            vec![make_section("a", 1, false), make_section("b", 1, false)],
            "",
            "Wiki",
        );
        assert_eq!(model.section("b").unwrap().title, "B");
        assert!(model.section("zzz").is_none());
    }
}
