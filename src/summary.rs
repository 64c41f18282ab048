//! Summary document link extraction and rewriting.
//!
//! A section's summary is its table of contents: the anchors in the compiled
//! summary HTML define which pages the section contains and in what order.
//! This module is two pure passes over that HTML:
//!
//! 1. [`extract_links`] — every `<a href>` in document order, as
//!    `(display text, href)` pairs. Anchors pointing outside the site
//!    (absolute or protocol-relative hrefs) are skipped entirely; they are
//!    neither resolved nor counted toward page ordinals.
//! 2. [`rewrite_links`] — replace the i-th internal anchor's href with the
//!    resolved page's final URL, leaving external anchors and all other
//!    markup untouched. The result becomes the summary page's body.
//!
//! Both passes run on quick-xml's streaming events with end-name checking
//! relaxed, which handles markdown-compiled output and hand-written XHTML
//! alike. No DOM is built.

use crate::reference::is_external;
use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SummaryError {
    #[error("Summary markup error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("Summary write error: {0}")]
    Io(#[from] std::io::Error),
}

/// One internal link extracted from a summary document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLink {
    /// Anchor display text, whitespace-trimmed, entities unescaped.
    pub text: String,
    /// The href exactly as written in the summary.
    pub href: String,
}

fn href_of(e: &BytesStart) -> Option<String> {
    e.attributes().flatten().find_map(|attr| {
        if attr.key.as_ref() == b"href" {
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            Some(unescape(&raw).map(|s| s.into_owned()).unwrap_or(raw))
        } else {
            None
        }
    })
}

/// Extract internal links from compiled summary HTML, in document order.
pub fn extract_links(html: &str) -> Result<Vec<SummaryLink>, SummaryError> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;

    let mut links = Vec::new();
    // href of the currently open anchor; anchors do not nest in HTML
    let mut open_href: Option<String> = None;
    let mut text = String::new();

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"a" => {
                if let Some(href) = href_of(&e) {
                    open_href = Some(href);
                    text.clear();
                }
            }
            Event::Empty(e) if e.local_name().as_ref() == b"a" => {
                if let Some(href) = href_of(&e)
                    && !is_external(&href)
                {
                    links.push(SummaryLink {
                        text: String::new(),
                        href,
                    });
                }
            }
            Event::End(e) if e.local_name().as_ref() == b"a" => {
                if let Some(href) = open_href.take()
                    && !is_external(&href)
                {
                    links.push(SummaryLink {
                        text: text.trim().to_string(),
                        href,
                    });
                }
            }
            Event::Text(e) => {
                if open_href.is_some() {
                    let raw = String::from_utf8_lossy(e.as_ref()).into_owned();
                    text.push_str(&unescape(&raw).map(|s| s.into_owned()).unwrap_or(raw));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(links)
}

/// Rewrite the i-th internal anchor's href to `urls[i]`.
///
/// Anchors past the end of `urls` and external anchors pass through
/// unchanged. All other events round-trip verbatim.
pub fn rewrite_links(html: &str, urls: &[String]) -> Result<String, SummaryError> {
    let mut reader = Reader::from_str(html);
    reader.config_mut().check_end_names = false;
    let mut writer = Writer::new(Vec::new());

    let mut internal_seen = 0usize;

    loop {
        match reader.read_event()? {
            Event::Start(e) if e.local_name().as_ref() == b"a" => {
                let e = rewrite_anchor(e, urls, &mut internal_seen);
                writer.write_event(Event::Start(e))?;
            }
            Event::Empty(e) if e.local_name().as_ref() == b"a" => {
                let e = rewrite_anchor(e, urls, &mut internal_seen);
                writer.write_event(Event::Empty(e))?;
            }
            Event::Eof => break,
            other => writer.write_event(other)?,
        }
    }

    Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
}

/// Replace an anchor's href with the next URL when it is the next internal
/// link; external anchors and anchors without an href pass through.
fn rewrite_anchor<'a>(e: BytesStart<'a>, urls: &[String], seen: &mut usize) -> BytesStart<'a> {
    let Some(href) = href_of(&e) else { return e };
    if is_external(&href) {
        return e;
    }
    let url = urls.get(*seen).cloned();
    *seen += 1;
    let Some(url) = url else { return e };

    let mut replaced = BytesStart::new("a");
    for attr in e.attributes().flatten() {
        if attr.key.as_ref() == b"href" {
            replaced.push_attribute(("href", url.as_str()));
        } else {
            replaced.push_attribute(attr);
        }
    }
    replaced
}
