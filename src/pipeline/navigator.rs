//! Link and heading extraction over a parsed [`Document`]
//!
//! Listing pages on the target site group episode links under loosely
//! structured headings, e.g.
//!
//! ```html
//! <h3>Episode 05 [720p]</h3>
//! <p><strong><a href="https://episodes.modpro.blog/...">Download</a></strong></p>
//! ```
//!
//! so the heading is found by walking backwards through the tree rather than
//! by selector.

use crate::model::DownloadLink;
use crate::pipeline::document::{DocNode, Document, NodeKind};
use crate::url::matches_any_prefix;

/// Inline tags unwrapped before looking for the block that holds a link
const INLINE_WRAPPERS: &[&str] = &["a", "span", "strong", "em"];

/// Headings must be longer than this many characters once trimmed
const MIN_HEADING_CHARS: usize = 3;

/// An episode anchor found on the main page
#[derive(Debug, Clone)]
pub struct Anchor<'a> {
    pub node: DocNode<'a>,
    pub href: String,
    pub text: String,
}

/// Finds every anchor whose href starts with one of `prefixes`
///
/// Matching is case-insensitive and ignores trailing slashes on both sides.
/// Anchors are returned in document order.
pub fn find_entry_anchors<'a, S: AsRef<str>>(
    document: &'a Document,
    prefixes: &[S],
) -> Vec<Anchor<'a>> {
    document
        .anchors()
        .into_iter()
        .filter_map(|node| {
            let href = node.attr("href")?;
            if !matches_any_prefix(href, prefixes) {
                return None;
            }
            Some(Anchor {
                node,
                href: href.to_string(),
                text: anchor_text(node),
            })
        })
        .collect()
}

/// Display text of an anchor, falling back to its container's text when empty
///
/// Image-only links (`<a><img></a>`) render no text of their own; the
/// container usually names them.
pub fn anchor_text(anchor: DocNode<'_>) -> String {
    let own = anchor.rendered_text();
    if !own.is_empty() {
        return own;
    }

    anchor
        .parent()
        .map(|parent| parent.rendered_text())
        .unwrap_or_default()
}

/// Finds the heading text that precedes an anchor
///
/// # Algorithm
///
/// 1. Unwrap inline wrappers (`a`, `span`, `strong`, `em`) around the anchor;
///    the parent of the outermost wrapper is the block container.
/// 2. Walk the block container's preceding siblings, nearest first. Elements
///    contribute their rendered text, text nodes their trimmed content.
/// 3. The first candidate longer than 3 characters is the heading.
/// 4. If nothing qualifies, repeat step 2 from the container's parent.
///
/// Returns `None` when neither level yields a candidate.
pub fn find_preceding_heading(anchor: DocNode<'_>) -> Option<String> {
    let mut wrapper = anchor;
    while let Some(parent) = wrapper.parent() {
        if !parent.is_element_in(INLINE_WRAPPERS) {
            break;
        }
        wrapper = parent;
    }

    let block = wrapper.parent()?;

    heading_before(block).or_else(|| block.parent().and_then(heading_before))
}

fn heading_before(node: DocNode<'_>) -> Option<String> {
    node.prev_siblings().find_map(heading_candidate)
}

fn heading_candidate(node: DocNode<'_>) -> Option<String> {
    let text = match node.kind() {
        NodeKind::Element(_) => node.rendered_text(),
        NodeKind::Text(raw) => raw.trim().to_string(),
        NodeKind::Other => return None,
    };

    (text.chars().count() > MIN_HEADING_CHARS).then_some(text)
}

/// Finds download links on an episode page
///
/// An anchor qualifies when its raw href starts with `prefix`. Links are
/// returned in document order with their rendered text.
pub fn find_download_links(document: &Document, prefix: &str) -> Vec<DownloadLink> {
    document
        .anchors()
        .into_iter()
        .filter_map(|node| {
            let href = node.attr("href")?;
            href.starts_with(prefix).then(|| DownloadLink {
                url: href.to_string(),
                text: node.rendered_text(),
            })
        })
        .collect()
}
