//! Batch release detection

use crate::pipeline::document::DocNode;

/// Decides whether an episode anchor points at a batch release
///
/// The anchor's rendered text and its immediate container's rendered text
/// are joined, lowercased and searched for `keyword` (also lowercased).
/// Only one parent level is looked at.
pub fn is_batch(anchor: DocNode<'_>, keyword: &str) -> bool {
    let own = anchor.rendered_text();
    let container = anchor
        .parent()
        .map(|parent| parent.rendered_text())
        .unwrap_or_default();

    let combined = format!("{} {}", own, container).to_lowercase();
    combined.contains(&keyword.to_lowercase())
}
