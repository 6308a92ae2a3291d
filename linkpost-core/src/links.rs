//! Link extraction from a message body.

use crate::document::Document;

/// Collects link targets from the document's paragraphs, in paragraph order then link order.
/// Only links that are direct children of a top-level paragraph are considered.
pub fn extract_links(document: &Document) -> Vec<String> {
    document
        .paragraphs()
        .flat_map(|p| p.nodes.iter())
        .filter(|n| n.is_link())
        .filter_map(|n| n.href())
        .map(str::to_string)
        .collect()
}

/// First link in the document, if any.
pub fn first_link(document: &Document) -> Option<String> {
    extract_links(document).into_iter().next()
}
