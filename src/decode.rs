//! Decoding of the endpoint's XML payload into a [`ResultSet`].
//!
//! The decoder is deliberately lenient: the root element name is never
//! consulted, `item` elements are collected wherever they appear in the
//! document, and a missing child element yields an empty string rather than
//! an error. Only XML that fails to parse at all is rejected.

use roxmltree::{Document, Node};

use crate::error::SearchError;
use crate::results::{CompletionItem, ResultSet};

/// Decode an XML document into a result set, preserving document order.
pub fn decode_results(xml: &str) -> Result<ResultSet, SearchError> {
    let document =
        Document::parse(xml).map_err(|err| SearchError::Malformed(err.to_string()))?;

    let items: Vec<CompletionItem> = document
        .descendants()
        .filter(|node| node.has_tag_name("item"))
        .map(decode_item)
        .collect();

    tracing::debug!(items = items.len(), "decoded search response");
    Ok(ResultSet::new(items))
}

fn decode_item(node: Node<'_, '_>) -> CompletionItem {
    CompletionItem {
        completion: child_text(node, "completion"),
        doclength: child_text(node, "doclength"),
        percentage: child_text(node, "percentage"),
    }
}

/// Concatenated text content of the first child with the given name, or the
/// empty string when the child is absent.
fn child_text(node: Node<'_, '_>, name: &str) -> String {
    node.children()
        .find(|child| child.has_tag_name(name))
        .map(|child| {
            child
                .descendants()
                .filter(|descendant| descendant.is_text())
                .filter_map(|descendant| descendant.text())
                .collect()
        })
        .unwrap_or_default()
}
