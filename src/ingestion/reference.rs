//! Identifier Extractor
//!
//! Pulls the document key and node id out of a design link by pattern matching alone.
//! The input is not percent-decoded or normalised: a link whose segments are encoded
//! (`node-id=10%3A20`) is rejected.

use super::types::Identifiers;

use once_cell::sync::Lazy;
use regex::Regex;

static DOCUMENT_KEY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/file/([a-zA-Z0-9]+)").expect("document key pattern"));
static NODE_ID: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"node-id=(\d+-\d+)").expect("node id pattern"));

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InvalidReference {
    #[error("no /file/<key> segment in source URL")]
    MissingDocumentKey,
    #[error("no node-id=<n>-<m> parameter in source URL")]
    MissingNodeId,
}

/// Extracts `(document_key, node_id)` from `source_url`.
///
/// The patterns are matched independently anywhere in the string; the first match
/// of each wins.
pub fn extract(source_url: &str) -> Result<Identifiers, InvalidReference> {
    let document_key = first_capture(&DOCUMENT_KEY, source_url)
        .ok_or(InvalidReference::MissingDocumentKey)?;
    let node_id =
        first_capture(&NODE_ID, source_url).ok_or(InvalidReference::MissingNodeId)?;

    Ok(Identifiers {
        document_key: document_key.to_string(),
        node_id: node_id.to_string(),
    })
}

fn first_capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    pattern
        .captures(text)
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str())
}
