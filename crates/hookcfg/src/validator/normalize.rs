//! Absent-value normalization
//!
//! Rewrites every absent value reachable through mappings into an empty
//! mapping. Merging a user configuration over the defaults then only ever sees
//! two mappings at a given key, never "nothing vs. a sub-tree".

use tracing::debug;

use crate::node::{ConfigDocument, ConfigMap, ConfigNode};

/// Return a copy of `node` with every absent value replaced by an empty mapping
///
/// Mappings are rebuilt with the same keys in the same order. Scalars and
/// sequences are copied as-is; sequence elements are not rewritten.
pub fn normalize(node: &ConfigNode) -> ConfigNode {
    match node {
        ConfigNode::Absent => ConfigNode::empty_mapping(),
        ConfigNode::Mapping(map) => ConfigNode::Mapping(normalize_map(map)),
        ConfigNode::Scalar(_) | ConfigNode::Sequence(_) => node.clone(),
    }
}

/// Normalize every top-level value of a document
pub fn normalize_document(document: &ConfigDocument) -> ConfigDocument {
    let absent = document.iter().any(|(_, value)| value.contains_absent());
    let normalized = ConfigDocument::from_map(normalize_map(document.as_map()));
    debug!(
        entries = normalized.len(),
        rewrote_absent = absent,
        "Normalized absent values"
    );
    normalized
}

fn normalize_map(map: &ConfigMap) -> ConfigMap {
    map.iter()
        .map(|(key, value)| (key.clone(), normalize(value)))
        .collect()
}
