//! Component B: build the forward (parent) and reverse (child) adjacency
//! maps over a set of [`RawNode`]s, tolerating dangling parents and
//! self-loops.

use std::collections::HashMap;

use crate::types::{Hash, RawNode};

/// Forward/reverse adjacency over a fixed set of commit hashes.
///
/// Built once, read many times by ordering, lane assignment, and the
/// final facade. A parent hash with no corresponding node (a shallow
/// clone, a filtered history) is silently absent from both maps; a
/// self-loop is likewise dropped. Both cases are logged via `tracing` at
/// build time, never surfaced as an error (`spec.md` §4.B, §7.2).
#[derive(Debug, Default)]
pub struct AdjacencyIndex {
    parents: HashMap<Hash, Vec<Hash>>,
    children: HashMap<Hash, Vec<Hash>>,
}

impl AdjacencyIndex {
    /// Parent hashes of `hash`, in the order supplied by the commit
    /// record (first entry is the mainline parent). Empty if `hash` is
    /// unknown or has no present parents.
    pub fn parents(&self, hash: &Hash) -> &[Hash] {
        self.parents.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Child hashes of `hash`, in first-encountered order. Empty if
    /// `hash` is unknown or has no children in the set.
    pub fn children(&self, hash: &Hash) -> &[Hash] {
        self.children.get(hash).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Build the adjacency index from a raw node set.
pub fn build(nodes: &[RawNode]) -> AdjacencyIndex {
    let present: std::collections::HashSet<&Hash> = nodes.iter().map(|n| &n.hash).collect();

    let mut parents: HashMap<Hash, Vec<Hash>> = HashMap::with_capacity(nodes.len());
    let mut children: HashMap<Hash, Vec<Hash>> = HashMap::with_capacity(nodes.len());

    for node in nodes {
        let entry = parents.entry(node.hash.clone()).or_default();
        for parent_hash in &node.parent_hashes {
            if *parent_hash == node.hash {
                tracing::warn!(hash = %node.hash, "self-loop in parent hashes, skipping");
                continue;
            }
            if !present.contains(parent_hash) {
                tracing::warn!(
                    child = %node.hash,
                    parent = %parent_hash,
                    "dangling parent reference, skipping"
                );
                continue;
            }
            entry.push(parent_hash.clone());
            children
                .entry(parent_hash.clone())
                .or_default()
                .push(node.hash.clone());
        }
    }

    AdjacencyIndex { parents, children }
}
