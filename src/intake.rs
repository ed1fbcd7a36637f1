//! Component A: normalise externally supplied commit records into
//! [`RawNode`]s indexed by hash.

use std::collections::HashSet;

use crate::error::{GraphError, Result};
use crate::types::{CommitRecord, Hash, RawNode};

/// Drain `records` into a unique [`RawNode`] per hash.
///
/// The iterator is pulled eagerly to exhaustion here: nothing downstream
/// of intake ever touches the host's iterator again (see `spec.md` §5).
///
/// Fails with [`GraphError::InvalidInput`] on an empty hash or a hash that
/// collides with one already seen. Input order is otherwise preserved;
/// row-ordering (component C) is responsible for any re-sorting.
pub fn collect(records: impl IntoIterator<Item = CommitRecord>) -> Result<Vec<RawNode>> {
    let mut seen = HashSet::new();
    let mut nodes = Vec::new();

    for record in records {
        if record.hash.is_empty() {
            return Err(GraphError::InvalidInput("commit hash must not be empty".to_string()));
        }
        if !seen.insert(record.hash.clone()) {
            return Err(GraphError::InvalidInput(format!(
                "duplicate commit hash: {}",
                record.hash
            )));
        }

        let parent_hashes: Vec<Hash> = record.parent_hashes.into_iter().map(Hash::from).collect();

        nodes.push(RawNode {
            hash: Hash::from(record.hash),
            parent_hashes,
            committed_at: record.committer_when,
            authored_at: record.author_when,
            author_name: record.author_name,
            author_email: record.author_email,
            committer_name: record.committer_name,
            committer_email: record.committer_email,
            message: record.message,
            tree_handle: record.tree_handle,
        });
    }

    Ok(nodes)
}
