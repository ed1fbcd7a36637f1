//! Component D: walk the row-ordered commits and assign each one a lane
//! (column). Grounded in `gogigu/pos.go`'s `calculatePositions` /
//! `filteredChildrenHashes` / `updateActiveNodes` / `decidePositionX`.

use crate::error::{GraphError, Result};
use crate::index::AdjacencyIndex;
use crate::types::{Hash, Node, RawNode};

/// Output of lane assignment: every node now has `pos_y`/`pos_x`, plus
/// the highest column index used by any node.
pub struct LaneAssignment {
    pub nodes: Vec<Node>,
    pub max_pos_x: usize,
}

/// Walk `ordered` (already row-ordered by [`crate::ordering`]) and assign
/// each node a column, maintaining the evolving `activeLanes` vector
/// described in `spec.md` §4.D.
pub fn assign(ordered: Vec<RawNode>, index: &AdjacencyIndex) -> Result<LaneAssignment> {
    let mut active_lanes: Vec<Hash> = Vec::new();
    let mut max_pos_x = 0usize;
    let mut nodes = Vec::with_capacity(ordered.len());

    for (pos_y, raw) in ordered.into_iter().enumerate() {
        let filtered_children = mainline_children(&raw.hash, index);

        if filtered_children.is_empty() {
            active_lanes.push(raw.hash.clone());
        } else {
            // Scan activeLanes left-to-right for the first entry whose
            // hash matches any of this node's mainline children.
            let matched = active_lanes.iter().find(|lane_hash| filtered_children.contains(lane_hash)).cloned();

            match matched {
                Some(matched) => {
                    let mut collapsed = Vec::with_capacity(active_lanes.len());
                    for lane_hash in active_lanes {
                        if lane_hash == matched {
                            collapsed.push(raw.hash.clone());
                        } else if !filtered_children.contains(&lane_hash) {
                            collapsed.push(lane_hash);
                        }
                        // else: this lane's mainline child is `n`; it
                        // collapses into the replaced entry above.
                    }
                    active_lanes = collapsed;
                }
                // None of this node's mainline children are currently
                // active (they were already retired). Appended to a
                // fresh rightmost lane; preserved as observed per
                // `spec.md` §9.
                None => active_lanes.push(raw.hash.clone()),
            }
        }

        let pos_x = active_lanes.iter().position(|h| *h == raw.hash).ok_or_else(|| {
            GraphError::Internal(format!("node {} not found in active lanes after assignment", raw.hash))
        })?;
        debug_assert!(pos_x < active_lanes.len());

        if pos_x > max_pos_x {
            max_pos_x = pos_x;
        }

        nodes.push(Node::from_raw(raw, pos_y, pos_x));
    }

    Ok(LaneAssignment { nodes, max_pos_x })
}

/// Children of `hash` whose mainline (first) parent is `hash` itself.
/// Restricts lane-reuse to the mainline edge; a non-mainline parent pulls
/// in a sideways merge rather than continuing a lane.
fn mainline_children(hash: &Hash, index: &AdjacencyIndex) -> Vec<Hash> {
    index
        .children(hash)
        .iter()
        .filter(|child| index.parents(child).first() == Some(hash))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index;
    use crate::ordering;
    use crate::types::{Instant, SortPolicy};

    fn node(hash: &str, parents: &[&str], when: i64) -> RawNode {
        RawNode {
            hash: Hash::from(hash),
            parent_hashes: parents.iter().map(|s| Hash::from(*s)).collect(),
            committed_at: Instant(when),
            authored_at: Instant(when),
            author_name: String::new(),
            author_email: String::new(),
            committer_name: String::new(),
            committer_email: String::new(),
            message: String::new(),
            tree_handle: None,
        }
    }

    fn by_hash<'a>(nodes: &'a [Node], hash: &str) -> &'a Node {
        nodes.iter().find(|n| n.hash.as_str() == hash).unwrap()
    }

    #[test]
    fn linear_chain_stays_on_lane_zero() {
        let nodes = vec![node("a", &[], 1), node("b", &["a"], 2), node("c", &["b"], 3)];
        let idx = index::build(&nodes);
        let ordered = ordering::order(nodes, &idx, SortPolicy::Topological);
        let result = assign(ordered, &idx).unwrap();
        assert_eq!(result.max_pos_x, 0);
        assert!(result.nodes.iter().all(|n| n.pos_x == 0));
    }

    #[test]
    fn branch_and_merge_assigns_distinct_lanes() {
        // A root; B, C parent A; D parents [B, C] (B mainline).
        let nodes = vec![
            node("a", &[], 1),
            node("b", &["a"], 2),
            node("c", &["a"], 3),
            node("d", &["b", "c"], 4),
        ];
        let idx = index::build(&nodes);
        let ordered = ordering::order(nodes, &idx, SortPolicy::CommitDate);
        let result = assign(ordered, &idx).unwrap();

        assert_eq!(by_hash(&result.nodes, "d").pos_x, 0);
        assert_eq!(by_hash(&result.nodes, "b").pos_x, 0);
        assert_eq!(by_hash(&result.nodes, "c").pos_x, 1);
        assert_eq!(by_hash(&result.nodes, "a").pos_x, 0);
        assert_eq!(result.max_pos_x, 1);
    }

    #[test]
    fn mainline_chain_preserves_lane_p3() {
        // c0 <- c1 <- c2 <- c3, each the mainline parent of the previous.
        let nodes = vec![
            node("c3", &[], 1),
            node("c2", &["c3"], 2),
            node("c1", &["c2"], 3),
            node("c0", &["c1"], 4),
        ];
        let idx = index::build(&nodes);
        for policy in [SortPolicy::Topological, SortPolicy::CommitDate] {
            let ordered = ordering::order(nodes.clone(), &idx, policy);
            let result = assign(ordered, &idx).unwrap();
            let lane = by_hash(&result.nodes, "c0").pos_x;
            for h in ["c1", "c2", "c3"] {
                assert_eq!(by_hash(&result.nodes, h).pos_x, lane);
            }
        }
    }

    #[test]
    fn row_bijection_p1_and_column_bound_p2() {
        let nodes = vec![
            node("a", &[], 1),
            node("b", &["a"], 2),
            node("c", &["a"], 3),
            node("d", &["b", "c"], 4),
            node("x", &[], 5),
        ];
        let idx = index::build(&nodes);
        let n = nodes.len();
        let ordered = ordering::order(nodes, &idx, SortPolicy::Topological);
        let result = assign(ordered, &idx).unwrap();

        let mut rows: Vec<usize> = result.nodes.iter().map(|n| n.pos_y).collect();
        rows.sort_unstable();
        assert_eq!(rows, (0..n).collect::<Vec<_>>());

        for node in &result.nodes {
            assert!(node.pos_x <= result.max_pos_x);
        }
        assert!(result.max_pos_x < n);
    }
}
