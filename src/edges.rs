//! Component E: synthesise, for each row, the edge segments needed to
//! draw every parent/child relationship. Grounded in `gogigu/edge.go`'s
//! `calculateEdges`; a single pass, no retained state beyond the output
//! map (`spec.md` §4.E).

use std::collections::HashMap;

use crate::index::AdjacencyIndex;
use crate::types::{EdgeKind, EdgeSegment, Hash, Node};

/// Per-row edge segments. Row → ordered (but not otherwise meaningfully
/// ordered) sequence of segments.
pub type EdgesByRow = HashMap<usize, Vec<EdgeSegment>>;

/// Emit the full set of edge segments for a positioned node set.
pub fn synthesize(nodes: &[Node], index: &AdjacencyIndex) -> EdgesByRow {
    let mut edges: EdgesByRow = HashMap::with_capacity(nodes.len());
    for n in nodes {
        edges.entry(n.pos_y).or_default();
    }

    let position: HashMap<&Hash, (usize, usize)> =
        nodes.iter().map(|n| (&n.hash, (n.pos_y, n.pos_x))).collect();

    for n in nodes {
        for child_hash in index.children(&n.hash) {
            let &(child_pos_y, child_pos_x) = position
                .get(child_hash)
                .expect("every child in the adjacency index has a positioned node");

            edges.entry(n.pos_y).or_default().push(EdgeSegment::vertical(EdgeKind::Up, n.pos_x));

            if n.pos_x == child_pos_x {
                for y in (child_pos_y + 1)..n.pos_y {
                    edges.entry(y).or_default().push(EdgeSegment::vertical(EdgeKind::Straight, n.pos_x));
                }
            } else if n.pos_x < child_pos_x {
                edges
                    .entry(n.pos_y)
                    .or_default()
                    .push(EdgeSegment::horizontal(EdgeKind::Branch, child_pos_x, n.pos_x));
                for y in (child_pos_y + 1)..n.pos_y {
                    edges.entry(y).or_default().push(EdgeSegment::vertical(EdgeKind::Straight, child_pos_x));
                }
            }
            // n.pos_x > child_pos_x is covered symmetrically from the
            // parent side below.
        }

        for parent_hash in index.parents(&n.hash) {
            let &(parent_pos_y, parent_pos_x) = position
                .get(parent_hash)
                .expect("every parent in the adjacency index has a positioned node");

            edges.entry(n.pos_y).or_default().push(EdgeSegment::vertical(EdgeKind::Down, n.pos_x));

            if n.pos_x < parent_pos_x {
                edges
                    .entry(n.pos_y)
                    .or_default()
                    .push(EdgeSegment::horizontal(EdgeKind::Merge, parent_pos_x, n.pos_x));
                for y in (n.pos_y + 1)..parent_pos_y {
                    edges.entry(y).or_default().push(EdgeSegment::vertical(EdgeKind::Straight, parent_pos_x));
                }
            }
        }
    }

    edges
}
