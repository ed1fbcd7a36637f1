//! Component F: the read-only bundle returned to a host once layout and
//! edge synthesis have run. Grounded in `gogigu.go`'s `Repository` type
//! (`Nodes`, `nodesMap`, `childrenMap`, `parentsMap`, `edgesMap`,
//! `maxPosX`), reshaped here as an immutable, `Send + Sync` facade rather
//! than the mutable struct `Calculate` builds incrementally in the
//! original.

use std::collections::HashMap;

use crate::edges::EdgesByRow;
use crate::index::AdjacencyIndex;
use crate::types::{EdgeSegment, Hash, Node};

/// A positioned, edge-annotated commit graph.
///
/// Everything on this type borrows from data owned by the `Repository`
/// itself; there is no interior mutability and no way to construct one
/// outside this crate except through [`crate::calculate`], so a
/// `Repository` handed to a host is guaranteed fully laid out.
#[derive(Debug)]
pub struct Repository {
    nodes: Vec<Node>,
    by_hash: HashMap<Hash, usize>,
    index: AdjacencyIndex,
    edges: EdgesByRow,
    max_pos_x: usize,
}

impl Repository {
    pub(crate) fn new(nodes: Vec<Node>, index: AdjacencyIndex, edges: EdgesByRow, max_pos_x: usize) -> Self {
        let by_hash = nodes.iter().enumerate().map(|(i, n)| (n.hash.clone(), i)).collect();
        Repository { nodes, by_hash, index, edges, max_pos_x }
    }

    /// The node for a given hash, if it was part of the input set.
    pub fn node(&self, hash: &Hash) -> Option<&Node> {
        self.by_hash.get(hash).map(|&i| &self.nodes[i])
    }

    /// Children of `hash`, in first-encountered order. Empty if `hash` is
    /// unknown or a head.
    pub fn children(&self, hash: &Hash) -> Vec<&Node> {
        self.index.children(hash).iter().filter_map(|h| self.node(h)).collect()
    }

    /// Parents of `hash`, mainline parent first. Empty if `hash` is
    /// unknown or a root.
    pub fn parents(&self, hash: &Hash) -> Vec<&Node> {
        self.index.parents(hash).iter().filter_map(|h| self.node(h)).collect()
    }

    /// The edge segments to draw on row `y`. Empty if `y` is out of range.
    pub fn edges(&self, y: usize) -> &[EdgeSegment] {
        self.edges.get(&y).map(Vec::as_slice).unwrap_or(&[])
    }

    /// All nodes, in row order (`nodes()[i].pos_y == i`).
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// The highest column index occupied by any node.
    pub fn max_pos_x(&self) -> usize {
        self.max_pos_x
    }
}
