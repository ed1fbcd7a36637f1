//! Component C: linearise the commit DAG into rows under one of two
//! policies. Grounded in `gogigu/sort.go`'s `dfsTopologicalSort` /
//! `bfsTopologicalSort`, reimplemented iteratively (no recursive closures)
//! so that deep histories cannot blow the stack (`spec.md` §9).

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::index::AdjacencyIndex;
use crate::types::{Hash, Instant, RawNode, SortPolicy};

/// Produce the row order of `nodes` under `policy`. The returned vector's
/// index becomes each node's `pos_y` in lane assignment.
pub fn order(nodes: Vec<RawNode>, index: &AdjacencyIndex, policy: SortPolicy) -> Vec<RawNode> {
    let mut sorted = nodes;
    // Pre-sort by committer timestamp ascending; `sort_by` is stable, so
    // ties keep their relative input order (spec.md §4.C).
    sorted.sort_by(|a, b| a.committed_at.cmp(&b.committed_at));

    match policy {
        SortPolicy::Topological => topological(sorted, index),
        SortPolicy::CommitDate => commit_date(sorted, index),
    }
}

/// Shared scaffolding: a hash-indexed store nodes are moved out of as they
/// are appended to the result, plus the pre-sorted seed sequence that
/// drives which node starts each fresh walk.
///
/// `committed_at` is kept in its own map, separate from `nodes`, because a
/// hash can still be queried for its timestamp (via `enqueue_children`)
/// after the node itself has been taken out of `nodes` and appended to the
/// output: a node may be reachable from more than one root (e.g. two
/// independent roots both parenting a shared descendant), and the queue
/// draining in `commit_date` can visit and take a node well before every
/// root that reaches it has been walked.
struct Store {
    seeds: Vec<Hash>,
    nodes: HashMap<Hash, RawNode>,
    committed_at: HashMap<Hash, Instant>,
}

impl Store {
    fn new(sorted: Vec<RawNode>) -> Self {
        let seeds = sorted.iter().map(|n| n.hash.clone()).collect();
        let committed_at = sorted.iter().map(|n| (n.hash.clone(), n.committed_at)).collect();
        let nodes = sorted.into_iter().map(|n| (n.hash.clone(), n)).collect();
        Store { seeds, nodes, committed_at }
    }

    fn take(&mut self, hash: &Hash) -> RawNode {
        self.nodes
            .remove(hash)
            .expect("ordering: seed/queue hash must exist in the raw node store")
    }

    fn committed_at(&self, hash: &Hash) -> Instant {
        *self
            .committed_at
            .get(hash)
            .expect("ordering: hash must be a node known to the store")
    }
}

/// Reverse-post-order DFS from each unvisited node in committer-time
/// order: walk through children first, then append the node once its
/// children are exhausted.
fn topological(sorted: Vec<RawNode>, index: &AdjacencyIndex) -> Vec<RawNode> {
    let mut store = Store::new(sorted);
    let seeds = store.seeds.clone();
    let mut visited: HashSet<Hash> = HashSet::with_capacity(seeds.len());
    let mut output = Vec::with_capacity(seeds.len());

    // Explicit DFS stack: each frame tracks which of the node's children
    // have already been pushed.
    let mut stack: Vec<(Hash, usize)> = Vec::new();

    for root in seeds {
        if visited.contains(&root) {
            continue;
        }
        visited.insert(root.clone());
        stack.push((root, 0));

        while let Some((hash, child_idx)) = stack.last().cloned() {
            let children = index.children(&hash);
            if child_idx < children.len() {
                stack.last_mut().unwrap().1 += 1;
                let child = children[child_idx].clone();
                if visited.insert(child.clone()) {
                    stack.push((child, 0));
                }
            } else {
                stack.pop();
                output.push(store.take(&hash));
            }
        }
    }

    output
}

/// An entry in the committer-date priority queue. Orders oldest-first; on
/// a tie, the entry enqueued earlier wins (resolves `spec.md` §9's open
/// question on tie-breaking deterministically, following the
/// insertion-counter technique used for date-ordered revision walks
/// elsewhere in the ecosystem).
struct QueueEntry {
    committed_at: Instant,
    insertion_ctr: u64,
    hash: Hash,
}

impl PartialEq for QueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.committed_at == other.committed_at && self.insertion_ctr == other.insertion_ctr
    }
}

impl Eq for QueueEntry {}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // BinaryHeap is a max-heap; reverse both comparisons so that the
        // oldest timestamp, and among ties the earliest insertion, sorts
        // as the greatest element and is therefore popped first.
        other
            .committed_at
            .cmp(&self.committed_at)
            .then_with(|| other.insertion_ctr.cmp(&self.insertion_ctr))
    }
}

/// Best-first BFS from each unvisited node in committer-time order. A
/// single priority queue is shared across the whole walk: expanding one
/// seed can pull in nodes reachable from a later seed's subgraph before
/// that seed is ever visited directly, exactly mirroring the shared-queue
/// recursion in `gogigu/sort.go`.
fn commit_date(sorted: Vec<RawNode>, index: &AdjacencyIndex) -> Vec<RawNode> {
    let mut store = Store::new(sorted);
    let seeds = store.seeds.clone();
    let mut visited: HashSet<Hash> = HashSet::with_capacity(seeds.len());
    let mut output = Vec::with_capacity(seeds.len());
    let mut queue: BinaryHeap<QueueEntry> = BinaryHeap::new();
    let mut insertion_ctr: u64 = 0;

    // Call stack simulating nested `bfs(n)` invocations, each blocked on
    // its own "drain the shared queue" loop until the queue is empty, at
    // which point every blocked frame resolves in one cascade (innermost
    // first) and appends itself.
    let mut stack: Vec<Hash> = Vec::new();

    for root in seeds {
        if visited.contains(&root) {
            continue;
        }
        visited.insert(root.clone());
        enqueue_children(&root, index, &store, &mut queue, &mut insertion_ctr);
        stack.push(root);

        loop {
            match queue.pop() {
                None => {
                    // Cascade: every blocked frame in this walk's call
                    // stack now resolves and appends itself, innermost
                    // first.
                    while let Some(hash) = stack.pop() {
                        output.push(store.take(&hash));
                    }
                    break;
                }
                Some(entry) => {
                    if visited.contains(&entry.hash) {
                        continue;
                    }
                    visited.insert(entry.hash.clone());
                    enqueue_children(&entry.hash, index, &store, &mut queue, &mut insertion_ctr);
                    stack.push(entry.hash);
                }
            }
        }
    }

    output
}

/// Push every child of `hash` onto the shared priority queue, stamping
/// each with the current insertion counter for deterministic tie-break.
fn enqueue_children(
    hash: &Hash,
    index: &AdjacencyIndex,
    store: &Store,
    queue: &mut BinaryHeap<QueueEntry>,
    insertion_ctr: &mut u64,
) {
    for child in index.children(hash) {
        queue.push(QueueEntry {
            committed_at: store.committed_at(child),
            insertion_ctr: *insertion_ctr,
            hash: child.clone(),
        });
        *insertion_ctr += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index;

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

    fn hashes(nodes: &[RawNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.hash.as_str()).collect()
    }

    #[test]
    fn topological_linear_chain() {
        // A <- B <- C, A oldest
        let nodes = vec![node("a", &[], 1), node("b", &["a"], 2), node("c", &["b"], 3)];
        let idx = index::build(&nodes);
        let ordered = order(nodes, &idx, SortPolicy::Topological);
        assert_eq!(hashes(&ordered), vec!["c", "b", "a"]);
    }

    #[test]
    fn commit_date_branch_and_merge_matches_spec_scenario() {
        // A root; B, C parent A; D parents [B, C] (B mainline).
        // Timestamps: A < B < C < D.
        let nodes = vec![
            node("a", &[], 1),
            node("b", &["a"], 2),
            node("c", &["a"], 3),
            node("d", &["b", "c"], 4),
        ];
        let idx = index::build(&nodes);
        let ordered = order(nodes, &idx, SortPolicy::CommitDate);
        assert_eq!(hashes(&ordered), vec!["d", "c", "b", "a"]);
    }

    #[test]
    fn two_independent_roots_both_present() {
        let nodes = vec![node("a", &[], 1), node("b", &["a"], 2), node("x", &[], 3), node("y", &["x"], 4)];
        let idx = index::build(&nodes);
        for policy in [SortPolicy::Topological, SortPolicy::CommitDate] {
            let ordered = order(nodes.clone(), &idx, policy);
            assert_eq!(ordered.len(), 4);
            let set: HashSet<&str> = hashes(&ordered).into_iter().collect();
            assert_eq!(set, HashSet::from(["a", "b", "x", "y"]));
        }
    }

    #[test]
    fn commit_date_two_independent_roots_converging_on_shared_child() {
        // m and a are both true roots (no parents); x parents both of
        // them. m is oldest, so its walk reaches and takes x out of the
        // store before a's walk ever starts; a's walk must still be able
        // to look up x's timestamp when re-enqueuing it (and find it
        // already visited) instead of panicking.
        let nodes = vec![node("m", &[], 1), node("a", &[], 2), node("x", &["a", "m"], 3)];
        let idx = index::build(&nodes);
        let ordered = order(nodes, &idx, SortPolicy::CommitDate);
        assert_eq!(ordered.len(), 3);
        let set: HashSet<&str> = hashes(&ordered).into_iter().collect();
        assert_eq!(set, HashSet::from(["m", "a", "x"]));
    }

    #[test]
    fn determinism_over_shuffled_input() {
        let forward = vec![node("a", &[], 1), node("b", &["a"], 2), node("c", &["a"], 2)];
        let shuffled = vec![node("c", &["a"], 2), node("a", &[], 1), node("b", &["a"], 2)];

        for policy in [SortPolicy::Topological, SortPolicy::CommitDate] {
            let idx_a = index::build(&forward);
            let idx_b = index::build(&shuffled);
            let out_a = order(forward.clone(), &idx_a, policy);
            let out_b = order(shuffled.clone(), &idx_b, policy);
            assert_eq!(hashes(&out_a), hashes(&out_b));
        }
    }
}
