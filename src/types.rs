use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// An opaque commit hash.
///
/// Backed by `Arc<str>` rather than `String` so that the same hash can be
/// cheaply shared between a node's own identity, its entries in the
/// parent/child adjacency maps, and the `activeLanes` vector during lane
/// assignment, without re-allocating on every clone.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Hash(Arc<str>);

impl Hash {
    /// The first seven characters of the full hash, or the whole hash if
    /// it is shorter than that.
    pub fn short(&self) -> &str {
        let end = self.0.char_indices().nth(7).map(|(i, _)| i).unwrap_or(self.0.len());
        &self.0[..end]
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for Hash {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl From<String> for Hash {
    fn from(s: String) -> Self {
        Hash(Arc::from(s))
    }
}

impl From<&str> for Hash {
    fn from(s: &str) -> Self {
        Hash(Arc::from(s))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hash({})", self.short())
    }
}

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Hash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Hash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Hash::from(s))
    }
}

/// A committer or author timestamp. Opaque to the layout engine beyond
/// being totally ordered; never interpreted as wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Instant(pub i64);

/// One commit record as handed to the core by a host's commit-intake
/// collaborator. Field order of `parent_hashes` is significant: the first
/// entry is the mainline parent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitRecord {
    pub hash: String,
    pub parent_hashes: Vec<String>,
    pub committer_when: Instant,
    pub author_when: Instant,
    pub author_name: String,
    pub author_email: String,
    pub committer_name: String,
    pub committer_email: String,
    pub message: String,
    /// Opaque handle to the commit's tree, consulted only by an external
    /// diff collaborator. Never interpreted by this crate.
    pub tree_handle: Option<String>,
}

/// A commit after intake, before row/column assignment.
#[derive(Debug, Clone)]
pub struct RawNode {
    pub hash: Hash,
    pub parent_hashes: Vec<Hash>,
    pub committed_at: Instant,
    pub authored_at: Instant,
    pub author_name: String,
    pub author_email: String,
    pub committer_name: String,
    pub committer_email: String,
    pub message: String,
    pub tree_handle: Option<String>,
}

impl RawNode {
    /// The first parent hash, conventionally the branch a commit was made
    /// on. `None` for a root commit.
    pub fn mainline_parent(&self) -> Option<&Hash> {
        self.parent_hashes.first()
    }
}

/// A commit with its final row (`pos_y`) and column (`pos_x`) assigned by
/// lane assignment. Immutable: nothing downstream of [`crate::layout`] can
/// observe an unpositioned node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub hash: Hash,
    pub parent_hashes: Vec<Hash>,
    pub committed_at: Instant,
    pub authored_at: Instant,
    pub author_name: String,
    pub author_email: String,
    pub committer_name: String,
    pub committer_email: String,
    pub message: String,
    pub tree_handle: Option<String>,
    /// Row index; 0-based, equal to this node's index in the final
    /// ordered list.
    pub pos_y: usize,
    /// Column (lane) index; 0-based.
    pub pos_x: usize,
}

impl Node {
    /// Assemble a positioned node from a raw one plus the coordinates
    /// lane assignment computed for it. Consumes the raw node: once a
    /// `Node` exists, the `RawNode` it came from is gone.
    pub fn from_raw(raw: RawNode, pos_y: usize, pos_x: usize) -> Self {
        let RawNode {
            hash,
            parent_hashes,
            committed_at,
            authored_at,
            author_name,
            author_email,
            committer_name,
            committer_email,
            message,
            tree_handle,
        } = raw;
        Node {
            hash,
            parent_hashes,
            committed_at,
            authored_at,
            author_name,
            author_email,
            committer_name,
            committer_email,
            message,
            tree_handle,
            pos_y,
            pos_x,
        }
    }

    pub fn mainline_parent(&self) -> Option<&Hash> {
        self.parent_hashes.first()
    }
}

/// The kind of drawing directive a single [`EdgeSegment`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    /// A lane passing straight through a row without a node occupying it.
    Straight,
    /// A stub from a node up towards one of its children.
    Up,
    /// A stub from a node down towards one of its parents.
    Down,
    /// A horizontal leg towards a child in a lane to the right.
    Branch,
    /// A horizontal leg towards a parent in a lane to the right.
    Merge,
}

/// A single drawing directive attached to a row. `lane` is the column this
/// segment's vertical run belongs to (and the renderer's colour key);
/// `other_lane` additionally carries the column a `Branch`/`Merge`
/// horizontal leg reaches across to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSegment {
    pub kind: EdgeKind,
    pub lane: usize,
    pub other_lane: Option<usize>,
}

impl EdgeSegment {
    pub fn vertical(kind: EdgeKind, lane: usize) -> Self {
        debug_assert!(matches!(kind, EdgeKind::Straight | EdgeKind::Up | EdgeKind::Down));
        EdgeSegment { kind, lane, other_lane: None }
    }

    pub fn horizontal(kind: EdgeKind, lane: usize, other_lane: usize) -> Self {
        debug_assert!(matches!(kind, EdgeKind::Branch | EdgeKind::Merge));
        EdgeSegment { kind, lane, other_lane: Some(other_lane) }
    }
}

/// The row ordering policy. See `ordering` for the two implementations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortPolicy {
    /// Reverse-post-order DFS from oldest roots. Default.
    Topological,
    /// Best-first BFS from oldest roots, expanding by committer date.
    CommitDate,
}

impl Default for SortPolicy {
    fn default() -> Self {
        SortPolicy::Topological
    }
}

/// Configuration accepted by [`crate::calculate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculateOptions {
    pub sort: SortPolicy,
}
