//! Deterministic commit-graph layout: turns a set of commit records into a
//! row/column-positioned graph plus the edge segments needed to render it
//! as a railway-style history view.
//!
//! The pipeline is a straight line through six components, each its own
//! module: [`intake`] normalises host input, [`index`] builds the
//! parent/child adjacency, [`ordering`] linearises the DAG into rows,
//! [`layout`] assigns each row a column, [`edges`] synthesises the
//! segments connecting them, and [`facade`] bundles the result behind a
//! read-only [`Repository`].

pub mod edges;
pub mod error;
pub mod facade;
pub mod index;
pub mod intake;
pub mod layout;
pub mod ordering;
pub mod types;

pub use error::{GraphError, Result};
pub use facade::Repository;
pub use types::{
    CalculateOptions, CommitRecord, EdgeKind, EdgeSegment, Hash, Instant, Node, RawNode, SortPolicy,
};

/// Run the full layout pipeline over a set of commit records.
///
/// `records` is drained eagerly and in full before any ordering or layout
/// work begins (see [`intake::collect`]). The returned [`Repository`] is
/// immutable and independent of the input iterator.
pub fn calculate(
    records: impl IntoIterator<Item = CommitRecord>,
    options: CalculateOptions,
) -> Result<Repository> {
    let raw_nodes = intake::collect(records)?;
    let adjacency = index::build(&raw_nodes);
    let ordered = ordering::order(raw_nodes, &adjacency, options.sort);
    let assignment = layout::assign(ordered, &adjacency)?;
    let edges = edges::synthesize(&assignment.nodes, &adjacency);
    Ok(Repository::new(assignment.nodes, adjacency, edges, assignment.max_pos_x))
}
