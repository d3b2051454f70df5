use thiserror::Error;
use wrapbot_core::{Cell, Point};

/// Malformed polygon or cell data detected while building terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// The polygon has no vertices.
    #[error("polygon has no vertices")]
    EmptyPolygon,
    /// An edge is neither horizontal nor vertical.
    #[error("edge {from} -> {to} is not axis-aligned")]
    DiagonalEdge {
        /// First vertex of the edge.
        from: Point,
        /// Second vertex of the edge.
        to: Point,
    },
    /// A row is crossed by an odd number of vertical edges.
    #[error("row {y} is crossed by {count} edges, expected an even number")]
    OddCrossings {
        /// Offending row.
        y: i32,
        /// Number of crossings found.
        count: usize,
    },
    /// A pair of crossings does not open and close a span left to right.
    #[error("row {y} has a malformed span between x={x1} and x={x2}")]
    MalformedSpan {
        /// Offending row.
        y: i32,
        /// Left crossing of the pair.
        x1: i32,
        /// Right crossing of the pair.
        x2: i32,
    },
    /// A fill met a cell that did not hold the expected terrain.
    #[error("cannot fill {point}: expected {expected:?}, found {found:?}")]
    FillCollision {
        /// Cell being filled.
        point: Point,
        /// Terrain the fill may overwrite.
        expected: Cell,
        /// Terrain actually present, `None` outside the grid.
        found: Option<Cell>,
    },
    /// Tracing was asked for the outline of no cells.
    #[error("cannot trace the outline of an empty cell set")]
    EmptyShape,
    /// The cell set has a hole, several components, or a corner contact.
    #[error("cell set is not simply connected")]
    NotSimplyConnected,
}
