use std::{error, fmt};

use backtrace::Backtrace;
use thiserror::Error;

/// Identifies one loop of a [PolygonList](crate::PolygonList)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ring {
    /// The outer boundary of a [PolygonWithHoles](crate::PolygonWithHoles)
    Outer,
    /// The hole at this position in [PolygonWithHoles::holes](crate::PolygonWithHoles::holes)
    Hole(usize),
    /// The loop at this position in [PolygonalArea::loops](crate::PolygonalArea::loops)
    Loop(usize),
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Outer => write!(f, "outer loop"),
            Self::Hole(hole) => write!(f, "hole {}", hole),
            Self::Loop(ring) => write!(f, "loop {}", ring),
        }
    }
}

/// Describes why the input loops do not form a valid polygon with holes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum InvalidGeometry {
    /// A loop has fewer than 3 vertices
    #[error("{ring} only contains {count} vertices")]
    NotEnoughVertices { ring: Ring, count: usize },
    /// A loop refers to a vertex index past the end of the vertex list
    #[error("{ring} refers to vertex {vertex}, but only {vertex_count} vertices were provided")]
    VertexOutOfRange { ring: Ring, vertex: usize, vertex_count: usize },
    /// A vertex has a NaN or infinite coordinate
    #[error("vertex {vertex} has a non-finite coordinate")]
    NonFiniteCoordinate { vertex: usize },
    /// A loop visits the same vertex more than once
    #[error("{ring} visits vertex {vertex} more than once")]
    RepeatedVertex { ring: Ring, vertex: usize },
    /// Two distinct vertices share the same coordinates
    #[error("vertices {first} and {second} have identical coordinates")]
    CoincidentVertices { first: usize, second: usize },
    /// Two edges of the same loop cross, touch, or overlap
    #[error("{ring} intersects itself (edges starting at vertices {first} and {second})")]
    SelfIntersection { ring: Ring, first: usize, second: usize },
    /// Edges of two different loops cross, touch, or overlap
    #[error("{first} and {second} intersect")]
    RingsIntersect { first: Ring, second: Ring },
    /// A hole is not enclosed by the outer loop
    #[error("hole {hole} is not inside the outer loop")]
    HoleOutsideOuter { hole: usize },
    /// A hole is enclosed by another hole
    #[error("hole {inner} is nested inside hole {outer}")]
    NestedHoles { outer: usize, inner: usize },
}

/// Describes an error which occurred during triangulation
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TriangulationError {
    /// The input loops violate a precondition
    #[error(transparent)]
    InvalidGeometry(#[from] InvalidGeometry),
    /// A loop encloses no area
    #[error("{ring} encloses zero area")]
    DegenerateInput { ring: Ring },
    /// An internal invariant was violated; this is a triangulation bug, or numeric trouble with near-degenerate input
    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[derive(Debug)]
pub struct InternalError {
    pub msg: String,
    pub backtrace: Backtrace,
}

impl InternalError {
    #[cold]
    #[inline(always)]
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self {
            msg: msg.into(),
            backtrace: Backtrace::new_unresolved(),
        }
    }
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\n{:?}", self.msg, self.backtrace)
    }
}

impl error::Error for InternalError { }
