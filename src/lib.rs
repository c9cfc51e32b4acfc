//! Triangulation of polygons with holes by randomized trapezoidation.
//!
//! The polygon's segments are inserted in random order into a trapezoidal map with a search
//! structure, the map's interior trapezoids are grouped into monotone mountains, and each
//! mountain is triangulated by a single stack sweep. Expected running time is
//! `O(n log* n)` for `n` segments.
//!
//! ```
//! use seidel_triangulate::PolygonWithHoles;
//!
//! let outer = vec![[0., 0.], [4., 0.], [4., 4.], [0., 4.]];
//! let hole = vec![[1., 1.], [1., 3.], [3., 3.], [3., 1.]];
//! let triangles = PolygonWithHoles::from_loops(outer, vec![hole]).triangulate()?;
//! assert_eq!(triangles.len(), 8);
//! # Ok::<(), seidel_triangulate::TriangulationError>(())
//! ```

mod idx;
mod errors;
mod options;
mod math;
mod inputs;
mod segment;
mod trapezoid;
mod querynode;
mod trapezoidation;
mod mountains;
mod monotone;
mod validation;
mod snapshot;
mod triangulator;

#[cfg(feature = "debugging")]
pub mod debug;

#[cfg(any(test, feature = "benchmarking"))]
pub mod tests;

pub use errors::{InternalError, InvalidGeometry, Ring, TriangulationError};
pub use inputs::{FillRule, PolygonList, PolygonWithHoles, PolygonalArea, Rings, Vertex};
pub(crate) use inputs::Coords;
pub use options::{DEFAULT_SEED, TriangulationOptions};
pub use snapshot::{BoundingBox, TrapezoidMapSnapshot, TrapezoidView};
pub use triangulator::Triangulator;

pub use num_traits::real::Real;

/// Three indices into the input vertex list, in counter-clockwise order
pub type Triangle = [usize; 3];

/// Triangulate `polygon` with [TriangulationOptions::default()]
pub fn triangulate<P: PolygonList>(polygon: &P) -> Result<Vec<Triangle>, TriangulationError> {
    triangulate_with(polygon, &TriangulationOptions::default())
}

/// Triangulate `polygon`. The result covers its interior, as given by its [FillRule], exactly,
/// using only the input vertices.
pub fn triangulate_with<P: PolygonList>(polygon: &P, options: &TriangulationOptions) -> Result<Vec<Triangle>, TriangulationError> {
    Triangulator::new(polygon, options)?.triangulate()
}
