use crate::{FillRule, PolygonList, Ring, Triangle, TriangulationError, TriangulationOptions, Vertex};

/// A region bounded by any number of non-crossing loops under the even-odd rule: a point is
/// inside when an odd number of loops enclose it.
///
/// Loops need no particular order. A loop inside another loop cuts a hole, a loop inside that
/// hole adds an island, and loops side by side give disjoint regions.
///
/// ```
/// use seidel_triangulate::PolygonalArea;
///
/// let square = |min: f64, max: f64| vec![[min, min], [max, min], [max, max], [min, max]];
/// let area = PolygonalArea::from_loops(vec![square(0., 6.), square(1., 5.), square(2., 4.)]);
/// // A frame of 8 triangles around an island of 2
/// assert_eq!(area.triangulate()?.len(), 10);
/// # Ok::<(), seidel_triangulate::TriangulationError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonalArea<V: Vertex> {
    vertices: Vec<V>,
    loops: Vec<Vec<usize>>,
}

impl<V: Vertex> PolygonalArea<V> {
    /// Build an area from a shared vertex list and loops of indices into it
    pub fn new(vertices: Vec<V>, loops: Vec<Vec<usize>>) -> Self {
        Self { vertices, loops }
    }

    /// Build an area from loops of vertices, numbered in order
    pub fn from_loops(loops: Vec<Vec<V>>) -> Self {
        let mut vertices = Vec::with_capacity(loops.iter().map(Vec::len).sum());
        let mut indices = Vec::with_capacity(loops.len());
        for ring in loops {
            let start = vertices.len();
            indices.push((start..start + ring.len()).collect());
            vertices.extend(ring);
        }
        Self::new(vertices, indices)
    }

    /// Add a loop given as indices into the existing vertex list
    pub fn with_loop(mut self, ring: Vec<usize>) -> Self {
        self.loops.push(ring);
        self
    }

    pub fn vertices(&self) -> &[V] { &self.vertices }

    pub fn loops(&self) -> &[Vec<usize>] { &self.loops }

    /// Triangulate with [TriangulationOptions::default()]
    pub fn triangulate(&self) -> Result<Vec<Triangle>, TriangulationError> {
        crate::triangulate(self)
    }

    pub fn triangulate_with(&self, options: &TriangulationOptions) -> Result<Vec<Triangle>, TriangulationError> {
        crate::triangulate_with(self, options)
    }
}

impl<V: Vertex> PolygonList for PolygonalArea<V> {
    type Vertex = V;

    fn vertices(&self) -> &[V] { &self.vertices }

    fn loop_count(&self) -> usize { self.loops.len() }

    fn get_loop(&self, index: usize) -> (Ring, &[usize]) {
        (Ring::Loop(index), &self.loops[index][..])
    }

    fn fill_rule(&self) -> FillRule { FillRule::EvenOdd }
}
