use crate::{FillRule, PolygonList, Ring, Triangle, TriangulationError, TriangulationOptions, Vertex};

/// A polygon with zero or more holes, described by loops of indices into a shared vertex list.
///
/// Loops may be given in either winding order and must not repeat their first vertex at the end.
/// Separate loops may share a vertex by referring to the same index, but must not otherwise touch.
#[derive(Debug, Clone, PartialEq)]
pub struct PolygonWithHoles<V: Vertex> {
    vertices: Vec<V>,
    outer: Vec<usize>,
    holes: Vec<Vec<usize>>,
}

impl<V: Vertex> PolygonWithHoles<V> {
    /// Build a polygon from a shared vertex list and loops of indices into it
    pub fn new(vertices: Vec<V>, outer: Vec<usize>, holes: Vec<Vec<usize>>) -> Self {
        Self { vertices, outer, holes }
    }

    /// Build a polygon from loops of vertices.
    ///
    /// Vertices are numbered in order: the outer loop first, then each hole.
    pub fn from_loops(outer: Vec<V>, holes: Vec<Vec<V>>) -> Self {
        let vertex_count = outer.len() + holes.iter().map(Vec::len).sum::<usize>();
        let mut vertices = Vec::with_capacity(vertex_count);

        let outer_indices = (0..outer.len()).collect();
        vertices.extend(outer);

        let mut hole_indices = Vec::with_capacity(holes.len());
        for hole in holes {
            let start = vertices.len();
            hole_indices.push((start..start + hole.len()).collect());
            vertices.extend(hole);
        }

        Self::new(vertices, outer_indices, hole_indices)
    }

    /// A polygon without holes
    pub fn simple(vertices: Vec<V>) -> Self {
        Self::from_loops(vertices, Vec::new())
    }

    /// Add a hole given as indices into the existing vertex list
    pub fn with_hole(mut self, hole: Vec<usize>) -> Self {
        self.holes.push(hole);
        self
    }

    pub fn vertices(&self) -> &[V] { &self.vertices }

    pub fn outer(&self) -> &[usize] { &self.outer }

    pub fn holes(&self) -> &[Vec<usize>] { &self.holes }

    pub fn vertex_count(&self) -> usize { self.vertices.len() }

    /// Triangulate with [TriangulationOptions::default()]
    pub fn triangulate(&self) -> Result<Vec<Triangle>, TriangulationError> {
        crate::triangulate(self)
    }

    pub fn triangulate_with(&self, options: &TriangulationOptions) -> Result<Vec<Triangle>, TriangulationError> {
        crate::triangulate_with(self, options)
    }
}

impl<V: Vertex> PolygonList for PolygonWithHoles<V> {
    type Vertex = V;

    fn vertices(&self) -> &[V] { &self.vertices }

    fn loop_count(&self) -> usize { self.holes.len() + 1 }

    fn get_loop(&self, index: usize) -> (Ring, &[usize]) {
        match index {
            0 => (Ring::Outer, &self.outer[..]),
            _ => (Ring::Hole(index - 1), &self.holes[index - 1][..]),
        }
    }

    fn fill_rule(&self) -> FillRule { FillRule::OuterWithHoles }
}
