use crate::{Ring, Vertex};

/// How the loops of a [PolygonList] bound its interior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FillRule {
    /// The first loop is the outer boundary. Every later loop is a hole directly inside it.
    OuterWithHoles,
    /// A point is inside when an odd number of loops enclose it, so loops may describe disjoint
    /// regions and islands inside holes.
    EvenOdd,
}

/// Closed loops of indices into a shared vertex list.
///
/// Loops may be wound either way and must not repeat their first vertex at the end. Separate loops
/// may share a vertex by referring to the same index, but must not otherwise touch.
pub trait PolygonList {
    /// The type of vertices of the loops
    type Vertex: Vertex;

    /// Every vertex the loops may refer to
    fn vertices(&self) -> &[Self::Vertex];

    fn loop_count(&self) -> usize;

    /// The loop at `index` and the name errors give it
    fn get_loop(&self, index: usize) -> (Ring, &[usize]);

    fn fill_rule(&self) -> FillRule;

    fn vertex_count(&self) -> usize {
        self.vertices().len()
    }

    /// Iterate through every loop in order
    fn rings(&self) -> Rings<'_, Self> where Self: Sized {
        Rings { list: self, next: 0 }
    }
}

/// Iterator over the loops of a [PolygonList]. Created by [PolygonList::rings].
pub struct Rings<'p, P: PolygonList> {
    list: &'p P,
    next: usize,
}

impl<'p, P: PolygonList> Iterator for Rings<'p, P> {
    type Item = (Ring, &'p [usize]);

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.list.loop_count() {
            return None;
        }
        let ring = self.list.get_loop(self.next);
        self.next += 1;
        Some(ring)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.loop_count().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl<'p, P: PolygonList> ExactSizeIterator for Rings<'p, P> { }
