use num_traits::real::Real;

use crate::{Coords, idx::{Idx, SliceExt}, math::Points, segment::Segment, trapezoidation::TrapezoidationStructure};

/// An axis-aligned box strictly containing every input vertex
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox<C> {
    pub min: [C; 2],
    pub max: [C; 2],
}

impl<C: Real> BoundingBox<C> {
    /// The bounds of `vertices`, grown on every side by an eighth of the larger extent
    pub(crate) fn around(points: &Points<C>, vertices: impl IntoIterator<Item = usize>) -> Self {
        let mut vertices = vertices.into_iter().map(|v| points.get(v));
        let first = vertices.next().unwrap_or_else(|| Coords::new(C::zero(), C::zero()));
        let (mut min, mut max) = (first.to_array(), first.to_array());
        for c in vertices {
            min = [min[0].min(c.x()), min[1].min(c.y())];
            max = [max[0].max(c.x()), max[1].max(c.y())];
        }

        let eight = (0..8).fold(C::zero(), |acc, _| acc + C::one());
        let extent = (max[0] - min[0]).max(max[1] - min[1]);
        let margin = if extent > C::zero() { extent / eight } else { C::one() };
        Self {
            min: [min[0] - margin, min[1] - margin],
            max: [max[0] + margin, max[1] + margin],
        }
    }

    pub fn width(&self) -> C { self.max[0] - self.min[0] }
    pub fn height(&self) -> C { self.max[1] - self.min[1] }
}

/// One live trapezoid of a trapezoidal map
#[derive(Debug, Clone, PartialEq)]
pub struct TrapezoidView<C> {
    /// The segment above, as `[left vertex, right vertex]`; `None` when unbounded above
    pub top: Option<[usize; 2]>,
    /// The segment below; `None` when unbounded below
    pub bottom: Option<[usize; 2]>,
    /// The vertex whose vertical wall bounds the trapezoid on the left; `None` when unbounded
    pub left_point: Option<usize>,
    pub right_point: Option<usize>,
    /// Whether the trapezoid lies in the polygon interior. Only final once every segment is inserted.
    pub inside: bool,
    /// Corners clipped to the bounding box, counter-clockwise from the lower left.
    /// Adjacent corners coincide where the trapezoid degenerates to a triangle.
    pub corners: [[C; 2]; 4],
}

/// A read-only picture of a trapezoidal map, complete or part way through construction
#[derive(Debug, Clone, PartialEq)]
pub struct TrapezoidMapSnapshot<C> {
    pub bounds: BoundingBox<C>,
    /// Coordinates of every input vertex, by index
    pub vertices: Vec<[C; 2]>,
    pub trapezoids: Vec<TrapezoidView<C>>,
    /// The segments inserted so far, as `[left vertex, right vertex]`, in insertion order
    pub segments: Vec<[usize; 2]>,
    pub total_segments: usize,
}

impl<C> TrapezoidMapSnapshot<C> {
    pub fn inserted_segments(&self) -> usize {
        self.segments.len()
    }

    pub fn is_complete(&self) -> bool {
        self.segments.len() == self.total_segments
    }

    pub fn inside_trapezoids(&self) -> impl Iterator<Item = &TrapezoidView<C>> {
        self.trapezoids.iter().filter(|t| t.inside)
    }
}

pub(crate) fn take_snapshot<C: Real, T: TrapezoidationStructure<C>>(structure: &T, bounds: BoundingBox<C>, inserted: &[Idx<Segment>], total_segments: usize) -> TrapezoidMapSnapshot<C> {
    let points = structure.points();
    let ss = structure.ss();
    let endpoints = |si: Idx<Segment>| [ss[si].left(), ss[si].right()];

    let mut trapezoids = Vec::new();
    for ti in structure.ts().iter_index() {
        let t = &structure.ts()[ti];
        if !t.is_alive() {
            continue;
        }

        let x_left = t.left_point().map_or(bounds.min[0], |v| points.get(v).x());
        let x_right = t.right_point().map_or(bounds.max[0], |v| points.get(v).x());
        let y_at = |si: Option<Idx<Segment>>, x: C, at_left: bool, unbounded: C| match si {
            Some(si) => segment_y(points, &ss[si], x, at_left),
            None => unbounded,
        };

        let corners = [
            [x_left, y_at(t.bottom(), x_left, true, bounds.min[1])],
            [x_right, y_at(t.bottom(), x_right, false, bounds.min[1])],
            [x_right, y_at(t.top(), x_right, false, bounds.max[1])],
            [x_left, y_at(t.top(), x_left, true, bounds.max[1])],
        ];

        // Bounding segments of a partial map may disagree; such a trapezoid is not yet inside
        let inside = structure.is_inside(ti).unwrap_or(false);

        trapezoids.push(TrapezoidView {
            top: t.top().map(endpoints),
            bottom: t.bottom().map(endpoints),
            left_point: t.left_point(),
            right_point: t.right_point(),
            inside,
            corners,
        });
    }

    TrapezoidMapSnapshot {
        bounds,
        vertices: (0..points.len()).map(|v| points.get(v).to_array()).collect(),
        trapezoids,
        segments: inserted.iter().map(|&si| endpoints(si)).collect(),
        total_segments,
    }
}

/// The height of a segment's line at `x`. A vertical segment only bounds trapezoids of zero
/// width, so its lower end is used on their left side and its upper end on their right.
fn segment_y<C: Real>(points: &Points<C>, s: &Segment, x: C, at_left: bool) -> C {
    let (a, b) = (points.get(s.left()), points.get(s.right()));
    if a.x() == b.x() {
        return if at_left { a.y() } else { b.y() };
    }
    a.y() + (x - a.x()) * (b.y() - a.y()) / (b.x() - a.x())
}
