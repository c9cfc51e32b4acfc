use std::fmt;

use num_traits::real::Real;

/// A two-dimensional point.
///
/// The coordinate type must implement [num_traits::real::Real], reexported as [crate::Real].
pub trait Vertex {
    /// The type of the individual `x` and `y` coordinates
    type Coordinate: Real;

    /// The x [Vertex::Coordinate] value
    fn x(&self) -> Self::Coordinate;
    /// The y [Vertex::Coordinate] value
    fn y(&self) -> Self::Coordinate;
}

/// The coordinates of an input vertex, copied out of the caller's [Vertex] type
#[derive(Clone, Copy, PartialEq)]
pub(crate) struct Coords<C: Real>([C; 2]);

impl<C: Real> Coords<C> {
    pub fn new(x: C, y: C) -> Self { Self([x, y]) }

    pub fn of<V: Vertex<Coordinate = C>>(v: &V) -> Self { Self([v.x(), v.y()]) }

    pub fn x(&self) -> C { self.0[0] }
    pub fn y(&self) -> C { self.0[1] }

    /// `Real` has no notion of infinity or NaN; both give a non-zero difference with themselves
    pub fn is_finite(&self) -> bool {
        let finite = |c: C| c - c == C::zero();
        finite(self.x()) && finite(self.y())
    }

    pub fn to_array(self) -> [C; 2] { self.0 }
}

impl<C: Real> fmt::Debug for Coords<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tuple = f.debug_tuple("Coords");
        if let Some(x) = self.x().to_f64() {
            tuple.field(&x);
        }
        if let Some(y) = self.y().to_f64() {
            tuple.field(&y);
        }
        tuple.finish()
    }
}

impl<C: Real> fmt::Display for Coords<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let (Some(x), Some(y)) = (self.x().to_f64(), self.y().to_f64()) {
            write!(f, "({}, {})", x, y)
        } else {
            write!(f, "Coords<{}>", std::any::type_name::<C>())
        }
    }
}

impl<C: Real> Vertex for [C; 2] {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self[0]
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self[1]
    }
}

impl<C: Real> Vertex for (C, C) {
    type Coordinate = C;

    #[inline(always)]
    fn x(&self) -> Self::Coordinate {
        self.0
    }

    #[inline(always)]
    fn y(&self) -> Self::Coordinate {
        self.1
    }
}
