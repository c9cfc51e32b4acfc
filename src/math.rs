use std::cmp::Ordering;

use num_traits::real::Real;

use crate::Coords;

/// Which side of the directed line `a -> b` a point lies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    /// Counter-clockwise turn
    Left,
    /// Clockwise turn
    Right,
    Collinear,
}

/// Twice the signed area of the triangle `a, b, c`; positive for a counter-clockwise turn
#[inline]
pub(crate) fn cross<C: Real>(a: Coords<C>, b: Coords<C>, c: Coords<C>) -> C {
    (b.x() - a.x()) * (c.y() - a.y()) - (b.y() - a.y()) * (c.x() - a.x())
}

impl Orientation {
    pub fn of<C: Real>(a: Coords<C>, b: Coords<C>, c: Coords<C>) -> Self {
        let cross = cross(a, b, c);
        if cross > C::zero() {
            Self::Left
        } else if cross < C::zero() {
            Self::Right
        } else {
            Self::Collinear
        }
    }
}

/// The input vertices, addressed by their index in the caller's vertex list.
///
/// All ordering decisions go through [Points::compare], a strict total order: `x`, then `y`, then
/// the vertex index. This behaves like an infinitesimal shear, so vertical segments and repeated
/// `x` coordinates need no special handling anywhere else.
#[derive(Debug, Clone)]
pub(crate) struct Points<C: Real>(Vec<Coords<C>>);

impl<C: Real> Points<C> {
    pub fn new(coords: Vec<Coords<C>>) -> Self {
        Self(coords)
    }

    #[inline(always)]
    pub fn get(&self, v: usize) -> Coords<C> {
        self.0[v]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn compare(&self, a: usize, b: usize) -> Ordering {
        let (ca, cb) = (self.get(a), self.get(b));
        ca.x().partial_cmp(&cb.x()).unwrap_or(Ordering::Equal)
            .then_with(|| ca.y().partial_cmp(&cb.y()).unwrap_or(Ordering::Equal))
            .then_with(|| a.cmp(&b))
    }

    #[inline]
    pub fn is_left_of(&self, a: usize, b: usize) -> bool {
        self.compare(a, b) == Ordering::Less
    }

    pub fn orientation(&self, a: usize, b: usize, c: usize) -> Orientation {
        Orientation::of(self.get(a), self.get(b), self.get(c))
    }

    /// Twice the signed area enclosed by a loop of vertex indices; positive when counter-clockwise
    pub fn loop_area(&self, ring: &[usize]) -> C {
        let mut area = C::zero();
        for (i, &a) in ring.iter().enumerate() {
            let b = ring[(i + 1) % ring.len()];
            let (ca, cb) = (self.get(a), self.get(b));
            area = area + (ca.x() * cb.y() - cb.x() * ca.y());
        }
        area
    }
}

/// The number of insertions after which phase `h` of the randomized construction ends,
/// `ceil(n / log^(h) n)`. Returns `None` once the iterated logarithm stops exceeding 1.
pub(crate) fn math_n(n: usize, h: usize) -> Option<usize> {
    let mut nf = n as f64;
    for _ in 0..h {
        nf = nf.log2();
        if nf.is_nan() || nf <= 1.0 {
            return None;
        }
    }
    Some(((n as f64) / nf).ceil() as usize)
}
