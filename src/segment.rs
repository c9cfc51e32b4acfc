use num_traits::real::Real;

use crate::{Ring, idx::IdxDisplay, math::{Orientation, Points}};

/// A polygon edge, stored with its endpoints in [Points::compare] order
#[derive(Debug, Clone)]
pub(crate) struct Segment {
    left: usize,
    right: usize,
    ring: Ring,
    inside_above: bool,
}

impl IdxDisplay for Segment {
    fn fmt(f: &mut std::fmt::Formatter<'_>, idx: usize) -> std::fmt::Result {
        write!(f, "s{}", idx)
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "v{} -> v{} of {}", self.left, self.right, self.ring)
    }
}

impl Segment {
    /// The edge `from -> to` of a loop wound so that the polygon interior is on its left
    pub fn new<C: Real>(points: &Points<C>, from: usize, to: usize, ring: Ring) -> Self {
        if points.is_left_of(from, to) {
            // Travelling rightward with the interior on the left puts the interior above
            Self { left: from, right: to, ring, inside_above: true }
        } else {
            Self { left: to, right: from, ring, inside_above: false }
        }
    }

    pub fn left(&self) -> usize { self.left }
    pub fn right(&self) -> usize { self.right }

    /// Whether the polygon interior lies directly above this segment (otherwise directly below)
    pub fn inside_above(&self) -> bool { self.inside_above }

    pub fn has_endpoints(&self, left: usize, right: usize) -> bool {
        self.left == left && self.right == right
    }

    /// Whether `v` lies above the line through this segment.
    ///
    /// When `v` is on the line, the point is treated as nudged toward `toward` and that vertex
    /// decides instead. Returns `None` when neither resolves the side.
    pub fn is_above<C: Real>(&self, points: &Points<C>, v: usize, toward: Option<usize>) -> Option<bool> {
        match points.orientation(self.left, self.right, v) {
            Orientation::Left => Some(true),
            Orientation::Right => Some(false),
            Orientation::Collinear => match points.orientation(self.left, self.right, toward?) {
                Orientation::Left => Some(true),
                Orientation::Right => Some(false),
                Orientation::Collinear => None,
            },
        }
    }
}
