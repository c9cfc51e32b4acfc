use crate::{idx::{Idx, IdxDisplay}, querynode::QueryNode, segment::Segment};

/// A region of the trapezoidal map.
///
/// `top`/`bottom` are the bounding segments and `left_point`/`right_point` the vertices whose
/// vertical walls bound it; `None` means unbounded in that direction. An `upper_*` neighbor shares
/// this trapezoid's top segment and a `lower_*` neighbor shares its bottom segment.
#[derive(Debug, Clone)]
pub(crate) struct Trapezoid {
    top: Option<Idx<Segment>>,
    bottom: Option<Idx<Segment>>,
    left_point: Option<usize>,
    right_point: Option<usize>,
    upper_left: Option<Idx<Trapezoid>>,
    lower_left: Option<Idx<Trapezoid>>,
    upper_right: Option<Idx<Trapezoid>>,
    lower_right: Option<Idx<Trapezoid>>,
    sink: Idx<QueryNode>,
    alive: bool,
}

impl std::fmt::Display for Trapezoid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn opt<T: std::fmt::Display>(f: &mut std::fmt::Formatter<'_>, prefix: &str, value: Option<T>) -> std::fmt::Result {
            match value {
                Some(value) => write!(f, "{}{}", prefix, value),
                None => write!(f, "{}-", prefix),
            }
        }

        opt(f, "top ", self.top)?;
        opt(f, " bottom ", self.bottom)?;
        opt(f, " left v", self.left_point)?;
        opt(f, " right v", self.right_point)?;
        opt(f, " [ul ", self.upper_left)?;
        opt(f, " ll ", self.lower_left)?;
        opt(f, " ur ", self.upper_right)?;
        opt(f, " lr ", self.lower_right)?;
        write!(f, "] {}", self.sink)?;
        if !self.alive {
            write!(f, " (dead)")?;
        }
        Ok(())
    }
}

impl IdxDisplay for Trapezoid {
    fn fmt(f: &mut std::fmt::Formatter<'_>, idx: usize) -> std::fmt::Result {
        write!(f, "t{}", idx)
    }
}

impl Trapezoid {
    /// The whole plane
    pub fn all(sink: Idx<QueryNode>) -> Self {
        Self::bounded(None, None, None, None, sink)
    }

    /// A trapezoid with the given bounds and no neighbors yet
    pub fn bounded(top: Option<Idx<Segment>>, bottom: Option<Idx<Segment>>, left_point: Option<usize>, right_point: Option<usize>, sink: Idx<QueryNode>) -> Self {
        Self {
            top,
            bottom,
            left_point,
            right_point,
            upper_left: None,
            lower_left: None,
            upper_right: None,
            lower_right: None,
            sink,
            alive: true,
        }
    }

    pub fn top(&self) -> Option<Idx<Segment>> { self.top }
    pub fn bottom(&self) -> Option<Idx<Segment>> { self.bottom }
    pub fn left_point(&self) -> Option<usize> { self.left_point }
    pub fn right_point(&self) -> Option<usize> { self.right_point }

    pub fn upper_left(&self) -> Option<Idx<Trapezoid>> { self.upper_left }
    pub fn lower_left(&self) -> Option<Idx<Trapezoid>> { self.lower_left }
    pub fn upper_right(&self) -> Option<Idx<Trapezoid>> { self.upper_right }
    pub fn lower_right(&self) -> Option<Idx<Trapezoid>> { self.lower_right }

    pub fn sink(&self) -> Idx<QueryNode> { self.sink }
    pub fn is_alive(&self) -> bool { self.alive }

    pub fn set_right_point(&mut self, v: usize) { self.right_point = Some(v); }

    pub fn set_upper_left(&mut self, ti: Option<Idx<Trapezoid>>) { self.upper_left = ti; }
    pub fn set_lower_left(&mut self, ti: Option<Idx<Trapezoid>>) { self.lower_left = ti; }
    pub fn set_upper_right(&mut self, ti: Option<Idx<Trapezoid>>) { self.upper_right = ti; }
    pub fn set_lower_right(&mut self, ti: Option<Idx<Trapezoid>>) { self.lower_right = ti; }

    /// Mark as replaced; its sink has been rewritten into a branch
    pub fn kill(&mut self) { self.alive = false; }

    /// Point whichever left link referred to `old` at `new` instead
    pub fn replace_left_neighbor(&mut self, old: Idx<Trapezoid>, new: Idx<Trapezoid>) -> bool {
        Self::replace_link(&mut self.upper_left, &mut self.lower_left, old, new)
    }

    /// Point whichever right link referred to `old` at `new` instead
    pub fn replace_right_neighbor(&mut self, old: Idx<Trapezoid>, new: Idx<Trapezoid>) -> bool {
        Self::replace_link(&mut self.upper_right, &mut self.lower_right, old, new)
    }

    fn replace_link(upper: &mut Option<Idx<Trapezoid>>, lower: &mut Option<Idx<Trapezoid>>, old: Idx<Trapezoid>, new: Idx<Trapezoid>) -> bool {
        let mut replaced = false;
        for link in [upper, lower] {
            if *link == Some(old) {
                *link = Some(new);
                replaced = true;
            }
        }
        replaced
    }

    pub fn left_neighbors(&self) -> impl Iterator<Item = Idx<Trapezoid>> {
        self.upper_left.into_iter().chain(self.lower_left)
    }

    pub fn right_neighbors(&self) -> impl Iterator<Item = Idx<Trapezoid>> {
        self.upper_right.into_iter().chain(self.lower_right)
    }
}
