use num_traits::real::Real;
use rand::{Rng, seq::SliceRandom};
use smallvec::{SmallVec, smallvec};
use tracing::trace;

use crate::{errors::InternalError, idx::{Idx, SliceExt, VecExt}, math::{Points, math_n}, querynode::{QueryNode, QueryNodeBranch}, segment::Segment, trapezoid::Trapezoid};

/// Trapezoids crossed by a single segment; most segments cross only a handful
type Crossing = SmallVec<[Idx<Trapezoid>; 8]>;

pub(crate) trait TrapezoidationStructure<C: Real> {
    fn points(&self) -> &Points<C>;
    fn ss(&self) -> &[Segment];
    fn ts(&self) -> &[Trapezoid];
    fn qs(&self) -> &[QueryNode];

    fn query_node_root(&self) -> Idx<QueryNode> {
        Idx::new(0)
    }

    /// Descend from `qi_start` to the sink whose trapezoid contains vertex `v`.
    ///
    /// `toward` is the other endpoint of the segment about to be inserted at `v`. When `v` already
    /// sits on a wall or a segment of the map, the point is treated as nudged along that segment,
    /// which selects the trapezoid the segment enters.
    fn locate(&self, v: usize, toward: Option<usize>, qi_start: Idx<QueryNode>) -> Result<(Idx<QueryNode>, Idx<Trapezoid>), InternalError> {
        let mut qi = qi_start;
        loop {
            match &self.qs()[qi] {
                QueryNode::Branch(first, second, branch) => {
                    let take_second = match *branch {
                        // Nudged toward a vertex to its right, `v` is right of its own wall
                        QueryNodeBranch::X(w) if w == v => toward.map(|_| true),
                        QueryNodeBranch::X(w) => Some(self.points().is_left_of(w, v)),
                        QueryNodeBranch::Y(si) => self.ss()[si].is_above(self.points(), v, toward),
                    };
                    qi = match take_second {
                        Some(true) => *second,
                        Some(false) => *first,
                        None => return Err(InternalError::new(format!("Cannot place v{} at {} ({}); overlapping segments?", v, qi, branch))),
                    };
                }
                QueryNode::Sink(ti) => return Ok((qi, *ti)),
            }
        }
    }

    /// Whether a trapezoid lies in the polygon interior. Its bounding segments must agree, which
    /// only a partial map can violate.
    fn is_inside(&self, ti: Idx<Trapezoid>) -> Result<bool, InternalError> {
        let t = &self.ts()[ti];
        let bottom_says = t.bottom().map_or(false, |si| self.ss()[si].inside_above());
        let top_says = t.top().map_or(false, |si| !self.ss()[si].inside_above());
        if bottom_says != top_says {
            return Err(InternalError::new(format!("{} is bounded by segments that disagree on the polygon interior ({})", ti, t)));
        }
        Ok(bottom_says)
    }
}

/// A trapezoidal map under construction, along with its query structure.
///
/// Segments are inserted one at a time in a random order fixed at creation.
pub(crate) struct TrapezoidationState<C: Real> {
    points: Points<C>,
    ss: Vec<Segment>,
    ts: Vec<Trapezoid>,
    qs: Vec<QueryNode>,
    order: Vec<Idx<Segment>>,
    inserted: usize,
    // Best known query node for each vertex. Valid forever: a node's region never changes after
    // it is created, and a vertex not yet in the map lies strictly inside one trapezoid.
    hints: Vec<Idx<QueryNode>>,
    present: Vec<bool>,
    // Segment endpoints not yet in the map
    pending: Vec<usize>,
    phase: usize,
    next_refresh: Option<usize>,
    verify: bool,
}

impl<C: Real> TrapezoidationStructure<C> for TrapezoidationState<C> {
    fn points(&self) -> &Points<C> { &self.points }
    fn ss(&self) -> &[Segment] { &self.ss }
    fn ts(&self) -> &[Trapezoid] { &self.ts }
    fn qs(&self) -> &[QueryNode] { &self.qs }
}

impl<C: Real> TrapezoidationState<C> {
    pub fn new<R: Rng + ?Sized>(points: Points<C>, ss: Vec<Segment>, rng: &mut R, verify: bool) -> Self {
        // Random insertion order of the segments avoids constant worst-case scenarios
        let mut order: Vec<_> = ss.iter_index().collect();
        order.shuffle(rng);

        let mut qs = Vec::with_capacity(ss.len() * 8 + 1);
        let mut ts = Vec::with_capacity(ss.len() * 4 + 1);
        let qi_root = qs.push_get_index(QueryNode::root(ts.next_index()));
        ts.push(Trapezoid::all(qi_root));

        let mut is_endpoint = vec![false; points.len()];
        for s in ss.iter() {
            is_endpoint[s.left()] = true;
            is_endpoint[s.right()] = true;
        }
        let pending = (0..points.len()).filter(|&v| is_endpoint[v]).collect();

        let phase = 1;
        let next_refresh = math_n(order.len(), phase);

        Self {
            hints: vec![qi_root; points.len()],
            present: vec![false; points.len()],
            points,
            ss,
            ts,
            qs,
            order,
            inserted: 0,
            pending,
            phase,
            next_refresh,
            verify,
        }
    }

    pub fn inserted_segments(&self) -> usize { self.inserted }

    pub fn total_segments(&self) -> usize { self.order.len() }

    pub fn is_complete(&self) -> bool { self.inserted == self.order.len() }

    /// The segments inserted so far, in insertion order
    pub fn inserted_order(&self) -> &[Idx<Segment>] { &self.order[..self.inserted] }

    /// Insert the next segment of the random order, returning it, or `None` once all are inserted
    pub fn insert_next_segment(&mut self) -> Result<Option<Idx<Segment>>, InternalError> {
        let si = match self.order.get(self.inserted) {
            Some(&si) => si,
            None => return Ok(None),
        };

        self.add_segment(si)?;
        self.inserted += 1;

        // Periodically, at a decreasing rate, find the trapezoid each uninserted vertex is contained
        // within; later searches for that vertex begin from there instead of the root
        if self.next_refresh.map_or(false, |end| self.inserted >= end) {
            self.refresh_hints()?;
            while let Some(end) = self.next_refresh {
                if end > self.inserted {
                    break;
                }
                self.phase += 1;
                self.next_refresh = math_n(self.order.len(), self.phase);
            }
        }

        if self.verify {
            self.check_consistency()?;
        }

        Ok(Some(si))
    }

    pub fn build(mut self) -> Result<Trapezoidation<C>, InternalError> {
        while self.insert_next_segment()?.is_some() { }
        Trapezoidation::new(self)
    }

    fn refresh_hints(&mut self) -> Result<(), InternalError> {
        let present = &self.present;
        self.pending.retain(|&v| !present[v]);
        for i in 0..self.pending.len() {
            let v = self.pending[i];
            let (qi, _) = self.locate(v, None, self.hints[v])?;
            self.hints[v] = qi;
        }
        trace!(phase = self.phase, inserted = self.inserted, pending = self.pending.len(), "refreshed vertex locations");
        Ok(())
    }

    /// The trapezoids crossed by a segment, from left to right
    fn follow_segment(&self, si: Idx<Segment>) -> Result<Crossing, InternalError> {
        let s = &self.ss[si];
        let (p, q) = (s.left(), s.right());
        let (_, mut ti) = self.locate(p, Some(q), self.hints[p])?;

        let mut crossed: Crossing = smallvec![ti];
        while let Some(r) = self.ts[ti].right_point() {
            if !self.points.is_left_of(r, q) {
                break;
            }
            let next = match s.is_above(&self.points, r, None) {
                Some(true) => self.ts[ti].lower_right(),
                Some(false) => self.ts[ti].upper_right(),
                None => return Err(InternalError::new(format!("v{} lies on {} ({})", r, si, s))),
            };
            ti = next.ok_or_else(|| InternalError::new(format!("{} has no neighbor for {} to continue into past v{}", ti, si, r)))?;
            crossed.push(ti);
        }
        Ok(crossed)
    }

    fn new_trapezoid(&mut self, top: Option<Idx<Segment>>, bottom: Option<Idx<Segment>>, left_point: Option<usize>, right_point: Option<usize>) -> Idx<Trapezoid> {
        let ti = self.ts.next_index();
        let qi = self.qs.push_get_index(QueryNode::Sink(ti));
        self.ts.push_get_index(Trapezoid::bounded(top, bottom, left_point, right_point, qi))
    }

    /// Give `ti_new` the upper (or lower) left neighbor of `ti_old`, and point that neighbor back at `ti_new`
    fn adopt_left(&mut self, ti_new: Idx<Trapezoid>, ti_old: Idx<Trapezoid>, upper: bool) -> Result<(), InternalError> {
        let neighbor = if upper { self.ts[ti_old].upper_left() } else { self.ts[ti_old].lower_left() };
        if upper {
            self.ts[ti_new].set_upper_left(neighbor);
        } else {
            self.ts[ti_new].set_lower_left(neighbor);
        }
        if let Some(ti_neighbor) = neighbor {
            if !self.ts[ti_neighbor].replace_right_neighbor(ti_old, ti_new) {
                return Err(InternalError::new(format!("{} is left of {} but does not link back to it", ti_neighbor, ti_old)));
            }
        }
        Ok(())
    }

    /// Give `ti_new` the upper (or lower) right neighbor of `ti_old`, and point that neighbor back at `ti_new`
    fn adopt_right(&mut self, ti_new: Idx<Trapezoid>, ti_old: Idx<Trapezoid>, upper: bool) -> Result<(), InternalError> {
        let neighbor = if upper { self.ts[ti_old].upper_right() } else { self.ts[ti_old].lower_right() };
        if upper {
            self.ts[ti_new].set_upper_right(neighbor);
        } else {
            self.ts[ti_new].set_lower_right(neighbor);
        }
        if let Some(ti_neighbor) = neighbor {
            if !self.ts[ti_neighbor].replace_left_neighbor(ti_old, ti_new) {
                return Err(InternalError::new(format!("{} is right of {} but does not link back to it", ti_neighbor, ti_old)));
            }
        }
        Ok(())
    }

    fn add_segment(&mut self, si: Idx<Segment>) -> Result<(), InternalError> {
        let (p, q) = (self.ss[si].left(), self.ss[si].right());
        let crossed = self.follow_segment(si)?;
        let ti_first = crossed[0];
        let ti_last = crossed[crossed.len() - 1];

        trace!(segment = %si, left = p, right = q, crossed = crossed.len(), "inserting segment");

        // An endpoint already in the map is the left (right) point of the trapezoid the segment leaves it through
        let p_new = self.ts[ti_first].left_point() != Some(p);
        let q_new = self.ts[ti_last].right_point() != Some(q);

        let ti_cap_left = if p_new {
            let (top, bottom, left_point) = {
                let t = &self.ts[ti_first];
                (t.top(), t.bottom(), t.left_point())
            };
            let ti_cap = self.new_trapezoid(top, bottom, left_point, Some(p));
            self.adopt_left(ti_cap, ti_first, true)?;
            self.adopt_left(ti_cap, ti_first, false)?;
            Some(ti_cap)
        } else {
            None
        };

        let (top, bottom) = (self.ts[ti_first].top(), self.ts[ti_first].bottom());
        let mut ti_upper = self.new_trapezoid(top, Some(si), Some(p), None);
        let mut ti_lower = self.new_trapezoid(Some(si), bottom, Some(p), None);

        match ti_cap_left {
            Some(ti_cap) => {
                self.ts[ti_cap].set_upper_right(Some(ti_upper));
                self.ts[ti_cap].set_lower_right(Some(ti_lower));
                self.ts[ti_upper].set_upper_left(Some(ti_cap));
                self.ts[ti_lower].set_lower_left(Some(ti_cap));
            }
            None => {
                self.adopt_left(ti_upper, ti_first, true)?;
                self.adopt_left(ti_lower, ti_first, false)?;
            }
        }

        let mut pieces: SmallVec<[(Idx<Trapezoid>, Idx<Trapezoid>); 8]> = smallvec![(ti_upper, ti_lower)];

        for pair in crossed.windows(2) {
            let (ti_prev, ti_cur) = (pair[0], pair[1]);
            let r = self.ts[ti_prev].right_point().ok_or_else(|| InternalError::new(format!("{} is unbounded on the right but {} continues past it", ti_prev, si)))?;
            let r_above = self.ss[si].is_above(&self.points, r, None).ok_or_else(|| InternalError::new(format!("v{} lies on {}", r, si)))?;

            // The wall through `r` now stops at the segment: the pieces on the side of `r` are
            // separated by it, the pieces on the other side merge across it
            if r_above {
                if self.ts[ti_lower].bottom() != self.ts[ti_cur].bottom() {
                    return Err(InternalError::new(format!("Cannot merge {} into {} below {}", ti_cur, ti_lower, si)));
                }
                self.ts[ti_upper].set_right_point(r);
                let top = self.ts[ti_cur].top();
                let ti_next = self.new_trapezoid(top, Some(si), Some(r), None);
                self.adopt_right(ti_upper, ti_prev, true)?;
                self.ts[ti_upper].set_lower_right(Some(ti_next));
                self.ts[ti_next].set_lower_left(Some(ti_upper));
                self.adopt_left(ti_next, ti_cur, true)?;
                ti_upper = ti_next;
            } else {
                if self.ts[ti_upper].top() != self.ts[ti_cur].top() {
                    return Err(InternalError::new(format!("Cannot merge {} into {} above {}", ti_cur, ti_upper, si)));
                }
                self.ts[ti_lower].set_right_point(r);
                let bottom = self.ts[ti_cur].bottom();
                let ti_next = self.new_trapezoid(Some(si), bottom, Some(r), None);
                self.adopt_right(ti_lower, ti_prev, false)?;
                self.ts[ti_lower].set_upper_right(Some(ti_next));
                self.ts[ti_next].set_upper_left(Some(ti_lower));
                self.adopt_left(ti_next, ti_cur, false)?;
                ti_lower = ti_next;
            }
            pieces.push((ti_upper, ti_lower));
        }

        self.ts[ti_upper].set_right_point(q);
        self.ts[ti_lower].set_right_point(q);

        let ti_cap_right = if q_new {
            let (top, bottom, right_point) = {
                let t = &self.ts[ti_last];
                (t.top(), t.bottom(), t.right_point())
            };
            let ti_cap = self.new_trapezoid(top, bottom, Some(q), right_point);
            self.adopt_right(ti_cap, ti_last, true)?;
            self.adopt_right(ti_cap, ti_last, false)?;
            self.ts[ti_cap].set_upper_left(Some(ti_upper));
            self.ts[ti_cap].set_lower_left(Some(ti_lower));
            self.ts[ti_upper].set_upper_right(Some(ti_cap));
            self.ts[ti_lower].set_lower_right(Some(ti_cap));
            Some(ti_cap)
        } else {
            self.adopt_right(ti_upper, ti_last, true)?;
            self.adopt_right(ti_lower, ti_last, false)?;
            None
        };

        // Rewrite each crossed sink in place; merged pieces end up with several parents
        let last = crossed.len() - 1;
        for (i, (&ti_old, &(ti_up, ti_down))) in crossed.iter().zip(pieces.iter()).enumerate() {
            let mut node = QueryNode::y(si, self.ts[ti_down].sink(), self.ts[ti_up].sink());
            if i == last {
                if let Some(ti_cap) = ti_cap_right {
                    let qi_y = self.qs.push_get_index(node);
                    node = QueryNode::x(q, qi_y, self.ts[ti_cap].sink());
                }
            }
            if i == 0 {
                if let Some(ti_cap) = ti_cap_left {
                    let qi_inner = self.qs.push_get_index(node);
                    node = QueryNode::x(p, self.ts[ti_cap].sink(), qi_inner);
                }
            }

            let qi_sink = self.ts[ti_old].sink();
            if self.qs[qi_sink].replace_sink(node) != Some(ti_old) {
                return Err(InternalError::new(format!("{} does not own its sink {}", ti_old, qi_sink)));
            }
            self.ts[ti_old].kill();
        }

        self.present[p] = true;
        self.present[q] = true;

        Ok(())
    }

    /// Verify neighbor symmetry, sink ownership and query structure reachability
    pub fn check_consistency(&self) -> Result<(), InternalError> {
        let mut live = 0;
        for ti in self.ts.iter_index() {
            let t = &self.ts[ti];
            if !t.is_alive() {
                continue;
            }
            live += 1;
            self.check_consistency_trapezoid(ti, t)?;
        }

        let reached = self.check_consistency_query_nodes()?;
        if reached != live {
            return Err(InternalError::new(format!("The query structure reaches {} sinks, but {} trapezoids are live", reached, live)));
        }
        Ok(())
    }

    fn check_consistency_trapezoid(&self, ti: Idx<Trapezoid>, t: &Trapezoid) -> Result<(), InternalError> {
        match self.qs[t.sink()] {
            QueryNode::Sink(ti_other) if ti_other == ti => { }
            _ => return Err(InternalError::new(format!("Inconsistent trapezoid-query node connection: {}->{}", ti, t.sink()))),
        }

        if let (Some(l), Some(r)) = (t.left_point(), t.right_point()) {
            if !self.points.is_left_of(l, r) {
                return Err(InternalError::new(format!("{} has its walls out of order ({})", ti, t)));
            }
        }

        let links = [
            (t.upper_left(), true, true),
            (t.lower_left(), true, false),
            (t.upper_right(), false, true),
            (t.lower_right(), false, false),
        ];
        for (link, is_left, upper) in links {
            let ti_neighbor = match link {
                Some(ti_neighbor) => ti_neighbor,
                None => continue,
            };
            let neighbor = &self.ts[ti_neighbor];
            let links_back = if is_left {
                neighbor.right_neighbors().any(|ti_back| ti_back == ti)
            } else {
                neighbor.left_neighbors().any(|ti_back| ti_back == ti)
            };
            let shares_side = if upper {
                neighbor.top() == t.top()
            } else {
                neighbor.bottom() == t.bottom()
            };
            if !neighbor.is_alive() || !links_back || !shares_side {
                return Err(InternalError::new(format!("Inconsistent trapezoid adjacency: {} ({}) -> {} ({})", ti, t, ti_neighbor, neighbor)));
            }
        }
        Ok(())
    }

    /// Walk the query structure without recursion, returning the number of distinct sinks reached
    fn check_consistency_query_nodes(&self) -> Result<usize, InternalError> {
        let mut visited = vec![false; self.qs.len()];
        let mut stack = vec![self.query_node_root()];
        let mut sinks = 0;
        while let Some(qi) = stack.pop() {
            if std::mem::replace(&mut visited[qi.usize()], true) {
                continue;
            }
            match &self.qs[qi] {
                QueryNode::Branch(first, second, _) => {
                    stack.push(*first);
                    stack.push(*second);
                }
                QueryNode::Sink(ti) => {
                    if !self.ts[*ti].is_alive() {
                        return Err(InternalError::new(format!("{} leads to the replaced trapezoid {}", qi, ti)));
                    }
                    sinks += 1;
                }
            }
        }
        Ok(sinks)
    }
}

/// A complete trapezoidal map of every segment
pub(crate) struct Trapezoidation<C: Real> {
    state: TrapezoidationState<C>,
}

impl<C: Real> TrapezoidationStructure<C> for Trapezoidation<C> {
    fn points(&self) -> &Points<C> { &self.state.points }
    fn ss(&self) -> &[Segment] { &self.state.ss }
    fn ts(&self) -> &[Trapezoid] { &self.state.ts }
    fn qs(&self) -> &[QueryNode] { &self.state.qs }
}

impl<C: Real> Trapezoidation<C> {
    fn new(state: TrapezoidationState<C>) -> Result<Self, InternalError> {
        if !state.is_complete() {
            return Err(InternalError::new(format!("Only {} of {} segments were inserted", state.inserted, state.order.len())));
        }
        Ok(Self { state })
    }

    /// Live trapezoids in the polygon interior, in creation order
    pub fn inside_trapezoids(&self) -> Result<Vec<Idx<Trapezoid>>, InternalError> {
        let mut inside = Vec::new();
        for ti in self.ts().iter_index() {
            if self.ts()[ti].is_alive() && self.is_inside(ti)? {
                inside.push(ti);
            }
        }
        Ok(inside)
    }

    pub fn live_trapezoid_count(&self) -> usize {
        self.ts().iter().filter(|t| t.is_alive()).count()
    }
}
