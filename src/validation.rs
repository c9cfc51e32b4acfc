use std::cmp::Ordering;

use num_traits::real::Real;

use crate::{Coords, FillRule, InvalidGeometry, PolygonList, Ring, TriangulationError, Vertex, math::{Orientation, Points}};

/// Loops that passed validation, wound with the interior on their left: counter-clockwise at
/// even nesting depth and clockwise at odd depth
#[derive(Debug, Clone)]
pub(crate) struct ValidatedPolygon<C: Real> {
    pub points: Points<C>,
    pub rings: Vec<(Ring, Vec<usize>)>,
}

impl<C: Real> ValidatedPolygon<C> {
    pub fn edge_count(&self) -> usize {
        self.rings.iter().map(|(_, ring)| ring.len()).sum()
    }
}

pub(crate) fn validate<C: Real, P: PolygonList>(polygon: &P) -> Result<ValidatedPolygon<C>, TriangulationError>
where P::Vertex: Vertex<Coordinate = C> {
    let vertex_count = polygon.vertex_count();

    // Loop structure first; everything below may index freely
    let mut referenced = vec![false; vertex_count];
    let mut seen_in = vec![usize::MAX; vertex_count];
    for (ring_number, (ring, indices)) in polygon.rings().enumerate() {
        if indices.len() < 3 {
            return Err(InvalidGeometry::NotEnoughVertices { ring, count: indices.len() }.into());
        }
        for &vertex in indices {
            if vertex >= vertex_count {
                return Err(InvalidGeometry::VertexOutOfRange { ring, vertex, vertex_count }.into());
            }
            if seen_in[vertex] == ring_number {
                return Err(InvalidGeometry::RepeatedVertex { ring, vertex }.into());
            }
            seen_in[vertex] = ring_number;
            referenced[vertex] = true;
        }
    }

    let points = Points::new(polygon.vertices().iter().map(Coords::of).collect());

    let mut used: Vec<usize> = (0..vertex_count).filter(|&v| referenced[v]).collect();
    if let Some(&vertex) = used.iter().find(|&&v| !points.get(v).is_finite()) {
        return Err(InvalidGeometry::NonFiniteCoordinate { vertex }.into());
    }

    used.sort_unstable_by(|&a, &b| points.compare(a, b));
    for pair in used.windows(2) {
        if points.get(pair[0]) == points.get(pair[1]) {
            return Err(InvalidGeometry::CoincidentVertices { first: pair[0].min(pair[1]), second: pair[0].max(pair[1]) }.into());
        }
    }

    let mut rings = Vec::with_capacity(polygon.loop_count());
    for (ring, indices) in polygon.rings() {
        if points.loop_area(indices) == C::zero() {
            return Err(TriangulationError::DegenerateInput { ring });
        }
        rings.push((ring, indices.to_vec()));
    }

    check_intersections(&points, &rings)?;
    let depths = match polygon.fill_rule() {
        FillRule::OuterWithHoles => check_holes(&points, &rings)?,
        FillRule::EvenOdd => even_odd_depths(&points, &rings)?,
    };

    for ((_, indices), depth) in rings.iter_mut().zip(depths) {
        let counter_clockwise = points.loop_area(indices) > C::zero();
        if counter_clockwise != (depth % 2 == 0) {
            indices.reverse();
        }
    }

    Ok(ValidatedPolygon { points, rings })
}

struct Edge {
    ring: Ring,
    a: usize,
    b: usize,
}

/// Sweep the edges by their leftmost x, comparing only edges whose x ranges overlap
fn check_intersections<C: Real>(points: &Points<C>, rings: &[(Ring, Vec<usize>)]) -> Result<(), InvalidGeometry> {
    let mut edges: Vec<Edge> = rings.iter()
        .flat_map(|(ring, indices)| indices.iter().enumerate().map(move |(i, &a)| Edge {
            ring: *ring,
            a,
            b: indices[(i + 1) % indices.len()],
        }))
        .collect();

    let min_x = |e: &Edge| points.get(e.a).x().min(points.get(e.b).x());
    let max_x = |e: &Edge| points.get(e.a).x().max(points.get(e.b).x());
    edges.sort_unstable_by(|e0, e1| min_x(e0).partial_cmp(&min_x(e1)).unwrap_or(Ordering::Equal));

    for (i, e0) in edges.iter().enumerate() {
        let e0_max_x = max_x(e0);
        for e1 in edges[i + 1..].iter().take_while(|e1| min_x(*e1) <= e0_max_x) {
            if edges_conflict(points, (e0.a, e0.b), (e1.a, e1.b)) {
                return Err(if e0.ring == e1.ring {
                    InvalidGeometry::SelfIntersection { ring: e0.ring, first: e0.a.min(e1.a), second: e0.a.max(e1.a) }
                } else {
                    InvalidGeometry::RingsIntersect { first: e0.ring, second: e1.ring }
                });
            }
        }
    }
    Ok(())
}

/// Edges may only meet at a shared endpoint, and must not overlap there
fn edges_conflict<C: Real>(points: &Points<C>, (a, b): (usize, usize), (c, d): (usize, usize)) -> bool {
    let shared = match (a == c, a == d, b == c, b == d) {
        (false, false, false, false) => None,
        (true, _, _, true) | (_, true, true, _) => return true,
        (true, _, _, _) => Some((a, b, d)),
        (_, true, _, _) => Some((a, b, c)),
        (_, _, true, _) => Some((b, a, d)),
        (_, _, _, true) => Some((b, a, c)),
    };

    match shared {
        Some((o, x, y)) => {
            // Collinear edges leaving the shared vertex in the same direction overlap
            let (co, cx, cy) = (points.get(o), points.get(x), points.get(y));
            let dot = (cx.x() - co.x()) * (cy.x() - co.x()) + (cx.y() - co.y()) * (cy.y() - co.y());
            points.orientation(o, x, y) == Orientation::Collinear && dot > C::zero()
        }
        None => segments_intersect(points, a, b, c, d),
    }
}

/// Closed segment intersection, touching included
fn segments_intersect<C: Real>(points: &Points<C>, a: usize, b: usize, c: usize, d: usize) -> bool {
    let o1 = points.orientation(a, b, c);
    let o2 = points.orientation(a, b, d);
    let o3 = points.orientation(c, d, a);
    let o4 = points.orientation(c, d, b);

    if o1 != o2 && o3 != o4 {
        return true;
    }

    (o1 == Orientation::Collinear && within_bounds(points, a, b, c))
        || (o2 == Orientation::Collinear && within_bounds(points, a, b, d))
        || (o3 == Orientation::Collinear && within_bounds(points, c, d, a))
        || (o4 == Orientation::Collinear && within_bounds(points, c, d, b))
}

/// Whether `v`, already known to be collinear with `a -> b`, lies within the segment's bounding box
fn within_bounds<C: Real>(points: &Points<C>, a: usize, b: usize, v: usize) -> bool {
    let (ca, cb, cv) = (points.get(a), points.get(b), points.get(v));
    cv.x() >= ca.x().min(cb.x()) && cv.x() <= ca.x().max(cb.x())
        && cv.y() >= ca.y().min(cb.y()) && cv.y() <= ca.y().max(cb.y())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Enclosure {
    Inside,
    Outside,
    Partial,
}

/// Where `inner` lies relative to `container`. The loops are already known not to cross, so each
/// edge of `inner` lies entirely on one side and its midpoint decides which.
fn enclosure<C: Real>(points: &Points<C>, inner: &[usize], container: &[usize]) -> Enclosure {
    let two = C::one() + C::one();
    let (mut inside, mut outside) = (false, false);
    for (i, &a) in inner.iter().enumerate() {
        let (ca, cb) = (points.get(a), points.get(inner[(i + 1) % inner.len()]));
        let midpoint = Coords::new((ca.x() + cb.x()) / two, (ca.y() + cb.y()) / two);
        if contains(points, container, midpoint) {
            inside = true;
        } else {
            outside = true;
        }
    }
    match (inside, outside) {
        (true, false) => Enclosure::Inside,
        (false, true) => Enclosure::Outside,
        _ => Enclosure::Partial,
    }
}

/// Every hole inside the outer loop, no hole inside another. Returns the nesting depths.
fn check_holes<C: Real>(points: &Points<C>, rings: &[(Ring, Vec<usize>)]) -> Result<Vec<usize>, InvalidGeometry> {
    let (outer, holes) = match rings.split_first() {
        Some(((_, outer), holes)) => (outer, holes),
        None => return Ok(Vec::new()),
    };

    for (hole, (_, indices)) in holes.iter().enumerate() {
        if enclosure(points, indices, outer) != Enclosure::Inside {
            return Err(InvalidGeometry::HoleOutsideOuter { hole });
        }
    }

    for (container_number, (_, container)) in holes.iter().enumerate() {
        for (inner, (_, indices)) in holes.iter().enumerate() {
            if inner != container_number && enclosure(points, indices, container) != Enclosure::Outside {
                return Err(InvalidGeometry::NestedHoles { outer: container_number, inner });
            }
        }
    }

    Ok((0..rings.len()).map(|i| i.min(1)).collect())
}

/// The number of loops enclosing each loop
fn even_odd_depths<C: Real>(points: &Points<C>, rings: &[(Ring, Vec<usize>)]) -> Result<Vec<usize>, InvalidGeometry> {
    let mut depths = vec![0; rings.len()];
    for (i, (ring, indices)) in rings.iter().enumerate() {
        for (j, (container_ring, container)) in rings.iter().enumerate() {
            if i == j {
                continue;
            }
            match enclosure(points, indices, container) {
                Enclosure::Inside => depths[i] += 1,
                Enclosure::Outside => { }
                // Loops meeting at shared vertices, with edges on both sides
                Enclosure::Partial => return Err(InvalidGeometry::RingsIntersect { first: *container_ring, second: *ring }),
            }
        }
    }
    Ok(depths)
}

/// Crossing-number point in polygon test
fn contains<C: Real>(points: &Points<C>, ring: &[usize], p: Coords<C>) -> bool {
    let mut inside = false;
    for (i, &a) in ring.iter().enumerate() {
        let (ca, cb) = (points.get(a), points.get(ring[(i + 1) % ring.len()]));
        if (ca.y() > p.y()) != (cb.y() > p.y()) {
            let x = ca.x() + (p.y() - ca.y()) * (cb.x() - ca.x()) / (cb.y() - ca.y());
            if p.x() < x {
                inside = !inside;
            }
        }
    }
    inside
}
