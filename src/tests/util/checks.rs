use num_traits::ToPrimitive;

use crate::{PolygonList, Triangle, Vertex};

fn coords<P: PolygonList>(polygon: &P, v: usize) -> [f64; 2] {
    let vertex = &polygon.vertices()[v];
    [vertex.x().to_f64().unwrap(), vertex.y().to_f64().unwrap()]
}

fn cross(a: [f64; 2], b: [f64; 2], c: [f64; 2]) -> f64 {
    (b[0] - a[0]) * (c[1] - a[1]) - (b[1] - a[1]) * (c[0] - a[0])
}

/// Twice the signed area of a loop
fn loop_area<P: PolygonList>(polygon: &P, ring: &[usize]) -> f64 {
    (0..ring.len())
        .map(|i| {
            let (a, b) = (coords(polygon, ring[i]), coords(polygon, ring[(i + 1) % ring.len()]));
            a[0] * b[1] - b[0] * a[1]
        })
        .sum()
}

fn encloses<P: PolygonList>(polygon: &P, ring: &[usize], p: [f64; 2]) -> bool {
    let mut inside = false;
    for i in 0..ring.len() {
        let (a, b) = (coords(polygon, ring[i]), coords(polygon, ring[(i + 1) % ring.len()]));
        if (a[1] > p[1]) != (b[1] > p[1]) && p[0] < a[0] + (p[1] - a[1]) * (b[0] - a[0]) / (b[1] - a[1]) {
            inside = !inside;
        }
    }
    inside
}

/// How many other loops enclose each loop, judged by the midpoint of its first edge
pub fn depths<P: PolygonList>(polygon: &P) -> Vec<usize> {
    let rings: Vec<&[usize]> = polygon.rings().map(|(_, ring)| ring).collect();
    rings.iter().enumerate()
        .map(|(i, ring)| {
            let (a, b) = (coords(polygon, ring[0]), coords(polygon, ring[1]));
            let midpoint = [(a[0] + b[0]) / 2., (a[1] + b[1]) / 2.];
            rings.iter().enumerate().filter(|&(j, other)| j != i && encloses(polygon, other, midpoint)).count()
        })
        .collect()
}

/// Twice the interior area: loops at even depth add theirs, loops at odd depth take it away
pub fn polygon_area<P: PolygonList>(polygon: &P) -> f64 {
    polygon.rings().zip(depths(polygon))
        .map(|((_, ring), depth)| {
            let area = loop_area(polygon, ring).abs();
            if depth % 2 == 0 { area } else { -area }
        })
        .sum()
}

/// Twice the total area of `triangles`
pub fn triangles_area<P: PolygonList>(polygon: &P, triangles: &[Triangle]) -> f64 {
    triangles.iter()
        .map(|&[a, b, c]| cross(coords(polygon, a), coords(polygon, b), coords(polygon, c)))
        .sum()
}

/// Whether two counter-clockwise triangles have overlapping interiors. Two convex shapes are
/// disjoint exactly when one of their edges separates them.
fn overlap(t0: [[f64; 2]; 3], t1: [[f64; 2]; 3], tolerance: f64) -> bool {
    let separated_by = |t: [[f64; 2]; 3], other: [[f64; 2]; 3]| {
        (0..3).any(|i| {
            let (a, b) = (t[i], t[(i + 1) % 3]);
            other.iter().all(|&p| cross(a, b, p) <= tolerance)
        })
    };
    !separated_by(t0, t1) && !separated_by(t1, t0)
}

/// Check that `triangles` form a strict triangulation of `polygon`: counter-clockwise triangles of
/// positive area over loop vertices only, pairwise non-overlapping, covering the interior's area.
/// Loops sharing no vertices must also give `n - 2r + 2h` triangles, for `r` loops at even depth
/// and `h` at odd depth.
pub fn check_triangulation<P: PolygonList>(polygon: &P, triangles: &[Triangle]) {
    let mut on_loop = vec![false; polygon.vertex_count()];
    let mut loop_vertices = 0;
    for (_, ring) in polygon.rings() {
        loop_vertices += ring.len();
        for &v in ring {
            on_loop[v] = true;
        }
    }

    let expected_area = polygon_area(polygon);
    let tolerance = expected_area.abs() * 1e-9;

    let mut corners = Vec::with_capacity(triangles.len());
    for &triangle in triangles {
        for v in triangle {
            assert!(on_loop[v], "{:?} uses v{}, which is on no loop", triangle, v);
        }
        let [a, b, c] = triangle.map(|v| coords(polygon, v));
        assert!(cross(a, b, c) > 0., "{:?} is not counter-clockwise with positive area", triangle);
        corners.push([a, b, c]);
    }

    let area = triangles_area(polygon, triangles);
    assert!((area - expected_area).abs() <= tolerance.max(1e-9), "Triangles cover an area of {}, expected {}", area / 2., expected_area / 2.);

    for (i, &t0) in corners.iter().enumerate() {
        for (j, &t1) in corners.iter().enumerate().skip(i + 1) {
            assert!(!overlap(t0, t1, tolerance), "{:?} and {:?} overlap", triangles[i], triangles[j]);
        }
    }

    let distinct = on_loop.iter().filter(|&&used| used).count();
    if distinct == loop_vertices {
        let (regions, holes) = depths(polygon).iter().fold((0, 0), |(r, h), depth| if depth % 2 == 0 { (r + 1, h) } else { (r, h + 1) });
        assert_eq!(triangles.len() + 2 * regions, loop_vertices + 2 * holes);
    }
}
