use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::PolygonWithHoles;

const TAU: f64 = std::f64::consts::PI * 2.;

// Hole centers, relative to the outer radius. Holes placed here cannot touch each other or the
// outer loop: the outer loop keeps clear of a disk of radius 0.42, holes reach at most 0.30.
const HOLE_SLOTS: [[f64; 2]; 5] = [[0., 0.], [0.22, 0.], [-0.22, 0.], [0., 0.22], [0., -0.22]];
const HOLE_RADIUS: f64 = 0.08;

/// A star-shaped loop around `center` with `n` vertices at radii in `min_radius..max_radius`.
///
/// Consecutive vertices are less than `1.5 * TAU / n` apart in angle, so for `n >= 6` every edge
/// stays at least `min_radius * cos(TAU / 8)` away from the center.
fn star_loop<R: Rng + ?Sized>(rng: &mut R, center: [f64; 2], n: usize, min_radius: f64, max_radius: f64) -> Vec<[f64; 2]> {
    (0..n)
        .map(|i| {
            let theta = TAU * (i as f64 + rng.gen_range(0.0..0.5)) / n as f64;
            let radius = rng.gen_range(min_radius..max_radius);
            let (y, x) = theta.sin_cos();
            [center[0] + x * radius, center[1] + y * radius]
        })
        .collect()
}

/// A random polygon with `outer_vertices` outer vertices and `holes` holes of 3 to 8 vertices each
pub fn polygon_with_holes<R: Rng + ?Sized>(rng: &mut R, outer_vertices: usize, holes: usize) -> PolygonWithHoles<[f64; 2]> {
    assert!(outer_vertices >= 6, "outer loop needs at least 6 vertices to keep clear of the holes");
    assert!(holes <= HOLE_SLOTS.len(), "at most {} holes are supported", HOLE_SLOTS.len());

    let scale = 100.;
    let outer = star_loop(rng, [0., 0.], outer_vertices, 0.6 * scale, scale);
    let holes = HOLE_SLOTS[..holes]
        .iter()
        .map(|&[x, y]| {
            let n = rng.gen_range(3..=8);
            star_loop(rng, [x * scale, y * scale], n, 0.5 * HOLE_RADIUS * scale, HOLE_RADIUS * scale)
        })
        .collect();
    PolygonWithHoles::from_loops(outer, holes)
}

/// Polygons of increasing size for benchmarks, generated from a fixed seed
pub fn benchmark_polygons() -> Vec<PolygonWithHoles<[f64; 2]>> {
    let mut rng = StdRng::seed_from_u64(0xbe7c);
    [16, 128, 1024, 8192]
        .iter()
        .map(|&n| polygon_with_holes(&mut rng, n, 5))
        .collect()
}
