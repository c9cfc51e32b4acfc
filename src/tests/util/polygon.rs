use crate::{PolygonWithHoles, PolygonalArea};

use super::vtest::VTest;

pub fn square() -> PolygonWithHoles<VTest> {
    PolygonWithHoles::simple(vec![
        (0.0, 0.0).into(),
        (0.0, 1.0).into(),
        (1.0, 1.0).into(),
        (1.0, 0.0).into(),
    ])
}

pub fn star() -> PolygonWithHoles<VTest> {
    PolygonWithHoles::simple(vec![
        (1.0, 0.0).into(),
        (2.0, 2.0).into(),
        (0.0, 1.0).into(),
        (-2.0, 2.0).into(),
        (-1.0, 0.0).into(),
        (-2.0, -2.0).into(),
        (0.0, -1.0).into(),
        (2.0, -2.0).into(),
    ])
}

pub fn half_frame() -> PolygonWithHoles<VTest> {
    PolygonWithHoles::simple(vec![
        (0., 0.).into(), (0.05, 0.05).into(), (0.95, 0.05).into(), (0.95, 0.95).into(), (1., 1.).into(), (1., 0.).into()
    ])
}

/// 4x4 square with a 2x2 square hole in the middle
pub fn square_with_hole() -> PolygonWithHoles<[f64; 2]> {
    PolygonWithHoles::from_loops(
        vec![[0., 0.], [4., 0.], [4., 4.], [0., 4.]],
        vec![vec![[1., 1.], [1., 3.], [3., 3.], [3., 1.]]],
    )
}

/// 6x4 rectangle with two 1x2 holes side by side; all holes share x and y coordinates with each other
pub fn two_holes() -> PolygonWithHoles<[f64; 2]> {
    PolygonWithHoles::from_loops(
        vec![[0., 0.], [6., 0.], [6., 4.], [0., 4.]],
        vec![
            vec![[1., 1.], [2., 1.], [2., 3.], [1., 3.]],
            vec![[4., 1.], [5., 1.], [5., 3.], [4., 3.]],
        ],
    )
}

/// 2x1 rectangle with an extra vertex halfway along its bottom edge
pub fn collinear_rectangle() -> PolygonWithHoles<[f64; 2]> {
    PolygonWithHoles::simple(vec![[0., 0.], [1., 0.], [2., 0.], [2., 1.], [0., 1.]])
}

/// 4x3 rectangle with a vertex at every integer point of its boundary
pub fn lattice_rectangle() -> PolygonWithHoles<[f64; 2]> {
    let mut vertices = Vec::new();
    vertices.extend((0..4).map(|x| [x as f64, 0.]));
    vertices.extend((0..3).map(|y| [4., y as f64]));
    vertices.extend((1..=4).rev().map(|x| [x as f64, 3.]));
    vertices.extend((1..=3).rev().map(|y| [0., y as f64]));
    PolygonWithHoles::simple(vertices)
}

/// Three teeth standing on a 7x1 bar; many vertices share x coordinates and edges are vertical
pub fn comb() -> PolygonWithHoles<[f64; 2]> {
    PolygonWithHoles::simple(vec![
        [0., 0.], [7., 0.], [7., 3.], [6., 3.], [6., 1.], [5., 1.], [5., 3.], [4., 3.],
        [4., 1.], [3., 1.], [3., 3.], [2., 3.], [2., 1.], [1., 1.], [1., 3.], [0., 3.],
    ])
}

/// Square with a triangular hole that touches the outer loop at its corner vertex
pub fn hole_touching_corner() -> PolygonWithHoles<[f64; 2]> {
    PolygonWithHoles::new(
        vec![[0., 0.], [4., 0.], [4., 4.], [0., 4.], [2., 1.], [1., 2.]],
        vec![0, 1, 2, 3],
        vec![vec![0, 4, 5]],
    )
}

/// Regular `n`-gon of radius 100
pub fn regular(n: usize) -> PolygonWithHoles<[f64; 2]> {
    let vertices = (0..n)
        .map(|i| {
            let theta = std::f64::consts::PI * 2. * (i as f64) / (n as f64);
            let (y, x) = theta.sin_cos();
            [x * 100., y * 100.]
        })
        .collect();
    PolygonWithHoles::simple(vertices)
}

fn square_loop(min: f64, max: f64) -> Vec<[f64; 2]> {
    vec![[min, min], [max, min], [max, max], [min, max]]
}

/// Square frame with a square island in its hole, loops listed innermost first and wound
/// alternately
pub fn island_in_hole() -> PolygonalArea<[f64; 2]> {
    let mut hole = square_loop(1., 5.);
    hole.reverse();
    PolygonalArea::from_loops(vec![square_loop(2., 4.), hole, square_loop(0., 6.)])
}

/// Two frames side by side, the right one with an island
pub fn disjoint_regions() -> PolygonalArea<[f64; 2]> {
    PolygonalArea::from_loops(vec![
        square_loop(0., 3.),
        square_loop(1., 2.),
        vec![[4., 0.], [10., 0.], [10., 6.], [4., 6.]],
        vec![[5., 1.], [9., 1.], [9., 5.], [5., 5.]],
        vec![[6., 2.], [8., 2.], [7., 4.]],
    ])
}

/// Two squares meeting at one shared corner vertex
pub fn squares_sharing_corner() -> PolygonalArea<[f64; 2]> {
    PolygonalArea::new(
        vec![[0., 0.], [2., 0.], [2., 2.], [0., 2.], [4., 2.], [4., 4.], [2., 4.]],
        vec![vec![0, 1, 2, 3], vec![2, 4, 5, 6]],
    )
}

pub fn areas() -> Vec<PolygonalArea<[f64; 2]>> {
    vec![island_in_hole(), disjoint_regions(), squares_sharing_corner()]
}

pub fn all() -> Vec<PolygonWithHoles<[f64; 2]>> {
    vec![square_with_hole(), two_holes(), collinear_rectangle(), lattice_rectangle(), comb()]
}
