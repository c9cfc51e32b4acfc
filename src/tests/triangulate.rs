use crate::{PolygonList, PolygonWithHoles, PolygonalArea, TriangulationOptions, triangulate};

use super::util::{self, checks::check_triangulation};

#[test]
fn fixtures() {
    for polygon in [util::polygon::square(), util::polygon::star(), util::polygon::half_frame()] {
        let triangles = polygon.triangulate().expect("Triangulation failed");
        check_triangulation(&polygon, &triangles);
    }
    for polygon in util::polygon::all() {
        let triangles = polygon.triangulate().expect("Triangulation failed");
        check_triangulation(&polygon, &triangles);
    }
}

#[test]
fn square() {
    let polygon = PolygonWithHoles::simple(vec![[0., 0.], [1., 0.], [1., 1.], [0., 1.]]);
    let triangles = triangulate(&polygon).expect("Triangulation failed");
    assert_eq!(triangles.len(), 2);
    assert_eq!(util::checks::triangles_area(&polygon, &triangles), 2.);
    check_triangulation(&polygon, &triangles);
}

#[test]
fn square_with_hole() {
    let polygon = util::polygon::square_with_hole();
    let triangles = polygon.triangulate().expect("Triangulation failed");
    assert_eq!(triangles.len(), 8);
    // 16 - 4, doubled
    assert_eq!(util::checks::triangles_area(&polygon, &triangles), 24.);
    check_triangulation(&polygon, &triangles);
}

#[test]
fn two_holes() {
    let polygon = util::polygon::two_holes();
    let triangles = polygon.triangulate().expect("Triangulation failed");
    assert_eq!(triangles.len(), 14);
    check_triangulation(&polygon, &triangles);
}

#[test]
fn collinear_vertex() {
    let polygon = util::polygon::collinear_rectangle();
    let triangles = polygon.triangulate().expect("Triangulation failed");
    assert_eq!(triangles.len(), 3);
    assert!(triangles.iter().any(|t| t.contains(&1)), "The collinear vertex is in no triangle");
    check_triangulation(&polygon, &triangles);
}

#[test]
fn lattice_rectangle() {
    let polygon = util::polygon::lattice_rectangle();
    let triangles = polygon.triangulate().expect("Triangulation failed");
    for v in polygon.outer() {
        assert!(triangles.iter().any(|t| t.contains(v)), "v{} is in no triangle", v);
    }
    check_triangulation(&polygon, &triangles);
}

#[test]
fn triangulate_hollow() {
    let polygon = PolygonWithHoles::from_loops(
        vec![[0f32, 0f32], [0., 1.], [1., 1.], [1., 0.]],
        vec![vec![[0.05, 0.05], [0.05, 0.95], [0.95, 0.95], [0.95, 0.05]]],
    );
    let triangles = polygon.triangulate().expect("Triangulation failed");
    check_triangulation(&polygon, &triangles);
}

#[test]
fn tuple_vertices() {
    let polygon = PolygonWithHoles::simple(vec![(0., 0.), (3., 0.), (3., 2.), (1., 1.), (0., 2.)]);
    let triangles = polygon.triangulate().expect("Triangulation failed");
    check_triangulation(&polygon, &triangles);
}

#[test]
fn shared_vertex_list() {
    // Loops refer to a vertex list in no particular order, with one vertex used by none
    let vertices = vec![[2., 2.], [0., 0.], [9., 9.], [4., 0.], [4., 4.], [0., 4.], [3., 2.], [2., 3.]];
    let polygon = PolygonWithHoles::new(vertices, vec![1, 3, 4, 5], Vec::new()).with_hole(vec![0, 6, 7]);
    let triangles = polygon.triangulate().expect("Triangulation failed");
    assert!(triangles.iter().all(|t| !t.contains(&2)));
    check_triangulation(&polygon, &triangles);
}

#[test]
fn hole_touching_outer() {
    let polygon = util::polygon::hole_touching_corner();
    let triangles = polygon.triangulate().expect("Triangulation failed");
    check_triangulation(&polygon, &triangles);
}

#[test]
fn orientation_is_normalized() {
    let outer = vec![[0., 0.], [6., 0.], [6., 4.], [0., 4.]];
    let hole = vec![[1., 1.], [2., 1.], [2., 3.], [1., 3.]];
    let reversed = |ring: &Vec<[f64; 2]>| ring.iter().rev().copied().collect::<Vec<_>>();

    for (outer, hole) in [(outer.clone(), hole.clone()), (reversed(&outer), reversed(&hole)), (outer.clone(), reversed(&hole))] {
        let polygon = PolygonWithHoles::from_loops(outer, vec![hole]);
        let triangles = polygon.triangulate().expect("Triangulation failed");
        assert_eq!(triangles.len(), 8);
        check_triangulation(&polygon, &triangles);
    }
}

#[test]
fn regular_polygons() {
    let options = TriangulationOptions::new().with_verify_structure(true);
    for n in 3..=200 {
        let polygon = util::polygon::regular(n);
        let triangles = polygon.triangulate_with(&options).expect("Triangulation failed");
        assert_eq!(triangles.len(), n - 2);
        // Overlap checks are quadratic; area alone for the larger ones
        if n <= 60 {
            check_triangulation(&polygon, &triangles);
        } else {
            let expected = util::checks::polygon_area(&polygon);
            assert!((util::checks::triangles_area(&polygon, &triangles) - expected).abs() < expected * 1e-9);
        }
    }
}

#[test]
fn island_in_hole() {
    let area = util::polygon::island_in_hole();
    let triangles = area.triangulate().expect("Triangulation failed");
    // The frame around the hole, then the island
    assert_eq!(triangles.len(), 10);
    assert_eq!(util::checks::triangles_area(&area, &triangles), 2. * (36. - 16. + 4.));
    let island = &area.loops()[0];
    assert_eq!(triangles.iter().filter(|t| t.iter().all(|v| island.contains(v))).count(), 2);
    check_triangulation(&area, &triangles);
}

#[test]
fn disjoint_regions() {
    let area = util::polygon::disjoint_regions();
    let triangles = area.triangulate().expect("Triangulation failed");
    assert_eq!(triangles.len(), 17);
    check_triangulation(&area, &triangles);
}

#[test]
fn regions_sharing_a_vertex() {
    let area = util::polygon::squares_sharing_corner();
    let triangles = area.triangulate().expect("Triangulation failed");
    assert_eq!(triangles.len(), 4);
    check_triangulation(&area, &triangles);
}

#[test]
fn area_winding_is_irrelevant() {
    // Every loop reversed gives the same interior
    let area = util::polygon::island_in_hole();
    let reversed = PolygonalArea::new(
        area.vertices().to_vec(),
        area.loops().iter().map(|ring| ring.iter().rev().copied().collect()).collect(),
    );
    let triangles = reversed.triangulate().expect("Triangulation failed");
    assert_eq!(triangles.len(), 10);
    check_triangulation(&reversed, &triangles);
}

#[test]
fn area_matches_polygon_with_holes() {
    // Under the even-odd rule an outer loop and its holes describe the same interior
    for polygon in util::polygon::all() {
        let area = PolygonalArea::new(polygon.vertices().to_vec(), polygon.rings().map(|(_, ring)| ring.to_vec()).collect());
        let triangles = area.triangulate().expect("Triangulation failed");
        check_triangulation(&area, &triangles);
        let expected = util::checks::triangles_area(&polygon, &polygon.triangulate().unwrap());
        assert!((util::checks::triangles_area(&area, &triangles) - expected).abs() < 1e-9);
    }
}

#[test]
fn empty_area() {
    let area: PolygonalArea<[f64; 2]> = PolygonalArea::new(Vec::new(), Vec::new());
    assert!(area.triangulate().expect("Triangulation failed").is_empty());
}
