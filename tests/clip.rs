// Integration tests for clipping feature frames against a polygon boundary:
//   points, lines, polygons and their multi variants, attribute preservation,
//   extent checks, and dissolved boundaries.

use std::f64::consts::TAU;

use approx::assert_abs_diff_eq;
use geo::{
    coord, line_string, point, polygon, Area, BooleanOps, Coord, Geometry,
    Intersects, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};
use polars::prelude::*;

use geoclip::{clip, ClipError, FeatureCollection, FeatureFrame, GeomType};

/// Regular polygon approximating a circle of `radius` around `center`.
fn buffer(center: Point<f64>, radius: f64) -> Polygon<f64> {
    let ring = (0..64)
        .map(|i| {
            let angle = TAU * i as f64 / 64.0;
            Coord { x: center.x() + radius * angle.cos(), y: center.y() + radius * angle.sin() }
        })
        .collect::<Vec<_>>();
    Polygon::new(LineString::from(ring), vec![])
}

fn locations() -> Vec<Point<f64>> {
    vec![
        point!(x: 2.0, y: 2.0),
        point!(x: 3.0, y: 4.0),
        point!(x: 9.0, y: 8.0),
        point!(x: -12.0, y: -15.0),
    ]
}

fn point_frame() -> FeatureFrame {
    FeatureFrame::from_geometry(locations().into_iter().map(Geometry::Point).collect())
        .with_epsg(4326)
}

fn single_rectangle() -> FeatureFrame {
    FeatureFrame::from_geometry(vec![
        polygon![(x: 0.0, y: 0.0), (x: 0.0, y: 10.0), (x: 10.0, y: 10.0), (x: 10.0, y: 0.0), (x: 0.0, y: 0.0)].into(),
    ])
        .with_epsg(4326)
        .with_column(Series::new("attr2".into(), &["site-boundary"])).unwrap()
}

fn larger_single_rectangle() -> FeatureFrame {
    FeatureFrame::from_geometry(vec![
        polygon![(x: -5.0, y: -5.0), (x: -5.0, y: 15.0), (x: 15.0, y: 15.0), (x: 15.0, y: -5.0), (x: -5.0, y: -5.0)].into(),
    ])
        .with_epsg(4326)
        .with_column(Series::new("attr2".into(), &["study area"])).unwrap()
}

fn buffered_locations() -> FeatureFrame {
    FeatureFrame::from_geometry(locations().into_iter().map(|pt| Geometry::Polygon(buffer(pt, 4.0))).collect())
        .with_epsg(4326)
        .with_column(Series::new("type".into(), &["plot"; 4])).unwrap()
}

/// The rectangle with the buffered locations punched out, plus the parts of
/// the buffers outside it, as a single multipolygon feature.
fn multi_poly_frame() -> FeatureFrame {
    let buffers = buffered_locations().unary_union().unwrap();
    let square = single_rectangle().unary_union().unwrap();
    let donut: MultiPolygon<f64> = buffers.xor(&square);
    FeatureFrame::from_geometry(vec![donut.into()])
        .with_epsg(4326)
        .with_column(Series::new("attr".into(), &["pool"])).unwrap()
}

fn two_lines() -> (LineString<f64>, LineString<f64>) {
    (
        line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 2.0), (x: 3.0, y: 2.0), (x: 5.0, y: 3.0)],
        line_string![(x: 3.0, y: 4.0), (x: 5.0, y: 7.0), (x: 12.0, y: 2.0), (x: 10.0, y: 5.0), (x: 9.0, y: 7.5)],
    )
}

fn two_line_frame() -> FeatureFrame {
    let (a, b) = two_lines();
    FeatureFrame::from_geometry(vec![a.into(), b.into()])
        .with_epsg(4326)
        .with_column(Series::new("id".into(), &[1i64, 2])).unwrap()
}

fn multi_line_frame() -> FeatureFrame {
    let (a, b) = two_lines();
    let c = line_string![(x: 2.0, y: 1.0), (x: 3.0, y: 1.0), (x: 4.0, y: 1.0), (x: 5.0, y: 2.0)];
    FeatureFrame::from_geometry(vec![MultiLineString::new(vec![a, b]).into(), c.into()])
        .with_epsg(4326)
        .with_column(Series::new("attr".into(), &["road", "stream"])).unwrap()
}

fn multi_point_frame() -> FeatureFrame {
    FeatureFrame::from_geometry(vec![
        MultiPoint(locations()).into(),
        point!(x: 2.0, y: 5.0).into(),
        point!(x: -11.0, y: -14.0).into(),
        point!(x: -10.0, y: -12.0).into(),
    ])
        .with_epsg(4326)
        .with_column(Series::new("attr".into(), &["tree", "another tree", "shrub", "berries"])).unwrap()
}

fn strings(frame: &FeatureFrame, name: &str) -> Vec<String> {
    frame.column(name).unwrap()
        .as_materialized_series().str().unwrap()
        .into_iter()
        .map(|value| value.unwrap_or_default().to_string())
        .collect()
}

#[test]
fn non_overlapping_extents_are_disjoint() {
    let unit_box = polygon![(x: 0.0, y: 0.0), (x: 0.0, y: 1.0), (x: 1.0, y: 1.0), (x: 1.0, y: 0.0)];
    let shifted = polygon![(x: 20.0, y: 0.0), (x: 20.0, y: 1.0), (x: 21.0, y: 1.0), (x: 21.0, y: 0.0)];
    let target = FeatureFrame::from_geometry(vec![unit_box.into()]);
    let boundary = FeatureFrame::from_geometry(vec![shifted.into()]);

    let err = clip(&target, &boundary).unwrap_err();
    assert!(matches!(err, ClipError::DisjointExtent { .. }));
}

#[test]
fn returns_feature_frame() {
    let out = clip(&point_frame(), &single_rectangle()).unwrap();
    assert!(!out.geometry().is_empty());
    assert!(out.bounding_box().is_some());
}

#[test]
fn clip_points() {
    let out = clip(&point_frame(), &single_rectangle()).unwrap();
    assert_eq!(out.len(), 3);
    assert_eq!(out.geom_types()[1], GeomType::Point);
    assert!(!out.geometry().contains(&Geometry::Point(point!(x: -12.0, y: -15.0))));
    assert_eq!(out.epsg(), Some(4326));
}

#[test]
fn clip_poly() {
    let out = clip(&buffered_locations(), &single_rectangle()).unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.geom_types().iter().all(|ty| *ty == GeomType::Polygon));
    assert_eq!(strings(&out, "type"), vec!["plot"; 3]);
}

#[test]
fn clip_multipoly_matches_boundary_extent() {
    let boundary = single_rectangle();
    let out = clip(&multi_poly_frame(), &boundary).unwrap();
    assert_eq!(out.len(), 1);
    assert_eq!(strings(&out, "attr"), vec!["pool"]);

    let got = out.total_bounds().unwrap();
    let expected = boundary.total_bounds().unwrap();
    assert_abs_diff_eq!(got.min().x, expected.min().x, epsilon = 1e-6);
    assert_abs_diff_eq!(got.min().y, expected.min().y, epsilon = 1e-6);
    assert_abs_diff_eq!(got.max().x, expected.max().x, epsilon = 1e-6);
    assert_abs_diff_eq!(got.max().y, expected.max().y, epsilon = 1e-6);
}

#[test]
fn clip_larger_polygon_to_boundary() {
    let target = larger_single_rectangle();
    let boundary = single_rectangle();
    let out = clip(&target, &boundary).unwrap();
    assert_eq!(out.geom_types(), vec![GeomType::Polygon]);

    let got = out.total_bounds().unwrap();
    assert_abs_diff_eq!(got.min().x, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(got.min().y, 0.0, epsilon = 1e-6);
    assert_abs_diff_eq!(got.max().x, 10.0, epsilon = 1e-6);
    assert_abs_diff_eq!(got.max().y, 10.0, epsilon = 1e-6);
}

#[test]
fn clip_single_multipolygon() {
    let multi = buffered_locations().dissolve("type").unwrap();
    assert_eq!(multi.geom_types(), vec![GeomType::MultiPolygon]);

    let out = clip(&multi, &larger_single_rectangle()).unwrap();
    assert_eq!(out.geom_types()[0], GeomType::Polygon);
}

#[test]
fn clip_multiline() {
    let out = clip(&multi_line_frame(), &single_rectangle()).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out.geom_types()[0], GeomType::MultiLineString);
    assert_eq!(strings(&out, "attr"), vec!["road", "stream"]);
}

#[test]
fn clip_multipoint() {
    let boundary = single_rectangle();
    let out = clip(&multi_point_frame(), &boundary).unwrap();
    assert_eq!(out.geom_types(), vec![GeomType::MultiPoint, GeomType::Point]);
    assert_eq!(strings(&out, "attr"), vec!["tree", "another tree"]);

    let area = boundary.unary_union().unwrap();
    assert!(out.intersects(&area).into_iter().all(|hit| hit));
}

/// Assert a clipped line has the expected vertices, in either direction.
fn assert_line_coords(line: &LineString<f64>, expected: &[(f64, f64)]) {
    assert_eq!(line.0.len(), expected.len(), "vertex count of {line:?}");
    let forward = line.0.first().map(|c| (c.x - expected[0].0).abs() < 1e-6 && (c.y - expected[0].1).abs() < 1e-6);
    let coords: Vec<Coord<f64>> = if forward == Some(true) {
        line.0.clone()
    } else {
        line.0.iter().rev().copied().collect()
    };
    for (got, &(x, y)) in coords.iter().zip(expected) {
        assert_abs_diff_eq!(got.x, x, epsilon = 1e-6);
        assert_abs_diff_eq!(got.y, y, epsilon = 1e-6);
    }
}

#[test]
fn clip_lines() {
    let out = clip(&two_line_frame(), &single_rectangle()).unwrap();
    assert_eq!(out.len(), 2);
    assert_eq!(out.geom_types(), vec![GeomType::LineString, GeomType::MultiLineString]);

    // The first line lies inside the rectangle and is unchanged.
    let Geometry::LineString(inside) = &out.geometry()[0] else { unreachable!() };
    assert_line_coords(inside, &[(1.0, 1.0), (2.0, 2.0), (3.0, 2.0), (5.0, 3.0)]);

    // The second line leaves at x = 10 and comes back in, leaving two pieces.
    let Geometry::MultiLineString(pieces) = &out.geometry()[1] else { unreachable!() };
    assert_eq!(pieces.0.len(), 2);
    let exit_y = 7.0 - 5.0 * 5.0 / 7.0;
    let mut pieces = pieces.0.clone();
    pieces.sort_by_key(|piece| piece.0.len());
    assert_line_coords(&pieces[0], &[(10.0, 5.0), (9.0, 7.5)]);
    assert_line_coords(&pieces[1], &[(3.0, 4.0), (5.0, 7.0), (10.0, exit_y)]);
}

#[test]
fn touching_multiline_parts_keep_their_structure() {
    let road = MultiLineString::new(vec![
        line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 2.0)],
        line_string![(x: 2.0, y: 2.0), (x: 3.0, y: 1.0)],
    ]);
    let target = FeatureFrame::from_geometry(vec![road.into()]);
    let out = clip(&target, &single_rectangle()).unwrap();
    assert_eq!(out.geom_types(), vec![GeomType::MultiLineString]);

    let Geometry::MultiLineString(parts) = &out.geometry()[0] else { unreachable!() };
    assert_eq!(parts.0.len(), 2);
    assert_line_coords(&parts.0[0], &[(1.0, 1.0), (2.0, 2.0)]);
    assert_line_coords(&parts.0[1], &[(2.0, 2.0), (3.0, 1.0)]);
}

#[test]
fn overlapping_boundary_parts_are_merged() {
    let boundary = FeatureFrame::from_geometry(vec![
        MultiPolygon(vec![
            polygon![(x: 0.0, y: 0.0), (x: 2.0, y: 0.0), (x: 2.0, y: 2.0), (x: 0.0, y: 2.0)],
            polygon![(x: 1.0, y: 1.0), (x: 3.0, y: 1.0), (x: 3.0, y: 3.0), (x: 1.0, y: 3.0)],
        ]).into(),
    ]);

    let in_overlap = FeatureFrame::from_geometry(vec![point!(x: 1.5, y: 1.5).into()]);
    assert_eq!(clip(&in_overlap, &boundary).unwrap().len(), 1);

    let cover = FeatureFrame::from_geometry(vec![
        polygon![(x: -1.0, y: -1.0), (x: 4.0, y: -1.0), (x: 4.0, y: 4.0), (x: -1.0, y: 4.0)].into(),
    ]);
    let out = clip(&cover, &boundary).unwrap();
    assert_eq!(out.geom_types(), vec![GeomType::Polygon]);
    assert_abs_diff_eq!(out.geometry()[0].unsigned_area(), 7.0, epsilon = 1e-6);
}

#[test]
fn boundary_attributes_are_discarded() {
    let target = point_frame()
        .with_column(Series::new("name".into(), &["a", "b", "c", "d"])).unwrap();
    let out = clip(&target, &single_rectangle()).unwrap();
    assert_eq!(out.attributes().get_column_names_str(), vec!["name"]);
    assert_eq!(strings(&out, "name"), vec!["a", "b", "c"]);
}

#[test]
fn result_is_contained_and_no_larger() {
    let boundary = single_rectangle();
    let area = boundary.unary_union().unwrap();
    for target in [point_frame(), buffered_locations(), two_line_frame(), multi_line_frame(), multi_point_frame()] {
        let out = clip(&target, &boundary).unwrap();
        assert!(out.len() <= target.len());
        assert!(out.geometry().iter().all(|geom| geom.intersects(&area)));
        assert_eq!(
            out.attributes().get_column_names_str(),
            target.attributes().get_column_names_str(),
        );
    }
}

#[test]
fn adjacent_boundary_polygons_are_dissolved() {
    let boundary = FeatureFrame::from_geometry(vec![
        polygon![(x: 0.0, y: 0.0), (x: 5.0, y: 0.0), (x: 5.0, y: 10.0), (x: 0.0, y: 10.0)].into(),
        polygon![(x: 5.0, y: 0.0), (x: 10.0, y: 0.0), (x: 10.0, y: 10.0), (x: 5.0, y: 10.0)].into(),
    ]);
    let target = FeatureFrame::from_geometry(vec![
        line_string![(x: 1.0, y: 5.0), (x: 9.0, y: 5.0)].into(),
    ]);
    let out = clip(&target, &boundary).unwrap();
    assert_eq!(out.geom_types(), vec![GeomType::LineString]);
}

#[test]
fn boundary_touching_target_extent_is_not_disjoint() {
    // Extents share the edge x = 10, so the check passes even though nothing survives.
    let target = FeatureFrame::from_geometry(vec![
        polygon![(x: 10.0, y: 0.0), (x: 12.0, y: 0.0), (x: 12.0, y: 2.0), (x: 10.0, y: 2.0)].into(),
    ]);
    let out = clip(&target, &single_rectangle()).unwrap();
    assert!(out.is_empty());
}

#[test]
fn inputs_are_not_mutated() {
    let target = buffered_locations();
    let before = target.geometry().to_vec();
    clip(&target, &single_rectangle()).unwrap();
    assert_eq!(target.geometry(), before.as_slice());
    assert_eq!(target.len(), 4);
}

#[test]
fn rect_boundary_is_polygonal() {
    let boundary = FeatureFrame::from_geometry(vec![
        geo::Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 10.0 }).into(),
    ]);
    let out = clip(&point_frame(), &boundary).unwrap();
    assert_eq!(out.len(), 3);
}
