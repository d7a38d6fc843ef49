//! WKB writing operations.

use geo::{Coord, Geometry, LineString, Polygon};

use super::*;

/// Write a geometry to little-endian ISO WKB.
/// `Line` is written as a LineString, `Rect` and `Triangle` as Polygons.
pub(crate) fn write_geometry(geom: &Geometry<f64>) -> Vec<u8> {
    let mut wkb = Vec::new();
    write_into(&mut wkb, geom);
    wkb
}

fn write_into(wkb: &mut Vec<u8>, geom: &Geometry<f64>) {
    match geom {
        Geometry::Point(point) => {
            write_header(wkb, WKB_POINT);
            write_coord(wkb, point.0);
        }
        Geometry::Line(line) => {
            write_header(wkb, WKB_LINESTRING);
            write_count(wkb, 2);
            write_coord(wkb, line.start);
            write_coord(wkb, line.end);
        }
        Geometry::LineString(ls) => {
            write_header(wkb, WKB_LINESTRING);
            write_ring(wkb, ls);
        }
        Geometry::Polygon(polygon) => write_polygon(wkb, polygon),
        Geometry::Rect(rect) => write_polygon(wkb, &rect.to_polygon()),
        Geometry::Triangle(triangle) => write_polygon(wkb, &triangle.to_polygon()),
        Geometry::MultiPoint(multi) => {
            write_header(wkb, WKB_MULTIPOINT);
            write_count(wkb, multi.0.len());
            for point in &multi.0 {
                write_header(wkb, WKB_POINT);
                write_coord(wkb, point.0);
            }
        }
        Geometry::MultiLineString(multi) => {
            write_header(wkb, WKB_MULTILINESTRING);
            write_count(wkb, multi.0.len());
            for ls in &multi.0 {
                write_header(wkb, WKB_LINESTRING);
                write_ring(wkb, ls);
            }
        }
        Geometry::MultiPolygon(multi) => {
            write_header(wkb, WKB_MULTIPOLYGON);
            write_count(wkb, multi.0.len());
            for polygon in &multi.0 {
                write_polygon(wkb, polygon);
            }
        }
        Geometry::GeometryCollection(gc) => {
            write_header(wkb, WKB_GEOMETRYCOLLECTION);
            write_count(wkb, gc.0.len());
            for member in &gc.0 {
                write_into(wkb, member);
            }
        }
    }
}

#[inline]
fn write_header(wkb: &mut Vec<u8>, geom_type: u32) {
    wkb.push(WKB_LE);
    wkb.extend_from_slice(&geom_type.to_le_bytes());
}

#[inline]
fn write_count(wkb: &mut Vec<u8>, count: usize) {
    wkb.extend_from_slice(&(count as u32).to_le_bytes());
}

#[inline]
fn write_coord(wkb: &mut Vec<u8>, coord: Coord<f64>) {
    wkb.extend_from_slice(&coord.x.to_le_bytes());
    wkb.extend_from_slice(&coord.y.to_le_bytes());
}

/// Write a point count followed by the coordinates (LineString body or polygon ring).
fn write_ring(wkb: &mut Vec<u8>, ring: &LineString<f64>) {
    write_count(wkb, ring.0.len());
    for &coord in &ring.0 {
        write_coord(wkb, coord);
    }
}

fn write_polygon(wkb: &mut Vec<u8>, polygon: &Polygon<f64>) {
    write_header(wkb, WKB_POLYGON);

    // An empty exterior is written as a polygon with no rings.
    if polygon.exterior().0.is_empty() {
        write_count(wkb, 0);
        return
    }

    write_count(wkb, 1 + polygon.interiors().len());
    write_ring(wkb, polygon.exterior());
    for interior in polygon.interiors() {
        write_ring(wkb, interior);
    }
}
