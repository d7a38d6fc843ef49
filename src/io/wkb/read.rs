//! WKB reading operations.

use std::io::{Cursor, Read};

use anyhow::{bail, Context, Result};
use geo::{
    Coord, Geometry, GeometryCollection, LineString, MultiLineString,
    MultiPoint, MultiPolygon, Point, Polygon,
};

use super::*;

/// Smallest encoded size of one coordinate, used to bound preallocation.
const COORD_SIZE: usize = 16;

/// Deepest nesting of geometry collections accepted.
const MAX_DEPTH: usize = 32;

/// Read a single geometry from ISO WKB in either byte order.
/// Trailing bytes after the geometry are an error.
pub(crate) fn read_geometry(bytes: &[u8]) -> Result<Geometry<f64>> {
    let mut reader = WkbReader { cursor: Cursor::new(bytes) };
    let geom = reader.geometry(0)?;
    if reader.remaining() != 0 {
        bail!("[io::wkb::read] {} trailing bytes after geometry", reader.remaining());
    }
    Ok(geom)
}

struct WkbReader<'a> {
    cursor: Cursor<&'a [u8]>,
}

impl WkbReader<'_> {
    fn remaining(&self) -> usize {
        self.cursor.get_ref().len().saturating_sub(self.cursor.position() as usize)
    }

    /// Read a header: byte order flag and geometry type code.
    fn header(&mut self) -> Result<(bool, u32)> {
        let mut byte_order = [0u8; 1];
        self.cursor.read_exact(&mut byte_order)
            .context("[io::wkb::read] Failed to read byte order")?;
        let is_le = match byte_order[0] {
            WKB_LE => true,
            WKB_BE => false,
            other => bail!("[io::wkb::read] Invalid byte order flag {other}"),
        };
        let geom_type = self.u32(is_le)
            .context("[io::wkb::read] Failed to read geometry type")?;
        Ok((is_le, geom_type))
    }

    fn u32(&mut self, is_le: bool) -> Result<u32> {
        let mut bytes = [0u8; 4];
        self.cursor.read_exact(&mut bytes)?;
        Ok(if is_le { u32::from_le_bytes(bytes) } else { u32::from_be_bytes(bytes) })
    }

    fn f64(&mut self, is_le: bool) -> Result<f64> {
        let mut bytes = [0u8; 8];
        self.cursor.read_exact(&mut bytes)?;
        Ok(if is_le { f64::from_le_bytes(bytes) } else { f64::from_be_bytes(bytes) })
    }

    fn count(&mut self, is_le: bool, what: &str) -> Result<usize> {
        let count = self.u32(is_le)
            .with_context(|| format!("[io::wkb::read] Failed to read {what} count"))?;
        Ok(count as usize)
    }

    fn coord(&mut self, is_le: bool) -> Result<Coord<f64>> {
        let x = self.f64(is_le).context("[io::wkb::read] Failed to read x coordinate")?;
        let y = self.f64(is_le).context("[io::wkb::read] Failed to read y coordinate")?;
        Ok(Coord { x, y })
    }

    fn ring(&mut self, is_le: bool) -> Result<LineString<f64>> {
        let len = self.count(is_le, "point")?;
        let mut coords = Vec::with_capacity(len.min(self.remaining() / COORD_SIZE));
        for _ in 0..len {
            coords.push(self.coord(is_le)?);
        }
        Ok(LineString::from(coords))
    }

    fn polygon(&mut self, is_le: bool) -> Result<Polygon<f64>> {
        let num_rings = self.count(is_le, "ring")?;
        if num_rings == 0 {
            return Ok(Polygon::new(LineString::new(vec![]), vec![]))
        }
        let exterior = self.ring(is_le)?;
        let interiors = (1..num_rings)
            .map(|_| self.ring(is_le))
            .collect::<Result<Vec<_>>>()?;
        Ok(Polygon::new(exterior, interiors))
    }

    /// Read a member of a multi-geometry, which must carry its own header of type `expected`.
    fn member(&mut self, expected: u32) -> Result<bool> {
        let (is_le, geom_type) = self.header()?;
        if geom_type != expected {
            bail!("[io::wkb::read] Expected member of type {expected}, got {geom_type}");
        }
        Ok(is_le)
    }

    fn geometry(&mut self, depth: usize) -> Result<Geometry<f64>> {
        if depth > MAX_DEPTH {
            bail!("[io::wkb::read] Geometry collections nested deeper than {MAX_DEPTH}");
        }
        let (is_le, geom_type) = self.header()?;
        let geom = match geom_type {
            WKB_POINT => Geometry::Point(Point(self.coord(is_le)?)),
            WKB_LINESTRING => Geometry::LineString(self.ring(is_le)?),
            WKB_POLYGON => Geometry::Polygon(self.polygon(is_le)?),
            WKB_MULTIPOINT => {
                let count = self.count(is_le, "point")?;
                let mut points = Vec::new();
                for _ in 0..count {
                    let is_le = self.member(WKB_POINT)?;
                    points.push(Point(self.coord(is_le)?));
                }
                Geometry::MultiPoint(MultiPoint(points))
            }
            WKB_MULTILINESTRING => {
                let count = self.count(is_le, "linestring")?;
                let mut lines = Vec::new();
                for _ in 0..count {
                    let is_le = self.member(WKB_LINESTRING)?;
                    lines.push(self.ring(is_le)?);
                }
                Geometry::MultiLineString(MultiLineString::new(lines))
            }
            WKB_MULTIPOLYGON => {
                let count = self.count(is_le, "polygon")?;
                let mut polygons = Vec::new();
                for _ in 0..count {
                    let is_le = self.member(WKB_POLYGON)?;
                    polygons.push(self.polygon(is_le)?);
                }
                Geometry::MultiPolygon(MultiPolygon(polygons))
            }
            WKB_GEOMETRYCOLLECTION => {
                let count = self.count(is_le, "member")?;
                let members = (0..count)
                    .map(|_| self.geometry(depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                Geometry::GeometryCollection(GeometryCollection(members))
            }
            other => bail!("[io::wkb::read] Unsupported geometry type {other} (only 2D types 1-7)"),
        };
        Ok(geom)
    }
}
