use geo::{
    BooleanOps, Geometry, GeometryCollection, Intersects, LineString,
    MultiLineString, MultiPoint, MultiPolygon, Point,
};

/// Intersect a single geometry with the clip area.
///
/// The result type follows what survives: one point, line or polygon part
/// yields the single type, several yield the multi type. Returns `None` when
/// nothing survives. Points on the clip boundary are kept.
pub(crate) fn intersect(geom: &Geometry<f64>, clip: &MultiPolygon<f64>) -> Option<Geometry<f64>> {
    match geom {
        Geometry::Point(point) => clip.intersects(point).then_some(Geometry::Point(*point)),
        Geometry::MultiPoint(multi) => points(
            multi.0.iter().copied().filter(|point| clip.intersects(point)).collect()
        ),
        Geometry::Line(line) => lines(clip_line(&LineString::new(vec![line.start, line.end]), clip)),
        Geometry::LineString(ls) => lines(clip_line(ls, clip)),
        Geometry::MultiLineString(multi) => lines(
            multi.0.iter().flat_map(|ls| clip_line(ls, clip)).collect()
        ),
        Geometry::Polygon(polygon) => polygons(polygon.intersection(clip)),
        Geometry::MultiPolygon(multi) => polygons(multi.intersection(clip)),
        Geometry::Rect(rect) => polygons(rect.to_polygon().intersection(clip)),
        Geometry::Triangle(triangle) => polygons(triangle.to_polygon().intersection(clip)),
        Geometry::GeometryCollection(gc) => collection(
            gc.0.iter().filter_map(|member| intersect(member, clip)).collect()
        ),
    }
}

fn points(mut kept: Vec<Point<f64>>) -> Option<Geometry<f64>> {
    match kept.len() {
        0 => None,
        1 => kept.pop().map(Geometry::Point),
        _ => Some(Geometry::MultiPoint(MultiPoint(kept))),
    }
}

/// Clip one line part, rejoining the pieces the kernel split it into.
/// Separate parts of a multi-line are never joined to each other.
fn clip_line(ls: &LineString<f64>, clip: &MultiPolygon<f64>) -> Vec<LineString<f64>> {
    join_pieces(
        clip.clip(&MultiLineString::new(vec![ls.clone()]), false).0.into_iter()
            .filter(|piece| piece.lines().any(|seg| seg.start != seg.end))
    )
}

fn lines(mut pieces: Vec<LineString<f64>>) -> Option<Geometry<f64>> {
    match pieces.len() {
        0 => None,
        1 => pieces.pop().map(Geometry::LineString),
        _ => Some(Geometry::MultiLineString(MultiLineString::new(pieces))),
    }
}

fn polygons(mut clipped: MultiPolygon<f64>) -> Option<Geometry<f64>> {
    match clipped.0.len() {
        0 => None,
        1 => clipped.0.pop().map(Geometry::Polygon),
        _ => Some(Geometry::MultiPolygon(clipped)),
    }
}

fn collection(mut members: Vec<Geometry<f64>>) -> Option<Geometry<f64>> {
    match members.len() {
        0 => None,
        1 => members.pop(),
        _ => Some(Geometry::GeometryCollection(GeometryCollection(members))),
    }
}

/// Rejoin consecutive clipped pieces where one ends exactly where the next begins.
fn join_pieces(pieces: impl IntoIterator<Item = LineString<f64>>) -> Vec<LineString<f64>> {
    let mut joined: Vec<LineString<f64>> = Vec::new();
    for piece in pieces {
        match joined.last_mut() {
            Some(last) if last.0.last() == piece.0.first() => last.0.extend(piece.0.into_iter().skip(1)),
            _ => joined.push(piece),
        }
    }
    joined
}
