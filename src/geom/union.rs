use geo::{BooleanOps, Geometry, MultiPolygon};

/// Get the polygonal reading of a geometry, or `None` if any part of it has no area.
pub(crate) fn polygonal(geom: &Geometry<f64>) -> Option<MultiPolygon<f64>> {
    match geom {
        Geometry::Polygon(polygon) => Some(MultiPolygon(vec![polygon.clone()])),
        Geometry::MultiPolygon(multi) => Some(multi.clone()),
        Geometry::Rect(rect) => Some(MultiPolygon(vec![rect.to_polygon()])),
        Geometry::Triangle(triangle) => Some(MultiPolygon(vec![triangle.to_polygon()])),
        Geometry::GeometryCollection(gc) => gc.0.iter()
            .map(polygonal)
            .collect::<Option<Vec<_>>>()
            .map(|parts| MultiPolygon(parts.into_iter().flat_map(|multi| multi.0).collect())),
        _ => None,
    }
}

/// Compute the union of all MultiPolygons into a single MultiPolygon,
/// dissolving shared and overlapping boundaries.
/// This method may be slow for large numbers of complex polygons.
pub(crate) fn union_all(polygons: impl IntoIterator<Item = MultiPolygon<f64>>) -> MultiPolygon<f64> {
    // Parts of one MultiPolygon may overlap each other; the overlay kernel
    // reads a single operand even-odd, so each part goes in on its own.
    polygons.into_iter()
        .flat_map(|multi| multi.0)
        .fold(MultiPolygon(vec![]), |acc, polygon| acc.union(&MultiPolygon(vec![polygon])))
}
