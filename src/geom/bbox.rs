use geo::{BoundingRect, Coord, Geometry, Rect};

/// Smallest rectangle containing both `a` and `b`.
#[inline]
pub(crate) fn merge_bounds(a: Rect<f64>, b: Rect<f64>) -> Rect<f64> {
    Rect::new(
        Coord {
            x: a.min().x.min(b.min().x),
            y: a.min().y.min(b.min().y),
        },
        Coord {
            x: a.max().x.max(b.max().x),
            y: a.max().y.max(b.max().y),
        }
    )
}

/// Compute the bounding rectangle of all geometries, skipping empty ones.
/// Returns `None` if no geometry has an extent.
pub(crate) fn total_bounds<'a>(geoms: impl IntoIterator<Item = &'a Geometry<f64>>) -> Option<Rect<f64>> {
    geoms.into_iter()
        .filter_map(|geom| geom.bounding_rect())
        .reduce(merge_bounds)
}

/// Closed-interval overlap test: rectangles that share only an edge or corner overlap.
#[inline]
pub(crate) fn bounds_overlap(a: &Rect<f64>, b: &Rect<f64>) -> bool {
    a.min().x <= b.max().x && b.min().x <= a.max().x
        && a.min().y <= b.max().y && b.min().y <= a.max().y
}
