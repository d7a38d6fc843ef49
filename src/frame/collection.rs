use geo::{Geometry, Rect};
use polars::frame::DataFrame;

use crate::geom::total_bounds;

/// A spatial feature collection: an ordered sequence of geometries, each
/// paired with one row of an attribute table, in one reference system.
///
/// Attribute tables may have zero columns, in which case their height is not
/// meaningful and only the geometry count defines the number of features.
pub trait FeatureCollection {
    /// Geometry of every feature, in row order.
    fn geometry(&self) -> &[Geometry<f64>];

    /// Non-geometry attribute columns, one row per feature.
    fn attributes(&self) -> &DataFrame;

    /// EPSG code of the coordinate reference system, if known.
    fn epsg(&self) -> Option<u32> { None }

    /// Smallest rectangle containing every non-empty geometry, or `None` if there is none.
    fn bounding_box(&self) -> Option<Rect<f64>> { total_bounds(self.geometry()) }
}
