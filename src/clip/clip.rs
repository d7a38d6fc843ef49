use geo::MultiPolygon;
use polars::frame::DataFrame;
use tracing::{debug, warn};

use crate::{
    clip::ClipOptions,
    error::{ClipError, Result},
    frame::{take_rows, FeatureCollection, FeatureFrame},
    geom::{bounds_overlap, intersect, polygonal, union_all},
};

/// Clip `target` to the area covered by `boundary`.
///
/// Every target feature is intersected with the union of the boundary's
/// polygons. Features with nothing left are dropped; the rest keep their
/// attributes and relative order. The result carries the target's schema and
/// reference system and none of the boundary's attributes.
///
/// Fails with [`ClipError::InvalidInput`] if the boundary has non-polygonal
/// geometry, and with [`ClipError::DisjointExtent`] if the bounding boxes of
/// the two collections do not overlap (an empty collection has no extent).
pub fn clip<T, B>(target: &T, boundary: &B) -> Result<FeatureFrame>
where
    T: FeatureCollection + ?Sized,
    B: FeatureCollection + ?Sized,
{
    let parts = boundary_polygons(boundary)?;

    let (target_bounds, boundary_bounds) = (target.bounding_box(), boundary.bounding_box());
    match (target_bounds, boundary_bounds) {
        (Some(a), Some(b)) if bounds_overlap(&a, &b) => {}
        _ => return Err(ClipError::DisjointExtent { target: target_bounds, boundary: boundary_bounds }),
    }

    if let (Some(a), Some(b)) = (target.epsg(), boundary.epsg()) {
        if a != b { warn!(target_epsg = a, boundary_epsg = b, "clipping across different reference systems") }
    }

    let mask = union_all(parts);
    debug!(features = target.geometry().len(), mask_parts = mask.0.len(), "clipping features");

    let mut rows = Vec::new();
    let mut geometry = Vec::new();
    for (row, geom) in target.geometry().iter().enumerate() {
        let Some(clipped) = intersect(geom, &mask) else { continue };
        rows.push(row);
        geometry.push(clipped);
    }
    debug!(kept = rows.len(), dropped = target.geometry().len() - rows.len(), "clip finished");

    let attributes = take_rows(target.attributes(), &rows)?;
    Ok(FeatureFrame::new(geometry, attributes)?.with_epsg(target.epsg()))
}

/// Clip two tables that each carry WKB geometry in `options.geometry_column`.
/// The result has the target's columns, with the geometry column last.
///
/// A table without a readable geometry column fails with
/// [`ClipError::InvalidInput`] naming the argument; otherwise as [`clip`].
pub fn clip_dataframes(target: &DataFrame, boundary: &DataFrame, options: &ClipOptions) -> Result<DataFrame> {
    let column = options.geometry_column.as_str();
    let target = FeatureFrame::from_dataframe(target, column, None).map_err(in_argument("target"))?;
    let boundary = FeatureFrame::from_dataframe(boundary, column, None).map_err(in_argument("boundary"))?;
    Ok(clip(&target, &boundary)?.to_dataframe(column)?)
}

/// Read the boundary as polygons, rejecting any feature that has no area.
fn boundary_polygons<B: FeatureCollection + ?Sized>(boundary: &B) -> Result<Vec<MultiPolygon<f64>>> {
    boundary.geometry().iter().enumerate()
        .map(|(row, geom)| polygonal(geom).ok_or_else(|| ClipError::invalid(format!(
            "boundary: feature {row} is not a polygon or multipolygon"
        ))))
        .collect()
}

fn in_argument(name: &'static str) -> impl FnOnce(ClipError) -> ClipError {
    move |err| match err {
        ClipError::InvalidInput(msg) => ClipError::InvalidInput(format!("{name}: {msg}")),
        other => other,
    }
}
