use anyhow::{bail, Context, Result};
use geo::{Geometry, Intersects, MultiPolygon, Rect};
use polars::prelude::*;

use crate::{frame::{take_rows, FeatureCollection}, geom::{polygonal, total_bounds, union_all, GeomType}};

/// FeatureFrame is an in-memory spatial dataframe: one geometry per row plus
/// a polars table of attribute columns, sharing one coordinate reference system.
#[derive(Debug, Clone)]
pub struct FeatureFrame {
    geometry: Vec<Geometry<f64>>,
    attributes: DataFrame,
    epsg: Option<u32>, // EPSG code, if known
}

impl FeatureFrame {
    /// Construct a FeatureFrame from geometries and a matching attribute table.
    /// A table with no columns is accepted for any number of geometries.
    pub fn new(geometry: Vec<Geometry<f64>>, attributes: DataFrame) -> Result<Self> {
        if attributes.width() > 0 && attributes.height() != geometry.len() {
            bail!(
                "Attribute table has {} rows but there are {} geometries",
                attributes.height(), geometry.len()
            );
        }
        Ok(Self { geometry, attributes, epsg: None })
    }

    /// Construct a FeatureFrame with geometry only.
    pub fn from_geometry(geometry: Vec<Geometry<f64>>) -> Self {
        Self { geometry, attributes: DataFrame::empty(), epsg: None }
    }

    /// Set the EPSG code of the coordinate reference system.
    pub fn with_epsg(mut self, epsg: impl Into<Option<u32>>) -> Self {
        self.epsg = epsg.into();
        self
    }

    /// Add or replace an attribute column. The column must have one value per feature.
    pub fn with_column(mut self, column: Series) -> Result<Self> {
        if column.len() != self.len() {
            bail!("Column '{}' has {} values but there are {} features", column.name(), column.len(), self.len());
        }
        if self.attributes.width() == 0 {
            self.attributes = DataFrame::new(vec![column.into_column()])?;
        } else {
            self.attributes.with_column(column)?;
        }
        Ok(self)
    }

    /// Get the number of features.
    #[inline] pub fn len(&self) -> usize { self.geometry.len() }

    /// Check if there are no features.
    #[inline] pub fn is_empty(&self) -> bool { self.geometry.is_empty() }

    /// Get a reference to the geometry of every feature.
    #[inline] pub fn geometry(&self) -> &[Geometry<f64>] { &self.geometry }

    /// Get a reference to the attribute table.
    #[inline] pub fn attributes(&self) -> &DataFrame { &self.attributes }

    /// Get the EPSG code, if known.
    #[inline] pub fn epsg(&self) -> Option<u32> { self.epsg }

    /// Get an attribute column by name.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.attributes.column(name)
            .with_context(|| format!("No attribute column named '{name}'"))
    }

    /// Geometry type of every feature.
    pub fn geom_types(&self) -> Vec<GeomType> {
        self.geometry.iter().map(GeomType::of).collect()
    }

    /// Compute the bounding rectangle of all features.
    pub fn total_bounds(&self) -> Option<Rect<f64>> { total_bounds(&self.geometry) }

    /// Compute the union of all features into a single MultiPolygon.
    /// Returns `None` if the frame is empty or any feature is not polygonal.
    pub fn unary_union(&self) -> Option<MultiPolygon<f64>> {
        if self.is_empty() { return None }
        let parts = self.geometry.iter().map(polygonal).collect::<Option<Vec<_>>>()?;
        Some(union_all(parts))
    }

    /// Test each feature for intersection with an area.
    pub fn intersects(&self, area: &MultiPolygon<f64>) -> Vec<bool> {
        self.geometry.iter().map(|geom| geom.intersects(area)).collect()
    }

    /// Select features by row position, keeping the schema and reference system.
    pub fn take(&self, rows: &[usize]) -> Result<Self> {
        let geometry = rows.iter()
            .map(|&row| self.geometry.get(row).cloned()
                .with_context(|| format!("Row {row} out of bounds for {} features", self.len())))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { geometry, attributes: take_rows(&self.attributes, rows)?, epsg: self.epsg })
    }
}

impl FeatureCollection for FeatureFrame {
    fn geometry(&self) -> &[Geometry<f64>] { &self.geometry }

    fn attributes(&self) -> &DataFrame { &self.attributes }

    fn epsg(&self) -> Option<u32> { self.epsg }
}
