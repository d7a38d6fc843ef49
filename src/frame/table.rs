use anyhow::{Context, Result};
use polars::prelude::*;

use crate::{error::ClipError, frame::FeatureFrame, io::wkb};

/// Select rows of an attribute table by position, in the given order.
/// A table with no columns stays empty.
pub(crate) fn take_rows(df: &DataFrame, rows: &[usize]) -> Result<DataFrame> {
    if df.width() == 0 { return Ok(DataFrame::empty()) }

    if let Some(&row) = rows.iter().find(|&&row| row >= df.height()) {
        anyhow::bail!("Row {row} out of bounds for table of height {}", df.height());
    }

    let idx = IdxCa::from_vec("idx".into(), rows.iter().map(|&row| row as IdxSize).collect());
    df.take(&idx).context("Failed to select attribute rows")
}

impl FeatureFrame {
    /// Read a FeatureFrame from a table whose `geometry_column` holds WKB.
    /// All other columns become attributes.
    ///
    /// A table without that column, a non-binary column, a null geometry, or
    /// undecodable WKB is not a spatial table and fails with [`ClipError::InvalidInput`].
    pub fn from_dataframe(df: &DataFrame, geometry_column: &str, epsg: Option<u32>) -> crate::Result<Self> {
        let column = df.column(geometry_column)
            .map_err(|_| ClipError::invalid(format!("table has no geometry column '{geometry_column}'")))?;
        let wkb_values = column.as_materialized_series().binary()
            .map_err(|_| ClipError::invalid(format!(
                "geometry column '{geometry_column}' has type {}, expected binary WKB", column.dtype()
            )))?;

        let geometry = wkb_values.into_iter().enumerate()
            .map(|(row, bytes)| {
                let bytes = bytes.ok_or_else(|| ClipError::invalid(format!("null geometry at row {row}")))?;
                wkb::read_geometry(bytes)
                    .map_err(|e| ClipError::invalid(format!("bad geometry at row {row}: {e:#}")))
            })
            .collect::<crate::Result<Vec<_>>>()?;

        let attributes = df.drop(geometry_column).map_err(anyhow::Error::from)?;
        Ok(Self::new(geometry, attributes)?.with_epsg(epsg))
    }

    /// Write the frame to a table, with geometry encoded as WKB in a binary
    /// column named `geometry_column` placed after the attributes.
    pub fn to_dataframe(&self, geometry_column: &str) -> Result<DataFrame> {
        let wkb_values = self.geometry().iter().map(wkb::write_geometry).collect::<Vec<_>>();
        let column = BinaryChunked::from_slice(geometry_column.into(), &wkb_values).into_series();

        let mut df = self.attributes().clone();
        if df.width() == 0 {
            df = DataFrame::new(vec![column.into_column()])?;
        } else {
            if df.get_column_index(geometry_column).is_some() {
                anyhow::bail!("Attribute column '{geometry_column}' collides with the geometry column");
            }
            df.with_column(column)?;
        }
        Ok(df)
    }
}
