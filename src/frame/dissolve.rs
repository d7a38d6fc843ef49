use std::collections::HashMap;

use anyhow::{Context, Result};
use geo::Geometry;
use polars::prelude::DataType;

use crate::{frame::{take_rows, FeatureFrame}, geom::{polygonal, union_all}};

impl FeatureFrame {
    /// Merge features that share a value in column `by` into one feature per value.
    /// Groups appear in order of first occurrence, each group's polygons are unioned,
    /// and every other column keeps the value from the group's first row.
    pub fn dissolve(&self, by: &str) -> Result<Self> {
        let keys = self.column(by)?
            .as_materialized_series()
            .cast(&DataType::String)
            .with_context(|| format!("Cannot group by column '{by}'"))?;
        let keys = keys.str()?;

        let mut index: HashMap<Option<&str>, usize> = HashMap::new();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (row, key) in keys.into_iter().enumerate() {
            let group = *index.entry(key).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[group].push(row);
        }

        let geometry = groups.iter()
            .map(|rows| {
                let parts = rows.iter()
                    .map(|&row| polygonal(&self.geometry()[row])
                        .with_context(|| format!("Cannot dissolve non-polygonal geometry at row {row}")))
                    .collect::<Result<Vec<_>>>()?;
                let mut union = union_all(parts);
                Ok(match union.0.len() {
                    1 => Geometry::Polygon(union.0.remove(0)),
                    _ => Geometry::MultiPolygon(union),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let firsts = groups.iter().map(|rows| rows[0]).collect::<Vec<_>>();
        Ok(FeatureFrame::new(geometry, take_rows(self.attributes(), &firsts)?)?.with_epsg(self.epsg()))
    }
}
