use serde::{Deserialize, Serialize};

/// Default name of the WKB geometry column in attribute tables.
pub const GEOMETRY_COLUMN: &str = "geometry";

/// Runtime options for a clip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClipOptions {
    /// Name of the WKB geometry column used by [`crate::clip_dataframes`].
    pub geometry_column: String,
}

impl Default for ClipOptions {
    fn default() -> Self {
        Self {
            geometry_column: GEOMETRY_COLUMN.to_string(),
        }
    }
}
