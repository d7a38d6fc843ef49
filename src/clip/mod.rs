mod clip;
mod options;

pub use clip::{clip, clip_dataframes};
pub use options::{ClipOptions, GEOMETRY_COLUMN};
