#![doc = "Clip vector features to a polygon boundary"]
mod clip;
mod error;
mod frame;
mod geom;
mod io;

#[doc(inline)]
pub use clip::{clip, clip_dataframes, ClipOptions, GEOMETRY_COLUMN};

#[doc(inline)]
pub use error::{ClipError, Result};

#[doc(inline)]
pub use frame::{FeatureCollection, FeatureFrame};

#[doc(inline)]
pub use geom::GeomType;
