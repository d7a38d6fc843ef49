//! Format-specific encoding of geometry.
//!
//! - `wkb` - Well-Known Binary, used to carry geometry inside a polars Binary column

pub(crate) mod wkb;
