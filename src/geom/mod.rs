mod bbox;
mod intersect;
mod kind;
mod union;

pub(crate) use bbox::{bounds_overlap, total_bounds};
pub(crate) use intersect::intersect;
pub use kind::GeomType;
pub(crate) use union::{polygonal, union_all};
