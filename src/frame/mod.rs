mod collection;
mod dissolve;
mod frame;
mod table;

pub use collection::FeatureCollection;
pub use frame::FeatureFrame;
pub(crate) use table::take_rows;
