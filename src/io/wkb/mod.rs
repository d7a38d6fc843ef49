//! Well-Known Binary (ISO, 2D) encoding for all `geo` geometry types.

mod read;
mod write;

pub(crate) use read::read_geometry;
pub(crate) use write::write_geometry;

/// WKB byte order: little endian
const WKB_LE: u8 = 1;
/// WKB byte order: big endian
const WKB_BE: u8 = 0;

const WKB_POINT: u32 = 1;
const WKB_LINESTRING: u32 = 2;
const WKB_POLYGON: u32 = 3;
const WKB_MULTIPOINT: u32 = 4;
const WKB_MULTILINESTRING: u32 = 5;
const WKB_MULTIPOLYGON: u32 = 6;
const WKB_GEOMETRYCOLLECTION: u32 = 7;
