//! Raster band type and geospatial metadata

mod band;
mod geotransform;
mod profile;

pub use band::{Band, BandStatistics};
pub use geotransform::GeoTransform;
pub use profile::{PixelType, Profile};
