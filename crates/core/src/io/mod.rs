//! Reading and writing raster band files

#[cfg(feature = "gdal")]
mod gdal_io;
#[cfg(not(feature = "gdal"))]
mod native;

#[cfg(feature = "gdal")]
pub use gdal_io::{read_geotiff, write_geotiff, GeoTiffOptions};

#[cfg(not(feature = "gdal"))]
pub use native::{read_geotiff, write_geotiff, GeoTiffOptions};
