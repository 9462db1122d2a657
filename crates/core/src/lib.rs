//! # Verdant Core
//!
//! Core types and I/O for the Verdant vegetation auditing toolkit.
//!
//! This crate provides:
//! - `Band`: a single-band 32-bit float raster grid
//! - `GeoTransform`: affine georeferencing
//! - `Crs`: coordinate reference system handling
//! - `Profile`: the geospatial descriptor attached to a raster file
//! - GeoTIFF reading and writing (GDAL-backed or native)

pub mod crs;
pub mod error;
pub mod io;
pub mod raster;

pub use crs::Crs;
pub use error::{Error, Result};
pub use raster::{Band, BandStatistics, GeoTransform, PixelType, Profile};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::crs::Crs;
    pub use crate::error::{Error, Result};
    pub use crate::raster::{Band, GeoTransform, PixelType, Profile};
}
