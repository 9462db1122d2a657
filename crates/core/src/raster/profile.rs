//! Raster profile: the geospatial descriptor attached to a raster file

use crate::crs::Crs;
use crate::raster::GeoTransform;
use serde::{Deserialize, Serialize};
use std::fmt;

/// On-disk pixel data type of a raster band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelType {
    UInt8,
    UInt16,
    UInt32,
    Int8,
    Int16,
    Int32,
    Float32,
    Float64,
}

impl fmt::Display for PixelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PixelType::UInt8 => "uint8",
            PixelType::UInt16 => "uint16",
            PixelType::UInt32 => "uint32",
            PixelType::Int8 => "int8",
            PixelType::Int16 => "int16",
            PixelType::Int32 => "int32",
            PixelType::Float32 => "float32",
            PixelType::Float64 => "float64",
        };
        write!(f, "{}", name)
    }
}

/// Snapshot of a raster file's geospatial metadata.
///
/// Captured when a band is read and reused as the template for writing
/// derived rasters. The index pipeline captures the Red band's profile and
/// writes its output with [`Profile::for_float32_output`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Pixel data type
    pub dtype: PixelType,
    /// Number of bands
    pub count: usize,
    /// Affine georeferencing
    pub transform: GeoTransform,
    /// Coordinate reference system, if the source carried one
    pub crs: Option<Crs>,
    /// No-data value, if the source declared one
    pub nodata: Option<f32>,
}

impl Profile {
    /// The same profile with pixel type forced to `Float32` and band count
    /// forced to 1, as required for a derived index raster.
    pub fn for_float32_output(mut self) -> Self {
        self.dtype = PixelType::Float32;
        self.count = 1;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float32_output_override() {
        let profile = Profile {
            width: 10980,
            height: 10980,
            dtype: PixelType::UInt16,
            count: 3,
            transform: GeoTransform::new(399960.0, 6300040.0, 10.0, -10.0),
            crs: Some(Crs::from_epsg(32719)),
            nodata: None,
        };

        let out = profile.clone().for_float32_output();
        assert_eq!(out.dtype, PixelType::Float32);
        assert_eq!(out.count, 1);
        // Spatial metadata is untouched
        assert_eq!(out.transform, profile.transform);
        assert_eq!(out.crs, profile.crs);
        assert_eq!((out.width, out.height), (profile.width, profile.height));
    }
}
