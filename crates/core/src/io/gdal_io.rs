//! Raster reading and writing through GDAL
//!
//! Handles every raster format GDAL supports (GeoTIFF, JPEG2000, ...).

use crate::crs::Crs;
use crate::error::{Error, Result};
use crate::raster::{Band, GeoTransform, PixelType};
use gdal::raster::{Buffer, GdalDataType, RasterCreationOption};
use gdal::spatial_ref::SpatialRef;
use gdal::{Dataset, DriverManager};
use std::path::Path;

/// Options for writing GeoTIFF files
#[derive(Debug, Clone)]
pub struct GeoTiffOptions {
    /// Compression type: "DEFLATE", "LZW", "ZSTD", "NONE"
    pub compression: String,
    /// Tile size for tiled TIFFs (0 for strips)
    pub tile_size: usize,
    /// BigTIFF for files > 4GB
    pub bigtiff: bool,
}

impl Default for GeoTiffOptions {
    fn default() -> Self {
        Self {
            compression: "DEFLATE".to_string(),
            tile_size: 256,
            bigtiff: false,
        }
    }
}

fn pixel_type(dt: GdalDataType) -> Result<PixelType> {
    match dt {
        GdalDataType::UInt8 => Ok(PixelType::UInt8),
        GdalDataType::UInt16 => Ok(PixelType::UInt16),
        GdalDataType::UInt32 => Ok(PixelType::UInt32),
        GdalDataType::Int8 => Ok(PixelType::Int8),
        GdalDataType::Int16 => Ok(PixelType::Int16),
        GdalDataType::Int32 => Ok(PixelType::Int32),
        GdalDataType::Float32 => Ok(PixelType::Float32),
        GdalDataType::Float64 => Ok(PixelType::Float64),
        other => Err(Error::UnsupportedDataType(format!("{:?}", other))),
    }
}

/// Read one band of a raster file into a `Band`.
///
/// `band` is 1-indexed and defaults to 1. Pixel values are read as `f32`
/// regardless of the on-disk type; the on-disk type and the file's band
/// count are recorded on the returned `Band` for profile reporting.
pub fn read_geotiff<P>(path: P, band: Option<usize>) -> Result<Band>
where
    P: AsRef<Path>,
{
    let dataset = Dataset::open(path.as_ref())?;
    let band_idx = band.unwrap_or(1);
    let rasterband = dataset.rasterband(band_idx)?;

    let (cols, rows) = dataset.raster_size();

    let buffer = rasterband.read_as::<f32>((0, 0), (cols, rows), (cols, rows), None)?;

    let mut out = Band::from_vec(buffer.data().to_vec(), rows, cols)?;
    out.set_dtype(pixel_type(rasterband.band_type())?);
    out.set_source_bands(dataset.raster_count());

    if let Ok(gt) = dataset.geo_transform() {
        out.set_transform(GeoTransform::from_gdal(gt));
    }

    if let Ok(srs) = dataset.spatial_ref() {
        if let Ok(code) = srs.auth_code() {
            out.set_crs(Some(Crs::from_epsg(code as u32)));
        } else if let Ok(wkt) = srs.to_wkt() {
            out.set_crs(Some(Crs::from_wkt(wkt)));
        }
    }

    if let Some(nodata) = rasterband.no_data_value() {
        out.set_nodata(Some(nodata as f32));
    }

    Ok(out)
}

/// Write a `Band` to a single-band 32-bit float GeoTIFF.
pub fn write_geotiff<P>(band: &Band, path: P, options: Option<GeoTiffOptions>) -> Result<()>
where
    P: AsRef<Path>,
{
    let opts = options.unwrap_or_default();
    let driver = DriverManager::get_driver_by_name("GTiff")?;

    let (rows, cols) = band.shape();

    let tile_size = opts.tile_size.to_string();
    let mut create_options = vec![RasterCreationOption {
        key: "COMPRESS",
        value: &opts.compression,
    }];

    if opts.tile_size > 0 {
        create_options.push(RasterCreationOption {
            key: "TILED",
            value: "YES",
        });
        create_options.push(RasterCreationOption {
            key: "BLOCKXSIZE",
            value: &tile_size,
        });
        create_options.push(RasterCreationOption {
            key: "BLOCKYSIZE",
            value: &tile_size,
        });
    }

    if opts.bigtiff {
        create_options.push(RasterCreationOption {
            key: "BIGTIFF",
            value: "YES",
        });
    }

    let mut dataset = driver.create_with_band_type_with_options::<f32, _>(
        path.as_ref(),
        cols,
        rows,
        1,
        &create_options,
    )?;

    dataset.set_geo_transform(&band.transform().to_gdal())?;

    if let Some(crs) = band.crs() {
        if let Some(epsg) = crs.epsg() {
            let srs = SpatialRef::from_epsg(epsg)?;
            dataset.set_spatial_ref(&srs)?;
        } else if let Some(wkt) = crs.wkt() {
            let srs = SpatialRef::from_wkt(wkt)?;
            dataset.set_spatial_ref(&srs)?;
        }
    }

    let mut rasterband = dataset.rasterband(1)?;

    if let Some(nodata) = band.nodata() {
        rasterband.set_no_data_value(Some(nodata as f64))?;
    }

    let data: Vec<f32> = band.data().iter().copied().collect();
    let mut buffer = Buffer::new((cols, rows), data);
    rasterband.write((0, 0), (cols, rows), &mut buffer)?;

    Ok(())
}
