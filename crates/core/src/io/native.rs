//! Native GeoTIFF reading/writing (without GDAL)
//!
//! Uses the `tiff` crate. Handles single-image GeoTIFFs with
//! ModelPixelScale/ModelTiepoint georeferencing; for other formats
//! (JPEG2000, multi-directory TIFFs) enable the `gdal` feature.

use crate::error::{Error, Result};
use crate::raster::{Band, GeoTransform, PixelType};
use std::fs::File;
use std::path::Path;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::encoder::colortype::Gray32Float;
use tiff::encoder::TiffEncoder;
use tiff::tags::Tag;

// GeoTIFF tag numbers (not in the tiff crate's Tag enum)
const MODEL_PIXEL_SCALE: u16 = 33550;
const MODEL_TIEPOINT: u16 = 33922;
const GEO_KEY_DIRECTORY: u16 = 34735;

/// Options for writing GeoTIFF files
#[derive(Debug, Clone)]
pub struct GeoTiffOptions {
    /// Compression (the native writer always emits uncompressed data)
    pub compression: String,
}

impl Default for GeoTiffOptions {
    fn default() -> Self {
        Self {
            compression: "NONE".to_string(),
        }
    }
}

/// Read a GeoTIFF file into a Band.
///
/// The native backend reads the first image of the file; the `band`
/// argument is accepted for signature parity with the GDAL backend but
/// only band 1 is supported.
pub fn read_geotiff<P>(path: P, band: Option<usize>) -> Result<Band>
where
    P: AsRef<Path>,
{
    if let Some(b) = band {
        if b != 1 {
            return Err(Error::Other(format!(
                "native backend reads band 1 only, requested band {}",
                b
            )));
        }
    }

    let file = File::open(path.as_ref())?;
    let mut decoder =
        Decoder::new(file).map_err(|e| Error::Codec(format!("TIFF decode error: {}", e)))?;

    let (width, height) = decoder
        .dimensions()
        .map_err(|e| Error::Codec(format!("Cannot read dimensions: {}", e)))?;

    let rows = height as usize;
    let cols = width as usize;

    let result = decoder
        .read_image()
        .map_err(|e| Error::Codec(format!("Cannot read image data: {}", e)))?;

    // All sample types are widened to f32 in memory; the source type is
    // recorded on the band for profile reporting.
    let (data, dtype): (Vec<f32>, PixelType) = match result {
        DecodingResult::F32(buf) => (buf, PixelType::Float32),
        DecodingResult::F64(buf) => {
            (buf.iter().map(|&v| v as f32).collect(), PixelType::Float64)
        }
        DecodingResult::U8(buf) => (buf.iter().map(|&v| v as f32).collect(), PixelType::UInt8),
        DecodingResult::U16(buf) => (buf.iter().map(|&v| v as f32).collect(), PixelType::UInt16),
        DecodingResult::U32(buf) => (buf.iter().map(|&v| v as f32).collect(), PixelType::UInt32),
        DecodingResult::I8(buf) => (buf.iter().map(|&v| v as f32).collect(), PixelType::Int8),
        DecodingResult::I16(buf) => (buf.iter().map(|&v| v as f32).collect(), PixelType::Int16),
        DecodingResult::I32(buf) => (buf.iter().map(|&v| v as f32).collect(), PixelType::Int32),
        _ => {
            return Err(Error::UnsupportedDataType(
                "Unsupported TIFF pixel format".to_string(),
            ))
        }
    };

    if data.len() != rows * cols {
        return Err(Error::InvalidDimensions {
            width: cols,
            height: rows,
        });
    }

    let mut band = Band::from_vec(data, rows, cols)?;
    band.set_dtype(dtype);

    if let Ok(transform) = read_geotransform(&mut decoder) {
        band.set_transform(transform);
    }

    Ok(band)
}

/// Attempt to read the geotransform from GeoTIFF tags
fn read_geotransform<R: std::io::Read + std::io::Seek>(
    decoder: &mut Decoder<R>,
) -> Result<GeoTransform> {
    let scale = decoder
        .get_tag_f64_vec(Tag::Unknown(MODEL_PIXEL_SCALE))
        .map_err(|_| Error::Codec("No pixel scale tag".into()))?;

    let tiepoint = decoder
        .get_tag_f64_vec(Tag::Unknown(MODEL_TIEPOINT))
        .map_err(|_| Error::Codec("No tiepoint tag".into()))?;

    if scale.len() >= 2 && tiepoint.len() >= 6 {
        // tiepoint: [I, J, K, X, Y, Z]; scale: [ScaleX, ScaleY, ScaleZ]
        let origin_x = tiepoint[3] - tiepoint[0] * scale[0];
        let origin_y = tiepoint[4] + tiepoint[1] * scale[1];
        let pixel_width = scale[0];
        let pixel_height = -scale[1]; // Negative for north-up

        return Ok(GeoTransform::new(
            origin_x,
            origin_y,
            pixel_width,
            pixel_height,
        ));
    }

    Err(Error::Codec("Cannot determine geotransform".into()))
}

/// Write a Band to a GeoTIFF file.
///
/// Always writes a single 32-bit float band with pixel-scale, tiepoint and
/// GeoKey directory tags, so the output opens as a GeoTIFF in GIS tools.
pub fn write_geotiff<P>(band: &Band, path: P, _options: Option<GeoTiffOptions>) -> Result<()>
where
    P: AsRef<Path>,
{
    let file = File::create(path.as_ref())?;

    let mut encoder =
        TiffEncoder::new(file).map_err(|e| Error::Codec(format!("TIFF encoder error: {}", e)))?;

    let (rows, cols) = band.shape();

    let mut image = encoder
        .new_image::<Gray32Float>(cols as u32, rows as u32)
        .map_err(|e| Error::Codec(format!("Cannot create TIFF image: {}", e)))?;

    let gt = band.transform();

    let scale = vec![gt.pixel_width, gt.pixel_height.abs(), 0.0];
    image
        .encoder()
        .write_tag(Tag::Unknown(MODEL_PIXEL_SCALE), scale.as_slice())
        .map_err(|e| Error::Codec(format!("Cannot write scale tag: {}", e)))?;

    let tiepoint = vec![0.0, 0.0, 0.0, gt.origin_x, gt.origin_y, 0.0];
    image
        .encoder()
        .write_tag(Tag::Unknown(MODEL_TIEPOINT), tiepoint.as_slice())
        .map_err(|e| Error::Codec(format!("Cannot write tiepoint tag: {}", e)))?;

    // Minimal GeoKey directory: GTModelTypeGeoKey=1 (Projected),
    // GTRasterTypeGeoKey=1 (RasterPixelIsArea).
    let geokeys: Vec<u16> = vec![
        1, 1, 0, 2, // Version 1.1.0, 2 keys
        1024, 0, 1, 1, // GTModelTypeGeoKey = ModelTypeProjected
        1025, 0, 1, 1, // GTRasterTypeGeoKey = RasterPixelIsArea
    ];
    image
        .encoder()
        .write_tag(Tag::Unknown(GEO_KEY_DIRECTORY), geokeys.as_slice())
        .map_err(|e| Error::Codec(format!("Cannot write geokey tag: {}", e)))?;

    let data: Vec<f32> = band.data().iter().copied().collect();
    image
        .write_data(&data)
        .map_err(|e| Error::Codec(format!("Cannot write image data: {}", e)))?;

    Ok(())
}
