//! Single-band raster grid

use crate::crs::Crs;
use crate::error::{Error, Result};
use crate::raster::{GeoTransform, PixelType, Profile};
use ndarray::{Array2, ArrayView2};

/// A georeferenced single-band raster grid of 32-bit float pixels.
///
/// Pixel values are always held as `f32` in memory; `dtype` records the
/// on-disk type of the file the band was read from so the profile can be
/// reported faithfully.
///
/// # Example
///
/// ```ignore
/// use verdant_core::Band;
///
/// let mut band = Band::new(100, 100);
/// band.set(10, 20, 0.42)?;
/// let value = band.get(10, 20)?;
/// ```
#[derive(Debug, Clone)]
pub struct Band {
    /// Pixel data in row-major order (row, col)
    data: Array2<f32>,
    /// Affine georeferencing
    transform: GeoTransform,
    /// Coordinate reference system
    crs: Option<Crs>,
    /// No-data value
    nodata: Option<f32>,
    /// On-disk pixel type of the source file
    dtype: PixelType,
    /// Band count of the source file
    source_bands: usize,
}

impl Band {
    /// Create a new band filled with zeros
    pub fn new(rows: usize, cols: usize) -> Self {
        Self::from_array(Array2::zeros((rows, cols)))
    }

    /// Create a new band filled with a specific value
    pub fn filled(rows: usize, cols: usize, value: f32) -> Self {
        Self::from_array(Array2::from_elem((rows, cols), value))
    }

    /// Create a band from row-major data
    pub fn from_vec(data: Vec<f32>, rows: usize, cols: usize) -> Result<Self> {
        if data.len() != rows * cols {
            return Err(Error::InvalidDimensions {
                width: cols,
                height: rows,
            });
        }

        let array = Array2::from_shape_vec((rows, cols), data)
            .map_err(|e| Error::Other(e.to_string()))?;

        Ok(Self::from_array(array))
    }

    /// Create a band from an ndarray
    pub fn from_array(data: Array2<f32>) -> Self {
        Self {
            data,
            transform: GeoTransform::default(),
            crs: None,
            nodata: None,
            dtype: PixelType::Float32,
            source_bands: 1,
        }
    }

    /// A zero-filled band of the same dimensions, carrying this band's
    /// geotransform and CRS. No-data is cleared and the pixel type is
    /// `Float32`: this is the template for derived rasters.
    pub fn blank_like(&self) -> Band {
        Band {
            data: Array2::zeros(self.data.dim()),
            transform: self.transform,
            crs: self.crs.clone(),
            nodata: None,
            dtype: PixelType::Float32,
            source_bands: 1,
        }
    }

    // Dimensions

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.data.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.data.ncols()
    }

    /// Dimensions as (rows, cols)
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }

    /// Total number of pixels
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the band is empty
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    // Data access

    /// Get value at (row, col)
    pub fn get(&self, row: usize, col: usize) -> Result<f32> {
        self.data
            .get((row, col))
            .copied()
            .ok_or(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            })
    }

    /// Get value at (row, col) without bounds checking
    ///
    /// # Safety
    /// Caller must ensure row < self.rows() and col < self.cols()
    pub unsafe fn get_unchecked(&self, row: usize, col: usize) -> f32 {
        unsafe { *self.data.uget((row, col)) }
    }

    /// Set value at (row, col)
    pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<()> {
        if row >= self.rows() || col >= self.cols() {
            return Err(Error::IndexOutOfBounds {
                row,
                col,
                rows: self.rows(),
                cols: self.cols(),
            });
        }
        self.data[(row, col)] = value;
        Ok(())
    }

    /// Get a view of the underlying data
    pub fn view(&self) -> ArrayView2<'_, f32> {
        self.data.view()
    }

    /// Get a reference to the underlying array
    pub fn data(&self) -> &Array2<f32> {
        &self.data
    }

    /// Get a mutable reference to the underlying array
    pub fn data_mut(&mut self) -> &mut Array2<f32> {
        &mut self.data
    }

    /// Consume the band and return the underlying array
    pub fn into_array(self) -> Array2<f32> {
        self.data
    }

    // Metadata

    /// Get the geotransform
    pub fn transform(&self) -> &GeoTransform {
        &self.transform
    }

    /// Set the geotransform
    pub fn set_transform(&mut self, transform: GeoTransform) {
        self.transform = transform;
    }

    /// Get the CRS
    pub fn crs(&self) -> Option<&Crs> {
        self.crs.as_ref()
    }

    /// Set the CRS
    pub fn set_crs(&mut self, crs: Option<Crs>) {
        self.crs = crs;
    }

    /// Get the no-data value
    pub fn nodata(&self) -> Option<f32> {
        self.nodata
    }

    /// Set the no-data value
    pub fn set_nodata(&mut self, nodata: Option<f32>) {
        self.nodata = nodata;
    }

    /// On-disk pixel type of the source file
    pub fn dtype(&self) -> PixelType {
        self.dtype
    }

    /// Record the on-disk pixel type of the source file
    pub fn set_dtype(&mut self, dtype: PixelType) {
        self.dtype = dtype;
    }

    /// Band count of the source file
    pub fn source_bands(&self) -> usize {
        self.source_bands
    }

    /// Record the band count of the source file
    pub fn set_source_bands(&mut self, count: usize) {
        self.source_bands = count;
    }

    /// Snapshot of this band's geospatial metadata
    pub fn profile(&self) -> Profile {
        Profile {
            width: self.cols(),
            height: self.rows(),
            dtype: self.dtype,
            count: self.source_bands,
            transform: self.transform,
            crs: self.crs.clone(),
            nodata: self.nodata,
        }
    }

    /// Cell size (assumes square cells)
    pub fn cell_size(&self) -> f64 {
        self.transform.cell_size()
    }

    /// Geographic bounds (min_x, min_y, max_x, max_y)
    pub fn bounds(&self) -> (f64, f64, f64, f64) {
        self.transform.bounds(self.cols(), self.rows())
    }

    // Value checks

    /// Check if a value is no-data (NaN always is)
    pub fn is_nodata(&self, value: f32) -> bool {
        if value.is_nan() {
            return true;
        }
        match self.nodata {
            Some(nd) => (value - nd).abs() < f32::EPSILON,
            None => false,
        }
    }

    // Statistics

    /// Basic statistics over valid pixels (no-data and NaN are skipped).
    ///
    /// `mean` is `None` when the band has no valid pixels.
    pub fn statistics(&self) -> BandStatistics {
        let mut min: Option<f32> = None;
        let mut max: Option<f32> = None;
        let mut sum: f64 = 0.0;
        let mut count: usize = 0;

        for &value in self.data.iter() {
            if self.is_nodata(value) {
                continue;
            }

            if min.is_none() || value < min.unwrap() {
                min = Some(value);
            }
            if max.is_none() || value > max.unwrap() {
                max = Some(value);
            }

            sum += value as f64;
            count += 1;
        }

        let mean = if count > 0 {
            Some(sum / count as f64)
        } else {
            None
        };

        BandStatistics {
            min,
            max,
            mean,
            valid_count: count,
            nodata_count: self.len() - count,
        }
    }
}

/// Basic statistics for a band
#[derive(Debug, Clone)]
pub struct BandStatistics {
    pub min: Option<f32>,
    pub max: Option<f32>,
    pub mean: Option<f64>,
    pub valid_count: usize,
    pub nodata_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_creation() {
        let band = Band::new(100, 200);
        assert_eq!(band.rows(), 100);
        assert_eq!(band.cols(), 200);
        assert_eq!(band.shape(), (100, 200));
    }

    #[test]
    fn test_band_access() {
        let mut band = Band::new(10, 10);
        band.set(5, 5, 0.42).unwrap();
        assert_eq!(band.get(5, 5).unwrap(), 0.42);
        assert!(band.get(10, 0).is_err());
    }

    #[test]
    fn test_blank_like_carries_metadata() {
        let mut band = Band::new(10, 10);
        band.set_transform(GeoTransform::new(399960.0, 6300040.0, 10.0, -10.0));
        band.set_crs(Some(Crs::from_epsg(32719)));
        band.set_nodata(Some(-9999.0));
        band.set_dtype(PixelType::UInt16);

        let out = band.blank_like();
        assert_eq!(out.transform(), band.transform());
        assert_eq!(out.crs(), band.crs());
        assert_eq!(out.nodata(), None);
        assert_eq!(out.dtype(), PixelType::Float32);
    }

    #[test]
    fn test_statistics_skips_nan() {
        let mut band = Band::filled(4, 4, 2.0);
        band.set(0, 0, f32::NAN).unwrap();
        band.set(0, 1, 6.0).unwrap();

        let stats = band.statistics();
        assert_eq!(stats.valid_count, 15);
        assert_eq!(stats.nodata_count, 1);
        assert_eq!(stats.min, Some(2.0));
        assert_eq!(stats.max, Some(6.0));
        // (14 * 2.0 + 6.0) / 15
        let expected = (14.0 * 2.0 + 6.0) / 15.0;
        assert!((stats.mean.unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn test_statistics_all_nan() {
        let band = Band::filled(3, 3, f32::NAN);
        let stats = band.statistics();
        assert_eq!(stats.valid_count, 0);
        assert_eq!(stats.mean, None);
    }

    #[test]
    fn test_statistics_respects_nodata_value() {
        let mut band = Band::filled(2, 2, 1.0);
        band.set_nodata(Some(-9999.0));
        band.set(0, 0, -9999.0).unwrap();

        let stats = band.statistics();
        assert_eq!(stats.valid_count, 3);
        assert_eq!(stats.mean, Some(1.0));
    }

    #[test]
    fn test_profile_snapshot() {
        let mut band = Band::new(50, 80);
        band.set_transform(GeoTransform::new(0.0, 50.0, 1.0, -1.0));
        band.set_dtype(PixelType::UInt16);
        band.set_source_bands(4);

        let profile = band.profile();
        assert_eq!((profile.width, profile.height), (80, 50));
        assert_eq!(profile.dtype, PixelType::UInt16);
        assert_eq!(profile.count, 4);
    }
}
