//! Normalized Difference Vegetation Index
//!
//! `NDVI = (NIR - Red) / (NIR + Red)`
//!
//! Values range from -1 to 1:
//! - Dense vegetation: 0.6 to 0.9
//! - Sparse vegetation: 0.2 to 0.5
//! - Bare soil: 0.1 to 0.2
//! - Water/clouds: -1.0 to 0.0

use ndarray::Array2;
use rayon::prelude::*;
use verdant_core::raster::Band;
use verdant_core::{Error, Result};

/// Compute NDVI from co-registered NIR and Red bands.
///
/// The inputs must have identical dimensions; a mismatch is rejected with
/// [`Error::SizeMismatch`]. Pixels where either input is NaN or no-data,
/// or where the denominator `nir + red` is exactly zero, are NaN in the
/// output. The division is masked per pixel; no global floating-point
/// state is involved.
///
/// The output carries the Red band's geotransform and CRS (the Red input
/// is the metadata template for the derived raster) and NaN as its
/// no-data value.
///
/// # Arguments
/// * `nir` - Near-infrared band (e.g., Sentinel-2 B8)
/// * `red` - Red band (e.g., Sentinel-2 B4)
pub fn ndvi(nir: &Band, red: &Band) -> Result<Band> {
    check_dimensions(nir, red)?;

    let (rows, cols) = red.shape();

    let data: Vec<f32> = (0..rows)
        .into_par_iter()
        .flat_map(|row| {
            let mut row_data = vec![f32::NAN; cols];
            for col in 0..cols {
                let n = unsafe { nir.get_unchecked(row, col) };
                let r = unsafe { red.get_unchecked(row, col) };

                if nir.is_nodata(n) || red.is_nodata(r) {
                    continue;
                }

                let sum = n + r;
                if sum == 0.0 {
                    continue; // 0/0 stays NaN
                }

                row_data[col] = (n - r) / sum;
            }
            row_data
        })
        .collect();

    let mut output = red.blank_like();
    output.set_nodata(Some(f32::NAN));
    *output.data_mut() =
        Array2::from_shape_vec((rows, cols), data).map_err(|e| Error::Other(e.to_string()))?;

    Ok(output)
}

fn check_dimensions(a: &Band, b: &Band) -> Result<()> {
    if a.shape() != b.shape() {
        return Err(Error::SizeMismatch {
            expected_rows: a.rows(),
            expected_cols: a.cols(),
            actual_rows: b.rows(),
            actual_cols: b.cols(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_core::{Crs, GeoTransform};

    fn make_band(rows: usize, cols: usize, value: f32) -> Band {
        let mut b = Band::filled(rows, cols, value);
        b.set_transform(GeoTransform::new(0.0, rows as f64, 1.0, -1.0));
        b
    }

    #[test]
    fn test_ndvi_basic() {
        let nir = make_band(5, 5, 0.5);
        let red = make_band(5, 5, 0.1);

        let result = ndvi(&nir, &red).unwrap();
        let val = result.get(2, 2).unwrap();

        // (0.5 - 0.1) / (0.5 + 0.1) ≈ 0.6667
        let expected = (0.5 - 0.1) / (0.5 + 0.1_f32);
        assert!(
            (val - expected).abs() < 1e-6,
            "Expected {}, got {}",
            expected,
            val
        );
    }

    #[test]
    fn test_equal_bands_give_zero() {
        let nir = make_band(5, 5, 0.3);
        let red = make_band(5, 5, 0.3);

        let result = ndvi(&nir, &red).unwrap();
        for row in 0..5 {
            for col in 0..5 {
                assert_eq!(result.get(row, col).unwrap(), 0.0);
            }
        }
    }

    #[test]
    fn test_saturation_cases() {
        // red = 0, nir > 0 → 1 (dense vegetation saturation)
        let result = ndvi(&make_band(3, 3, 0.8), &make_band(3, 3, 0.0)).unwrap();
        assert_eq!(result.get(1, 1).unwrap(), 1.0);

        // nir = 0, red > 0 → -1
        let result = ndvi(&make_band(3, 3, 0.0), &make_band(3, 3, 0.8)).unwrap();
        assert_eq!(result.get(1, 1).unwrap(), -1.0);
    }

    #[test]
    fn test_zero_denominator_is_nan() {
        let nir = make_band(3, 3, 0.0);
        let red = make_band(3, 3, 0.0);

        // Must not panic; every pixel is NaN
        let result = ndvi(&nir, &red).unwrap();
        for row in 0..3 {
            for col in 0..3 {
                assert!(result.get(row, col).unwrap().is_nan());
            }
        }
    }

    #[test]
    fn test_water_is_negative() {
        let nir = make_band(5, 5, 0.05);
        let red = make_band(5, 5, 0.15);

        let result = ndvi(&nir, &red).unwrap();
        assert!(result.get(2, 2).unwrap() < 0.0);
    }

    #[test]
    fn test_output_range() {
        let mut nir = Band::new(10, 10);
        let mut red = Band::new(10, 10);
        for row in 0..10 {
            for col in 0..10 {
                nir.set(row, col, 0.1 + (row * 10 + col) as f32 * 0.01).unwrap();
                red.set(row, col, 0.5 - (row * 10 + col) as f32 * 0.004).unwrap();
            }
        }

        let result = ndvi(&nir, &red).unwrap();
        for row in 0..10 {
            for col in 0..10 {
                let val = result.get(row, col).unwrap();
                if !val.is_nan() {
                    assert!((-1.0..=1.0).contains(&val), "NDVI out of range: {}", val);
                }
            }
        }
    }

    #[test]
    fn test_nodata_propagates() {
        let mut nir = make_band(5, 5, 0.5);
        nir.set_nodata(Some(-9999.0));
        nir.set(2, 2, -9999.0).unwrap();

        let red = make_band(5, 5, 0.1);

        let result = ndvi(&nir, &red).unwrap();
        assert!(result.get(2, 2).unwrap().is_nan());
        assert!(!result.get(0, 0).unwrap().is_nan());
    }

    #[test]
    fn test_output_carries_red_metadata() {
        let nir = make_band(4, 4, 0.5);
        let mut red = make_band(4, 4, 0.1);
        red.set_transform(GeoTransform::new(399960.0, 6300040.0, 10.0, -10.0));
        red.set_crs(Some(Crs::from_epsg(32719)));

        let result = ndvi(&nir, &red).unwrap();
        assert_eq!(result.transform(), red.transform());
        assert_eq!(result.crs(), red.crs());
        assert!(result.nodata().unwrap().is_nan());
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let nir = make_band(5, 5, 0.5);
        let red = make_band(5, 10, 0.1);

        let result = ndvi(&nir, &red);
        assert!(matches!(result, Err(Error::SizeMismatch { .. })));
    }
}
