//! End-to-end vegetation audit
//!
//! The file-to-file pipeline: read the Red and NIR bands, compute NDVI,
//! write the result as a single-band 32-bit float GeoTIFF carrying the
//! Red input's spatial metadata, and classify the scene mean.

use std::path::Path;

use crate::health::{assess, HealthStatus};
use crate::imagery::ndvi;
use verdant_core::io::{read_geotiff, write_geotiff, GeoTiffOptions};
use verdant_core::raster::Profile;
use verdant_core::Result;

/// Outcome of a vegetation audit
#[derive(Debug, Clone)]
pub struct AuditOutcome {
    /// Mean NDVI over valid pixels (NaN when no pixel is valid)
    pub mean_ndvi: f64,
    /// Threshold classification of the mean
    pub status: HealthStatus,
    /// The profile the output raster was written with
    pub profile: Profile,
}

/// Run the audit: Red + NIR band files in, NDVI GeoTIFF out.
///
/// The Red band's profile, with pixel type forced to `Float32` and band
/// count to 1, becomes the output's metadata. Inputs with mismatched
/// dimensions are rejected. Errors from unreadable inputs or an
/// unwritable output path propagate unchanged; a failed write may leave
/// no file or a truncated file behind.
pub fn vegetation_audit<P, Q, R>(red_path: P, nir_path: Q, output_path: R) -> Result<AuditOutcome>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
    R: AsRef<Path>,
{
    let red = read_geotiff(red_path.as_ref(), None)?;
    let nir = read_geotiff(nir_path.as_ref(), None)?;

    let index = ndvi(&nir, &red)?;

    write_geotiff(&index, output_path.as_ref(), Some(GeoTiffOptions::default()))?;

    let report = assess(&index);

    Ok(AuditOutcome {
        mean_ndvi: report.mean_ndvi,
        status: report.status,
        profile: red.profile().for_float32_output(),
    })
}
