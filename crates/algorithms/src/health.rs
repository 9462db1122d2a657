//! Vegetation health classification
//!
//! Classifies the scene-wide mean NDVI into a coarse health status.
//! Above `DENSE_VEGETATION_THRESHOLD` the canopy is closed and growing;
//! between the two thresholds growth is sparse; at or below
//! `BARE_SOIL_THRESHOLD` the scene reads as bare soil.

use std::fmt;
use verdant_core::raster::Band;

/// Mean NDVI above this indicates dense, healthy vegetation
pub const DENSE_VEGETATION_THRESHOLD: f64 = 0.4;

/// Mean NDVI at or below this indicates bare soil
pub const BARE_SOIL_THRESHOLD: f64 = 0.2;

/// Coarse health status of an audited scene
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HealthStatus {
    /// Dense vegetation, crops growing as expected
    Healthy,
    /// Sparse growth
    Warning,
    /// Bare soil
    Critical,
}

impl HealthStatus {
    /// Classify a mean NDVI value.
    ///
    /// Comparisons are strictly greater-than: a mean of exactly 0.4
    /// classifies as `Warning` and exactly 0.2 as `Critical`. A NaN mean
    /// (no valid pixels) fails both comparisons and lands on `Critical`.
    pub fn from_mean(mean: f64) -> Self {
        if mean > DENSE_VEGETATION_THRESHOLD {
            HealthStatus::Healthy
        } else if mean > BARE_SOIL_THRESHOLD {
            HealthStatus::Warning
        } else {
            HealthStatus::Critical
        }
    }

    /// The fixed status line reported for this classification
    pub fn message(&self) -> &'static str {
        match self {
            HealthStatus::Healthy => "STATUS: Crops are healthy. Workers are doing their job.",
            HealthStatus::Warning => "STATUS: Warning. Growth is slow. Check irrigation.",
            HealthStatus::Critical => "STATUS: CRITICAL. It looks like bare soil. Did they even plant?",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Result of assessing an NDVI band
#[derive(Debug, Clone, Copy)]
pub struct HealthReport {
    /// Mean NDVI over valid pixels (NaN when no pixel is valid)
    pub mean_ndvi: f64,
    /// Threshold classification of the mean
    pub status: HealthStatus,
}

/// Assess an NDVI band: NaN-ignoring mean, then threshold classification.
pub fn assess(ndvi: &Band) -> HealthReport {
    let mean_ndvi = ndvi.statistics().mean.unwrap_or(f64::NAN);
    HealthReport {
        mean_ndvi,
        status: HealthStatus::from_mean(mean_ndvi),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_branches() {
        assert_eq!(HealthStatus::from_mean(0.5), HealthStatus::Healthy);
        assert_eq!(HealthStatus::from_mean(0.3), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_mean(0.1), HealthStatus::Critical);
        assert_eq!(HealthStatus::from_mean(-0.4), HealthStatus::Critical);
    }

    #[test]
    fn test_threshold_ties_fall_low() {
        assert_eq!(HealthStatus::from_mean(0.4), HealthStatus::Warning);
        assert_eq!(HealthStatus::from_mean(0.2), HealthStatus::Critical);
    }

    #[test]
    fn test_nan_mean_is_critical() {
        assert_eq!(HealthStatus::from_mean(f64::NAN), HealthStatus::Critical);
    }

    #[test]
    fn test_status_messages() {
        assert_eq!(
            HealthStatus::Healthy.to_string(),
            "STATUS: Crops are healthy. Workers are doing their job."
        );
        assert_eq!(
            HealthStatus::Warning.to_string(),
            "STATUS: Warning. Growth is slow. Check irrigation."
        );
        assert_eq!(
            HealthStatus::Critical.to_string(),
            "STATUS: CRITICAL. It looks like bare soil. Did they even plant?"
        );
    }

    #[test]
    fn test_assess_ignores_nan_pixels() {
        let mut band = Band::filled(2, 2, 0.6);
        band.set(0, 0, f32::NAN).unwrap();

        let report = assess(&band);
        assert!((report.mean_ndvi - 0.6).abs() < 1e-6);
        assert_eq!(report.status, HealthStatus::Healthy);
    }

    #[test]
    fn test_assess_all_nan_band() {
        let band = Band::filled(2, 2, f32::NAN);
        let report = assess(&band);
        assert!(report.mean_ndvi.is_nan());
        assert_eq!(report.status, HealthStatus::Critical);
    }
}
