//! Imagery analysis
//!
//! Spectral index computation over single-band rasters.

mod ndvi;

pub use ndvi::ndvi;
