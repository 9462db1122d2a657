//! # Verdant Algorithms
//!
//! Vegetation analysis for the Verdant toolkit:
//!
//! - **imagery**: NDVI from co-registered Red/NIR bands
//! - **health**: threshold classification of scene mean NDVI
//! - **audit**: the end-to-end file-to-file audit pipeline

pub mod audit;
pub mod health;
pub mod imagery;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::audit::{vegetation_audit, AuditOutcome};
    pub use crate::health::{assess, HealthReport, HealthStatus};
    pub use crate::imagery::ndvi;
    pub use verdant_core::prelude::*;
}
