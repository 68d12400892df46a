#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod detector;
pub mod error;
pub mod geometry;
pub mod image;
pub mod types;

// Lower-level building blocks, public for tools and tests.
pub mod config;
pub mod fit;
pub mod profile;
pub mod sampling;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: detector + results.
pub use crate::detector::{CaliperDetector, EdgeDetectionConfig, TraceDirection, TransitionDirection};
pub use crate::error::{ConfigError, ProcessError};
pub use crate::types::{CaliperResult, EdgePoint, FittedLine};

// ROI placement.
pub use crate::geometry::RotatedRect;

// Robust line fitting, usable on its own.
pub use crate::fit::{fit_line, DistanceType, FitError, FitOptions};

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
pub mod prelude {
    pub use crate::image::ImageU8;
    pub use crate::{CaliperDetector, CaliperResult, EdgeDetectionConfig, RotatedRect};
    pub use crate::{TraceDirection, TransitionDirection};
}
