//! Caliper detector assembly: parameters, per-frame buffers and the
//! processing pipeline.

pub mod params;
pub mod pipeline;
pub mod workspace;

pub use params::{EdgeDetectionConfig, TraceDirection, TransitionDirection};
pub use pipeline::CaliperDetector;
